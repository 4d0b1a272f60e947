//! Rolling vote window for flicker suppression
//!
//! Keeps the last N raw classifications in arrival order. A symbol is
//! confirmed only once it fills a quorum of the full window capacity;
//! anything less is reported as pending. Frames with no signal (no hand,
//! no match) drop the oldest entry instead of clearing the window, so a
//! single-frame tracking dropout decays the vote rather than resetting it.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::classifier::{Classification, Symbol};
use crate::error::ConfigError;

/// Default window capacity in frames
pub const DEFAULT_WINDOW: usize = 10;

/// Default share of the window the winning symbol must hold
pub const DEFAULT_QUORUM: f32 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Window capacity in frames (larger = steadier but slower)
    pub window: usize,
    /// Fraction of `window` the modal symbol must occupy, in (0.5, 1.0]
    pub quorum: f32,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW, quorum: DEFAULT_QUORUM }
    }
}

impl StabilizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window < 2 {
            return Err(ConfigError::WindowTooSmall(self.window));
        }
        // Above one half so two alternating symbols can never both win
        if !(self.quorum > 0.5 && self.quorum <= 1.0) {
            return Err(ConfigError::QuorumOutOfRange(self.quorum));
        }
        Ok(())
    }

    /// Votes needed to confirm: ceil(quorum * window), and never fewer than
    /// one more than an alternating pair of symbols can collect
    pub fn required_votes(&self) -> usize {
        let exact = self.quorum * self.window as f32;
        // Absorb float noise such as 0.6 * 5 = 3.0000002
        let by_quorum = (exact - 1e-4).ceil().max(1.0) as usize;
        by_quorum.max(self.window.div_ceil(2) + 1)
    }
}

/// Stabilizer output for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stabilized {
    /// The window agrees; safe to forward to the commit engine
    Confirmed { symbol: Symbol, confidence: f32 },
    /// No quorum yet; `raw` is this frame's classification, for display only
    Pending { raw: Option<Symbol> },
}

impl Stabilized {
    /// Confirmed symbol, if any
    pub fn confirmed(&self) -> Option<Symbol> {
        match self {
            Stabilized::Confirmed { symbol, .. } => Some(*symbol),
            Stabilized::Pending { .. } => None,
        }
    }

    /// Symbol to show the user this frame, confirmed or not
    pub fn display(&self) -> Option<Symbol> {
        match self {
            Stabilized::Confirmed { symbol, .. } => Some(*symbol),
            Stabilized::Pending { raw } => *raw,
        }
    }

    pub fn confidence(&self) -> f32 {
        match self {
            Stabilized::Confirmed { confidence, .. } => *confidence,
            Stabilized::Pending { .. } => 0.0,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Stabilized::Pending { .. })
    }
}

/// Per-symbol tally while scanning the window
struct Tally {
    votes: usize,
    confidence_sum: f32,
    last_seen: usize,
}

pub struct Stabilizer {
    config: StabilizerConfig,
    /// Oldest at the front
    history: VecDeque<Classification>,
}

impl Stabilizer {
    pub fn new(config: StabilizerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            history: VecDeque::with_capacity(config.window + 1),
        })
    }

    pub fn config(&self) -> StabilizerConfig {
        self.config
    }

    /// Change window size and quorum, keeping the most recent entries
    pub fn reconfigure(&mut self, config: StabilizerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        while self.history.len() > config.window {
            self.history.pop_front();
        }
        tracing::debug!(window = config.window, quorum = config.quorum, "stabilizer reconfigured");
        Ok(())
    }

    /// Feed one frame's raw classification (`None` = no hand or no match)
    pub fn update(&mut self, raw: Option<Classification>) -> Stabilized {
        match raw {
            Some(classification) => {
                self.history.push_back(classification);
                while self.history.len() > self.config.window {
                    self.history.pop_front();
                }
            }
            None => {
                self.history.pop_front();
            }
        }

        let raw_symbol = raw.map(|c| c.symbol);
        let Some((symbol, tally)) = self.mode() else {
            return Stabilized::Pending { raw: raw_symbol };
        };

        let required = self.config.required_votes();
        tracing::trace!(%symbol, votes = tally.votes, required, window = self.history.len(), "vote");

        if tally.votes >= required {
            Stabilized::Confirmed {
                symbol,
                confidence: tally.confidence_sum / tally.votes as f32,
            }
        } else {
            Stabilized::Pending { raw: raw_symbol }
        }
    }

    /// Most frequent symbol; ties go to the most recently seen
    fn mode(&self) -> Option<(Symbol, Tally)> {
        let mut tallies: HashMap<Symbol, Tally> = HashMap::new();
        for (i, entry) in self.history.iter().enumerate() {
            let tally = tallies.entry(entry.symbol).or_insert(Tally {
                votes: 0,
                confidence_sum: 0.0,
                last_seen: 0,
            });
            tally.votes += 1;
            tally.confidence_sum += entry.confidence;
            tally.last_seen = i;
        }

        tallies
            .into_iter()
            .max_by_key(|(_, tally)| (tally.votes, tally.last_seen))
    }

    /// Frames currently in the window
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self {
            config: StabilizerConfig::default(),
            history: VecDeque::with_capacity(DEFAULT_WINDOW + 1),
        }
    }
}
