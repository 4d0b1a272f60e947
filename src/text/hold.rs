//! Hold-to-commit engine
//!
//! Turns the confirmed symbol stream into typed text. A symbol commits once
//! it has been held for the threshold; switching symbols mid-hold discards
//! the partial hold. After a commit the symbol stays latched, so holding it
//! longer never types it twice; a repeated letter needs a release (no hand)
//! or a different symbol in between. Unconfirmed frames drop a partial hold,
//! so only time spent confirmed counts.
//!
//! "now" is sampled once per frame by the caller; there are no timers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::transcript::Transcript;
use crate::classifier::Symbol;
use crate::error::ConfigError;

/// Default hold time before a symbol commits
pub const DEFAULT_HOLD_MS: u64 = 900;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Hold time in milliseconds
    pub threshold_ms: u64,
    /// Symbol that ends the current word
    pub separator: Symbol,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            threshold_ms: DEFAULT_HOLD_MS,
            separator: Symbol::OpenPalm,
        }
    }
}

impl HoldConfig {
    pub fn threshold(&self) -> Duration {
        Duration::from_millis(self.threshold_ms)
    }
}

/// What is being held and since when.
///
/// `hold_start` is cleared by a commit while `last_symbol` stays set, which
/// is what blocks a second commit for the same hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldState {
    pub last_symbol: Option<Symbol>,
    pub hold_start: Option<Duration>,
}

impl HoldState {
    pub fn is_idle(&self) -> bool {
        self.last_symbol.is_none()
    }
}

/// Transcript edit produced by a commit
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CommitEvent {
    /// A letter appended to the pending word
    Letter(char),
    /// The pending word (possibly empty) moved into the sentence
    WordBreak { word: String },
}

#[derive(Clone, Debug, Default)]
pub struct HoldEngine {
    config: HoldConfig,
    state: HoldState,
    transcript: Transcript,
}

impl HoldEngine {
    pub fn new(config: HoldConfig) -> Self {
        Self {
            config,
            state: HoldState::default(),
            transcript: Transcript::new(),
        }
    }

    pub fn config(&self) -> HoldConfig {
        self.config
    }

    pub fn set_config(&mut self, config: HoldConfig) {
        self.config = config;
    }

    /// Set the hold time from a host-supplied millisecond value
    pub fn set_threshold_ms(&mut self, ms: f64) -> Result<(), ConfigError> {
        if !ms.is_finite() || ms < 0.0 {
            return Err(ConfigError::NegativeDuration(ms));
        }
        self.config.threshold_ms = ms.round() as u64;
        tracing::debug!(threshold_ms = self.config.threshold_ms, "hold threshold changed");
        Ok(())
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Feed one frame's confirmed symbol (`None` = no hand / no match)
    pub fn update(&mut self, symbol: Option<Symbol>, now: Duration) -> Option<CommitEvent> {
        let Some(symbol) = symbol else {
            self.state = HoldState::default();
            return None;
        };

        if self.state.last_symbol != Some(symbol) {
            // New symbol: any partial hold is abandoned uncommitted
            self.state = HoldState {
                last_symbol: Some(symbol),
                hold_start: Some(now),
            };
            return None;
        }

        // Already committed this hold
        let start = self.state.hold_start?;
        if now.saturating_sub(start) < self.config.threshold() {
            return None;
        }

        self.state.hold_start = None;
        self.commit(symbol)
    }

    fn commit(&mut self, symbol: Symbol) -> Option<CommitEvent> {
        let event = if symbol == self.config.separator {
            CommitEvent::WordBreak { word: self.transcript.break_word() }
        } else {
            let letter = symbol.letter()?;
            self.transcript.push_letter(letter);
            CommitEvent::Letter(letter)
        };
        tracing::debug!(%symbol, ?event, "committed");
        Some(event)
    }

    /// Unconfirmed frame: a partial hold is abandoned, a committed latch stays
    pub fn interrupt(&mut self) {
        if self.state.hold_start.is_some() {
            self.state = HoldState::default();
        }
    }

    /// Hold progress in [0, 1] for a progress indicator
    pub fn progress(&self, now: Duration) -> f32 {
        match (self.state.last_symbol, self.state.hold_start) {
            (Some(_), Some(start)) => {
                let threshold = self.config.threshold();
                if threshold.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_sub(start);
                (elapsed.as_secs_f32() / threshold.as_secs_f32()).min(1.0)
            }
            (Some(_), None) => 1.0,
            _ => 0.0,
        }
    }

    /// Zero the transcript and hold state together
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.state = HoldState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(33);

    /// Feed `symbol` every frame for `duration`, starting at `*now`
    fn hold(
        engine: &mut HoldEngine,
        symbol: Option<Symbol>,
        duration: Duration,
        now: &mut Duration,
    ) -> Vec<CommitEvent> {
        let end = *now + duration;
        let mut events = Vec::new();
        while *now <= end {
            events.extend(engine.update(symbol, *now));
            *now += FRAME;
        }
        events
    }

    #[test]
    fn test_short_hold_then_switch_never_commits() {
        let mut engine = HoldEngine::default();
        let mut now = Duration::ZERO;
        let events = hold(&mut engine, Some(Symbol::S), Duration::from_millis(800), &mut now);
        assert!(events.is_empty());

        let events = hold(&mut engine, Some(Symbol::A), Duration::from_millis(400), &mut now);
        assert!(events.is_empty());
        assert_eq!(engine.transcript().text(), "");
        assert_eq!(engine.state().last_symbol, Some(Symbol::A));
    }

    #[test]
    fn test_long_hold_commits_once() {
        let mut engine = HoldEngine::default();
        let mut now = Duration::ZERO;
        let events = hold(&mut engine, Some(Symbol::L), Duration::from_millis(3000), &mut now);
        assert_eq!(events, vec![CommitEvent::Letter('L')]);
        assert_eq!(engine.transcript().pending_word(), "L");
        assert_eq!(engine.state().hold_start, None);
        assert_eq!(engine.progress(now), 1.0);
    }

    #[test]
    fn test_release_allows_repeated_letter() {
        let mut engine = HoldEngine::default();
        let mut now = Duration::ZERO;
        hold(&mut engine, Some(Symbol::L), Duration::from_millis(1000), &mut now);
        hold(&mut engine, None, FRAME, &mut now);
        assert!(engine.state().is_idle());
        hold(&mut engine, Some(Symbol::L), Duration::from_millis(1000), &mut now);
        assert_eq!(engine.transcript().pending_word(), "LL");
    }

    #[test]
    fn test_word_and_space_flow() {
        let mut engine = HoldEngine::default();
        let mut now = Duration::ZERO;
        let long = Duration::from_millis(1200);
        hold(&mut engine, Some(Symbol::H), long, &mut now);
        hold(&mut engine, Some(Symbol::I), long, &mut now);
        let events = hold(&mut engine, Some(Symbol::OpenPalm), long, &mut now);

        assert_eq!(events, vec![CommitEvent::WordBreak { word: "HI".to_string() }]);
        assert_eq!(engine.transcript().sentence(), "HI ");
        assert_eq!(engine.transcript().pending_word(), "");
    }

    #[test]
    fn test_threshold_boundary() {
        let mut engine = HoldEngine::new(HoldConfig {
            threshold_ms: 600,
            ..Default::default()
        });
        assert_eq!(engine.update(Some(Symbol::B), Duration::from_millis(1000)), None);
        assert_eq!(engine.update(Some(Symbol::B), Duration::from_millis(1599)), None);
        assert!((engine.progress(Duration::from_millis(1300)) - 0.5).abs() < 1e-3);
        assert_eq!(
            engine.update(Some(Symbol::B), Duration::from_millis(1600)),
            Some(CommitEvent::Letter('B'))
        );
        assert_eq!(engine.update(Some(Symbol::B), Duration::from_millis(5000)), None);
    }

    #[test]
    fn test_custom_separator() {
        let mut engine = HoldEngine::new(HoldConfig {
            threshold_ms: 100,
            separator: Symbol::B,
        });
        let mut now = Duration::ZERO;
        hold(&mut engine, Some(Symbol::W), Duration::from_millis(200), &mut now);
        hold(&mut engine, Some(Symbol::B), Duration::from_millis(200), &mut now);
        assert_eq!(engine.transcript().sentence(), "W ");

        // Open palm is no longer a separator and has no letter
        let events = hold(&mut engine, Some(Symbol::OpenPalm), Duration::from_millis(200), &mut now);
        assert!(events.is_empty());
        assert_eq!(engine.transcript().text(), "W ");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut engine = HoldEngine::default();
        let mut now = Duration::ZERO;
        hold(&mut engine, Some(Symbol::Y), Duration::from_millis(1000), &mut now);
        engine.update(Some(Symbol::A), now);
        engine.clear();
        assert!(engine.transcript().is_empty());
        assert!(engine.state().is_idle());
        assert_eq!(engine.progress(now), 0.0);
    }

    #[test]
    fn test_interrupt_drops_partial_hold() {
        let mut engine = HoldEngine::default();
        let mut now = Duration::ZERO;
        hold(&mut engine, Some(Symbol::S), Duration::from_millis(500), &mut now);
        engine.interrupt();
        assert!(engine.state().is_idle());

        // Time before the interruption does not count
        now += Duration::from_millis(2000);
        let events = hold(&mut engine, Some(Symbol::S), Duration::from_millis(500), &mut now);
        assert!(events.is_empty());
        let events = hold(&mut engine, Some(Symbol::S), Duration::from_millis(500), &mut now);
        assert_eq!(events, vec![CommitEvent::Letter('S')]);
    }

    #[test]
    fn test_interrupt_keeps_latch() {
        let mut engine = HoldEngine::default();
        let mut now = Duration::ZERO;
        hold(&mut engine, Some(Symbol::S), Duration::from_millis(1000), &mut now);
        engine.interrupt();
        assert_eq!(engine.state().last_symbol, Some(Symbol::S));

        let events = hold(&mut engine, Some(Symbol::S), Duration::from_millis(2000), &mut now);
        assert!(events.is_empty());
        assert_eq!(engine.transcript().pending_word(), "S");
    }

    #[test]
    fn test_set_threshold_ms() {
        let mut engine = HoldEngine::default();
        assert!(engine.set_threshold_ms(-5.0).is_err());
        assert!(engine.set_threshold_ms(f64::NAN).is_err());
        engine.set_threshold_ms(250.4).unwrap();
        assert_eq!(engine.config().threshold_ms, 250);
    }
}
