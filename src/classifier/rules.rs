//! Rule-based sign classification
//!
//! A priority-ordered decision procedure: the curved handshapes (F, O, C)
//! are checked first, then the classifier branches on which of the four
//! non-thumb fingers are extended and disambiguates inside each bucket with
//! scaled distances, lateral offsets and bend angles. First matching rule
//! wins; a bucket with no matching rule returns its default symbol at
//! reduced confidence. Unlisted extension patterns are "no match".
//!
//! | Extended | Rules (in order) | Default |
//! |---|---|---|
//! | none | A, E, S, T, N, M | S |
//! | index | X, G, L | D |
//! | index + middle | R, H, K, U | V |
//! | pinky | Y | I |
//! | index + middle + ring | W | - |
//! | all four | open palm | B |

use nalgebra::Vector3;

use super::symbol::Symbol;
use super::thresholds::Thresholds;
use crate::error::ConfigError;
use crate::fingers::{FingerState, INDEX, MIDDLE, PINKY, RING};
use crate::geometry::{
    Hand, Handedness, Landmark, INDEX_MCP, INDEX_TIP, MIDDLE_DIP, MIDDLE_MCP, MIDDLE_PIP,
    MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_MCP, RING_TIP,
};

/// One frame's classifier output
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub symbol: Symbol,
    /// 1.0 for a positive rule match, lower for a bucket default
    pub confidence: f32,
}

/// Stateless classifier handle carrying its tuning table
#[derive(Clone, Debug, Default)]
pub struct SignClassifier {
    thresholds: Thresholds,
}

impl SignClassifier {
    pub fn new(thresholds: Thresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: Thresholds) -> Result<(), ConfigError> {
        thresholds.validate()?;
        self.thresholds = thresholds;
        Ok(())
    }

    /// Classify one hand; `None` means no sign matched
    pub fn classify(&self, hand: &Hand, handedness: Handedness) -> Option<Classification> {
        let state = FingerState::extract(hand, handedness, &self.thresholds)?;
        self.classify_state(hand, &state)
    }

    /// Classify from an already extracted finger state
    pub fn classify_state(&self, hand: &Hand, state: &FingerState) -> Option<Classification> {
        if let Some(curved) = self.curved(hand, state) {
            return Some(curved);
        }

        match state.pattern() {
            (false, false, false, false) => Some(self.fist(hand, state)),
            (true, false, false, false) => Some(self.index_only(hand, state)),
            (true, true, false, false) => Some(self.index_middle(hand, state)),
            (false, false, false, true) => Some(self.pinky_only(state)),
            (true, true, true, false) => Some(self.matched(Symbol::W)),
            (true, true, true, true) => Some(self.all_extended(hand, state)),
            _ => None,
        }
    }

    fn matched(&self, symbol: Symbol) -> Classification {
        Classification { symbol, confidence: 1.0 }
    }

    fn fallback(&self, symbol: Symbol) -> Classification {
        Classification { symbol, confidence: self.thresholds.fallback_confidence }
    }

    // ========================================================================
    // CURVED FAMILY (F, O, C)
    // ========================================================================

    fn curved(&self, hand: &Hand, state: &FingerState) -> Option<Classification> {
        let t = &self.thresholds;
        let thumb_to_index = state.scaled(state.thumb_tip, hand.point(INDEX_TIP));

        let straight = |finger: usize| {
            state.extended[finger] && state.bend[finger] >= t.straight_min_bend
        };
        if straight(MIDDLE) && straight(RING) && straight(PINKY) && thumb_to_index < t.touch_distance {
            return Some(self.matched(Symbol::F));
        }

        let all_curved = state
            .bend
            .iter()
            .all(|bend| *bend >= t.curl_max_bend && *bend < t.straight_min_bend);
        if !all_curved {
            return None;
        }

        if thumb_to_index < t.touch_distance {
            Some(self.matched(Symbol::O))
        } else if thumb_to_index <= t.c_max_gap {
            Some(self.matched(Symbol::C))
        } else {
            None
        }
    }

    // ========================================================================
    // EXTENSION BUCKETS
    // ========================================================================

    fn fist(&self, hand: &Hand, state: &FingerState) -> Classification {
        let t = &self.thresholds;
        let thumb = state.thumb_tip;

        // Thumb beside the index knuckle
        if state.thumb_offset >= t.fist_thumb_side {
            return self.matched(Symbol::A);
        }

        // Fingertips curled down onto the thumb
        if state.scaled(thumb, hand.point(INDEX_TIP)) < t.fist_tip_rest
            && state.scaled(thumb, hand.point(MIDDLE_TIP)) < t.fist_tip_rest
        {
            return self.matched(Symbol::E);
        }

        let columns = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP]
            .map(|mcp| state.lateral_of(hand, hand.point(mcp)));

        // Thumb across the front of the middle finger
        let middle_centroid = centroid(&[
            hand.point(MIDDLE_MCP),
            hand.point(MIDDLE_PIP),
            hand.point(MIDDLE_DIP),
            hand.point(MIDDLE_TIP),
        ]);
        if (state.thumb_offset - columns[MIDDLE]).abs() < t.fist_column_half_width
            && state.scaled(thumb, middle_centroid) < t.fist_thumb_overlap
        {
            return self.matched(Symbol::S);
        }

        // Thumb tucked into a gap between two fingers
        let gaps = [(INDEX, MIDDLE, Symbol::T), (MIDDLE, RING, Symbol::N), (RING, PINKY, Symbol::M)];
        for (a, b, symbol) in gaps {
            let center = (columns[a] + columns[b]) * 0.5;
            if (state.thumb_offset - center).abs() < t.fist_column_half_width {
                return self.matched(symbol);
            }
        }

        self.fallback(Symbol::S)
    }

    fn index_only(&self, hand: &Hand, state: &FingerState) -> Classification {
        if state.bend[INDEX] < self.thresholds.hook_max_bend {
            self.matched(Symbol::X)
        } else if self.sideways(hand, INDEX_MCP, INDEX_TIP) {
            self.matched(Symbol::G)
        } else if state.thumb_abducted {
            self.matched(Symbol::L)
        } else {
            self.fallback(Symbol::D)
        }
    }

    fn index_middle(&self, hand: &Hand, state: &FingerState) -> Classification {
        let t = &self.thresholds;
        let index_tip = hand.point(INDEX_TIP);
        let middle_tip = hand.point(MIDDLE_TIP);

        // Index crossed over toward the pinky side of the middle finger
        let index_lateral = state.lateral_of(hand, index_tip);
        let middle_lateral = state.lateral_of(hand, middle_tip);
        if index_lateral < middle_lateral - t.cross_margin {
            return self.matched(Symbol::R);
        }

        if self.sideways(hand, INDEX_MCP, INDEX_TIP) && self.sideways(hand, MIDDLE_MCP, MIDDLE_TIP) {
            return self.matched(Symbol::H);
        }

        if state.scaled(state.thumb_tip, hand.point(MIDDLE_PIP)) < t.k_thumb_pip {
            return self.matched(Symbol::K);
        }

        if state.scaled(index_tip, middle_tip) < t.tips_together {
            return self.matched(Symbol::U);
        }

        self.fallback(Symbol::V)
    }

    /// Knuckle-to-tip direction is closer to horizontal than vertical
    fn sideways(&self, hand: &Hand, mcp: usize, tip: usize) -> bool {
        let (base, end) = (hand.point(mcp), hand.point(tip));
        (end.x - base.x).abs() > (end.y - base.y).abs() * self.thresholds.sideways_ratio
    }

    fn pinky_only(&self, state: &FingerState) -> Classification {
        if state.thumb_abducted {
            self.matched(Symbol::Y)
        } else {
            self.fallback(Symbol::I)
        }
    }

    fn all_extended(&self, hand: &Hand, state: &FingerState) -> Classification {
        let tips = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP].map(|i| hand.point(i));
        let mean_gap = tips
            .windows(2)
            .map(|pair| state.scaled(pair[0], pair[1]))
            .sum::<f32>()
            / 3.0;

        if state.thumb_abducted || mean_gap >= self.thresholds.spread_gap {
            self.matched(Symbol::OpenPalm)
        } else {
            self.matched(Symbol::B)
        }
    }
}

fn centroid(points: &[Landmark]) -> Landmark {
    let sum: Vector3<f32> = points.iter().map(|p| p.to_vector()).sum();
    Landmark::from_vector(sum / points.len() as f32)
}
