//! Frame processor
//!
//! One call per rendered frame: validate the tracked hands, classify each,
//! keep the best of two, vote it through the stabilizer and let the hold
//! engine commit text. All state lives in `SignPipeline` and is only touched
//! from the frame loop; the host passes landmarks in and reads a
//! `FrameOutput` back.

use std::time::Duration;

use super::settings::Settings;
use crate::classifier::{Classification, SignClassifier, Symbol};
use crate::error::ConfigError;
use crate::geometry::{Hand, Handedness, Landmark};
use crate::stabilizer::{Stabilized, Stabilizer, StabilizerConfig};
use crate::text::{CommitEvent, HoldEngine, HoldState, Transcript};

/// Hands considered per frame
pub const MAX_HANDS: usize = 2;

/// One hand as reported by the tracker
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedHand {
    /// Should be 21 points; anything else is dropped as "no hand"
    pub landmarks: Vec<Landmark>,
    /// Missing handedness is treated as Right
    pub handedness: Option<Handedness>,
    /// Tracker detection confidence, 0-1
    pub score: f32,
}

/// What happened this frame, for the status line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    NoHand,
    NoMatch,
    Pending,
    Confirmed,
}

impl FrameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameStatus::NoHand => "No Hands Detected",
            FrameStatus::NoMatch => "Unknown Gesture",
            FrameStatus::Pending => "Pending",
            FrameStatus::Confirmed => "Confirmed",
        }
    }
}

/// Per-frame view for the UI layer
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub status: FrameStatus,
    /// Symbol to display: confirmed, or this frame's raw guess while pending
    pub symbol: Option<Symbol>,
    /// Best raw classification this frame
    pub raw: Option<Classification>,
    /// Stabilized confidence (0 while pending)
    pub confidence: f32,
    /// Hand that produced `raw`
    pub handedness: Option<Handedness>,
    /// Hold progress 0-1
    pub hold_progress: f32,
    /// Transcript edit made this frame
    pub commit: Option<CommitEvent>,
}

impl FrameOutput {
    /// Symbol label, or the status text when there is nothing to show
    pub fn label(&self) -> &'static str {
        match self.symbol {
            Some(symbol) => symbol.as_str(),
            None => self.status.as_str(),
        }
    }

    pub fn confidence_percent(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

pub struct SignPipeline {
    classifier: SignClassifier,
    stabilizer: Stabilizer,
    hold: HoldEngine,
    min_detection_confidence: f32,
}

impl SignPipeline {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            classifier: SignClassifier::new(settings.thresholds)?,
            stabilizer: Stabilizer::new(settings.stabilizer)?,
            hold: HoldEngine::new(settings.hold),
            min_detection_confidence: settings.min_detection_confidence,
        })
    }

    /// Process one frame. `now` is a monotonic timestamp sampled once per frame.
    pub fn process(&mut self, hands: &[DetectedHand], now: Duration) -> FrameOutput {
        let mut saw_hand = false;
        let mut best: Option<(Classification, Handedness)> = None;

        for detected in hands.iter().take(MAX_HANDS) {
            if detected.score.is_nan() || detected.score < self.min_detection_confidence {
                continue;
            }
            let hand = match Hand::from_landmarks(&detected.landmarks) {
                Ok(hand) => hand,
                Err(err) => {
                    tracing::debug!(%err, "hand rejected");
                    continue;
                }
            };
            saw_hand = true;

            let handedness = detected.handedness.unwrap_or_default();
            let Some(mut classification) = self.classifier.classify(&hand, handedness) else {
                continue;
            };
            classification.confidence *= detected.score.clamp(0.0, 1.0);

            let better = best.map_or(true, |(current, _)| classification.confidence > current.confidence);
            if better {
                best = Some((classification, handedness));
            }
        }

        let raw = best.map(|(classification, _)| classification);
        let stabilized = self.stabilizer.update(raw);

        let (status, commit) = match stabilized {
            Stabilized::Confirmed { symbol, .. } => {
                (FrameStatus::Confirmed, self.hold.update(Some(symbol), now))
            }
            Stabilized::Pending { raw: None } => {
                // Signal lost and the window no longer vouches for anything
                self.hold.update(None, now);
                let status = if saw_hand { FrameStatus::NoMatch } else { FrameStatus::NoHand };
                (status, None)
            }
            Stabilized::Pending { raw: Some(_) } => {
                self.hold.interrupt();
                (FrameStatus::Pending, None)
            }
        };

        FrameOutput {
            status,
            symbol: stabilized.display(),
            raw,
            confidence: stabilized.confidence(),
            handedness: best.map(|(_, handedness)| handedness),
            hold_progress: self.hold.progress(now),
            commit,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        self.hold.transcript()
    }

    pub fn hold_state(&self) -> HoldState {
        self.hold.state()
    }

    pub fn clear_transcript(&mut self) {
        self.hold.clear();
        tracing::debug!("transcript cleared");
    }

    pub fn set_hold_threshold_ms(&mut self, ms: f64) -> Result<(), ConfigError> {
        self.hold.set_threshold_ms(ms)
    }

    pub fn set_stabilizer_window(&mut self, window: usize, quorum: f32) -> Result<(), ConfigError> {
        self.stabilizer.reconfigure(StabilizerConfig { window, quorum })
    }

    /// Replace all settings; nothing changes unless the whole set is valid
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.classifier.set_thresholds(settings.thresholds)?;
        self.stabilizer.reconfigure(settings.stabilizer)?;
        self.hold.set_config(settings.hold);
        self.min_detection_confidence = settings.min_detection_confidence;
        Ok(())
    }

    pub fn settings(&self) -> Settings {
        Settings {
            thresholds: self.classifier.thresholds().clone(),
            stabilizer: self.stabilizer.config(),
            hold: self.hold.config(),
            min_detection_confidence: self.min_detection_confidence,
        }
    }
}

impl Default for SignPipeline {
    fn default() -> Self {
        Self {
            classifier: SignClassifier::default(),
            stabilizer: Stabilizer::default(),
            hold: HoldEngine::default(),
            min_detection_confidence: super::settings::DEFAULT_MIN_DETECTION_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::fixtures::{self, Shape};

    const FRAME: Duration = Duration::from_millis(33);

    fn detected(hand: &Hand, handedness: Handedness, score: f32) -> DetectedHand {
        DetectedHand {
            landmarks: hand.landmarks().to_vec(),
            handedness: Some(handedness),
            score,
        }
    }

    fn h_pose() -> Hand {
        fixtures::hand(
            [Shape::ExtendedTo(0.73, 0.58), Shape::ExtendedTo(0.70, 0.55), Shape::Curled, Shape::Curled],
            (0.52, 0.64, -0.04),
        )
    }

    fn i_pose() -> Hand {
        fixtures::hand(
            [Shape::Curled, Shape::Curled, Shape::Curled, Shape::Extended],
            (0.50, 0.62, -0.06),
        )
    }

    /// Run `hands` every frame for `duration`, collecting commits
    fn run(
        pipeline: &mut SignPipeline,
        hands: &[DetectedHand],
        duration: Duration,
        now: &mut Duration,
    ) -> (Vec<CommitEvent>, FrameOutput) {
        let end = *now + duration;
        let mut commits = Vec::new();
        let mut last = pipeline.process(hands, *now);
        commits.extend(last.commit.clone());
        *now += FRAME;
        while *now <= end {
            last = pipeline.process(hands, *now);
            commits.extend(last.commit.clone());
            *now += FRAME;
        }
        (commits, last)
    }

    #[test]
    fn test_fist_commits_a() {
        let mut pipeline = SignPipeline::default();
        let mut now = Duration::ZERO;
        let hands = [detected(&fixtures::fist_a(), Handedness::Right, 1.0)];

        let first = pipeline.process(&hands, now);
        assert_eq!(first.status, FrameStatus::Pending);
        assert_eq!(first.label(), "A");
        now += FRAME;

        let (commits, last) = run(&mut pipeline, &hands, Duration::from_millis(2000), &mut now);
        assert_eq!(commits, vec![CommitEvent::Letter('A')]);
        assert_eq!(last.status, FrameStatus::Confirmed);
        assert_eq!(last.confidence_percent(), 100);
        assert_eq!(pipeline.transcript().pending_word(), "A");
    }

    #[test]
    fn test_spells_hi_with_open_palm_break() {
        let mut pipeline = SignPipeline::default();
        let mut now = Duration::ZERO;
        let long = Duration::from_millis(1500);

        run(&mut pipeline, &[detected(&h_pose(), Handedness::Right, 0.9)], long, &mut now);
        run(&mut pipeline, &[detected(&i_pose(), Handedness::Right, 0.9)], long, &mut now);
        let (commits, _) = run(
            &mut pipeline,
            &[detected(&fixtures::open_palm(), Handedness::Right, 0.9)],
            long,
            &mut now,
        );

        assert_eq!(commits, vec![CommitEvent::WordBreak { word: "HI".to_string() }]);
        assert_eq!(pipeline.transcript().sentence(), "HI ");
        assert_eq!(pipeline.transcript().pending_word(), "");
    }

    #[test]
    fn test_left_hand_mirrored_input() {
        let mut pipeline = SignPipeline::default();
        let mut now = Duration::ZERO;
        let hands = [detected(&fixtures::fist_a().mirrored(), Handedness::Left, 1.0)];
        let (commits, last) = run(&mut pipeline, &hands, Duration::from_millis(2000), &mut now);
        assert_eq!(commits, vec![CommitEvent::Letter('A')]);
        assert_eq!(last.handedness, Some(Handedness::Left));
    }

    #[test]
    fn test_no_hand_statuses() {
        let mut pipeline = SignPipeline::default();
        let now = Duration::ZERO;

        let out = pipeline.process(&[], now);
        assert_eq!(out.status, FrameStatus::NoHand);
        assert_eq!(out.label(), "No Hands Detected");

        // Wrong landmark count is treated as no hand
        let short = DetectedHand {
            landmarks: vec![Landmark::default(); 20],
            handedness: None,
            score: 1.0,
        };
        assert_eq!(pipeline.process(&[short], now).status, FrameStatus::NoHand);

        // Low tracker confidence is ignored
        let faint = detected(&fixtures::fist_a(), Handedness::Right, 0.2);
        assert_eq!(pipeline.process(&[faint], now).status, FrameStatus::NoHand);

        // A valid hand that matches nothing
        let odd = fixtures::hand(
            [Shape::Curled, Shape::Curled, Shape::Extended, Shape::Curled],
            fixtures::THUMB_TUCKED,
        );
        let out = pipeline.process(&[detected(&odd, Handedness::Right, 1.0)], now);
        assert_eq!(out.status, FrameStatus::NoMatch);
        assert_eq!(out.label(), "Unknown Gesture");
    }

    #[test]
    fn test_best_of_two_hands() {
        let mut pipeline = SignPipeline::default();
        let weak = detected(&fixtures::fist_a(), Handedness::Right, 0.55);
        let strong = detected(&fixtures::flat_b(), Handedness::Left, 0.9);
        let out = pipeline.process(&[weak, strong], Duration::ZERO);
        let raw = out.raw.unwrap();
        assert_eq!(raw.symbol, Symbol::B);
        assert!((raw.confidence - 0.9).abs() < 1e-6);
        assert_eq!(out.handedness, Some(Handedness::Left));
    }

    #[test]
    fn test_single_dropout_keeps_hold() {
        let mut pipeline = SignPipeline::default();
        let mut now = Duration::ZERO;
        let hands = [detected(&fixtures::fist_s(), Handedness::Right, 1.0)];

        run(&mut pipeline, &hands, Duration::from_millis(400), &mut now);
        let held_since = pipeline.hold_state().hold_start;
        assert!(held_since.is_some());

        let out = pipeline.process(&[], now);
        assert_eq!(out.status, FrameStatus::Confirmed);
        assert_eq!(pipeline.hold_state().hold_start, held_since);
        now += FRAME;

        let (commits, _) = run(&mut pipeline, &hands, Duration::from_millis(1500), &mut now);
        assert_eq!(commits, vec![CommitEvent::Letter('S')]);
    }

    #[test]
    fn test_pending_frames_do_not_bank_hold_time() {
        let mut pipeline = SignPipeline::default();
        let mut now = Duration::ZERO;
        let s = [detected(&fixtures::fist_s(), Handedness::Right, 1.0)];
        let a = [detected(&fixtures::fist_a(), Handedness::Right, 1.0)];

        run(&mut pipeline, &s, Duration::from_millis(300), &mut now);
        assert!(pipeline.hold_state().hold_start.is_some());

        // Flicker between two signs keeps the window unconfirmed
        let mut commits = Vec::new();
        for frame in 0..90 {
            let hands = if frame % 2 == 0 { &a } else { &s };
            let out = pipeline.process(hands, now);
            commits.extend(out.commit);
            now += FRAME;
        }
        assert!(commits.is_empty());
        assert!(pipeline.hold_state().hold_start.is_none());

        let resumed = now;
        let mut first_commit = None;
        while now <= resumed + Duration::from_millis(2000) {
            let out = pipeline.process(&s, now);
            if out.commit.is_some() && first_commit.is_none() {
                first_commit = Some(now - resumed);
            }
            now += FRAME;
        }
        assert!(first_commit.unwrap() >= Duration::from_millis(900));
        assert_eq!(pipeline.transcript().pending_word(), "S");
    }

    #[test]
    fn test_hand_loss_resets_hold() {
        let mut pipeline = SignPipeline::default();
        let mut now = Duration::ZERO;
        let hands = [detected(&fixtures::fist_s(), Handedness::Right, 1.0)];
        run(&mut pipeline, &hands, Duration::from_millis(400), &mut now);

        let (_, last) = run(&mut pipeline, &[], Duration::from_millis(500), &mut now);
        assert_eq!(last.status, FrameStatus::NoHand);
        assert!(pipeline.hold_state().is_idle());
        assert_eq!(last.hold_progress, 0.0);
    }

    #[test]
    fn test_commands() {
        let mut pipeline = SignPipeline::default();
        let mut now = Duration::ZERO;
        pipeline.set_hold_threshold_ms(300.0).unwrap();
        pipeline.set_stabilizer_window(4, 0.75).unwrap();
        assert!(pipeline.set_stabilizer_window(1, 0.75).is_err());
        assert_eq!(pipeline.settings().stabilizer.window, 4);

        let hands = [detected(&fixtures::fist_a(), Handedness::Right, 1.0)];
        let (commits, _) = run(&mut pipeline, &hands, Duration::from_millis(600), &mut now);
        assert_eq!(commits.len(), 1);

        pipeline.clear_transcript();
        assert!(pipeline.transcript().is_empty());
        assert!(pipeline.hold_state().is_idle());
    }

    #[test]
    fn test_apply_settings_is_all_or_nothing() {
        let mut pipeline = SignPipeline::default();
        let mut settings = Settings::default();
        settings.hold.threshold_ms = 100;
        settings.stabilizer.window = 0;
        assert!(pipeline.apply_settings(settings).is_err());
        assert_eq!(pipeline.settings(), Settings::default());
    }
}
