//! Emotional State Model
//!
//! The structured result of classifying one piece of text:
//! - Dimensional affect (valence, arousal, dominance)
//! - A discrete Plutchik category with an intensity tier
//! - Up to two secondary categories
//! - A confidence score

use chrono::{DateTime, Utc};
use companion_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in Russell's circumplex, extended with dominance
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionDimensions {
    /// Pleasure-displeasure dimension (-1.0 to 1.0)
    pub valence: f32,

    /// Activation-deactivation dimension (-1.0 to 1.0)
    pub arousal: f32,

    /// Dominance-submissiveness dimension (-1.0 to 1.0)
    pub dominance: f32,
}

impl EmotionDimensions {
    /// The origin of the affect space
    pub const ZERO: Self = Self {
        valence: 0.0,
        arousal: 0.0,
        dominance: 0.0,
    };

    /// Create a new affect vector, clamping every component to [-1, 1]
    pub fn new(valence: f32, arousal: f32, dominance: f32) -> Self {
        Self {
            valence: clamp_unit(valence),
            arousal: clamp_unit(arousal),
            dominance: clamp_unit(dominance),
        }
    }

    /// Dot product with another vector
    pub fn dot(&self, other: &Self) -> f32 {
        self.valence * other.valence + self.arousal * other.arousal + self.dominance * other.dominance
    }

    /// Euclidean distance from another affect vector
    pub fn distance(&self, other: &Self) -> f32 {
        let dv = self.valence - other.valence;
        let da = self.arousal - other.arousal;
        let dd = self.dominance - other.dominance;
        (dv * dv + da * da + dd * dd).sqrt()
    }

    /// True when every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.valence == 0.0 && self.arousal == 0.0 && self.dominance == 0.0
    }

    /// True when every component lies inside [-1, 1]
    pub fn in_range(&self) -> bool {
        [self.valence, self.arousal, self.dominance]
            .iter()
            .all(|v| (-1.0..=1.0).contains(v))
    }
}

// NaN maps to 0.0 so a poisoned input can never leave the unit cube.
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Plutchik's eight basic emotions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlutchikEmotion {
    /// Pleasure, happiness
    Joy,
    /// Acceptance, gratitude
    Trust,
    /// Worry, anxiety
    Fear,
    /// The unexpected
    Surprise,
    /// Loss, loneliness
    Sadness,
    /// Rejection, revulsion
    Disgust,
    /// Frustration, rage
    Anger,
    /// Looking forward
    Anticipation,
}

impl PlutchikEmotion {
    /// Every category, in wheel order
    pub const ALL: [PlutchikEmotion; 8] = [
        PlutchikEmotion::Joy,
        PlutchikEmotion::Trust,
        PlutchikEmotion::Fear,
        PlutchikEmotion::Surprise,
        PlutchikEmotion::Sadness,
        PlutchikEmotion::Disgust,
        PlutchikEmotion::Anger,
        PlutchikEmotion::Anticipation,
    ];

    /// Last-resort tie-break order, highest priority first
    pub const PRIORITY: [PlutchikEmotion; 8] = [
        PlutchikEmotion::Joy,
        PlutchikEmotion::Trust,
        PlutchikEmotion::Anticipation,
        PlutchikEmotion::Surprise,
        PlutchikEmotion::Fear,
        PlutchikEmotion::Sadness,
        PlutchikEmotion::Disgust,
        PlutchikEmotion::Anger,
    ];

    /// Category reported when the text carries no emotional signal at all:
    /// the lowest-priority category.
    pub const NEUTRAL_DEFAULT: PlutchikEmotion = PlutchikEmotion::Anger;

    /// Position in [`PlutchikEmotion::ALL`], used to index score arrays
    pub fn index(self) -> usize {
        match self {
            PlutchikEmotion::Joy => 0,
            PlutchikEmotion::Trust => 1,
            PlutchikEmotion::Fear => 2,
            PlutchikEmotion::Surprise => 3,
            PlutchikEmotion::Sadness => 4,
            PlutchikEmotion::Disgust => 5,
            PlutchikEmotion::Anger => 6,
            PlutchikEmotion::Anticipation => 7,
        }
    }

    /// Rank in [`PlutchikEmotion::PRIORITY`]; 0 is the highest priority
    pub fn priority_rank(self) -> usize {
        match self {
            PlutchikEmotion::Joy => 0,
            PlutchikEmotion::Trust => 1,
            PlutchikEmotion::Anticipation => 2,
            PlutchikEmotion::Surprise => 3,
            PlutchikEmotion::Fear => 4,
            PlutchikEmotion::Sadness => 5,
            PlutchikEmotion::Disgust => 6,
            PlutchikEmotion::Anger => 7,
        }
    }

    /// Baseline contribution of one unit of keyword score, also used as the
    /// reference centroid for nearest-neighbour classification
    pub fn baseline(self) -> EmotionDimensions {
        match self {
            PlutchikEmotion::Joy => EmotionDimensions::new(0.8, 0.5, 0.4),
            PlutchikEmotion::Trust => EmotionDimensions::new(0.5, -0.2, 0.3),
            PlutchikEmotion::Fear => EmotionDimensions::new(-0.6, 0.6, -0.6),
            PlutchikEmotion::Surprise => EmotionDimensions::new(0.1, 0.7, -0.2),
            PlutchikEmotion::Sadness => EmotionDimensions::new(-0.7, -0.4, -0.4),
            PlutchikEmotion::Disgust => EmotionDimensions::new(-0.6, 0.3, 0.3),
            PlutchikEmotion::Anger => EmotionDimensions::new(-0.6, 0.8, 0.5),
            PlutchikEmotion::Anticipation => EmotionDimensions::new(0.4, 0.4, 0.2),
        }
    }

    /// Stable lowercase identifier
    pub fn as_str(self) -> &'static str {
        match self {
            PlutchikEmotion::Joy => "joy",
            PlutchikEmotion::Trust => "trust",
            PlutchikEmotion::Fear => "fear",
            PlutchikEmotion::Surprise => "surprise",
            PlutchikEmotion::Sadness => "sadness",
            PlutchikEmotion::Disgust => "disgust",
            PlutchikEmotion::Anger => "anger",
            PlutchikEmotion::Anticipation => "anticipation",
        }
    }

    /// Get a description of this emotion
    pub fn description(self) -> &'static str {
        match self {
            PlutchikEmotion::Joy => "feeling pleasure and happiness",
            PlutchikEmotion::Trust => "feeling safe and confident in others",
            PlutchikEmotion::Fear => "anticipating danger or threat",
            PlutchikEmotion::Surprise => "experiencing the unexpected",
            PlutchikEmotion::Sadness => "feeling loss or disappointment",
            PlutchikEmotion::Disgust => "rejecting something unpleasant",
            PlutchikEmotion::Anger => "feeling frustrated or wronged",
            PlutchikEmotion::Anticipation => "expecting something to happen",
        }
    }
}

impl fmt::Display for PlutchikEmotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse magnitude of the primary emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionIntensity {
    /// Faint or uncertain
    Low,
    /// Clearly present
    Medium,
    /// Strong
    High,
}

impl EmotionIntensity {
    /// Every tier, weakest first
    pub const ALL: [EmotionIntensity; 3] = [
        EmotionIntensity::Low,
        EmotionIntensity::Medium,
        EmotionIntensity::High,
    ];

    /// Position in [`EmotionIntensity::ALL`]
    pub fn index(self) -> usize {
        match self {
            EmotionIntensity::Low => 0,
            EmotionIntensity::Medium => 1,
            EmotionIntensity::High => 2,
        }
    }

    /// Tier for a magnitude given the LOW/MEDIUM and MEDIUM/HIGH boundaries
    pub fn from_thresholds(value: f32, medium_at: f32, high_at: f32) -> Self {
        if value >= high_at {
            EmotionIntensity::High
        } else if value >= medium_at {
            EmotionIntensity::Medium
        } else {
            EmotionIntensity::Low
        }
    }

    /// One tier up, saturating at HIGH
    pub fn escalate(self) -> Self {
        match self {
            EmotionIntensity::Low => EmotionIntensity::Medium,
            EmotionIntensity::Medium | EmotionIntensity::High => EmotionIntensity::High,
        }
    }

    /// This tier, but never above `ceiling`
    pub fn cap(self, ceiling: EmotionIntensity) -> Self {
        self.min(ceiling)
    }

    /// Stable lowercase identifier
    pub fn as_str(self) -> &'static str {
        match self {
            EmotionIntensity::Low => "low",
            EmotionIntensity::Medium => "medium",
            EmotionIntensity::High => "high",
        }
    }
}

impl fmt::Display for EmotionIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete emotional reading for one classification call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    /// Dominant Plutchik category
    pub primary_emotion: PlutchikEmotion,

    /// Intensity tier of the primary emotion
    pub intensity: EmotionIntensity,

    /// Dimensional affect of the text
    pub dimensions: EmotionDimensions,

    /// Up to two runner-up categories with their raw scores, strongest first
    pub secondary_emotions: Vec<(PlutchikEmotion, f32)>,

    /// How unambiguous the reading is (0.0 to 1.0)
    pub confidence: f32,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
}

impl EmotionState {
    /// Floor for every reading's confidence; signal-free input sits exactly here
    pub const MIN_CONFIDENCE: f32 = 0.05;

    /// The best-effort reading for text without any emotional signal
    pub fn neutral(timestamp: DateTime<Utc>) -> Self {
        Self {
            primary_emotion: PlutchikEmotion::NEUTRAL_DEFAULT,
            intensity: EmotionIntensity::Low,
            dimensions: EmotionDimensions::ZERO,
            secondary_emotions: Vec::new(),
            confidence: Self::MIN_CONFIDENCE,
            timestamp,
        }
    }

    /// Strongest secondary emotion, if any
    pub fn leading_secondary(&self) -> Option<(PlutchikEmotion, f32)> {
        self.secondary_emotions.first().copied()
    }

    /// Copy of this reading with a different confidence, clamped to
    /// `[MIN_CONFIDENCE, 1]`
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(Self::MIN_CONFIDENCE, 1.0);
        self
    }

    /// Copy of this reading with its intensity capped at `ceiling`
    pub fn with_intensity_cap(mut self, ceiling: EmotionIntensity) -> Self {
        self.intensity = self.intensity.cap(ceiling);
        self
    }

    /// Serialize for persistence or exchange
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a reading produced by [`EmotionState::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get a human-readable description of this reading
    pub fn describe(&self) -> String {
        let intensity_word = match self.intensity {
            EmotionIntensity::High => "intensely",
            EmotionIntensity::Medium => "moderately",
            EmotionIntensity::Low => "slightly",
        };

        let mut desc = format!(
            "{} {} ({})",
            intensity_word,
            self.primary_emotion,
            self.primary_emotion.description()
        );

        if !self.secondary_emotions.is_empty() {
            let secondary: Vec<_> = self
                .secondary_emotions
                .iter()
                .map(|(e, _)| e.as_str())
                .collect();
            desc.push_str(&format!(", with undertones of {}", secondary.join(", ")));
        }

        desc
    }
}
