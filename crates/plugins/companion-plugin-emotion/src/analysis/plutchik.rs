//! Plutchik Classification
//!
//! Turns extracted features into a complete [`EmotionState`]. Keyword scores
//! decide the primary category whenever any category scored positive; text
//! that only moved the dimensions (punctuation, negated keywords) falls back
//! to the nearest baseline centroid; text with no signal at all yields the
//! neutral reading.

use super::dimensional::DimensionalClassifier;
use super::features::{TextFeatureExtractor, TextFeatures};
use crate::types::{EmotionDimensions, EmotionIntensity, EmotionState, PlutchikEmotion};
use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Keyword score at which intensity becomes MEDIUM
pub const KEYWORD_MEDIUM_AT: f32 = 0.8;
/// Keyword score at which intensity becomes HIGH
pub const KEYWORD_HIGH_AT: f32 = 1.6;
/// Centroid proximity at which intensity becomes MEDIUM
pub const PROXIMITY_MEDIUM_AT: f32 = 0.55;
/// Centroid proximity at which intensity becomes HIGH
pub const PROXIMITY_HIGH_AT: f32 = 0.75;
/// Arousal magnitude above which the tier escalates one step
pub const AROUSAL_ESCALATION: f32 = 0.75;
/// Minimum score for a category to be listed as secondary
pub const SECONDARY_FLOOR: f32 = 0.3;
/// Maximum number of secondary emotions
pub const MAX_SECONDARY: usize = 2;
/// Scale applied to the centroid-margin confidence
pub const FALLBACK_CONFIDENCE_SCALE: f32 = 0.6;
/// Confidence removed from very short texts
pub const SHORT_TEXT_PENALTY: f32 = 0.15;
/// Texts with fewer tokens than this are considered short
pub const DEFAULT_SHORT_TEXT_TOKENS: usize = 3;
/// Weight of supplementary text relative to the main text
pub const SUPPLEMENTARY_WEIGHT: f32 = 0.5;

/// Which path produced a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// At least one category scored positive
    Keywords,
    /// Only the dimensions moved; nearest centroid decided
    Geometric,
    /// No emotional signal at all
    Neutral,
}

/// A classified state plus the raw numbers the selector needs
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// The reading
    pub state: EmotionState,
    /// Raw keyword score of the primary, or centroid proximity on the
    /// geometric path
    pub primary_score: f32,
    /// Path that produced the reading
    pub signal: Signal,
}

impl Classification {
    /// Whether the reading carries no signal
    pub fn is_neutral(&self) -> bool {
        self.signal == Signal::Neutral
    }
}

/// Text → [`EmotionState`] classifier
#[derive(Debug, Clone)]
pub struct PlutchikClassifier {
    extractor: TextFeatureExtractor,
    dimensional: DimensionalClassifier,
    short_text_tokens: usize,
}

impl Default for PlutchikClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PlutchikClassifier {
    /// Classifier over the built-in lexicon
    pub fn new() -> Self {
        Self {
            extractor: TextFeatureExtractor::new(),
            dimensional: DimensionalClassifier::new(),
            short_text_tokens: DEFAULT_SHORT_TEXT_TOKENS,
        }
    }

    /// Builder: token count below which the short-text penalty applies
    pub fn with_short_text_tokens(mut self, tokens: usize) -> Self {
        self.short_text_tokens = tokens;
        self
    }

    /// Classify a single text
    pub fn classify(&self, text: &str, timestamp: DateTime<Utc>) -> Classification {
        self.classify_with(text, None, timestamp)
    }

    /// Classify a text together with optional supplementary text, which
    /// contributes at [`SUPPLEMENTARY_WEIGHT`]
    pub fn classify_with(
        &self,
        text: &str,
        supplementary: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Classification {
        let features = self.features(text, supplementary);
        self.from_features(&features, timestamp)
    }

    /// Extract and merge features for a text and its supplement
    pub fn features(&self, text: &str, supplementary: Option<&str>) -> TextFeatures {
        let mut features = self.extractor.extract(text);
        if let Some(extra) = supplementary.filter(|s| !s.trim().is_empty()) {
            let extra = self.extractor.extract(extra);
            features.merge_scaled(&extra, SUPPLEMENTARY_WEIGHT);
        }
        features
    }

    /// Build a classification from already extracted features
    pub fn from_features(&self, features: &TextFeatures, timestamp: DateTime<Utc>) -> Classification {
        let dims = self.dimensional.fuse(features);

        let classification = if features.has_positive_score() {
            self.by_keywords(features, dims, timestamp)
        } else if !dims.is_zero() {
            self.by_centroid(features, dims, timestamp)
        } else {
            Classification {
                state: EmotionState::neutral(timestamp),
                primary_score: 0.0,
                signal: Signal::Neutral,
            }
        };

        tracing::debug!(
            emotion = %classification.state.primary_emotion,
            intensity = %classification.state.intensity,
            confidence = classification.state.confidence,
            signal = ?classification.signal,
            "Classified text"
        );

        classification
    }

    fn by_keywords(
        &self,
        features: &TextFeatures,
        dims: EmotionDimensions,
        timestamp: DateTime<Utc>,
    ) -> Classification {
        let primary = PlutchikEmotion::ALL
            .into_iter()
            .max_by_key(|e| {
                (
                    OrderedFloat(features.score(*e)),
                    OrderedFloat(e.baseline().dot(&dims).abs()),
                    Reverse(e.priority_rank()),
                )
            })
            .unwrap_or(PlutchikEmotion::NEUTRAL_DEFAULT);
        let primary_score = features.score(primary);

        let intensity = self.escalate_for_arousal(
            EmotionIntensity::from_thresholds(primary_score, KEYWORD_MEDIUM_AT, KEYWORD_HIGH_AT),
            &dims,
        );

        let mass = features.positive_mass();
        let confidence = if mass > 0.0 { primary_score / mass } else { 0.0 };

        let state = EmotionState {
            primary_emotion: primary,
            intensity,
            dimensions: dims,
            secondary_emotions: secondaries(features, primary),
            confidence: 0.0,
            timestamp,
        }
        .with_confidence(self.penalize_short(confidence, features));

        Classification {
            state,
            primary_score,
            signal: Signal::Keywords,
        }
    }

    fn by_centroid(
        &self,
        features: &TextFeatures,
        dims: EmotionDimensions,
        timestamp: DateTime<Utc>,
    ) -> Classification {
        let mut ranked: Vec<(PlutchikEmotion, f32)> = PlutchikEmotion::ALL
            .into_iter()
            .map(|e| (e, e.baseline().distance(&dims)))
            .collect();
        ranked.sort_by_key(|(e, d)| (OrderedFloat(*d), e.priority_rank()));

        let (primary, nearest) = ranked[0];
        let runner_up = ranked[1].1;

        let proximity = 1.0 / (1.0 + nearest);
        let intensity = self.escalate_for_arousal(
            EmotionIntensity::from_thresholds(proximity, PROXIMITY_MEDIUM_AT, PROXIMITY_HIGH_AT),
            &dims,
        );

        let confidence = if runner_up > 0.0 {
            FALLBACK_CONFIDENCE_SCALE * (1.0 - nearest / runner_up)
        } else {
            0.0
        };

        let state = EmotionState {
            primary_emotion: primary,
            intensity,
            dimensions: dims,
            secondary_emotions: secondaries(features, primary),
            confidence: 0.0,
            timestamp,
        }
        .with_confidence(self.penalize_short(confidence, features));

        Classification {
            state,
            primary_score: proximity,
            signal: Signal::Geometric,
        }
    }

    fn escalate_for_arousal(
        &self,
        tier: EmotionIntensity,
        dims: &EmotionDimensions,
    ) -> EmotionIntensity {
        if dims.arousal.abs() > AROUSAL_ESCALATION {
            tier.escalate()
        } else {
            tier
        }
    }

    fn penalize_short(&self, confidence: f32, features: &TextFeatures) -> f32 {
        if features.token_count < self.short_text_tokens {
            confidence - SHORT_TEXT_PENALTY
        } else {
            confidence
        }
    }
}

/// Runner-up categories above the floor, strongest first, at most two
fn secondaries(features: &TextFeatures, primary: PlutchikEmotion) -> Vec<(PlutchikEmotion, f32)> {
    let mut picked: Vec<(PlutchikEmotion, f32)> = PlutchikEmotion::ALL
        .into_iter()
        .filter(|e| *e != primary)
        .map(|e| (e, features.score(e)))
        .filter(|(_, score)| *score > SECONDARY_FLOOR)
        .collect();
    picked.sort_by_key(|(e, score)| (Reverse(OrderedFloat(*score)), e.priority_rank()));
    picked.truncate(MAX_SECONDARY);
    picked
}
