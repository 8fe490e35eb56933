//! Animation Selection
//!
//! Maps a classified reading to a candidate animation in three layers:
//! 1. Base table indexed by (category, intensity)
//! 2. Ordered dimensional override rules, first match wins
//! 3. Blend toward a close secondary emotion with a stronger animation
//!
//! Personality adjustments sit on top for callers that know the user.

use crate::analysis::plutchik::{KEYWORD_HIGH_AT, KEYWORD_MEDIUM_AT};
use crate::analysis::Classification;
use crate::types::{
    AnimationId, EmotionDimensions, EmotionIntensity, EmotionState, PersonalityProfile,
    PlutchikEmotion, TraitLevel,
};
use companion_core::{CompanionError, Result};

use crate::types::AnimationId as A;
use crate::types::EmotionIntensity::{High, Low, Medium};
use crate::types::PlutchikEmotion as E;

/// Default animation per (category, intensity)
pub const BASE_TABLE: &[(PlutchikEmotion, EmotionIntensity, AnimationId)] = &[
    (E::Joy, Low, A::Happy),
    (E::Joy, Medium, A::Happy),
    (E::Joy, High, A::Excited),
    (E::Trust, Low, A::Idle),
    (E::Trust, Medium, A::Happy),
    (E::Trust, High, A::Happy),
    (E::Fear, Low, A::Concerned),
    (E::Fear, Medium, A::Concerned),
    (E::Fear, High, A::Concerned),
    (E::Surprise, Low, A::Curious),
    (E::Surprise, Medium, A::Surprised),
    (E::Surprise, High, A::Surprised),
    (E::Sadness, Low, A::Concerned),
    (E::Sadness, Medium, A::Sad),
    (E::Sadness, High, A::Sad),
    (E::Disgust, Low, A::Confused),
    (E::Disgust, Medium, A::Concerned),
    (E::Disgust, High, A::Angry),
    (E::Anger, Low, A::Concerned),
    (E::Anger, Medium, A::Angry),
    (E::Anger, High, A::Angry),
    (E::Anticipation, Low, A::Curious),
    (E::Anticipation, Medium, A::Happy),
    (E::Anticipation, High, A::Excited),
];

/// A dimensional override of the base table
#[derive(Debug, Clone, Copy)]
pub struct OverrideRule {
    /// Short identifier for logs
    pub name: &'static str,
    /// Animation chosen when the rule fires
    pub target: AnimationId,
    /// Primary categories this rule never overrides
    pub protected: &'static [PlutchikEmotion],
    condition: fn(&EmotionDimensions) -> bool,
}

impl OverrideRule {
    /// Whether this rule fires for `state`
    pub fn matches(&self, state: &EmotionState) -> bool {
        !self.protected.contains(&state.primary_emotion) && (self.condition)(&state.dimensions)
    }
}

/// Override rules in evaluation order
pub const OVERRIDE_RULES: [OverrideRule; 4] = [
    OverrideRule {
        name: "aroused_positive",
        target: A::Excited,
        protected: &[],
        condition: |d| d.arousal > 0.6 && d.valence > 0.3,
    },
    OverrideRule {
        name: "calm_positive",
        target: A::Happy,
        protected: &[],
        condition: |d| d.arousal < -0.3 && d.valence > 0.3,
    },
    OverrideRule {
        name: "uncertain",
        target: A::Confused,
        protected: &[E::Surprise],
        condition: |d| d.valence.abs() < 0.2 && d.dominance < -0.25,
    },
    OverrideRule {
        name: "helpless",
        target: A::Concerned,
        protected: &[E::Surprise, E::Sadness],
        condition: |d| d.dominance < -0.4,
    },
];

/// Chooses the candidate animation for a reading
#[derive(Debug, Clone)]
pub struct AnimationSelector {
    table: [[AnimationId; 3]; 8],
    blend_margin: f32,
}

impl AnimationSelector {
    /// Selector over [`BASE_TABLE`]
    pub fn new(blend_margin: f32) -> Result<Self> {
        Self::from_entries(BASE_TABLE, blend_margin)
    }

    /// Build from explicit table entries; every (category, intensity) pair
    /// must be present
    pub fn from_entries(
        entries: &[(PlutchikEmotion, EmotionIntensity, AnimationId)],
        blend_margin: f32,
    ) -> Result<Self> {
        let mut slots: [[Option<AnimationId>; 3]; 8] = [[None; 3]; 8];
        for &(emotion, intensity, animation) in entries {
            slots[emotion.index()][intensity.index()] = Some(animation);
        }

        let mut table = [[AnimationId::HUB; 3]; 8];
        for emotion in PlutchikEmotion::ALL {
            for intensity in EmotionIntensity::ALL {
                table[emotion.index()][intensity.index()] = slots[emotion.index()]
                    [intensity.index()]
                .ok_or_else(|| {
                    CompanionError::incomplete_table(
                        "animation base table",
                        format!("{}/{}", emotion, intensity),
                    )
                })?;
            }
        }

        Ok(Self {
            table,
            blend_margin,
        })
    }

    /// Base-table animation
    pub fn base(&self, emotion: PlutchikEmotion, intensity: EmotionIntensity) -> AnimationId {
        self.table[emotion.index()][intensity.index()]
    }

    /// Every base-table entry
    pub fn entries(&self) -> impl Iterator<Item = (PlutchikEmotion, EmotionIntensity, AnimationId)> + '_ {
        PlutchikEmotion::ALL.into_iter().flat_map(move |emotion| {
            EmotionIntensity::ALL
                .into_iter()
                .map(move |intensity| (emotion, intensity, self.base(emotion, intensity)))
        })
    }

    /// Candidate animation for a classification
    pub fn select(&self, classification: &Classification) -> AnimationId {
        if classification.is_neutral() {
            return AnimationId::HUB;
        }

        let state = &classification.state;
        let mut candidate = self.base(state.primary_emotion, state.intensity);

        if let Some(rule) = OVERRIDE_RULES.iter().find(|r| r.matches(state)) {
            tracing::trace!(rule = rule.name, from = %candidate, to = %rule.target, "Override rule fired");
            candidate = rule.target;
        }

        if let Some((secondary, score)) = state.leading_secondary() {
            if classification.primary_score - score <= self.blend_margin {
                let tier = EmotionIntensity::from_thresholds(score, KEYWORD_MEDIUM_AT, KEYWORD_HIGH_AT);
                let blended = self.base(secondary, tier);
                if blended.strength_rank() > candidate.strength_rank() {
                    tracing::trace!(%secondary, from = %candidate, to = %blended, "Blended toward secondary");
                    candidate = blended;
                }
            }
        }

        candidate
    }

    /// [`AnimationSelector::select`] followed by personality adjustment
    pub fn select_for(
        &self,
        classification: &Classification,
        personality: Option<&PersonalityProfile>,
    ) -> AnimationId {
        let candidate = self.select(classification);
        match personality {
            Some(profile) => adjust_for_personality(candidate, profile),
            None => candidate,
        }
    }
}

/// Tone an animation to the user's personality
pub fn adjust_for_personality(animation: AnimationId, profile: &PersonalityProfile) -> AnimationId {
    match animation {
        A::Excited if profile.seriousness == TraitLevel::High => A::Happy,
        A::Happy if profile.playfulness == TraitLevel::High => A::Excited,
        A::Idle if profile.anxiety == TraitLevel::High => A::Concerned,
        other => other,
    }
}
