//! Caller-supplied analysis context
//!
//! Everything the surrounding application knows about a request that is not
//! the text itself: what kind of pet event triggered it, extra text other
//! collaborators already assembled, and the user's personality profile.

use serde::{Deserialize, Serialize};

/// Event that triggered an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetEvent {
    /// Free-form chat message
    #[default]
    UserMessage,
    /// Reflection written after a challenge
    ReflectionAdded,
    /// Daily challenge check-in
    CheckIn,
}

/// Coarse level of a personality trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitLevel {
    /// Below average
    Low,
    /// Average
    #[default]
    Normal,
    /// Pronounced
    High,
}

/// Personality traits that bias how the companion reacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Serious users get toned-down excitement
    pub seriousness: TraitLevel,
    /// Playful users get livelier happiness
    pub playfulness: TraitLevel,
    /// Anxious users get an attentive companion instead of an idle one
    pub anxiety: TraitLevel,
}

impl PersonalityProfile {
    /// Profile with every trait at `Normal`
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Builder: set seriousness
    pub fn with_seriousness(mut self, level: TraitLevel) -> Self {
        self.seriousness = level;
        self
    }

    /// Builder: set playfulness
    pub fn with_playfulness(mut self, level: TraitLevel) -> Self {
        self.playfulness = level;
        self
    }

    /// Builder: set anxiety
    pub fn with_anxiety(mut self, level: TraitLevel) -> Self {
        self.anxiety = level;
        self
    }
}

/// Optional extras accompanying a piece of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// Triggering event
    pub event: PetEvent,

    /// Text assembled by other collaborators (e.g. a reflection's challenge
    /// title); classified alongside the main text at reduced weight
    pub supplementary_text: Option<String>,

    /// Personality profile of the user, if known
    pub personality: Option<PersonalityProfile>,
}

impl AnalysisContext {
    /// Context for a given event
    pub fn for_event(event: PetEvent) -> Self {
        Self {
            event,
            ..Default::default()
        }
    }

    /// Builder: attach supplementary text
    pub fn with_supplementary_text(mut self, text: impl Into<String>) -> Self {
        self.supplementary_text = Some(text.into());
        self
    }

    /// Builder: attach a personality profile
    pub fn with_personality(mut self, personality: PersonalityProfile) -> Self {
        self.personality = Some(personality);
        self
    }
}
