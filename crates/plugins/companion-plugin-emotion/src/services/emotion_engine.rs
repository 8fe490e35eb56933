//! Emotion Engine Service
//!
//! The entry point for callers. Owns the classifier, the animation tables and
//! the per-user session store:
//! - Stateless analysis for one-off texts
//! - Stateful analysis with per-user history
//! - Animation selection and transition planning per user
//!
//! Sessions are keyed by user id. Each one sits behind its own mutex, so two
//! requests for the same user are serialized while different users only
//! share the brief map lookup.

use crate::analysis::{Classification, Lexicon, PlutchikClassifier};
use crate::animation::{adjust_for_personality, AnimationSelector, TransitionPlanner};
use crate::config::EngineConfig;
use crate::services::ContextTracker;
use crate::types::{
    AnalysisContext, AnimationId, EmotionState, PetEvent, UserEmotionHistory,
};
use chrono::{DateTime, Utc};
use companion_core::Result;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Source of reading timestamps
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant, for reproducible readings
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Everything the engine remembers about one user
#[derive(Debug)]
struct UserSession {
    history: UserEmotionHistory,
    last_shown: AnimationId,
}

impl UserSession {
    fn new(user_id: &str) -> Self {
        Self {
            history: UserEmotionHistory::new(user_id),
            last_shown: AnimationId::HUB,
        }
    }
}

/// Result of [`EmotionEngine::suggest_animation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSuggestion {
    /// Reading after context adjustment
    pub state: EmotionState,
    /// Animation the reading asks for
    pub candidate: AnimationId,
    /// Animation to actually show after transition planning
    pub animation: AnimationId,
}

/// The emotion engine service
#[derive(Debug)]
pub struct EmotionEngine {
    config: EngineConfig,
    classifier: PlutchikClassifier,
    tracker: ContextTracker,
    selector: AnimationSelector,
    planner: TransitionPlanner,
    clock: Arc<dyn Clock>,
    sessions: RwLock<HashMap<String, Arc<Mutex<UserSession>>>>,
}

impl EmotionEngine {
    /// Create an engine, validating configuration, lexicon and tables
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Lexicon::builtin().validate()?;

        let selector = AnimationSelector::new(config.blend_margin)?;
        let planner = TransitionPlanner::new()?;

        tracing::info!(
            history_capacity = config.history_capacity,
            blend_margin = config.blend_margin,
            keywords = Lexicon::builtin().entries().len(),
            "Emotion engine ready"
        );

        Ok(Self {
            classifier: PlutchikClassifier::new().with_short_text_tokens(config.short_text_tokens),
            tracker: ContextTracker::new(&config),
            selector,
            planner,
            clock: Arc::new(SystemClock),
            sessions: RwLock::new(HashMap::new()),
            config,
        })
    }

    /// Engine with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Replace the clock used to stamp readings
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify text without touching any user state
    pub fn classify(&self, text: &str) -> Classification {
        self.classifier.classify(text, self.clock.now())
    }

    /// One-off animation for a text, with no per-user history
    pub fn analyze_emotion_for_pet(&self, text: &str) -> AnimationId {
        let mut scratch = UserEmotionHistory::new("");
        let classification = self.track(&mut scratch, text, None);
        self.selector.select(&classification)
    }

    /// Classify `text` in the context of `user_id`'s history and record it
    pub fn analyze_emotion_advanced(
        &self,
        text: &str,
        user_id: &str,
        context: &AnalysisContext,
    ) -> EmotionState {
        let session = self.session(user_id);
        let mut session = session.lock();
        self.track(&mut session.history, text, context.supplementary_text.as_deref())
            .state
    }

    /// Stateful analysis, selection and transition planning for a user
    pub fn get_optimal_animation_with_transition(&self, user_id: &str, text: &str) -> AnimationId {
        self.suggest_animation(user_id, text, &AnalysisContext::default())
            .animation
    }

    /// Full suggestion for a user, honouring the triggering event and the
    /// user's personality
    pub fn suggest_animation(
        &self,
        user_id: &str,
        text: &str,
        context: &AnalysisContext,
    ) -> AnimationSuggestion {
        let session = self.session(user_id);
        let mut session = session.lock();

        let classification =
            self.track(&mut session.history, text, context.supplementary_text.as_deref());

        let mut candidate = self.selector.select(&classification);
        if classification.is_neutral() && context.event == PetEvent::CheckIn {
            candidate = AnimationId::Happy;
        }
        if let Some(profile) = &context.personality {
            candidate = adjust_for_personality(candidate, profile);
        }

        let animation = self.planner.plan(session.last_shown, candidate);
        tracing::debug!(
            user_id,
            from = %session.last_shown,
            %candidate,
            %animation,
            "Planned animation"
        );
        session.last_shown = animation;

        AnimationSuggestion {
            state: classification.state,
            candidate,
            animation,
        }
    }

    /// Copy of a user's history, if the user has been seen
    pub fn history_snapshot(&self, user_id: &str) -> Option<UserEmotionHistory> {
        let session = self.sessions.read().get(user_id).cloned()?;
        let snapshot = session.lock().history.clone();
        Some(snapshot)
    }

    /// Animation last shown to a user (the hub for unknown users)
    pub fn last_shown_animation(&self, user_id: &str) -> AnimationId {
        let session = self.sessions.read().get(user_id).cloned();
        session.map_or(AnimationId::HUB, |s| s.lock().last_shown)
    }

    /// Record what the renderer is actually showing. Unknown identifiers
    /// are logged and recorded as the hub.
    pub fn set_last_shown_raw(&self, user_id: &str, raw: &str) -> AnimationId {
        let animation = AnimationId::parse_or_hub(raw);
        self.session(user_id).lock().last_shown = animation;
        animation
    }

    /// Plan a transition between raw identifiers without touching user state
    pub fn plan_transition_raw(&self, current: &str, candidate: &str) -> AnimationId {
        self.planner.plan_raw(current, candidate)
    }

    /// Forget everything about a user. Returns whether the user was known.
    pub fn reset_user(&self, user_id: &str) -> bool {
        let removed = self.sessions.write().remove(user_id).is_some();
        if removed {
            tracing::info!(user_id, "Reset user session");
        }
        removed
    }

    /// Number of users with a session
    pub fn user_count(&self) -> usize {
        self.sessions.read().len()
    }

    fn session(&self, user_id: &str) -> Arc<Mutex<UserSession>> {
        if let Some(session) = self.sessions.read().get(user_id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write();
        Arc::clone(sessions.entry(user_id.to_string()).or_insert_with(|| {
            tracing::debug!(user_id, "Creating user session");
            Arc::new(Mutex::new(UserSession::new(user_id)))
        }))
    }

    fn track(
        &self,
        history: &mut UserEmotionHistory,
        text: &str,
        supplementary: Option<&str>,
    ) -> Classification {
        let mut classification = self
            .classifier
            .classify_with(text, supplementary, self.clock.now());
        classification.state = self
            .tracker
            .apply_emotional_context(classification.state, history);
        classification
    }
}
