//! Stateful services

pub mod context_tracker;
pub mod emotion_engine;

pub use context_tracker::ContextTracker;
pub use emotion_engine::{AnimationSuggestion, Clock, EmotionEngine, FixedClock, SystemClock};
