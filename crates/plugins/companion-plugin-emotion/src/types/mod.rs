//! Core types for the emotion pipeline
//!
//! - EmotionDimensions / PlutchikEmotion / EmotionIntensity / EmotionState
//! - UserEmotionHistory and Trend
//! - AnimationId catalog
//! - AnalysisContext supplied by callers

mod animation;
mod context;
mod emotion;
mod history;

pub use animation::*;
pub use context::*;
pub use emotion::*;
pub use history::*;
