//! Engine configuration
//!
//! Tunable numbers for context tracking and animation selection. Defaults
//! are the production values; every field can be overridden through a
//! `COMPANION_*` environment variable.

use companion_core::{get_env_parsed, CompanionError, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::plutchik::DEFAULT_SHORT_TEXT_TOKENS;
use crate::types::DEFAULT_HISTORY_CAPACITY;

/// Tunables for [`crate::EmotionEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Readings kept per user, at most [`DEFAULT_HISTORY_CAPACITY`]
    /// (`COMPANION_HISTORY_CAPACITY`)
    pub history_capacity: usize,

    /// Prior readings averaged for the trend (`COMPANION_TREND_WINDOW`)
    pub trend_window: usize,

    /// Valence change that counts as a trend (`COMPANION_TREND_DEADBAND`)
    pub trend_deadband: f32,

    /// Valence std-dev above which readings are dampened
    /// (`COMPANION_VOLATILITY_THRESHOLD`)
    pub volatility_threshold: f32,

    /// Confidence multiplier for volatile users
    /// (`COMPANION_VOLATILITY_DAMPENING`)
    pub volatility_dampening: f32,

    /// Score gap within which a secondary emotion may take over the
    /// animation (`COMPANION_BLEND_MARGIN`)
    pub blend_margin: f32,

    /// Texts with fewer tokens lose some confidence
    /// (`COMPANION_SHORT_TEXT_TOKENS`)
    pub short_text_tokens: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            trend_window: 3,
            trend_deadband: 0.15,
            volatility_threshold: 0.35,
            volatility_dampening: 0.8,
            blend_margin: 0.25,
            short_text_tokens: DEFAULT_SHORT_TEXT_TOKENS,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by any `COMPANION_*` variables present
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            history_capacity: get_env_parsed("COMPANION_HISTORY_CAPACITY", d.history_capacity),
            trend_window: get_env_parsed("COMPANION_TREND_WINDOW", d.trend_window),
            trend_deadband: get_env_parsed("COMPANION_TREND_DEADBAND", d.trend_deadband),
            volatility_threshold: get_env_parsed(
                "COMPANION_VOLATILITY_THRESHOLD",
                d.volatility_threshold,
            ),
            volatility_dampening: get_env_parsed(
                "COMPANION_VOLATILITY_DAMPENING",
                d.volatility_dampening,
            ),
            blend_margin: get_env_parsed("COMPANION_BLEND_MARGIN", d.blend_margin),
            short_text_tokens: get_env_parsed("COMPANION_SHORT_TEXT_TOKENS", d.short_text_tokens),
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 || self.history_capacity > DEFAULT_HISTORY_CAPACITY {
            return Err(CompanionError::config(format!(
                "history_capacity must be in 1..={}, got {}",
                DEFAULT_HISTORY_CAPACITY, self.history_capacity
            )));
        }
        if self.trend_window == 0 {
            return Err(CompanionError::config("trend_window must be at least 1"));
        }
        if !self.trend_deadband.is_finite() || self.trend_deadband < 0.0 {
            return Err(CompanionError::config(format!(
                "trend_deadband must be a non-negative number, got {}",
                self.trend_deadband
            )));
        }
        if !self.volatility_threshold.is_finite() || self.volatility_threshold < 0.0 {
            return Err(CompanionError::config(format!(
                "volatility_threshold must be a non-negative number, got {}",
                self.volatility_threshold
            )));
        }
        if !(self.volatility_dampening > 0.0 && self.volatility_dampening <= 1.0) {
            return Err(CompanionError::config(format!(
                "volatility_dampening must be in (0, 1], got {}",
                self.volatility_dampening
            )));
        }
        if !self.blend_margin.is_finite() || self.blend_margin < 0.0 {
            return Err(CompanionError::config(format!(
                "blend_margin must be a non-negative number, got {}",
                self.blend_margin
            )));
        }
        Ok(())
    }
}
