//! Context Tracker
//!
//! Folds a fresh reading into a user's history:
//! - Trend of valence against the last few readings
//! - Volatility (valence standard deviation)
//! - Dampening of confidence and intensity for volatile users
//! - Bounded FIFO retention

use crate::config::EngineConfig;
use crate::types::{EmotionIntensity, EmotionState, Trend, UserEmotionHistory};

/// Applies per-user context to freshly classified readings
#[derive(Debug, Clone)]
pub struct ContextTracker {
    capacity: usize,
    trend_window: usize,
    trend_deadband: f32,
    volatility_threshold: f32,
    volatility_dampening: f32,
}

impl Default for ContextTracker {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ContextTracker {
    /// Create a tracker from engine configuration
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            capacity: config.history_capacity,
            trend_window: config.trend_window,
            trend_deadband: config.trend_deadband,
            volatility_threshold: config.volatility_threshold,
            volatility_dampening: config.volatility_dampening,
        }
    }

    /// Readings retained per user
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adjust `state` using `history`, append it, and return the adjusted
    /// reading. The primary emotion is never changed.
    pub fn apply_emotional_context(
        &self,
        state: EmotionState,
        history: &mut UserEmotionHistory,
    ) -> EmotionState {
        if history.len() > self.capacity {
            let dropped = history.truncate_to(self.capacity);
            tracing::warn!(
                user_id = %history.user_id,
                dropped,
                "History exceeded capacity; truncated to newest readings"
            );
        }

        let valence = state.dimensions.valence;
        let trend = self.trend(valence, &history.recent_valences(self.trend_window));

        let mut window = history.recent_valences(self.capacity.saturating_sub(1));
        window.push(valence);
        let volatility = population_std(&window);

        let adjusted = if volatility > self.volatility_threshold {
            let confidence = state.confidence * self.volatility_dampening;
            tracing::debug!(
                user_id = %history.user_id,
                volatility,
                "Volatile user; dampening reading"
            );
            state
                .with_confidence(confidence)
                .with_intensity_cap(EmotionIntensity::Medium)
        } else {
            state
        };

        history.trend = trend;
        history.volatility = volatility;
        history.push_bounded(adjusted.clone(), self.capacity);

        tracing::debug!(
            user_id = %history.user_id,
            trend = ?trend,
            volatility,
            len = history.len(),
            "Updated emotional context"
        );

        adjusted
    }

    fn trend(&self, valence: f32, prior: &[f32]) -> Trend {
        if prior.is_empty() {
            return Trend::Stable;
        }
        let mean = prior.iter().sum::<f32>() / prior.len() as f32;
        let delta = valence - mean;
        if delta > self.trend_deadband {
            Trend::Improving
        } else if delta < -self.trend_deadband {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

fn population_std(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
    variance.sqrt()
}
