//! Per-user emotional history

use super::{EmotionState, PlutchikEmotion};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Default number of readings kept per user
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// Direction the user's valence is moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Valence rising
    Improving,
    /// Valence falling
    Declining,
    /// Within the deadband
    #[default]
    Stable,
}

/// Bounded, oldest-first record of one user's readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEmotionHistory {
    /// Owner of this history
    pub user_id: String,

    /// Readings, oldest first
    states: VecDeque<EmotionState>,

    /// Trend computed on the last update
    pub trend: Trend,

    /// Valence standard deviation computed on the last update
    pub volatility: f32,
}

impl UserEmotionHistory {
    /// Create an empty history
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            states: VecDeque::with_capacity(DEFAULT_HISTORY_CAPACITY),
            trend: Trend::Stable,
            volatility: 0.0,
        }
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no reading has been stored yet
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Readings, oldest first
    pub fn states(&self) -> impl DoubleEndedIterator<Item = &EmotionState> + ExactSizeIterator {
        self.states.iter()
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<&EmotionState> {
        self.states.back()
    }

    /// Valences of the `n` most recent readings, oldest first
    pub fn recent_valences(&self, n: usize) -> Vec<f32> {
        let skip = self.states.len().saturating_sub(n);
        self.states
            .iter()
            .skip(skip)
            .map(|s| s.dimensions.valence)
            .collect()
    }

    /// Append a reading and evict from the front until at most `capacity`
    /// remain. Returns how many readings were evicted.
    pub fn push_bounded(&mut self, state: EmotionState, capacity: usize) -> usize {
        self.states.push_back(state);
        self.truncate_to(capacity)
    }

    /// Drop the oldest readings until at most `capacity` remain
    pub fn truncate_to(&mut self, capacity: usize) -> usize {
        let excess = self.states.len().saturating_sub(capacity);
        self.states.drain(..excess);
        excess
    }

    /// Mean valence over the stored readings (0.0 when empty)
    pub fn average_valence(&self) -> f32 {
        if self.states.is_empty() {
            return 0.0;
        }
        self.states.iter().map(|s| s.dimensions.valence).sum::<f32>() / self.states.len() as f32
    }

    /// Most frequent primary emotion; ties go to the higher-priority category
    pub fn dominant_emotion(&self) -> Option<PlutchikEmotion> {
        let mut counts: HashMap<PlutchikEmotion, usize> = HashMap::new();
        for state in &self.states {
            *counts.entry(state.primary_emotion).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .max_by_key(|(emotion, count)| (*count, std::cmp::Reverse(emotion.priority_rank())))
            .map(|(emotion, _)| emotion)
    }
}
