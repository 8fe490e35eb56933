//! Companion Emotion Plugin
//!
//! Reads how the user feels from what they write and keeps the companion
//! pet's animation in step with it.
//!
//! # Overview
//!
//! - **TextFeatureExtractor**: weighted Chinese and English keywords with
//!   negation, intensifier and diminisher cues, plus punctuation.
//!
//! - **PlutchikClassifier**: Plutchik's eight basic emotions with an
//!   intensity tier, up to two secondary emotions, a confidence and a
//!   valence/arousal/dominance vector.
//!
//! - **ContextTracker**: bounded per-user history with trend and volatility;
//!   volatile users get toned-down readings.
//!
//! - **AnimationSelector**: a complete (emotion, intensity) table refined by
//!   dimensional override rules, secondary-emotion blending and personality.
//!
//! - **TransitionPlanner**: keeps animation changes to at most two hops
//!   through a compatibility graph centred on `idle`.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use companion_plugin_emotion::{EmotionEngine, EngineConfig};
//!
//! let engine = EmotionEngine::new(EngineConfig::from_env())?;
//! let animation = engine.get_optimal_animation_with_transition("user-1", "我今天真的很开心！");
//! println!("show: {}", animation);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use companion_core::{CompanionError, Result};
use std::collections::HashMap;

/// Text analysis and classification
pub mod analysis;
/// Animation selection and transition planning
pub mod animation;
/// Engine configuration
pub mod config;
/// Stateful services
pub mod services;
/// Core types
pub mod types;

pub use analysis::{Classification, PlutchikClassifier, Signal, TextFeatureExtractor, TextFeatures};
pub use animation::{AnimationSelector, TransitionGraph, TransitionPlanner};
pub use config::EngineConfig;
pub use services::*;
pub use types::*;

// ============================================================================
// Banner Rendering
// ============================================================================

/// Represents a configuration setting row for display
struct SettingRow {
    value: String,
    is_default: bool,
    env_var: String,
}

/// Pad string to width, truncating if necessary
fn pad(s: &str, w: usize) -> String {
    let mut out: String = s.chars().take(w).collect();
    let len = out.chars().count();
    out.push_str(&" ".repeat(w.saturating_sub(len)));
    out
}

/// Render the plugin banner with settings to stderr
fn render_emotion_banner(rows: &[SettingRow]) {
    let cyan = "\x1b[36m";
    let green = "\x1b[32m";
    let dim = "\x1b[2m";
    let bold = "\x1b[1m";
    let reset = "\x1b[0m";

    eprintln!("{cyan}+{line}+{reset}", line = "=".repeat(66));
    eprintln!(
        "{cyan}|{reset}{bold}{inner}{reset}{cyan}|{reset}",
        inner = pad("  COMPANION EMOTION ENGINE   (^_^)  (o_o)  (T_T)", 66)
    );
    eprintln!("{cyan}+{line}+{reset}", line = "-".repeat(66));
    eprintln!(
        "{cyan}|{reset}{bold}{a}{b}{c}{reset}{cyan}|{reset}",
        a = pad(" SETTING", 36),
        b = pad(" VALUE", 18),
        c = pad(" STATUS", 12),
    );
    eprintln!("{cyan}+{line}+{reset}", line = "-".repeat(66));

    for row in rows {
        let (color, status) = if row.is_default {
            (dim, "default")
        } else {
            (green, "custom")
        };
        eprintln!(
            "{cyan}|{reset} {name}{value}{color}{status}{reset}{cyan}|{reset}",
            name = pad(&row.env_var, 35),
            value = pad(&row.value, 18),
            status = pad(status, 12),
        );
    }

    eprintln!("{cyan}+{line}+{reset}", line = "=".repeat(66));
}

// ============================================================================
// Plugin Implementation
// ============================================================================

/// Emotion plugin
///
/// Wraps an [`EngineConfig`] and builds a ready [`EmotionEngine`], applying
/// any explicit setting overrides on top.
#[derive(Debug, Clone, Default)]
pub struct EmotionPlugin {
    config: EngineConfig,
}

impl EmotionPlugin {
    /// Plugin with configuration read from the environment
    pub fn new() -> Self {
        Self {
            config: EngineConfig::from_env(),
        }
    }

    /// Plugin with an explicit configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Plugin name
    pub fn name(&self) -> &str {
        "emotion"
    }

    /// Plugin description
    pub fn description(&self) -> &str {
        "Emotion classification, per-user context and animation transitions for the companion pet"
    }

    /// Recognised settings with their defaults
    pub fn config_schema(&self) -> serde_json::Value {
        let d = EngineConfig::default();
        serde_json::json!({
            "COMPANION_HISTORY_CAPACITY": { "type": "integer", "default": d.history_capacity },
            "COMPANION_TREND_WINDOW": { "type": "integer", "default": d.trend_window },
            "COMPANION_TREND_DEADBAND": { "type": "number", "default": d.trend_deadband },
            "COMPANION_VOLATILITY_THRESHOLD": { "type": "number", "default": d.volatility_threshold },
            "COMPANION_VOLATILITY_DAMPENING": { "type": "number", "default": d.volatility_dampening },
            "COMPANION_BLEND_MARGIN": { "type": "number", "default": d.blend_margin },
            "COMPANION_SHORT_TEXT_TOKENS": { "type": "integer", "default": d.short_text_tokens },
        })
    }

    /// Apply `overrides`, show the settings banner and build the engine
    pub fn init(&self, overrides: &HashMap<String, String>) -> Result<EmotionEngine> {
        let config = apply_overrides(self.config.clone(), overrides)?;

        let schema = self.config_schema();
        let rows: Vec<SettingRow> = schema
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(key, val)| {
                        let def = val
                            .get("default")
                            .map(|v| v.to_string())
                            .unwrap_or_default();
                        let custom = overrides
                            .get(key)
                            .cloned()
                            .or_else(|| std::env::var(key).ok());
                        let is_default = custom.is_none();
                        SettingRow {
                            value: custom.unwrap_or(def),
                            is_default,
                            env_var: key.clone(),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        render_emotion_banner(&rows);

        let engine = EmotionEngine::new(config)?;
        tracing::info!(plugin = self.name(), "Emotion plugin initialized");
        Ok(engine)
    }
}

fn apply_overrides(mut config: EngineConfig, overrides: &HashMap<String, String>) -> Result<EngineConfig> {
    fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
        raw.trim()
            .parse()
            .map_err(|_| CompanionError::config(format!("invalid value '{}' for {}", raw, key)))
    }

    for (key, raw) in overrides {
        match key.as_str() {
            "COMPANION_HISTORY_CAPACITY" => config.history_capacity = parse(key, raw)?,
            "COMPANION_TREND_WINDOW" => config.trend_window = parse(key, raw)?,
            "COMPANION_TREND_DEADBAND" => config.trend_deadband = parse(key, raw)?,
            "COMPANION_VOLATILITY_THRESHOLD" => config.volatility_threshold = parse(key, raw)?,
            "COMPANION_VOLATILITY_DAMPENING" => config.volatility_dampening = parse(key, raw)?,
            "COMPANION_BLEND_MARGIN" => config.blend_margin = parse(key, raw)?,
            "COMPANION_SHORT_TEXT_TOKENS" => config.short_text_tokens = parse(key, raw)?,
            other => tracing::warn!(setting = other, "Ignoring unknown emotion setting"),
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_every_setting() {
        let schema = EmotionPlugin::with_config(EngineConfig::default()).config_schema();
        let map = schema.as_object().unwrap();
        assert_eq!(map.len(), 7);
        assert_eq!(map["COMPANION_HISTORY_CAPACITY"]["default"], 20);
    }

    #[test]
    fn test_init_applies_overrides() {
        let plugin = EmotionPlugin::with_config(EngineConfig::default());
        let mut overrides = HashMap::new();
        overrides.insert("COMPANION_HISTORY_CAPACITY".to_string(), "7".to_string());
        let engine = plugin.init(&overrides).unwrap();
        assert_eq!(engine.config().history_capacity, 7);
    }

    #[test]
    fn test_init_rejects_bad_override() {
        let plugin = EmotionPlugin::with_config(EngineConfig::default());
        let mut overrides = HashMap::new();
        overrides.insert("COMPANION_BLEND_MARGIN".to_string(), "wide".to_string());
        assert!(plugin.init(&overrides).unwrap_err().is_fatal());

        overrides.insert("COMPANION_BLEND_MARGIN".to_string(), "0.2".to_string());
        overrides.insert("COMPANION_HISTORY_CAPACITY".to_string(), "0".to_string());
        assert!(plugin.init(&overrides).is_err());

        overrides.insert("COMPANION_HISTORY_CAPACITY".to_string(), "50".to_string());
        assert!(plugin.init(&overrides).unwrap_err().is_fatal());
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("abc", 5), "abc  ");
        assert_eq!(pad("abcdef", 3), "abc");
    }
}
