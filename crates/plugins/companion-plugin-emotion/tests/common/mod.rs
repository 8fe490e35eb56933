//! Shared helpers for the emotion engine integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use companion_plugin_emotion::{EmotionEngine, EngineConfig, FixedClock};

/// Instant every test reading is stamped with
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 20, 15, 0).unwrap()
}

/// Engine with default configuration and a frozen clock
pub fn test_engine() -> EmotionEngine {
    test_engine_with(EngineConfig::default())
}

/// Engine with the given configuration and a frozen clock
pub fn test_engine_with(config: EngineConfig) -> EmotionEngine {
    EmotionEngine::new(config)
        .expect("engine should build")
        .with_clock(FixedClock(fixed_instant()))
}

/// Mixed-language texts covering every category, modifiers and edge cases
pub const CORPUS: &[&str] = &[
    "",
    "   ",
    "!!!!!",
    "？？？",
    "我今天真的很开心，一切都很顺利！",
    "我有点担心明天的考试...",
    "我不开心",
    "太棒了！！我迫不及待想去旅行",
    "好恶心，受不了了",
    "气死我了！！！凭什么这样",
    "天哪，居然是惊喜",
    "谢谢你一直陪伴我，我很安心",
    "I am not happy at all",
    "I'm so scared and anxious about tomorrow",
    "wow, that was unexpected!",
    "Looking forward to the trip, can't wait!",
    "This is disgusting, I hate it",
    "I feel lonely and heartbroken",
    "thank you, I trust you",
    "happy happy happy happy happy happy!!!!!!!!!!",
    "😀🎉",
    "1234 5678",
];
