//! End-to-End Scenarios
//!
//! Tests the complete text → animation flow:
//! - Representative Chinese and English messages
//! - Signal-free input
//! - Per-user context over several messages
//! - Check-in events and personality

mod common;

use common::*;
use companion_plugin_emotion::{
    AnalysisContext, AnimationId, EmotionIntensity, EngineConfig, PersonalityProfile, PetEvent,
    PlutchikEmotion, TraitLevel, Trend,
};

// ============================================================================
// Single Message Scenarios
// ============================================================================

#[test]
fn test_joyful_message() {
    let engine = test_engine();
    let text = "我今天真的很开心，一切都很顺利！";

    let state = engine.analyze_emotion_advanced(text, "u-joy", &AnalysisContext::default());
    assert_eq!(state.primary_emotion, PlutchikEmotion::Joy);
    assert!(state.intensity >= EmotionIntensity::Medium);

    let animation = engine.analyze_emotion_for_pet(text);
    assert!(matches!(animation, AnimationId::Happy | AnimationId::Excited));
}

#[test]
fn test_worried_message() {
    let engine = test_engine();
    let text = "我有点担心明天的考试...";

    let state = engine.analyze_emotion_advanced(text, "u-worry", &AnalysisContext::default());
    assert_eq!(state.primary_emotion, PlutchikEmotion::Fear);

    let animation = engine.get_optimal_animation_with_transition("u-worry-2", text);
    assert_eq!(animation, AnimationId::Concerned);
}

#[test]
fn test_empty_message() {
    let engine = test_engine();

    let state = engine.analyze_emotion_advanced("", "u-empty", &AnalysisContext::default());
    assert_eq!(state.primary_emotion, PlutchikEmotion::NEUTRAL_DEFAULT);
    assert_eq!(state.intensity, EmotionIntensity::Low);
    assert!(state.confidence < 0.3);
    assert!(state.secondary_emotions.is_empty());

    assert_eq!(engine.analyze_emotion_for_pet(""), AnimationId::Idle);
    assert_eq!(engine.get_optimal_animation_with_transition("u-empty", ""), AnimationId::Idle);
}

#[test]
fn test_praise_then_joy_stays_joy() {
    let engine = test_engine();
    for text in ["今天不错，很开心！", "没事，我很开心", "不管怎样，开心就好"] {
        let state = engine.classify(text).state;
        assert_eq!(state.primary_emotion, PlutchikEmotion::Joy, "for {:?}", text);
        assert!(state.dimensions.valence > 0.0);
    }
}

#[test]
fn test_exclamations_raise_arousal() {
    let engine = test_engine();
    let plain = engine.classify("今天去上学");
    let loud = engine.classify("今天去上学!!!!!");
    assert!(loud.state.dimensions.arousal > plain.state.dimensions.arousal);
}

#[test]
fn test_angry_message() {
    let engine = test_engine();
    let state = engine.analyze_emotion_advanced("气死我了！！！凭什么这样", "u-angry", &AnalysisContext::default());
    assert_eq!(state.primary_emotion, PlutchikEmotion::Anger);
    assert_eq!(engine.analyze_emotion_for_pet("气死我了！！！凭什么这样"), AnimationId::Angry);
}

#[test]
fn test_negated_english_message_is_not_joy() {
    let engine = test_engine();
    let state = engine.analyze_emotion_advanced("I am not happy at all", "u-neg", &AnalysisContext::default());
    assert_ne!(state.primary_emotion, PlutchikEmotion::Joy);
    assert!(state.dimensions.valence < 0.0);
}

// ============================================================================
// Context Over Several Messages
// ============================================================================

#[test]
fn test_trend_follows_mood() {
    let engine = test_engine();
    let ctx = AnalysisContext::default();

    for _ in 0..3 {
        engine.analyze_emotion_advanced("I feel lonely and heartbroken", "u-trend", &ctx);
    }
    assert_eq!(
        engine.history_snapshot("u-trend").unwrap().trend,
        Trend::Stable
    );

    engine.analyze_emotion_advanced("thank you, I trust you", "u-trend", &ctx);
    let history = engine.history_snapshot("u-trend").unwrap();
    assert_eq!(history.trend, Trend::Improving);
    assert_eq!(history.dominant_emotion(), Some(PlutchikEmotion::Sadness));
    assert!(history.average_valence() < 0.0);
}

#[test]
fn test_volatile_user_is_dampened() {
    let engine = test_engine();
    let ctx = AnalysisContext::default();

    engine.analyze_emotion_advanced("I feel lonely and heartbroken", "u-vol", &ctx);
    let state = engine.analyze_emotion_advanced("我今天真的很开心，一切都很顺利！", "u-vol", &ctx);

    assert_eq!(state.primary_emotion, PlutchikEmotion::Joy);
    assert!(state.intensity <= EmotionIntensity::Medium);
    assert!(engine.history_snapshot("u-vol").unwrap().volatility > 0.35);
}

#[test]
fn test_users_are_isolated() {
    let engine = test_engine();
    let ctx = AnalysisContext::default();

    engine.analyze_emotion_advanced("I feel lonely and heartbroken", "u-a", &ctx);
    engine.analyze_emotion_advanced("我今天真的很开心", "u-b", &ctx);

    assert_eq!(engine.history_snapshot("u-a").unwrap().len(), 1);
    assert_eq!(engine.history_snapshot("u-b").unwrap().len(), 1);
    assert_eq!(engine.user_count(), 2);
}

#[test]
fn test_transition_goes_through_hub() {
    let engine = test_engine();
    engine.set_last_shown_raw("u-hop", "angry");

    let first = engine.get_optimal_animation_with_transition("u-hop", "我今天真的很开心，一切都很顺利！");
    assert_eq!(first, AnimationId::Idle);

    let second = engine.get_optimal_animation_with_transition("u-hop", "我今天真的很开心，一切都很顺利！");
    assert_eq!(second, AnimationId::Excited);
    assert_eq!(engine.last_shown_animation("u-hop"), AnimationId::Excited);
}

#[test]
fn test_small_history_capacity() {
    let engine = test_engine_with(EngineConfig {
        history_capacity: 3,
        ..Default::default()
    });
    for text in CORPUS {
        engine.analyze_emotion_advanced(text, "u-small", &AnalysisContext::default());
    }
    assert_eq!(engine.history_snapshot("u-small").unwrap().len(), 3);
}

// ============================================================================
// Events and Personality
// ============================================================================

#[test]
fn test_check_in_celebrates() {
    let engine = test_engine();
    let suggestion = engine.suggest_animation(
        "u-check",
        "打卡",
        &AnalysisContext::for_event(PetEvent::CheckIn),
    );
    assert_eq!(suggestion.animation, AnimationId::Happy);
}

#[test]
fn test_reflection_uses_supplementary_text() {
    let engine = test_engine();
    let ctx = AnalysisContext::for_event(PetEvent::ReflectionAdded)
        .with_supplementary_text("谢谢你一直陪伴我");
    let suggestion = engine.suggest_animation("u-reflect", "今天完成了", &ctx);
    assert_eq!(suggestion.state.primary_emotion, PlutchikEmotion::Trust);
}

#[test]
fn test_anxious_user_gets_attention() {
    let engine = test_engine();
    let ctx = AnalysisContext::default()
        .with_personality(PersonalityProfile::balanced().with_anxiety(TraitLevel::High));
    let suggestion = engine.suggest_animation("u-anx", "", &ctx);
    assert_eq!(suggestion.candidate, AnimationId::Concerned);
    assert_eq!(suggestion.animation, AnimationId::Concerned);
}

#[test]
fn test_playful_user_gets_livelier() {
    let engine = test_engine();
    let ctx = AnalysisContext::default()
        .with_personality(PersonalityProfile::balanced().with_playfulness(TraitLevel::High));
    let suggestion = engine.suggest_animation("u-play", "thank you, I feel glad today", &ctx);
    assert_eq!(suggestion.candidate, AnimationId::Excited);
}
