//! Concurrent access to the session store

mod common;

use common::*;
use companion_plugin_emotion::{AnalysisContext, PlutchikEmotion};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_users_keep_separate_histories() {
    let engine = Arc::new(test_engine());
    let mut handles = Vec::new();

    for worker in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let user = format!("user-{}", worker);
            let ctx = AnalysisContext::default();
            for i in 0..25 {
                let text = if worker % 2 == 0 {
                    format!("我今天很开心 {}", i)
                } else {
                    format!("I feel lonely {}", i)
                };
                engine.analyze_emotion_advanced(&text, &user, &ctx);
                engine.get_optimal_animation_with_transition(&user, &text);
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(engine.user_count(), 8);
    for worker in 0..8 {
        let history = engine.history_snapshot(&format!("user-{}", worker)).unwrap();
        assert_eq!(history.len(), 20);
        let expected = if worker % 2 == 0 {
            PlutchikEmotion::Joy
        } else {
            PlutchikEmotion::Sadness
        };
        assert!(history.states().all(|s| s.primary_emotion == expected));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_user_updates_are_serialized() {
    let engine = Arc::new(test_engine());
    let mut handles = Vec::new();

    for _ in 0..6 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            for _ in 0..3 {
                engine.analyze_emotion_advanced("thank you, I trust you", "shared", &AnalysisContext::default());
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let history = engine.history_snapshot("shared").unwrap();
    assert_eq!(history.len(), 18);
    assert_eq!(history.dominant_emotion(), Some(PlutchikEmotion::Trust));
}
