//! Valence / arousal / dominance fusion

use super::features::TextFeatures;
use crate::types::{EmotionDimensions, PlutchikEmotion};

/// Folds category scores into a single clamped VAD vector
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionalClassifier;

impl DimensionalClassifier {
    /// Create a classifier
    pub fn new() -> Self {
        Self
    }

    /// Weighted sum of category baselines plus punctuation deltas
    pub fn fuse(&self, features: &TextFeatures) -> EmotionDimensions {
        let (mut valence, mut arousal, mut dominance) = (0.0f32, 0.0f32, 0.0f32);

        for emotion in PlutchikEmotion::ALL {
            let score = features.score(emotion);
            if score == 0.0 {
                continue;
            }
            let base = emotion.baseline();
            valence += score * base.valence;
            arousal += score * base.arousal;
            dominance += score * base.dominance;
        }

        arousal += features.arousal_delta;
        dominance += features.dominance_delta;

        EmotionDimensions::new(valence, arousal, dominance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TextFeatureExtractor;

    #[test]
    fn test_zero_features_fuse_to_origin() {
        let dims = DimensionalClassifier::new().fuse(&TextFeatures::default());
        assert!(dims.is_zero());
    }

    #[test]
    fn test_fusion_follows_baseline() {
        let mut features = TextFeatures::default();
        features.scores[PlutchikEmotion::Fear.index()] = 0.5;
        let dims = DimensionalClassifier::new().fuse(&features);
        assert!((dims.valence + 0.3).abs() < 1e-6);
        assert!((dims.arousal - 0.3).abs() < 1e-6);
        assert!((dims.dominance + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_fusion_clamps() {
        let features = TextFeatureExtractor::new()
            .extract("开心 开心 开心 高兴 快乐 幸福 happy glad joy!!!!!!!!");
        let dims = DimensionalClassifier::new().fuse(&features);
        assert!(dims.in_range());
        assert_eq!(dims.valence, 1.0);
    }
}
