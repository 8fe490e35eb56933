//! Weighted emotion lexicon
//!
//! Chinese and English keywords per Plutchik category, plus the negation,
//! intensifier and diminisher cues that modify a keyword when they appear
//! just before it. The tables are built once and validated before the engine
//! serves its first request.

use crate::types::PlutchikEmotion;
use companion_core::{CompanionError, Result};
use once_cell::sync::Lazy;

/// Every category must carry at least this many keywords
pub const MIN_KEYWORDS_PER_CATEGORY: usize = 20;

// ── Keyword sets ───────────────────────────────────────────

const JOY_KW: &[(&str, f32)] = &[
    // Chinese
    ("开心", 1.0),
    ("高兴", 1.0),
    ("快乐", 1.0),
    ("幸福", 1.0),
    ("喜悦", 1.0),
    ("愉快", 0.9),
    ("欢乐", 0.9),
    ("太棒了", 1.0),
    ("兴奋", 0.8),
    ("满足", 0.7),
    ("美好", 0.6),
    ("顺利", 0.6),
    ("哈哈", 0.6),
    // English
    ("happy", 1.0),
    ("joy", 1.0),
    ("delighted", 1.0),
    ("glad", 0.9),
    ("wonderful", 0.9),
    ("thrilled", 0.9),
    ("awesome", 0.8),
    ("cheerful", 0.8),
    ("excited", 0.8),
    ("love it", 0.8),
    ("yay", 0.7),
    ("great", 0.6),
];

const TRUST_KW: &[(&str, f32)] = &[
    ("信任", 1.0),
    ("相信", 0.9),
    ("放心", 0.9),
    ("安心", 0.9),
    ("依靠", 0.8),
    ("可靠", 0.8),
    ("感激", 0.8),
    ("感谢", 0.7),
    ("温暖", 0.7),
    ("谢谢", 0.6),
    ("支持", 0.6),
    ("陪伴", 0.6),
    ("理解", 0.5),
    ("朋友", 0.4),
    ("trust", 1.0),
    ("reliable", 0.8),
    ("grateful", 0.8),
    ("believe", 0.7),
    ("rely", 0.7),
    ("thank", 0.6),
    ("safe", 0.6),
    ("support", 0.6),
    ("honest", 0.6),
    ("friend", 0.4),
];

const FEAR_KW: &[(&str, f32)] = &[
    ("担心", 1.0),
    ("害怕", 1.0),
    ("恐惧", 1.0),
    ("焦虑", 1.0),
    ("不安", 0.9),
    ("恐怖", 0.9),
    ("忧虑", 0.9),
    ("担忧", 0.9),
    ("惊慌", 0.9),
    ("紧张", 0.8),
    ("可怕", 0.8),
    ("心慌", 0.8),
    ("发抖", 0.7),
    ("压力", 0.6),
    ("afraid", 1.0),
    ("scared", 1.0),
    ("fear", 1.0),
    ("worried", 1.0),
    ("anxious", 1.0),
    ("terrified", 1.0),
    ("frightened", 1.0),
    ("worry", 0.9),
    ("panic", 0.9),
    ("nervous", 0.8),
    ("stress", 0.6),
];

const SURPRISE_KW: &[(&str, f32)] = &[
    ("惊讶", 1.0),
    ("吃惊", 1.0),
    ("震惊", 1.0),
    ("没想到", 0.9),
    ("惊喜", 0.9),
    ("不可思议", 0.9),
    ("难以置信", 0.9),
    ("意外", 0.8),
    ("天哪", 0.8),
    ("居然", 0.7),
    ("竟然", 0.7),
    ("哇", 0.6),
    ("突然", 0.5),
    ("surprise", 1.0),
    ("shocked", 1.0),
    ("astonished", 1.0),
    ("amazed", 0.9),
    ("unbelievable", 0.9),
    ("unexpected", 0.8),
    ("omg", 0.8),
    ("wow", 0.7),
    ("whoa", 0.7),
    ("suddenly", 0.5),
];

const SADNESS_KW: &[(&str, f32)] = &[
    ("难过", 1.0),
    ("伤心", 1.0),
    ("悲伤", 1.0),
    ("沮丧", 1.0),
    ("心碎", 1.0),
    ("不开心", 1.0),
    ("失望", 0.9),
    ("痛苦", 0.9),
    ("孤独", 0.8),
    ("寂寞", 0.8),
    ("郁闷", 0.8),
    ("低落", 0.8),
    ("委屈", 0.8),
    ("哭", 0.7),
    ("遗憾", 0.7),
    ("sad", 1.0),
    ("unhappy", 1.0),
    ("depressed", 1.0),
    ("heartbroken", 1.0),
    ("miserable", 1.0),
    ("lonely", 0.9),
    ("disappointed", 0.9),
    ("hopeless", 0.9),
    ("crying", 0.8),
    ("upset", 0.8),
];

const DISGUST_KW: &[(&str, f32)] = &[
    ("恶心", 1.0),
    ("厌恶", 1.0),
    ("作呕", 1.0),
    ("讨厌", 0.9),
    ("反感", 0.9),
    ("嫌弃", 0.9),
    ("鄙视", 0.9),
    ("反胃", 0.9),
    ("受不了", 0.8),
    ("烦人", 0.7),
    ("肮脏", 0.7),
    ("无语", 0.6),
    ("垃圾", 0.6),
    ("腻", 0.5),
    ("disgusting", 1.0),
    ("disgusted", 1.0),
    ("revolting", 1.0),
    ("gross", 0.9),
    ("yuck", 0.9),
    ("hate", 0.8),
    ("nasty", 0.8),
    ("dislike", 0.8),
    ("sick of", 0.8),
    ("awful", 0.6),
];

const ANGER_KW: &[(&str, f32)] = &[
    ("生气", 1.0),
    ("愤怒", 1.0),
    ("气死", 1.0),
    ("气愤", 1.0),
    ("恼火", 0.9),
    ("火大", 0.9),
    ("暴躁", 0.9),
    ("发火", 0.9),
    ("抓狂", 0.9),
    ("混蛋", 0.9),
    ("烦躁", 0.8),
    ("可恶", 0.8),
    ("不爽", 0.8),
    ("受够了", 0.8),
    ("凭什么", 0.6),
    ("angry", 1.0),
    ("furious", 1.0),
    ("rage", 1.0),
    ("outraged", 1.0),
    ("livid", 0.9),
    ("pissed", 0.9),
    ("annoyed", 0.8),
    ("irritated", 0.8),
    ("frustrated", 0.8),
    ("hostile", 0.7),
];

const ANTICIPATION_KW: &[(&str, f32)] = &[
    ("期待", 1.0),
    ("迫不及待", 1.0),
    ("盼望", 0.9),
    ("憧憬", 0.9),
    ("等不及", 0.9),
    ("希望", 0.8),
    ("向往", 0.8),
    ("梦想", 0.7),
    ("好奇", 0.7),
    ("即将", 0.6),
    ("计划", 0.5),
    ("准备", 0.5),
    ("目标", 0.5),
    ("打算", 0.5),
    ("anticipate", 1.0),
    ("looking forward", 1.0),
    ("can't wait", 1.0),
    ("eager", 0.9),
    ("hopeful", 0.8),
    ("curious", 0.7),
    ("expect", 0.6),
    ("upcoming", 0.6),
    ("planning", 0.5),
    ("prepare", 0.5),
    ("goal", 0.5),
    ("soon", 0.4),
];

fn owned(cues: &[&str]) -> Vec<String> {
    cues.iter().map(|c| c.to_lowercase()).collect()
}

fn keywords_for(emotion: PlutchikEmotion) -> &'static [(&'static str, f32)] {
    match emotion {
        PlutchikEmotion::Joy => JOY_KW,
        PlutchikEmotion::Trust => TRUST_KW,
        PlutchikEmotion::Fear => FEAR_KW,
        PlutchikEmotion::Surprise => SURPRISE_KW,
        PlutchikEmotion::Sadness => SADNESS_KW,
        PlutchikEmotion::Disgust => DISGUST_KW,
        PlutchikEmotion::Anger => ANGER_KW,
        PlutchikEmotion::Anticipation => ANTICIPATION_KW,
    }
}

// ── Modifier cues ──────────────────────────────────────────

const NEGATION_CUES: &[&str] = &[
    "不", "没", "别", "未", "无", "莫", "not", "no", "never", "don't", "dont", "didn't", "isn't",
    "wasn't", "aren't", "can't", "cannot", "won't", "hardly", "without",
];

/// Everyday compounds whose first character is a negation cue but which do
/// not negate what follows
const NEGATION_EXEMPT: &[&str] = &[
    "不错", "不管", "不过", "不仅", "不但", "没事", "没关系", "别人", "未来", "无论",
];

const INTENSIFIER_CUES: &[&str] = &[
    "很", "非常", "真的", "特别", "超级", "超", "太", "好", "十分", "极其", "格外", "very",
    "really", "so", "extremely", "super", "totally", "absolutely", "incredibly",
];

const DIMINISHER_CUES: &[&str] = &[
    "有点", "有些", "一点", "稍微", "略", "些许", "bit", "slightly", "somewhat", "little",
    "kinda",
];

/// A keyword and the category it votes for
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    /// Lowercased keyword text
    pub keyword: String,
    /// Category this keyword scores
    pub emotion: PlutchikEmotion,
    /// Weight added per match before modifiers
    pub weight: f32,
    /// ASCII keywords must match a whole word, give or take an inflection
    pub word_bound: bool,
}

/// The full keyword and cue tables
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    negations: Vec<String>,
    negation_exempt: Vec<String>,
    intensifiers: Vec<String>,
    diminishers: Vec<String>,
}

static BUILTIN: Lazy<Lexicon> = Lazy::new(Lexicon::from_tables);

impl Lexicon {
    /// Shared built-in lexicon
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    fn from_tables() -> Self {
        let entries = PlutchikEmotion::ALL
            .iter()
            .flat_map(|&emotion| {
                keywords_for(emotion).iter().map(move |&(kw, weight)| LexiconEntry {
                    keyword: kw.to_lowercase(),
                    emotion,
                    weight,
                    word_bound: kw.is_ascii(),
                })
            })
            .collect();

        Self {
            entries,
            negations: owned(NEGATION_CUES),
            negation_exempt: owned(NEGATION_EXEMPT),
            intensifiers: owned(INTENSIFIER_CUES),
            diminishers: owned(DIMINISHER_CUES),
        }
    }

    /// All keyword entries, grouped by category in wheel order
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Number of keywords that score `emotion`
    pub fn count_for(&self, emotion: PlutchikEmotion) -> usize {
        self.entries.iter().filter(|e| e.emotion == emotion).count()
    }

    /// Negation cues
    pub fn negations(&self) -> &[String] {
        &self.negations
    }

    /// Compounds that contain a negation cue without negating
    pub fn negation_exemptions(&self) -> &[String] {
        &self.negation_exempt
    }

    /// Intensifier cues
    pub fn intensifiers(&self) -> &[String] {
        &self.intensifiers
    }

    /// Diminisher cues
    pub fn diminishers(&self) -> &[String] {
        &self.diminishers
    }

    /// Check the lexicon is complete enough to serve requests
    pub fn validate(&self) -> Result<()> {
        for emotion in PlutchikEmotion::ALL {
            let count = self.count_for(emotion);
            if count < MIN_KEYWORDS_PER_CATEGORY {
                return Err(CompanionError::config(format!(
                    "lexicon has {} keywords for {}, need at least {}",
                    count, emotion, MIN_KEYWORDS_PER_CATEGORY
                )));
            }
        }

        if let Some(bad) = self
            .entries
            .iter()
            .find(|e| e.keyword.is_empty() || !e.weight.is_finite() || e.weight <= 0.0)
        {
            return Err(CompanionError::config(format!(
                "invalid lexicon entry '{}' for {} (weight {})",
                bad.keyword, bad.emotion, bad.weight
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        Lexicon::builtin().validate().unwrap();
    }

    #[test]
    fn test_every_category_has_enough_keywords() {
        let lexicon = Lexicon::builtin();
        for emotion in PlutchikEmotion::ALL {
            assert!(lexicon.count_for(emotion) >= MIN_KEYWORDS_PER_CATEGORY);
        }
    }

    #[test]
    fn test_no_duplicate_keywords_within_category() {
        let lexicon = Lexicon::builtin();
        for emotion in PlutchikEmotion::ALL {
            let mut words: Vec<_> = lexicon
                .entries()
                .iter()
                .filter(|e| e.emotion == emotion)
                .map(|e| e.keyword.as_str())
                .collect();
            let total = words.len();
            words.sort_unstable();
            words.dedup();
            assert_eq!(words.len(), total, "duplicate keyword in {emotion}");
        }
    }

    #[test]
    fn test_incomplete_lexicon_rejected() {
        let mut lexicon = Lexicon::builtin().clone();
        lexicon.entries.retain(|e| e.emotion != PlutchikEmotion::Disgust);
        let err = lexicon.validate().unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("disgust"));
    }

    #[test]
    fn test_word_bound_only_for_ascii() {
        let lexicon = Lexicon::builtin();
        let happy = lexicon.entries().iter().find(|e| e.keyword == "happy").unwrap();
        assert!(happy.word_bound);
        let kaixin = lexicon.entries().iter().find(|e| e.keyword == "开心").unwrap();
        assert!(!kaixin.word_bound);
    }

    #[test]
    fn test_negation_exemptions_begin_with_a_cue() {
        let lexicon = Lexicon::builtin();
        for word in lexicon.negation_exemptions() {
            assert!(
                lexicon.negations().iter().any(|cue| word.starts_with(cue.as_str())),
                "{word} does not start with a negation cue"
            );
        }
    }
}
