//! Text Feature Extraction
//!
//! Scans raw text for weighted emotion keywords and punctuation cues.
//! Keyword-based (fast, no model call): every lexicon keyword found in the
//! text adds its weight to its category, scaled by whatever negation,
//! intensifier or diminisher cue sits in the few tokens just before it.

use super::lexicon::Lexicon;
use crate::types::PlutchikEmotion;
use std::ops::Range;

/// How many tokens before a keyword are searched for modifier cues
pub const NEGATION_WINDOW: usize = 3;

/// Weight multiplier for a negated keyword ("not happy" pushes against joy)
pub const NEGATION_FACTOR: f32 = -0.5;

/// Weight multiplier after an intensifier ("very", "很")
pub const INTENSIFIER_FACTOR: f32 = 1.5;

/// Weight multiplier after a diminisher ("a bit", "有点")
pub const DIMINISHER_FACTOR: f32 = 0.7;

/// Arousal added per exclamation mark
pub const EXCLAMATION_AROUSAL: f32 = 0.1;

/// Dominance removed per question mark
pub const QUESTION_DOMINANCE: f32 = 0.1;

/// Raw signal extracted from one text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextFeatures {
    /// Summed keyword weight per category, indexed by [`PlutchikEmotion::index`]
    pub scores: [f32; 8],

    /// Arousal contributed by punctuation
    pub arousal_delta: f32,

    /// Dominance contributed by punctuation
    pub dominance_delta: f32,

    /// Tokens in the text (each CJK character counts as one)
    pub token_count: usize,

    /// Keyword matches, including negated ones
    pub keyword_hits: usize,

    /// Keyword matches that were negated
    pub negated_hits: usize,
}

impl TextFeatures {
    /// Raw score of a category
    pub fn score(&self, emotion: PlutchikEmotion) -> f32 {
        self.scores[emotion.index()]
    }

    /// Whether any category scored above zero
    pub fn has_positive_score(&self) -> bool {
        self.scores.iter().any(|&s| s > 0.0)
    }

    /// Sum of all positive category scores
    pub fn positive_mass(&self) -> f32 {
        self.scores.iter().filter(|&&s| s > 0.0).sum()
    }

    /// Whether the text carried any emotional signal at all
    pub fn has_signal(&self) -> bool {
        self.keyword_hits > 0 || self.arousal_delta != 0.0 || self.dominance_delta != 0.0
    }

    /// Fold another text's features into this one at a reduced weight
    pub fn merge_scaled(&mut self, other: &TextFeatures, weight: f32) {
        for (mine, theirs) in self.scores.iter_mut().zip(other.scores.iter()) {
            *mine += theirs * weight;
        }
        self.arousal_delta += other.arousal_delta * weight;
        self.dominance_delta += other.dominance_delta * weight;
        self.token_count += other.token_count;
        self.keyword_hits += other.keyword_hits;
        self.negated_hits += other.negated_hits;
    }
}

/// Cue found in front of a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// No cue in the window
    None,
    /// "not", "不"
    Negated,
    /// "a bit", "有点"
    Diminished,
    /// "very", "很"
    Intensified,
}

impl Modifier {
    /// Multiplier applied to the keyword's weight
    pub fn factor(self) -> f32 {
        match self {
            Modifier::None => 1.0,
            Modifier::Negated => NEGATION_FACTOR,
            Modifier::Diminished => DIMINISHER_FACTOR,
            Modifier::Intensified => INTENSIFIER_FACTOR,
        }
    }
}

/// Endings an English keyword may carry and still count as the same word
const INFLECTIONS: &[&str] = &["s", "es", "d", "ed", "ing", "ly", "ful", "er"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    /// Clause punctuation; modifier cues never reach across it
    pub boundary: bool,
}

impl Token<'_> {
    fn is_boundary(&self) -> bool {
        self.boundary
    }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}')
}

fn is_clause_break(c: char) -> bool {
    matches!(c,
        '，' | '。' | '！' | '？' | '；' | '：' | '、' | '…'
        | ',' | '.' | ';' | ':' | '!' | '?' | '\n')
}

fn is_word_char(c: char) -> bool {
    (c.is_alphanumeric() && !is_cjk(c)) || c == '\'' || c == '’'
}

/// Split text into tokens: every CJK character stands alone, runs of other
/// alphanumerics (apostrophes included) form words, clause punctuation becomes
/// a boundary token, everything else separates.
pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if is_word_char(c) {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push(Token { text: &text[start..i], start, boundary: false });
        }
        let boundary = is_clause_break(c);
        if boundary || is_cjk(c) {
            tokens.push(Token { text: &text[i..i + c.len_utf8()], start: i, boundary });
        }
    }
    if let Some(start) = word_start {
        tokens.push(Token { text: &text[start..], start, boundary: false });
    }

    tokens
}

/// Keyword and punctuation scanner
#[derive(Debug, Clone)]
pub struct TextFeatureExtractor {
    lexicon: &'static Lexicon,
    window: usize,
}

impl Default for TextFeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFeatureExtractor {
    /// Extractor over the built-in lexicon
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
            window: NEGATION_WINDOW,
        }
    }

    /// Lexicon this extractor reads
    pub fn lexicon(&self) -> &'static Lexicon {
        self.lexicon
    }

    /// Extract features from `text`. Never fails; empty text yields zeros.
    pub fn extract(&self, text: &str) -> TextFeatures {
        let lowered = text.to_lowercase();
        let tokens = tokenize(&lowered);

        let mut features = TextFeatures {
            token_count: tokens.iter().filter(|t| !t.is_boundary()).count(),
            ..Default::default()
        };

        let exempt: Vec<Range<usize>> = self
            .lexicon
            .negation_exemptions()
            .iter()
            .flat_map(|word| {
                lowered
                    .match_indices(word.as_str())
                    .map(|(pos, m)| pos..pos + m.len())
            })
            .collect();

        for c in lowered.chars() {
            match c {
                '!' | '！' => features.arousal_delta += EXCLAMATION_AROUSAL,
                '?' | '？' => features.dominance_delta -= QUESTION_DOMINANCE,
                _ => {}
            }
        }

        for entry in self.lexicon.entries() {
            for (pos, _) in lowered.match_indices(entry.keyword.as_str()) {
                if entry.word_bound && !is_whole_word(&lowered, pos, entry.keyword.len()) {
                    continue;
                }

                let idx = tokens.partition_point(|t| t.start < pos);
                let window = &tokens[idx.saturating_sub(self.window)..idx];
                let modifier = self.modifier(window, &exempt);

                features.scores[entry.emotion.index()] += entry.weight * modifier.factor();
                features.keyword_hits += 1;
                if modifier == Modifier::Negated {
                    features.negated_hits += 1;
                }
            }
        }

        tracing::trace!(
            tokens = features.token_count,
            hits = features.keyword_hits,
            negated = features.negated_hits,
            "Extracted text features"
        );

        features
    }

    /// Strongest cue in the window; negation beats diminishing beats intensifying.
    /// Only tokens after the last clause boundary count, and characters inside
    /// an `exempt` compound (不错, 没事) are not read as negation.
    fn modifier(&self, window: &[Token<'_>], exempt: &[Range<usize>]) -> Modifier {
        let window = match window.iter().rposition(Token::is_boundary) {
            Some(b) => &window[b + 1..],
            None => window,
        };
        if window.is_empty() {
            return Modifier::None;
        }

        let joined: String = window.iter().map(|t| t.text).collect();
        let negatable: String = window
            .iter()
            .map(|t| {
                if exempt.iter().any(|r| r.contains(&t.start)) {
                    " "
                } else {
                    t.text
                }
            })
            .collect();
        let present = |cues: &[String], scope: &str| {
            cues.iter().any(|cue| {
                if cue.is_ascii() {
                    window.iter().any(|t| t.text == cue.as_str())
                } else {
                    scope.contains(cue.as_str())
                }
            })
        };

        if present(self.lexicon.negations(), &negatable) {
            Modifier::Negated
        } else if present(self.lexicon.diminishers(), &joined) {
            Modifier::Diminished
        } else if present(self.lexicon.intensifiers(), &joined) {
            Modifier::Intensified
        } else {
            Modifier::None
        }
    }
}

/// An English keyword at `pos` must start a word and end one, allowing a
/// plain inflection ("friends", "surprised") but not a longer word
/// ("fearless", "gladiator").
fn is_whole_word(text: &str, pos: usize, len: usize) -> bool {
    let starts = text[..pos]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_ascii_alphanumeric());

    let rest = &text[pos + len..];
    let tail_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let tail = &rest[..tail_len];

    starts && (tail.is_empty() || INFLECTIONS.contains(&tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> TextFeatures {
        TextFeatureExtractor::new().extract(text)
    }

    #[test]
    fn test_tokenize_mixed() {
        let tokens: Vec<_> = tokenize("我很happy, don't 担心!")
            .into_iter()
            .map(|t| (t.text, t.boundary))
            .collect();
        assert_eq!(
            tokens,
            vec![
                ("我", false),
                ("很", false),
                ("happy", false),
                (",", true),
                ("don't", false),
                ("担", false),
                ("心", false),
                ("!", true),
            ]
        );
        assert_eq!(extract("我很happy, don't 担心!").token_count, 6);
    }

    #[test]
    fn test_negation_stops_at_clause_punctuation() {
        let features = extract("今天不错，很开心！");
        assert!(features.score(PlutchikEmotion::Joy) > 1.0);
        assert_eq!(features.negated_hits, 0);

        let features = extract("I am not sure. happy now");
        assert!(features.score(PlutchikEmotion::Joy) > 0.0);
        assert_eq!(features.negated_hits, 0);
    }

    #[test]
    fn test_compounds_are_not_negation() {
        assert_eq!(extract("不错很开心").negated_hits, 0);
        assert_eq!(extract("没事我很开心").negated_hits, 0);
        assert_eq!(extract("别人很开心").negated_hits, 0);
        assert!(extract("我不开心").negated_hits > 0);
    }

    #[test]
    fn test_empty_text() {
        let features = extract("");
        assert_eq!(features, TextFeatures::default());
        assert!(!features.has_signal());
    }

    #[test]
    fn test_keyword_scores() {
        let features = extract("I am so happy and grateful");
        assert!(features.score(PlutchikEmotion::Joy) > 1.0);
        assert!(features.score(PlutchikEmotion::Trust) > 0.0);
        assert_eq!(features.score(PlutchikEmotion::Anger), 0.0);
    }

    #[test]
    fn test_negation_suppresses() {
        let plain = extract("I am happy");
        let negated = extract("I am not happy");
        assert!(plain.score(PlutchikEmotion::Joy) > 0.0);
        assert!(negated.score(PlutchikEmotion::Joy) < 0.0);
        assert_eq!(negated.negated_hits, 1);

        let chinese = extract("我不开心");
        assert!(chinese.score(PlutchikEmotion::Joy) < 0.0);
        assert!(chinese.score(PlutchikEmotion::Sadness) > 0.0);
    }

    #[test]
    fn test_negation_window_is_bounded() {
        let far = extract("not that it matters but happy");
        assert!(far.score(PlutchikEmotion::Joy) > 0.0);
        assert_eq!(far.negated_hits, 0);
    }

    #[test]
    fn test_diminisher_and_intensifier() {
        let base = extract("我担心").score(PlutchikEmotion::Fear);
        let weak = extract("我有点担心").score(PlutchikEmotion::Fear);
        let strong = extract("我非常担心").score(PlutchikEmotion::Fear);
        assert!(weak < base);
        assert!(strong > base);
    }

    #[test]
    fn test_word_boundary_for_english() {
        let features = extract("unhappy");
        assert_eq!(features.score(PlutchikEmotion::Joy), 0.0);
        assert!(features.score(PlutchikEmotion::Sadness) > 0.0);

        let features = extract("a fearless gladiator on a saddle");
        assert_eq!(features.keyword_hits, 0);

        let features = extract("thanks friends, I was surprised");
        assert!(features.score(PlutchikEmotion::Trust) > 0.0);
        assert!(features.score(PlutchikEmotion::Surprise) > 0.0);
    }

    #[test]
    fn test_punctuation_deltas() {
        let features = extract("今天去上学!!!!!");
        assert!((features.arousal_delta - 0.5).abs() < 1e-6);
        assert_eq!(features.keyword_hits, 0);

        let features = extract("真的吗？？");
        assert!((features.dominance_delta + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_merge_scaled() {
        let mut main = extract("happy");
        let extra = extract("happy");
        main.merge_scaled(&extra, 0.5);
        assert!((main.score(PlutchikEmotion::Joy) - 1.5).abs() < 1e-6);
        assert_eq!(main.keyword_hits, 2);
    }
}
