use std::collections::HashMap;

use sd_core::core::PolarityScorer;

// ---------------------------------------------------------------------------
// Built-in word lists
// ---------------------------------------------------------------------------

const BASE_LEXICON: &[(&str, f64)] = &[
    // favourable
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("comfortable", 0.4),
    ("delicious", 1.0),
    ("easy", 0.43),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("gorgeous", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("impressive", 1.0),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("ok", 0.5),
    ("okay", 0.5),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("recommend", 0.4),
    ("reliable", 0.5),
    ("satisfied", 0.5),
    ("solid", 0.2),
    ("sturdy", 0.3),
    ("superb", 1.0),
    ("wonderful", 1.0),
    ("worth", 0.3),
    // unfavourable
    ("angry", -0.5),
    ("annoying", -0.8),
    ("average", -0.15),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broke", -0.4),
    ("broken", -0.4),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("flimsy", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("junk", -0.6),
    ("mediocre", -0.5),
    ("poor", -0.4),
    ("refund", -0.2),
    ("rude", -0.3),
    ("sad", -0.5),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("useless", -0.5),
    ("waste", -0.2),
    ("worst", -1.0),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.4),
    ("very", 1.3),
];

const NEGATORS: &[&str] = &["cannot", "hardly", "never", "no", "not", "nothing"];

/// How many tokens before a scored word a negator may appear.
const NEGATION_WINDOW: usize = 2;
const NEGATION_FACTOR: f64 = -0.5;

// ---------------------------------------------------------------------------
// LexiconScorer — default PolarityScorer
// ---------------------------------------------------------------------------

/// Averages word polarities from a lexicon, with intensifier and negation
/// handling. Text with no known words scores 0.0.
#[derive(Clone, Debug)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        let words = BASE_LEXICON
            .iter()
            .map(|(word, polarity)| ((*word).to_owned(), *polarity))
            .collect();
        Self { words }
    }

    /// Adds words or replaces built-in polarities. Keys are lowercased.
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (String, f64)>) -> Self {
        for (word, polarity) in overrides {
            self.words.insert(word.to_lowercase(), polarity);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut total = 0.0;
        let mut scored = 0usize;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.words.get(token.as_str()) else {
                continue;
            };

            let mut polarity = base;
            if let Some(prev) = i.checked_sub(1).map(|p| tokens[p].as_str()) {
                if let Some((_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == prev) {
                    polarity = (polarity * factor).clamp(-1.0, 1.0);
                }
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| is_negator(t)) {
                polarity *= NEGATION_FACTOR;
            }

            total += polarity;
            scored += 1;
        }

        if scored == 0 {
            return 0.0;
        }
        (total / scored as f64).clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        self.score(text)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use sd_core::core::{label_for_polarity, SentimentLabel};

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_word() {
        let scorer = LexiconScorer::new();
        assert!(approx(scorer.score("Great!"), 0.8));
        assert!(approx(scorer.score("terrible"), -1.0));
    }

    #[test]
    fn test_unknown_and_empty_text_is_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score(""), 0.0);
        assert_eq!(scorer.score("The parcel arrived on Tuesday."), 0.0);
    }

    #[test]
    fn test_average_over_scored_words() {
        let scorer = LexiconScorer::new();
        // (0.7 + 0.8) / 2
        assert!(approx(scorer.score("good and great"), 0.75));
    }

    #[test]
    fn test_intensifier() {
        let scorer = LexiconScorer::new();
        assert!(approx(scorer.score("very good"), 0.91));
        // Clamped to 1.0.
        assert!(approx(scorer.score("extremely excellent"), 1.0));
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let scorer = LexiconScorer::new();
        assert!(approx(scorer.score("not good"), -0.35));
        assert!(approx(scorer.score("it isn't great"), -0.4));
        assert!(approx(scorer.score("it isn\u{2019}t great"), -0.4));
        assert!(approx(scorer.score("not really bad"), 0.455));
    }

    #[test]
    fn test_negation_window() {
        let scorer = LexiconScorer::new();
        // Negator three tokens back is out of range.
        assert!(approx(scorer.score("not at all good"), 0.7));
    }

    #[test]
    fn test_overrides() {
        let scorer = LexiconScorer::new()
            .with_overrides([("Meh".to_owned(), -0.2), ("good".to_owned(), 0.1)]);
        assert!(approx(scorer.score("meh"), -0.2));
        assert!(approx(scorer.score("good"), 0.1));
        assert_eq!(scorer.len(), BASE_LEXICON.len() + 1);
    }

    #[test]
    fn test_labels_through_decision_rule() {
        let scorer = LexiconScorer::new();
        assert_eq!(
            label_for_polarity(scorer.polarity("I loved it, the best purchase")),
            SentimentLabel::Positive
        );
        assert_eq!(
            label_for_polarity(scorer.polarity("Awful. Broke after a week.")),
            SentimentLabel::Negative
        );
        assert_eq!(
            label_for_polarity(scorer.polarity("It is a kettle")),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("Don't buy 'this' -- it's BAD!!"),
            vec!["don't", "buy", "this", "it's", "bad"]
        );
    }
}
