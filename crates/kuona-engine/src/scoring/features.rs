//! Per-transcript feature vectors

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::lexicon::Lexicon;
use crate::stats;
use crate::text::{Sentence, segment};

/// Sentiment and uncertainty features for one transcript
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Tokens across every sentence
    pub token_count: usize,
    /// Mean of per-sentence sentiment scores
    pub sentiment_mean: f64,
    /// Population standard deviation of per-sentence scores
    pub sentiment_std: f64,
    /// Share of tokens found in the uncertainty list
    pub uncertainty_score: f64,
}

/// Maps transcript text to a [`FeatureVector`] using an injected lexicon
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: Arc<Lexicon>,
}

impl SentimentScorer {
    /// Create a scorer over the given lexicon
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Score a sentence as `(positive - negative) / tokens`
    ///
    /// Returns `None` for a sentence without tokens so it contributes nothing
    /// to the transcript statistics.
    pub fn sentence_score(&self, sentence: &Sentence) -> Option<f64> {
        if sentence.tokens.is_empty() {
            return None;
        }
        let positive = sentence
            .tokens
            .iter()
            .filter(|t| self.lexicon.is_positive(t))
            .count();
        let negative = sentence
            .tokens
            .iter()
            .filter(|t| self.lexicon.is_negative(t))
            .count();
        Some((positive as f64 - negative as f64) / sentence.tokens.len() as f64)
    }

    /// Compute the feature vector for a transcript
    ///
    /// Never fails: empty or degenerate text yields zeros.
    pub fn compute(&self, text: &str) -> FeatureVector {
        let sentences = segment(text);

        let scores: Vec<f64> = sentences
            .iter()
            .filter_map(|s| self.sentence_score(s))
            .collect();

        let token_count: usize = sentences.iter().map(Sentence::token_count).sum();
        let uncertainty_hits = sentences
            .iter()
            .flat_map(|s| s.tokens.iter())
            .filter(|t| self.lexicon.is_uncertain(t))
            .count();

        let sentiment_mean = stats::mean(&scores).unwrap_or(0.0);
        let sentiment_std = if scores.len() > 1 {
            stats::population_std(&scores).unwrap_or(0.0)
        } else {
            0.0
        };
        let uncertainty_score = if token_count > 0 {
            uncertainty_hits as f64 / token_count as f64
        } else {
            0.0
        };

        FeatureVector {
            token_count,
            sentiment_mean,
            sentiment_std,
            uncertainty_score,
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Lexicon::finance_default())
    }
}

/// Compute features with the default finance lexicon
pub fn compute_features(text: &str) -> FeatureVector {
    SentimentScorer::default().compute(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_empty_transcript() {
        let features = compute_features("");
        assert_eq!(
            features,
            FeatureVector {
                token_count: 0,
                sentiment_mean: 0.0,
                sentiment_std: 0.0,
                uncertainty_score: 0.0,
            }
        );
    }

    #[test]
    fn test_punctuation_only_transcript() {
        let features = compute_features("... 2024! 42?");
        assert_eq!(features, FeatureVector::default());
    }

    #[test]
    fn test_two_sentence_example() {
        let features =
            compute_features("Strong growth this quarter. However, risks and uncertainty remain.");

        // sentence scores: 2/4 and 0/5; "risks" is an uncertainty word only
        assert_eq!(features.token_count, 9);
        assert!((features.sentiment_mean - 0.25).abs() < EPS);
        assert!((features.sentiment_std - 0.25).abs() < EPS);
        assert!((features.uncertainty_score - 2.0 / 9.0).abs() < EPS);
    }

    #[test]
    fn test_negative_sentence() {
        let features = compute_features("Weak demand and pricing pressure.");
        assert_eq!(features.token_count, 5);
        assert!((features.sentiment_mean + 0.4).abs() < EPS);
        assert_eq!(features.sentiment_std, 0.0);
        assert!((features.uncertainty_score - 0.2).abs() < EPS);
    }

    #[test]
    fn test_single_scored_sentence_has_zero_std() {
        let features = compute_features("1234. Record revenue!");
        assert_eq!(features.token_count, 2);
        assert!((features.sentiment_mean - 0.5).abs() < EPS);
        assert_eq!(features.sentiment_std, 0.0);
    }

    #[test]
    fn test_tokenless_sentences_do_not_dilute_mean() {
        let with_noise = compute_features("Strong quarter. 2024. 99%!");
        let without = compute_features("Strong quarter.");
        assert_eq!(with_noise, without);
    }

    #[test]
    fn test_bounds() {
        let text = "Strong strong strong. Weak weak. Risk may pressure headwinds. \
                    Growth ahead, record solid robust improved.";
        let features = compute_features(text);
        assert!((-1.0..=1.0).contains(&features.sentiment_mean));
        assert!(features.sentiment_std >= 0.0);
        assert!((0.0..=1.0).contains(&features.uncertainty_score));
    }

    #[test]
    fn test_deterministic() {
        let text = "We delivered strong results. Some uncertainty remains, and headwinds could persist.";
        let a = compute_features(text);
        let b = compute_features(text);
        assert_eq!(a.sentiment_mean.to_bits(), b.sentiment_mean.to_bits());
        assert_eq!(a.sentiment_std.to_bits(), b.sentiment_std.to_bits());
        assert_eq!(a.uncertainty_score.to_bits(), b.uncertainty_score.to_bits());
        assert_eq!(a.token_count, b.token_count);
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = Arc::new(Lexicon::new(["beat"], ["miss"], ["maybe"]));
        let scorer = SentimentScorer::new(lexicon);
        let features = scorer.compute("We beat. Maybe we miss.");
        assert_eq!(features.token_count, 5);
        // scores: 1/2 and -1/3
        assert!((features.sentiment_mean - (0.5 - 1.0 / 3.0) / 2.0).abs() < EPS);
        assert!((features.uncertainty_score - 0.2).abs() < EPS);
    }
}
