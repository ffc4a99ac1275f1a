//! Sentence splitting and tokenization
//!
//! Sentences end at any run of `.`, `!` or `?`. Tokens are maximal runs of
//! ASCII letters, lowercased; digits, punctuation and every other character
//! only separate tokens.

use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[.!?]+").unwrap_or_else(|e| panic!("sentence pattern: {e}"))
});

static NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z]+").unwrap_or_else(|e| panic!("token pattern: {e}"))
});

/// A trimmed sentence and its tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<String>,
}

impl Sentence {
    /// Number of tokens in the sentence
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Split text into trimmed, non-empty sentences
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a sentence into lowercase alphabetic tokens
pub fn tokenize(sentence: &str) -> Vec<String> {
    let lowered = sentence.to_lowercase();
    NON_ALPHA
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Segment text into sentences with their tokens, in reading order
pub fn segment(text: &str) -> Vec<Sentence> {
    split_sentences(text)
        .into_iter()
        .map(|s| Sentence {
            text: s.to_string(),
            tokens: tokenize(s),
        })
        .collect()
}
