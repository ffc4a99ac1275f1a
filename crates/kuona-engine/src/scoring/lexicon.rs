//! Word lists used by the sentiment scorer

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

const POSITIVE_WORDS: &[&str] = &[
    "strong", "growth", "record", "robust", "confident", "positive", "improved", "solid",
    "ahead",
];

const NEGATIVE_WORDS: &[&str] = &[
    "weak", "miss", "decline", "soft", "headwinds", "pressure", "downturn", "negative", "risk",
];

const UNCERTAINTY_WORDS: &[&str] = &[
    "uncertain", "uncertainty", "risk", "risks", "volatility", "might", "could", "may",
    "headwinds", "challenge", "pressure",
];

static FINANCE_DEFAULT: LazyLock<Arc<Lexicon>> = LazyLock::new(|| {
    Arc::new(Lexicon::new(POSITIVE_WORDS, NEGATIVE_WORDS, UNCERTAINTY_WORDS))
});

/// Positive, negative and uncertainty word sets
///
/// Words are stored lowercase; lookups expect lowercase tokens as produced by
/// the segmenter. A lexicon is never mutated after construction, so one
/// instance can be shared freely between scorers and threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    uncertainty: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from three word lists, case-folding every entry
    pub fn new<P, N, U>(positive: P, negative: N, uncertainty: U) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
        U: IntoIterator,
        U::Item: AsRef<str>,
    {
        Self {
            positive: fold(positive),
            negative: fold(negative),
            uncertainty: fold(uncertainty),
        }
    }

    /// The process-wide finance lexicon
    pub fn finance_default() -> Arc<Self> {
        Arc::clone(&FINANCE_DEFAULT)
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn is_uncertain(&self, token: &str) -> bool {
        self.uncertainty.contains(token)
    }
}

fn fold<I>(words: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
