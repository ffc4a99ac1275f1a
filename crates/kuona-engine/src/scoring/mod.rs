//! Lexicon-based sentiment and uncertainty scoring

pub mod features;
pub mod lexicon;

pub use features::{FeatureVector, SentimentScorer, compute_features};
pub use lexicon::Lexicon;
