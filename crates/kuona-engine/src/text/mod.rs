//! Text segmentation for transcripts

pub mod segmenter;

pub use segmenter::{Sentence, segment, split_sentences, tokenize};
