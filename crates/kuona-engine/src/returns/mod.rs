//! Forward returns anchored on an earnings-call date

pub mod aligner;

pub use aligner::{ReturnAligner, ReturnSet, align_returns, price_window};
