//! Transcript storage
//!
//! The engine only needs two lookups: one transcript by `(ticker, date)` and an
//! ordered listing filtered by tickers and an inclusive date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::Result;

/// A stored earnings-call transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub ticker: String,
    pub call_date: NaiveDate,
    pub text: String,
}

/// Listing filters; `None` means unfiltered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptFilter {
    /// Tickers to keep, matched case-insensitively
    pub tickers: Option<Vec<String>>,
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl TranscriptFilter {
    /// Whether a `(ticker, date)` pair passes the filter
    ///
    /// `ticker` is expected uppercase.
    pub fn matches(&self, ticker: &str, call_date: NaiveDate) -> bool {
        let ticker_ok = self
            .tickers
            .as_ref()
            .is_none_or(|set| set.iter().any(|t| t.eq_ignore_ascii_case(ticker)));
        let start_ok = self.start_date.is_none_or(|start| call_date >= start);
        let end_ok = self.end_date.is_none_or(|end| call_date <= end);
        ticker_ok && start_ok && end_ok
    }
}

/// Keyed transcript source
#[cfg_attr(test, mockall::automock)]
pub trait TranscriptStore: Send + Sync {
    /// Raw text for a ticker (any case) on an exact date
    fn get(&self, ticker: &str, call_date: NaiveDate) -> Option<String>;

    /// Transcripts passing `filter`, sorted by `(ticker, call_date)`
    fn list(&self, filter: &TranscriptFilter) -> Vec<Transcript>;
}

/// In-memory transcript store keyed by uppercase ticker and date
#[derive(Debug, Clone, Default)]
pub struct InMemoryTranscriptStore {
    transcripts: BTreeMap<(String, NaiveDate), String>,
}

const SAMPLE_TRANSCRIPT: &str = "
    Good afternoon and thank you for joining us today.

    We delivered strong results this quarter with solid growth across our product lines.
    However, we are seeing some uncertainty in certain international markets and macro headwinds
    that could create risk going forward.

    Overall, we remain confident in our long-term strategy and our ability to execute.
    ";

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the bundled AAPL 2025-01-28 transcript
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        if let Some(date) = NaiveDate::from_ymd_opt(2025, 1, 28) {
            store.insert("AAPL", date, SAMPLE_TRANSCRIPT);
        }
        store
    }

    /// Load a JSON array of `{ticker, call_date, text}` objects
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let store = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            transcripts = store.len(),
            "Loaded transcripts"
        );
        Ok(store)
    }

    /// Parse a JSON array of `{ticker, call_date, text}` objects
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let records: Vec<Transcript> = serde_json::from_str(raw)?;
        Ok(records.into_iter().collect())
    }

    /// Insert or replace a transcript
    pub fn insert(&mut self, ticker: &str, call_date: NaiveDate, text: impl Into<String>) {
        self.transcripts
            .insert((normalize_ticker(ticker), call_date), text.into());
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }
}

impl FromIterator<Transcript> for InMemoryTranscriptStore {
    fn from_iter<I: IntoIterator<Item = Transcript>>(iter: I) -> Self {
        let mut store = Self::new();
        for t in iter {
            store.insert(&t.ticker, t.call_date, t.text);
        }
        store
    }
}

impl TranscriptStore for InMemoryTranscriptStore {
    fn get(&self, ticker: &str, call_date: NaiveDate) -> Option<String> {
        self.transcripts
            .get(&(normalize_ticker(ticker), call_date))
            .cloned()
    }

    fn list(&self, filter: &TranscriptFilter) -> Vec<Transcript> {
        // BTreeMap iteration is already (ticker, date) ascending
        self.transcripts
            .iter()
            .filter(|((ticker, date), _)| filter.matches(ticker, *date))
            .map(|((ticker, date), text)| Transcript {
                ticker: ticker.clone(),
                call_date: *date,
                text: text.clone(),
            })
            .collect()
    }
}

/// Trim and uppercase a ticker symbol
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Parse a comma separated ticker list into unique uppercase symbols
///
/// Returns `None` for an empty list so the result can be used directly as an
/// "all tickers" filter.
pub fn parse_tickers(value: &str) -> Option<Vec<String>> {
    let tickers: BTreeSet<String> = value
        .split(',')
        .map(normalize_ticker)
        .filter(|t| !t.is_empty())
        .collect();
    if tickers.is_empty() {
        None
    } else {
        Some(tickers.into_iter().collect())
    }
}
