//! Request-level operations: single event, bulk rows and backtest

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;

use crate::backtest::{BacktestSummary, run_backtest};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::event::{Event, EventRow};
use crate::prices::PriceProvider;
use crate::returns::ReturnAligner;
use crate::scoring::SentimentScorer;
use crate::store::{Transcript, TranscriptFilter, TranscriptStore, normalize_ticker};

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_call_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(value.to_string()))
}

/// Backtest summary together with the filters that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub tickers: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub horizon_days: u32,
    #[serde(flatten)]
    pub summary: BacktestSummary,
}

/// Composes transcript lookup, scoring and return alignment
#[derive(Clone)]
pub struct EarningsService {
    store: Arc<dyn TranscriptStore>,
    aligner: ReturnAligner,
    scorer: SentimentScorer,
    config: Arc<EngineConfig>,
}

impl EarningsService {
    /// Create a service over a store and a price provider
    pub fn new(
        store: Arc<dyn TranscriptStore>,
        provider: Arc<dyn PriceProvider>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            aligner: ReturnAligner::new(provider, config.price_buffer_days),
            scorer: SentimentScorer::default(),
            config: Arc::new(config),
        })
    }

    /// Replace the scorer, e.g. to inject a custom lexicon
    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    async fn build_event(&self, transcript: Transcript, horizons: &[u32]) -> Event {
        let features = self.scorer.compute(&transcript.text);
        let returns = self
            .aligner
            .returns_for(&transcript.ticker, transcript.call_date, horizons)
            .await;

        tracing::debug!(
            ticker = %transcript.ticker,
            call_date = %transcript.call_date,
            tokens = features.token_count,
            has_returns = returns.is_some(),
            "Built event"
        );

        Event {
            ticker: transcript.ticker,
            call_date: transcript.call_date,
            features,
            returns,
        }
    }

    /// Score one transcript and align its returns over the configured horizons
    pub async fn event(&self, ticker: &str, call_date: NaiveDate) -> Result<Event> {
        let ticker = normalize_ticker(ticker);
        let text = self
            .store
            .get(&ticker, call_date)
            .ok_or_else(|| EngineError::TranscriptNotFound {
                ticker: ticker.clone(),
                call_date,
            })?;

        let transcript = Transcript {
            ticker,
            call_date,
            text,
        };
        Ok(self.build_event(transcript, &self.config.horizons).await)
    }

    /// Row for one transcript
    pub async fn feature_row(&self, ticker: &str, call_date: NaiveDate) -> Result<EventRow> {
        let event = self.event(ticker, call_date).await?;
        Ok(event.to_row(&self.config.horizons))
    }

    /// Events for every transcript matching `filter`, in store order
    ///
    /// Price lookups run concurrently up to `max_concurrent_fetches`. A
    /// missing price series only affects its own event.
    pub async fn events(&self, filter: &TranscriptFilter, horizons: &[u32]) -> Result<Vec<Event>> {
        let transcripts = self.store.list(filter);
        if transcripts.is_empty() {
            return Err(EngineError::NoEvents);
        }

        let events: Vec<Event> = stream::iter(transcripts)
            .map(|t| self.build_event(t, horizons))
            .buffered(self.config.max_concurrent_fetches)
            .collect()
            .await;

        let priced = events.iter().filter(|e| e.returns.is_some()).count();
        tracing::info!(events = events.len(), priced, "Built events");

        Ok(events)
    }

    /// Rows for every transcript matching `filter`
    pub async fn bulk_rows(&self, filter: &TranscriptFilter) -> Result<Vec<EventRow>> {
        let horizons = &self.config.horizons;
        let events = self.events(filter, horizons).await?;
        Ok(events.iter().map(|e| e.to_row(horizons)).collect())
    }

    /// Backtest sentiment against returns at `horizon` (configured default when `None`)
    pub async fn backtest(&self, filter: &TranscriptFilter, horizon: Option<u32>) -> Result<BacktestReport> {
        let horizon = horizon.unwrap_or(self.config.backtest_horizon);
        if horizon == 0 {
            return Err(EngineError::InvalidParameter(
                "horizon must be a positive number of days".to_string(),
            ));
        }

        let horizons = self.config.horizons_with(horizon);
        let events = self.events(filter, &horizons).await?;
        let summary = run_backtest(&events, horizon)?;

        tracing::info!(
            horizon,
            events = summary.events_count,
            correlation = ?summary.correlation,
            "Backtest complete"
        );

        Ok(BacktestReport {
            tickers: filter.tickers.clone(),
            start_date: filter.start_date,
            end_date: filter.end_date,
            horizon_days: horizon,
            summary,
        })
    }
}
