use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    pub name: String,
}

/// Registration payload for `POST /api/tickers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicker {
    pub symbol: String,
    pub name: String,
}

/// Cached daily digest for one ticker, produced once per (symbol, as-of date)
/// by the backend pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    pub symbol: String,
    pub asof_date: NaiveDate,
    pub summary: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    pub confidence: f64,
}

/// Counters returned by a synchronous daily pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDailyReport {
    pub fetched_reports: u64,
    pub mentions_created: u64,
    pub summaries_created: u64,
    pub asof_date: NaiveDate,
}

impl RunDailyReport {
    /// Status line shown after a successful run.
    pub fn status_line(&self) -> String {
        format!(
            "Done. fetched={}, mentions={}, summaries={}, asof={}",
            self.fetched_reports, self.mentions_created, self.summaries_created, self.asof_date
        )
    }
}
