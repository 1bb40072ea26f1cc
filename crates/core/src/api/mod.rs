pub mod error;
pub mod http;

use crate::domain::source::{NewSource, Report, Source};
use crate::domain::ticker::{NewTicker, RunDailyReport, Ticker, TickerSummary};
use crate::domain::Health;
use std::sync::Arc;

pub use error::{Endpoint, HubError, Stage};
pub use http::HttpHubClient;

/// The three calls the ticker page is built on.
#[async_trait::async_trait]
pub trait HubApi: Send + Sync {
    async fn list_tickers(&self) -> anyhow::Result<Vec<Ticker>>;

    /// `asof_date` is forwarded verbatim; `None` lets the backend pick today.
    async fn ticker_summary(
        &self,
        symbol: &str,
        asof_date: Option<&str>,
    ) -> anyhow::Result<TickerSummary>;

    /// Runs the backend pipeline synchronously; can take minutes.
    async fn run_daily(&self) -> anyhow::Result<RunDailyReport>;
}

/// Registration and listing endpoints around the page flow.
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    async fn create_ticker(&self, ticker: &NewTicker) -> anyhow::Result<Ticker>;

    async fn list_sources(&self) -> anyhow::Result<Vec<Source>>;

    async fn create_source(&self, source: &NewSource) -> anyhow::Result<Source>;

    async fn list_reports(&self, days: u32) -> anyhow::Result<Vec<Report>>;

    async fn health(&self) -> anyhow::Result<Health>;
}

#[async_trait::async_trait]
impl<T: HubApi + ?Sized> HubApi for Arc<T> {
    async fn list_tickers(&self) -> anyhow::Result<Vec<Ticker>> {
        (**self).list_tickers().await
    }

    async fn ticker_summary(
        &self,
        symbol: &str,
        asof_date: Option<&str>,
    ) -> anyhow::Result<TickerSummary> {
        (**self).ticker_summary(symbol, asof_date).await
    }

    async fn run_daily(&self) -> anyhow::Result<RunDailyReport> {
        (**self).run_daily().await
    }
}
