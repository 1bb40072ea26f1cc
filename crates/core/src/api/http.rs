use crate::api::error::{Endpoint, HubError, Stage};
use crate::api::{CatalogApi, HubApi};
use crate::config::Settings;
use crate::domain::source::{NewSource, Report, Source};
use crate::domain::ticker::{NewTicker, RunDailyReport, Ticker, TickerSummary};
use crate::domain::Health;
use anyhow::{Context, Result};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

const API_PREFIX: &str = "api";

/// reqwest-backed client for the Stock Report Hub backend.
///
/// Every call is a single attempt: no retry, no backoff. A timeout only
/// applies when one is configured.
#[derive(Debug, Clone)]
pub struct HttpHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpHubClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.http_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let http = builder
            .build()
            .context("failed to build hub http client")?;

        Self::with_client(http, &settings.api_base_url)
    }

    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid hub base URL: {base_url}"))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "hub base URL must be hierarchical (got {base_url})"
        );
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("hub base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn tickers_url(&self) -> Result<Url> {
        self.url(&[API_PREFIX, "tickers"])
    }

    /// The symbol becomes one encoded path segment. An empty `asof_date` is
    /// treated like a missing one, so no query string is sent.
    pub fn summary_url(&self, symbol: &str, asof_date: Option<&str>) -> Result<Url> {
        let mut url = self.url(&[API_PREFIX, "tickers", symbol, "summary"])?;
        if let Some(asof_date) = asof_date.filter(|d| !d.is_empty()) {
            url.query_pairs_mut().append_pair("asof_date", asof_date);
        }
        Ok(url)
    }

    pub fn run_daily_url(&self) -> Result<Url> {
        self.url(&[API_PREFIX, "tickers", "run-daily"])
    }

    pub fn sources_url(&self) -> Result<Url> {
        self.url(&[API_PREFIX, "sources"])
    }

    pub fn reports_url(&self, days: u32) -> Result<Url> {
        let mut url = self.url(&[API_PREFIX, "reports"])?;
        url.query_pairs_mut()
            .append_pair("days", &days.to_string());
        Ok(url)
    }

    pub fn health_url(&self) -> Result<Url> {
        self.url(&["health"])
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        req: RequestBuilder,
    ) -> Result<T> {
        let res = req.send().await.map_err(|err| {
            tracing::warn!(endpoint = endpoint.name(), error = %err, "hub request failed");
            failure(endpoint, Stage::Request, None, err.to_string())
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|err| {
            failure(
                endpoint,
                Stage::Request,
                Some(status),
                format!("failed to read response body: {err}"),
            )
        })?;

        if !status.is_success() {
            tracing::warn!(
                endpoint = endpoint.name(),
                http_status = %status,
                body = %text,
                "hub API returned non-success status"
            );
            return Err(failure(endpoint, Stage::Http, Some(status), text));
        }

        serde_json::from_str::<T>(&text).map_err(|err| {
            tracing::warn!(endpoint = endpoint.name(), error = %err, "hub response did not decode");
            failure(
                endpoint,
                Stage::Decode,
                Some(status),
                format!("{err}: {text}"),
            )
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint, url: Url) -> Result<T> {
        tracing::debug!(endpoint = endpoint.name(), %url, "GET");
        self.send_json(endpoint, self.http.get(url)).await
    }
}

fn failure(
    endpoint: Endpoint,
    stage: Stage,
    status: Option<StatusCode>,
    detail: String,
) -> anyhow::Error {
    HubError {
        endpoint,
        stage,
        status,
        detail,
    }
    .into()
}

#[async_trait::async_trait]
impl HubApi for HttpHubClient {
    async fn list_tickers(&self) -> Result<Vec<Ticker>> {
        self.get_json(Endpoint::ListTickers, self.tickers_url()?)
            .await
    }

    async fn ticker_summary(&self, symbol: &str, asof_date: Option<&str>) -> Result<TickerSummary> {
        self.get_json(Endpoint::TickerSummary, self.summary_url(symbol, asof_date)?)
            .await
    }

    async fn run_daily(&self) -> Result<RunDailyReport> {
        let url = self.run_daily_url()?;
        tracing::info!(%url, "triggering daily pipeline");
        let report: RunDailyReport = self
            .send_json(Endpoint::RunDaily, self.http.post(url))
            .await?;
        tracing::info!(
            asof_date = %report.asof_date,
            fetched_reports = report.fetched_reports,
            mentions_created = report.mentions_created,
            summaries_created = report.summaries_created,
            "daily pipeline finished"
        );
        Ok(report)
    }
}

#[async_trait::async_trait]
impl CatalogApi for HttpHubClient {
    async fn create_ticker(&self, ticker: &NewTicker) -> Result<Ticker> {
        let url = self.tickers_url()?;
        self.send_json(Endpoint::CreateTicker, self.http.post(url).json(ticker))
            .await
    }

    async fn list_sources(&self) -> Result<Vec<Source>> {
        self.get_json(Endpoint::ListSources, self.sources_url()?)
            .await
    }

    async fn create_source(&self, source: &NewSource) -> Result<Source> {
        let url = self.sources_url()?;
        self.send_json(Endpoint::CreateSource, self.http.post(url).json(source))
            .await
    }

    async fn list_reports(&self, days: u32) -> Result<Vec<Report>> {
        self.get_json(Endpoint::ListReports, self.reports_url(days)?)
            .await
    }

    async fn health(&self) -> Result<Health> {
        self.get_json(Endpoint::Health, self.health_url()?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpHubClient {
        HttpHubClient::new(base).unwrap()
    }

    #[test]
    fn summary_url_omits_query_without_asof_date() {
        let url = client("http://localhost:8000")
            .summary_url("005930", None)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/tickers/005930/summary");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn summary_url_treats_empty_asof_date_as_missing() {
        let url = client("http://localhost:8000")
            .summary_url("005930", Some(""))
            .unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn summary_url_encodes_asof_date() {
        let c = client("http://localhost:8000");

        let url = c.summary_url("005930", Some("2026-01-27")).unwrap();
        assert_eq!(url.query(), Some("asof_date=2026-01-27"));

        let url = c.summary_url("005930", Some("2026-01-27&x=1")).unwrap();
        assert_eq!(url.query(), Some("asof_date=2026-01-27%26x%3D1"));
    }

    #[test]
    fn summary_url_keeps_symbol_in_one_segment() {
        let url = client("http://localhost:8000")
            .summary_url("BRK/B", None)
            .unwrap();
        assert_eq!(url.path(), "/api/tickers/BRK%2FB/summary");
    }

    #[test]
    fn urls_respect_base_path_prefix() {
        let c = client("http://example.com/hub/");
        assert_eq!(c.tickers_url().unwrap().path(), "/hub/api/tickers");
        assert_eq!(c.run_daily_url().unwrap().path(), "/hub/api/tickers/run-daily");
        assert_eq!(c.health_url().unwrap().path(), "/hub/health");
        assert_eq!(c.reports_url(7).unwrap().query(), Some("days=7"));
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        assert!(HttpHubClient::new("mailto:ops@example.com").is_err());
        assert!(HttpHubClient::new("not a url").is_err());
    }
}
