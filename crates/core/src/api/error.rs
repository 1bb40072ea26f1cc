use reqwest::StatusCode;
use std::fmt;

/// Backend operation a [`HubError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListTickers,
    TickerSummary,
    RunDaily,
    CreateTicker,
    ListSources,
    CreateSource,
    ListReports,
    Health,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::ListTickers => "list_tickers",
            Endpoint::TickerSummary => "ticker_summary",
            Endpoint::RunDaily => "run_daily",
            Endpoint::CreateTicker => "create_ticker",
            Endpoint::ListSources => "list_sources",
            Endpoint::CreateSource => "create_source",
            Endpoint::ListReports => "list_reports",
            Endpoint::Health => "health",
        }
    }

    /// User-facing failure text. Only the registration endpoints tell a
    /// duplicate apart from other failures.
    pub fn failure_message(self, status: Option<StatusCode>) -> &'static str {
        let conflict = status == Some(StatusCode::CONFLICT);
        match self {
            Endpoint::ListTickers => "Failed to fetch tickers",
            Endpoint::TickerSummary => "Summary not found. Run daily job first.",
            Endpoint::RunDaily => "Failed to run daily pipeline",
            Endpoint::CreateTicker if conflict => "Ticker already exists",
            Endpoint::CreateTicker => "Failed to create ticker",
            Endpoint::ListSources => "Failed to fetch sources",
            Endpoint::CreateSource if conflict => "Source already exists",
            Endpoint::CreateSource => "Failed to create source",
            Endpoint::ListReports => "Failed to fetch reports",
            Endpoint::Health => "Backend health check failed",
        }
    }
}

/// Where in the request lifecycle the call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Request,
    Http,
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Request => f.write_str("request"),
            Stage::Http => f.write_str("http"),
            Stage::Decode => f.write_str("decode"),
        }
    }
}

/// Failure of a backend call. `Display` is the user-visible message only;
/// status, stage and body are kept for logs.
#[derive(Debug, Clone)]
pub struct HubError {
    pub endpoint: Endpoint,
    pub stage: Stage,
    pub status: Option<StatusCode>,
    pub detail: String,
}

impl HubError {
    pub fn message(&self) -> &'static str {
        self.endpoint.failure_message(self.status)
    }
}

impl fmt::Display for HubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for HubError {}
