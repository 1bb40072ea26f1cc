use axum::{
    extract::{Query, State},
    response::Response,
    routing::{get, post},
    Form, Router,
};
use reporthub_core::api::HubApi;
use reporthub_core::page::{Page, PageState};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::view::render_page;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn HubApi>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/run-daily", post(run_daily))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub symbol: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunDailyForm {
    #[serde(default)]
    pub symbol: String,
}

fn initial_state(symbol: Option<&str>) -> PageState {
    match symbol {
        Some(s) => PageState::with_selection(s.trim()),
        None => PageState::new(),
    }
}

async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let mut page = Page::with_state(state.api.clone(), initial_state(query.symbol.as_deref()));
    page.mount().await;
    render_page(page.state())
}

async fn run_daily(State(state): State<AppState>, Form(form): Form<RunDailyForm>) -> Response {
    let mut page = Page::with_state(state.api.clone(), initial_state(Some(&form.symbol)));
    page.mount().await;
    page.run_daily().await;
    tracing::info!(symbol = %form.symbol, status = %page.state().status(), "daily run requested from page");
    render_page(page.state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use reporthub_core::domain::ticker::{RunDailyReport, Ticker, TickerSummary};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct StubHub {
        ran: AtomicBool,
        pipeline_down: bool,
    }

    #[async_trait::async_trait]
    impl HubApi for StubHub {
        async fn list_tickers(&self) -> anyhow::Result<Vec<Ticker>> {
            Ok(vec![
                Ticker {
                    symbol: "005930".to_string(),
                    name: "삼성전자".to_string(),
                },
                Ticker {
                    symbol: "000660".to_string(),
                    name: "SK하이닉스".to_string(),
                },
            ])
        }

        async fn ticker_summary(
            &self,
            symbol: &str,
            _asof_date: Option<&str>,
        ) -> anyhow::Result<TickerSummary> {
            let text = if self.ran.load(Ordering::SeqCst) {
                "fresh"
            } else {
                "cached"
            };
            Ok(TickerSummary {
                symbol: symbol.to_string(),
                asof_date: NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
                summary: format!("{symbol} {text}"),
                bullets: vec![],
                confidence: 35.0,
            })
        }

        async fn run_daily(&self) -> anyhow::Result<RunDailyReport> {
            anyhow::ensure!(!self.pipeline_down, "Failed to run daily pipeline");
            self.ran.store(true, Ordering::SeqCst);
            Ok(RunDailyReport {
                fetched_reports: 2,
                mentions_created: 3,
                summaries_created: 5,
                asof_date: NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
            })
        }
    }

    fn app_state(hub: StubHub) -> AppState {
        AppState { api: Arc::new(hub) }
    }

    async fn body_text(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_defaults_to_first_ticker() {
        let res = index(
            State(app_state(StubHub::default())),
            Query(PageQuery::default()),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("<h2>삼성전자 (005930)</h2>"));
        assert!(html.contains("005930 cached"));
    }

    #[tokio::test]
    async fn index_honors_symbol_query() {
        let res = index(
            State(app_state(StubHub::default())),
            Query(PageQuery {
                symbol: Some("000660".to_string()),
            }),
        )
        .await;
        let html = body_text(res).await;
        assert!(html.contains("<h2>SK하이닉스 (000660)</h2>"));
        assert!(html.contains("000660 cached"));
    }

    #[tokio::test]
    async fn run_daily_reports_counts_and_shows_refetched_summary() {
        let res = run_daily(
            State(app_state(StubHub::default())),
            Form(RunDailyForm {
                symbol: "000660".to_string(),
            }),
        )
        .await;
        let html = body_text(res).await;
        assert!(html.contains("Done. fetched=2, mentions=3, summaries=5, asof=2026-01-27"));
        assert!(html.contains("000660 fresh"));
    }

    #[tokio::test]
    async fn run_daily_failure_is_rendered_not_raised() {
        let hub = StubHub {
            pipeline_down: true,
            ..StubHub::default()
        };
        let res = run_daily(State(app_state(hub)), Form(RunDailyForm::default())).await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("Failed to run daily pipeline"));
        assert!(html.contains("005930 cached"));
    }
}
