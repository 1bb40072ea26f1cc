use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use reporthub_core::page::PageState;

const TITLE: &str = "Stock Report Hub";
const NO_SUMMARY_HINT: &str = "Loading summary... (if there is none, run the daily job first)";

pub struct TickerOption {
    pub symbol: String,
    pub name: String,
    pub selected: bool,
}

pub struct SummaryView {
    pub asof_date: String,
    pub confidence: String,
    pub text: String,
    pub bullets: Vec<String>,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageView {
    pub title: &'static str,
    pub no_summary_hint: &'static str,
    pub tickers: Vec<TickerOption>,
    pub selected_symbol: String,
    pub selected_name: String,
    pub status: String,
    pub summary: Option<SummaryView>,
}

impl PageView {
    pub fn from_state(state: &PageState) -> Self {
        let selected = state.selected().unwrap_or("");
        Self {
            title: TITLE,
            no_summary_hint: NO_SUMMARY_HINT,
            tickers: state
                .tickers()
                .iter()
                .map(|t| TickerOption {
                    symbol: t.symbol.clone(),
                    name: t.name.clone(),
                    selected: t.symbol == selected,
                })
                .collect(),
            selected_symbol: selected.to_string(),
            selected_name: state.selected_name().to_string(),
            status: state.status().to_string(),
            summary: state.summary().map(|s| SummaryView {
                asof_date: s.asof_date.to_string(),
                confidence: s.confidence.to_string(),
                text: s.summary.clone(),
                bullets: s.bullets.clone(),
            }),
        }
    }
}

pub fn render_page(state: &PageState) -> Response {
    match PageView::from_state(state).render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "page template render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {e}"),
            )
                .into_response()
        }
    }
}
