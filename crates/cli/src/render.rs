use reporthub_core::domain::source::{Report, Source};
use reporthub_core::domain::ticker::{RunDailyReport, Ticker, TickerSummary};
use reporthub_core::domain::Health;
use reporthub_core::page::PageState;
use std::fmt::Write;

pub const TITLE: &str = "Stock Report Hub";
pub const NO_SUMMARY_HINT: &str = "Loading summary... (if there is none, run the daily job first)";

pub fn tickers(tickers: &[Ticker]) -> String {
    let mut out = String::new();
    for t in tickers {
        let _ = writeln!(out, "{}\t{}", t.symbol, t.name);
    }
    out
}

pub fn summary(s: &TickerSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "As-of: {}  Confidence: {}", s.asof_date, s.confidence);
    let _ = writeln!(out, "{}", s.summary);
    for b in &s.bullets {
        let _ = writeln!(out, "  - {b}");
    }
    out
}

pub fn run_daily(report: &RunDailyReport) -> String {
    format!("{}\n", report.status_line())
}

pub fn sources(sources: &[Source]) -> String {
    let mut out = String::new();
    for s in sources {
        let _ = writeln!(out, "{}\t{}\t{}\t{}", s.id, s.kind, s.name, s.url);
    }
    out
}

pub fn reports(reports: &[Report]) -> String {
    let mut out = String::new();
    for r in reports {
        let _ = writeln!(
            out,
            "{}\t{}\tsource={}\t{}",
            r.id,
            r.published_at.format("%Y-%m-%d %H:%M"),
            r.source_id,
            r.title
        );
    }
    out
}

pub fn health(h: &Health) -> String {
    format!("ok={} env={}\n", h.ok, h.env)
}

/// Full text rendering of the interactive page.
pub fn page(state: &PageState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out);

    for (idx, t) in state.tickers().iter().enumerate() {
        let marker = if state.selected() == Some(t.symbol.as_str()) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, "{marker} [{}] {} ({})", idx + 1, t.name, t.symbol);
    }

    if !state.status().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", state.status());
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} ({})",
        state.selected_name(),
        state.selected().unwrap_or("")
    );

    match state.summary() {
        Some(s) => out.push_str(&summary(s)),
        None => {
            let _ = writeln!(out, "{NO_SUMMARY_HINT}");
        }
    }
    out
}
