use crate::domain::ticker::{RunDailyReport, Ticker, TickerSummary};

pub const RUNNING_STATUS: &str = "Running daily pipeline...";

/// Work the reducer asks the driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadTickers,
    LoadSummary { symbol: String },
    RunDaily,
}

/// Completion of a [`Command`]. Errors arrive already rendered to their
/// user-facing text.
#[derive(Debug, Clone)]
pub enum Event {
    TickersLoaded(Result<Vec<Ticker>, String>),
    SummaryLoaded {
        symbol: String,
        result: Result<TickerSummary, String>,
    },
    DailyRunFinished(Result<RunDailyReport, String>),
}

#[derive(Debug, Clone, Default)]
pub struct PageState {
    tickers: Vec<Ticker>,
    selected: Option<String>,
    summary: Option<TickerSummary>,
    status: String,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `symbol` selected instead of the first listed ticker.
    pub fn with_selection(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            selected: (!symbol.is_empty()).then_some(symbol),
            ..Self::default()
        }
    }

    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn summary(&self) -> Option<&TickerSummary> {
        self.summary.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Display name of the selected ticker, empty when unknown.
    pub fn selected_name(&self) -> &str {
        let Some(selected) = self.selected.as_deref() else {
            return "";
        };
        self.tickers
            .iter()
            .find(|t| t.symbol == selected)
            .map(|t| t.name.as_str())
            .unwrap_or("")
    }

    pub fn mount(&mut self) -> Command {
        Command::LoadTickers
    }

    /// Switches the selection. The previous summary is dropped right away so
    /// it never shows under the new ticker's heading.
    pub fn select(&mut self, symbol: &str) -> Option<Command> {
        if symbol.is_empty() || self.selected.as_deref() == Some(symbol) {
            return None;
        }
        self.selected = Some(symbol.to_string());
        self.summary = None;
        Some(Command::LoadSummary {
            symbol: symbol.to_string(),
        })
    }

    pub fn start_daily_run(&mut self) -> Command {
        self.status = RUNNING_STATUS.to_string();
        Command::RunDaily
    }

    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::TickersLoaded(Ok(tickers)) => {
                self.tickers = tickers;
                if self.selected.is_none() {
                    self.selected = self.tickers.first().map(|t| t.symbol.clone());
                }
                self.selected
                    .clone()
                    .map(|symbol| Command::LoadSummary { symbol })
            }
            Event::TickersLoaded(Err(message)) => {
                self.status = message;
                None
            }
            Event::SummaryLoaded { symbol, result } => {
                if self.selected.as_deref() != Some(symbol.as_str()) {
                    tracing::debug!(%symbol, "dropping summary for a ticker no longer selected");
                    return None;
                }
                match result {
                    Ok(summary) => self.summary = Some(summary),
                    Err(message) => self.status = message,
                }
                None
            }
            Event::DailyRunFinished(Ok(report)) => {
                self.status = report.status_line();
                self.selected
                    .clone()
                    .map(|symbol| Command::LoadSummary { symbol })
            }
            Event::DailyRunFinished(Err(message)) => {
                self.status = message;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ticker(symbol: &str, name: &str) -> Ticker {
        Ticker {
            symbol: symbol.to_string(),
            name: name.to_string(),
        }
    }

    fn summary(symbol: &str, text: &str) -> TickerSummary {
        TickerSummary {
            symbol: symbol.to_string(),
            asof_date: NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
            summary: text.to_string(),
            bullets: vec!["a".to_string()],
            confidence: 35.0,
        }
    }

    fn load_summary(symbol: &str) -> Option<Command> {
        Some(Command::LoadSummary {
            symbol: symbol.to_string(),
        })
    }

    fn mounted() -> PageState {
        let mut page = PageState::new();
        assert_eq!(page.mount(), Command::LoadTickers);
        let next = page.apply(Event::TickersLoaded(Ok(vec![
            ticker("005930", "삼성전자"),
            ticker("000660", "SK하이닉스"),
        ])));
        assert_eq!(next, load_summary("005930"));
        page
    }

    #[test]
    fn mount_selects_first_ticker_and_requests_its_summary() {
        let page = mounted();
        assert_eq!(page.selected(), Some("005930"));
        assert_eq!(page.selected_name(), "삼성전자");
        assert!(page.summary().is_none());
    }

    #[test]
    fn empty_ticker_list_selects_nothing() {
        let mut page = PageState::new();
        assert_eq!(page.apply(Event::TickersLoaded(Ok(vec![]))), None);
        assert_eq!(page.selected(), None);
        assert_eq!(page.selected_name(), "");
    }

    #[test]
    fn preselected_symbol_survives_ticker_load() {
        let mut page = PageState::with_selection("000660");
        let next = page.apply(Event::TickersLoaded(Ok(vec![
            ticker("005930", "삼성전자"),
            ticker("000660", "SK하이닉스"),
        ])));
        assert_eq!(next, load_summary("000660"));
        assert_eq!(page.selected_name(), "SK하이닉스");
    }

    #[test]
    fn ticker_failure_lands_in_status() {
        let mut page = PageState::new();
        let next = page.apply(Event::TickersLoaded(Err("Failed to fetch tickers".to_string())));
        assert_eq!(next, None);
        assert_eq!(page.status(), "Failed to fetch tickers");
    }

    #[test]
    fn selecting_a_new_ticker_clears_summary_before_it_resolves() {
        let mut page = mounted();
        page.apply(Event::SummaryLoaded {
            symbol: "005930".to_string(),
            result: Ok(summary("005930", "old")),
        });
        assert!(page.summary().is_some());

        let next = page.select("000660");
        assert_eq!(next, load_summary("000660"));
        assert!(page.summary().is_none());
        assert_eq!(page.selected(), Some("000660"));

        page.apply(Event::SummaryLoaded {
            symbol: "000660".to_string(),
            result: Ok(summary("000660", "new")),
        });
        assert_eq!(page.summary().unwrap().summary, "new");
    }

    #[test]
    fn reselecting_current_ticker_keeps_summary() {
        let mut page = mounted();
        page.apply(Event::SummaryLoaded {
            symbol: "005930".to_string(),
            result: Ok(summary("005930", "kept")),
        });
        assert_eq!(page.select("005930"), None);
        assert_eq!(page.summary().unwrap().summary, "kept");
    }

    #[test]
    fn stale_summary_is_ignored() {
        let mut page = mounted();
        page.select("000660");
        let next = page.apply(Event::SummaryLoaded {
            symbol: "005930".to_string(),
            result: Ok(summary("005930", "stale")),
        });
        assert_eq!(next, None);
        assert!(page.summary().is_none());
    }

    #[test]
    fn summary_failure_sets_status_and_keeps_page_usable() {
        let mut page = mounted();
        page.apply(Event::SummaryLoaded {
            symbol: "005930".to_string(),
            result: Err("Summary not found. Run daily job first.".to_string()),
        });
        assert_eq!(page.status(), "Summary not found. Run daily job first.");
        assert_eq!(page.select("000660"), load_summary("000660"));
    }

    #[test]
    fn daily_run_reports_counts_and_refetches_without_clearing() {
        let mut page = mounted();
        page.apply(Event::SummaryLoaded {
            symbol: "005930".to_string(),
            result: Ok(summary("005930", "before")),
        });

        assert_eq!(page.start_daily_run(), Command::RunDaily);
        assert_eq!(page.status(), RUNNING_STATUS);

        let next = page.apply(Event::DailyRunFinished(Ok(RunDailyReport {
            fetched_reports: 2,
            mentions_created: 4,
            summaries_created: 5,
            asof_date: NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
        })));
        assert_eq!(next, load_summary("005930"));
        assert_eq!(
            page.status(),
            "Done. fetched=2, mentions=4, summaries=5, asof=2026-01-28"
        );
        assert_eq!(page.summary().unwrap().summary, "before");

        page.apply(Event::SummaryLoaded {
            symbol: "005930".to_string(),
            result: Ok(summary("005930", "after")),
        });
        assert_eq!(page.summary().unwrap().summary, "after");
    }

    #[test]
    fn daily_run_failure_sets_status() {
        let mut page = mounted();
        page.start_daily_run();
        let next = page.apply(Event::DailyRunFinished(Err(
            "Failed to run daily pipeline".to_string(),
        )));
        assert_eq!(next, None);
        assert_eq!(page.status(), "Failed to run daily pipeline");
    }

    #[test]
    fn daily_run_without_selection_does_not_refetch() {
        let mut page = PageState::new();
        page.start_daily_run();
        let next = page.apply(Event::DailyRunFinished(Ok(RunDailyReport {
            fetched_reports: 0,
            mentions_created: 0,
            summaries_created: 0,
            asof_date: NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
        })));
        assert_eq!(next, None);
    }
}
