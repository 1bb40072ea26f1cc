pub mod state;

use crate::api::HubApi;

pub use state::{Command, Event, PageState, RUNNING_STATUS};

/// Runs [`PageState`] commands against a backend, one request at a time.
pub struct Page<A> {
    api: A,
    state: PageState,
}

impl<A: HubApi> Page<A> {
    pub fn new(api: A) -> Self {
        Self::with_state(api, PageState::new())
    }

    pub fn with_state(api: A, state: PageState) -> Self {
        Self { api, state }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub async fn mount(&mut self) {
        let cmd = self.state.mount();
        self.run(Some(cmd)).await;
    }

    pub async fn select(&mut self, symbol: &str) {
        let cmd = self.state.select(symbol);
        self.run(cmd).await;
    }

    pub async fn run_daily(&mut self) {
        let cmd = self.state.start_daily_run();
        self.run(Some(cmd)).await;
    }

    async fn run(&mut self, mut next: Option<Command>) {
        while let Some(cmd) = next {
            let event = self.execute(cmd).await;
            next = self.state.apply(event);
        }
    }

    async fn execute(&self, cmd: Command) -> Event {
        match cmd {
            Command::LoadTickers => {
                Event::TickersLoaded(self.api.list_tickers().await.map_err(report))
            }
            Command::LoadSummary { symbol } => {
                let result = self
                    .api
                    .ticker_summary(&symbol, None)
                    .await
                    .map_err(report);
                Event::SummaryLoaded { symbol, result }
            }
            Command::RunDaily => Event::DailyRunFinished(self.api.run_daily().await.map_err(report)),
        }
    }
}

fn report(err: anyhow::Error) -> String {
    tracing::warn!(error = ?err, "page request failed");
    err.to_string()
}
