pub mod api;
pub mod domain;
pub mod page;

pub mod config {
    use anyhow::Context;
    use std::str::FromStr;
    use std::time::Duration;

    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_WEB_PORT: u16 = 5173;

    /// Settings shared by both binaries. The web port is read separately by
    /// [`web_port_from_env`] so the CLI never trips over it.
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: String,
        pub http_timeout: Option<Duration>,
        pub user_agent: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(non_empty_var)
        }

        fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let http_timeout = var("HUB_HTTP_TIMEOUT_SECS")
                .map(|s| parse_var::<u64>("HUB_HTTP_TIMEOUT_SECS", &s))
                .transpose()?
                .map(Duration::from_secs);

            Ok(Self {
                api_base_url: var("HUB_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                http_timeout,
                user_agent: var("HUB_USER_AGENT"),
                sentry_dsn: var("SENTRY_DSN"),
            })
        }
    }

    /// `PORT` for the web server, defaulting to 5173.
    pub fn web_port_from_env() -> anyhow::Result<u16> {
        web_port(non_empty_var("PORT").as_deref())
    }

    fn web_port(raw: Option<&str>) -> anyhow::Result<u16> {
        match raw {
            Some(s) => parse_var("PORT", s),
            None => Ok(DEFAULT_WEB_PORT),
        }
    }

    fn parse_var<T>(key: &str, raw: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        raw.parse::<T>()
            .with_context(|| format!("{key} has an invalid value (got {raw})"))
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

}
