use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reporthub_core::api::{CatalogApi, HttpHubClient};

mod routes;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = reporthub_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let port = reporthub_core::config::web_port_from_env()?;
    let client = HttpHubClient::from_settings(&settings)?;

    // The page still serves (with error statuses) while the backend is down.
    match client.health().await {
        Ok(health) => tracing::info!(base_url = %client.base_url(), env = %health.env, "backend reachable"),
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::warn!(base_url = %client.base_url(), error = ?e, "backend health check failed; serving anyway");
        }
    }

    let app = routes::router(routes::AppState {
        api: Arc::new(client),
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "web listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &reporthub_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
