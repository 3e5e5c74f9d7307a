use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salary_ledger::api::{AppState, create_router};
use salary_ledger::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salary_ledger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let loader = ConfigLoader::from_env()?;
    let server = loader.config().server.clone();
    let bootstrap = loader.config().users.bootstrap.clone();
    tracing::info!(
        pay_policy = ?loader.config().payroll.pay_policy,
        standard_daily_hours = %loader.config().payroll.standard_daily_hours,
        "Configuration loaded"
    );
    if loader.config().auth.jwt_secret.is_empty() {
        tracing::warn!("No token secret configured; sessions will not survive a restart");
    }

    let state = AppState::new(loader);
    if let Some(account) = bootstrap {
        state.users().bootstrap(&account)?;
    }

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
