use ivrpilot::application::CallOrchestrator;
use ivrpilot::config::Config;
use ivrpilot::infrastructure::classifier::GeminiClassifier;
use ivrpilot::infrastructure::logging::FanoutLogger;
use ivrpilot::infrastructure::notifier::HttpCallNotifier;
use ivrpilot::infrastructure::persistence::InMemoryCallRegistry;
use ivrpilot::infrastructure::telephony::TelnyxGateway;
use ivrpilot::interface::api::{build_router, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is honored in development; real deployments set the
    // environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting ivrpilot");

    let config = Config::from_env()?;
    info!("Configuration loaded for {}", config.base_url);

    let registry = Arc::new(InMemoryCallRegistry::new());
    let gateway = Arc::new(TelnyxGateway::new(
        config.telnyx.clone(),
        config.base_url.clone(),
    ));
    let classifier = Arc::new(GeminiClassifier::new(config.gemini.clone()));
    let notifier = Arc::new(HttpCallNotifier::new(config.webhooks.clone()));
    let logger = FanoutLogger::tracing_only();

    let orchestrator = Arc::new(CallOrchestrator::new(
        registry,
        gateway,
        classifier,
        notifier,
        logger.clone(),
    ));

    let app = build_router(AppState {
        orchestrator,
        logger,
    });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
