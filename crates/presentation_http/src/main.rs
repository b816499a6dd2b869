//! SpeechRelay HTTP Server
//!
//! Main entry point for the Bot Framework messaging endpoint.

use std::{sync::Arc, time::Duration};

use application::TurnService;
use infrastructure::{AppConfig, BotFrameworkAdapter, SpeechAdapter};
use presentation_http::{RequestIdLayer, ShutdownOutcome, routes, serve, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "speechrelay_server=debug,presentation_http=debug,\
     application=info,infrastructure=info,integration_botframework=info,ai_speech=info,\
     tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so the log format can be honored
    let loaded = AppConfig::load();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => {
            let mut config = AppConfig::default();
            config.apply_legacy_env(|key| std::env::var(key).ok());
            config
        },
    };

    init_tracing(config.server.json_logs());

    info!("SpeechRelay v{} starting", env!("CARGO_PKG_VERSION"));
    if let Err(e) = loaded {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        region = %config.speech.region,
        language = %config.speech.language,
        "Configuration loaded"
    );
    config.warn_on_gaps();

    // Initialize adapters
    let speech = SpeechAdapter::new(config.speech.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize speech: {e}"))?;
    let connector = BotFrameworkAdapter::new(config.connector.to_client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize connector: {e}"))?;
    let connector = Arc::new(connector);

    let turn_service = TurnService::with_config(
        Arc::new(speech),
        Arc::clone(&connector) as Arc<dyn application::ports::AttachmentPort>,
        connector,
        config.turn.to_turn_config(),
    );

    let state = AppState {
        turn_service: Arc::new(turn_service),
        config: Arc::new(config.clone()),
    };

    // Middleware order: last added is outermost
    let app = routes::create_router(state)
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(RequestIdLayer::new())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!(%addr, "Listening on http://{addr}/api/messages");

    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    match serve(listener, app, shutdown_signal(), drain_timeout).await? {
        ShutdownOutcome::Drained => info!("Server shutdown complete"),
        ShutdownOutcome::TimedOut => warn!("Server shutdown forced after {:?}", drain_timeout),
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        () = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
