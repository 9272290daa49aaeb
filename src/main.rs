use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use pawon_api::config::{init_tracing, load_config};
use pawon_api::db::{establish_connection_from_app_config, run_migrations};
use pawon_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    init_tracing(config.log_level(), config.log_json);
    info!(
        environment = %config.environment,
        "starting pawon-api v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db = establish_connection_from_app_config(&config).await?;
    if config.auto_migrate {
        run_migrations(&db).await?;
    }

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(Arc::new(db), Arc::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
