use std::time::Duration;

use civic_api::config::AppConfig;
use civic_api::state::AppState;
use civic_api::telemetry;
use civic_events::EventAudit;

/// How long to wait for the audit task after the bus closes.
const AUDIT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = AppConfig::from_env()?;

    // --- Tracing ---
    telemetry::init_tracing(config.log_format);
    tracing::info!(
        handler_timeout_ms = config.handler_timeout_ms,
        shutdown_grace_secs = config.shutdown_grace_secs,
        "Loaded configuration"
    );

    // --- Store ---
    let pool = civic_db::create_pool();

    // --- Event bus + listeners ---
    let state = AppState::bootstrap(config, pool);

    // Spawn the audit log (records every published event).
    let audit_handle = tokio::spawn(EventAudit::run(state.event_bus.tap()));
    tracing::info!("Civic backend ready");

    shutdown_signal().await;

    // --- Post-shutdown cleanup ---
    let drained = state.event_bus.shutdown().await;
    tracing::info!(drained, "Event handlers stopped");

    // Dropping the last bus handle closes the tap, which stops the audit task.
    drop(state);
    match tokio::time::timeout(AUDIT_DRAIN_TIMEOUT, audit_handle).await {
        Ok(Ok(logged)) => tracing::info!(logged, "Event audit stopped"),
        Ok(Err(e)) => tracing::error!(error = %e, "Event audit task failed"),
        Err(_) => tracing::warn!("Event audit did not stop in time"),
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the process
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
