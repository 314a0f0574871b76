use anyhow::Context;
use log_router::LogRouter;
use log_router::config::{ProcessEnv, load_settings};
use log_router::discord::DiscordClient;
use log_router::logging::init_tracing;
use log_router::paste::HasteUploader;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

const STATS_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = load_settings().context("failed to load settings")?;

    // Initialize tracing
    init_tracing(settings.logging.json);
    tracing::info!("🚀 Starting log router");

    let log_config = settings
        .load_log_config()
        .await
        .with_context(|| format!("failed to read {}", settings.log_config_path.display()))?;
    tracing::info!(
        path = %settings.log_config_path.display(),
        structured_entries = log_config.log_channels.as_ref().map_or(0, |m| m.len()),
        silent_mode = log_config.silent_mode,
        "✅ Configuration loaded"
    );

    let discord = Arc::new(DiscordClient::new(&settings.discord));
    let paste = Arc::new(HasteUploader::new(&settings.paste));
    let router = Arc::new(LogRouter::new(discord, paste, Arc::new(ProcessEnv)));

    // Log delivery is essential, refuse to run without it
    if let Err(e) = router.unpack_log_config(&log_config).await {
        tracing::error!(
            error = %e,
            error_kind = ?e.kind(),
            "Failed to resolve log channels, exiting"
        );
        std::process::exit(1);
    }

    router
        .log_text(
            "home",
            format!("🟢 Log router v{} connected", env!("CARGO_PKG_VERSION")),
        )
        .await;

    let stats_router = router.clone();
    let stats_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATS_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            stats_router.log_stats().await;
        }
    });

    let signal_name = setup_shutdown_handler().await;
    tracing::info!(
        signal = %signal_name,
        "Received shutdown signal, initiating graceful shutdown"
    );

    stats_task.abort();
    router.log_stats().await;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Setup signal handlers for graceful shutdown
/// Handles SIGINT (Ctrl+C), SIGTERM, and SIGQUIT on Unix systems
async fn setup_shutdown_handler() -> String {
    #[cfg(unix)]
    {
        use signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to setup SIGINT handler");
        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to setup SIGTERM handler");
        let mut sigquit = signal(SignalKind::quit()).expect("Failed to setup SIGQUIT handler");

        tokio::select! {
            _ = sigint.recv() => "SIGINT (Ctrl+C)".to_string(),
            _ = sigterm.recv() => "SIGTERM".to_string(),
            _ = sigquit.recv() => "SIGQUIT".to_string(),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        "Ctrl+C".to_string()
    }
}
