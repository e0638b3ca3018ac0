//! Homework review status bot entrypoint.

use verdict_common::config::AppConfig;
use verdict_common::error::BotError;
use verdict_poller::bot::StatusBot;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "verdict_poller=debug,verdict_notifier=debug,verdict_common=debug".into()
            }),
        )
        .json()
        .init();

    tracing::info!("Homework status bot starting...");

    let bot = match start() {
        Ok(bot) => bot,
        Err(e) if e.is_fatal() => {
            tracing::error!(fatal = true, error = %e, "Startup failed, exiting");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        _ = bot.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
        }
    }

    tracing::info!("Homework status bot stopped.");
    Ok(())
}

/// Load configuration and validate credentials.
fn start() -> Result<StatusBot, BotError> {
    let config = AppConfig::from_env()?;
    StatusBot::from_config(&config)
}
