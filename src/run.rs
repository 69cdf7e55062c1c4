//! Application execution logic.
//!
//! This module wires the validated configuration into the monitor loop
//! and runs it until a shutdown signal arrives.

use thiserror::Error;
use tokio::signal;

use pagewatch::config::{ValidatedConfig, defaults};
use pagewatch::fetch::HttpPageFetcher;
use pagewatch::monitor::{ChangeMonitor, InvalidConfig, MonitorConfig, StartError, StatusEvent, StatusSink};
use pagewatch::net::{HttpError, ReqwestClient};
use pagewatch::notify::{DryRunNotifier, Notifier, NotifyError, TelegramNotifier};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] HttpError),

    /// The validated URL or interval was rejected by the monitor.
    #[error("Invalid monitor configuration: {0}")]
    MonitorConfig(#[source] InvalidConfig),

    /// The monitor refused to start.
    #[error("Failed to start monitor: {0}")]
    MonitorStart(#[source] StartError),

    /// Failed to persist effective settings for `--save`.
    #[error("Failed to save settings: {0}")]
    SettingsSave(#[source] pagewatch::config::ConfigError),

    /// The one-shot test message could not be delivered.
    #[error("Test notification failed")]
    TestSendFailed,
}

/// Notifier selected by configuration: Telegram, or logging-only for
/// dry runs.
pub enum AppNotifier {
    /// Sends via the Telegram Bot API.
    Telegram(TelegramNotifier<ReqwestClient>),
    /// Logs instead of sending.
    DryRun(DryRunNotifier),
}

impl Notifier for AppNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        match self {
            Self::Telegram(n) => n.send(message).await,
            Self::DryRun(n) => n.send(message).await,
        }
    }
}

/// Forwards status events to the tracing subscriber.
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn report(&self, event: StatusEvent) {
        if event.is_error() {
            tracing::error!("{event}");
        } else {
            tracing::info!("{event}");
        }
    }
}

/// Executes the monitor until a shutdown signal is received.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the monitor
/// rejects the configuration, or `--save` fails to write the settings
/// file.
///
/// # Coverage Note
///
/// Excluded from coverage because it installs OS signal handlers.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    save_if_requested(&config)?;

    let notifier = create_notifier(&config)?;
    if config.dry_run {
        tracing::info!("Dry-run mode enabled - notifications will be logged but not sent");
    }

    let client =
        ReqwestClient::with_timeout(defaults::HTTP_TIMEOUT).map_err(RunError::ClientBuild)?;
    let fetcher = HttpPageFetcher::new(client);

    let monitor = ChangeMonitor::new(fetcher, notifier)
        .with_message_template(config.message_template.clone());
    let monitor_config = MonitorConfig::from_url(config.url.clone(), config.interval)
        .map_err(RunError::MonitorConfig)?;

    let handle = monitor
        .start(monitor_config, TracingSink)
        .map_err(RunError::MonitorStart)?;

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping...");

    handle.stop();
    handle.join().await;
    Ok(())
}

/// Executes the `test` subcommand: sends one test message and exits.
///
/// # Errors
///
/// Returns [`RunError::TestSendFailed`] if the message was not delivered.
pub async fn execute_test(config: ValidatedConfig) -> Result<(), RunError> {
    let notifier = create_notifier(&config)?;
    let message = format!("pagewatch test message for {}", config.url);

    if send_test_message(&notifier, &message).await {
        println!("Test message sent.");
        Ok(())
    } else {
        Err(RunError::TestSendFailed)
    }
}

/// Attempts one notification delivery and reports the outcome as a bool.
///
/// Failures are logged, never raised; callers decide whether a failed
/// delivery is fatal.
async fn send_test_message<N: Notifier>(notifier: &N, message: &str) -> bool {
    match notifier.send(message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Test notification failed: {e}");
            false
        }
    }
}

/// Creates the notifier from configuration.
fn create_notifier(config: &ValidatedConfig) -> Result<AppNotifier, RunError> {
    match (&config.telegram, config.dry_run) {
        (_, true) | (None, _) => Ok(AppNotifier::DryRun(DryRunNotifier)),
        (Some(target), false) => {
            let client = ReqwestClient::with_timeout(defaults::HTTP_TIMEOUT)
                .map_err(RunError::ClientBuild)?;
            Ok(AppNotifier::Telegram(TelegramNotifier::new(
                client,
                target.token.clone(),
                target.chat_id.clone(),
            )))
        }
    }
}

/// Persists the effective settings when `--save` was passed.
fn save_if_requested(config: &ValidatedConfig) -> Result<(), RunError> {
    if !config.save {
        return Ok(());
    }

    let Some(path) = config.settings_path.as_deref() else {
        return Err(RunError::SettingsSave(
            pagewatch::config::ConfigError::NoSettingsPath,
        ));
    };

    config
        .to_settings()
        .save(path)
        .map_err(RunError::SettingsSave)?;
    tracing::info!("Settings saved to {}", path.display());
    Ok(())
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
