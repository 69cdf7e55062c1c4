//! The poll/hash/compare/notify loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

use crate::digest::ContentDigest;
use crate::fetch::PageFetcher;
use crate::notify::{MessageTemplate, Notifier};

use super::config::MonitorConfig;
use super::status::{StatusEvent, StatusSink};

/// Error type for [`ChangeMonitor::start`].
#[derive(Debug, Error)]
pub enum StartError {
    /// A loop started from this monitor instance is still running.
    /// Starting is rejected, not queued.
    #[error("monitor is already running")]
    AlreadyRunning,
}

/// Monitors one web resource for content changes.
///
/// Holds the fetcher and notifier capabilities; [`ChangeMonitor::start`]
/// spawns the background loop and hands back a [`MonitorHandle`] for
/// cooperative cancellation. At most one loop per instance runs at a time;
/// after the previous run stops, the instance can be started again.
///
/// # Example
///
/// ```ignore
/// use pagewatch::monitor::{ChangeMonitor, MonitorConfig};
/// use std::time::Duration;
///
/// let monitor = ChangeMonitor::new(fetcher, notifier);
/// let config = MonitorConfig::new("https://example.com/", Duration::from_secs(300))?;
/// let handle = monitor.start(config, |event| println!("{event}"))?;
/// // ... later
/// handle.stop();
/// handle.join().await;
/// ```
pub struct ChangeMonitor<F, N> {
    fetcher: Arc<F>,
    notifier: Arc<N>,
    template: MessageTemplate,
    running: Arc<AtomicBool>,
}

impl<F, N> ChangeMonitor<F, N>
where
    F: PageFetcher + 'static,
    N: Notifier + 'static,
{
    /// Creates a monitor over the given fetcher and notifier capabilities.
    #[must_use]
    pub fn new(fetcher: F, notifier: N) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            notifier: Arc::new(notifier),
            template: MessageTemplate::default(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the change-notification message template.
    #[must_use]
    pub fn with_message_template(mut self, template: MessageTemplate) -> Self {
        self.template = template;
        self
    }

    /// Returns true while a loop started from this instance is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Starts the monitor loop on the current tokio runtime.
    ///
    /// Returns immediately; the loop runs until [`MonitorHandle::stop`]
    /// is called (or the handle is dropped). Status events are delivered
    /// to `sink` from the loop task.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::AlreadyRunning`] if a previous run has not
    /// stopped yet.
    pub fn start<S>(&self, config: MonitorConfig, sink: S) -> Result<MonitorHandle, StartError>
    where
        S: StatusSink + 'static,
    {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(StartError::AlreadyRunning);
        }

        info!(
            "starting monitor for {} (interval {}s)",
            config.url(),
            config.interval_secs()
        );

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.notifier),
            self.template.clone(),
            config,
            sink,
            cancel_rx,
            Arc::clone(&self.running),
        ));

        Ok(MonitorHandle {
            cancel: cancel_tx,
            task,
        })
    }
}

/// Handle to a running monitor loop.
///
/// Dropping the handle also cancels the loop; [`MonitorHandle::stop`]
/// does so explicitly and is safe to call any number of times.
#[derive(Debug)]
pub struct MonitorHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Requests cooperative cancellation. Idempotent.
    ///
    /// The loop observes the request at the top of each cycle and between
    /// countdown ticks; worst-case latency is one tick plus any in-flight
    /// fetch's remaining timeout.
    pub fn stop(&self) {
        // send only fails when the loop already exited
        let _ = self.cancel.send(true);
    }

    /// Returns true once the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the loop to exit.
    pub async fn join(self) {
        // A panic inside the loop would surface here; the loop itself
        // treats every failure as a recoverable status event.
        let _ = self.task.await;
    }
}

async fn run_loop<F, N, S>(
    fetcher: Arc<F>,
    notifier: Arc<N>,
    template: MessageTemplate,
    config: MonitorConfig,
    sink: S,
    mut cancel: watch::Receiver<bool>,
    running: Arc<AtomicBool>,
) where
    F: PageFetcher,
    N: Notifier,
    S: StatusSink,
{
    let mut last_digest: Option<ContentDigest> = None;

    while !*cancel.borrow() {
        run_cycle(
            fetcher.as_ref(),
            notifier.as_ref(),
            &template,
            &config,
            &sink,
            &mut last_digest,
        )
        .await;

        if countdown(&mut cancel, config.interval_secs()).await {
            break;
        }
    }

    running.store(false, Ordering::SeqCst);
    debug!("monitor loop for {} stopped", config.url());
}

/// One poll/hash/compare/notify cycle.
async fn run_cycle<F, N, S>(
    fetcher: &F,
    notifier: &N,
    template: &MessageTemplate,
    config: &MonitorConfig,
    sink: &S,
    last_digest: &mut Option<ContentDigest>,
) where
    F: PageFetcher,
    N: Notifier,
    S: StatusSink,
{
    sink.report(StatusEvent::checking(config.url()));

    match fetcher.fetch(config.url()).await {
        Ok(body) => {
            let digest = ContentDigest::of(&body);

            match last_digest {
                Some(previous) if *previous != digest => {
                    info!(
                        "change detected on {}: {} -> {}",
                        config.url(),
                        previous.short(),
                        digest.short()
                    );
                    let message = template.render(config.url());
                    if let Err(e) = notifier.send(&message).await {
                        // Notification failure does not affect digest state.
                        error!("failed to deliver change notification: {e}");
                        sink.report(StatusEvent::error(&e));
                    }
                }
                Some(_) => trace!("no change on {}", config.url()),
                None => debug!(
                    "baseline digest {} for {}",
                    digest.short(),
                    config.url()
                ),
            }

            // Stored unconditionally after a successful fetch, including
            // the first one.
            *last_digest = Some(digest);
            sink.report(StatusEvent::checked(config.interval_secs()));
        }
        Err(e) => {
            // A failed fetch never touches the stored digest.
            error!("fetch of {} failed: {e}", config.url());
            sink.report(StatusEvent::error(&e));
        }
    }
}

/// Waits out the polling interval in one-second ticks.
///
/// Returns true if cancellation was requested; the remaining sleep is
/// abandoned immediately.
async fn countdown(cancel: &mut watch::Receiver<bool>, seconds: u64) -> bool {
    for remaining in (1..=seconds).rev() {
        if *cancel.borrow() {
            return true;
        }
        trace!("next check in {remaining}s");
        tokio::select! {
            () = tokio::time::sleep(Duration::from_secs(1)) => {}
            // changed() also resolves when the handle is dropped
            _ = cancel.changed() => return true,
        }
    }
    *cancel.borrow()
}
