use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use model::Alert;

use crate::api::MapApi;

/// Poll cadence for the live alert feed.
pub const ALERT_POLL_PERIOD: Duration = Duration::from_millis(5000);

/// Ownership of the repeating poll task.
///
/// `stop` consumes the handle so the timer is cancelled exactly once; dropping
/// the handle cancels too, so a dismounted view never leaves a timer running.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(self) {
        // Drop aborts.
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts the alert poll loop: one fetch immediately, then every 5000 ms.
///
/// Each successful poll replaces the published list wholesale; an alert
/// absent from the latest payload has ended. A failed poll is logged and
/// skipped without clearing the list or stopping the timer, and the next
/// tick retries unconditionally.
pub fn spawn_alert_poller<A>(api: A) -> (PollerHandle, watch::Receiver<Vec<Alert>>)
where
    A: MapApi + Send + Sync + 'static,
{
    let (tx, rx) = watch::channel(Vec::new());
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ALERT_POLL_PERIOD);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            poll_once(&api, &tx).await;
        }
    });
    (PollerHandle { task }, rx)
}

/// One poll tick. Returns whether the alert list was replaced.
pub async fn poll_once<A: MapApi>(api: &A, tx: &watch::Sender<Vec<Alert>>) -> bool {
    match api.fetch_alerts().await {
        Ok(alerts) => {
            let _ = tx.send(alerts);
            true
        }
        Err(err) => {
            warn!("alert poll failed, keeping previous list: {err}");
            false
        }
    }
}
