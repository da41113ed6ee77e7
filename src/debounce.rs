use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Delays an action until the input stream has been quiet for `interval`.
///
/// Owns at most one pending timer task. Scheduling again before the timer
/// elapses aborts the pending task and restarts the wait, so only the last
/// action within any quiet window ever runs.
pub struct Debouncer {
    interval: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `action` to run after the quiet interval, replacing any
    /// previously pending action.
    pub async fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let interval = self.interval;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            action.await;
        });
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending action, if any, without scheduling a new one.
    pub async fn cancel(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_quiet_interval() {
        let debouncer = Debouncer::new(INTERVAL);
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        debouncer
            .schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        tokio::time::advance(Duration::from_millis(499)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_action() {
        let debouncer = Debouncer::new(INTERVAL);
        let fired = Arc::new(Mutex::new(Vec::new()));

        for query in ["a", "al", "ali"] {
            let fired = Arc::clone(&fired);
            debouncer
                .schedule(async move {
                    fired.lock().await.push(query.to_string());
                })
                .await;
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        tokio::time::advance(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert_eq!(*fired.lock().await, vec!["ali".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_action() {
        let debouncer = Debouncer::new(INTERVAL);
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        debouncer
            .schedule(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        debouncer.cancel().await;

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
