//! Trailing-edge debounce over a `tokio::sync::watch` channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Publishes the last value pushed once no newer value has arrived for
/// `delay`.
///
/// Each [`push`](Self::push) aborts the pending timer and starts a new one.
/// Dropping the debouncer aborts any pending timer, so nothing is published
/// after its owner is gone.
///
/// [`push`](Self::push) spawns onto the current tokio runtime and must be
/// called from within one.
pub struct Debouncer<T> {
    delay: Duration,
    tx: Arc<watch::Sender<T>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            delay,
            tx: Arc::new(tx),
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns a receiver observing published values.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Schedules `value` for publication after the quiet period, replacing
    /// any value still waiting.
    pub fn push(&mut self, value: T) {
        self.cancel();

        if self.delay.is_zero() {
            self.tx.send_replace(value);
            return;
        }

        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_replace(value);
        }));
    }

    /// Drops the value waiting for publication, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Waits until the value waiting for publication, if any, has been sent.
    ///
    /// Once this returns, every receiver observes the last pushed value.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                tracing::debug!(error = %e, "debounce task ended without publishing");
            }
        }
    }

    /// Returns `true` while a pushed value is still waiting out its delay.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}
