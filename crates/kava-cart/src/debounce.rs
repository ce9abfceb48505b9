//! # Debounced Scheduling
//!
//! Search-text input fires on every keystroke; re-filtering on each one is
//! wasted work. The debouncer delays delivery and cancels the pending
//! delivery when a newer value arrives.
//!
//! Cancellation is advisory only - it improves responsiveness, not
//! correctness. Whatever happens to pending tasks, the value finally
//! delivered is always the last one submitted, so the query the engine
//! evaluates matches the final input state.
//!
//! Category changes bypass the debouncer entirely and hit the engine
//! directly.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Recommended delay for search-text input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancellable delayed delivery of the most recent value.
///
/// ## Usage
/// ```rust,no_run
/// use kava_cart::debounce::Debouncer;
///
/// # async fn example() {
/// let mut debouncer = Debouncer::new(|text: String| {
///     // presentation adapter forwards `text` to CartEngine::set_search_text
///     println!("apply query: {text}");
/// });
///
/// debouncer.call("к".to_string());
/// debouncer.call("ка".to_string());
/// debouncer.call("кава".to_string()); // only this one is delivered
/// # }
/// ```
pub struct Debouncer<T> {
    delay: Duration,
    sink: Arc<dyn Fn(T) + Send + Sync>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Debouncer with the recommended 300ms delay.
    pub fn new(sink: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::with_delay(DEFAULT_DEBOUNCE, sink)
    }

    /// Debouncer with a custom delay.
    pub fn with_delay(delay: Duration, sink: impl Fn(T) + Send + Sync + 'static) -> Self {
        Debouncer {
            delay,
            sink: Arc::new(sink),
            pending: None,
        }
    }

    /// Submits a value, replacing any value still waiting for delivery.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&mut self, value: T) {
        if let Some(pending) = self.pending.take() {
            trace!("replacing pending delivery");
            pending.abort();
        }

        let sink = Arc::clone(&self.sink);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink(value);
        }));
    }

    /// Drops any pending delivery without submitting a new value.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_single_call_delivers_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::with_delay(Duration::from_millis(300), move |v: String| {
            let _ = tx.send(v);
        });

        debouncer.call("кава".to_string());
        advance(Duration::from_millis(301)).await;

        assert_eq!(rx.recv().await.as_deref(), Some("кава"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_delivers_only_last_value() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::with_delay(Duration::from_millis(300), move |v: String| {
            let _ = tx.send(v);
        });

        debouncer.call("к".to_string());
        advance(Duration::from_millis(100)).await;
        debouncer.call("ка".to_string());
        advance(Duration::from_millis(100)).await;
        debouncer.call("кав".to_string());
        advance(Duration::from_millis(400)).await;

        assert_eq!(rx.recv().await.as_deref(), Some("кав"));
        assert!(rx.try_recv().is_err(), "earlier values must not arrive");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_delivery() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::with_delay(Duration::from_millis(300), move |v: String| {
            let _ = tx.send(v);
        });

        debouncer.call("к".to_string());
        debouncer.cancel();
        advance(Duration::from_millis(500)).await;

        assert!(rx.try_recv().is_err());
    }
}
