//! Cancel-and-restart debouncing for rapidly changing input.
//!
//! The search pipeline must not re-run on every keystroke, only once input
//! has been quiet for a fixed window (300 ms by default). Each new value
//! cancels the pending window and restarts it; only the latest value is
//! ever emitted. This bounds recomputation frequency without ever showing
//! results for a stale query.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};

/// The quiescence window used for the free-text search field.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Create a debounce pair.
///
/// Values pushed into the [`DebounceInput`] as they are typed come out of
/// the [`DebounceOutput`] only after `window` of silence, collapsed to the
/// most recent one.
#[must_use]
pub fn debounced<T: Send + 'static>(window: Duration) -> (DebounceInput<T>, DebounceOutput<T>) {
    let (raw_tx, mut raw_rx) = mpsc::unbounded_channel::<T>();
    let (settled_tx, settled_rx) = mpsc::unbounded_channel::<T>();

    tokio::spawn(async move {
        while let Some(first) = raw_rx.recv().await {
            let mut latest = first;
            let deadline = sleep(window);
            tokio::pin!(deadline);

            loop {
                tokio::select! {
                    next = raw_rx.recv() => match next {
                        // A new keystroke: keep it and restart the window.
                        Some(value) => {
                            latest = value;
                            deadline.as_mut().reset(Instant::now() + window);
                        }
                        // Input closed: flush the pending value and stop.
                        None => {
                            let _ = settled_tx.send(latest);
                            return;
                        }
                    },
                    () = &mut deadline => {
                        let _ = settled_tx.send(latest);
                        break;
                    }
                }
            }
        }
    });

    (
        DebounceInput { tx: raw_tx },
        DebounceOutput { rx: settled_rx },
    )
}

/// The raw side: push values as they change.
#[derive(Debug, Clone)]
pub struct DebounceInput<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> DebounceInput<T> {
    /// Push the current value, resetting any pending window.
    ///
    /// Returns `false` if the output side has been dropped.
    pub fn send(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// The settled side: yields a value once input has been quiet for the
/// window.
#[derive(Debug)]
pub struct DebounceOutput<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> DebounceOutput<T> {
    /// Wait for the next settled value.
    ///
    /// Returns `None` once the input side is dropped and all pending
    /// values have been drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_collapses_to_last_value() {
        let (input, mut output) = debounced::<String>(DEFAULT_DEBOUNCE);

        for value in ["c", "cr", "cre", "creta"] {
            assert!(input.send(value.to_owned()));
        }

        assert_eq!(output.recv().await.as_deref(), Some("creta"));

        // Exactly one emission for the burst.
        let extra = timeout(DEFAULT_DEBOUNCE * 3, output.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_value_resets_the_window() {
        let (input, mut output) = debounced::<String>(DEFAULT_DEBOUNCE);

        input.send("swift".to_owned());
        // Not yet quiet for the full window; this keystroke must cancel
        // the pending emission rather than stack a second timer.
        advance(Duration::from_millis(200)).await;
        input.send("swift dzire".to_owned());

        assert_eq!(output.recv().await.as_deref(), Some("swift dzire"));
        let extra = timeout(DEFAULT_DEBOUNCE * 3, output.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_emit() {
        let (input, mut output) = debounced::<u32>(DEFAULT_DEBOUNCE);

        input.send(1);
        assert_eq!(output.recv().await, Some(1));

        input.send(2);
        input.send(3);
        assert_eq!(output.recv().await, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_input_flushes_pending_value() {
        let (input, mut output) = debounced::<u32>(DEFAULT_DEBOUNCE);
        input.send(7);
        drop(input);

        assert_eq!(output.recv().await, Some(7));
        assert_eq!(output.recv().await, None);
    }
}
