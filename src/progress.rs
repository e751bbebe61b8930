//! Loading-indicator control with delayed display.
//!
//! The indicator only shows once a request has been in flight for a while, so
//! fast requests never flash it. Completion always dismisses the indicator
//! and cancels the pending delayed show.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Visual progress affordance (e.g. a top-of-page loading bar).
pub trait ProgressIndicator: Send + Sync {
    fn start(&self);
    fn done(&self);
}

/// Indicator that does nothing, for headless embedders.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndicator;

impl ProgressIndicator for NoopIndicator {
    fn start(&self) {}
    fn done(&self) {}
}

/// Schedules the indicator's `start` after a delay and cancels it on finish.
///
/// A single pending handle is shared across overlapping requests: scheduling
/// stores the newest handle and `finish` cancels whichever one is stored.
/// Overlapping in-flight requests therefore share indicator visibility, the
/// same simplification the frontend client this replaces has always had.
pub(crate) struct DelayedProgress {
    indicator: Arc<dyn ProgressIndicator>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DelayedProgress {
    pub(crate) fn new(indicator: Arc<dyn ProgressIndicator>, delay: Duration) -> Self {
        Self { indicator, delay, pending: Mutex::new(None) }
    }

    /// Schedule the indicator to show after the configured delay.
    ///
    /// A previously stored handle is dropped, not aborted: `finish` only ever
    /// cancels the most recently scheduled show.
    pub(crate) async fn schedule(&self) {
        let indicator = Arc::clone(&self.indicator);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            indicator.start();
        });

        *self.pending.lock().await = Some(handle);
    }

    /// Dismiss the indicator and cancel the pending delayed show, if any.
    pub(crate) async fn finish(&self) {
        self.indicator.done();

        if let Some(handle) = self.pending.lock().await.take() {
            handle.abort();
        }
    }
}
