//! Delayed focus application
//!
//! Some screen readers miss focus that lands inside a freshly rendered
//! region. Plans can therefore be held back for a short delay on a tokio task
//! and handed back to the event loop through a channel. The loop must re-check
//! the plan against the current attempt before applying it.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::focus_policy::FocusPlan;

/// Upper bound for the configurable delay
pub const MAX_FOCUS_DELAY: Duration = Duration::from_millis(1000);

/// Schedules focus plans to be delivered after a fixed delay
#[derive(Debug, Clone)]
pub struct FocusScheduler {
    delay: Duration,
    tx: UnboundedSender<FocusPlan>,
}

impl FocusScheduler {
    /// Create a scheduler and the receiver on which plans come back.
    /// The delay is clamped to [`MAX_FOCUS_DELAY`].
    pub fn channel(delay: Duration) -> (Self, UnboundedReceiver<FocusPlan>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay: delay.min(MAX_FOCUS_DELAY),
            tx,
        };
        (scheduler, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// True if plans should be applied synchronously
    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }

    /// Deliver the plan after the delay without blocking the caller.
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, plan: FocusPlan) {
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let attempt = plan.attempt.0;
            if tx.send(plan).is_err() {
                tracing::debug!(attempt, "focus plan dropped, receiver closed");
            }
        });
    }
}
