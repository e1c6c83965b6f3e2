//! Trait abstraction for the external success handler

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::submission::SubmittedValues;

/// Receives the validated values once a submission succeeds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuccessHandler: Send + Sync {
    async fn on_success(&self, values: SubmittedValues);
}

/// Whether the engine waits for the success handler before reporting success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuccessDispatch {
    /// Stay in `Submitting` until the handler completes
    #[default]
    Await,
    /// Spawn the handler and report success immediately
    FireAndForget,
}
