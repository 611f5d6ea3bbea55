//! Report state controller
//!
//! Single source of truth for the form input, in-flight status, last report,
//! and last error. The provider is injected at construction so tests can
//! drive the state machine with stubs.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::gemini::AnalysisProvider;
use crate::models::{AnalysisReport, PropertyProfile};

/// Banner text stored on any failed submission. Internal causes are logged
/// by the client and never reach the page.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Failed to generate the analysis. Please check your inputs and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Snapshot of everything the page renders from.
#[derive(Debug, Clone)]
pub struct ReportState {
    pub input: PropertyProfile,
    pub status: ReportStatus,
    pub result: Option<AnalysisReport>,
    pub error_message: Option<String>,
    /// Monotonic tag of the most recent submission. A completion is applied
    /// only while its tag is still the latest, so a stale in-flight response
    /// can never overwrite a newer submission's outcome.
    latest_request: u64,
}

impl ReportState {
    fn new() -> Self {
        Self {
            input: PropertyProfile::default(),
            status: ReportStatus::Idle,
            result: None,
            error_message: None,
            latest_request: 0,
        }
    }
}

#[cfg(test)]
impl ReportState {
    /// Snapshot seeded with a given input, for rendering tests.
    pub(crate) fn for_tests(input: PropertyProfile) -> Self {
        let mut state = Self::new();
        state.input = input;
        state
    }
}

pub struct ReportController {
    provider: Arc<dyn AnalysisProvider>,
    state: RwLock<ReportState>,
}

impl ReportController {
    pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            provider,
            state: RwLock::new(ReportState::new()),
        }
    }

    pub async fn state(&self) -> ReportState {
        self.state.read().await.clone()
    }

    /// Field edits update the input only. A previously displayed report or
    /// error stays visible until the next submit.
    pub async fn update_input(&self, input: PropertyProfile) {
        self.state.write().await.input = input;
    }

    /// Run one submission to completion: store the input, enter Loading with
    /// the prior outcome cleared, invoke the provider, then settle to
    /// Succeeded or Failed. Re-entrant for unlimited submissions.
    pub async fn submit(&self, input: PropertyProfile) {
        let request_id = {
            let mut state = self.state.write().await;
            state.input = input.clone();
            state.status = ReportStatus::Loading;
            state.result = None;
            state.error_message = None;
            state.latest_request += 1;
            state.latest_request
        };

        info!("Submission #{} for '{}'", request_id, input.location);

        let outcome = self.provider.analyze(&input).await;

        let mut state = self.state.write().await;
        if state.latest_request != request_id {
            info!("Discarding stale response for submission #{}", request_id);
            return;
        }

        match outcome {
            Ok(report) => {
                state.status = ReportStatus::Succeeded;
                state.result = Some(report);
                state.error_message = None;
            }
            Err(e) => {
                error!("Submission #{} failed: {}", request_id, e);
                state.status = ReportStatus::Failed;
                state.result = None;
                state.error_message = Some(GENERIC_ERROR_MESSAGE.to_string());
            }
        }
    }
}
