//! Form controller
//!
//! Sequences input events into the submission machine and the focus policy
//! and exposes a read-only view for rendering.

use std::sync::Arc;

use super::error::FormError;
use super::focus_policy::{
    apply_plan, error_summary, plan_focus, ErrorSummaryEntry, FocusCapability, FocusPlan,
    FocusPolicyMode,
};
use super::handler::{SuccessDispatch, SuccessHandler};
use super::registry::FieldRegistry;
use super::submission::{AttemptId, ErrorMap, SubmissionState, SubmitStatus};
use super::scheduler::FocusScheduler;

/// ARIA wiring for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AriaAttributes {
    pub input_id: String,
    pub invalid: bool,
    pub required: bool,
    /// Id of the rendered error message, present only while it is shown
    pub error_id: Option<String>,
    pub instruction_id: Option<String>,
    /// Space separated ids, error first
    pub described_by: Option<String>,
    pub autocomplete: Option<&'static str>,
}

/// Everything the presentation layer needs for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub value: String,
    /// Error to present, already gated by the display rule
    pub error: Option<String>,
    pub touched: bool,
    pub required: bool,
    pub instruction: Option<String>,
    pub masked: bool,
    pub aria: AriaAttributes,
}

/// Read-only snapshot of the whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub status: SubmitStatus,
    pub mode: FocusPolicyMode,
    pub error_summary: Vec<ErrorSummaryEntry>,
    pub submit_aria_disabled: bool,
    /// First field with a shown error, when the skip affordance applies
    pub skip_to_first_error: Option<String>,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded(AttemptId),
    Failed(AttemptId),
}

/// Composes registry, submission machine and focus policy
pub struct FormController {
    registry: FieldRegistry,
    state: SubmissionState,
    mode: FocusPolicyMode,
    scheduler: Option<FocusScheduler>,
    success: Arc<dyn SuccessHandler>,
    dispatch: SuccessDispatch,
}

impl FormController {
    pub fn new(
        registry: FieldRegistry,
        mode: FocusPolicyMode,
        success: Arc<dyn SuccessHandler>,
    ) -> Self {
        let state = SubmissionState::new(&registry);
        Self {
            registry,
            state,
            mode,
            scheduler: None,
            success,
            dispatch: SuccessDispatch::default(),
        }
    }

    /// Route focus plans through a delayed scheduler
    pub fn with_scheduler(mut self, scheduler: FocusScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn with_dispatch(mut self, dispatch: SuccessDispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn mode(&self) -> FocusPolicyMode {
        self.mode
    }

    pub fn error_map(&self) -> &ErrorMap {
        self.state.errors()
    }

    pub fn submit_status(&self) -> SubmitStatus {
        self.state.status()
    }

    pub fn is_field_touched(&self, name: &str) -> bool {
        self.state.is_touched(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.state.value(name)
    }

    /// Drop all field state, as when the form is unmounted and mounted again
    pub fn reset(&mut self) {
        self.state = SubmissionState::remount(&self.registry, self.state.attempt());
    }

    pub fn on_field_change(&mut self, name: &str, value: &str) {
        if let Err(err) = self.state.set_value(name, value) {
            tracing::warn!("ignoring change: {err}");
        }
    }

    pub fn on_field_blur(&mut self, name: &str) {
        if let Err(err) = self.state.blur(&self.registry, name) {
            tracing::warn!("ignoring blur: {err}");
        }
    }

    /// Run a submit attempt.
    ///
    /// On failure the focus plan is applied through `focus`, either now or,
    /// with a scheduler configured, when the plan comes back from the
    /// scheduler and is passed to [`apply_scheduled_focus`](Self::apply_scheduled_focus).
    pub async fn on_submit(&mut self, focus: &mut dyn FocusCapability) -> SubmitOutcome {
        let attempt = self.state.begin_submit(&self.registry);

        if self.state.settle_validation() {
            tracing::info!(
                attempt = attempt.0,
                errors = self.state.errors().len(),
                "submission rejected"
            );
            if let Some(plan) = plan_focus(self.mode, &self.registry, self.state.errors(), attempt)
            {
                match &self.scheduler {
                    Some(scheduler) if !scheduler.is_immediate() => scheduler.schedule(plan),
                    _ => log_focus_result(apply_plan(&plan, focus)),
                }
            }
            return SubmitOutcome::Failed(attempt);
        }

        let values = self.state.snapshot(&self.registry);
        match self.dispatch {
            SuccessDispatch::Await => self.success.on_success(values).await,
            SuccessDispatch::FireAndForget => {
                let handler = Arc::clone(&self.success);
                tokio::spawn(async move { handler.on_success(values).await });
            }
        }
        self.state.mark_succeeded(attempt);
        tracing::info!(attempt = attempt.0, "submission succeeded");
        SubmitOutcome::Succeeded(attempt)
    }

    /// Whether a plan still belongs to the latest, failed attempt
    pub fn is_plan_current(&self, plan: &FocusPlan) -> bool {
        plan.attempt == self.state.attempt() && self.state.status() == SubmitStatus::Failed
    }

    /// Apply a plan delivered by the scheduler. Stale plans are dropped.
    ///
    /// Returns true if the plan was applied.
    pub fn apply_scheduled_focus(
        &self,
        plan: &FocusPlan,
        focus: &mut dyn FocusCapability,
    ) -> bool {
        if !self.is_plan_current(plan) {
            tracing::debug!(
                plan_attempt = plan.attempt.0,
                current_attempt = self.state.attempt().0,
                "dropping stale focus plan"
            );
            return false;
        }
        log_focus_result(apply_plan(plan, focus));
        true
    }

    pub fn aria_attributes_for(&self, name: &str) -> Option<AriaAttributes> {
        let field = match self.registry.lookup(name) {
            Ok(field) => field,
            Err(err) => {
                tracing::warn!("{err}");
                return None;
            }
        };

        let error_id = self
            .state
            .is_error_displayed(name)
            .then(|| field.error_id());
        let instruction_id = field.instruction_id();
        let described_by = [error_id.as_deref(), instruction_id.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Some(AriaAttributes {
            input_id: field.input_id(),
            invalid: error_id.is_some(),
            required: field.required,
            error_id,
            instruction_id,
            described_by: (!described_by.is_empty()).then_some(described_by),
            autocomplete: field.autocomplete.map(|hint| hint.token()),
        })
    }

    pub fn error_summary(&self) -> Vec<ErrorSummaryEntry> {
        error_summary(&self.registry, self.state.errors())
    }

    pub fn view(&self) -> FormView {
        let fields = self
            .registry
            .iter()
            .filter_map(|field| {
                let aria = self.aria_attributes_for(&field.name)?;
                Some(FieldView {
                    name: field.name.clone(),
                    label: field.label.clone(),
                    value: self.state.value(&field.name).unwrap_or_default().to_string(),
                    error: self.state.displayed_error(&field.name).map(str::to_string),
                    touched: self.state.is_touched(&field.name),
                    required: field.required,
                    instruction: field.instruction.clone(),
                    masked: field.masked,
                    aria,
                })
            })
            .collect::<Vec<_>>();

        let status = self.state.status();
        let skip_to_first_error = if status == SubmitStatus::Failed && self.mode.offers_skip_link()
        {
            fields
                .iter()
                .find(|f| f.error.is_some())
                .map(|f| f.name.clone())
        } else {
            None
        };

        FormView {
            fields,
            status,
            mode: self.mode,
            error_summary: self.error_summary(),
            submit_aria_disabled: self.state.submit_aria_disabled(),
            skip_to_first_error,
        }
    }
}

fn log_focus_result(result: Result<(), FormError>) {
    if let Err(err) = result {
        tracing::warn!("focus not applied: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::focus_policy::{FocusTarget, MockFocusCapability, ERROR_SUMMARY_ID};
    use crate::state::forms::handler::MockSuccessHandler;
    use crate::state::forms::submission::SubmittedValues;
    use mockall::predicate::eq;
    use std::time::Duration;

    fn handler_never_called() -> Arc<dyn SuccessHandler> {
        let mut handler = MockSuccessHandler::new();
        handler.expect_on_success().never();
        Arc::new(handler)
    }

    fn handler_called_once() -> Arc<dyn SuccessHandler> {
        let mut handler = MockSuccessHandler::new();
        handler.expect_on_success().times(1).return_const(());
        Arc::new(handler)
    }

    fn controller(mode: FocusPolicyMode, handler: Arc<dyn SuccessHandler>) -> FormController {
        FormController::new(FieldRegistry::signup("Required"), mode, handler)
    }

    fn focus_expecting(target: FocusTarget) -> MockFocusCapability {
        let mut focus = MockFocusCapability::new();
        focus
            .expect_focus()
            .with(eq(target))
            .times(1)
            .return_const(true);
        focus.expect_announce().return_const(());
        focus
    }

    fn focus_untouched() -> MockFocusCapability {
        let mut focus = MockFocusCapability::new();
        focus.expect_focus().never();
        focus.expect_announce().never();
        focus
    }

    fn fill(form: &mut FormController, first: &str, last: &str, password: &str) {
        form.on_field_change("firstName", first);
        form.on_field_change("lastName", last);
        form.on_field_change("password", password);
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_scenario_focuses_first_name() {
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            fill(&mut form, "", "Doe", "ferrari");
            let mut focus = focus_expecting(FocusTarget::Field("firstName".to_string()));

            let outcome = form.on_submit(&mut focus).await;

            assert_eq!(outcome, SubmitOutcome::Failed(AttemptId(1)));
            assert_eq!(form.submit_status(), SubmitStatus::Failed);
            assert_eq!(form.error_map().get("firstName"), Some("Required"));
            assert_eq!(form.error_map().get("password"), Some("I said no \"ferrari\""));
            assert_eq!(form.error_map().len(), 2);
        }

        #[tokio::test]
        async fn test_focus_skips_valid_leading_fields() {
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            fill(&mut form, "Jane", "", "");
            let mut focus = focus_expecting(FocusTarget::Field("lastName".to_string()));
            form.on_submit(&mut focus).await;
        }

        #[tokio::test]
        async fn test_summary_mode_focuses_landmark_and_announces() {
            let mut form = controller(FocusPolicyMode::ErrorSummaryLandmark, handler_never_called());
            let mut focus = MockFocusCapability::new();
            focus
                .expect_announce()
                .withf(|a| a.message.starts_with("There are errors to address:"))
                .times(1)
                .return_const(());
            focus
                .expect_focus()
                .with(eq(FocusTarget::Landmark(ERROR_SUMMARY_ID.to_string())))
                .times(1)
                .return_const(true);

            form.on_submit(&mut focus).await;
            assert_eq!(form.error_summary().len(), 3);
        }

        #[tokio::test]
        async fn test_manual_mode_leaves_focus_alone() {
            let mut form = controller(FocusPolicyMode::Manual, handler_never_called());
            let mut focus = focus_untouched();
            let outcome = form.on_submit(&mut focus).await;
            assert_eq!(outcome, SubmitOutcome::Failed(AttemptId(1)));
        }

        #[tokio::test]
        async fn test_success_calls_handler_with_values() {
            let mut handler = MockSuccessHandler::new();
            handler
                .expect_on_success()
                .with(eq(SubmittedValues(vec![
                    ("firstName".to_string(), "Jane".to_string()),
                    ("lastName".to_string(), "Doe".to_string()),
                    ("password".to_string(), "secret".to_string()),
                ])))
                .times(1)
                .return_const(());
            let mut form = controller(FocusPolicyMode::FirstInvalidField, Arc::new(handler));
            fill(&mut form, "Jane", "Doe", "secret");
            let mut focus = focus_untouched();

            let outcome = form.on_submit(&mut focus).await;
            assert_eq!(outcome, SubmitOutcome::Succeeded(AttemptId(1)));
            assert_eq!(form.submit_status(), SubmitStatus::Succeeded);
            assert!(form.error_map().is_empty());
        }

        #[tokio::test]
        async fn test_fire_and_forget_reports_success_immediately() {
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_called_once())
                .with_dispatch(SuccessDispatch::FireAndForget);
            fill(&mut form, "Jane", "Doe", "secret");
            let outcome = form.on_submit(&mut focus_untouched()).await;
            assert_eq!(outcome, SubmitOutcome::Succeeded(AttemptId(1)));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        #[tokio::test]
        async fn test_missing_focus_target_is_not_fatal() {
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            let mut focus = MockFocusCapability::new();
            focus.expect_focus().times(1).return_const(false);
            let outcome = form.on_submit(&mut focus).await;
            assert_eq!(outcome, SubmitOutcome::Failed(AttemptId(1)));
        }

        #[test]
        fn test_blocking_submit_with_tokio_test() {
            let mut form = controller(FocusPolicyMode::Manual, handler_called_once());
            fill(&mut form, "Jane", "Doe", "x");
            let outcome = tokio_test::block_on(form.on_submit(&mut focus_untouched()));
            assert_eq!(outcome, SubmitOutcome::Succeeded(AttemptId(1)));
        }
    }

    mod delayed_focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_plan_is_deferred_then_applied() {
            let (scheduler, mut rx) = FocusScheduler::channel(Duration::from_millis(10));
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called())
                .with_scheduler(scheduler);

            form.on_submit(&mut focus_untouched()).await;
            let plan = rx.recv().await.unwrap();

            let mut focus = focus_expecting(FocusTarget::Field("firstName".to_string()));
            assert!(form.apply_scheduled_focus(&plan, &mut focus));
        }

        #[tokio::test]
        async fn test_plan_dropped_after_successful_resubmit() {
            let (scheduler, mut rx) = FocusScheduler::channel(Duration::from_millis(10));
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_called_once())
                .with_scheduler(scheduler);

            form.on_submit(&mut focus_untouched()).await;
            fill(&mut form, "Jane", "Doe", "secret");
            form.on_submit(&mut focus_untouched()).await;

            let plan = rx.recv().await.unwrap();
            assert_eq!(plan.attempt, AttemptId(1));
            assert!(!form.apply_scheduled_focus(&plan, &mut focus_untouched()));
        }

        #[tokio::test]
        async fn test_plan_dropped_after_failed_resubmit() {
            let (scheduler, mut rx) = FocusScheduler::channel(Duration::from_millis(10));
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called())
                .with_scheduler(scheduler);

            form.on_submit(&mut focus_untouched()).await;
            form.on_field_change("firstName", "Jane");
            form.on_submit(&mut focus_untouched()).await;

            let first = rx.recv().await.unwrap();
            let second = rx.recv().await.unwrap();
            let (stale, current) = if first.attempt < second.attempt {
                (first, second)
            } else {
                (second, first)
            };

            assert!(!form.apply_scheduled_focus(&stale, &mut focus_untouched()));
            let mut focus = focus_expecting(FocusTarget::Field("lastName".to_string()));
            assert!(form.apply_scheduled_focus(&current, &mut focus));
        }

        #[tokio::test]
        async fn test_zero_delay_scheduler_applies_now() {
            let (scheduler, mut rx) = FocusScheduler::channel(Duration::ZERO);
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called())
                .with_scheduler(scheduler);
            let mut focus = focus_expecting(FocusTarget::Field("firstName".to_string()));
            form.on_submit(&mut focus).await;
            assert!(rx.try_recv().is_err());
        }
    }

    mod view {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_stale_error_hidden_after_edit() {
            let mut form = controller(FocusPolicyMode::Manual, handler_never_called());
            fill(&mut form, "Jane", "Doe", "ferrari");
            form.on_submit(&mut focus_untouched()).await;
            let password = |f: &FormController| {
                f.view()
                    .fields
                    .into_iter()
                    .find(|v| v.name == "password")
                    .unwrap()
            };
            assert_eq!(password(&form).error.as_deref(), Some("I said no \"ferrari\""));

            form.on_field_change("password", "Ferrari ");
            assert_eq!(password(&form).error, None);

            form.on_field_blur("password");
            assert_eq!(password(&form).error.as_deref(), Some("I said no \"ferrari\""));
        }

        #[tokio::test]
        async fn test_submit_disable_flag() {
            let mut form = controller(FocusPolicyMode::Manual, handler_never_called());
            assert!(!form.view().submit_aria_disabled);
            form.on_submit(&mut focus_untouched()).await;
            assert!(form.view().submit_aria_disabled);
            form.on_field_change("firstName", "Jane");
            assert!(!form.view().submit_aria_disabled);
        }

        #[tokio::test]
        async fn test_skip_link_points_at_first_shown_error() {
            let mut form = controller(FocusPolicyMode::ErrorSummaryLandmark, handler_never_called());
            let mut focus = MockFocusCapability::new();
            focus.expect_focus().return_const(true);
            focus.expect_announce().return_const(());
            form.on_submit(&mut focus).await;
            assert_eq!(form.view().skip_to_first_error.as_deref(), Some("firstName"));

            form.on_field_change("firstName", "x");
            assert_eq!(form.view().skip_to_first_error.as_deref(), Some("lastName"));
        }

        #[tokio::test]
        async fn test_skip_link_suppressed_in_manual_mode() {
            let mut form = controller(FocusPolicyMode::Manual, handler_never_called());
            form.on_submit(&mut focus_untouched()).await;
            assert!(form.view().skip_to_first_error.is_none());
        }

        #[test]
        fn test_initial_view() {
            let form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            let view = form.view();
            assert_eq!(view.status, SubmitStatus::Idle);
            assert_eq!(view.fields.len(), 3);
            assert!(view.error_summary.is_empty());
            assert!(view.fields.iter().all(|f| f.error.is_none() && !f.touched));
        }

        #[test]
        fn test_aria_without_error() {
            let form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            let aria = form.aria_attributes_for("password").unwrap();
            assert_eq!(
                aria,
                AriaAttributes {
                    input_id: "form-field-password".to_string(),
                    invalid: false,
                    required: true,
                    error_id: None,
                    instruction_id: Some("form-field-instruction-password".to_string()),
                    described_by: Some("form-field-instruction-password".to_string()),
                    autocomplete: Some("new-password"),
                }
            );
        }

        #[test]
        fn test_aria_with_shown_error() {
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            form.on_field_blur("password");
            let aria = form.aria_attributes_for("password").unwrap();
            assert!(aria.invalid);
            assert_eq!(aria.error_id.as_deref(), Some("form-field-error-password"));
            assert_eq!(
                aria.described_by.as_deref(),
                Some("form-field-error-password form-field-instruction-password")
            );
        }

        #[test]
        fn test_aria_for_field_without_instruction() {
            let form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            let aria = form.aria_attributes_for("lastName").unwrap();
            assert!(aria.described_by.is_none());
            assert_eq!(aria.autocomplete, Some("family-name"));
        }

        #[test]
        fn test_unknown_field_is_ignored() {
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            form.on_field_change("email", "x");
            form.on_field_blur("email");
            assert!(form.aria_attributes_for("email").is_none());
            assert!(!form.is_field_touched("email"));
            assert_eq!(form.submit_status(), SubmitStatus::Idle);
        }

        #[test]
        fn test_touched_after_blur() {
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called());
            assert!(!form.is_field_touched("firstName"));
            form.on_field_blur("firstName");
            assert!(form.is_field_touched("firstName"));
        }

        #[tokio::test]
        async fn test_reset_remounts() {
            let mut form = controller(FocusPolicyMode::Manual, handler_never_called());
            form.on_field_change("firstName", "Jane");
            form.on_submit(&mut focus_untouched()).await;
            form.reset();
            assert_eq!(form.submit_status(), SubmitStatus::Idle);
            assert_eq!(form.value("firstName"), Some(""));
            assert!(form.error_map().is_empty());
        }

        #[tokio::test]
        async fn test_plan_from_before_reset_stays_stale() {
            let (scheduler, mut rx) = FocusScheduler::channel(Duration::from_millis(10));
            let mut form = controller(FocusPolicyMode::FirstInvalidField, handler_never_called())
                .with_scheduler(scheduler);

            form.on_submit(&mut focus_untouched()).await;
            let stale = rx.recv().await.unwrap();
            form.reset();
            assert_eq!(form.submit_status(), SubmitStatus::Idle);

            form.on_submit(&mut focus_untouched()).await;
            assert_eq!(form.submit_status(), SubmitStatus::Failed);
            assert!(!form.is_plan_current(&stale));
            assert!(!form.apply_scheduled_focus(&stale, &mut focus_untouched()));

            let fresh = rx.recv().await.unwrap();
            assert!(form.is_plan_current(&fresh));
        }
    }
}
