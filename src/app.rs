//! Application state and core logic

use crate::config::FormConfig;
use crate::state::forms::{
    FieldRegistry, FocusPlan, FocusScheduler, FormController, SubmitOutcome, SubmittedValues,
    SuccessHandler,
};
use crate::state::{AppFocus, AppState, FocusSlot, FormVariant};
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Confirmation shown after a successful submission
pub const SUCCESS_MESSAGE: &str =
    "Form submitted successfully! Don't forget to set focus when you move to the next step.";

/// Success handler that hands submitted values back to the event loop
struct ChannelSuccessHandler {
    tx: UnboundedSender<SubmittedValues>,
}

#[async_trait]
impl SuccessHandler for ChannelSuccessHandler {
    async fn on_success(&self, values: SubmittedValues) {
        if self.tx.send(values).is_err() {
            tracing::debug!("success receiver closed");
        }
    }
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form engine for the current variant
    pub controller: FormController,
    config: FormConfig,
    scheduler: FocusScheduler,
    focus_rx: UnboundedReceiver<FocusPlan>,
    success_tx: UnboundedSender<SubmittedValues>,
    success_rx: UnboundedReceiver<SubmittedValues>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: FormConfig) -> Self {
        let (scheduler, focus_rx) = FocusScheduler::channel(config.focus_delay());
        let (success_tx, success_rx) = mpsc::unbounded_channel();

        let controller = Self::build_controller(&config, config.variant, &scheduler, &success_tx);
        let state = AppState::new(config.variant, Self::field_order(&controller));

        Self {
            state,
            controller,
            config,
            scheduler,
            focus_rx,
            success_tx,
            success_rx,
            quit: false,
        }
    }

    fn build_controller(
        config: &FormConfig,
        variant: FormVariant,
        scheduler: &FocusScheduler,
        success_tx: &UnboundedSender<SubmittedValues>,
    ) -> FormController {
        let handler = Arc::new(ChannelSuccessHandler {
            tx: success_tx.clone(),
        });
        FormController::new(
            FieldRegistry::signup(&config.required_message),
            variant.policy_mode(),
            handler,
        )
        .with_scheduler(scheduler.clone())
        .with_dispatch(config.success_dispatch)
    }

    fn field_order(controller: &FormController) -> Vec<String> {
        controller.registry().iter().map(|f| f.name.clone()).collect()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Swap to another variant. The form is remounted with fresh state.
    pub fn switch_variant(&mut self, variant: FormVariant) {
        if variant == self.state.variant {
            return;
        }
        tracing::info!(?variant, "switching form variant");
        // Plans still pending for the old form are sent into the dropped channel
        let (scheduler, focus_rx) = FocusScheduler::channel(self.config.focus_delay());
        self.scheduler = scheduler;
        self.focus_rx = focus_rx;
        self.controller =
            Self::build_controller(&self.config, variant, &self.scheduler, &self.success_tx);
        self.state = AppState::new(variant, Self::field_order(&self.controller));
    }

    /// Move focus, blurring the field that loses it
    fn move_focus(&mut self, slot: FocusSlot) {
        let previous = self.state.focus;
        self.state.focus = slot;
        self.blur_if_left(previous);
    }

    fn blur_if_left(&mut self, previous: FocusSlot) {
        if previous == self.state.focus {
            return;
        }
        if let Some(name) = previous
            .field_index()
            .and_then(|i| self.state.field_order.get(i))
            .cloned()
        {
            self.controller.on_field_blur(&name);
        }
    }

    fn summary_visible(&self) -> bool {
        self.state.variant.shows_summary()
    }

    /// Submit the form and apply any immediate focus side effect
    pub async fn submit(&mut self) {
        let previous = self.state.focus;
        self.state.announcement = None;
        self.state.status_message = None;

        let summary_visible = self.summary_visible();
        let outcome = {
            let mut focus = AppFocus::new(&mut self.state, summary_visible);
            self.controller.on_submit(&mut focus).await
        };

        if let SubmitOutcome::Failed(_) = outcome {
            self.state.status_message = Some(format!(
                "{} field(s) need attention",
                self.controller.error_map().len()
            ));
        }
        self.blur_if_left(previous);
    }

    /// Drain delayed focus plans and success notifications
    pub fn poll_background(&mut self) {
        while let Ok(plan) = self.focus_rx.try_recv() {
            let previous = self.state.focus;
            let summary_visible = self.summary_visible();
            let mut focus = AppFocus::new(&mut self.state, summary_visible);
            if self.controller.apply_scheduled_focus(&plan, &mut focus) {
                self.blur_if_left(previous);
            }
        }

        while let Ok(values) = self.success_rx.try_recv() {
            tracing::info!(fields = values.0.len(), "form submitted");
            self.state.success_message = Some(SUCCESS_MESSAGE.to_string());
        }
    }

    /// Jump to the first field with a shown error
    fn skip_to_first_error(&mut self) {
        let view = self.controller.view();
        match view
            .skip_to_first_error
            .and_then(|name| self.state.field_index(&name))
        {
            Some(index) => self.move_focus(FocusSlot::Field(index)),
            None => self.state.status_message = Some("No errors to skip to".to_string()),
        }
    }

    fn edit_focused_field(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(name) = self.state.focused_field().map(str::to_string) else {
            return;
        };
        let mut value = self.controller.value(&name).unwrap_or_default().to_string();
        edit(&mut value);
        self.controller.on_field_change(&name, &value);
    }

    /// Handle key events
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.success_message.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.success_message = None;
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let field_count = self.state.field_order.len();

        match key.code {
            KeyCode::F(n @ 1..=3) => self.switch_variant(FormVariant::ALL[n as usize - 1]),
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab => self.move_focus(self.state.focus.next(field_count)),
            KeyCode::BackTab => self.move_focus(self.state.focus.prev(field_count)),
            KeyCode::Char('s') if ctrl => self.submit().await,
            KeyCode::Char('e') if ctrl => self.skip_to_first_error(),
            KeyCode::Char('u') if ctrl => self.edit_focused_field(String::clear),
            KeyCode::Enter => self.submit().await,
            KeyCode::Char(c) if !ctrl => self.edit_focused_field(|v| v.push(c)),
            KeyCode::Backspace => self.edit_focused_field(|v| {
                v.pop();
            }),
            _ => {}
        }
        Ok(())
    }
}
