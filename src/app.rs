//! Application state and core logic
//!
//! `App` is the adapter between terminal events and the form domain: it
//! owns the wizard state, persists a snapshot after every mutation and
//! navigation, and drives the submission flow.

use crate::config::AppConfig;
use crate::form::{serialize_form, FieldKind, WizardState};
use crate::store::SnapshotStore;
use crate::submit::{HttpSubmitClient, SubmitClient, SubmitState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Wizard form state
    pub wizard: WizardState,
    /// State of the submit control
    pub submit_state: SubmitState,
    store: Option<SnapshotStore>,
    client: Box<dyn SubmitClient>,
    /// Cursor over the options of the focused choice field
    option_cursor: usize,
    quit: bool,
}

impl App {
    /// Create an App wired to the configured submission endpoint
    pub fn new(config: &AppConfig) -> Self {
        Self::with_parts(
            WizardState::default(),
            SnapshotStore::new(),
            Box::new(HttpSubmitClient::new(config.endpoint())),
        )
    }

    pub fn with_parts(
        wizard: WizardState,
        store: Option<SnapshotStore>,
        client: Box<dyn SubmitClient>,
    ) -> Self {
        Self {
            wizard,
            submit_state: SubmitState::default(),
            store,
            client,
            option_cursor: 0,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Load the persisted snapshot, if any, into the wizard
    pub fn restore(&mut self) {
        if let Some(store) = &self.store {
            if let Some(snapshot) = store.restore() {
                self.wizard.restore_from(&snapshot);
            }
        }
    }

    /// Cursor over the focused field's options, clamped into range
    pub fn option_cursor(&self) -> usize {
        let count = self
            .wizard
            .active_field()
            .map(|f| f.kind.options().len())
            .unwrap_or(0);
        if count == 0 {
            0
        } else {
            self.option_cursor.min(count - 1)
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.submit_state.is_confirmed() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.quit = true;
            }
            return Ok(());
        }
        if self.submit_state.is_submitting() {
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => {
                if self.wizard.current_step() > 0 {
                    self.wizard.retreat();
                    self.option_cursor = 0;
                    self.persist();
                } else {
                    self.quit = true;
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.wizard.next_field();
                self.option_cursor = 0;
                self.persist();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.wizard.prev_field();
                self.option_cursor = 0;
                self.persist();
            }
            KeyCode::Enter => {
                if self.wizard.progress().submit_visible {
                    // The request itself runs after the next frame, so the
                    // in-progress label is on screen while it is in flight
                    self.request_submit();
                } else if self.wizard.advance() {
                    self.option_cursor = 0;
                    self.persist();
                }
            }
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Backspace => {
                if let Some(name) = self.active_text_field() {
                    self.wizard.values.pop_char(name);
                    self.persist();
                }
            }
            KeyCode::Char(' ') => self.activate_or_type(' '),
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.type_char(c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Name of the focused field when it accepts text input
    fn active_text_field(&self) -> Option<&'static str> {
        self.wizard.active_field().and_then(|f| match f.kind {
            FieldKind::Text { .. } => Some(f.name),
            _ => None,
        })
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self
            .wizard
            .active_field()
            .map(|f| f.kind.options().len())
            .unwrap_or(0);
        if count == 0 {
            return;
        }
        let current = self.option_cursor() as isize;
        let next = (current + delta).rem_euclid(count as isize);
        self.option_cursor = next as usize;
    }

    /// Space toggles choice fields and types into text fields
    fn activate_or_type(&mut self, c: char) {
        let Some(field) = self.wizard.active_field() else {
            return;
        };
        let name = field.name;
        match field.kind.clone() {
            FieldKind::Text { .. } => {
                self.wizard.values.push_char(name, c);
                self.persist();
            }
            FieldKind::Checkbox => {
                self.wizard.values.toggle_checked(name);
                self.persist();
            }
            FieldKind::Radio { options } => {
                if let Some(option) = options.get(self.option_cursor()) {
                    self.wizard.values.select(name, option.value);
                    self.persist();
                }
            }
            FieldKind::CheckboxGroup { options } => {
                if let Some(option) = options.get(self.option_cursor()) {
                    self.wizard.values.toggle_option(name, option.value);
                    self.persist();
                }
            }
        }
    }

    fn type_char(&mut self, c: char) {
        if let Some(name) = self.active_text_field() {
            self.wizard.values.push_char(name, c);
            self.persist();
        }
    }

    /// Write the snapshot; persistence problems are logged, never fatal
    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.wizard.snapshot()) {
                tracing::warn!("could not save application state: {err}");
            }
        }
    }

    /// Run the submission flow end to end: full-form validation, then one
    /// request. The event loop calls [`request_submit`](Self::request_submit)
    /// and [`complete_submit`](Self::complete_submit) separately so a frame
    /// with the in-progress label renders before the request is awaited.
    pub async fn submit(&mut self) {
        self.request_submit();
        self.complete_submit().await;
    }

    /// Validate the whole form and enter the submitting state. The submit
    /// control stays disabled until the pending request resolves, so a
    /// second submission cannot start while one is in flight.
    pub fn request_submit(&mut self) {
        if self.submit_state.is_submitting() {
            return;
        }
        if self.wizard.validate_full().is_some() {
            // Jumped to the first invalid step; keep the snapshot current
            self.persist();
            return;
        }
        self.submit_state = SubmitState::Submitting;
    }

    /// Perform the request entered by [`request_submit`](Self::request_submit);
    /// a no-op unless a submission is pending.
    pub async fn complete_submit(&mut self) {
        if !self.submit_state.is_submitting() {
            return;
        }
        let payload = serialize_form(self.wizard.spec(), &self.wizard.values);
        match self.client.submit_application(payload).await {
            Ok(()) => {
                if let Some(store) = &self.store {
                    if let Err(err) = store.clear() {
                        tracing::warn!("could not clear saved application state: {err}");
                    }
                }
                self.submit_state = SubmitState::Confirmed;
            }
            Err(err) => {
                tracing::warn!("submission failed: {err}");
                self.submit_state = SubmitState::Failed(err.to_string());
            }
        }
    }
}
