//! Top-level application state.
//!
//! The app tracks which screen is active and routes key events to it. Screen
//! choice follows the session channel published by the service client: any
//! transition to a signed-in session opens the dashboard, any transition to
//! signed-out falls back to the auth screen. Sign-in, token refresh and
//! sign-out all funnel through that one subscription.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasksense_client::classify::TaskClassifier;
use tasksense_client::{ServiceClient, SignUpOutcome};
use tasksense_shared::models::user::{Session, User};
use tokio::sync::watch;

use crate::auth::{AuthForm, AuthMode};
use crate::dashboard::Dashboard;
use crate::form::FormField;
use crate::notify::Notices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Shown until the persisted session has been restored or rejected.
    Loading,
    Auth,
    Dashboard,
}

pub struct App {
    client: Arc<ServiceClient>,
    classifier: Arc<dyn TaskClassifier>,
    session_rx: watch::Receiver<Option<Session>>,
    pub screen: Screen,
    pub auth: AuthForm,
    pub dashboard: Option<Dashboard>,
    pub notices: Notices,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: Arc<ServiceClient>, classifier: Arc<dyn TaskClassifier>) -> Self {
        let session_rx = client.subscribe_session();
        App {
            client,
            classifier,
            session_rx,
            screen: Screen::Loading,
            auth: AuthForm::default(),
            dashboard: None,
            notices: Notices::default(),
            should_quit: false,
        }
    }

    /// Restores a persisted session and picks the initial screen. Called
    /// once, after the loading screen has been drawn.
    pub async fn bootstrap(&mut self) {
        if self.screen != Screen::Loading {
            return;
        }
        match self.client.restore_session().await {
            Some(session) => self.enter_dashboard(session.user).await,
            None => self.screen = Screen::Auth,
        }
    }

    /// Per-frame housekeeping: expires notices and reacts to session
    /// changes.
    pub async fn on_tick(&mut self) {
        self.notices.expire();
        self.sync_session().await;
    }

    async fn sync_session(&mut self) {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return;
        }
        let session = self.session_rx.borrow_and_update().clone();
        match session {
            Some(session) if self.screen == Screen::Auth => {
                self.enter_dashboard(session.user).await;
            }
            None if self.screen == Screen::Dashboard => {
                self.dashboard = None;
                self.auth = AuthForm::default();
                self.screen = Screen::Auth;
            }
            _ => {}
        }
    }

    async fn enter_dashboard(&mut self, user: User) {
        let mut dashboard = Dashboard::new(self.client.clone(), self.classifier.clone(), user);
        if let Err(err) = dashboard.refresh().await {
            self.notices.error(err.to_string());
        }
        self.dashboard = Some(dashboard);
        self.screen = Screen::Dashboard;
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Loading => {}
            Screen::Auth => self.handle_auth_key(key).await,
            Screen::Dashboard => self.handle_dashboard_key(key).await,
        }
    }

    async fn handle_auth_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('r') = key.code {
                self.auth.toggle_mode();
            }
            return;
        }
        match key.code {
            // Esc backs out of sign-up first, then quits.
            KeyCode::Esc => {
                if self.auth.mode == AuthMode::SignUp {
                    self.auth.toggle_mode();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.auth.toggle_focus();
            }
            KeyCode::Enter => self.submit_auth().await,
            KeyCode::Backspace => self.auth.pop_char(),
            KeyCode::Char(c) => self.auth.push_char(c),
            _ => {}
        }
    }

    async fn submit_auth(&mut self) {
        if self.auth.submitting {
            return;
        }
        if let Err(message) = self.auth.validate() {
            self.notices.error(message);
            return;
        }
        let email = self.auth.email_input();
        let password = self.auth.password.clone();
        self.auth.submitting = true;
        let result = match self.auth.mode {
            AuthMode::SignIn => self
                .client
                .sign_in(&email, &password)
                .await
                .map(|_| "Welcome back!"),
            AuthMode::SignUp => {
                self.client
                    .sign_up(&email, &password)
                    .await
                    .map(|outcome| match outcome {
                        SignUpOutcome::SessionEstablished(_) => "Account created!",
                        SignUpOutcome::ConfirmationRequired(_) => {
                            "Check your email to confirm your account, then sign in."
                        }
                    })
            }
        };
        self.auth.submitting = false;
        match result {
            Ok(message) => {
                self.auth.password.clear();
                self.notices.info(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, "auth submission failed");
                self.notices.error(err.to_string());
            }
        }
    }

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        let dashboard = match self.dashboard.as_mut() {
            Some(dashboard) => dashboard,
            None => return,
        };
        if dashboard.form.is_some() {
            self.handle_form_key(key).await;
            return;
        }
        if dashboard.search_active {
            match key.code {
                KeyCode::Esc => dashboard.clear_search(),
                KeyCode::Enter => dashboard.end_search(),
                KeyCode::Backspace => dashboard.pop_search_char(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    dashboard.push_search_char(c);
                }
                _ => {}
            }
            return;
        }
        if dashboard.is_busy() {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.notices.dismiss(),
            KeyCode::Up | KeyCode::Char('k') => dashboard.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => dashboard.select_next(),
            KeyCode::Char('/') => dashboard.begin_search(),
            KeyCode::Char('f') => dashboard.cycle_status_filter(),
            KeyCode::Char('n') => dashboard.open_new_form(),
            KeyCode::Char('e') => dashboard.open_edit_form(),
            KeyCode::Char('i') => dashboard.reroll_quote(),
            KeyCode::Char('r') => self.refresh_dashboard().await,
            KeyCode::Char('s') => self.cycle_selected_status().await,
            KeyCode::Char('d') => self.delete_selected().await,
            KeyCode::Char('o') => self.sign_out().await,
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        let dashboard = match self.dashboard.as_mut() {
            Some(dashboard) => dashboard,
            None => return,
        };
        if dashboard.is_busy() {
            return;
        }
        match key.code {
            KeyCode::Esc => {
                dashboard.close_form();
                return;
            }
            KeyCode::Enter => {
                self.submit_form().await;
                return;
            }
            _ => {}
        }
        let form = match dashboard.form.as_mut() {
            Some(form) => form,
            None => return,
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Left | KeyCode::Right if form.focus == FormField::Status => {
                form.cycle_status();
            }
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.push_char(c);
            }
            _ => {}
        }
    }

    async fn submit_form(&mut self) {
        let parsed = self
            .dashboard
            .as_ref()
            .and_then(|dashboard| dashboard.form.as_ref())
            .map(|form| (form.to_draft(), form.editing.clone()));
        let (draft, editing) = match parsed {
            Some((Ok(draft), editing)) => (draft, editing),
            Some((Err(message), _)) => {
                self.notices.error(message);
                return;
            }
            None => return,
        };
        let dashboard = match self.dashboard.as_mut() {
            Some(dashboard) => dashboard,
            None => return,
        };
        let result = match &editing {
            Some(task) => dashboard.update_task(task, draft).await,
            None => dashboard.create_task(draft).await,
        };
        match result {
            Ok(()) => {
                let message = if editing.is_some() {
                    "Task updated"
                } else {
                    "Task created"
                };
                self.notices.info(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, "task submission failed");
                self.notices.error(err.to_string());
            }
        }
    }

    async fn refresh_dashboard(&mut self) {
        let result = match self.dashboard.as_mut() {
            Some(dashboard) => dashboard.refresh().await,
            None => return,
        };
        if let Err(err) = result {
            self.notices.error(err.to_string());
        }
    }

    async fn cycle_selected_status(&mut self) {
        let result = match self.dashboard.as_mut() {
            Some(dashboard) => dashboard.cycle_selected_status().await,
            None => return,
        };
        if let Err(err) = result {
            self.notices.error(err.to_string());
        }
    }

    async fn delete_selected(&mut self) {
        let had_selection = self
            .dashboard
            .as_ref()
            .is_some_and(|dashboard| dashboard.selected_task().is_some());
        let result = match self.dashboard.as_mut() {
            Some(dashboard) => dashboard.delete_selected().await,
            None => return,
        };
        match result {
            Ok(()) if had_selection => self.notices.info("Task deleted"),
            Ok(()) => {}
            Err(err) => self.notices.error(err.to_string()),
        }
    }

    async fn sign_out(&mut self) {
        // The session channel flips the screen once the tokens are cleared.
        if let Err(err) = self.client.sign_out().await {
            self.notices.error(err.to_string());
        }
    }
}
