//! Sign-in / sign-up form state.
//!
//! Password rules are left to the service; the form only requires that a
//! password was typed at all.

use validator::ValidateEmail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// Credential form shown on the auth screen.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    /// Set while a sign-in or sign-up request is in flight.
    pub submitting: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        AuthForm {
            mode: AuthMode::SignIn,
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            submitting: false,
        }
    }
}

impl AuthForm {
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            AuthField::Email => self.email.push(c),
            AuthField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            AuthField::Email => {
                self.email.pop();
            }
            AuthField::Password => {
                self.password.pop();
            }
        }
    }

    /// Trimmed email as it will be submitted.
    pub fn email_input(&self) -> String {
        self.email.trim().to_string()
    }

    /// Checks the credentials before a request is made.
    ///
    /// Returns a user-facing message on invalid input.
    pub fn validate(&self) -> Result<(), String> {
        let email = self.email_input();
        if !email.validate_email() {
            return Err("Enter a valid email address".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }
}
