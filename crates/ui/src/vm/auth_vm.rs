use services::{AuthError, GatewayError, SignUpForm, SignUpOutcome};

use crate::views::ViewError;

pub const CONFIRM_EMAIL_NOTICE: &str =
    "Registration successful! Check your email to confirm your account, then sign in.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Create account",
        }
    }

    #[must_use]
    pub fn switch_prompt(self) -> &'static str {
        match self {
            AuthMode::Login => "Don't have an account? Register",
            AuthMode::Register => "Already have an account? Sign in",
        }
    }
}

/// Request the form wants sent once local checks pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthSubmission {
    SignIn { email: String, password: String },
    SignUp(SignUpForm),
}

/// Outcome of a finished request, as the form should present it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStep {
    SignedIn,
    AwaitingConfirmation,
}

/// Login/register form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFormVm {
    mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    error: Option<String>,
    notice: Option<String>,
    busy: bool,
}

impl AuthFormVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.confirm_password.clear();
        self.error = None;
        self.notice = None;
    }

    /// Run the local checks and, when they pass, mark the form busy and
    /// return the request to send. Failures are stored inline.
    pub fn submit(&mut self) -> Option<AuthSubmission> {
        if self.busy {
            return None;
        }
        let submission = match self.mode {
            AuthMode::Login => {
                if let Err(err) = check_login(&self.email, &self.password) {
                    self.error = Some(err.to_string());
                    return None;
                }
                AuthSubmission::SignIn {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                }
            }
            AuthMode::Register => {
                let form = SignUpForm {
                    email: self.email.clone(),
                    password: self.password.clone(),
                    confirm_password: self.confirm_password.clone(),
                };
                if let Err(err) = form.validate() {
                    self.error = Some(err.to_string());
                    return None;
                }
                AuthSubmission::SignUp(form)
            }
        };
        self.error = None;
        self.notice = None;
        self.busy = true;
        Some(submission)
    }

    pub fn finish_sign_up(&mut self, outcome: &SignUpOutcome) -> AuthStep {
        self.busy = false;
        match outcome {
            SignUpOutcome::SignedIn(_) => {
                self.clear_secrets();
                AuthStep::SignedIn
            }
            SignUpOutcome::ConfirmationRequired => {
                self.mode = AuthMode::Login;
                self.clear_secrets();
                self.notice = Some(CONFIRM_EMAIL_NOTICE.to_string());
                AuthStep::AwaitingConfirmation
            }
        }
    }

    pub fn finish_sign_in(&mut self) -> AuthStep {
        self.busy = false;
        self.clear_secrets();
        AuthStep::SignedIn
    }

    pub fn fail(&mut self, err: &AuthError) {
        self.busy = false;
        self.error = Some(error_message(err));
    }

    fn clear_secrets(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }
}

fn check_login(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    Ok(())
}

/// Backend rejections carry a readable reason; everything else gets the
/// generic message.
fn error_message(err: &AuthError) -> String {
    match err {
        AuthError::EmptyEmail | AuthError::EmptyPassword | AuthError::PasswordMismatch => {
            err.to_string()
        }
        AuthError::Gateway(GatewayError::Validation(reason)) => reason.clone(),
        _ => ViewError::message().to_string(),
    }
}
