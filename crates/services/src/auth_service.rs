use std::sync::Arc;

use quiz_core::model::{AuthSession, User};

use crate::error::AuthError;
use crate::gateway::{RemoteGateway, SignUpOutcome};
use crate::progress::ProgressService;

/// Registration input as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Checks that run before any request is issued.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyEmail`, `AuthError::EmptyPassword`, or
    /// `AuthError::PasswordMismatch`.
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_credentials(&self.email, &self.password)?;
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    Ok(())
}

/// Session lifecycle: sign-up, sign-in, sign-out, restore.
///
/// Every transition into a signed-in state runs progress reconciliation once.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn RemoteGateway>,
    progress: Arc<ProgressService>,
}

impl AuthService {
    #[must_use]
    pub fn new(gateway: Arc<dyn RemoteGateway>, progress: Arc<ProgressService>) -> Self {
        Self { gateway, progress }
    }

    /// # Errors
    ///
    /// Returns a validation error before any request, `AuthError::Gateway`
    /// when the backend rejects the credentials, or `AuthError::Progress`
    /// when reconciliation fails after a successful sign-in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        validate_credentials(email, password)?;
        let session = self.gateway.sign_in(email.trim(), password).await?;
        self.adopt(&session).await?;
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns a validation error (including password mismatch) before any
    /// request, or the gateway/progress failure that followed.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<SignUpOutcome, AuthError> {
        form.validate()?;
        let outcome = self
            .gateway
            .sign_up(form.email.trim(), &form.password)
            .await?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.adopt(session).await?;
        }
        Ok(outcome)
    }

    /// Reconcile progress for a fresh session. On failure the remote session
    /// is dropped again, so no signed-in state exists without a merge.
    async fn adopt(&self, session: &AuthSession) -> Result<(), AuthError> {
        let Err(err) = self.progress.reconcile_on_sign_in(&session.user).await else {
            return Ok(());
        };
        tracing::warn!(user = %session.user.id, error = %err, "reconcile failed; signing out");
        if let Err(rollback) = self.gateway.sign_out().await {
            tracing::warn!(error = %rollback, "sign-out after failed reconcile failed");
        }
        Err(err.into())
    }

    /// Sign out remotely and hand progress back to local persistence.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Gateway` if the backend rejects the sign-out; the
    /// local switch happens regardless.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let result = self.gateway.sign_out().await;
        self.progress.on_sign_out().await;
        result.map_err(AuthError::from)
    }

    /// Resolve the current session on startup and load the matching progress.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Gateway` or `AuthError::Progress` on remote failure.
    pub async fn restore(&self) -> Result<Option<User>, AuthError> {
        let user = self.gateway.current_user().await?;
        self.progress.load_for(user.as_ref()).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::gateway::InMemoryGateway;
    use crate::progress::Authority;
    use async_trait::async_trait;
    use quiz_core::model::{Day, DayStatus, ProgressMap, Question, UserId};
    use storage::{InMemoryRepository, LocalPersistence};

    fn service(gateway: &InMemoryGateway) -> (AuthService, Arc<ProgressService>) {
        let local = LocalPersistence::new(Arc::new(InMemoryRepository::new()), "default");
        let progress = Arc::new(ProgressService::new(Arc::new(gateway.clone()), local));
        (
            AuthService::new(Arc::new(gateway.clone()), Arc::clone(&progress)),
            progress,
        )
    }

    fn form(password: &str, confirm: &str) -> SignUpForm {
        SignUpForm {
            email: "alice@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn form_validation_order() {
        let mut blank = form("secret1", "secret1");
        blank.email = "  ".into();
        assert!(matches!(blank.validate(), Err(AuthError::EmptyEmail)));
        assert!(matches!(form("", "").validate(), Err(AuthError::EmptyPassword)));
        assert!(matches!(
            form("secret1", "secret2").validate(),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(form("secret1", "secret1").validate().is_ok());
    }

    #[tokio::test]
    async fn mismatch_never_reaches_backend() {
        let gateway = InMemoryGateway::new();
        gateway.set_offline(true);
        let (auth, _) = service(&gateway);

        let err = auth.sign_up(&form("secret1", "secret2")).await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[tokio::test]
    async fn sign_up_with_session_reconciles() {
        let gateway = InMemoryGateway::new();
        let (auth, progress) = service(&gateway);
        progress.load_for(None).await.unwrap();
        progress.record(Day::new(5), DayStatus::Correct).await.unwrap();

        let outcome = auth.sign_up(&form("secret1", "secret1")).await.unwrap();
        let SignUpOutcome::SignedIn(session) = outcome else {
            panic!("expected a session");
        };

        assert_eq!(progress.authority(), Authority::Remote(session.user.id.clone()));
        let remote = gateway.stored_progress(&session.user.id).unwrap();
        assert_eq!(remote.get(Day::new(5)), Some(DayStatus::Correct));
    }

    #[tokio::test]
    async fn sign_up_pending_confirmation_keeps_local() {
        let gateway = InMemoryGateway::new();
        gateway.set_require_confirmation(true);
        let (auth, progress) = service(&gateway);

        let outcome = auth.sign_up(&form("secret1", "secret1")).await.unwrap();
        assert_eq!(outcome, SignUpOutcome::ConfirmationRequired);
        assert_eq!(progress.authority(), Authority::Local);
        assert_eq!(gateway.progress_writes(), 0);
    }

    #[tokio::test]
    async fn bad_credentials_surface_gateway_error() {
        let gateway = InMemoryGateway::new();
        let (auth, _) = service(&gateway);
        let err = auth.sign_in("nobody@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::Gateway(GatewayError::Validation(_))));
    }

    /// Delegates to an `InMemoryGateway` but cannot read progress.
    struct ProgressReadsFail(InMemoryGateway);

    #[async_trait]
    impl RemoteGateway for ProgressReadsFail {
        async fn sign_up(
            &self,
            email: &str,
            password: &str,
        ) -> Result<SignUpOutcome, GatewayError> {
            self.0.sign_up(email, password).await
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, GatewayError> {
            self.0.sign_in(email, password).await
        }

        async fn sign_out(&self) -> Result<(), GatewayError> {
            self.0.sign_out().await
        }

        async fn current_user(&self) -> Result<Option<User>, GatewayError> {
            self.0.current_user().await
        }

        async fn all_questions(&self) -> Result<Vec<Question>, GatewayError> {
            self.0.all_questions().await
        }

        async fn progress(&self, _user_id: &UserId) -> Result<ProgressMap, GatewayError> {
            Err(GatewayError::Network("progress table unreachable".into()))
        }

        async fn save_progress(
            &self,
            user_id: &UserId,
            progress: &ProgressMap,
        ) -> Result<(), GatewayError> {
            self.0.save_progress(user_id, progress).await
        }
    }

    #[tokio::test]
    async fn failed_reconcile_rolls_back_session() {
        let inner = InMemoryGateway::new();
        let gateway: Arc<dyn RemoteGateway> = Arc::new(ProgressReadsFail(inner.clone()));
        let local = LocalPersistence::new(Arc::new(InMemoryRepository::new()), "default");
        let progress = Arc::new(ProgressService::new(Arc::clone(&gateway), local));
        let auth = AuthService::new(Arc::clone(&gateway), Arc::clone(&progress));

        inner.sign_up("alice@example.com", "secret1").await.unwrap();
        inner.sign_out().await.unwrap();
        progress.load_for(None).await.unwrap();
        progress.record(Day::new(1), DayStatus::Correct).await.unwrap();

        let err = auth.sign_in("alice@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, AuthError::Progress(_)));
        assert_eq!(gateway.current_user().await.unwrap(), None);

        assert_eq!(auth.restore().await.unwrap(), None);
        assert_eq!(progress.authority(), Authority::Local);
        assert_eq!(progress.snapshot().get(Day::new(1)), Some(DayStatus::Correct));
    }

    #[tokio::test]
    async fn restore_and_sign_out() {
        let gateway = InMemoryGateway::new();
        let (auth, progress) = service(&gateway);
        assert_eq!(auth.restore().await.unwrap(), None);

        auth.sign_up(&form("secret1", "secret1")).await.unwrap();
        let user = auth.restore().await.unwrap().unwrap();
        assert_eq!(progress.authority(), Authority::Remote(user.id));

        auth.sign_out().await.unwrap();
        assert_eq!(auth.restore().await.unwrap(), None);
        assert_eq!(progress.authority(), Authority::Local);
    }
}
