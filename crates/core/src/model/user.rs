use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Identity returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }

    /// Single uppercase letter for avatar badges (`U` when no email is known).
    #[must_use]
    pub fn initial(&self) -> char {
        self.email
            .as_deref()
            .and_then(|email| email.chars().next())
            .map_or('U', |ch| ch.to_ascii_uppercase())
    }

    /// Local part of the email, used as a short display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|name| !name.is_empty())
            .unwrap_or("user")
    }
}

/// Signed-in session: the user plus bearer credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}
