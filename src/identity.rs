//! Who is calling.
//!
//! Authentication itself happens elsewhere; the workflow only needs to know
//! whether a session exists and whose it is.

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{Config, SecureString};

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub access_token: Option<SecureString>,
}

impl Session {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
            access_token: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Source of the current session. Mutations are refused when it yields none.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn session(&self) -> Option<Session>;
}

/// Identity fixed at startup, from configuration or a test.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    session: Option<Session>,
}

impl StaticIdentity {
    pub fn signed_in(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn anonymous() -> Self {
        Self { session: None }
    }

    pub fn from_config(config: &Config) -> Self {
        let session = config.session.as_ref().map(|s| Session {
            user_id: s.user_id,
            email: s.email.clone(),
            access_token: s.access_token(),
        });
        Self { session }
    }

    /// The session without going through the async provider interface.
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn session(&self) -> Option<Session> {
        self.session.clone()
    }
}
