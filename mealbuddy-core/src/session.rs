//! Explicit authentication context.
//!
//! A [`Session`] is created after a successful login and handed to every
//! remote operation. Nothing in this crate reads credentials from global
//! state; an absent, invalidated or expired session aborts the operation
//! with [`ApiError::AuthRequired`] before any request is sent.

use chrono::{DateTime, Utc};

use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a session from a bearer token. Blank tokens yield an
    /// unauthenticated session.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
            expires_at: None,
        }
    }

    /// Session without a credential, e.g. when no token is configured.
    pub fn anonymous() -> Self {
        Self {
            token: None,
            expires_at: None,
        }
    }

    pub fn from_token(token: Option<String>) -> Self {
        token.map(Self::new).unwrap_or_else(Self::anonymous)
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Drops the credential (logout or server-side expiry).
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.token.is_some() && self.expires_at.map_or(true, |exp| now < exp)
    }

    /// Returns the bearer token, or `AuthRequired` if none is usable.
    pub fn bearer(&self) -> Result<&str, ApiError> {
        match &self.token {
            Some(token) if self.is_active() => Ok(token),
            _ => Err(ApiError::AuthRequired),
        }
    }
}
