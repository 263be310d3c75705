//! Shopper session context.
//!
//! The session is an explicit value owned by the presentation layer. Cart and
//! catalog operations never look at it.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Confirmation shown after a successful login.
pub const LOGGED_IN_MESSAGE: &str = "Logged in successfully!";
/// Confirmation shown after logout.
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Which addresses may log in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPolicy {
    /// When set, only this address (compared case-insensitively) is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_email: Option<String>,
}

impl LoginPolicy {
    pub fn open() -> Self {
        Self::default()
    }

    pub fn demo(email: impl Into<String>) -> Self {
        Self {
            demo_email: Some(email.into()),
        }
    }

    /// Validate an address against this policy.
    pub fn check(&self, email: &str) -> Result<(), CommerceError> {
        if !email.contains('@') || !email.contains('.') {
            return Err(CommerceError::InvalidEmail(email.to_string()));
        }
        if let Some(expected) = &self.demo_email {
            if !email.eq_ignore_ascii_case(expected) {
                return Err(CommerceError::EmailNotAllowed {
                    expected: expected.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The shopper's display identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl Session {
    /// An anonymous session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.email.is_some()
    }

    /// Log in (or change the address) after validating it.
    ///
    /// A rejected address leaves the session unchanged.
    pub fn login(&mut self, email: &str, policy: &LoginPolicy) -> Result<&'static str, CommerceError> {
        let email = email.trim();
        policy.check(email)?;
        self.email = Some(email.to_string());
        Ok(LOGGED_IN_MESSAGE)
    }

    pub fn logout(&mut self) -> &'static str {
        self.email = None;
        LOGGED_OUT_MESSAGE
    }
}
