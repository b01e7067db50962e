//! Authentication gate: one fixed credential pair.
//!
//! [`AuthenticatedUser`] can only be obtained from [`AuthGate::authenticate`], and a
//! conversation session can only be opened with one, so unauthenticated input never reaches
//! the model.

use tracing::{info, warn};

use crate::error::{CompanionError, Result};

pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "root";

#[derive(Debug, Clone)]
pub struct AuthGate {
    username: String,
    password: String,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl AuthGate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks the pair; both must match exactly.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<AuthenticatedUser> {
        if username == self.username && password == self.password {
            info!(username = %username, "Login accepted");
            Ok(AuthenticatedUser {
                username: username.to_string(),
            })
        } else {
            warn!(username = %username, "Login rejected");
            Err(CompanionError::Unauthorized)
        }
    }
}

/// Proof of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    username: String,
}

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.username
    }
}
