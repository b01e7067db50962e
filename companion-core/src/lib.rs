//! # companion-core
//!
//! Shared pieces of the companion: the [`CompanionError`] taxonomy, the [`AuthGate`] that
//! hands out [`AuthenticatedUser`] tokens, and tracing initialization.

pub mod auth;
pub mod error;
pub mod logger;

pub use auth::{AuthGate, AuthenticatedUser, DEFAULT_PASSWORD, DEFAULT_USERNAME};
pub use error::{CompanionError, Result};
pub use logger::init_tracing;
