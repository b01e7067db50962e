use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompanionError {
    /// A durable store could not be written (or read at all).
    #[error("Store error: {0}")]
    Store(String),

    /// The model call failed or timed out.
    #[error("Gateway error: {0:#}")]
    Gateway(anyhow::Error),

    /// Missing or invalid configuration; fatal at startup.
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unauthorized: invalid username or password")]
    Unauthorized,

    #[error("Empty input")]
    EmptyInput,
}

pub type Result<T> = std::result::Result<T, CompanionError>;
