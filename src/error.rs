//! Error types for the assistant

use rust_decimal::Decimal;

pub type Result<T> = std::result::Result<T, Error>;

/// Programmatic error kinds. The message is display material only; callers
/// should match on the variant.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or out-of-range slot label for the configured wheel
    #[error("invalid result: {0}")]
    InvalidResult(String),

    /// Bad configuration value (non-positive stake, unknown category, ...)
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Operation invoked before `initialize`
    #[error("session not initialized")]
    NotInitialized,

    /// Spin processed before warm-up completed
    #[error("session not warmed up")]
    NotWarmedUp,

    /// Strict bankroll mode rejected a debit that would overdraw the balance
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    /// Snapshot serialization failure
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
