//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chaincode error: {0}")]
    Chaincode(#[from] fish_trade::Error),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
