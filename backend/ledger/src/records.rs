//! Transaction log records as written to and read from the database.

use serde::{Deserialize, Serialize};

/// A committed invoke, ready to be written.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub sequence: i64,
    pub tx_id: String,
    pub function: String,
    pub args: Vec<String>,
    pub event: Option<(String, Vec<u8>)>,
    /// Unix milliseconds.
    pub committed_at: i64,
    /// Keys in write order; a key written twice appears twice.
    pub writes: Vec<(String, Vec<u8>)>,
}

/// A transaction row as stored in the log.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransactionRecord {
    pub sequence: i64,
    pub tx_id: String,
    pub function: String,
    /// JSON array of the positional arguments.
    pub args: String,
    pub event_name: Option<String>,
    pub event_payload: Option<String>,
    pub committed_at: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WriteRecord {
    pub state_key: String,
    pub value: Vec<u8>,
}

/// One write as reported by the API. Values are JSON documents, shown as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteView {
    pub key: String,
    pub value: String,
}

impl From<WriteRecord> for WriteView {
    fn from(record: WriteRecord) -> Self {
        WriteView {
            key: record.state_key,
            value: String::from_utf8_lossy(&record.value).into_owned(),
        }
    }
}

/// A transaction together with its write set.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub transaction: TransactionRecord,
    pub writes: Vec<WriteView>,
}
