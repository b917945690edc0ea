//! The ledger node: runs chaincode transactions against the world state and
//! commits their write sets to the database.
//!
//! Invokes hold the write lock for their whole run, commit included, so they
//! execute one after another in sequence order. Queries share the read lock.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use fish_trade::FishTrade;

use crate::db;
use crate::errors::Result;
use crate::records::NewTransaction;
use crate::world_state::{QueryStub, TxStub, WorldState};

pub struct Ledger {
    pub pool: SqlitePool,
    world: RwLock<WorldState>,
}

/// Event attached to a committed transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptEvent {
    pub name: String,
    pub payload: serde_json::Value,
}

/// Result of a committed invoke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub tx_id: String,
    pub sequence: i64,
    /// Chaincode response, as text.
    pub payload: String,
    pub event: Option<ReceiptEvent>,
}

/// Transaction id for the `sequence`-th transaction committed at `at`:
/// hex of the big-endian sequence followed by the big-endian nanosecond timestamp.
pub fn make_tx_id(sequence: i64, at: DateTime<Utc>) -> String {
    let nanos = at.timestamp_nanos_opt().unwrap_or_default();
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&sequence.to_be_bytes());
    bytes[8..].copy_from_slice(&nanos.to_be_bytes());
    hex::encode(bytes)
}

impl Ledger {
    /// Load the committed world state from `pool`.
    pub async fn open(pool: SqlitePool) -> Result<Self> {
        let world = db::load_world_state(&pool).await?;
        info!(
            "World state loaded — {} keys, last sequence {}",
            world.len(),
            world.sequence()
        );
        Ok(Self {
            pool,
            world: RwLock::new(world),
        })
    }

    /// Run a state-changing chaincode operation as a new transaction.
    ///
    /// Nothing is written if the chaincode fails.
    pub async fn invoke(&self, function: &str, args: Vec<String>) -> Result<Receipt> {
        let mut world = self.world.write().await;

        let sequence = world.sequence() + 1;
        let now = Utc::now();
        let tx_id = make_tx_id(sequence, now);

        let mut stub = TxStub::new(&world, tx_id.clone());
        let payload = match FishTrade::invoke(&mut stub, function, &args) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%tx_id, function, "invoke rejected: {e}");
                return Err(e.into());
            }
        };
        let write_set = stub.into_write_set();

        let event = match &write_set.event {
            Some((name, bytes)) => Some(ReceiptEvent {
                name: name.clone(),
                payload: serde_json::from_slice(bytes)?,
            }),
            None => None,
        };

        let record = NewTransaction {
            sequence,
            tx_id: tx_id.clone(),
            function: function.to_string(),
            args,
            event: write_set.event,
            committed_at: now.timestamp_millis(),
            writes: write_set.writes,
        };
        db::commit_transaction(&self.pool, &record).await?;
        world.apply(sequence, record.writes);

        debug!(%tx_id, sequence, function, "transaction committed");
        Ok(Receipt {
            tx_id,
            sequence,
            payload: String::from_utf8_lossy(&payload).into_owned(),
            event,
        })
    }

    /// Run a read-only chaincode operation against the committed state.
    pub async fn query(&self, function: &str, args: &[String]) -> Result<Vec<u8>> {
        let world = self.world.read().await;
        let stub = QueryStub::new(&world);
        Ok(FishTrade::query(&stub, function, args)?)
    }
}
