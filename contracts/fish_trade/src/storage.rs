//! # Storage
//!
//! Typed helpers over the host's key-value world state.
//!
//! The chaincode never talks to a database. Every read and write goes through
//! a [`ChaincodeStub`] that the host opens for one transaction.
//!
//! ## Key namespace
//!
//! | Key                   | Value           | Written by                         |
//! |-----------------------|-----------------|------------------------------------|
//! | `asset/<id>`          | JSON `Asset`    | `create_supply_chain`, `complete_trade` |
//! | `contract/<txId>`     | JSON `Contract` | `start_trade`, `complete_trade`    |
//!
//! `<txId>` is the id of the transaction that opened the contract, as reported
//! by [`ChaincodeStub::tx_id`].
//!
//! ## Stub requirements
//!
//! Reads must observe writes made earlier in the same transaction. Whether
//! writes reach durable storage one at a time or as a single batch is up to
//! the host; the ledger host in this workspace commits them as one batch.

use tracing::debug;

use crate::types::{Asset, Contract};
use crate::{Error, Result};

// ── Storage Keys ─────────────────────────────────────────────────────

const ASSET_PREFIX: &str = "asset/";
const CONTRACT_PREFIX: &str = "contract/";

pub fn asset_key(id: &str) -> String {
    format!("{ASSET_PREFIX}{id}")
}

pub fn contract_key(tx_id: &str) -> String {
    format!("{CONTRACT_PREFIX}{tx_id}")
}

// ── Stub Interface ───────────────────────────────────────────────────

/// Transaction-scoped view of the world state handed to the chaincode.
pub trait ChaincodeStub {
    /// Read the value stored under `key`, or `None` if the key was never written.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stage `value` under `key` for the current transaction.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Id of the transaction this stub belongs to.
    fn tx_id(&self) -> &str;

    /// Attach a named event to the current transaction. A later call replaces
    /// the earlier event.
    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<()>;
}

// ── Asset Helpers ────────────────────────────────────────────────────

/// Raw stored bytes of an asset.
pub fn load_asset_bytes(stub: &dyn ChaincodeStub, id: &str) -> Result<Vec<u8>> {
    stub.get_state(&asset_key(id))?
        .ok_or_else(|| Error::AssetNotFound(id.to_string()))
}

pub fn load_asset(stub: &dyn ChaincodeStub, id: &str) -> Result<Asset> {
    let bytes = load_asset_bytes(stub, id)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::AssetDecodeError {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

/// Serialize and stage `asset` under `asset/<asset.id>`. Overwrites.
pub fn save_asset(stub: &mut dyn ChaincodeStub, asset: &Asset) -> Result<()> {
    let bytes = serde_json::to_vec(asset).map_err(|e| Error::SerializationError(e.to_string()))?;
    debug!(key = %asset_key(&asset.id), "writing asset");
    stub.put_state(&asset_key(&asset.id), bytes)
}

// ── Contract Helpers ─────────────────────────────────────────────────

/// Raw stored bytes of a contract.
pub fn load_contract_bytes(stub: &dyn ChaincodeStub, tx_id: &str) -> Result<Vec<u8>> {
    stub.get_state(&contract_key(tx_id))?
        .ok_or_else(|| Error::ContractNotFound(tx_id.to_string()))
}

pub fn load_contract(stub: &dyn ChaincodeStub, tx_id: &str) -> Result<Contract> {
    let bytes = load_contract_bytes(stub, tx_id)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::ContractDecodeError {
        tx_id: tx_id.to_string(),
        reason: e.to_string(),
    })
}

/// Serialize and stage `contract` under `contract/<tx_id>`.
pub fn save_contract(stub: &mut dyn ChaincodeStub, tx_id: &str, contract: &Contract) -> Result<()> {
    let bytes =
        serde_json::to_vec(contract).map_err(|e| Error::SerializationError(e.to_string()))?;
    debug!(key = %contract_key(tx_id), "writing contract");
    stub.put_state(&contract_key(tx_id), bytes)
}

// ── In-memory Stub ───────────────────────────────────────────────────

#[cfg(any(test, feature = "testutils"))]
pub use memory::MemoryStub;

#[cfg(any(test, feature = "testutils"))]
mod memory {
    use std::collections::BTreeMap;

    use super::ChaincodeStub;
    use crate::Result;

    /// World state held in a map, written through immediately.
    ///
    /// The transaction id is whatever the test last set with
    /// [`MemoryStub::begin`].
    #[derive(Debug, Default, Clone)]
    pub struct MemoryStub {
        state: BTreeMap<String, Vec<u8>>,
        tx_id: String,
        event: Option<(String, Vec<u8>)>,
    }

    impl MemoryStub {
        pub fn new() -> Self {
            Self::default()
        }

        /// Start a new transaction with id `tx_id` and clear the event slot.
        pub fn begin(&mut self, tx_id: &str) {
            self.tx_id = tx_id.to_string();
            self.event = None;
        }

        /// Write raw bytes, bypassing the chaincode.
        pub fn insert_raw(&mut self, key: &str, value: &[u8]) {
            self.state.insert(key.to_string(), value.to_vec());
        }

        pub fn raw(&self, key: &str) -> Option<&[u8]> {
            self.state.get(key).map(Vec::as_slice)
        }

        pub fn event(&self) -> Option<(&str, &[u8])> {
            self.event
                .as_ref()
                .map(|(name, payload)| (name.as_str(), payload.as_slice()))
        }

        /// Snapshot of every key and value, for before/after comparisons.
        pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
            self.state.clone()
        }
    }

    impl ChaincodeStub for MemoryStub {
        fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.state.get(key).cloned())
        }

        fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
            self.state.insert(key.to_string(), value);
            Ok(())
        }

        fn tx_id(&self) -> &str {
            &self.tx_id
        }

        fn set_event(&mut self, name: &str, payload: Vec<u8>) -> Result<()> {
            self.event = Some((name.to_string(), payload));
            Ok(())
        }
    }
}
