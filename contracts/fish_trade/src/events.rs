//! Events attached to successful invoke transactions.
//!
//! The host records the event name and JSON payload alongside the committed
//! transaction. Each invoke sets at most one event.

use serde::{Deserialize, Serialize};

use crate::storage::ChaincodeStub;
use crate::{Error, Result};

pub const ASSET_REGISTERED: &str = "asset_registered";
pub const TRADE_STARTED: &str = "trade_started";
pub const TRADE_COMPLETED: &str = "trade_completed";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AssetRegistered {
    pub asset_id: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TradeStarted {
    pub tx_id: String,
    pub asset_id: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TradeCompleted {
    pub tx_id: String,
    pub asset_id: String,
    pub owner: String,
}

pub fn publish<T: Serialize>(stub: &mut dyn ChaincodeStub, name: &str, event: &T) -> Result<()> {
    let payload = serde_json::to_vec(event).map_err(|e| Error::SerializationError(e.to_string()))?;
    stub.set_event(name, payload)
}
