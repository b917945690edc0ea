//! # Types
//!
//! Ledger records shared by every module of the fish trade chaincode.
//!
//! ## Wire format
//!
//! Both records are stored as JSON. Field names and field order are part of
//! the ledger format and must not change:
//!
//! ```text
//! Asset    {"ID","Owner","FishName","Weight","MinTemperature","MaxTemperature","Price","Location"}
//! Contract {"AssetID","PreviousTxId","AcceptableMinTemperature","AcceptableMaxTemperature","Location","Completed"}
//! ```
//!
//! ### Contract lifecycle
//!
//! ```text
//! Open (completed = false) ──complete_trade──► Completed (terminal)
//! ```
//!
//! A completed contract is never written again; `complete_trade` rejects it
//! with `Error::ContractAlreadyCompleted`.

use serde::{Deserialize, Serialize};

/// A tracked lot of fish.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    /// External identifier; storage key is `asset/<id>`.
    #[serde(rename = "ID")]
    pub id: String,
    /// Current owner. Reassigned by a successful trade.
    pub owner: String,
    pub fish_name: String,
    pub weight: u64,
    /// Lowest temperature the lot was recorded at.
    pub min_temperature: u64,
    /// Highest temperature the lot was recorded at.
    pub max_temperature: u64,
    pub price: u64,
    pub location: String,
}

/// A trade of an [`Asset`], bounded by the temperatures the buyer accepts.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contract {
    /// Id of the traded asset. Not checked until completion.
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    /// Transaction id of the preceding contract, or empty for the first trade.
    pub previous_tx_id: String,
    pub acceptable_min_temperature: u64,
    pub acceptable_max_temperature: u64,
    /// Empty until the trade completes.
    pub location: String,
    pub completed: bool,
}

impl Contract {
    /// Returns `true` if this contract has no predecessor.
    pub fn is_root(&self) -> bool {
        self.previous_tx_id.is_empty()
    }
}
