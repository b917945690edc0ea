//! # Fish Trade Chaincode
//!
//! Supply-chain trade contracts for fish lots, executed against a key-value
//! ledger. The chaincode exposes two entry points, [`FishTrade::invoke`] and
//! [`FishTrade::query`], that route named operations with positional string
//! arguments:
//!
//! | Phase        | Operation(s)                                              |
//! |--------------|-----------------------------------------------------------|
//! | Registration | `create_supply_chain`                                     |
//! | Trading      | `start_trade`, `complete_trade`                           |
//! | Queries      | `query_asset`, `query_one_contract`, `query_contract_ancestors` |
//!
//! ## Architecture
//!
//! The host owns the world state and hands the chaincode a
//! [`ChaincodeStub`] per transaction. Storage access is delegated to
//! [`storage`]; this file only holds the error type and the dispatch tables.
//!
//! - [`registry`]: asset registration
//! - [`trade`]: opening and completing trade contracts
//! - [`chain`]: ancestor-chain walk
//! - [`query`]: read-only lookups

pub mod args;
pub mod chain;
pub mod events;
pub mod query;
pub mod registry;
pub mod storage;
pub mod trade;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_chain;

use thiserror::Error;

pub use storage::ChaincodeStub;
#[cfg(any(test, feature = "testutils"))]
pub use storage::MemoryStub;
pub use types::{Asset, Contract};

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    #[error("{function}: expected {expected} arguments, got {actual}")]
    InvalidArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to parse {field}: {value:?} is not a non-negative integer")]
    ParseError { field: &'static str, value: String },

    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("contract not found: {0}")]
    ContractNotFound(String),

    #[error("failed to decode asset {id}: {reason}")]
    AssetDecodeError { id: String, reason: String },

    #[error("failed to decode contract {tx_id}: {reason}")]
    ContractDecodeError { tx_id: String, reason: String },

    #[error("asset max temperature {asset_max} exceeds acceptable max {acceptable_max}")]
    TemperatureOutOfRangeHigh { asset_max: u64, acceptable_max: u64 },

    #[error("asset min temperature {asset_min} is below acceptable min {acceptable_min}")]
    TemperatureOutOfRangeLow { asset_min: u64, acceptable_min: u64 },

    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error("contract already completed: {0}")]
    ContractAlreadyCompleted(String),

    #[error("unknown function: {0}")]
    UnknownFunction(String),

    #[error("state store error: {0}")]
    Store(String),
}

impl Error {
    /// Stable numeric code reported to clients alongside the message.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidArgumentCount { .. } => 1,
            Error::ParseError { .. } => 2,
            Error::AssetNotFound(_) => 3,
            Error::ContractNotFound(_) => 4,
            Error::AssetDecodeError { .. } => 5,
            Error::ContractDecodeError { .. } => 6,
            Error::TemperatureOutOfRangeHigh { .. } => 7,
            Error::TemperatureOutOfRangeLow { .. } => 8,
            Error::SerializationError(_) => 9,
            Error::ContractAlreadyCompleted(_) => 10,
            Error::UnknownFunction(_) => 11,
            Error::Store(_) => 12,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub struct FishTrade;

impl FishTrade {
    // ─────────────────────────────────────────────────────────
    // Invoke (state-changing)
    // ─────────────────────────────────────────────────────────

    /// Run a state-changing operation.
    ///
    /// `start_trade` returns the new contract's transaction id as UTF-8; the
    /// other operations return an empty payload.
    pub fn invoke(stub: &mut dyn ChaincodeStub, function: &str, args: &[String]) -> Result<Vec<u8>> {
        match function {
            registry::CREATE_SUPPLY_CHAIN => Self::create_supply_chain(stub, args).map(|_| Vec::new()),
            trade::START_TRADE => Self::start_trade(stub, args).map(String::into_bytes),
            trade::COMPLETE_TRADE => Self::complete_trade(stub, args).map(|_| Vec::new()),
            other => Err(Error::UnknownFunction(other.to_string())),
        }
    }

    /// Register an asset. Args: `id, owner, fishName, price, weight, location, minTemp, maxTemp`.
    pub fn create_supply_chain(stub: &mut dyn ChaincodeStub, args: &[String]) -> Result<Asset> {
        registry::register_asset(stub, args)
    }

    /// Open a trade contract. Args: `assetId, previousTxId, reserved, minTemp, maxTemp`.
    pub fn start_trade(stub: &mut dyn ChaincodeStub, args: &[String]) -> Result<String> {
        trade::start_trade(stub, args)
    }

    /// Complete a trade contract. Args: `contractTxId, newOwner, location`.
    pub fn complete_trade(stub: &mut dyn ChaincodeStub, args: &[String]) -> Result<(Contract, Asset)> {
        trade::complete_trade(stub, args)
    }

    // ─────────────────────────────────────────────────────────
    // Query (read-only)
    // ─────────────────────────────────────────────────────────

    /// Run a read-only operation and return its JSON payload.
    pub fn query(stub: &dyn ChaincodeStub, function: &str, args: &[String]) -> Result<Vec<u8>> {
        match function {
            query::QUERY_ASSET => query::query_asset(stub, args),
            query::QUERY_ONE_CONTRACT => query::query_one_contract(stub, args),
            query::QUERY_CONTRACT_ANCESTORS => query::query_contract_ancestors(stub, args),
            other => Err(Error::UnknownFunction(other.to_string())),
        }
    }
}
