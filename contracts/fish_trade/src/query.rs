//! Read-only lookups. Nothing here writes to the stub.

use crate::args::expect_count;
use crate::chain::resolve_ancestors;
use crate::storage::{load_asset, load_asset_bytes, load_contract, load_contract_bytes, ChaincodeStub};
use crate::types::{Asset, Contract};
use crate::{Error, Result};

pub const QUERY_ASSET: &str = "query_asset";
pub const QUERY_ONE_CONTRACT: &str = "query_one_contract";
pub const QUERY_CONTRACT_ANCESTORS: &str = "query_contract_ancestors";

pub fn get_asset(stub: &dyn ChaincodeStub, id: &str) -> Result<Asset> {
    load_asset(stub, id)
}

pub fn get_contract(stub: &dyn ChaincodeStub, tx_id: &str) -> Result<Contract> {
    load_contract(stub, tx_id)
}

pub fn get_ancestors(stub: &dyn ChaincodeStub, tx_id: &str) -> Result<Vec<Contract>> {
    resolve_ancestors(stub, tx_id)
}

/// Stored asset bytes, unchanged.
pub fn query_asset(stub: &dyn ChaincodeStub, args: &[String]) -> Result<Vec<u8>> {
    expect_count(QUERY_ASSET, args, 1)?;
    load_asset_bytes(stub, &args[0])
}

/// Stored contract bytes, unchanged.
pub fn query_one_contract(stub: &dyn ChaincodeStub, args: &[String]) -> Result<Vec<u8>> {
    expect_count(QUERY_ONE_CONTRACT, args, 1)?;
    load_contract_bytes(stub, &args[0])
}

/// JSON array of the contract at `txId` and its ancestors, most recent first.
pub fn query_contract_ancestors(stub: &dyn ChaincodeStub, args: &[String]) -> Result<Vec<u8>> {
    expect_count(QUERY_CONTRACT_ANCESTORS, args, 1)?;
    let chain = get_ancestors(stub, &args[0])?;
    serde_json::to_vec(&chain).map_err(|e| Error::SerializationError(e.to_string()))
}
