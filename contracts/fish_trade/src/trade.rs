//! # Trade workflow
//!
//! `start_trade` opens a [`Contract`] keyed by the opening transaction's id.
//! `complete_trade` checks the contract's temperature bounds against the
//! asset's recorded range and, if they hold, closes the contract and hands
//! the asset to the buyer.
//!
//! A trade is acceptable when
//!
//! ```text
//! contract.acceptable_min <= asset.min_temperature
//!     && asset.max_temperature <= contract.acceptable_max
//! ```
//!
//! Every check runs before the first write, so a rejected completion leaves
//! both records untouched.

use tracing::{debug, warn};

use crate::args::{expect_count, parse_u64};
use crate::events::{self, TradeCompleted, TradeStarted};
use crate::storage::{load_asset, load_contract, save_asset, save_contract, ChaincodeStub};
use crate::types::{Asset, Contract};
use crate::{Error, Result};

pub const START_TRADE: &str = "start_trade";
pub const COMPLETE_TRADE: &str = "complete_trade";

/// Open a contract from `assetId, previousTxId, reserved, minTemp, maxTemp`.
///
/// The third argument is accepted for call compatibility and ignored.
/// Returns the id of the transaction the contract is stored under.
pub fn start_trade(stub: &mut dyn ChaincodeStub, args: &[String]) -> Result<String> {
    expect_count(START_TRADE, args, 5)?;

    let contract = Contract {
        asset_id: args[0].clone(),
        previous_tx_id: args[1].clone(),
        acceptable_min_temperature: parse_u64("minTemp", &args[3])?,
        acceptable_max_temperature: parse_u64("maxTemp", &args[4])?,
        location: String::new(),
        completed: false,
    };

    let tx_id = stub.tx_id().to_string();
    save_contract(stub, &tx_id, &contract)?;
    events::publish(
        stub,
        events::TRADE_STARTED,
        &TradeStarted {
            tx_id: tx_id.clone(),
            asset_id: contract.asset_id.clone(),
        },
    )?;

    debug!(%tx_id, asset_id = %contract.asset_id, "trade started");
    Ok(tx_id)
}

/// Check `asset` against the bounds of `contract`. The max bound is checked first.
pub fn check_temperature(contract: &Contract, asset: &Asset) -> Result<()> {
    if asset.max_temperature > contract.acceptable_max_temperature {
        return Err(Error::TemperatureOutOfRangeHigh {
            asset_max: asset.max_temperature,
            acceptable_max: contract.acceptable_max_temperature,
        });
    }
    if asset.min_temperature < contract.acceptable_min_temperature {
        return Err(Error::TemperatureOutOfRangeLow {
            asset_min: asset.min_temperature,
            acceptable_min: contract.acceptable_min_temperature,
        });
    }
    Ok(())
}

/// Complete the contract opened by `contractTxId`, transferring its asset to
/// `newOwner` at `location`.
pub fn complete_trade(stub: &mut dyn ChaincodeStub, args: &[String]) -> Result<(Contract, Asset)> {
    expect_count(COMPLETE_TRADE, args, 3)?;
    let tx_id = &args[0];
    let new_owner = &args[1];
    let location = &args[2];

    let mut contract = load_contract(stub, tx_id)?;
    if contract.completed {
        return Err(Error::ContractAlreadyCompleted(tx_id.clone()));
    }

    let mut asset = load_asset(stub, &contract.asset_id)?;

    if let Err(e) = check_temperature(&contract, &asset) {
        warn!(%tx_id, asset_id = %asset.id, "trade rejected: {e}");
        return Err(e);
    }

    contract.completed = true;
    contract.location = location.clone();
    save_contract(stub, tx_id, &contract)?;

    asset.owner = new_owner.clone();
    save_asset(stub, &asset)?;

    events::publish(
        stub,
        events::TRADE_COMPLETED,
        &TradeCompleted {
            tx_id: tx_id.clone(),
            asset_id: asset.id.clone(),
            owner: asset.owner.clone(),
        },
    )?;

    debug!(%tx_id, asset_id = %asset.id, owner = %asset.owner, "trade completed");
    Ok((contract, asset))
}
