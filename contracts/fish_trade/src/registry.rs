//! Asset registration.

use tracing::{debug, warn};

use crate::args::{expect_count, parse_u64};
use crate::events::{self, AssetRegistered};
use crate::storage::{save_asset, ChaincodeStub};
use crate::types::Asset;
use crate::Result;

pub const CREATE_SUPPLY_CHAIN: &str = "create_supply_chain";

/// Build an [`Asset`] from `id, owner, fishName, price, weight, location,
/// minTemp, maxTemp`.
pub fn parse_asset(args: &[String]) -> Result<Asset> {
    expect_count(CREATE_SUPPLY_CHAIN, args, 8)?;

    Ok(Asset {
        id: args[0].clone(),
        owner: args[1].clone(),
        fish_name: args[2].clone(),
        price: parse_u64("price", &args[3])?,
        weight: parse_u64("weight", &args[4])?,
        location: args[5].clone(),
        min_temperature: parse_u64("minTemp", &args[6])?,
        max_temperature: parse_u64("maxTemp", &args[7])?,
    })
}

/// Store a new asset, replacing any asset already registered under the same id.
pub fn register_asset(stub: &mut dyn ChaincodeStub, args: &[String]) -> Result<Asset> {
    let asset = parse_asset(args)?;

    if asset.min_temperature > asset.max_temperature {
        warn!(
            asset_id = %asset.id,
            min = asset.min_temperature,
            max = asset.max_temperature,
            "registering asset with inverted temperature range"
        );
    }

    save_asset(stub, &asset)?;
    events::publish(
        stub,
        events::ASSET_REGISTERED,
        &AssetRegistered {
            asset_id: asset.id.clone(),
        },
    )?;
    debug!(asset_id = %asset.id, owner = %asset.owner, "asset registered");
    Ok(asset)
}
