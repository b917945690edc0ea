#![allow(dead_code)]

use crate::types::{Asset, Contract};

/// INV-1: A freshly opened contract is not completed and has no location.
pub fn assert_contract_open(contract: &Contract) {
    assert!(
        !contract.completed,
        "INV-1 violated: contract for asset {} opened as completed",
        contract.asset_id
    );
    assert!(
        contract.location.is_empty(),
        "INV-1 violated: open contract for asset {} carries location {:?}",
        contract.asset_id,
        contract.location
    );
}

/// INV-2: A completed trade satisfied both temperature bounds.
pub fn assert_within_bounds(contract: &Contract, asset: &Asset) {
    assert!(
        contract.acceptable_min_temperature <= asset.min_temperature,
        "INV-2 violated: asset {} min {} below acceptable min {}",
        asset.id,
        asset.min_temperature,
        contract.acceptable_min_temperature
    );
    assert!(
        asset.max_temperature <= contract.acceptable_max_temperature,
        "INV-2 violated: asset {} max {} above acceptable max {}",
        asset.id,
        asset.max_temperature,
        contract.acceptable_max_temperature
    );
}

/// INV-3: Completion only touches `completed` and `location` on the contract.
pub fn assert_contract_terms_unchanged(before: &Contract, after: &Contract) {
    assert_eq!(before.asset_id, after.asset_id, "INV-3 violated: asset id changed");
    assert_eq!(
        before.previous_tx_id, after.previous_tx_id,
        "INV-3 violated: previous tx id changed"
    );
    assert_eq!(
        before.acceptable_min_temperature, after.acceptable_min_temperature,
        "INV-3 violated: acceptable min changed"
    );
    assert_eq!(
        before.acceptable_max_temperature, after.acceptable_max_temperature,
        "INV-3 violated: acceptable max changed"
    );
}

/// INV-4: A trade only reassigns the asset's owner.
pub fn assert_asset_unchanged_except_owner(before: &Asset, after: &Asset) {
    let mut expected = before.clone();
    expected.owner = after.owner.clone();
    assert_eq!(
        &expected, after,
        "INV-4 violated: asset {} changed beyond its owner",
        before.id
    );
}

/// INV-5: Each contract in an ancestor chain points at the next one's key.
pub fn assert_chain_linked(keys: &[&str], chain: &[Contract]) {
    assert_eq!(keys.len(), chain.len(), "INV-5 violated: chain length mismatch");
    for (i, contract) in chain.iter().enumerate() {
        let expected_prev = keys.get(i + 1).copied().unwrap_or("");
        assert_eq!(
            contract.previous_tx_id, expected_prev,
            "INV-5 violated: link {} points at {:?}, expected {:?}",
            i, contract.previous_tx_id, expected_prev
        );
    }
}
