//! # Ancestor chain
//!
//! Every contract may name the transaction of the contract it follows. Walking
//! those links backwards yields the trade history of a lot, most recent first:
//!
//! ```text
//! contract/A ──previous──► contract/B ──previous──► contract/C ──previous──► ""
//! resolve_ancestors("A") == [A, B, C]
//! ```
//!
//! The walk is best effort. Only the starting contract must load; a missing
//! or undecodable predecessor ends the chain where it is. A link back to a
//! contract already visited also ends it, as does reaching
//! [`MAX_ANCESTOR_DEPTH`] contracts.

use std::collections::HashSet;

use tracing::warn;

use crate::storage::{load_contract, ChaincodeStub};
use crate::types::Contract;
use crate::Result;

/// Upper bound on the number of contracts returned by one walk.
pub const MAX_ANCESTOR_DEPTH: usize = 10_000;

/// Collect the contract at `start_tx_id` followed by each of its predecessors.
pub fn resolve_ancestors(stub: &dyn ChaincodeStub, start_tx_id: &str) -> Result<Vec<Contract>> {
    let start = load_contract(stub, start_tx_id)?;

    let mut seen = HashSet::from([start_tx_id.to_string()]);
    let mut next = start.previous_tx_id.clone();
    let mut chain = vec![start];

    while !next.is_empty() {
        if chain.len() >= MAX_ANCESTOR_DEPTH {
            warn!(start = %start_tx_id, depth = chain.len(), "ancestor walk hit depth limit");
            break;
        }
        if !seen.insert(next.clone()) {
            warn!(start = %start_tx_id, repeated = %next, "ancestor chain loops back, stopping");
            break;
        }

        let contract = match load_contract(stub, &next) {
            Ok(contract) => contract,
            Err(e) => {
                warn!(start = %start_tx_id, missing = %next, "ancestor chain truncated: {e}");
                break;
            }
        };

        next = contract.previous_tx_id.clone();
        chain.push(contract);
    }

    Ok(chain)
}
