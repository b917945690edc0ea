//! In-memory world state and the transaction-scoped stubs the chaincode runs on.
//!
//! The durable copy lives in SQLite; this map mirrors the `world_state` table
//! and is only mutated after a transaction's writes have been committed.

use std::collections::HashMap;

use fish_trade::{ChaincodeStub, Error as ChaincodeError};

#[derive(Debug, Default)]
pub struct WorldState {
    state: HashMap<String, Vec<u8>>,
    /// Sequence number of the last committed transaction.
    sequence: i64,
}

impl WorldState {
    pub fn new(state: HashMap<String, Vec<u8>>, sequence: i64) -> Self {
        Self { state, sequence }
    }

    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.state.get(key).map(Vec::as_slice)
    }

    /// Apply a committed write set and advance the sequence.
    pub fn apply(&mut self, sequence: i64, writes: Vec<(String, Vec<u8>)>) {
        for (key, value) in writes {
            self.state.insert(key, value);
        }
        self.sequence = sequence;
    }
}

/// Output of a finished invoke stub.
#[derive(Debug, Default)]
pub struct WriteSet {
    pub writes: Vec<(String, Vec<u8>)>,
    pub event: Option<(String, Vec<u8>)>,
}

/// Overlay over a [`WorldState`] that buffers writes for one invoke.
///
/// Reads see the transaction's own writes first, then the committed state.
pub struct TxStub<'a> {
    world: &'a WorldState,
    tx_id: String,
    output: WriteSet,
}

impl<'a> TxStub<'a> {
    pub fn new(world: &'a WorldState, tx_id: String) -> Self {
        Self {
            world,
            tx_id,
            output: WriteSet::default(),
        }
    }

    pub fn into_write_set(self) -> WriteSet {
        self.output
    }
}

impl ChaincodeStub for TxStub<'_> {
    fn get_state(&self, key: &str) -> fish_trade::Result<Option<Vec<u8>>> {
        let pending = self
            .output
            .writes
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone());
        Ok(pending.or_else(|| self.world.get(key).map(<[u8]>::to_vec)))
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> fish_trade::Result<()> {
        self.output.writes.push((key.to_string(), value));
        Ok(())
    }

    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn set_event(&mut self, name: &str, payload: Vec<u8>) -> fish_trade::Result<()> {
        self.output.event = Some((name.to_string(), payload));
        Ok(())
    }
}

/// Read-only view used for queries. Writes are refused.
pub struct QueryStub<'a> {
    world: &'a WorldState,
}

impl<'a> QueryStub<'a> {
    pub fn new(world: &'a WorldState) -> Self {
        Self { world }
    }
}

impl ChaincodeStub for QueryStub<'_> {
    fn get_state(&self, key: &str) -> fish_trade::Result<Option<Vec<u8>>> {
        Ok(self.world.get(key).map(<[u8]>::to_vec))
    }

    fn put_state(&mut self, key: &str, _value: Vec<u8>) -> fish_trade::Result<()> {
        Err(ChaincodeError::Store(format!("write to {key} during a query")))
    }

    fn tx_id(&self) -> &str {
        ""
    }

    fn set_event(&mut self, name: &str, _payload: Vec<u8>) -> fish_trade::Result<()> {
        Err(ChaincodeError::Store(format!("event {name} set during a query")))
    }
}
