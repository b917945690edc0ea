use crate::chain::{resolve_ancestors, MAX_ANCESTOR_DEPTH};
use crate::invariants::assert_chain_linked;
use crate::storage::{contract_key, save_contract};
use crate::{Contract, Error, FishTrade, MemoryStub};

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn open(stub: &mut MemoryStub, tx_id: &str, prev: &str) {
    stub.begin(tx_id);
    FishTrade::invoke(stub, "start_trade", &args(&["F1", prev, "", "0", "10"])).expect("start trade");
}

fn link(stub: &mut MemoryStub, tx_id: &str, prev: &str) {
    let contract = Contract {
        asset_id: "F1".into(),
        previous_tx_id: prev.into(),
        acceptable_min_temperature: 0,
        acceptable_max_temperature: 10,
        location: String::new(),
        completed: false,
    };
    save_contract(stub, tx_id, &contract).unwrap();
}

#[test]
fn test_single_contract_chain() {
    let mut stub = MemoryStub::new();
    open(&mut stub, "C", "");

    let chain = resolve_ancestors(&stub, "C").unwrap();
    assert_eq!(chain.len(), 1);
    assert!(chain[0].is_root());
}

#[test]
fn test_chain_is_most_recent_first() {
    let mut stub = MemoryStub::new();
    open(&mut stub, "C", "");
    open(&mut stub, "B", "C");
    open(&mut stub, "A", "B");

    let chain = resolve_ancestors(&stub, "A").unwrap();
    let prevs: Vec<&str> = chain.iter().map(|c| c.previous_tx_id.as_str()).collect();
    assert_eq!(prevs, vec!["B", "C", ""]);
    assert_chain_linked(&["A", "B", "C"], &chain);
}

#[test]
fn test_chain_from_the_middle() {
    let mut stub = MemoryStub::new();
    open(&mut stub, "C", "");
    open(&mut stub, "B", "C");
    open(&mut stub, "A", "B");

    let chain = resolve_ancestors(&stub, "B").unwrap();
    assert_chain_linked(&["B", "C"], &chain);
}

#[test]
fn test_chain_includes_completed_contracts() {
    let mut stub = MemoryStub::new();
    stub.begin("tx-asset");
    FishTrade::invoke(
        &mut stub,
        "create_supply_chain",
        &args(&["F1", "alice", "cod", "120", "40", "Bergen", "2", "8"]),
    )
    .unwrap();
    open(&mut stub, "B", "");
    stub.begin("tx-done");
    FishTrade::invoke(&mut stub, "complete_trade", &args(&["B", "bob", "Oslo"])).unwrap();
    open(&mut stub, "A", "B");

    let chain = resolve_ancestors(&stub, "A").unwrap();
    assert_eq!(chain.len(), 2);
    assert!(!chain[0].completed);
    assert!(chain[1].completed);
    assert_eq!(chain[1].location, "Oslo");
}

#[test]
fn test_missing_start_is_an_error() {
    let stub = MemoryStub::new();
    assert_eq!(
        resolve_ancestors(&stub, "nope").unwrap_err(),
        Error::ContractNotFound("nope".into())
    );
}

#[test]
fn test_malformed_start_is_an_error() {
    let mut stub = MemoryStub::new();
    stub.insert_raw(&contract_key("A"), b"garbage");
    assert!(matches!(
        resolve_ancestors(&stub, "A"),
        Err(Error::ContractDecodeError { .. })
    ));
}

#[test]
fn test_broken_link_truncates_silently() {
    let mut stub = MemoryStub::new();
    open(&mut stub, "B", "gone");
    open(&mut stub, "A", "B");

    let chain = resolve_ancestors(&stub, "A").unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[1].previous_tx_id, "gone");
}

#[test]
fn test_malformed_link_truncates_silently() {
    let mut stub = MemoryStub::new();
    stub.insert_raw(&contract_key("B"), b"{\"AssetID\":");
    open(&mut stub, "A", "B");

    let chain = resolve_ancestors(&stub, "A").unwrap();
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_two_contract_cycle_terminates() {
    let mut stub = MemoryStub::new();
    link(&mut stub, "A", "B");
    link(&mut stub, "B", "A");

    let chain = resolve_ancestors(&stub, "A").unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].previous_tx_id, "B");
    assert_eq!(chain[1].previous_tx_id, "A");
}

#[test]
fn test_self_cycle_terminates() {
    let mut stub = MemoryStub::new();
    link(&mut stub, "A", "A");

    let chain = resolve_ancestors(&stub, "A").unwrap();
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_cycle_behind_a_tail_terminates() {
    let mut stub = MemoryStub::new();
    link(&mut stub, "A", "B");
    link(&mut stub, "B", "C");
    link(&mut stub, "C", "B");

    let chain = resolve_ancestors(&stub, "A").unwrap();
    assert_eq!(chain.len(), 3);
}

#[test]
fn test_depth_limit_bounds_long_chains() {
    let mut stub = MemoryStub::new();
    let total = MAX_ANCESTOR_DEPTH + 5;
    for i in 0..total {
        let prev = if i == 0 { String::new() } else { format!("t{}", i - 1) };
        link(&mut stub, &format!("t{i}"), &prev);
    }

    let chain = resolve_ancestors(&stub, &format!("t{}", total - 1)).unwrap();
    assert_eq!(chain.len(), MAX_ANCESTOR_DEPTH);
}

#[test]
fn test_query_contract_ancestors_json() {
    let mut stub = MemoryStub::new();
    open(&mut stub, "B", "");
    open(&mut stub, "A", "B");

    let bytes = FishTrade::query(&stub, "query_contract_ancestors", &args(&["A"])).unwrap();
    let decoded: Vec<Contract> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(decoded, resolve_ancestors(&stub, "A").unwrap());
    assert!(std::str::from_utf8(&bytes)
        .unwrap()
        .starts_with(r#"[{"AssetID":"F1","PreviousTxId":"B""#));
}
