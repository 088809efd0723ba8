//! End-to-end cart behavior against real stores.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use portal_cache::{FileStore, KvStore, MemoryStore};
use portal_commerce::prelude::*;
use serde_json::json;

fn line(code: &str, opt_val: &str, price: i64, qty: i64) -> LineItem {
    LineItem::new(code, price, qty).with_option(if opt_val.is_empty() { "" } else { "OPT" }, opt_val)
}

#[test]
fn empty_cart_on_fresh_store() {
    let store = CartStore::new(MemoryStore::new());
    assert!(store.load(&ScopeKey::guest()).is_empty());
}

#[test]
fn same_item_same_option_merges() {
    let store = CartStore::new(MemoryStore::new());
    let scope = ScopeKey::guest();

    store.add(&scope, line("A1", "", 1000, 2)).unwrap();
    let result = store.add(&scope, line("A1", "", 1000, 3)).unwrap();

    assert_eq!(result.outcome, AddOutcome::Merged);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].quantity(), 5);
    assert_eq!(result.items[0].total_amount(), 5000);
}

#[test]
fn merge_uses_first_inserted_price() {
    let store = CartStore::new(MemoryStore::new());
    let scope = ScopeKey::customer("C001");

    store.add(&scope, line("A1", "RED", 700, 1)).unwrap();
    let result = store.add(&scope, line("A1", "RED", 9999, 4)).unwrap();

    assert_eq!(result.items[0].quantity(), 5);
    assert_eq!(result.items[0].total_amount(), 700 * 5);
}

#[test]
fn different_option_values_are_distinct_lines() {
    let store = CartStore::new(MemoryStore::new());
    let scope = ScopeKey::guest();

    store.add(&scope, line("A1", "RED", 1000, 1)).unwrap();
    let result = store.add(&scope, line("A1", "BLUE", 1000, 1)).unwrap();

    assert_eq!(result.outcome, AddOutcome::Added);
    assert_eq!(result.items.len(), 2);
}

#[test]
fn codes_differing_by_control_character_do_not_merge() {
    let store = CartStore::new(MemoryStore::new());
    let scope = ScopeKey::guest();

    store.add(&scope, LineItem::new("A\u{1f}1", 1000, 1)).unwrap();
    let result = store.add(&scope, LineItem::new("A1", 1000, 1)).unwrap();

    assert_eq!(result.outcome, AddOutcome::Added);
    assert_eq!(result.items.len(), 2);
}

#[test]
fn quantity_never_drops_below_one() {
    let store = CartStore::new(MemoryStore::new());
    let scope = ScopeKey::guest();
    store.add(&scope, line("A1", "", 1000, 3)).unwrap();
    let key = IdentityKey::plain("A1");

    for qty in [0, -5] {
        let items = store.update_quantity(&scope, &key, qty).unwrap();
        assert_eq!(items[0].quantity(), 1);
        assert_eq!(items[0].total_amount(), 1000);
    }
}

#[test]
fn add_then_load_round_trips() {
    let store = CartStore::new(MemoryStore::new());
    let scope = ScopeKey::guest();

    let item = line("A1", "RED", 1200, 2)
        .with_name("Widget")
        .with_company("Acme")
        .with_spec("10x10")
        .with_image("/img/a1.png");
    let result = store.add(&scope, item).unwrap();

    assert_eq!(store.load(&scope), result.items);
}

#[test]
fn remove_then_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let scope = ScopeKey::guest();
    {
        let store = CartStore::new(FileStore::open(dir.path()).unwrap());
        store.add(&scope, line("A1", "", 1000, 1)).unwrap();
        store.add(&scope, line("B2", "", 2000, 2)).unwrap();
        store.remove(&scope, &IdentityKey::plain("A1")).unwrap();
    }

    let reopened = CartStore::new(FileStore::open(dir.path()).unwrap());
    let items = reopened.load(&scope);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_code, "B2");
    assert_eq!(items[0].total_amount(), 4000);
}

#[test]
fn persisted_format_uses_wire_names() {
    let kv = Arc::new(MemoryStore::new());
    let store = CartStore::new(Arc::clone(&kv));
    store
        .add(&ScopeKey::customer("C001"), line("A1", "RED", 1000, 2))
        .unwrap();

    let raw = kv.get("cart_C001").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        value,
        json!([{
            "itemCd": "A1",
            "optCd": "OPT",
            "optValCd": "RED",
            "optValNm": "",
            "itemNm": "",
            "compNm": "",
            "spec": "",
            "price": 1000,
            "quantity": 2,
            "totalAmount": 2000
        }])
    );
}

#[test]
fn scopes_are_isolated() {
    let store = CartStore::new(MemoryStore::new());
    store.add(&ScopeKey::guest(), line("A1", "", 100, 1)).unwrap();
    assert!(store.load(&ScopeKey::customer("C001")).is_empty());
}

#[test]
fn remove_many_matches_sequential_removes() {
    let scope = ScopeKey::guest();
    let seed = |store: &CartStore<MemoryStore>| {
        for (code, opt) in [("A1", ""), ("A1", "RED"), ("B2", ""), ("C3", "")] {
            store.add(&scope, line(code, opt, 100, 1)).unwrap();
        }
    };
    let targets = [
        IdentityKey::from_parts("A1", "OPT", "RED"),
        IdentityKey::plain("C3"),
        IdentityKey::plain("missing"),
    ];

    let batch = CartStore::new(MemoryStore::new());
    seed(&batch);
    let set: HashSet<_> = targets.iter().cloned().collect();
    let batched = batch.remove_many(&scope, &set).unwrap();

    let single = CartStore::new(MemoryStore::new());
    seed(&single);
    for key in targets.iter().rev() {
        single.remove(&scope, key).unwrap();
    }

    assert_eq!(batched, single.load(&scope));
    assert_eq!(batched.len(), 2);
}

#[test]
fn listener_rereads_state_after_mutation() {
    let store = Arc::new(CartStore::new(MemoryStore::new()));
    let seen = Arc::new(AtomicUsize::new(0));

    let reader = Arc::clone(&store);
    let s = Arc::clone(&seen);
    let _sub = store.subscribe(move |scope| {
        let total: i64 = reader.load(scope).iter().map(LineItem::quantity).sum();
        s.store(total as usize, Ordering::SeqCst);
    });

    store.add(&ScopeKey::guest(), line("A1", "", 100, 2)).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 2);
    store.add(&ScopeKey::guest(), line("A1", "", 100, 3)).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 5);
}

#[test]
fn sign_in_adopts_guest_cart() {
    let store = CartStore::new(MemoryStore::new());
    let guest = ScopeKey::guest();
    let customer = ScopeKey::for_session(Some("C001"));

    store.add(&guest, line("A1", "", 100, 1)).unwrap();
    store.add(&customer, line("B2", "", 200, 1)).unwrap();

    let items = store.adopt(&guest, &customer).unwrap();
    let codes: Vec<_> = items.iter().map(|i| i.item_code.as_str()).collect();
    assert_eq!(codes, vec!["B2", "A1"]);
    assert!(store.load(&guest).is_empty());
}
