#![allow(clippy::float_cmp)]

use super::*;
use crate::endpoint::EndpointStyle;

fn make_item(store: &mut ItemStore, kind: &str, x: f64, y: f64) -> CanvasItem {
    CanvasItem {
        id: store.next_id(),
        kind: kind.to_string(),
        x,
        y,
        width: 100.0,
        height: 40.0,
        classes: vec!["canvas-item".to_string()],
        draggable: false,
        endpoints: Vec::new(),
    }
}

fn ids(store: &ItemStore) -> Vec<String> {
    store.iter().map(|i| i.id.to_string()).collect()
}

// =============================================================
// ItemId
// =============================================================

#[test]
fn item_id_display_and_as_str() {
    let id = ItemId::from("canvasItem7");
    assert_eq!(id.as_str(), "canvasItem7");
    assert_eq!(id.to_string(), "canvasItem7");
}

#[test]
fn item_id_serializes_as_plain_string() {
    let json = serde_json::to_string(&ItemId::from("canvasItem1")).unwrap();
    assert_eq!(json, "\"canvasItem1\"");
}

// =============================================================
// Id minting
// =============================================================

#[test]
fn next_id_uses_prefix_and_counter() {
    let mut store = ItemStore::new("node");
    assert_eq!(store.next_id().as_str(), "node0");
    assert_eq!(store.next_id().as_str(), "node1");
}

#[test]
fn ids_are_not_reused_after_removal() {
    let mut store = ItemStore::new("canvasItem");
    let a = make_item(&mut store, "Task", 0.0, 0.0);
    let a_id = a.id.clone();
    store.push(a);
    store.remove(&a_id);
    let b = make_item(&mut store, "Task", 0.0, 0.0);
    assert_ne!(b.id, a_id);
    assert_eq!(b.id.as_str(), "canvasItem1");
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn push_appends_in_document_order() {
    let mut store = ItemStore::new("canvasItem");
    for _ in 0..3 {
        let item = make_item(&mut store, "Task", 0.0, 0.0);
        store.push(item);
    }
    assert_eq!(ids(&store), vec!["canvasItem0", "canvasItem1", "canvasItem2"]);
}

#[test]
fn insert_at_front_shifts_indices() {
    let mut store = ItemStore::new("canvasItem");
    let a = make_item(&mut store, "Task", 0.0, 0.0);
    let b = make_item(&mut store, "Task", 0.0, 0.0);
    store.push(a);
    store.insert(0, b).unwrap();
    assert_eq!(ids(&store), vec!["canvasItem1", "canvasItem0"]);
    assert_eq!(store.index_of(&ItemId::from("canvasItem0")), Some(1));
}

#[test]
fn insert_at_len_appends() {
    let mut store = ItemStore::new("canvasItem");
    let a = make_item(&mut store, "Task", 0.0, 0.0);
    assert!(store.insert(0, a).is_ok());
    assert_eq!(store.len(), 1);
}

#[test]
fn insert_past_end_is_rejected() {
    let mut store = ItemStore::new("canvasItem");
    let a = make_item(&mut store, "Task", 0.0, 0.0);
    let err = store.insert(2, a).unwrap_err();
    assert!(matches!(err, CanvasError::IndexOutOfRange { index: 2, len: 0 }));
    assert!(store.is_empty());
}

#[test]
fn remove_updates_following_indices() {
    let mut store = ItemStore::new("canvasItem");
    for _ in 0..3 {
        let item = make_item(&mut store, "Task", 0.0, 0.0);
        store.push(item);
    }
    let removed = store.remove(&ItemId::from("canvasItem0"));
    assert!(removed.is_some());
    assert_eq!(store.index_of(&ItemId::from("canvasItem2")), Some(1));
}

#[test]
fn remove_missing_returns_none() {
    let mut store = ItemStore::new("canvasItem");
    assert!(store.remove(&ItemId::from("nope")).is_none());
}

// =============================================================
// Mutation and lookup
// =============================================================

#[test]
fn set_position_moves_item() {
    let mut store = ItemStore::new("canvasItem");
    let item = make_item(&mut store, "Task", 1.0, 2.0);
    let id = item.id.clone();
    store.push(item);
    assert!(store.set_position(&id, Point::new(30.0, 40.0)));
    assert_eq!(store.get(&id).unwrap().position(), Point::new(30.0, 40.0));
}

#[test]
fn set_position_missing_returns_false() {
    let mut store = ItemStore::new("canvasItem");
    assert!(!store.set_position(&ItemId::from("ghost"), Point::new(0.0, 0.0)));
}

#[test]
fn endpoint_lookup_spans_items() {
    let mut store = ItemStore::new("canvasItem");
    let mut item = make_item(&mut store, "Task", 0.0, 0.0);
    let ep = Endpoint::new(item.id.clone(), EndpointRole::Target, EndpointStyle::default_target());
    let ep_id = ep.id;
    item.endpoints.push(ep);
    store.push(item);
    assert_eq!(store.endpoint(&ep_id).unwrap().role, EndpointRole::Target);
}

// =============================================================
// Item state and flags
// =============================================================

#[test]
fn new_item_is_placed() {
    let mut store = ItemStore::new("canvasItem");
    let item = make_item(&mut store, "Task", 0.0, 0.0);
    assert_eq!(item.state(), ItemState::Placed);
    assert!(!item.has_source_endpoint());
    assert!(!item.has_target_endpoint());
}

#[test]
fn draggable_item_state() {
    let mut store = ItemStore::new("canvasItem");
    let mut item = make_item(&mut store, "Task", 0.0, 0.0);
    item.draggable = true;
    assert_eq!(item.state(), ItemState::Draggable);
}

#[test]
fn endpointed_item_reports_role_flags() {
    let mut store = ItemStore::new("canvasItem");
    let mut item = make_item(&mut store, "Task", 0.0, 0.0);
    item.draggable = true;
    item.endpoints.push(Endpoint::new(item.id.clone(), EndpointRole::Source, EndpointStyle::default_source()));
    assert_eq!(item.state(), ItemState::Endpointed);
    assert!(item.has_source_endpoint());
    assert!(!item.has_target_endpoint());
}
