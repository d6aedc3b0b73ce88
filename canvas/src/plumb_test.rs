use super::*;
use crate::endpoint::EndpointStyle;

fn source(item: &str) -> Endpoint {
    Endpoint::new(ItemId::from(item), EndpointRole::Source, EndpointStyle::default_source())
}

fn target(item: &str) -> Endpoint {
    Endpoint::new(ItemId::from(item), EndpointRole::Target, EndpointStyle::default_target())
}

fn registered(plumb: &mut MemoryPlumb, endpoint: Endpoint) -> Endpoint {
    plumb.add_endpoint(&endpoint).unwrap();
    endpoint
}

// =============================================================
// Container and draggables
// =============================================================

#[test]
fn set_container_records_element_id() {
    let mut plumb = MemoryPlumb::new();
    plumb.set_container(&ElementInfo::new("div").with_id("plumbContainer")).unwrap();
    assert_eq!(plumb.container(), Some("plumbContainer"));
}

#[test]
fn set_container_without_id_uses_tag() {
    let mut plumb = MemoryPlumb::new();
    plumb.set_container(&ElementInfo::new("section")).unwrap();
    assert_eq!(plumb.container(), Some("section"));
}

#[test]
fn make_draggable_records_containment() {
    let mut plumb = MemoryPlumb::new();
    let id = ItemId::from("canvasItem0");
    plumb.make_draggable(&id, Size::new(800.0, 600.0)).unwrap();
    assert!(plumb.is_draggable(&id));
    assert_eq!(plumb.containment(&id), Some(Size::new(800.0, 600.0)));
}

#[test]
fn new_container_forgets_previous_registrations() {
    let mut plumb = MemoryPlumb::new();
    let id = ItemId::from("canvasItem0");
    plumb.set_container(&ElementInfo::new("div").with_id("plumbContainer")).unwrap();
    plumb.make_draggable(&id, Size::new(800.0, 600.0)).unwrap();
    plumb.move_item(&id, Point::new(5.0, 6.0)).unwrap();
    let a = registered(&mut plumb, source("canvasItem0"));
    let b = registered(&mut plumb, target("canvasItem1"));
    plumb.connect(&a, &b).unwrap();

    plumb.set_container(&ElementInfo::new("div").with_id("plumbContainer")).unwrap();
    assert!(!plumb.is_draggable(&id));
    assert_eq!(plumb.position(&id), None);
    assert_eq!(plumb.endpoint_count(), 0);
    assert!(plumb.connections().is_empty());
}

#[test]
fn move_item_records_last_position() {
    let mut plumb = MemoryPlumb::new();
    let id = ItemId::from("canvasItem0");
    plumb.move_item(&id, Point::new(1.0, 2.0)).unwrap();
    plumb.move_item(&id, Point::new(30.0, 40.0)).unwrap();
    assert_eq!(plumb.position(&id), Some(Point::new(30.0, 40.0)));
}

// =============================================================
// Connections
// =============================================================

#[test]
fn source_to_target_connects() {
    let mut plumb = MemoryPlumb::new();
    let a = registered(&mut plumb, source("canvasItem0"));
    let b = registered(&mut plumb, target("canvasItem1"));
    let id = plumb.connect(&a, &b).unwrap();
    assert_eq!(plumb.connections(), &[Connection { id, from: a.id, to: b.id }]);
}

#[test]
fn source_to_source_is_role_mismatch() {
    let mut plumb = MemoryPlumb::new();
    let a = registered(&mut plumb, source("canvasItem0"));
    let b = registered(&mut plumb, source("canvasItem1"));
    let err = plumb.connect(&a, &b).unwrap_err();
    assert!(matches!(err, CanvasError::RoleMismatch { from: EndpointRole::Source, to: EndpointRole::Source }));
    assert!(plumb.connections().is_empty());
}

#[test]
fn target_to_source_is_role_mismatch() {
    let mut plumb = MemoryPlumb::new();
    let a = registered(&mut plumb, target("canvasItem0"));
    let b = registered(&mut plumb, source("canvasItem1"));
    assert!(matches!(plumb.connect(&a, &b), Err(CanvasError::RoleMismatch { .. })));
}

#[test]
fn unregistered_endpoint_is_unknown() {
    let mut plumb = MemoryPlumb::new();
    let a = registered(&mut plumb, source("canvasItem0"));
    let b = target("canvasItem1");
    let err = plumb.connect(&a, &b).unwrap_err();
    assert!(matches!(err, CanvasError::UnknownEndpoint(id) if id == b.id));
}

#[test]
fn connection_limit_is_enforced() {
    let mut plumb = MemoryPlumb::new();
    let mut limited = source("canvasItem0");
    limited.style.max_connections = Some(1);
    let a = registered(&mut plumb, limited);
    let b = registered(&mut plumb, target("canvasItem1"));
    let c = registered(&mut plumb, target("canvasItem2"));
    plumb.connect(&a, &b).unwrap();
    let err = plumb.connect(&a, &c).unwrap_err();
    assert!(matches!(err, CanvasError::ConnectionLimit(id) if id == a.id));
    assert_eq!(plumb.connection_count(&a.id), 1);
}

#[test]
fn unlimited_endpoints_accept_many_connections() {
    let mut plumb = MemoryPlumb::new();
    let a = registered(&mut plumb, source("canvasItem0"));
    for i in 1..5 {
        let t = registered(&mut plumb, target(&format!("canvasItem{i}")));
        plumb.connect(&a, &t).unwrap();
    }
    assert_eq!(plumb.connection_count(&a.id), 4);
}

// =============================================================
// Removal
// =============================================================

#[test]
fn remove_element_detaches_endpoints_and_connections() {
    let mut plumb = MemoryPlumb::new();
    let item = ItemId::from("canvasItem0");
    plumb.make_draggable(&item, Size::new(10.0, 10.0)).unwrap();
    let a = registered(&mut plumb, source("canvasItem0"));
    let b = registered(&mut plumb, target("canvasItem1"));
    plumb.connect(&a, &b).unwrap();

    plumb.remove_element(&item).unwrap();

    assert!(!plumb.is_draggable(&item));
    assert_eq!(plumb.endpoint_count(), 1);
    assert!(plumb.connections().is_empty());
}
