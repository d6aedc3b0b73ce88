use super::*;
use canvas::endpoint::{Anchor, EndpointStyle};

fn endpoint(role: EndpointRole, style: EndpointStyle) -> Endpoint {
    Endpoint::new(ItemId::from("canvasItem0"), role, style)
}

#[test]
fn source_options_use_dot_and_unlimited_connections() {
    let ep = endpoint(EndpointRole::Source, EndpointStyle::default_source());
    let opts = endpoint_options(&ep);
    assert_eq!(opts["uuid"], ep.id.to_string());
    assert_eq!(opts["anchor"], "Right");
    assert_eq!(opts["endpoint"], json!(["Dot", { "radius": 7.0 }]));
    assert_eq!(opts["paintStyle"]["fill"], "#7AB02C");
    assert_eq!(opts["isSource"], true);
    assert_eq!(opts["isTarget"], false);
    assert_eq!(opts["maxConnections"], -1);
}

#[test]
fn target_options_use_rectangle() {
    let ep = endpoint(EndpointRole::Target, EndpointStyle::default_target());
    let opts = endpoint_options(&ep);
    assert_eq!(opts["anchor"], "Left");
    assert_eq!(opts["endpoint"], json!(["Rectangle", { "width": 14.0, "height": 14.0 }]));
    assert_eq!(opts["isSource"], false);
    assert_eq!(opts["isTarget"], true);
}

#[test]
fn connection_limit_is_forwarded() {
    let mut style = EndpointStyle::default_source();
    style.max_connections = Some(3);
    style.anchor = Anchor::BottomLeft;
    let opts = endpoint_options(&endpoint(EndpointRole::Source, style));
    assert_eq!(opts["maxConnections"], 3);
    assert_eq!(opts["anchor"], "BottomLeft");
}

// --- Registry ---

fn registered(registry: &mut Registry<&'static str>, item: &str, handle: &'static str) -> EndpointId {
    let ep = Endpoint::new(ItemId::from(item), EndpointRole::Source, EndpointStyle::default_source());
    registry.endpoints.insert(ep.id, (ep.item.clone(), handle));
    registry.draggables.insert(ep.item.clone());
    ep.id
}

#[test]
fn registry_reset_drops_handles_from_the_old_container() {
    let mut registry = Registry::new();
    let old = registered(&mut registry, "canvasItem0", "old-handle");
    assert_eq!(registry.handle(&old).unwrap(), &"old-handle");

    registry.reset();
    assert!(matches!(registry.handle(&old), Err(CanvasError::UnknownEndpoint(id)) if id == old));
    assert!(registry.draggables.is_empty());

    // Registering the same item again after a reset is not skipped.
    let new = registered(&mut registry, "canvasItem0", "new-handle");
    assert_eq!(registry.handle(&new).unwrap(), &"new-handle");
    assert!(registry.draggables.contains(&ItemId::from("canvasItem0")));
}

#[test]
fn registry_forgets_only_the_removed_item() {
    let mut registry = Registry::new();
    let a = registered(&mut registry, "canvasItem0", "a");
    let b = registered(&mut registry, "canvasItem1", "b");

    registry.forget_item(&ItemId::from("canvasItem0"));
    assert!(registry.handle(&a).is_err());
    assert!(!registry.has_endpoints(&ItemId::from("canvasItem0")));
    assert!(registry.has_endpoints(&ItemId::from("canvasItem1")));
    assert_eq!(registry.handle(&b).unwrap(), &"b");
}

#[test]
fn lengths_are_css_pixels() {
    assert_eq!(px(10.0), "10px");
    assert_eq!(px(12.5), "12.5px");
}
