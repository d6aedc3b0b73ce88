#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn role_display() {
    assert_eq!(EndpointRole::Source.to_string(), "source");
    assert_eq!(EndpointRole::Target.to_string(), "target");
}

#[test]
fn role_serializes_lowercase() {
    let json = serde_json::to_string(&EndpointRole::Target).unwrap();
    assert_eq!(json, "\"target\"");
}

#[test]
fn anchor_relative_corners() {
    assert_eq!(Anchor::TopLeft.relative(), (0.0, 0.0));
    assert_eq!(Anchor::BottomRight.relative(), (1.0, 1.0));
    assert_eq!(Anchor::Right.relative(), (1.0, 0.5));
    assert_eq!(Anchor::Center.relative(), (0.5, 0.5));
}

#[test]
fn default_source_style() {
    let style = EndpointStyle::default_source();
    assert_eq!(style.anchor, Anchor::Right);
    assert!(matches!(style.shape, EndpointShape::Dot { .. }));
    assert!(style.max_connections.is_none());
}

#[test]
fn default_target_style() {
    let style = EndpointStyle::default_target();
    assert_eq!(style.anchor, Anchor::Left);
    assert!(matches!(style.shape, EndpointShape::Rectangle { .. }));
}

#[test]
fn new_endpoints_get_distinct_ids() {
    let item = ItemId::from("canvasItem0");
    let a = Endpoint::new(item.clone(), EndpointRole::Source, EndpointStyle::default_source());
    let b = Endpoint::new(item, EndpointRole::Source, EndpointStyle::default_source());
    assert_ne!(a.id, b.id);
}

#[test]
fn style_deserializes_with_tagged_shape() {
    let style: EndpointStyle = serde_json::from_value(serde_json::json!({
        "color": "#fff",
        "shape": { "type": "dot", "radius": 4.0 },
        "anchor": "Bottom",
    }))
    .unwrap();
    assert_eq!(style.shape, EndpointShape::Dot { radius: 4.0 });
    assert_eq!(style.anchor, Anchor::Bottom);
    assert_eq!(style.max_connections, None);
}
