use super::*;

fn template(kind: &str) -> PaletteItem {
    PaletteItem { kind: kind.to_string(), label: kind.to_string() }
}

// =============================================================
// PaletteItem::from_element
// =============================================================

#[test]
fn kind_from_attribute() {
    let el = ElementInfo::new("li").with_id("tpl-1").with_attr("data-type", "Task").with_text("My task");
    let item = PaletteItem::from_element(&el, "data-type").unwrap();
    assert_eq!(item.kind, "Task");
    assert_eq!(item.label, "My task");
}

#[test]
fn kind_falls_back_to_id() {
    let el = ElementInfo::new("li").with_id("dataset").with_text("Dataset");
    let item = PaletteItem::from_element(&el, "data-type").unwrap();
    assert_eq!(item.kind, "dataset");
}

#[test]
fn empty_attribute_falls_back_to_id() {
    let el = ElementInfo::new("li").with_id("dataset").with_attr("data-type", "");
    let item = PaletteItem::from_element(&el, "data-type").unwrap();
    assert_eq!(item.kind, "dataset");
}

#[test]
fn kind_falls_back_to_label() {
    let el = ElementInfo::new("li").with_text("Filter");
    let item = PaletteItem::from_element(&el, "data-type").unwrap();
    assert_eq!(item.kind, "Filter");
}

#[test]
fn anonymous_element_is_skipped() {
    let el = ElementInfo::new("li");
    assert!(PaletteItem::from_element(&el, "data-type").is_none());
}

// =============================================================
// Palette
// =============================================================

#[test]
fn palette_lookup_by_kind() {
    let palette = Palette::new(vec![template("Task"), template("Dataset")], ".tpl", "#canvas");
    assert_eq!(palette.template("Dataset").unwrap().kind, "Dataset");
    assert!(palette.template("Missing").is_none());
    assert_eq!(palette.len(), 2);
    assert!(!palette.is_empty());
}

#[test]
fn palette_remembers_selectors() {
    let palette = Palette::new(vec![template("Task")], ".tpl", "#canvas");
    assert_eq!(palette.selector, ".tpl");
    assert_eq!(palette.canvas_selector, "#canvas");
}

#[test]
fn noop_hooks_do_nothing() {
    let mut hooks = NoopHooks;
    let t = template("Task");
    hooks.on_start(&t);
    hooks.on_stop(&t, true);
    assert_eq!(t, template("Task"));
}
