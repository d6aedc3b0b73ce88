use super::*;

fn classes(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================
// Selector parsing
// =============================================================

#[test]
fn parse_id_selector() {
    let sel = Selector::parse("#canvas").unwrap();
    assert!(sel.matches("div", Some("canvas"), &[]));
    assert!(!sel.matches("div", Some("palette"), &[]));
    assert!(!sel.matches("div", None, &[]));
}

#[test]
fn parse_class_selector() {
    let sel = Selector::parse(".palette-item").unwrap();
    assert!(sel.matches("li", None, &classes(&["palette-item", "x"])));
    assert!(!sel.matches("li", None, &classes(&["x"])));
}

#[test]
fn parse_compound_selector() {
    let sel = Selector::parse("div.canvas-item.selected").unwrap();
    assert!(sel.matches("DIV", None, &classes(&["selected", "canvas-item"])));
    assert!(!sel.matches("span", None, &classes(&["selected", "canvas-item"])));
    assert!(!sel.matches("div", None, &classes(&["canvas-item"])));
}

#[test]
fn parse_universal_selector() {
    let sel = Selector::parse("*").unwrap();
    assert!(sel.matches("section", None, &[]));
}

#[test]
fn parse_selector_list() {
    let sel = Selector::parse("#a, .b").unwrap();
    assert!(sel.matches("div", Some("a"), &[]));
    assert!(sel.matches("div", None, &classes(&["b"])));
    assert!(!sel.matches("div", Some("c"), &[]));
}

#[test]
fn parse_rejects_empty() {
    assert!(matches!(Selector::parse(""), Err(CanvasError::InvalidSelector(_))));
    assert!(Selector::parse("#a,").is_err());
}

#[test]
fn parse_rejects_combinators() {
    assert!(Selector::parse("#canvas .item").is_err());
    assert!(Selector::parse("ul > li").is_err());
}

#[test]
fn parse_rejects_attribute_and_pseudo() {
    assert!(Selector::parse("div[data-type]").is_err());
    assert!(Selector::parse("li:first-child").is_err());
}

#[test]
fn parse_rejects_double_id() {
    assert!(Selector::parse("#a#b").is_err());
}

#[test]
fn parse_rejects_dangling_marker() {
    assert!(Selector::parse("div.").is_err());
    assert!(Selector::parse("#").is_err());
}

// =============================================================
// ElementInfo
// =============================================================

#[test]
fn element_builder_sets_fields() {
    let el = ElementInfo::new("LI")
        .with_id("task")
        .with_class("palette-item")
        .with_attr("data-type", "Task")
        .with_text("  Task  ")
        .with_rect(Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(el.tag, "li");
    assert_eq!(el.id.as_deref(), Some("task"));
    assert_eq!(el.attr("data-type"), Some("Task"));
    assert_eq!(el.attr("missing"), None);
    assert_eq!(el.text, "Task");
    assert_eq!(el.rect, Rect::new(1.0, 2.0, 3.0, 4.0));
}

// =============================================================
// StaticPage
// =============================================================

#[test]
fn static_page_selects_in_document_order() {
    let page = StaticPage::new()
        .with(ElementInfo::new("li").with_id("b").with_class("tpl"))
        .with(ElementInfo::new("div").with_id("canvas"))
        .with(ElementInfo::new("li").with_id("a").with_class("tpl"));
    let found = page.select(".tpl").unwrap();
    let ids: Vec<_> = found.iter().filter_map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn static_page_no_match_is_empty() {
    let page = StaticPage::new().with(ElementInfo::new("div").with_id("canvas"));
    assert!(page.select("#palette").unwrap().is_empty());
}

#[test]
fn static_page_propagates_invalid_selector() {
    let page = StaticPage::new();
    assert!(page.select("div > p").is_err());
}
