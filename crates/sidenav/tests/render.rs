//! End-to-end rendering against the bundled template and a SimpleEngine one.

use serde_json::{json, Map, Value};
use sidenav::{default_engine, MenuBuilder, SimpleEngine, TemplateRegistry};

fn option(label: &str, url: &str) -> Map<String, Value> {
    json!({"label": label, "url": url}).as_object().cloned().unwrap()
}

fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in:\n{}", needle, html))
}

#[test]
fn test_empty_sidebar_renders_container_only() {
    let engine = default_engine();
    let html = MenuBuilder::new(&engine).render().unwrap();

    assert!(html.starts_with("<div class=\"sidebar-nav\">"));
    assert!(html.contains("<p class=\"sidebar-subtitle\">Navigation</p>"));
    assert!(!html.contains("<li"));
}

#[test]
fn test_dropdown_and_active_button_scenario() {
    let engine = default_engine();
    let mut builder = MenuBuilder::new(&engine);
    builder
        .add_button("b1", "Restart", "/restart", Some("refresh"), Some("btn-danger"), false)
        .add_dropdown(
            "d1",
            "Tools",
            vec![option("A", "/a"), option("B", "/b")],
            None,
            None,
        )
        .set_active_item("b1");
    let html = builder.render().unwrap();

    assert!(html.contains("<li class=\"\"><div class=\"btn-group\" id=\"nav-d1\">"));
    assert!(html.contains("<li class=\"active\"><button type=\"button\" class=\"btn btn-danger\" id=\"nav-b1\""));
    assert!(position(&html, "id=\"nav-d1\"") < position(&html, "id=\"nav-b1\""));
    assert!(position(&html, "<a href=\"/a\">A</a>") < position(&html, "<a href=\"/b\">B</a>"));
    assert!(html.contains("onclick=\"psm_goTo('/restart');\""));
    assert!(html.contains("<i class=\"icon-refresh\"></i> Restart"));
}

#[test]
fn test_kinds_group_regardless_of_call_order() {
    let engine = default_engine();
    let mut builder = MenuBuilder::new(&engine);
    builder
        .add_link("l1", "Home", "/", None)
        .add_button("b1", "Run", "/run", None, None, false)
        .add_link("l2", "Docs", "/docs", None)
        .add_dropdown("d1", "More", vec![], None, None);
    let html = builder.render().unwrap();

    let d1 = position(&html, "id=\"nav-d1\"");
    let b1 = position(&html, "id=\"nav-b1\"");
    let l1 = position(&html, "id=\"nav-l1\"");
    let l2 = position(&html, "id=\"nav-l2\"");
    assert!(d1 < b1 && b1 < l1 && l1 < l2);
}

#[test]
fn test_overwrite_keeps_position_without_duplicates() {
    let engine = default_engine();
    let mut builder = MenuBuilder::new(&engine);
    builder
        .add_link("a", "First", "/a", None)
        .add_link("b", "Second", "/b", None)
        .add_link("a", "Renamed", "/a2", None);
    let html = builder.render().unwrap();

    assert_eq!(html.matches("id=\"nav-a\"").count(), 1);
    assert!(!html.contains("First"));
    assert!(position(&html, "Renamed") < position(&html, "Second"));
    assert!(html.contains("href=\"/a2\""));
}

#[test]
fn test_quotes_are_backslash_escaped_and_markup_passes_through() {
    let engine = default_engine();
    let mut builder = MenuBuilder::new(&engine);
    builder
        .add_link("q", "<b>Bold</b>", "foo\"bar", None)
        .add_button("p", "Go", "/path\"x", None, None, false)
        .add_button("t", "Confirm", "confirm(\"sure?\")", None, None, true);
    let html = builder.render().unwrap();

    assert!(html.contains("href=\"foo\\\"bar\""));
    assert!(html.contains("onclick=\"psm_goTo('/path\\\"x');\""));
    assert!(html.contains("onclick=\"confirm(\\\"sure?\\\")\""));
    assert!(html.contains("<b>Bold</b>"));
}

#[test]
fn test_subtitle_overrides_template_default() {
    let engine = default_engine();
    let mut builder = MenuBuilder::new(&engine);
    builder.set_subtitle("Operations");
    let html = builder.render().unwrap();

    assert!(html.contains("<p class=\"sidebar-subtitle\">Operations</p>"));
    assert!(!html.contains("Navigation"));
}

#[test]
fn test_rendering_twice_is_identical() {
    let engine = default_engine();
    let mut builder = MenuBuilder::new(&engine);
    builder
        .add_dropdown("d", "D", vec![option("x", "/x")], Some("cog"), Some("btn-info"))
        .add_link("l", "L", "/l", None)
        .set_active_item("l")
        .set_subtitle("S");

    let first = builder.render().unwrap();
    let second = builder.render().unwrap();
    assert_eq!(first, second);
    assert_eq!(builder.registry().len(), 2);
}

#[test]
fn test_missing_resource_is_reported() {
    let engine = sidenav::MiniJinjaEngine::new(TemplateRegistry::new());
    let result = MenuBuilder::new(&engine).render();
    assert!(matches!(result, Err(sidenav::RenderError::TemplateNotFound(_))));
}

const SIMPLE_SIDEBAR: &str = concat!(
    "{#view main_sidebar_container}<nav><h6>{subtitle|Navigation}</h6><ul>",
    "{#each items}<li class=\"{class_active}\">{html_item}</li>{/each}</ul></nav>{/view}",
    "{#view main_sidebar_types_link}<a href=\"{url}\">{label}</a>{/view}",
    "{#view main_sidebar_types_button}<button onclick=\"{onclick}\">{label}</button>{/view}",
    "{#view main_sidebar_types_dropdown}<div>{label}:{#each options}<a href=\"{url}\">{label}</a>{/each}</div>{/view}",
);

#[test]
fn test_simple_engine_renders_same_protocol() {
    let mut registry = TemplateRegistry::new();
    registry.add_inline("main_sidebar.tpl.html", SIMPLE_SIDEBAR);
    let engine = SimpleEngine::new(registry);

    let mut builder = MenuBuilder::new(&engine);
    builder
        .add_link("l1", "Home", "/l", None)
        .add_button("b1", "Run", "/b", None, None, false)
        .add_dropdown("d1", "Tools", vec![option("A", "/A"), option("B", "/B")], None, None)
        .set_active_item("b1");

    assert_eq!(
        builder.render().unwrap(),
        concat!(
            "<nav><h6>Navigation</h6><ul>",
            "<li class=\"\"><div>Tools:<a href=\"/A\">A</a><a href=\"/B\">B</a></div></li>",
            "<li class=\"active\"><button onclick=\"psm_goTo('/b');\">Run</button></li>",
            "<li class=\"\"><a href=\"/l\">Home</a></li>",
            "</ul></nav>",
        )
    );
}
