//! Configuration loading and its effect on controller installation.

use std::collections::BTreeMap;
use std::io::Write;

use directory_page::domain::{Document, ElementSpec, Rect, Viewport};
use directory_page::observability::init_tracing;
use directory_page::{initialize, Config, Event, PageRuntime, RecordingBackend};
use tempfile::NamedTempFile;

fn markers_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn from_map_reads_known_keys() {
    let mut map = BTreeMap::new();
    map.insert("markers_file".to_string(), " /srv/markers.toml ".to_string());
    map.insert("trace_level".to_string(), "directory_page=trace".to_string());
    map.insert("unrelated".to_string(), "x".to_string());

    let config = Config::from_map(&map);
    assert_eq!(config.markers_file.as_deref(), Some(std::path::Path::new("/srv/markers.toml")));
    assert_eq!(config.trace_level.as_deref(), Some("directory_page=trace"));
    assert_eq!(config.markers.nav_menu, "nav-menu");
}

#[test]
fn invalid_inline_markers_fall_back_to_defaults() {
    let mut map = BTreeMap::new();
    map.insert("markers".to_string(), "nav_menu = [".to_string());

    let config = Config::from_map(&map);
    assert_eq!(config.markers, directory_page::Markers::default());
}

#[test]
fn markers_file_beats_inline_markers() {
    let file = markers_file("active = \"is-open\"\nnav_menu = \"site-nav\"\n");
    let mut config = Config::default();
    config.markers.nav_menu = "inline-nav".to_string();
    config.markers_file = Some(file.path().to_path_buf());

    let state = initialize(&config, Document::new());
    assert_eq!(state.markers.nav_menu, "site-nav");
    assert_eq!(state.markers.active, "is-open");
    assert_eq!(state.markers.dropdown, "dropdown");
}

#[test]
fn unreadable_markers_file_keeps_inline_markers() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.markers.nav_menu = "inline-nav".to_string();
    config.markers_file = Some(dir.path().join("missing.toml"));

    let state = initialize(&config, Document::new());
    assert_eq!(state.markers.nav_menu, "inline-nav");
}

#[test]
fn custom_markers_drive_the_menu() {
    let file = markers_file(
        "active = \"is-open\"\nmobile_menu_button = \"burger\"\nnav_menu = \"site-nav\"\nexpanded_attr = \"data-open\"\n",
    );
    let config = Config {
        markers_file: Some(file.path().to_path_buf()),
        trace_level: Some("debug".to_string()),
        ..Default::default()
    };
    init_tracing(&config);

    let mut doc = Document::new();
    let body = doc.body();
    let burger = doc.append(body, ElementSpec::new("button").class("burger")).unwrap();
    let nav = doc.append(body, ElementSpec::new("nav").class("site-nav")).unwrap();

    let mut runtime = PageRuntime::new(initialize(&config, doc), RecordingBackend::default());
    runtime.dispatch(&Event::DocumentReady);
    assert!(runtime.dispatch(&Event::Click { target: burger }));

    let doc = &runtime.state().document;
    assert!(doc.has_class(nav, "is-open"));
    assert_eq!(doc.attr(burger, "data-open"), Some("true"));
    assert_eq!(doc.attr(burger, "aria-expanded"), None);
}

#[test]
fn pages_without_collaborators_still_start() {
    let mut runtime = PageRuntime::new(
        initialize(&Config::default(), Document::new()),
        RecordingBackend::default(),
    );
    runtime.dispatch(&Event::DocumentReady);

    let state = runtime.state();
    assert!(state.is_ready());
    assert!(state.menus.is_none());
    assert!(state.search.is_none());
    assert!(state.sort_filter.is_none());
    assert!(state.reveal.is_none());
    assert!(state.lazy_media.is_none());
    assert!(state.validation.is_none());
    assert!(state.accessibility.is_some());
}

fn two_lazy_images() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    for (src, y) in [("/img/top.jpg", 0.0), ("/img/below.jpg", 10.0)] {
        doc.append(
            body,
            ElementSpec::new("img").attr("data-src", src).rect(Rect::new(0.0, y, 100.0, 100.0)),
        )
        .unwrap();
    }
    doc
}

fn fetched_sources<B: directory_page::FormBackend>(runtime: &PageRuntime<B>) -> Vec<&str> {
    runtime.fetched_images().iter().map(|(_, src)| src.as_str()).collect()
}

#[test]
fn from_map_reads_viewport_size() {
    let mut map = BTreeMap::new();
    map.insert("viewport_width".to_string(), "1024".to_string());
    map.insert("viewport_height".to_string(), " 768.5 ".to_string());

    let config = Config::from_map(&map);
    assert_eq!(config.viewport, Some(Viewport::new(0.0, 0.0, 1024.0, 768.5)));
}

#[test]
fn partial_or_invalid_viewport_size_is_ignored() {
    for (width, height) in [("800", ""), ("0", "600"), ("wide", "600"), ("800", "-1")] {
        let mut map = BTreeMap::new();
        map.insert("viewport_width".to_string(), width.to_string());
        map.insert("viewport_height".to_string(), height.to_string());
        assert_eq!(Config::from_map(&map).viewport, None, "{width} x {height}");
    }
}

#[test]
fn unknown_viewport_defers_lazy_loading_until_first_scroll() {
    let mut runtime = PageRuntime::new(
        initialize(&Config::default(), two_lazy_images()),
        RecordingBackend::default(),
    );
    runtime.dispatch(&Event::DocumentReady);
    assert!(runtime.fetched_images().is_empty());

    runtime.dispatch(&Event::Scroll {
        viewport: Viewport::new(0.0, 0.0, 800.0, 600.0),
    });
    assert_eq!(fetched_sources(&runtime), vec!["/img/top.jpg", "/img/below.jpg"]);
}

#[test]
fn configured_viewport_loads_visible_images_on_ready() {
    let config = Config {
        viewport: Some(Viewport::new(0.0, 0.0, 800.0, 600.0)),
        ..Default::default()
    };
    let mut runtime = PageRuntime::new(initialize(&config, two_lazy_images()), RecordingBackend::default());
    runtime.dispatch(&Event::DocumentReady);

    assert_eq!(fetched_sources(&runtime), vec!["/img/top.jpg", "/img/below.jpg"]);
}
