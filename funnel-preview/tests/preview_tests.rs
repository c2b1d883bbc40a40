use std::fs;
use std::path::PathBuf;

use funnel_model::TextAlign;
use funnel_preview::color::Rgba8;
use funnel_preview::render::{Element, ImageRole, DEFAULT_TEXT};
use funnel_preview::viewport::{Axis, ViewportPreset};
use funnel_preview::{FunnelStore, PreviewController, UploadDialog};
use serde_json::json;
use tempfile::TempDir;

struct Session {
    _dir: TempDir,
    store: FunnelStore,
    dialog: UploadDialog,
    preview: PreviewController,
}

fn upload(value: serde_json::Value) -> Session {
    let dir = TempDir::new().expect("tempdir");
    let path: PathBuf = dir.path().join("test-funnel-data.json");
    fs::write(&path, value.to_string()).expect("write funnel file");

    let mut store = FunnelStore::new();
    let mut dialog = UploadDialog::new();
    dialog.open();
    dialog.upload_path_blocking(&path, &mut store).expect("upload succeeds");
    Session { _dir: dir, store, dialog, preview: PreviewController::new() }
}

fn single_page(blocks: serde_json::Value) -> serde_json::Value {
    json!({
        "name": "The preview funnel",
        "bgColor": "#ffffff",
        "pages": [{ "id": "page-1", "blocks": blocks }]
    })
}

fn two_pages() -> serde_json::Value {
    json!({
        "name": "Two pages",
        "bgColor": "#fafafa",
        "pages": [
            { "id": "page-1", "blocks": [
                { "id": "b1", "type": "text", "text": "Welcome to page one", "color": "#111111", "align": "left" }
            ]},
            { "id": "page-2", "blocks": [
                { "id": "b2", "type": "text", "text": "And this is page two", "color": "#222222", "align": "right" }
            ]}
        ]
    })
}

#[test]
fn uploading_shows_name_and_first_page() {
    let mut s = upload(single_page(json!([
        { "id": "block-1", "type": "text", "text": "This is a text block", "color": "#000000", "align": "center" }
    ])));

    assert_eq!(s.store.get().map(|d| d.name.as_str()), Some("The preview funnel"));
    assert!(!s.dialog.is_open());
    let view = s.preview.page_view(&s.store).expect("page 0 renders");
    assert_eq!(view.index, 0);
    assert_eq!(view.page_id, "page-1");
    assert!(view.contains_text("This is a text block"));
}

#[test]
fn text_block_carries_colour_and_alignment() {
    let mut s = upload(single_page(json!([
        { "id": "block-1", "type": "text", "text": "This is a text block", "color": "#ff0000", "align": "center" }
    ])));
    let view = s.preview.page_view(&s.store).expect("renders");

    match view.find_paragraph("text block") {
        Some(Element::Paragraph { color, align, .. }) => {
            assert_eq!(*color, Rgba8::rgb(0xff, 0, 0));
            assert_eq!(*align, TextAlign::Center);
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn image_block_and_list_images_are_told_apart() {
    let src = "https://via.example.com/150";
    let mut s = upload(single_page(json!([
        { "id": "block-1", "type": "image", "src": src },
        { "id": "block-2", "type": "list", "items": [
            { "title": "List item 1", "description": "First description", "src": src },
            { "title": "List item 2", "description": "Second description", "src": src }
        ]}
    ])));
    let view = s.preview.page_view(&s.store).expect("renders");

    let block_images = view.images(ImageRole::Block);
    let item_images = view.images(ImageRole::ListItem);
    assert_eq!(block_images.len(), 1);
    assert_eq!(item_images.len(), 2);
    assert_eq!(block_images[0].uri, src);
    assert!(item_images.iter().all(|i| i.uri == src));

    match &view.elements[1] {
        Element::List { items, .. } => {
            let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
            assert_eq!(titles, ["List item 1", "List item 2"]);
            assert_eq!(items[1].description, "Second description");
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn button_block_carries_both_colours() {
    let mut s = upload(single_page(json!([
        { "id": "block-1", "type": "button", "text": "Click me", "color": "#ffffff", "bgColor": "#000000" }
    ])));
    let view = s.preview.page_view(&s.store).expect("renders");

    assert_eq!(
        view.elements,
        vec![Element::Button {
            block_id: "block-1".into(),
            label: "Click me".into(),
            foreground: Rgba8::WHITE,
            background: Rgba8::BLACK,
        }]
    );
}

#[test]
fn blocks_render_in_document_order() {
    let mut s = upload(single_page(json!([
        { "id": "a", "type": "text", "text": "first", "color": "#000", "align": "left" },
        { "id": "b", "type": "image", "src": "x.png" },
        { "id": "c", "type": "button", "text": "third", "color": "#fff", "bgColor": "#000" }
    ])));
    let view = s.preview.page_view(&s.store).expect("renders");
    let ids: Vec<&str> = view.elements.iter().filter_map(Element::block_id).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn relative_image_paths_resolve_next_to_the_upload() {
    let mut s = upload(single_page(json!([
        { "id": "img", "type": "image", "src": "assets/hero.png" }
    ])));
    let origin_dir = s
        .store
        .origin()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("origin");
    let view = s.preview.page_view(&s.store).expect("renders");

    let uri = &view.images(ImageRole::Block)[0].uri;
    assert!(uri.starts_with("file://"), "uri: {uri}");
    assert!(uri.ends_with("hero.png"), "uri: {uri}");
    assert!(uri.contains(&origin_dir.display().to_string()), "uri: {uri}");
}

#[test]
fn unknown_block_type_is_shown_as_an_error_card() {
    let mut s = upload(single_page(json!([
        { "id": "v1", "type": "video", "src": "clip.mp4" },
        { "id": "t1", "type": "text", "text": "still here", "color": "#000", "align": "left" }
    ])));
    let view = s.preview.page_view(&s.store).expect("renders");

    match &view.elements[0] {
        Element::Invalid { block_id, message } => {
            assert_eq!(block_id.as_deref(), Some("v1"));
            assert!(message.contains("video"), "message: {message}");
        }
        other => panic!("expected invalid card, got {other:?}"),
    }
    assert!(view.contains_text("still here"), "following blocks still render");
}

#[test]
fn bad_colours_fall_back_to_defaults() {
    let mut s = upload(json!({
        "name": "X",
        "bgColor": "not-a-colour",
        "pages": [{ "id": "p1", "blocks": [
            { "id": "t", "type": "text", "text": "hi", "color": "not-a-colour", "align": "justify" }
        ]}]
    }));
    let view = s.preview.page_view(&s.store).expect("renders");
    assert_eq!(view.background, Rgba8::WHITE);
    match &view.elements[0] {
        Element::Paragraph { color, align, .. } => {
            assert_eq!(*color, DEFAULT_TEXT);
            assert_eq!(*align, TextAlign::Justify);
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn named_and_functional_colours_render_exactly() {
    let mut s = upload(json!({
        "name": "X",
        "bgColor": "lightblue",
        "pages": [{ "id": "p1", "blocks": [
            { "id": "t", "type": "text", "text": "hi", "color": "red", "align": "left" },
            { "id": "b", "type": "button", "text": "Go", "color": "rgb(255, 255, 0)", "bgColor": "hsl(240, 100%, 50%)" }
        ]}]
    }));
    let view = s.preview.page_view(&s.store).expect("renders");
    assert_eq!(view.background, Rgba8::rgb(0xad, 0xd8, 0xe6));
    match &view.elements[0] {
        Element::Paragraph { color, .. } => assert_eq!(*color, Rgba8::rgb(255, 0, 0)),
        other => panic!("expected paragraph, got {other:?}"),
    }
    match &view.elements[1] {
        Element::Button { foreground, background, .. } => {
            assert_eq!(*foreground, Rgba8::rgb(255, 255, 0));
            assert_eq!(*background, Rgba8::rgb(0, 0, 255));
        }
        other => panic!("expected button, got {other:?}"),
    }
}

#[test]
fn unusual_alignment_still_renders_the_text() {
    let mut s = upload(single_page(json!([
        { "id": "u", "type": "text", "text": "yo", "color": "#f00", "align": "inherit" },
        { "id": "v", "type": "text", "text": "centred-ish", "color": "#f00", "align": "middle" }
    ])));
    let view = s.preview.page_view(&s.store).expect("renders");
    assert!(view.elements.iter().all(|e| matches!(e, Element::Paragraph { .. })));
    match view.find_paragraph("yo") {
        Some(Element::Paragraph { color, align, .. }) => {
            assert_eq!(*color, Rgba8::rgb(255, 0, 0));
            assert_eq!(*align, TextAlign::Start);
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
    assert!(view.contains_text("centred-ish"));
}

#[test]
fn single_empty_page_disables_both_directions() {
    let mut s = upload(json!({ "name": "X", "bgColor": "#fff", "pages": [{ "id": "p1", "blocks": [] }] }));
    let view = s.preview.page_view(&s.store).expect("renders");
    assert!(view.elements.is_empty());
    assert_eq!(view.background, Rgba8::WHITE);
    assert_eq!(s.store.get().map(|d| d.name.as_str()), Some("X"));

    assert!(!s.preview.pager().can_go_previous());
    assert!(!s.preview.pager().can_go_next());
}

#[test]
fn next_then_previous_round_trips() {
    let mut s = upload(two_pages());

    let first = s.preview.page_view(&s.store).cloned().expect("page 1");
    assert!(!s.preview.pager().can_go_previous());
    assert!(s.preview.pager().can_go_next());

    assert!(s.preview.go_next());
    let second = s.preview.page_view(&s.store).cloned().expect("page 2");
    assert!(second.contains_text("And this is page two"));
    assert!(!second.contains_text("Welcome to page one"));
    assert!(s.preview.pager().can_go_previous());
    assert!(!s.preview.pager().can_go_next());
    assert!(!s.preview.go_next(), "next is a no-op on the last page");

    assert!(s.preview.go_previous());
    let back = s.preview.page_view(&s.store).cloned().expect("page 1 again");
    assert!(!back.contains_text("And this is page two"));
    assert_eq!(back, first);
    assert!(!s.preview.go_previous(), "previous is a no-op on the first page");
}

#[test]
fn new_upload_starts_from_the_first_page() {
    let mut s = upload(two_pages());
    s.preview.page_view(&s.store);
    s.preview.go_next();
    assert_eq!(s.preview.pager().current(), 1);

    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("again.json");
    fs::write(&path, two_pages().to_string()).expect("write");
    s.dialog.upload_path_blocking(&path, &mut s.store).expect("second upload");

    let view = s.preview.page_view(&s.store).expect("renders");
    assert_eq!(view.index, 0);
    assert_eq!(s.preview.pager().current(), 0);
}

#[test]
fn empty_store_renders_nothing() {
    let store = FunnelStore::new();
    let mut preview = PreviewController::new();
    assert!(preview.page_view(&store).is_none());
    assert!(!preview.pager().can_go_next());
    assert!(!preview.go_next());
}

#[test]
fn viewport_rejects_out_of_range_input_and_locks_for_presets() {
    let mut preview = PreviewController::new();
    let vp = preview.viewport_mut();
    assert!(vp.set_dimension(Axis::Width, 500));
    assert!(vp.set_dimension(Axis::Height, 700));
    assert!(!vp.set_dimension(Axis::Width, 1000));
    assert!(!vp.set_dimension(Axis::Height, 100));
    assert_eq!((vp.width(), vp.height()), (500, 700));

    vp.select_preset(ViewportPreset::Pixel5);
    assert_eq!((vp.width(), vp.height()), (393, 851));
    assert!(!vp.dimension_inputs_enabled());

    vp.resize_to(420, 700);
    assert_eq!((vp.width(), vp.height()), (420, 700));
}
