use base64::Engine as _;
use stl_format::{to_text, ParseConfig, StlFormat};
use test_harness::helpers::{unit_cube, unit_triangle};
use test_harness::stl::{export_ascii_stl, export_binary_stl, export_colored_binary_stl};
use wasm_bridge::*;

// ── Helper functions ─────────────────────────────────────────────────────

fn encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn load_bytes(state: &mut ViewerState, name: &str, bytes: &[u8]) -> ViewerToUi {
    dispatch(
        state,
        UiToViewer::LoadStlBytes {
            name: name.to_string(),
            data_base64: encode(bytes),
            config: ParseConfig::default(),
        },
    )
}

fn expect_loaded(response: ViewerToUi) -> (usize, MeshSummary) {
    match response {
        ViewerToUi::MeshLoaded { index, summary } => (index, summary),
        other => panic!("expected MeshLoaded, got {:?}", other),
    }
}

// ── Loading ──────────────────────────────────────────────────────────────

#[test]
fn load_binary_bytes() {
    let mut state = ViewerState::new();
    let (index, summary) = expect_loaded(load_bytes(
        &mut state,
        "cube",
        &export_binary_stl(&unit_cube(), "cube"),
    ));

    assert_eq!(index, 0);
    assert_eq!(summary.name, "cube");
    assert_eq!(summary.format, StlFormat::Binary);
    assert_eq!(summary.triangle_count, 12);
    assert_eq!(summary.vertex_count, 36);
    assert!(!summary.has_colors);
    let bbox = summary.bounding_box.unwrap();
    assert_eq!(bbox.min, [0.0; 3]);
    assert_eq!(bbox.max, [1.0; 3]);
}

#[test]
fn load_ascii_text() {
    let mut state = ViewerState::new();
    let text = export_ascii_stl(&[unit_triangle()], "tri").unwrap();
    let (_, summary) = expect_loaded(dispatch(
        &mut state,
        UiToViewer::LoadStlText {
            name: "tri".to_string(),
            text,
            config: ParseConfig::default(),
        },
    ));
    assert_eq!(summary.format, StlFormat::Ascii);
    assert_eq!(summary.triangle_count, 1);
    assert_eq!(state.get(0).unwrap().mesh.normals, [0.0, 0.0, 1.0].repeat(3));
}

#[test]
fn load_binary_as_text() {
    let mut state = ViewerState::new();
    let stl = export_colored_binary_stl(&unit_cube(), "cube", [255, 255, 0, 255]);
    let (_, summary) = expect_loaded(dispatch(
        &mut state,
        UiToViewer::LoadStlText {
            name: "cube".to_string(),
            text: to_text(&stl),
            config: ParseConfig::default(),
        },
    ));
    assert_eq!(summary.format, StlFormat::Binary);
    assert!(summary.has_colors);
    assert_eq!(summary.default_color.map(|c| c.a), Some(1.0));
}

#[test]
fn indices_follow_load_order() {
    let mut state = ViewerState::new();
    let stl = export_binary_stl(&[unit_triangle()], "t");
    let (first, _) = expect_loaded(load_bytes(&mut state, "a", &stl));
    let (second, _) = expect_loaded(load_bytes(&mut state, "b", &stl));
    assert_eq!((first, second), (0, 1));
    assert_eq!(state.get(1).unwrap().name, "b");
}

// ── Failures ─────────────────────────────────────────────────────────────

#[test]
fn invalid_base64_is_error() {
    let mut state = ViewerState::new();
    let response = dispatch(
        &mut state,
        UiToViewer::LoadStlBytes {
            name: "bad".to_string(),
            data_base64: "not base64!!".to_string(),
            config: ParseConfig::default(),
        },
    );
    match response {
        ViewerToUi::Error { message } => assert!(message.contains("base64"), "{}", message),
        other => panic!("expected Error, got {:?}", other),
    }
    assert!(state.meshes.is_empty());
}

#[test]
fn malformed_stl_stores_nothing() {
    let mut state = ViewerState::new();
    let mut stl = export_binary_stl(&unit_cube(), "\u{e9}");
    stl.truncate(200);
    let response = load_bytes(&mut state, "broken", &stl);
    match response {
        ViewerToUi::Error { message } => assert!(message.contains("malformed input"), "{}", message),
        other => panic!("expected Error, got {:?}", other),
    }
    assert!(state.meshes.is_empty());
}

#[test]
fn remove_unknown_index_is_error() {
    let mut state = ViewerState::new();
    let response = dispatch(&mut state, UiToViewer::RemoveMesh { index: 3 });
    assert!(matches!(response, ViewerToUi::Error { .. }));
}

// ── Management ───────────────────────────────────────────────────────────

#[test]
fn list_remove_clear() {
    let mut state = ViewerState::new();
    let stl = export_binary_stl(&[unit_triangle()], "t");
    load_bytes(&mut state, "a", &stl);
    load_bytes(&mut state, "b", &stl);

    match dispatch(&mut state, UiToViewer::ListMeshes) {
        ViewerToUi::MeshesListed { meshes } => {
            let names: Vec<&str> = meshes.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(names, vec!["a", "b"]);
        }
        other => panic!("expected MeshesListed, got {:?}", other),
    }

    assert!(matches!(
        dispatch(&mut state, UiToViewer::RemoveMesh { index: 0 }),
        ViewerToUi::MeshRemoved { index: 0 }
    ));
    assert_eq!(state.get(0).unwrap().name, "b");

    assert!(matches!(dispatch(&mut state, UiToViewer::Clear), ViewerToUi::Cleared));
    assert!(state.meshes.is_empty());
}

// ── Wire format ──────────────────────────────────────────────────────────

#[test]
fn messages_use_type_tag() {
    let json = format!(
        r#"{{"type":"LoadStlBytes","name":"cube","data_base64":"{}","config":{{"format":"Binary"}}}}"#,
        encode(&export_binary_stl(&unit_cube(), "cube"))
    );
    let msg: UiToViewer = serde_json::from_str(&json).unwrap();
    let mut state = ViewerState::new();
    let response = dispatch(&mut state, msg);

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["type"], "MeshLoaded");
    assert_eq!(value["summary"]["format"], "Binary");
    assert_eq!(value["summary"]["triangle_count"], 12);
}

#[test]
fn config_defaults_when_omitted() {
    let msg: UiToViewer =
        serde_json::from_str(r#"{"type":"LoadStlText","name":"t","text":"solid t\nendsolid t\n"}"#)
            .unwrap();
    match msg {
        UiToViewer::LoadStlText { config, .. } => assert_eq!(config, ParseConfig::default()),
        other => panic!("expected LoadStlText, got {:?}", other),
    }
}
