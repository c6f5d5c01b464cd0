//! WASM entry points for the web worker.
//!
//! This module is only compiled for the `wasm32` target. It provides the
//! `#[wasm_bindgen]` functions that JavaScript calls from the web worker.

use wasm_bindgen::prelude::*;

use crate::dispatch;
use crate::messages::{UiToViewer, ViewerToUi};
use crate::viewer_state::ViewerState;
use mesh_types::Mesh;
use stl_format::{ParseConfig, RawInput};

// Viewer state, single-threaded in the web worker.
thread_local! {
    static VIEWER_STATE: std::cell::RefCell<ViewerState> = std::cell::RefCell::new(ViewerState::new());
}

/// Install the panic hook. Call once before any other function.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Process a JSON message from the UI and return a JSON response.
///
/// The input should be a JSON-serialized `UiToViewer` message.
/// Returns a JSON-serialized `ViewerToUi` response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let response = VIEWER_STATE.with(|cell| {
        let mut state = cell.borrow_mut();
        match serde_json::from_str::<UiToViewer>(json_input) {
            Ok(msg) => dispatch::dispatch(&mut state, msg),
            Err(e) => ViewerToUi::Error {
                message: format!("Failed to parse message: {}", e),
            },
        }
    });
    to_json(&response)
}

/// Decode STL bytes straight from an `ArrayBuffer` view, skipping base64.
///
/// Returns a JSON-serialized `ViewerToUi` response.
#[wasm_bindgen]
pub fn load_stl(name: &str, data: &[u8]) -> String {
    let response = VIEWER_STATE.with(|cell| {
        let mut state = cell.borrow_mut();
        dispatch::load(
            &mut state,
            name.to_string(),
            RawInput::from(data),
            &ParseConfig::default(),
        )
        .unwrap_or_else(|e| ViewerToUi::Error {
            message: e.to_string(),
        })
    });
    to_json(&response)
}

/// Vertex positions of a held mesh, [x0, y0, z0, x1, y1, z1, ...].
///
/// The array is a copy; it stays valid across WASM memory growth.
#[wasm_bindgen]
pub fn get_mesh_positions(index: usize) -> js_sys::Float32Array {
    with_mesh(index, |mesh| js_sys::Float32Array::from(mesh.positions.as_slice()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

/// Per-vertex normals of a held mesh, [nx0, ny0, nz0, ...].
#[wasm_bindgen]
pub fn get_mesh_normals(index: usize) -> js_sys::Float32Array {
    with_mesh(index, |mesh| js_sys::Float32Array::from(mesh.normals.as_slice()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

/// Per-vertex RGB colours of a held mesh, or an empty array when it has none.
#[wasm_bindgen]
pub fn get_mesh_colors(index: usize) -> js_sys::Float32Array {
    with_mesh(index, |mesh| {
        mesh.colors
            .as_deref()
            .map(js_sys::Float32Array::from)
            .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
    })
    .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

/// Number of meshes currently held.
#[wasm_bindgen]
pub fn get_mesh_count() -> usize {
    VIEWER_STATE.with(|cell| cell.borrow().meshes.len())
}

/// Helper: access a held mesh and apply a function to it.
fn with_mesh<T>(index: usize, f: impl FnOnce(&Mesh) -> T) -> Option<T> {
    VIEWER_STATE.with(|cell| {
        let state = cell.borrow();
        state.meshes.get(index).map(|loaded| f(&loaded.mesh))
    })
}

fn to_json(response: &ViewerToUi) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"Serialization failed: {}"}}"#, e)
    })
}
