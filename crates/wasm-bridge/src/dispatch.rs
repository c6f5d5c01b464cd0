use base64::Engine as _;
use tracing::{info, warn};

use crate::messages::{UiToViewer, ViewerToUi};
use crate::viewer_state::{BridgeError, LoadedMesh, ViewerState};
use stl_format::{ParseConfig, RawInput};

/// Dispatch a UI message to the viewer and return a response.
///
/// Each message is handled against `state`; any failure becomes a
/// [`ViewerToUi::Error`] and leaves the state unchanged.
pub fn dispatch(state: &mut ViewerState, msg: UiToViewer) -> ViewerToUi {
    match handle_message(state, msg) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "viewer request failed");
            ViewerToUi::Error {
                message: e.to_string(),
            }
        }
    }
}

fn handle_message(state: &mut ViewerState, msg: UiToViewer) -> Result<ViewerToUi, BridgeError> {
    match msg {
        UiToViewer::LoadStlBytes {
            name,
            data_base64,
            config,
        } => {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(data_base64.trim())
                .map_err(|e| BridgeError::InvalidBase64 {
                    reason: e.to_string(),
                })?;
            load(state, name, RawInput::from(bytes), &config)
        }

        UiToViewer::LoadStlText { name, text, config } => {
            load(state, name, RawInput::from(text), &config)
        }

        UiToViewer::RemoveMesh { index } => {
            state.remove(index)?;
            Ok(ViewerToUi::MeshRemoved { index })
        }

        UiToViewer::Clear => {
            state.clear();
            Ok(ViewerToUi::Cleared)
        }

        UiToViewer::ListMeshes => Ok(ViewerToUi::MeshesListed {
            meshes: state.meshes.iter().map(LoadedMesh::summary).collect(),
        }),
    }
}

/// Decode `input` and store the result under `name`.
pub fn load(
    state: &mut ViewerState,
    name: String,
    input: RawInput<'_>,
    config: &ParseConfig,
) -> Result<ViewerToUi, BridgeError> {
    let decoded = stl_format::decode(input, config)?;
    let loaded = LoadedMesh {
        name,
        format: decoded.format,
        mesh: decoded.mesh,
    };
    let summary = loaded.summary();
    let index = state.insert(loaded);
    info!(index, name = %summary.name, triangles = summary.triangle_count, "mesh loaded");
    Ok(ViewerToUi::MeshLoaded { index, summary })
}
