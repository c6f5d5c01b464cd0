use serde::{Deserialize, Serialize};

use mesh_types::{BoundingBox, Rgba};
use stl_format::{ParseConfig, StlFormat};

/// Messages from the UI (JavaScript main thread) to the viewer (WASM Worker).
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToViewer {
    /// Decode an STL file delivered as base64-encoded bytes.
    LoadStlBytes {
        name: String,
        data_base64: String,
        #[serde(default)]
        config: ParseConfig,
    },
    /// Decode an STL file delivered as a one-byte-per-char string.
    LoadStlText {
        name: String,
        text: String,
        #[serde(default)]
        config: ParseConfig,
    },
    /// Drop one mesh.
    RemoveMesh { index: usize },
    /// Drop every mesh.
    Clear,
    /// Summarize every held mesh.
    ListMeshes,
}

/// Messages from the viewer (WASM Worker) to the UI (JavaScript main thread).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewerToUi {
    /// A mesh was decoded; its buffers are available by index.
    MeshLoaded { index: usize, summary: MeshSummary },

    MeshRemoved { index: usize },

    Cleared,

    MeshesListed { meshes: Vec<MeshSummary> },

    /// Decoding or lookup failed. Nothing was stored.
    Error { message: String },
}

/// What the UI needs to frame and shade a mesh without copying its buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub name: String,
    pub format: StlFormat,
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub has_colors: bool,
    pub bounding_box: Option<BoundingBox>,
    pub default_color: Option<Rgba>,
}
