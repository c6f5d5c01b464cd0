use mesh_types::Mesh;
use stl_format::{ParseError, StlFormat};

use crate::messages::MeshSummary;

/// A decoded mesh held for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMesh {
    pub name: String,
    pub format: StlFormat,
    pub mesh: Mesh,
}

impl LoadedMesh {
    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            name: self.name.clone(),
            format: self.format,
            triangle_count: self.mesh.triangle_count(),
            vertex_count: self.mesh.vertex_count(),
            has_colors: self.mesh.has_colors(),
            bounding_box: self.mesh.bounding_box(),
            default_color: self.mesh.default_color,
        }
    }
}

/// Meshes decoded so far, in load order.
///
/// Indices are positions in load order and shift down when an earlier mesh is
/// removed.
#[derive(Debug, Default)]
pub struct ViewerState {
    pub meshes: Vec<LoadedMesh>,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a mesh and return its index.
    pub fn insert(&mut self, loaded: LoadedMesh) -> usize {
        self.meshes.push(loaded);
        self.meshes.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&LoadedMesh, BridgeError> {
        self.meshes
            .get(index)
            .ok_or(BridgeError::MeshNotFound { index })
    }

    pub fn remove(&mut self, index: usize) -> Result<LoadedMesh, BridgeError> {
        if index < self.meshes.len() {
            Ok(self.meshes.remove(index))
        } else {
            Err(BridgeError::MeshNotFound { index })
        }
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
    }
}

/// Errors from the WASM bridge layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid base64 payload: {reason}")]
    InvalidBase64 { reason: String },

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("no mesh at index {index}")]
    MeshNotFound { index: usize },
}
