use crate::color::{Rgb, Rgba};
use crate::mesh::{Mesh, Vec3, FLOATS_PER_TRIANGLE};

/// Flattens facet records into the parallel buffers of a [`Mesh`].
///
/// Colour presence is fixed at construction: a colour-carrying assembler
/// writes a colour for every vertex, a plain one never does.
#[derive(Debug, Clone)]
pub struct MeshAssembler {
    positions: Vec<f32>,
    normals: Vec<f32>,
    colors: Option<Vec<f32>>,
    default_color: Option<Rgba>,
}

impl MeshAssembler {
    /// An assembler for meshes without per-vertex colours.
    pub fn without_colors() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            colors: None,
            default_color: None,
        }
    }

    /// An assembler emitting colours, remembering the header default.
    pub fn with_colors(default_color: Rgba) -> Self {
        Self {
            colors: Some(Vec::new()),
            default_color: Some(default_color),
            ..Self::without_colors()
        }
    }

    /// Reserve room for `triangles` more facets in every buffer.
    pub fn reserve_triangles(&mut self, triangles: usize) {
        let floats = triangles.saturating_mul(FLOATS_PER_TRIANGLE);
        self.positions.reserve(floats);
        self.normals.reserve(floats);
        if let Some(colors) = self.colors.as_mut() {
            colors.reserve(floats);
        }
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Append one facet: three vertices, each paired with `normal`.
    ///
    /// On a colour-carrying assembler a missing `color` falls back to the
    /// header default; on a plain assembler `color` is ignored.
    pub fn push_facet(&mut self, normal: Vec3, vertices: [Vec3; 3], color: Option<Rgb>) {
        let resolved = match (&self.colors, self.default_color) {
            (Some(_), Some(default)) => Some(color.unwrap_or_else(|| default.rgb())),
            _ => None,
        };
        for vertex in vertices {
            self.positions.extend_from_slice(&vertex);
            self.normals.extend_from_slice(&normal);
            if let (Some(colors), Some(c)) = (self.colors.as_mut(), resolved) {
                colors.extend_from_slice(&c.to_array());
            }
        }
    }

    /// Append a single vertex with its facet normal.
    ///
    /// Colour-carrying assemblers give the vertex the header default colour.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.positions.extend_from_slice(&position);
        self.normals.extend_from_slice(&normal);
        if let (Some(colors), Some(default)) = (self.colors.as_mut(), self.default_color) {
            colors.extend_from_slice(&default.rgb().to_array());
        }
    }

    pub fn finish(self) -> Mesh {
        Mesh {
            positions: self.positions,
            normals: self.normals,
            colors: self.colors,
            default_color: self.default_color,
        }
    }
}

impl Default for MeshAssembler {
    fn default() -> Self {
        Self::without_colors()
    }
}
