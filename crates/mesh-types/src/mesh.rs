use serde::{Deserialize, Serialize};

use crate::color::{Rgb, Rgba};

/// A 3-component vector: a position or a normal.
pub type Vec3 = [f32; 3];

/// Floats per vertex in every flat buffer.
pub const COMPONENTS_PER_VERTEX: usize = 3;

/// Floats per triangle in every flat buffer (3 vertices × 3 components).
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// One facet: a normal, three vertex positions and an optional colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
    pub color: Option<Rgb>,
}

/// Triangle soup flattened into parallel buffers ready for upload to a renderer.
///
/// Every vertex carries the normal (and colour, when present) of the facet it
/// belongs to, so the buffers are read in runs of 3 per vertex and 9 per
/// triangle. Built through [`crate::MeshAssembler`], which keeps the buffers
/// the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mesh {
    /// Flat vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub positions: Vec<f32>,
    /// Flat per-vertex normals, same length as `positions`.
    pub normals: Vec<f32>,
    /// Flat per-vertex RGB colours, same length as `positions` when present.
    pub colors: Option<Vec<f32>>,
    /// Default colour declared in a binary header (`COLOR=rgba`), alpha included.
    /// Alpha is kept here only; it never reaches `colors`.
    pub default_color: Option<Rgba>,
}

impl Mesh {
    /// Number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / FLOATS_PER_TRIANGLE
    }

    /// Number of vertices, counting a trailing partial triangle if any.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / COMPONENTS_PER_VERTEX
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Rebuild facet records from the flat buffers.
    ///
    /// Only complete triangles are yielded; a trailing group of fewer than
    /// three vertices is skipped.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(move |t| {
            let base = t * FLOATS_PER_TRIANGLE;
            let vertex = |i: usize| read_vec3(&self.positions, base + i * COMPONENTS_PER_VERTEX);
            Triangle {
                normal: read_vec3(&self.normals, base),
                vertices: [vertex(0), vertex(1), vertex(2)],
                color: self.colors.as_ref().map(|c| {
                    let [r, g, b] = read_vec3(c, base);
                    Rgb::new(r, g, b)
                }),
            }
        })
    }

    /// Axis-aligned bounds of all positions, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut points = self.positions.chunks_exact(COMPONENTS_PER_VERTEX);
        let first = points.next()?;
        let mut bbox = BoundingBox {
            min: [first[0], first[1], first[2]],
            max: [first[0], first[1], first[2]],
        };
        for p in points {
            for i in 0..3 {
                bbox.min[i] = bbox.min[i].min(p[i]);
                bbox.max[i] = bbox.max[i].max(p[i]);
            }
        }
        Some(bbox)
    }
}

fn read_vec3(buf: &[f32], offset: usize) -> Vec3 {
    [buf[offset], buf[offset + 1], buf[offset + 2]]
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Extents along X, Y and Z.
    pub fn dimensions(&self) -> Vec3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> Vec3 {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeshAssembler;

    fn quad() -> Mesh {
        let mut asm = MeshAssembler::without_colors();
        asm.push_facet(
            [0.0, 0.0, 1.0],
            [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0]],
            None,
        );
        asm.push_facet(
            [0.0, 0.0, 1.0],
            [[0.0, 0.0, 0.0], [2.0, 1.0, 0.0], [0.0, 1.0, -3.0]],
            None,
        );
        asm.finish()
    }

    #[test]
    fn counts() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert!(!mesh.is_empty());
        assert!(!mesh.has_colors());
    }

    #[test]
    fn triangles_rebuild_facets() {
        let mesh = quad();
        let tris: Vec<Triangle> = mesh.triangles().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(tris[1].vertices[2], [0.0, 1.0, -3.0]);
        assert_eq!(tris[1].color, None);
    }

    #[test]
    fn triangles_skip_trailing_partial_group() {
        let mut asm = MeshAssembler::without_colors();
        for i in 0..4 {
            asm.push_vertex([i as f32, 0.0, 0.0], [0.0, 0.0, 1.0]);
        }
        let mesh = asm.finish();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().count(), 1);
    }

    #[test]
    fn bounding_box_covers_all_positions() {
        let bbox = quad().bounding_box().unwrap();
        assert_eq!(bbox.min, [0.0, 0.0, -3.0]);
        assert_eq!(bbox.max, [2.0, 1.0, 0.0]);
        assert_eq!(bbox.dimensions(), [2.0, 1.0, 3.0]);
        assert_eq!(bbox.center(), [1.0, 0.5, -1.5]);
    }

    #[test]
    fn empty_mesh_has_no_bounding_box() {
        assert!(Mesh::default().bounding_box().is_none());
    }

    #[test]
    fn mesh_serializes_to_json() {
        let json = serde_json::to_string(&quad()).unwrap();
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quad());
    }
}
