//! Helper functions: error type, canned triangle sets, mesh math.

use mesh_types::{Mesh, Rgb, Triangle, Vec3};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("STL error: {reason}")]
    StlError { reason: String },

    #[error("parse error: {0}")]
    Parse(#[from] stl_format::ParseError),
}

// ── Triangle Sets ───────────────────────────────────────────────────────────

/// Build an uncoloured triangle.
pub fn triangle(normal: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Triangle {
    Triangle {
        normal,
        vertices: [a, b, c],
        color: None,
    }
}

/// The right triangle (1,0,0), (0,1,0), (0,0,0) facing +Z.
pub fn unit_triangle() -> Triangle {
    triangle(
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0],
    )
}

/// Axis-aligned unit cube from (0,0,0) to (1,1,1): 12 triangles, outward normals.
pub fn unit_cube() -> Vec<Triangle> {
    let v = [
        [0.0, 0.0, 0.0], // 0
        [1.0, 0.0, 0.0], // 1
        [1.0, 1.0, 0.0], // 2
        [0.0, 1.0, 0.0], // 3
        [0.0, 0.0, 1.0], // 4
        [1.0, 0.0, 1.0], // 5
        [1.0, 1.0, 1.0], // 6
        [0.0, 1.0, 1.0], // 7
    ];
    let faces: [([usize; 3], Vec3); 12] = [
        ([0, 2, 1], [0.0, 0.0, -1.0]), // front
        ([0, 3, 2], [0.0, 0.0, -1.0]),
        ([4, 5, 6], [0.0, 0.0, 1.0]), // back
        ([4, 6, 7], [0.0, 0.0, 1.0]),
        ([0, 1, 5], [0.0, -1.0, 0.0]), // bottom
        ([0, 5, 4], [0.0, -1.0, 0.0]),
        ([3, 7, 6], [0.0, 1.0, 0.0]), // top
        ([3, 6, 2], [0.0, 1.0, 0.0]),
        ([0, 4, 7], [-1.0, 0.0, 0.0]), // left
        ([0, 7, 3], [-1.0, 0.0, 0.0]),
        ([1, 2, 6], [1.0, 0.0, 0.0]), // right
        ([1, 6, 5], [1.0, 0.0, 0.0]),
    ];
    faces
        .iter()
        .map(|&([a, b, c], n)| triangle(n, v[a], v[b], v[c]))
        .collect()
}

/// Give every triangle the same colour.
pub fn painted(triangles: &[Triangle], color: Rgb) -> Vec<Triangle> {
    triangles
        .iter()
        .map(|t| Triangle {
            color: Some(color),
            ..*t
        })
        .collect()
}

// ── Mesh Math ───────────────────────────────────────────────────────────────

/// Total area of all complete triangles.
pub fn mesh_surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles()
        .map(|t| {
            let [a, b, c] = t.vertices.map(|p| p.map(f64::from));
            let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cross = [
                ab[1] * ac[2] - ab[2] * ac[1],
                ab[2] * ac[0] - ab[0] * ac[2],
                ab[0] * ac[1] - ab[1] * ac[0],
            ];
            0.5 * (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt()
        })
        .sum()
}

/// Signed volume enclosed by the triangles (divergence theorem).
pub fn mesh_volume(mesh: &Mesh) -> f64 {
    mesh.triangles()
        .map(|t| {
            let [a, b, c] = t.vertices.map(|p| p.map(f64::from));
            (a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
                + a[2] * (b[0] * c[1] - b[1] * c[0]))
                / 6.0
        })
        .sum()
}
