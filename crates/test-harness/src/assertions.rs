//! Rich assertion helpers with diagnostic output.
//!
//! Every failure names the check context, the expected value and the actual
//! value so a failing scenario can be read without a debugger.

use approx::abs_diff_eq;
use mesh_types::{Mesh, Rgb, FLOATS_PER_TRIANGLE};

use crate::helpers::HarnessError;

/// Assert the structural invariants every decoded mesh must hold:
/// `normals` and `colors` (when present) match `positions` in length, and the
/// length is a whole number of vertices.
pub fn assert_mesh_consistent(mesh: &Mesh, ctx: &str) -> Result<(), HarnessError> {
    let len = mesh.positions.len();
    if len % 3 != 0 {
        return Err(fail(ctx, format!("positions length {} is not a multiple of 3", len)));
    }
    if mesh.normals.len() != len {
        return Err(fail(
            ctx,
            format!("normals length {} != positions length {}", mesh.normals.len(), len),
        ));
    }
    if let Some(colors) = &mesh.colors {
        if colors.len() != len {
            return Err(fail(
                ctx,
                format!("colors length {} != positions length {}", colors.len(), len),
            ));
        }
    }
    Ok(())
}

/// Assert an exact triangle count, and that no partial triangle trails it.
pub fn assert_triangle_count(mesh: &Mesh, expected: usize, ctx: &str) -> Result<(), HarnessError> {
    let expected_len = expected * FLOATS_PER_TRIANGLE;
    if mesh.positions.len() == expected_len && mesh.normals.len() == expected_len {
        Ok(())
    } else {
        Err(fail(
            ctx,
            format!(
                "expected {} triangles ({} floats), got positions={} normals={}",
                expected,
                expected_len,
                mesh.positions.len(),
                mesh.normals.len(),
            ),
        ))
    }
}

/// Assert the flat position buffer matches `expected` within `tol`.
pub fn assert_positions_close(
    mesh: &Mesh,
    expected: &[f32],
    tol: f32,
    ctx: &str,
) -> Result<(), HarnessError> {
    assert_floats_close("positions", &mesh.positions, expected, tol, ctx)
}

/// Assert every vertex of triangle `index` carries `expected` as its normal.
pub fn assert_facet_normal(
    mesh: &Mesh,
    index: usize,
    expected: [f32; 3],
    tol: f32,
    ctx: &str,
) -> Result<(), HarnessError> {
    let facet = facet_slice(&mesh.normals, index, "normals", ctx)?;
    assert_floats_close("normals", facet, &expected.repeat(3), tol, ctx)
}

/// Assert every vertex of triangle `index` carries `expected` as its colour.
pub fn assert_facet_color(
    mesh: &Mesh,
    index: usize,
    expected: Rgb,
    tol: f32,
    ctx: &str,
) -> Result<(), HarnessError> {
    let colors = mesh
        .colors
        .as_ref()
        .ok_or_else(|| fail(ctx, "mesh has no colors".to_string()))?;
    let facet = facet_slice(colors, index, "colors", ctx)?;
    assert_floats_close("colors", facet, &expected.to_array().repeat(3), tol, ctx)
}

/// Assert the mesh bounding box matches expected values within tolerance.
pub fn assert_bounding_box(
    mesh: &Mesh,
    expected_min: [f32; 3],
    expected_max: [f32; 3],
    tol: f32,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bbox = mesh
        .bounding_box()
        .ok_or_else(|| fail(ctx, "empty mesh has no bounding box".to_string()))?;

    for i in 0..3 {
        if !abs_diff_eq!(bbox.min[i], expected_min[i], epsilon = tol) {
            return Err(fail(
                ctx,
                format!(
                    "bounding box min[{}]: expected {:.3}, got {:.3} (tol={})",
                    i, expected_min[i], bbox.min[i], tol,
                ),
            ));
        }
        if !abs_diff_eq!(bbox.max[i], expected_max[i], epsilon = tol) {
            return Err(fail(
                ctx,
                format!(
                    "bounding box max[{}]: expected {:.3}, got {:.3} (tol={})",
                    i, expected_max[i], bbox.max[i], tol,
                ),
            ));
        }
    }
    Ok(())
}

fn facet_slice<'a>(
    buf: &'a [f32],
    index: usize,
    what: &str,
    ctx: &str,
) -> Result<&'a [f32], HarnessError> {
    let start = index * FLOATS_PER_TRIANGLE;
    buf.get(start..start + FLOATS_PER_TRIANGLE).ok_or_else(|| {
        fail(
            ctx,
            format!(
                "triangle {} out of range ({} has {} floats)",
                index,
                what,
                buf.len()
            ),
        )
    })
}

fn assert_floats_close(
    what: &str,
    actual: &[f32],
    expected: &[f32],
    tol: f32,
    ctx: &str,
) -> Result<(), HarnessError> {
    if actual.len() != expected.len() {
        return Err(fail(
            ctx,
            format!(
                "{} length: expected {}, got {}",
                what,
                expected.len(),
                actual.len()
            ),
        ));
    }
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if !abs_diff_eq!(*a, *e, epsilon = tol) {
            return Err(fail(
                ctx,
                format!("{}[{}]: expected {}, got {} (tol={})", what, i, e, a, tol),
            ));
        }
    }
    Ok(())
}

fn fail(ctx: &str, detail: String) -> HarnessError {
    HarnessError::AssertionFailed {
        detail: format!("[{}] {}", ctx, detail),
    }
}
