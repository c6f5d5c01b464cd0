//! STL writers for building decoder fixtures in binary and ASCII form.

use mesh_types::{Triangle, RGB555_USE_DEFAULT};

use crate::helpers::HarnessError;

const HEADER_LEN: usize = 80;
const COLOR_MARKER: &[u8] = b"COLOR=";

/// Encode triangles as a binary STL buffer with a zero attribute on every facet.
///
/// Binary STL format:
/// - 80-byte header (arbitrary text)
/// - u32 triangle count (little-endian)
/// - For each triangle: 3×f32 normal + 3×(3×f32 vertex) + u16 attribute = 50 bytes
pub fn export_binary_stl(triangles: &[Triangle], name: &str) -> Vec<u8> {
    let header = format!("binary STL: {}", name);
    write_binary(header.as_bytes(), triangles, |_| 0)
}

/// Encode triangles as a binary STL buffer carrying the `COLOR=` extension.
///
/// The header starts with `COLOR=` and the default RGBA bytes. A triangle with
/// its own colour gets a packed RGB555 attribute with bit 15 clear; a
/// triangle without one gets bit 15 set so the decoder falls back to the
/// default.
pub fn export_colored_binary_stl(
    triangles: &[Triangle],
    name: &str,
    default_rgba: [u8; 4],
) -> Vec<u8> {
    let mut header = COLOR_MARKER.to_vec();
    header.extend_from_slice(&default_rgba);
    header.extend_from_slice(format!(" {}", name).as_bytes());
    write_binary(&header, triangles, |t| match t.color {
        Some(c) => c.to_rgb555(),
        None => RGB555_USE_DEFAULT,
    })
}

/// Encode triangles with an explicit attribute per facet.
pub fn export_binary_stl_with_attributes(
    header: &[u8],
    triangles: &[(Triangle, u16)],
) -> Vec<u8> {
    let mut buf = binary_preamble(header, triangles.len());
    for (tri, attribute) in triangles {
        push_record(&mut buf, tri, *attribute);
    }
    buf
}

fn write_binary(
    header: &[u8],
    triangles: &[Triangle],
    attribute: impl Fn(&Triangle) -> u16,
) -> Vec<u8> {
    let mut buf = binary_preamble(header, triangles.len());
    for tri in triangles {
        push_record(&mut buf, tri, attribute(tri));
    }
    buf
}

fn binary_preamble(header: &[u8], tri_count: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(84 + tri_count * 50);
    buf.extend_from_slice(&header[..header.len().min(HEADER_LEN)]);
    buf.resize(HEADER_LEN, 0u8);
    buf.extend_from_slice(&(tri_count as u32).to_le_bytes());
    buf
}

fn push_record(buf: &mut Vec<u8>, tri: &Triangle, attribute: u16) {
    // Normal
    for c in &tri.normal {
        buf.extend_from_slice(&c.to_le_bytes());
    }
    // 3 vertices
    for v in &tri.vertices {
        for c in v {
            buf.extend_from_slice(&c.to_le_bytes());
        }
    }
    buf.extend_from_slice(&attribute.to_le_bytes());
}

/// Encode triangles as an ASCII STL string.
///
/// Fails on non-finite coordinates, which have no ASCII representation the
/// decoder accepts, and on names containing line breaks.
pub fn export_ascii_stl(triangles: &[Triangle], name: &str) -> Result<String, HarnessError> {
    if name.contains(|c: char| c == '\n' || c == '\r') {
        return Err(HarnessError::StlError {
            reason: format!("solid name {:?} spans lines", name),
        });
    }

    let mut out = String::with_capacity(triangles.len() * 300);
    out.push_str(&format!("solid {}\n", name));

    for (i, tri) in triangles.iter().enumerate() {
        let finite = tri
            .normal
            .iter()
            .chain(tri.vertices.iter().flatten())
            .all(|c| c.is_finite());
        if !finite {
            return Err(HarnessError::StlError {
                reason: format!("triangle {} has a non-finite coordinate", i),
            });
        }

        let [nx, ny, nz] = tri.normal;
        out.push_str(&format!("  facet normal {:e} {:e} {:e}\n", nx, ny, nz));
        out.push_str("    outer loop\n");
        for [x, y, z] in tri.vertices {
            out.push_str(&format!("      vertex {:e} {:e} {:e}\n", x, y, z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {}\n", name));
    Ok(out)
}
