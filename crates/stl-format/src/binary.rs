//! Binary STL decoder.
//!
//! Layout:
//! - 80 bytes: header, optionally carrying `COLOR=` followed by 4 RGBA bytes
//! - 4 bytes: u32 LE facet count
//! - Per facet (50 bytes each):
//!   - 12 bytes: normal (3 × f32 LE)
//!   - 36 bytes: 3 vertices (3 × 3 × f32 LE)
//!   - 2 bytes: u16 LE attribute, a packed RGB555 colour when the header has `COLOR=`

use mesh_types::{Mesh, MeshAssembler, Rgb, Rgba, Vec3, RGB555_USE_DEFAULT};
use tracing::{debug, info, instrument, warn};

use crate::detect::{
    declared_face_count, expected_binary_len, FACET_RECORD_LEN, HEADER_LEN, PREAMBLE_LEN,
};
use crate::errors::ParseError;

const COLOR_MARKER: &[u8; 6] = b"COLOR=";

/// Bytes the marker plus its RGBA payload occupy.
const COLOR_FIELD_LEN: usize = COLOR_MARKER.len() + 4;

/// Find the `COLOR=rgba` default colour in the 80-byte header.
///
/// Candidate offsets run from 0 to 69. When the marker appears more than once
/// the last occurrence wins.
pub fn read_header_color(data: &[u8]) -> Option<Rgba> {
    let header = data.get(..HEADER_LEN)?;
    let mut found = None;
    for start in 0..HEADER_LEN - COLOR_FIELD_LEN {
        if &header[start..start + COLOR_MARKER.len()] == COLOR_MARKER {
            let c = &header[start + COLOR_MARKER.len()..start + COLOR_FIELD_LEN];
            found = Some(Rgba::from_bytes(c[0], c[1], c[2], c[3]));
        }
    }
    found
}

/// Resolve a facet attribute against the header default.
///
/// Bit 15 clear means the facet carries its own RGB555 colour; bit 15 set
/// selects the header default.
pub fn resolve_facet_color(attribute: u16, default: Rgba) -> Rgb {
    if attribute & RGB555_USE_DEFAULT == 0 {
        Rgb::from_rgb555(attribute)
    } else {
        default.rgb()
    }
}

/// Decode a binary STL buffer.
///
/// The whole facet table is bounds-checked before any facet is read, so a
/// facet count larger than the data fails with
/// [`ParseError::MalformedInput`] instead of producing a partial mesh.
/// Bytes after the last declared facet are ignored.
#[instrument(skip(data), fields(len = data.len()))]
pub fn parse_binary(data: &[u8]) -> Result<Mesh, ParseError> {
    let faces = declared_face_count(data).ok_or_else(|| ParseError::MalformedInput {
        reason: format!(
            "buffer of {} bytes is shorter than the {}-byte binary preamble",
            data.len(),
            PREAMBLE_LEN
        ),
    })?;

    let expected = expected_binary_len(faces);
    let actual = data.len() as u64;
    if actual < expected {
        return Err(ParseError::MalformedInput {
            reason: format!(
                "{} facets need {} bytes, buffer holds {}",
                faces, expected, actual
            ),
        });
    }
    if actual > expected {
        warn!(
            faces,
            trailing = actual - expected,
            "ignoring bytes after the last facet"
        );
    }

    let header_color = read_header_color(data);
    let mut asm = match header_color {
        Some(default) => {
            debug!(?default, "header declares a default colour");
            MeshAssembler::with_colors(default)
        }
        None => MeshAssembler::without_colors(),
    };
    asm.reserve_triangles(faces as usize);

    let table = &data[PREAMBLE_LEN..expected as usize];
    for record in table.chunks_exact(FACET_RECORD_LEN) {
        let normal = read_vec3(record, 0);
        let vertices = [
            read_vec3(record, 12),
            read_vec3(record, 24),
            read_vec3(record, 36),
        ];
        let color = header_color.map(|default| {
            let attribute = u16::from_le_bytes([record[48], record[49]]);
            resolve_facet_color(attribute, default)
        });
        asm.push_facet(normal, vertices, color);
    }

    let mesh = asm.finish();
    info!(
        triangles = mesh.triangle_count(),
        colors = mesh.has_colors(),
        "decoded binary STL"
    );
    Ok(mesh)
}

fn read_f32(record: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        record[offset],
        record[offset + 1],
        record[offset + 2],
        record[offset + 3],
    ])
}

fn read_vec3(record: &[u8], offset: usize) -> Vec3 {
    [
        read_f32(record, offset),
        read_f32(record, offset + 4),
        read_f32(record, offset + 8),
    ]
}
