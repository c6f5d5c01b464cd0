//! Binary-versus-ASCII classification of a raw buffer.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Size of the free-form binary header.
pub const HEADER_LEN: usize = 80;

/// Header plus the little-endian u32 facet count.
pub const PREAMBLE_LEN: usize = HEADER_LEN + 4;

/// One binary facet record: normal and three vertices (12 × f32) plus a u16
/// attribute.
pub const FACET_RECORD_LEN: usize = 12 * 4 + 2;

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StlFormat {
    Binary,
    Ascii,
}

/// Read the facet count at offset 80, if the buffer is long enough.
pub fn declared_face_count(data: &[u8]) -> Option<u32> {
    let field = data.get(HEADER_LEN..PREAMBLE_LEN)?;
    Some(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

/// Byte length of a binary file holding `faces` facets.
pub fn expected_binary_len(faces: u32) -> u64 {
    PREAMBLE_LEN as u64 + u64::from(faces) * FACET_RECORD_LEN as u64
}

/// Classify a buffer as binary or ASCII STL.
///
/// A buffer whose length equals `84 + 50 × faceCount` is binary whatever it
/// contains. Otherwise any byte above 127 makes it binary, since ASCII STL is
/// 7-bit. Everything else is ASCII. Buffers shorter than 84 bytes carry no
/// facet count and are decided by the byte scan alone.
pub fn detect_format(data: &[u8]) -> StlFormat {
    if let Some(faces) = declared_face_count(data) {
        if expected_binary_len(faces) == data.len() as u64 {
            debug!(faces, len = data.len(), "length matches binary layout");
            return StlFormat::Binary;
        }
    }

    if let Some(offset) = data.iter().position(|&b| b > 127) {
        warn!(
            offset,
            len = data.len(),
            "length does not match binary layout, classified binary by non-ASCII byte"
        );
        return StlFormat::Binary;
    }

    debug!(len = data.len(), "classified as ASCII");
    StlFormat::Ascii
}
