//! STL mesh decoding.
//!
//! Accepts binary or ASCII STL as bytes or as one-byte-per-char text, picks
//! the encoding, and returns a flattened [`Mesh`]. Parsing is pure: no I/O, no
//! shared state, every call independent.
//!
//! ```
//! let text = "solid s\nfacet normal 0 0 1\nouter loop\n\
//!             vertex 1 0 0\nvertex 0 1 0\nvertex 0 0 0\n\
//!             endloop\nendfacet\nendsolid s\n";
//! let mesh = stl_format::parse(text)?;
//! assert_eq!(mesh.triangle_count(), 1);
//! # Ok::<(), stl_format::ParseError>(())
//! ```

pub mod ascii;
pub mod binary;
pub mod bridge;
pub mod config;
pub mod detect;
pub mod errors;
pub mod source;

pub use ascii::{parse_ascii, parse_ascii_with};
pub use binary::{parse_binary, read_header_color, resolve_facet_color};
pub use bridge::{to_bytes, to_text, RawInput};
pub use config::{FacetPolicy, FormatHint, ParseConfig};
pub use detect::{detect_format, StlFormat};
pub use errors::{LoadError, ParseError, SourceError};
pub use mesh_types::Mesh;
pub use source::{load_mesh, ByteSource, FileSource};

use tracing::instrument;

/// A decoded mesh together with the encoding it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub format: StlFormat,
    pub mesh: Mesh,
}

/// Parse with the default configuration: autodetect, lenient ASCII facets.
pub fn parse<'a>(input: impl Into<RawInput<'a>>) -> Result<Mesh, ParseError> {
    parse_with(input, &ParseConfig::default())
}

/// Parse under `config`.
pub fn parse_with<'a>(
    input: impl Into<RawInput<'a>>,
    config: &ParseConfig,
) -> Result<Mesh, ParseError> {
    decode(input, config).map(|decoded| decoded.mesh)
}

/// Parse under `config`, also reporting which decoder ran.
///
/// Detection always looks at the byte form of the input. The binary decoder
/// reads bytes; the ASCII decoder reads the text form.
pub fn decode<'a>(
    input: impl Into<RawInput<'a>>,
    config: &ParseConfig,
) -> Result<Decoded, ParseError> {
    decode_raw(&input.into(), config)
}

#[instrument(skip(input), fields(len = input.len()))]
fn decode_raw(input: &RawInput<'_>, config: &ParseConfig) -> Result<Decoded, ParseError> {
    let format = match config.format {
        FormatHint::Auto => detect_format(&input.as_bytes()),
        FormatHint::Binary => StlFormat::Binary,
        FormatHint::Ascii => StlFormat::Ascii,
    };

    let mesh = match format {
        StlFormat::Binary => parse_binary(&input.as_bytes())?,
        StlFormat::Ascii => parse_ascii_with(&input.as_text(), config.facet_policy)?,
    };
    Ok(Decoded { format, mesh })
}
