/// Errors while decoding an STL buffer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The buffer is too short for its header or for the facets it declares.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// An ASCII facet lacks a normal or does not carry exactly three vertices.
    /// Only raised under [`crate::FacetPolicy::Strict`].
    #[error("facet {index} is incomplete: {reason}")]
    IncompleteFacet { index: usize, reason: String },

    #[error("invalid number: {token:?}")]
    InvalidNumber { token: String },
}

/// Errors from a [`crate::ByteSource`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("source not found: {identifier}")]
    NotFound { identifier: String },

    #[error("failed to read {identifier}: {reason}")]
    Io { identifier: String, reason: String },
}

/// Errors from [`crate::load_mesh`]: either the bytes could not be fetched or
/// they could not be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
