//! Fetching raw bytes ahead of a parse.
//!
//! The parser never performs I/O; a [`ByteSource`] delivers a complete
//! buffer first and [`load_mesh`] hands it to [`crate::parse_with`].

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use mesh_types::Mesh;
use tracing::{debug, instrument};

use crate::config::ParseConfig;
use crate::errors::{LoadError, SourceError};

/// Something that can deliver the full contents of a named asset.
pub trait ByteSource {
    fn load(&self, identifier: &str) -> Result<Vec<u8>, SourceError>;
}

/// Reads assets from files below a root directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join `identifier` onto the root. Absolute identifiers and `..`
    /// components are refused so lookups stay inside the root.
    fn resolve(&self, identifier: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(identifier);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || identifier.is_empty() {
            return Err(SourceError::NotFound {
                identifier: identifier.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl ByteSource for FileSource {
    fn load(&self, identifier: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.resolve(identifier)?;
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound {
                identifier: identifier.to_string(),
            },
            _ => SourceError::Io {
                identifier: identifier.to_string(),
                reason: e.to_string(),
            },
        })
    }
}

/// Load an asset in full, then parse it.
#[instrument(skip(source, config))]
pub fn load_mesh(
    source: &dyn ByteSource,
    identifier: &str,
    config: &ParseConfig,
) -> Result<Mesh, LoadError> {
    let bytes = source.load(identifier)?;
    debug!(len = bytes.len(), "source delivered buffer");
    Ok(crate::parse_with(bytes, config)?)
}
