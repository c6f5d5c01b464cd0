//! ASCII STL decoder.
//!
//! The grammar is scanned rather than tokenized: every `facet ... endfacet`
//! span is located, then the last `normal x y z` triple and every
//! `vertex x y z` triple inside it are extracted.

use std::sync::LazyLock;

use mesh_types::{Mesh, MeshAssembler, Vec3};
use regex::{Captures, Regex};
use tracing::{debug, info, instrument};

use crate::config::FacetPolicy;
use crate::errors::ParseError;

/// Optional sign, digits with an optional fraction (or a bare fraction), and
/// an optional exponent.
const NUMBER: &str = r"[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?";

static RE_FACET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)facet.*?endfacet").expect("valid facet regex"));

static RE_NORMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"normal\s+({NUMBER})\s+({NUMBER})\s+({NUMBER})"))
        .expect("valid normal regex")
});

static RE_VERTEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"vertex\s+({NUMBER})\s+({NUMBER})\s+({NUMBER})"))
        .expect("valid vertex regex")
});

/// Decode ASCII STL text, silently skipping incomplete facets.
pub fn parse_ascii(text: &str) -> Result<Mesh, ParseError> {
    parse_ascii_with(text, FacetPolicy::Lenient)
}

/// Decode ASCII STL text under the given facet policy.
///
/// Each facet span takes the last normal triple it contains and emits every
/// vertex triple paired with that normal. Under [`FacetPolicy::Lenient`] a
/// span with no normal is skipped and a span may hold any number of vertices.
/// Under [`FacetPolicy::Strict`] both cases fail with
/// [`ParseError::IncompleteFacet`]. Colours are never produced.
#[instrument(skip(text), fields(len = text.len()))]
pub fn parse_ascii_with(text: &str, policy: FacetPolicy) -> Result<Mesh, ParseError> {
    let mut asm = MeshAssembler::without_colors();
    let mut skipped = 0usize;

    for (index, span) in RE_FACET.find_iter(text).enumerate() {
        let span = span.as_str();

        let normal = match RE_NORMAL.captures_iter(span).last() {
            Some(caps) => Some(read_triple(&caps)?),
            None => None,
        };
        let vertices = RE_VERTEX
            .captures_iter(span)
            .map(|caps| read_triple(&caps))
            .collect::<Result<Vec<Vec3>, ParseError>>()?;

        if policy == FacetPolicy::Strict {
            if normal.is_none() {
                return Err(ParseError::IncompleteFacet {
                    index,
                    reason: "no normal".to_string(),
                });
            }
            if vertices.len() != 3 {
                return Err(ParseError::IncompleteFacet {
                    index,
                    reason: format!("expected 3 vertices, found {}", vertices.len()),
                });
            }
        }

        let Some(normal) = normal else {
            debug!(index, vertices = vertices.len(), "facet has no normal, skipped");
            skipped += 1;
            continue;
        };
        if vertices.is_empty() {
            debug!(index, "facet has no vertices");
            skipped += 1;
        }
        for vertex in vertices {
            asm.push_vertex(vertex, normal);
        }
    }

    let mesh = asm.finish();
    info!(
        triangles = mesh.triangle_count(),
        vertices = mesh.vertex_count(),
        skipped,
        "decoded ASCII STL"
    );
    Ok(mesh)
}

fn read_triple(caps: &Captures<'_>) -> Result<Vec3, ParseError> {
    Ok([
        read_number(&caps[1])?,
        read_number(&caps[2])?,
        read_number(&caps[3])?,
    ])
}

fn read_number(token: &str) -> Result<f32, ParseError> {
    token.parse::<f32>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_FACET: &str = "solid s\nfacet normal 0 0 1\nouter loop\nvertex 1 0 0\nvertex 0 1 0\nvertex 0 0 0\nendloop\nendfacet\nendsolid s\n";

    #[test]
    fn single_facet() {
        let mesh = parse_ascii(ONE_FACET).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(mesh.normals, [0.0, 0.0, 1.0].repeat(3));
        assert!(mesh.colors.is_none());
    }

    #[test]
    fn number_forms() {
        let text = "facet normal -1 +0.5 2.5e-1\n\
                    vertex 1. .5 -3E2\n\
                    vertex 1e3 -0.0 +7\n\
                    vertex 0 0 0\nendfacet";
        let mesh = parse_ascii(text).unwrap();
        assert_eq!(&mesh.normals[..3], &[-1.0, 0.5, 0.25]);
        assert_eq!(&mesh.positions[..6], &[1.0, 0.5, -300.0, 1000.0, 0.0, 7.0]);
    }

    #[test]
    fn last_normal_wins() {
        let text = "facet normal 1 0 0 normal 0 1 0\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 0 1\nendfacet";
        let mesh = parse_ascii(text).unwrap();
        assert_eq!(&mesh.normals[..3], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn extra_vertices_are_kept() {
        let text = "facet normal 0 0 1\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nvertex 1 1 0\nendfacet";
        let mesh = parse_ascii(text).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn facet_without_normal_is_skipped() {
        let text = "facet\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendfacet\n";
        let mesh = parse_ascii(&format!("{text}{ONE_FACET}")).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(&mesh.positions[..3], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_text_is_empty_mesh() {
        assert!(parse_ascii("").unwrap().is_empty());
        assert!(parse_ascii("solid empty\nendsolid empty\n").unwrap().is_empty());
    }

    #[test]
    fn strict_rejects_missing_normal() {
        let text = "facet\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendfacet";
        let err = parse_ascii_with(text, FacetPolicy::Strict).unwrap_err();
        assert!(matches!(err, ParseError::IncompleteFacet { index: 0, .. }));
    }

    #[test]
    fn strict_rejects_wrong_vertex_count() {
        let text = format!("{ONE_FACET}facet normal 0 0 1\nvertex 0 0 0\nendfacet");
        let err = parse_ascii_with(&text, FacetPolicy::Strict).unwrap_err();
        assert!(matches!(err, ParseError::IncompleteFacet { index: 1, .. }));
    }

    #[test]
    fn strict_accepts_well_formed() {
        let mesh = parse_ascii_with(ONE_FACET, FacetPolicy::Strict).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }
}
