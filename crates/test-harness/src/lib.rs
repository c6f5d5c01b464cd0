//! Test harness for STL decoding.
//!
//! Writes STL fixtures in both encodings and checks decoded meshes with
//! diagnostics-rich assertions.
//!
//! # Key Components
//!
//! - [`stl`]: binary (optionally coloured) and ASCII STL writers
//! - [`helpers`]: error type, canned triangle sets, mesh math
//! - [`assertions`]: assertion helpers returning [`HarnessError`] on failure

pub mod assertions;
pub mod helpers;
pub mod stl;

pub use helpers::HarnessError;
