//! Bridge between the STL decoder and a browser viewer.
//!
//! The UI posts JSON [`messages::UiToViewer`] requests carrying STL bytes
//! (base64) or text; [`dispatch::dispatch`] decodes them into a
//! [`viewer_state::ViewerState`] and answers with a [`messages::ViewerToUi`].
//! On `wasm32` the `wasm_api` module exposes this to JavaScript together with
//! typed-array accessors for the mesh buffers.

pub mod dispatch;
pub mod messages;
pub mod viewer_state;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::dispatch;
pub use messages::{MeshSummary, UiToViewer, ViewerToUi};
pub use viewer_state::{BridgeError, LoadedMesh, ViewerState};
