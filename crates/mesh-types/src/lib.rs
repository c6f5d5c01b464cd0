pub mod assembler;
pub mod color;
pub mod mesh;

pub use assembler::*;
pub use color::*;
pub use mesh::*;
