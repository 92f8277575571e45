//! Rendering module
//!
//! `draw_list` turns the game state into viewport-space rectangles (pure,
//! testable); `shapes` turns those into triangles; `pipeline` pushes the
//! triangles through WebGPU.

pub mod draw_list;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw_list::{DrawRect, EntityClass, build_draw_list};
pub use pipeline::RenderState;
pub use vertex::{Palette, Vertex};
