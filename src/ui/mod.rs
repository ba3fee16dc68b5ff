//! Presentation: a view model derived from gallery state, and its terminal
//! rendering.

pub mod render;
pub mod view;

pub use render::render;
pub use view::{FrameView, GalleryView};
