//! Software wireframe renderer
//!
//! Projects models through the camera and rasterizes their strokes with
//! integer Bresenham lines onto any `Surface`.

pub mod projection;
pub mod raster;
pub mod scene;
pub mod surface;

pub use projection::{ProjectedVertex, Viewport, is_visible, project_model, project_point};
pub use raster::{draw_line, draw_line_clipped, draw_model};
pub use scene::{RenderStats, Renderer};
pub use surface::{Framebuffer, Surface};
