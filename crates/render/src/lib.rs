//! Rendering Adapter: isometric projection engine plus a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers receive a borrowed [`RenderScene`] and cannot mutate grid, view or cursor.
//! - Projection and unprojection are exact inverses on the plane they are solved for.
//! - Camera angle is always normalized to `[0, 2π)`.

mod painter;
mod renderer;
pub mod view;

pub use painter::{DrawCommand, Hsla, IsoPainter};
pub use renderer::{DebugTextRenderer, RenderScene, Renderer};
pub use view::{Axis, Camera, View, VisibleSides};
