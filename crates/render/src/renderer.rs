use glam::IVec3;
use isovox_common::{Cursor, Hsl};
use isovox_kernel::VoxelGrid;

use crate::view::View;

/// Read-only snapshot of everything a frame needs.
///
/// Built by the editor session at the start of a frame; borrowing it keeps
/// the session immutable for as long as the renderer holds it.
#[derive(Debug, Clone, Copy)]
pub struct RenderScene<'a> {
    pub grid: &'a VoxelGrid,
    pub view: &'a View,
    pub cursor: Cursor,
    pub placeable: Option<IVec3>,
    pub paint: Hsl,
    pub grid_level: i32,
    /// Label of the active interaction mode.
    pub mode: &'static str,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and produces output. It never mutates the
/// grid or the camera.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene.
    fn render(&self, scene: &RenderScene<'_>) -> Self::Output;
}

/// Produces a human-readable dump of the scene. Used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// List every voxel, not just the totals.
    pub list_voxels: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self { list_voxels: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &RenderScene<'_>) -> String {
        let size = scene.grid.size();
        let cam = scene.view.camera();
        let sides = scene.view.visible_sides();
        let mut out = String::new();

        out.push_str(&format!(
            "=== Grid {}x{}x{} ({} voxels) ===\n",
            size.x,
            size.y,
            size.z,
            scene.grid.voxel_count()
        ));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) angle={:.4} ({} PI/16) scale={:.3}\n",
            cam.position.x,
            cam.position.y,
            cam.position.z,
            cam.angle,
            (16.0 * cam.angle / std::f64::consts::PI).floor(),
            cam.scale
        ));
        out.push_str(&format!("Visible sides: x={} y={}\n", sides.x, sides.y));
        let c = scene.cursor;
        out.push_str(&format!(
            "Cursor: {}, {}, {}, {}\n",
            c.cell.x,
            c.cell.y,
            c.cell.z,
            c.face.id()
        ));
        match scene.placeable {
            Some(p) => out.push_str(&format!("Placeable: {}, {}, {}\n", p.x, p.y, p.z)),
            None => out.push_str("Placeable: none\n"),
        }
        out.push_str(&format!("Mode: {}\n", scene.mode));
        out.push_str(&format!(
            "Grid level: {} Paint: hsl({}, {}%, {}%)\n",
            scene.grid_level, scene.paint.h, scene.paint.s, scene.paint.l
        ));

        if self.list_voxels {
            for v in scene.grid.voxels() {
                out.push_str(&format!(
                    "  ({}, {}, {}) hsl({}, {}%, {}%)\n",
                    v.position.x, v.position.y, v.position.z, v.color.h, v.color.s, v.color.l
                ));
            }
        }

        out
    }
}
