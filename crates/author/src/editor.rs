use glam::{DVec2, IVec3};
use isovox_common::{ColorError, Cursor, Hsl, Voxel};
use isovox_input::{Action, Key};
use isovox_kernel::VoxelGrid;
use isovox_render::{Camera, RenderScene, View};

use crate::config::{ConfigError, EditorConfig};
use crate::cursor::{CursorResolver, placeable_cell};
use crate::mode::{EditMode, ModeStack};

const DRAG_FAMILY: [EditMode; 2] = [EditMode::CanDrag, EditMode::Dragging];
const ROTATE_FAMILY: [EditMode; 2] = [EditMode::CanRotate, EditMode::Rotating];
const REMOVE_FAMILY: [EditMode; 2] = [EditMode::CanRemove, EditMode::Removing];

/// One editing session: the grid being edited, the camera looking at it and
/// the interaction state machine driving both.
///
/// All input enters through [`handle`](Self::handle); the command methods
/// (`set_pointer`, `primary_down`, ...) are one-line wrappers that build the
/// matching [`Action`]. Renderers read a [`RenderScene`] snapshot and have no
/// mutation path.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    grid: VoxelGrid,
    view: View,
    modes: ModeStack,
    pointer: DVec2,
    drag_anchor: DVec2,
    rotate_anchor: DVec2,
    cursor: Cursor,
    placeable: Option<IVec3>,
    grid_level: i32,
    paint: Hsl,
}

impl EditorSession {
    /// Start a session on `grid` with the camera centered on the grid floor.
    ///
    /// The config is validated first; a zero divisor or scale would otherwise
    /// push non-finite values into the camera.
    pub fn new(grid: VoxelGrid, config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let view = View::new(
            DVec2::new(config.viewport_width, config.viewport_height),
            config.base_voxel_size,
            Camera {
                position: grid.center(),
                angle: config.initial_angle,
                scale: config.initial_scale,
            },
        );
        let size = grid.size();
        tracing::info!(x = size.x, y = size.y, z = size.z, "editor session started");
        let mut session = Self {
            paint: config.paint,
            config,
            grid,
            view,
            modes: ModeStack::new(),
            pointer: DVec2::ZERO,
            drag_anchor: DVec2::ZERO,
            rotate_anchor: DVec2::ZERO,
            cursor: Cursor::NONE,
            placeable: None,
            grid_level: 0,
        };
        session.resolve_cursor();
        Ok(session)
    }

    /// Swap in a freshly loaded grid. Modes reset to `Idle` and the grid level
    /// is clamped to the new height; the camera is kept.
    pub fn replace_grid(&mut self, grid: VoxelGrid) {
        self.grid = grid;
        self.modes.reset();
        self.grid_level = self.grid_level.min(self.top_level());
        self.resolve_cursor();
        self.placeable = None;
        tracing::info!(voxels = self.grid.voxel_count(), "grid replaced");
    }

    // --- read accessors ---

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn camera(&self) -> &Camera {
        self.view.camera()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn placeable(&self) -> Option<IVec3> {
        self.placeable
    }

    pub fn mode(&self) -> EditMode {
        self.modes.current()
    }

    pub fn grid_level(&self) -> i32 {
        self.grid_level
    }

    pub fn paint(&self) -> Hsl {
        self.paint
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Read-only snapshot for one frame.
    pub fn render_scene(&self) -> RenderScene<'_> {
        RenderScene {
            grid: &self.grid,
            view: &self.view,
            cursor: self.cursor,
            placeable: self.placeable,
            paint: self.paint,
            grid_level: self.grid_level,
            mode: self.mode().label(),
        }
    }

    /// Resize the viewport, e.g. after the host window changed size.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.view.set_viewport(width, height);
        self.resolve_cursor();
    }

    // --- command interface ---

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.handle(Action::PointerMove(DVec2::new(x, y)));
    }

    pub fn primary_down(&mut self) {
        self.handle(Action::PrimaryDown);
    }

    pub fn primary_up(&mut self) {
        self.handle(Action::PrimaryUp);
    }

    pub fn middle_down(&mut self) {
        self.handle(Action::MiddleDown);
    }

    pub fn middle_up(&mut self) {
        self.handle(Action::MiddleUp);
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.handle(Action::Wheel(delta_y));
    }

    pub fn key_down(&mut self, key: Key) {
        self.handle(Action::KeyDown(key));
    }

    pub fn key_up(&mut self, key: Key) {
        self.handle(Action::KeyUp(key));
    }

    /// Fails without touching the paint color when a component is out of range.
    pub fn set_paint_color(&mut self, h: u16, s: u8, l: u8) -> Result<(), ColorError> {
        self.handle(Action::PaintColor(Hsl::new(h, s, l)?));
        Ok(())
    }

    /// Dispatch one action through the transition table.
    pub fn handle(&mut self, action: Action) {
        let mode = self.mode();
        match action {
            Action::PointerMove(p) => self.on_pointer_move(p),
            Action::PrimaryDown => match mode {
                EditMode::Idle => {
                    self.place_voxel();
                    self.enter(EditMode::Adding);
                }
                EditMode::CanDrag => {
                    self.drag_anchor = self.pointer;
                    self.enter(EditMode::Dragging);
                }
                EditMode::CanRotate => {
                    self.rotate_anchor = self.pointer;
                    self.enter(EditMode::Rotating);
                }
                EditMode::CanRemove => {
                    self.remove_voxel();
                    self.enter(EditMode::Removing);
                }
                _ => {}
            },
            Action::PrimaryUp => {
                if matches!(
                    mode,
                    EditMode::Adding | EditMode::Removing | EditMode::Dragging | EditMode::Rotating
                ) {
                    self.leave();
                }
            }
            Action::MiddleDown => {
                if matches!(mode, EditMode::Idle | EditMode::CanRotate) {
                    self.rotate_anchor = self.pointer;
                    self.enter(EditMode::Rotating);
                    self.placeable = None;
                }
            }
            Action::MiddleUp => {
                if mode == EditMode::Rotating {
                    self.leave();
                }
            }
            Action::Wheel(delta_y) => {
                self.view.zoom(-delta_y / self.config.wheel_zoom_divisor);
                self.placeable = None;
            }
            Action::KeyDown(key) => self.on_key_down(key),
            Action::KeyUp(key) => self.on_key_up(key),
            Action::PaintColor(color) => {
                tracing::debug!(h = color.h, s = color.s, l = color.l, "paint color");
                self.paint = color;
            }
        }
    }

    fn on_pointer_move(&mut self, p: DVec2) {
        self.pointer = p;
        self.resolve_cursor();
        match self.mode() {
            EditMode::Idle => self.refresh_placeable(),
            EditMode::Adding => {
                self.refresh_placeable();
                self.place_voxel();
            }
            EditMode::Dragging => self.drag_to(p),
            EditMode::Rotating => self.rotate_to(p),
            EditMode::Removing => self.remove_voxel(),
            _ => {}
        }
    }

    fn on_key_down(&mut self, key: Key) {
        let armed = match key {
            Key::Space => Some(EditMode::CanDrag),
            Key::Shift => Some(EditMode::CanRotate),
            Key::Alt => Some(EditMode::CanRemove),
            _ => None,
        };
        if let Some(armed) = armed {
            if self.mode() == EditMode::Idle {
                self.placeable = None;
                self.enter(armed);
            }
            return;
        }

        match key {
            Key::Plus => self.rotate(self.config.key_rotate_step),
            Key::Minus => self.rotate(-self.config.key_rotate_step),
            _ => match key.level_step() {
                Some(step) => self.move_grid_level(step),
                None => return,
            },
        }
        self.placeable = None;
    }

    fn on_key_up(&mut self, key: Key) {
        let family: &[EditMode] = match key {
            Key::Space => &DRAG_FAMILY,
            Key::Shift => &ROTATE_FAMILY,
            Key::Alt => &REMOVE_FAMILY,
            _ => return,
        };
        if family.contains(&self.mode()) {
            let from = self.mode();
            self.modes.unwind(family);
            tracing::debug!(%from, to = %self.mode(), "mode released");
        }
    }

    fn enter(&mut self, mode: EditMode) {
        let from = self.mode();
        self.modes.push(mode);
        tracing::debug!(%from, to = %mode, "mode entered");
    }

    fn leave(&mut self) {
        let from = self.mode();
        self.modes.pop();
        tracing::debug!(%from, to = %self.mode(), "mode left");
    }

    fn resolve_cursor(&mut self) {
        self.cursor = CursorResolver::new(&self.view, &self.grid, self.grid_level)
            .resolve(self.pointer);
    }

    fn refresh_placeable(&mut self) {
        self.placeable = placeable_cell(self.cursor, &self.grid);
    }

    /// Put a voxel in the placeable cell, if there is one.
    fn place_voxel(&mut self) {
        let Some(cell) = self.placeable else {
            tracing::trace!("nothing placeable");
            return;
        };
        if let Err(err) = self.grid.set(Voxel::new(cell, self.paint)) {
            tracing::warn!(%err, "placement skipped");
            return;
        }
        tracing::debug!(%cell, "voxel placed");
        self.resolve_cursor();
        self.refresh_placeable();
    }

    /// Clear the voxel under the cursor. The floor sentinel and cells outside
    /// the grid are skipped.
    fn remove_voxel(&mut self) {
        let cell = self.cursor.cell;
        if !self.grid.is_inside(cell) {
            tracing::trace!(%cell, "nothing to remove");
            return;
        }
        match self.grid.remove(cell) {
            Ok(Some(_)) => {
                tracing::debug!(%cell, "voxel removed");
                self.resolve_cursor();
            }
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, "removal skipped"),
        }
    }

    /// Pan so the floor point under the drag anchor follows the pointer.
    fn drag_to(&mut self, p: DVec2) {
        let from = self.view.unproject_z(self.drag_anchor, 0.0);
        let to = self.view.unproject_z(p, 0.0);
        self.view.pan((from - to).truncate());
        self.drag_anchor = p;
    }

    fn rotate_to(&mut self, p: DVec2) {
        let angle = -(p.x - self.rotate_anchor.x) / self.config.rotate_sensitivity;
        self.rotate(angle);
        self.rotate_anchor = p;
    }

    /// Rotate about the center of the grid floor.
    fn rotate(&mut self, angle: f64) {
        self.view.rotate_around(angle, self.grid.center());
    }

    fn move_grid_level(&mut self, step: i32) {
        self.grid_level = (self.grid_level + step).clamp(0, self.top_level());
        tracing::debug!(level = self.grid_level, "grid level");
    }

    fn top_level(&self) -> i32 {
        self.grid.size().z as i32 - 1
    }
}
