//! Pointer-to-voxel-face resolution.
//!
//! A screen point is the projection of a whole ray through the grid. The
//! resolver samples that ray on every integer plane of each axis, keeps the
//! planes where it touches an occupied cell (or the active grid level), and
//! picks one candidate with a fixed camera-relative ordering. Cost is
//! `O(size.x + size.y + size.z)`; the volume is never scanned.

use glam::{DVec2, DVec3, IVec3};
use isovox_common::{Cursor, Face, floor_cell};
use isovox_kernel::VoxelGrid;
use isovox_render::{View, VisibleSides};
use std::cmp::Ordering;

/// Resolves the voxel face under a screen point for one grid/view pair.
#[derive(Debug, Clone, Copy)]
pub struct CursorResolver<'a> {
    view: &'a View,
    grid: &'a VoxelGrid,
    grid_level: i32,
}

impl<'a> CursorResolver<'a> {
    pub fn new(view: &'a View, grid: &'a VoxelGrid, grid_level: i32) -> Self {
        Self {
            view,
            grid,
            grid_level,
        }
    }

    /// The targeted face, or [`Cursor::NONE`] when nothing is hit.
    pub fn resolve(&self, screen: DVec2) -> Cursor {
        let cursor = self
            .candidates(screen)
            .into_iter()
            .next()
            .unwrap_or(Cursor::NONE);
        tracing::trace!(cell = %cursor.cell, face = cursor.face.id(), "cursor resolved");
        cursor
    }

    /// Every hit along the ray, best first.
    ///
    /// Ordered by `z` descending, then `y`, then `x`, where `y` and `x` run
    /// descending when the positive side of that axis faces the camera. Ties
    /// keep discovery order: top face, then Y sides, then X sides.
    pub fn candidates(&self, screen: DVec2) -> Vec<Cursor> {
        let sides = self.view.visible_sides();
        let mut hits = Vec::new();

        if let Some(top) = self.top_face(screen) {
            hits.push(top);
        }
        self.y_sides(screen, sides, &mut hits);
        self.x_sides(screen, sides, &mut hits);

        hits.sort_by(|a, b| {
            b.cell
                .z
                .cmp(&a.cell.z)
                .then_with(|| toward_camera(a.cell.y, b.cell.y, sides.y))
                .then_with(|| toward_camera(a.cell.x, b.cell.x, sides.x))
        });
        hits
    }

    /// Scan levels from the top down; stop at the active grid level or the
    /// first level resting on an occupied cell.
    fn top_face(&self, screen: DVec2) -> Option<Cursor> {
        let size = self.grid.size();
        for z in (0..=size.z as i32).rev() {
            let p = self.view.unproject_z(screen, z as f64);
            let Some(below) = floor_cell(DVec3::new(p.x, p.y, (z - 1) as f64)) else {
                continue;
            };
            if z == self.grid_level || self.grid.is_occupied(below) {
                return Some(Cursor::new(below, Face::Top));
            }
        }
        None
    }

    fn y_sides(&self, screen: DVec2, sides: VisibleSides, hits: &mut Vec<Cursor>) {
        let face = if sides.y { Face::PosY } else { Face::NegY };
        let offset = DVec3::new(0.0, sides.y_offset() as f64, 0.0);
        for y in (0..self.grid.size().y as i32).rev() {
            let p = self.view.unproject_y(screen, y as f64);
            if let Some(cell) = floor_cell(p - offset).filter(|c| self.grid.is_occupied(*c)) {
                hits.push(Cursor::new(cell, face));
            }
        }
    }

    fn x_sides(&self, screen: DVec2, sides: VisibleSides, hits: &mut Vec<Cursor>) {
        let face = if sides.x { Face::PosX } else { Face::NegX };
        let offset = DVec3::new(sides.x_offset() as f64, 0.0, 0.0);
        for x in (0..self.grid.size().x as i32).rev() {
            let p = self.view.unproject_x(screen, x as f64);
            if let Some(cell) = floor_cell(p - offset).filter(|c| self.grid.is_occupied(*c)) {
                hits.push(Cursor::new(cell, face));
            }
        }
    }
}

/// Descending when the positive side faces the camera, ascending otherwise.
fn toward_camera(a: i32, b: i32, positive_visible: bool) -> Ordering {
    if positive_visible { b.cmp(&a) } else { a.cmp(&b) }
}

/// Where a voxel placed against the cursor's face would go: the neighbour
/// across that face, if it is inside the grid and empty.
pub fn placeable_cell(cursor: Cursor, grid: &VoxelGrid) -> Option<IVec3> {
    let cell = cursor.adjacent();
    (grid.is_inside(cell) && !grid.is_occupied(cell)).then_some(cell)
}
