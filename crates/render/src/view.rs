//! Isometric camera and the screen <-> grid transforms.
//!
//! Forward projection, for voxel edge `V = base_voxel_size * scale`:
//!
//! ```text
//! p1     = ((x - cx) * V, (y - cy) * V)
//! p2     = rotate(p1, w)
//! screen = (p2.x + width / 2, p2.y / 2 - (z - cz) * V + height / 2)
//! ```
//!
//! A screen point is the image of a whole ray through the grid, so the
//! inverse needs one coordinate fixed: [`View::unproject`] solves for the two
//! free axes on a plane `x = k`, `y = k` or `z = k`.

use glam::{DVec2, DVec3};
use isovox_common::rotate_2d;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Camera pan, rotation and zoom. Pan is in grid units, angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: DVec3,
    /// Rotation about the vertical axis, kept in `[0, 2π)` by [`View`].
    pub angle: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            angle: FRAC_PI_4,
            scale: 1.0,
        }
    }
}

/// Which side of each horizontal axis faces the camera.
///
/// `x == true` means the +X faces are visible, otherwise the -X faces are.
/// Same for `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleSides {
    pub x: bool,
    pub y: bool,
}

impl VisibleSides {
    /// `x` for `w ∈ [0, π)`, `y` for `w ∈ [0, π/2) ∪ [3π/2, 2π)`.
    pub fn from_angle(w: f64) -> Self {
        Self {
            x: (0.0..PI).contains(&w),
            y: w < FRAC_PI_2 || w >= 3.0 * FRAC_PI_2,
        }
    }

    /// 1 when the +X side is visible, else 0.
    pub fn x_offset(self) -> i32 {
        i32::from(self.x)
    }

    /// 1 when the +Y side is visible, else 0.
    pub fn y_offset(self) -> i32 {
        i32::from(self.y)
    }
}

/// Grid axis, used to pick the plane an unprojection lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(w: f64) -> f64 {
    let r = w.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU { 0.0 } else { r }
}

/// A camera looking at a viewport of `width x height` pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    camera: Camera,
    viewport: DVec2,
    base_voxel_size: f64,
}

impl View {
    pub fn new(viewport: DVec2, base_voxel_size: f64, camera: Camera) -> Self {
        Self {
            camera: Camera {
                angle: normalize_angle(camera.angle),
                ..camera
            },
            viewport,
            base_voxel_size,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width, height);
    }

    /// On-screen edge length of one voxel, in pixels.
    pub fn voxel_size(&self) -> f64 {
        self.base_voxel_size * self.camera.scale
    }

    pub fn visible_sides(&self) -> VisibleSides {
        VisibleSides::from_angle(self.camera.angle)
    }

    /// Grid point to screen point.
    pub fn project(&self, p: DVec3) -> DVec2 {
        let c = &self.camera;
        let vs = self.voxel_size();
        let p1 = DVec2::new(p.x - c.position.x, p.y - c.position.y) * vs;
        let p2 = rotate_2d(p1, c.angle, DVec2::ZERO);
        DVec2::new(
            p2.x + self.viewport.x / 2.0,
            p2.y / 2.0 - (p.z - c.position.z) * vs + self.viewport.y / 2.0,
        )
    }

    /// Screen point to the grid point on the plane `axis = plane`.
    pub fn unproject(&self, screen: DVec2, axis: Axis, plane: f64) -> DVec3 {
        match axis {
            Axis::X => self.unproject_x(screen, plane),
            Axis::Y => self.unproject_y(screen, plane),
            Axis::Z => self.unproject_z(screen, plane),
        }
    }

    /// Unproject onto the horizontal plane `z = plane`. Always finite.
    pub fn unproject_z(&self, screen: DVec2, plane: f64) -> DVec3 {
        let c = &self.camera;
        let vs = self.voxel_size();
        let p0 = DVec2::new(
            screen.x - self.viewport.x / 2.0,
            2.0 * (screen.y + (plane - c.position.z) * vs - self.viewport.y / 2.0),
        );
        let p1 = rotate_2d(p0, -c.angle, DVec2::ZERO) / vs;
        DVec3::new(p1.x + c.position.x, p1.y + c.position.y, plane)
    }

    /// Unproject onto the vertical plane `x = plane`. Non-finite when `sin w == 0`.
    pub fn unproject_x(&self, screen: DVec2, plane: f64) -> DVec3 {
        let c = &self.camera;
        let (u, v) = self.screen_offsets(screen);
        let (sin, cos) = c.angle.sin_cos();
        let dx = plane - c.position.x;
        let dy = (dx * cos - u) / sin;
        let dz = (dx * sin + dy * cos - v) / 2.0;
        DVec3::new(plane, c.position.y + dy, c.position.z + dz)
    }

    /// Unproject onto the vertical plane `y = plane`. Non-finite when `cos w == 0`.
    pub fn unproject_y(&self, screen: DVec2, plane: f64) -> DVec3 {
        let c = &self.camera;
        let (u, v) = self.screen_offsets(screen);
        let (sin, cos) = c.angle.sin_cos();
        let dy = plane - c.position.y;
        let dx = (u + dy * sin) / cos;
        let dz = (dx * sin + dy * cos - v) / 2.0;
        DVec3::new(c.position.x + dx, plane, c.position.z + dz)
    }

    /// Screen offsets from the viewport center in voxel units, vertical axis un-squashed.
    fn screen_offsets(&self, screen: DVec2) -> (f64, f64) {
        let vs = self.voxel_size();
        (
            (screen.x - self.viewport.x / 2.0) / vs,
            2.0 * (screen.y - self.viewport.y / 2.0) / vs,
        )
    }

    /// Move the camera by a grid-space delta.
    pub fn pan(&mut self, delta: DVec2) {
        self.camera.position.x += delta.x;
        self.camera.position.y += delta.y;
    }

    /// Multiply the zoom by `2^exponent`, so equal wheel steps feel equal.
    pub fn zoom(&mut self, exponent: f64) {
        self.camera.scale *= exponent.exp2();
        tracing::debug!(scale = self.camera.scale, "zoom");
    }

    /// Rotate by `delta` radians while keeping `pivot` fixed on screen.
    pub fn rotate_around(&mut self, delta: f64, pivot: DVec3) {
        let anchor = self.project(pivot);
        self.camera.angle = normalize_angle(self.camera.angle + delta);
        let landed = self.unproject_z(anchor, pivot.z);
        self.pan(DVec2::new(pivot.x - landed.x, pivot.y - landed.y));
        tracing::debug!(angle = self.camera.angle, "rotate");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn view_at(angle: f64) -> View {
        View::new(
            DVec2::new(1200.0, 800.0),
            32.0,
            Camera {
                position: DVec3::new(1.5, -2.0, 0.0),
                angle,
                scale: 1.3,
            },
        )
    }

    fn sample_points() -> Vec<DVec3> {
        let mut points = Vec::new();
        for x in -2..4 {
            for y in 0..3 {
                for z in 0..3 {
                    points.push(DVec3::new(x as f64 + 0.25, y as f64 * 1.5, z as f64 - 0.5));
                }
            }
        }
        points
    }

    #[test]
    fn default_camera_looks_at_origin() {
        let v = View::new(DVec2::new(1200.0, 800.0), 32.0, Camera::default());
        assert!(v.project(DVec3::ZERO).abs_diff_eq(DVec2::new(600.0, 400.0), EPS));
        assert_eq!(v.voxel_size(), 32.0);
    }

    #[test]
    fn elevation_moves_straight_up() {
        let v = view_at(0.7);
        let a = v.project(DVec3::new(1.0, 2.0, 0.0));
        let b = v.project(DVec3::new(1.0, 2.0, 1.0));
        assert!((a.x - b.x).abs() < EPS);
        assert!((a.y - b.y - v.voxel_size()).abs() < EPS);
    }

    #[test]
    fn unproject_z_inverts_project() {
        for angle in [0.0, 0.3, FRAC_PI_2, 2.0, PI, 4.5, 6.0] {
            let v = view_at(angle);
            for p in sample_points() {
                let back = v.unproject(v.project(p), Axis::Z, p.z);
                assert!(back.abs_diff_eq(p, EPS), "angle {angle}: {p} -> {back}");
            }
        }
    }

    #[test]
    fn unproject_x_inverts_project() {
        for angle in [0.3, 1.0, 2.0, 4.5, 6.0] {
            let v = view_at(angle);
            for p in sample_points() {
                let back = v.unproject(v.project(p), Axis::X, p.x);
                assert!(back.abs_diff_eq(p, EPS), "angle {angle}: {p} -> {back}");
            }
        }
    }

    #[test]
    fn unproject_y_inverts_project() {
        for angle in [0.0, 0.3, 1.0, 2.0, PI, 4.5, 6.0] {
            let v = view_at(angle);
            for p in sample_points() {
                let back = v.unproject(v.project(p), Axis::Y, p.y);
                assert!(back.abs_diff_eq(p, EPS), "angle {angle}: {p} -> {back}");
            }
        }
    }

    #[test]
    fn unproject_x_is_degenerate_edge_on() {
        let v = view_at(0.0);
        let p = v.unproject_x(DVec2::new(600.0, 400.0), 1.0);
        assert!(!p.is_finite());
    }

    #[test]
    fn rotation_keeps_pivot_on_screen() {
        let pivot = DVec3::new(4.0, 3.0, 0.0);
        for delta in [0.01, PI / 64.0, -0.5, 1.0, PI, -3.0, 7.0] {
            let mut v = view_at(FRAC_PI_4);
            let before = v.project(pivot);
            v.rotate_around(delta, pivot);
            let after = v.project(pivot);
            assert!(before.abs_diff_eq(after, EPS), "delta {delta}");
        }
    }

    #[test]
    fn rotation_keeps_elevated_pivot_on_screen() {
        let pivot = DVec3::new(-1.0, 2.0, 3.0);
        let mut v = view_at(1.0);
        let before = v.project(pivot);
        v.rotate_around(-2.2, pivot);
        assert!(before.abs_diff_eq(v.project(pivot), EPS));
    }

    #[test]
    fn rotation_normalizes_angle() {
        let mut v = view_at(0.1);
        v.rotate_around(-0.2, DVec3::ZERO);
        assert!((v.camera().angle - (TAU - 0.1)).abs() < 1e-12);
        v.rotate_around(0.3, DVec3::ZERO);
        assert!((v.camera().angle - 0.2).abs() < 1e-9);
        v.rotate_around(4.0 * TAU, DVec3::ZERO);
        assert!((0.0..TAU).contains(&v.camera().angle));
    }

    #[test]
    fn normalize_angle_stays_half_open() {
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!(normalize_angle(-1e-20) < TAU);
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn visible_sides_boundaries() {
        assert_eq!(VisibleSides::from_angle(0.0), VisibleSides { x: true, y: true });
        assert!(VisibleSides::from_angle(PI - 1e-9).x);
        assert!(!VisibleSides::from_angle(PI).x);
        assert!(!VisibleSides::from_angle(TAU - 1e-9).x);
        assert!(VisibleSides::from_angle(FRAC_PI_2 - 1e-9).y);
        assert!(!VisibleSides::from_angle(FRAC_PI_2).y);
        assert!(!VisibleSides::from_angle(3.0 * FRAC_PI_2 - 1e-9).y);
        assert!(VisibleSides::from_angle(3.0 * FRAC_PI_2).y);
    }

    #[test]
    fn visible_sides_x_over_full_turn() {
        for i in 0..360 {
            let w = i as f64 / 360.0 * TAU;
            assert_eq!(VisibleSides::from_angle(w).x, w < PI, "w = {w}");
        }
    }

    #[test]
    fn zoom_is_exponential() {
        let mut v = view_at(0.0);
        v.zoom(1.0);
        assert!((v.camera().scale - 2.6).abs() < 1e-12);
        v.zoom(-2.0);
        assert!((v.camera().scale - 0.65).abs() < 1e-12);
    }

    #[test]
    fn pan_moves_horizontally_only() {
        let mut v = view_at(0.0);
        v.pan(DVec2::new(1.0, -1.0));
        assert_eq!(v.camera().position, DVec3::new(2.5, -3.0, 0.0));
    }
}
