//! Painter's-order draw list for the isometric scene.
//!
//! Far walls and floor come first, then each layer from the bottom up with the
//! grid lines of the active level drawn before that layer's voxels. Within a
//! layer, cells are visited from the hidden sides toward the visible ones so
//! nearer cubes overwrite farther ones.

use glam::{DVec2, DVec3, IVec3};
use isovox_common::Hsl;
use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::renderer::{RenderScene, Renderer};
use crate::view::View;

/// Color with fractional lightness and an alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    fn shaded(color: Hsl, lightness: f64, a: f64) -> Self {
        Self::new(color.h as f64, color.s as f64, lightness, a)
    }
}

/// One primitive in screen space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Polygon { corners: [DVec2; 4], color: Hsla },
    Line { from: DVec2, to: DVec2, color: Hsla },
}

/// Builds the draw list for a [`RenderScene`].
#[derive(Debug, Default)]
pub struct IsoPainter;

impl IsoPainter {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for IsoPainter {
    type Output = Vec<DrawCommand>;

    fn render(&self, scene: &RenderScene<'_>) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        let size = scene.grid.size();
        let sides = scene.view.visible_sides();

        border(scene, &mut out);

        let xs: Vec<i32> = if sides.x {
            (0..size.x as i32).collect()
        } else {
            (0..size.x as i32).rev().collect()
        };
        let ys: Vec<i32> = if sides.y {
            (0..size.y as i32).collect()
        } else {
            (0..size.y as i32).rev().collect()
        };

        for z in 0..size.z as i32 {
            if z == scene.grid_level {
                grid_lines(scene, z, &mut out);
            }
            for &x in &xs {
                for &y in &ys {
                    let pos = IVec3::new(x, y, z);
                    match scene.grid.get(pos) {
                        Ok(Some(voxel)) => {
                            let l = voxel.color.l as f64;
                            let l = if scene.cursor.cell == pos {
                                l * 3.0 / 4.0 + 25.0
                            } else {
                                l
                            };
                            cube(scene.view, pos, voxel.color, l, 1.0, &mut out);
                        }
                        Ok(None) if scene.placeable == Some(pos) => {
                            cube(scene.view, pos, scene.paint, scene.paint.l as f64, 0.5, &mut out);
                        }
                        _ => {}
                    }
                }
            }
        }

        tracing::trace!(commands = out.len(), "draw list built");
        out
    }
}

/// Wall brightness as the camera turns: oscillates between 0.7 and 1.3.
fn wall_light(angle: f64) -> f64 {
    0.3 * (2.0 * angle + FRAC_PI_4).cos() + 1.0
}

fn quad(view: &View, corners: [DVec3; 4], color: Hsla) -> DrawCommand {
    DrawCommand::Polygon {
        corners: corners.map(|c| view.project(c)),
        color,
    }
}

/// The two far walls and the floor of the grid's bounding box.
fn border(scene: &RenderScene<'_>, out: &mut Vec<DrawCommand>) {
    let size = scene.grid.size();
    let (sx, sy, sz) = (size.x as f64, size.y as f64, size.z as f64);
    let sides = scene.view.visible_sides();
    let angle = scene.view.camera().angle;

    let wx = if sides.x { 0.0 } else { sx };
    out.push(quad(
        scene.view,
        [
            DVec3::new(wx, 0.0, 0.0),
            DVec3::new(wx, sy, 0.0),
            DVec3::new(wx, sy, sz),
            DVec3::new(wx, 0.0, sz),
        ],
        Hsla::new(200.0, 80.0, 50.0 * wall_light(angle + FRAC_PI_2), 0.1),
    ));

    let wy = if sides.y { 0.0 } else { sy };
    out.push(quad(
        scene.view,
        [
            DVec3::new(0.0, wy, 0.0),
            DVec3::new(sx, wy, 0.0),
            DVec3::new(sx, wy, sz),
            DVec3::new(0.0, wy, sz),
        ],
        Hsla::new(200.0, 80.0, 50.0 * wall_light(angle), 0.1),
    ));

    out.push(quad(
        scene.view,
        [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(sx, 0.0, 0.0),
            DVec3::new(sx, sy, 0.0),
            DVec3::new(0.0, sy, 0.0),
        ],
        Hsla::new(200.0, 80.0, 20.0, 0.1),
    ));
}

fn grid_lines(scene: &RenderScene<'_>, z: i32, out: &mut Vec<DrawCommand>) {
    let size = scene.grid.size();
    let (sx, sy, h) = (size.x as f64, size.y as f64, z as f64);
    let color = Hsla::new(0.0, 80.0, 50.0, 0.6);
    for x in 0..=size.x {
        let x = x as f64;
        out.push(DrawCommand::Line {
            from: scene.view.project(DVec3::new(x, 0.0, h)),
            to: scene.view.project(DVec3::new(x, sy, h)),
            color,
        });
    }
    for y in 0..=size.y {
        let y = y as f64;
        out.push(DrawCommand::Line {
            from: scene.view.project(DVec3::new(0.0, y, h)),
            to: scene.view.project(DVec3::new(sx, y, h)),
            color,
        });
    }
}

/// The three camera-facing faces of one cube: X side, Y side, then top.
fn cube(view: &View, pos: IVec3, color: Hsl, l: f64, alpha: f64, out: &mut Vec<DrawCommand>) {
    let sides = view.visible_sides();
    let p = pos.as_dvec3();
    let (x, y, z) = (p.x, p.y, p.z);

    let fx = x + sides.x_offset() as f64;
    let lx = l * if sides.x { 0.6 } else { 1.4 };
    out.push(quad(
        view,
        [
            DVec3::new(fx, y, z + 1.0),
            DVec3::new(fx, y, z),
            DVec3::new(fx, y + 1.0, z),
            DVec3::new(fx, y + 1.0, z + 1.0),
        ],
        Hsla::shaded(color, lx, alpha),
    ));

    let fy = y + sides.y_offset() as f64;
    let ly = l * if sides.y { 1.2 } else { 0.8 };
    out.push(quad(
        view,
        [
            DVec3::new(x, fy, z + 1.0),
            DVec3::new(x + 1.0, fy, z + 1.0),
            DVec3::new(x + 1.0, fy, z),
            DVec3::new(x, fy, z),
        ],
        Hsla::shaded(color, ly, alpha),
    ));

    out.push(quad(
        view,
        [
            DVec3::new(x, y, z + 1.0),
            DVec3::new(x + 1.0, y, z + 1.0),
            DVec3::new(x + 1.0, y + 1.0, z + 1.0),
            DVec3::new(x, y + 1.0, z + 1.0),
        ],
        Hsla::shaded(color, l * 0.9, alpha),
    ));
}
