//! Pure 2D rotation and cell flooring. Total functions, no state.

use glam::{DVec2, DVec3, IVec3};

/// Rotate `point` by `angle` radians (counter-clockwise in a y-up frame) about `center`.
pub fn rotate_2d(point: DVec2, angle: f64, center: DVec2) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    DVec2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y) + center
}

/// Floor a continuous grid point to the cell containing it.
///
/// Returns `None` for non-finite input, which the unprojections produce at the
/// rotation angles where a side plane is seen edge-on.
pub fn floor_cell(p: DVec3) -> Option<IVec3> {
    if !p.is_finite() {
        return None;
    }
    let f = p.floor();
    if f.abs().max_element() > i32::MAX as f64 {
        return None;
    }
    Some(IVec3::new(f.x as i32, f.y as i32, f.z as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn rotate_quarter_turn_about_origin() {
        let p = rotate_2d(DVec2::new(1.0, 0.0), FRAC_PI_2, DVec2::ZERO);
        assert!(p.abs_diff_eq(DVec2::new(0.0, 1.0), 1e-12));
    }

    #[test]
    fn rotate_about_center_keeps_center_fixed() {
        let c = DVec2::new(3.0, -2.0);
        assert!(rotate_2d(c, 1.234, c).abs_diff_eq(c, 1e-12));
        let p = rotate_2d(DVec2::new(4.0, -2.0), PI, c);
        assert!(p.abs_diff_eq(DVec2::new(2.0, -2.0), 1e-12));
    }

    #[test]
    fn rotate_preserves_distance() {
        let c = DVec2::new(1.0, 1.0);
        let p = DVec2::new(5.0, -3.0);
        for i in 0..16 {
            let r = rotate_2d(p, i as f64 * 0.4, c);
            assert!((r.distance(c) - p.distance(c)).abs() < 1e-9);
        }
    }

    #[test]
    fn floor_cell_floors_negative_values_down() {
        assert_eq!(
            floor_cell(DVec3::new(1.9, -0.1, 0.0)),
            Some(IVec3::new(1, -1, 0))
        );
    }

    #[test]
    fn floor_cell_rejects_non_finite() {
        assert_eq!(floor_cell(DVec3::new(f64::NAN, 0.0, 0.0)), None);
        assert_eq!(floor_cell(DVec3::new(0.0, f64::INFINITY, 0.0)), None);
        assert_eq!(floor_cell(DVec3::new(0.0, 0.0, 1e300)), None);
    }
}
