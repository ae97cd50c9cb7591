//! Print coupon for dialing in M3 hole sizes.
//!
//! A grid of bolt holes whose thread radius grows by `increment` per
//! column. Even rows start from the tapping radius, odd rows from the
//! clearance radius. Print it, try a bolt in each, keep the best fit.

use crate::features::{rounded_plate, Bolt};
use crate::Part;
use serde::Deserialize;

/// Design parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Distance between hole centers, and from the outer holes to the edge.
    pub pitch: f64,
    /// Radius step from one column to the next.
    pub increment: f64,
    /// Number of columns.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
    /// Corner radius of the coupon.
    pub corner_r: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            pitch: 8.0,
            increment: 0.05,
            cols: 10,
            rows: 2,
            corner_r: 2.0,
        }
    }
}

impl Params {
    /// Thread radius of the hole in column `col` of row `row`.
    pub fn thread_r(&self, col: usize, row: usize) -> f64 {
        let bolt = Bolt::M3;
        let base = if row % 2 == 1 {
            bolt.clearance_r
        } else {
            bolt.tapping_r
        };
        base + self.increment * col as f64
    }
}

/// Build the coupon.
pub fn build(p: &Params) -> Part {
    let bolt = Bolt::M3;
    let x = p.pitch * (p.cols + 1) as f64;
    let y = p.pitch * (p.rows + 1) as f64;
    let z = bolt.head_z + bolt.thread_z;

    let mut solid = rounded_plate("m3_bolt_tolerance", x, y, p.corner_r, z);
    for col in 0..p.cols {
        for row in 0..p.rows {
            solid -= bolt.hole(p.thread_r(col, row)).translate(
                (1 + col) as f64 * p.pitch,
                (1 + row) as f64 * p.pitch,
                0.0,
            );
        }
    }

    solid.color("#666")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn coupon_size() {
        let b = build(&Params::default()).bounds().unwrap();
        assert_abs_diff_eq!(b.size().x, 88.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.size().y, 24.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.size().z, 13.0, epsilon = 1e-9);
    }

    #[test]
    fn radius_grading() {
        let p = Params::default();
        assert_abs_diff_eq!(p.thread_r(0, 0), 1.25, epsilon = 1e-12);
        assert_abs_diff_eq!(p.thread_r(9, 0), 1.7, epsilon = 1e-12);
        assert_abs_diff_eq!(p.thread_r(0, 1), 1.8, epsilon = 1e-12);
        assert_abs_diff_eq!(p.thread_r(9, 1), 2.25, epsilon = 1e-12);
    }

    #[test]
    fn one_hole_per_cell() {
        let p = Params {
            cols: 3,
            rows: 2,
            ..Params::default()
        };
        let scad = build(&p).to_scad().unwrap();
        assert_eq!(scad.matches("cylinder(").count(), 2 * 3 * 2);
        assert!(scad.contains("r = 1.35"));
    }
}
