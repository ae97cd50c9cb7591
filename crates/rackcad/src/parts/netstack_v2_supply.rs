//! Stand-in body of the v2 power supply, and the size of its case.

use crate::features::rounded_plate;
use crate::Part;
use serde::Deserialize;

/// Supply dimensions and the case wall around it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Case wall thickness.
    pub wall: f64,
    /// Horizontal print tolerance.
    pub tolerance_xy: f64,
    /// Supply width.
    pub x: f64,
    /// Supply depth.
    pub y: f64,
    /// Supply height.
    pub z: f64,
    /// Corner radius of the supply housing.
    pub r: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            wall: 8.0,
            tolerance_xy: 0.3,
            x: 50.5,
            y: 132.5,
            z: 30.5,
            r: 2.0,
        }
    }
}

impl Params {
    /// Outer width of the supply case.
    pub fn case_x(&self) -> f64 {
        self.x + 2.0 * self.wall + self.tolerance_xy
    }

    /// Outer depth of the supply case.
    pub fn case_y(&self) -> f64 {
        self.y + 2.0 * self.wall + self.tolerance_xy
    }

    /// Outer height of the supply case; open at the bottom.
    pub fn case_z(&self) -> f64 {
        self.z + self.wall + self.tolerance_xy
    }
}

/// Build the translucent supply housing.
pub fn build(p: &Params) -> Part {
    rounded_plate("supply", p.x, p.y, p.r, p.z).color_alpha("#333", 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn case_dimensions() {
        let p = Params::default();
        assert_abs_diff_eq!(p.case_x(), 66.8, epsilon = 1e-9);
        assert_abs_diff_eq!(p.case_y(), 148.8, epsilon = 1e-9);
        assert_abs_diff_eq!(p.case_z(), 38.8, epsilon = 1e-9);
    }

    #[test]
    fn housing() {
        let b = build(&Params::default()).bounds().unwrap();
        assert_abs_diff_eq!(b.size().x, 50.5, epsilon = 1e-9);
        assert_abs_diff_eq!(b.size().z, 30.5, epsilon = 1e-9);
    }
}
