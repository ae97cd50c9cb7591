//! 1U Libre19 chassis that fits 10-inch network shelves.
//!
//! A folded sheet shell open at front and back, with a front panel spanning
//! the full 10-inch width. The panel carries three screw holes per side at
//! the standard rack hole heights.

use crate::units::{inches, rack10_outer, rack10_screw_spacing, rack_units};
use crate::Part;
use serde::Deserialize;

/// Design parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Sheet thickness.
    pub sheet: f64,
    /// Interior width.
    pub inner_x: f64,
    /// Interior depth.
    pub inner_y: f64,
    /// Interior height.
    pub inner_z: f64,
    /// Radius of the panel screw holes.
    pub screw_r: f64,
    /// Depth of the panel screw holes.
    pub screw_depth: f64,
    /// Heights of the screw holes above the bottom of the rack unit.
    pub screw_heights: Vec<f64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            sheet: 0.8,
            inner_x: 72.0 * 3.0,
            inner_y: 150.0,
            inner_z: 40.0,
            screw_r: inches(0.125),
            screw_depth: 3.0,
            screw_heights: vec![inches(0.25), inches(0.625), inches(1.25)],
        }
    }
}

impl Params {
    /// Outer width of the shell.
    pub fn outer_x(&self) -> f64 {
        self.inner_x + 2.0 * self.sheet
    }

    /// Outer height of the shell.
    pub fn outer_z(&self) -> f64 {
        self.inner_z + 2.0 * self.sheet
    }
}

/// Build the chassis, front panel face on `y = 0`, centered in one rack unit.
pub fn build(p: &Params) -> Part {
    let t = p.sheet;
    let x = p.outer_x();
    let z = p.outer_z();
    let panel_x = rack10_outer(1.0);

    let panel = Part::cube("front_panel", panel_x, t, z).right((x - panel_x) / 2.0);
    let shell = Part::cube("shell", x, p.inner_y, z)
        - Part::cube("interior", p.inner_x, p.inner_y + 2.0, p.inner_z).translate(t, -1.0, t);

    let mut solid = (panel + shell).translate((panel_x - x) / 2.0, 0.0, (rack_units(1.0) - z) / 2.0);

    let screw = Part::cylinder("screw", p.screw_r, p.screw_depth, 0)
        .rotate(-90.0, 0.0, 0.0)
        .translate((panel_x - rack10_screw_spacing(1.0)) / 2.0, -1.0, 0.0);
    let column = Part::union_all("screws", p.screw_heights.iter().map(|&h| screw.up(h)));
    solid -= column.linear_pattern(rack10_screw_spacing(1.0), 0.0, 0.0, 2);

    solid.renamed("libre19_10in_1u")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn spans_the_panel_width() {
        let b = build(&Params::default()).bounds().unwrap();
        assert_abs_diff_eq!(b.min.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.x, 254.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.min.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.y, 150.0, epsilon = 1e-9);
    }

    #[test]
    fn centered_in_one_unit() {
        let p = Params::default();
        let b = build(&p).bounds().unwrap();
        assert_abs_diff_eq!(b.min.z + b.max.z, rack_units(1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b.size().z, p.outer_z(), epsilon = 1e-9);
    }

    #[test]
    fn screw_holes_follow_params() {
        let p = Params {
            screw_heights: vec![inches(0.25)],
            ..Params::default()
        };
        let scad = build(&p).to_scad().unwrap();
        // One hole on each side of the panel.
        assert_eq!(scad.matches("cylinder(").count(), 2);
        assert!(scad.contains("r = 3.175"));
    }
}
