//! 1U case for a NanoPi R5S.
//!
//! Three cases sit side by side in a 19-inch rack. Each one has a pocket
//! open to the front, a slot in the floor to push the device out, vents in
//! the lid, a spring latch on the left and screw holes at the corners to
//! join it to its neighbours.

use super::netstack_v1_nanopir5s;
use crate::features::corner_screw_holes;
use crate::units::{rack19_inner, rack_units};
use crate::Part;
use serde::Deserialize;

/// Design parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Vertical print tolerance.
    pub tolerance_z: f64,
    /// Horizontal print tolerance.
    pub tolerance_xy: f64,
    /// Cases per rack row, counted as gaps between and around them.
    pub unit_count: u32,
    /// Minimum wall thickness.
    pub margin_base: f64,
    /// Number of lid vents.
    pub vent_count: u32,
    /// The device held by the case.
    pub device: netstack_v1_nanopir5s::Params,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            tolerance_z: 0.15,
            tolerance_xy: 0.4,
            unit_count: 4,
            margin_base: 3.0,
            vent_count: 5,
            device: netstack_v1_nanopir5s::Params::default(),
        }
    }
}

impl Params {
    /// Case width: a third of the usable rack opening.
    pub fn case_x(&self) -> f64 {
        (rack19_inner(1.0).floor() - f64::from(self.unit_count) * self.margin_base) / 3.0
    }

    /// Case depth.
    pub fn case_y(&self) -> f64 {
        self.device.y + 2.0 * self.margin_base + 2.0 * self.tolerance_xy
    }

    /// Case height.
    pub fn case_z(&self) -> f64 {
        rack_units(1.0) - 2.0 * self.tolerance_z
    }
}

/// Build the case, front face on `y = 0`.
pub fn build(p: &Params) -> Part {
    let (tz, txy, mb) = (p.tolerance_z, p.tolerance_xy, p.margin_base);
    let (case_x, case_y, case_z) = (p.case_x(), p.case_y(), p.case_z());
    let mut solid = Part::cube("case_nanopir5s", case_x, case_y, case_z);

    let pocket_x = p.device.x + 2.0 * txy;
    let pocket_y = p.device.y + 2.0 * txy;
    let pocket_z = p.device.z + 2.0 * tz;

    let (slot_x, slot_y, slot_z) = (pocket_x / 2.0, pocket_y / 2.0, mb + 2.0 * tz);
    solid -= Part::cube("slot", slot_x, slot_y, slot_z).translate(
        (case_x - slot_x) / 2.0,
        (case_y - slot_y) / 2.0,
        -tz,
    );

    let (front_y, front_z) = (case_y + 2.0 * txy, p.device.z + 2.0 * tz);
    solid -= Part::cube("front", pocket_x, front_y, front_z).translate(
        (case_x - pocket_x) / 2.0,
        -(mb + txy),
        mb,
    );

    let rear_x = pocket_x - 2.0 * mb;
    let rear_z = p.device.z - 2.0 * mb + 2.0 * tz;
    solid -= Part::cube("rear", rear_x, case_y + 2.0 * txy, rear_z).translate(
        (case_x - rear_x) / 2.0,
        -txy,
        2.0 * mb,
    );

    solid -= vents(p, pocket_x, pocket_z);

    let latch_x = 3.0 * mb + txy;
    let latch_y = case_y - 2.0 * mb - txy;
    let latch_z = pocket_z - 2.0 * mb;
    let latch_offset = (case_x - pocket_x) / 2.0 - latch_x + txy;
    solid -= Part::cube("latch_cutout", latch_x, latch_y, pocket_z).translate(latch_offset, -txy, mb);

    let latch = Part::cube("latch", latch_x, 3.0 * mb, latch_z).forward(latch_y - 3.0 * mb)
        + Part::cube("latch_spring", mb, latch_y + txy, latch_z).translate(latch_x - mb, -txy, 0.0)
        + Part::cube("latch_grip", 3.0 * mb, 4.0 * mb, latch_z).translate(
            latch_x - 2.0 * mb,
            -(txy + 3.0 * mb),
            0.0,
        );
    solid += latch.translate(latch_offset, -txy, 2.0 * mb);

    solid = solid.up((rack_units(1.0) - case_z) / 2.0);
    solid -= corner_screw_holes(case_x, case_y);

    solid.color("#666")
}

/// Row of lid vents, each with relief cuts at both ends.
fn vents(p: &Params, pocket_x: f64, pocket_z: f64) -> Part {
    let (tz, txy, mb) = (p.tolerance_z, p.tolerance_xy, p.margin_base);
    let (case_x, case_y, case_z) = (p.case_x(), p.case_y(), p.case_z());
    let n = f64::from(p.vent_count);

    let vent_x = (pocket_x - (n - 1.0) * mb) / n;
    let vent_y = case_y + 2.0 * txy;
    let vent_z = case_z - pocket_z - 2.0 * mb + tz;

    let relief = Part::centered_cube("vent_relief", vent_x + 2.0 * txy, mb + 2.0 * txy, mb + txy);
    let mut vent = Part::centered_cube("vent", vent_x, vent_y, vent_z);
    vent -= relief.translate(0.0, (vent_y - mb) / 2.0 + txy, -mb - tz);
    vent -= relief.translate(0.0, -(vent_y - mb) / 2.0, -mb - tz);
    let vent = vent.translate(vent_x / 2.0, vent_y / 2.0, vent_z / 2.0 - 2.0 * tz);

    let x0 = (case_x - pocket_x) / 2.0;
    vent.translate(x0, -txy, case_z - vent_z - mb)
        .linear_pattern(mb + vent_x, 0.0, 0.0, p.vent_count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn three_cases_fit_a_rack_row() {
        let p = Params::default();
        assert_abs_diff_eq!(p.case_x(), 146.0, epsilon = 1e-12);
        assert!(3.0 * p.case_x() < rack19_inner(1.0));
    }

    #[test]
    fn case_dimensions() {
        let p = Params::default();
        let b = build(&p).bounds().unwrap();
        assert_abs_diff_eq!(b.size().x, p.case_x(), epsilon = 1e-9);
        assert_abs_diff_eq!(b.min.z, 0.15, epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.z, rack_units(1.0) - 0.15, epsilon = 1e-9);
        // The latch grip sticks out of the front face.
        assert!(b.min.y < 0.0);
        assert_abs_diff_eq!(b.max.y, p.case_y(), epsilon = 1e-9);
    }

    #[test]
    fn vent_count_is_configurable() {
        let p = Params {
            vent_count: 3,
            ..Params::default()
        };
        let scad = vents(&p, 95.3, 30.3).to_scad().unwrap();
        assert_eq!(scad.matches("cube(size").count(), 3 * 3);
    }

    #[test]
    fn larger_device_widens_case_depth() {
        let mut p = Params::default();
        p.device.y = 80.0;
        assert_abs_diff_eq!(p.case_y(), 80.0 + 6.0 + 0.8, epsilon = 1e-12);
    }
}
