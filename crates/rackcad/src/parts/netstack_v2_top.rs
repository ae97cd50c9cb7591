//! Cover over the v2 power supply.
//!
//! An open-bottom box around the supply with an extra wall on the right
//! and a recess for the rack rail behind it. A slot at the front floor
//! lets the cables out.

use super::netstack_v2_supply;
use crate::units::rail_widths;
use crate::Part;
use serde::Deserialize;

/// Design parameters. The supply is configured in the nested `supply`
/// table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Vertical print tolerance above the supply.
    pub tolerance_z: f64,
    /// Width and height of the cable slot.
    pub cable_slot: f64,
    /// Overshoot of cutters past the faces they open.
    pub overlap: f64,
    /// The supply under the cover.
    pub supply: netstack_v2_supply::Params,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            tolerance_z: 0.2,
            cable_slot: 15.0,
            overlap: 0.1,
            supply: netstack_v2_supply::Params::default(),
        }
    }
}

/// Build the cover, open face on `z = 0`.
pub fn build(p: &Params) -> Part {
    let s = &p.supply;
    let (cx, cy, cz) = (s.case_x(), s.case_y(), s.case_z());
    let (w, o) = (s.wall, p.overlap);
    let rail = rail_widths(1.0);

    let mut solid = Part::cube("top", cx + w + rail, cy, cz);

    // Rail recess.
    solid -= Part::cube("rail", w + rail + o, cy - w + o, cz + 2.0 * o).translate(cx, w, -o);

    solid -= Part::cube(
        "supply",
        s.x + s.tolerance_xy,
        s.y + s.tolerance_xy,
        s.z + p.tolerance_z + o,
    )
    .translate(w, w, -o);

    solid -= Part::cube("cable_slot", p.cable_slot, cy + 2.0 * o, p.cable_slot + o)
        .translate(w, -o, -o);

    solid.color_alpha("#ff9800", 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cover_dimensions() {
        let p = Params::default();
        let b = build(&p).bounds().unwrap();
        assert_abs_diff_eq!(b.size().x, 66.8 + 8.0 + rail_widths(1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b.size().y, 148.8, epsilon = 1e-9);
        assert_abs_diff_eq!(b.size().z, 38.8, epsilon = 1e-9);
    }

    #[test]
    fn supply_leaves_a_roof() {
        let p = Params::default();
        let roof = p.supply.case_z() - (p.supply.z + p.tolerance_z);
        assert!(roof > 0.0);
        assert_abs_diff_eq!(roof, 8.1, epsilon = 1e-9);
    }

    #[test]
    fn single_flattened_difference() {
        let scad = build(&Params::default()).to_scad().unwrap();
        assert_eq!(scad.matches("difference()").count(), 1);
        assert_eq!(scad.matches("cube(").count(), 4);
        assert!(scad.contains("color(\"#ff9800\", 0.5)"));
    }
}
