//! 1U chassis holding a network switch.
//!
//! A solid block with a through slot for the switch, pockets at the four
//! corners for the mounting brackets of the neighbouring chassis, and two
//! notches at the rear that lock the switch in place.

use crate::units::rack_units;
use crate::Part;
use serde::Deserialize;

/// Design parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Body width.
    pub x: f64,
    /// Body depth.
    pub y: f64,
    /// Width of the switch slot.
    pub slot_x: f64,
    /// Height of the switch slot.
    pub slot_z: f64,
    /// How far a mounting bracket overlaps the body at each corner.
    pub bracket_overlap: f64,
    /// Radius of the bracket screw holes.
    pub screw_r: f64,
    /// Depth of the bracket screw holes beyond the corner pocket.
    pub screw_depth: f64,
    /// Distance of the screw axes from the pocket center and from top/bottom.
    pub screw_inset: f64,
    /// Y position where the rear notches start.
    pub notch_y: f64,
    /// Width of each notch.
    pub notch_x: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            x: 200.0,
            y: 150.0,
            slot_x: 170.0,
            slot_z: 37.0,
            bracket_overlap: 10.0,
            screw_r: 2.5 / 2.0,
            screw_depth: 10.0,
            screw_inset: 5.0,
            notch_y: 112.0,
            notch_x: 10.0,
        }
    }
}

/// Pocket cut at every corner, centered on the vertical edge at the origin.
fn corner(p: &Params, z: f64) -> Part {
    let c = 2.0 * p.bracket_overlap;
    let mut pocket = Part::centered_cube("corner", c, c, z + 2.0).up(z / 2.0);

    let screw = Part::cylinder("screw", p.screw_r, c + 2.0 * p.screw_depth, 0).rotate(-90.0, 0.0, 0.0);
    let y = -(c / 2.0 + p.screw_depth);
    for dx in [p.screw_inset, -p.screw_inset] {
        for sz in [p.screw_inset, z - p.screw_inset] {
            pocket += screw.translate(dx, y, sz);
        }
    }
    pocket
}

/// Build the chassis, front face on `y = 0`.
pub fn build(p: &Params) -> Part {
    let z = rack_units(1.0);
    let mut solid = Part::cube("switch_chassis", p.x, p.y, z);

    solid -= Part::cube("slot", p.slot_x, p.y + 2.0, p.slot_z).translate(
        (p.x - p.slot_x) / 2.0,
        -1.0,
        (z - p.slot_z) / 2.0,
    );

    let corner = corner(p, z);
    solid -= corner.clone();
    solid -= corner.forward(p.y);
    solid -= corner.translate(p.x, p.y, 0.0);
    solid -= corner.right(p.x);

    for i in 0..2 {
        let x = (p.x - p.slot_x) / 2.0 + i as f64 * (p.slot_x - p.bracket_overlap);
        solid += Part::cube("notch", p.notch_x, p.y - p.notch_y, z).translate(x, p.notch_y, 0.0);
    }

    solid
}
