//! Mounting plate for the v2 appliance and its power supply.
//!
//! The plate is an L-shaped outline: a square pad under the appliance's
//! four mounting holes, joined with concave fillets to a taller strip
//! under the supply case, reaching `margin_y` past the pad at front and
//! back. The supply strip carries one hole per case corner.

use super::netstack_v2_supply;
use crate::features::m3_bolt_clearance_hole;
use crate::sketch::{Arc, Outline, Point2};
use crate::Part;
use serde::Deserialize;

/// Design parameters. The supply case is configured in the nested
/// `supply` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Material around the appliance holes.
    pub padding: f64,
    /// Corner radius of the appliance pad.
    pub device_r: f64,
    /// Corner radius of the supply strip.
    pub supply_r: f64,
    /// Free space between the pad and the supply strip for cables.
    pub cable_slot: f64,
    /// Spacing of the appliance mounting holes.
    pub hole_xy: f64,
    /// Distance from the holes to the pad's right edge, before the slot.
    pub hole_margin_x: f64,
    /// Plate thickness.
    pub plate_z: f64,
    /// The supply case standing on the strip.
    pub supply: netstack_v2_supply::Params,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            padding: 5.0,
            device_r: 8.0,
            supply_r: 1.0,
            cable_slot: 15.0,
            hole_xy: 70.0,
            hole_margin_x: 33.0,
            plate_z: 4.0,
            supply: netstack_v2_supply::Params::default(),
        }
    }
}

impl Params {
    /// Width of the appliance pad.
    pub fn plate_x(&self) -> f64 {
        self.padding + self.hole_xy + self.hole_margin_x + self.cable_slot
    }

    /// Depth of the appliance pad.
    pub fn plate_y(&self) -> f64 {
        self.hole_xy + 2.0 * self.padding
    }

    /// How far the supply strip reaches past the pad, front and back.
    pub fn margin_y(&self) -> f64 {
        self.supply.case_y() - self.plate_y()
    }
}

/// Plate outline, traced clockwise from the pad's lower-left corner.
///
/// The pad's lower-left corner is the origin; the supply strip extends
/// to negative y.
pub fn outline(p: &Params) -> Outline {
    let (px, py, my) = (p.plate_x(), p.plate_y(), p.margin_y());
    let (dr, sr) = (p.device_r, p.supply_r);
    let sx = p.supply.case_x();
    let pt = Point2::new;

    Outline::from_arcs([
        Arc::new(pt(dr, dr), dr, 270.0, 180.0).cw(),
        Arc::new(pt(dr, py - dr), dr, 180.0, 90.0).cw(),
        // Concave fillet into the supply strip.
        Arc::new(pt(px - dr, py + dr), dr, 270.0, 360.0).ccw(),
        Arc::new(pt(px + sr, py + my - sr), sr, 180.0, 90.0).cw(),
        Arc::new(pt(px + sx - sr, py + my - sr), sr, 90.0, 0.0).cw(),
        Arc::new(pt(px + sx - sr, -my + sr), sr, 360.0, 270.0).cw(),
        Arc::new(pt(px + sr, -my + sr), sr, 270.0, 180.0).cw(),
        Arc::new(pt(px - dr, -dr), dr, 0.0, 90.0).ccw(),
    ])
}

/// Build the plate, front edge of the supply strip on `y = 0`.
pub fn build(p: &Params) -> Part {
    let (px, py, my) = (p.plate_x(), p.plate_y(), p.margin_y());
    let (pad, hole) = (p.padding, p.hole_xy);
    let sx = p.supply.case_x();
    let w = p.supply.wall;

    let mut solid = Part::extrude("bottom", &outline(p), p.plate_z);

    let bolt = m3_bolt_clearance_hole();
    let holes = [
        // Appliance.
        (pad, pad + hole / 2.0),
        (pad + hole / 2.0, pad + hole),
        (pad + hole, pad + hole / 2.0),
        (pad + hole / 2.0, pad),
        // Supply case corners.
        (px + w / 2.0, py + my - w / 2.0),
        (px + sx - w / 2.0, py + my - w / 2.0),
        (px + sx - w / 2.0, -my + w / 2.0),
        (px + w / 2.0, -my + w / 2.0),
    ];
    for (x, y) in holes {
        solid -= bolt.translate(x, y, 0.0);
    }

    solid.forward(my).color_alpha("#333", 0.5)
}
