//! Libre19 case for the Seeed reTerminal CM4 router board.
//!
//! The board drops into a through cutout and rests on two support rails.
//! Each front connector gets its own opening through the front wall.

use crate::units::{libre19_x, libre19_y, libre19_z};
use crate::Part;
use serde::Deserialize;

/// A connector opening in the front wall, relative to the board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Port {
    /// Connector name, used as the cutter name.
    pub name: String,
    /// Opening width.
    pub width: f64,
    /// Opening height.
    pub height: f64,
    /// Connector center along the board edge.
    pub center_x: f64,
    /// Opening bottom above the board; negative below it.
    pub offset_z: f64,
}

impl Port {
    fn new(name: &str, width: f64, height: f64, center_x: f64, offset_z: f64) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            center_x,
            offset_z,
        }
    }
}

/// Design parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Case width in Libre19 columns.
    pub columns: f64,
    /// Board width.
    pub pcb_x: f64,
    /// Board depth.
    pub pcb_y: f64,
    /// Board offset from the left wall.
    pub pcb_offset_x: f64,
    /// Board offset from the front wall, which is also the wall thickness.
    pub pcb_offset_y: f64,
    /// Height of the board above the case floor.
    pub pcb_offset_z: f64,
    /// Length of each support rail.
    pub support_x: f64,
    /// Width of each support rail.
    pub support_y: f64,
    /// Front wall openings.
    pub ports: Vec<Port>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            columns: 2.0,
            pcb_x: 75.8,
            pcb_y: 64.95,
            pcb_offset_x: 3.0,
            pcb_offset_y: 3.0,
            pcb_offset_z: 6.0,
            support_x: 60.0,
            support_y: 3.0,
            ports: vec![
                Port::new("usb_a", 14.85, 15.45, 67.5, 2.45),
                Port::new("ethernet", 32.2, 13.9, 39.5, 2.1),
                Port::new("usb_c", 3.25, 8.95, 18.0, 1.6),
                Port::new("hdmi", 6.55, 2.95, 7.0, 1.6),
                Port::new("sd_card", 14.35, 2.0, 8.0, -2.0),
            ],
        }
    }
}

/// Build the case, front wall on `y = 0`.
pub fn build(p: &Params) -> Part {
    let (x, y, z) = (libre19_x(p.columns), libre19_y(1.0), libre19_z(1.0));
    let mut solid = Part::cube("cm4rt_case", x, y, z);

    solid -= Part::cube("pcb", p.pcb_x, p.pcb_y, z + 2.0).translate(
        p.pcb_offset_x,
        p.pcb_offset_y,
        -1.0,
    );

    let support = Part::cube("support", p.support_x, p.support_y, p.pcb_offset_z);
    let support_x = p.pcb_offset_x + p.pcb_x - p.support_x;
    solid += support.translate(support_x, p.pcb_offset_y, 0.0);
    solid += support.translate(support_x, p.pcb_offset_y + p.pcb_y - p.support_y, 0.0);

    for port in &p.ports {
        solid -= Part::cube(port.name.as_str(), port.width, p.pcb_offset_y + 2.0, port.height)
            .translate(
                p.pcb_offset_x + port.center_x - port.width / 2.0,
                -1.0,
                p.pcb_offset_z + port.offset_z,
            );
    }

    solid
}
