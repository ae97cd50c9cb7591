//! Stand-in body of the v2 network appliance.

use crate::features::rounded_plate;
use crate::Part;
use serde::Deserialize;

/// Device dimensions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Width.
    pub x: f64,
    /// Depth.
    pub y: f64,
    /// Height.
    pub z: f64,
    /// Corner radius of the housing.
    pub r: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            x: 141.0,
            y: 131.0,
            z: 40.0,
            r: 8.0,
        }
    }
}

/// Build the translucent housing.
pub fn build(p: &Params) -> Part {
    rounded_plate("device", p.x, p.y, p.r, p.z).color_alpha("#333", 0.5)
}
