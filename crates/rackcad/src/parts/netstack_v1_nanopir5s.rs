//! Stand-in body of a NanoPi R5S router, used to size its case.

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
            x: 94.5,
            y: 68.0,
            z: 30.0,
            r: 4.0,
        }
    }
}

/// Build the rounded housing.
pub fn build(p: &Params) -> Part {
    rounded_plate("nanopir5s", p.x, p.y, p.r, p.z).color("#333")
}
