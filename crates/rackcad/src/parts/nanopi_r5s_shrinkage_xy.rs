//! Print coupon for measuring XY shrinkage.
//!
//! A thin frame whose opening is the NanoPi R5S footprint plus tolerance.
//! If the printed frame slides over the device, the tolerance holds.

use super::netstack_v1_nanopir5s;
use crate::Part;
use serde::Deserialize;

/// Design parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Frame width around the opening, also its height.
    pub brim: f64,
    /// Horizontal print tolerance.
    pub tolerance_xy: f64,
    /// The device the opening is sized for.
    pub device: netstack_v1_nanopir5s::Params,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            brim: 5.0,
            tolerance_xy: 0.25,
            device: netstack_v1_nanopir5s::Params::default(),
        }
    }
}

/// Build the frame.
pub fn build(p: &Params) -> Part {
    let (b, t) = (p.brim, p.tolerance_xy);
    let frame = Part::cube(
        "shrinkage_xy",
        p.device.x + 2.0 * b,
        p.device.y + 2.0 * b,
        b,
    );
    let opening = Part::cube(
        "opening",
        p.device.x + 2.0 * t,
        p.device.y + 2.0 * t,
        p.device.z + 2.0,
    )
    .translate(b - t / 2.0, b - t / 2.0, -1.0);

    (frame - opening).color("#333")
}
