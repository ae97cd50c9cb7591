//! v2 appliance mounted between two mock rack rails.

use super::netstack_v2_device;
use crate::units::{rack19_inner, rack_units, rail_widths};
use crate::Part;
use serde::Deserialize;

/// Assembly parameters. The appliance is configured in the nested
/// `device` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Height of the mock rails in rack units.
    pub rail_units: f64,
    /// The appliance.
    pub device: netstack_v2_device::Params,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rail_units: 3.0,
            device: netstack_v2_device::Params::default(),
        }
    }
}

/// Build the assembly. The left rail's inner face is `x = 0`; the
/// appliance sits against the right rail.
pub fn build(p: &Params) -> Part {
    let opening = rack19_inner(1.0);
    let device = netstack_v2_device::build(&p.device).right(opening - p.device.x);

    let rail = Part::cube("rail", rail_widths(1.0), rail_widths(1.0), rack_units(p.rail_units));
    let rails = (rail.translate(-rail_widths(1.0), 0.0, -rack_units(1.0))
        + rail.translate(opening, 0.0, -rack_units(1.0)))
    .color("#333");

    (device + rails).renamed("netstack_v2_assembly")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rails_frame_the_opening() {
        let b = build(&Params::default()).bounds().unwrap();
        assert_abs_diff_eq!(b.min.x, -rail_widths(1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.x, rack19_inner(1.0) + rail_widths(1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b.min.z, -rack_units(1.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b.max.z, rack_units(2.0), epsilon = 1e-9);
    }

    #[test]
    fn device_touches_right_rail() {
        let p = Params::default();
        let device = netstack_v2_device::build(&p.device)
            .right(rack19_inner(1.0) - p.device.x)
            .bounds()
            .unwrap();
        assert_abs_diff_eq!(device.max.x, rack19_inner(1.0), epsilon = 1e-9);
    }
}
