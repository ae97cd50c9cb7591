//! Rack dimensions as constant-factor conversions to millimeters.
//!
//! Every helper takes a count so part scripts read like the drawings:
//! `rack_units(1.0)` is one 1U of height, `rack10_outer(1.0)` the full width
//! of a 10-inch front panel.

/// Millimeters per inch.
pub const INCH: f64 = 25.4;

/// Height of one rack unit (1.75 in).
pub const RACK_UNIT: f64 = 1.75 * INCH;

/// Width of one mounting rail flange (0.625 in).
pub const RAIL_WIDTH: f64 = 0.625 * INCH;

/// 19-inch front panel width.
pub const RACK19_OUTER: f64 = 19.0 * INCH;
/// Clear opening between 19-inch rails.
pub const RACK19_INNER: f64 = 17.75 * INCH;
/// Horizontal distance between 19-inch mounting hole centers.
pub const RACK19_SCREW_SPACING: f64 = 18.312 * INCH;

/// 10-inch front panel width.
pub const RACK10_OUTER: f64 = 10.0 * INCH;
/// Clear opening between 10-inch rails.
pub const RACK10_INNER: f64 = 8.75 * INCH;
/// Horizontal distance between 10-inch mounting hole centers.
pub const RACK10_SCREW_SPACING: f64 = 9.312 * INCH;

/// Libre19 module grid pitch across the rack.
pub const LIBRE19_X: f64 = RACK_UNIT;
/// Libre19 module grid pitch front to back.
pub const LIBRE19_Y: f64 = 2.0 * RACK_UNIT;
/// Libre19 module grid pitch vertically.
pub const LIBRE19_Z: f64 = RACK_UNIT;

/// Inches to millimeters.
pub fn inches(n: f64) -> f64 {
    n * INCH
}

/// Rack units of height to millimeters.
pub fn rack_units(n: f64) -> f64 {
    n * RACK_UNIT
}

/// Rail flange widths to millimeters.
pub fn rail_widths(n: f64) -> f64 {
    n * RAIL_WIDTH
}

/// Multiples of the 19-inch front panel width.
pub fn rack19_outer(n: f64) -> f64 {
    n * RACK19_OUTER
}

/// Multiples of the 19-inch rail opening.
pub fn rack19_inner(n: f64) -> f64 {
    n * RACK19_INNER
}

/// Multiples of the 19-inch hole spacing.
pub fn rack19_screw_spacing(n: f64) -> f64 {
    n * RACK19_SCREW_SPACING
}

/// Multiples of the 10-inch front panel width.
pub fn rack10_outer(n: f64) -> f64 {
    n * RACK10_OUTER
}

/// Multiples of the 10-inch rail opening.
pub fn rack10_inner(n: f64) -> f64 {
    n * RACK10_INNER
}

/// Multiples of the 10-inch hole spacing.
pub fn rack10_screw_spacing(n: f64) -> f64 {
    n * RACK10_SCREW_SPACING
}

/// Libre19 grid cells across the rack.
pub fn libre19_x(n: f64) -> f64 {
    n * LIBRE19_X
}

/// Libre19 grid cells front to back.
pub fn libre19_y(n: f64) -> f64 {
    n * LIBRE19_Y
}

/// Libre19 grid cells vertically.
pub fn libre19_z(n: f64) -> f64 {
    n * LIBRE19_Z
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rack_unit_is_44_45_mm() {
        assert_relative_eq!(rack_units(1.0), 44.45, max_relative = 1e-12);
        assert_relative_eq!(rack_units(3.0), 133.35, max_relative = 1e-12);
    }

    #[test]
    fn inch_conversion() {
        assert_relative_eq!(inches(0.125), 3.175, max_relative = 1e-12);
        assert_relative_eq!(inches(1.25), 31.75, max_relative = 1e-12);
    }

    #[test]
    fn panel_widths() {
        assert_relative_eq!(rack19_outer(1.0), 482.6, max_relative = 1e-12);
        assert_relative_eq!(rack10_outer(1.0), 254.0, max_relative = 1e-12);
        assert_eq!(rack19_inner(1.0).floor(), 450.0);
        assert_relative_eq!(rack10_inner(1.0), 222.25, max_relative = 1e-12);
    }

    #[test]
    fn screw_spacing_sits_inside_the_panel() {
        assert!(rack19_screw_spacing(1.0) < rack19_outer(1.0));
        assert!(rack19_screw_spacing(1.0) > rack19_inner(1.0));
        assert!(rack10_screw_spacing(1.0) < rack10_outer(1.0));
        assert!(rack10_screw_spacing(1.0) > rack10_inner(1.0));
    }

    #[test]
    fn libre19_grid() {
        assert_relative_eq!(libre19_x(2.0), 88.9, max_relative = 1e-12);
        assert_relative_eq!(libre19_y(1.0), 88.9, max_relative = 1e-12);
        assert_relative_eq!(libre19_z(1.0), rack_units(1.0), max_relative = 1e-12);
        assert_relative_eq!(rail_widths(1.0), 15.875, max_relative = 1e-12);
    }
}
