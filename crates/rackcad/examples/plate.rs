//! Rounded mounting plate with a bolt circle and M3 corner holes.

use rackcad::features::{bolt_pattern, m3_bolt_clearance_hole, rounded_plate};
use rackcad::units::inches;

fn main() -> Result<(), rackcad::CadError> {
    let (w, h, t) = (120.0, 80.0, 5.0);

    // Plate with 4 mm corner radius
    let mut part = rounded_plate("plate", w, h, 4.0, t);

    // Four corner mounting holes, 6 mm in from each edge
    let m3 = m3_bolt_clearance_hole();
    for (x, y) in [(6.0, 6.0), (w - 6.0, 6.0), (w - 6.0, h - 6.0), (6.0, h - 6.0)] {
        part -= m3.translate(x, y, 0.0);
    }

    // Two-inch bolt circle around the center
    part -= bolt_pattern(6, inches(2.0), 4.5, t + 2.0, 32).translate(w / 2.0, h / 2.0, -1.0);

    part.write_scad("plate.scad")?;
    println!("wrote plate.scad ({} nodes)", part.node_count());
    Ok(())
}
