//! Reusable cutters and plates: bolt holes, rack screw holes, rounded plates.
//!
//! Cutters overshoot the faces they pass through by a small amount so the
//! renderer never has to resolve coplanar faces.

use crate::sketch::Outline;
use crate::units::RACK_UNIT;
use crate::Part;

/// Overshoot past a face for through cuts, in mm.
pub const OVERSHOOT: f64 = 1.0;

/// Dimensions of a socket head bolt and the holes cut for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bolt {
    /// Radius of the pocket left for the head.
    pub head_clearance_r: f64,
    /// Head height.
    pub head_z: f64,
    /// Thread length.
    pub thread_z: f64,
    /// Radius for a hole the bolt cuts its own thread into.
    pub tapping_r: f64,
    /// Radius for a hole the bolt slides through.
    pub clearance_r: f64,
    /// Nominal thread diameter over two.
    pub major_r: f64,
    /// Vertical slack added at both ends of the hole.
    pub tolerance_z: f64,
}

impl Bolt {
    /// ISO M3 socket head bolt, 10 mm thread.
    pub const M3: Bolt = Bolt {
        head_clearance_r: 6.0 / 2.0,
        head_z: 3.0,
        thread_z: 10.0,
        tapping_r: 2.5 / 2.0,
        clearance_r: 3.6 / 2.0,
        major_r: 3.0 / 2.0,
        tolerance_z: 0.1,
    };

    /// Hole for this bolt with a thread bore of radius `thread_r`.
    ///
    /// The thread runs from `-tolerance_z` to `thread_z + tolerance_z`, the
    /// head pocket sits on top of it starting at `thread_z`. The bolt axis
    /// is Z through the origin.
    pub fn hole(&self, thread_r: f64) -> Part {
        let head = Part::cylinder(
            "bolt_head",
            self.head_clearance_r,
            self.head_z + self.tolerance_z,
            0,
        )
        .up(self.thread_z);
        let thread = Part::cylinder(
            "bolt_thread",
            thread_r,
            self.thread_z + 2.0 * self.tolerance_z,
            0,
        )
        .down(self.tolerance_z);
        (head + thread).renamed("bolt")
    }

    /// Hole the bolt passes through freely.
    pub fn clearance_hole(&self) -> Part {
        self.hole(self.clearance_r)
    }
}

impl Default for Bolt {
    fn default() -> Self {
        Self::M3
    }
}

/// Clearance hole for an M3 bolt, axis on Z through the origin.
pub fn m3_bolt_clearance_hole() -> Part {
    Bolt::M3.clearance_hole()
}

/// Screws joining neighbouring rack inserts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerScrews {
    /// Tapping radius of the screw hole.
    pub radius: f64,
    /// Distance of each hole axis from the side face and from top/bottom.
    pub inset: f64,
    /// How far each hole reaches into the part from its front or rear face.
    pub depth: f64,
    /// Height of the part the holes are cut into.
    pub height: f64,
}

impl Default for CornerScrews {
    fn default() -> Self {
        Self {
            radius: 2.5 / 2.0,
            inset: 5.0,
            depth: 10.0,
            height: RACK_UNIT,
        }
    }
}

impl CornerScrews {
    /// Holes along all four vertical edges of an `x × y` footprint.
    ///
    /// Each edge gets two holes, `inset` from the bottom and top, running
    /// along Y from the front (`y = 0`) or rear (`y = y`) face.
    pub fn holes(&self, x: f64, y: f64) -> Part {
        let length = self.depth + OVERSHOOT;
        let screw = Part::cylinder("corner_screw", self.radius, length, 0)
            .rotate(-90.0, 0.0, 0.0)
            .back(OVERSHOOT);
        let edge = screw.linear_pattern(0.0, 0.0, self.height - 2.0 * self.inset, 2);
        let front = edge.linear_pattern(x - 2.0 * self.inset, 0.0, 0.0, 2);
        let rear = front.mirror_y().forward(y);
        (front + rear)
            .translate(self.inset, 0.0, self.inset)
            .renamed("corner_screws")
    }
}

/// Rack assembly screw holes at the four vertical edges of `x × y`, 1U tall.
pub fn corner_screw_holes(x: f64, y: f64) -> Part {
    CornerScrews::default().holes(x, y)
}

/// Circle of `num_holes` holes, the first on +X.
pub fn bolt_pattern(
    num_holes: usize,
    bolt_circle_diameter: f64,
    hole_diameter: f64,
    depth: f64,
    segments: u32,
) -> Part {
    Part::cylinder("hole", hole_diameter / 2.0, depth, segments)
        .circular_pattern(bolt_circle_diameter / 2.0, num_holes)
        .renamed("bolt_pattern")
}

/// Plate with rounded corners, lower left corner at the origin.
pub fn rounded_plate(
    name: impl Into<String>,
    width: f64,
    height: f64,
    radius: f64,
    thickness: f64,
) -> Part {
    let outline = Outline::rounded_rectangle(width, height, radius, None);
    Part::extrude(name, &outline, thickness)
}
