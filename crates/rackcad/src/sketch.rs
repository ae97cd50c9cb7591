//! 2D sketch helpers: arc tessellation and closed outlines.
//!
//! Rounded outlines are built by concatenating corner arcs into one
//! implicitly closed point loop, which [`crate::Part::extrude`] then turns
//! into a solid.

use nalgebra::Vector2;

/// A point in the 2D sketch plane.
pub type Point2 = nalgebra::Point2<f64>;

/// Segment count used when an arc does not specify one.
pub const DEFAULT_ARC_SEGMENTS: u32 = 8;

/// Tolerance for orientation tests and point deduplication.
const EPSILON: f64 = 1e-9;

/// Tessellate a circular arc by linear angle interpolation.
///
/// Samples `segments` equal steps from `start_deg` to `end_deg` inclusive and
/// returns `segments + 1` points `center + radius * (cos θ, sin θ)`. The
/// angles are used exactly as given: `270 -> 180` runs clockwise and
/// `360 -> 270` runs clockwise through 315. A `segments` of zero is treated
/// as one.
pub fn arc(
    center: Point2,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    segments: Option<u32>,
) -> Vec<Point2> {
    let n = segments.unwrap_or(DEFAULT_ARC_SEGMENTS).max(1);
    (0..=n)
        .map(|i| {
            let deg = if i == n {
                end_deg
            } else {
                start_deg + (end_deg - start_deg) * (i as f64 / n as f64)
            };
            point_at(center, radius, deg)
        })
        .collect()
}

fn point_at(center: Point2, radius: f64, deg: f64) -> Point2 {
    let (sin, cos) = deg.to_radians().sin_cos();
    Point2::new(center.x + radius * cos, center.y + radius * sin)
}

/// How an [`Arc`] travels from its start angle to its end angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sweep {
    /// Interpolate the literal angle values, whatever their order.
    #[default]
    Linear,
    /// Always turn counter-clockwise, sweeping `[0, 360)` degrees.
    CounterClockwise,
    /// Always turn clockwise, sweeping `(-360, 0]` degrees.
    Clockwise,
}

/// A circular arc with an explicit sweep direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Circle center.
    pub center: Point2,
    /// Circle radius (non-negative).
    pub radius: f64,
    /// Start angle in degrees.
    pub start_deg: f64,
    /// End angle in degrees.
    pub end_deg: f64,
    /// Direction of travel.
    pub sweep: Sweep,
    /// Number of straight segments.
    pub segments: u32,
}

impl Arc {
    /// Create a linear-sweep arc with the default segment count.
    pub fn new(center: Point2, radius: f64, start_deg: f64, end_deg: f64) -> Self {
        Self {
            center,
            radius,
            start_deg,
            end_deg,
            sweep: Sweep::Linear,
            segments: DEFAULT_ARC_SEGMENTS,
        }
    }

    /// Turn counter-clockwise from start to end.
    pub fn ccw(mut self) -> Self {
        self.sweep = Sweep::CounterClockwise;
        self
    }

    /// Turn clockwise from start to end.
    pub fn cw(mut self) -> Self {
        self.sweep = Sweep::Clockwise;
        self
    }

    /// Override the segment count.
    pub fn segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    /// Signed angular span in degrees actually traced by this arc.
    pub fn sweep_deg(&self) -> f64 {
        let delta = self.end_deg - self.start_deg;
        match self.sweep {
            Sweep::Linear => delta,
            Sweep::CounterClockwise => turn(delta),
            Sweep::Clockwise => -turn(-delta),
        }
    }

    /// Tessellate into `segments + 1` points from start to end.
    pub fn points(&self) -> Vec<Point2> {
        let end = match self.sweep {
            Sweep::Linear => self.end_deg,
            _ => self.start_deg + self.sweep_deg(),
        };
        arc(
            self.center,
            self.radius,
            self.start_deg,
            end,
            Some(self.segments),
        )
    }
}

/// Reduce a span into `[0, 360)`. `rem_euclid` rounds tiny negative spans up
/// to exactly 360.
fn turn(delta: f64) -> f64 {
    let s = delta.rem_euclid(360.0);
    if s >= 360.0 {
        0.0
    } else {
        s
    }
}

/// An ordered, implicitly closed loop of 2D points.
///
/// Nothing here guarantees the loop is simple; use [`Outline::is_simple`]
/// when that matters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    points: Vec<Point2>,
}

impl Outline {
    /// Wrap an existing point loop.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Concatenate the tessellations of `arcs` in order.
    pub fn from_arcs(arcs: impl IntoIterator<Item = Arc>) -> Self {
        let mut outline = Self::default();
        for a in arcs {
            outline.push_arc(&a);
        }
        outline
    }

    /// Append the tessellation of one arc.
    pub fn push_arc(&mut self, arc: &Arc) {
        self.points.extend(arc.points());
    }

    /// Rectangle from `(0, 0)` to `(width, height)` with rounded corners.
    ///
    /// Corners are traced counter-clockwise starting at the lower-left one.
    /// Coincident points (zero radius, or a radius of half the side) are
    /// merged.
    pub fn rounded_rectangle(width: f64, height: f64, radius: f64, segments: Option<u32>) -> Self {
        let n = segments.unwrap_or(DEFAULT_ARC_SEGMENTS);
        let r = radius;
        Self::from_arcs([
            Arc::new(Point2::new(r, r), r, 180.0, 270.0).segments(n),
            Arc::new(Point2::new(width - r, r), r, 270.0, 360.0).segments(n),
            Arc::new(Point2::new(width - r, height - r), r, 0.0, 90.0).segments(n),
            Arc::new(Point2::new(r, height - r), r, 90.0, 180.0).segments(n),
        ])
        .dedup()
    }

    /// Drop consecutive points closer than the tolerance, including the
    /// closing pair.
    pub fn dedup(mut self) -> Self {
        self.points
            .dedup_by(|b, a| (b.coords - a.coords).norm() < EPSILON);
        while self.points.len() > 1 {
            let first = self.points[0];
            let last = self.points[self.points.len() - 1];
            if (first.coords - last.coords).norm() < EPSILON {
                self.points.pop();
            } else {
                break;
            }
        }
        self
    }

    /// Shift every point by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let offset = Vector2::new(dx, dy);
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
        }
    }

    /// The points of the loop.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the loop has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed enclosed area (shoelace). Positive for counter-clockwise loops.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }

    /// True if no two non-adjacent edges of the closed loop touch.
    pub fn is_simple(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            let (a1, a2) = (self.points[i], self.points[(i + 1) % n]);
            for j in (i + 1)..n {
                // Skip the edge itself and its two neighbours.
                if j == i + 1 || (i == 0 && j == n - 1) {
                    continue;
                }
                let (b1, b2) = (self.points[j], self.points[(j + 1) % n]);
                if segments_intersect(a1, a2, b1, b2) {
                    return false;
                }
            }
        }
        true
    }
}

fn orient(a: Point2, b: Point2, c: Point2) -> f64 {
    let v = (b - a).perp(&(c - a));
    if v.abs() < EPSILON {
        0.0
    } else {
        v
    }
}

fn on_segment(a: Point2, b: Point2, p: Point2) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

fn segments_intersect(p1: Point2, p2: Point2, q1: Point2, q2: Point2) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);

    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }
    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn assert_point(p: Point2, x: f64, y: f64) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-9);
    }

    #[test]
    fn quarter_arc_from_origin() {
        let pts = arc(Point2::origin(), 5.0, 0.0, 90.0, Some(4));
        assert_eq!(pts.len(), 5);
        assert_point(pts[0], 5.0, 0.0);
        assert_point(pts[4], 0.0, 5.0);

        let angles: Vec<f64> = pts.iter().map(|p| p.y.atan2(p.x)).collect();
        assert!(angles.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn lower_right_corner_arc() {
        let pts = arc(Point2::new(10.0, 10.0), 4.0, 270.0, 360.0, None);
        assert_eq!(pts.len(), DEFAULT_ARC_SEGMENTS as usize + 1);
        assert_point(pts[0], 10.0, 6.0);
        assert_point(pts[pts.len() - 1], 14.0, 10.0);
    }

    #[test]
    fn endpoints_follow_the_given_angles() {
        let center = Point2::new(-3.0, 7.5);
        for (start, end) in [(270.0, 180.0), (360.0, 270.0), (-45.0, 400.0), (90.0, 0.0)] {
            let pts = arc(center, 2.5, start, end, Some(6));
            let (s, e): (f64, f64) = (f64::to_radians(start), f64::to_radians(end));
            assert_point(pts[0], center.x + 2.5 * s.cos(), center.y + 2.5 * s.sin());
            assert_point(
                pts[pts.len() - 1],
                center.x + 2.5 * e.cos(),
                center.y + 2.5 * e.sin(),
            );
            for p in &pts {
                assert_abs_diff_eq!((p - center).norm(), 2.5, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn equal_angles_collapse_to_one_point() {
        let pts = arc(Point2::new(1.0, 2.0), 3.0, 45.0, 45.0, Some(5));
        assert_eq!(pts.len(), 6);
        let rad = 45f64.to_radians();
        for p in pts {
            assert_point(p, 1.0 + 3.0 * rad.cos(), 2.0 + 3.0 * rad.sin());
        }
    }

    #[test]
    fn zero_radius_returns_center_exactly() {
        let center = Point2::new(12.25, -4.5);
        for p in arc(center, 0.0, 10.0, 250.0, Some(7)) {
            assert_eq!(p, center);
        }
    }

    #[test]
    fn zero_segments_clamped_to_one() {
        let pts = arc(Point2::origin(), 1.0, 0.0, 180.0, Some(0));
        assert_eq!(pts.len(), 2);
        assert_point(pts[1], -1.0, 0.0);
    }

    #[test]
    fn descending_linear_arc_runs_clockwise() {
        // 360 -> 270 through 315, the short way round the corner.
        let pts = arc(Point2::origin(), 1.0, 360.0, 270.0, Some(2));
        let mid = 315f64.to_radians();
        assert_point(pts[1], mid.cos(), mid.sin());
    }

    #[test]
    fn explicit_sweep_directions() {
        let linear = Arc::new(Point2::origin(), 1.0, 360.0, 270.0);
        assert_abs_diff_eq!(linear.sweep_deg(), -90.0);

        let ccw = linear.ccw();
        assert_abs_diff_eq!(ccw.sweep_deg(), 270.0);
        let pts = ccw.segments(3).points();
        // 360 -> 450 -> 540 -> 630: passes through (0, 1) and (-1, 0).
        assert_point(pts[1], 0.0, 1.0);
        assert_point(pts[2], -1.0, 0.0);
        assert_point(pts[3], 0.0, -1.0);

        let cw = Arc::new(Point2::origin(), 1.0, 0.0, 90.0).cw();
        assert_abs_diff_eq!(cw.sweep_deg(), -270.0);
        let pts = cw.segments(3).points();
        assert_point(pts[1], 0.0, -1.0);
        assert_point(pts[3], 0.0, 1.0);

        assert_abs_diff_eq!(Arc::new(Point2::origin(), 1.0, 270.0, 360.0).ccw().sweep_deg(), 90.0);
        assert_abs_diff_eq!(Arc::new(Point2::origin(), 1.0, 270.0, 180.0).cw().sweep_deg(), -90.0);
    }

    #[test]
    fn nearly_equal_angles_do_not_wrap_to_a_full_turn() {
        let ccw = Arc::new(Point2::origin(), 1.0, 0.1 + 0.2, 0.3).ccw().segments(4);
        assert!((0.0..360.0).contains(&ccw.sweep_deg()));
        assert_abs_diff_eq!(ccw.sweep_deg(), 0.0, epsilon = 1e-9);

        let cw = Arc::new(Point2::origin(), 1.0, 0.3, 0.1 + 0.2).cw().segments(4);
        assert!(cw.sweep_deg() > -360.0 && cw.sweep_deg() <= 0.0);
        assert_abs_diff_eq!(cw.sweep_deg(), 0.0, epsilon = 1e-9);

        let rad = 0.3f64.to_radians();
        for arc in [ccw, cw] {
            for p in arc.points() {
                assert_point(p, rad.cos(), rad.sin());
            }
        }
    }

    #[test]
    fn rounded_rectangle_area() {
        let (w, h, r) = (94.5, 68.0, 4.0);
        let outline = Outline::rounded_rectangle(w, h, r, Some(512));
        assert!(outline.is_simple());
        let expected = w * h - (4.0 - PI) * r * r;
        assert_abs_diff_eq!(outline.area(), expected, epsilon = 1e-2);
    }

    #[test]
    fn rounded_rectangle_default_segments_is_simple_and_ccw() {
        let outline = Outline::rounded_rectangle(141.0, 131.0, 8.0, None);
        assert_eq!(outline.len(), 4 * (DEFAULT_ARC_SEGMENTS as usize + 1));
        assert!(outline.is_simple());
        assert!(outline.area() > 0.0);
    }

    #[test]
    fn zero_radius_rounded_rectangle_is_a_rectangle() {
        let outline = Outline::rounded_rectangle(10.0, 5.0, 0.0, None);
        assert_eq!(outline.len(), 4);
        assert!(outline.is_simple());
        assert_abs_diff_eq!(outline.area(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn clockwise_loop_has_negative_area() {
        let outline = Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(3.0, 2.0),
            Point2::new(3.0, 0.0),
        ]);
        assert_abs_diff_eq!(outline.area(), -6.0);
    }

    #[test]
    fn bow_tie_is_not_simple() {
        let outline = Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        assert!(!outline.is_simple());
        assert_abs_diff_eq!(outline.area(), 0.0);
    }

    #[test]
    fn translate_shifts_every_point() {
        let outline = Outline::rounded_rectangle(4.0, 4.0, 1.0, Some(2)).translate(1.0, -2.0);
        let min_x = outline.points().iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let min_y = outline.points().iter().map(|p| p.y).fold(f64::MAX, f64::min);
        assert_abs_diff_eq!(min_x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(min_y, -2.0, epsilon = 1e-9);
    }
}
