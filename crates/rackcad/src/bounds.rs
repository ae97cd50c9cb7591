//! Axis-aligned bounding boxes evaluated from the IR.
//!
//! Bounds are conservative: exact for boxes, cylinders, extrusions and
//! their translations and scales, looser after rotations (the rotated
//! corners of the child box) and differences (the base operand).

use nalgebra::{Point3, Rotation3, Vector3};
use rackcad_ir::{CsgOp, Document, IrError, NodeId};
use std::collections::BTreeMap;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all `points`, `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.include_point(&p);
        }
        Some(aabb)
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Smallest box containing both.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        let mut out = *self;
        out.include_point(&other.min);
        out.include_point(&other.max);
        out
    }

    /// Overlap of both boxes, `None` if they are disjoint.
    pub fn intersect(&self, other: &Aabb) -> Option<Aabb> {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        (min.x <= max.x && min.y <= max.y && min.z <= max.z).then(|| Aabb::new(min, max))
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// The eight corners.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    fn map_corners(&self, f: impl Fn(Point3<f64>) -> Point3<f64>) -> Option<Aabb> {
        Aabb::from_points(self.corners().into_iter().map(f))
    }
}

/// Bounds of every root in a document, merged.
///
/// The document is validated first, so cycles are reported instead of
/// recursed into.
pub fn document_bounds(doc: &Document) -> Result<Option<Aabb>, IrError> {
    doc.validate()?;
    let mut cache = BTreeMap::new();
    let mut total: Option<Aabb> = None;
    for &root in &doc.roots {
        if let Some(b) = node_bounds(doc, root, &mut cache)? {
            total = Some(match total {
                Some(t) => t.merge(&b),
                None => b,
            });
        }
    }
    Ok(total)
}

/// Bounds of a single node's subtree.
pub fn node_bounds(
    doc: &Document,
    id: NodeId,
    cache: &mut BTreeMap<NodeId, Option<Aabb>>,
) -> Result<Option<Aabb>, IrError> {
    if let Some(b) = cache.get(&id) {
        return Ok(*b);
    }
    let node = doc.node(id)?;
    let bounds = match &node.op {
        CsgOp::Empty => None,
        CsgOp::Cube { size, center } => {
            let max = Point3::new(size.x, size.y, size.z);
            let b = Aabb::from_points([Point3::origin(), max]);
            if *center {
                b.and_then(|b| b.map_corners(|p| p - max.coords / 2.0))
            } else {
                b
            }
        }
        CsgOp::Cylinder {
            radius,
            height,
            center,
            ..
        } => {
            let z0 = if *center { -height / 2.0 } else { 0.0 };
            Aabb::from_points([
                Point3::new(-radius, -radius, z0),
                Point3::new(*radius, *radius, z0 + height),
            ])
        }
        CsgOp::Polygon { points } => {
            Aabb::from_points(points.iter().map(|p| Point3::new(p.x, p.y, 0.0)))
        }
        CsgOp::LinearExtrude { child, height } => {
            node_bounds(doc, *child, cache)?.and_then(|b| {
                Aabb::from_points([
                    Point3::new(b.min.x, b.min.y, 0.0),
                    Point3::new(b.max.x, b.max.y, *height),
                ])
            })
        }
        CsgOp::Union { left, right } => {
            let l = node_bounds(doc, *left, cache)?;
            let r = node_bounds(doc, *right, cache)?;
            match (l, r) {
                (Some(l), Some(r)) => Some(l.merge(&r)),
                (l, r) => l.or(r),
            }
        }
        CsgOp::Difference { left, right } => {
            // Resolve the cutter too so missing nodes are still reported.
            node_bounds(doc, *right, cache)?;
            node_bounds(doc, *left, cache)?
        }
        CsgOp::Intersection { left, right } => {
            let l = node_bounds(doc, *left, cache)?;
            let r = node_bounds(doc, *right, cache)?;
            match (l, r) {
                (Some(l), Some(r)) => l.intersect(&r),
                _ => None,
            }
        }
        CsgOp::Translate { child, offset } => {
            let v = Vector3::new(offset.x, offset.y, offset.z);
            node_bounds(doc, *child, cache)?.and_then(|b| b.map_corners(|p| p + v))
        }
        CsgOp::Rotate { child, angles } => {
            let rot = Rotation3::from_euler_angles(
                angles.x.to_radians(),
                angles.y.to_radians(),
                angles.z.to_radians(),
            );
            node_bounds(doc, *child, cache)?.and_then(|b| b.map_corners(|p| rot * p))
        }
        CsgOp::Scale { child, factor } => {
            let f = Vector3::new(factor.x, factor.y, factor.z);
            node_bounds(doc, *child, cache)?
                .and_then(|b| b.map_corners(|p| Point3::from(p.coords.component_mul(&f))))
        }
        CsgOp::Color { child, .. } => node_bounds(doc, *child, cache)?,
    };
    cache.insert(id, bounds);
    Ok(bounds)
}
