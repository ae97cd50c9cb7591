#![warn(missing_docs)]

//! rackcad: parametric rack hardware in Rust
//!
//! CSG modeling of rack chassis, device enclosures and mounting plates,
//! exported as OpenSCAD source or as a JSON IR document.
//!
//! # Example
//!
//! ```rust,no_run
//! use rackcad::sketch::Outline;
//! use rackcad::Part;
//!
//! let outline = Outline::rounded_rectangle(120.0, 80.0, 4.0, None);
//! let plate = Part::extrude("plate", &outline, 5.0);
//! let hole = Part::cylinder("hole", 1.8, 7.0, 32).translate(10.0, 10.0, -1.0);
//! let result = plate - hole;
//! result.write_scad("plate.scad").unwrap();
//! ```

use rackcad_ir::{CsgOp, Document, Node, NodeId, Vec2 as IrVec2, Vec3 as IrVec3};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

pub mod bounds;
pub mod config;
pub mod export;
pub mod features;
pub mod parts;
pub mod sketch;
pub mod units;

pub use bounds::Aabb;
pub use config::PartConfig;
pub use export::ExportError;
pub use rackcad_ir;

use sketch::Outline;

/// Errors returned by part building, configuration and export.
#[derive(Error, Debug)]
pub enum CadError {
    /// An I/O error occurred while reading configuration or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A parameter file is not valid TOML.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
    /// A parameter table does not match the part's parameters.
    #[error("invalid parameters for {part}: {source}")]
    Params {
        /// Part whose table failed to deserialize.
        part: String,
        /// Underlying deserialization error.
        #[source]
        source: toml::de::Error,
    },
    /// JSON serialization of the IR failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The exporter rejected the document.
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    /// No part with this name exists in the catalog.
    #[error("unknown part: {0}")]
    UnknownPart(String),
}

/// Global atomic counter for unique IR node IDs.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a globally unique [`NodeId`].
fn alloc_node_id() -> NodeId {
    NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A named part: an immutable CSG tree.
///
/// Create primitives with [`Part::cube`], [`Part::cylinder`],
/// [`Part::extrude`], etc., then combine them with CSG operations
/// ([`Part::union`], [`Part::difference`], [`Part::intersection`]) or the
/// operator shorthands (`+`, `-`, `&`). Every operation returns a new part
/// and leaves its inputs untouched, so a part can be reused any number of
/// times (a screw hole, a vent) without copying its subtree.
#[derive(Debug, Clone)]
pub struct Part {
    /// Human-readable name for this part (used in export headers).
    pub name: String,
    root: NodeId,
    nodes: BTreeMap<NodeId, Node>,
}

impl Part {
    // =========================================================================
    // Internal constructors
    // =========================================================================

    /// Create a leaf IR node (primitive or empty).
    fn leaf(name: String, op: CsgOp) -> Self {
        let id = alloc_node_id();
        let mut nodes = BTreeMap::new();
        nodes.insert(
            id,
            Node {
                id,
                name: Some(name.clone()),
                op,
            },
        );
        Self {
            name,
            root: id,
            nodes,
        }
    }

    /// Build a binary CSG node, merging both children's IR maps.
    fn binary(
        name: String,
        left: &Part,
        right: &Part,
        op_fn: impl FnOnce(NodeId, NodeId) -> CsgOp,
    ) -> Self {
        let id = alloc_node_id();
        let mut nodes = left.nodes.clone();
        nodes.extend(right.nodes.iter().map(|(&k, v)| (k, v.clone())));
        nodes.insert(
            id,
            Node {
                id,
                name: Some(name.clone()),
                op: op_fn(left.root, right.root),
            },
        );
        Self {
            name,
            root: id,
            nodes,
        }
    }

    /// Build a unary node wrapping this part, keeping its name.
    fn unary(&self, op_fn: impl FnOnce(NodeId) -> CsgOp) -> Self {
        let id = alloc_node_id();
        let mut nodes = self.nodes.clone();
        nodes.insert(
            id,
            Node {
                id,
                name: Some(self.name.clone()),
                op: op_fn(self.root),
            },
        );
        Self {
            name: self.name.clone(),
            root: id,
            nodes,
        }
    }

    // =========================================================================
    // Public constructors
    // =========================================================================

    /// Create an empty part.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::leaf(name.into(), CsgOp::Empty)
    }

    /// Create a box spanning `[0, x] × [0, y] × [0, z]`.
    pub fn cube(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self::leaf(
            name.into(),
            CsgOp::Cube {
                size: IrVec3::new(x, y, z),
                center: false,
            },
        )
    }

    /// Create a box centered at the origin.
    pub fn centered_cube(name: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self::leaf(
            name.into(),
            CsgOp::Cube {
                size: IrVec3::new(x, y, z),
                center: true,
            },
        )
    }

    /// Create a cylinder along Z standing on the XY plane.
    ///
    /// A `segments` of zero leaves the facet count to the renderer.
    pub fn cylinder(name: impl Into<String>, radius: f64, height: f64, segments: u32) -> Self {
        Self::leaf(
            name.into(),
            CsgOp::Cylinder {
                radius,
                height,
                segments,
                center: false,
            },
        )
    }

    /// Create a cylinder along Z centered at the origin.
    pub fn centered_cylinder(
        name: impl Into<String>,
        radius: f64,
        height: f64,
        segments: u32,
    ) -> Self {
        Self::leaf(
            name.into(),
            CsgOp::Cylinder {
                radius,
                height,
                segments,
                center: true,
            },
        )
    }

    /// Create a flat 2D polygon from a closed outline.
    pub fn polygon(name: impl Into<String>, outline: &Outline) -> Self {
        let points = outline
            .points()
            .iter()
            .map(|p| IrVec2::new(p.x, p.y))
            .collect();
        Self::leaf(name.into(), CsgOp::Polygon { points })
    }

    /// Extrude a closed outline along +Z into a solid.
    pub fn extrude(name: impl Into<String>, outline: &Outline, height: f64) -> Self {
        Self::polygon(name, outline).linear_extrude(height)
    }

    /// Union of many parts. An empty iterator yields an empty part.
    pub fn union_all(name: impl Into<String>, parts: impl IntoIterator<Item = Part>) -> Self {
        let name = name.into();
        let mut iter = parts.into_iter();
        let Some(first) = iter.next() else {
            return Self::empty(name);
        };
        let mut result = iter.fold(first, |acc, p| acc.union(&p));
        result.name = name;
        result
    }

    // =========================================================================
    // CSG operations
    // =========================================================================

    /// Boolean difference (self - other).
    pub fn difference(&self, other: &Part) -> Self {
        Self::binary(self.name.clone(), self, other, |l, r| CsgOp::Difference {
            left: l,
            right: r,
        })
    }

    /// Boolean union (self + other).
    pub fn union(&self, other: &Part) -> Self {
        Self::binary(self.name.clone(), self, other, |l, r| CsgOp::Union {
            left: l,
            right: r,
        })
    }

    /// Boolean intersection.
    pub fn intersection(&self, other: &Part) -> Self {
        Self::binary(self.name.clone(), self, other, |l, r| {
            CsgOp::Intersection { left: l, right: r }
        })
    }

    // =========================================================================
    // Transforms
    // =========================================================================

    /// Translate the part.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Self {
        self.unary(|child| CsgOp::Translate {
            child,
            offset: IrVec3::new(x, y, z),
        })
    }

    /// Move along +Z.
    pub fn up(&self, d: f64) -> Self {
        self.translate(0.0, 0.0, d)
    }

    /// Move along -Z.
    pub fn down(&self, d: f64) -> Self {
        self.translate(0.0, 0.0, -d)
    }

    /// Move along +Y.
    pub fn forward(&self, d: f64) -> Self {
        self.translate(0.0, d, 0.0)
    }

    /// Move along -Y.
    pub fn back(&self, d: f64) -> Self {
        self.translate(0.0, -d, 0.0)
    }

    /// Move along +X.
    pub fn right(&self, d: f64) -> Self {
        self.translate(d, 0.0, 0.0)
    }

    /// Move along -X.
    pub fn left(&self, d: f64) -> Self {
        self.translate(-d, 0.0, 0.0)
    }

    /// Rotate the part (angles in degrees, applied X, then Y, then Z).
    pub fn rotate(&self, x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        self.unary(|child| CsgOp::Rotate {
            child,
            angles: IrVec3::new(x_deg, y_deg, z_deg),
        })
    }

    /// Scale the part.
    pub fn scale(&self, x: f64, y: f64, z: f64) -> Self {
        self.unary(|child| CsgOp::Scale {
            child,
            factor: IrVec3::new(x, y, z),
        })
    }

    /// Mirror across the YZ plane (negate X).
    pub fn mirror_x(&self) -> Self {
        self.scale(-1.0, 1.0, 1.0)
    }

    /// Mirror across the XZ plane (negate Y).
    pub fn mirror_y(&self) -> Self {
        self.scale(1.0, -1.0, 1.0)
    }

    /// Extrude a 2D part along +Z.
    pub fn linear_extrude(&self, height: f64) -> Self {
        self.unary(|child| CsgOp::LinearExtrude { child, height })
    }

    /// Tag with an opaque display color (`"#333"`).
    pub fn color(&self, color: &str) -> Self {
        self.unary(|child| CsgOp::Color {
            child,
            color: color.to_string(),
            alpha: None,
        })
    }

    /// Tag with a translucent display color.
    pub fn color_alpha(&self, color: &str, alpha: f64) -> Self {
        self.unary(|child| CsgOp::Color {
            child,
            color: color.to_string(),
            alpha: Some(alpha),
        })
    }

    /// Same geometry under a new name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        let mut part = self.clone();
        part.name = name.into();
        part
    }

    // =========================================================================
    // Patterns
    // =========================================================================

    /// Union of `count` copies spaced by `(dx, dy, dz)`.
    ///
    /// The first copy stays at the original position; each subsequent copy
    /// is offset by an additional `(dx, dy, dz)`.
    pub fn linear_pattern(&self, dx: f64, dy: f64, dz: f64, count: usize) -> Self {
        let copies = (0..count).map(|i| {
            let n = i as f64;
            if i == 0 {
                self.clone()
            } else {
                self.translate(dx * n, dy * n, dz * n)
            }
        });
        Self::union_all(self.name.clone(), copies)
    }

    /// Union of `count` copies rotated evenly around the Z axis.
    ///
    /// Each copy is moved `radius` along X, then rotated by its share of
    /// `360° / count`.
    pub fn circular_pattern(&self, radius: f64, count: usize) -> Self {
        let copies = (0..count).map(|i| {
            let angle = 360.0 * (i as f64) / (count as f64);
            self.translate(radius, 0.0, 0.0).rotate(0.0, 0.0, angle)
        });
        Self::union_all(self.name.clone(), copies)
    }

    /// Union of an `nx × ny` grid of copies in the XY plane.
    pub fn grid_pattern(&self, dx: f64, nx: usize, dy: f64, ny: usize) -> Self {
        self.linear_pattern(dx, 0.0, 0.0, nx)
            .linear_pattern(0.0, dy, 0.0, ny)
    }

    // =========================================================================
    // Queries and export
    // =========================================================================

    /// Id of the root node of this part's tree.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root operation of this part.
    pub fn root_op(&self) -> &CsgOp {
        // The root is always inserted alongside the part.
        &self.nodes[&self.root].op
    }

    /// Number of distinct IR nodes in this part's DAG.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the part is a bare empty leaf.
    pub fn is_empty(&self) -> bool {
        matches!(self.root_op(), CsgOp::Empty)
    }

    /// Axis-aligned bounds of the geometry, `None` if it is empty.
    pub fn bounds(&self) -> Option<Aabb> {
        // A part's own document always resolves, so the lookup cannot fail.
        bounds::document_bounds(&self.to_document()).unwrap_or(None)
    }

    /// Extract the IR document for this part.
    ///
    /// The document contains all nodes in this part's construction DAG
    /// with this part's root node as the single root, named after the part.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.nodes = self.nodes.clone();
        if let Some(root) = doc.nodes.get_mut(&self.root) {
            root.name = Some(self.name.clone());
        }
        doc.roots.push(self.root);
        doc
    }

    /// Render as OpenSCAD source.
    pub fn to_scad(&self) -> Result<String, CadError> {
        Ok(export::scad::to_scad(&self.to_document())?)
    }

    /// Write OpenSCAD source to a file.
    pub fn write_scad(&self, path: impl AsRef<std::path::Path>) -> Result<(), CadError> {
        Ok(export::scad::write_scad(&self.to_document(), path)?)
    }

    /// Render the IR document as pretty JSON.
    pub fn to_json(&self) -> Result<String, CadError> {
        Ok(self.to_document().to_json()?)
    }
}

// =============================================================================
// Operator overloads for ergonomic CSG
// =============================================================================

/// Union: `&a + &b`
impl std::ops::Add for &Part {
    type Output = Part;
    fn add(self, rhs: &Part) -> Part {
        self.union(rhs)
    }
}

/// Union: `a + b`
impl std::ops::Add for Part {
    type Output = Part;
    fn add(self, rhs: Part) -> Part {
        self.union(&rhs)
    }
}

/// Difference: `&a - &b`
impl std::ops::Sub for &Part {
    type Output = Part;
    fn sub(self, rhs: &Part) -> Part {
        self.difference(rhs)
    }
}

/// Difference: `a - b`
impl std::ops::Sub for Part {
    type Output = Part;
    fn sub(self, rhs: Part) -> Part {
        self.difference(&rhs)
    }
}

/// Intersection: `&a & &b`
impl std::ops::BitAnd for &Part {
    type Output = Part;
    fn bitand(self, rhs: &Part) -> Part {
        self.intersection(rhs)
    }
}

/// Intersection: `a & b`
impl std::ops::BitAnd for Part {
    type Output = Part;
    fn bitand(self, rhs: Part) -> Part {
        self.intersection(&rhs)
    }
}

/// In-place union, matching the `solid += piece` accumulator style.
impl std::ops::AddAssign<Part> for Part {
    fn add_assign(&mut self, rhs: Part) {
        *self = self.union(&rhs);
    }
}

/// In-place difference, matching the `solid -= cutout` accumulator style.
impl std::ops::SubAssign<Part> for Part {
    fn sub_assign(&mut self, rhs: Part) {
        *self = self.difference(&rhs);
    }
}
