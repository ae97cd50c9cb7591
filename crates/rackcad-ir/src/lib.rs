#![warn(missing_docs)]

//! Intermediate representation for rackcad part models.
//!
//! This crate defines the DAG-based IR that a part script produces: a graph
//! of primitive shapes combined by booleans and affine transforms.
//!
//! The IR is purely declarative. Boolean evaluation is left to whatever
//! consumes the exported geometry (OpenSCAD, in practice).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Unique identifier for a node in the IR graph.
pub type NodeId = u64;

/// Errors found while validating a [`Document`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrError {
    /// The document has no scene roots.
    #[error("document has no roots")]
    EmptyDocument,
    /// A root or child reference points at a node that does not exist.
    #[error("node {0} is referenced but not defined")]
    MissingNode(NodeId),
    /// A node is stored under a key different from its own id.
    #[error("node stored under key {key} has id {id}")]
    IdMismatch {
        /// Map key the node was found under.
        key: NodeId,
        /// Id recorded inside the node.
        id: NodeId,
    },
    /// The graph reachable from a root is not acyclic.
    #[error("cycle detected through node {0}")]
    Cycle(NodeId),
}

/// 2D vector with f64 components (millimeters in the sketch plane).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vec2 {
    /// Create a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 3D vector with f64 components (conventionally millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// CSG operation, the core building block of the IR DAG.
///
/// Each variant is either a leaf primitive or a combining/transform operation
/// that references child nodes by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CsgOp {
    /// Empty geometry (identity for union).
    Empty,
    /// Axis-aligned box with one corner at the origin, or centered on it.
    Cube {
        /// Size along each axis.
        size: Vec3,
        /// Center the box on the origin instead of spanning the positive octant.
        #[serde(default)]
        center: bool,
    },
    /// Cylinder along the Z axis standing on the XY plane, or centered on it.
    Cylinder {
        /// Radius of the cylinder.
        radius: f64,
        /// Height of the cylinder.
        height: f64,
        /// Number of circular segments (0 = renderer default).
        #[serde(default)]
        segments: u32,
        /// Center the cylinder vertically on the origin.
        #[serde(default)]
        center: bool,
    },
    /// Closed 2D polygon in the XY plane.
    Polygon {
        /// Outline vertices, implicitly closed.
        points: Vec<Vec2>,
    },
    /// Linear extrusion of a 2D child along +Z.
    LinearExtrude {
        /// 2D child node.
        child: NodeId,
        /// Extrusion height.
        height: f64,
    },
    /// Boolean union of two geometries.
    Union {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Boolean difference (left minus right).
    Difference {
        /// Left operand (base).
        left: NodeId,
        /// Right operand (subtracted).
        right: NodeId,
    },
    /// Boolean intersection of two geometries.
    Intersection {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Translation by an offset vector.
    Translate {
        /// Child node to translate.
        child: NodeId,
        /// Translation offset.
        offset: Vec3,
    },
    /// Rotation by Euler angles in degrees (applied as X, then Y, then Z).
    Rotate {
        /// Child node to rotate.
        child: NodeId,
        /// Rotation angles in degrees.
        angles: Vec3,
    },
    /// Non-uniform scale.
    Scale {
        /// Child node to scale.
        child: NodeId,
        /// Scale factors per axis.
        factor: Vec3,
    },
    /// Display color tag. Has no geometric effect.
    Color {
        /// Child node to tag.
        child: NodeId,
        /// Color as a CSS-style hex string (`"#333"`, `"#ff9800"`).
        color: String,
        /// Optional opacity in `0.0..=1.0`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alpha: Option<f64>,
    },
}

impl CsgOp {
    /// Child node ids referenced by this operation, in operand order.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            CsgOp::Empty | CsgOp::Cube { .. } | CsgOp::Cylinder { .. } | CsgOp::Polygon { .. } => {
                Vec::new()
            }
            CsgOp::Union { left, right }
            | CsgOp::Difference { left, right }
            | CsgOp::Intersection { left, right } => vec![*left, *right],
            CsgOp::LinearExtrude { child, .. }
            | CsgOp::Translate { child, .. }
            | CsgOp::Rotate { child, .. }
            | CsgOp::Scale { child, .. }
            | CsgOp::Color { child, .. } => vec![*child],
        }
    }

    /// Short lowercase name of the operation, matching its OpenSCAD module.
    pub fn kind(&self) -> &'static str {
        match self {
            CsgOp::Empty => "empty",
            CsgOp::Cube { .. } => "cube",
            CsgOp::Cylinder { .. } => "cylinder",
            CsgOp::Polygon { .. } => "polygon",
            CsgOp::LinearExtrude { .. } => "linear_extrude",
            CsgOp::Union { .. } => "union",
            CsgOp::Difference { .. } => "difference",
            CsgOp::Intersection { .. } => "intersection",
            CsgOp::Translate { .. } => "translate",
            CsgOp::Rotate { .. } => "rotate",
            CsgOp::Scale { .. } => "scale",
            CsgOp::Color { .. } => "color",
        }
    }
}

/// A node in the IR graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Optional human-readable name.
    pub name: Option<String>,
    /// The operation this node represents.
    pub op: CsgOp,
}

/// A rackcad document, the `.json` export format.
///
/// Contains the full IR DAG and the root nodes of the parts it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// All nodes in the graph, keyed by [`NodeId`].
    pub nodes: BTreeMap<NodeId, Node>,
    /// Root nodes, one per exported part.
    pub roots: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            nodes: BTreeMap::new(),
            roots: Vec::new(),
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node, failing with [`IrError::MissingNode`].
    pub fn node(&self, id: NodeId) -> Result<&Node, IrError> {
        self.nodes.get(&id).ok_or(IrError::MissingNode(id))
    }

    /// Direct children of a node.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, IrError> {
        Ok(self.node(id)?.op.children())
    }

    /// Check that the document is a well-formed DAG.
    ///
    /// Every root and every child reference must resolve, node keys must
    /// match node ids, and no node may be its own ancestor.
    pub fn validate(&self) -> Result<(), IrError> {
        if self.roots.is_empty() {
            return Err(IrError::EmptyDocument);
        }
        for (&key, node) in &self.nodes {
            if key != node.id {
                return Err(IrError::IdMismatch { key, id: node.id });
            }
        }

        // 1 = on the current path, 2 = fully visited.
        let mut state: BTreeMap<NodeId, u8> = BTreeMap::new();
        for &root in &self.roots {
            self.visit(root, &mut state)?;
        }
        Ok(())
    }

    fn visit(&self, id: NodeId, state: &mut BTreeMap<NodeId, u8>) -> Result<(), IrError> {
        match state.get(&id) {
            Some(2) => return Ok(()),
            Some(_) => return Err(IrError::Cycle(id)),
            None => {}
        }
        state.insert(id, 1);
        for child in self.children(id)? {
            self.visit(child, state)?;
        }
        state.insert(id, 2);
        Ok(())
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
