//! Export of finished part documents.
//!
//! - [`scad`]: OpenSCAD source, consumed by the OpenSCAD renderer
//! - JSON: see [`rackcad_ir::Document::to_json`]

pub mod scad;

use rackcad_ir::{IrError, NodeId};
use thiserror::Error;

pub use scad::{to_scad, write_scad};

/// Errors produced while exporting a document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The document failed structural validation.
    #[error("invalid document: {0}")]
    Invalid(#[from] IrError),
    /// A node carries a NaN or infinite parameter.
    #[error("node {0} has a non-finite parameter")]
    NonFinite(NodeId),
    /// Writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Formatting into the output buffer failed.
    #[error("format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}
