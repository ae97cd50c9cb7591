//! OpenSCAD source export.
//!
//! Every IR operation maps onto the OpenSCAD module of the same name.
//! Left-nested chains of one boolean are flattened so a part built as
//! `solid -= a; solid -= b;` renders as one `difference()` with three
//! children instead of a tower of nested blocks.

use super::ExportError;
use rackcad_ir::{CsgOp, Document, NodeId, Vec3};
use std::fmt::Write as _;
use std::path::Path;

/// Render a document as OpenSCAD source.
///
/// The document is validated first. Output is deterministic: numbers are
/// rounded to six decimals and printed without trailing zeros.
pub fn to_scad(doc: &Document) -> Result<String, ExportError> {
    doc.validate()?;

    let mut out = String::new();
    writeln!(
        out,
        "// Generated by rackcad {}. Do not edit.",
        env!("CARGO_PKG_VERSION")
    )?;
    for &root in &doc.roots {
        let name = doc.node(root)?.name.as_deref().unwrap_or("unnamed");
        writeln!(out)?;
        writeln!(out, "// {name}")?;
        ScadWriter {
            doc,
            out: &mut out,
        }
        .node(root, 0)?;
    }
    Ok(out)
}

/// Render a document and write it to `path`.
pub fn write_scad(doc: &Document, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let source = to_scad(doc)?;
    std::fs::write(path, &source)?;
    tracing::info!(path = %path.display(), bytes = source.len(), "wrote OpenSCAD file");
    Ok(())
}

struct ScadWriter<'a> {
    doc: &'a Document,
    out: &'a mut String,
}

impl ScadWriter<'_> {
    fn node(&mut self, id: NodeId, depth: usize) -> Result<(), ExportError> {
        let doc = self.doc;
        let node = doc.node(id)?;
        if !is_finite(&node.op) {
            return Err(ExportError::NonFinite(id));
        }
        let pad = "  ".repeat(depth);

        match &node.op {
            CsgOp::Empty => writeln!(self.out, "{pad}union();")?,
            CsgOp::Cube { size, center } => {
                let center = if *center { ", center = true" } else { "" };
                writeln!(self.out, "{pad}cube(size = {}{center});", vec3(size))?;
            }
            CsgOp::Cylinder {
                radius,
                height,
                segments,
                center,
            } => {
                let mut args = format!("h = {}, r = {}", num(*height), num(*radius));
                if *center {
                    args.push_str(", center = true");
                }
                if *segments > 0 {
                    write!(args, ", $fn = {segments}")?;
                }
                writeln!(self.out, "{pad}cylinder({args});")?;
            }
            CsgOp::Polygon { points } => {
                let pts: Vec<String> = points
                    .iter()
                    .map(|p| format!("[{}, {}]", num(p.x), num(p.y)))
                    .collect();
                writeln!(self.out, "{pad}polygon(points = [{}]);", pts.join(", "))?;
            }
            CsgOp::LinearExtrude { child, height } => {
                let header = format!("linear_extrude(height = {})", num(*height));
                self.block(&header, &[*child], depth)?;
            }
            CsgOp::Union { left, right } => {
                let operands = self.flatten(*left, *right, union_operands, true)?;
                self.block("union()", &operands, depth)?;
            }
            CsgOp::Difference { left, right } => {
                let operands = self.flatten(*left, *right, difference_operands, false)?;
                self.block("difference()", &operands, depth)?;
            }
            CsgOp::Intersection { left, right } => {
                let operands = self.flatten(*left, *right, intersection_operands, true)?;
                self.block("intersection()", &operands, depth)?;
            }
            CsgOp::Translate { child, offset } => {
                self.block(&format!("translate({})", vec3(offset)), &[*child], depth)?;
            }
            CsgOp::Rotate { child, angles } => {
                self.block(&format!("rotate({})", vec3(angles)), &[*child], depth)?;
            }
            CsgOp::Scale { child, factor } => {
                self.block(&format!("scale({})", vec3(factor)), &[*child], depth)?;
            }
            CsgOp::Color {
                child,
                color,
                alpha,
            } => {
                let color = quote(color);
                let header = match alpha {
                    Some(a) => format!("color({color}, {})", num(*a)),
                    None => format!("color({color})"),
                };
                self.block(&header, &[*child], depth)?;
            }
        }
        Ok(())
    }

    fn block(&mut self, header: &str, children: &[NodeId], depth: usize) -> Result<(), ExportError> {
        let pad = "  ".repeat(depth);
        writeln!(self.out, "{pad}{header} {{")?;
        for &child in children {
            self.node(child, depth + 1)?;
        }
        writeln!(self.out, "{pad}}}")?;
        Ok(())
    }

    /// Operand list of a boolean, descending into children of the same kind.
    ///
    /// Union and intersection are associative on both sides; difference
    /// only along its base (`(a - b) - c == a - b - c`).
    fn flatten(
        &self,
        left: NodeId,
        right: NodeId,
        same: fn(&CsgOp) -> Option<(NodeId, NodeId)>,
        both_sides: bool,
    ) -> Result<Vec<NodeId>, ExportError> {
        let mut operands = Vec::new();
        self.collect(left, same, both_sides, &mut operands)?;
        if both_sides {
            self.collect(right, same, both_sides, &mut operands)?;
        } else {
            operands.push(right);
        }
        Ok(operands)
    }

    fn collect(
        &self,
        id: NodeId,
        same: fn(&CsgOp) -> Option<(NodeId, NodeId)>,
        both_sides: bool,
        operands: &mut Vec<NodeId>,
    ) -> Result<(), ExportError> {
        match same(&self.doc.node(id)?.op) {
            Some((l, r)) => {
                self.collect(l, same, both_sides, operands)?;
                if both_sides {
                    self.collect(r, same, both_sides, operands)?;
                } else {
                    operands.push(r);
                }
            }
            None => operands.push(id),
        }
        Ok(())
    }
}

fn union_operands(op: &CsgOp) -> Option<(NodeId, NodeId)> {
    match op {
        CsgOp::Union { left, right } => Some((*left, *right)),
        _ => None,
    }
}

fn difference_operands(op: &CsgOp) -> Option<(NodeId, NodeId)> {
    match op {
        CsgOp::Difference { left, right } => Some((*left, *right)),
        _ => None,
    }
}

fn intersection_operands(op: &CsgOp) -> Option<(NodeId, NodeId)> {
    match op {
        CsgOp::Intersection { left, right } => Some((*left, *right)),
        _ => None,
    }
}

fn is_finite(op: &CsgOp) -> bool {
    let v3 = |v: &Vec3| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
    match op {
        CsgOp::Cube { size, .. } => v3(size),
        CsgOp::Cylinder { radius, height, .. } => radius.is_finite() && height.is_finite(),
        CsgOp::Polygon { points } => points.iter().all(|p| p.x.is_finite() && p.y.is_finite()),
        CsgOp::LinearExtrude { height, .. } => height.is_finite(),
        CsgOp::Translate { offset, .. } => v3(offset),
        CsgOp::Rotate { angles, .. } => v3(angles),
        CsgOp::Scale { factor, .. } => v3(factor),
        CsgOp::Color { alpha, .. } => alpha.map_or(true, f64::is_finite),
        CsgOp::Empty
        | CsgOp::Union { .. }
        | CsgOp::Difference { .. }
        | CsgOp::Intersection { .. } => true,
    }
}

fn vec3(v: &Vec3) -> String {
    format!("[{}, {}, {}]", num(v.x), num(v.y), num(v.z))
}

/// OpenSCAD string literal. Only `"` and `\` are escaped; everything
/// else is passed through as UTF-8.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Six decimals, trailing zeros trimmed, negative zero folded.
fn num(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::Outline;
    use crate::Part;
    use rackcad_ir::IrError;

    fn body(src: &str) -> String {
        // Strip the generator header and the part name comment.
        src.lines()
            .filter(|l| !l.starts_with("//") && !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(-1e-9), "0");
        assert_eq!(num(3.175), "3.175");
        assert_eq!(num(44.449999999999996), "44.45");
        assert_eq!(num(-12.25), "-12.25");
        assert_eq!(num(100.0), "100");
    }

    #[test]
    fn color_names_are_quoted_verbatim() {
        assert_eq!(quote("#333"), "\"#333\"");
        assert_eq!(quote("grün"), "\"grün\"");
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);

        let src = Part::cube("c", 1.0, 1.0, 1.0).color("grün").to_scad().unwrap();
        assert!(src.contains("color(\"grün\") {"));
        assert!(!src.contains("\\u{"));
    }

    #[test]
    fn cube_in_translate() {
        let part = Part::cube("tab", 254.0, 0.8, 41.6).translate(18.2, 0.0, 0.0);
        let src = part.to_scad().unwrap();
        assert!(src.starts_with("// Generated by rackcad"));
        assert!(src.contains("// tab\n"));
        assert_eq!(
            body(&src),
            "translate([18.2, 0, 0]) {\n  cube(size = [254, 0.8, 41.6]);\n}"
        );
    }

    #[test]
    fn cylinder_options() {
        let plain = Part::cylinder("c", 1.8, 10.0, 0).to_scad().unwrap();
        assert_eq!(body(&plain), "cylinder(h = 10, r = 1.8);");

        let faceted = Part::centered_cylinder("c", 1.25, 5.0, 32).to_scad().unwrap();
        assert_eq!(
            body(&faceted),
            "cylinder(h = 5, r = 1.25, center = true, $fn = 32);"
        );
    }

    #[test]
    fn difference_chain_is_flattened() {
        let mut solid = Part::cube("shell", 10.0, 10.0, 10.0);
        solid -= Part::cube("a", 1.0, 1.0, 1.0);
        solid -= Part::cube("b", 2.0, 2.0, 2.0);
        solid -= Part::cube("c", 3.0, 3.0, 3.0);
        assert_eq!(
            body(&solid.to_scad().unwrap()),
            "difference() {\n  cube(size = [10, 10, 10]);\n  cube(size = [1, 1, 1]);\n  \
             cube(size = [2, 2, 2]);\n  cube(size = [3, 3, 3]);\n}"
        );
    }

    #[test]
    fn difference_right_side_is_not_flattened() {
        let a = Part::cube("a", 3.0, 3.0, 3.0);
        let inner = Part::cube("b", 2.0, 2.0, 2.0) - Part::cube("c", 1.0, 1.0, 1.0);
        let src = body(&(a - inner).to_scad().unwrap());
        assert_eq!(src.matches("difference()").count(), 2);
    }

    #[test]
    fn union_flattens_both_sides() {
        let a = Part::cube("a", 1.0, 1.0, 1.0);
        let b = Part::cube("b", 2.0, 2.0, 2.0);
        let c = Part::cube("c", 3.0, 3.0, 3.0);
        let d = Part::cube("d", 4.0, 4.0, 4.0);
        let src = body(&((a + b) + (c + d)).to_scad().unwrap());
        assert_eq!(src.matches("union()").count(), 1);
        assert_eq!(src.matches("cube(").count(), 4);
    }

    #[test]
    fn extruded_polygon_with_color() {
        let outline = Outline::rounded_rectangle(10.0, 5.0, 0.0, None);
        let part = Part::extrude("plate", &outline, 4.0).color_alpha("#333", 0.5);
        assert_eq!(
            body(&part.to_scad().unwrap()),
            "color(\"#333\", 0.5) {\n  linear_extrude(height = 4) {\n    \
             polygon(points = [[0, 0], [10, 0], [10, 5], [0, 5]]);\n  }\n}"
        );
    }

    #[test]
    fn rotate_scale_and_empty() {
        let part = Part::empty("e").scale(1.0, -1.0, 1.0).rotate(-90.0, 0.0, 0.0);
        assert_eq!(
            body(&part.to_scad().unwrap()),
            "rotate([-90, 0, 0]) {\n  scale([1, -1, 1]) {\n    union();\n  }\n}"
        );
    }

    #[test]
    fn output_is_deterministic_and_balanced() {
        let screw = Part::cylinder("screw", 1.5875, 3.0, 0).rotate(-90.0, 0.0, 0.0);
        let part = Part::cube("body", 50.0, 20.0, 10.0)
            - screw.linear_pattern(10.0, 0.0, 0.0, 4).color("#666");
        let a = part.to_scad().unwrap();
        let b = part.to_scad().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.matches('{').count(), a.matches('}').count());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let part = Part::cube("bad", f64::NAN, 1.0, 1.0);
        let doc = part.to_document();
        assert!(matches!(to_scad(&doc), Err(ExportError::NonFinite(_))));
    }

    #[test]
    fn invalid_document_is_rejected() {
        let doc = Document::new();
        assert!(matches!(
            to_scad(&doc),
            Err(ExportError::Invalid(IrError::EmptyDocument))
        ));
    }

    #[test]
    fn write_to_file() {
        let dir = std::env::temp_dir().join(format!("rackcad-scad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cube.scad");
        let part = Part::cube("cube", 1.0, 2.0, 3.0);
        write_scad(&part.to_document(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, part.to_scad().unwrap());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
