//! NanoPi R5S case placed in its rack slot.

use super::netstack_v1_case_nanopir5s;
use crate::Part;
use serde::Deserialize;

/// Assembly parameters. The case is configured in the nested `case` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Offset of the case from the rack origin.
    pub position: [f64; 3],
    /// The case.
    pub case: netstack_v1_case_nanopir5s::Params,
}

/// Build the assembly.
pub fn build(p: &Params) -> Part {
    let [x, y, z] = p.position;
    netstack_v1_case_nanopir5s::build(&p.case)
        .translate(x, y, z)
        .renamed("netstack_v1_assembly")
}
