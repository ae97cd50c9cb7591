//! The part catalog.
//!
//! Every part lives in its own module with a `Params` struct holding its
//! design constants (the `Default` impl) and a `build` function turning
//! them into a [`Part`]. [`build`] looks a part up by name and applies
//! overrides from a [`PartConfig`].

pub mod libre19_10in_1u;
pub mod m3_bolt_tolerance;
pub mod nanopi_r5s_shrinkage_xy;
pub mod netstack_v0_switch_chassis;
pub mod netstack_v1_assembly;
pub mod netstack_v1_case_nanopir5s;
pub mod netstack_v1_nanopir5s;
pub mod netstack_v2_assembly;
pub mod netstack_v2_bottom;
pub mod netstack_v2_device;
pub mod netstack_v2_supply;
pub mod netstack_v2_top;
pub mod seeed_cm4rt_case;

use crate::{CadError, Part, PartConfig};

/// A catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartEntry {
    /// Name used on the command line and as the config table key.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

const CATALOG: &[PartEntry] = &[
    PartEntry {
        name: "libre19_10in_1u",
        description: "1U Libre19 sheet chassis for 10-inch network shelves",
    },
    PartEntry {
        name: "netstack_v0_switch_chassis",
        description: "1U chassis holding a network switch, with corner screw pockets",
    },
    PartEntry {
        name: "netstack_v1_nanopir5s",
        description: "Stand-in body of a NanoPi R5S router",
    },
    PartEntry {
        name: "netstack_v1_case_nanopir5s",
        description: "1U case for a NanoPi R5S with vents and a latch",
    },
    PartEntry {
        name: "netstack_v1_assembly",
        description: "NanoPi R5S case placed in the rack",
    },
    PartEntry {
        name: "netstack_v2_device",
        description: "Stand-in body of the v2 network appliance",
    },
    PartEntry {
        name: "netstack_v2_supply",
        description: "Stand-in body of the v2 power supply",
    },
    PartEntry {
        name: "netstack_v2_bottom",
        description: "Mounting plate for the v2 appliance and its power supply",
    },
    PartEntry {
        name: "netstack_v2_top",
        description: "Power supply cover with space for the rack rail",
    },
    PartEntry {
        name: "netstack_v2_assembly",
        description: "v2 appliance between two mock rack rails",
    },
    PartEntry {
        name: "nanopi_r5s_shrinkage_xy",
        description: "Print coupon to measure XY shrinkage around a NanoPi R5S",
    },
    PartEntry {
        name: "seeed_cm4rt_case",
        description: "Libre19 case for the Seeed CM4 router board",
    },
    PartEntry {
        name: "m3_bolt_tolerance",
        description: "Print coupon with graded M3 tapping and clearance holes",
    },
];

/// All parts that can be built by name.
pub fn catalog() -> &'static [PartEntry] {
    CATALOG
}

/// Look up a catalog entry.
pub fn find(name: &str) -> Option<&'static PartEntry> {
    CATALOG.iter().find(|e| e.name == name)
}

/// Build the part called `name`, applying its overrides from `config`.
pub fn build(name: &str, config: &PartConfig) -> Result<Part, CadError> {
    let _span = tracing::debug_span!("build", part = name).entered();
    let part = match name {
        "libre19_10in_1u" => libre19_10in_1u::build(&config.params(name)?),
        "netstack_v0_switch_chassis" => netstack_v0_switch_chassis::build(&config.params(name)?),
        "netstack_v1_nanopir5s" => netstack_v1_nanopir5s::build(&config.params(name)?),
        "netstack_v1_case_nanopir5s" => netstack_v1_case_nanopir5s::build(&config.params(name)?),
        "netstack_v1_assembly" => netstack_v1_assembly::build(&config.params(name)?),
        "netstack_v2_device" => netstack_v2_device::build(&config.params(name)?),
        "netstack_v2_supply" => netstack_v2_supply::build(&config.params(name)?),
        "netstack_v2_bottom" => netstack_v2_bottom::build(&config.params(name)?),
        "netstack_v2_top" => netstack_v2_top::build(&config.params(name)?),
        "netstack_v2_assembly" => netstack_v2_assembly::build(&config.params(name)?),
        "nanopi_r5s_shrinkage_xy" => nanopi_r5s_shrinkage_xy::build(&config.params(name)?),
        "seeed_cm4rt_case" => seeed_cm4rt_case::build(&config.params(name)?),
        "m3_bolt_tolerance" => m3_bolt_tolerance::build(&config.params(name)?),
        _ => return Err(CadError::UnknownPart(name.to_string())),
    };
    tracing::debug!(nodes = part.node_count(), "built part");
    Ok(part.renamed(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_builds() {
        let config = PartConfig::new();
        for entry in catalog() {
            let part = build(entry.name, &config).unwrap();
            assert_eq!(part.name, entry.name);
            assert!(part.bounds().is_some(), "{} has no volume", entry.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = catalog().iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn unknown_part() {
        let err = build("flux_capacitor", &PartConfig::new()).unwrap_err();
        assert!(matches!(err, CadError::UnknownPart(name) if name == "flux_capacitor"));
        assert!(find("flux_capacitor").is_none());
        assert!(find("netstack_v2_top").is_some());
    }

    #[test]
    fn bad_override_names_the_part() {
        let config = PartConfig::from_toml_str("[netstack_v2_device]\nwidth = 3.0\n").unwrap();
        match build("netstack_v2_device", &config) {
            Err(CadError::Params { part, .. }) => assert_eq!(part, "netstack_v2_device"),
            other => panic!("expected Params error, got {other:?}"),
        }
    }
}
