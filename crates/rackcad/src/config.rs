//! Per-part parameter overrides loaded from TOML.
//!
//! A config file holds one table per part name. Keys inside a table
//! override fields of that part's `Params`; everything else keeps its
//! design default.
//!
//! ```toml
//! [netstack_v2_bottom]
//! padding = 6.0
//! tolerance_xy = 0.25
//! ```

use crate::CadError;
use serde::de::DeserializeOwned;
use std::path::Path;
use toml::{Table, Value};

/// Parsed override tables, keyed by part name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartConfig {
    tables: Table,
}

impl PartConfig {
    /// A config without overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(src: &str) -> Result<Self, CadError> {
        let tables: Table = src.parse()?;
        Ok(Self { tables })
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CadError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&src)?;
        tracing::debug!(path = %path.display(), parts = config.tables.len(), "loaded part config");
        Ok(config)
    }

    /// Deserialize the table for `part` into its parameters.
    ///
    /// A missing table yields `P::default()`; a table that is not a table
    /// or carries unknown keys is an error.
    pub fn params<P>(&self, part: &str) -> Result<P, CadError>
    where
        P: DeserializeOwned + Default,
    {
        let Some(value) = self.tables.get(part) else {
            return Ok(P::default());
        };
        value.clone().try_into().map_err(|source| CadError::Params {
            part: part.to_string(),
            source,
        })
    }

    /// Set a single override, creating the part's table if needed.
    pub fn set(&mut self, part: &str, key: &str, value: impl Into<Value>) {
        let entry = self
            .tables
            .entry(part.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        if !entry.is_table() {
            *entry = Value::Table(Table::new());
        }
        if let Value::Table(table) = entry {
            table.insert(key.to_string(), value.into());
        }
    }

    /// Names of the parts that carry overrides.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(default, deny_unknown_fields)]
    struct Plate {
        width: f64,
        holes: u32,
    }

    impl Default for Plate {
        fn default() -> Self {
            Self {
                width: 100.0,
                holes: 4,
            }
        }
    }

    #[test]
    fn missing_table_uses_defaults() {
        let config = PartConfig::new();
        assert_eq!(config.params::<Plate>("plate").unwrap(), Plate::default());
    }

    #[test]
    fn partial_override() {
        let config = PartConfig::from_toml_str("[plate]\nwidth = 120.5\n").unwrap();
        let plate: Plate = config.params("plate").unwrap();
        assert_eq!(plate.width, 120.5);
        assert_eq!(plate.holes, 4);
        assert_eq!(config.part_names().collect::<Vec<_>>(), vec!["plate"]);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let config = PartConfig::from_toml_str("[plate]\nwidht = 1.0\n").unwrap();
        let err = config.params::<Plate>("plate").unwrap_err();
        match err {
            CadError::Params { part, source } => {
                assert_eq!(part, "plate");
                assert!(source.to_string().contains("widht"));
            }
            other => panic!("expected Params error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_rejected() {
        let config = PartConfig::from_toml_str("[plate]\nholes = \"four\"\n").unwrap();
        assert!(matches!(
            config.params::<Plate>("plate"),
            Err(CadError::Params { .. })
        ));
    }

    #[test]
    fn malformed_toml() {
        assert!(matches!(
            PartConfig::from_toml_str("[plate\nwidth = 1"),
            Err(CadError::Config(_))
        ));
    }

    #[test]
    fn set_overrides() {
        let mut config = PartConfig::new();
        config.set("plate", "width", 80.0);
        config.set("plate", "holes", 6);
        let plate: Plate = config.params("plate").unwrap();
        assert_eq!(
            plate,
            Plate {
                width: 80.0,
                holes: 6
            }
        );
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("rackcad-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[plate]\nholes = 8\n").unwrap();
        let config = PartConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.params::<Plate>("plate").unwrap().holes, 8);

        assert!(matches!(
            PartConfig::load(path.with_extension("missing")),
            Err(CadError::Io(_))
        ));
    }
}
