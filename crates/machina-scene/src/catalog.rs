//! Static part metadata shown in the detail panel

use std::collections::HashMap;

/// Placeholder values for parts missing from the catalog
pub const UNKNOWN_MATERIAL: &str = "Inconnu";
pub const UNKNOWN_TEMPERATURE: &str = "—";

/// Descriptive metadata for a named part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartInfo {
    pub material: &'static str,
    pub temperature: &'static str,
}

/// Fixed lookup table from node name to part metadata.
///
/// Sample data for the demo models; unknown names resolve to the
/// placeholder pair rather than an error.
pub struct PartCatalog {
    entries: HashMap<&'static str, PartInfo>,
}

impl PartCatalog {
    /// The built-in sample catalog
    pub fn sample() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "Fan",
            PartInfo {
                material: "Acier",
                temperature: "450°C",
            },
        );
        entries.insert(
            "Housing",
            PartInfo {
                material: "Aluminium",
                temperature: "120°C",
            },
        );
        entries.insert(
            "Shaft",
            PartInfo {
                material: "Acier trempé",
                temperature: "300°C",
            },
        );
        entries.insert(
            "Base",
            PartInfo {
                material: "Fonte",
                temperature: "60°C",
            },
        );
        Self { entries }
    }

    /// Look up a part by node name, falling back to the placeholders
    pub fn lookup(&self, name: &str) -> PartInfo {
        self.entries.get(name).copied().unwrap_or(PartInfo {
            material: UNKNOWN_MATERIAL,
            temperature: UNKNOWN_TEMPERATURE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_part() {
        let catalog = PartCatalog::sample();
        let info = catalog.lookup("Fan");
        assert_eq!(info.material, "Acier");
        assert_eq!(info.temperature, "450°C");
    }

    #[test]
    fn test_unknown_part_yields_placeholders() {
        let catalog = PartCatalog::sample();
        let info = catalog.lookup("Mystery");
        assert_eq!(info.material, UNKNOWN_MATERIAL);
        assert_eq!(info.temperature, UNKNOWN_TEMPERATURE);
    }
}
