// ============================================================================
// Registry Module
// Process-wide read-only tables: units, physical types, constants
// ============================================================================
//
// Every table lives in a std::sync::OnceLock, is built on first use and is
// never mutated afterwards.

pub mod constants;
pub mod parser;
pub mod physical_types;
pub mod units;

pub use parser::{lookup_symbol, parse_unit};
pub use units::{unit_registry, UnitRegistry, PREFIXES};

use crate::domain::{BaseDimension, Dimension, NamedUnit, Unit, UnitResult, UnitSystem, UnitTerm};
use std::sync::Arc;

/// Build a unit from a symbol or a full expression (`"km"`, `"J / (kg K)"`).
pub fn unit(expr: &str) -> UnitResult<Unit> {
    parse_unit(expr)
}

/// Registered unit known to exist; for the crate's own static tables.
pub(crate) fn named(symbol: &str) -> Unit {
    let unit = unit_registry()
        .get(symbol)
        .unwrap_or_else(|| panic!("unit '{}' missing from the static table", symbol));
    Unit::from_named(unit.clone())
}

/// Base unit of one dimension in `system`.
pub fn base_unit(base: BaseDimension, system: UnitSystem) -> Arc<NamedUnit> {
    unit_registry().base_unit(base, system).clone()
}

/// Unscaled product of `system` base units spanning `dimension`.
pub fn base_units_for(dimension: &Dimension, system: UnitSystem) -> Unit {
    let terms = UnitSystem::BASE_ORDER.iter().filter_map(|base| {
        let power = dimension.exponent(*base);
        (!power.is_zero()).then(|| UnitTerm::new(base_unit(*base, system), power))
    });
    // One term per base unit, each carrying an exponent of a valid dimension
    Unit::checked_from_parts(1.0, terms).expect("base-unit powers come from a valid dimension")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_lookup() {
        assert_eq!(unit("km").unwrap().si_scale(), 1000.0);
        assert!(unit("parsecs").is_err());
    }

    #[test]
    fn test_base_units_for() {
        assert_eq!(base_units_for(&Dimension::ENERGY, UnitSystem::Si).to_string(), "kg m2 / s2");
        assert_eq!(base_units_for(&Dimension::ENERGY, UnitSystem::Cgs).to_string(), "g cm2 / s2");
        assert_eq!(base_units_for(&Dimension::DIMENSIONLESS, UnitSystem::Si).to_string(), "");
    }
}
