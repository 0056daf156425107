// ============================================================================
// Converter
// Bundles an explicit equivalency list, tolerance and unit system
// ============================================================================

use super::equivalency::Equivalency;
use crate::domain::{Constant, Quantity, Unit, UnitResult, UnitSystem};
use crate::numeric::Tolerance;
use tracing::debug;

/// Conversion context chosen by the caller.
///
/// Nothing here is implicit: the equivalencies a converter applies are the
/// ones it was built with, in that order.
#[derive(Debug, Clone)]
pub struct Converter {
    equivalencies: Vec<Equivalency>,
    tolerance: Tolerance,
    unit_system: Option<UnitSystem>,
    display_precision: Option<usize>,
}

impl Converter {
    pub fn new(
        equivalencies: Vec<Equivalency>,
        tolerance: Tolerance,
        unit_system: Option<UnitSystem>,
        display_precision: Option<usize>,
    ) -> Self {
        debug!(
            equivalencies = ?equivalencies.iter().map(Equivalency::name).collect::<Vec<_>>(),
            relative = tolerance.relative,
            absolute = tolerance.absolute,
            unit_system = ?unit_system,
            "Converter created"
        );
        Self {
            equivalencies,
            tolerance,
            unit_system,
            display_precision,
        }
    }

    /// Direct rescales only, default tolerance.
    pub fn strict() -> Self {
        Self::new(Vec::new(), Tolerance::DEFAULT, None, None)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn equivalencies(&self) -> &[Equivalency] {
        &self.equivalencies
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn unit_system(&self) -> Option<UnitSystem> {
        self.unit_system
    }

    pub fn display_precision(&self) -> Option<usize> {
        self.display_precision
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    pub fn convert(&self, quantity: &Quantity, target: &Unit) -> UnitResult<Quantity> {
        quantity.to_with(target, &self.equivalencies)
    }

    /// Convert to a unit given as a string expression.
    pub fn convert_str(&self, quantity: &Quantity, target: &str) -> UnitResult<Quantity> {
        self.convert(quantity, &Unit::parse(target)?)
    }

    /// Equal within the configured tolerance after converting `b` into
    /// `a`'s unit.
    pub fn approx_eq(&self, a: &Quantity, b: &Quantity) -> UnitResult<bool> {
        let b = self.convert(b, a.unit())?;
        Ok(a.value().all_close(b.value(), self.tolerance))
    }

    /// Quantity expressed in the configured system's base units; unchanged
    /// when no system is configured.
    pub fn normalize(&self, quantity: &Quantity) -> Quantity {
        match self.unit_system {
            Some(system) => quantity.in_system(system),
            None => quantity.clone(),
        }
    }

    // ========================================================================
    // Constants and formatting
    // ========================================================================

    /// Constant realised in the configured system.
    ///
    /// # Errors
    /// `UnknownConstant`, or `MissingUnitSystem` for a multi-system constant
    /// when no system is configured.
    pub fn constant(&self, name: &str) -> UnitResult<Quantity> {
        let constant = Constant::lookup(name)?;
        match self.unit_system {
            Some(system) => constant.in_system(system),
            None => constant.quantity(),
        }
    }

    pub fn format(&self, quantity: &Quantity) -> String {
        match self.display_precision {
            Some(precision) => format!("{:.*}", precision, quantity),
            None => quantity.to_string(),
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::strict()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UnitError;
    use crate::engine::equivalencies::{spectral, temperature_energy};
    use crate::registry::unit;

    #[test]
    fn test_strict_converter() {
        let converter = Converter::strict();
        let q = Quantity::new(1.0, unit("eV").unwrap());
        assert!(matches!(
            converter.convert(&q, &unit("K").unwrap()),
            Err(UnitError::IncompatibleUnits { .. })
        ));
        let km = converter.convert_str(&Quantity::new(1500.0, unit("m").unwrap()), "km").unwrap();
        assert_eq!(km.scalar(), Some(1.5));
    }

    #[test]
    fn test_converter_applies_its_equivalencies() {
        let converter = Converter::new(
            vec![spectral(), temperature_energy()],
            Tolerance::DEFAULT,
            None,
            None,
        );
        let t = converter
            .convert(&Quantity::new(1.0, unit("eV").unwrap()), &unit("K").unwrap())
            .unwrap();
        assert!((t.scalar().unwrap() - 11_604.518).abs() < 1e-2);
    }

    #[test]
    fn test_approx_eq_uses_tolerance() {
        let loose = Converter::new(Vec::new(), Tolerance::new(1e-3, 0.0), None, None);
        let a = Quantity::new(1.0, unit("km").unwrap());
        let b = Quantity::new(1000.5, unit("m").unwrap());
        assert!(loose.approx_eq(&a, &b).unwrap());
        assert!(!Converter::strict().approx_eq(&a, &b).unwrap());
        assert!(Converter::strict()
            .approx_eq(&a, &Quantity::new(1.0, unit("s").unwrap()))
            .is_err());
    }

    #[test]
    fn test_constant_needs_system() {
        assert!(matches!(
            Converter::strict().constant("e"),
            Err(UnitError::MissingUnitSystem { .. })
        ));
        let gauss = Converter::new(Vec::new(), Tolerance::DEFAULT, Some(UnitSystem::Gauss), None);
        let e = gauss.constant("e").unwrap();
        assert_eq!(e.unit().to_string(), "statC");
        let si = Converter::new(Vec::new(), Tolerance::DEFAULT, Some(UnitSystem::Si), None);
        assert_eq!(si.constant("c").unwrap().scalar(), Some(299_792_458.0));
    }

    #[test]
    fn test_normalize_and_format() {
        let cgs = Converter::new(Vec::new(), Tolerance::DEFAULT, Some(UnitSystem::Cgs), Some(2));
        let q = cgs.normalize(&Quantity::new(1.0, unit("J").unwrap()));
        assert!((q.scalar().unwrap() - 1.0e7).abs() < 1e-3);
        assert_eq!(cgs.format(&Quantity::new(1.0 / 3.0, unit("m").unwrap())), "0.33 m");
    }
}
