// ============================================================================
// Physical Constants
// Named values with one realization per unit system
// ============================================================================

use super::errors::{UnitError, UnitResult};
use super::quantity::Quantity;
use super::unit::{Unit, UnitSystem};
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Div, Mul};

/// A constant's value in one unit system.
#[derive(Debug, Clone)]
pub struct Realization {
    pub system: UnitSystem,
    pub value: f64,
    pub unit: Unit,
}

/// A physical constant (CODATA 2018 / IAU 2015).
///
/// The first realization is always SI. Constants realised in more than one
/// system (the elementary charge) must be used through an explicit system;
/// electromagnetic constants never convert to CGS implicitly.
#[derive(Debug, Clone)]
pub struct Constant {
    abbrev: &'static str,
    name: &'static str,
    reference: &'static str,
    uncertainty: f64,
    electromagnetic: bool,
    realizations: SmallVec<[Realization; 2]>,
}

impl Constant {
    pub(crate) fn si(
        abbrev: &'static str,
        name: &'static str,
        value: f64,
        unit: Unit,
        uncertainty: f64,
        reference: &'static str,
    ) -> Self {
        let mut realizations = SmallVec::new();
        realizations.push(Realization {
            system: UnitSystem::Si,
            value,
            unit,
        });
        Self {
            abbrev,
            name,
            reference,
            uncertainty,
            electromagnetic: false,
            realizations,
        }
    }

    /// Builder method: Mark as electromagnetic (no implicit CGS form)
    pub(crate) fn electromagnetic(mut self) -> Self {
        self.electromagnetic = true;
        self
    }

    /// Builder method: Add a realization in another system
    pub(crate) fn with_realization(mut self, system: UnitSystem, value: f64, unit: Unit) -> Self {
        self.realizations.push(Realization {
            system,
            value,
            unit,
        });
        self
    }

    /// Look up by abbreviation (`"k_B"`) or name (`"Boltzmann constant"`).
    pub fn lookup(name: &str) -> UnitResult<&'static Constant> {
        crate::registry::constants::lookup(name)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn abbrev(&self) -> &'static str {
        self.abbrev
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn reference(&self) -> &'static str {
        self.reference
    }

    /// Standard uncertainty in SI units.
    #[inline]
    pub fn uncertainty(&self) -> f64 {
        self.uncertainty
    }

    pub fn realizations(&self) -> &[Realization] {
        &self.realizations
    }

    pub fn is_multi_system(&self) -> bool {
        self.realizations.len() > 1
    }

    pub fn is_electromagnetic(&self) -> bool {
        self.electromagnetic
    }

    // ========================================================================
    // Values
    // ========================================================================

    fn realization_quantity(r: &Realization) -> Quantity {
        Quantity::new(r.value, r.unit.clone())
    }

    /// The constant as a quantity, when no system choice is needed.
    ///
    /// # Errors
    /// `MissingUnitSystem` for constants realised in several systems.
    pub fn quantity(&self) -> UnitResult<Quantity> {
        if self.is_multi_system() {
            return Err(UnitError::MissingUnitSystem {
                constant: self.name.to_string(),
                requested: None,
            });
        }
        Ok(self.si_value())
    }

    /// SI realization; always present.
    pub fn si_value(&self) -> Quantity {
        Self::realization_quantity(&self.realizations[0])
    }

    /// Realization in `system`. Non-electromagnetic constants fall back to
    /// decomposing the SI value into the requested base units.
    pub fn in_system(&self, system: UnitSystem) -> UnitResult<Quantity> {
        if let Some(r) = self.realizations.iter().find(|r| r.system == system) {
            return Ok(Self::realization_quantity(r));
        }
        if self.electromagnetic {
            return Err(UnitError::MissingUnitSystem {
                constant: self.name.to_string(),
                requested: Some(system),
            });
        }
        Ok(self.si_value().in_system(system))
    }

    pub fn cgs(&self) -> UnitResult<Quantity> {
        self.in_system(UnitSystem::Cgs)
    }

    pub fn gauss(&self) -> UnitResult<Quantity> {
        self.in_system(UnitSystem::Gauss)
    }

    /// Product with a quantity; goes through `quantity()` and so fails for
    /// multi-system constants.
    pub fn checked_mul(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        self.quantity()?.checked_mul(rhs)
    }

    pub fn checked_div(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        self.quantity()?.checked_div(rhs)
    }
}

impl Mul<&Quantity> for &Constant {
    type Output = UnitResult<Quantity>;

    fn mul(self, rhs: &Quantity) -> Self::Output {
        self.checked_mul(rhs)
    }
}

impl Mul<&Constant> for &Quantity {
    type Output = UnitResult<Quantity>;

    fn mul(self, rhs: &Constant) -> Self::Output {
        self.checked_mul(&rhs.quantity()?)
    }
}

impl Div<&Quantity> for &Constant {
    type Output = UnitResult<Quantity>;

    fn div(self, rhs: &Quantity) -> Self::Output {
        self.checked_div(rhs)
    }
}

impl Div<&Constant> for &Quantity {
    type Output = UnitResult<Quantity>;

    fn div(self, rhs: &Constant) -> Self::Output {
        self.checked_div(&rhs.quantity()?)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let si = &self.realizations[0];
        writeln!(f, "  Name   = {}", self.name)?;
        writeln!(f, "  Value  = {:e}", si.value)?;
        writeln!(f, "  Uncertainty  = {:e}", self.uncertainty)?;
        writeln!(f, "  Unit  = {}", si.unit)?;
        write!(f, "  Reference = {}", self.reference)
    }
}
