// ============================================================================
// Physical Types
// Named classification of dimension vectors
// ============================================================================

use super::dimension::Dimension;
use super::errors::{UnitError, UnitResult};
use super::unit::{Unit, UnitSystem};
use crate::numeric::Rational;
use crate::registry::physical_types::normalize_name as normalize;
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Div, Mul};

/// A dimension vector together with the names registered for it.
///
/// Unregistered vectors still classify: they get an anonymous type whose
/// `name()` is `"unknown"`.
#[derive(Debug, Clone)]
pub struct PhysicalType {
    dimension: Dimension,
    names: SmallVec<[&'static str; 4]>,
}

impl PhysicalType {
    pub(crate) fn new(dimension: Dimension, names: &[&'static str]) -> Self {
        Self {
            dimension,
            names: names.iter().copied().collect(),
        }
    }

    /// Classify a unit by its dimension vector.
    pub fn of(unit: &Unit) -> Self {
        Self::from_dimension(unit.dimension())
    }

    pub fn from_dimension(dimension: Dimension) -> Self {
        crate::registry::physical_types::lookup_dimension(&dimension)
            .cloned()
            .unwrap_or_else(|| Self::new(dimension, &[]))
    }

    /// Look a type up by any of its names. Case-insensitive; `_` and space
    /// are interchangeable.
    pub fn lookup_by_name(name: &str) -> UnitResult<Self> {
        crate::registry::physical_types::lookup_name(name)
            .cloned()
            .ok_or_else(|| UnitError::UnknownPhysicalType(name.to_string()))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[inline]
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Primary name, or `"unknown"` for an unregistered vector.
    pub fn name(&self) -> &'static str {
        self.names.first().copied().unwrap_or("unknown")
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.names.is_empty()
    }

    /// Text used in error messages: the single name, the name set, or
    /// `"unknown"`.
    pub fn describe(&self) -> String {
        if self.is_unknown() {
            "unknown".to_string()
        } else {
            self.to_string()
        }
    }

    /// Coherent SI unit of this type (`kg m2 / s2` for energy).
    pub fn si_unit(&self) -> Unit {
        crate::registry::base_units_for(&self.dimension, UnitSystem::Si)
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    pub fn pow(&self, power: Rational) -> PhysicalType {
        Self::from_dimension(self.dimension.pow(power))
    }

    pub fn powi(&self, n: i32) -> PhysicalType {
        Self::from_dimension(self.dimension.powi(n))
    }
}

impl PartialEq for PhysicalType {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
    }
}

impl PartialEq<str> for PhysicalType {
    fn eq(&self, other: &str) -> bool {
        let wanted = normalize(other);
        self.names.iter().any(|n| normalize(n) == wanted)
    }
}

impl PartialEq<&str> for PhysicalType {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Mul<&PhysicalType> for &PhysicalType {
    type Output = PhysicalType;

    fn mul(self, rhs: &PhysicalType) -> PhysicalType {
        PhysicalType::from_dimension(self.dimension * rhs.dimension)
    }
}

impl Mul for PhysicalType {
    type Output = PhysicalType;

    fn mul(self, rhs: PhysicalType) -> PhysicalType {
        &self * &rhs
    }
}

impl Div<&PhysicalType> for &PhysicalType {
    type Output = PhysicalType;

    fn div(self, rhs: &PhysicalType) -> PhysicalType {
        PhysicalType::from_dimension(self.dimension / rhs.dimension)
    }
}

impl Div for PhysicalType {
    type Output = PhysicalType;

    fn div(self, rhs: PhysicalType) -> PhysicalType {
        &self / &rhs
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.names.as_slice() {
            [] => write!(f, "{}", self.si_unit()),
            [single] => f.write_str(single),
            many => {
                let mut sorted: Vec<&str> = many.to_vec();
                sorted.sort_unstable();
                let quoted: Vec<String> = sorted.iter().map(|n| format!("'{}'", n)).collect();
                write!(f, "{{{}}}", quoted.join(", "))
            },
        }
    }
}

/// Classify a unit; shorthand for `PhysicalType::of`.
pub fn classify(unit: &Unit) -> PhysicalType {
    PhysicalType::of(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(s: &str) -> Unit {
        s.parse().unwrap()
    }

    #[test]
    fn test_classify_simple() {
        assert_eq!(classify(&unit("m")).name(), "length");
        assert_eq!(classify(&unit("s")).name(), "time");
        assert!(classify(&unit("km / h")) == "speed");
        assert!(classify(&unit("km / h")) == "velocity");
    }

    #[test]
    fn test_classify_shared_vector() {
        let diffusivity = classify(&unit("m2 / s"));
        assert!(diffusivity.names().contains(&"diffusivity"));
        assert!(diffusivity == "kinematic viscosity");

        let pressure = classify(&unit("Pa"));
        assert!(pressure == "pressure");
        assert!(pressure == "energy density");
        assert!(pressure == "stress");
    }

    #[test]
    fn test_unknown_type() {
        let odd = classify(&unit("m / kg6"));
        assert!(odd.is_unknown());
        assert_eq!(odd.name(), "unknown");
        assert_eq!(odd.describe(), "unknown");
        assert_eq!(odd.to_string(), "m / kg6");
    }

    #[test]
    fn test_esu_charge() {
        let charge = classify(&unit("statC"));
        assert!(charge == "electrical charge (ESU)");
    }

    #[test]
    fn test_lookup_by_name() {
        let speed = PhysicalType::lookup_by_name("Speed").unwrap();
        assert_eq!(speed.dimension(), Dimension::VELOCITY);
        let visc = PhysicalType::lookup_by_name("kinematic_viscosity").unwrap();
        assert_eq!(visc.dimension(), Dimension::AREA / Dimension::TIME);
        assert_eq!(
            PhysicalType::lookup_by_name("flux capacitance").unwrap_err(),
            UnitError::UnknownPhysicalType("flux capacitance".to_string())
        );
    }

    #[test]
    fn test_algebra_reresolves_names() {
        let length = PhysicalType::lookup_by_name("length").unwrap();
        let time = PhysicalType::lookup_by_name("time").unwrap();
        assert!(&length / &time == "speed");
        assert!(length.powi(2) == "area");
        assert!((&length * &length).pow(Rational::new(3, 2).unwrap()) == "volume");
    }

    #[test]
    fn test_display_multiple_names() {
        let energy = classify(&unit("J"));
        assert_eq!(energy.to_string(), "{'energy', 'torque', 'work'}");
        assert_eq!(classify(&unit("m")).to_string(), "length");
    }

    #[test]
    fn test_si_unit() {
        let energy = PhysicalType::lookup_by_name("energy").unwrap();
        assert_eq!(energy.si_unit().to_string(), "kg m2 / s2");
    }
}
