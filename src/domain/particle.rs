// ============================================================================
// Particles
// Rest mass and charge number for the species used by the formulary
// ============================================================================

use super::errors::{UnitError, UnitResult};
use super::quantity::Quantity;
use super::unit::Unit;
use crate::registry::constants::{
    ALPHA_MASS, DEUTERON_MASS, ELECTRON_MASS, ELEMENTARY_CHARGE, NEUTRON_MASS, PROTON_MASS,
    TRITON_MASS,
};
use std::fmt;

/// A charged or neutral particle species.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    symbol: String,
    name: String,
    mass_kg: f64,
    charge_number: i32,
}

impl Particle {
    fn species(symbol: &str, name: &str, mass_kg: f64, charge_number: i32) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            mass_kg,
            charge_number,
        }
    }

    pub fn electron() -> Self {
        Self::species("e-", "electron", ELECTRON_MASS, -1)
    }

    pub fn positron() -> Self {
        Self::species("e+", "positron", ELECTRON_MASS, 1)
    }

    pub fn proton() -> Self {
        Self::species("p+", "proton", PROTON_MASS, 1)
    }

    pub fn neutron() -> Self {
        Self::species("n", "neutron", NEUTRON_MASS, 0)
    }

    pub fn deuteron() -> Self {
        Self::species("D 1+", "deuteron", DEUTERON_MASS, 1)
    }

    pub fn triton() -> Self {
        Self::species("T 1+", "triton", TRITON_MASS, 1)
    }

    pub fn alpha() -> Self {
        Self::species("He-4 2+", "alpha", ALPHA_MASS, 2)
    }

    /// Custom ion with an explicit mass (any mass unit) and charge number.
    ///
    /// # Errors
    /// `IncompatibleUnits` if `mass` is not a mass; `InvalidConfig` if it is
    /// not a positive scalar.
    pub fn ion(symbol: &str, mass: &Quantity, charge_number: i32) -> UnitResult<Self> {
        let kg = crate::registry::unit("kg")?;
        let mass_kg = mass
            .to(&kg)?
            .scalar()
            .filter(|m| *m > 0.0 && m.is_finite())
            .ok_or_else(|| {
                UnitError::InvalidConfig(format!("ion '{}' needs a positive scalar mass", symbol))
            })?;
        Ok(Self::species(symbol, symbol, mass_kg, charge_number))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn charge_number(&self) -> i32 {
        self.charge_number
    }

    #[inline]
    pub fn is_charged(&self) -> bool {
        self.charge_number != 0
    }

    /// Rest mass in kg.
    pub fn mass(&self) -> Quantity {
        Quantity::new(self.mass_kg, kilogram())
    }

    /// Electric charge in coulomb.
    pub fn charge(&self) -> Quantity {
        Quantity::new(
            self.charge_number as f64 * ELEMENTARY_CHARGE,
            crate::registry::named("C"),
        )
    }
}

fn kilogram() -> Unit {
    crate::registry::named("kg")
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl std::str::FromStr for Particle {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "e-" | "e" | "electron" => Ok(Particle::electron()),
            "e+" | "positron" => Ok(Particle::positron()),
            "p+" | "p" | "H+" | "H 1+" | "proton" => Ok(Particle::proton()),
            "n" | "neutron" => Ok(Particle::neutron()),
            "D+" | "d+" | "D 1+" | "deuteron" => Ok(Particle::deuteron()),
            "T+" | "t+" | "T 1+" | "triton" => Ok(Particle::triton()),
            "alpha" | "He-4 2+" | "He-4++" => Ok(Particle::alpha()),
            other => Err(UnitError::UnknownParticle(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_species() {
        let e = Particle::electron();
        assert_eq!(e.charge_number(), -1);
        assert_eq!(e.mass().scalar(), Some(9.1093837015e-31));
        assert_eq!(e.mass().unit().to_string(), "kg");
        assert_eq!(e.charge().scalar(), Some(-1.602176634e-19));

        assert!(!Particle::neutron().is_charged());
        assert_eq!(Particle::alpha().charge_number(), 2);
        assert!(Particle::deuteron().mass().scalar() > Particle::proton().mass().scalar());
    }

    #[test]
    fn test_parse() {
        assert_eq!("p+".parse::<Particle>().unwrap(), Particle::proton());
        assert_eq!("e-".parse::<Particle>().unwrap().name(), "electron");
        assert_eq!("alpha".parse::<Particle>().unwrap().symbol(), "He-4 2+");
        assert_eq!(
            "muon".parse::<Particle>().unwrap_err(),
            UnitError::UnknownParticle("muon".to_string())
        );
    }

    #[test]
    fn test_custom_ion() {
        let mass = Quantity::new(39.948, "u".parse().unwrap());
        let argon = Particle::ion("Ar 1+", &mass, 1).unwrap();
        assert!((argon.mass().scalar().unwrap() - 6.6335e-26).abs() < 1e-29);

        let bad = Quantity::new(1.0, "m".parse().unwrap());
        assert!(matches!(
            Particle::ion("X", &bad, 1),
            Err(UnitError::IncompatibleUnits { .. })
        ));
        let negative = Quantity::new(-1.0, "kg".parse().unwrap());
        assert!(matches!(
            Particle::ion("X", &negative, 1),
            Err(UnitError::InvalidConfig(_))
        ));
    }
}
