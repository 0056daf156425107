// ============================================================================
// Dimension Vector
// Rational exponents over the eight base quantities
// ============================================================================

use crate::numeric::{NumericResult, Rational};
use std::fmt;
use std::ops::{Div, Mul};

/// The fixed basis every dimension vector is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    LuminousIntensity,
    Angle,
}

impl BaseDimension {
    pub const COUNT: usize = 8;

    pub const ALL: [BaseDimension; Self::COUNT] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::LuminousIntensity,
        BaseDimension::Angle,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short symbol used when printing a dimension vector.
    pub const fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "L",
            BaseDimension::Mass => "M",
            BaseDimension::Time => "T",
            BaseDimension::Current => "I",
            BaseDimension::Temperature => "Θ",
            BaseDimension::Amount => "N",
            BaseDimension::LuminousIntensity => "J",
            BaseDimension::Angle => "A",
        }
    }
}

/// Immutable vector of rational exponents, one per `BaseDimension`.
///
/// Two units are compatible exactly when their dimension vectors are equal.
///
/// - Velocity = L T⁻¹
/// - Energy = M L² T⁻²
/// - Charge (ESU) = M^(1/2) L^(3/2) T⁻¹
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    exponents: [Rational; BaseDimension::COUNT],
}

impl Dimension {
    // ==========================================================================
    // Base Dimensions
    // ==========================================================================

    pub const DIMENSIONLESS: Self = Self::from_integers([0, 0, 0, 0, 0, 0, 0, 0]);
    pub const LENGTH: Self = Self::from_integers([1, 0, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Self = Self::from_integers([0, 1, 0, 0, 0, 0, 0, 0]);
    pub const TIME: Self = Self::from_integers([0, 0, 1, 0, 0, 0, 0, 0]);
    pub const CURRENT: Self = Self::from_integers([0, 0, 0, 1, 0, 0, 0, 0]);
    pub const TEMPERATURE: Self = Self::from_integers([0, 0, 0, 0, 1, 0, 0, 0]);
    pub const AMOUNT: Self = Self::from_integers([0, 0, 0, 0, 0, 1, 0, 0]);
    pub const LUMINOUS_INTENSITY: Self = Self::from_integers([0, 0, 0, 0, 0, 0, 1, 0]);
    pub const ANGLE: Self = Self::from_integers([0, 0, 0, 0, 0, 0, 0, 1]);

    // ==========================================================================
    // Common Derived Dimensions
    // ==========================================================================

    pub const AREA: Self = Self::from_integers([2, 0, 0, 0, 0, 0, 0, 0]);
    pub const VOLUME: Self = Self::from_integers([3, 0, 0, 0, 0, 0, 0, 0]);
    pub const FREQUENCY: Self = Self::from_integers([0, 0, -1, 0, 0, 0, 0, 0]);
    pub const VELOCITY: Self = Self::from_integers([1, 0, -1, 0, 0, 0, 0, 0]);
    pub const ACCELERATION: Self = Self::from_integers([1, 0, -2, 0, 0, 0, 0, 0]);
    pub const FORCE: Self = Self::from_integers([1, 1, -2, 0, 0, 0, 0, 0]);
    pub const ENERGY: Self = Self::from_integers([2, 1, -2, 0, 0, 0, 0, 0]);
    pub const POWER: Self = Self::from_integers([2, 1, -3, 0, 0, 0, 0, 0]);
    pub const PRESSURE: Self = Self::from_integers([-1, 1, -2, 0, 0, 0, 0, 0]);
    pub const CHARGE: Self = Self::from_integers([0, 0, 1, 1, 0, 0, 0, 0]);
    pub const MAGNETIC_FLUX_DENSITY: Self = Self::from_integers([0, 1, -2, -1, 0, 0, 0, 0]);
    pub const NUMBER_DENSITY: Self = Self::from_integers([-3, 0, 0, 0, 0, 0, 0, 0]);

    // ==========================================================================
    // Construction
    // ==========================================================================

    /// Build from integer exponents in `BaseDimension::ALL` order.
    pub const fn from_integers(exps: [i32; BaseDimension::COUNT]) -> Self {
        let mut exponents = [Rational::ZERO; BaseDimension::COUNT];
        let mut i = 0;
        while i < BaseDimension::COUNT {
            exponents[i] = Rational::from_integer(exps[i]);
            i += 1;
        }
        Self { exponents }
    }

    pub const fn from_exponents(exponents: [Rational; BaseDimension::COUNT]) -> Self {
        Self { exponents }
    }

    /// Single base dimension raised to the first power.
    pub const fn base(base: BaseDimension) -> Self {
        let mut exponents = [Rational::ZERO; BaseDimension::COUNT];
        exponents[base.index()] = Rational::ONE;
        Self { exponents }
    }

    // ==========================================================================
    // Accessors
    // ==========================================================================

    #[inline]
    pub fn exponent(&self, base: BaseDimension) -> Rational {
        self.exponents[base.index()]
    }

    #[inline]
    pub fn exponents(&self) -> &[Rational; BaseDimension::COUNT] {
        &self.exponents
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|e| e.is_zero())
    }

    /// Base dimensions with a non-zero exponent, in basis order.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (BaseDimension, Rational)> + '_ {
        BaseDimension::ALL
            .iter()
            .map(move |b| (*b, self.exponents[b.index()]))
            .filter(|(_, e)| !e.is_zero())
    }

    // ==========================================================================
    // Operations
    // ==========================================================================

    /// Multiply dimensions (add exponents).
    pub fn checked_mul(&self, other: &Dimension) -> NumericResult<Dimension> {
        let mut exponents = self.exponents;
        for (e, o) in exponents.iter_mut().zip(other.exponents.iter()) {
            *e = e.checked_add(*o)?;
        }
        Ok(Dimension { exponents })
    }

    /// Divide dimensions (subtract exponents).
    pub fn checked_div(&self, other: &Dimension) -> NumericResult<Dimension> {
        let mut exponents = self.exponents;
        for (e, o) in exponents.iter_mut().zip(other.exponents.iter()) {
            *e = e.checked_sub(*o)?;
        }
        Ok(Dimension { exponents })
    }

    /// Raise to a rational power (scale every exponent).
    pub fn checked_pow(&self, power: Rational) -> NumericResult<Dimension> {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = e.checked_mul(power)?;
        }
        Ok(Dimension { exponents })
    }

    pub fn pow(&self, power: Rational) -> Dimension {
        self.checked_pow(power)
            .expect("Dimension exponent overflow")
    }

    pub fn powi(&self, n: i32) -> Dimension {
        self.pow(Rational::from_integer(n))
    }

    /// Negate all exponents.
    pub fn checked_recip(&self) -> NumericResult<Dimension> {
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = e.checked_neg()?;
        }
        Ok(Dimension { exponents })
    }

    pub fn recip(&self) -> Dimension {
        self.checked_recip().expect("Dimension exponent overflow")
    }

    /// Halve all exponents; always defined with rational exponents.
    pub fn sqrt(&self) -> Dimension {
        self.pow(Rational::HALF)
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        self.checked_mul(&rhs).expect("Dimension exponent overflow")
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        self.checked_div(&rhs).expect("Dimension exponent overflow")
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Debug for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dimension({})", self)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }

        let mut num: Vec<String> = Vec::new();
        let mut den: Vec<String> = Vec::new();

        for (base, exp) in self.iter_nonzero() {
            let target = if exp.is_positive() { &mut num } else { &mut den };
            let exp = exp.abs();
            if exp == Rational::ONE {
                target.push(base.symbol().to_string());
            } else if exp.is_integer() {
                target.push(format!("{}{}", base.symbol(), superscript(exp.numer())));
            } else {
                target.push(format!("{}^({})", base.symbol(), exp));
            }
        }

        let num_str = if num.is_empty() {
            "1".to_string()
        } else {
            num.join(" ")
        };

        if den.is_empty() {
            write!(f, "{}", num_str)
        } else {
            write!(f, "{} / {}", num_str, den.join(" "))
        }
    }
}

/// Convert integer to superscript string
fn superscript(n: i32) -> String {
    let mut result = String::new();
    if n < 0 {
        result.push('⁻');
    }
    for d in n.unsigned_abs().to_string().chars() {
        result.push(match d {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            _ => d,
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;

    #[test]
    fn test_dimension_mul() {
        let force = Dimension::MASS * Dimension::ACCELERATION;
        assert_eq!(force, Dimension::FORCE);
    }

    #[test]
    fn test_dimension_div() {
        let velocity = Dimension::LENGTH / Dimension::TIME;
        assert_eq!(velocity, Dimension::VELOCITY);
        assert_eq!(Dimension::LENGTH / Dimension::LENGTH, Dimension::DIMENSIONLESS);
    }

    #[test]
    fn test_pow_and_sqrt() {
        assert_eq!(Dimension::LENGTH.powi(2), Dimension::AREA);
        assert_eq!(Dimension::AREA.sqrt(), Dimension::LENGTH);
        let root_length = Dimension::LENGTH.sqrt();
        assert_eq!(root_length.exponent(BaseDimension::Length), Rational::HALF);
        assert_eq!(root_length.powi(2), Dimension::LENGTH);
    }

    #[test]
    fn test_base_constructor() {
        for base in BaseDimension::ALL {
            let d = Dimension::base(base);
            assert_eq!(d.exponent(base), Rational::ONE);
            assert_eq!(d.iter_nonzero().count(), 1);
        }
        assert_eq!(Dimension::base(BaseDimension::Angle), Dimension::ANGLE);
    }

    #[test]
    fn test_checked_algebra_reports_overflow() {
        let huge = Dimension::LENGTH.pow(Rational::from_integer(i32::MAX));
        assert_eq!(huge.checked_mul(&Dimension::LENGTH), Err(NumericError::Overflow));
        assert_eq!(
            huge.recip().checked_div(&Dimension::LENGTH),
            Err(NumericError::Overflow)
        );
        assert_eq!(huge.checked_pow(Rational::from_integer(2)), Err(NumericError::Overflow));
        assert_eq!(huge.checked_div(&huge), Ok(Dimension::DIMENSIONLESS));
    }

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(Dimension::default().is_dimensionless());
        assert!(!Dimension::ANGLE.is_dimensionless());
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "1");
        assert_eq!(Dimension::VELOCITY.to_string(), "L / T");
        assert_eq!(Dimension::FORCE.to_string(), "L M / T²");
        assert_eq!(Dimension::FREQUENCY.to_string(), "1 / T");
        let esu = Dimension::MASS.sqrt() * Dimension::LENGTH.pow(Rational::new(3, 2).unwrap())
            / Dimension::TIME;
        assert_eq!(esu.to_string(), "L^(3/2) M^(1/2) / T");
    }
}
