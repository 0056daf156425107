// ============================================================================
// Quantity
// Immutable (magnitude, unit) pair with checked physical arithmetic
// ============================================================================

use super::dimension::Dimension;
use super::errors::{UnitError, UnitResult};
use super::physical_type::PhysicalType;
use super::unit::{Unit, UnitSystem};
use crate::engine::conversion::convert_magnitude;
use crate::engine::equivalency::Equivalency;
use crate::numeric::{Magnitude, NumericError, Rational, Tolerance};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A unit-tagged magnitude. Every operation returns a new quantity.
///
/// # Example
/// ```rust
/// use quantity_engine::prelude::*;
///
/// let m = Unit::parse("m")?;
/// let cm = Unit::parse("cm")?;
/// let total = (&(1.0 * &m) + &(25.0 * &cm))?;
/// assert_eq!(total, Quantity::new(1.25, m));
/// # Ok::<(), UnitError>(())
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantity {
    magnitude: Magnitude,
    unit: Unit,
}

impl Quantity {
    // ========================================================================
    // Construction
    // ========================================================================

    pub fn new(magnitude: impl Into<Magnitude>, unit: Unit) -> Self {
        Self {
            magnitude: magnitude.into(),
            unit,
        }
    }

    pub fn from_array(values: Vec<f64>, unit: Unit) -> Self {
        Self::new(Magnitude::from_vec(values), unit)
    }

    /// Dimensionless, unscaled quantity.
    pub fn dimensionless(magnitude: impl Into<Magnitude>) -> Self {
        Self::new(magnitude, Unit::dimensionless())
    }

    // ========================================================================
    // Projections
    // ========================================================================

    #[inline]
    pub fn value(&self) -> &Magnitude {
        &self.magnitude
    }

    #[inline]
    pub fn into_value(self) -> Magnitude {
        self.magnitude
    }

    /// The magnitude as a plain number, if it is a scalar.
    #[inline]
    pub fn scalar(&self) -> Option<f64> {
        self.magnitude.as_scalar()
    }

    #[inline]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    pub fn physical_type(&self) -> PhysicalType {
        PhysicalType::of(&self.unit)
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Direct rescale to a compatible unit.
    ///
    /// # Errors
    /// `IncompatibleUnits` when the dimension vectors differ. No
    /// equivalency is ever applied implicitly.
    pub fn to(&self, target: &Unit) -> UnitResult<Quantity> {
        self.to_with(target, &[])
    }

    /// Convert, trying the supplied equivalencies in order when the units are
    /// not directly compatible.
    pub fn to_with(&self, target: &Unit, equivalencies: &[Equivalency]) -> UnitResult<Quantity> {
        let magnitude = convert_magnitude(&self.magnitude, &self.unit, target, equivalencies)?;
        Ok(Quantity::new(magnitude, target.clone()))
    }

    /// Magnitude in `target`, without the unit.
    pub fn to_value(&self, target: &Unit) -> UnitResult<Magnitude> {
        convert_magnitude(&self.magnitude, &self.unit, target, &[])
    }

    /// Same quantity expressed in the base units of `system`.
    pub fn in_system(&self, system: UnitSystem) -> Quantity {
        let decomposed = self.unit.to_system(system);
        let factor = decomposed.factor();
        Quantity {
            magnitude: self.magnitude.map(|v| v * factor),
            unit: decomposed.without_factor(),
        }
    }

    pub fn si(&self) -> Quantity {
        self.in_system(UnitSystem::Si)
    }

    pub fn cgs(&self) -> Quantity {
        self.in_system(UnitSystem::Cgs)
    }

    pub fn decompose(&self) -> Quantity {
        self.in_system(UnitSystem::Si)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Add a compatible quantity; the result carries `self`'s unit.
    pub fn checked_add(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let other = rhs.to_value(&self.unit)?;
        let magnitude = self.magnitude.zip_with(&other, |a, b| a + b)?;
        Ok(Quantity::new(magnitude, self.unit.clone()))
    }

    pub fn checked_sub(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let other = rhs.to_value(&self.unit)?;
        let magnitude = self.magnitude.zip_with(&other, |a, b| a - b)?;
        Ok(Quantity::new(magnitude, self.unit.clone()))
    }

    /// Read a bare number as dimensionless-unscaled, expressed in `self`'s
    /// unit. Fails unless `self` is dimensionless.
    fn bare_number_in_unit(&self, number: f64) -> UnitResult<f64> {
        if !self.unit.is_dimensionless() {
            return Err(UnitError::incompatible(&Unit::dimensionless(), &self.unit));
        }
        Ok(number / self.unit.si_scale())
    }

    /// `self + number`; legal only for dimensionless quantities
    /// (`1 % + 1 = 101 %`).
    pub fn add_scalar(&self, number: f64) -> UnitResult<Quantity> {
        let n = self.bare_number_in_unit(number)?;
        Ok(self.map(|v| v + n))
    }

    pub fn sub_scalar(&self, number: f64) -> UnitResult<Quantity> {
        let n = self.bare_number_in_unit(number)?;
        Ok(self.map(|v| v - n))
    }

    /// `number - self`; legal only for dimensionless quantities.
    pub fn rsub_scalar(&self, number: f64) -> UnitResult<Quantity> {
        let n = self.bare_number_in_unit(number)?;
        Ok(self.map(|v| n - v))
    }

    pub fn checked_mul(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let magnitude = self.magnitude.zip_with(&rhs.magnitude, |a, b| a * b)?;
        Ok(Quantity::new(magnitude, self.unit.checked_mul(&rhs.unit)?))
    }

    pub fn checked_div(&self, rhs: &Quantity) -> UnitResult<Quantity> {
        let magnitude = self.magnitude.zip_with(&rhs.magnitude, |a, b| a / b)?;
        Ok(Quantity::new(magnitude, self.unit.checked_div(&rhs.unit)?))
    }

    pub fn mul_scalar(&self, factor: f64) -> Quantity {
        self.map(|v| v * factor)
    }

    pub fn div_scalar(&self, divisor: f64) -> Quantity {
        self.map(|v| v / divisor)
    }

    pub fn powi(&self, n: i32) -> Quantity {
        Quantity {
            magnitude: self.magnitude.map(|v| v.powi(n)),
            unit: self.unit.powi(n),
        }
    }

    /// # Panics
    /// On exponent overflow; `checked_pow` reports it instead.
    pub fn pow(&self, power: Rational) -> Quantity {
        self.checked_pow(power)
            .expect("Quantity exponent overflow")
    }

    pub fn checked_pow(&self, power: Rational) -> UnitResult<Quantity> {
        let unit = self.unit.checked_pow(power)?;
        let magnitude = if power.is_integer() {
            let n = power.numer();
            self.magnitude.map(|v| v.powi(n))
        } else {
            let p = power.to_f64();
            self.magnitude.map(|v| v.powf(p))
        };
        Ok(Quantity { magnitude, unit })
    }

    pub fn sqrt(&self) -> Quantity {
        Quantity {
            magnitude: self.magnitude.map(f64::sqrt),
            unit: self.unit.sqrt(),
        }
    }

    pub fn recip(&self) -> Quantity {
        Quantity {
            magnitude: self.magnitude.map(|v| 1.0 / v),
            unit: self.unit.recip(),
        }
    }

    pub fn abs(&self) -> Quantity {
        self.map(f64::abs)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Tolerant equality after converting `other` into `self`'s unit.
    /// Incompatible units or mismatched shapes compare unequal.
    pub fn approx_eq(&self, other: &Quantity, tolerance: Tolerance) -> bool {
        let Ok(theirs) = other.to_value(&self.unit) else {
            return false;
        };
        self.magnitude.all_close(&theirs, tolerance)
    }

    /// Ordering between compatible scalar quantities.
    ///
    /// # Errors
    /// `IncompatibleUnits` for different dimensions, `ShapeMismatch` when
    /// either side is an array, `Numeric(InvalidInput)` for NaN.
    pub fn checked_cmp(&self, other: &Quantity) -> UnitResult<Ordering> {
        let theirs = other.to_value(&self.unit)?;
        match (self.magnitude.as_scalar(), theirs.as_scalar()) {
            (Some(a), Some(b)) => a
                .partial_cmp(&b)
                .ok_or(UnitError::Numeric(NumericError::InvalidInput)),
            _ => Err(UnitError::ShapeMismatch {
                left: self.magnitude.shape().to_vec(),
                right: theirs.shape().to_vec(),
            }),
        }
    }

    // ========================================================================
    // Elementwise Access
    // ========================================================================

    /// Apply `f` to every element, keeping the unit.
    pub fn map<F>(&self, f: F) -> Quantity
    where
        F: Fn(f64) -> f64,
    {
        Quantity {
            magnitude: self.magnitude.map(f),
            unit: self.unit.clone(),
        }
    }

    pub fn get(&self, index: usize) -> Option<Quantity> {
        self.magnitude
            .get(index)
            .map(|v| Quantity::new(v, self.unit.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = Quantity> + '_ {
        self.magnitude
            .iter()
            .map(move |v| Quantity::new(v, self.unit.clone()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.magnitude.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.magnitude.is_empty()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.magnitude.shape()
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.magnitude.is_scalar()
    }

    pub fn sum(&self) -> Quantity {
        Quantity::new(self.magnitude.sum(), self.unit.clone())
    }

    pub fn mean(&self) -> Quantity {
        Quantity::new(self.magnitude.mean(), self.unit.clone())
    }

    pub fn min(&self) -> Option<Quantity> {
        self.magnitude
            .min()
            .map(|v| Quantity::new(v, self.unit.clone()))
    }

    pub fn max(&self) -> Option<Quantity> {
        self.magnitude
            .max()
            .map(|v| Quantity::new(v, self.unit.clone()))
    }
}

// ============================================================================
// Comparison Traits
// ============================================================================

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, Tolerance::DEFAULT)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.checked_cmp(other).ok()
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Add for &Quantity {
    type Output = UnitResult<Quantity>;

    fn add(self, rhs: &Quantity) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub for &Quantity {
    type Output = UnitResult<Quantity>;

    fn sub(self, rhs: &Quantity) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl Mul for &Quantity {
    type Output = UnitResult<Quantity>;

    fn mul(self, rhs: &Quantity) -> Self::Output {
        self.checked_mul(rhs)
    }
}

impl Div for &Quantity {
    type Output = UnitResult<Quantity>;

    fn div(self, rhs: &Quantity) -> Self::Output {
        self.checked_div(rhs)
    }
}

impl Add<&Quantity> for f64 {
    type Output = UnitResult<Quantity>;

    fn add(self, rhs: &Quantity) -> Self::Output {
        rhs.add_scalar(self)
    }
}

impl Sub<&Quantity> for f64 {
    type Output = UnitResult<Quantity>;

    fn sub(self, rhs: &Quantity) -> Self::Output {
        rhs.rsub_scalar(self)
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.mul_scalar(rhs)
    }
}

impl Mul<f64> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        self.mul_scalar(rhs)
    }
}

impl Mul<&Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        rhs.mul_scalar(self)
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        self.div_scalar(rhs)
    }
}

impl Mul<&Unit> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Unit) -> Quantity {
        Quantity {
            unit: &self.unit * rhs,
            magnitude: self.magnitude,
        }
    }
}

impl Div<&Unit> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Unit) -> Quantity {
        Quantity {
            unit: &self.unit / rhs,
            magnitude: self.magnitude,
        }
    }
}

impl Mul<&Unit> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: &Unit) -> Quantity {
        Quantity::new(self, rhs.clone())
    }
}

impl Mul<Unit> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Unit) -> Quantity {
        Quantity::new(self, rhs)
    }
}

impl Mul<&Unit> for Vec<f64> {
    type Output = Quantity;

    fn mul(self, rhs: &Unit) -> Quantity {
        Quantity::from_array(self, rhs.clone())
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.map(|v| -v)
    }
}

impl Neg for &Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.map(|v| -v)
    }
}

// ============================================================================
// Display and Parsing
// ============================================================================

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.magnitude, f)?;
        let unit = self.unit.to_string();
        if !unit.is_empty() {
            write!(f, " {}", unit)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Quantity {
    type Err = UnitError;

    /// Parse `"<number> <unit expression>"`, e.g. `"3.5 km / s"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_whitespace())
            .unwrap_or(s.len());
        let (number, rest) = s.split_at(split);
        let value: f64 = number
            .parse()
            .map_err(|_| UnitError::invalid_unit_string(s, "quantity must start with a number"))?;
        let unit = if rest.trim().is_empty() {
            Unit::dimensionless()
        } else {
            Unit::parse(rest)?
        };
        Ok(Quantity::new(value, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::equivalencies;
    use proptest::prelude::*;

    fn unit(s: &str) -> Unit {
        s.parse().unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        Tolerance::new(1e-9, 1e-12).is_close(a, b)
    }

    #[test]
    fn test_add_converts_to_left_unit() {
        let total = (&(1.0 * &unit("m")) + &(25.0 * &unit("cm"))).unwrap();
        assert!(close(total.scalar().unwrap(), 1.25));
        assert_eq!(total.unit().to_string(), "m");
    }

    #[test]
    fn test_add_incompatible() {
        let err = (&(3.0 * &unit("m")) + &(3.0 * &unit("s"))).unwrap_err();
        assert!(matches!(err, UnitError::IncompatibleUnits { .. }));
        assert_eq!(err.to_string(), "'s' (time) and 'm' (length) are not convertible");
    }

    #[test]
    fn test_affine_temperatures_need_equivalency() {
        let warm = 10.0 * &unit("deg_C");
        let kelvin = unit("K");

        assert!(matches!(
            warm.to(&kelvin),
            Err(UnitError::ZeroPointMismatch { .. })
        ));
        assert!(matches!(
            &warm + &(1.0 * &kelvin),
            Err(UnitError::ZeroPointMismatch { .. })
        ));
        assert!(matches!(
            &(1.0 * &kelvin) - &warm,
            Err(UnitError::ZeroPointMismatch { .. })
        ));

        let converted = warm
            .to_with(&kelvin, &[equivalencies::temperature()])
            .unwrap();
        assert!(close(converted.scalar().unwrap(), 283.15));
        assert_eq!(converted.unit(), &kelvin);

        let same_scale = (&warm + &(5.0 * &unit("deg_C"))).unwrap();
        assert!(close(same_scale.scalar().unwrap(), 15.0));
        assert_eq!(same_scale.unit().to_string(), "deg_C");
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        let huge = 1.0 * &unit("m2147483647");
        let metre = 1.0 * &unit("m");
        let overflow = UnitError::Numeric(NumericError::Overflow);

        assert_eq!((&huge * &metre).unwrap_err(), overflow);
        assert_eq!(huge.recip().checked_div(&metre).unwrap_err(), overflow);
        assert_eq!(
            huge.checked_pow(Rational::from_integer(2)).unwrap_err(),
            overflow
        );
        assert!((&huge / &metre).is_ok());
    }

    #[test]
    fn test_mul_div_units() {
        let d = 100.0 * &unit("km");
        let t = 2.0 * &unit("h");
        let v = (&d / &t).unwrap();
        assert_eq!(v.unit().to_string(), "km / h");
        assert!(close(v.scalar().unwrap(), 50.0));
        assert!(close(v.to(&unit("m / s")).unwrap().scalar().unwrap(), 50.0 / 3.6));

        let area = (&d * &d).unwrap();
        assert_eq!(area.unit().to_string(), "km2");
    }

    #[test]
    fn test_bare_number_dimensionless() {
        let pct = 1.0 * &unit("percent");
        let sum = pct.add_scalar(1.0).unwrap();
        assert!(close(sum.scalar().unwrap(), 101.0));
        assert_eq!(sum.unit().to_string(), "percent");

        let from_left = (2.0 + &(0.5 * &Unit::dimensionless())).unwrap();
        assert!(close(from_left.scalar().unwrap(), 2.5));

        let diff = (1.0 - &(25.0 * &unit("percent"))).unwrap();
        assert!(close(diff.scalar().unwrap(), 75.0));

        let err = (1.0 * &unit("m")).add_scalar(1.0).unwrap_err();
        assert!(matches!(err, UnitError::IncompatibleUnits { .. }));
    }

    #[test]
    fn test_to_and_errors() {
        let q = 1.0 * &unit("eV");
        assert!(matches!(
            q.to(&unit("K")),
            Err(UnitError::IncompatibleUnits { .. })
        ));
        let k = q
            .to_with(&unit("K"), &[equivalencies::temperature_energy()])
            .unwrap();
        assert!((k.scalar().unwrap() - 11604.518).abs() < 1e-3);
    }

    #[test]
    fn test_si_cgs_decompose() {
        let e = 1.0 * &unit("kJ");
        let si = e.si();
        assert_eq!(si.unit().to_string(), "kg m2 / s2");
        assert!(close(si.scalar().unwrap(), 1000.0));

        let cgs = e.cgs();
        assert_eq!(cgs.unit().to_string(), "g cm2 / s2");
        assert!(close(cgs.scalar().unwrap(), 1e10));

        let km = 3.0 * &unit("km");
        assert!(close(km.decompose().scalar().unwrap(), 3000.0));
    }

    #[test]
    fn test_pow_matches_self_product() {
        let q = 3.0 * &unit("m / s");
        let squared = q.powi(2);
        let product = (&q * &q).unwrap();
        assert_eq!(squared, product);
        assert_eq!(squared.unit(), product.unit());
        assert_eq!(squared.unit().to_string(), "m2 / s2");
        assert_eq!(q.sqrt().unit().to_string(), "m(1/2) / s(1/2)");
    }

    #[test]
    fn test_arrays_and_shape_mismatch() {
        let xs = vec![1.0, 2.0, 3.0] * &unit("m");
        assert_eq!(xs.len(), 3);
        assert_eq!(xs.shape(), &[3]);
        let doubled = (&xs * &(2.0 * &Unit::dimensionless())).unwrap();
        assert_eq!(doubled.value().as_slice(), &[2.0, 4.0, 6.0]);

        let ys = vec![1.0, 2.0] * &unit("s");
        let err = (&xs / &ys).unwrap_err();
        assert_eq!(
            err,
            UnitError::ShapeMismatch {
                left: vec![3],
                right: vec![2]
            }
        );
    }

    #[test]
    fn test_reductions_and_access() {
        let xs = vec![3.0, -1.0, 4.0] * &unit("km");
        assert!(close(xs.sum().scalar().unwrap(), 6.0));
        assert!(close(xs.mean().scalar().unwrap(), 2.0));
        assert_eq!(xs.min().unwrap().scalar(), Some(-1.0));
        assert_eq!(xs.max().unwrap().scalar(), Some(4.0));
        assert_eq!(xs.get(2).unwrap().to_string(), "4 km");
        assert!(xs.get(3).is_none());
        assert_eq!(xs.iter().count(), 3);
        assert_eq!(xs.abs().value().as_slice(), &[3.0, 1.0, 4.0]);
    }

    #[test]
    fn test_comparison() {
        let a = 1.0 * &unit("km");
        let b = 999.0 * &unit("m");
        assert_eq!(a.checked_cmp(&b).unwrap(), Ordering::Greater);
        assert!(b < a);
        assert_eq!(a, 1000.0 * &unit("m"));
        assert!(a.checked_cmp(&(1.0 * &unit("s"))).is_err());
        assert!(a.partial_cmp(&(1.0 * &unit("s"))).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!((3.0 * &unit("km / s")).to_string(), "3 km / s");
        assert_eq!(format!("{:.2}", 1.23456 * &unit("m")), "1.23 m");
        assert_eq!(Quantity::dimensionless(2.0).to_string(), "2");
        assert_eq!(-(2.0 * &unit("s")), -2.0 * &unit("s"));
    }

    #[test]
    fn test_parse() {
        let q: Quantity = "3.5 km / s".parse().unwrap();
        assert_eq!(q.scalar(), Some(3.5));
        assert_eq!(q.unit().to_string(), "km / s");
        assert!("fast km".parse::<Quantity>().is_err());
        let bare: Quantity = "12".parse().unwrap();
        assert!(bare.is_dimensionless());
    }

    proptest! {
        #[test]
        fn round_trip_compatible_units(value in -1e9f64..1e9, pair in 0usize..4) {
            let (a, b) = [("m", "pc"), ("km / s", "au / yr"), ("J", "eV"), ("g", "solMass")][pair];
            let q = value * &unit(a);
            let back = q.to(&unit(b)).unwrap().to(&unit(a)).unwrap();
            prop_assert!(Tolerance::new(1e-9, 1e-9).is_close(back.scalar().unwrap(), value));
        }

        #[test]
        fn product_dimension_is_sum(i in 0usize..6, j in 0usize..6) {
            let names = ["m", "kg", "s", "A", "K / s", "J"];
            let a = unit(names[i]);
            let b = unit(names[j]);
            let prod = (&(1.0 * &a) * &(1.0 * &b)).unwrap();
            prop_assert_eq!(prod.dimension(), a.dimension() * b.dimension());
        }
    }
}
