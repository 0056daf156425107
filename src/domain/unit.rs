// ============================================================================
// Units
// Named units and their products under rational powers
// ============================================================================

use super::dimension::{BaseDimension, Dimension};
use crate::numeric::{NumericResult, Rational};
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Div, Mul};
use std::sync::Arc;

/// Relative tolerance used when comparing unit scale factors.
pub const SCALE_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Unit System
// ============================================================================

/// Systems a unit can be decomposed into, or a constant realised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    /// kg, m, s, A, K, mol, cd, rad
    Si,
    /// g, cm, s, Bi, K, mol, cd, rad
    Cgs,
    /// Gaussian electromagnetic units; decomposes like CGS
    Gauss,
}

impl UnitSystem {
    /// Order in which base units are listed in a decomposed unit.
    pub const BASE_ORDER: [BaseDimension; BaseDimension::COUNT] = [
        BaseDimension::Mass,
        BaseDimension::Length,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::LuminousIntensity,
        BaseDimension::Angle,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Si => "si",
            UnitSystem::Cgs => "cgs",
            UnitSystem::Gauss => "gauss",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = super::errors::UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "si" => Ok(UnitSystem::Si),
            "cgs" => Ok(UnitSystem::Cgs),
            "gauss" | "gaussian" | "esu" => Ok(UnitSystem::Gauss),
            other => Err(super::errors::UnitError::InvalidConfig(format!(
                "unknown unit system '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// Named Unit
// ============================================================================

/// A registered unit: symbol, long name, SI scale and dimension.
///
/// Affine units (`deg_C`, `deg_F`) carry a zero-point offset expressed in
/// kelvin: `kelvin = value * scale + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedUnit {
    symbol: String,
    name: String,
    scale: f64,
    dimension: Dimension,
    offset: f64,
    prefixable: bool,
}

impl NamedUnit {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        scale: f64,
        dimension: Dimension,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            scale,
            dimension,
            offset: 0.0,
            prefixable: false,
        }
    }

    /// Builder method: Set the zero-point offset (in kelvin-equivalent SI)
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Builder method: Allow SI prefixes on this unit
    pub fn with_prefixes(mut self) -> Self {
        self.prefixable = true;
        self
    }

    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn is_affine(&self) -> bool {
        self.offset != 0.0
    }

    #[inline]
    pub fn is_prefixable(&self) -> bool {
        self.prefixable
    }
}

// ============================================================================
// Unit Term
// ============================================================================

/// One factor of a composite unit: a named unit raised to a rational power.
#[derive(Debug, Clone)]
pub struct UnitTerm {
    unit: Arc<NamedUnit>,
    power: Rational,
}

impl UnitTerm {
    pub fn new(unit: Arc<NamedUnit>, power: Rational) -> Self {
        Self { unit, power }
    }

    #[inline]
    pub fn unit(&self) -> &NamedUnit {
        &self.unit
    }

    #[inline]
    pub fn power(&self) -> Rational {
        self.power
    }
}

// ============================================================================
// Unit
// ============================================================================

/// Numeric prefactor times a product of named units raised to rational
/// powers. Immutable; algebra returns new units.
///
/// The dimension is computed with checked exponent arithmetic whenever a
/// unit is built, so exponent overflow surfaces from `checked_*` and the
/// parser as `NumericError::Overflow` rather than later.
///
/// # Example
/// ```rust
/// use quantity_engine::domain::{Unit, UnitError};
///
/// let speed: Unit = "km / s".parse()?;
/// assert_eq!(speed.si_scale(), 1000.0);
/// assert_eq!(speed.to_string(), "km / s");
///
/// let huge: Unit = "m2147483647".parse()?;
/// assert!(huge.checked_mul(&"m".parse()?).is_err());
/// # Ok::<(), UnitError>(())
/// ```
#[derive(Clone)]
pub struct Unit {
    factor: f64,
    terms: SmallVec<[UnitTerm; 4]>,
    dimension: Dimension,
}

impl Unit {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Dimensionless, unscaled unit (prints as the empty string).
    pub fn dimensionless() -> Self {
        Self::scaled(1.0)
    }

    /// Dimensionless unit with a numeric scale factor.
    pub fn scaled(factor: f64) -> Self {
        Self {
            factor,
            terms: SmallVec::new(),
            dimension: Dimension::DIMENSIONLESS,
        }
    }

    pub fn from_named(unit: Arc<NamedUnit>) -> Self {
        let dimension = unit.dimension;
        let mut terms = SmallVec::new();
        terms.push(UnitTerm::new(unit, Rational::ONE));
        Self {
            factor: 1.0,
            terms,
            dimension,
        }
    }

    /// Product of `terms` scaled by `factor`.
    ///
    /// # Errors
    /// `Overflow` if merging the term powers leaves the i32 range.
    pub fn checked_from_parts(
        factor: f64,
        terms: impl IntoIterator<Item = UnitTerm>,
    ) -> NumericResult<Self> {
        let mut unit = Self::scaled(factor);
        for term in terms {
            unit.push_term(term.unit, term.power)?;
        }
        Ok(unit)
    }

    /// Parse a unit expression such as `"kg m-3"` or `"J / (kg K)"`.
    pub fn parse(input: &str) -> super::errors::UnitResult<Self> {
        crate::registry::parse_unit(input)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[inline]
    pub fn terms(&self) -> &[UnitTerm] {
        &self.terms
    }

    /// Sum of term dimensions weighted by their powers.
    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Multiplier taking a value in this unit to the coherent SI unit of
    /// the same dimension.
    pub fn si_scale(&self) -> f64 {
        self.terms
            .iter()
            .fold(self.factor, |acc, t| acc * t.unit.scale.powf(t.power.to_f64()))
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension().is_dimensionless()
    }

    /// Dimensionless with no terms and scale 1.
    pub fn is_unity(&self) -> bool {
        self.terms.is_empty() && self.factor == 1.0
    }

    /// Same dimension vector, regardless of scale or offset.
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension() == other.dimension()
    }

    /// Zero-point offset, present only for a lone affine unit at power one.
    pub fn affine_offset(&self) -> Option<f64> {
        match self.terms.as_slice() {
            [term] if self.factor == 1.0 && term.power == Rational::ONE && term.unit.is_affine() => {
                Some(term.unit.offset)
            },
            _ => None,
        }
    }

    #[inline]
    pub fn is_affine(&self) -> bool {
        self.affine_offset().is_some()
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    /// Multiply in `unit^power`, merging with an existing term of the same
    /// symbol. Leaves `self` untouched on overflow.
    fn push_term(&mut self, unit: Arc<NamedUnit>, power: Rational) -> NumericResult<()> {
        if power.is_zero() {
            return Ok(());
        }
        let dimension = self
            .dimension
            .checked_mul(&unit.dimension.checked_pow(power)?)?;
        match self
            .terms
            .iter()
            .position(|t| t.unit.symbol == unit.symbol)
        {
            Some(pos) => {
                let merged = self.terms[pos].power.checked_add(power)?;
                if merged.is_zero() {
                    self.terms.remove(pos);
                } else {
                    self.terms[pos].power = merged;
                }
            },
            None => self.terms.push(UnitTerm::new(unit, power)),
        }
        self.dimension = dimension;
        Ok(())
    }

    /// Product of two units.
    ///
    /// # Errors
    /// `Overflow` if a merged exponent leaves the i32 range.
    pub fn checked_mul(&self, rhs: &Unit) -> NumericResult<Unit> {
        let mut out = self.clone();
        out.factor *= rhs.factor;
        for t in &rhs.terms {
            out.push_term(t.unit.clone(), t.power)?;
        }
        Ok(out)
    }

    /// Quotient of two units.
    pub fn checked_div(&self, rhs: &Unit) -> NumericResult<Unit> {
        let mut out = self.clone();
        out.factor /= rhs.factor;
        for t in &rhs.terms {
            out.push_term(t.unit.clone(), t.power.checked_neg()?)?;
        }
        Ok(out)
    }

    pub fn checked_pow(&self, power: Rational) -> NumericResult<Unit> {
        let mut terms: SmallVec<[UnitTerm; 4]> = SmallVec::new();
        if !power.is_zero() {
            for t in &self.terms {
                terms.push(UnitTerm::new(t.unit.clone(), t.power.checked_mul(power)?));
            }
        }
        Ok(Unit {
            factor: self.factor.powf(power.to_f64()),
            terms,
            dimension: self.dimension.checked_pow(power)?,
        })
    }

    /// Raise to a rational power: dimension scales by `power`, scale factor
    /// is exponentiated.
    ///
    /// # Panics
    /// On exponent overflow; use `checked_pow` for untrusted powers.
    pub fn pow(&self, power: Rational) -> Unit {
        self.checked_pow(power).expect("Unit exponent overflow")
    }

    pub fn powi(&self, n: i32) -> Unit {
        self.pow(Rational::from_integer(n))
    }

    pub fn sqrt(&self) -> Unit {
        self.pow(Rational::HALF)
    }

    pub fn recip(&self) -> Unit {
        self.powi(-1)
    }

    /// Same terms with the numeric prefactor dropped.
    pub fn without_factor(&self) -> Unit {
        Unit {
            factor: 1.0,
            terms: self.terms.clone(),
            dimension: self.dimension,
        }
    }

    // ========================================================================
    // Decomposition
    // ========================================================================

    /// Express in the base units of `system`, folding all scale into the
    /// prefactor. Lone affine units are irreducible and come back unchanged.
    pub fn to_system(&self, system: UnitSystem) -> Unit {
        if self.is_affine() {
            return self.clone();
        }

        let dimension = self.dimension();
        let mut factor = self.si_scale();
        let mut terms: SmallVec<[UnitTerm; 4]> = SmallVec::new();

        for base in UnitSystem::BASE_ORDER {
            let power = dimension.exponent(base);
            if power.is_zero() {
                continue;
            }
            let named = crate::registry::base_unit(base, system);
            factor /= named.scale.powf(power.to_f64());
            terms.push(UnitTerm::new(named, power));
        }

        Unit {
            factor: snap_unity(factor),
            terms,
            dimension,
        }
    }

    /// SI base-unit form (`J` becomes `kg m2 / s2`).
    pub fn decompose(&self) -> Unit {
        self.to_system(UnitSystem::Si)
    }

    pub fn si(&self) -> Unit {
        self.to_system(UnitSystem::Si)
    }

    pub fn cgs(&self) -> Unit {
        self.to_system(UnitSystem::Cgs)
    }
}

/// Collapse floating noise around an exact unit prefactor.
fn snap_unity(factor: f64) -> f64 {
    if (factor - 1.0).abs() <= 1e-12 {
        1.0
    } else {
        factor
    }
}

pub(crate) fn approx_eq_rel(a: f64, b: f64, relative: f64) -> bool {
    if a == b {
        return true;
    }
    (a - b).abs() <= relative * a.abs().max(b.abs())
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Unit {
    fn default() -> Self {
        Unit::dimensionless()
    }
}

impl From<Arc<NamedUnit>> for Unit {
    fn from(unit: Arc<NamedUnit>) -> Self {
        Unit::from_named(unit)
    }
}

impl PartialEq for Unit {
    /// Same dimension, same affine zero point, scale equal within
    /// `SCALE_TOLERANCE`.
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension()
            && self.affine_offset() == other.affine_offset()
            && approx_eq_rel(self.si_scale(), other.si_scale(), SCALE_TOLERANCE)
    }
}

// Infallible operators for ergonomics (panic on exponent overflow - use
// checked_* where powers come from untrusted input)
impl Mul<&Unit> for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        self.checked_mul(rhs).expect("Unit exponent overflow")
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        &self * &rhs
    }
}

impl Div<&Unit> for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        self.checked_div(rhs).expect("Unit exponent overflow")
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        &self / &rhs
    }
}

// ============================================================================
// Display
// ============================================================================

fn format_term(symbol: &str, power: Rational) -> String {
    if power == Rational::ONE {
        symbol.to_string()
    } else if power.is_integer() {
        format!("{}{}", symbol, power.numer())
    } else {
        format!("{}({})", symbol, power)
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit(\"{}\")", self)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num: Vec<String> = self
            .terms
            .iter()
            .filter(|t| t.power.is_positive())
            .map(|t| format_term(&t.unit.symbol, t.power))
            .collect();
        let den: Vec<String> = self
            .terms
            .iter()
            .filter(|t| t.power.is_negative())
            .map(|t| format_term(&t.unit.symbol, -t.power))
            .collect();

        let mut numerator = num.join(" ");
        if self.factor != 1.0 {
            numerator = if numerator.is_empty() {
                format!("{}", self.factor)
            } else {
                format!("{} {}", self.factor, numerator)
            };
        }

        match den.len() {
            0 => f.write_str(&numerator),
            n => {
                if numerator.is_empty() {
                    numerator.push('1');
                }
                if n == 1 {
                    write!(f, "{} / {}", numerator, den[0])
                } else {
                    write!(f, "{} / ({})", numerator, den.join(" "))
                }
            },
        }
    }
}

// ============================================================================
// Serde (string form)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Unit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::NumericError;

    fn unit(s: &str) -> Unit {
        s.parse().unwrap()
    }

    #[test]
    fn test_checked_algebra_reports_overflow() {
        let huge = unit("m2147483647");
        let m = unit("m");
        assert_eq!(huge.checked_mul(&m).unwrap_err(), NumericError::Overflow);
        assert_eq!(huge.checked_mul(&unit("km")).unwrap_err(), NumericError::Overflow);
        assert_eq!(huge.recip().checked_div(&m).unwrap_err(), NumericError::Overflow);
        assert_eq!(
            huge.checked_pow(Rational::from_integer(2)).unwrap_err(),
            NumericError::Overflow
        );

        let smaller = huge.checked_div(&m).unwrap();
        assert_eq!(
            smaller.dimension().exponent(BaseDimension::Length),
            Rational::from_integer(i32::MAX - 1)
        );
    }

    #[test]
    fn test_cached_dimension_follows_algebra() {
        let mixed = &unit("km m") / &unit("s");
        assert_eq!(mixed.dimension(), Dimension::AREA / Dimension::TIME);
        assert_eq!((&mixed / &mixed).dimension(), Dimension::DIMENSIONLESS);
        assert_eq!(mixed.without_factor().dimension(), mixed.dimension());
        assert_eq!(mixed.sqrt().powi(2).dimension(), mixed.dimension());
    }

    #[test]
    fn test_mul_adds_dimensions() {
        let force = &unit("kg") * &unit("m / s2");
        assert_eq!(force.dimension(), Dimension::FORCE);
        assert!(approx_eq_rel(force.si_scale(), 1.0, 1e-12));
        assert_eq!(force.to_string(), "kg m / s2");
    }

    #[test]
    fn test_div_and_merge() {
        let speed = &unit("km") / &unit("s");
        assert_eq!(speed.to_string(), "km / s");
        assert_eq!(speed.si_scale(), 1000.0);

        let back = &speed * &unit("s");
        assert_eq!(back.to_string(), "km");
        assert_eq!(back.terms().len(), 1);

        let none = &unit("m") / &unit("m");
        assert!(none.is_unity());
        assert_eq!(none.to_string(), "");
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(unit("kg / (m s2)").to_string(), "kg / (m s2)");
        assert_eq!(unit("s").recip().to_string(), "1 / s");
        assert_eq!(unit("m").sqrt().to_string(), "m(1/2)");
        assert_eq!((&Unit::scaled(1000.0) * &unit("m")).to_string(), "1000 m");
        assert_eq!(Unit::dimensionless().to_string(), "");
    }

    #[test]
    fn test_pow() {
        let area = unit("cm").powi(2);
        assert_eq!(area.dimension(), Dimension::AREA);
        assert!(approx_eq_rel(area.si_scale(), 1e-4, 1e-12));
        assert_eq!(area.pow(Rational::HALF), unit("cm"));
        assert!(unit("m").powi(0).is_unity());
    }

    #[test]
    fn test_equality_uses_scale_and_dimension() {
        assert_eq!(unit("J"), unit("kg m2 / s2"));
        assert_eq!(unit("km"), &Unit::scaled(1000.0) * &unit("m"));
        assert_ne!(unit("km"), unit("m"));
        assert_ne!(unit("m"), unit("s"));
        assert_ne!(unit("deg_C"), unit("K"));
        assert!(unit("deg_C").is_compatible(&unit("K")));
    }

    #[test]
    fn test_decompose() {
        let joule = unit("J").decompose();
        assert_eq!(joule.to_string(), "kg m2 / s2");

        let km = unit("km").decompose();
        assert_eq!(km.to_string(), "1000 m");

        let erg = unit("erg").cgs();
        assert_eq!(erg.to_string(), "g cm2 / s2");

        let celsius = unit("deg_C");
        assert_eq!(celsius.decompose().to_string(), "deg_C");
    }

    #[test]
    fn test_affine_offset() {
        assert_eq!(unit("deg_C").affine_offset(), Some(273.15));
        assert_eq!(unit("K").affine_offset(), None);
        assert_eq!(unit("deg_C / s").affine_offset(), None);
    }

    #[test]
    fn test_unit_system_parse() {
        assert_eq!("SI".parse::<UnitSystem>().unwrap(), UnitSystem::Si);
        assert_eq!("gauss".parse::<UnitSystem>().unwrap(), UnitSystem::Gauss);
        assert!("imperial".parse::<UnitSystem>().is_err());
        assert_eq!(UnitSystem::Cgs.to_string(), "cgs");
    }
}
