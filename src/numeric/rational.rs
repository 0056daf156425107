// ============================================================================
// Rational Exponent
// Exact fractional powers for dimension vectors and unit terms
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Exact rational number used as a dimension or unit exponent.
///
/// Always stored reduced with a strictly positive denominator, so derived
/// `PartialEq`/`Hash` agree with numeric equality. The numerator never
/// holds `i32::MIN`, which keeps negation total for every checked result.
///
/// # Example
/// ```rust
/// use quantity_engine::numeric::{NumericError, Rational};
///
/// let half = Rational::new(1, 2)?;
/// let three_halves = half.checked_mul(Rational::from_integer(3))?;
/// assert_eq!(three_halves.to_string(), "3/2");
///
/// let big = Rational::from_integer(i32::MAX);
/// assert_eq!(big.checked_add(Rational::ONE), Err(NumericError::Overflow));
/// # Ok::<(), NumericError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rational {
    num: i32,
    den: i32,
}

const fn gcd(mut a: i64, mut b: i64) -> i64 {
    if a < 0 {
        a = -a;
    }
    if b < 0 {
        b = -b;
    }
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Rational {
    /// Zero
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// One
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// One half (square roots)
    pub const HALF: Self = Self { num: 1, den: 2 };

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from an integer value.
    #[inline]
    pub const fn from_integer(value: i32) -> Self {
        Self { num: value, den: 1 }
    }

    /// Create from numerator and denominator, reducing to lowest terms.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `den` is zero.
    pub fn new(num: i32, den: i32) -> NumericResult<Self> {
        Self::reduce(num as i64, den as i64)
    }

    fn reduce(num: i64, den: i64) -> NumericResult<Self> {
        if den == 0 {
            return Err(NumericError::DivisionByZero);
        }
        if num == 0 {
            return Ok(Self::ZERO);
        }
        let g = gcd(num, den);
        let (mut n, mut d) = (num / g, den / g);
        if d < 0 {
            n = -n;
            d = -d;
        }
        let num = i32::try_from(n)
            .ok()
            .filter(|n| *n != i32::MIN)
            .ok_or(NumericError::Overflow)?;
        let den = i32::try_from(d).map_err(|_| NumericError::Overflow)?;
        Ok(Self { num, den })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub const fn numer(self) -> i32 {
        self.num
    }

    #[inline]
    pub const fn denom(self) -> i32 {
        self.den
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        self.den == 1
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.num < 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.num > 0
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self {
            num: self.num.saturating_abs(),
            den: self.den,
        }
    }

    /// Floating-point value, used when raising scale factors to this power.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` if the reduced result does not fit in i32.
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        let num = self.num as i64 * rhs.den as i64 + rhs.num as i64 * self.den as i64;
        let den = self.den as i64 * rhs.den as i64;
        Self::reduce(num, den)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        let num = self.num as i64 * rhs.den as i64 - rhs.num as i64 * self.den as i64;
        let den = self.den as i64 * rhs.den as i64;
        Self::reduce(num, den)
    }

    /// Checked negation; fails only for a numerator of `i32::MIN`, which
    /// `from_integer` alone can produce.
    pub fn checked_neg(self) -> NumericResult<Self> {
        Self::reduce(-(self.num as i64), self.den as i64)
    }

    /// Checked multiplication.
    pub fn checked_mul(self, rhs: Self) -> NumericResult<Self> {
        Self::reduce(
            self.num as i64 * rhs.num as i64,
            self.den as i64 * rhs.den as i64,
        )
    }

    /// Checked division.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> NumericResult<Self> {
        Self::reduce(
            self.num as i64 * rhs.den as i64,
            self.den as i64 * rhs.num as i64,
        )
    }

    /// Reciprocal.
    pub fn recip(self) -> NumericResult<Self> {
        Self::reduce(self.den as i64, self.num as i64)
    }

    /// Approximate a float by the closest fraction with denominator up to 1000.
    ///
    /// Used for exponents written in decimal form (`m**0.5`).
    pub fn approximate(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        for den in 1..=1000i64 {
            let num = (value * den as f64).round();
            if ((num / den as f64) - value).abs() < 1e-9 {
                return Self::reduce(num as i64, den);
            }
        }
        Err(NumericError::InvalidInput)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Rational {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i32> for Rational {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from_integer(value)
    }
}

impl PartialOrd for Rational {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication preserves order
        (self.num as i64 * other.den as i64).cmp(&(other.num as i64 * self.den as i64))
    }
}

impl Neg for Rational {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        self.checked_neg().expect("Rational negation overflow")
    }
}

// Infallible operators for ergonomics (panic on overflow - use checked_* where
// exponents come from untrusted input)
impl Add for Rational {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("Rational addition overflow")
    }
}

impl Sub for Rational {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("Rational subtraction overflow")
    }
}

impl Mul for Rational {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs).expect("Rational multiplication overflow")
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl std::str::FromStr for Rational {
    type Err = NumericError;

    /// Parse `"3"`, `"-1"`, `"3/2"` or a decimal such as `"0.5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NumericError::InvalidInput);
        }

        if let Some((num, den)) = s.split_once('/') {
            let num: i32 = num.trim().parse().map_err(|_| NumericError::InvalidInput)?;
            let den: i32 = den.trim().parse().map_err(|_| NumericError::InvalidInput)?;
            return Self::new(num, den);
        }

        if let Ok(int) = s.parse::<i32>() {
            return Self::new(int, 1);
        }

        let value: f64 = s.parse().map_err(|_| NumericError::InvalidInput)?;
        Self::approximate(value)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_constants() {
        assert_eq!(Rational::ZERO.numer(), 0);
        assert_eq!(Rational::ONE.to_f64(), 1.0);
        assert_eq!(Rational::HALF.to_f64(), 0.5);
    }

    #[test]
    fn test_new_reduces() {
        let r = Rational::new(6, -4).unwrap();
        assert_eq!(r.numer(), -3);
        assert_eq!(r.denom(), 2);
        assert_eq!(Rational::new(0, 7).unwrap(), Rational::ZERO);
    }

    #[test]
    fn test_new_zero_denominator() {
        assert_eq!(Rational::new(1, 0), Err(NumericError::DivisionByZero));
        assert_eq!(Rational::ZERO.recip(), Err(NumericError::DivisionByZero));
    }

    #[test]
    fn test_arithmetic() {
        let half = Rational::HALF;
        let third = Rational::new(1, 3).unwrap();
        assert_eq!(half + third, Rational::new(5, 6).unwrap());
        assert_eq!(half - third, Rational::new(1, 6).unwrap());
        assert_eq!(half * third, Rational::new(1, 6).unwrap());
        assert_eq!(half.checked_div(third).unwrap(), Rational::new(3, 2).unwrap());
        assert_eq!(-half, Rational::new(-1, 2).unwrap());
    }

    #[test]
    fn test_overflow() {
        let big = Rational::from_integer(i32::MAX);
        assert_eq!(big.checked_add(Rational::ONE), Err(NumericError::Overflow));
        assert_eq!(big.checked_mul(Rational::from_integer(2)), Err(NumericError::Overflow));
        assert_eq!(
            Rational::from_integer(-i32::MAX).checked_sub(Rational::ONE),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_min_numerator_is_rejected() {
        assert_eq!(Rational::new(i32::MIN, 1), Err(NumericError::Overflow));
        assert_eq!("-2147483648".parse::<Rational>(), Err(NumericError::Overflow));
        assert_eq!(
            Rational::from_integer(i32::MIN).checked_neg(),
            Err(NumericError::Overflow)
        );
        // i32::MIN / 2 still reduces into range
        assert_eq!(Rational::new(i32::MIN, 2).unwrap().numer(), i32::MIN / 2);
        assert_eq!(-Rational::from_integer(i32::MAX), Rational::from_integer(-i32::MAX));
    }

    #[test]
    fn test_ordering() {
        let a = Rational::new(1, 3).unwrap();
        let b = Rational::HALF;
        assert!(a < b);
        assert!(-b < a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::from_integer(-2).to_string(), "-2");
        assert_eq!(Rational::new(3, 2).unwrap().to_string(), "3/2");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("3/2".parse::<Rational>().unwrap(), Rational::new(3, 2).unwrap());
        assert_eq!("-1".parse::<Rational>().unwrap(), Rational::from_integer(-1));
        assert_eq!("0.5".parse::<Rational>().unwrap(), Rational::HALF);
        assert_eq!("-1.5".parse::<Rational>().unwrap(), Rational::new(-3, 2).unwrap());
        assert_eq!("x".parse::<Rational>(), Err(NumericError::InvalidInput));
        assert_eq!("1/0".parse::<Rational>(), Err(NumericError::DivisionByZero));
    }

    quickcheck! {
        fn prop_add_commutes(a: i16, b: i16, c: u8, d: u8) -> bool {
            let x = Rational::new(a as i32, c as i32 + 1).unwrap();
            let y = Rational::new(b as i32, d as i32 + 1).unwrap();
            x + y == y + x
        }

        fn prop_always_reduced(a: i16, b: i16) -> bool {
            match Rational::new(a as i32, b as i32) {
                Ok(r) => r.denom() > 0 && gcd(r.numer() as i64, r.denom() as i64) <= 1
                    || r.is_zero(),
                Err(e) => b == 0 && e == NumericError::DivisionByZero,
            }
        }

        fn prop_sub_inverts_add(a: i16, b: i16, c: u8) -> bool {
            let x = Rational::new(a as i32, c as i32 + 1).unwrap();
            let y = Rational::from_integer(b as i32);
            (x + y) - y == x
        }
    }
}
