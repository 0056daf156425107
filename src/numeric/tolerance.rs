// ============================================================================
// Tolerance
// Relative/absolute closeness test for floating-point magnitudes
// ============================================================================

/// Closeness test: `|a - b| <= max(relative * max(|a|, |b|), absolute)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerance {
    /// Relative 1e-9, absolute 0
    pub const DEFAULT: Self = Self::new(1e-9, 0.0);

    /// Bit-for-bit equality
    pub const EXACT: Self = Self::new(0.0, 0.0);

    pub const fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    pub fn is_close(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        let diff = (a - b).abs();
        diff <= (self.relative * a.abs().max(b.abs())).max(self.absolute)
    }

    pub fn is_valid(&self) -> bool {
        self.relative.is_finite()
            && self.absolute.is_finite()
            && self.relative >= 0.0
            && self.absolute >= 0.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_relative() {
        let tol = Tolerance::default();
        assert!(tol.is_close(1.0, 1.0 + 1e-12));
        assert!(!tol.is_close(1.0, 1.0 + 1e-6));
        assert!(tol.is_close(1e20, 1e20 * (1.0 + 1e-10)));
        assert!(!tol.is_close(0.0, 1e-300));
    }

    #[test]
    fn test_absolute_floor() {
        let tol = Tolerance::new(0.0, 1e-3);
        assert!(tol.is_close(0.0, 5e-4));
        assert!(!tol.is_close(0.0, 5e-3));
    }

    #[test]
    fn test_non_finite() {
        let tol = Tolerance::default();
        assert!(!tol.is_close(f64::NAN, f64::NAN));
        assert!(tol.is_close(f64::INFINITY, f64::INFINITY));
        assert!(!tol.is_close(f64::INFINITY, 1.0));
    }

    #[test]
    fn test_validity() {
        assert!(Tolerance::DEFAULT.is_valid());
        assert!(!Tolerance::new(-1.0, 0.0).is_valid());
        assert!(!Tolerance::new(f64::NAN, 0.0).is_valid());
    }
}
