// ============================================================================
// Magnitude
// Scalar or fixed-shape array of f64 values carried by a quantity
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::tolerance::Tolerance;
use arrayvec::ArrayVec;
use std::fmt;

/// Highest array rank a magnitude may carry.
pub const MAX_RANK: usize = 4;

/// Array shape (row-major, at most `MAX_RANK` axes).
pub type Shape = ArrayVec<usize, MAX_RANK>;

/// Numeric payload of a quantity.
///
/// Scalars broadcast against arrays; two arrays combine only when their
/// shapes are identical.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Magnitude {
    Scalar(f64),
    Array { values: Vec<f64>, shape: Shape },
}

impl Magnitude {
    // ========================================================================
    // Construction
    // ========================================================================

    #[inline]
    pub const fn scalar(value: f64) -> Self {
        Magnitude::Scalar(value)
    }

    /// One-dimensional array.
    pub fn from_vec(values: Vec<f64>) -> Self {
        let mut shape = Shape::new();
        shape.push(values.len());
        Magnitude::Array { values, shape }
    }

    /// Array with an explicit row-major shape.
    ///
    /// # Errors
    /// `RankTooHigh` when more than `MAX_RANK` axes are given, `ShapeMismatch`
    /// when the shape does not cover exactly `values.len()` elements.
    pub fn from_shape(values: Vec<f64>, shape: &[usize]) -> NumericResult<Self> {
        if shape.len() > MAX_RANK {
            return Err(NumericError::RankTooHigh(shape.len()));
        }
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(NumericError::ShapeMismatch {
                left: shape.to_vec(),
                right: vec![values.len()],
            });
        }
        let shape: Shape = shape.iter().copied().collect();
        Ok(Magnitude::Array { values, shape })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Magnitude::Scalar(_))
    }

    /// Number of elements (1 for a scalar).
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Magnitude::Scalar(_) => 1,
            Magnitude::Array { values, .. } => values.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape; empty for a scalar.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        match self {
            Magnitude::Scalar(_) => &[],
            Magnitude::Array { shape, .. } => shape.as_slice(),
        }
    }

    /// Flat row-major view of the elements.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Magnitude::Scalar(v) => std::slice::from_ref(v),
            Magnitude::Array { values, .. } => values.as_slice(),
        }
    }

    /// The scalar value, if this is a scalar.
    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Magnitude::Scalar(v) => Some(*v),
            Magnitude::Array { .. } => None,
        }
    }

    /// Element at a flat index. A scalar answers index 0.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.as_slice().get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.as_slice().iter().copied()
    }

    // ========================================================================
    // Elementwise Operations
    // ========================================================================

    /// Apply `f` to every element, preserving shape.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Magnitude::Scalar(v) => Magnitude::Scalar(f(*v)),
            Magnitude::Array { values, shape } => Magnitude::Array {
                values: values.iter().map(|v| f(*v)).collect(),
                shape: shape.clone(),
            },
        }
    }

    /// Combine two magnitudes elementwise, broadcasting scalars.
    ///
    /// # Errors
    /// `ShapeMismatch` when both sides are arrays of different shape.
    pub fn zip_with<F>(&self, other: &Self, f: F) -> NumericResult<Self>
    where
        F: Fn(f64, f64) -> f64,
    {
        match (self, other) {
            (Magnitude::Scalar(a), Magnitude::Scalar(b)) => Ok(Magnitude::Scalar(f(*a, *b))),
            (Magnitude::Scalar(a), Magnitude::Array { values, shape }) => Ok(Magnitude::Array {
                values: values.iter().map(|b| f(*a, *b)).collect(),
                shape: shape.clone(),
            }),
            (Magnitude::Array { values, shape }, Magnitude::Scalar(b)) => Ok(Magnitude::Array {
                values: values.iter().map(|a| f(*a, *b)).collect(),
                shape: shape.clone(),
            }),
            (
                Magnitude::Array {
                    values: left,
                    shape: left_shape,
                },
                Magnitude::Array {
                    values: right,
                    shape: right_shape,
                },
            ) => {
                if left_shape != right_shape {
                    return Err(NumericError::ShapeMismatch {
                        left: left_shape.to_vec(),
                        right: right_shape.to_vec(),
                    });
                }
                Ok(Magnitude::Array {
                    values: left.iter().zip(right).map(|(a, b)| f(*a, *b)).collect(),
                    shape: left_shape.clone(),
                })
            },
        }
    }

    /// Elementwise closeness with scalar broadcasting. Arrays of different
    /// shape are never close.
    pub fn all_close(&self, other: &Self, tolerance: Tolerance) -> bool {
        match (self, other) {
            (Magnitude::Scalar(a), Magnitude::Scalar(b)) => tolerance.is_close(*a, *b),
            (Magnitude::Scalar(a), Magnitude::Array { values, .. })
            | (Magnitude::Array { values, .. }, Magnitude::Scalar(a)) => {
                values.iter().all(|v| tolerance.is_close(*a, *v))
            },
            (
                Magnitude::Array {
                    values: left,
                    shape: left_shape,
                },
                Magnitude::Array {
                    values: right,
                    shape: right_shape,
                },
            ) => {
                left_shape == right_shape
                    && left
                        .iter()
                        .zip(right)
                        .all(|(a, b)| tolerance.is_close(*a, *b))
            },
        }
    }

    // ========================================================================
    // Reductions
    // ========================================================================

    pub fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Arithmetic mean; NaN for an empty array.
    pub fn mean(&self) -> f64 {
        let n = self.len();
        if n == 0 {
            return f64::NAN;
        }
        self.sum() / n as f64
    }

    pub fn min(&self) -> Option<f64> {
        self.iter().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.iter().reduce(f64::max)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<f64> for Magnitude {
    #[inline]
    fn from(value: f64) -> Self {
        Magnitude::Scalar(value)
    }
}

impl From<Vec<f64>> for Magnitude {
    #[inline]
    fn from(values: Vec<f64>) -> Self {
        Magnitude::from_vec(values)
    }
}

impl From<&[f64]> for Magnitude {
    #[inline]
    fn from(values: &[f64]) -> Self {
        Magnitude::from_vec(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Magnitude {
    #[inline]
    fn from(values: [f64; N]) -> Self {
        Magnitude::from_vec(values.to_vec())
    }
}

// ============================================================================
// Display
// ============================================================================

fn write_value(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    match f.precision() {
        Some(p) => write!(f, "{:.*}", p, value),
        None => write!(f, "{}", value),
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::Scalar(v) => write_value(f, *v),
            Magnitude::Array { values, .. } => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_value(f, *v)?;
                }
                write!(f, "]")
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scalar_accessors() {
        let m = Magnitude::scalar(2.5);
        assert!(m.is_scalar());
        assert_eq!(m.len(), 1);
        assert!(m.shape().is_empty());
        assert_eq!(m.get(0), Some(2.5));
        assert_eq!(m.get(1), None);
        assert_eq!(m.as_scalar(), Some(2.5));
    }

    #[test]
    fn test_from_shape() {
        let m = Magnitude::from_shape(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        assert_eq!(m.shape(), &[2, 3]);
        assert_eq!(m.get(4), Some(5.0));

        let bad = Magnitude::from_shape(vec![1.0, 2.0], &[3]);
        assert!(matches!(bad, Err(NumericError::ShapeMismatch { .. })));

        let deep = Magnitude::from_shape(vec![1.0], &[1, 1, 1, 1, 1]);
        assert_eq!(deep, Err(NumericError::RankTooHigh(5)));
    }

    #[test]
    fn test_broadcast() {
        let a = Magnitude::from(vec![1.0, 2.0, 3.0]);
        let s = Magnitude::scalar(10.0);
        let sum = a.zip_with(&s, |x, y| x + y).unwrap();
        assert_eq!(sum.as_slice(), &[11.0, 12.0, 13.0]);
        let rev = s.zip_with(&a, |x, y| x - y).unwrap();
        assert_eq!(rev.as_slice(), &[9.0, 8.0, 7.0]);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Magnitude::from(vec![1.0, 2.0, 3.0]);
        let b = Magnitude::from(vec![1.0, 2.0]);
        let err = a.zip_with(&b, |x, y| x * y).unwrap_err();
        assert_eq!(
            err,
            NumericError::ShapeMismatch {
                left: vec![3],
                right: vec![2]
            }
        );
    }

    #[test]
    fn test_all_close() {
        let tol = Tolerance::default();
        let a = Magnitude::from([1.0, 1.0]);
        assert!(a.all_close(&Magnitude::scalar(1.0 + 1e-12), tol));
        assert!(!a.all_close(&Magnitude::from([1.0, 1.1]), tol));
        assert!(!a.all_close(&Magnitude::from([1.0, 1.0, 1.0]), tol));
    }

    #[test]
    fn test_reductions() {
        let a = Magnitude::from([3.0, -1.0, 4.0]);
        assert_eq!(a.sum(), 6.0);
        assert_eq!(a.mean(), 2.0);
        assert_eq!(a.min(), Some(-1.0));
        assert_eq!(a.max(), Some(4.0));

        let empty = Magnitude::from(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.mean().is_nan());
        assert_eq!(empty.max(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Magnitude::scalar(1.0).to_string(), "1");
        assert_eq!(Magnitude::from([1.0, 2.5]).to_string(), "[1, 2.5]");
        assert_eq!(format!("{:.2}", Magnitude::scalar(3.14159)), "3.14");
    }

    proptest! {
        #[test]
        fn map_preserves_shape(values in prop::collection::vec(-1e6f64..1e6, 0..32)) {
            let m = Magnitude::from(values.clone());
            let doubled = m.map(|v| v * 2.0);
            prop_assert_eq!(doubled.shape(), m.shape());
            for (a, b) in doubled.iter().zip(values) {
                prop_assert_eq!(a, b * 2.0);
            }
        }

        #[test]
        fn scalar_broadcast_matches_map(values in prop::collection::vec(-1e6f64..1e6, 1..32), k in -100f64..100.0) {
            let m = Magnitude::from(values);
            let zipped = m.zip_with(&Magnitude::scalar(k), |a, b| a * b).unwrap();
            prop_assert_eq!(zipped, m.map(|a| a * k));
        }
    }
}
