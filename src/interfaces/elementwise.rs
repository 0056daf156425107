// ============================================================================
// Elementwise Interface
// Array capability shared by bare magnitudes and quantities
// ============================================================================

use crate::domain::Quantity;
use crate::numeric::Magnitude;

/// Values that hold zero or more scalar elements and can be mapped over
/// them without changing their unit.
pub trait Elementwise: Sized {
    /// What indexing yields: `f64` for magnitudes, `Quantity` for quantities
    type Element;

    fn element_count(&self) -> usize;

    /// Empty for a scalar
    fn element_shape(&self) -> &[usize];

    fn element(&self, index: usize) -> Option<Self::Element>;

    fn map_elements<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64;

    fn elements(&self) -> Vec<Self::Element> {
        (0..self.element_count())
            .filter_map(|i| self.element(i))
            .collect()
    }

    fn is_scalar_like(&self) -> bool {
        self.element_shape().is_empty()
    }
}

impl Elementwise for Magnitude {
    type Element = f64;

    fn element_count(&self) -> usize {
        self.len()
    }

    fn element_shape(&self) -> &[usize] {
        self.shape()
    }

    fn element(&self, index: usize) -> Option<f64> {
        self.get(index)
    }

    fn map_elements<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        self.map(f)
    }
}

impl Elementwise for Quantity {
    type Element = Quantity;

    fn element_count(&self) -> usize {
        self.len()
    }

    fn element_shape(&self) -> &[usize] {
        self.shape()
    }

    fn element(&self, index: usize) -> Option<Quantity> {
        self.get(index)
    }

    fn map_elements<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        self.map(f)
    }
}
