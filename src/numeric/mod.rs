// ============================================================================
// Numeric Module
// Exact exponents and elementwise magnitudes for unit-tagged quantities
// ============================================================================
//
// This module provides:
// - Rational: reduced fraction used for dimension and unit exponents
// - Magnitude: scalar or fixed-shape f64 array with broadcasting
// - Tolerance: relative/absolute closeness used by tolerant equality
// - NumericError: Error types for exponent arithmetic and shape checks
//
// Design principles:
// - Exponents are exact, so sqrt(m2) is m and statC powers stay rational
// - Checked arithmetic returns Result; operators panic only on i32 overflow
// - Arrays are flat row-major Vec<f64> with an inline shape

mod errors;
mod magnitude;
mod rational;
mod tolerance;

pub use errors::{NumericError, NumericResult};
pub use magnitude::{Magnitude, Shape, MAX_RANK};
pub use rational::Rational;
pub use tolerance::Tolerance;
