// ============================================================================
// Quantity Engine Library
// Unit-tagged physical quantities with dimensional analysis and equivalencies
// ============================================================================

//! # Quantity Engine
//!
//! Physical quantities as immutable (magnitude, unit) pairs, checked
//! dimensional arithmetic and explicit equivalencies.
//!
//! ## Features
//!
//! - **Exact dimension algebra** over rational exponents (eight base dimensions)
//! - **Unit registry** with SI prefixes, astronomical, CGS and Gaussian units
//! - **Explicit equivalencies** (spectral, temperature-energy, mass-energy, ...)
//! - **Physical-type classification** of any unit
//! - **Constants** with per-system realizations (SI, CGS, Gaussian)
//! - **Plasma formulary** built from quantity algebra
//!
//! ## Example
//!
//! ```rust
//! use quantity_engine::prelude::*;
//!
//! let m = unit("m").unwrap();
//! let cm = unit("cm").unwrap();
//!
//! // Compatible units add; the result keeps the left unit
//! let total = (&(1.0 * &m) + &(25.0 * &cm)).unwrap();
//! assert_eq!(total, Quantity::new(1.25, m.clone()));
//!
//! // Nothing converts across dimensions unless asked to
//! let ev = Quantity::new(1.0, unit("eV").unwrap());
//! assert!(ev.to(&unit("K").unwrap()).is_err());
//! let kelvin = ev
//!     .to_with(&unit("K").unwrap(), &[equivalencies::temperature_energy()])
//!     .unwrap();
//! assert!((kelvin.scalar().unwrap() - 11_604.518).abs() < 1e-2);
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod registry;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        classify, BaseDimension, Constant, Dimension, EngineConfig, Particle, PhysicalType,
        Quantity, Unit, UnitError, UnitResult, UnitSystem,
    };
    pub use crate::engine::{
        create_from_config, equivalencies, formulary, Converter, ConverterBuilder, Equivalency,
        EquivalencyBuilder, Transform,
    };
    pub use crate::interfaces::{
        Elementwise, LoggingSurface, NoOpSurface, PlotSeries, PlotSurface, RecordingSurface,
    };
    pub use crate::numeric::{Magnitude, Rational, Tolerance};
    pub use crate::registry::{parse_unit, unit};
}
