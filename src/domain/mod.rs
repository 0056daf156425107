// ============================================================================
// Domain Models Module
// Dimensions, units, quantities and the values built on them
// ============================================================================

pub mod config;
pub mod constant;
pub mod dimension;
pub mod errors;
pub mod particle;
pub mod physical_type;
pub mod quantity;
pub mod unit;

pub use config::EngineConfig;
pub use constant::{Constant, Realization};
pub use dimension::{BaseDimension, Dimension};
pub use errors::{UnitError, UnitResult};
pub use particle::Particle;
pub use physical_type::{classify, PhysicalType};
pub use quantity::Quantity;
pub use unit::{NamedUnit, Unit, UnitSystem, UnitTerm};
