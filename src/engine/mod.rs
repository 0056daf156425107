// ============================================================================
// Engine Module
// Conversion, equivalencies and the quantity-level formulary
// ============================================================================

mod converter;

pub mod conversion;
pub mod equivalencies;
pub mod equivalency;
pub mod factory;
pub mod formulary;

pub use conversion::{convert_magnitude, directly_convertible, rescale_factor};
pub use converter::Converter;
pub use equivalencies::{equivalency_by_name, BUILTIN_NAMES};
pub use equivalency::{Equivalency, EquivalencyBuilder, EquivalencyRule, Transform};
pub use factory::{create_from_config, ConverterBuilder};
