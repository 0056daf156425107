// ============================================================================
// Converter Factory
// Creates converters with proper configuration
// ============================================================================

use crate::domain::config::EngineConfig;
use crate::domain::{UnitResult, UnitSystem};
use crate::engine::equivalencies::equivalency_by_name;
use crate::engine::{Converter, Equivalency};
use crate::numeric::Tolerance;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a converter from configuration
///
/// # Arguments
/// * `config` - Engine configuration
///
/// # Returns
/// * `UnitResult<Converter>` - Configured converter or error
///
/// # Example
/// ```rust
/// use quantity_engine::prelude::*;
/// use quantity_engine::engine::factory::create_from_config;
///
/// let config = EngineConfig::plasma();
/// let converter = create_from_config(&config)?;
/// assert_eq!(converter.unit_system(), Some(UnitSystem::Gauss));
///
/// let t = converter.convert(&Quantity::new(1.0, unit("eV")?), &unit("K")?)?;
/// assert!((t.scalar().unwrap() - 11_604.518).abs() < 1e-2);
/// # Ok::<(), UnitError>(())
/// ```
pub fn create_from_config(config: &EngineConfig) -> UnitResult<Converter> {
    config.check()?;
    let equivalencies = resolve_equivalencies(&config.equivalencies)?;
    Ok(Converter::new(
        equivalencies,
        config.tolerance,
        config.unit_system,
        config.display_precision,
    ))
}

/// Resolves built-in equivalency names in order
fn resolve_equivalencies(names: &[String]) -> UnitResult<Vec<Equivalency>> {
    names.iter().map(|name| equivalency_by_name(name)).collect()
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating converters with fluent API
///
/// # Example
/// ```rust
/// use quantity_engine::prelude::*;
/// use quantity_engine::engine::factory::ConverterBuilder;
///
/// let converter = ConverterBuilder::new()
///     .with_equivalency("spectral")
///     .with_unit_system(UnitSystem::Cgs)
///     .build()?;
/// assert_eq!(converter.equivalencies().len(), 1);
///
/// let unknown = ConverterBuilder::new().with_equivalency("telepathy").build();
/// assert!(unknown.is_err());
/// # Ok::<(), UnitError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConverterBuilder {
    config: EngineConfig,
    custom: Vec<Equivalency>,
}

impl ConverterBuilder {
    /// Create a new builder with strict defaults
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Equivalencies
    // ========================================================================

    /// Append a built-in equivalency by name
    pub fn with_equivalency(mut self, name: impl Into<String>) -> Self {
        self.config.equivalencies.push(name.into());
        self
    }

    /// Append a caller-built equivalency; tried after the named built-ins
    pub fn with_custom_equivalency(mut self, equivalency: Equivalency) -> Self {
        self.custom.push(equivalency);
        self
    }

    // ========================================================================
    // Additional Configuration
    // ========================================================================

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// System used for multi-system constants and normalisation
    pub fn with_unit_system(mut self, system: UnitSystem) -> Self {
        self.config.unit_system = Some(system);
        self
    }

    pub fn with_display_precision(mut self, precision: usize) -> Self {
        self.config.display_precision = Some(precision);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            custom: Vec::new(),
        }
    }

    pub fn plasma() -> Self {
        Self::from_config(EngineConfig::plasma())
    }

    pub fn spectroscopy() -> Self {
        Self::from_config(EngineConfig::spectroscopy())
    }

    pub fn astronomy() -> Self {
        Self::from_config(EngineConfig::astronomy())
    }

    pub fn thermometry() -> Self {
        Self::from_config(EngineConfig::thermometry())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the converter
    pub fn build(self) -> UnitResult<Converter> {
        self.config.check()?;
        let mut equivalencies = resolve_equivalencies(&self.config.equivalencies)?;
        equivalencies.extend(self.custom);
        Ok(Converter::new(
            equivalencies,
            self.config.tolerance,
            self.config.unit_system,
            self.config.display_precision,
        ))
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }
}
