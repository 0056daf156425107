// ============================================================================
// Engine Configuration
// Tolerance, unit-system and equivalency selection for a converter
// ============================================================================

use super::errors::{UnitError, UnitResult};
use super::unit::UnitSystem;
use crate::numeric::Tolerance;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration a `Converter` is built from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Tolerance for quantity equality checks
    pub tolerance: Tolerance,

    /// Optional: System used to realise multi-system constants
    /// None means such constants must be given a system explicitly
    pub unit_system: Option<UnitSystem>,

    /// Optional: Digits after the decimal point when formatting
    /// None means shortest round-trip formatting
    pub display_precision: Option<usize>,

    /// Built-in equivalencies (by name) the converter may apply, in order
    pub equivalencies: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            unit_system: None,
            display_precision: None,
            equivalencies: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with defaults (strict: no equivalencies)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set comparison tolerance
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder method: Set default unit system for constants
    pub fn with_unit_system(mut self, system: UnitSystem) -> Self {
        self.unit_system = Some(system);
        self
    }

    /// Builder method: Set display precision
    pub fn with_display_precision(mut self, digits: usize) -> Self {
        self.display_precision = Some(digits);
        self
    }

    /// Builder method: Append an equivalency by name
    pub fn with_equivalency(mut self, name: impl Into<String>) -> Self {
        self.equivalencies.push(name.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.tolerance.is_valid() {
            return Err("Tolerance must be finite and non-negative".to_string());
        }

        if let Some(digits) = self.display_precision {
            if digits > 17 {
                return Err("Display precision cannot exceed 17 digits".to_string());
            }
        }

        for name in &self.equivalencies {
            if name.trim().is_empty() {
                return Err("Equivalency name cannot be empty".to_string());
            }
            if !crate::engine::equivalencies::is_builtin(name) {
                return Err(format!("Unknown equivalency '{}'", name));
            }
        }

        Ok(())
    }

    /// `validate()` mapped into the crate error type.
    pub fn check(&self) -> UnitResult<()> {
        self.validate().map_err(UnitError::InvalidConfig)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EngineConfig {
    /// Strict unit checking: direct rescales only
    pub fn strict() -> Self {
        Self::new()
    }

    /// Plasma work: temperatures in eV, Gaussian charge
    /// - temperature_energy, mass_energy equivalencies
    /// - Gaussian system for multi-system constants
    pub fn plasma() -> Self {
        Self::new()
            .with_unit_system(UnitSystem::Gauss)
            .with_equivalency("temperature_energy")
            .with_equivalency("mass_energy")
    }

    /// Spectroscopy: wavelength/frequency/energy, angles as numbers
    pub fn spectroscopy() -> Self {
        Self::new()
            .with_equivalency("spectral")
            .with_equivalency("dimensionless_angles")
    }

    /// Astronomy: spectral, parallax and angle handling
    pub fn astronomy() -> Self {
        Self::new()
            .with_equivalency("spectral")
            .with_equivalency("parallax")
            .with_equivalency("dimensionless_angles")
    }

    /// Thermometry: affine temperature scales
    pub fn thermometry() -> Self {
        Self::new().with_equivalency("temperature")
    }
}

// ============================================================================
// JSON (feature = "serde")
// ============================================================================

#[cfg(feature = "serde")]
impl EngineConfig {
    pub fn from_json(json: &str) -> UnitResult<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| UnitError::InvalidConfig(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    pub fn to_json(&self) -> UnitResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| UnitError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = EngineConfig::new();
        assert_eq!(config.tolerance, Tolerance::DEFAULT);
        assert!(config.equivalencies.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_tolerance(Tolerance::new(1e-6, 0.0))
            .with_display_precision(3)
            .with_unit_system(UnitSystem::Cgs)
            .with_equivalency("spectral");

        assert_eq!(config.display_precision, Some(3));
        assert_eq!(config.unit_system, Some(UnitSystem::Cgs));
        assert_eq!(config.equivalencies, vec!["spectral".to_string()]);
    }

    #[test]
    fn test_validation() {
        let bad_tol = EngineConfig::new().with_tolerance(Tolerance::new(-1.0, 0.0));
        assert!(bad_tol.validate().is_err());

        let bad_name = EngineConfig::new().with_equivalency("telepathy");
        assert_eq!(
            bad_name.validate().unwrap_err(),
            "Unknown equivalency 'telepathy'"
        );
        assert!(matches!(bad_name.check(), Err(UnitError::InvalidConfig(_))));

        let bad_precision = EngineConfig::new().with_display_precision(40);
        assert!(bad_precision.validate().is_err());
    }

    #[test]
    fn test_preset_configs() {
        for preset in [
            EngineConfig::strict(),
            EngineConfig::plasma(),
            EngineConfig::spectroscopy(),
            EngineConfig::astronomy(),
            EngineConfig::thermometry(),
        ] {
            assert!(preset.validate().is_ok());
        }
        assert_eq!(EngineConfig::plasma().unit_system, Some(UnitSystem::Gauss));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::plasma().with_display_precision(4);
        let json = config.to_json().unwrap();
        let back = EngineConfig::from_json(&json).unwrap();
        assert_eq!(back, config);

        let partial = EngineConfig::from_json(r#"{"equivalencies": ["spectral"]}"#).unwrap();
        assert_eq!(partial.tolerance, Tolerance::DEFAULT);

        assert!(EngineConfig::from_json(r#"{"equivalencies": ["nope"]}"#).is_err());
    }
}
