// ============================================================================
// Unit Errors
// Single error type for conversion, lookup and configuration failures
// ============================================================================

use super::physical_type::PhysicalType;
use super::unit::{Unit, UnitSystem};
use crate::numeric::NumericError;
use std::fmt;

/// Errors raised by unit algebra, conversion, registry lookups and
/// configuration. Every failure is synchronous; nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Source and target units have different dimension vectors and no
    /// supplied equivalency relates them
    IncompatibleUnits {
        from: String,
        to: String,
        from_type: String,
        to_type: String,
    },
    /// Same dimension but different zero points (`deg_C` and `K`); only an
    /// equivalency such as `temperature` relates them
    ZeroPointMismatch {
        from: String,
        to: String,
        physical_type: String,
    },
    /// An equivalency rule matched the unit pair but has no transform for
    /// the requested direction
    NoConversionPath {
        equivalency: String,
        from: String,
        to: String,
    },
    /// Constant realised in several systems was used without choosing one,
    /// or has no realization in the requested system
    MissingUnitSystem {
        constant: String,
        requested: Option<UnitSystem>,
    },
    UnknownPhysicalType(String),
    UnknownUnit(String),
    InvalidUnitString {
        input: String,
        reason: String,
    },
    UnknownEquivalency(String),
    UnknownConstant(String),
    UnknownParticle(String),
    /// Two array magnitudes of different shape were combined
    ShapeMismatch {
        left: Vec<usize>,
        right: Vec<usize>,
    },
    InvalidConfig(String),
    /// A physical input outside the domain of a formula (negative
    /// temperature or density)
    InvalidArgument(String),
    Numeric(NumericError),
}

impl UnitError {
    /// Incompatibility error carrying both units' physical types. Units of
    /// the same dimension can only be incompatible through their affine
    /// zero points, which gets its own variant.
    pub fn incompatible(from: &Unit, to: &Unit) -> Self {
        if from.is_compatible(to) {
            return UnitError::ZeroPointMismatch {
                from: from.to_string(),
                to: to.to_string(),
                physical_type: PhysicalType::of(from).describe(),
            };
        }
        UnitError::IncompatibleUnits {
            from: from.to_string(),
            to: to.to_string(),
            from_type: PhysicalType::of(from).describe(),
            to_type: PhysicalType::of(to).describe(),
        }
    }

    pub(crate) fn invalid_unit_string(input: &str, reason: impl Into<String>) -> Self {
        UnitError::InvalidUnitString {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::IncompatibleUnits {
                from,
                to,
                from_type,
                to_type,
            } => write!(
                f,
                "'{}' ({}) and '{}' ({}) are not convertible",
                from, from_type, to, to_type
            ),
            UnitError::ZeroPointMismatch {
                from,
                to,
                physical_type,
            } => write!(
                f,
                "'{}' and '{}' are both {} but have different zero points; \
                 convert through an equivalency such as 'temperature'",
                from, to, physical_type
            ),
            UnitError::NoConversionPath {
                equivalency,
                from,
                to,
            } => write!(
                f,
                "equivalency '{}' relates '{}' and '{}' but defines no transform in that direction",
                equivalency, from, to
            ),
            UnitError::MissingUnitSystem {
                constant,
                requested: None,
            } => write!(
                f,
                "constant '{}' is defined in more than one unit system; select one explicitly",
                constant
            ),
            UnitError::MissingUnitSystem {
                constant,
                requested: Some(system),
            } => write!(
                f,
                "constant '{}' has no realization in the {} unit system",
                constant, system
            ),
            UnitError::UnknownPhysicalType(name) => {
                write!(f, "'{}' is not a known physical type", name)
            },
            UnitError::UnknownUnit(symbol) => write!(f, "'{}' is not a known unit", symbol),
            UnitError::InvalidUnitString { input, reason } => {
                write!(f, "invalid unit string '{}': {}", input, reason)
            },
            UnitError::UnknownEquivalency(name) => {
                write!(f, "'{}' is not a known equivalency", name)
            },
            UnitError::UnknownConstant(name) => write!(f, "'{}' is not a known constant", name),
            UnitError::UnknownParticle(name) => write!(f, "'{}' is not a known particle", name),
            UnitError::ShapeMismatch { left, right } => write!(
                f,
                "shape mismatch: operands with shapes {:?} and {:?} cannot be combined",
                left, right
            ),
            UnitError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            UnitError::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            UnitError::Numeric(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UnitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UnitError::Numeric(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for UnitError {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::ShapeMismatch { left, right } => UnitError::ShapeMismatch { left, right },
            other => UnitError::Numeric(other),
        }
    }
}

/// Result type alias for unit and quantity operations
pub type UnitResult<T> = Result<T, UnitError>;
