// ============================================================================
// Equivalency Model
// Tagged transform pairs relating units of different dimension
// ============================================================================

use crate::domain::{Quantity, Unit};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Scalar function taking a value in a rule's `from` unit to its `to` unit.
#[derive(Clone)]
pub enum Transform {
    /// `y = x`
    Identity,
    /// `y = k x`
    Scale(f64),
    /// `y = k / x`
    Reciprocal(f64),
    /// `y = scale x + offset`
    Affine { scale: f64, offset: f64 },
    /// Anything else; carries a label for diagnostics
    Custom {
        label: &'static str,
        func: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    },
}

impl Transform {
    /// Wrap a closure as a custom transform.
    pub fn custom<F>(label: &'static str, func: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Transform::Custom {
            label,
            func: Arc::new(func),
        }
    }

    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Scale(k) => k * x,
            Transform::Reciprocal(k) => k / x,
            Transform::Affine { scale, offset } => scale * x + offset,
            Transform::Custom { func, .. } => func(x),
        }
    }

    /// Closed-form inverse, when one exists.
    pub fn inverse(&self) -> Option<Transform> {
        match self {
            Transform::Identity => Some(Transform::Identity),
            Transform::Scale(k) if *k != 0.0 => Some(Transform::Scale(1.0 / k)),
            Transform::Reciprocal(k) => Some(Transform::Reciprocal(*k)),
            Transform::Affine { scale, offset } if *scale != 0.0 => Some(Transform::Affine {
                scale: 1.0 / scale,
                offset: -offset / scale,
            }),
            _ => None,
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => write!(f, "Identity"),
            Transform::Scale(k) => write!(f, "Scale({})", k),
            Transform::Reciprocal(k) => write!(f, "Reciprocal({})", k),
            Transform::Affine { scale, offset } => {
                write!(f, "Affine {{ scale: {}, offset: {} }}", scale, offset)
            }
            Transform::Custom { label, .. } => write!(f, "Custom({})", label),
        }
    }
}

/// One unit pair and the transforms between them. Either direction may be
/// missing; a one-way rule still claims the pair.
#[derive(Debug, Clone)]
pub struct EquivalencyRule {
    pub from: Unit,
    pub to: Unit,
    pub forward: Option<Transform>,
    pub inverse: Option<Transform>,
}

impl EquivalencyRule {
    pub fn is_two_way(&self) -> bool {
        self.forward.is_some() && self.inverse.is_some()
    }
}

/// A named, ordered list of rules, with the parameters it was built from.
#[derive(Debug, Clone)]
pub struct Equivalency {
    name: String,
    rules: Vec<EquivalencyRule>,
    parameters: BTreeMap<String, Quantity>,
}

impl Equivalency {
    pub fn builder(name: impl Into<String>) -> EquivalencyBuilder {
        EquivalencyBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in declaration order; the first matching rule wins.
    pub fn rules(&self) -> &[EquivalencyRule] {
        &self.rules
    }

    pub fn parameter(&self, key: &str) -> Option<&Quantity> {
        self.parameters.get(key)
    }

    pub fn parameters(&self) -> &BTreeMap<String, Quantity> {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append another equivalency's rules after this one's.
    pub fn merged(mut self, other: &Equivalency) -> Equivalency {
        self.name = format!("{}+{}", self.name, other.name);
        self.rules.extend(other.rules.iter().cloned());
        for (key, value) in &other.parameters {
            self.parameters
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }
}

impl fmt::Display for Equivalency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.name)?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let arrow = match (&rule.forward, &rule.inverse) {
                (Some(_), Some(_)) => "<->",
                (Some(_), None) => "->",
                (None, Some(_)) => "<-",
                (None, None) => "--",
            };
            write!(f, "[{}] {} [{}]", rule.from, arrow, rule.to)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent constructor for custom equivalencies.
///
/// # Example
/// ```rust
/// use quantity_engine::prelude::*;
///
/// let eq = Equivalency::builder("doubling")
///     .rule(unit("m")?, unit("s")?, Transform::Scale(2.0))
///     .build();
/// let t = Quantity::new(3.0, unit("m")?).to_with(&unit("s")?, &[eq])?;
/// assert_eq!(t.scalar(), Some(6.0));
/// # Ok::<(), UnitError>(())
/// ```
pub struct EquivalencyBuilder {
    equivalency: Equivalency,
}

impl EquivalencyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            equivalency: Equivalency {
                name: name.into(),
                rules: Vec::new(),
                parameters: BTreeMap::new(),
            },
        }
    }

    /// Two-way rule whose inverse is derived from `forward`. Transforms
    /// without a closed-form inverse produce a one-way rule.
    pub fn rule(self, from: Unit, to: Unit, forward: Transform) -> Self {
        let inverse = forward.inverse();
        self.push(from, to, Some(forward), inverse)
    }

    /// Two-way rule with an explicit inverse.
    pub fn two_way(self, from: Unit, to: Unit, forward: Transform, inverse: Transform) -> Self {
        self.push(from, to, Some(forward), Some(inverse))
    }

    pub fn one_way(self, from: Unit, to: Unit, forward: Transform) -> Self {
        self.push(from, to, Some(forward), None)
    }

    pub fn parameter(mut self, key: impl Into<String>, value: Quantity) -> Self {
        self.equivalency.parameters.insert(key.into(), value);
        self
    }

    fn push(
        mut self,
        from: Unit,
        to: Unit,
        forward: Option<Transform>,
        inverse: Option<Transform>,
    ) -> Self {
        self.equivalency.rules.push(EquivalencyRule {
            from,
            to,
            forward,
            inverse,
        });
        self
    }

    pub fn build(self) -> Equivalency {
        self.equivalency
    }
}
