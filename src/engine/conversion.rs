// ============================================================================
// Conversion
// Direct rescaling and explicit equivalency application
// ============================================================================

use super::equivalency::{Equivalency, EquivalencyRule, Transform};
use crate::domain::unit::{approx_eq_rel, SCALE_TOLERANCE};
use crate::domain::{Unit, UnitError, UnitResult};
use crate::numeric::Magnitude;
use tracing::{debug, trace};

/// Units that differ only by a multiplicative factor: same dimension vector
/// and same affine zero point (or none).
pub fn directly_convertible(from: &Unit, to: &Unit) -> bool {
    if from.dimension() != to.dimension() {
        return false;
    }
    match (from.affine_offset(), to.affine_offset()) {
        (None, None) => true,
        (Some(a), Some(b)) => approx_eq_rel(a, b, SCALE_TOLERANCE) && from.si_scale() == to.si_scale(),
        _ => false,
    }
}

/// Multiplier taking a value in `from` to `to`.
///
/// # Errors
/// `IncompatibleUnits` for different dimensions, `ZeroPointMismatch` for
/// affine units of the same dimension (`deg_C` and `K`).
pub fn rescale_factor(from: &Unit, to: &Unit) -> UnitResult<f64> {
    if !directly_convertible(from, to) {
        return Err(UnitError::incompatible(from, to));
    }
    Ok(from.si_scale() / to.si_scale())
}

/// Convert a magnitude between units.
///
/// A direct rescale is tried first. Otherwise the equivalencies are walked in
/// order and, within each, its rules in declaration order; the first rule
/// whose unit pair matches (in either direction) and carries the transform
/// for that direction is applied. Nothing is applied implicitly: with no
/// equivalencies, dimensionally different units fail.
///
/// # Errors
/// - `IncompatibleUnits` when no rule relates the pair
/// - `ZeroPointMismatch` when the pair shares a dimension but not a zero
///   point and no rule relates it
/// - `NoConversionPath` when rules relate the pair but none defines the
///   requested direction
pub fn convert_magnitude(
    magnitude: &Magnitude,
    from: &Unit,
    to: &Unit,
    equivalencies: &[Equivalency],
) -> UnitResult<Magnitude> {
    if directly_convertible(from, to) {
        let factor = from.si_scale() / to.si_scale();
        trace!(from = %from, to = %to, factor, "Direct rescale");
        if factor == 1.0 {
            return Ok(magnitude.clone());
        }
        return Ok(magnitude.map(|v| v * factor));
    }

    let mut blocked: Option<&Equivalency> = None;
    for equivalency in equivalencies {
        for rule in equivalency.rules() {
            match try_rule(magnitude, from, to, rule) {
                RuleOutcome::Applied(result) => {
                    debug!(
                        equivalency = equivalency.name(),
                        rule_from = %rule.from,
                        rule_to = %rule.to,
                        from = %from,
                        to = %to,
                        "Applied equivalency"
                    );
                    return Ok(result);
                }
                RuleOutcome::Blocked => {
                    blocked.get_or_insert(equivalency);
                }
                RuleOutcome::NoMatch => {}
            }
        }
    }

    match blocked {
        Some(equivalency) => Err(UnitError::NoConversionPath {
            equivalency: equivalency.name().to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }),
        None => Err(UnitError::incompatible(from, to)),
    }
}

enum RuleOutcome {
    Applied(Magnitude),
    /// Unit pair matched but the direction has no transform
    Blocked,
    NoMatch,
}

fn try_rule(magnitude: &Magnitude, from: &Unit, to: &Unit, rule: &EquivalencyRule) -> RuleOutcome {
    let mut outcome = RuleOutcome::NoMatch;
    if directly_convertible(from, &rule.from) && directly_convertible(&rule.to, to) {
        match &rule.forward {
            Some(transform) => {
                return RuleOutcome::Applied(apply(magnitude, from, &rule.from, transform, &rule.to, to))
            }
            None => outcome = RuleOutcome::Blocked,
        }
    }
    if directly_convertible(from, &rule.to) && directly_convertible(&rule.from, to) {
        match &rule.inverse {
            Some(transform) => {
                return RuleOutcome::Applied(apply(magnitude, from, &rule.to, transform, &rule.from, to))
            }
            None => outcome = RuleOutcome::Blocked,
        }
    }
    outcome
}

/// Rescale into the rule's source unit, transform, then rescale out of the
/// rule's target unit.
fn apply(
    magnitude: &Magnitude,
    from: &Unit,
    rule_in: &Unit,
    transform: &Transform,
    rule_out: &Unit,
    to: &Unit,
) -> Magnitude {
    let pre = from.si_scale() / rule_in.si_scale();
    let post = rule_out.si_scale() / to.si_scale();
    magnitude.map(|v| transform.apply(v * pre) * post)
}
