// ============================================================================
// Plasma Formulary
// Characteristic speeds, frequencies and lengths from quantity inputs
// ============================================================================
//
// Inputs are validated by converting them to SI (temperatures may also be
// given in eV or deg_C). Results are SI quantities; frequencies carry rad.
// Array inputs broadcast against scalar particle properties elementwise.

use super::equivalencies::{temperature, temperature_energy};
use crate::domain::{Constant, Particle, Quantity, Unit, UnitError, UnitResult};
use crate::registry::named;

fn constant(abbrev: &str) -> UnitResult<Quantity> {
    Constant::lookup(abbrev)?.quantity()
}

fn metres_per_second() -> Unit {
    &named("m") / &named("s")
}

fn per_cubic_metre() -> Unit {
    named("m").powi(-3)
}

/// Absolute temperature in kelvin; eV and the affine scales are accepted.
fn kelvin(temperature_in: &Quantity) -> UnitResult<Quantity> {
    let t = temperature_in.to_with(&named("K"), &[temperature_energy(), temperature()])?;
    require_non_negative("temperature", &t)?;
    Ok(t)
}

/// Number density in m^-3.
fn number_density(density: &Quantity) -> UnitResult<Quantity> {
    let n = density.to(&per_cubic_metre())?;
    require_non_negative("density", &n)?;
    Ok(n)
}

/// Attach `rad` to an inverse-time quantity.
fn angular(rate: &Quantity) -> UnitResult<Quantity> {
    let per_second = named("s").recip();
    Ok(rate.to(&per_second)? * &named("rad"))
}

/// Reject negative or NaN elements of an already-converted input.
fn require_non_negative(name: &str, value: &Quantity) -> UnitResult<()> {
    match value.value().iter().find(|v| !(*v >= 0.0)) {
        Some(bad) => Err(UnitError::InvalidArgument(format!(
            "{} must be non-negative, got {} {}",
            name,
            bad,
            value.unit()
        ))),
        None => Ok(()),
    }
}

fn require_charged(particle: &Particle) -> UnitResult<()> {
    if particle.is_charged() {
        Ok(())
    } else {
        Err(UnitError::InvalidConfig(format!(
            "'{}' carries no charge",
            particle.name()
        )))
    }
}

/// Most-probable thermal speed `sqrt(2 k_B T / m)`.
///
/// # Errors
/// `InvalidArgument` for a temperature below absolute zero.
pub fn thermal_speed(temperature_in: &Quantity, particle: &Particle) -> UnitResult<Quantity> {
    let t = kelvin(temperature_in)?;
    let energy = constant("k_B")?.checked_mul(&t)?.mul_scalar(2.0);
    energy
        .checked_div(&particle.mass())?
        .sqrt()
        .to(&metres_per_second())
}

/// Plasma frequency `sqrt(n q² / (eps0 m))`, in rad/s.
pub fn plasma_frequency(density: &Quantity, particle: &Particle) -> UnitResult<Quantity> {
    let n = number_density(density)?;
    let q = particle.charge();
    let numerator = n.checked_mul(&q.powi(2))?;
    let denominator = constant("eps0")?.checked_mul(&particle.mass())?;
    angular(&numerator.checked_div(&denominator)?.sqrt())
}

/// Electron Debye length `sqrt(eps0 k_B T_e / (n_e e²))`.
pub fn debye_length(electron_temperature: &Quantity, electron_density: &Quantity) -> UnitResult<Quantity> {
    let t = kelvin(electron_temperature)?;
    let n = number_density(electron_density)?;
    let e = Particle::electron().charge();
    let numerator = constant("eps0")?.checked_mul(&constant("k_B")?)?.checked_mul(&t)?;
    let denominator = n.checked_mul(&e.powi(2))?;
    numerator.checked_div(&denominator)?.sqrt().to(&named("m"))
}

/// Gyrofrequency `|q| B / m`, in rad/s.
///
/// # Errors
/// `InvalidConfig` for an uncharged particle.
pub fn gyrofrequency(field: &Quantity, particle: &Particle) -> UnitResult<Quantity> {
    require_charged(particle)?;
    let b = field.to(&named("T"))?;
    let rate = particle.charge().abs().checked_mul(&b)?.checked_div(&particle.mass())?;
    angular(&rate)
}

/// Thermal gyroradius `v_th / omega_c`.
pub fn gyroradius(
    field: &Quantity,
    particle: &Particle,
    temperature_in: &Quantity,
) -> UnitResult<Quantity> {
    let v = thermal_speed(temperature_in, particle)?;
    let omega = gyrofrequency(field, particle)?;
    // omega carries rad; drop it before dividing
    let omega = Quantity::new(omega.into_value(), named("s").recip());
    v.checked_div(&omega)?.to(&named("m"))
}

/// Alfvén speed `B / sqrt(mu0 n m_i)`.
pub fn alfven_speed(field: &Quantity, density: &Quantity, ion: &Particle) -> UnitResult<Quantity> {
    let b = field.to(&named("T"))?;
    let n = number_density(density)?;
    let rho = n.checked_mul(&ion.mass())?;
    let denominator = constant("mu0")?.checked_mul(&rho)?.sqrt();
    b.checked_div(&denominator)?.to(&metres_per_second())
}

/// Magnetic pressure `B² / (2 mu0)`.
pub fn magnetic_pressure(field: &Quantity) -> UnitResult<Quantity> {
    let b = field.to(&named("T"))?;
    let denominator = constant("mu0")?.mul_scalar(2.0);
    b.powi(2).checked_div(&denominator)?.to(&named("Pa"))
}
