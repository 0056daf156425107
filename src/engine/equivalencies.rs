// ============================================================================
// Built-in Equivalencies
// Physically motivated conversions between dimensionally different units
// ============================================================================
//
// Constants are bound when the equivalency is constructed; none of these is
// ever applied unless the caller passes it to a conversion.

use super::equivalency::{Equivalency, Transform};
use crate::domain::{Quantity, Unit, UnitError, UnitResult};
use crate::registry::constants::{BOLTZMANN, ELEMENTARY_CHARGE, PLANCK, SPEED_OF_LIGHT};
use crate::registry::named;

/// Names accepted by [`equivalency_by_name`], in documentation order.
pub const BUILTIN_NAMES: [&str; 7] = [
    "temperature_energy",
    "temperature",
    "mass_energy",
    "spectral",
    "dimensionless_angles",
    "parallax",
    "molar_mass_amu",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

/// Parameterless built-in by name.
///
/// # Errors
/// `UnknownEquivalency` for anything outside [`BUILTIN_NAMES`].
pub fn equivalency_by_name(name: &str) -> UnitResult<Equivalency> {
    match name {
        "temperature_energy" => Ok(temperature_energy()),
        "temperature" => Ok(temperature()),
        "mass_energy" => Ok(mass_energy()),
        "spectral" => Ok(spectral()),
        "dimensionless_angles" => Ok(dimensionless_angles()),
        "parallax" => Ok(parallax()),
        "molar_mass_amu" => Ok(molar_mass_amu()),
        _ => Err(UnitError::UnknownEquivalency(name.to_string())),
    }
}

/// Thermal energy `E = k_B T`, relating kelvin and electronvolts.
pub fn temperature_energy() -> Equivalency {
    Equivalency::builder("temperature_energy")
        .rule(named("K"), named("eV"), Transform::Scale(BOLTZMANN / ELEMENTARY_CHARGE))
        .build()
}

/// Kelvin, Celsius and Fahrenheit scales with their zero-point offsets.
pub fn temperature() -> Equivalency {
    let five_ninths = 5.0 / 9.0;
    Equivalency::builder("temperature")
        .rule(
            named("deg_C"),
            named("K"),
            Transform::Affine {
                scale: 1.0,
                offset: 273.15,
            },
        )
        .rule(
            named("deg_F"),
            named("K"),
            Transform::Affine {
                scale: five_ninths,
                offset: 273.15 - 32.0 * five_ninths,
            },
        )
        .rule(
            named("deg_C"),
            named("deg_F"),
            Transform::Affine {
                scale: 1.8,
                offset: 32.0,
            },
        )
        .build()
}

/// Rest energy `E = m c²` and its surface, volume and rate densities.
pub fn mass_energy() -> Equivalency {
    let c2 = Transform::Scale(SPEED_OF_LIGHT * SPEED_OF_LIGHT);
    let (kg, joule, m, s) = (named("kg"), named("J"), named("m"), named("s"));
    Equivalency::builder("mass_energy")
        .rule(kg.clone(), joule.clone(), c2.clone())
        .rule(&kg / &m.powi(2), &joule / &m.powi(2), c2.clone())
        .rule(&kg / &m.powi(3), &joule / &m.powi(3), c2.clone())
        .rule(&kg / &s, &joule / &s, c2)
        .build()
}

/// Wavelength, frequency, photon energy and wavenumber.
pub fn spectral() -> Equivalency {
    let hc = PLANCK * SPEED_OF_LIGHT;
    let (m, hz, joule) = (named("m"), named("Hz"), named("J"));
    let wavenumber = m.recip();
    Equivalency::builder("spectral")
        .rule(m.clone(), hz.clone(), Transform::Reciprocal(SPEED_OF_LIGHT))
        .rule(m.clone(), joule.clone(), Transform::Reciprocal(hc))
        .rule(hz.clone(), joule.clone(), Transform::Scale(PLANCK))
        .rule(m, wavenumber.clone(), Transform::Reciprocal(1.0))
        .rule(wavenumber.clone(), hz, Transform::Scale(SPEED_OF_LIGHT))
        .rule(wavenumber, joule, Transform::Scale(hc))
        .build()
}

/// Treat radians as dimensionless.
pub fn dimensionless_angles() -> Equivalency {
    Equivalency::builder("dimensionless_angles")
        .rule(named("rad"), Unit::dimensionless(), Transform::Identity)
        .build()
}

/// Annual parallax and distance: `d[pc] = 1 / p[arcsec]`.
pub fn parallax() -> Equivalency {
    Equivalency::builder("parallax")
        .rule(named("arcsec"), named("pc"), Transform::Reciprocal(1.0))
        .build()
}

/// Molar mass in g/mol and particle mass in atomic mass units.
pub fn molar_mass_amu() -> Equivalency {
    Equivalency::builder("molar_mass_amu")
        .rule(&named("g") / &named("mol"), named("u"), Transform::Identity)
        .build()
}

/// Radio-convention Doppler velocity about a rest frequency, wavelength or
/// photon energy: `v = c (1 - f / f0)`.
///
/// # Errors
/// `InvalidConfig` when `rest` is not a positive scalar spectral quantity.
pub fn doppler_radio(rest: &Quantity) -> UnitResult<Equivalency> {
    let hz = named("Hz");
    let f0 = rest
        .to_with(&hz, &[spectral()])?
        .scalar()
        .ok_or_else(|| UnitError::InvalidConfig("rest frequency must be a scalar".to_string()))?;
    if !(f0.is_finite() && f0 > 0.0) {
        return Err(UnitError::InvalidConfig(format!(
            "rest frequency must be positive, got {} Hz",
            f0
        )));
    }

    let c = SPEED_OF_LIGHT;
    let lambda0 = c / f0;
    let e0 = PLANCK * f0;
    let velocity = &named("m") / &named("s");

    Ok(Equivalency::builder("doppler_radio")
        .two_way(
            hz,
            velocity.clone(),
            Transform::custom("frequency to radio velocity", move |f| c * (1.0 - f / f0)),
            Transform::custom("radio velocity to frequency", move |v| f0 * (1.0 - v / c)),
        )
        .two_way(
            named("m"),
            velocity.clone(),
            Transform::custom("wavelength to radio velocity", move |l| c * (1.0 - lambda0 / l)),
            Transform::custom("radio velocity to wavelength", move |v| lambda0 / (1.0 - v / c)),
        )
        .two_way(
            named("J"),
            velocity,
            Transform::custom("energy to radio velocity", move |e| c * (1.0 - e / e0)),
            Transform::custom("radio velocity to energy", move |v| e0 * (1.0 - v / c)),
        )
        .parameter("rest", rest.clone())
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::unit;

    fn u(s: &str) -> Unit {
        unit(s).unwrap()
    }

    fn convert(value: f64, from: &str, to: &str, eq: Equivalency) -> f64 {
        Quantity::new(value, u(from))
            .to_with(&u(to), &[eq])
            .unwrap()
            .scalar()
            .unwrap()
    }

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(1e-300)
    }

    #[test]
    fn test_temperature_energy() {
        assert!(close(convert(1.0, "eV", "K", temperature_energy()), 11_604.518, 1e-7));
        assert!(close(convert(1.0e4, "K", "meV", temperature_energy()), 861.733, 1e-6));
    }

    #[test]
    fn test_temperature_scales() {
        assert!(close(convert(100.0, "deg_C", "deg_F", temperature()), 212.0, 1e-12));
        assert!(close(convert(0.0, "deg_C", "K", temperature()), 273.15, 1e-12));
        assert!(close(convert(32.0, "deg_F", "K", temperature()), 273.15, 1e-12));
        assert!(close(convert(300.0, "K", "deg_C", temperature()), 26.85, 1e-10));
        assert!(close(convert(-40.0, "deg_F", "deg_C", temperature()), -40.0, 1e-12));
        assert!(close(convert(0.0, "deg_C", "mK", temperature()), 273_150.0, 1e-12));
    }

    #[test]
    fn test_mass_energy() {
        let c2 = SPEED_OF_LIGHT * SPEED_OF_LIGHT;
        assert!(close(convert(1.0, "kg", "J", mass_energy()), c2, 1e-12));
        assert!(close(convert(1.0, "g / s", "W", mass_energy()), c2 * 1e-3, 1e-12));
    }

    #[test]
    fn test_spectral() {
        assert!(close(convert(500.0, "nm", "Hz", spectral()), 5.995_849_16e14, 1e-8));
        assert!(close(convert(1.0, "eV", "nm", spectral()), 1_239.841_98, 1e-8));
        assert!(close(convert(21.106, "cm", "GHz", spectral()), 1.420_4, 1e-4));
        assert!(close(convert(2.0, "cm", "1 / cm", spectral()), 0.5, 1e-12));
    }

    #[test]
    fn test_dimensionless_angles() {
        let v = Quantity::new(180.0, u("deg"))
            .to_with(&Unit::dimensionless(), &[dimensionless_angles()])
            .unwrap();
        assert!(close(v.scalar().unwrap(), std::f64::consts::PI, 1e-12));
    }

    #[test]
    fn test_parallax() {
        assert!(close(convert(10.0, "mas", "pc", parallax()), 100.0, 1e-12));
        assert!(close(convert(1.0, "kpc", "mas", parallax()), 1.0, 1e-12));
    }

    #[test]
    fn test_molar_mass() {
        assert!(close(convert(12.0, "g / mol", "u", molar_mass_amu()), 12.0, 1e-12));
    }

    #[test]
    fn test_doppler_radio() {
        let rest = Quantity::new(1.0, u("GHz"));
        let eq = doppler_radio(&rest).unwrap();
        assert!(eq.parameter("rest").is_some());
        let v = convert(0.999, "GHz", "km / s", eq.clone());
        assert!(close(v, 299.792_458, 1e-9));
        assert!(close(convert(v, "km / s", "GHz", eq), 0.999, 1e-12));
    }

    #[test]
    fn test_doppler_rest_wavelength() {
        let rest = Quantity::new(21.106_114, u("cm"));
        let eq = doppler_radio(&rest).unwrap();
        assert!(convert(21.106_114, "cm", "km / s", eq).abs() < 1e-6);
    }

    #[test]
    fn test_doppler_rejects_bad_rest() {
        assert!(doppler_radio(&Quantity::new(1.0, u("kg"))).is_err());
        assert!(matches!(
            doppler_radio(&Quantity::new(vec![1.0, 2.0], u("GHz"))),
            Err(UnitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_by_name() {
        for name in BUILTIN_NAMES {
            assert_eq!(equivalency_by_name(name).unwrap().name(), name);
        }
        assert_eq!(
            equivalency_by_name("telepathy").unwrap_err(),
            UnitError::UnknownEquivalency("telepathy".to_string())
        );
        assert!(!is_builtin("doppler_radio"));
    }
}
