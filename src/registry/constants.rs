// ============================================================================
// Constants Table
// CODATA 2018 and IAU 2015 values
// ============================================================================

use super::named;
use crate::domain::{Constant, UnitError, UnitResult, UnitSystem};
use std::sync::OnceLock;
use tracing::debug;

// Raw SI values shared by the unit table, equivalencies and particles
pub(crate) const SPEED_OF_LIGHT: f64 = 299_792_458.0;
pub(crate) const PLANCK: f64 = 6.626_070_15e-34;
pub(crate) const HBAR: f64 = PLANCK / (2.0 * std::f64::consts::PI);
pub(crate) const BOLTZMANN: f64 = 1.380_649e-23;
pub(crate) const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
pub(crate) const ELEMENTARY_CHARGE_ESU: f64 = 4.803_204_712_570_263e-10;
pub(crate) const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
pub(crate) const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;
pub(crate) const AVOGADRO: f64 = 6.022_140_76e23;
pub(crate) const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;
pub(crate) const PROTON_MASS: f64 = 1.672_621_923_69e-27;
pub(crate) const NEUTRON_MASS: f64 = 1.674_927_498_04e-27;
pub(crate) const DEUTERON_MASS: f64 = 3.343_583_772_4e-27;
pub(crate) const TRITON_MASS: f64 = 5.007_356_744_6e-27;
pub(crate) const ALPHA_MASS: f64 = 6.644_657_335_7e-27;
pub(crate) const ATOMIC_MASS: f64 = 1.660_539_066_60e-27;

const CODATA: &str = "CODATA 2018";
const IAU: &str = "IAU 2015 Resolution B 3";

static CONSTANTS: OnceLock<Vec<Constant>> = OnceLock::new();

/// All registered constants, built on first use.
pub fn all() -> &'static [Constant] {
    CONSTANTS.get_or_init(build)
}

/// Find a constant by abbreviation or (case-insensitive) name.
pub fn lookup(name: &str) -> UnitResult<&'static Constant> {
    let table = all();
    let wanted = name.trim();
    table
        .iter()
        .find(|c| c.abbrev() == wanted)
        .or_else(|| {
            table
                .iter()
                .find(|c| c.name().eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| UnitError::UnknownConstant(name.to_string()))
}

fn build() -> Vec<Constant> {
    let u = named;
    let table = vec![
        Constant::si("c", "Speed of light in vacuum", SPEED_OF_LIGHT, u("m") / u("s"), 0.0, CODATA),
        Constant::si("h", "Planck constant", PLANCK, u("J") * u("s"), 0.0, CODATA),
        Constant::si("hbar", "Reduced Planck constant", HBAR, u("J") * u("s"), 0.0, CODATA),
        Constant::si("k_B", "Boltzmann constant", BOLTZMANN, u("J") / u("K"), 0.0, CODATA),
        Constant::si(
            "G",
            "Gravitational constant",
            6.674_30e-11,
            u("m").powi(3) / (u("kg") * u("s").powi(2)),
            1.5e-15,
            CODATA,
        ),
        Constant::si("N_A", "Avogadro's number", AVOGADRO, u("mol").recip(), 0.0, CODATA),
        Constant::si(
            "R",
            "Gas constant",
            8.314_462_618,
            u("J") / (u("K") * u("mol")),
            0.0,
            CODATA,
        ),
        Constant::si(
            "sigma_sb",
            "Stefan-Boltzmann constant",
            5.670_374_419e-8,
            u("W") / (u("K").powi(4) * u("m").powi(2)),
            0.0,
            CODATA,
        ),
        Constant::si("m_e", "Electron mass", ELECTRON_MASS, u("kg"), 2.8e-40, CODATA),
        Constant::si("m_p", "Proton mass", PROTON_MASS, u("kg"), 5.1e-37, CODATA),
        Constant::si("m_n", "Neutron mass", NEUTRON_MASS, u("kg"), 9.5e-37, CODATA),
        Constant::si("u", "Atomic mass", ATOMIC_MASS, u("kg"), 5.0e-37, CODATA),
        Constant::si("a0", "Bohr radius", 5.291_772_109_03e-11, u("m"), 8.0e-21, CODATA),
        Constant::si(
            "Ryd",
            "Rydberg constant",
            10_973_731.568_160,
            u("m").recip(),
            2.1e-5,
            CODATA,
        ),
        Constant::si(
            "g0",
            "Standard acceleration of gravity",
            9.806_65,
            u("m") / u("s").powi(2),
            0.0,
            CODATA,
        ),
        Constant::si("au", "Astronomical Unit", 1.495_978_707e11, u("m"), 0.0, "IAU 2012 Resolution B2"),
        Constant::si("pc", "Parsec", 3.085_677_581_491_367_4e16, u("m"), 0.0, "Derived from au"),
        Constant::si(
            "M_sun",
            "Solar mass",
            1.988_409_870_698_051e30,
            u("kg"),
            4.468_805_426_856_864e25,
            IAU,
        ),
        Constant::si("R_sun", "Nominal solar radius", 6.957e8, u("m"), 0.0, IAU),
        Constant::si("L_sun", "Nominal solar luminosity", 3.828e26, u("W"), 0.0, IAU),
        Constant::si(
            "M_earth",
            "Earth mass",
            5.972_167_867_791_379e24,
            u("kg"),
            1.342_200_950_165_121_3e20,
            IAU,
        ),
        Constant::si("R_earth", "Nominal Earth equatorial radius", 6.378_1e6, u("m"), 0.0, IAU),
        Constant::si("e", "Electron charge", ELEMENTARY_CHARGE, u("C"), 0.0, CODATA)
            .electromagnetic()
            .with_realization(UnitSystem::Gauss, ELEMENTARY_CHARGE_ESU, u("statC")),
        Constant::si(
            "eps0",
            "Vacuum electric permittivity",
            VACUUM_PERMITTIVITY,
            u("F") / u("m"),
            1.3e-21,
            CODATA,
        )
        .electromagnetic(),
        Constant::si(
            "mu0",
            "Vacuum magnetic permeability",
            VACUUM_PERMEABILITY,
            u("N") / u("A").powi(2),
            1.9e-16,
            CODATA,
        )
        .electromagnetic(),
    ];

    debug!(constants = table.len(), "Constant table initialised");
    table
}
