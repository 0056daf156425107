// ============================================================================
// Unit Table
// Named units, aliases and SI-prefixed variants
// ============================================================================

use super::constants::{ATOMIC_MASS, ELEMENTARY_CHARGE};
use crate::domain::{BaseDimension, Dimension, NamedUnit, UnitSystem};
use crate::numeric::Rational;
use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// SI prefixes: (symbol, name, factor). Micro is `u`, with `µ`/`μ` aliases.
pub const PREFIXES: [(&str, &str, f64); 20] = [
    ("y", "yocto", 1e-24),
    ("z", "zepto", 1e-21),
    ("a", "atto", 1e-18),
    ("f", "femto", 1e-15),
    ("p", "pico", 1e-12),
    ("n", "nano", 1e-9),
    ("u", "micro", 1e-6),
    ("m", "milli", 1e-3),
    ("c", "centi", 1e-2),
    ("d", "deci", 1e-1),
    ("da", "deca", 1e1),
    ("h", "hecto", 1e2),
    ("k", "kilo", 1e3),
    ("M", "mega", 1e6),
    ("G", "giga", 1e9),
    ("T", "tera", 1e12),
    ("P", "peta", 1e15),
    ("E", "exa", 1e18),
    ("Z", "zetta", 1e21),
    ("Y", "yotta", 1e24),
];

const MICRO_ALIASES: [&str; 2] = ["µ", "μ"];

/// Read-only map from symbols, long names and aliases to named units.
#[derive(Debug)]
pub struct UnitRegistry {
    by_key: HashMap<String, Arc<NamedUnit>>,
}

static REGISTRY: OnceLock<UnitRegistry> = OnceLock::new();

/// The process-wide unit registry, built on first use.
pub fn unit_registry() -> &'static UnitRegistry {
    REGISTRY.get_or_init(UnitRegistry::build)
}

impl UnitRegistry {
    pub fn get(&self, key: &str) -> Option<&Arc<NamedUnit>> {
        self.by_key.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Number of lookup keys (symbols, names, aliases, prefixed forms).
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    /// Base unit of `base` in `system`.
    pub fn base_unit(&self, base: BaseDimension, system: UnitSystem) -> &Arc<NamedUnit> {
        let symbol = match (system, base) {
            (UnitSystem::Si, BaseDimension::Mass) => "kg",
            (UnitSystem::Si, BaseDimension::Length) => "m",
            (UnitSystem::Si, BaseDimension::Current) => "A",
            (_, BaseDimension::Mass) => "g",
            (_, BaseDimension::Length) => "cm",
            (_, BaseDimension::Current) => "Bi",
            (_, BaseDimension::Time) => "s",
            (_, BaseDimension::Temperature) => "K",
            (_, BaseDimension::Amount) => "mol",
            (_, BaseDimension::LuminousIntensity) => "cd",
            (_, BaseDimension::Angle) => "rad",
        };
        self.by_key
            .get(symbol)
            .expect("base units are always registered")
    }

    // ========================================================================
    // Construction
    // ========================================================================

    fn build() -> Self {
        let mut registry = UnitRegistry {
            by_key: HashMap::with_capacity(1024),
        };

        let named = unit_table();
        let base_count = named.len();
        for (unit, aliases) in named {
            registry.insert_unit(unit, aliases);
        }

        let prefixable: Vec<Arc<NamedUnit>> = {
            let mut seen: Vec<Arc<NamedUnit>> = Vec::new();
            for unit in registry.by_key.values() {
                if unit.is_prefixable() && !seen.iter().any(|u| Arc::ptr_eq(u, unit)) {
                    seen.push(unit.clone());
                }
            }
            seen.sort_by(|a, b| a.symbol().cmp(b.symbol()));
            seen
        };

        for unit in &prefixable {
            for (prefix, prefix_name, factor) in PREFIXES {
                let symbol = format!("{}{}", prefix, unit.symbol());
                if registry.by_key.contains_key(&symbol) {
                    continue;
                }
                let prefixed = Arc::new(NamedUnit::new(
                    symbol.clone(),
                    format!("{}{}", prefix_name, unit.name()),
                    factor * unit.scale(),
                    unit.dimension(),
                ));
                registry.insert_key(prefixed.name().to_string(), &prefixed);
                if prefix == "u" {
                    for alias in MICRO_ALIASES {
                        registry.insert_key(format!("{}{}", alias, unit.symbol()), &prefixed);
                    }
                }
                registry.by_key.insert(symbol, prefixed);
            }
        }

        debug!(
            named_units = base_count,
            prefixable = prefixable.len(),
            keys = registry.by_key.len(),
            "Unit registry initialised"
        );

        registry
    }

    fn insert_unit(&mut self, unit: NamedUnit, aliases: &[&str]) {
        let unit = Arc::new(unit);
        self.insert_key(unit.symbol().to_string(), &unit);
        self.insert_key(unit.name().to_string(), &unit);
        for alias in aliases {
            self.insert_key(alias.to_string(), &unit);
        }
    }

    /// First registration of a key wins.
    fn insert_key(&mut self, key: String, unit: &Arc<NamedUnit>) {
        self.by_key.entry(key).or_insert_with(|| unit.clone());
    }
}

// ============================================================================
// Unit Definitions
// ============================================================================

fn dim(exps: [i32; BaseDimension::COUNT]) -> Dimension {
    Dimension::from_integers(exps)
}

fn def(unit: NamedUnit, aliases: &'static [&'static str]) -> (NamedUnit, &'static [&'static str]) {
    (unit, aliases)
}

fn statcoulomb_dimension() -> Dimension {
    Dimension::MASS.pow(Rational::HALF)
        * Dimension::LENGTH.pow(Rational::new(3, 2).expect("constant exponent"))
        / Dimension::TIME
}

/// Every directly named unit with its extra lookup keys.
///
/// Dimensions are `[L, M, T, I, Θ, N, J, A]`.
fn unit_table() -> Vec<(NamedUnit, &'static [&'static str])> {
    let u = NamedUnit::new;
    vec![
        // SI base units
        def(u("m", "meter", 1.0, Dimension::LENGTH).with_prefixes(), &["meters", "metre"]),
        def(u("kg", "kilogram", 1.0, Dimension::MASS), &["kilograms"]),
        def(u("g", "gram", 1e-3, Dimension::MASS).with_prefixes(), &["grams"]),
        def(u("s", "second", 1.0, Dimension::TIME).with_prefixes(), &["seconds", "sec"]),
        def(u("A", "ampere", 1.0, Dimension::CURRENT).with_prefixes(), &["amp"]),
        def(u("K", "Kelvin", 1.0, Dimension::TEMPERATURE).with_prefixes(), &["kelvin"]),
        def(u("mol", "mole", 1.0, Dimension::AMOUNT).with_prefixes(), &[]),
        def(u("cd", "candela", 1.0, Dimension::LUMINOUS_INTENSITY).with_prefixes(), &[]),
        def(u("rad", "radian", 1.0, Dimension::ANGLE).with_prefixes(), &[]),
        // Angles
        def(u("sr", "steradian", 1.0, dim([0, 0, 0, 0, 0, 0, 0, 2])).with_prefixes(), &[]),
        def(u("deg", "degree", PI / 180.0, Dimension::ANGLE), &["°"]),
        def(u("arcmin", "arcminute", PI / 10_800.0, Dimension::ANGLE), &[]),
        def(u("arcsec", "arcsecond", PI / 648_000.0, Dimension::ANGLE).with_prefixes(), &[]),
        def(u("mas", "milliarcsecond", PI / 648_000_000.0, Dimension::ANGLE), &[]),
        // SI derived units
        def(u("Hz", "Hertz", 1.0, Dimension::FREQUENCY).with_prefixes(), &["hertz"]),
        def(u("N", "Newton", 1.0, Dimension::FORCE).with_prefixes(), &["newton"]),
        def(u("J", "Joule", 1.0, Dimension::ENERGY).with_prefixes(), &["joule"]),
        def(u("W", "Watt", 1.0, Dimension::POWER).with_prefixes(), &["watt"]),
        def(u("Pa", "Pascal", 1.0, Dimension::PRESSURE).with_prefixes(), &["pascal"]),
        def(u("C", "Coulomb", 1.0, Dimension::CHARGE).with_prefixes(), &["coulomb"]),
        def(u("V", "Volt", 1.0, dim([2, 1, -3, -1, 0, 0, 0, 0])).with_prefixes(), &["volt"]),
        def(u("Ohm", "Ohm", 1.0, dim([2, 1, -3, -2, 0, 0, 0, 0])).with_prefixes(), &["ohm", "Ω"]),
        def(u("S", "Siemens", 1.0, dim([-2, -1, 3, 2, 0, 0, 0, 0])).with_prefixes(), &["siemens"]),
        def(u("F", "Farad", 1.0, dim([-2, -1, 4, 2, 0, 0, 0, 0])).with_prefixes(), &["farad"]),
        def(u("H", "Henry", 1.0, dim([2, 1, -2, -2, 0, 0, 0, 0])).with_prefixes(), &["henry"]),
        def(u("T", "Tesla", 1.0, Dimension::MAGNETIC_FLUX_DENSITY).with_prefixes(), &["tesla"]),
        def(u("Wb", "Weber", 1.0, dim([2, 1, -2, -1, 0, 0, 0, 0])).with_prefixes(), &["weber"]),
        def(u("Bq", "becquerel", 1.0, Dimension::FREQUENCY).with_prefixes(), &[]),
        def(u("Gy", "gray", 1.0, dim([2, 0, -2, 0, 0, 0, 0, 0])).with_prefixes(), &[]),
        def(u("lm", "lumen", 1.0, dim([0, 0, 0, 0, 0, 0, 1, 2])).with_prefixes(), &[]),
        def(u("lx", "lux", 1.0, dim([-2, 0, 0, 0, 0, 0, 1, 2])).with_prefixes(), &[]),
        def(u("kat", "katal", 1.0, dim([0, 0, -1, 0, 0, 1, 0, 0])).with_prefixes(), &[]),
        def(u("L", "liter", 1e-3, Dimension::VOLUME).with_prefixes(), &["l", "litre"]),
        // Time
        def(u("min", "minute", 60.0, Dimension::TIME), &[]),
        def(u("h", "hour", 3600.0, Dimension::TIME), &["hr"]),
        def(u("d", "day", 86_400.0, Dimension::TIME), &[]),
        def(u("wk", "week", 604_800.0, Dimension::TIME), &[]),
        def(u("yr", "year", 31_557_600.0, Dimension::TIME).with_prefixes(), &["a", "annum"]),
        // Energy, mass and length scales
        def(u("eV", "electronvolt", ELEMENTARY_CHARGE, Dimension::ENERGY).with_prefixes(), &[]),
        def(u("u", "atomic mass unit", ATOMIC_MASS, Dimension::MASS), &["Da", "Dalton", "amu"]),
        def(u("Angstrom", "Angstrom", 1e-10, Dimension::LENGTH), &["AA", "Å", "angstrom"]),
        def(u("micron", "micron", 1e-6, Dimension::LENGTH), &[]),
        def(u("barn", "barn", 1e-28, Dimension::AREA).with_prefixes(), &[]),
        // Astronomical
        def(u("au", "astronomical unit", 1.495_978_707e11, Dimension::LENGTH), &["AU"]),
        def(u("pc", "parsec", 3.085_677_581_491_367_4e16, Dimension::LENGTH).with_prefixes(), &[]),
        def(u("lyr", "lightyear", 9.460_730_472_580_8e15, Dimension::LENGTH), &["ly"]),
        def(u("solMass", "solar mass", 1.988_409_870_698_051e30, Dimension::MASS), &["M_sun", "Msun"]),
        def(u("solRad", "solar radius", 6.957e8, Dimension::LENGTH), &["R_sun", "Rsun"]),
        def(u("solLum", "solar luminosity", 3.828e26, Dimension::POWER), &["L_sun", "Lsun"]),
        def(u("earthMass", "Earth mass", 5.972_167_867_791_379e24, Dimension::MASS), &["M_earth"]),
        def(u("earthRad", "Earth radius", 6.378_1e6, Dimension::LENGTH), &["R_earth"]),
        def(u("Jy", "Jansky", 1e-26, dim([0, 1, -2, 0, 0, 0, 0, 0])).with_prefixes(), &["jansky"]),
        // CGS and Gaussian
        def(u("erg", "erg", 1e-7, Dimension::ENERGY), &[]),
        def(u("dyn", "dyne", 1e-5, Dimension::FORCE), &[]),
        def(u("Ba", "barye", 0.1, Dimension::PRESSURE), &[]),
        def(u("P", "poise", 0.1, dim([-1, 1, -1, 0, 0, 0, 0, 0])), &[]),
        def(u("St", "stokes", 1e-4, dim([2, 0, -1, 0, 0, 0, 0, 0])), &[]),
        def(u("G", "Gauss", 1e-4, Dimension::MAGNETIC_FLUX_DENSITY).with_prefixes(), &["gauss"]),
        def(u("Bi", "Biot", 10.0, Dimension::CURRENT), &["abA", "abampere"]),
        def(
            u("statC", "statcoulomb", 1e-3f64.sqrt() * 1e-2f64.powf(1.5), statcoulomb_dimension()),
            &["Fr", "franklin", "esu"],
        ),
        // Pressure
        def(u("bar", "bar", 1e5, Dimension::PRESSURE).with_prefixes(), &[]),
        def(u("atm", "atmosphere", 101_325.0, Dimension::PRESSURE), &[]),
        def(u("Torr", "Torr", 101_325.0 / 760.0, Dimension::PRESSURE), &[]),
        // Dimensionless
        def(u("percent", "percent", 0.01, Dimension::DIMENSIONLESS), &["%", "pct"]),
        // Affine temperatures (kelvin = value * scale + offset)
        def(
            u("deg_C", "degree Celsius", 1.0, Dimension::TEMPERATURE).with_offset(273.15),
            &["Celsius", "degC", "°C"],
        ),
        def(
            u("deg_F", "degree Fahrenheit", 5.0 / 9.0, Dimension::TEMPERATURE)
                .with_offset(459.67 * 5.0 / 9.0),
            &["Fahrenheit", "degF", "°F"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_and_names_resolve_to_same_unit() {
        let reg = unit_registry();
        let by_symbol = reg.get("km").unwrap();
        let by_name = reg.get("kilometer").unwrap();
        assert!(Arc::ptr_eq(by_symbol, by_name));
        assert_eq!(by_symbol.scale(), 1000.0);
    }

    #[test]
    fn test_micro_aliases() {
        let reg = unit_registry();
        let um = reg.get("um").unwrap();
        assert!(Arc::ptr_eq(um, reg.get("µm").unwrap()));
        assert!(Arc::ptr_eq(um, reg.get("μm").unwrap()));
        assert!((um.scale() - 1e-6).abs() < 1e-20);
    }

    #[test]
    fn test_explicit_units_win_over_prefixes() {
        let reg = unit_registry();
        // "au" is the astronomical unit, never atto-u
        assert_eq!(reg.get("au").unwrap().name(), "astronomical unit");
        assert_eq!(reg.get("kg").unwrap().scale(), 1.0);
        assert_eq!(reg.get("h").unwrap().name(), "hour");
        assert_eq!(reg.get("Pa").unwrap().name(), "Pascal");
        assert_eq!(reg.get("cd").unwrap().name(), "candela");
    }

    #[test]
    fn test_prefixed_variants() {
        let reg = unit_registry();
        assert!((reg.get("keV").unwrap().scale() - 1.602176634e-16).abs() < 1e-28);
        assert!(reg.contains("Mpc"));
        assert!(reg.contains("Gyr"));
        assert!(reg.contains("mK"));
        assert!(!reg.contains("kdeg_C"));
        assert!(!reg.contains("kmin"));
    }

    #[test]
    fn test_base_units() {
        let reg = unit_registry();
        assert_eq!(reg.base_unit(BaseDimension::Mass, UnitSystem::Si).symbol(), "kg");
        assert_eq!(reg.base_unit(BaseDimension::Mass, UnitSystem::Cgs).symbol(), "g");
        assert_eq!(reg.base_unit(BaseDimension::Length, UnitSystem::Gauss).symbol(), "cm");
        assert_eq!(reg.base_unit(BaseDimension::Current, UnitSystem::Cgs).symbol(), "Bi");
    }

    #[test]
    fn test_affine_units() {
        let reg = unit_registry();
        let f = reg.get("deg_F").unwrap();
        // 32 F is 273.15 K
        assert!((32.0 * f.scale() + f.offset() - 273.15).abs() < 1e-9);
        assert!(reg.get("degC").unwrap().is_affine());
    }
}
