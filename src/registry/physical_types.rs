// ============================================================================
// Physical-Type Table
// Dimension vector to name classification
// ============================================================================

use crate::domain::{BaseDimension, Dimension, PhysicalType};
use crate::numeric::Rational;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// Integer-exponent entries, dimensions `[L, M, T, I, Θ, N, J, A]`.
/// Vectors listed twice have their names merged.
const ENTRIES: &[([i32; BaseDimension::COUNT], &[&str])] = &[
    ([0, 0, 0, 0, 0, 0, 0, 0], &["dimensionless"]),
    ([1, 0, 0, 0, 0, 0, 0, 0], &["length"]),
    ([0, 1, 0, 0, 0, 0, 0, 0], &["mass"]),
    ([0, 0, 1, 0, 0, 0, 0, 0], &["time"]),
    ([0, 0, 0, 1, 0, 0, 0, 0], &["electrical current"]),
    ([0, 0, 0, 0, 1, 0, 0, 0], &["temperature"]),
    ([0, 0, 0, 0, 0, 1, 0, 0], &["amount of substance"]),
    ([0, 0, 0, 0, 0, 0, 1, 0], &["luminous intensity"]),
    ([0, 0, 0, 0, 0, 0, 0, 1], &["angle"]),
    ([0, 0, 0, 0, 0, 0, 0, 2], &["solid angle"]),
    // Kinematics
    ([2, 0, 0, 0, 0, 0, 0, 0], &["area"]),
    ([3, 0, 0, 0, 0, 0, 0, 0], &["volume"]),
    ([-1, 0, 0, 0, 0, 0, 0, 0], &["wavenumber"]),
    ([-2, 0, 0, 0, 0, 0, 0, 0], &["column density"]),
    ([-3, 0, 0, 0, 0, 0, 0, 0], &["number density"]),
    ([0, 0, -1, 0, 0, 0, 0, 0], &["frequency"]),
    ([1, 0, -1, 0, 0, 0, 0, 0], &["speed", "velocity"]),
    ([1, 0, -2, 0, 0, 0, 0, 0], &["acceleration"]),
    ([1, 0, -3, 0, 0, 0, 0, 0], &["jerk"]),
    ([1, 0, -4, 0, 0, 0, 0, 0], &["snap"]),
    ([1, 0, 1, 0, 0, 0, 0, 0], &["absement"]),
    ([0, 0, -1, 0, 0, 0, 0, 1], &["angular speed", "angular velocity", "angular frequency"]),
    ([0, 0, -2, 0, 0, 0, 0, 1], &["angular acceleration"]),
    ([3, 0, -1, 0, 0, 0, 0, 0], &["volumetric flow rate"]),
    ([2, 0, -1, 0, 0, 0, 0, 0], &["diffusivity", "kinematic viscosity"]),
    // Mechanics
    ([1, 1, -2, 0, 0, 0, 0, 0], &["force"]),
    ([1, 1, -3, 0, 0, 0, 0, 0], &["yank"]),
    ([1, 1, -1, 0, 0, 0, 0, 0], &["momentum", "impulse"]),
    ([2, 1, -1, 0, 0, 0, 0, 0], &["angular momentum", "action"]),
    ([2, 1, -2, 0, 0, 0, 0, 0], &["energy", "work", "torque"]),
    ([2, 1, -3, 0, 0, 0, 0, 0], &["power", "radiant flux"]),
    ([-1, 1, -2, 0, 0, 0, 0, 0], &["pressure", "energy density", "stress"]),
    ([-1, 1, -3, 0, 0, 0, 0, 0], &["power density", "spectral flux density wav"]),
    ([0, 1, -2, 0, 0, 0, 0, 0], &["surface tension", "spectral flux density"]),
    ([0, 1, -3, 0, 0, 0, 0, 0], &["energy flux", "irradiance"]),
    ([0, 1, -3, 0, 0, 0, 0, -2], &["radiance"]),
    ([-1, 1, -1, 0, 0, 0, 0, 0], &["dynamic viscosity"]),
    ([-2, 1, -1, 0, 0, 0, 0, 0], &["mass flux", "momentum density"]),
    ([-3, 1, 0, 0, 0, 0, 0, 0], &["mass density"]),
    ([-2, 1, 0, 0, 0, 0, 0, 0], &["surface mass density"]),
    ([-1, 1, 0, 0, 0, 0, 0, 0], &["linear density"]),
    ([3, -1, 0, 0, 0, 0, 0, 0], &["specific volume"]),
    ([0, 1, -1, 0, 0, 0, 0, 0], &["mass flow"]),
    ([2, 0, -2, 0, 0, 0, 0, 0], &["specific energy", "absorbed dose"]),
    ([2, 0, -3, 0, 0, 0, 0, 0], &["specific power"]),
    ([1, -1, 2, 0, 0, 0, 0, 0], &["compressibility"]),
    ([3, -1, -2, 0, 0, 0, 0, 0], &["gravitational constant"]),
    // Thermodynamics and chemistry
    ([2, 1, -2, 0, -1, 0, 0, 0], &["entropy", "heat capacity"]),
    ([2, 0, -2, 0, -1, 0, 0, 0], &["specific heat capacity", "specific entropy"]),
    ([2, 1, -2, 0, -1, -1, 0, 0], &["molar heat capacity"]),
    ([1, 1, -3, 0, -1, 0, 0, 0], &["thermal conductivity"]),
    ([-2, -1, 3, 0, 1, 0, 0, 0], &["thermal resistance"]),
    ([-1, 0, 0, 0, 1, 0, 0, 0], &["temperature gradient"]),
    ([0, 0, -1, 0, 0, 1, 0, 0], &["catalytic activity"]),
    ([0, 1, 0, 0, 0, -1, 0, 0], &["molar mass"]),
    ([-3, 0, 0, 0, 0, 1, 0, 0], &["molar concentration"]),
    ([3, 0, 0, 0, 0, -1, 0, 0], &["molar volume"]),
    ([-3, 0, -1, 0, 0, 1, 0, 0], &["reaction rate"]),
    // Electromagnetism
    ([0, 0, 1, 1, 0, 0, 0, 0], &["electrical charge"]),
    ([2, 1, -3, -1, 0, 0, 0, 0], &["electrical potential"]),
    ([2, 1, -3, -2, 0, 0, 0, 0], &["electrical resistance"]),
    ([-2, -1, 3, 2, 0, 0, 0, 0], &["electrical conductance"]),
    ([-2, -1, 4, 2, 0, 0, 0, 0], &["electrical capacitance"]),
    ([3, 1, -3, -2, 0, 0, 0, 0], &["electrical resistivity"]),
    ([-3, -1, 3, 2, 0, 0, 0, 0], &["electrical conductivity"]),
    ([2, 1, -2, -2, 0, 0, 0, 0], &["inductance"]),
    ([0, 1, -2, -1, 0, 0, 0, 0], &["magnetic flux density"]),
    ([2, 1, -2, -1, 0, 0, 0, 0], &["magnetic flux"]),
    ([-1, 0, 0, 1, 0, 0, 0, 0], &["magnetic field strength"]),
    ([1, 1, -3, -1, 0, 0, 0, 0], &["electrical field strength"]),
    ([-3, 0, 1, 1, 0, 0, 0, 0], &["electrical charge density"]),
    ([-2, 0, 0, 1, 0, 0, 0, 0], &["electrical current density"]),
    ([-2, 0, 1, 1, 0, 0, 0, 0], &["surface charge density", "electrical flux density"]),
    ([-3, -1, 4, 2, 0, 0, 0, 0], &["permittivity"]),
    ([1, 1, -2, -2, 0, 0, 0, 0], &["permeability"]),
    ([1, 0, 1, 1, 0, 0, 0, 0], &["electrical dipole moment"]),
    ([2, 0, 0, 1, 0, 0, 0, 0], &["magnetic moment"]),
    // Photometry
    ([0, 0, 0, 0, 0, 0, 1, 2], &["luminous flux"]),
    ([-2, 0, 0, 0, 0, 0, 1, 0], &["luminance"]),
    ([-2, 0, 0, 0, 0, 0, 1, 2], &["illuminance"]),
];

/// Gaussian-unit entries whose exponents are half-integers:
/// (length, mass, time) exponents as (numerator, denominator).
const ESU_ENTRIES: &[([(i32, i32); 3], &str)] = &[
    ([(3, 2), (1, 2), (-1, 1)], "electrical charge (ESU)"),
    ([(3, 2), (1, 2), (-2, 1)], "electrical current (ESU)"),
    ([(1, 2), (1, 2), (-1, 1)], "electrical potential (ESU)"),
];

struct PhysicalTypeTable {
    entries: Vec<PhysicalType>,
    by_dimension: HashMap<Dimension, usize>,
    by_name: HashMap<String, usize>,
}

static TABLE: OnceLock<PhysicalTypeTable> = OnceLock::new();

fn table() -> &'static PhysicalTypeTable {
    TABLE.get_or_init(build)
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().replace('_', " ").to_lowercase()
}

fn esu_dimension(exps: [(i32, i32); 3]) -> Option<Dimension> {
    let mut exponents = [Rational::ZERO; BaseDimension::COUNT];
    let bases = [BaseDimension::Length, BaseDimension::Mass, BaseDimension::Time];
    for (base, (num, den)) in bases.iter().zip(exps) {
        exponents[base.index()] = Rational::new(num, den).ok()?;
    }
    Some(Dimension::from_exponents(exponents))
}

fn build() -> PhysicalTypeTable {
    let mut grouped: Vec<(Dimension, Vec<&'static str>)> = Vec::new();
    let mut push = |dimension: Dimension, names: &[&'static str]| {
        match grouped.iter_mut().find(|(d, _)| *d == dimension) {
            Some((_, existing)) => existing.extend_from_slice(names),
            None => grouped.push((dimension, names.to_vec())),
        }
    };

    for (exps, names) in ENTRIES {
        push(Dimension::from_integers(*exps), names);
    }
    for (exps, name) in ESU_ENTRIES {
        if let Some(dimension) = esu_dimension(*exps) {
            push(dimension, &[*name]);
        }
    }

    let mut table = PhysicalTypeTable {
        entries: Vec::with_capacity(grouped.len()),
        by_dimension: HashMap::with_capacity(grouped.len()),
        by_name: HashMap::new(),
    };
    for (index, (dimension, names)) in grouped.into_iter().enumerate() {
        for name in &names {
            table.by_name.insert(normalize_name(name), index);
        }
        table.by_dimension.insert(dimension, index);
        table.entries.push(PhysicalType::new(dimension, &names));
    }

    debug!(
        physical_types = table.entries.len(),
        names = table.by_name.len(),
        "Physical-type table initialised"
    );
    table
}

/// Registered type for a dimension vector, if any.
pub fn lookup_dimension(dimension: &Dimension) -> Option<&'static PhysicalType> {
    let t = table();
    t.by_dimension.get(dimension).map(|i| &t.entries[*i])
}

/// Registered type by any of its names.
pub fn lookup_name(name: &str) -> Option<&'static PhysicalType> {
    let t = table();
    t.by_name.get(&normalize_name(name)).map(|i| &t.entries[*i])
}

/// Every registered type, in table order.
pub fn all() -> &'static [PhysicalType] {
    &table().entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert!(all().len() >= 70);
    }

    #[test]
    fn test_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for pt in all() {
            for name in pt.names() {
                assert!(seen.insert(normalize_name(name)), "duplicate name {}", name);
            }
        }
    }

    #[test]
    fn test_lookup() {
        let velocity = lookup_dimension(&Dimension::VELOCITY).unwrap();
        assert_eq!(velocity.names(), &["speed", "velocity"]);
        assert!(lookup_name("NUMBER_DENSITY").is_some());
        assert!(lookup_name("electrical charge (esu)").is_some());
        assert!(lookup_dimension(&Dimension::from_integers([7, 0, 0, 0, 0, 0, 0, 0])).is_none());
    }
}
