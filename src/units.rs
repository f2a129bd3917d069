// Copyright 2024 Mikael Lund
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! # Units and conversion factors
//!
//! Charges are in units of the elementary charge, _e_, and lengths in ångström, Å.
//! With these input units the field is obtained in V/Å and the field gradient in V/Å².
//! Quadrupole moments are given in atomic units, _e_·bohr², and converted to C·Å²
//! so that the contraction with the field gradient yields joule, which is finally
//! expressed in electronvolt.

use physical_constants::{BOHR_RADIUS, ELEMENTARY_CHARGE, VACUUM_ELECTRIC_PERMITTIVITY};
use std::f64::consts::PI;

const ANGSTROM_PER_METER: f64 = 1e10;

/// Vacuum permittivity, ε₀, in _e_ / (V·Å)
///
/// # Examples
/// ~~~
/// # use approx::assert_relative_eq;
/// use protein_field::units::VACUUM_PERMITTIVITY;
/// assert_relative_eq!(VACUUM_PERMITTIVITY, 0.0055263495, max_relative = 1e-8);
/// ~~~
pub const VACUUM_PERMITTIVITY: f64 =
    VACUUM_ELECTRIC_PERMITTIVITY / ELEMENTARY_CHARGE / ANGSTROM_PER_METER;

/// Bohr radius in ångström
pub const BOHR_RADIUS_ANGSTROM: f64 = BOHR_RADIUS * ANGSTROM_PER_METER;

/// Converts a quadrupole moment from _e_·bohr² to C·Å²
pub const QUADRUPOLE_TO_COULOMB_ANGSTROM2: f64 =
    ELEMENTARY_CHARGE * BOHR_RADIUS_ANGSTROM * BOHR_RADIUS_ANGSTROM;

/// Joule per electronvolt
pub const JOULE_PER_ELECTRONVOLT: f64 = ELEMENTARY_CHARGE;

/// Coulomb constant in a dielectric medium, 1 / 4πε₀εᵣ, in V·Å/_e_
///
/// All field and field gradient sums are scaled by this factor.
///
/// # Examples
/// ~~~
/// # use approx::assert_relative_eq;
/// use protein_field::units::coulomb_prefactor;
/// assert_relative_eq!(coulomb_prefactor(1.0), 14.399645, max_relative = 1e-6);
/// assert_relative_eq!(coulomb_prefactor(2.0), 0.5 * coulomb_prefactor(1.0));
/// ~~~
pub fn coulomb_prefactor(dielectric: f64) -> f64 {
    (4.0 * PI * VACUUM_PERMITTIVITY * dielectric).recip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quadrupole_conversion() {
        assert_relative_eq!(BOHR_RADIUS_ANGSTROM, 0.529177, max_relative = 1e-6);
        assert_relative_eq!(
            QUADRUPOLE_TO_COULOMB_ANGSTROM2,
            1.602176634e-19 * 0.529177 * 0.529177,
            max_relative = 1e-6
        );
    }

    #[test]
    fn electronvolt() {
        assert_relative_eq!(JOULE_PER_ELECTRONVOLT, 1.602176634e-19);
    }
}
