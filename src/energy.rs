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

//! Interaction energy between a point quadrupole and an external field gradient.

use crate::{units::JOULE_PER_ELECTRONVOLT, Matrix3};

/// Quadrupole energy in the field gradient, 𝑢 = -½ Σᵢⱼ 𝑄ᵢⱼ 𝑇ⱼᵢ (eV)
///
/// The gradient is expected in V/Å² and the quadrupole in C·Å² so that the
/// double contraction is in joule before conversion to electronvolt.
/// Note the transposed index on the gradient; for a symmetric gradient this is the
/// ordinary double dot product.
///
/// # Examples
/// ~~~
/// # use approx::assert_relative_eq;
/// use protein_field::{energy::interaction_energy, Matrix3};
/// use protein_field::units::JOULE_PER_ELECTRONVOLT;
/// let gradient = Matrix3::from_diagonal_element(2.0);
/// let quadrupole = Matrix3::identity() * JOULE_PER_ELECTRONVOLT;
/// assert_relative_eq!(interaction_energy(&gradient, &quadrupole), -3.0);
/// ~~~
pub fn interaction_energy(gradient: &Matrix3, quadrupole: &Matrix3) -> f64 {
    let mut energy = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            energy += quadrupole[(i, j)] * gradient[(j, i)];
        }
    }
    // adding zero turns -0.0 into 0.0 for an empty contraction
    -0.5 * energy / JOULE_PER_ELECTRONVOLT + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::QUADRUPOLE_TO_COULOMB_ANGSTROM2;
    use approx::assert_relative_eq;

    #[test]
    fn linear_in_quadrupole() {
        let gradient = Matrix3::new(1.0, 0.2, -0.4, 0.2, -3.0, 0.7, -0.4, 0.7, 2.0);
        let quadrupole = Matrix3::new(2.0, -1.0, 0.5, -1.0, 0.3, 0.0, 0.5, 0.0, -2.3)
            * QUADRUPOLE_TO_COULOMB_ANGSTROM2;
        let energy = interaction_energy(&gradient, &quadrupole);
        for k in [-2.0, 0.5, 10.0] {
            assert_relative_eq!(
                interaction_energy(&gradient, &(quadrupole * k)),
                k * energy,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn gradient_index_is_transposed() {
        // only the (0, 1) quadrupole entry is set, so it pairs with gradient (1, 0)
        let mut quadrupole = Matrix3::zeros();
        quadrupole[(0, 1)] = JOULE_PER_ELECTRONVOLT;
        let mut gradient = Matrix3::zeros();
        gradient[(1, 0)] = 4.0;
        assert_relative_eq!(interaction_energy(&gradient, &quadrupole), -2.0);
        assert_eq!(interaction_energy(&gradient.transpose(), &quadrupole), 0.0);
    }

    #[test]
    fn zero_quadrupole() {
        let gradient = Matrix3::from_diagonal_element(1e3);
        assert_eq!(interaction_energy(&gradient, &Matrix3::zeros()), 0.0);
        assert!(interaction_energy(&gradient, &Matrix3::zeros()).is_sign_positive());
    }
}
