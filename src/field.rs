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

//! # Electric field and field gradient from point charges
//!
//! The field at position 𝒓 is the plain Coulomb sum over all point charges,
//!
//! $$ \mathbf{E}(\mathbf{r}) = \frac{1}{4\pi\varepsilon_0\varepsilon_r} \sum_i q_i \frac{\mathbf{d}_i}{|\mathbf{d}_i|^3}, \quad \mathbf{d}_i = \mathbf{r} - \mathbf{r}_i $$
//!
//! without cutoff, screening, or periodic images. The field gradient tensor is
//!
//! $$ T_{jk} = \frac{1}{4\pi\varepsilon_0\varepsilon_r} \sum_i q_i \left( \frac{\delta_{jk}}{|\mathbf{d}_i|^3} - \frac{3 d_{i,j} d_{i,k}}{|\mathbf{d}_i|^5} \right) $$
//!
//! which is symmetric and, away from the charges, traceless.
//! Evaluating exactly on top of a charge gives non-finite values which are
//! propagated unchanged.

use crate::{units, Matrix3, PointChargeSet, Vector3};

/// Evaluates the field and field gradient of a set of point charges in a dielectric medium
///
/// # Examples
/// ~~~
/// # use approx::assert_relative_eq;
/// use protein_field::{FieldEvaluator, PointCharge, PointChargeSet, Vector3};
/// use protein_field::units::coulomb_prefactor;
///
/// let charges = PointChargeSet::from(vec![PointCharge::new(Vector3::zeros(), 1.0)]);
/// let evaluator = FieldEvaluator::new(&charges, 2.0);
/// let field = evaluator.electric_field(&Vector3::new(0.0, 0.0, 3.0));
/// assert_relative_eq!(field.z(), coulomb_prefactor(2.0) / 9.0, max_relative = 1e-12);
/// ~~~
#[derive(Debug, Clone, Copy)]
pub struct FieldEvaluator<'a> {
    charges: &'a PointChargeSet,
    /// Relative permittivity of the medium
    dielectric: f64,
}

impl<'a> FieldEvaluator<'a> {
    pub fn new(charges: &'a PointChargeSet, dielectric: f64) -> Self {
        Self {
            charges,
            dielectric,
        }
    }

    /// Evaluator in vacuum, εᵣ = 1
    pub fn vacuum(charges: &'a PointChargeSet) -> Self {
        Self::new(charges, 1.0)
    }

    pub fn dielectric(&self) -> f64 {
        self.dielectric
    }

    pub fn charges(&self) -> &'a PointChargeSet {
        self.charges
    }

    fn scaling(&self) -> f64 {
        4.0 * std::f64::consts::PI * units::VACUUM_PERMITTIVITY * self.dielectric
    }

    /// Electric field at `position` (V/Å)
    pub fn electric_field(&self, position: &Vector3) -> Vector3 {
        let mut field = Vector3::zeros();
        for pc in self.charges {
            let d = *position - pc.coordinate;
            let norm = d.norm();
            field += pc.charge * d / (norm * norm * norm);
        }
        field / self.scaling()
    }

    /// Field gradient tensor at `position` (V/Å²)
    ///
    /// Each of the nine entries is summed separately over all charges, in insertion order.
    /// No unit conversion is done here so any tensor contracted against the result must
    /// use compatible units.
    pub fn electric_field_gradient(&self, position: &Vector3) -> Matrix3 {
        let mut gradient = Matrix3::zeros();
        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for pc in self.charges {
                    let d = *position - pc.coordinate;
                    let norm = d.norm();
                    let norm3 = norm * norm * norm;
                    // d[i] * d[j] first so that entry (i, j) is bitwise equal to (j, i)
                    sum += pc.charge * -3.0 * (d[i] * d[j]) / (norm3 * norm * norm);
                    if i == j {
                        sum += pc.charge / norm3;
                    }
                }
                gradient[(i, j)] = sum / self.scaling();
            }
        }
        gradient
    }
}
