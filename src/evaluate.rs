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

//! Evaluation of field, field gradient, and quadrupole energy at query points.

use crate::{
    energy::interaction_energy, io::Options, FieldEvaluator, Matrix3, PointChargeSet, Vector3,
};
use serde::{Serialize, Serializer};

/// Result for a single query point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Query point (Å)
    pub position: Vector3,
    /// Electric field (V/Å)
    pub field: Vector3,
    /// Norm of the field (V/Å)
    pub field_magnitude: f64,
    /// Field gradient tensor (V/Å²), if requested
    #[serde(
        serialize_with = "serialize_rows",
        skip_serializing_if = "Option::is_none"
    )]
    pub gradient: Option<Matrix3>,
    /// Quadrupole interaction energy (eV), if a gradient and a quadrupole are available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
}

/// Write a tensor as a list of rows rather than nalgebra's flat column-major layout
fn serialize_rows<S: Serializer>(
    tensor: &Option<Matrix3>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    tensor
        .map(|t| {
            [
                [t[(0, 0)], t[(0, 1)], t[(0, 2)]],
                [t[(1, 0)], t[(1, 1)], t[(1, 2)]],
                [t[(2, 0)], t[(2, 1)], t[(2, 2)]],
            ]
        })
        .serialize(serializer)
}

fn evaluate_points(
    evaluator: &FieldEvaluator,
    points: &[Vector3],
    compute_gradient: bool,
    quadrupole: Option<&Matrix3>,
) -> Vec<Evaluation> {
    points
        .iter()
        .map(|position| {
            let field = evaluator.electric_field(position);
            let gradient = compute_gradient.then(|| evaluator.electric_field_gradient(position));
            let energy = gradient
                .as_ref()
                .zip(quadrupole)
                .map(|(gradient, quadrupole)| interaction_energy(gradient, quadrupole));
            Evaluation {
                position: *position,
                field,
                field_magnitude: field.norm(),
                gradient,
                energy,
            }
        })
        .collect()
}

/// Evaluate the field, and optionally the field gradient, at each query point
///
/// Results are in the order of `points`. No energy is computed since no quadrupole is given;
/// see [`evaluate_with_quadrupole`].
pub fn evaluate(
    charges: &PointChargeSet,
    dielectric: f64,
    points: &[Vector3],
    compute_gradient: bool,
) -> Vec<Evaluation> {
    let evaluator = FieldEvaluator::new(charges, dielectric);
    evaluate_points(&evaluator, points, compute_gradient, None)
}

/// As [`evaluate`] but also computes the interaction energy of `quadrupole` (C·Å²)
/// whenever the gradient is computed
pub fn evaluate_with_quadrupole(
    charges: &PointChargeSet,
    dielectric: f64,
    points: &[Vector3],
    compute_gradient: bool,
    quadrupole: &Matrix3,
) -> Vec<Evaluation> {
    let evaluator = FieldEvaluator::new(charges, dielectric);
    evaluate_points(&evaluator, points, compute_gradient, Some(quadrupole))
}

impl Options {
    /// Evaluate all query points using the dielectric constant and quadrupole of these options
    pub fn evaluate(&self, charges: &PointChargeSet, compute_gradient: bool) -> Vec<Evaluation> {
        evaluate_with_quadrupole(
            charges,
            *self.dielectric(),
            self.points(),
            compute_gradient,
            self.quadrupole(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::QuadrupoleComponent, units::coulomb_prefactor, PointCharge};
    use approx::assert_relative_eq;

    fn unit_charge() -> PointChargeSet {
        PointChargeSet::from(vec![PointCharge::new(Vector3::zeros(), 1.0)])
    }

    #[test]
    fn field_only() {
        let points = [Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, -1.0, 0.0)];
        let results = evaluate(&unit_charge(), 1.0, &points, false);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, points[0]);
        assert_relative_eq!(
            results[0].field_magnitude,
            coulomb_prefactor(1.0) / 4.0,
            max_relative = 1e-12
        );
        assert!(results[1].field.y() < 0.0);
        assert!(results.iter().all(|r| r.gradient.is_none() && r.energy.is_none()));
    }

    #[test]
    fn gradient_without_quadrupole_has_no_energy() {
        let results = evaluate(&unit_charge(), 1.0, &[Vector3::new(1.0, 0.0, 0.0)], true);
        assert!(results[0].gradient.is_some());
        assert!(results[0].energy.is_none());
    }

    #[test]
    fn energy_from_options() {
        let mut options = Options::default();
        options.set_dielectric(2.0);
        options.set_quadrupole_component(QuadrupoleComponent::XX, 1.0);
        options.add_point(Vector3::new(1.0, 0.0, 0.0));
        let charges = unit_charge();

        let results = options.evaluate(&charges, true);
        let gradient = results[0].gradient.unwrap();
        assert_relative_eq!(gradient[(0, 0)], -2.0 * coulomb_prefactor(2.0), max_relative = 1e-12);
        let expected = interaction_energy(&gradient, options.quadrupole());
        assert_eq!(results[0].energy, Some(expected));
        assert!(expected > 0.0);

        let results = options.evaluate(&charges, false);
        assert!(results[0].energy.is_none());
    }

    #[test]
    fn serialized_gradient_is_row_major() {
        let mut gradient = Matrix3::zeros();
        gradient[(0, 1)] = 1.0;
        let evaluation = Evaluation {
            position: Vector3::zeros(),
            field: Vector3::zeros(),
            field_magnitude: 0.0,
            gradient: Some(gradient),
            energy: None,
        };
        let value = serde_yaml::to_value(&evaluation).unwrap();
        let rows = value.get("gradient").unwrap();
        assert_eq!(rows[0][1].as_f64(), Some(1.0));
        assert_eq!(rows[1][0].as_f64(), Some(0.0));
        assert!(value.get("energy").is_none());
    }
}
