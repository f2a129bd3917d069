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

//! # Electric Fields from Protein Partial Charges
//!
//! This library evaluates the electrostatic field of a set of point charges,
//! _e.g._ the partial atomic charges of a protein, at arbitrary query points:
//!
//! - The electric field vector and its magnitude (V/Å).
//! - The field gradient tensor (V/Å²).
//! - The interaction energy of a point quadrupole with the field gradient (eV).
//!
//! Charges are in units of the elementary charge and lengths in ångström.
//! All sums run over every charge without cutoff, and the medium is described by a
//! single relative dielectric constant.
//!
//! ## Examples
//!
//! A unit charge at the origin evaluated one ångström away along _x_:
//! ~~~
//! # use approx::assert_relative_eq;
//! use protein_field::{FieldEvaluator, PointCharge, PointChargeSet, Vector3};
//! use protein_field::units::coulomb_prefactor;
//!
//! let charges = PointChargeSet::from(vec![PointCharge::new(Vector3::zeros(), 1.0)]);
//! let evaluator = FieldEvaluator::vacuum(&charges);
//! let position = Vector3::new(1.0, 0.0, 0.0);
//!
//! let field = evaluator.electric_field(&position);
//! assert_relative_eq!(field.x(), 14.399645, max_relative = 1e-6); // V/Å
//!
//! let gradient = evaluator.electric_field_gradient(&position);
//! let k = coulomb_prefactor(1.0);
//! assert_relative_eq!(gradient.diagonal(), nalgebra::Vector3::new(-2.0 * k, k, k), max_relative = 1e-12);
//! ~~~
//!
//! Files are read with the [`io`] module and all query points are evaluated with
//! [`evaluate()`](crate::evaluate::evaluate) or [`io::Options::evaluate`].

#[cfg(test)]
extern crate approx;

/// A 3x3 tensor
pub type Matrix3 = nalgebra::Matrix3<f64>;

pub mod charges;
pub mod cli;
pub mod energy;
pub mod evaluate;
pub mod field;
pub mod io;
pub mod report;
pub mod units;
mod vector;

pub use charges::{PointCharge, PointChargeSet};
pub use evaluate::Evaluation;
pub use field::FieldEvaluator;
pub use io::{load_options, load_structure, LoadError};
pub use vector::Vector3;
