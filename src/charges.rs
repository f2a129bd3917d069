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

//! Point charges making up the electrostatic source model.

use crate::Vector3;
use serde::{Deserialize, Serialize};

/// Charge at a fixed position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCharge {
    /// Position (Å)
    pub coordinate: Vector3,
    /// Charge (_e_); may be zero
    pub charge: f64,
}

impl PointCharge {
    pub const fn new(coordinate: Vector3, charge: f64) -> Self {
        Self { coordinate, charge }
    }
}

/// Ordered collection of point charges
///
/// The order is the insertion order and all sums over the collection are carried out in
/// this order. Floating point addition is not associative so a permuted set may give
/// results that differ in the last few bits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointChargeSet {
    charges: Vec<PointCharge>,
}

impl PointChargeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point charge
    pub fn push(&mut self, charge: PointCharge) {
        self.charges.push(charge);
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointCharge> {
        self.charges.iter()
    }

    pub fn as_slice(&self) -> &[PointCharge] {
        &self.charges
    }

    /// Net charge (_e_)
    pub fn total_charge(&self) -> f64 {
        self.charges.iter().map(|pc| pc.charge).sum()
    }
}

impl From<Vec<PointCharge>> for PointChargeSet {
    fn from(charges: Vec<PointCharge>) -> Self {
        Self { charges }
    }
}

impl FromIterator<PointCharge> for PointChargeSet {
    fn from_iter<I: IntoIterator<Item = PointCharge>>(iter: I) -> Self {
        Self {
            charges: iter.into_iter().collect(),
        }
    }
}

impl Extend<PointCharge> for PointChargeSet {
    fn extend<I: IntoIterator<Item = PointCharge>>(&mut self, iter: I) {
        self.charges.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PointChargeSet {
    type Item = &'a PointCharge;
    type IntoIter = std::slice::Iter<'a, PointCharge>;
    fn into_iter(self) -> Self::IntoIter {
        self.charges.iter()
    }
}
