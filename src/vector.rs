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

//! Three dimensional vector with componentwise arithmetic.

use core::fmt::{self, Display, Formatter};
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use serde::{Deserialize, Serialize};

type Inner = nalgebra::Vector3<f64>;

/// A point or direction in 3D space (ångström unless stated otherwise)
///
/// All binary operators act componentwise, also between two vectors, so that
/// `a * b` is the Hadamard product and *not* a dot product.
/// Scalars can appear on either side of an operator. Addition and multiplication
/// commute, but subtraction and division with the scalar on the left apply the
/// scalar to each component:
///
/// ~~~
/// use protein_field::Vector3;
/// let v = Vector3::new(1.0, 2.0, 4.0);
/// assert_eq!(2.0 * v, v * 2.0);
/// assert_eq!(1.0 - v, Vector3::new(0.0, -1.0, -3.0));
/// assert_eq!(1.0 / v, Vector3::new(1.0, 0.5, 0.25));
/// ~~~
///
/// Equality is exact; compare with a tolerance when the values stem from arithmetic.
/// Division by zero follows IEEE 754 and yields infinities or NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3(Inner);

impl Vector3 {
    /// New vector from its three components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Inner::new(x, y, z))
    }

    /// The zero vector
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Scalar product
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// Euclidean norm, √(v·v)
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }
}

/// Implements vector∘vector, vector∘scalar, scalar∘vector and the assigning
/// variants of one operator from three expressions on the underlying nalgebra vectors.
macro_rules! impl_componentwise_op {
    (
        $op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident,
        |$a:ident, $b:ident| $vector_vector:expr,
        |$v:ident, $s:ident| $vector_scalar:expr,
        |$ls:ident, $lv:ident| $scalar_vector:expr
    ) => {
        impl $op_trait for Vector3 {
            type Output = Vector3;
            #[inline]
            fn $op_fn(self, rhs: Vector3) -> Vector3 {
                let ($a, $b) = (self.0, rhs.0);
                Vector3($vector_vector)
            }
        }

        impl $op_trait<f64> for Vector3 {
            type Output = Vector3;
            #[inline]
            fn $op_fn(self, rhs: f64) -> Vector3 {
                let ($v, $s) = (self.0, rhs);
                Vector3($vector_scalar)
            }
        }

        impl $op_trait<Vector3> for f64 {
            type Output = Vector3;
            #[inline]
            fn $op_fn(self, rhs: Vector3) -> Vector3 {
                let ($ls, $lv) = (self, rhs.0);
                Vector3($scalar_vector)
            }
        }

        impl $assign_trait for Vector3 {
            #[inline]
            fn $assign_fn(&mut self, rhs: Vector3) {
                *self = $op_trait::$op_fn(*self, rhs);
            }
        }

        impl $assign_trait<f64> for Vector3 {
            #[inline]
            fn $assign_fn(&mut self, rhs: f64) {
                *self = $op_trait::$op_fn(*self, rhs);
            }
        }
    };
}

impl_componentwise_op!(
    Add, add, AddAssign, add_assign,
    |a, b| a + b,
    |v, s| v.add_scalar(s),
    |s, v| v.add_scalar(s)
);
// scalar on the left is applied to every component: s - v = (s - x, s - y, s - z)
impl_componentwise_op!(
    Sub, sub, SubAssign, sub_assign,
    |a, b| a - b,
    |v, s| v.map(|x| x - s),
    |s, v| v.map(|x| s - x)
);
impl_componentwise_op!(
    Mul, mul, MulAssign, mul_assign,
    |a, b| a.component_mul(&b),
    |v, s| v * s,
    |s, v| v * s
);
impl_componentwise_op!(
    Div, div, DivAssign, div_assign,
    |a, b| a.component_div(&b),
    |v, s| v / s,
    |s, v| v.map(|x| s / x)
);

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3(-self.0)
    }
}

/// Component access; panics for indices other than 0, 1, and 2
impl Index<usize> for Vector3 {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(values: [f64; 3]) -> Self {
        Self(Inner::from(values))
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(vector: Vector3) -> Self {
        vector.0.into()
    }
}

impl From<Inner> for Vector3 {
    fn from(vector: Inner) -> Self {
        Self(vector)
    }
}

impl From<Vector3> for Inner {
    fn from(vector: Vector3) -> Self {
        vector.0
    }
}

impl Display for Vector3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[ {}, {}, {} ]", self.0.x, self.0.y, self.0.z)
    }
}
