//! Oriented cells and 1-D meshing for Discrete Exterior Calculus
//! on structured (tensor-product) meshes.
//!
//! The crate is built from a few layers:
//! - [`combinatorics`]: factorials, binomial coefficients and permutation parity,
//! - [`coord`]: axes, discrete elements and vectors, and zero-value synthesis,
//! - [`simplex`]: the oriented [`Simplex`] anchored at a discrete element,
//! - [`mesher`]: Greville-point sampling of a uniform B-spline basis
//!   to discretize one axis.
//!
//! ```
//! use dec_cells::{Axis, AxisSet, DiscreteElement, DiscreteVector, Simplex};
//!
//! const X: Axis = Axis::new("X");
//! const Y: Axis = Axis::new("Y");
//!
//! let axes = AxisSet::new([X, Y]).unwrap();
//! let base = DiscreteElement::new(axes, [2, 3]).unwrap();
//! let edge = Simplex::new(base.clone(), DiscreteVector::new([(X, 1)]));
//! assert_eq!(edge.dimension(), 1);
//!
//! // listing the axes of a face in the wrong order flips its orientation
//! let face = Simplex::new(base, DiscreteVector::new([(Y, 1), (X, 1)]));
//! let canonical = face.canonical().unwrap();
//! assert!(canonical.is_negative());
//! assert_eq!(canonical.vector(), &DiscreteVector::new([(X, 1), (Y, 1)]));
//! ```

#![warn(missing_docs)]

pub mod combinatorics;
#[doc(inline)]
pub use combinatorics::{binomial_coefficient, factorial, permutation_parity, Permutations};

pub mod coord;
#[doc(inline)]
pub use coord::{
    zero_value, Axis, AxisAggregate, AxisScalar, AxisSet, Coordinate, CoordError,
    DiscreteElement, DiscreteVector,
};

pub mod simplex;
#[doc(inline)]
pub use simplex::{tangent_basis, Sign, Simplex, SimplexError};

pub mod mesher;
#[doc(inline)]
pub use mesher::{
    element_coordinate, BoundCond, ContinuousAxis, DiscreteDimension, MeshError, MeshedAxis,
    Mesher1D, UniformBSplines,
};

// nalgebra re-export for access to the coordinate storage types

pub use nalgebra as na;
