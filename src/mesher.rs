//! Discretization of a single axis by sampling a uniform B-spline basis.
//!
//! A [`Mesher1D`] divides an interval into uniform cells,
//! builds a B-spline basis of a given degree over them,
//! and places one sample point per basis function at its Greville abscissa.
//! The resulting [`DiscreteDimension`] is the list of sample coordinates
//! that discrete elements along that axis refer to.
//!
//! ```
//! use dec_cells::{Axis, ContinuousAxis, Mesher1D};
//!
//! struct X;
//! impl ContinuousAxis for X {
//!     const AXIS: Axis = Axis::new("X");
//! }
//!
//! let meshed = Mesher1D::<3, X>::new().mesh(0., 1., 10).unwrap();
//! assert_eq!(meshed.dimension.len(), 13);
//! assert_eq!(meshed.dimension.front(), Some(0.));
//! ```

mod bsplines;
pub use bsplines::UniformBSplines;

//

use nalgebra as na;
use std::marker::PhantomData;

use crate::coord::{Axis, AxisAggregate, AxisSet, CoordError, Coordinate, DiscreteElement};

/// Error in meshing an interval.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The bounds aren't finite or aren't in increasing order.
    #[error("Invalid mesh bounds: expected finite lower < upper, got lower {lower}, upper {upper}")]
    InvalidBounds {
        /// The given lower bound.
        lower: f64,
        /// The given upper bound.
        upper: f64,
    },
    /// Zero cells were requested.
    #[error("A mesh needs at least one cell")]
    NoCells,
}

/// Compile-time properties of a continuous axis.
///
/// Implemented by marker types, one per axis.
pub trait ContinuousAxis {
    /// The axis identifier discrete elements along this axis use.
    const AXIS: Axis;
    /// Whether the axis wraps around at the ends of its interval.
    const PERIODIC: bool = false;
}

/// How a spline basis and its sample points behave at the ends of the interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundCond {
    /// The basis wraps around; samples are uniformly spaced.
    Periodic,
    /// Clamped basis sampled at its Greville abscissae,
    /// with samples exactly at both ends of the interval.
    Greville,
}

/// The sample coordinates along one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteDimension {
    axis: Axis,
    coordinates: na::DVector<f64>,
}

impl DiscreteDimension {
    /// The axis this dimension discretizes.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of sample points.
    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether there are no sample points. Never true for a meshed axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// All sample coordinates in increasing order.
    #[inline]
    pub fn coordinates(&self) -> &na::DVector<f64> {
        &self.coordinates
    }

    /// Coordinate of the sample at the given offset.
    #[inline]
    pub fn coordinate(&self, idx: usize) -> Option<f64> {
        self.coordinates.get(idx).copied()
    }

    /// The first sample coordinate.
    #[inline]
    pub fn front(&self) -> Option<f64> {
        self.coordinate(0)
    }

    /// The last sample coordinate.
    #[inline]
    pub fn back(&self) -> Option<f64> {
        self.coordinates.len().checked_sub(1).and_then(|i| self.coordinate(i))
    }

    /// Iterate over the single-axis discrete elements of this dimension.
    pub fn elements(&self) -> impl '_ + Iterator<Item = DiscreteElement> {
        let axes = AxisSet::single(self.axis);
        (0..self.len()).map(move |i| DiscreteElement::from_axis_components(&axes, vec![i]))
    }

    /// Coordinate of an element along this dimension's axis.
    ///
    /// Returns None if the element doesn't have the axis
    /// or its offset is past the last sample.
    pub fn coordinate_of(&self, elem: &DiscreteElement) -> Option<f64> {
        self.coordinate(elem.uid(self.axis)?)
    }
}

/// Look up the continuous coordinate of a multi-axis element
/// from the discretizations of each of its axes.
pub fn element_coordinate(
    elem: &DiscreteElement,
    dims: &[DiscreteDimension],
) -> Result<Coordinate, CoordError> {
    let values = elem
        .axes()
        .iter()
        .zip(elem.uids())
        .map(|(axis, &uid)| {
            let dim = dims
                .iter()
                .find(|d| d.axis == axis)
                .ok_or(CoordError::UnknownAxis(axis))?;
            dim.coordinate(uid).ok_or(CoordError::OutOfRange {
                axis,
                uid,
                len: dim.len(),
            })
        })
        .collect::<Result<Vec<f64>, CoordError>>()?;
    Ok(Coordinate::from_axis_components(elem.axes(), values))
}

/// The output of meshing one axis:
/// the spline basis and its sample points.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshedAxis {
    /// The B-spline basis over the interval.
    pub bsplines: UniformBSplines,
    /// The sample points, one per basis function.
    pub dimension: DiscreteDimension,
}

/// Mesher for a single axis `X` with B-splines of degree `DEGREE`.
///
/// The mesher holds no state and can be reused for any number of intervals.
/// `DEGREE` must be at least 1; meshing with degree 0 doesn't compile:
///
/// ```compile_fail
/// # use dec_cells::{Axis, ContinuousAxis, Mesher1D};
/// struct X;
/// impl ContinuousAxis for X {
///     const AXIS: Axis = Axis::new("X");
/// }
///
/// let _ = Mesher1D::<0, X>::new().mesh(0., 1., 1);
/// ```
pub struct Mesher1D<const DEGREE: usize, X> {
    _marker: PhantomData<X>,
}

impl<const DEGREE: usize, X> Default for Mesher1D<DEGREE, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const DEGREE: usize, X> Mesher1D<DEGREE, X> {
    /// Create a mesher.
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<const DEGREE: usize, X: ContinuousAxis> Mesher1D<DEGREE, X> {
    /// The boundary condition used for the axis.
    pub const BOUND_COND: BoundCond = if X::PERIODIC {
        BoundCond::Periodic
    } else {
        BoundCond::Greville
    };

    const DEGREE_IS_POSITIVE: () = assert!(DEGREE >= 1, "spline degree must be at least 1");

    /// Divide `[lower, upper]` into `cell_count` uniform cells
    /// and sample the resulting B-spline basis at its Greville points.
    ///
    /// The number of samples is `cell_count + DEGREE` for non-periodic axes
    /// and `cell_count` for periodic ones.
    pub fn mesh(&self, lower: f64, upper: f64, cell_count: usize) -> Result<MeshedAxis, MeshError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::DEGREE_IS_POSITIVE;

        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(MeshError::InvalidBounds { lower, upper });
        }
        if cell_count == 0 {
            return Err(MeshError::NoCells);
        }

        log::trace!("meshing axis {} over [{lower}, {upper}]", X::AXIS);
        let bsplines = UniformBSplines::new(DEGREE, lower, upper, cell_count, X::PERIODIC);
        let dimension = DiscreteDimension {
            axis: X::AXIS,
            coordinates: bsplines.greville_points(),
        };
        log::debug!(
            "meshed axis {} with degree {} B-splines ({:?} boundary): {cell_count} cells, {} points",
            X::AXIS,
            DEGREE,
            Self::BOUND_COND,
            dimension.len(),
        );

        Ok(MeshedAxis {
            bsplines,
            dimension,
        })
    }
}
