//! The multi-axis coordinate system cells are anchored in.
//!
//! Axes are identified by lightweight [`Axis`] handles
//! and grouped into ordered [`AxisSet`]s.
//! The position of an axis in its set is its rank,
//! which is the canonical order used whenever axes are compared.

mod discrete;
pub use discrete::{Coordinate, DiscreteElement, DiscreteVector};

mod zero;
pub use zero::{zero_value, AxisAggregate, AxisScalar};

//

use itertools::Itertools;
use std::sync::Arc;

/// Error in constructing a coordinate system value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// An axis set was given the same axis twice.
    #[error("Axis {0} appears more than once in an axis set")]
    DuplicateAxis(Axis),
    /// The number of per-axis values didn't match the number of axes.
    #[error("Expected {axes} per-axis values, got {values}")]
    LengthMismatch {
        /// Number of axes in the set.
        axes: usize,
        /// Number of values given.
        values: usize,
    },
    /// An axis was looked up in a set that doesn't contain it.
    #[error("Axis {0} is not part of the axis set")]
    UnknownAxis(Axis),
    /// An offset along an axis is past the end of that axis' discretization.
    #[error("Offset {uid} is out of range for axis {axis} with {len} points")]
    OutOfRange {
        /// The axis the offset is along.
        axis: Axis,
        /// The offending offset.
        uid: usize,
        /// Number of points along the axis.
        len: usize,
    },
}

/// Identifier of one coordinate direction.
///
/// Axes are meant to be declared as constants:
/// ```
/// # use dec_cells::Axis;
/// const X: Axis = Axis::new("X");
/// const TIME: Axis = Axis::new("Time");
/// assert_ne!(X, TIME);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Axis(&'static str);

impl Axis {
    /// Create an axis with the given name. Axes with equal names are the same axis.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Get the name of the axis.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// An ordered sequence of distinct axes.
///
/// The storage is shared, so cloning a set is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AxisSet {
    axes: Arc<[Axis]>,
}

impl AxisSet {
    /// Create a set from axes given in their canonical order.
    ///
    /// Fails if an axis is given more than once.
    pub fn new(axes: impl IntoIterator<Item = Axis>) -> Result<Self, CoordError> {
        let axes: Vec<Axis> = axes.into_iter().collect();
        if let Some(dup) = axes.iter().duplicates().next() {
            return Err(CoordError::DuplicateAxis(*dup));
        }
        Ok(Self::from_unique(axes))
    }

    /// The empty axis set.
    pub fn empty() -> Self {
        Self::from_unique(Vec::new())
    }

    /// A set of just one axis.
    pub fn single(axis: Axis) -> Self {
        Self::from_unique(vec![axis])
    }

    // callers guarantee there are no duplicates
    fn from_unique(axes: Vec<Axis>) -> Self {
        Self {
            axes: Arc::from(axes),
        }
    }

    /// Number of axes in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// Whether the set has no axes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Iterate over the axes in canonical order.
    #[inline]
    pub fn iter(&self) -> impl '_ + Iterator<Item = Axis> {
        self.axes.iter().copied()
    }

    /// Get the axes as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Axis] {
        &self.axes
    }

    /// Position of an axis in the set, if it's present.
    #[inline]
    pub fn rank(&self, axis: Axis) -> Option<usize> {
        self.axes.iter().position(|a| *a == axis)
    }

    /// Whether the axis is in the set.
    #[inline]
    pub fn contains(&self, axis: Axis) -> bool {
        self.axes.contains(&axis)
    }

    /// Whether every axis of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &AxisSet) -> bool {
        self.iter().all(|a| other.contains(a))
    }

    /// The axes of `self` that are not in `other`, in the order of `self`.
    pub fn remove(&self, other: &AxisSet) -> AxisSet {
        Self::from_unique(self.iter().filter(|a| !other.contains(*a)).collect())
    }

    /// The axes present in both sets, in the order of `self`.
    ///
    /// Computed as the complement of the complement,
    /// `self.remove(&self.remove(other))`.
    ///
    /// ```
    /// # use dec_cells::{Axis, AxisSet};
    /// # const X: Axis = Axis::new("X");
    /// # const Y: Axis = Axis::new("Y");
    /// # const Z: Axis = Axis::new("Z");
    /// let a = AxisSet::new([X, Y, Z]).unwrap();
    /// let b = AxisSet::new([Z, X]).unwrap();
    /// assert_eq!(a.intersect(&b), AxisSet::new([X, Z]).unwrap());
    /// assert_eq!(b.intersect(&a), AxisSet::new([Z, X]).unwrap());
    /// ```
    pub fn intersect(&self, other: &AxisSet) -> AxisSet {
        self.remove(&self.remove(other))
    }
}

impl std::fmt::Display for AxisSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.axes.iter().join(", "))
    }
}
