use itertools::{izip, Itertools};
use nalgebra as na;

use super::{Axis, AxisAggregate, AxisSet, CoordError};

/// A point of a structured mesh, identified by a non-negative offset along each axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DiscreteElement {
    axes: AxisSet,
    uids: Vec<usize>,
}

impl DiscreteElement {
    /// Create an element from one offset per axis, in the order of the axis set.
    pub fn new(axes: AxisSet, uids: impl IntoIterator<Item = usize>) -> Result<Self, CoordError> {
        let uids: Vec<usize> = uids.into_iter().collect();
        if uids.len() != axes.len() {
            return Err(CoordError::LengthMismatch {
                axes: axes.len(),
                values: uids.len(),
            });
        }
        Ok(Self { axes, uids })
    }

    /// The axes this element is defined over.
    #[inline]
    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    /// The offsets along each axis, in canonical axis order.
    #[inline]
    pub fn uids(&self) -> &[usize] {
        &self.uids
    }

    /// Offset along a single axis, if the element has that axis.
    #[inline]
    pub fn uid(&self, axis: Axis) -> Option<usize> {
        Some(self.uids[self.axes.rank(axis)?])
    }

    /// Move the element by `by` steps along one axis.
    ///
    /// Returns None if the element doesn't have the axis
    /// or the offset would become negative.
    pub fn displaced(&self, axis: Axis, by: isize) -> Option<Self> {
        let rank = self.axes.rank(axis)?;
        let mut uids = self.uids.clone();
        uids[rank] = uids[rank].checked_add_signed(by)?;
        Some(Self {
            axes: self.axes.clone(),
            uids,
        })
    }

    /// Move the element by a discrete vector.
    ///
    /// Returns None if the vector has an axis this element doesn't
    /// or some offset would become negative.
    pub fn checked_add(&self, vector: &DiscreteVector) -> Option<Self> {
        vector
            .entries()
            .iter()
            .try_fold(self.clone(), |elem, &(axis, extent)| {
                elem.displaced(axis, extent)
            })
    }
}

impl AxisAggregate for DiscreteElement {
    type Scalar = usize;

    fn from_axis_components(axes: &AxisSet, components: Vec<usize>) -> Self {
        debug_assert_eq!(axes.len(), components.len());
        Self {
            axes: axes.clone(),
            uids: components,
        }
    }
}

impl std::fmt::Display for DiscreteElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({})",
            izip!(self.axes.iter(), &self.uids)
                .map(|(axis, uid)| format!("{axis}: {uid}"))
                .join(", ")
        )
    }
}

/// A signed per-axis displacement.
///
/// Unlike [`DiscreteElement`], a vector keeps the axes in the order they were listed,
/// which need not be the canonical order of any axis set,
/// and an axis may be listed more than once.
/// The listing order is what gives a [`Simplex`][crate::Simplex] its orientation.
/// Axes the vector doesn't list have an extent of zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiscreteVector {
    entries: Vec<(Axis, isize)>,
}

impl DiscreteVector {
    /// Create a vector from `(axis, extent)` pairs, keeping their order.
    pub fn new(entries: impl IntoIterator<Item = (Axis, isize)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The `(axis, extent)` pairs in listing order.
    #[inline]
    pub fn entries(&self) -> &[(Axis, isize)] {
        &self.entries
    }

    /// Iterate over the listed axes.
    #[inline]
    pub fn axes(&self) -> impl '_ + Iterator<Item = Axis> {
        self.entries.iter().map(|(axis, _)| *axis)
    }

    /// Total displacement along an axis.
    ///
    /// Zero for axes that aren't listed;
    /// the sum of all listed extents for an axis listed more than once.
    pub fn extent(&self, axis: Axis) -> isize {
        self.entries
            .iter()
            .filter(|(a, _)| *a == axis)
            .map(|(_, e)| e)
            .sum()
    }

    /// Number of listed entries, including zero extents.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector lists no axes at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AxisAggregate for DiscreteVector {
    type Scalar = isize;

    fn from_axis_components(axes: &AxisSet, components: Vec<isize>) -> Self {
        debug_assert_eq!(axes.len(), components.len());
        Self::new(izip!(axes.iter(), components))
    }
}

// Add merges the extents of rhs into the axes already listed in self
// and appends axes that self doesn't list

impl std::ops::Add<&DiscreteVector> for DiscreteVector {
    type Output = Self;

    fn add(mut self, rhs: &DiscreteVector) -> Self::Output {
        for &(axis, extent) in &rhs.entries {
            match self.entries.iter_mut().find(|(a, _)| *a == axis) {
                Some((_, e)) => *e += extent,
                None => self.entries.push((axis, extent)),
            }
        }
        self
    }
}

impl std::ops::Add for DiscreteVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self + &rhs
    }
}

impl std::ops::Neg for DiscreteVector {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for (_, extent) in &mut self.entries {
            *extent = -*extent;
        }
        self
    }
}

impl std::ops::Neg for &DiscreteVector {
    type Output = DiscreteVector;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

/// A point in continuous space, one real value per axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinate {
    axes: AxisSet,
    values: na::DVector<f64>,
}

impl Coordinate {
    /// Create a coordinate from one value per axis, in the order of the axis set.
    pub fn new(axes: AxisSet, values: impl IntoIterator<Item = f64>) -> Result<Self, CoordError> {
        let values: Vec<f64> = values.into_iter().collect();
        if values.len() != axes.len() {
            return Err(CoordError::LengthMismatch {
                axes: axes.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            axes,
            values: na::DVector::from_vec(values),
        })
    }

    /// The axes this coordinate is defined over.
    #[inline]
    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    /// The values along each axis, in canonical axis order.
    #[inline]
    pub fn values(&self) -> &na::DVector<f64> {
        &self.values
    }

    /// Value along a single axis, if the coordinate has that axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> Option<f64> {
        Some(self.values[self.axes.rank(axis)?])
    }
}

impl AxisAggregate for Coordinate {
    type Scalar = f64;

    fn from_axis_components(axes: &AxisSet, components: Vec<f64>) -> Self {
        debug_assert_eq!(axes.len(), components.len());
        Self {
            axes: axes.clone(),
            values: na::DVector::from_vec(components),
        }
    }
}
