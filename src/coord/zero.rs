use std::ops::{Add, Mul};

use super::AxisSet;

/// A scalar type usable as a per-axis component of an [`AxisAggregate`].
///
/// Only multiplication and addition are required,
/// plus a conversion from an axis rank.
pub trait AxisScalar: Copy + Add<Output = Self> + Mul<Output = Self> {
    /// Convert an axis rank into a scalar.
    fn from_rank(rank: usize) -> Self;
}

macro_rules! impl_axis_scalar {
    ($($t:ty),*) => {
        $(
            impl AxisScalar for $t {
                #[inline]
                fn from_rank(rank: usize) -> Self {
                    rank as $t
                }
            }
        )*
    };
}

impl_axis_scalar!(f32, f64, i32, i64, isize, u32, u64, usize);

/// A value made of one scalar component per axis of an [`AxisSet`].
pub trait AxisAggregate: Sized {
    /// Type of the per-axis components.
    type Scalar: AxisScalar;

    /// Build the aggregate from components given in the order of `axes`.
    ///
    /// `components` always has exactly one entry per axis.
    fn from_axis_components(axes: &AxisSet, components: Vec<Self::Scalar>) -> Self;
}

/// Construct the zero value of an aggregate over the given axes.
///
/// Every component is computed as `0 * rank` of its axis,
/// so the result is zero for any scalar with integer multiplication
/// regardless of what its `Default` would produce.
///
/// ```
/// # use dec_cells::{zero_value, Axis, AxisSet, DiscreteVector};
/// # const X: Axis = Axis::new("X");
/// # const Y: Axis = Axis::new("Y");
/// let axes = AxisSet::new([X, Y]).unwrap();
/// let zero: DiscreteVector = zero_value(&axes);
/// assert_eq!(zero, DiscreteVector::new([(X, 0), (Y, 0)]));
/// ```
pub fn zero_value<A: AxisAggregate>(axes: &AxisSet) -> A {
    let zero = A::Scalar::from_rank(0);
    let components = (0..axes.len())
        .map(|rank| zero * A::Scalar::from_rank(rank))
        .collect();
    A::from_axis_components(axes, components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, Coordinate, DiscreteElement, DiscreteVector};

    const X: Axis = Axis::new("X");
    const Y: Axis = Axis::new("Y");
    const Z: Axis = Axis::new("Z");

    #[test]
    fn zero_of_each_aggregate() {
        let axes = AxisSet::new([Z, X, Y]).unwrap();

        let elem: DiscreteElement = zero_value(&axes);
        assert_eq!(elem.uids(), &[0, 0, 0]);
        assert_eq!(elem.axes(), &axes);

        let vect: DiscreteVector = zero_value(&axes);
        itertools::assert_equal(vect.axes(), [Z, X, Y]);
        assert!(vect.entries().iter().all(|(_, e)| *e == 0));

        let coord: Coordinate = zero_value(&axes);
        assert!(coord.values().iter().all(|v| *v == 0.));
    }

    #[test]
    fn zero_is_additive_identity() {
        let axes = AxisSet::new([X, Y]).unwrap();
        let v = DiscreteVector::new([(X, 2), (Y, -3)]);
        let zero: DiscreteVector = zero_value(&axes);
        assert_eq!(zero + &v, v);
    }

    #[test]
    fn zero_over_no_axes() {
        let vect: DiscreteVector = zero_value(&AxisSet::empty());
        assert!(vect.is_empty());
    }
}
