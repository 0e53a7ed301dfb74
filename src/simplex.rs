//! Oriented cells anchored at discrete elements of a structured mesh.
//!
//! A [`Simplex`] is described by the element it starts from,
//! a [`DiscreteVector`] giving its extent along the axes it spans,
//! and a [`Sign`] for its orientation.
//! The order in which the spanned axes are listed matters:
//! swapping two of them describes the same cell with the opposite orientation,
//! and listing an axis twice collapses the cell to zero.

use itertools::{izip, Itertools};

use crate::combinatorics::{binomial_coefficient, factorial, permutation_parity, Permutations};
use crate::coord::{zero_value, Axis, AxisSet, DiscreteElement, DiscreteVector};

/// Error in transforming a simplex.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SimplexError {
    /// Flipping a negative extent would move the base element
    /// to a negative offset.
    #[error("Reorienting along axis {axis} moves the base below offset zero")]
    NegativeOffset {
        /// The axis along which the base would leave the mesh.
        axis: Axis,
    },
}

/// Orientation of a cell relative to the order its axes are listed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Same orientation as the listing.
    #[default]
    Positive,
    /// Opposite orientation to the listing.
    Negative,
}

impl Sign {
    /// Convert a parity (as returned by [`permutation_parity`]) to a sign.
    ///
    /// Returns None for a parity of 0.
    pub fn from_parity(parity: i8) -> Option<Self> {
        match parity.signum() {
            1 => Some(Self::Positive),
            -1 => Some(Self::Negative),
            _ => None,
        }
    }

    /// The sign as +1 or -1.
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }
}

impl std::ops::Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

impl std::ops::Mul for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        if self == rhs {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// An oriented cell of a structured mesh.
///
/// Spans the extents of `vector` starting from `base`.
/// Equality compares the base, the vector including the order its axes are listed in,
/// and the sign; use [`canonical`][Self::canonical]
/// or [`relative_orientation`][Self::relative_orientation]
/// to compare cells listed differently.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Simplex {
    base: DiscreteElement,
    vector: DiscreteVector,
    sign: Sign,
}

impl Simplex {
    /// Create a positively oriented simplex.
    ///
    /// Degenerate simplices are allowed.
    /// Panics if the vector lists an axis the base element doesn't have.
    #[inline]
    pub fn new(base: DiscreteElement, vector: DiscreteVector) -> Self {
        Self::with_sign(base, vector, Sign::Positive)
    }

    /// Create a simplex with the given orientation.
    ///
    /// Panics if the vector lists an axis the base element doesn't have.
    pub fn with_sign(base: DiscreteElement, vector: DiscreteVector, sign: Sign) -> Self {
        if let Some(axis) = vector.axes().find(|a| !base.axes().contains(*a)) {
            panic!(
                "simplex spans axis {axis}, which is not an axis of its base element {}",
                base.axes()
            );
        }
        Self { base, vector, sign }
    }

    /// All positively oriented unit `k`-simplices starting from `base`,
    /// one per element of [`tangent_basis`].
    pub fn tangent_simplices(base: &DiscreteElement, k: usize) -> Vec<Self> {
        tangent_basis(base.axes(), k)
            .into_iter()
            .map(|vector| Self::new(base.clone(), vector))
            .collect()
    }

    /// The element the simplex starts from.
    #[inline]
    pub fn base(&self) -> &DiscreteElement {
        &self.base
    }

    /// The extents of the simplex along the axes it lists.
    #[inline]
    pub fn vector(&self) -> &DiscreteVector {
        &self.vector
    }

    /// The orientation of the simplex.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Whether the simplex has negative orientation.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    /// The number of listed axes with a non-zero extent.
    pub fn dimension(&self) -> usize {
        self.spanning().count()
    }

    fn spanning(&self) -> impl '_ + Iterator<Item = &(Axis, isize)> {
        self.vector.entries().iter().filter(|(_, extent)| *extent != 0)
    }

    /// Parity of the order the spanning axes are listed in,
    /// relative to the canonical axis order of the base element.
    ///
    /// Returns 0 if an axis is spanned more than once,
    /// in which case the simplex is degenerate.
    /// With fewer than two spanning axes there is nothing to reorder
    /// and the parity is 1.
    pub fn orientation_parity(&self) -> i8 {
        let ranks = self
            .spanning()
            .filter_map(|(axis, _)| self.base.axes().rank(*axis))
            .collect_vec();
        if ranks.len() < 2 {
            return 1;
        }
        // permutation_parity doesn't catch every repeated value,
        // so repeated axes are checked here first
        if !ranks.iter().all_unique() {
            return 0;
        }

        // map the ranks to 0..len, keeping their relative order
        let sorted = ranks.iter().copied().sorted_unstable().collect_vec();
        let ordering = ranks
            .iter()
            .map(|rank| sorted.partition_point(|r| r < rank))
            .collect_vec();
        permutation_parity(&ordering)
    }

    /// Whether the simplex is the zero cell,
    /// i.e. its [`orientation_parity`][Self::orientation_parity] is 0.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.orientation_parity() == 0
    }

    /// Express the simplex with its spanning axes in canonical order.
    ///
    /// Zero extents are dropped and the sign is corrected
    /// by the parity of the reordering.
    /// Returns None for a degenerate simplex.
    pub fn canonical(&self) -> Option<Self> {
        let parity = Sign::from_parity(self.orientation_parity())?;
        let axes = self.base.axes();
        let vector = DiscreteVector::new(
            self.spanning()
                .copied()
                .sorted_by_key(|(axis, _)| axes.rank(*axis)),
        );
        Some(Self {
            base: self.base.clone(),
            vector,
            sign: self.sign * parity,
        })
    }

    /// Express the simplex with only non-negative extents.
    ///
    /// A negative extent along an axis moves the base to the other end of the cell
    /// along that axis and flips the orientation.
    pub fn reoriented(&self) -> Result<Self, SimplexError> {
        let mut base = self.base.clone();
        let mut sign = self.sign;
        let mut entries = Vec::with_capacity(self.vector.len());
        for &(axis, extent) in self.vector.entries() {
            if extent < 0 {
                base = base
                    .displaced(axis, extent)
                    .ok_or(SimplexError::NegativeOffset { axis })?;
                sign = -sign;
                entries.push((axis, -extent));
            } else {
                entries.push((axis, extent));
            }
        }

        Ok(Self {
            base,
            vector: DiscreteVector::new(entries),
            sign,
        })
    }

    /// [`reoriented`][Self::reoriented] followed by [`canonical`][Self::canonical].
    ///
    /// Two simplices describe the same cell
    /// iff their normalized forms agree up to sign.
    pub fn normalized(&self) -> Result<Option<Self>, SimplexError> {
        Ok(self.reoriented()?.canonical())
    }

    /// Orientation of `other` relative to `self`
    /// if both describe the same non-degenerate cell.
    ///
    /// Returns None if they describe different cells,
    /// either of them is degenerate or can't be normalized.
    pub fn relative_orientation(&self, other: &Simplex) -> Option<Sign> {
        let lhs = self.normalized().ok().flatten()?;
        let rhs = other.normalized().ok().flatten()?;
        (lhs.base == rhs.base && lhs.vector == rhs.vector).then(|| lhs.sign * rhs.sign)
    }

    /// Every way of listing the spanning axes of this simplex,
    /// each with its sign adjusted so that it describes the same oriented cell.
    ///
    /// Zero extents are dropped. The first listing keeps the original order.
    pub fn listings(&self) -> Vec<Self> {
        let spanning = self.spanning().copied().collect_vec();
        if spanning.is_empty() {
            return vec![Self {
                base: self.base.clone(),
                vector: DiscreteVector::default(),
                sign: self.sign,
            }];
        }

        let mut listings = Vec::with_capacity(factorial(spanning.len()));
        for perm in Permutations::new(spanning.len()).iter() {
            let vector = DiscreteVector::new(perm.indices.iter().map(|&i| spanning[i]));
            let sign = if perm.sign < 0 { -self.sign } else { self.sign };
            listings.push(Self {
                base: self.base.clone(),
                vector,
                sign,
            });
        }
        listings
    }

    /// The element at the far end of the simplex, `base + vector`.
    ///
    /// Returns None if it would have a negative offset.
    #[inline]
    pub fn tip(&self) -> Option<DiscreteElement> {
        self.base.checked_add(&self.vector)
    }
}

impl std::ops::Neg for Simplex {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            sign: -self.sign,
            ..self
        }
    }
}

impl std::ops::Neg for &Simplex {
    type Output = Simplex;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl std::fmt::Display for Simplex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the tip may lie outside the mesh, so it's computed with signed offsets
        let tip = izip!(self.base.axes().iter(), self.base.uids())
            .map(|(axis, &uid)| {
                // widened so that neither large offsets nor negative sums wrap
                let offset = uid as i128 + self.vector.extent(axis) as i128;
                format!("{axis}: {offset}")
            })
            .join(", ");
        let arrow = if self.is_negative() { "<-" } else { "->" };
        write!(f, "{} {arrow} ({tip})", self.base)
    }
}

/// The unit vectors spanning `k` of the given axes.
///
/// Every vector lists all axes in canonical order,
/// with an extent of 1 on the `k` chosen axes and 0 on the others.
/// There are `C(n, k)` of them, ordered lexicographically by the chosen axes,
/// e.g. `[1, 1, 0]`, `[1, 0, 1]`, `[0, 1, 1]` for three axes and `k = 2`.
pub fn tangent_basis(axes: &AxisSet, k: usize) -> Vec<DiscreteVector> {
    let zero: DiscreteVector = zero_value(axes);
    let basis = axes
        .iter()
        .combinations(k)
        .map(|chosen| zero.clone() + DiscreteVector::new(chosen.into_iter().map(|a| (a, 1))))
        .collect_vec();
    debug_assert_eq!(basis.len(), binomial_coefficient(axes.len(), k));
    basis
}
