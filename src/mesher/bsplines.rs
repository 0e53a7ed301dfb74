use nalgebra as na;

/// A B-spline basis of uniformly spaced cells over an interval.
///
/// Only the knot layout is described here;
/// evaluating the basis functions is up to the user.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformBSplines {
    degree: usize,
    lower: f64,
    upper: f64,
    cell_count: usize,
    periodic: bool,
}

impl UniformBSplines {
    /// Bounds and counts are validated by the mesher
    /// (`lower < upper`, both finite, `cell_count >= 1`, `degree >= 1`).
    pub(crate) fn new(
        degree: usize,
        lower: f64,
        upper: f64,
        cell_count: usize,
        periodic: bool,
    ) -> Self {
        Self {
            degree,
            lower,
            upper,
            cell_count,
            periodic,
        }
    }

    /// Polynomial degree of the basis functions.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Start of the interval.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// End of the interval.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Number of cells the interval is divided into.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Whether the basis wraps around at the ends of the interval.
    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Number of basis functions.
    ///
    /// `cell_count + degree` for a clamped basis,
    /// `cell_count` for a periodic one.
    #[inline]
    pub fn nbasis(&self) -> usize {
        if self.periodic {
            self.cell_count
        } else {
            self.cell_count + self.degree
        }
    }

    /// Width of a single cell.
    #[inline]
    pub fn cell_width(&self) -> f64 {
        (self.upper - self.lower) / self.cell_count as f64
    }

    // interpolated rather than accumulated
    // so that t = 1 gives exactly `upper` and wide intervals don't overflow
    fn point_at(&self, t: f64) -> f64 {
        self.lower * (1. - t) + self.upper * t
    }

    fn break_point(&self, idx: usize) -> f64 {
        self.point_at(idx as f64 / self.cell_count as f64)
    }

    /// The `cell_count + 1` cell boundaries, from `lower` to `upper`.
    pub fn break_points(&self) -> na::DVector<f64> {
        na::DVector::from_fn(self.cell_count + 1, |m, _| self.break_point(m))
    }

    /// The knot vector, `cell_count + 2 * degree + 1` knots.
    ///
    /// A clamped basis repeats each end point `degree` extra times.
    /// A periodic basis continues the uniform spacing past the ends instead.
    pub fn knots(&self) -> na::DVector<f64> {
        let knot_count = self.cell_count + 2 * self.degree + 1;
        if self.periodic {
            let n = self.cell_count as f64;
            na::DVector::from_fn(knot_count, |j, _| {
                self.point_at((j as f64 - self.degree as f64) / n)
            })
        } else {
            na::DVector::from_fn(knot_count, |j, _| {
                self.break_point(j.saturating_sub(self.degree).min(self.cell_count))
            })
        }
    }

    /// The Greville abscissae of the basis, one per basis function.
    ///
    /// For a clamped basis these are the averages of `degree` consecutive knots,
    /// which start at `lower`, end at `upper`
    /// and are packed more densely near the ends for degrees above 1.
    /// For a periodic basis they are uniformly spaced,
    /// shifted by half a cell for even degrees.
    pub fn greville_points(&self) -> na::DVector<f64> {
        let n = self.cell_count;
        let p = self.degree;
        if self.periodic {
            let shift = if p % 2 == 0 { 0.5 } else { 0. };
            na::DVector::from_fn(n, |i, _| self.point_at((i as f64 + shift) / n as f64))
        } else {
            // knots are break points, which are affine in their index,
            // so the knot average is the break point at the average index
            na::DVector::from_fn(self.nbasis(), |i, _| {
                let idx_sum: usize = (i + 1..=i + p).map(|j| j.saturating_sub(p).min(n)).sum();
                self.point_at(idx_sum as f64 / (p * n) as f64)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clamped_knots() {
        let bs = UniformBSplines::new(2, -1., 1., 4, false);
        assert_eq!(bs.nbasis(), 6);
        assert_relative_eq!(bs.cell_width(), 0.5);
        assert_relative_eq!(
            bs.break_points(),
            na::DVector::from_vec(vec![-1., -0.5, 0., 0.5, 1.])
        );
        assert_relative_eq!(
            bs.knots(),
            na::DVector::from_vec(vec![-1., -1., -1., -0.5, 0., 0.5, 1., 1., 1.])
        );
    }

    #[test]
    fn periodic_knots() {
        let bs = UniformBSplines::new(2, 0., 1., 4, true);
        assert_eq!(bs.nbasis(), 4);
        assert_relative_eq!(
            bs.knots(),
            na::DVector::from_vec(vec![-0.5, -0.25, 0., 0.25, 0.5, 0.75, 1., 1.25, 1.5])
        );
    }

    #[test]
    fn greville_points_average_knots() {
        let bs = UniformBSplines::new(2, -1., 1., 4, false);
        // averages of knot pairs (1, 2), (2, 3), ..., (6, 7)
        assert_relative_eq!(
            bs.greville_points(),
            na::DVector::from_vec(vec![-1., -0.75, -0.25, 0.25, 0.75, 1.])
        );

        let linear = UniformBSplines::new(1, 2., 3., 5, false);
        assert_relative_eq!(linear.greville_points(), linear.break_points());
    }

    #[test]
    fn periodic_greville_shift() {
        let odd = UniformBSplines::new(3, 0., 2., 4, true);
        assert_relative_eq!(
            odd.greville_points(),
            na::DVector::from_vec(vec![0., 0.5, 1., 1.5])
        );
        let even = UniformBSplines::new(2, 0., 2., 4, true);
        assert_relative_eq!(
            even.greville_points(),
            na::DVector::from_vec(vec![0.25, 0.75, 1.25, 1.75])
        );
    }

    #[test]
    fn greville_points_agree_with_knot_averages() {
        let bs = UniformBSplines::new(3, 0.2, 1.7, 6, false);
        let knots = bs.knots();
        let averages = na::DVector::from_fn(bs.nbasis(), |i, _| knots.rows(i + 1, 3).mean());
        assert_relative_eq!(bs.greville_points(), averages, epsilon = 1e-12);
    }

    #[test]
    fn wide_intervals_stay_finite() {
        for periodic in [false, true] {
            let bs = UniformBSplines::new(3, -f64::MAX, f64::MAX, 10, periodic);
            let points = bs.greville_points();
            assert!(points.iter().all(|x| x.is_finite()));
            assert_eq!(points[0], -f64::MAX);
        }
        let bs = UniformBSplines::new(2, -1e308, 1e308, 7, false);
        let points = bs.greville_points();
        assert!(points.iter().all(|x| x.is_finite()));
        assert_eq!(points[0], -1e308);
        assert_eq!(points[bs.nbasis() - 1], 1e308);
    }

    #[test]
    fn last_break_point_is_exact() {
        let bs = UniformBSplines::new(3, 0.1, 0.7, 7, false);
        let bp = bs.break_points();
        assert_eq!(bp[0], 0.1);
        assert_eq!(bp[7], 0.7);
    }
}
