//! A box together with the two surface points to connect.

use crate::error::{PathResult, PointRole};
use crate::solver::solve;
use crate::types::{Cuboid, DEFAULT_TOLERANCE, SurfacePoint, validate_tolerance};

/// A validated shortest-path problem.
///
/// A `Problem` can only be obtained through [`construct_problem`], [`Problem::try_new`] or
/// [`Problem::try_new_within`]. It remembers the tolerance it was validated with, so every
/// instance satisfies [`Problem::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Problem {
    cuboid: Cuboid,
    lizard: SurfacePoint,
    bug: SurfacePoint,
    tolerance: f64,
}

impl Problem {
    /// Validate the parts and assemble a problem, reporting the first defect found.
    pub fn try_new(cuboid: Cuboid, lizard: SurfacePoint, bug: SurfacePoint) -> PathResult<Self> {
        Self::try_new_within(cuboid, lizard, bug, DEFAULT_TOLERANCE)
    }

    /// Like [`Problem::try_new`], with an explicit on-face tolerance.
    ///
    /// The tolerance must pass [`crate::validate_tolerance`]. It becomes the default
    /// tolerance for solving this problem.
    pub fn try_new_within(
        cuboid: Cuboid,
        lizard: SurfacePoint,
        bug: SurfacePoint,
        tolerance: f64,
    ) -> PathResult<Self> {
        let tolerance = validate_tolerance(tolerance)?;
        cuboid.validate()?;
        lizard.validate(&cuboid, PointRole::Lizard, tolerance)?;
        bug.validate(&cuboid, PointRole::Bug, tolerance)?;
        Ok(Self {
            cuboid,
            lizard,
            bug,
            tolerance,
        })
    }

    #[inline]
    pub fn cuboid(&self) -> &Cuboid {
        &self.cuboid
    }

    #[inline]
    pub fn lizard(&self) -> &SurfacePoint {
        &self.lizard
    }

    #[inline]
    pub fn bug(&self) -> &SurfacePoint {
        &self.bug
    }

    /// The on-face tolerance this problem was validated with.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// True when the box is valid and both points lie on its surface, within
    /// [`Problem::tolerance`].
    pub fn is_valid(&self) -> bool {
        self.cuboid.is_valid()
            && self.lizard.is_valid_within(&self.cuboid, self.tolerance)
            && self.bug.is_valid_within(&self.cuboid, self.tolerance)
    }

    /// The same problem with the two points exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            lizard: self.bug,
            bug: self.lizard,
            ..*self
        }
    }

    /// Straight-line distance between the points.
    pub fn euclidean_distance(&self) -> f64 {
        self.lizard.distance_to(&self.bug)
    }

    /// Shortest surface distance with default parameters. See [`solve`].
    pub fn solve(&self) -> PathResult<Option<f64>> {
        solve(self)
    }
}

/// Build a problem from nine scalars: box dimensions, lizard, then bug.
///
/// Returns `None` when the box is invalid or either point is off the surface.
///
/// ```
/// use cuboid_path::construct_problem;
///
/// assert!(construct_problem(1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 0.0, 0.0, 0.0).is_some());
/// assert!(construct_problem(1.0, 2.0, 3.0, 1.0, 2.0, 3.0, -1.0, 0.0, 0.0).is_none());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn construct_problem(
    l: f64,
    w: f64,
    h: f64,
    x1: f64,
    y1: f64,
    z1: f64,
    x2: f64,
    y2: f64,
    z2: f64,
) -> Option<Problem> {
    Problem::try_new(
        Cuboid::new(l, w, h),
        SurfacePoint::new(x1, y1, z1),
        SurfacePoint::new(x2, y2, z2),
    )
    .ok()
}
