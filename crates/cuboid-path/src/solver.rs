//! Solve orchestration: classify, unfold, then check the result against analytic bounds.
//!
//! Solving is a two-step sequence. [`Solver::classify`] yields a [`Classified`] problem,
//! and only a classified problem can be solved into a [`Solved`] one:
//!
//! ```
//! use cuboid_path::{Classification, Solver, construct_problem};
//!
//! let problem = construct_problem(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
//! let classified = Solver::new(&problem).tolerance(1e-9).classify();
//! assert!(matches!(classified.classification(), Classification::OppositeWall { .. }));
//!
//! let solved = classified.solve().unwrap();
//! assert!((solved.distance - 5.0_f64.sqrt()).abs() < 1e-12);
//! ```

use tracing::warn;

use crate::classify::{Classification, classify};
use crate::error::{PathError, PathResult};
use crate::problem::Problem;
use crate::tracing_ext::{OperationTimer, log_bounds_check, log_candidates, log_classification};
use crate::types::{DEFAULT_TOLERANCE, validate_tolerance};
use crate::unfold::{self, Candidate};

/// Parameters controlling classification and result checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// Relative tolerance for on-face, equality and bounds comparisons.
    pub tolerance: f64,
    /// Reject results outside `[euclidean distance, length + width + height]`.
    pub check_bounds: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            check_bounds: true,
        }
    }
}

impl SolverParams {
    /// Exact float comparisons, no tolerance at all.
    pub fn exact() -> Self {
        Self {
            tolerance: 0.0,
            ..Default::default()
        }
    }

    /// Create params with a custom tolerance.
    ///
    /// # Errors
    ///
    /// [`PathError::InvalidTolerance`] unless the tolerance is finite and in `[0, 0.5)`.
    pub fn with_tolerance(tolerance: f64) -> PathResult<Self> {
        Ok(Self {
            tolerance: validate_tolerance(tolerance)?,
            ..Default::default()
        })
    }
}

/// Analytic bounds every shortest surface path satisfies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBounds {
    /// Straight-line distance through the box.
    pub lower: f64,
    /// Sum of the box dimensions.
    pub upper: f64,
}

impl DistanceBounds {
    pub fn for_problem(problem: &Problem) -> Self {
        Self {
            lower: problem.euclidean_distance(),
            upper: problem.cuboid().perimeter_sum(),
        }
    }

    /// Whether `distance` lies in `[lower, upper]`, with slack `tolerance * upper` on both ends.
    pub fn contains(&self, distance: f64, tolerance: f64) -> bool {
        let slack = tolerance * self.upper;
        distance >= self.lower - slack && distance <= self.upper + slack
    }
}

/// Configures and starts a solve of one problem.
#[derive(Debug, Clone, Copy)]
pub struct Solver<'a> {
    problem: &'a Problem,
    params: SolverParams,
}

impl<'a> Solver<'a> {
    /// Start from the default parameters, with the tolerance the problem was validated with.
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            params: SolverParams {
                tolerance: problem.tolerance(),
                ..Default::default()
            },
        }
    }

    /// Replace all parameters.
    pub fn params(mut self, params: SolverParams) -> Self {
        self.params = params;
        self
    }

    /// Set the comparison tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.params.tolerance = tolerance;
        self
    }

    /// Enable or disable the bounds check.
    pub fn check_bounds(mut self, enabled: bool) -> Self {
        self.params.check_bounds = enabled;
        self
    }

    /// Determine the regime. Logged at INFO.
    pub fn classify(self) -> Classified<'a> {
        let classification = classify(self.problem, self.params.tolerance);
        log_classification(&classification);
        Classified {
            problem: self.problem,
            params: self.params,
            classification,
        }
    }
}

/// A problem whose regime is known.
#[derive(Debug, Clone, Copy)]
pub struct Classified<'a> {
    problem: &'a Problem,
    params: SolverParams,
    classification: Classification,
}

impl<'a> Classified<'a> {
    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    /// Unfold the candidates for this regime without picking or checking a result.
    pub fn candidates(&self) -> PathResult<Vec<Candidate>> {
        validate_tolerance(self.params.tolerance)?;
        let problem = self.problem;
        let candidates = match self.classification {
            Classification::SameWall => unfold::same_wall(problem.lizard(), problem.bug()),
            Classification::OppositeWall { axis } => unfold::opposite_wall(problem, axis),
            Classification::AdjacentWall => unfold::adjacent_wall(problem, self.params.tolerance)?,
        };
        log_candidates(&self.classification, &candidates);
        Ok(candidates)
    }

    /// Run the solver for this regime and check the result.
    ///
    /// # Errors
    ///
    /// - [`PathError::InvalidTolerance`] when the configured tolerance is unusable
    /// - [`PathError::NoCanonicalOrientation`] / [`PathError::NonFiniteDistance`] when an
    ///   internal invariant is broken
    /// - [`PathError::BoundsViolation`] when the result is outside [`DistanceBounds`]
    ///   and bounds checking is enabled
    pub fn solve(self) -> PathResult<Solved> {
        let _timer = OperationTimer::new("solve");

        let candidates = self.candidates()?;
        let best = unfold::shortest(&candidates).ok_or_else(|| {
            PathError::non_finite_distance(format!("no candidates for {}", self.classification))
        })?;
        let distance = best.length();
        if !distance.is_finite() {
            return Err(PathError::non_finite_distance(format!(
                "{} candidate {} has length {}",
                self.classification, best.route, distance
            )));
        }

        let bounds = DistanceBounds::for_problem(self.problem);
        if self.params.check_bounds {
            let within = bounds.contains(distance, self.params.tolerance);
            log_bounds_check(distance, &bounds, within);
            if !within {
                return Err(PathError::bounds_violation(distance, bounds.lower, bounds.upper));
            }
        }

        Ok(Solved {
            classification: self.classification,
            candidates,
            best,
            distance,
            bounds,
        })
    }
}

/// The outcome of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solved {
    pub classification: Classification,
    /// Every unfolding considered, in evaluation order.
    pub candidates: Vec<Candidate>,
    /// The shortest candidate.
    pub best: Candidate,
    /// Length of `best`.
    pub distance: f64,
    pub bounds: DistanceBounds,
}

/// Shortest surface distance between the two points of `problem`, using the tolerance the
/// problem was validated with.
///
/// Returns `Ok(None)` when the computed distance is inconsistent with its analytic bounds,
/// and `Err` only when an internal invariant is broken.
pub fn solve(problem: &Problem) -> PathResult<Option<f64>> {
    finish(Solver::new(problem).classify().solve())
}

/// Like [`solve`], with explicit parameters.
///
/// Also fails with [`PathError::InvalidTolerance`] when `params.tolerance` is unusable.
pub fn solve_with(problem: &Problem, params: &SolverParams) -> PathResult<Option<f64>> {
    finish(Solver::new(problem).params(*params).classify().solve())
}

fn finish(result: PathResult<Solved>) -> PathResult<Option<f64>> {
    match result {
        Ok(solved) => Ok(Some(solved.distance)),
        Err(PathError::BoundsViolation { .. }) => Ok(None),
        Err(err) => {
            if err.code().is_internal() {
                warn!(target: "cuboid_path::bounds", code = %err.code(), "{}", err);
            }
            Err(err)
        }
    }
}
