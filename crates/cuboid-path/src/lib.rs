//! Shortest paths on the surface of a rectangular box.
//!
//! Given a box and two points on its surface, this crate finds the length of the shortest
//! path between them that never leaves the surface (the "spider and fly" problem). The
//! problem is classified into one of three regimes and the relevant faces are unfolded
//! into a plane, where every candidate path is a straight segment.
//!
//! # Coordinate System
//!
//! The box has one corner at the origin:
//! - X: length, faces at `x = 0` and `x = length`
//! - Y: width, faces at `y = 0` and `y = width`
//! - Z: height, faces at `z = 0` and `z = height`
//!
//! # Quick Start
//!
//! ```
//! use cuboid_path::construct_problem;
//!
//! // Unit cube, opposite corners
//! let problem = construct_problem(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
//! let distance = problem.solve().unwrap().unwrap();
//! assert!((distance - 5.0_f64.sqrt()).abs() < 1e-12);
//! ```
//!
//! # Regimes
//!
//! | Regime | Points | Candidates |
//! |--------|--------|------------|
//! | same wall | on one face | the straight segment |
//! | opposite wall | on two parallel faces | nine unfoldings over the side faces |
//! | adjacent wall | on two faces sharing an edge | two unfoldings per orientation |
//!
//! # Tolerance
//!
//! Coordinates are compared with a tolerance relative to the dimension of the axis being
//! tested ([`DEFAULT_TOLERANCE`], adjustable through [`SolverParams`]). It decides whether a
//! point is on a face and therefore which regime a boundary-adjacent input falls into.
//! A [`Problem`] remembers the tolerance it was validated with and solves with it by
//! default. Tolerances outside `[0, MAX_TOLERANCE)` are rejected by [`validate_tolerance`].
//!
//! # Error Handling
//!
//! - Malformed input is expected: [`construct_problem`] returns `None`.
//!   [`Problem::try_new`] reports the reason as a [`PathError`].
//! - A result outside its analytic bounds makes [`solve`] return `Ok(None)`.
//! - A broken internal invariant makes [`solve`] return `Err`.
//!
//! ```
//! use cuboid_path::{Cuboid, PathError, Problem, SurfacePoint};
//!
//! match Problem::try_new(
//!     Cuboid::new(1.0, 2.0, 3.0),
//!     SurfacePoint::new(1.0, 2.0, 3.0),
//!     SurfacePoint::new(-1.0, 0.0, 0.0),
//! ) {
//!     Err(PathError::InvalidPoint { role, defect, .. }) => println!("{role}: {defect}"),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```
//!
//! # Logging
//!
//! Diagnostic events are emitted with `tracing`; see [`tracing_ext`] for targets and levels.

mod classify;
mod error;
mod problem;
mod solver;
pub mod tracing_ext;
mod types;

pub mod unfold;

pub use classify::{AxisRelation, Classification, axis_relations, classify};
pub use error::{ErrorCode, PathError, PathResult, PointDefect, PointRole, RecoverySuggestion};
pub use problem::{Problem, construct_problem};
pub use solver::{Classified, DistanceBounds, Solved, Solver, SolverParams, solve, solve_with};
pub use types::{
    Axis, Cuboid, DEFAULT_TOLERANCE, Face, MAX_TOLERANCE, Side, SurfacePoint, validate_tolerance,
};
pub use unfold::{Candidate, Route, SideFace};
