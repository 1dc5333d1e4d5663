// Allow unused_assignments lint for error struct fields that are used in thiserror Display macros
// but appear as "never read" to the compiler.
#![allow(unused_assignments)]

//! Error types for surface path computations with rich diagnostics.
//!
//! Errors fall into three classes:
//! - Invalid geometry: the inputs do not describe a box with two surface points
//! - Broken invariants: the solver reached a state a valid problem cannot produce
//! - Inconsistent results: a computed distance fell outside its analytic bounds
//!
//! # Error Codes
//!
//! Each error has a unique code in the format `PATH-XXXX`:
//! - `PATH-1xxx`: Input geometry errors
//! - `PATH-2xxx`: Internal invariant failures
//! - `PATH-3xxx`: Result consistency errors
//!
//! # Example
//!
//! ```
//! use cuboid_path::{Axis, ErrorCode, PathError, PointDefect, PointRole};
//!
//! let err = PathError::invalid_point(PointRole::Bug, [-1.0, 0.0, 0.0], PointDefect::OutOfRange { axis: Axis::X });
//! assert_eq!(err.code(), ErrorCode::InvalidPoint);
//! assert_eq!(err.code().as_str(), "PATH-1002");
//! ```

use miette::Diagnostic;
use thiserror::Error;

use crate::types::Axis;

/// Result type alias for surface path operations.
pub type PathResult<T> = Result<T, PathError>;

/// Machine-readable error codes.
///
/// Codes follow the pattern `PATH-XXXX` where:
/// - 1xxx = Input geometry errors
/// - 2xxx = Internal invariant failures
/// - 3xxx = Result consistency errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// PATH-1001: Box dimensions are not strictly positive and finite
    InvalidCuboid = 1001,
    /// PATH-1002: Point is not on the surface of the box
    InvalidPoint = 1002,
    /// PATH-1003: Comparison tolerance is not finite or outside `[0, 0.5)`
    InvalidTolerance = 1003,

    /// PATH-2001: No orientation maps the two points onto adjacent canonical faces
    NoCanonicalOrientation = 2001,
    /// PATH-2002: An unfolding produced NaN or infinity
    NonFiniteDistance = 2002,

    /// PATH-3001: Computed distance lies outside its analytic bounds
    BoundsViolation = 3001,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `PATH-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCuboid => "PATH-1001",
            ErrorCode::InvalidPoint => "PATH-1002",
            ErrorCode::InvalidTolerance => "PATH-1003",
            ErrorCode::NoCanonicalOrientation => "PATH-2001",
            ErrorCode::NonFiniteDistance => "PATH-2002",
            ErrorCode::BoundsViolation => "PATH-3001",
        }
    }

    /// True for codes that signal a defect in the solver rather than in the input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ErrorCode::NoCanonicalOrientation | ErrorCode::NonFiniteDistance
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which of the two points of a problem an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointRole {
    /// The first point (the one doing the walking).
    Lizard,
    /// The second point (the target).
    Bug,
}

impl std::fmt::Display for PointRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointRole::Lizard => write!(f, "lizard"),
            PointRole::Bug => write!(f, "bug"),
        }
    }
}

/// Why a point was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointDefect {
    /// A coordinate is NaN or infinite.
    NonFinite,
    /// A coordinate lies outside `[0, dimension]`.
    OutOfRange { axis: Axis },
    /// The point is inside the box and touches no face.
    Interior,
}

impl std::fmt::Display for PointDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointDefect::NonFinite => write!(f, "a coordinate is not finite"),
            PointDefect::OutOfRange { axis } => {
                write!(f, "{} coordinate is outside the box", axis)
            }
            PointDefect::Interior => write!(f, "point is inside the box, not on a face"),
        }
    }
}

/// Recovery suggestions for path errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Fix the box dimensions.
    FixDimensions,
    /// Move the point onto one of the faces.
    MovePointToSurface { role: PointRole },
    /// Loosen or tighten the comparison tolerance.
    AdjustTolerance,
    /// Pick a tolerance inside the accepted range.
    ChooseTolerance,
    /// The solver itself is at fault; report the inputs.
    ReportBug,
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySuggestion::FixDimensions => {
                write!(f, "Use strictly positive, finite length, width and height")
            }
            RecoverySuggestion::MovePointToSurface { role } => write!(
                f,
                "Place the {} on a face: every coordinate within [0, dimension] and at least one equal to 0 or its dimension",
                role
            ),
            RecoverySuggestion::AdjustTolerance => write!(
                f,
                "Solve with the same tolerance the problem was validated with (see --tolerance)"
            ),
            RecoverySuggestion::ChooseTolerance => write!(
                f,
                "Use a finite tolerance in [0, 0.5), such as the default 1e-9, or --exact for 0"
            ),
            RecoverySuggestion::ReportBug => {
                write!(f, "This is a solver defect; please report the nine inputs")
            }
        }
    }
}

/// Errors that can occur while building or solving a surface path problem.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    /// The box has a non-positive or non-finite dimension.
    #[error("invalid box: {length} x {width} x {height}")]
    #[diagnostic(
        code(path::input::cuboid),
        help("All three dimensions must be finite and strictly positive.")
    )]
    InvalidCuboid { length: f64, width: f64, height: f64 },

    /// A point is not on the surface of the box.
    #[error("invalid {role} at ({x}, {y}, {z}): {defect}")]
    #[diagnostic(
        code(path::input::point),
        help("Each coordinate must lie in [0, dimension] and at least one must sit on a face.")
    )]
    InvalidPoint {
        role: PointRole,
        x: f64,
        y: f64,
        z: f64,
        defect: PointDefect,
    },

    /// The comparison tolerance is unusable.
    #[error("invalid tolerance: {tolerance} is not a finite value in [0, 0.5)")]
    #[diagnostic(
        code(path::input::tolerance),
        help("At 0.5 or above a coordinate can sit on both faces of an axis at once.")
    )]
    InvalidTolerance { tolerance: f64 },

    /// The adjacent-wall solver found no orientation placing the points on canonical faces.
    #[error("no canonical orientation: {details}")]
    #[diagnostic(
        code(path::internal::orientation),
        help("The points were validated with a looser tolerance than the solver uses.")
    )]
    NoCanonicalOrientation { details: String },

    /// An unfolding produced a NaN or infinite length.
    #[error("non-finite distance: {details}")]
    #[diagnostic(code(path::internal::non_finite))]
    NonFiniteDistance { details: String },

    /// The computed distance is outside `[lower, upper]`.
    #[error("result is not consistent with bounds, {distance:.3} not in [{lower:.3}, {upper:.3}]")]
    #[diagnostic(
        code(path::result::bounds),
        help("One of the unfolding formulas does not apply to this configuration.")
    )]
    BoundsViolation { distance: f64, lower: f64, upper: f64 },
}

impl PathError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PathError::InvalidCuboid { .. } => ErrorCode::InvalidCuboid,
            PathError::InvalidPoint { .. } => ErrorCode::InvalidPoint,
            PathError::InvalidTolerance { .. } => ErrorCode::InvalidTolerance,
            PathError::NoCanonicalOrientation { .. } => ErrorCode::NoCanonicalOrientation,
            PathError::NonFiniteDistance { .. } => ErrorCode::NonFiniteDistance,
            PathError::BoundsViolation { .. } => ErrorCode::BoundsViolation,
        }
    }

    /// Returns a recovery suggestion for this error.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self {
            PathError::InvalidCuboid { .. } => RecoverySuggestion::FixDimensions,
            PathError::InvalidPoint { role, .. } => {
                RecoverySuggestion::MovePointToSurface { role: *role }
            }
            PathError::InvalidTolerance { .. } => RecoverySuggestion::ChooseTolerance,
            PathError::NoCanonicalOrientation { .. } => RecoverySuggestion::AdjustTolerance,
            PathError::NonFiniteDistance { .. } | PathError::BoundsViolation { .. } => {
                RecoverySuggestion::ReportBug
            }
        }
    }

    // Constructor helpers

    /// Create an InvalidCuboid error.
    pub fn invalid_cuboid(length: f64, width: f64, height: f64) -> Self {
        PathError::InvalidCuboid {
            length,
            width,
            height,
        }
    }

    /// Create an InvalidPoint error.
    pub fn invalid_point(role: PointRole, [x, y, z]: [f64; 3], defect: PointDefect) -> Self {
        PathError::InvalidPoint {
            role,
            x,
            y,
            z,
            defect,
        }
    }

    /// Create an InvalidTolerance error.
    pub fn invalid_tolerance(tolerance: f64) -> Self {
        PathError::InvalidTolerance { tolerance }
    }

    /// Create a NoCanonicalOrientation error.
    pub fn no_canonical_orientation(details: impl Into<String>) -> Self {
        PathError::NoCanonicalOrientation {
            details: details.into(),
        }
    }

    /// Create a NonFiniteDistance error.
    pub fn non_finite_distance(details: impl Into<String>) -> Self {
        PathError::NonFiniteDistance {
            details: details.into(),
        }
    }

    /// Create a BoundsViolation error.
    pub fn bounds_violation(distance: f64, lower: f64, upper: f64) -> Self {
        PathError::BoundsViolation {
            distance,
            lower,
            upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PathError::invalid_cuboid(1.0, 0.0, 3.0);
        assert_eq!(err.code(), ErrorCode::InvalidCuboid);
        assert_eq!(err.code().as_str(), "PATH-1001");

        let err = PathError::bounds_violation(5.0, 1.0, 3.0);
        assert_eq!(err.code().to_string(), "PATH-3001");
    }

    #[test]
    fn test_internal_codes() {
        assert!(ErrorCode::NoCanonicalOrientation.is_internal());
        assert!(ErrorCode::NonFiniteDistance.is_internal());
        assert!(!ErrorCode::InvalidPoint.is_internal());
        assert!(!ErrorCode::BoundsViolation.is_internal());
    }

    #[test]
    fn test_invalid_tolerance_error() {
        let err = PathError::invalid_tolerance(f64::NAN);
        assert_eq!(err.code().as_str(), "PATH-1003");
        assert!(!err.code().is_internal());
        assert_eq!(err.recovery_suggestion(), RecoverySuggestion::ChooseTolerance);
        assert!(err.to_string().starts_with("invalid tolerance: NaN"));
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = PathError::invalid_point(PointRole::Lizard, [0.5, 0.5, 0.5], PointDefect::Interior);
        match err.recovery_suggestion() {
            RecoverySuggestion::MovePointToSurface { role } => assert_eq!(role, PointRole::Lizard),
            _ => panic!("Expected MovePointToSurface suggestion"),
        }
        assert!(err.recovery_suggestion().to_string().contains("lizard"));
    }

    #[test]
    fn test_error_display() {
        let err = PathError::invalid_point(
            PointRole::Bug,
            [-1.0, 0.0, 0.0],
            PointDefect::OutOfRange { axis: Axis::X },
        );
        let display = format!("{}", err);
        assert!(display.contains("bug"));
        assert!(display.contains("x coordinate"));

        let err = PathError::bounds_violation(5.0, 1.0, 3.0);
        assert_eq!(
            err.to_string(),
            "result is not consistent with bounds, 5.000 not in [1.000, 3.000]"
        );
    }
}
