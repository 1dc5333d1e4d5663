//! Tracing extensions for surface path computations.
//!
//! The library only emits events; it never installs a subscriber. Initialize one in your
//! application to see them:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // Set RUST_LOG=cuboid_path=debug for candidate distances
//! ```
//!
//! # Targets
//!
//! - `cuboid_path::classify` (INFO): the chosen regime
//! - `cuboid_path::unfold` (DEBUG): candidate distances; TRACE for local frames
//! - `cuboid_path::bounds` (DEBUG): the bounds-check outcome
//! - `cuboid_path::timing` (DEBUG): operation timing

use std::time::Instant;
use tracing::{Span, debug, info};

use crate::classify::Classification;
use crate::solver::DistanceBounds;
use crate::unfold::{Candidate, format_lengths};

/// A performance timer that logs duration on drop.
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Create a new operation timer.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!("path_operation", operation = name);
        debug!(target: "cuboid_path::timing", operation = name, "Starting operation");
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Get the elapsed time.
    pub fn elapsed_us(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1e6
    }

    /// Get the span for this timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        debug!(
            target: "cuboid_path::timing",
            operation = self.name,
            elapsed_us = format!("{:.2}", self.elapsed_us()),
            "Operation completed"
        );
    }
}

/// Log the chosen regime.
pub fn log_classification(classification: &Classification) {
    info!(
        target: "cuboid_path::classify",
        opposed_axis = ?classification.opposed_axis(),
        "{}",
        classification.label()
    );
}

/// Log every candidate length, e.g. `1.414, 2.000`.
pub fn log_candidates(classification: &Classification, candidates: &[Candidate]) {
    debug!(
        target: "cuboid_path::unfold",
        regime = classification.label(),
        count = candidates.len(),
        "{}",
        format_lengths(candidates)
    );
}

/// Log the outcome of the bounds check.
pub fn log_bounds_check(distance: f64, bounds: &DistanceBounds, within: bool) {
    if within {
        debug!(target: "cuboid_path::bounds", "result = {}", distance);
    } else {
        debug!(
            target: "cuboid_path::bounds",
            "result is not consistent with bounds, {:.3} not in [{:.3}, {:.3}]",
            distance,
            bounds.lower,
            bounds.upper
        );
    }
}
