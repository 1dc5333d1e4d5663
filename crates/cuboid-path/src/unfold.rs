//! Unfolding solvers for the three regimes.
//!
//! Each solver works in a *local frame*: the box is relabelled and mirrored so that the
//! configuration takes one canonical shape, then the faces a path may cross are laid flat
//! and every candidate path becomes a straight segment in the plane. A candidate is
//! described by its horizontal and vertical run in that plane.
//!
//! Local frame conventions: dimensions `(l, w, h)` along local `(x, y, z)`, point 1 is
//! `(x1, y1, z1)` and point 2 is `(x2, y2, z2)`.

use nalgebra::{Point3, Vector2, Vector3};
use tracing::{debug, trace};

use crate::error::{PathError, PathResult};
use crate::problem::Problem;
use crate::types::{Axis, Face, Side, SurfacePoint, approx_eq};

/// A side face of the opposite-wall local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideFace {
    /// `y = 0`.
    Front,
    /// `y = w`.
    Back,
    /// `z = 0`.
    Floor,
}

/// The sequence of faces an unfolded candidate path crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Straight across a shared face.
    Direct,
    /// Over a single side face between opposite walls.
    Across(SideFace),
    /// Over two neighbouring side faces between opposite walls.
    Turn { exit: SideFace, enter: SideFace },
    /// Under the floor from one vertical side face to the other.
    Wrap { exit: SideFace, enter: SideFace },
    /// Over the edge shared by two adjacent walls.
    OverEdge,
    /// Down one adjacent wall, across the floor and up the other.
    ViaFloor,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Direct => write!(f, "direct"),
            Route::Across(side) => write!(f, "across {:?}", side),
            Route::Turn { exit, enter } => write!(f, "turn {:?} -> {:?}", exit, enter),
            Route::Wrap { exit, enter } => write!(f, "wrap {:?} -> {:?}", exit, enter),
            Route::OverEdge => write!(f, "over edge"),
            Route::ViaFloor => write!(f, "via floor"),
        }
    }
}

/// One unfolded straight-line candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub route: Route,
    /// Run along the unfolded strip.
    pub horizontal: f64,
    /// Rise across the unfolded strip.
    pub vertical: f64,
}

impl Candidate {
    #[inline]
    pub fn new(route: Route, horizontal: f64, vertical: f64) -> Self {
        Self {
            route,
            horizontal,
            vertical,
        }
    }

    /// Euclidean length of the unfolded segment.
    #[inline]
    pub fn length(&self) -> f64 {
        Vector2::new(self.horizontal, self.vertical).norm()
    }
}

/// Axis permutation plus per-axis mirroring, mapping the box onto itself.
///
/// Local axis `i` reads global axis `axes[i]`, mirrored (`d - v`) when `flips[i]` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub axes: [Axis; 3],
    pub flips: [bool; 3],
}

impl Orientation {
    /// Cyclic relabelling that makes `axis` the local x axis.
    pub fn cyclic_from(axis: Axis) -> Self {
        Self {
            axes: [axis, axis.next(), axis.next().next()],
            flips: [false; 3],
        }
    }

    /// Orientation putting `first` at local `x = 0` and `second` at local `y = 0`.
    ///
    /// Returns `None` when the faces are perpendicular to the same axis.
    pub fn for_adjacent(first: Face, second: Face) -> Option<Self> {
        let third = first.axis.third(second.axis)?;
        Some(Self {
            axes: [first.axis, second.axis, third],
            flips: [first.side == Side::Max, second.side == Side::Max, false],
        })
    }

    fn apply(&self, dims: &Vector3<f64>, p: &Point3<f64>) -> (Vector3<f64>, Point3<f64>) {
        let mut local_dims = Vector3::zeros();
        let mut local = Point3::origin();
        for i in 0..3 {
            let g = self.axes[i].index();
            local_dims[i] = dims[g];
            local[i] = if self.flips[i] { dims[g] - p[g] } else { p[g] };
        }
        (local_dims, local)
    }
}

/// Dimensions and both points expressed in an [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    pub dims: Vector3<f64>,
    pub p1: Point3<f64>,
    pub p2: Point3<f64>,
}

impl LocalFrame {
    pub fn new(problem: &Problem, orientation: &Orientation) -> Self {
        let dims = problem.cuboid().as_vector();
        let (local_dims, p1) = orientation.apply(&dims, &problem.lizard().position());
        let (_, p2) = orientation.apply(&dims, &problem.bug().position());
        Self {
            dims: local_dims,
            p1,
            p2,
        }
    }

    /// Mirror through the mid-height plane when the points sit high on average.
    ///
    /// Afterwards `z1 + z2 <= h`, so routes over the floor dominate routes over the ceiling.
    /// Returns whether the frame was mirrored.
    pub fn fold_height(&mut self) -> bool {
        let h = self.dims.z;
        if self.p1.z + self.p2.z > h {
            self.p1.z = h - self.p1.z;
            self.p2.z = h - self.p2.z;
            true
        } else {
            false
        }
    }
}

/// Same wall: the straight segment between the points stays on their common face.
pub fn same_wall(lizard: &SurfacePoint, bug: &SurfacePoint) -> Vec<Candidate> {
    vec![Candidate::new(Route::Direct, lizard.distance_to(bug), 0.0)]
}

/// Opposite walls across `axis`: the nine unfoldings over one, two or three side faces.
pub fn opposite_wall(problem: &Problem, axis: Axis) -> Vec<Candidate> {
    use SideFace::{Back, Floor, Front};

    let mut frame = LocalFrame::new(problem, &Orientation::cyclic_from(axis));
    let folded = frame.fold_height();
    trace!(target: "cuboid_path::unfold", ?axis, folded, ?frame, "Opposite-wall frame");

    let (l, w) = (frame.dims.x, frame.dims.y);
    let (y1, z1) = (frame.p1.y, frame.p1.z);
    let (y2, z2) = (frame.p2.y, frame.p2.z);

    vec![
        Candidate::new(Route::Across(Front), y1 + l + y2, z1 - z2),
        Candidate::new(Route::Turn { exit: Front, enter: Floor }, y1 + l + z2, z1 + y2),
        Candidate::new(Route::Wrap { exit: Front, enter: Back }, y1 + l + (w - y2), z1 + w + z2),
        Candidate::new(Route::Turn { exit: Floor, enter: Front }, z1 + l + y2, y1 + z2),
        Candidate::new(Route::Across(Floor), z1 + l + z2, y1 - y2),
        Candidate::new(Route::Turn { exit: Floor, enter: Back }, z1 + l + (w - y2), (w - y1) + z2),
        Candidate::new(Route::Wrap { exit: Back, enter: Front }, (w - y1) + l + y2, z1 + w + z2),
        Candidate::new(Route::Turn { exit: Back, enter: Floor }, (w - y1) + l + z2, z1 + (w - y2)),
        Candidate::new(Route::Across(Back), (w - y1) + l + (w - y2), z1 - z2),
    ]
}

/// Every orientation putting the lizard at local `x = 0` and the bug at local `y = 0`.
///
/// Enumerates pairs of faces from [`Face::ALL`]: at most three faces hold each point and
/// the bug's face must lie on a different axis, so there are at most six orientations.
pub fn adjacent_orientations(problem: &Problem, tolerance: f64) -> Vec<Orientation> {
    let cuboid = problem.cuboid();
    let lizard_faces = problem.lizard().faces(cuboid, tolerance);
    let bug_faces = problem.bug().faces(cuboid, tolerance);

    let mut orientations = Vec::new();
    for first in &lizard_faces {
        for second in &bug_faces {
            if let Some(orientation) = Orientation::for_adjacent(*first, *second) {
                orientations.push(orientation);
            }
        }
    }
    orientations
}

/// Adjacent walls: two unfoldings per canonical orientation.
///
/// Fails with [`PathError::NoCanonicalOrientation`] when the points are not on two
/// faces sharing an edge under `tolerance`.
pub fn adjacent_wall(problem: &Problem, tolerance: f64) -> PathResult<Vec<Candidate>> {
    let orientations = adjacent_orientations(problem, tolerance);
    if orientations.is_empty() {
        return Err(PathError::no_canonical_orientation(format!(
            "lizard on {:?}, bug on {:?}",
            problem.lizard().faces(problem.cuboid(), tolerance),
            problem.bug().faces(problem.cuboid(), tolerance),
        )));
    }

    let mut candidates = Vec::with_capacity(2 * orientations.len());
    for orientation in &orientations {
        let mut frame = LocalFrame::new(problem, orientation);

        let canonical = approx_eq(frame.p1.x, 0.0, frame.dims.x, tolerance)
            && approx_eq(frame.p2.y, 0.0, frame.dims.y, tolerance);
        if !canonical {
            return Err(PathError::no_canonical_orientation(format!(
                "{:?} maps lizard to x = {} and bug to y = {}",
                orientation, frame.p1.x, frame.p2.y
            )));
        }

        let folded = frame.fold_height();
        trace!(target: "cuboid_path::unfold", ?orientation, folded, ?frame, "Adjacent-wall frame");

        let (x2, y1) = (frame.p2.x, frame.p1.y);
        let (z1, z2) = (frame.p1.z, frame.p2.z);
        candidates.push(Candidate::new(Route::ViaFloor, z1 + x2, y1 + z2));
        candidates.push(Candidate::new(Route::OverEdge, y1 + x2, z1 - z2));
    }

    debug!(
        target: "cuboid_path::unfold",
        orientations = orientations.len(),
        "Adjacent-wall orientations"
    );
    Ok(candidates)
}

/// The shortest candidate. `None` for an empty slice.
pub fn shortest(candidates: &[Candidate]) -> Option<Candidate> {
    candidates
        .iter()
        .copied()
        .min_by(|a, b| a.length().total_cmp(&b.length()))
}

/// Candidate lengths as `a, b, c` with three decimals.
pub fn format_lengths(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{:.3}", c.length()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct_problem;
    use crate::types::{Cuboid, DEFAULT_TOLERANCE};
    use approx::assert_relative_eq;

    fn min_length(candidates: &[Candidate]) -> f64 {
        shortest(candidates).unwrap().length()
    }

    #[test]
    fn test_candidate_length() {
        let c = Candidate::new(Route::Direct, 3.0, -4.0);
        assert_relative_eq!(c.length(), 5.0);
    }

    #[test]
    fn test_same_wall_is_euclidean() {
        let a = SurfacePoint::new(0.0, 0.2, 0.3);
        let b = SurfacePoint::new(0.0, 0.8, 0.9);
        let candidates = same_wall(&a, &b);
        assert_eq!(candidates.len(), 1);
        assert_relative_eq!(candidates[0].length(), a.distance_to(&b), epsilon = 1e-12);
    }

    #[test]
    fn test_cyclic_orientation() {
        let o = Orientation::cyclic_from(Axis::Y);
        assert_eq!(o.axes, [Axis::Y, Axis::Z, Axis::X]);
        let o = Orientation::cyclic_from(Axis::Z);
        assert_eq!(o.axes, [Axis::Z, Axis::X, Axis::Y]);
    }

    #[test]
    fn test_local_frame_relabels_dimensions() {
        let problem = construct_problem(2.0, 3.0, 4.0, 1.0, 3.0, 1.0, 0.5, 0.0, 2.0).unwrap();
        let frame = LocalFrame::new(&problem, &Orientation::cyclic_from(Axis::Y));
        assert_eq!(frame.dims, Vector3::new(3.0, 4.0, 2.0));
        assert_eq!(frame.p1, Point3::new(3.0, 1.0, 1.0));
        assert_eq!(frame.p2, Point3::new(0.0, 2.0, 0.5));
    }

    #[test]
    fn test_fold_height() {
        let problem = construct_problem(1.0, 1.0, 1.0, 0.0, 0.5, 0.9, 1.0, 0.5, 0.8).unwrap();
        let mut frame = LocalFrame::new(&problem, &Orientation::cyclic_from(Axis::X));
        assert!(frame.fold_height());
        assert_relative_eq!(frame.p1.z, 0.1, epsilon = 1e-12);
        assert_relative_eq!(frame.p2.z, 0.2, epsilon = 1e-12);
        assert!(!frame.fold_height());
    }

    #[test]
    fn test_opposite_wall_has_nine_candidates() {
        let problem = construct_problem(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0).unwrap();
        let candidates = opposite_wall(&problem, Axis::X);
        assert_eq!(candidates.len(), 9);
        assert_relative_eq!(min_length(&candidates), 5.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_opposite_wall_straight_across() {
        // Both points low on the end walls of a long room
        let problem = construct_problem(30.0, 12.0, 12.0, 0.0, 6.0, 1.0, 30.0, 6.0, 1.0).unwrap();
        let best = shortest(&opposite_wall(&problem, Axis::X)).unwrap();
        assert_relative_eq!(best.length(), 32.0, epsilon = 1e-9);
        assert_eq!(best.route, Route::Across(SideFace::Floor));
    }

    #[test]
    fn test_opposite_wall_turn_candidates_mirror() {
        let problem = construct_problem(2.0, 1.0, 1.0, 0.0, 0.1, 0.5, 2.0, 0.5, 0.1).unwrap();
        let forward = opposite_wall(&problem, Axis::X);
        let backward = opposite_wall(&problem.swapped(), Axis::X);
        assert_relative_eq!(forward[1].length(), backward[3].length(), epsilon = 1e-12);
        assert_relative_eq!(forward[5].length(), backward[7].length(), epsilon = 1e-12);
        assert_relative_eq!(forward[2].length(), backward[6].length(), epsilon = 1e-12);
    }

    #[test]
    fn test_adjacent_orientation_single_face() {
        let problem = construct_problem(1.0, 1.0, 1.0, 0.5, 0.0, 0.95, 0.0, 0.5, 0.95).unwrap();
        let orientations = adjacent_orientations(&problem, DEFAULT_TOLERANCE);
        assert_eq!(orientations.len(), 1);
        assert_eq!(orientations[0].axes, [Axis::Y, Axis::X, Axis::Z]);
        assert_eq!(orientations[0].flips, [false, false, false]);
    }

    #[test]
    fn test_adjacent_ceiling_crossing() {
        let problem = construct_problem(1.0, 1.0, 1.0, 0.5, 0.0, 0.95, 0.0, 0.5, 0.95).unwrap();
        let candidates = adjacent_wall(&problem, DEFAULT_TOLERANCE).unwrap();
        assert_eq!(candidates.len(), 2);
        let best = shortest(&candidates).unwrap();
        assert_eq!(best.route, Route::ViaFloor);
        assert_relative_eq!(best.length(), 0.55 * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_adjacent_canonicalization_is_total() {
        let cuboid = Cuboid::new(2.0, 3.0, 5.0);
        // Midpoint of each face
        let on_face = |face: Face| {
            let mut p = [1.0, 1.5, 2.5];
            p[face.axis.index()] = match face.side {
                Side::Min => 0.0,
                Side::Max => cuboid.extent(face.axis),
            };
            SurfacePoint::new(p[0], p[1], p[2])
        };

        for first in Face::ALL {
            for second in Face::ALL {
                if first.axis == second.axis {
                    continue;
                }
                let problem =
                    crate::Problem::try_new(cuboid, on_face(first), on_face(second)).unwrap();
                let orientations = adjacent_orientations(&problem, 0.0);
                assert_eq!(orientations.len(), 1, "{first} -> {second}");
                let frame = LocalFrame::new(&problem, &orientations[0]);
                assert_eq!(frame.p1.x, 0.0, "{first} -> {second}");
                assert_eq!(frame.p2.y, 0.0, "{first} -> {second}");
                assert!(adjacent_wall(&problem, 0.0).is_ok());
            }
        }
    }

    #[test]
    fn test_adjacent_edge_point_has_several_orientations() {
        // Lizard on the x-min/z-min edge, bug on the y-min face
        let problem = construct_problem(1.0, 1.0, 1.0, 0.0, 0.6, 0.0, 0.3, 0.0, 0.7).unwrap();
        let orientations = adjacent_orientations(&problem, 0.0);
        assert_eq!(orientations.len(), 2);
        assert_eq!(adjacent_wall(&problem, 0.0).unwrap().len(), 4);
    }

    #[test]
    fn test_adjacent_without_faces_fails() {
        // Valid under a loose tolerance, but the lizard touches no face exactly
        let problem = crate::Problem::try_new_within(
            Cuboid::new(1.0, 1.0, 1.0),
            SurfacePoint::new(1e-7, 0.5, 0.5),
            SurfacePoint::new(0.5, 0.5, 1.0),
            1e-6,
        )
        .unwrap();
        let err = adjacent_wall(&problem, 0.0).unwrap_err();
        assert!(matches!(err, PathError::NoCanonicalOrientation { .. }));
    }

    #[test]
    fn test_format_lengths() {
        let candidates = [
            Candidate::new(Route::OverEdge, 1.0, 0.0),
            Candidate::new(Route::ViaFloor, 3.0, 4.0),
        ];
        assert_eq!(format_lengths(&candidates), "1.000, 5.000");
    }
}
