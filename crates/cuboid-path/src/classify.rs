//! Classification of a problem into one of three geometric regimes.
//!
//! For each axis the classifier asks two questions:
//!
//! - are both points on the *same* face perpendicular to the axis
//!   (equal coordinates, and that coordinate is `0` or the dimension)?
//! - are the points on the two *opposite* faces perpendicular to the axis
//!   (one coordinate is `0`, the other the dimension)?
//!
//! A shared face wins over an opposed pair, which wins over the adjacent fallback.
//! All comparisons use the relative tolerance described in [`crate::types::DEFAULT_TOLERANCE`].

use crate::problem::Problem;
use crate::types::{Axis, approx_eq};

/// The regime a problem falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Both points lie on one common face.
    SameWall,
    /// The points lie on the two parallel faces perpendicular to `axis`.
    OppositeWall { axis: Axis },
    /// The points lie on two faces sharing an edge.
    AdjacentWall,
}

impl Classification {
    /// Human-readable label, as written to the diagnostic log.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::SameWall => "same wall",
            Classification::OppositeWall { .. } => "opposed wall",
            Classification::AdjacentWall => "adjacent wall",
        }
    }

    /// The opposed axis, for [`Classification::OppositeWall`].
    pub fn opposed_axis(&self) -> Option<Axis> {
        match self {
            Classification::OppositeWall { axis } => Some(*axis),
            _ => None,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::OppositeWall { axis } => write!(f, "{} ({})", self.label(), axis),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Per-axis relation between the two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisRelation {
    /// Both points on the same face perpendicular to this axis.
    pub same: bool,
    /// Points on the two opposite faces perpendicular to this axis.
    pub opposed: bool,
}

/// Relation of the two points along each axis, indexed by [`Axis::index`].
pub fn axis_relations(problem: &Problem, tolerance: f64) -> [AxisRelation; 3] {
    let cuboid = problem.cuboid();
    let (lizard, bug) = (problem.lizard(), problem.bug());

    let mut relations = [AxisRelation::default(); 3];
    for axis in Axis::ALL {
        let extent = cuboid.extent(axis);
        let at_min = |v: f64| approx_eq(v, 0.0, extent, tolerance);
        let at_max = |v: f64| approx_eq(v, extent, extent, tolerance);
        let (a, b) = (lizard.coord(axis), bug.coord(axis));

        // Face membership is tested per point, so two points within tolerance of the same
        // face always count as sharing it.
        relations[axis.index()] = AxisRelation {
            same: (at_min(a) && at_min(b)) || (at_max(a) && at_max(b)),
            opposed: (at_min(a) && at_max(b)) || (at_max(a) && at_min(b)),
        };
    }
    relations
}

/// Classify a problem. The opposed axis is the first match in x, y, z order.
pub fn classify(problem: &Problem, tolerance: f64) -> Classification {
    let relations = axis_relations(problem, tolerance);

    if relations.iter().any(|r| r.same) {
        return Classification::SameWall;
    }

    match Axis::ALL.into_iter().find(|a| relations[a.index()].opposed) {
        Some(axis) => Classification::OppositeWall { axis },
        None => Classification::AdjacentWall,
    }
}
