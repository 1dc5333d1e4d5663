//! Core geometric value types: the box, its faces and points on its surface.

use nalgebra::{Point3, Vector3};

use crate::error::{PathError, PathResult, PointDefect, PointRole};

/// Default relative tolerance for on-face and equality tests.
///
/// A coordinate `v` is on a face of dimension `d` when it lies within `tolerance * d`
/// of `0` or `d`.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Exclusive upper limit for a tolerance.
///
/// From `0.5` on, one coordinate is within tolerance of both faces of its axis.
pub const MAX_TOLERANCE: f64 = 0.5;

/// Check that `tolerance` is finite and in `[0, MAX_TOLERANCE)`, returning it unchanged.
pub fn validate_tolerance(tolerance: f64) -> PathResult<f64> {
    if (0.0..MAX_TOLERANCE).contains(&tolerance) {
        Ok(tolerance)
    } else {
        Err(PathError::invalid_tolerance(tolerance))
    }
}

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index into a coordinate triple.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Cyclic successor: x -> y -> z -> x.
    #[inline]
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// The axis that is neither `self` nor `other`.
    ///
    /// Returns `None` when both are the same axis.
    pub fn third(self, other: Axis) -> Option<Axis> {
        Axis::ALL.into_iter().find(|a| *a != self && *a != other).filter(|_| self != other)
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Which end of an axis a face sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Coordinate 0.
    Min,
    /// Coordinate equal to the dimension.
    Max,
}

/// One of the six faces of a box, named by its normal axis and side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Face {
    pub axis: Axis,
    pub side: Side,
}

impl Face {
    /// The six faces: x-min, x-max, y-min, y-max, z-min, z-max.
    pub const ALL: [Face; 6] = [
        Face::new(Axis::X, Side::Min),
        Face::new(Axis::X, Side::Max),
        Face::new(Axis::Y, Side::Min),
        Face::new(Axis::Y, Side::Max),
        Face::new(Axis::Z, Side::Min),
        Face::new(Axis::Z, Side::Max),
    ];

    pub const fn new(axis: Axis, side: Side) -> Self {
        Self { axis, side }
    }

    /// The parallel face on the other side of the box.
    pub fn opposite(&self) -> Face {
        let side = match self.side {
            Side::Min => Side::Max,
            Side::Max => Side::Min,
        };
        Face::new(self.axis, side)
    }

    /// Whether `point` lies on this face, within `tolerance` relative to the face's axis.
    pub fn contains(&self, cuboid: &Cuboid, point: &SurfacePoint, tolerance: f64) -> bool {
        let extent = cuboid.extent(self.axis);
        let target = match self.side {
            Side::Min => 0.0,
            Side::Max => extent,
        };
        approx_eq(point.coord(self.axis), target, extent, tolerance)
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = match self.side {
            Side::Min => "min",
            Side::Max => "max",
        };
        write!(f, "{}-{}", self.axis, side)
    }
}

/// Tolerant equality of two coordinates measured along an axis of length `extent`.
#[inline]
pub(crate) fn approx_eq(a: f64, b: f64, extent: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * extent
}

/// Whether `v` sits at `0` or at `extent`.
#[inline]
pub(crate) fn on_wall(v: f64, extent: f64, tolerance: f64) -> bool {
    approx_eq(v, 0.0, extent, tolerance) || approx_eq(v, extent, extent, tolerance)
}

/// A rectangular box with one corner at the origin.
///
/// Length runs along x, width along y and height along z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Cuboid {
    /// Create a box from its three dimensions. The result may be invalid.
    #[inline]
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// True when all three dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.length, self.width, self.height]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
    }

    /// Like [`Cuboid::is_valid`], but reports the offending dimensions.
    pub fn validate(&self) -> PathResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PathError::invalid_cuboid(self.length, self.width, self.height))
        }
    }

    /// `(length, width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (self.length, self.width, self.height)
    }

    /// Dimensions as a vector.
    #[inline]
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.length, self.width, self.height)
    }

    /// Size of the box along `axis`.
    #[inline]
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.length,
            Axis::Y => self.width,
            Axis::Z => self.height,
        }
    }

    /// `length + width + height`, an upper bound for any shortest surface path.
    #[inline]
    pub fn perimeter_sum(&self) -> f64 {
        self.length + self.width + self.height
    }
}

/// A point that is meant to lie on the surface of a [`Cuboid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    position: Point3<f64>,
}

impl SurfacePoint {
    /// Create a point from raw coordinates. The result may be invalid for a given box.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_position(Point3::new(x, y, z))
    }

    #[inline]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self { position }
    }

    #[inline]
    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// `(x, y, z)`.
    #[inline]
    pub fn coordinates(&self) -> (f64, f64, f64) {
        (self.position.x, self.position.y, self.position.z)
    }

    /// Coordinate along `axis`.
    #[inline]
    pub fn coord(&self, axis: Axis) -> f64 {
        self.position[axis.index()]
    }

    /// Straight-line distance through space, a lower bound for any surface path.
    pub fn distance_to(&self, other: &SurfacePoint) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    /// Whether the point lies on the surface of `cuboid`, using [`DEFAULT_TOLERANCE`].
    pub fn is_valid(&self, cuboid: &Cuboid) -> bool {
        self.is_valid_within(cuboid, DEFAULT_TOLERANCE)
    }

    /// Whether the point lies on the surface of `cuboid` within `tolerance`.
    ///
    /// Always false for a tolerance rejected by [`validate_tolerance`].
    pub fn is_valid_within(&self, cuboid: &Cuboid, tolerance: f64) -> bool {
        validate_tolerance(tolerance).is_ok()
            && cuboid.is_valid()
            && self.defect(cuboid, tolerance).is_none()
    }

    /// The faces of `cuboid` this point lies on, in [`Face::ALL`] order.
    ///
    /// Empty for interior points; two or three entries on edges and corners.
    pub fn faces(&self, cuboid: &Cuboid, tolerance: f64) -> Vec<Face> {
        Face::ALL
            .into_iter()
            .filter(|face| face.contains(cuboid, self, tolerance))
            .collect()
    }

    /// Check the point against `cuboid`, reporting why it is rejected.
    pub fn validate(&self, cuboid: &Cuboid, role: PointRole, tolerance: f64) -> PathResult<()> {
        validate_tolerance(tolerance)?;
        cuboid.validate()?;
        match self.defect(cuboid, tolerance) {
            None => Ok(()),
            Some(defect) => Err(PathError::invalid_point(
                role,
                [self.position.x, self.position.y, self.position.z],
                defect,
            )),
        }
    }

    fn defect(&self, cuboid: &Cuboid, tolerance: f64) -> Option<PointDefect> {
        if !self.position.iter().all(|c| c.is_finite()) {
            return Some(PointDefect::NonFinite);
        }

        // Prune points outside the bounding box first
        for axis in Axis::ALL {
            let extent = cuboid.extent(axis);
            let v = self.coord(axis);
            let slack = tolerance * extent;
            if v < -slack || v > extent + slack {
                return Some(PointDefect::OutOfRange { axis });
            }
        }

        let touches_face = Axis::ALL
            .into_iter()
            .any(|axis| on_wall(self.coord(axis), cuboid.extent(axis), tolerance));
        if touches_face {
            None
        } else {
            Some(PointDefect::Interior)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_dimensions() {
        let cub = Cuboid::new(1.0, 2.0, 3.0);
        assert_eq!(cub.dimensions(), (1.0, 2.0, 3.0));
        assert_eq!(cub.extent(Axis::Y), 2.0);
        assert_eq!(cub.perimeter_sum(), 6.0);
    }

    #[test]
    fn test_cuboid_is_valid() {
        assert!(Cuboid::new(1.0, 2.0, 3.0).is_valid());
        assert!(!Cuboid::new(1.0, 0.0, 3.0).is_valid());
        assert!(!Cuboid::new(-1.0, 1.0, 3.0).is_valid());
        assert!(!Cuboid::new(f64::NAN, 1.0, 3.0).is_valid());
        assert!(!Cuboid::new(1.0, f64::INFINITY, 3.0).is_valid());
    }

    #[test]
    fn test_point_coordinates() {
        let bug = SurfacePoint::new(1.0, 2.0, 3.0);
        assert_eq!(bug.coordinates(), (1.0, 2.0, 3.0));
        assert_eq!(bug.coord(Axis::Z), 3.0);
    }

    #[test]
    fn test_point_is_valid() {
        let cub = Cuboid::new(1.0, 2.0, 3.0);
        assert!(SurfacePoint::new(0.0, 2.0, 3.0).is_valid(&cub));
        assert!(!SurfacePoint::new(1.0, 4.0, 3.0).is_valid(&cub));

        let bad_cub = Cuboid::new(-1.0, 1.0, 3.0);
        assert!(!SurfacePoint::new(-1.0, 1.0, 3.0).is_valid(&bad_cub));
    }

    #[test]
    fn test_interior_point_is_pruned() {
        let cub = Cuboid::new(1.0, 2.0, 3.0);
        let p = SurfacePoint::new(0.5, 1.0, 1.5);
        assert!(!p.is_valid(&cub));
        assert!(matches!(
            p.validate(&cub, PointRole::Lizard, DEFAULT_TOLERANCE),
            Err(PathError::InvalidPoint {
                defect: PointDefect::Interior,
                ..
            })
        ));
    }

    #[test]
    fn test_tolerance_admits_near_face_points() {
        let cub = Cuboid::new(1.0, 1.0, 1.0);
        let p = SurfacePoint::new(1e-12, 0.5, 0.5);
        assert!(p.is_valid_within(&cub, 1e-9));
        assert!(!p.is_valid_within(&cub, 0.0));

        let outside = SurfacePoint::new(-1e-12, 0.5, 0.5);
        assert!(outside.is_valid_within(&cub, 1e-9));
        assert!(!outside.is_valid_within(&cub, 0.0));
    }

    #[test]
    fn test_validate_tolerance() {
        assert_eq!(validate_tolerance(0.0).unwrap(), 0.0);
        assert_eq!(validate_tolerance(DEFAULT_TOLERANCE).unwrap(), DEFAULT_TOLERANCE);
        assert!(validate_tolerance(0.49).is_ok());
        for bad in [MAX_TOLERANCE, 5.0, -1e-9, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(validate_tolerance(bad), Err(PathError::InvalidTolerance { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_bad_tolerance_rejects_every_point() {
        let cub = Cuboid::new(1.0, 1.0, 1.0);
        let outside = SurfacePoint::new(3.0, 3.0, 3.0);
        assert!(!outside.is_valid_within(&cub, 5.0));
        assert!(matches!(
            outside.validate(&cub, PointRole::Lizard, 5.0),
            Err(PathError::InvalidTolerance { .. })
        ));

        let corner = SurfacePoint::new(0.0, 0.0, 0.0);
        assert!(!corner.is_valid_within(&cub, f64::NAN));
        assert!(matches!(
            corner.validate(&cub, PointRole::Bug, -1.0),
            Err(PathError::InvalidTolerance { .. })
        ));
    }

    #[test]
    fn test_non_finite_point() {
        let cub = Cuboid::new(1.0, 1.0, 1.0);
        let p = SurfacePoint::new(f64::NAN, 0.0, 0.0);
        assert!(!p.is_valid(&cub));
        assert!(matches!(
            p.validate(&cub, PointRole::Bug, 0.0),
            Err(PathError::InvalidPoint {
                defect: PointDefect::NonFinite,
                ..
            })
        ));
    }

    #[test]
    fn test_faces_of_corner_and_edge() {
        let cub = Cuboid::new(1.0, 2.0, 3.0);
        let corner = SurfacePoint::new(0.0, 2.0, 3.0);
        assert_eq!(
            corner.faces(&cub, 0.0),
            vec![
                Face::new(Axis::X, Side::Min),
                Face::new(Axis::Y, Side::Max),
                Face::new(Axis::Z, Side::Max),
            ]
        );

        let edge = SurfacePoint::new(1.0, 1.0, 0.0);
        assert_eq!(edge.faces(&cub, 0.0).len(), 2);

        let face = SurfacePoint::new(0.5, 0.0, 1.0);
        assert_eq!(face.faces(&cub, 0.0), vec![Face::new(Axis::Y, Side::Min)]);
    }

    #[test]
    fn test_axis_helpers() {
        assert_eq!(Axis::X.next(), Axis::Y);
        assert_eq!(Axis::Z.next(), Axis::X);
        assert_eq!(Axis::X.third(Axis::Z), Some(Axis::Y));
        assert_eq!(Axis::Y.third(Axis::Y), None);
        assert_eq!(Face::new(Axis::Z, Side::Min).opposite(), Face::new(Axis::Z, Side::Max));
    }

    #[test]
    fn test_distance_to() {
        let a = SurfacePoint::new(0.0, 0.0, 0.0);
        let b = SurfacePoint::new(1.0, 2.0, 2.0);
        assert!((a.distance_to(&b) - 3.0).abs() < 1e-12);
    }
}
