//! Planar geometry primitives.
//!
//! Toolpaths are stored as fixed-point [`IntPoint`] sequences, while marker
//! positions and derived geometry are floating-point [`Point`]s.
//!
//! Angles are in degrees and follow the image-space convention used by the
//! canvas (y grows downwards): a direction `(dx, dy)` has the angle
//! `atan2(-dy, dx)`, normalized to `[0, 360)`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Fixed-point units per scene unit.
pub const UNIT_SCALE: f64 = 100_000.0;

/// Tolerance used when deciding whether two positions are the same.
pub const POINT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Equality within [`POINT_EPSILON`] on both axes.
    pub fn fuzzy_eq(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= POINT_EPSILON && (self.y - other.y).abs() <= POINT_EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Toolpath vertex in fixed-point units (see [`UNIT_SCALE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::from(self)
    }
}

impl From<Point> for IntPoint {
    fn from(p: Point) -> Self {
        IntPoint::new(
            (p.x * UNIT_SCALE).round() as i64,
            (p.y * UNIT_SCALE).round() as i64,
        )
    }
}

impl From<IntPoint> for Point {
    fn from(p: IntPoint) -> Self {
        Point::new(p.x as f64 / UNIT_SCALE, p.y as f64 / UNIT_SCALE)
    }
}

/// Closed point sequence; the last vertex connects back to the first.
pub type Path = Vec<IntPoint>;
pub type Paths = Vec<Path>;
/// Paths grouped per source object (one entry per aperture, hole, contour...).
pub type Pathss = Vec<Paths>;

/// Builds a fixed-point path from scene points.
pub fn path_from_points(points: &[Point]) -> Path {
    points.iter().copied().map(IntPoint::from).collect()
}

/// Normalizes an angle in degrees to `[0, 360)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees % 360.0;
    let a = if a < 0.0 { a + 360.0 } else { a };
    if (a - 360.0).abs() < 1e-12 {
        0.0
    } else {
        a
    }
}

/// Angle of the direction `(dx, dy)` in image space.
pub fn direction_angle(dx: f64, dy: f64) -> f64 {
    normalize_angle((-dy).atan2(dx).to_degrees())
}

/// Offset of the given length along `angle` (degrees, image space).
pub fn polar(length: f64, angle: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(length * rad.cos(), -length * rad.sin())
}

/// Directed line segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineF {
    pub p1: Point,
    pub p2: Point,
}

impl LineF {
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Segment from the origin along `angle`.
    pub fn from_polar(length: f64, angle: f64) -> Self {
        Self::new(Point::default(), polar(length, angle))
    }

    pub fn dx(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    pub fn dy(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    pub fn angle(&self) -> f64 {
        direction_angle(self.dx(), self.dy())
    }

    /// Same start point, same length, new direction.
    pub fn with_angle(&self, angle: f64) -> Self {
        Self::new(self.p1, self.p1 + polar(self.length(), angle))
    }

    /// Same start point and direction, new length. Zero-length lines have no
    /// direction and are returned unchanged.
    pub fn with_length(&self, length: f64) -> Self {
        let current = self.length();
        if current <= f64::EPSILON {
            return *self;
        }
        let k = length / current;
        Self::new(
            self.p1,
            Point::new(self.p1.x + self.dx() * k, self.p1.y + self.dy() * k),
        )
    }

    /// Line of equal length starting at `p1`, rotated a quarter turn.
    pub fn normal_vector(&self) -> Self {
        Self::new(self.p1, Point::new(self.p1.x + self.dy(), self.p1.y - self.dx()))
    }

    pub fn translated(&self, offset: Point) -> Self {
        Self::new(self.p1 + offset, self.p2 + offset)
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x: min_x.min(max_x),
            min_y: min_y.min(max_y),
            max_x: min_x.max(max_x),
            max_y: min_y.max(max_y),
        }
    }

    /// Bounds that contain nothing and intersect nothing.
    pub const fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Square of side `2 * radius` centered on `center`.
    pub fn around(center: Point, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        points.into_iter().fold(Self::empty(), |b, p| b.including(p))
    }

    pub fn from_paths(paths: &[Path]) -> Self {
        Self::from_points(paths.iter().flatten().map(|p| p.to_point()))
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn including(&self, p: Point) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Closed-interval overlap test; touching edges count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}
