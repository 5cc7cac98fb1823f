//! Point and target types.

use serde::{Deserialize, Serialize};

/// A location in the 2D plane.
///
/// Immutable once created. Coordinates are plain Euclidean; no projection
/// or unit handling is applied.
///
/// # Examples
///
/// ```
/// use bitour::models::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A target to be visited by one of the two tours.
///
/// The `id` is assigned at creation and is the target's identity everywhere
/// in the crate; coordinate equality is never used to identify a target, so
/// two targets may share a location without ambiguity.
///
/// # Examples
///
/// ```
/// use bitour::models::Target;
///
/// let t = Target::new(3, 10.0, 20.0);
/// assert_eq!(t.id(), 3);
/// assert_eq!(t.position().x(), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    id: usize,
    position: Point,
}

impl Target {
    /// Creates a new target with a stable id.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }

    /// Stable identifier of this target.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location of this target.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Euclidean distance from this target to a point.
    pub fn distance_to(&self, point: &Point) -> f64 {
        self.position.distance_to(point)
    }
}
