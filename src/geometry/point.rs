//! Planar point type used for sites, breakpoints, and diagram vertices.
//!
//! A [`Point`] is a plain `Copy` pair of `f64` coordinates. Equality and
//! hashing are defined through [`OrderedFloat`] so that points behave
//! consistently as hash-map keys even in the presence of NaN or signed
//! zero, matching IEEE 754 total ordering rather than `f64`'s partial
//! equality.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// POINT TYPE
// =============================================================================

/// A point in the Euclidean plane.
///
/// Serves double duty as an input site and as a computed diagram vertex
/// position.
///
/// # Examples
///
/// ```
/// use voronoi::geometry::point::Point;
///
/// let p = Point::new(250.0, 250.0);
/// assert_eq!(p.x, 250.0);
/// assert_eq!(p.y, 250.0);
/// ```
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the midpoint of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use voronoi::geometry::point::Point;
    ///
    /// let m = Point::new(100.0, 100.0).midpoint(Point::new(400.0, 100.0));
    /// assert_eq!(m, Point::new(250.0, 100.0));
    /// ```
    #[inline]
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns `true` when both coordinates are finite (neither NaN nor
    /// infinite).
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// =============================================================================
// TRAIT IMPLEMENTATIONS
// =============================================================================

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.x) == OrderedFloat(other.x)
            && OrderedFloat(self.y) == OrderedFloat(other.y)
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.x).hash(state);
        OrderedFloat(self.y).hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from(coords: [f64; 2]) -> Self {
        Self::new(coords[0], coords[1])
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(p: Point) -> u64 {
        let mut hasher = DefaultHasher::new();
        p.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn point_equality_and_hash_agree() {
        let a = Point::new(1.5, -2.5);
        let b = Point::new(1.5, -2.5);
        assert_eq!(a, b);
        assert_eq!(hash_of(a), hash_of(b));
    }

    #[test]
    fn nan_points_are_self_equal_for_hashing() {
        let a = Point::new(f64::NAN, 0.0);
        let b = Point::new(f64::NAN, 0.0);
        // OrderedFloat semantics: NaN == NaN, so the pair can live in a set.
        assert_eq!(a, b);
        assert_eq!(hash_of(a), hash_of(b));

        let mut set = FxHashSet::default();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn signed_zeros_collapse() {
        // OrderedFloat follows IEEE equality for zeros and canonicalizes
        // their hash; a switch to bit-level hashing would break this.
        let pos = Point::new(0.0, 0.0);
        let neg = Point::new(-0.0, 0.0);
        assert_eq!(pos, neg);
        assert_eq!(hash_of(pos), hash_of(neg));
    }

    #[test]
    fn midpoint_is_symmetric() {
        let a = Point::new(100.0, 100.0);
        let b = Point::new(400.0, 300.0);
        assert_eq!(a.midpoint(b), b.midpoint(a));
        assert_eq!(a.midpoint(b), Point::new(250.0, 200.0));
    }

    #[test]
    fn conversions_round_trip() {
        let p = Point::new(3.0, 4.0);
        let arr: [f64; 2] = p.into();
        assert_eq!(Point::from(arr), p);
        assert_eq!(Point::from((3.0, 4.0)), p);
    }

    #[test]
    fn is_finite_rejects_nan_and_infinity() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn display_formats_coordinates() {
        assert_eq!(Point::new(250.0, 100.5).to_string(), "(250, 100.5)");
    }

    #[test]
    fn serde_round_trip() {
        let p = Point::new(123.25, -0.5);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
