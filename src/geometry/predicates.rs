//! Geometric predicates for the planar sweep.
//!
//! This module contains the numeric kernel the rest of the crate is built
//! on: the orientation test, the circumcenter solve, parabola evaluation
//! against a horizontal sweep line, and breakpoint location between two
//! beachline arcs. All predicates share the same degeneracy tolerance,
//! [`EPSILON`], and recover from degenerate input by classification
//! ([`Orientation::DEGENERATE`]) or by returning `None` rather than by
//! failing.

use crate::geometry::point::Point;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Degeneracy tolerance shared by the geometric predicates.
///
/// Determinants, denominators, and coordinate differences with magnitude
/// below this threshold are treated as zero.
pub const EPSILON: f64 = 1e-9;

// =============================================================================
// ORIENTATION
// =============================================================================

/// Represents the orientation of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The triple turns clockwise (signed area < 0)
    NEGATIVE,
    /// The triple is collinear within tolerance (signed area ≈ 0)
    DEGENERATE,
    /// The triple turns counter-clockwise (signed area > 0)
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Classifies the turn made by the ordered triple `(a, b, c)`.
///
/// Computes twice the signed area of the triangle `a, b, c` and classifies
/// its sign against [`EPSILON`]. Under the y-up coordinate convention used
/// throughout this crate, a strictly clockwise triple is `NEGATIVE`; only
/// such triples can generate a converging circle event during the sweep.
///
/// # Examples
///
/// ```
/// use voronoi::geometry::point::Point;
/// use voronoi::geometry::predicates::{Orientation, orientation};
///
/// let a = Point::new(100.0, 100.0);
/// let b = Point::new(200.0, 100.0);
/// let c = Point::new(300.0, 100.0);
/// assert_eq!(orientation(a, b, c), Orientation::DEGENERATE);
///
/// let up = Point::new(200.0, 300.0);
/// assert_eq!(orientation(a, up, c), Orientation::NEGATIVE);
/// assert_eq!(orientation(c, up, a), Orientation::POSITIVE);
/// ```
#[inline]
#[must_use]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    if cross.abs() < EPSILON {
        Orientation::DEGENERATE
    } else if cross < 0.0 {
        Orientation::NEGATIVE
    } else {
        Orientation::POSITIVE
    }
}

// =============================================================================
// CIRCUMCENTER
// =============================================================================

/// Computes the circumcenter of the triangle `a, b, c`.
///
/// Solves the intersection of two perpendicular bisectors as a closed-form
/// 2×2 linear system. Returns `None` when the system's determinant has
/// magnitude below [`EPSILON`], which signals a (near-)collinear triple
/// with no finite circumcircle.
///
/// The result is independent of the argument order up to floating-point
/// noise; callers that need the circumradius can take the distance from
/// the returned center to any of the three inputs.
///
/// # Examples
///
/// ```
/// use voronoi::geometry::point::Point;
/// use voronoi::geometry::predicates::circumcenter;
///
/// let center = circumcenter(
///     Point::new(100.0, 100.0),
///     Point::new(200.0, 300.0),
///     Point::new(300.0, 100.0),
/// )
/// .unwrap();
/// assert!((center.x - 200.0).abs() < 1e-12);
/// assert!((center.y - 175.0).abs() < 1e-12);
///
/// // Collinear input has no circumcircle.
/// assert!(
///     circumcenter(
///         Point::new(0.0, 0.0),
///         Point::new(1.0, 0.0),
///         Point::new(2.0, 0.0),
///     )
///     .is_none()
/// );
/// ```
#[must_use]
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let ac_x = c.x - a.x;
    let ac_y = c.y - a.y;

    // Twice the signed area of the triangle; the determinant of the
    // bisector system.
    let det = 2.0 * (ab_x * ac_y - ab_y * ac_x);
    if det.abs() < EPSILON {
        return None;
    }

    let ab_len2 = ab_x * (a.x + b.x) + ab_y * (a.y + b.y);
    let ac_len2 = ac_x * (a.x + c.x) + ac_y * (a.y + c.y);

    Some(Point::new(
        (ac_y * ab_len2 - ab_y * ac_len2) / det,
        (ab_x * ac_len2 - ac_x * ab_len2) / det,
    ))
}

// =============================================================================
// PARABOLA EVALUATION
// =============================================================================

/// Evaluates the parabola equidistant from `site` and the horizontal line
/// `y = sweep_y` at horizontal position `x`.
///
/// When the site lies on the sweep line within [`EPSILON`], the parabola
/// degenerates to a vertical ray; the site's own y-coordinate is returned
/// directly to avoid dividing by a vanishing denominator.
///
/// # Examples
///
/// ```
/// use voronoi::geometry::point::Point;
/// use voronoi::geometry::predicates::parabola_y;
///
/// let site = Point::new(0.0, 2.0);
/// // Vertex of the parabola sits halfway between site and sweep line.
/// assert_eq!(parabola_y(site, 0.0, 0.0), 1.0);
/// // Degenerate: site on the sweep line.
/// assert_eq!(parabola_y(Point::new(3.0, 0.0), 7.0, 0.0), 0.0);
/// ```
#[inline]
#[must_use]
pub fn parabola_y(site: Point, x: f64, sweep_y: f64) -> f64 {
    let dy = site.y - sweep_y;
    if dy.abs() < EPSILON {
        return site.y;
    }
    let dx = x - site.x;
    dx * dx / (2.0 * dy) + (site.y + sweep_y) / 2.0
}

// =============================================================================
// BREAKPOINT LOCATION
// =============================================================================

/// Computes the x-coordinate of the breakpoint between the arc of `left`
/// and the arc of `right`, in beachline order, for the sweep line at
/// `sweep_y`.
///
/// The two parabolas generally intersect twice; which intersection is the
/// `left|right` breakpoint (as opposed to `right|left`) is determined by
/// which arc lies on the lower envelope on each side. Solving the
/// difference quadratic `ax² + bx + c = 0` with
///
/// ```text
/// a = 1/d_l − 1/d_r
/// b = −2 (left.x/d_l − right.x/d_r)
/// c = (left.x² + left.y² − sweep_y²)/d_l − (right.x² + right.y² − sweep_y²)/d_r
/// ```
///
/// where `d = 2 (site.y − sweep_y)`, the `left|right` breakpoint is always
/// the root `(−b + √(b² − 4ac)) / 2a` regardless of which site is closer
/// to the sweep line.
///
/// Degenerate cases: sites at equal height yield the vertical bisector at
/// the pair's midpoint; a site lying on the sweep line contributes a
/// vertical ray at its own x.
#[must_use]
pub fn breakpoint_x(left: Point, right: Point, sweep_y: f64) -> f64 {
    let d_l = 2.0 * (left.y - sweep_y);
    let d_r = 2.0 * (right.y - sweep_y);

    if d_l.abs() < EPSILON {
        return left.x;
    }
    if d_r.abs() < EPSILON {
        return right.x;
    }
    if (d_l - d_r).abs() < EPSILON {
        return (left.x + right.x) / 2.0;
    }

    let a = 1.0 / d_l - 1.0 / d_r;
    let b = -2.0 * (left.x / d_l - right.x / d_r);
    let c = (left.x * left.x + left.y * left.y - sweep_y * sweep_y) / d_l
        - (right.x * right.x + right.y * right.y - sweep_y * sweep_y) / d_r;

    // Round-off can push the discriminant of a tangent pair slightly
    // negative; clamp instead of propagating NaN.
    let disc = (b * b - 4.0 * a * c).max(0.0);
    (-b + disc.sqrt()) / (2.0 * a)
}

// =============================================================================
// DISTANCE
// =============================================================================

/// Euclidean distance between two points.
#[inline]
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

// =============================================================================
// TESTS
// =============================================================================
