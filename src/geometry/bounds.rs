//! Axis-aligned clipping rectangle for finalized diagrams.
//!
//! The sweep itself runs over the whole plane; the [`BoundingBox`] only
//! enters at finalization, when half-infinite bisectors are cut down to
//! segments. Segment clipping uses the Cohen–Sutherland outcode walk.

use crate::geometry::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// OUTCODES
// =============================================================================

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// An axis-aligned rectangle `[min.x, max.x] × [min.y, max.y]`.
///
/// The default covers `[0, 500] × [0, 500]`, the domain used throughout
/// the crate's examples and tests.
///
/// # Examples
///
/// ```
/// use voronoi::geometry::bounds::BoundingBox;
/// use voronoi::geometry::point::Point;
///
/// let bounds = BoundingBox::default();
/// assert!(bounds.contains(Point::new(250.0, 250.0)));
/// assert!(!bounds.contains(Point::new(-1.0, 250.0)));
/// assert_eq!(bounds.width(), 500.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Bottom-left corner.
    pub min: Point,
    /// Top-right corner.
    pub max: Point,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, 500.0, 500.0)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] × [{}, {}]",
            self.min.x, self.max.x, self.min.y, self.max.y
        )
    }
}

impl BoundingBox {
    /// Creates a rectangle from its extreme coordinates.
    ///
    /// No validation happens here; see [`BoundingBox::is_valid`] for the
    /// check applied when a diagram build begins.
    #[inline]
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// Width of the rectangle.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center of the rectangle.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Returns `true` when the rectangle has positive area and finite
    /// coordinates.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.max.x > self.min.x
            && self.max.y > self.min.y
    }

    /// Returns `true` when `p` lies inside the rectangle or on its
    /// boundary.
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// The four corners in counter-clockwise order, starting at the
    /// bottom-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }

    fn outcode(&self, p: Point) -> u8 {
        let mut code = INSIDE;
        if p.x < self.min.x {
            code |= LEFT;
        } else if p.x > self.max.x {
            code |= RIGHT;
        }
        if p.y < self.min.y {
            code |= BOTTOM;
        } else if p.y > self.max.y {
            code |= TOP;
        }
        code
    }

    /// Clips the segment `a`–`b` to the rectangle using the
    /// Cohen–Sutherland outcode algorithm.
    ///
    /// Returns the clipped segment, or `None` when the segment lies
    /// entirely outside.
    ///
    /// # Examples
    ///
    /// ```
    /// use voronoi::geometry::bounds::BoundingBox;
    /// use voronoi::geometry::point::Point;
    ///
    /// let bounds = BoundingBox::default();
    /// let (a, b) = bounds
    ///     .clip_segment(Point::new(250.0, -100.0), Point::new(250.0, 600.0))
    ///     .unwrap();
    /// assert_eq!(a, Point::new(250.0, 0.0));
    /// assert_eq!(b, Point::new(250.0, 500.0));
    /// ```
    #[must_use]
    pub fn clip_segment(&self, a: Point, b: Point) -> Option<(Point, Point)> {
        let mut a = a;
        let mut b = b;
        let mut code_a = self.outcode(a);
        let mut code_b = self.outcode(b);

        loop {
            if code_a | code_b == INSIDE {
                return Some((a, b));
            }
            if code_a & code_b != INSIDE {
                return None;
            }

            // One endpoint is outside; pull it onto the crossed boundary.
            let code_out = if code_a > code_b { code_a } else { code_b };
            let clipped = if code_out & TOP != 0 {
                Point::new(
                    a.x + (b.x - a.x) * (self.max.y - a.y) / (b.y - a.y),
                    self.max.y,
                )
            } else if code_out & BOTTOM != 0 {
                Point::new(
                    a.x + (b.x - a.x) * (self.min.y - a.y) / (b.y - a.y),
                    self.min.y,
                )
            } else if code_out & RIGHT != 0 {
                Point::new(
                    self.max.x,
                    a.y + (b.y - a.y) * (self.max.x - a.x) / (b.x - a.x),
                )
            } else {
                Point::new(
                    self.min.x,
                    a.y + (b.y - a.y) * (self.min.x - a.x) / (b.x - a.x),
                )
            };

            if code_out == code_a {
                a = clipped;
                code_a = self.outcode(a);
            } else {
                b = clipped;
                code_b = self.outcode(b);
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
