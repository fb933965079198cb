//! Public entry point for diagram construction.
//!
//! [`VoronoiDiagram`] validates its input, runs the Fortune sweep, and
//! exposes the finished planar subdivision read-only. Construction is a
//! one-shot operation; build a fresh instance for a new site set.

use crate::core::collections::{SiteIndex, fast_hash_set_with_capacity};
use crate::core::diagram::{
    Diagram, Edge, EdgeKey, Face, FaceKey, HalfEdge, HalfEdgeKey, Vertex, VertexKey,
    VoronoiValidationError,
};
use crate::core::sweep::FortuneSweep;
use crate::geometry::bounds::BoundingBox;
use crate::geometry::point::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// CONSTRUCTION ERRORS
// =============================================================================

/// Errors rejected before the sweep starts.
///
/// The sweep itself has no failure modes; degenerate geometry is
/// recovered locally and never surfaces as an error.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VoronoiConstructionError {
    /// An input site has a NaN or infinite coordinate.
    #[error("Site {index} has non-finite coordinates {point}")]
    InvalidSite {
        /// Position of the offending site in the input order.
        index: usize,
        /// The offending coordinates.
        point: Point,
    },
    /// The clipping rectangle has no area or non-finite corners.
    #[error("Bounding box {bounds} is degenerate or non-finite")]
    InvalidBoundingBox {
        /// Display form of the offending rectangle.
        bounds: String,
    },
}

// =============================================================================
// VORONOI DIAGRAM
// =============================================================================

/// A finished Voronoi diagram clipped to a rectangle.
///
/// One face per distinct site; every edge is a fully bounded segment of
/// the bisector between its two sites. Duplicate input coordinates are
/// collapsed onto the first occurrence, so the face count always equals
/// the number of distinct sites.
///
/// # Examples
///
/// ```
/// use voronoi::prelude::*;
///
/// let sites = [Point::new(100.0, 100.0), Point::new(400.0, 100.0)];
/// let diagram = VoronoiDiagram::with_default_bounds(&sites).unwrap();
///
/// assert_eq!(diagram.number_of_faces(), 2);
/// assert_eq!(diagram.number_of_edges(), 1);
///
/// // The single edge is the vertical bisector x = 250, clipped to the
/// // box's top and bottom.
/// let (_, edge) = diagram.edges().next().unwrap();
/// let (start, end) = edge.endpoints().unwrap();
/// assert_eq!(start.x, 250.0);
/// assert_eq!(end.x, 250.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoronoiDiagram {
    diagram: Diagram,
    bounds: BoundingBox,
}

impl VoronoiDiagram {
    /// Builds the diagram of `sites` clipped to `bounds`.
    ///
    /// Duplicate coordinates are collapsed; sites on or outside the
    /// rectangle are legal, with best-effort outward clipping (edges
    /// that never meet the rectangle are dropped).
    ///
    /// # Errors
    ///
    /// Returns [`VoronoiConstructionError::InvalidBoundingBox`] for a
    /// degenerate or non-finite rectangle, and
    /// [`VoronoiConstructionError::InvalidSite`] for a site with NaN or
    /// infinite coordinates.
    pub fn new(sites: &[Point], bounds: BoundingBox) -> Result<Self, VoronoiConstructionError> {
        if !bounds.is_valid() {
            return Err(VoronoiConstructionError::InvalidBoundingBox {
                bounds: bounds.to_string(),
            });
        }

        let mut seen = fast_hash_set_with_capacity(sites.len());
        let mut distinct = Vec::with_capacity(sites.len());
        for (index, &site) in sites.iter().enumerate() {
            if !site.is_finite() {
                return Err(VoronoiConstructionError::InvalidSite { index, point: site });
            }
            if seen.insert(site) {
                distinct.push(site);
            }
        }

        let diagram = FortuneSweep::new(distinct, bounds).run();
        Ok(Self { diagram, bounds })
    }

    /// Builds the diagram clipped to the default `[0, 500] × [0, 500]`
    /// rectangle.
    ///
    /// # Errors
    ///
    /// Same as [`VoronoiDiagram::new`].
    pub fn with_default_bounds(sites: &[Point]) -> Result<Self, VoronoiConstructionError> {
        Self::new(sites, BoundingBox::default())
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The clipping rectangle the diagram was built against.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// The underlying DCEL.
    #[inline]
    #[must_use]
    pub const fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// The distinct sites, in first-occurrence order.
    #[inline]
    #[must_use]
    pub fn sites(&self) -> &[Point] {
        self.diagram.sites()
    }

    /// The face owned by the distinct site at `index`.
    #[inline]
    #[must_use]
    pub fn site_face(&self, index: SiteIndex) -> FaceKey {
        self.diagram.site_face(index)
    }

    /// Number of distinct sites.
    #[inline]
    #[must_use]
    pub fn number_of_sites(&self) -> usize {
        self.diagram.number_of_sites()
    }

    /// Number of finalized vertices.
    #[inline]
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.diagram.number_of_vertices()
    }

    /// Number of bounded bisector edges.
    #[inline]
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.diagram.number_of_edges()
    }

    /// Number of faces (one per distinct site).
    #[inline]
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.diagram.number_of_faces()
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, &Vertex)> {
        self.diagram.vertices()
    }

    /// Iterates over all finalized edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> {
        self.diagram.edges()
    }

    /// Iterates over all faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &Face)> {
        self.diagram.faces()
    }

    /// Iterates over all half-edges.
    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeKey, &HalfEdge)> {
        self.diagram.half_edges()
    }

    /// Checks the structural invariants of the finished diagram.
    ///
    /// # Errors
    ///
    /// Returns the first [`VoronoiValidationError`] found; any error is a
    /// programming error in the sweep, not bad input.
    pub fn validate(&self) -> Result<(), VoronoiValidationError> {
        self.diagram.validate()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_site_is_rejected() {
        let sites = [Point::new(100.0, 100.0), Point::new(f64::NAN, 0.0)];
        let err = VoronoiDiagram::with_default_bounds(&sites).unwrap_err();
        assert_eq!(
            err,
            VoronoiConstructionError::InvalidSite {
                index: 1,
                point: Point::new(f64::NAN, 0.0),
            }
        );
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let sites = [Point::new(100.0, 100.0)];
        let err = VoronoiDiagram::new(&sites, BoundingBox::new(0.0, 0.0, 500.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            VoronoiConstructionError::InvalidBoundingBox { .. }
        ));
    }

    #[test]
    fn duplicate_sites_collapse_to_one_face() {
        let site = Point::new(250.0, 250.0);
        let diagram = VoronoiDiagram::with_default_bounds(&[site, site, site]).unwrap();
        assert_eq!(diagram.number_of_sites(), 1);
        assert_eq!(diagram.number_of_faces(), 1);
        assert_eq!(diagram.number_of_edges(), 0);
        assert!(diagram.validate().is_ok());
    }

    #[test]
    fn construction_error_display() {
        let err = VoronoiConstructionError::InvalidBoundingBox {
            bounds: BoundingBox::new(0.0, 0.0, 0.0, 0.0).to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Bounding box [0, 0] × [0, 0] is degenerate or non-finite"
        );
    }

    #[test]
    fn serde_round_trip_preserves_structure() {
        let sites = [
            Point::new(100.0, 100.0),
            Point::new(200.0, 300.0),
            Point::new(300.0, 100.0),
        ];
        let diagram = VoronoiDiagram::with_default_bounds(&sites).unwrap();
        let json = serde_json::to_string(&diagram).unwrap();
        let back: VoronoiDiagram = serde_json::from_str(&json).unwrap();
        assert_eq!(back.number_of_faces(), diagram.number_of_faces());
        assert_eq!(back.number_of_edges(), diagram.number_of_edges());
        assert_eq!(back.bounds(), diagram.bounds());
        assert!(back.validate().is_ok());
    }
}
