//! Independent cross-check construction of Voronoi cells.
//!
//! Builds a Delaunay triangulation of the same sites with `spade`'s
//! exact-predicate incremental algorithm, then derives each site's cell
//! directly from its Delaunay neighbors: the cell is the clipping
//! rectangle cut down, Sutherland–Hodgman style, by the bisector
//! half-plane of every neighbor. Because the unclipped Voronoi cell is
//! exactly the intersection of those half-planes, this path shares no
//! code or numerics with the sweep and is used to validate its output —
//! it is not a production construction path.

use crate::core::collections::{SiteIndex, fast_hash_map_with_capacity, fast_hash_set_with_capacity};
use crate::core::voronoi_diagram::VoronoiConstructionError;
use crate::geometry::bounds::BoundingBox;
use crate::geometry::point::Point;
use spade::{DelaunayTriangulation, Point2, Triangulation};

// =============================================================================
// CELL POLYGONS
// =============================================================================

/// Ordered boundary polygon of one site's clipped Voronoi cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPolygon {
    /// Index of the generating site in the input order (first occurrence
    /// for duplicate coordinates).
    pub site_index: SiteIndex,
    /// The generating site.
    pub site: Point,
    /// Counter-clockwise vertex loop of the cell, clipped to the
    /// rectangle. Empty only when the cell lies entirely outside it.
    pub vertices: Vec<Point>,
}

/// Computes the clipped Voronoi cell polygon of every distinct site.
///
/// Results are ordered by first occurrence in `sites`; duplicate
/// coordinates collapse onto their first occurrence, matching the face
/// semantics of [`crate::core::voronoi_diagram::VoronoiDiagram`].
///
/// # Errors
///
/// Returns [`VoronoiConstructionError::InvalidBoundingBox`] for a
/// degenerate rectangle and [`VoronoiConstructionError::InvalidSite`] for
/// non-finite coordinates.
///
/// # Examples
///
/// ```
/// use voronoi::crosscheck::compute_cell_polygons;
/// use voronoi::geometry::bounds::BoundingBox;
/// use voronoi::geometry::point::Point;
///
/// let sites = [Point::new(100.0, 100.0), Point::new(400.0, 100.0)];
/// let cells = compute_cell_polygons(&sites, &BoundingBox::default()).unwrap();
///
/// assert_eq!(cells.len(), 2);
/// // The left cell is the half-box left of the x = 250 bisector.
/// assert!(cells[0].vertices.iter().all(|v| v.x <= 250.0 + 1e-9));
/// ```
pub fn compute_cell_polygons(
    sites: &[Point],
    bounds: &BoundingBox,
) -> Result<Vec<CellPolygon>, VoronoiConstructionError> {
    if !bounds.is_valid() {
        return Err(VoronoiConstructionError::InvalidBoundingBox {
            bounds: bounds.to_string(),
        });
    }

    let mut seen = fast_hash_set_with_capacity(sites.len());
    let mut distinct: Vec<(SiteIndex, Point)> = Vec::with_capacity(sites.len());
    for (index, &site) in sites.iter().enumerate() {
        if !site.is_finite() {
            return Err(VoronoiConstructionError::InvalidSite { index, point: site });
        }
        if seen.insert(site) {
            distinct.push((index, site));
        }
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for &(index, site) in &distinct {
        triangulation
            .insert(Point2::new(site.x, site.y))
            .map_err(|_| VoronoiConstructionError::InvalidSite { index, point: site })?;
    }

    // spade stores inserted coordinates verbatim, so exact positions map
    // vertex handles back to input order.
    let mut slots = fast_hash_map_with_capacity(distinct.len());
    for (slot, &(_, site)) in distinct.iter().enumerate() {
        slots.insert(site, slot);
    }
    let mut polygons: Vec<Option<Vec<Point>>> = vec![None; distinct.len()];

    for handle in triangulation.vertices() {
        let position = handle.position();
        let site = Point::new(position.x, position.y);
        let Some(&slot) = slots.get(&site) else {
            continue;
        };

        let mut polygon: Vec<Point> = bounds.corners().to_vec();
        for out_edge in handle.out_edges() {
            let neighbor = out_edge.to().position();
            polygon = clip_to_bisector(&polygon, site, Point::new(neighbor.x, neighbor.y));
            if polygon.is_empty() {
                break;
            }
        }
        polygons[slot] = Some(polygon);
    }

    Ok(distinct
        .iter()
        .zip(polygons)
        .map(|(&(site_index, site), polygon)| CellPolygon {
            site_index,
            site,
            // A site the triangulation has no handle for cannot occur;
            // fall back to the full rectangle rather than panic.
            vertices: polygon.unwrap_or_else(|| bounds.corners().to_vec()),
        })
        .collect())
}

/// Sutherland–Hodgman clip of `polygon` against the half-plane of points
/// no farther from `site` than from `neighbor`.
fn clip_to_bisector(polygon: &[Point], site: Point, neighbor: Point) -> Vec<Point> {
    let mid = site.midpoint(neighbor);
    let normal_x = neighbor.x - site.x;
    let normal_y = neighbor.y - site.y;
    let offset = |p: Point| (p.x - mid.x) * normal_x + (p.y - mid.y) * normal_y;

    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let offset_current = offset(current);
        let offset_next = offset(next);

        if offset_current <= 0.0 {
            clipped.push(current);
        }
        if (offset_current < 0.0) != (offset_next < 0.0)
            && offset_current != 0.0
            && offset_next != 0.0
        {
            let t = offset_current / (offset_current - offset_next);
            clipped.push(Point::new(
                current.x + t * (next.x - current.x),
                current.y + t * (next.y - current.y),
            ));
        }
    }
    clipped
}

// =============================================================================
// TESTS
// =============================================================================
