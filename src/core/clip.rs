//! Boundary clipping of bisector edges.
//!
//! After the event queue drains, edges come in three shapes: segments
//! closed by two circle events, half-open rays with one true endpoint,
//! and full bisector lines never touched by a circle event (their only
//! anchor is the provisional split point, which carries no geometric
//! authority). The clipper rebuilds the true perpendicular bisector for
//! the open shapes, extends them far past the domain, and cuts every
//! edge down to the bounding rectangle. Edges whose span never meets the
//! rectangle are dropped, which is what makes sites on or outside the
//! domain safe best-effort input.

use crate::core::diagram::{Diagram, EdgeKey};
use crate::geometry::bounds::BoundingBox;
use crate::geometry::point::Point;
use crate::geometry::predicates::{EPSILON, distance};

enum Shape {
    /// Both endpoints fixed by circle events.
    Segment(Point, Point),
    /// One true endpoint; grows along the open breakpoint direction.
    Ray(Point),
    /// No true endpoint; the whole bisector of the site pair.
    Line,
}

/// Resolves every open edge against `bounds` and clips all edges to it.
///
/// On return each surviving edge has both endpoints inside the rectangle;
/// face representatives are refreshed to account for removed edges.
pub(crate) fn finalize(diagram: &mut Diagram, bounds: &BoundingBox) {
    let keys: Vec<EdgeKey> = diagram.edges().map(|(key, _)| key).collect();
    for key in keys {
        let Some(edge) = diagram.edge(key).copied() else {
            continue;
        };
        let (index_a, index_b) = edge.sites();
        let a = diagram.site_point(index_a);
        let b = diagram.site_point(index_b);

        // The open end of the breakpoint between a left arc of `a` and a
        // right arc of `b` grows along the clockwise normal of b - a.
        let direction = Point::new(b.y - a.y, -(b.x - a.x));
        let norm = direction.x.hypot(direction.y);

        let shape = match (edge.start(), edge.end(), edge.start_is_vertex()) {
            (Some(start), Some(end), true) => Shape::Segment(start, end),
            // One convergence fixed `end`; the provisional anchor left in
            // `start` is discarded and the open side regrown.
            (Some(_), Some(end), false) => Shape::Ray(end),
            (Some(start), None, true) => Shape::Ray(start),
            _ => Shape::Line,
        };

        if norm < EPSILON && !matches!(shape, Shape::Segment(_, _)) {
            // Duplicate sites define no bisector direction.
            diagram.remove_edge(key);
            continue;
        }

        // `norm` is only a valid divisor for the open shapes; a fully
        // resolved segment between duplicate sites carries no direction.
        let span = match shape {
            Shape::Segment(start, end) => bounds.clip_segment(start, end),
            Shape::Ray(origin) => {
                let unit = Point::new(direction.x / norm, direction.y / norm);
                let extent = reach(bounds, origin);
                let far = Point::new(origin.x + unit.x * extent, origin.y + unit.y * extent);
                bounds.clip_segment(origin, far)
            }
            Shape::Line => {
                let unit = Point::new(direction.x / norm, direction.y / norm);
                let mid = a.midpoint(b);
                let extent = reach(bounds, mid);
                bounds.clip_segment(
                    Point::new(mid.x - unit.x * extent, mid.y - unit.y * extent),
                    Point::new(mid.x + unit.x * extent, mid.y + unit.y * extent),
                )
            }
        };

        match span {
            Some((start, end)) => diagram.set_edge_span(key, start, end),
            None => diagram.remove_edge(key),
        }
    }

    diagram.refresh_outer_components();
}

/// Distance guaranteed to carry any point from `from` beyond the
/// rectangle in every direction.
fn reach(bounds: &BoundingBox, from: Point) -> f64 {
    bounds.width() + bounds.height() + distance(from, bounds.center())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unresolved_split_edge_becomes_full_bisector() {
        // Two equal-height sites: the split anchor is geometrically
        // meaningless and the true bisector is the vertical midline.
        let mut diagram = Diagram::new(vec![Point::new(100.0, 100.0), Point::new(400.0, 100.0)]);
        let edge = diagram.add_split_edge(0, 1, Point::new(400.0, 100.0));

        finalize(&mut diagram, &BoundingBox::default());

        let (start, end) = diagram.edge(edge).unwrap().endpoints().unwrap();
        assert_relative_eq!(start.x, 250.0, epsilon = 1e-9);
        assert_relative_eq!(end.x, 250.0, epsilon = 1e-9);
        let mut ys = [start.y, end.y];
        ys.sort_by(f64::total_cmp);
        assert_relative_eq!(ys[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(ys[1], 500.0, epsilon = 1e-9);
        assert!(diagram.validate().is_ok());
    }

    #[test]
    fn vertical_site_pair_yields_horizontal_bisector() {
        let mut diagram = Diagram::new(vec![Point::new(100.0, 400.0), Point::new(100.0, 100.0)]);
        diagram.add_split_edge(0, 1, Point::new(100.0, 250.0));

        finalize(&mut diagram, &BoundingBox::default());

        let (_, edge) = diagram.edges().next().unwrap();
        let (start, end) = edge.endpoints().unwrap();
        assert_relative_eq!(start.y, 250.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 250.0, epsilon = 1e-9);
        assert_relative_eq!((start.x - end.x).abs(), 500.0, epsilon = 1e-9);
    }

    #[test]
    fn circle_edge_extends_along_open_direction() {
        // Bisector of sites 0 (left arc) and 1 (right arc), anchored at a
        // vertex on the midline: grows straight down.
        let mut diagram = Diagram::new(vec![Point::new(100.0, 100.0), Point::new(300.0, 100.0)]);
        let vertex = diagram.add_vertex(Point::new(200.0, 175.0));
        let edge = diagram.add_circle_edge(0, 1, vertex);

        finalize(&mut diagram, &BoundingBox::default());

        let (start, end) = diagram.edge(edge).unwrap().endpoints().unwrap();
        assert_eq!(start, Point::new(200.0, 175.0));
        assert_relative_eq!(end.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn half_open_split_edge_regrows_from_its_vertex() {
        let mut diagram = Diagram::new(vec![Point::new(100.0, 100.0), Point::new(300.0, 100.0)]);
        let edge = diagram.add_split_edge(0, 1, Point::new(300.0, 100.0));
        let vertex = diagram.add_vertex(Point::new(200.0, 175.0));
        // The (1, 0) breakpoint converged; the open side is (0, 1),
        // growing downward from the vertex.
        diagram.resolve_edge_at(edge, vertex, (1, 0));

        finalize(&mut diagram, &BoundingBox::default());

        let (start, end) = diagram.edge(edge).unwrap().endpoints().unwrap();
        let mut ys = [start.y, end.y];
        ys.sort_by(f64::total_cmp);
        assert_relative_eq!(start.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(end.x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(ys[0], 0.0, epsilon = 1e-9);
        assert_relative_eq!(ys[1], 175.0, epsilon = 1e-9);
    }

    #[test]
    fn fully_resolved_segment_is_only_clipped() {
        let mut diagram = Diagram::new(vec![Point::new(100.0, 100.0), Point::new(300.0, 100.0)]);
        let edge = diagram.add_split_edge(0, 1, Point::new(300.0, 100.0));
        let v1 = diagram.add_vertex(Point::new(200.0, 600.0));
        let v2 = diagram.add_vertex(Point::new(200.0, 175.0));
        diagram.resolve_edge_at(edge, v1, (1, 0));
        diagram.resolve_edge_at(edge, v2, (0, 1));

        finalize(&mut diagram, &BoundingBox::default());

        let (start, end) = diagram.edge(edge).unwrap().endpoints().unwrap();
        let mut ys = [start.y, end.y];
        ys.sort_by(f64::total_cmp);
        assert_relative_eq!(ys[0], 175.0, epsilon = 1e-9);
        assert_relative_eq!(ys[1], 500.0, epsilon = 1e-9);
    }

    #[test]
    fn edges_outside_the_box_are_dropped() {
        let mut diagram = Diagram::new(vec![Point::new(900.0, 100.0), Point::new(900.0, 300.0)]);
        let vertex = diagram.add_vertex(Point::new(900.0, 200.0));
        let edge = diagram.add_circle_edge(0, 1, vertex);

        finalize(&mut diagram, &BoundingBox::default());

        assert!(diagram.edge(edge).is_none());
        assert_eq!(diagram.number_of_edges(), 0);
        assert_eq!(diagram.number_of_half_edges(), 0);
        assert!(
            diagram
                .faces()
                .all(|(_, face)| face.outer_component.is_none())
        );
    }

    #[test]
    fn resolved_segment_between_duplicate_sites_clips_cleanly() {
        // A zero-length site delta gives no open direction, but a fully
        // resolved segment needs none: it must clip without touching any
        // direction arithmetic.
        let site = Point::new(250.0, 250.0);
        let mut diagram = Diagram::new(vec![site, site]);
        let edge = diagram.add_split_edge(0, 1, Point::new(250.0, 600.0));
        let v1 = diagram.add_vertex(Point::new(250.0, 600.0));
        let v2 = diagram.add_vertex(Point::new(250.0, 100.0));
        diagram.resolve_edge_at(edge, v1, (1, 0));
        diagram.resolve_edge_at(edge, v2, (0, 1));

        finalize(&mut diagram, &BoundingBox::default());

        let (start, end) = diagram.edge(edge).unwrap().endpoints().unwrap();
        assert!(start.is_finite() && end.is_finite());
        let mut ys = [start.y, end.y];
        ys.sort_by(f64::total_cmp);
        assert_relative_eq!(start.x, 250.0, epsilon = 1e-9);
        assert_relative_eq!(ys[0], 100.0, epsilon = 1e-9);
        assert_relative_eq!(ys[1], 500.0, epsilon = 1e-9);
    }

    #[test]
    fn duplicate_site_edges_are_dropped() {
        let site = Point::new(250.0, 250.0);
        let mut diagram = Diagram::new(vec![site, site]);
        diagram.add_split_edge(0, 1, site);

        finalize(&mut diagram, &BoundingBox::default());
        assert_eq!(diagram.number_of_edges(), 0);
        assert!(diagram.validate().is_ok());
    }
}
