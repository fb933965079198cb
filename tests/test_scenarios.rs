//! End-to-end scenarios with known diagrams.
//!
//! Each test pins the exact output for a small, hand-checkable input:
//! face and edge counts, vertex positions, and the geometry of clipped
//! bisectors.

#![forbid(unsafe_code)]

use approx::assert_relative_eq;
use voronoi::prelude::*;

fn build(sites: &[(f64, f64)]) -> VoronoiDiagram {
    let sites: Vec<Point> = sites.iter().map(|&(x, y)| Point::new(x, y)).collect();
    let diagram = VoronoiDiagram::with_default_bounds(&sites).expect("valid input");
    diagram.validate().expect("structurally sound diagram");
    diagram
}

#[test]
fn empty_input_completes_with_nothing() {
    let diagram = build(&[]);
    assert_eq!(diagram.number_of_faces(), 0);
    assert_eq!(diagram.number_of_edges(), 0);
    assert_eq!(diagram.number_of_vertices(), 0);
}

#[test]
fn single_site_owns_one_face_and_no_edges() {
    let diagram = build(&[(250.0, 250.0)]);
    assert_eq!(diagram.number_of_faces(), 1);
    assert_eq!(diagram.number_of_edges(), 0);
    assert_eq!(diagram.number_of_vertices(), 0);

    let (_, face) = diagram.faces().next().unwrap();
    assert_eq!(face.site, Point::new(250.0, 250.0));
    assert!(face.outer_component.is_none());
}

#[test]
fn two_horizontal_sites_share_a_vertical_bisector() {
    let diagram = build(&[(100.0, 100.0), (400.0, 100.0)]);
    assert_eq!(diagram.number_of_faces(), 2);
    assert_eq!(diagram.number_of_edges(), 1);
    assert_eq!(diagram.number_of_vertices(), 0);

    let (_, edge) = diagram.edges().next().unwrap();
    let (start, end) = edge.endpoints().unwrap();

    // Vertical line x = 250, clipped to the box's top and bottom.
    assert_relative_eq!(start.x, 250.0, epsilon = 1e-9);
    assert_relative_eq!(end.x, 250.0, epsilon = 1e-9);
    let mut ys = [start.y, end.y];
    ys.sort_by(f64::total_cmp);
    assert_relative_eq!(ys[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(ys[1], 500.0, epsilon = 1e-9);

    // Its midpoint sits on the bisector of the two sites.
    let midpoint = start.midpoint(end);
    assert_relative_eq!(midpoint.x, 250.0, epsilon = 1e-9);
    assert_relative_eq!(midpoint.y, 250.0, epsilon = 1e-9);
}

#[test]
fn two_vertical_sites_share_a_horizontal_bisector() {
    let diagram = build(&[(100.0, 100.0), (100.0, 400.0)]);
    assert_eq!(diagram.number_of_faces(), 2);
    assert_eq!(diagram.number_of_edges(), 1);

    let (_, edge) = diagram.edges().next().unwrap();
    let (start, end) = edge.endpoints().unwrap();
    assert_relative_eq!(start.y, 250.0, epsilon = 1e-9);
    assert_relative_eq!(end.y, 250.0, epsilon = 1e-9);
    assert_relative_eq!((start.x - end.x).abs(), 500.0, epsilon = 1e-9);
}

#[test]
fn three_collinear_sites_yield_two_vertical_bisectors() {
    let diagram = build(&[(100.0, 100.0), (200.0, 100.0), (300.0, 100.0)]);
    assert_eq!(diagram.number_of_faces(), 3);
    assert_eq!(diagram.number_of_edges(), 2);
    // Collinear triples never converge, so no circle event ever fires.
    assert_eq!(diagram.number_of_vertices(), 0);

    // Each consecutive pair contributes its own vertical bisector.
    let mut xs: Vec<f64> = diagram
        .edges()
        .map(|(_, edge)| {
            let (start, end) = edge.endpoints().unwrap();
            assert_relative_eq!(start.x, end.x, epsilon = 1e-9);
            start.x
        })
        .collect();
    xs.sort_by(f64::total_cmp);
    assert_relative_eq!(xs[0], 150.0, epsilon = 1e-9);
    assert_relative_eq!(xs[1], 250.0, epsilon = 1e-9);
}

#[test]
fn four_site_zigzag_is_fully_bounded() {
    let diagram = build(&[(100.0, 100.0), (200.0, 300.0), (300.0, 100.0), (400.0, 300.0)]);
    assert_eq!(diagram.number_of_faces(), 4);
    assert_eq!(diagram.number_of_edges(), 5);
    assert_eq!(diagram.number_of_vertices(), 2);

    let bounds = *diagram.bounds();
    for (_, edge) in diagram.edges() {
        let (start, end) = edge.endpoints().unwrap();
        assert!(bounds.contains(start), "start {start} escaped the box");
        assert!(bounds.contains(end), "end {end} escaped the box");
        assert!(
            distance(start, end) > 1e-9,
            "edge collapsed to a point: {start} -> {end}"
        );
    }

    let mut vertices: Vec<Point> = diagram.vertices().map(|(_, v)| v.point).collect();
    vertices.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_relative_eq!(vertices[0].x, 200.0, epsilon = 1e-9);
    assert_relative_eq!(vertices[0].y, 175.0, epsilon = 1e-9);
    assert_relative_eq!(vertices[1].x, 300.0, epsilon = 1e-9);
    assert_relative_eq!(vertices[1].y, 225.0, epsilon = 1e-9);
}

#[test]
fn every_face_keeps_its_site() {
    let sites = [(100.0, 100.0), (200.0, 300.0), (300.0, 100.0), (400.0, 300.0)];
    let diagram = build(&sites);
    for (index, &(x, y)) in sites.iter().enumerate() {
        let face = diagram
            .diagram()
            .face(diagram.site_face(index))
            .expect("live face");
        assert_eq!(face.site, Point::new(x, y));
        assert_eq!(face.site_index, index);
        assert!(face.outer_component.is_some());
    }
}

#[test]
fn sites_outside_the_box_get_best_effort_clipping() {
    // The second site lies above the box, but the shared bisector
    // (y = 450) still crosses it.
    let diagram = build(&[(250.0, 300.0), (250.0, 600.0)]);
    assert_eq!(diagram.number_of_faces(), 2);
    assert_eq!(diagram.number_of_edges(), 1);

    let (_, edge) = diagram.edges().next().unwrap();
    let (start, end) = edge.endpoints().unwrap();
    assert_relative_eq!(start.y, 450.0, epsilon = 1e-9);
    assert_relative_eq!(end.y, 450.0, epsilon = 1e-9);
}

#[test]
fn edges_that_never_meet_the_box_are_dropped() {
    // Bisector y = 575 lies entirely above the box; the faces survive
    // but the edge does not.
    let diagram = build(&[(250.0, 250.0), (250.0, 900.0)]);
    assert_eq!(diagram.number_of_faces(), 2);
    assert_eq!(diagram.number_of_edges(), 0);
}

#[test]
fn custom_bounds_are_respected() {
    let bounds = BoundingBox::new(-100.0, -100.0, 100.0, 100.0);
    let sites = [Point::new(-50.0, 0.0), Point::new(50.0, 0.0)];
    let diagram = VoronoiDiagram::new(&sites, bounds).unwrap();

    assert_eq!(diagram.number_of_edges(), 1);
    let (_, edge) = diagram.edges().next().unwrap();
    let (start, end) = edge.endpoints().unwrap();
    assert_relative_eq!(start.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(end.x, 0.0, epsilon = 1e-9);
    let mut ys = [start.y, end.y];
    ys.sort_by(f64::total_cmp);
    assert_relative_eq!(ys[0], -100.0, epsilon = 1e-9);
    assert_relative_eq!(ys[1], 100.0, epsilon = 1e-9);
}
