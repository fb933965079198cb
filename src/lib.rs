//! # voronoi
//!
//! Planar Voronoi diagrams via [Fortune's sweep-line
//! algorithm](https://en.wikipedia.org/wiki/Fortune%27s_algorithm),
//! producing a topologically consistent subdivision — vertices, directed
//! half-edges, and one face per site — clipped to a rectangular domain.
//!
//! # Features
//!
//! - Event-driven sweep with lazy invalidation of speculative circle
//!   events (no priority-queue deletion)
//! - Arena-backed DCEL output: stable keys instead of owning pointers,
//!   dropped as one unit with the diagram
//! - Rectangle clipping of half-infinite bisectors, with a configurable
//!   bounding box (default `[0, 500] × [0, 500]`)
//! - An independent exact-predicate cross-check path through
//!   [spade](https://docs.rs/spade) for validation
//! - Serialization/Deserialization with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use voronoi::prelude::*;
//!
//! let sites = [
//!     Point::new(100.0, 100.0),
//!     Point::new(200.0, 300.0),
//!     Point::new(300.0, 100.0),
//!     Point::new(400.0, 300.0),
//! ];
//!
//! let diagram = VoronoiDiagram::with_default_bounds(&sites).unwrap();
//!
//! assert_eq!(diagram.number_of_faces(), 4);   // one face per site
//! assert_eq!(diagram.number_of_vertices(), 2);
//!
//! // Every finalized edge is a bounded segment of a site-pair bisector.
//! for (_, edge) in diagram.edges() {
//!     let (start, end) = edge.endpoints().unwrap();
//!     assert!(diagram.bounds().contains(start));
//!     assert!(diagram.bounds().contains(end));
//! }
//! ```
//!
//! # Cross-checking
//!
//! The sweep's output can be validated against an independent
//! construction that derives each cell from a Delaunay triangulation:
//!
//! ```rust
//! use voronoi::crosscheck::compute_cell_polygons;
//! use voronoi::prelude::*;
//!
//! let sites = [Point::new(100.0, 100.0), Point::new(400.0, 100.0)];
//! let diagram = VoronoiDiagram::with_default_bounds(&sites).unwrap();
//! let cells = compute_cell_polygons(&sites, diagram.bounds()).unwrap();
//!
//! assert_eq!(cells.len(), diagram.number_of_faces());
//! ```
//!
//! # Structural invariants
//!
//! A finished diagram upholds, and [`VoronoiDiagram::validate`] checks:
//!
//! - **Face count** – faces are one-to-one with distinct sites.
//! - **Bounded edges** – no edge survives finalization with an open end.
//! - **Twin involution** – half-edges come in mutually linked pairs.
//! - **Key liveness** – every cross-arena reference resolves.
//!
//! [`VoronoiDiagram::validate`]: core::voronoi_diagram::VoronoiDiagram::validate

/// Core sweep machinery and the diagram it builds.
pub mod core {
    pub mod beachline;
    pub(crate) mod clip;
    pub mod collections;
    pub mod diagram;
    pub mod event;
    pub mod sweep;
    pub mod voronoi_diagram;

    pub use diagram::*;
    pub use sweep::*;
    pub use voronoi_diagram::*;
}

/// Geometric primitives and predicates.
pub mod geometry {
    pub mod bounds;
    pub mod point;
    pub mod predicates;
    pub mod util;

    pub use bounds::*;
    pub use point::*;
    pub use predicates::*;
    pub use util::*;
}

/// Independent Delaunay-based cell construction for validation.
pub mod crosscheck;

/// Commonly used types, re-exported in one place.
pub mod prelude {
    pub use crate::core::collections::SiteIndex;
    pub use crate::core::diagram::{
        Diagram, Edge, EdgeKey, Face, FaceKey, HalfEdge, HalfEdgeKey, Vertex, VertexKey,
        VoronoiValidationError,
    };
    pub use crate::core::sweep::{FortuneSweep, SweepState};
    pub use crate::core::voronoi_diagram::{VoronoiConstructionError, VoronoiDiagram};
    pub use crate::crosscheck::{CellPolygon, compute_cell_polygons};
    pub use crate::geometry::bounds::BoundingBox;
    pub use crate::geometry::point::Point;
    pub use crate::geometry::predicates::{
        EPSILON, Orientation, breakpoint_x, circumcenter, distance, orientation, parabola_y,
    };
    pub use crate::geometry::util::{
        SiteGenerationError, generate_random_sites, generate_random_sites_seeded,
    };
}
