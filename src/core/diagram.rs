//! Doubly-connected edge list assembled by the sweep.
//!
//! All records live in slotmap arenas owned by a single [`Diagram`];
//! intrusive pointers between records are arena keys, so splicing and
//! lookup stay O(1) while a removed record's key simply stops resolving.
//! Dropping the diagram releases every vertex, half-edge, face, and edge
//! in one sweep with no per-record bookkeeping.
//!
//! During construction, an [`Edge`] is the bisector of two sites with
//! lazily resolved endpoints. A breakpoint convergence fixes an endpoint
//! to a true [`Vertex`]; whatever remains open after the event queue
//! drains is fixed by the boundary clipper. The `(site_a, site_b)` pair
//! is kept in breakpoint order for the edge's still-open direction: the
//! open end always grows along `rotate_cw(b - a)`.

use crate::core::collections::SiteIndex;
use crate::geometry::point::Point;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

// =============================================================================
// KEYS
// =============================================================================

new_key_type! {
    /// Key into the diagram's vertex arena.
    pub struct VertexKey;

    /// Key into the diagram's half-edge arena.
    pub struct HalfEdgeKey;

    /// Key into the diagram's face arena.
    pub struct FaceKey;

    /// Key into the diagram's edge arena.
    pub struct EdgeKey;
}

// =============================================================================
// RECORDS
// =============================================================================

/// A finalized diagram vertex.
///
/// Vertices are materialized exactly once per processed circle event;
/// clip points on the bounding rectangle do not become vertices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Position of the vertex.
    pub point: Point,
}

/// A directed boundary element of a face.
///
/// Half-edges are created in twin pairs, one pair per [`Edge`]. The
/// `next`/`prev` cycle links are not resolved by the sweep itself and
/// remain `None`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HalfEdge {
    /// Vertex this half-edge leaves from, when that end is anchored.
    pub origin: Option<VertexKey>,
    /// The oppositely directed half-edge across the same bisector.
    pub twin: HalfEdgeKey,
    /// Successor along the face boundary, if resolved.
    pub next: Option<HalfEdgeKey>,
    /// Predecessor along the face boundary, if resolved.
    pub prev: Option<HalfEdgeKey>,
    /// Face this half-edge bounds.
    pub face: FaceKey,
}

/// The region of the plane closest to one site.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Face {
    /// The generating site.
    pub site: Point,
    /// Index of the generating site in input order.
    pub site_index: SiteIndex,
    /// A representative half-edge on this face's boundary, when the face
    /// has any boundary at all (a single-site diagram has none).
    pub outer_component: Option<HalfEdgeKey>,
}

/// A bisector between two sites, possibly still open on one or both ends.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Edge {
    start: Option<Point>,
    end: Option<Point>,
    start_is_vertex: bool,
    site_a: SiteIndex,
    site_b: SiteIndex,
    half_edge: HalfEdgeKey,
}

impl Edge {
    /// Start point, if resolved. Before clipping this may be the
    /// provisional split anchor rather than a true vertex; see
    /// [`Edge::start_is_vertex`].
    #[inline]
    #[must_use]
    pub const fn start(&self) -> Option<Point> {
        self.start
    }

    /// End point, if resolved.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Option<Point> {
        self.end
    }

    /// Whether `start` was fixed by a circle event (as opposed to the
    /// provisional anchor laid down by a beachline split).
    #[inline]
    #[must_use]
    pub const fn start_is_vertex(&self) -> bool {
        self.start_is_vertex
    }

    /// The two separated sites, in breakpoint order for the edge's open
    /// direction.
    #[inline]
    #[must_use]
    pub const fn sites(&self) -> (SiteIndex, SiteIndex) {
        (self.site_a, self.site_b)
    }

    /// One half-edge of the twin pair this edge induces; its origin sits
    /// at the edge's start side.
    #[inline]
    #[must_use]
    pub const fn half_edge(&self) -> HalfEdgeKey {
        self.half_edge
    }

    /// Both endpoints, once the edge is fully resolved.
    #[inline]
    #[must_use]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Errors reported by [`Diagram::validate`] when a finished diagram
/// violates a structural invariant.
///
/// Any of these indicates a programming error in the sweep or clipper,
/// not bad input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VoronoiValidationError {
    /// An edge survived finalization with an unresolved endpoint.
    #[error("Edge {edge:?} has an unresolved endpoint after clipping")]
    OpenEdge {
        /// The offending edge.
        edge: EdgeKey,
    },
    /// A half-edge's twin does not point back at it.
    #[error("Half-edge {half_edge:?} fails the twin involution")]
    TwinMismatch {
        /// The offending half-edge.
        half_edge: HalfEdgeKey,
    },
    /// A record references a key that is not live in its arena.
    #[error("Dangling {referent} reference from {description}")]
    DanglingReference {
        /// What kind of record the dead key was supposed to name.
        referent: &'static str,
        /// Where the dead key was found.
        description: String,
    },
    /// The face count disagrees with the number of sites.
    #[error("Diagram has {faces} faces for {sites} sites")]
    FaceCountMismatch {
        /// Number of live faces.
        faces: usize,
        /// Number of distinct input sites.
        sites: usize,
    },
}

// =============================================================================
// DIAGRAM
// =============================================================================

/// The aggregate planar subdivision: one face per site, plus all
/// vertices, half-edges, and bisector edges.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Diagram {
    sites: Vec<Point>,
    site_faces: Vec<FaceKey>,
    vertices: SlotMap<VertexKey, Vertex>,
    half_edges: SlotMap<HalfEdgeKey, HalfEdge>,
    faces: SlotMap<FaceKey, Face>,
    edges: SlotMap<EdgeKey, Edge>,
}

impl Diagram {
    /// Creates a diagram over the given distinct sites, allocating one
    /// face per site. No edges or vertices exist yet.
    #[must_use]
    pub fn new(sites: Vec<Point>) -> Self {
        let mut faces = SlotMap::with_key();
        let site_faces = sites
            .iter()
            .enumerate()
            .map(|(site_index, &site)| {
                faces.insert(Face {
                    site,
                    site_index,
                    outer_component: None,
                })
            })
            .collect();
        Self {
            sites,
            site_faces,
            vertices: SlotMap::with_key(),
            half_edges: SlotMap::with_key(),
            faces,
            edges: SlotMap::with_key(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// The input sites, in insertion order.
    #[inline]
    #[must_use]
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    /// Position of the site at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; site indices originate inside
    /// the crate and are always in range for their diagram.
    #[inline]
    #[must_use]
    pub fn site_point(&self, index: SiteIndex) -> Point {
        self.sites[index]
    }

    /// The face owned by the site at `index`.
    #[inline]
    #[must_use]
    pub fn site_face(&self, index: SiteIndex) -> FaceKey {
        self.site_faces[index]
    }

    /// Number of sites.
    #[inline]
    #[must_use]
    pub fn number_of_sites(&self) -> usize {
        self.sites.len()
    }

    /// Number of finalized vertices.
    #[inline]
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of bisector edges.
    #[inline]
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of half-edges (always twice the edge count).
    #[inline]
    #[must_use]
    pub fn number_of_half_edges(&self) -> usize {
        self.half_edges.len()
    }

    /// Number of faces (one per site).
    #[inline]
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, &Vertex)> {
        self.vertices.iter()
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> {
        self.edges.iter()
    }

    /// Iterates over all faces.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &Face)> {
        self.faces.iter()
    }

    /// Iterates over all half-edges.
    pub fn half_edges(&self) -> impl Iterator<Item = (HalfEdgeKey, &HalfEdge)> {
        self.half_edges.iter()
    }

    /// Looks up a vertex.
    #[inline]
    #[must_use]
    pub fn vertex(&self, key: VertexKey) -> Option<&Vertex> {
        self.vertices.get(key)
    }

    /// Looks up an edge.
    #[inline]
    #[must_use]
    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.edges.get(key)
    }

    /// Looks up a face.
    #[inline]
    #[must_use]
    pub fn face(&self, key: FaceKey) -> Option<&Face> {
        self.faces.get(key)
    }

    /// Looks up a half-edge.
    #[inline]
    #[must_use]
    pub fn half_edge(&self, key: HalfEdgeKey) -> Option<&HalfEdge> {
        self.half_edges.get(key)
    }

    // =========================================================================
    // CONSTRUCTION (used by the sweep and clipper)
    // =========================================================================

    /// Materializes a vertex at `point`.
    pub(crate) fn add_vertex(&mut self, point: Point) -> VertexKey {
        self.vertices.insert(Vertex { point })
    }

    /// Allocates a twin pair of half-edges between the faces of `site_a`
    /// and `site_b` and returns `(half_a, half_b)`, where `half_a` bounds
    /// `site_a`'s face.
    fn add_half_edge_pair(
        &mut self,
        site_a: SiteIndex,
        site_b: SiteIndex,
    ) -> (HalfEdgeKey, HalfEdgeKey) {
        let face_a = self.site_faces[site_a];
        let face_b = self.site_faces[site_b];
        let half_a = self.half_edges.insert(HalfEdge {
            origin: None,
            twin: HalfEdgeKey::default(),
            next: None,
            prev: None,
            face: face_a,
        });
        let half_b = self.half_edges.insert(HalfEdge {
            origin: None,
            twin: half_a,
            next: None,
            prev: None,
            face: face_b,
        });
        self.half_edges[half_a].twin = half_b;
        if self.faces[face_a].outer_component.is_none() {
            self.faces[face_a].outer_component = Some(half_a);
        }
        if self.faces[face_b].outer_component.is_none() {
            self.faces[face_b].outer_component = Some(half_b);
        }
        (half_a, half_b)
    }

    /// Creates the bisector edge laid down by a beachline split, anchored
    /// at the provisional split point, together with its half-edge pair.
    ///
    /// `site_a` is the site of the arc that was split, `site_b` the newly
    /// inserted site.
    pub(crate) fn add_split_edge(
        &mut self,
        site_a: SiteIndex,
        site_b: SiteIndex,
        anchor: Point,
    ) -> EdgeKey {
        let (half_a, _) = self.add_half_edge_pair(site_a, site_b);
        self.edges.insert(Edge {
            start: Some(anchor),
            end: None,
            start_is_vertex: false,
            site_a,
            site_b,
            half_edge: half_a,
        })
    }

    /// Creates the bisector edge born at a circle event, anchored at the
    /// new vertex, together with its half-edge pair.
    ///
    /// `(site_a, site_b)` is the breakpoint pair in beachline order, so
    /// the open end grows along `rotate_cw(b - a)`.
    pub(crate) fn add_circle_edge(
        &mut self,
        site_a: SiteIndex,
        site_b: SiteIndex,
        vertex: VertexKey,
    ) -> EdgeKey {
        let (half_a, _) = self.add_half_edge_pair(site_a, site_b);
        self.half_edges[half_a].origin = Some(vertex);
        self.edges.insert(Edge {
            start: Some(self.vertices[vertex].point),
            end: None,
            start_is_vertex: true,
            site_a,
            site_b,
            half_edge: half_a,
        })
    }

    /// Resolves one end of `edge` at a circle-event vertex.
    ///
    /// `converging` names the breakpoint pair, in beachline order, that
    /// just converged. The first convergence fixes the edge's `end`; a
    /// second convergence (the other breakpoint of a split-born edge)
    /// instead replaces the provisional anchor in `start` with the
    /// vertex. Either way the site pair is re-oriented so that
    /// `(site_a, site_b)` keeps describing the still-open direction.
    pub(crate) fn resolve_edge_at(
        &mut self,
        edge: EdgeKey,
        vertex: VertexKey,
        converging: (SiteIndex, SiteIndex),
    ) {
        let point = self.vertices[vertex].point;
        let Some(record) = self.edges.get_mut(edge) else {
            debug_assert!(false, "resolving a dead edge key");
            return;
        };
        let half = record.half_edge;
        if record.end.is_none() {
            record.end = Some(point);
            // The surviving breakpoint of this bisector runs the other
            // way: reverse the converged pair.
            record.site_a = converging.1;
            record.site_b = converging.0;
            let twin = self.half_edges[half].twin;
            self.half_edges[twin].origin = Some(vertex);
        } else {
            debug_assert!(
                !record.start_is_vertex,
                "edge resolved by more than two circle events"
            );
            record.start = Some(point);
            record.start_is_vertex = true;
            self.half_edges[half].origin = Some(vertex);
        }
    }

    /// Writes the final clipped span of an edge.
    pub(crate) fn set_edge_span(&mut self, edge: EdgeKey, start: Point, end: Point) {
        if let Some(record) = self.edges.get_mut(edge) {
            record.start = Some(start);
            record.end = Some(end);
        }
    }

    /// Removes an edge that lies entirely outside the clipping rectangle,
    /// along with its half-edge pair.
    pub(crate) fn remove_edge(&mut self, edge: EdgeKey) {
        let Some(record) = self.edges.remove(edge) else {
            return;
        };
        let half = record.half_edge;
        if let Some(h) = self.half_edges.remove(half) {
            self.half_edges.remove(h.twin);
        }
    }

    /// Recomputes every face's representative half-edge after clipping
    /// may have removed the one it pointed at.
    pub(crate) fn refresh_outer_components(&mut self) {
        for face in self.faces.values_mut() {
            face.outer_component = None;
        }
        let mut assignments = Vec::with_capacity(self.half_edges.len());
        for (key, half) in &self.half_edges {
            assignments.push((half.face, key));
        }
        // Earlier-created half-edges win, keeping representatives stable.
        for (face, key) in assignments.into_iter().rev() {
            self.faces[face].outer_component = Some(key);
        }
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Checks the structural invariants of a finished diagram.
    ///
    /// Verifies that every edge is fully bounded, that the half-edge twin
    /// relation is an involution, that every cross-arena reference is
    /// live, and that faces remain one-to-one with sites.
    ///
    /// # Errors
    ///
    /// Returns the first [`VoronoiValidationError`] found.
    pub fn validate(&self) -> Result<(), VoronoiValidationError> {
        if self.faces.len() != self.sites.len() {
            return Err(VoronoiValidationError::FaceCountMismatch {
                faces: self.faces.len(),
                sites: self.sites.len(),
            });
        }

        for (key, edge) in &self.edges {
            if edge.endpoints().is_none() {
                return Err(VoronoiValidationError::OpenEdge { edge: key });
            }
            if !self.half_edges.contains_key(edge.half_edge) {
                return Err(VoronoiValidationError::DanglingReference {
                    referent: "half-edge",
                    description: format!("edge {key:?}"),
                });
            }
            if edge.site_a >= self.sites.len() || edge.site_b >= self.sites.len() {
                return Err(VoronoiValidationError::DanglingReference {
                    referent: "site",
                    description: format!("edge {key:?}"),
                });
            }
        }

        for (key, half) in &self.half_edges {
            match self.half_edges.get(half.twin) {
                Some(twin) if twin.twin == key => {}
                _ => return Err(VoronoiValidationError::TwinMismatch { half_edge: key }),
            }
            if !self.faces.contains_key(half.face) {
                return Err(VoronoiValidationError::DanglingReference {
                    referent: "face",
                    description: format!("half-edge {key:?}"),
                });
            }
            if let Some(origin) = half.origin
                && !self.vertices.contains_key(origin)
            {
                return Err(VoronoiValidationError::DanglingReference {
                    referent: "vertex",
                    description: format!("half-edge {key:?}"),
                });
            }
        }

        for (key, face) in &self.faces {
            if let Some(outer) = face.outer_component
                && !self.half_edges.contains_key(outer)
            {
                return Err(VoronoiValidationError::DanglingReference {
                    referent: "half-edge",
                    description: format!("face {key:?}"),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
