//! The beachline status structure.
//!
//! An ordered chain of parabolic arcs, one per visible stretch of a
//! site's parabola, kept as a doubly-linked list inside a slotmap arena.
//! The intrusive `prev`/`next` pointers are arena keys, so splicing an
//! arc in or out is O(1) and a removed arc's key simply stops resolving —
//! which doubles as the staleness check for circle events that still
//! reference it.
//!
//! The chain is strictly linear and acyclic; no arc appears twice, though
//! several arcs may share the same generating site after splits.

use crate::core::collections::SiteIndex;
use crate::core::diagram::EdgeKey;
use crate::core::event::CircleEventKey;
use crate::geometry::point::Point;
use crate::geometry::predicates::breakpoint_x;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Key into the beachline's arc arena.
    pub struct ArcKey;
}

// =============================================================================
// ARCS
// =============================================================================

/// One parabolic arc of the beachline.
#[derive(Clone, Copy, Debug)]
pub struct Arc {
    /// Index of the generating site; the arc belongs to that site's face.
    pub site: SiteIndex,
    /// Left neighbor in the chain.
    pub prev: Option<ArcKey>,
    /// Right neighbor in the chain.
    pub next: Option<ArcKey>,
    /// Edge traced by the breakpoint between this arc and `next`.
    pub edge: Option<EdgeKey>,
    /// Circle event currently scheduled for this arc's collapse.
    pub circle_event: Option<CircleEventKey>,
}

impl Arc {
    const fn new(site: SiteIndex) -> Self {
        Self {
            site,
            prev: None,
            next: None,
            edge: None,
            circle_event: None,
        }
    }
}

// =============================================================================
// BEACHLINE
// =============================================================================

/// Ordered sequence of arcs under the sweep line.
///
/// Supports the three operations the sweep needs: locate the arc above an
/// x-position, split an arc around a new site, and splice out a collapsed
/// arc. Location is a linear walk over breakpoints from the left end; a
/// balanced tree could be substituted without changing the interface.
#[derive(Debug, Default)]
pub struct Beachline {
    arcs: SlotMap<ArcKey, Arc>,
    head: Option<ArcKey>,
}

impl Beachline {
    /// Creates an empty beachline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the beachline has no arcs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of live arcs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Leftmost arc, if any.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<ArcKey> {
        self.head
    }

    /// Looks up an arc; `None` for an already-removed key.
    #[inline]
    #[must_use]
    pub fn arc(&self, key: ArcKey) -> Option<&Arc> {
        self.arcs.get(key)
    }

    /// Mutable arc lookup.
    #[inline]
    pub fn arc_mut(&mut self, key: ArcKey) -> Option<&mut Arc> {
        self.arcs.get_mut(key)
    }

    /// Drops every arc and resets the chain.
    pub fn clear(&mut self) {
        self.arcs.clear();
        self.head = None;
    }

    /// Seeds the beachline with the very first arc.
    pub fn init_first(&mut self, site: SiteIndex) -> ArcKey {
        debug_assert!(self.is_empty(), "beachline already seeded");
        let key = self.arcs.insert(Arc::new(site));
        self.head = Some(key);
        key
    }

    /// Finds the arc vertically above `x` for the sweep line at `sweep_y`.
    ///
    /// Walks the chain from the left end, advancing while the breakpoint
    /// between the current arc and its successor lies strictly left of
    /// `x`; stops at the arc whose breakpoint lies at or past `x`, or at
    /// the last arc. Returns `None` only for an empty beachline.
    ///
    /// `sites` maps each arc's [`Arc::site`] index to its position.
    #[must_use]
    pub fn locate_arc_above(&self, x: f64, sweep_y: f64, sites: &[Point]) -> Option<ArcKey> {
        let mut current = self.head?;
        loop {
            let arc = &self.arcs[current];
            let Some(next) = arc.next else {
                return Some(current);
            };
            let breakpoint =
                breakpoint_x(sites[arc.site], sites[self.arcs[next].site], sweep_y);
            if breakpoint < x {
                current = next;
            } else {
                return Some(current);
            }
        }
    }

    /// Splits the arc `at` around a new site, producing the chain
    /// `at, new, duplicate` where `duplicate` copies `at`'s site.
    ///
    /// The duplicate inherits `at`'s outgoing edge (its breakpoint with
    /// the old right neighbor is unchanged); the caller re-points `at`'s
    /// and the new arc's edges at the freshly created bisector. Returns
    /// `(new, duplicate)`.
    pub fn split(&mut self, at: ArcKey, new_site: SiteIndex) -> (ArcKey, ArcKey) {
        let (site, old_next, old_edge) = {
            let arc = &self.arcs[at];
            (arc.site, arc.next, arc.edge)
        };

        let new_arc = self.arcs.insert(Arc::new(new_site));
        let duplicate = self.arcs.insert(Arc {
            edge: old_edge,
            ..Arc::new(site)
        });

        self.arcs[duplicate].prev = Some(new_arc);
        self.arcs[duplicate].next = old_next;
        if let Some(next) = old_next {
            self.arcs[next].prev = Some(duplicate);
        }
        self.arcs[new_arc].prev = Some(at);
        self.arcs[new_arc].next = Some(duplicate);
        self.arcs[at].next = Some(new_arc);

        (new_arc, duplicate)
    }

    /// Inserts a single new arc immediately to the right of `at`.
    ///
    /// Used instead of [`Beachline::split`] when the located arc's site
    /// lies on the sweep line: its parabola is a vertical ray, so there
    /// is nothing to duplicate on the far side of the new site.
    pub fn insert_after(&mut self, at: ArcKey, new_site: SiteIndex) -> ArcKey {
        let old_next = self.arcs[at].next;
        let new_arc = self.arcs.insert(Arc::new(new_site));
        self.arcs[new_arc].prev = Some(at);
        self.arcs[new_arc].next = old_next;
        if let Some(next) = old_next {
            self.arcs[next].prev = Some(new_arc);
        }
        self.arcs[at].next = Some(new_arc);
        new_arc
    }

    /// Inserts a single new arc immediately to the left of `at`.
    ///
    /// The mirror of [`Beachline::insert_after`], for a new site left of
    /// a located arc whose site lies on the sweep line. Updates the head
    /// when `at` was the leftmost arc.
    pub fn insert_before(&mut self, at: ArcKey, new_site: SiteIndex) -> ArcKey {
        let old_prev = self.arcs[at].prev;
        let new_arc = self.arcs.insert(Arc::new(new_site));
        self.arcs[new_arc].prev = old_prev;
        self.arcs[new_arc].next = Some(at);
        if let Some(prev) = old_prev {
            self.arcs[prev].next = Some(new_arc);
        }
        self.arcs[at].prev = Some(new_arc);
        if self.head == Some(at) {
            self.head = Some(new_arc);
        }
        new_arc
    }

    /// Splices an arc out of the chain and drops it.
    ///
    /// Returns the former `(prev, next)` neighbors, now linked to each
    /// other.
    pub fn remove(&mut self, key: ArcKey) -> (Option<ArcKey>, Option<ArcKey>) {
        let Some(arc) = self.arcs.remove(key) else {
            return (None, None);
        };
        if let Some(prev) = arc.prev {
            self.arcs[prev].next = arc.next;
        }
        if let Some(next) = arc.next {
            self.arcs[next].prev = arc.prev;
        }
        if self.head == Some(key) {
            self.head = arc.next;
        }
        (arc.prev, arc.next)
    }

    /// Whether any live arc's outgoing edge is `edge`.
    ///
    /// Split-born edges are shared by two breakpoints, so severing one
    /// breakpoint does not necessarily orphan the edge.
    #[must_use]
    pub fn references_edge(&self, edge: EdgeKey) -> bool {
        self.arcs.values().any(|arc| arc.edge == Some(edge))
    }

    /// Site indices of the arcs from left to right.
    pub fn sites_left_to_right(&self) -> Vec<SiteIndex> {
        let mut sites = Vec::with_capacity(self.arcs.len());
        let mut current = self.head;
        while let Some(key) = current {
            let arc = &self.arcs[key];
            sites.push(arc.site);
            current = arc.next;
        }
        sites
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_arc_seeds_the_chain() {
        let mut beachline = Beachline::new();
        assert!(beachline.is_empty());

        let key = beachline.init_first(0);
        assert!(!beachline.is_empty());
        assert_eq!(beachline.head(), Some(key));
        assert_eq!(beachline.len(), 1);
        assert_eq!(beachline.sites_left_to_right(), vec![0]);

        let arc = beachline.arc(key).unwrap();
        assert!(arc.prev.is_none());
        assert!(arc.next.is_none());
    }

    #[test]
    fn split_produces_three_way_chain() {
        let mut beachline = Beachline::new();
        let first = beachline.init_first(0);
        let (new_arc, duplicate) = beachline.split(first, 1);

        assert_eq!(beachline.sites_left_to_right(), vec![0, 1, 0]);
        assert_eq!(beachline.arc(first).unwrap().next, Some(new_arc));
        assert_eq!(beachline.arc(new_arc).unwrap().prev, Some(first));
        assert_eq!(beachline.arc(new_arc).unwrap().next, Some(duplicate));
        assert_eq!(beachline.arc(duplicate).unwrap().prev, Some(new_arc));
        assert!(beachline.arc(duplicate).unwrap().next.is_none());
    }

    #[test]
    fn split_keeps_outer_links_and_edge() {
        let mut beachline = Beachline::new();
        let first = beachline.init_first(0);
        let (_, right) = beachline.split(first, 1);
        let edge = EdgeKey::default();
        beachline.arc_mut(right).unwrap().edge = Some(edge);

        // Splitting the rightmost arc: its duplicate inherits the edge to
        // the (absent) right neighbor.
        let (new_arc, duplicate) = beachline.split(right, 2);
        assert_eq!(beachline.sites_left_to_right(), vec![0, 1, 0, 2, 0]);
        assert_eq!(beachline.arc(duplicate).unwrap().edge, Some(edge));
        assert!(beachline.arc(new_arc).unwrap().edge.is_none());
    }

    #[test]
    fn insert_after_adds_one_arc() {
        let mut beachline = Beachline::new();
        let first = beachline.init_first(0);
        let second = beachline.insert_after(first, 1);
        let middle = beachline.insert_after(first, 2);

        assert_eq!(beachline.sites_left_to_right(), vec![0, 2, 1]);
        assert_eq!(beachline.arc(middle).unwrap().prev, Some(first));
        assert_eq!(beachline.arc(middle).unwrap().next, Some(second));
        assert_eq!(beachline.arc(second).unwrap().prev, Some(middle));
    }

    #[test]
    fn insert_before_head_moves_head() {
        let mut beachline = Beachline::new();
        let first = beachline.init_first(0);
        let new_head = beachline.insert_before(first, 1);

        assert_eq!(beachline.sites_left_to_right(), vec![1, 0]);
        assert_eq!(beachline.head(), Some(new_head));
        assert!(beachline.arc(new_head).unwrap().prev.is_none());
        assert_eq!(beachline.arc(new_head).unwrap().next, Some(first));
        assert_eq!(beachline.arc(first).unwrap().prev, Some(new_head));

        let middle = beachline.insert_before(first, 2);
        assert_eq!(beachline.sites_left_to_right(), vec![1, 2, 0]);
        assert_eq!(beachline.head(), Some(new_head));
        assert_eq!(beachline.arc(middle).unwrap().prev, Some(new_head));
    }

    #[test]
    fn remove_relinks_neighbors() {
        let mut beachline = Beachline::new();
        let first = beachline.init_first(0);
        let (new_arc, duplicate) = beachline.split(first, 1);

        let (prev, next) = beachline.remove(new_arc);
        assert_eq!((prev, next), (Some(first), Some(duplicate)));
        assert_eq!(beachline.sites_left_to_right(), vec![0, 0]);
        assert_eq!(beachline.arc(first).unwrap().next, Some(duplicate));
        assert_eq!(beachline.arc(duplicate).unwrap().prev, Some(first));

        // The removed key no longer resolves; that is the staleness check.
        assert!(beachline.arc(new_arc).is_none());
        assert_eq!(beachline.remove(new_arc), (None, None));
    }

    #[test]
    fn remove_head_advances_head() {
        let mut beachline = Beachline::new();
        let first = beachline.init_first(0);
        let second = beachline.insert_after(first, 1);

        beachline.remove(first);
        assert_eq!(beachline.head(), Some(second));
        assert!(beachline.arc(second).unwrap().prev.is_none());
    }

    #[test]
    fn locate_walks_breakpoints() {
        // Two sites at equal height: single breakpoint at their midpoint.
        let sites = vec![Point::new(100.0, 300.0), Point::new(300.0, 300.0)];
        let mut beachline = Beachline::new();
        let left = beachline.init_first(0);
        let right = beachline.insert_after(left, 1);

        assert_eq!(beachline.locate_arc_above(50.0, 100.0, &sites), Some(left));
        assert_eq!(beachline.locate_arc_above(350.0, 100.0, &sites), Some(right));
        // Breakpoint exactly at x stops on the left arc.
        assert_eq!(beachline.locate_arc_above(200.0, 100.0, &sites), Some(left));
        assert_eq!(beachline.locate_arc_above(201.0, 100.0, &sites), Some(right));
    }

    #[test]
    fn locate_on_empty_beachline_is_none() {
        let beachline = Beachline::new();
        assert!(beachline.locate_arc_above(0.0, 0.0, &[]).is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut beachline = Beachline::new();
        let first = beachline.init_first(0);
        beachline.split(first, 1);

        beachline.clear();
        assert!(beachline.is_empty());
        assert_eq!(beachline.len(), 0);
        assert!(beachline.arc(first).is_none());
    }
}
