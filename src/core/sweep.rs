//! Fortune's sweep over the event queue.
//!
//! A single-use driver: seed one site event per input, then consume the
//! queue in sweep order. Site events split (or, degenerately, extend) the
//! beachline and lay down a new bisector edge; valid circle events
//! collapse an arc into a diagram vertex and close the converging edges.
//! Each mutation re-examines the affected arc triples for new circle
//! events, which feed back into the queue. When the queue drains, the
//! boundary clipper resolves whatever is still open.
//!
//! The run is strictly sequential: every event's effect on the beachline,
//! the queue, and the diagram is applied synchronously before the next
//! event is popped, because a circle event must never observe an arc that
//! a preceding event already spliced out. Independent sweeps over
//! different inputs share nothing and may run on separate threads.

use crate::core::beachline::{ArcKey, Beachline};
use crate::core::clip;
use crate::core::collections::SiteIndex;
use crate::core::diagram::Diagram;
use crate::core::event::{CircleEvent, CircleEventKey, Event, EventQueue};
use crate::geometry::bounds::BoundingBox;
use crate::geometry::point::Point;
use crate::geometry::predicates::{
    EPSILON, Orientation, circumcenter, distance, orientation, parabola_y,
};
use slotmap::SlotMap;

// =============================================================================
// SWEEP STATE
// =============================================================================

/// Phase of a diagram construction run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepState {
    /// No events seeded yet.
    #[default]
    Idle,
    /// Consuming the event queue.
    Running,
    /// Queue drained; resolving open edges against the bounding box.
    Clipping,
    /// The diagram is complete and read-only.
    Done,
}

// =============================================================================
// SWEEP DRIVER
// =============================================================================

/// Single-use Fortune sweep over one set of sites.
///
/// Owns every transient structure of the run — beachline, event queue,
/// circle-event arena — alongside the diagram under construction.
/// [`FortuneSweep::run`] consumes the driver and returns the finished
/// [`Diagram`]; the transients are dropped with the driver.
#[derive(Debug)]
pub struct FortuneSweep {
    diagram: Diagram,
    bounds: BoundingBox,
    beachline: Beachline,
    queue: EventQueue,
    circle_events: SlotMap<CircleEventKey, CircleEvent>,
    state: SweepState,
}

impl FortuneSweep {
    /// Prepares a sweep over `sites`, clipped to `bounds`.
    ///
    /// The caller is responsible for passing finite coordinates and a
    /// valid rectangle; [`crate::core::voronoi_diagram::VoronoiDiagram`]
    /// performs that validation.
    #[must_use]
    pub fn new(sites: Vec<Point>, bounds: BoundingBox) -> Self {
        let count = sites.len();
        Self {
            diagram: Diagram::new(sites),
            bounds,
            beachline: Beachline::new(),
            queue: EventQueue::with_capacity(2 * count),
            circle_events: SlotMap::with_key(),
            state: SweepState::Idle,
        }
    }

    /// Current phase of the run.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> SweepState {
        self.state
    }

    /// Runs the sweep to completion and returns the finished diagram.
    ///
    /// Empty input completes immediately with zero edges and vertices.
    #[must_use]
    pub fn run(mut self) -> Diagram {
        self.state = SweepState::Running;
        for site in 0..self.diagram.number_of_sites() {
            self.queue.push_site(site, self.diagram.site_point(site));
        }

        while let Some((sweep_y, event)) = self.queue.pop() {
            match event {
                Event::Site { site, point } => self.handle_site(site, point),
                Event::Circle(key) => self.handle_circle(key, sweep_y),
            }
        }

        self.state = SweepState::Clipping;
        // The frontier and any stale predictions have no meaning once the
        // queue drains; only the diagram survives.
        self.beachline.clear();
        self.circle_events.clear();
        clip::finalize(&mut self.diagram, &self.bounds);

        self.state = SweepState::Done;
        debug_assert!(self.diagram.validate().is_ok());
        self.diagram
    }

    // =========================================================================
    // SITE EVENTS
    // =========================================================================

    fn handle_site(&mut self, site: SiteIndex, point: Point) {
        if self.beachline.is_empty() {
            self.beachline.init_first(site);
            return;
        }

        let sweep_y = point.y;
        let Some(above) = self
            .beachline
            .locate_arc_above(point.x, sweep_y, self.diagram.sites())
        else {
            return;
        };

        // The located arc is about to change neighbors; its predicted
        // convergence no longer holds.
        self.invalidate_circle_event(above);

        let Some(located) = self.beachline.arc(above).copied() else {
            return;
        };
        let (above_site, old_edge) = (located.site, located.edge);
        let above_point = self.diagram.site_point(above_site);
        let anchor = Point::new(point.x, parabola_y(above_point, point.x, sweep_y));

        if (above_point.y - sweep_y).abs() < EPSILON {
            // The located arc's site sits on the sweep line, so its
            // parabola is a vertical ray with nothing to duplicate on
            // the far side of the new site: extend the chain with one
            // arc on the matching side instead. The left case arises
            // when the located site was queued a hair higher despite a
            // larger x.
            if point.x < above_point.x {
                let edge = self.diagram.add_split_edge(site, above_site, anchor);
                let prepended = self.beachline.insert_before(above, site);
                if let Some(arc) = self.beachline.arc_mut(prepended) {
                    arc.edge = Some(edge);
                }
                // The new arc also severs the old (prev | above)
                // breakpoint: prev now borders the new site along a
                // fresh bisector, and the severed pair's edge is
                // retired unless another breakpoint still traces it.
                if let Some(prev) = located.prev {
                    self.invalidate_circle_event(prev);
                    if let Some(prev_arc) = self.beachline.arc(prev).copied() {
                        let left = self.diagram.add_split_edge(prev_arc.site, site, anchor);
                        if let Some(arc) = self.beachline.arc_mut(prev) {
                            arc.edge = Some(left);
                        }
                        if let Some(stale) = prev_arc.edge
                            && !self.beachline.references_edge(stale)
                        {
                            self.diagram.remove_edge(stale);
                        }
                    }
                    self.detect_circle(prev, sweep_y);
                }
                self.detect_circle(prepended, sweep_y);
                self.detect_circle(above, sweep_y);
                return;
            }
            let edge = self.diagram.add_split_edge(above_site, site, anchor);
            let appended = self.beachline.insert_after(above, site);
            if let Some(arc) = self.beachline.arc_mut(above) {
                arc.edge = Some(edge);
            }
            // Mirror severing on the right: the appended arc borders the
            // old right neighbor now, not `above`.
            if let Some(next) = located.next {
                self.invalidate_circle_event(next);
                if let Some(next_site) = self.beachline.arc(next).map(|a| a.site) {
                    let right = self.diagram.add_split_edge(site, next_site, anchor);
                    if let Some(arc) = self.beachline.arc_mut(appended) {
                        arc.edge = Some(right);
                    }
                    if let Some(stale) = old_edge
                        && !self.beachline.references_edge(stale)
                    {
                        self.diagram.remove_edge(stale);
                    }
                }
                self.detect_circle(next, sweep_y);
            }
            self.detect_circle(above, sweep_y);
            self.detect_circle(appended, sweep_y);
        } else {
            let edge = self.diagram.add_split_edge(above_site, site, anchor);
            let (new_arc, duplicate) = self.beachline.split(above, site);
            // Both new breakpoints trace the same bisector; the
            // duplicate already inherited the old outgoing edge.
            if let Some(arc) = self.beachline.arc_mut(above) {
                arc.edge = Some(edge);
            }
            if let Some(arc) = self.beachline.arc_mut(new_arc) {
                arc.edge = Some(edge);
            }
            self.detect_circle(above, sweep_y);
            self.detect_circle(duplicate, sweep_y);
        }
    }

    // =========================================================================
    // CIRCLE EVENTS
    // =========================================================================

    fn handle_circle(&mut self, key: CircleEventKey, sweep_y: f64) {
        let Some(event) = self.circle_events.get(key).copied() else {
            return;
        };
        if !event.valid {
            return;
        }
        // A dead arc key is the other staleness signal.
        let Some(arc) = self.beachline.arc(event.arc).copied() else {
            return;
        };
        let (Some(prev), Some(next)) = (arc.prev, arc.next) else {
            return;
        };

        let prev_site = self.beachline.arc(prev).map(|a| a.site);
        let next_site = self.beachline.arc(next).map(|a| a.site);
        let (Some(prev_site), Some(next_site)) = (prev_site, next_site) else {
            return;
        };

        let vertex = self.diagram.add_vertex(event.vertex);

        // Both breakpoints flanking the vanishing arc converge here.
        if let Some(edge) = self.beachline.arc(prev).and_then(|a| a.edge) {
            self.diagram
                .resolve_edge_at(edge, vertex, (prev_site, arc.site));
        }
        if let Some(edge) = arc.edge {
            self.diagram
                .resolve_edge_at(edge, vertex, (arc.site, next_site));
        }

        // The now-adjacent neighbors start tracing a fresh bisector.
        let new_edge = self.diagram.add_circle_edge(prev_site, next_site, vertex);

        self.beachline.remove(event.arc);
        self.invalidate_circle_event(prev);
        self.invalidate_circle_event(next);
        if let Some(arc) = self.beachline.arc_mut(prev) {
            arc.edge = Some(new_edge);
        }

        self.detect_circle(prev, sweep_y);
        self.detect_circle(next, sweep_y);
    }

    /// Examines the triple centered on `middle` and schedules a circle
    /// event if the three arcs converge below the sweep line.
    fn detect_circle(&mut self, middle: ArcKey, sweep_y: f64) {
        let Some(arc) = self.beachline.arc(middle).copied() else {
            return;
        };
        debug_assert!(
            arc.circle_event.is_none(),
            "detection on an arc with a live prediction"
        );
        let (Some(prev), Some(next)) = (arc.prev, arc.next) else {
            return;
        };
        let (Some(prev_arc), Some(next_arc)) =
            (self.beachline.arc(prev), self.beachline.arc(next))
        else {
            return;
        };

        let a = self.diagram.site_point(prev_arc.site);
        let b = self.diagram.site_point(arc.site);
        let c = self.diagram.site_point(next_arc.site);

        // Only a clockwise triple shrinks the middle arc; collinear and
        // counter-clockwise triples diverge.
        if orientation(a, b, c) != Orientation::NEGATIVE {
            return;
        }
        let Some(center) = circumcenter(a, b, c) else {
            return;
        };

        // The event fires when the sweep reaches the circle's bottom;
        // a bottom exactly at the current sweep height still counts.
        let bottom = center.y - distance(center, b);
        if bottom > sweep_y {
            return;
        }

        let key = self.circle_events.insert(CircleEvent {
            vertex: center,
            arc: middle,
            valid: true,
        });
        if let Some(arc) = self.beachline.arc_mut(middle) {
            arc.circle_event = Some(key);
        }
        self.queue.push_circle(key, center.x, bottom);
    }

    /// Clears and invalidates the circle event scheduled on `arc`, if any.
    fn invalidate_circle_event(&mut self, arc: ArcKey) {
        if let Some(arc) = self.beachline.arc_mut(arc)
            && let Some(key) = arc.circle_event.take()
            && let Some(event) = self.circle_events.get_mut(key)
        {
            event.valid = false;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
