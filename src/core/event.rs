//! Event queue driving the sweep.
//!
//! Events are consumed in sweep order: decreasing y first, ties broken by
//! increasing x, with insertion order as the final tie-break so that
//! degenerate equal-height inputs are still processed deterministically.
//! Circle events are never removed from the queue once pushed; a [`valid`]
//! flag on the arena record is cleared instead, and checked when the event
//! is popped.
//!
//! [`valid`]: CircleEvent::valid

use crate::core::beachline::ArcKey;
use crate::core::collections::SiteIndex;
use crate::geometry::point::Point;
use ordered_float::OrderedFloat;
use slotmap::new_key_type;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

// =============================================================================
// CIRCLE EVENTS
// =============================================================================

new_key_type! {
    /// Key into the sweep's circle-event arena.
    pub struct CircleEventKey;
}

/// A speculative beachline shrink event.
///
/// Predicts that `arc` vanishes when the sweep reaches the bottom of the
/// circumcircle through the arc's site and its two neighbors. The queue
/// entry carries only the key; the prediction itself lives in the arena so
/// invalidation is a flag write rather than a heap removal.
#[derive(Clone, Copy, Debug)]
pub struct CircleEvent {
    /// Circumcenter the three arcs converge on; becomes a diagram vertex
    /// if the event is still valid at dequeue.
    pub vertex: Point,
    /// The arc whose disappearance this event predicts.
    pub arc: ArcKey,
    /// Cleared when the beachline topology changes under the prediction.
    pub valid: bool,
}

// =============================================================================
// EVENTS
// =============================================================================

/// A dequeued event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The sweep line reached a new input site.
    Site {
        /// Index of the site in input order.
        site: SiteIndex,
        /// The site's position.
        point: Point,
    },
    /// Three consecutive arcs may have converged; the arena record decides
    /// whether the prediction is still valid.
    Circle(CircleEventKey),
}

#[derive(Clone, Copy, Debug)]
struct QueuedEvent {
    y: OrderedFloat<f64>,
    x: OrderedFloat<f64>,
    seq: u64,
    event: Event,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the maximum, so "greater" means dequeued
        // earlier: higher y, then smaller x, then earlier insertion.
        self.y
            .cmp(&other.y)
            .then_with(|| other.x.cmp(&self.x))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// =============================================================================
// EVENT QUEUE
// =============================================================================

/// Priority queue of pending site and circle events in sweep order.
///
/// Supports only `push` and `pop`; there is no removal by key. Stale
/// circle events are filtered by the caller via [`CircleEvent::valid`].
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<QueuedEvent>,
    seq: u64,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    /// Enqueues a site event at the site's own position.
    pub fn push_site(&mut self, site: SiteIndex, point: Point) {
        self.push(point.x, point.y, Event::Site { site, point });
    }

    /// Enqueues a circle event at the circumcircle's bottom tangent point.
    pub fn push_circle(&mut self, key: CircleEventKey, x: f64, bottom_y: f64) {
        self.push(x, bottom_y, Event::Circle(key));
    }

    fn push(&mut self, x: f64, y: f64, event: Event) {
        self.heap.push(QueuedEvent {
            y: OrderedFloat(y),
            x: OrderedFloat(x),
            seq: self.seq,
            event,
        });
        self.seq += 1;
    }

    /// Pops the next event in sweep order, together with the sweep-line
    /// position it occurs at.
    pub fn pop(&mut self) -> Option<(f64, Event)> {
        self.heap.pop().map(|queued| (queued.y.into_inner(), queued.event))
    }

    /// Whether any events remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending events, stale circle events included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
