//! # Trace tracking
//!
//! The trace tracker communicates that a drag across the grid links stars together. It keeps the ordered list of stars connected so far and decides which pointer movements are allowed to extend it.
//!
//! It's a two state machine: [TraceState::Idle] until a press lands on a star, [TraceState::Active] while the drag goes on. Only an active trace grows, and it only ever grows by one star that isn't already in it.

use log::{debug, trace};

use crate::point::Point;
use crate::{Event, EventType, Logic, Reaction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceState {
    /// No drag in progress. The trace might be empty or might hold a finished drag.
    #[default]
    Idle,
    /// A drag is in progress and accepting new stars.
    Active,
}

/// Tracks the stars connected by the current (or most recent) drag.
#[derive(Debug, Default)]
pub struct TraceTracker {
    points: Vec<Point>,
    state: TraceState,
    last_event: Option<TraceEvent>,
}

impl TraceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new trace at `point`, throwing away whatever was traced before.
    ///
    /// Returns `false` (and does nothing) if the press didn't land on a star.
    pub fn begin_trace(&mut self, point: Option<Point>) -> bool {
        self.handle_predicate(&TraceReaction::Begin(point)).is_some()
    }

    /// Extends the trace with `point` if a drag is active and the star isn't already part of the trace.
    pub fn continue_trace(&mut self, point: Option<Point>) -> bool {
        self.handle_predicate(&TraceReaction::Continue(point)).is_some()
    }

    /// Finishes the drag. The trace stays as it is.
    pub fn end_trace(&mut self) -> bool {
        self.handle_predicate(&TraceReaction::End).is_some()
    }

    /// Clears the trace and stops any drag.
    pub fn reset(&mut self) {
        self.handle_predicate(&TraceReaction::Reset);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TraceState::Active
    }

    fn begin(&mut self, point: Point) -> TraceEvent {
        self.points.clear();
        self.points.push(point);
        self.state = TraceState::Active;
        debug!("trace started at {}", point);
        TraceEvent::new(Some(point), TraceEventType::Started)
    }

    fn extend(&mut self, point: Point) -> Option<TraceEvent> {
        if self.state != TraceState::Active || self.points.contains(&point) {
            return None;
        }
        self.points.push(point);
        trace!("trace extended to {} ({} stars)", point, self.points.len());
        Some(TraceEvent::new(Some(point), TraceEventType::Extended))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceReaction {
    /// Pointer pressed, over the given star (or over nothing).
    Begin(Option<Point>),
    /// Pointer moved, over the given star (or over nothing).
    Continue(Option<Point>),
    /// Pointer released or left the grid.
    End,
    Reset,
}

impl Reaction for TraceReaction {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// The star the trace started at or was extended with.
    pub point: Option<Point>,
    event_type: TraceEventType,
}

impl TraceEvent {
    pub fn new(point: Option<Point>, event_type: TraceEventType) -> Self {
        Self { point, event_type }
    }

    /// If this event added a star to the trace.
    pub fn grew(&self) -> bool {
        matches!(
            self.event_type,
            TraceEventType::Started | TraceEventType::Extended
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEventType {
    Started,
    Extended,
    Ended,
    Cleared,
}

impl EventType for TraceEventType {}

impl Event for TraceEvent {
    type EventType = TraceEventType;
    fn get_type(&self) -> &Self::EventType {
        &self.event_type
    }
}

impl Logic for TraceTracker {
    type Event = TraceEvent;
    type Reaction = TraceReaction;

    fn handle_predicate(&mut self, reaction: &Self::Reaction) -> Option<Self::Event> {
        let event = match *reaction {
            TraceReaction::Begin(Some(point)) => Some(self.begin(point)),
            TraceReaction::Continue(Some(point)) => self.extend(point),
            TraceReaction::Begin(None) | TraceReaction::Continue(None) => None,
            TraceReaction::End => {
                if self.state == TraceState::Active {
                    self.state = TraceState::Idle;
                    debug!("trace ended with {} stars", self.points.len());
                    Some(TraceEvent::new(None, TraceEventType::Ended))
                } else {
                    None
                }
            }
            TraceReaction::Reset => {
                self.points.clear();
                self.state = TraceState::Idle;
                debug!("trace cleared");
                Some(TraceEvent::new(None, TraceEventType::Cleared))
            }
        };
        if event.is_some() {
            self.last_event = event;
        }
        event
    }

    fn check_predicate(&self, event: &Self::Event) -> bool {
        self.last_event.as_ref() == Some(event)
    }
}
