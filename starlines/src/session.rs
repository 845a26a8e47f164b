//! # Sessions
//!
//! A [Session] is one game: the grid, the library, the trace being drawn, what it matches, and which pattern the player asked to see as a guide. Whatever draws the game feeds it pointer coordinates and commands, and reads its state back after every call.
//!
//! Building a session checks that the layout is usable and that every pattern fits on the grid. Nothing a session does can fail after that. Pointer positions and cells that aren't on a star are just ignored.

use log::info;
use macroquad::math::vec2;

use crate::error::LibraryError;
use crate::grid::GridLayout;
use crate::library::{Pattern, PatternLibrary};
use crate::matcher;
use crate::point::Point;
use crate::tracker::{TraceReaction, TraceTracker};
use crate::Logic;

/// Things the presentation layer might want to announce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The trace matched a pattern.
    Discovered { name: String, description: String },
}

#[derive(Debug)]
pub struct Session {
    layout: GridLayout,
    library: PatternLibrary,
    tracker: TraceTracker,
    /// name of the matched pattern
    matched: Option<String>,
    /// index into `library` of the pattern picked for the overlay
    selected: Option<usize>,
    overlay_active: bool,
    events: Vec<SessionEvent>,
}

impl Default for Session {
    /// The 8×8 grid with the built-in constellations, which always fit it.
    fn default() -> Self {
        Self::assemble(GridLayout::default(), PatternLibrary::default())
    }
}

impl Session {
    /// Starts a game on `layout`, refusing layouts that can't tell stars apart and patterns with a star off the grid.
    pub fn new(layout: GridLayout, library: PatternLibrary) -> Result<Self, LibraryError> {
        layout.validate()?;
        for pattern in library.iter() {
            if let Some(point) = pattern.points().iter().find(|p| !layout.contains(**p)) {
                return Err(LibraryError::OffGrid {
                    pattern: pattern.name().to_owned(),
                    point: *point,
                });
            }
        }
        Ok(Self::assemble(layout, library))
    }

    fn assemble(layout: GridLayout, library: PatternLibrary) -> Self {
        let selected = if library.is_empty() { None } else { Some(0) };
        Self {
            layout,
            library,
            tracker: TraceTracker::new(),
            matched: None,
            selected,
            overlay_active: false,
            events: Vec::new(),
        }
    }

    /// Pointer pressed at `(x, y)`. Starts a new trace if that's on a star.
    pub fn begin_trace(&mut self, x: f32, y: f32) -> bool {
        let point = self.layout.resolve_point(vec2(x, y));
        self.begin_trace_at(point)
    }

    /// Pointer dragged to `(x, y)`. Adds the star there to the trace, if there is one and it's new.
    pub fn continue_trace(&mut self, x: f32, y: f32) -> bool {
        let point = self.layout.resolve_point(vec2(x, y));
        self.continue_trace_at(point)
    }

    /// Like [Session::begin_trace] with the cell already resolved. Cells off the grid count as empty space.
    pub fn begin_trace_at(&mut self, point: Option<Point>) -> bool {
        let point = self.on_grid(point);
        self.react(TraceReaction::Begin(point))
    }

    pub fn continue_trace_at(&mut self, point: Option<Point>) -> bool {
        let point = self.on_grid(point);
        self.react(TraceReaction::Continue(point))
    }

    fn on_grid(&self, point: Option<Point>) -> Option<Point> {
        point.filter(|p| self.layout.contains(*p))
    }

    /// Pointer released, or left the grid.
    pub fn end_trace(&mut self) {
        self.react(TraceReaction::End);
    }

    /// Forgets the trace and whatever it matched.
    pub fn reset(&mut self) {
        self.react(TraceReaction::Reset);
    }

    /// Forwards a reaction to the tracker and keeps the match in step with the trace. Returns if the trace grew.
    fn react(&mut self, reaction: TraceReaction) -> bool {
        let event = match self.tracker.handle_predicate(&reaction) {
            Some(event) => event,
            None => return false,
        };
        if let TraceReaction::Begin(_) | TraceReaction::Reset = reaction {
            self.matched = None;
        }
        if event.grew() {
            self.evaluate();
        }
        event.grew()
    }

    fn evaluate(&mut self) {
        match matcher::evaluate(self.tracker.points(), &self.library) {
            Some(pattern) => {
                info!("constellation discovered: {}", pattern.name());
                self.events.push(SessionEvent::Discovered {
                    name: pattern.name().to_owned(),
                    description: pattern.description().to_owned(),
                });
                self.matched = Some(pattern.name().to_owned());
            }
            None => self.matched = None,
        }
    }

    /// Picks the pattern shown by the overlay. Doesn't change what the trace can match.
    pub fn set_selected_pattern(&mut self, name: &str) -> Result<(), LibraryError> {
        match self.library.position(name) {
            Some(idx) => {
                self.selected = Some(idx);
                Ok(())
            }
            None => Err(LibraryError::UnknownPattern(name.to_owned())),
        }
    }

    /// Shows or hides the overlay, returning if it's now shown.
    pub fn toggle_overlay(&mut self) -> bool {
        self.overlay_active = !self.overlay_active;
        self.overlay_active
    }

    /// Takes the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn trace(&self) -> &[Point] {
        self.tracker.points()
    }

    pub fn is_connected(&self, point: Point) -> bool {
        self.tracker.contains(point)
    }

    pub fn is_tracing(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn tracker(&self) -> &TraceTracker {
        &self.tracker
    }

    pub fn matched(&self) -> Option<&Pattern> {
        self.matched
            .as_deref()
            .and_then(|name| self.library.get(name))
    }

    pub fn matched_name(&self) -> Option<&str> {
        self.matched.as_deref()
    }

    pub fn selected_pattern(&self) -> Option<&Pattern> {
        self.selected.map(|idx| &self.library[idx])
    }

    /// The pattern to draw as a guide, if the overlay is on.
    pub fn overlay(&self) -> Option<&Pattern> {
        if self.overlay_active {
            self.selected_pattern()
        } else {
            None
        }
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay_active
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }
}
