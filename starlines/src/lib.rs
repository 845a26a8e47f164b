//! # Starlines
//!
//! A constellation is a pattern people agree they can see in the stars. Starlines lets you drag a line across a grid of stars and tells you when the shape you traced is one of them.
//!
//! The crate is split the way a game engine splits its operational logics: [tracker] turns pointer input into an ordered trace of grid cells, [matcher] decides whether that trace is one of the shapes in a [library::PatternLibrary], and [session::Session] wires them together for whatever is drawing the stars.

pub mod error;
pub mod grid;
pub mod library;
pub mod matcher;
pub mod point;
pub mod session;
pub mod tracker;

pub use error::LibraryError;
pub use grid::GridLayout;
pub use library::{Pattern, PatternLibrary};
pub use point::Point;
pub use session::{Session, SessionEvent};
pub use tracker::{TraceEvent, TraceEventType, TraceReaction, TraceState, TraceTracker};

/// A piece of game logic that can be poked with reactions and reports events back.
pub trait Logic {
    type Event: Event;
    type Reaction: Reaction;

    /// Applies a reaction. Returns the event it caused, if it changed anything.
    fn handle_predicate(&mut self, reaction: &Self::Reaction) -> Option<Self::Event>;

    /// If the given event is the one the logic produced most recently.
    fn check_predicate(&self, event: &Self::Event) -> bool;
}

pub trait EventType {}

pub trait Event {
    type EventType: EventType;
    fn get_type(&self) -> &Self::EventType;
}

pub trait Reaction {}
