//! Outbound events for a presentation layer.
//!
//! ## Key Types
//!
//! - `MatchEvent`: phase changes, executed registers, moves, damage,
//!   respawns, checkpoints, game over and free-form notices
//! - `EventSink`: anything that accepts events
//! - `EventLog`: the buffered sink a match drains

pub mod event;
pub mod sink;

pub use event::{MatchEvent, MoveCause};
pub use sink::{EventLog, EventSink};
