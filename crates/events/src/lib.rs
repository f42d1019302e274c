//! Domain events.
//!
//! Allocation operations record facts about what happened; publishing them to a
//! broker is the host's concern.

pub mod event;
pub mod recorder;

pub use event::Event;
pub use recorder::EventRecorder;
