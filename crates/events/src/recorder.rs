//! Pending-event buffer owned by an aggregate.

use crate::event::Event;

/// Append-only buffer of events recorded by successful operations.
///
/// - No IO
/// - Events stay queued until the owner drains them
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecorder<E> {
    pending: Vec<E>,
}

impl<E> Default for EventRecorder<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<E: Event> EventRecorder<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: E) {
        self.pending.push(event);
    }

    pub fn pending(&self) -> &[E] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending event, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<E> {
        core::mem::take(&mut self.pending)
    }
}
