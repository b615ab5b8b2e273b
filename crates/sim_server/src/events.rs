use crate::types::{EventCursor, ServerEvent};
use sim_core::Tick;
use std::collections::VecDeque;

/// Bounded event log with cursor-based retrieval.
///
/// Old events are dropped once capacity is exceeded; a cursor pointing at a
/// dropped range resumes from the oldest event still held.
pub struct EventBuffer<E> {
    buffer: VecDeque<ServerEvent<E>>,
    capacity: usize,
    next_sequence: u64,
}

impl<E: Clone> EventBuffer<E> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, tick: Tick, event: E) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(ServerEvent {
            sequence,
            tick,
            event,
        });
    }

    /// Events at or after the cursor, plus a cursor past the last returned
    /// event.
    pub fn get_from(&self, cursor: EventCursor) -> (Vec<ServerEvent<E>>, EventCursor) {
        let oldest = self.next_sequence - self.buffer.len() as u64;
        let start = cursor.0.max(oldest);

        let events = self
            .buffer
            .iter()
            .skip((start - oldest) as usize)
            .cloned()
            .collect();

        (events, EventCursor(self.next_sequence))
    }

    pub fn current_sequence(&self) -> u64 {
        self.next_sequence
    }
}
