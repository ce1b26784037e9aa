use std::cell::Cell;

use crate::net::tx::{
    SlotStatus,
    TxSlot,
};
use crate::sim::{
    Event,
    Trace,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Done,
    Error,
}

/// A transmit slot backed by a heap buffer.
///
/// Committed frames complete immediately and are recorded in the trace.
#[derive(Debug)]
pub struct SimSlot {
    buffer: Vec<u8>,
    state: State,
    busy_polls: Cell<usize>,
    trace: Trace,
}

impl SimSlot {
    /// Creates an idle slot of buffer_len bytes.
    pub fn new(buffer_len: usize, trace: Trace) -> SimSlot {
        SimSlot {
            buffer: vec![0; buffer_len],
            state: State::Idle,
            busy_polls: Cell::new(0),
            trace,
        }
    }

    /// Makes the next n status polls report the slot as busy.
    pub fn with_busy_polls(self, n: usize) -> SimSlot {
        self.busy_polls.set(n);
        self
    }

    /// Returns the number of busy polls left.
    pub fn busy_polls(&self) -> usize {
        self.busy_polls.get()
    }
}

impl TxSlot for SimSlot {
    fn status(&self) -> SlotStatus {
        let busy_polls = self.busy_polls.get();
        if busy_polls > 0 {
            self.busy_polls.set(busy_polls - 1);
            return SlotStatus::default();
        }

        SlotStatus {
            idle: self.state == State::Idle,
            done: self.state == State::Done,
            error: self.state == State::Error,
        }
    }

    fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    fn commit(&mut self, port: u8, len: usize) {
        self.trace.push(Event::Commit {
            port,
            frame: self.buffer[.. len].to_vec(),
        });
        self.state = if self.trace.take_fault() {
            State::Error
        } else {
            State::Done
        };
    }

    fn clear(&mut self) {
        self.trace.push(Event::Clear);
        self.state = State::Idle;
    }
}
