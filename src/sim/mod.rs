//! An in-memory stand-in for the buffer pool and streaming datapath.
//!
//! Both record what the stack does to them in a shared `Trace`, so the order
//! of openings, commits and clears can be checked without hardware.

mod slot;
mod stream;

pub use self::slot::SimSlot;
pub use self::stream::SimStream;

use std::cell::{
    Cell,
    RefCell,
};
use std::rc::Rc;

/// Something the stack did to the simulated hardware.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The streaming datapath granted an opening.
    Opening,
    /// A frame was committed to a buffer pool output port.
    Commit { port: u8, frame: Vec<u8> },
    /// The transmit slot was released.
    Clear,
}

/// A shared, append only log of events.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    events: Rc<RefCell<Vec<Event>>>,
    faults: Rc<Cell<usize>>,
}

impl Trace {
    pub fn new() -> Trace {
        Trace::default()
    }

    /// Returns a copy of every event recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns the frames committed so far, control word included.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::Commit { ref frame, .. } => Some(frame.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forgets every event recorded so far.
    pub fn reset(&self) {
        self.events.borrow_mut().clear();
    }

    /// Makes the next n commits complete with an error.
    pub fn fail_next(&self, n: usize) {
        self.faults.set(n);
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    fn take_fault(&self) -> bool {
        match self.faults.get() {
            0 => false,
            n => {
                self.faults.set(n - 1);
                true
            }
        }
    }
}
