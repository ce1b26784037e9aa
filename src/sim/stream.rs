use crate::net::tx::StreamGate;
use crate::sim::{
    Event,
    Trace,
};

/// A streaming datapath which always has an opening.
#[derive(Clone, Debug)]
pub struct SimStream {
    trace: Trace,
}

impl SimStream {
    pub fn new(trace: Trace) -> SimStream {
        SimStream { trace }
    }
}

impl StreamGate for SimStream {
    fn await_opening(&mut self) {
        self.trace.push(Event::Opening);
    }
}
