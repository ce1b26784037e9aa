//! Access to the hardware transmit path.
//!
//! Control frames are written into a single buffer pool slot which is shared
//! with a streaming datapath. Every wait in here is an unbounded poll, the
//! hardware is trusted to make progress.

use std::hint;

use crate::{
    Error,
    Result,
};

/// Status flags of a buffer pool slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotStatus {
    /// The slot holds no frame and may be written.
    pub idle: bool,
    /// The committed frame left the slot.
    pub done: bool,
    /// The hardware gave up on the committed frame.
    pub error: bool,
}

/// How a committed transmission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Done,
    Error,
}

/// A buffer pool slot reserved for transmitting control frames.
///
/// Implementations only need to expose the status flags and slot memory; the
/// blocking waits poll `status()` unless overridden.
pub trait TxSlot {
    /// Returns the current status flags of the slot.
    fn status(&self) -> SlotStatus;

    /// Returns the slot memory.
    fn buffer_mut(&mut self) -> &mut [u8];

    /// Hands the first `len` bytes of the slot to the hardware for
    /// transmission through a buffer pool output port.
    fn commit(&mut self, port: u8, len: usize);

    /// Releases the slot after a transmission.
    fn clear(&mut self);

    /// Blocks until the slot is idle.
    fn await_idle(&mut self) {
        while !self.status().idle {
            hint::spin_loop();
        }
    }

    /// Blocks until the committed frame is done or failed.
    fn await_completion(&mut self) -> Completion {
        loop {
            let status = self.status();
            if status.error {
                return Completion::Error;
            } else if status.done {
                return Completion::Done;
            }
            hint::spin_loop();
        }
    }
}

/// The streaming datapath sharing the physical transmitter.
pub trait StreamGate {
    /// Blocks until the streaming datapath leaves an opening for one frame.
    fn await_opening(&mut self);
}

/// A value stored on a 32 bit boundary, as the slot copy engine prefers.
#[repr(C, align(4))]
#[derive(Clone, Copy, Debug)]
pub struct Aligned<T>(pub T);

/// Sequential, bounds checked writer over slot memory.
#[derive(Debug)]
pub struct FrameWriter<'a> {
    buffer: &'a mut [u8],
    cursor: usize,
}

impl<'a> FrameWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> FrameWriter<'a> {
        FrameWriter { buffer, cursor: 0 }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Appends a fragment.
    ///
    /// Fragments should be 32 bit aligned in both address and length. A
    /// misaligned fragment is still copied, but a diagnostic is logged.
    pub fn write(&mut self, fragment: &[u8]) -> Result<()> {
        if fragment.is_empty() {
            return Ok(());
        }

        if fragment.len() % 4 != 0 || fragment.as_ptr() as usize % 4 != 0 {
            warn!(
                "Fragment of {} bytes at {:p} is not 32 bit aligned.",
                fragment.len(),
                fragment.as_ptr()
            );
        }

        let end = self.cursor + fragment.len();
        if end > self.buffer.len() {
            debug!(
                "Fragment of {} bytes overflows {} byte slot.",
                fragment.len(),
                self.buffer.len()
            );
            return Err(Error::Exhausted);
        }

        self.buffer[self.cursor .. end].copy_from_slice(fragment);
        self.cursor = end;
        Ok(())
    }

    /// Zero pads the written bytes to at least min_len and a multiple of 4,
    /// returning the resulting length.
    pub fn finish(self, min_len: usize) -> Result<usize> {
        let len = self.cursor.max(min_len);
        let len = (len + 3) & !3;

        if len > self.buffer.len() {
            return Err(Error::Exhausted);
        }

        for byte in self.buffer[self.cursor .. len].iter_mut() {
            *byte = 0;
        }

        Ok(len)
    }
}
