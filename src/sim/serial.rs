//! Serial output reassembly.
//!
//! The board drives a serial line by writing the line level, one bit per
//! store, to a fixed address. This sink watches those levels and rebuilds
//! bytes from the 8N1 framing: a low start bit, eight data bits least
//! significant first, and a high stop bit. A frame whose stop bit is low is
//! dropped and counted as a framing error.

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum FrameState {
    /// Line idle; waiting for a low start bit.
    WaitStart,
    /// Collecting data bits.
    Data { value: u8, count: u8 },
    /// Waiting for the high stop bit.
    WaitStop { value: u8 },
}

/// Byte reassembler for a bit-banged serial line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialSink {
    state: FrameState,
    bytes: Vec<u8>,
    framing_errors: u32,
}

impl SerialSink {
    pub fn new() -> Self {
        Self {
            state: FrameState::WaitStart,
            bytes: Vec::new(),
            framing_errors: 0,
        }
    }

    /// Feed one sampled line level.
    pub fn push(&mut self, bit: bool) {
        self.state = match self.state {
            FrameState::WaitStart => {
                if bit {
                    FrameState::WaitStart
                } else {
                    FrameState::Data { value: 0, count: 0 }
                }
            }
            FrameState::Data { value, count } => {
                let value = value | ((bit as u8) << count);
                if count == 7 {
                    FrameState::WaitStop { value }
                } else {
                    FrameState::Data { value, count: count + 1 }
                }
            }
            FrameState::WaitStop { value } => {
                if bit {
                    self.bytes.push(value);
                } else {
                    self.framing_errors += 1;
                }
                FrameState::WaitStart
            }
        };
    }

    /// All bytes received so far.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frames dropped for a bad stop bit.
    pub fn framing_errors(&self) -> u32 {
        self.framing_errors
    }
}

impl Default for SerialSink {
    fn default() -> Self {
        Self::new()
    }
}
