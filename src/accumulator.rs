//! Bounded buffer that gathers one multi-line construct at a time.

use crate::error::{CapacityExceeded, SNIPPET_LEN};
use crate::transform::snippet;

/// Default capacity, large enough for any construct in the bstrlib manual.
pub const DEFAULT_CAPACITY: usize = 5000;

#[derive(Debug)]
pub struct Accumulator {
    buf: String,
    capacity: usize,
}

impl Accumulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: String::new(),
            capacity,
        }
    }

    /// Discard whatever was gathered and begin a new construct with `text`.
    pub fn start(&mut self, text: &str) -> Result<(), CapacityExceeded> {
        self.buf.clear();
        self.append(text)
    }

    /// Add a continuation line. Fails without modifying the buffer when the
    /// result would exceed capacity.
    pub fn append(&mut self, text: &str) -> Result<(), CapacityExceeded> {
        let len = self.buf.len() + text.len();
        if len > self.capacity {
            return Err(CapacityExceeded {
                len,
                capacity: self.capacity,
                snippet: snippet(&self.buf, SNIPPET_LEN),
            });
        }
        self.buf.push_str(text);
        Ok(())
    }

    /// Hand the gathered construct to the caller and leave the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
