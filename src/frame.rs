//! Frame slicing over a raw capture buffer.
//!
//! A capture is a flat byte buffer composed of fixed-size frames. The slicer
//! validates the total length up front and then hands out borrowed,
//! non-overlapping frame views in ascending offset order. Slicing is a pure
//! function of the buffer: re-slicing the same bytes yields an identical
//! sequence.

use tracing::debug;

use crate::schema::PACKET_SIZE;
use crate::{HktmError, Result};

/// One fixed-size frame: a borrowed view into the capture buffer plus its
/// zero-based position in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    bytes: &'a [u8],
    index: usize,
}

impl<'a> Frame<'a> {
    /// The frame's raw bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Zero-based position of this frame in the capture.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Frame length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Lazy iterator over the frames of a validated capture buffer.
///
/// Finite and restartable: `FrameSlicer` is `Clone`, and a fresh slicer over
/// the same buffer yields the same frames.
#[derive(Debug, Clone)]
pub struct FrameSlicer<'a> {
    buffer: &'a [u8],
    frame_size: usize,
    next_index: usize,
}

impl<'a> FrameSlicer<'a> {
    /// Validate the buffer length against the SAC-D frame size and build a
    /// slicer over it.
    ///
    /// An empty buffer is valid and yields no frames. A length that is not a
    /// whole number of frames is a fatal [`HktmError::MalformedInput`]; the
    /// capture is never silently truncated or padded.
    pub fn new(buffer: &'a [u8]) -> Result<Self> {
        Self::with_frame_size(buffer, PACKET_SIZE)
    }

    /// Build a slicer with an explicit frame size (schema-driven decoding).
    pub fn with_frame_size(buffer: &'a [u8], frame_size: usize) -> Result<Self> {
        if frame_size == 0 {
            return Err(HktmError::parse("frame slicing", "frame size must be non-zero"));
        }

        let remainder = buffer.len() % frame_size;
        if remainder != 0 {
            return Err(HktmError::MalformedInput { length: buffer.len(), frame_size, remainder });
        }

        debug!(
            "Sliced capture of {} bytes into {} frames of {} bytes",
            buffer.len(),
            buffer.len() / frame_size,
            frame_size
        );

        Ok(Self { buffer, frame_size, next_index: 0 })
    }

    /// Number of frames in the capture.
    pub fn frame_count(&self) -> usize {
        self.buffer.len() / self.frame_size
    }
}

impl<'a> Iterator for FrameSlicer<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.frame_count() {
            return None;
        }

        let start = self.next_index * self.frame_size;
        let bytes = &self.buffer[start..start + self.frame_size];
        let frame = Frame { bytes, index: self.next_index };
        self.next_index += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame_count() - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameSlicer<'_> {}
