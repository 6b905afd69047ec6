//! Packet decoding: frames in, typed records out.
//!
//! `decode` composes the frame slicer and the field extractor under the fixed
//! SAC-D schema and yields one [`DecodedRecord`] per frame, in frame order.
//! Decoding is a pure function of the input bytes: no I/O, no hidden state,
//! and re-decoding the same buffer produces an identical stream.
//!
//! Any extraction failure aborts the whole decode. A malformed frame means
//! the schema's offset assumptions no longer hold for this capture, and a
//! partial stream would present a silently truncated dataset as complete.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::extract::{extract_raw, extract_scaled};
use crate::frame::FrameSlicer;
use crate::schema::{PacketSchema, SACD_HKTM};
use crate::{HktmError, Result};

/// One decoded housekeeping packet.
///
/// Values are copied out of the frame at decode time; no reference into the
/// raw capture buffer is retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodedRecord {
    /// Zero-based position of the source frame in the capture
    pub packet_index: usize,
    /// Embedded timestamp, rendered in the local calendar
    pub timestamp: DateTime<Local>,
    /// Raw epoch-second count as found on the wire
    pub epoch_seconds: u32,
    /// Voltage-source reading in volts
    pub voltage: f64,
}

/// Ordered, restartable sequence of decoded records.
///
/// `packet_index` ordering is guaranteed equal to input frame order: no
/// reordering, no dropping of well-formed frames.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RecordStream {
    records: Vec<DecodedRecord>,
}

impl RecordStream {
    /// Number of records, always equal to the capture's frame count.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowing iterator; the stream can be walked any number of times.
    pub fn iter(&self) -> std::slice::Iter<'_, DecodedRecord> {
        self.records.iter()
    }

    /// The records as a slice, in packet order.
    pub fn records(&self) -> &[DecodedRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&DecodedRecord> {
        self.records.get(index)
    }
}

impl IntoIterator for RecordStream {
    type Item = DecodedRecord;
    type IntoIter = std::vec::IntoIter<DecodedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordStream {
    type Item = &'a DecodedRecord;
    type IntoIter = std::slice::Iter<'a, DecodedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Decode a raw capture buffer under the fixed SAC-D HKTM schema.
///
/// Fails fast: the first malformed frame aborts the stream and no partial
/// records are returned.
pub fn decode(buffer: &[u8]) -> Result<RecordStream> {
    decode_with_schema(buffer, &SACD_HKTM)
}

/// Decode a raw capture buffer under an explicit packet schema.
pub fn decode_with_schema(buffer: &[u8], schema: &PacketSchema) -> Result<RecordStream> {
    let slicer = FrameSlicer::with_frame_size(buffer, schema.packet_size)?;
    let mut records = Vec::with_capacity(slicer.frame_count());

    for frame in slicer {
        let epoch_seconds = extract_raw(&frame, &schema.timestamp)?;
        let voltage = extract_scaled(&frame, &schema.voltage)?;

        // Any u32 epoch-second count maps to a representable date, so this
        // lookup cannot fail for structurally valid input.
        let timestamp = DateTime::from_timestamp(i64::from(epoch_seconds), 0)
            .ok_or_else(|| {
                HktmError::parse(
                    "timestamp decoding",
                    format!("epoch second count {epoch_seconds} is out of calendar range"),
                )
            })?
            .with_timezone(&Local);

        records.push(DecodedRecord {
            packet_index: frame.index(),
            timestamp,
            epoch_seconds,
            voltage,
        });
    }

    Ok(RecordStream { records })
}
