//! SAC-D HKTM frame schema.
//!
//! The packet layout is a constant table of field descriptors, so future
//! schema revisions stay localized to this module instead of scattering
//! numeric offsets through the decoder.
//!
//! ## Byte layout
//!
//! Each housekeeping frame is exactly 4000 bytes. Two fields are consumed:
//!
//! | Field          | Offset | Width | Endianness | Interpretation                      |
//! |----------------|--------|-------|------------|-------------------------------------|
//! | voltage-source | 100    | 4     | little     | unsigned 32-bit, scaled 1/1000 to V |
//! | timestamp      | 598    | 4     | big        | unsigned 32-bit Unix epoch seconds  |
//!
//! The mixed endianness is a genuine, empirically discovered property of the
//! capture format. Both offsets were independently found to encode overlapping
//! real-world time values under different byte orders, so each descriptor
//! carries its own explicit byte order and the two are never unified under a
//! crate-wide default.

use serde::Serialize;

use crate::{HktmError, Result};

/// Size of one SAC-D housekeeping telemetry frame in bytes.
pub const PACKET_SIZE: usize = 4000;

/// Byte order of a single field within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Endianness {
    Little,
    Big,
}

/// Wire type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
}

impl FieldKind {
    /// Returns the size in bytes of this wire type.
    pub const fn size(&self) -> usize {
        match self {
            FieldKind::UInt16 => 2,
            FieldKind::UInt32 => 4,
        }
    }
}

/// Fixed linear transform from raw counts to an engineering value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub gain: f64,
    pub offset: f64,
}

impl LinearScale {
    /// Apply the transform to a raw integer sample.
    pub fn apply(&self, raw: u32) -> f64 {
        f64::from(raw) * self.gain + self.offset
    }
}

/// Static metadata for one value embedded in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Field name used in error context and reports
    pub name: &'static str,
    /// Byte offset within the frame
    pub offset: usize,
    /// Wire type (fixes the field width)
    pub kind: FieldKind,
    /// Byte order of this field, independent of every other field
    pub endianness: Endianness,
    /// Optional raw-counts-to-engineering-units transform
    pub scale: Option<LinearScale>,
}

impl FieldDescriptor {
    /// Width of the field in bytes.
    pub const fn width(&self) -> usize {
        self.kind.size()
    }

    /// Exclusive end offset of the field's byte range.
    pub const fn end(&self) -> usize {
        self.offset + self.kind.size()
    }
}

/// Schema describing one fixed-size packet layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PacketSchema {
    /// Total size of a frame in bytes
    pub packet_size: usize,
    /// Timestamp field (big-endian Unix epoch seconds)
    pub timestamp: FieldDescriptor,
    /// Voltage-source field (little-endian raw counts, scaled to volts)
    pub voltage: FieldDescriptor,
}

impl PacketSchema {
    /// Validate that every field fits within the packet boundary.
    pub fn validate(&self) -> Result<()> {
        for field in [&self.timestamp, &self.voltage] {
            if field.end() > self.packet_size {
                return Err(HktmError::FieldOutOfRange {
                    field: field.name,
                    offset: field.offset,
                    width: field.width(),
                    frame_size: self.packet_size,
                });
            }
        }
        Ok(())
    }
}

/// The SAC-D housekeeping telemetry schema.
///
/// Offsets and byte orders were reverse-engineered from a real capture; the
/// endianness asymmetry between the two fields is intentional.
pub const SACD_HKTM: PacketSchema = PacketSchema {
    packet_size: PACKET_SIZE,
    timestamp: FieldDescriptor {
        name: "timestamp",
        offset: 598,
        kind: FieldKind::UInt32,
        endianness: Endianness::Big,
        scale: None,
    },
    voltage: FieldDescriptor {
        name: "voltage-source",
        offset: 100,
        kind: FieldKind::UInt32,
        endianness: Endianness::Little,
        scale: Some(LinearScale { gain: 1e-3, offset: 0.0 }),
    },
};
