//! Field extraction from a single frame.
//!
//! Extraction is bounds-checked against the frame, decodes the field's byte
//! range under the descriptor's own endianness, and applies the descriptor's
//! linear transform when one is defined. Each descriptor carries its byte
//! order independently; nothing here assumes a capture-wide default.

use crate::frame::Frame;
use crate::schema::{Endianness, FieldDescriptor, FieldKind};
use crate::{HktmError, Result};

/// Decode the raw unsigned integer value of `field` from `frame`.
///
/// Fails with [`HktmError::FieldOutOfRange`] when the descriptor's byte range
/// does not fit inside the frame, which indicates the schema's offset
/// assumptions no longer hold for this capture.
pub fn extract_raw(frame: &Frame<'_>, field: &FieldDescriptor) -> Result<u32> {
    let bytes = frame.bytes().get(field.offset..field.end()).ok_or(
        HktmError::FieldOutOfRange {
            field: field.name,
            offset: field.offset,
            width: field.width(),
            frame_size: frame.len(),
        },
    )?;

    let raw = match field.kind {
        FieldKind::UInt16 => {
            let word = [bytes[0], bytes[1]];
            u32::from(match field.endianness {
                Endianness::Little => u16::from_le_bytes(word),
                Endianness::Big => u16::from_be_bytes(word),
            })
        }
        FieldKind::UInt32 => {
            let word = [bytes[0], bytes[1], bytes[2], bytes[3]];
            match field.endianness {
                Endianness::Little => u32::from_le_bytes(word),
                Endianness::Big => u32::from_be_bytes(word),
            }
        }
    };

    Ok(raw)
}

/// Decode `field` and apply its linear transform, yielding an engineering
/// value. Fields without a scale pass the raw counts through unchanged.
pub fn extract_scaled(frame: &Frame<'_>, field: &FieldDescriptor) -> Result<f64> {
    let raw = extract_raw(frame, field)?;
    Ok(match field.scale {
        Some(scale) => scale.apply(raw),
        None => f64::from(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameSlicer;
    use crate::schema::{LinearScale, PACKET_SIZE, SACD_HKTM};

    fn frame_with(buffer: &[u8]) -> Frame<'_> {
        FrameSlicer::with_frame_size(buffer, buffer.len())
            .expect("whole frame")
            .next()
            .expect("one frame")
    }

    #[test]
    fn big_endian_timestamp_bytes_decode_most_significant_first() {
        let mut buffer = vec![0u8; PACKET_SIZE];
        buffer[598..602].copy_from_slice(&[0x00, 0x00, 0x00, 0x01]);

        let frame = frame_with(&buffer);
        assert_eq!(extract_raw(&frame, &SACD_HKTM.timestamp).expect("in range"), 1);
    }

    #[test]
    fn little_endian_voltage_bytes_decode_least_significant_first() {
        let mut buffer = vec![0u8; PACKET_SIZE];
        buffer[100..104].copy_from_slice(&[0x01, 0x00, 0x00, 0x00]);

        let frame = frame_with(&buffer);
        assert_eq!(extract_raw(&frame, &SACD_HKTM.voltage).expect("in range"), 1);
    }

    #[test]
    fn the_same_bytes_decode_differently_under_each_byte_order() {
        let mut buffer = vec![0u8; PACKET_SIZE];
        buffer[100..104].copy_from_slice(&[0x12, 0x34, 0x56, 0x78]);

        let frame = frame_with(&buffer);
        let mut le_field = SACD_HKTM.voltage;
        le_field.scale = None;
        let mut be_field = le_field;
        be_field.endianness = Endianness::Big;

        assert_eq!(extract_raw(&frame, &le_field).expect("LE"), 0x7856_3412);
        assert_eq!(extract_raw(&frame, &be_field).expect("BE"), 0x1234_5678);
    }

    #[test]
    fn out_of_range_field_reports_offset_width_and_frame_size() {
        let buffer = vec![0u8; 600];
        let frame = frame_with(&buffer);

        let err = extract_raw(&frame, &SACD_HKTM.timestamp).expect_err("598 + 4 > 600");
        match err {
            HktmError::FieldOutOfRange { field, offset, width, frame_size } => {
                assert_eq!(field, "timestamp");
                assert_eq!(offset, 598);
                assert_eq!(width, 4);
                assert_eq!(frame_size, 600);
            }
            other => panic!("Expected FieldOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn uint16_fields_extract_two_bytes() {
        let mut buffer = vec![0u8; PACKET_SIZE];
        buffer[2354..2356].copy_from_slice(&[0x01, 0x02]);

        let frame = frame_with(&buffer);
        let field = FieldDescriptor {
            name: "battery-voltage",
            offset: 2354,
            kind: FieldKind::UInt16,
            endianness: Endianness::Big,
            scale: None,
        };
        assert_eq!(extract_raw(&frame, &field).expect("in range"), 0x0102);
    }

    #[test]
    fn scaled_extraction_applies_the_linear_transform() {
        let mut buffer = vec![0u8; PACKET_SIZE];
        buffer[100..104].copy_from_slice(&3300u32.to_le_bytes());

        let frame = frame_with(&buffer);
        let volts = extract_scaled(&frame, &SACD_HKTM.voltage).expect("in range");
        assert!((volts - 3.300).abs() < 1e-9);

        let mut unscaled = SACD_HKTM.voltage;
        unscaled.scale = Some(LinearScale { gain: 2.0, offset: -1.0 });
        let shifted = extract_scaled(&frame, &unscaled).expect("in range");
        assert!((shifted - 6599.0).abs() < 1e-9);
    }
}
