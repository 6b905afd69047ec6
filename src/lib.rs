//! Type-safe decoder and analysis toolkit for SAC-D housekeeping telemetry.
//!
//! `hktm` decodes raw SAC-D HKTM capture files — flat binary streams of
//! fixed 4000-byte housekeeping packets — into typed records carrying the
//! embedded timestamp and the voltage-source channel, and provides the
//! downstream analysis the engineering workflow needs: descriptive
//! statistics, interval grouping, eclipse flagging, and chart rendering.
//!
//! # Features
//!
//! - **Schema as data**: field offsets, widths, byte orders, and scale
//!   factors live in one constant table ([`schema::SACD_HKTM`])
//! - **Fail-fast decoding**: a malformed capture never yields partial output
//! - **Pure core**: decoding is a deterministic function of the input bytes
//! - **Soft plausibility**: implausible timestamps are flagged downstream,
//!   never rejected at decode time
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hktm::{CaptureReader, analysis};
//!
//! fn main() -> hktm::Result<()> {
//!     let reader = CaptureReader::open("capture.bin")?;
//!     let stream = reader.decode()?;
//!
//!     if let Some(stats) = analysis::SummaryStats::of_voltages(&stream) {
//!         println!("{} packets, mean {:.3} V", stats.count, stats.mean);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
mod decode;
mod error;
pub mod extract;
pub mod frame;
pub mod plot;
mod reader;
pub mod schema;

// Core exports
pub use decode::{DecodedRecord, RecordStream, decode, decode_with_schema};
pub use error::{HktmError, Result};
pub use frame::{Frame, FrameSlicer};
pub use reader::CaptureReader;
pub use schema::{Endianness, FieldDescriptor, FieldKind, LinearScale, PACKET_SIZE, PacketSchema};
