//! Error types for HKTM capture decoding.
//!
//! All errors implement the `std::error::Error` trait and include structured
//! context for diagnosing schema/offset mismatches.
//!
//! ## Error Categories
//!
//! - **File Errors**: Problems reading a capture file from disk
//! - **Malformed Input**: Capture length is not a whole number of frames
//! - **Field Out Of Range**: A field descriptor exceeds the frame boundary
//! - **Parse Errors**: Other data-format failures with free-form context
//! - **Plot Errors**: Failures while rendering output charts
//!
//! Every decode error is fatal and non-recoverable: the input is a static
//! in-memory buffer, so there is nothing transient to retry against. A
//! malformed frame means the schema assumptions no longer hold for the whole
//! file, and partial results would be misleading.
//!
//! ## Helper Constructors
//!
//! ```rust
//! use hktm::HktmError;
//! use std::path::PathBuf;
//!
//! let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
//! let file_error = HktmError::file_error(PathBuf::from("/path/to/capture.bin"), io_err);
//!
//! let length_error = HktmError::malformed_input(4321);
//! assert!(length_error.to_string().contains("321"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for decoding operations.
pub type Result<T, E = HktmError> = std::result::Result<T, E>;

/// Main error type for HKTM capture operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HktmError {
    #[error("capture file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "malformed capture: length {length} is not a multiple of the {frame_size}-byte frame \
         ({remainder} trailing bytes)"
    )]
    MalformedInput { length: usize, frame_size: usize, remainder: usize },

    #[error(
        "field '{field}' out of range: bytes {offset}..{end} exceed frame of {frame_size} bytes",
        end = .offset + .width
    )]
    FieldOutOfRange { field: &'static str, offset: usize, width: usize, frame_size: usize },

    #[error("parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("plot rendering failed: {details}")]
    Plot { details: String },
}

impl HktmError {
    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        HktmError::File { path, source }
    }

    /// Helper constructor for capture-length errors against the SAC-D frame size.
    pub fn malformed_input(length: usize) -> Self {
        let frame_size = crate::schema::PACKET_SIZE;
        HktmError::MalformedInput { length, frame_size, remainder: length % frame_size }
    }

    /// Helper constructor for generic parse errors.
    pub fn parse(context: impl Into<String>, details: impl Into<String>) -> Self {
        HktmError::Parse { context: context.into(), details: details.into() }
    }
}

impl From<std::io::Error> for HktmError {
    fn from(err: std::io::Error) -> Self {
        HktmError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
