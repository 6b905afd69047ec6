//! Capture file reader.
//!
//! Loads a raw HKTM capture from disk and decodes it in one pass. The whole
//! file is materialized in memory before decoding begins; captures at this
//! system's scale are small enough that a scoped read window per frame is
//! not worth the complexity.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use hktm::CaptureReader;
//!
//! fn summarize() -> hktm::Result<()> {
//!     let reader = CaptureReader::open("capture.bin")?;
//!     let stream = reader.decode()?;
//!     println!("{} packets decoded", stream.len());
//!     Ok(())
//! }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::analysis::MissionWindow;
use crate::decode::{RecordStream, decode};
use crate::schema::PACKET_SIZE;
use crate::{HktmError, Result};

/// Reader over one raw capture file, fully loaded into memory.
#[derive(Debug)]
pub struct CaptureReader {
    data: Vec<u8>,
    path: PathBuf,
    mission_window: MissionWindow,
}

impl CaptureReader {
    /// Open a capture file and load it into memory.
    ///
    /// The capture length is validated lazily by [`decode`](Self::decode);
    /// opening only fails on I/O errors, reported with the offending path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(&path)
            .map_err(|e| HktmError::file_error(path.as_ref().to_path_buf(), e))?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| HktmError::file_error(path.as_ref().to_path_buf(), e))?;

        debug!("Loaded capture {} ({} bytes)", path.as_ref().display(), data.len());
        Ok(Self::from_bytes_with_path(data, path.as_ref().to_path_buf()))
    }

    /// Build a reader over in-memory bytes (for testing).
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self::from_bytes_with_path(data, PathBuf::from("<memory>"))
    }

    fn from_bytes_with_path(data: Vec<u8>, path: PathBuf) -> Self {
        Self { data, path, mission_window: MissionWindow::default() }
    }

    /// Override the timestamp plausibility window used for soft validation.
    pub fn with_mission_window(mut self, window: MissionWindow) -> Self {
        self.mission_window = window;
        self
    }

    /// Number of whole frames the capture holds.
    pub fn total_frames(&self) -> usize {
        self.data.len() / PACKET_SIZE
    }

    /// Capture length in bytes.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// The file path this reader was opened from.
    pub fn file_path(&self) -> &Path {
        &self.path
    }

    /// Decode the capture into a record stream.
    ///
    /// Timestamps outside the mission window are logged as a warning and
    /// passed through; they are a soft-validation flag for the analysis
    /// layer, never a decode failure.
    pub fn decode(&self) -> Result<RecordStream> {
        let stream = decode(&self.data)?;

        let implausible = self.mission_window.count_implausible(&stream);
        if implausible > 0 {
            warn!(
                "{} of {} packets in {} have timestamps outside the {}..={} mission window",
                implausible,
                stream.len(),
                self.path.display(),
                self.mission_window.first_year,
                self.mission_window.last_year
            );
        }

        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result, ensure};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn synthetic_file(frames: &[(u32, u32)]) -> Result<NamedTempFile> {
        let mut buffer = vec![0u8; PACKET_SIZE * frames.len()];
        for (i, (epoch, raw_voltage)) in frames.iter().enumerate() {
            let base = i * PACKET_SIZE;
            buffer[base + 598..base + 602].copy_from_slice(&epoch.to_be_bytes());
            buffer[base + 100..base + 104].copy_from_slice(&raw_voltage.to_le_bytes());
        }

        let mut file = NamedTempFile::new().context("Creating capture fixture")?;
        file.write_all(&buffer).context("Writing capture fixture")?;
        Ok(file)
    }

    #[test]
    fn reader_decodes_a_capture_file_end_to_end() -> Result<()> {
        let file = synthetic_file(&[(1_717_000_000, 3300), (1_717_000_060, 2950)])?;
        let reader = CaptureReader::open(file.path())
            .with_context(|| format!("Opening {}", file.path().display()))?;

        ensure!(reader.total_frames() == 2, "fixture holds two frames");
        ensure!(reader.byte_len() == PACKET_SIZE * 2);

        let stream = reader.decode().context("Decoding fixture")?;
        ensure!(stream.len() == 2, "expected two records, got {}", stream.len());
        ensure!(stream.records()[0].epoch_seconds == 1_717_000_000);
        ensure!((stream.records()[0].voltage - 3.300).abs() < 1e-9);

        Ok(())
    }

    #[test]
    fn missing_file_errors_carry_the_path() {
        let err = CaptureReader::open("/no/such/capture.bin").expect_err("file is absent");
        match err {
            HktmError::File { path, .. } => {
                assert_eq!(path, PathBuf::from("/no/such/capture.bin"));
            }
            other => panic!("Expected File error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_file_fails_decode_not_open() -> Result<()> {
        let mut file = NamedTempFile::new().context("Creating fixture")?;
        file.write_all(&vec![0u8; PACKET_SIZE + 5]).context("Writing fixture")?;

        let reader = CaptureReader::open(file.path()).context("Opening truncated capture")?;
        let err = reader.decode().expect_err("5 trailing bytes");
        ensure!(matches!(err, HktmError::MalformedInput { remainder: 5, .. }));

        Ok(())
    }

    #[test]
    fn in_memory_reader_matches_decode() {
        let reader = CaptureReader::from_bytes(Vec::new());
        let stream = reader.decode().expect("empty capture decodes");
        assert!(stream.is_empty());
        assert_eq!(reader.file_path(), Path::new("<memory>"));
    }
}
