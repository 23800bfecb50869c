//! Error types for huffpack.
//!
//! The compressed format carries no checksum, so the decoder validates every length field
//! before it indexes the input. Anything that would read past the end of the buffer is
//! reported here instead.

use thiserror::Error;

/// Every failure the codec and the file driver can report.
#[derive(Debug, Error)]
pub enum HuffError {
    /// The fixed part of the header is missing or its length fields are inconsistent.
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    /// A bucket in the compressed frequency table runs past the end of the table.
    #[error("invalid frequency data at table offset {offset}: {reason}")]
    InvalidFrequencyData { offset: usize, reason: String },

    /// The bit stream ran out before the last symbol reached a leaf.
    #[error("truncated stream: decoded {decoded} of {expected} symbols")]
    TruncatedStream { decoded: usize, expected: usize },

    /// Lengths and counts are stored as u32 on the wire.
    #[error("input of {0} bytes is too large (limit is 4294967295 bytes)")]
    InputTooLarge(usize),

    /// Refused to replace an existing file without --force.
    #[error("output file {0} already exists (use --force to overwrite)")]
    OutputExists(String),

    /// Test mode found a difference between the input and its round trip.
    #[error("round trip of {path} did not reproduce the original data")]
    VerifyMismatch { path: String },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        HuffError::MalformedHeader {
            reason: reason.into(),
        }
    }

    pub(crate) fn bad_freqs(offset: usize, reason: impl Into<String>) -> Self {
        HuffError::InvalidFrequencyData {
            offset,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::HuffError;

    #[test]
    fn display_test() {
        let e = HuffError::TruncatedStream {
            decoded: 3,
            expected: 10,
        };
        assert_eq!(e.to_string(), "truncated stream: decoded 3 of 10 symbols");

        let e = HuffError::bad_freqs(12, "byte bucket overruns table");
        assert_eq!(
            e.to_string(),
            "invalid frequency data at table offset 12: byte bucket overruns table"
        );
    }

    #[test]
    fn io_conversion_test() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: HuffError = io.into();
        assert!(matches!(e, HuffError::Io(_)));
    }
}
