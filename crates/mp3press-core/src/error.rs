//! Error types for the encoding pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while opening, running, or closing an encode session.
///
/// Each resource failure carries its own variant so callers can tell
/// "input missing" from "output not writable" from "encoder rejected the
/// configuration" without string matching.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The input PCM file could not be opened for reading.
    #[error("failed to open input PCM file {path:?}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be opened for writing.
    #[error("failed to open output file {path:?}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading PCM samples from the input stream failed.
    #[error("failed to read PCM samples")]
    Read(#[source] io::Error),

    /// Writing an encoded frame to the output stream failed.
    #[error("failed to write encoded frame")]
    Write(#[source] io::Error),

    /// The encoder backend reported a failure.
    #[error("encoder error: {0}")]
    Encoder(String),

    /// The requested configuration is not supported.
    #[error("invalid encoder configuration: {0}")]
    InvalidConfig(String),
}
