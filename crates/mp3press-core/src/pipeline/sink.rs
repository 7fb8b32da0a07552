//! Sequential writer for encoded frames.

use std::io::Write;

use crate::error::EncodeError;

/// Appends encoded frames verbatim to a byte stream, in encode order.
///
/// No framing or length prefix is added; the output is the raw compressed
/// bytestream.
pub struct FrameSink<W> {
    writer: W,
    frames_written: u64,
    bytes_written: u64,
}

impl<W: Write> FrameSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
            bytes_written: 0,
        }
    }

    /// Append one frame to the stream.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<(), EncodeError> {
        self.writer.write_all(frame).map_err(EncodeError::Write)?;
        self.frames_written += 1;
        self.bytes_written += frame.len() as u64;
        Ok(())
    }

    /// Flush buffered frames through to the underlying stream.
    pub fn finish(&mut self) -> Result<(), EncodeError> {
        self.writer.flush().map_err(EncodeError::Write)
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    #[cfg(test)]
    pub(crate) fn writer(&self) -> &W {
        &self.writer
    }
}
