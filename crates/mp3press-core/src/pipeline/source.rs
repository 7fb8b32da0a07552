//! Sequential reader of raw interleaved 16-bit PCM samples.

use std::io::{self, Read};

use crate::error::EncodeError;

/// Reads fixed-size blocks of little-endian i16 samples from a byte stream.
///
/// The reader is synchronous and blocking; a stalled underlying stream
/// stalls the caller.
pub struct SampleSource<R> {
    reader: R,
}

impl<R: Read> SampleSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read up to `capacity` samples from the stream.
    ///
    /// Short reads are retried until the block is full or the stream ends,
    /// so anything but the final block comes back at full capacity. An
    /// empty block signals end of stream. A trailing odd byte (half a
    /// sample) is discarded.
    pub fn read_block(&mut self, capacity: usize) -> Result<Vec<i16>, EncodeError> {
        let mut bytes = vec![0u8; capacity * 2];
        let mut filled = 0;

        while filled < bytes.len() {
            match self.reader.read(&mut bytes[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(EncodeError::Read(e)),
            }
        }

        let samples = bytes[..filled - filled % 2]
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source_from(samples: &[i16]) -> SampleSource<Cursor<Vec<u8>>> {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        SampleSource::new(Cursor::new(bytes))
    }

    #[test]
    fn reads_full_blocks_then_remainder_then_empty() {
        let samples: Vec<i16> = (0..10).collect();
        let mut source = source_from(&samples);

        assert_eq!(source.read_block(4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(source.read_block(4).unwrap(), vec![4, 5, 6, 7]);
        assert_eq!(source.read_block(4).unwrap(), vec![8, 9]);
        assert!(source.read_block(4).unwrap().is_empty());
        // Repeated reads at end of stream stay empty.
        assert!(source.read_block(4).unwrap().is_empty());
    }

    #[test]
    fn decodes_little_endian() {
        let mut source = SampleSource::new(Cursor::new(vec![0x01, 0x02, 0xFF, 0xFF]));
        assert_eq!(source.read_block(8).unwrap(), vec![0x0201, -1]);
    }

    #[test]
    fn drops_trailing_odd_byte() {
        let mut source = SampleSource::new(Cursor::new(vec![0x01, 0x00, 0x02]));
        assert_eq!(source.read_block(8).unwrap(), vec![1]);
    }

    #[test]
    fn empty_stream_yields_empty_block() {
        let mut source = SampleSource::new(Cursor::new(Vec::new()));
        assert!(source.read_block(16).unwrap().is_empty());
    }
}
