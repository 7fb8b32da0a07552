//! Streaming PCM-to-MP3 encode pipeline.
//!
//! Control flow: read a block of interleaved samples, deinterleave into
//! left/right buffers, hand them to the encoder, append the resulting
//! frame to the output, until the source is exhausted.

mod deinterleave;
mod sink;
mod source;

pub use deinterleave::{ChannelBuffers, deinterleave};
pub use sink::FrameSink;
pub use source::SampleSource;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::encoder::{EncoderConfig, FrameEncoder, create_encoder};
use crate::error::EncodeError;

/// Interleaved samples read per block (256 KiB of i16 data).
pub const BLOCK_SAMPLES: usize = 131_072;

/// Counters for one [`EncoderSession::run`] call.
///
/// A second `run` after end of stream reports all-zero stats, which is how
/// callers tell "nothing left to do" from actual work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Interleaved samples consumed from the input.
    pub samples_read: u64,
    /// Non-empty frames appended to the output.
    pub frames_written: u64,
    /// Total encoded bytes appended to the output.
    pub bytes_written: u64,
}

/// One encode run: the open input stream, the open output stream, and the
/// encoder, owned together.
///
/// Owning all three resources in one value replaces the process-wide
/// handles of classic C bridges: sessions cannot alias each other, and
/// every failure path releases whatever was already acquired. `close`
/// consumes the session, so releasing twice is unrepresentable; plain
/// `drop` is also safe.
pub struct EncoderSession {
    // Declaration order is release order: input, then output, then encoder.
    source: SampleSource<BufReader<File>>,
    sink: FrameSink<BufWriter<File>>,
    encoder: Box<dyn FrameEncoder>,
    block_samples: usize,
}

impl EncoderSession {
    /// Open input and output files and build the default encoder backend.
    ///
    /// The input is opened first; if it cannot be read the output file is
    /// never created. If any later step fails, handles acquired so far are
    /// dropped on the error return.
    pub fn open(
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        config: &EncoderConfig,
    ) -> Result<Self, EncodeError> {
        let (input_file, output_file) = open_files(input.as_ref(), output.as_ref())?;
        let encoder = create_encoder(config)?;
        Ok(Self::from_parts(input_file, output_file, encoder))
    }

    /// Open input and output files around an already-built encoder.
    ///
    /// This is the injection seam: tests drive the pipeline with a fake
    /// encoder without linking the codec.
    pub fn open_with_encoder(
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        encoder: Box<dyn FrameEncoder>,
    ) -> Result<Self, EncodeError> {
        let (input_file, output_file) = open_files(input.as_ref(), output.as_ref())?;
        Ok(Self::from_parts(input_file, output_file, encoder))
    }

    fn from_parts(input_file: File, output_file: File, encoder: Box<dyn FrameEncoder>) -> Self {
        Self {
            source: SampleSource::new(BufReader::new(input_file)),
            sink: FrameSink::new(BufWriter::new(output_file)),
            encoder,
            block_samples: BLOCK_SAMPLES,
        }
    }

    /// Override the block size (in interleaved samples, rounded down to an
    /// even count so blocks hold whole stereo pairs).
    pub fn with_block_samples(mut self, block_samples: usize) -> Self {
        self.block_samples = (block_samples & !1).max(2);
        self
    }

    /// Encode the entire remaining input in one synchronous call.
    ///
    /// Calling again after end of stream reads an empty block immediately
    /// and writes nothing further.
    pub fn run(&mut self) -> Result<EncodeStats, EncodeError> {
        let stats = run_pipeline(
            &mut self.source,
            &mut self.sink,
            self.encoder.as_mut(),
            self.block_samples,
        )?;
        self.sink.finish()?;
        Ok(stats)
    }

    /// Version string of the encoder backend.
    pub fn encoder_version(&self) -> &'static str {
        self.encoder.version()
    }

    /// Flush and release the session's resources.
    pub fn close(mut self) -> Result<(), EncodeError> {
        self.sink.finish()
        // Drop of self releases input, output, encoder in that order.
    }
}

/// Open the input for reading before creating the output, so a missing
/// input never leaves a stray output file behind.
fn open_files(input: &Path, output: &Path) -> Result<(File, File), EncodeError> {
    let input_file = File::open(input).map_err(|source| EncodeError::InputOpen {
        path: input.to_path_buf(),
        source,
    })?;
    let output_file = File::create(output).map_err(|source| EncodeError::OutputOpen {
        path: output.to_path_buf(),
        source,
    })?;
    Ok((input_file, output_file))
}

/// The core read/deinterleave/encode/write loop.
///
/// Only the overlapping `pair_count` prefix of the channel buffers is
/// handed to the encoder, so an odd trailing sample is truncated rather
/// than paired with garbage.
fn run_pipeline<R: Read, W: Write>(
    source: &mut SampleSource<R>,
    sink: &mut FrameSink<W>,
    encoder: &mut dyn FrameEncoder,
    block_samples: usize,
) -> Result<EncodeStats, EncodeError> {
    let mut samples_read = 0u64;
    let frames_before = sink.frames_written();
    let bytes_before = sink.bytes_written();

    loop {
        let block = source.read_block(block_samples)?;
        if block.is_empty() {
            break;
        }
        samples_read += block.len() as u64;

        let channels = deinterleave(&block);
        let pairs = channels.pair_count();
        let frame = encoder.encode_block(&channels.left[..pairs], &channels.right[..pairs])?;
        if !frame.is_empty() {
            sink.write_frame(&frame)?;
        }
        crate::verbose!("encoded block: {} samples -> {} bytes", block.len(), frame.len());
    }

    // Drain the encoder's tail only when this call consumed input, so a
    // rerun at end of stream writes zero additional bytes.
    if samples_read > 0 {
        let tail = encoder.flush()?;
        if !tail.is_empty() {
            sink.write_frame(&tail)?;
        }
        crate::verbose!("flushed encoder: {} bytes", tail.len());
    }

    Ok(EncodeStats {
        samples_read,
        frames_written: sink.frames_written() - frames_before,
        bytes_written: sink.bytes_written() - bytes_before,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use std::io::Cursor;

    /// Fake encoder recording every block it sees.
    ///
    /// Emits one byte per sample pair so tests can check frame sizes and
    /// ordering, and a fixed tail marker on flush.
    struct SpyEncoder {
        blocks: Vec<(usize, usize)>,
        flushes: usize,
    }

    impl SpyEncoder {
        fn new() -> Self {
            Self {
                blocks: Vec::new(),
                flushes: 0,
            }
        }
    }

    impl FrameEncoder for SpyEncoder {
        fn encode_block(&mut self, left: &[i16], right: &[i16]) -> Result<Vec<u8>, EncodeError> {
            assert_eq!(left.len(), right.len(), "channel buffers must pair up");
            self.blocks.push((left.len(), right.len()));
            Ok(vec![self.blocks.len() as u8; left.len()])
        }

        fn flush(&mut self) -> Result<Vec<u8>, EncodeError> {
            self.flushes += 1;
            Ok(b"tail".to_vec())
        }

        fn version(&self) -> &'static str {
            "spy"
        }
    }

    fn pcm_bytes(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn pumps_blocks_through_encoder_in_order() {
        let samples: Vec<i16> = (0..20).collect();
        let mut source = SampleSource::new(Cursor::new(pcm_bytes(&samples)));
        let mut sink = FrameSink::new(Vec::new());
        let mut encoder = SpyEncoder::new();

        let stats = run_pipeline(&mut source, &mut sink, &mut encoder, 8).unwrap();

        // 20 samples in blocks of 8: 8 + 8 + 4 -> 4, 4, 2 pairs.
        assert_eq!(encoder.blocks, vec![(4, 4), (4, 4), (2, 2)]);
        assert_eq!(encoder.flushes, 1);
        assert_eq!(stats.samples_read, 20);
        assert_eq!(stats.frames_written, 4); // 3 blocks + tail

        let mut expected = Vec::new();
        expected.extend(vec![1u8; 4]);
        expected.extend(vec![2u8; 4]);
        expected.extend(vec![3u8; 2]);
        expected.extend(b"tail");
        assert_eq!(sink.writer(), &expected);
    }

    #[test]
    fn second_run_after_end_of_stream_is_idempotent() {
        let samples: Vec<i16> = (0..8).collect();
        let mut source = SampleSource::new(Cursor::new(pcm_bytes(&samples)));
        let mut sink = FrameSink::new(Vec::new());
        let mut encoder = SpyEncoder::new();

        let first = run_pipeline(&mut source, &mut sink, &mut encoder, 8).unwrap();
        assert_eq!(first.samples_read, 8);
        assert_eq!(encoder.flushes, 1);

        let second = run_pipeline(&mut source, &mut sink, &mut encoder, 8).unwrap();
        assert_eq!(second, EncodeStats::default());
        // No extra flush, no extra frames.
        assert_eq!(encoder.flushes, 1);
        assert_eq!(first.frames_written, sink.frames_written());
    }

    #[test]
    fn empty_input_writes_nothing() {
        let mut source = SampleSource::new(Cursor::new(Vec::new()));
        let mut sink = FrameSink::new(Vec::new());
        let mut encoder = SpyEncoder::new();

        let stats = run_pipeline(&mut source, &mut sink, &mut encoder, 8).unwrap();
        assert_eq!(stats, EncodeStats::default());
        assert!(encoder.blocks.is_empty());
        assert_eq!(encoder.flushes, 0);
        assert!(sink.writer().is_empty());
    }

    #[test]
    fn session_open_close_without_run_leaves_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pcm");
        let output = dir.path().join("out.mp3");
        std::fs::write(&input, pcm_bytes(&[1, 2, 3, 4])).unwrap();

        let session =
            EncoderSession::open_with_encoder(&input, &output, Box::new(SpyEncoder::new()))
                .unwrap();
        session.close().unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn missing_input_fails_without_creating_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("does-not-exist.pcm");
        let output = dir.path().join("out.mp3");

        let err = EncoderSession::open_with_encoder(&input, &output, Box::new(SpyEncoder::new()))
            .err()
            .expect("open must fail for a missing input");

        assert!(matches!(err, EncodeError::InputOpen { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn session_run_encodes_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pcm");
        let output = dir.path().join("out.mp3");
        let samples: Vec<i16> = (0..12).collect();
        std::fs::write(&input, pcm_bytes(&samples)).unwrap();

        let mut session =
            EncoderSession::open_with_encoder(&input, &output, Box::new(SpyEncoder::new()))
                .unwrap()
                .with_block_samples(8);

        let stats = session.run().unwrap();
        assert_eq!(stats.samples_read, 12);

        // Rerun at end of stream adds nothing.
        let rerun = session.run().unwrap();
        assert_eq!(rerun, EncodeStats::default());

        session.close().unwrap();

        let written = std::fs::read(&output).unwrap();
        // Blocks of 8 and 4 samples -> 4 and 2 pair-bytes, then the tail.
        let mut expected = vec![1u8; 4];
        expected.extend(vec![2u8; 2]);
        expected.extend(b"tail");
        assert_eq!(written, expected);
    }

    #[test]
    fn block_size_override_rounds_down_to_even() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pcm");
        let output = dir.path().join("out.mp3");
        std::fs::write(&input, pcm_bytes(&[1, 2, 3, 4, 5, 6])).unwrap();

        let mut session =
            EncoderSession::open_with_encoder(&input, &output, Box::new(SpyEncoder::new()))
                .unwrap()
                .with_block_samples(5);

        let stats = session.run().unwrap();
        // Blocks of 4: (2,2) pairs then (1,1).
        assert_eq!(stats.samples_read, 6);
        session.close().unwrap();
    }
}
