//! Wrapping raw PCM files in a WAV container.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::{BLOCK_SAMPLES, SampleSource};

/// Copy a headerless 16-bit PCM file into a WAV file.
///
/// The samples are copied verbatim; `sample_rate_hz` and `channel_count`
/// only describe them in the WAV header.
pub fn pcm_to_wav(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    sample_rate_hz: u32,
    channel_count: u16,
) -> Result<()> {
    let input = input.as_ref();
    let file = File::open(input)
        .with_context(|| format!("failed to open input PCM file {}", input.display()))?;
    let mut source = SampleSource::new(BufReader::new(file));

    let spec = hound::WavSpec {
        channels: channel_count,
        sample_rate: sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(output.as_ref(), spec).context("failed to create WAV file")?;

    loop {
        let block = source.read_block(BLOCK_SAMPLES)?;
        if block.is_empty() {
            break;
        }
        for sample in block {
            writer.write_sample(sample)?;
        }
    }

    writer.finalize().context("failed to finalize WAV file")?;
    Ok(())
}
