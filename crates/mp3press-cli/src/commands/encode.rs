//! `encode` command: raw PCM file in, MP3 file out.

use std::path::Path;

use anyhow::{Context, Result};
use mp3press_core::{EncoderConfig, EncoderSession};

pub fn run(
    input: &Path,
    output: &Path,
    sample_rate: u32,
    channels: u16,
    bit_rate: u32,
) -> Result<()> {
    let config = EncoderConfig::new(sample_rate, channels, bit_rate);
    let mut session = EncoderSession::open(input, output, &config)
        .context("failed to start encode session")?;

    let stats = session.run().context("encoding failed")?;
    session.close().context("failed to finalize output")?;

    println!(
        "encoded {} samples into {} frames ({} bytes) -> {}",
        stats.samples_read,
        stats.frames_written,
        stats.bytes_written,
        output.display()
    );
    Ok(())
}
