//! `info` command: duration and bit rate of a raw PCM file.

use std::path::Path;

use anyhow::{Context, Result};
use mp3press_core::{pcm_bit_rate, pcm_duration};

pub fn run(input: &Path, sample_rate: u32, bit_depth: u32, channels: u32) -> Result<()> {
    let metadata = std::fs::metadata(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let byte_len = metadata.len();
    let bit_rate = pcm_bit_rate(sample_rate, bit_depth, channels);
    let duration = pcm_duration(byte_len, sample_rate, bit_depth, channels);

    println!("{}", input.display());
    println!("  size:     {byte_len} bytes");
    println!("  format:   {sample_rate} Hz, {bit_depth}-bit, {channels} ch");
    println!("  bit rate: {bit_rate} bps");
    println!("  duration: {:.3} s", duration.as_secs_f64());
    Ok(())
}
