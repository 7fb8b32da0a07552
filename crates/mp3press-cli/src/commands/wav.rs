//! `wav` command: wrap raw PCM in a WAV container.

use std::path::Path;

use anyhow::{Context, Result};
use mp3press_core::pcm_to_wav;

pub fn run(input: &Path, output: &Path, sample_rate: u32, channels: u16) -> Result<()> {
    pcm_to_wav(input, output, sample_rate, channels)
        .context("failed to convert PCM to WAV")?;
    println!("wrote {}", output.display());
    Ok(())
}
