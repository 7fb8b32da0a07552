mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mp3press")]
#[command(about = "Encode raw PCM audio files to MP3", version)]
struct Cli {
    /// Print per-block progress to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode a raw 16-bit interleaved stereo PCM file to MP3.
    Encode {
        /// Input PCM file (headerless, little-endian i16, interleaved).
        input: PathBuf,
        /// Output MP3 file.
        output: PathBuf,
        /// Sample rate of the input in Hz.
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,
        /// Channel count of the input.
        #[arg(long, default_value_t = 2)]
        channels: u16,
        /// Target bit rate in bits per second.
        #[arg(long, default_value_t = 128_000)]
        bit_rate: u32,
    },
    /// Wrap a raw PCM file in a WAV container.
    Wav {
        /// Input PCM file.
        input: PathBuf,
        /// Output WAV file.
        output: PathBuf,
        /// Sample rate of the input in Hz.
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,
        /// Channel count of the input.
        #[arg(long, default_value_t = 2)]
        channels: u16,
    },
    /// Report the duration and bit rate of a raw PCM file.
    Info {
        /// Input PCM file.
        input: PathBuf,
        /// Sample rate of the input in Hz.
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,
        /// Bit depth of the input.
        #[arg(long, default_value_t = 16)]
        bit_depth: u32,
        /// Channel count of the input.
        #[arg(long, default_value_t = 2)]
        channels: u32,
    },
    /// Print the encoder backend version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    mp3press_core::set_verbose(cli.verbose);

    match cli.command {
        Command::Encode {
            input,
            output,
            sample_rate,
            channels,
            bit_rate,
        } => commands::encode::run(&input, &output, sample_rate, channels, bit_rate),
        Command::Wav {
            input,
            output,
            sample_rate,
            channels,
        } => commands::wav::run(&input, &output, sample_rate, channels),
        Command::Info {
            input,
            sample_rate,
            bit_depth,
            channels,
        } => commands::info::run(&input, sample_rate, bit_depth, channels),
        Command::Version => {
            println!("{}", mp3press_core::backend_version());
            Ok(())
        }
    }
}
