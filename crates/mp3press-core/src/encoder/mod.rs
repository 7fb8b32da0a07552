//! Audio encoding module providing MP3 encoding via the embedded LAME backend.

#[cfg(feature = "lame-encoder")]
mod lame;

use crate::error::EncodeError;

/// Parameters for building an encoder.
///
/// `bit_rate_bps` is in bits per second, as callers naturally compute it
/// (sample rate x bit depth x channels); backends working in kbps convert
/// via [`EncoderConfig::bit_rate_kbps`].
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Input sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Channel count of the interleaved input (the streaming pipeline is
    /// stereo-only, see [`create_encoder`]).
    pub channel_count: u16,
    /// Target bit rate in bits per second.
    pub bit_rate_bps: u32,
}

impl EncoderConfig {
    /// Create a new encoder configuration.
    pub fn new(sample_rate_hz: u32, channel_count: u16, bit_rate_bps: u32) -> Self {
        Self {
            sample_rate_hz,
            channel_count,
            bit_rate_bps,
        }
    }

    /// Target bit rate in kilobits per second (truncating division).
    pub fn bit_rate_kbps(&self) -> u32 {
        self.bit_rate_bps / 1000
    }

    /// Check the configuration against what the pipeline supports.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.sample_rate_hz == 0 {
            return Err(EncodeError::InvalidConfig(
                "sample rate must be nonzero".into(),
            ));
        }
        if self.channel_count != 2 {
            return Err(EncodeError::InvalidConfig(format!(
                "unsupported channel count {}: the streaming pipeline deinterleaves stereo input",
                self.channel_count
            )));
        }
        if self.bit_rate_kbps() == 0 {
            return Err(EncodeError::InvalidConfig(format!(
                "bit rate {} bps is below 1 kbps",
                self.bit_rate_bps
            )));
        }
        Ok(())
    }
}

/// Trait for block-based encoders consuming deinterleaved sample buffers.
///
/// The pipeline always passes `left` and `right` slices of equal length
/// (one sample pair per index).
pub trait FrameEncoder {
    /// Encode one block of deinterleaved samples into a compressed frame.
    ///
    /// The returned frame may be empty while the encoder buffers input.
    fn encode_block(&mut self, left: &[i16], right: &[i16]) -> Result<Vec<u8>, EncodeError>;

    /// Drain any samples still buffered inside the encoder.
    fn flush(&mut self) -> Result<Vec<u8>, EncodeError>;

    /// Version string of the underlying codec.
    fn version(&self) -> &'static str;
}

/// Build the default encoder backend for the given configuration.
///
/// # Errors
/// Returns `EncodeError::InvalidConfig` if the configuration is out of
/// range for the pipeline or the backend, and `EncodeError::Encoder` if
/// no backend was compiled in or the backend fails to initialize.
pub fn create_encoder(config: &EncoderConfig) -> Result<Box<dyn FrameEncoder>, EncodeError> {
    config.validate()?;

    #[cfg(feature = "lame-encoder")]
    {
        Ok(Box::new(lame::LameEncoder::new(config)?))
    }

    #[cfg(not(feature = "lame-encoder"))]
    {
        Err(EncodeError::Encoder(
            "no encoder backend available; enable the 'lame-encoder' feature".into(),
        ))
    }
}

/// Version string of the default encoder backend, without building one.
pub fn backend_version() -> &'static str {
    #[cfg(feature = "lame-encoder")]
    {
        lame::LAME_VERSION
    }

    #[cfg(not(feature = "lame-encoder"))]
    {
        "no encoder backend"
    }
}
