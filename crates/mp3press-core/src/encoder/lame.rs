//! Embedded LAME encoder backend.
//!
//! Wraps the mp3lame-encoder crate behind the [`FrameEncoder`] trait so the
//! pipeline never links LAME directly and tests can substitute a fake.

use mp3lame_encoder::{Bitrate, Builder, DualPcm, FlushNoGap, Quality};

use super::{EncoderConfig, FrameEncoder};
use crate::error::EncodeError;

/// Version of the LAME library bundled by mp3lame-encoder.
pub(super) const LAME_VERSION: &str = "LAME 3.100";

/// MP3 encoder using the embedded LAME library.
pub struct LameEncoder {
    encoder: mp3lame_encoder::Encoder,
}

impl LameEncoder {
    /// Build and configure a LAME encoder.
    ///
    /// The caller-facing bit rate is in bits per second; LAME is configured
    /// in kbps, so the value is divided by 1000 here.
    pub fn new(config: &EncoderConfig) -> Result<Self, EncodeError> {
        let mut builder = Builder::new()
            .ok_or_else(|| EncodeError::Encoder("failed to create LAME builder".into()))?;

        builder
            .set_num_channels(config.channel_count as u8)
            .map_err(|e| EncodeError::Encoder(format!("failed to set channels: {e:?}")))?;

        builder
            .set_sample_rate(config.sample_rate_hz)
            .map_err(|e| EncodeError::Encoder(format!("failed to set sample rate: {e:?}")))?;

        builder
            .set_brate(bitrate_from_kbps(config.bit_rate_kbps())?)
            .map_err(|e| EncodeError::Encoder(format!("failed to set bit rate: {e:?}")))?;

        builder
            .set_quality(Quality::Best)
            .map_err(|e| EncodeError::Encoder(format!("failed to set quality: {e:?}")))?;

        let encoder = builder
            .build()
            .map_err(|e| EncodeError::Encoder(format!("failed to initialize LAME encoder: {e:?}")))?;

        Ok(Self { encoder })
    }
}

/// Map a kbps value onto the discrete bit rates LAME supports.
fn bitrate_from_kbps(kbps: u32) -> Result<Bitrate, EncodeError> {
    let bitrate = match kbps {
        8 => Bitrate::Kbps8,
        16 => Bitrate::Kbps16,
        24 => Bitrate::Kbps24,
        32 => Bitrate::Kbps32,
        40 => Bitrate::Kbps40,
        48 => Bitrate::Kbps48,
        64 => Bitrate::Kbps64,
        80 => Bitrate::Kbps80,
        96 => Bitrate::Kbps96,
        112 => Bitrate::Kbps112,
        128 => Bitrate::Kbps128,
        160 => Bitrate::Kbps160,
        192 => Bitrate::Kbps192,
        224 => Bitrate::Kbps224,
        256 => Bitrate::Kbps256,
        320 => Bitrate::Kbps320,
        other => {
            return Err(EncodeError::InvalidConfig(format!(
                "unsupported MP3 bit rate: {other} kbps"
            )));
        }
    };
    Ok(bitrate)
}

impl FrameEncoder for LameEncoder {
    fn encode_block(&mut self, left: &[i16], right: &[i16]) -> Result<Vec<u8>, EncodeError> {
        debug_assert_eq!(left.len(), right.len());

        let mut frame = Vec::new();
        frame.reserve(mp3lame_encoder::max_required_buffer_size(
            left.len() + right.len(),
        ));

        let input = DualPcm { left, right };
        let encoded_size = self
            .encoder
            .encode(input, frame.spare_capacity_mut())
            .map_err(|e| EncodeError::Encoder(format!("failed to encode MP3 block: {e:?}")))?;

        // SAFETY: encode returns the number of bytes written to the buffer.
        // The mp3lame-encoder API requires MaybeUninit<u8> output and
        // guarantees that exactly encoded_size bytes are initialized.
        unsafe {
            frame.set_len(encoded_size);
        }

        Ok(frame)
    }

    fn flush(&mut self) -> Result<Vec<u8>, EncodeError> {
        let mut frame = Vec::new();
        frame.reserve(mp3lame_encoder::max_required_buffer_size(0));

        let flush_size = self
            .encoder
            .flush::<FlushNoGap>(frame.spare_capacity_mut())
            .map_err(|e| EncodeError::Encoder(format!("failed to flush MP3 encoder: {e:?}")))?;

        // SAFETY: flush returns the number of bytes written and guarantees
        // they are initialized.
        unsafe {
            frame.set_len(flush_size);
        }

        Ok(frame)
    }

    fn version(&self) -> &'static str {
        LAME_VERSION
    }
}
