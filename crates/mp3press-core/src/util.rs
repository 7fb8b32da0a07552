//! PCM arithmetic helpers.

use std::time::Duration;

/// Bit rate of raw PCM data: sample rate x bit depth x channel count.
pub fn pcm_bit_rate(sample_rate_hz: u32, bit_depth: u32, channel_count: u32) -> u64 {
    sample_rate_hz as u64 * bit_depth as u64 * channel_count as u64
}

/// Duration of a raw PCM byte stream with the given format.
///
/// Returns `Duration::ZERO` for a degenerate zero-rate format rather than
/// dividing by zero.
pub fn pcm_duration(
    byte_len: u64,
    sample_rate_hz: u32,
    bit_depth: u32,
    channel_count: u32,
) -> Duration {
    let bit_rate = pcm_bit_rate(sample_rate_hz, bit_depth, channel_count);
    if bit_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(byte_len as f64 * 8.0 / bit_rate as f64)
}
