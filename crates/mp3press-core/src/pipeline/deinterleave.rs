//! Splitting interleaved stereo buffers into per-channel buffers.

/// Per-channel sample buffers produced by [`deinterleave`].
///
/// `left` holds the samples at even indices, `right` the samples at odd
/// indices. For an odd-length input the final sample lands in `left`, so
/// `left` can be one element longer than `right`; [`pair_count`] gives the
/// overlapping prefix length both channels cover.
///
/// [`pair_count`]: ChannelBuffers::pair_count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelBuffers {
    pub left: Vec<i16>,
    pub right: Vec<i16>,
}

impl ChannelBuffers {
    /// Number of complete left/right sample pairs.
    pub fn pair_count(&self) -> usize {
        self.right.len()
    }
}

/// Split one interleaved stereo buffer into left and right channels.
pub fn deinterleave(samples: &[i16]) -> ChannelBuffers {
    let left = samples.iter().copied().step_by(2).collect();
    let right = samples.iter().copied().skip(1).step_by(2).collect();
    ChannelBuffers { left, right }
}
