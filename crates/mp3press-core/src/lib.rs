pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod util;
pub mod verbose;
pub mod wav;

pub use encoder::{EncoderConfig, FrameEncoder, backend_version, create_encoder};
pub use error::EncodeError;
pub use pipeline::{
    BLOCK_SAMPLES, ChannelBuffers, EncodeStats, EncoderSession, FrameSink, SampleSource,
    deinterleave,
};
pub use util::{pcm_bit_rate, pcm_duration};
pub use verbose::set_verbose;
pub use wav::pcm_to_wav;
