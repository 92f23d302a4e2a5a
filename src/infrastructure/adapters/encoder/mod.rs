//! Encoder Adapter - 拼接编码器实现

mod fake_encoder;
mod frame_splicer;

pub use fake_encoder::{FakeSpliceEncoder, FakeSpliceEncoderConfig};
pub use frame_splicer::FrameSpliceEncoder;
