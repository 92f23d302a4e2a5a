//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod http;
pub mod media;
pub mod memory;

pub use adapters::{FakeSpliceEncoder, FrameSpliceEncoder};
pub use media::{AssetLoadError, MediaLoader};
pub use memory::InMemorySpliceCache;
