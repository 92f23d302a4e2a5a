//! 媒体装载模块

pub mod loader;

pub use loader::{AssetLoadError, MediaLoader};
