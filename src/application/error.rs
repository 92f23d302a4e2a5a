//! 应用层错误定义
//!
//! 统一的查询错误类型

use thiserror::Error;

use crate::application::ports::{CacheError, EncodeError};
use crate::domain::mp3::Mp3Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 编码失败
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// 合成结果与目标大小不符
    #[error("Synthesized episode is {actual} bytes, expected exactly {expected}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// 缓存错误
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建编码错误
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::EncodingError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<EncodeError> for ApplicationError {
    fn from(err: EncodeError) -> Self {
        Self::EncodingError(err.to_string())
    }
}

impl From<CacheError> for ApplicationError {
    fn from(err: CacheError) -> Self {
        Self::CacheError(err.to_string())
    }
}

impl From<Mp3Error> for ApplicationError {
    fn from(err: Mp3Error) -> Self {
        Self::EncodingError(err.to_string())
    }
}
