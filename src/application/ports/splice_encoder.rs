//! Splice Encoder Port - 拼接编码抽象
//!
//! 定义「给定原始音频与字节预算，产出不超过预算的编码结果」的抽象接口。
//! 实现方自行决定插入位置与压缩策略，但产出大小必须 <= max_bytes。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::mp3::Mp3Track;

/// 拼接编码错误
#[derive(Debug, Error)]
pub enum EncodeError {
    /// 预算连一个音频帧都放不下
    #[error("Byte budget of {budget} bytes cannot hold any audio")]
    BudgetTooSmall { budget: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// 拼接编码结果
#[derive(Debug, Clone)]
pub struct SpliceResult {
    /// 编码后的音频帧字节（不含任何标签）
    pub audio_data: Vec<u8>,
    /// 输出时长（毫秒）
    pub duration_ms: u64,
    /// 插入内容占用的时长（毫秒）
    pub inserted_ms: u64,
    /// 为满足预算而丢弃的帧数
    pub dropped_frames: u32,
}

/// Splice Encoder Port
///
/// 把插入内容混入主音轨并压入字节预算的抽象接口
#[async_trait]
pub trait SpliceEncoderPort: Send + Sync {
    /// 拼接并编码
    ///
    /// # Arguments
    /// * `base` - 主音轨
    /// * `insert` - 要插入的音轨，None 表示只编码主音轨
    /// * `max_bytes` - 产出的字节数上限
    ///
    /// # Returns
    /// 长度不超过 `max_bytes` 的音频数据和统计信息
    async fn encode(
        &self,
        base: &Mp3Track,
        insert: Option<&Mp3Track>,
        max_bytes: u64,
    ) -> Result<SpliceResult, EncodeError>;
}
