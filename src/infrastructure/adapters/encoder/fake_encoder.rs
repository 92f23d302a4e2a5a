//! Fake Splice Encoder - 用于测试的拼接编码器
//!
//! 不做真正的拼接，把主音轨的第一帧重复到预算能容纳的整帧数。
//! 输出依然遵守「不超过 max_bytes」的端口契约。

use async_trait::async_trait;

use crate::application::ports::{EncodeError, SpliceEncoderPort, SpliceResult};
use crate::domain::mp3::Mp3Track;

/// Fake Splice Encoder 配置
#[derive(Debug, Clone, Default)]
pub struct FakeSpliceEncoderConfig {
    /// 模拟的编码延迟（毫秒）
    pub latency_ms: u64,
    /// 设置后每次调用都以该消息失败
    pub fail_with: Option<String>,
}

/// Fake Splice Encoder
pub struct FakeSpliceEncoder {
    config: FakeSpliceEncoderConfig,
}

impl FakeSpliceEncoder {
    pub fn new(config: FakeSpliceEncoderConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeSpliceEncoderConfig::default())
    }
}

#[async_trait]
impl SpliceEncoderPort for FakeSpliceEncoder {
    async fn encode(
        &self,
        base: &Mp3Track,
        insert: Option<&Mp3Track>,
        max_bytes: u64,
    ) -> Result<SpliceResult, EncodeError> {
        tracing::debug!(
            insert = insert.is_some(),
            max_bytes,
            "FakeSpliceEncoder: repeating first frame"
        );

        if let Some(message) = &self.config.fail_with {
            return Err(EncodeError::EncodingError(message.clone()));
        }
        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        let first = base
            .frames()
            .first()
            .copied()
            .ok_or_else(|| EncodeError::InvalidInput("Base track has no frames".to_string()))?;
        let frame = base.frame_bytes(&first);

        let count = (max_bytes as usize) / frame.len();
        if count == 0 {
            return Err(EncodeError::BudgetTooSmall { budget: max_bytes });
        }

        let mut audio = Vec::with_capacity(count * frame.len());
        for _ in 0..count {
            audio.extend_from_slice(frame);
        }

        Ok(SpliceResult {
            audio_data: audio,
            duration_ms: count as u64 * first.samples as u64 * 1000 / base.sample_rate() as u64,
            inserted_ms: 0,
            dropped_frames: 0,
        })
    }
}
