//! Frame Splice Encoder - 帧级 MP3 拼接编码器
//!
//! 在主音轨的时间中点插入整段广告，超出预算时从尾部丢帧压回预算。
//! 整个过程只搬运完整的帧字节，不解码、不重压缩，因此输出大小
//! 可以精确控制，速度与输出大小成正比。

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{EncodeError, SpliceEncoderPort, SpliceResult};
use crate::domain::mp3::Mp3Track;

/// 帧级拼接编码器
///
/// 丢帧顺序：先丢广告的尾帧，广告丢完后丢主音轨的尾帧。
/// 同样的输入永远产出同样的字节。
pub struct FrameSpliceEncoder;

impl FrameSpliceEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FrameSpliceEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpliceEncoderPort for FrameSpliceEncoder {
    async fn encode(
        &self,
        base: &Mp3Track,
        insert: Option<&Mp3Track>,
        max_bytes: u64,
    ) -> Result<SpliceResult, EncodeError> {
        let base_spans = base.frames();
        let insert_spans = insert.map(|t| t.frames()).unwrap_or(&[]);

        // 没有插入内容时不切分主音轨
        let mid = if insert.is_some() {
            base.midpoint_frame()
        } else {
            base.frame_count()
        };

        // 候选帧计划：base[..head] + insert[..kept_ad] + base[mid..mid+tail]
        let mut head = mid;
        let mut kept_ad = insert_spans.len();
        let mut tail = base_spans.len() - mid;

        let mut total: u64 = base.audio_len() + insert.map(|t| t.audio_len()).unwrap_or(0);
        let mut dropped = 0u32;

        while total > max_bytes {
            let span = if kept_ad > 0 {
                kept_ad -= 1;
                &insert_spans[kept_ad]
            } else if tail > 0 {
                tail -= 1;
                &base_spans[mid + tail]
            } else {
                head -= 1;
                &base_spans[head]
            };
            total -= span.len as u64;
            dropped += 1;
        }

        if head == 0 && kept_ad == 0 && tail == 0 {
            return Err(EncodeError::BudgetTooSmall { budget: max_bytes });
        }

        let mut audio = Vec::with_capacity(total as usize);
        let mut base_samples = 0u64;
        let mut insert_samples = 0u64;

        for span in &base_spans[..head] {
            audio.extend_from_slice(base.frame_bytes(span));
            base_samples += span.samples as u64;
        }
        if let Some(insert_track) = insert {
            for span in &insert_spans[..kept_ad] {
                audio.extend_from_slice(insert_track.frame_bytes(span));
                insert_samples += span.samples as u64;
            }
        }
        for span in &base_spans[mid..mid + tail] {
            audio.extend_from_slice(base.frame_bytes(span));
            base_samples += span.samples as u64;
        }

        let inserted_ms = match insert {
            Some(track) => insert_samples * 1000 / track.sample_rate() as u64,
            None => 0,
        };
        let duration_ms = base_samples * 1000 / base.sample_rate() as u64 + inserted_ms;

        debug!(
            size = audio.len(),
            max_bytes,
            dropped_frames = dropped,
            inserted_ms,
            "Spliced frames into byte budget"
        );

        Ok(SpliceResult {
            audio_data: audio,
            duration_ms,
            inserted_ms,
            dropped_frames: dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mp3::testing::mp3_frames;

    fn track(frames: usize, bitrate_kbps: u32) -> Mp3Track {
        Mp3Track::parse(mp3_frames(frames, bitrate_kbps)).unwrap()
    }

    #[tokio::test]
    async fn test_no_insert_passes_frames_through() {
        let data = mp3_frames(10, 128);
        let base = Mp3Track::parse(data.clone()).unwrap();
        let encoder = FrameSpliceEncoder::new();

        let result = encoder.encode(&base, None, 100_000).await.unwrap();
        assert_eq!(result.audio_data, data);
        assert_eq!(result.dropped_frames, 0);
        assert_eq!(result.inserted_ms, 0);
        assert_eq!(result.duration_ms, base.duration_ms());
    }

    #[tokio::test]
    async fn test_insert_lands_at_midpoint() {
        // 主音轨 10 帧 128kbps（每帧 417B），广告 2 帧 64kbps（每帧 208B）
        let base_data = mp3_frames(10, 128);
        let ad_data = mp3_frames(2, 64);
        let base = Mp3Track::parse(base_data.clone()).unwrap();
        let ad = Mp3Track::parse(ad_data.clone()).unwrap();
        let encoder = FrameSpliceEncoder::new();

        let result = encoder.encode(&base, Some(&ad), 100_000).await.unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(&base_data[..5 * 417]);
        expected.extend_from_slice(&ad_data);
        expected.extend_from_slice(&base_data[5 * 417..]);
        assert_eq!(result.audio_data, expected);
        // 2 * 1152 * 1000 / 44100 = 52
        assert_eq!(result.inserted_ms, 52);
    }

    #[tokio::test]
    async fn test_budget_drops_ad_frames_first() {
        let base_data = mp3_frames(10, 128);
        let base = Mp3Track::parse(base_data.clone()).unwrap();
        let ad = track(2, 128);
        let encoder = FrameSpliceEncoder::new();

        // 总量 12 帧 = 5004B，预算放不下任何广告帧
        let result = encoder.encode(&base, Some(&ad), 4_500).await.unwrap();

        assert_eq!(result.audio_data, base_data);
        assert_eq!(result.dropped_frames, 2);
        assert_eq!(result.inserted_ms, 0);
    }

    #[tokio::test]
    async fn test_budget_drops_partial_ad() {
        let base = track(10, 128);
        let ad = track(4, 128);
        let encoder = FrameSpliceEncoder::new();

        // 14 帧 = 5838B，预算容得下 12 帧
        let result = encoder.encode(&base, Some(&ad), 5_100).await.unwrap();

        assert_eq!(result.audio_data.len(), 12 * 417);
        assert_eq!(result.dropped_frames, 2);
        // 保留 2 帧广告
        assert_eq!(result.inserted_ms, 52);
    }

    #[tokio::test]
    async fn test_budget_drops_base_tail_after_ad() {
        let base_data = mp3_frames(10, 128);
        let base = Mp3Track::parse(base_data.clone()).unwrap();
        let ad = track(2, 128);
        let encoder = FrameSpliceEncoder::new();

        // 12 帧 = 5004B；丢完 2 帧广告还差一帧才进预算
        let result = encoder.encode(&base, Some(&ad), 3_900).await.unwrap();

        assert_eq!(result.audio_data, base_data[..9 * 417].to_vec());
        assert_eq!(result.dropped_frames, 3);
        assert_eq!(result.inserted_ms, 0);
        // 9 * 1152 * 1000 / 44100 = 235
        assert_eq!(result.duration_ms, 235);
    }

    #[tokio::test]
    async fn test_budget_truncates_plain_track() {
        let base_data = mp3_frames(10, 128);
        let base = Mp3Track::parse(base_data.clone()).unwrap();
        let encoder = FrameSpliceEncoder::new();

        let result = encoder.encode(&base, None, 4_000).await.unwrap();

        // 丢掉最后一帧
        assert_eq!(result.audio_data, base_data[..9 * 417].to_vec());
        assert_eq!(result.dropped_frames, 1);
    }

    #[tokio::test]
    async fn test_budget_too_small_for_any_frame() {
        let base = track(10, 128);
        let encoder = FrameSpliceEncoder::new();

        let result = encoder.encode(&base, None, 100).await;
        assert!(matches!(result, Err(EncodeError::BudgetTooSmall { budget: 100 })));
    }

    #[tokio::test]
    async fn test_output_never_exceeds_budget() {
        let base = track(10, 128);
        let ad = track(3, 128);
        let encoder = FrameSpliceEncoder::new();

        for budget in [417u64, 1_000, 2_085, 4_169, 4_170, 5_421, 100_000] {
            let result = encoder.encode(&base, Some(&ad), budget).await.unwrap();
            assert!(
                result.audio_data.len() as u64 <= budget,
                "{} bytes over budget {}",
                result.audio_data.len(),
                budget
            );
        }
    }

    #[tokio::test]
    async fn test_encode_is_deterministic() {
        let base = track(20, 128);
        let ad = track(5, 128);
        let encoder = FrameSpliceEncoder::new();

        let first = encoder.encode(&base, Some(&ad), 9_000).await.unwrap();
        let second = encoder.encode(&base, Some(&ad), 9_000).await.unwrap();
        assert_eq!(first.audio_data, second.audio_data);
        assert_eq!(first.dropped_frames, second.dropped_frames);
    }
}
