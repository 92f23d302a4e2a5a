//! MP3 字节流领域模型
//!
//! 以"标签 + 帧序列"的视角看待 MP3 文件，支撑按字节预算的帧级拼接。
//! 只读取帧头与标签结构，不解码任何音频采样。

mod frame;
mod id3;

pub use frame::{first_frame_offset, parse_frame_header, scan_frames, FrameHeader, FrameSpan, MpegVersion};
pub use id3::{padding_tag, read_tag_info, tag_len, TagInfo, PADDING_TAG_MIN};

use thiserror::Error;

/// MP3 解析 / 生成错误
#[derive(Debug, Error)]
pub enum Mp3Error {
    #[error("No MPEG audio frames found")]
    NoFrames,

    #[error("Padding tag cannot fit in {requested} bytes (minimum {minimum})")]
    PaddingTooSmall { requested: usize, minimum: usize },

    #[error("Padding tag of {requested} bytes exceeds the ID3v2 size limit")]
    PaddingTooLarge { requested: usize },
}

/// 解析后的 MP3 音轨
///
/// 持有完整文件字节，并记录每个音频帧在其中的位置。
/// 采样率、比特率与声道数取自第一帧。
#[derive(Debug, Clone)]
pub struct Mp3Track {
    data: Vec<u8>,
    frames: Vec<FrameSpan>,
    sample_rate: u32,
    channels: u8,
    bitrate_kbps: u32,
    total_samples: u64,
    tag: TagInfo,
}

impl Mp3Track {
    /// 解析完整的 MP3 文件字节
    ///
    /// 跳过头部 ID3v2 标签后逐帧扫描，至少需要一个合法帧。
    pub fn parse(data: Vec<u8>) -> Result<Self, Mp3Error> {
        let tag = read_tag_info(&data);
        let audio_start = tag_len(&data);
        let first = first_frame_offset(&data, audio_start).ok_or(Mp3Error::NoFrames)?;
        let frames = scan_frames(&data, first);
        let header = frames
            .first()
            .and_then(|f| parse_frame_header(&data[f.offset..]))
            .ok_or(Mp3Error::NoFrames)?;
        let total_samples = frames.iter().map(|f| f.samples as u64).sum();

        Ok(Self {
            data,
            frames,
            sample_rate: header.sample_rate,
            channels: header.channels,
            bitrate_kbps: header.bitrate_kbps,
            total_samples,
            tag,
        })
    }

    /// 原始文件大小（字节，含标签）
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }

    /// 所有音频帧的字节数之和（不含标签与尾部数据）
    pub fn audio_len(&self) -> u64 {
        self.frames.iter().map(|f| f.len as u64).sum()
    }

    pub fn frames(&self) -> &[FrameSpan] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// 某个帧对应的字节切片
    pub fn frame_bytes(&self, span: &FrameSpan) -> &[u8] {
        &self.data[span.offset..span.offset + span.len]
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// 第一帧的标称比特率（kbps），VBR 文件取首帧值
    pub fn bitrate_kbps(&self) -> u32 {
        self.bitrate_kbps
    }

    pub fn duration_ms(&self) -> u64 {
        self.total_samples * 1000 / self.sample_rate as u64
    }

    pub fn title(&self) -> Option<&str> {
        self.tag.title.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.tag.comment.as_deref()
    }

    /// 时间中点所在的帧边界（按累计采样数对半）
    ///
    /// 返回值 n 表示前 n 帧属于前半段，在 n 处切开即是中点。
    pub fn midpoint_frame(&self) -> usize {
        let half = self.total_samples / 2;
        let mut acc = 0u64;
        for (i, f) in self.frames.iter().enumerate() {
            acc += f.samples as u64;
            if acc >= half {
                return i + 1;
            }
        }
        self.frames.len()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! 测试用的合成 MP3 构造工具

    use super::{padding_tag, Mp3Track};

    /// 单个 MPEG1 Layer III 帧（44.1kHz 立体声），帧体为零字节
    pub fn mp3_frame(bitrate_kbps: u32) -> Vec<u8> {
        let index = [32u32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320]
            .iter()
            .position(|&b| b == bitrate_kbps)
            .map(|i| i + 1)
            .unwrap_or_else(|| panic!("unsupported test bitrate: {}", bitrate_kbps));
        let len = (144_000 * bitrate_kbps / 44_100) as usize;
        let mut frame = vec![0u8; len];
        frame[0] = 0xFF;
        frame[1] = 0xFB;
        frame[2] = (index as u8) << 4;
        frame
    }

    /// count 个连续帧组成的裸 MP3 字节流
    pub fn mp3_frames(count: usize, bitrate_kbps: u32) -> Vec<u8> {
        let frame = mp3_frame(bitrate_kbps);
        let mut data = Vec::with_capacity(frame.len() * count);
        for _ in 0..count {
            data.extend_from_slice(&frame);
        }
        data
    }

    /// 总长度恰好为 total 字节的 MP3：填充标签 + 整帧序列
    pub fn mp3_of_size(total: usize, bitrate_kbps: u32) -> Vec<u8> {
        let frame_len = mp3_frame(bitrate_kbps).len();
        assert!(
            total >= 29 + frame_len,
            "size {} cannot hold a tag and a frame",
            total
        );
        let count = (total - 29) / frame_len;
        let tag_len = total - count * frame_len;
        let mut data = padding_tag(tag_len).unwrap();
        data.extend_from_slice(&mp3_frames(count, bitrate_kbps));
        assert_eq!(data.len(), total);
        data
    }

    /// 构造 v2.3 标签，frames 为 (帧 ID, 帧体) 列表
    pub fn id3v23_tag(frames: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (id, frame_body) in frames {
            body.extend_from_slice(*id);
            body.extend_from_slice(&(frame_body.len() as u32).to_be_bytes());
            body.extend_from_slice(&[0x00, 0x00]);
            body.extend_from_slice(frame_body);
        }
        let size = body.len();
        let mut tag = Vec::with_capacity(10 + size);
        tag.extend_from_slice(b"ID3");
        tag.extend_from_slice(&[0x03, 0x00, 0x00]);
        tag.extend_from_slice(&[
            ((size >> 21) & 0x7F) as u8,
            ((size >> 14) & 0x7F) as u8,
            ((size >> 7) & 0x7F) as u8,
            (size & 0x7F) as u8,
        ]);
        tag.extend_from_slice(&body);
        tag
    }

    /// 带 UTF-8 标题标签的完整 MP3
    pub fn mp3_with_title(count: usize, bitrate_kbps: u32, title: &str) -> Vec<u8> {
        let mut tit2 = vec![0x03];
        tit2.extend_from_slice(title.as_bytes());
        let mut data = id3v23_tag(&[(b"TIT2", tit2)]);
        data.extend_from_slice(&mp3_frames(count, bitrate_kbps));
        data
    }

    /// 解析好的合成音轨
    pub fn track(count: usize, bitrate_kbps: u32) -> Mp3Track {
        Mp3Track::parse(mp3_frames(count, bitrate_kbps)).unwrap()
    }
}
