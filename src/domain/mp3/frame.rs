//! MPEG 音频帧扫描
//!
//! 按帧头逐帧扫描 MP3 字节流，只读取头部字段，不解码采样数据。
//! 仅支持 Layer III（MPEG1 / MPEG2 / MPEG2.5）。

/// MPEG 版本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

/// 单个帧的头部信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    /// 比特率（kbps）
    pub bitrate_kbps: u32,
    /// 采样率（Hz）
    pub sample_rate: u32,
    /// 声道数
    pub channels: u8,
    /// 帧总长度（字节，含 4 字节帧头）
    pub frame_len: usize,
    /// 本帧采样数
    pub samples: u32,
}

/// 帧在原始字节流中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpan {
    /// 帧起始偏移
    pub offset: usize,
    /// 帧长度（字节）
    pub len: usize,
    /// 本帧采样数
    pub samples: u32,
}

/// Layer III 比特率表（kbps），索引 0 为自由码率，索引 15 非法，均不支持
const BITRATES_V1: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 0,
];
const BITRATES_V2: [u32; 16] = [
    0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160, 0,
];

/// 采样率表（Hz），索引 3 为保留值
const SAMPLE_RATES_V1: [u32; 4] = [44_100, 48_000, 32_000, 0];
const SAMPLE_RATES_V2: [u32; 4] = [22_050, 24_000, 16_000, 0];
const SAMPLE_RATES_V25: [u32; 4] = [11_025, 12_000, 8_000, 0];

/// 解析一个帧头
///
/// 帧长公式（Layer III）：
/// - MPEG1:      144000 * bitrate_kbps / sample_rate + padding
/// - MPEG2/2.5:   72000 * bitrate_kbps / sample_rate + padding
pub fn parse_frame_header(bytes: &[u8]) -> Option<FrameHeader> {
    if bytes.len() < 4 {
        return None;
    }
    // 11 位同步字
    if bytes[0] != 0xFF || bytes[1] & 0xE0 != 0xE0 {
        return None;
    }

    let version = match (bytes[1] >> 3) & 0x03 {
        0b00 => MpegVersion::Mpeg25,
        0b10 => MpegVersion::Mpeg2,
        0b11 => MpegVersion::Mpeg1,
        // 0b01 为保留值
        _ => return None,
    };

    // Layer III 的 layer 位为 01
    if (bytes[1] >> 1) & 0x03 != 0b01 {
        return None;
    }

    let bitrate_index = (bytes[2] >> 4) as usize;
    let sample_rate_index = ((bytes[2] >> 2) & 0x03) as usize;

    let bitrate_kbps = match version {
        MpegVersion::Mpeg1 => BITRATES_V1[bitrate_index],
        MpegVersion::Mpeg2 | MpegVersion::Mpeg25 => BITRATES_V2[bitrate_index],
    };
    let sample_rate = match version {
        MpegVersion::Mpeg1 => SAMPLE_RATES_V1[sample_rate_index],
        MpegVersion::Mpeg2 => SAMPLE_RATES_V2[sample_rate_index],
        MpegVersion::Mpeg25 => SAMPLE_RATES_V25[sample_rate_index],
    };
    if bitrate_kbps == 0 || sample_rate == 0 {
        return None;
    }

    let padding = (bytes[2] & 0x02 != 0) as usize;
    // 声道模式 11 为单声道
    let channels = if (bytes[3] >> 6) & 0x03 == 0b11 { 1 } else { 2 };

    let (coefficient, samples) = match version {
        MpegVersion::Mpeg1 => (144_000u32, 1152u32),
        MpegVersion::Mpeg2 | MpegVersion::Mpeg25 => (72_000u32, 576u32),
    };
    let frame_len = (coefficient * bitrate_kbps / sample_rate) as usize + padding;

    Some(FrameHeader {
        version,
        bitrate_kbps,
        sample_rate,
        channels,
        frame_len,
        samples,
    })
}

/// 寻找第一个可信的帧起点
///
/// 跳过标签后若紧跟的不是合法帧头（部分文件在标签后有垃圾字节），
/// 向后逐字节搜索。为降低伪同步概率，要求帧尾紧接另一个合法帧头、
/// ID3v1 标签或文件末尾。
pub fn first_frame_offset(data: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    while pos + 4 <= data.len() {
        if let Some(header) = parse_frame_header(&data[pos..]) {
            let next = pos + header.frame_len;
            if next <= data.len() && plausible_frame_end(data, next) {
                return Some(pos);
            }
        }
        pos += 1;
    }
    None
}

fn plausible_frame_end(data: &[u8], pos: usize) -> bool {
    if pos == data.len() {
        return true;
    }
    if data[pos..].starts_with(b"TAG") {
        return true;
    }
    parse_frame_header(&data[pos..]).is_some()
}

/// 从 start 开始逐帧扫描，返回连续合法帧的位置列表
///
/// 遇到非法帧头或被截断的尾帧即停止，尾部的 ID3v1 标签和残缺数据被忽略。
pub fn scan_frames(data: &[u8], start: usize) -> Vec<FrameSpan> {
    let mut frames = Vec::new();
    let mut pos = start;

    while pos + 4 <= data.len() {
        let header = match parse_frame_header(&data[pos..]) {
            Some(h) => h,
            None => break,
        };
        if pos + header.frame_len > data.len() {
            break;
        }
        frames.push(FrameSpan {
            offset: pos,
            len: header.frame_len,
            samples: header.samples,
        });
        pos += header.frame_len;
    }

    frames
}
