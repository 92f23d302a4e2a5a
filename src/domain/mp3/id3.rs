//! ID3v2 标签读写
//!
//! 只实现本服务需要的最小子集：
//! - 计算文件头部标签的总长度，用于定位第一个音频帧
//! - 读取 TIT2（标题）与 COMM（注释）文本帧
//! - 生成指定总长度的纯填充标签（单个 TXXX 帧 + 零字节）

use super::Mp3Error;

/// 标签头长度
const TAG_HEADER_LEN: usize = 10;
/// 帧头长度（v2.3 / v2.4）
const FRAME_HEADER_LEN: usize = 10;
/// syncsafe 整数上限（28 位）
const SYNCSAFE_MAX: usize = 0x0FFF_FFFF;

/// 填充标签的最小总长度：
/// 标签头 10 + TXXX 帧头 10 + 编码字节 1 + "padding\0" 描述 8
pub const PADDING_TAG_MIN: usize = 29;

/// 从标签中读出的文本信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInfo {
    /// TIT2 标题
    pub title: Option<String>,
    /// COMM 注释正文
    pub comment: Option<String>,
}

/// 文件头部 ID3v2 标签的总长度（含标签头与可选的尾部）
///
/// 没有标签时返回 0。长度按头部声明计算并截断到数据范围内。
pub fn tag_len(data: &[u8]) -> usize {
    if data.len() < TAG_HEADER_LEN || !data.starts_with(b"ID3") {
        return 0;
    }
    let size = decode_syncsafe([data[6], data[7], data[8], data[9]]);
    // footer 标志位
    let footer = if data[5] & 0x10 != 0 { TAG_HEADER_LEN } else { 0 };
    (TAG_HEADER_LEN + size + footer).min(data.len())
}

/// 读取标签中的标题与注释
///
/// 不认识的帧被跳过；没有标签、版本不支持或启用了 unsynchronisation
/// 时返回空信息。标签损坏只会让解析提前结束，不会报错。
pub fn read_tag_info(data: &[u8]) -> TagInfo {
    let total = tag_len(data);
    if total == 0 {
        return TagInfo::default();
    }
    let version = data[3];
    let flags = data[5];
    // unsynchronisation 会改写帧内容，这里不做还原
    if flags & 0x80 != 0 || !(3..=4).contains(&version) {
        return TagInfo::default();
    }

    let mut pos = TAG_HEADER_LEN;
    // 扩展头
    if flags & 0x40 != 0 {
        pos += extended_header_len(version, &data[pos..]);
    }

    let mut info = TagInfo::default();
    let end = total.min(data.len());
    while pos + FRAME_HEADER_LEN <= end {
        let id = &data[pos..pos + 4];
        // 进入填充区
        if id[0] == 0 {
            break;
        }
        let raw = [data[pos + 4], data[pos + 5], data[pos + 6], data[pos + 7]];
        // v2.4 帧长为 syncsafe，v2.3 为普通大端整数
        let size = if version == 4 {
            decode_syncsafe(raw)
        } else {
            u32::from_be_bytes(raw) as usize
        };
        let body_start = pos + FRAME_HEADER_LEN;
        let body_end = match body_start.checked_add(size) {
            Some(e) if e <= end => e,
            _ => break,
        };
        let body = &data[body_start..body_end];

        match id {
            b"TIT2" if info.title.is_none() && !body.is_empty() => {
                info.title = decode_text(body[0], &body[1..]);
            }
            b"COMM" if info.comment.is_none() => {
                info.comment = parse_comment(body);
            }
            _ => {}
        }
        pos = body_end;
    }

    info
}

/// 生成总长度恰好为 `total_len` 字节的 ID3v2.3 填充标签
///
/// 结构：标签头 + 一个 TXXX 帧（描述 "padding"，正文为零字节）。
/// 解码器会跳过整个标签，因此任意大小的填充都不影响播放。
pub fn padding_tag(total_len: usize) -> Result<Vec<u8>, Mp3Error> {
    if total_len < PADDING_TAG_MIN {
        return Err(Mp3Error::PaddingTooSmall {
            requested: total_len,
            minimum: PADDING_TAG_MIN,
        });
    }
    let tag_size = total_len - TAG_HEADER_LEN;
    if tag_size > SYNCSAFE_MAX {
        return Err(Mp3Error::PaddingTooLarge { requested: total_len });
    }
    // 编码字节 + "padding\0" + 零字节正文
    let frame_body = total_len - TAG_HEADER_LEN - FRAME_HEADER_LEN;

    let mut tag = Vec::with_capacity(total_len);
    tag.extend_from_slice(b"ID3");
    tag.extend_from_slice(&[0x03, 0x00, 0x00]);
    tag.extend_from_slice(&encode_syncsafe(tag_size));
    tag.extend_from_slice(b"TXXX");
    tag.extend_from_slice(&(frame_body as u32).to_be_bytes());
    tag.extend_from_slice(&[0x00, 0x00]);
    tag.push(0x00);
    tag.extend_from_slice(b"padding\0");
    tag.resize(total_len, 0x00);
    Ok(tag)
}

fn decode_syncsafe(bytes: [u8; 4]) -> usize {
    ((bytes[0] & 0x7F) as usize) << 21
        | ((bytes[1] & 0x7F) as usize) << 14
        | ((bytes[2] & 0x7F) as usize) << 7
        | (bytes[3] & 0x7F) as usize
}

fn encode_syncsafe(value: usize) -> [u8; 4] {
    [
        ((value >> 21) & 0x7F) as u8,
        ((value >> 14) & 0x7F) as u8,
        ((value >> 7) & 0x7F) as u8,
        (value & 0x7F) as u8,
    ]
}

fn extended_header_len(version: u8, body: &[u8]) -> usize {
    if body.len() < 4 {
        return 0;
    }
    let raw = [body[0], body[1], body[2], body[3]];
    if version == 4 {
        // v2.4 长度字段包含自身
        decode_syncsafe(raw)
    } else {
        // v2.3 长度字段不含自身的 4 字节
        4 + u32::from_be_bytes(raw) as usize
    }
}

/// COMM 帧：编码字节 + 3 字节语言码 + 描述（带终止符）+ 正文
fn parse_comment(body: &[u8]) -> Option<String> {
    if body.len() < 4 {
        return None;
    }
    let encoding = body[0];
    let rest = &body[4..];
    let text = match encoding {
        0 | 3 => {
            let term = rest.iter().position(|&b| b == 0)?;
            &rest[term + 1..]
        }
        1 | 2 => {
            // UTF-16 使用 2 字节终止符，按 16 位单元对齐
            let mut i = 0;
            loop {
                if i + 2 > rest.len() {
                    return None;
                }
                if rest[i] == 0 && rest[i + 1] == 0 {
                    break;
                }
                i += 2;
            }
            &rest[i + 2..]
        }
        _ => return None,
    };
    decode_text(encoding, text)
}

fn decode_text(encoding: u8, bytes: &[u8]) -> Option<String> {
    let text = match encoding {
        // Latin-1
        0 => bytes.iter().map(|&b| b as char).collect::<String>(),
        1 | 2 => decode_utf16(encoding, bytes)?,
        // UTF-8
        3 => String::from_utf8_lossy(bytes).into_owned(),
        _ => return None,
    };
    let trimmed = text.trim_end_matches('\0').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn decode_utf16(encoding: u8, bytes: &[u8]) -> Option<String> {
    let (big_endian, content) = if encoding == 2 {
        (true, bytes)
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        (true, &bytes[2..])
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        (false, &bytes[2..])
    } else {
        (false, bytes)
    };
    let units: Vec<u16> = content
        .chunks_exact(2)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    Some(String::from_utf16_lossy(&units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mp3::testing::id3v23_tag;

    #[test]
    fn test_padding_tag_exact_sizes() {
        for size in [PADDING_TAG_MIN, 30, 100, 4096, 1_000_000] {
            let tag = padding_tag(size).unwrap();
            assert_eq!(tag.len(), size, "padding tag of {} bytes", size);
        }
    }

    #[test]
    fn test_padding_tag_rejects_undersized_request() {
        assert!(padding_tag(0).is_err());
        assert!(padding_tag(PADDING_TAG_MIN - 1).is_err());
    }

    #[test]
    fn test_padding_tag_parses_back() {
        let tag = padding_tag(512).unwrap();
        assert_eq!(tag_len(&tag), 512);
        // 填充标签里没有 TIT2/COMM
        assert_eq!(read_tag_info(&tag), TagInfo::default());
    }

    #[test]
    fn test_padding_tag_followed_by_audio_is_skipped() {
        let mut data = padding_tag(200).unwrap();
        data.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        assert_eq!(tag_len(&data), 200);
    }

    #[test]
    fn test_tag_len_without_tag() {
        assert_eq!(tag_len(b"not an mp3"), 0);
        assert_eq!(tag_len(&[]), 0);
        assert_eq!(tag_len(&[0xFF, 0xFB, 0x90, 0x00]), 0);
    }

    #[test]
    fn test_syncsafe_round_trip() {
        for value in [0usize, 1, 127, 128, 0x3FFF, 0x4000, SYNCSAFE_MAX] {
            assert_eq!(decode_syncsafe(encode_syncsafe(value)), value);
        }
    }

    #[test]
    fn test_read_title_and_comment_v23() {
        let mut tit2 = vec![0x00];
        tit2.extend_from_slice(b"Test Song");
        let mut comm = vec![0x00];
        comm.extend_from_slice(b"eng");
        comm.push(0x00); // 空描述
        comm.extend_from_slice(b"A comment");
        let tag = id3v23_tag(&[(b"TIT2", tit2), (b"COMM", comm)]);

        let info = read_tag_info(&tag);
        assert_eq!(info.title.as_deref(), Some("Test Song"));
        assert_eq!(info.comment.as_deref(), Some("A comment"));
    }

    #[test]
    fn test_read_utf16_title() {
        let mut tit2 = vec![0x01, 0xFF, 0xFE];
        for unit in "你好".encode_utf16() {
            tit2.extend_from_slice(&unit.to_le_bytes());
        }
        let tag = id3v23_tag(&[(b"TIT2", tit2)]);

        let info = read_tag_info(&tag);
        assert_eq!(info.title.as_deref(), Some("你好"));
    }

    #[test]
    fn test_read_tag_info_v24_syncsafe_frame_size() {
        // 手工构造 v2.4 标签，帧长使用 syncsafe 编码
        let mut body = vec![0x03];
        body.extend_from_slice("Hello".as_bytes());
        let mut tag = Vec::new();
        tag.extend_from_slice(b"ID3");
        tag.extend_from_slice(&[0x04, 0x00, 0x00]);
        tag.extend_from_slice(&encode_syncsafe(FRAME_HEADER_LEN + body.len()));
        tag.extend_from_slice(b"TIT2");
        tag.extend_from_slice(&encode_syncsafe(body.len()));
        tag.extend_from_slice(&[0x00, 0x00]);
        tag.extend_from_slice(&body);

        let info = read_tag_info(&tag);
        assert_eq!(info.title.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_corrupt_frame_size_stops_parsing() {
        // 帧长声明超出标签范围
        let mut tag = Vec::new();
        tag.extend_from_slice(b"ID3");
        tag.extend_from_slice(&[0x03, 0x00, 0x00]);
        tag.extend_from_slice(&encode_syncsafe(20));
        tag.extend_from_slice(b"TIT2");
        tag.extend_from_slice(&0xFFFF_FFFFu32.to_be_bytes());
        tag.extend_from_slice(&[0x00, 0x00]);

        assert_eq!(read_tag_info(&tag), TagInfo::default());
    }
}
