//! 媒体库领域模型
//!
//! 一首音乐 + 若干广告，外加由两者大小派生的固定目标大小。
//! 库在启动时装载一次，此后只读。

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rand::Rng;

use super::mp3::Mp3Track;

/// 一条已加载的音轨（音乐或广告）
#[derive(Debug, Clone)]
pub struct Track {
    /// 文件名（含扩展名）
    name: String,
    /// 来源路径
    source: PathBuf,
    mp3: Mp3Track,
}

impl Track {
    pub fn new(source: impl Into<PathBuf>, mp3: Mp3Track) -> Self {
        let source = source.into();
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown.mp3".to_string());
        Self { name, source, mp3 }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn mp3(&self) -> &Mp3Track {
        &self.mp3
    }

    pub fn size_bytes(&self) -> u64 {
        self.mp3.size_bytes()
    }

    pub fn duration_ms(&self) -> u64 {
        self.mp3.duration_ms()
    }

    pub fn comment(&self) -> Option<&str> {
        self.mp3.comment()
    }

    /// 缓存 key 使用的稳定标识
    pub fn key(&self) -> String {
        self.source.to_string_lossy().into_owned()
    }

    /// 展示用标题：TIT2 标签优先，退回文件主名
    pub fn display_title(&self) -> &str {
        self.mp3.title().unwrap_or_else(|| {
            self.name
                .rsplit_once('.')
                .map(|(stem, _)| stem)
                .unwrap_or(&self.name)
        })
    }
}

/// 派生固定目标大小：取「音乐 + 最大广告」与「音乐的 1.1 倍」中较小者
pub fn derive_target_size(music_bytes: u64, ad_sizes: impl IntoIterator<Item = u64>) -> u64 {
    let largest_ad = ad_sizes.into_iter().max().unwrap_or(0);
    (music_bytes + largest_ad).min(music_bytes + music_bytes / 10)
}

/// 启动时装载的媒体库
#[derive(Debug)]
pub struct MediaLibrary {
    music: Track,
    ads: Vec<Track>,
    target_size: u64,
    loaded_at: DateTime<Utc>,
}

impl MediaLibrary {
    pub fn new(music: Track, ads: Vec<Track>) -> Self {
        let target_size =
            derive_target_size(music.size_bytes(), ads.iter().map(|a| a.size_bytes()));
        Self {
            music,
            ads,
            target_size,
            loaded_at: Utc::now(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_target_size(music: Track, ads: Vec<Track>, target_size: u64) -> Self {
        Self {
            music,
            ads,
            target_size,
            loaded_at: Utc::now(),
        }
    }

    pub fn music(&self) -> &Track {
        &self.music
    }

    pub fn ads(&self) -> &[Track] {
        &self.ads
    }

    /// 每次响应必须恰好命中的字节数
    pub fn target_size(&self) -> u64 {
        self.target_size
    }

    /// 装载时刻，作为单集的发布时间
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// 随机挑选一条广告，库中没有广告时返回 None
    pub fn random_ad(&self) -> Option<&Track> {
        if self.ads.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..self.ads.len());
        self.ads.get(index)
    }
}
