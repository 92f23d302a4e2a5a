//! Media Loader - 启动时装载媒体库
//!
//! 从音乐目录与广告目录读取 MP3 文件并解析成 MediaLibrary。
//! 音乐缺失或损坏是致命错误；广告坏了跳过并告警，服务照常启动。

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use crate::domain::library::{MediaLibrary, Track};
use crate::domain::mp3::Mp3Track;

/// 媒体装载错误（致命，服务不应继续启动）
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("No music track found in {0}")]
    NoMusicTrack(String),

    #[error("Failed to read {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    InvalidTrack { path: String, message: String },
}

/// 媒体装载器
pub struct MediaLoader {
    music_dir: PathBuf,
    ads_dir: PathBuf,
}

impl MediaLoader {
    pub fn new(music_dir: impl Into<PathBuf>, ads_dir: impl Into<PathBuf>) -> Self {
        Self {
            music_dir: music_dir.into(),
            ads_dir: ads_dir.into(),
        }
    }

    /// 装载媒体库
    pub async fn load(&self) -> Result<MediaLibrary, AssetLoadError> {
        let music = self.load_music().await?;
        let ads = self.load_ads().await;

        if ads.is_empty() {
            warn!(
                ads_dir = %self.ads_dir.display(),
                "No usable ads found, episodes will be music only"
            );
        }

        let library = MediaLibrary::new(music, ads);
        info!(
            music = library.music().name(),
            music_bytes = library.music().size_bytes(),
            duration_ms = library.music().duration_ms(),
            ads = library.ads().len(),
            target_size = library.target_size(),
            "Media library loaded"
        );
        Ok(library)
    }

    async fn load_music(&self) -> Result<Track, AssetLoadError> {
        let files = list_mp3_files(&self.music_dir).await.map_err(|e| {
            AssetLoadError::IoError {
                path: self.music_dir.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let path = match files.first() {
            Some(path) => path,
            None => {
                return Err(AssetLoadError::NoMusicTrack(
                    self.music_dir.display().to_string(),
                ))
            }
        };
        if files.len() > 1 {
            warn!(
                count = files.len(),
                chosen = %path.display(),
                "Multiple music tracks found, using the first"
            );
        }

        load_track(path).await
    }

    async fn load_ads(&self) -> Vec<Track> {
        let files = match list_mp3_files(&self.ads_dir).await {
            Ok(files) => files,
            Err(e) => {
                warn!(
                    ads_dir = %self.ads_dir.display(),
                    error = %e,
                    "Cannot read ads directory"
                );
                return Vec::new();
            }
        };

        let mut ads = Vec::with_capacity(files.len());
        for path in &files {
            match load_track(path).await {
                Ok(track) => {
                    info!(
                        ad = track.name(),
                        bytes = track.size_bytes(),
                        duration_ms = track.duration_ms(),
                        "Ad loaded"
                    );
                    ads.push(track);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unusable ad");
                }
            }
        }
        ads
    }
}

async fn load_track(path: &Path) -> Result<Track, AssetLoadError> {
    let data = fs::read(path).await.map_err(|e| AssetLoadError::IoError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mp3 = Mp3Track::parse(data).map_err(|e| AssetLoadError::InvalidTrack {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Track::new(path, mp3))
}

/// 列出目录下的 .mp3 文件（忽略大小写），按文件名排序
async fn list_mp3_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_mp3 = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("mp3"))
            .unwrap_or(false);
        if is_mp3 && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mp3::testing::{mp3_frames, mp3_with_title};
    use tempfile::tempdir;

    async fn write_file(dir: &Path, name: &str, data: &[u8]) {
        fs::write(dir.join(name), data).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_music_and_ads() {
        let music_dir = tempdir().unwrap();
        let ads_dir = tempdir().unwrap();
        write_file(music_dir.path(), "song.mp3", &mp3_with_title(100, 128, "Song")).await;
        write_file(ads_dir.path(), "ad1.mp3", &mp3_frames(5, 128)).await;
        write_file(ads_dir.path(), "ad2.mp3", &mp3_frames(8, 128)).await;

        let loader = MediaLoader::new(music_dir.path(), ads_dir.path());
        let library = loader.load().await.unwrap();

        assert_eq!(library.music().name(), "song.mp3");
        assert_eq!(library.music().display_title(), "Song");
        assert_eq!(library.ads().len(), 2);
        assert!(library.target_size() > library.music().size_bytes());
    }

    #[tokio::test]
    async fn test_missing_music_dir_is_fatal() {
        let ads_dir = tempdir().unwrap();
        let loader = MediaLoader::new("/nonexistent/music", ads_dir.path());

        let result = loader.load().await;
        assert!(matches!(result, Err(AssetLoadError::IoError { .. })));
    }

    #[tokio::test]
    async fn test_empty_music_dir_is_fatal() {
        let music_dir = tempdir().unwrap();
        let ads_dir = tempdir().unwrap();

        let loader = MediaLoader::new(music_dir.path(), ads_dir.path());
        let result = loader.load().await;
        assert!(matches!(result, Err(AssetLoadError::NoMusicTrack(_))));
    }

    #[tokio::test]
    async fn test_corrupt_music_is_fatal() {
        let music_dir = tempdir().unwrap();
        let ads_dir = tempdir().unwrap();
        write_file(music_dir.path(), "song.mp3", b"not really audio").await;

        let loader = MediaLoader::new(music_dir.path(), ads_dir.path());
        let result = loader.load().await;
        assert!(matches!(result, Err(AssetLoadError::InvalidTrack { .. })));
    }

    #[tokio::test]
    async fn test_corrupt_ad_is_skipped() {
        let music_dir = tempdir().unwrap();
        let ads_dir = tempdir().unwrap();
        write_file(music_dir.path(), "song.mp3", &mp3_frames(50, 128)).await;
        write_file(ads_dir.path(), "good.mp3", &mp3_frames(5, 128)).await;
        write_file(ads_dir.path(), "broken.mp3", b"garbage").await;

        let loader = MediaLoader::new(music_dir.path(), ads_dir.path());
        let library = loader.load().await.unwrap();

        assert_eq!(library.ads().len(), 1);
        assert_eq!(library.ads()[0].name(), "good.mp3");
    }

    #[tokio::test]
    async fn test_missing_ads_dir_is_tolerated() {
        let music_dir = tempdir().unwrap();
        write_file(music_dir.path(), "song.mp3", &mp3_frames(50, 128)).await;

        let loader = MediaLoader::new(music_dir.path(), "/nonexistent/ads");
        let library = loader.load().await.unwrap();

        assert!(library.ads().is_empty());
        assert_eq!(library.target_size(), library.music().size_bytes());
    }

    #[tokio::test]
    async fn test_picks_first_track_alphabetically() {
        let music_dir = tempdir().unwrap();
        let ads_dir = tempdir().unwrap();
        write_file(music_dir.path(), "b_song.mp3", &mp3_frames(10, 128)).await;
        write_file(music_dir.path(), "a_song.mp3", &mp3_frames(10, 128)).await;
        write_file(music_dir.path(), "notes.txt", b"not audio").await;

        let loader = MediaLoader::new(music_dir.path(), ads_dir.path());
        let library = loader.load().await.unwrap();

        assert_eq!(library.music().name(), "a_song.mp3");
    }
}
