//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 媒体库配置
    #[serde(default)]
    pub media: MediaConfig,

    /// 订阅源配置
    #[serde(default)]
    pub feed: FeedConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            media: MediaConfig::default(),
            feed: FeedConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（订阅源内的绝对链接以此为准）
    /// 如果未设置，则按请求的 Host 头推导，再退回 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 静态文件目录（首页 index.html 所在）
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            static_dir: default_static_dir(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 媒体库配置
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// 音乐目录（取第一首作为"单集"正片）
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,

    /// 广告目录（每次请求随机抽一条插入）
    #[serde(default = "default_ads_dir")]
    pub ads_dir: PathBuf,
}

fn default_music_dir() -> PathBuf {
    PathBuf::from("media/music")
}

fn default_ads_dir() -> PathBuf {
    PathBuf::from("media/ads")
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            music_dir: default_music_dir(),
            ads_dir: default_ads_dir(),
        }
    }
}

/// 订阅源配置
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// 频道标题
    #[serde(default = "default_feed_title")]
    pub title: String,

    /// 频道描述
    #[serde(default = "default_feed_description")]
    pub description: String,

    /// 频道语言
    #[serde(default = "default_feed_language")]
    pub language: String,
}

fn default_feed_title() -> String {
    "My pretend podcast!".to_string()
}

fn default_feed_description() -> String {
    "A pretend podcast feed!".to_string()
}

fn default_feed_language() -> String {
    "en".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: default_feed_title(),
            description: default_feed_description(),
            language: default_feed_language(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.media.music_dir, PathBuf::from("media/music"));
        assert_eq!(config.feed.title, "My pretend podcast!");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_public_base_url_falls_back_to_localhost() {
        let config = ServerConfig::default();
        assert_eq!(config.public_base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_public_base_url_prefers_configured_value() {
        let config = ServerConfig {
            base_url: Some("https://podcast.example.com".to_string()),
            ..ServerConfig::default()
        };
        assert_eq!(config.public_base_url(), "https://podcast.example.com");
    }
}
