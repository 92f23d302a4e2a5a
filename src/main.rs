//! Padcast - 固定大小的"假"播客服务
//!
//! 启动流程:
//! 1. 加载配置并初始化日志
//! 2. 装载媒体库（音乐 + 广告），推导固定目标大小
//! 3. 组装编码器 / 缓存 / 查询处理器
//! 4. 启动 HTTP 服务器

use std::sync::Arc;

use padcast::config::{load_config, print_config};
use padcast::infrastructure::adapters::FrameSpliceEncoder;
// use padcast::infrastructure::adapters::{FakeSpliceEncoder, FakeSpliceEncoderConfig};
use padcast::infrastructure::http::{AppState, HttpServer, ServerConfig};
use padcast::infrastructure::media::MediaLoader;
use padcast::infrastructure::memory::InMemorySpliceCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},padcast={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Padcast - 固定大小的假播客服务");
    print_config(&config);

    // 装载媒体库（音乐缺失或损坏会让启动失败）
    let loader = MediaLoader::new(&config.media.music_dir, &config.media.ads_dir);
    let library = Arc::new(
        loader
            .load()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load media library: {}", e))?,
    );

    // 组装端口实现
    let encoder = Arc::new(FrameSpliceEncoder::new());

    // // Fake 编码器（测试用，重复首帧填满预算）
    // let encoder = Arc::new(FakeSpliceEncoder::new(FakeSpliceEncoderConfig {
    //     latency_ms: 0,
    //     fail_with: None,
    // }));

    let splice_cache = InMemorySpliceCache::new().arc();

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(library, encoder, splice_cache, &config);

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
