//! Feed Queries - 订阅源查询

/// 获取 RSS 订阅源查询
///
/// 三个 URL 均由传输层拼好，应用层不关心请求来源。
#[derive(Debug, Clone)]
pub struct GetFeedQuery {
    /// 频道主页链接
    pub site_link: String,
    /// 订阅源自身的地址
    pub self_link: String,
    /// 单集下载地址
    pub episode_url: String,
}

/// 获取 RSS 订阅源响应
#[derive(Debug, Clone)]
pub struct GetFeedResponse {
    pub xml: String,
    pub content_type: String,
}
