//! RSS 2.0 频道渲染
//!
//! 纯数据到 XML 字符串的转换，无 IO、无异步。
//! enclosure 的 length 直接取调用方给定的固定值，渲染过程从不测量媒体。

use std::fmt::Write;

use chrono::{DateTime, Utc};

/// 频道字段与唯一的单集条目
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub title: String,
    pub description: String,
    /// 频道主页链接（服务根地址）
    pub link: String,
    /// atom:link rel="self" 指向的订阅地址
    pub self_link: String,
    pub language: String,
    pub episode: EpisodeItem,
}

/// 单集条目
#[derive(Debug, Clone)]
pub struct EpisodeItem {
    pub title: String,
    pub description: String,
    /// enclosure 下载地址
    pub url: String,
    pub pub_date: DateTime<Utc>,
    /// enclosure 声明的字节数，恒等于服务的固定目标大小
    pub enclosure_length: u64,
    pub mime_type: String,
}

/// 渲染 RSS 2.0 文档
///
/// 输出只由输入决定：相同的 FeedDocument 渲染出字节级一致的 XML。
pub fn render_rss(doc: &FeedDocument) -> String {
    let mut xml = String::with_capacity(1024);

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
    xml.push_str("  <channel>\n");

    let _ = writeln!(xml, "    <title>{}</title>", xml_escape(&doc.title));
    let _ = writeln!(xml, "    <link>{}</link>", xml_escape(&doc.link));
    let _ = writeln!(
        xml,
        "    <description>{}</description>",
        xml_escape(&doc.description)
    );
    let _ = writeln!(xml, "    <language>{}</language>", xml_escape(&doc.language));
    let _ = writeln!(
        xml,
        "    <generator>padcast {}</generator>",
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(
        xml,
        "    <lastBuildDate>{}</lastBuildDate>",
        doc.episode.pub_date.to_rfc2822()
    );
    let _ = writeln!(
        xml,
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>",
        xml_escape(&doc.self_link)
    );

    let episode = &doc.episode;
    xml.push_str("    <item>\n");
    let _ = writeln!(xml, "      <title>{}</title>", xml_escape(&episode.title));
    let _ = writeln!(
        xml,
        "      <description>{}</description>",
        xml_escape(&episode.description)
    );
    let _ = writeln!(
        xml,
        "      <guid isPermaLink=\"false\">{}</guid>",
        xml_escape(&episode.url)
    );
    let _ = writeln!(
        xml,
        "      <enclosure url=\"{}\" length=\"{}\" type=\"{}\"/>",
        xml_escape(&episode.url),
        episode.enclosure_length,
        xml_escape(&episode.mime_type)
    );
    let _ = writeln!(xml, "      <pubDate>{}</pubDate>", episode.pub_date.to_rfc2822());
    xml.push_str("    </item>\n");

    xml.push_str("  </channel>\n");
    xml.push_str("</rss>\n");

    xml
}

/// 转义 XML 文本与属性值
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
