//! Feed Query Handlers - 订阅源渲染

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::queries::episode_queries::EPISODE_MIME_TYPE;
use crate::application::queries::feed_queries::{GetFeedQuery, GetFeedResponse};
use crate::domain::feed::{render_rss, EpisodeItem, FeedDocument};
use crate::domain::library::MediaLibrary;

/// GetFeed Handler - 渲染 RSS 订阅源
///
/// enclosure 的 length 永远取媒体库的固定目标大小，从不测量音频。
pub struct GetFeedHandler {
    library: Arc<MediaLibrary>,
    title: String,
    description: String,
    language: String,
}

impl GetFeedHandler {
    pub fn new(
        library: Arc<MediaLibrary>,
        title: impl Into<String>,
        description: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            library,
            title: title.into(),
            description: description.into(),
            language: language.into(),
        }
    }

    pub async fn handle(&self, query: GetFeedQuery) -> Result<GetFeedResponse, ApplicationError> {
        let music = self.library.music();

        let episode = EpisodeItem {
            title: music.display_title().to_string(),
            description: music.comment().unwrap_or(music.name()).to_string(),
            url: query.episode_url,
            // 发布时间固定为装载时刻，重复请求才能逐字节一致
            pub_date: self.library.loaded_at(),
            enclosure_length: self.library.target_size(),
            mime_type: EPISODE_MIME_TYPE.to_string(),
        };

        let doc = FeedDocument {
            title: self.title.clone(),
            description: self.description.clone(),
            link: query.site_link,
            self_link: query.self_link,
            language: self.language.clone(),
            episode,
        };

        Ok(GetFeedResponse {
            xml: render_rss(&doc),
            content_type: "application/rss+xml".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::library::Track;
    use crate::domain::mp3::testing::{mp3_frames, mp3_with_title};
    use crate::domain::mp3::Mp3Track;

    fn test_query() -> GetFeedQuery {
        GetFeedQuery {
            site_link: "http://example.test/".to_string(),
            self_link: "http://example.test/rss".to_string(),
            episode_url: "http://example.test/pretend_podcast_that_is_actually_music".to_string(),
        }
    }

    fn test_handler(library: MediaLibrary) -> GetFeedHandler {
        GetFeedHandler::new(
            Arc::new(library),
            "My pretend podcast!",
            "A pretend podcast feed!",
            "en",
        )
    }

    #[tokio::test]
    async fn test_enclosure_length_is_target_size_not_measured() {
        let music = Track::new(
            "/media/music/song.mp3",
            Mp3Track::parse(mp3_frames(10, 128)).unwrap(),
        );
        // 显式目标与文件实际大小无关
        let library = MediaLibrary::with_target_size(music, Vec::new(), 123_456_789);

        let handler = test_handler(library);
        let response = handler.handle(test_query()).await.unwrap();

        assert!(response.xml.contains("length=\"123456789\""));
        assert_eq!(response.content_type, "application/rss+xml");
    }

    #[tokio::test]
    async fn test_feed_uses_tag_title_and_request_urls() {
        let music = Track::new(
            "/media/music/song.mp3",
            Mp3Track::parse(mp3_with_title(10, 128, "Night Drive")).unwrap(),
        );
        let library = MediaLibrary::new(music, Vec::new());

        let handler = test_handler(library);
        let response = handler.handle(test_query()).await.unwrap();

        assert!(response.xml.contains("<title>My pretend podcast!</title>"));
        assert!(response.xml.contains("<title>Night Drive</title>"));
        assert!(response
            .xml
            .contains("url=\"http://example.test/pretend_podcast_that_is_actually_music\""));
        assert!(response.xml.contains(
            "<atom:link href=\"http://example.test/rss\" rel=\"self\" type=\"application/rss+xml\"/>"
        ));
    }

    #[tokio::test]
    async fn test_feed_is_byte_identical_across_requests() {
        let music = Track::new(
            "/media/music/song.mp3",
            Mp3Track::parse(mp3_frames(10, 128)).unwrap(),
        );
        let library = MediaLibrary::new(music, Vec::new());
        let handler = test_handler(library);

        let first = handler.handle(test_query()).await.unwrap();
        let second = handler.handle(test_query()).await.unwrap();
        assert_eq!(first.xml, second.xml);
    }
}
