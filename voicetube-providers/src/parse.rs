use anyhow::Context;
use serde::Deserialize;
use voicetube_core::types::VideoResult;

#[derive(Debug, Deserialize)]
struct YouTubeSearchResponse {
    #[serde(default)]
    items: Vec<YouTubeItem>,
}

#[derive(Debug, Deserialize)]
struct YouTubeItem {
    id: YouTubeItemId,
    snippet: YouTubeSnippet,
}

#[derive(Debug, Deserialize)]
struct YouTubeItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YouTubeSnippet {
    #[serde(default)]
    title: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    #[serde(default)]
    thumbnails: YouTubeThumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct YouTubeThumbnails {
    medium: Option<YouTubeThumbnail>,
    high: Option<YouTubeThumbnail>,
    default: Option<YouTubeThumbnail>,
}

#[derive(Debug, Deserialize)]
struct YouTubeThumbnail {
    url: String,
}

/// Maps a `search.list` body to results, preserving provider order.
///
/// Items that are not videos (no `id.videoId`) are skipped. A body without
/// `items` is an empty list, not an error.
pub fn parse_youtube_search(body: &[u8]) -> anyhow::Result<Vec<VideoResult>> {
    let resp: YouTubeSearchResponse =
        serde_json::from_slice(body).context("decode YouTube search JSON")?;

    let results = resp
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            let thumbs = item.snippet.thumbnails;
            let thumbnail_url = thumbs
                .medium
                .or(thumbs.high)
                .or(thumbs.default)
                .map(|t| t.url)
                .unwrap_or_default();
            Some(VideoResult {
                id,
                title: item.snippet.title,
                channel_title: item.snippet.channel_title,
                thumbnail_url,
            })
        })
        .collect();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_in_order() {
        let body = br#"{"items":[
            {"id":{"kind":"youtube#video","videoId":"a1"},
             "snippet":{"title":"Gatos 1","channelTitle":"C1",
                        "thumbnails":{"medium":{"url":"https://i/a1.jpg"}}}},
            {"id":{"videoId":"b2"},
             "snippet":{"title":"Gatos 2","channelTitle":"C2",
                        "thumbnails":{"medium":{"url":"https://i/b2.jpg"}}}}
        ]}"#;
        let results = parse_youtube_search(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "a1");
        assert_eq!(results[0].channel_title, "C1");
        assert_eq!(results[1].thumbnail_url, "https://i/b2.jpg");
    }

    #[test]
    fn falls_back_to_other_thumbnail_sizes() {
        let body = br#"{"items":[{"id":{"videoId":"a"},
            "snippet":{"title":"t","channelTitle":"c",
                       "thumbnails":{"default":{"url":"https://i/d.jpg"}}}}]}"#;
        assert_eq!(parse_youtube_search(body).unwrap()[0].thumbnail_url, "https://i/d.jpg");
    }

    #[test]
    fn skips_non_video_items() {
        let body = br#"{"items":[{"id":{"channelId":"UC1"},"snippet":{"title":"chan"}}]}"#;
        assert!(parse_youtube_search(body).unwrap().is_empty());
    }

    #[test]
    fn missing_items_is_empty() {
        assert!(parse_youtube_search(br#"{"kind":"youtube#searchListResponse"}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn malformed_body_errors() {
        assert!(parse_youtube_search(b"<html>").is_err());
        assert!(parse_youtube_search(br#"{"items":[{"snippet":{}}]}"#).is_err());
    }
}
