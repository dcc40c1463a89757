use crate::types::VideoResult;

/// Number of placeholder results synthesized when the provider is unreachable.
pub const FALLBACK_RESULT_COUNT: usize = 3;

struct Placeholder {
    video_id: &'static str,
    channel_title: &'static str,
    title_prefix: &'static str,
    title_suffix: &'static str,
}

const PLACEHOLDERS: [Placeholder; FALLBACK_RESULT_COUNT] = [
    Placeholder {
        video_id: "dQw4w9WgXcQ",
        channel_title: "Canal Exemplo",
        title_prefix: "Vídeo sobre ",
        title_suffix: " - Exemplo 1",
    },
    Placeholder {
        video_id: "jNQXAC9IVRw",
        channel_title: "Canal Tutorial",
        title_prefix: "Tutorial de ",
        title_suffix: " - Exemplo 2",
    },
    Placeholder {
        video_id: "9bZkp7q19f0",
        channel_title: "Canal Educativo",
        title_prefix: "Aprenda ",
        title_suffix: " - Exemplo 3",
    },
];

/// Deterministic stand-in results whose titles embed `query`.
pub fn placeholder_results(query: &str) -> Vec<VideoResult> {
    PLACEHOLDERS
        .iter()
        .map(|p| VideoResult {
            id: p.video_id.to_string(),
            title: format!("{}{}{}", p.title_prefix, query, p.title_suffix),
            channel_title: p.channel_title.to_string(),
            thumbnail_url: format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", p.video_id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_embed_query_in_every_title() {
        let results = placeholder_results("programação & <café>");
        assert_eq!(results.len(), FALLBACK_RESULT_COUNT);
        for r in &results {
            assert!(r.title.contains("programação & <café>"));
        }
    }

    #[test]
    fn placeholders_are_deterministic() {
        assert_eq!(placeholder_results("x"), placeholder_results("x"));
        assert_eq!(placeholder_results("x")[0].title, "Vídeo sobre x - Exemplo 1");
        assert_eq!(
            placeholder_results("x")[1].thumbnail_url,
            "https://i.ytimg.com/vi/jNQXAC9IVRw/mqdefault.jpg"
        );
    }

    #[test]
    fn empty_query_still_yields_full_set() {
        assert_eq!(placeholder_results("").len(), FALLBACK_RESULT_COUNT);
    }
}
