use regex::Regex;

/// Builds a case-insensitive alternation that matches any keyword anywhere in
/// the text, including inside larger words.
///
/// Longer keywords come first so multi-word cues ("look up") win over their
/// prefixes ("look").
pub fn keyword_alternation_re(keywords: &[String]) -> Result<Option<Regex>, regex::Error> {
    let mut words: Vec<&str> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if words.is_empty() {
        return Ok(None);
    }

    // Longest-first (by character count, not bytes).
    words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));

    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){alternation}")).map(Some)
}

/// `lowered` must already be lower-cased.
pub fn contains_any_keyword(lowered: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .any(|k| lowered.contains(&k.to_lowercase()))
}

/// Shortens long text for log lines.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn alternation_prefers_longer_keywords() {
        let re = keyword_alternation_re(&words(&["look", "look up"]))
            .unwrap()
            .unwrap();
        assert_eq!(re.replace_all("Look Up cats", ""), " cats");
    }

    #[test]
    fn alternation_escapes_metacharacters() {
        let re = keyword_alternation_re(&words(&["c++"])).unwrap().unwrap();
        assert_eq!(re.replace_all("C++ tutorial", ""), " tutorial");
    }

    #[test]
    fn no_keywords_means_no_regex() {
        assert!(keyword_alternation_re(&words(&["", "  "])).unwrap().is_none());
    }

    #[test]
    fn keyword_containment_is_substring_based() {
        assert!(contains_any_keyword("rebuscar", &words(&["buscar"])));
        assert!(!contains_any_keyword("olá", &words(&["buscar"])));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview_text("programação", 8), "programa…");
        assert_eq!(preview_text("curto", 8), "curto");
    }
}
