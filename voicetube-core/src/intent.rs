use crate::text::{contains_any_keyword, keyword_alternation_re};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Classified meaning of one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Non-empty query. Trimmed when it comes from a trigger keyword;
    /// an implicit match carries the utterance as heard.
    Search(String),
    /// A trigger keyword was spoken but nothing else.
    MissingQuery,
    Unrecognized(String),
}

/// Keyword sets for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentGrammar {
    /// Explicit search cues; stripped from the utterance to obtain the query.
    pub trigger_keywords: Vec<String>,
    /// Cues that turn the whole utterance into the query.
    pub implicit_keywords: Vec<String>,
}

impl IntentGrammar {
    pub fn portuguese() -> Self {
        Self {
            trigger_keywords: ["pesquisar", "buscar", "procurar", "encontrar"]
                .into_iter()
                .map(String::from)
                .collect(),
            implicit_keywords: ["vídeos", "videos", "sobre"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for IntentGrammar {
    fn default() -> Self {
        Self::portuguese()
    }
}

#[derive(Debug, Clone)]
pub struct IntentClassifier {
    grammar: IntentGrammar,
    trigger_re: Option<Regex>,
}

impl IntentClassifier {
    pub fn new(grammar: IntentGrammar) -> Result<Self, regex::Error> {
        let trigger_re = keyword_alternation_re(&grammar.trigger_keywords)?;
        Ok(Self {
            grammar,
            trigger_re,
        })
    }

    /// Pure and total: every input maps to exactly one variant.
    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase();

        if let Some(re) = &self.trigger_re {
            if contains_any_keyword(&lowered, &self.grammar.trigger_keywords) {
                let stripped = re.replace_all(text, "");
                let remainder = stripped.trim();
                return if remainder.is_empty() {
                    Intent::MissingQuery
                } else {
                    Intent::Search(remainder.to_string())
                };
            }
        }

        if contains_any_keyword(&lowered, &self.grammar.implicit_keywords) {
            return Intent::Search(text.to_string());
        }

        Intent::Unrecognized(text.to_string())
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        default_classifier().clone()
    }
}

fn default_classifier() -> &'static IntentClassifier {
    static CLASSIFIER: OnceLock<IntentClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(|| {
        IntentClassifier::new(IntentGrammar::portuguese()).expect("valid default trigger regex")
    })
}

/// Classifies with the built-in Portuguese grammar.
pub fn classify(text: &str) -> Intent {
    default_classifier().classify(text)
}
