// Spoken replies (pt-BR). Rendering and speech share the same text.

use crate::types::SearchOutcome;

pub fn missing_query_message() -> String {
    "Por favor, diga o que você quer pesquisar no YouTube.".into()
}

pub fn unrecognized_message(text: &str) -> String {
    format!(
        "Você disse: \"{text}\". Posso pesquisar vídeos no YouTube para você. \
Diga \"pesquisar\" seguido do tema que deseja."
    )
}

pub fn searching_message(query: &str) -> String {
    format!("Pesquisando vídeos sobre {query} no YouTube...")
}

/// Degraded outcomes get the same wording as live ones.
pub fn outcome_message(outcome: &SearchOutcome) -> String {
    if outcome.is_empty() {
        return format!("Não encontrei vídeos sobre {}.", outcome.query);
    }
    format!(
        "Encontrei {} vídeos sobre {}. Os resultados estão na tela.",
        outcome.results.len(),
        outcome.query
    )
}

pub fn search_fault_message() -> String {
    "Desculpe, ocorreu um erro ao pesquisar no YouTube.".into()
}
