//! Mapping a generator reply back onto catalogue cards

use crate::card::Card;

/// Resolve a comma-separated list of titles against `candidates`.
///
/// Tokens are trimmed and matched exactly (case-sensitive). Matches are
/// returned in reply order, each card at most once. Unknown tokens are
/// dropped. When two candidates share a title the first one wins.
pub fn resolve_titles(reply: &str, candidates: &[&Card]) -> Vec<Card> {
    let mut resolved: Vec<Card> = Vec::new();

    for token in reply.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let Some(card) = candidates.iter().find(|c| c.title == token) else {
            continue;
        };
        if resolved.iter().any(|r| r.id == card.id) {
            continue;
        }
        resolved.push((*card).clone());
    }

    resolved
}
