use crate::models::ChatTurn;
use crate::utils::estimate_tokens;

/// Bound a turn sequence to an approximate token budget.
///
/// Walks from the newest turn backward accumulating token estimates. The turn
/// that pushes the running total over `max_tokens` is dropped together with
/// everything older, so the result is always a chronological suffix of the
/// input. The decision is made at turn granularity; the kept set can sit
/// slightly under the nominal budget but never includes the boundary turn.
pub fn trim_history(history: Vec<ChatTurn>, max_tokens: usize) -> Vec<ChatTurn> {
    let mut total = 0usize;
    for (i, turn) in history.iter().enumerate().rev() {
        total += estimate_tokens(&turn.content);
        if total > max_tokens {
            return history[i + 1..].to_vec();
        }
    }
    history
}
