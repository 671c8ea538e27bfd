//! "Try in order, stop at the first hit" evaluation.
//!
//! Every decision in roster discovery is a priority list: candidate paths,
//! selector patterns, fallback passes. Each strategy is a probe returning
//! `Option`, and the list is walked until one returns `Some`.

use std::future::Future;

/// Run `probe` over `candidates` in order and return the first `Some`.
///
/// Candidates after the first hit are never probed.
pub async fn first_hit<I, F, Fut, T>(candidates: I, mut probe: F) -> Option<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for candidate in candidates {
        if let Some(found) = probe(candidate).await {
            return Some(found);
        }
    }
    None
}

/// `Some` only for a non-empty collection.
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
