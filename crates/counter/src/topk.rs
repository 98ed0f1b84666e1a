use crate::stats::WordCount;

/// Select the `k` highest-count entries from a table snapshot.
///
/// Ordered by count descending; equal counts order lexicographically by
/// word, so results are reproducible across runs and thread counts.
pub fn top_k(mut entries: Vec<(String, u64)>, k: usize) -> Vec<WordCount> {
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(k);
    entries
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}
