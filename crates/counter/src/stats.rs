use serde::{Deserialize, Serialize};
use std::fmt;

/// A single result entry: a word and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.count)
    }
}

/// Result of one counting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountReport {
    /// Top entries, count descending; equal counts order by word ascending.
    pub top: Vec<WordCount>,

    /// Statistics about the run.
    pub stats: CountStats,
}

/// Statistics about a counting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountStats {
    /// Lines read and submitted to the pool.
    pub lines: usize,

    /// Tasks fully processed before the drain deadline.
    pub tasks_completed: usize,

    /// Distinct words in the final table.
    pub distinct_words: usize,

    /// Time taken in milliseconds.
    pub time_ms: u64,

    /// False when draining timed out and the counts are best-effort.
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_renders_word_colon_count() {
        let entry = WordCount {
            word: "apple".to_string(),
            count: 3,
        };
        assert_eq!(entry.to_string(), "apple: 3");
    }
}
