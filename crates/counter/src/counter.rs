use crate::error::{CounterError, Result};
use crate::pool::{LineTask, WorkerPool};
use crate::stats::{CountReport, CountStats, WordCount};
use crate::table::FrequencyTable;
use crate::topk::top_k;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncBufReadExt;

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a counting run.
#[derive(Debug, Clone)]
pub struct CounterConfig {
    /// Number of pool workers. Must be at least 1.
    pub num_threads: usize,

    /// Wall-clock bound for draining the pool after the last line.
    pub drain_timeout: Duration,

    /// Maximum number of queued-but-unprocessed tasks; submission waits
    /// while the queue is full.
    pub queue_capacity: usize,

    /// Maximum number of entries in the result.
    pub top_k: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            num_threads: cpus.min(8),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl CounterConfig {
    /// Config with `num_threads` workers and default settings elsewhere.
    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(CounterError::InvalidThreadCount(self.num_threads));
        }
        Ok(())
    }
}

/// Concurrent word-frequency counter over line-oriented text files.
///
/// Each [`WordCounter::count`] call reads the file sequentially, fans the
/// lines out to a fresh worker pool, drains the pool within the configured
/// bound, and extracts the top entries from that run's table. Nothing is
/// shared between runs.
pub struct WordCounter {
    config: CounterConfig,
}

impl WordCounter {
    /// Rejects invalid configurations before any work is performed.
    pub fn new(config: CounterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Count words in the file at `path` and return the most frequent ones.
    ///
    /// A file that cannot be opened is reported as
    /// [`CounterError::SourceUnavailable`]. A read fault after some lines
    /// were already submitted is logged and treated as end of input. When
    /// draining times out, the counts cover only the tasks that finished
    /// and the report's `stats.complete` is false.
    pub async fn count(&self, path: impl AsRef<Path>) -> Result<CountReport> {
        let path = path.as_ref();
        let started = Instant::now();

        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| CounterError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let table = Arc::new(FrequencyTable::new());
        let pool = WorkerPool::spawn(
            self.config.num_threads,
            self.config.queue_capacity,
            Arc::clone(&table),
        )?;

        let mut lines = tokio::io::BufReader::new(file).lines();
        let mut lines_read = 0usize;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    lines_read += 1;
                    pool.submit(LineTask::new(line)).await?;
                }
                Ok(None) => break,
                Err(e) => {
                    // A mid-stream fault ends the input; whatever
                    // accumulated so far still gets extracted.
                    log::warn!(
                        "read failed after {lines_read} lines of {}: {e}",
                        path.display()
                    );
                    break;
                }
            }
        }

        let drain = pool.drain(self.config.drain_timeout).await;
        let distinct = table.len();
        let top = top_k(table.snapshot(), self.config.top_k);

        let stats = CountStats {
            lines: lines_read,
            tasks_completed: drain.completed,
            distinct_words: distinct,
            time_ms: started.elapsed().as_millis() as u64,
            complete: drain.clean,
        };
        log::debug!(
            "counted {} in {}ms: {} lines, {} distinct words{}",
            path.display(),
            stats.time_ms,
            stats.lines,
            stats.distinct_words,
            if stats.complete { "" } else { " (partial)" }
        );

        Ok(CountReport { top, stats })
    }
}

/// Count words in `path` with `num_threads` workers and return at most ten
/// entries ordered by count descending, ties by word.
pub async fn count_top_words(
    path: impl AsRef<Path>,
    num_threads: usize,
) -> Result<Vec<WordCount>> {
    let counter = WordCounter::new(CounterConfig::with_threads(num_threads))?;
    Ok(counter.count(path).await?.top)
}

/// Lenient variant of [`count_top_words`]: an unreadable source yields an
/// empty list instead of an error. Configuration errors still fail fast.
pub async fn count_top_words_lenient(
    path: impl AsRef<Path>,
    num_threads: usize,
) -> Result<Vec<WordCount>> {
    let counter = WordCounter::new(CounterConfig::with_threads(num_threads))?;
    match counter.count(path).await {
        Ok(report) => Ok(report.top),
        Err(CounterError::SourceUnavailable { path, source }) => {
            log::warn!("cannot read {}: {source}", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threads_is_rejected_at_construction() {
        let err = WordCounter::new(CounterConfig::with_threads(0))
            .err()
            .expect("zero threads must fail");
        assert!(matches!(err, CounterError::InvalidThreadCount(0)));
    }

    #[test]
    fn default_config_is_valid() {
        let config = CounterConfig::default();
        assert!(config.num_threads >= 1);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert_eq!(config.drain_timeout, DEFAULT_DRAIN_TIMEOUT);
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert!(WordCounter::new(config).is_ok());
    }
}
