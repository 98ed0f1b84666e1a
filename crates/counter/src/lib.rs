//! # Filetally Counter
//!
//! Concurrent word-frequency counting for line-oriented text.
//!
//! ## Pipeline
//!
//! ```text
//! File
//!     │
//!     ├──> Producer (sequential line read)
//!     │      └─> one task per line
//!     │
//!     ├──> Worker Pool (parallel tokenize + increment)
//!     │      └─> Frequency Table (sharded map)
//!     │
//!     └──> Top-K Selector (after drain)
//!            └─> ordered (word, count) list
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use filetally_counter::count_top_words;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let top = count_top_words("notes.txt", 4).await?;
//!     for entry in &top {
//!         println!("{entry}");
//!     }
//!     Ok(())
//! }
//! ```

mod counter;
mod error;
mod pool;
mod stats;
mod table;
mod tokenizer;
mod topk;

pub use counter::{
    count_top_words, count_top_words_lenient, CounterConfig, WordCounter, DEFAULT_DRAIN_TIMEOUT,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_TOP_K,
};
pub use error::{CounterError, Result};
pub use pool::{DrainReport, LineTask, WorkerPool};
pub use stats::{CountReport, CountStats, WordCount};
pub use table::FrequencyTable;
pub use tokenizer::tokenize;
pub use topk::top_k;
