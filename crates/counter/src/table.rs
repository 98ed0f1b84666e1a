use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

const SHARD_COUNT: usize = 16;

/// Concurrency-safe map from token to occurrence count.
///
/// Tokens are partitioned across a fixed set of shards by hash; each shard
/// guards a plain `HashMap` with a mutex held only for the duration of a
/// single increment. One table is created per counting run and discarded
/// once the result has been extracted.
pub struct FrequencyTable {
    shards: Vec<Mutex<HashMap<String, u64>>>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        let shards = (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect();
        Self { shards }
    }

    fn shard(&self, token: &str) -> &Mutex<HashMap<String, u64>> {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        // SHARD_COUNT is a power of two.
        &self.shards[(hasher.finish() as usize) & (SHARD_COUNT - 1)]
    }

    /// Add one to the token's count, inserting it at 1 if absent.
    ///
    /// Linearizable per key: concurrent callers never lose an update.
    pub fn increment(&self, token: String) {
        let mut shard = self
            .shard(&token)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *shard.entry(token).or_insert(0) += 1;
    }

    /// All (token, count) pairs, in unspecified order.
    ///
    /// Only meaningful once increment activity has ceased.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut entries = Vec::new();
        for shard in &self.shards {
            let shard = shard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            entries.extend(shard.iter().map(|(token, count)| (token.clone(), *count)));
        }
        entries
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| {
                shard
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .len()
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.shards
            .iter()
            .map(|shard| {
                shard
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .values()
                    .sum::<u64>()
            })
            .sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
