use crate::error::{CounterError, Result};
use crate::table::FrequencyTable;
use crate::tokenizer::tokenize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::Mutex as TokioMutex;
use tokio::task::JoinHandle;

/// One unit of work: a single line of input text.
#[derive(Debug)]
pub struct LineTask {
    line: String,
}

impl LineTask {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    pub fn line(&self) -> &str {
        &self.line
    }
}

/// Outcome of draining a [`WorkerPool`].
#[derive(Debug, Clone, Copy)]
pub struct DrainReport {
    /// True when every submitted task finished before the deadline.
    pub clean: bool,
    /// Tasks fully processed, including those finished before the drain.
    pub completed: usize,
}

/// Fixed-size set of workers that tokenize lines into a shared table.
///
/// Workers pull tasks from one bounded queue; execution and completion
/// order between tasks are unspecified. The pool stops accepting work when
/// [`WorkerPool::drain`] consumes it.
pub struct WorkerPool {
    tx: mpsc::Sender<LineTask>,
    workers: Vec<JoinHandle<()>>,
    completed: Arc<AtomicUsize>,
}

impl WorkerPool {
    /// Spawn `num_threads` workers feeding `table`.
    ///
    /// The queue holds at most `queue_capacity` pending tasks; `submit`
    /// waits while it is full. A zero thread count is rejected before any
    /// worker or queue is created.
    pub fn spawn(
        num_threads: usize,
        queue_capacity: usize,
        table: Arc<FrequencyTable>,
    ) -> Result<Self> {
        if num_threads == 0 {
            return Err(CounterError::InvalidThreadCount(num_threads));
        }

        let (tx, rx) = mpsc::channel::<LineTask>(queue_capacity.max(1));
        let rx = Arc::new(TokioMutex::new(rx));
        let completed = Arc::new(AtomicUsize::new(0));

        let mut workers = Vec::with_capacity(num_threads);
        for worker_id in 0..num_threads {
            let rx = Arc::clone(&rx);
            let table = Arc::clone(&table);
            let completed = Arc::clone(&completed);
            workers.push(tokio::spawn(async move {
                loop {
                    let task = {
                        let mut rx = rx.lock().await;
                        rx.recv().await
                    };
                    let Some(task) = task else { break };
                    for token in tokenize(task.line()) {
                        table.increment(token);
                    }
                    completed.fetch_add(1, Ordering::Relaxed);
                }
                log::trace!("worker {worker_id} drained");
            }));
        }

        Ok(Self {
            tx,
            workers,
            completed,
        })
    }

    /// Queue a task for some worker at an unspecified future time.
    ///
    /// Waits when the queue is full. Fails only if every worker has died.
    pub async fn submit(&self, task: LineTask) -> Result<()> {
        self.tx
            .send(task)
            .await
            .map_err(|_| CounterError::Other("worker pool stopped".to_string()))
    }

    /// Tasks fully processed so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Stop accepting tasks and wait up to `timeout` for the queue to empty.
    ///
    /// On expiry, outstanding workers are aborted in place: increments they
    /// never performed are not applied, rolled back, or retried. Aborts land
    /// at await points, never inside a shard lock, so the table stays
    /// consistent for whatever did complete.
    pub async fn drain(self, timeout: Duration) -> DrainReport {
        let WorkerPool {
            tx,
            workers,
            completed,
        } = self;
        // Closing the queue lets workers exit once it empties.
        drop(tx);

        let deadline = tokio::time::Instant::now() + timeout;
        let mut clean = true;
        for mut handle in workers {
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    // An aborted or panicked worker never aborts the pool.
                    log::warn!("worker exited abnormally: {e}");
                }
                Err(_) => {
                    handle.abort();
                    clean = false;
                }
            }
        }
        if !clean {
            log::warn!("drain timed out after {timeout:?}; abandoning unfinished tasks");
        }

        DrainReport {
            clean,
            completed: completed.load(Ordering::Relaxed),
        }
    }
}
