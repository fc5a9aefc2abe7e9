use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, unbounded};
use tracing::{debug, trace};

use super::error::CountError;

/// Fixed-size thread pool fed by an unbounded queue.
///
/// Workers compete for jobs on one shared channel, so a job runs on
/// whichever thread frees up first and completion order is arbitrary.
/// Each thread keeps the results of the jobs it ran and hands them back
/// through [`WorkerPool::shutdown`].
pub struct WorkerPool<J, R> {
    queue: Sender<J>,
    handles: Vec<JoinHandle<Vec<R>>>,
    submitted: usize,
}

impl<J, R> WorkerPool<J, R>
where
    J: Send + 'static,
    R: Send + 'static,
{
    /// Spawns `workers` threads (at least one) that run `handler` on each
    /// submitted job.
    pub fn new<F>(
        workers: usize,
        handler: F,
    ) -> Result<Self, CountError>
    where
        F: Fn(J) -> R + Send + Sync + 'static,
    {
        let workers = workers.max(1);
        let handler = Arc::new(handler);
        let (queue, jobs) = unbounded::<J>();

        let mut handles = Vec::with_capacity(workers);
        for worker_idx in 0..workers {
            let jobs = jobs.clone();
            let handler = Arc::clone(&handler);
            let handle = thread::Builder::new()
                .name(format!("count-worker-{worker_idx}"))
                .spawn(move || {
                    let mut results = Vec::new();
                    // Ends once the queue is closed and drained
                    for job in jobs.iter() {
                        results.push(handler(job));
                    }
                    trace!(worker_idx, jobs = results.len(), "worker exiting");
                    results
                })
                .map_err(CountError::Spawn)?;
            handles.push(handle);
        }
        debug!(workers, "worker pool started");

        Ok(Self {
            queue,
            handles,
            submitted: 0,
        })
    }

    /// Queues a job. Never blocks; fails only if every worker has died.
    pub fn submit(
        &mut self,
        job: J,
    ) -> Result<(), CountError> {
        self.queue
            .send(job)
            .map_err(|_| CountError::PoolDisconnected)?;
        self.submitted += 1;
        Ok(())
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    /// Closes the queue and waits, without a time limit, for every queued
    /// and running job to finish. Consuming the pool rules out further
    /// submissions.
    pub fn shutdown(self) -> Result<Vec<R>, CountError> {
        let Self {
            queue, handles, ..
        } = self;
        drop(queue);

        let mut results = Vec::new();
        let mut panicked = false;
        for handle in handles {
            match handle.join() {
                Ok(mut r) => results.append(&mut r),
                Err(_) => panicked = true,
            }
        }
        if panicked {
            return Err(CountError::WorkerPanicked);
        }
        debug!(jobs = results.len(), "worker pool drained");
        Ok(results)
    }
}
