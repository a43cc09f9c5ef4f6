//! Worker pool for blocking handler work
//!
//! Handlers that cannot finish on the calling thread return
//! `HandlerOutcome::Blocking` or `HandlerOutcome::Detached`. The dispatcher
//! hands that closure to this pool together with a [`Completion`] telling
//! the worker where the outcome goes. Submission never blocks: a full or
//! closed queue fails the job through its completion instead.

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use adbridge_sdk::{BlockingWork, FailureHook, HandlerFailure, Resolver, Settlement};
use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use tracing::{debug, info, warn};

use crate::config::PoolConfig;

/// Where a job's outcome goes
pub enum Completion {
    /// Settle the caller's pending result
    Settle(Resolver),
    /// Nobody is waiting (void method); failures are logged and handed to
    /// `on_failure` when the handler asked for it
    Detached {
        /// `module.method`, for the log line
        origin: String,
        /// Handler's failure report
        on_failure: Option<FailureHook>,
    },
}

impl Completion {
    fn finish(self, outcome: Settlement) {
        match self {
            Completion::Settle(resolver) => resolver.settle(outcome),
            Completion::Detached { origin, on_failure } => {
                if let Err(failure) = outcome {
                    warn!(%origin, code = %failure.code, "void method failed after returning: {}", failure.message);
                    if let Some(report) = on_failure {
                        report(failure);
                    }
                }
            }
        }
    }
}

struct Job {
    work: BlockingWork,
    completion: Completion,
}

/// Fixed pool of worker threads fed by a channel
pub struct WorkerPool {
    tx: Option<Sender<Job>>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn the worker threads
    pub fn new(config: &PoolConfig) -> std::io::Result<Self> {
        let (tx, rx) = if config.queue_capacity == 0 {
            channel::unbounded()
        } else {
            channel::bounded(config.queue_capacity)
        };

        let count = config.worker_count();
        let mut handles = Vec::with_capacity(count);
        for id in 0..count {
            let rx: Receiver<Job> = rx.clone();
            let handle = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name, id))
                .spawn(move || Self::run_loop(rx))?;
            handles.push(handle);
        }
        info!(workers = count, queue_capacity = config.queue_capacity, "worker pool started");

        Ok(Self {
            tx: Some(tx),
            handles,
        })
    }

    /// Number of worker threads
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Queue `work`; its outcome goes to `completion`
    pub fn submit(&self, work: BlockingWork, completion: Completion) {
        let job = Job { work, completion };
        let Some(tx) = &self.tx else {
            job.completion.finish(Err(pool_closed()));
            return;
        };
        match tx.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => job.completion.finish(Err(HandlerFailure::new(
                "bridge/queue-full",
                "worker pool queue is full",
            ))),
            Err(TrySendError::Disconnected(job)) => job.completion.finish(Err(pool_closed())),
        }
    }

    /// Stop accepting work, drain the queue, and join the workers
    pub fn shutdown(&mut self) {
        // Closing the channel ends each worker's loop once the queue drains.
        if self.tx.take().is_none() {
            return;
        }
        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread panicked outside a job");
            }
        }
        info!(workers = count, "worker pool stopped");
    }

    fn run_loop(rx: Receiver<Job>) {
        for job in rx.iter() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job.work)).unwrap_or_else(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                warn!("blocking work panicked: {}", message);
                Err(HandlerFailure::new("bridge/panic", message))
            });
            job.completion.finish(outcome);
        }
        debug!("worker exiting");
    }
}

fn pool_closed() -> HandlerFailure {
    HandlerFailure::new("bridge/pool-closed", "worker pool is shut down")
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbridge_sdk::{pending, BridgeValue};
    use std::sync::mpsc;
    use std::time::Duration;

    fn config(workers: usize, queue_capacity: usize) -> PoolConfig {
        PoolConfig {
            workers,
            queue_capacity,
            thread_name: "test-io".to_string(),
        }
    }

    #[test]
    fn test_submit_settles_pending() {
        let pool = WorkerPool::new(&config(2, 8)).unwrap();
        assert_eq!(pool.worker_count(), 2);
        let (result, resolver) = pending();
        pool.submit(
            Box::new(|| Ok(BridgeValue::from("loaded"))),
            Completion::Settle(resolver),
        );
        assert_eq!(
            result.wait_timeout(Duration::from_secs(5)),
            Some(Ok(BridgeValue::from("loaded")))
        );
    }

    #[test]
    fn test_panic_rejects_and_worker_survives() {
        let pool = WorkerPool::new(&config(1, 8)).unwrap();
        let (first, resolver) = pending();
        pool.submit(
            Box::new(|| -> Settlement { panic!("boom") }),
            Completion::Settle(resolver),
        );
        let err = first.wait_timeout(Duration::from_secs(5)).unwrap().unwrap_err();
        assert_eq!(err.code, "bridge/panic");
        assert_eq!(err.message, "boom");

        let (second, resolver) = pending();
        pool.submit(Box::new(|| Ok(BridgeValue::Null)), Completion::Settle(resolver));
        assert_eq!(second.wait_timeout(Duration::from_secs(5)), Some(Ok(BridgeValue::Null)));
    }

    #[test]
    fn test_queue_full_rejects() {
        let pool = WorkerPool::new(&config(1, 1)).unwrap();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let (started_tx, started_rx) = mpsc::channel::<()>();

        // Occupy the only worker.
        let (busy, resolver) = pending();
        pool.submit(
            Box::new(move || {
                started_tx.send(()).ok();
                gate_rx.recv().ok();
                Ok(BridgeValue::Null)
            }),
            Completion::Settle(resolver),
        );
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // Fills the single queue slot.
        let (queued, resolver) = pending();
        pool.submit(Box::new(|| Ok(BridgeValue::Null)), Completion::Settle(resolver));

        let (rejected, resolver) = pending();
        pool.submit(Box::new(|| Ok(BridgeValue::Null)), Completion::Settle(resolver));
        let err = rejected.try_result().unwrap().unwrap_err();
        assert_eq!(err.code, "bridge/queue-full");

        gate_tx.send(()).unwrap();
        assert!(busy.wait_timeout(Duration::from_secs(5)).is_some());
        assert!(queued.wait_timeout(Duration::from_secs(5)).is_some());
    }

    #[test]
    fn test_submit_after_shutdown_rejects() {
        let mut pool = WorkerPool::new(&config(1, 0)).unwrap();
        pool.shutdown();
        let (result, resolver) = pending();
        pool.submit(Box::new(|| Ok(BridgeValue::Null)), Completion::Settle(resolver));
        assert_eq!(result.try_result().unwrap().unwrap_err().code, "bridge/pool-closed");
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let mut pool = WorkerPool::new(&config(1, 0)).unwrap();
        let results: Vec<_> = (0..4)
            .map(|i| {
                let (result, resolver) = pending();
                pool.submit(Box::new(move || Ok(BridgeValue::from(i))), Completion::Settle(resolver));
                result
            })
            .collect();
        pool.shutdown();
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.try_result(), Some(Ok(BridgeValue::from(i as i32))));
        }
    }

    fn detached(origin: &str, report: mpsc::Sender<HandlerFailure>) -> Completion {
        Completion::Detached {
            origin: origin.to_string(),
            on_failure: Some(Box::new(move |failure| {
                report.send(failure).ok();
            })),
        }
    }

    #[test]
    fn test_detached_failure_reaches_hook_and_worker_survives() {
        let pool = WorkerPool::new(&config(1, 0)).unwrap();
        let (report_tx, report_rx) = mpsc::channel();
        pool.submit(
            Box::new(|| Err(HandlerFailure::new("googleMobileAds/internal", "x"))),
            detached("m.reset", report_tx.clone()),
        );
        let failure = report_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(failure.code, "googleMobileAds/internal");

        pool.submit(
            Box::new(|| -> Settlement { panic!("load crashed") }),
            detached("m.load", report_tx),
        );
        let failure = report_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(failure.code, "bridge/panic");

        let (after, resolver) = pending();
        pool.submit(Box::new(|| Ok(BridgeValue::Null)), Completion::Settle(resolver));
        assert_eq!(after.wait_timeout(Duration::from_secs(5)), Some(Ok(BridgeValue::Null)));
    }

    #[test]
    fn test_detached_success_skips_hook() {
        let mut pool = WorkerPool::new(&config(1, 0)).unwrap();
        let (report_tx, report_rx) = mpsc::channel();
        pool.submit(Box::new(|| Ok(BridgeValue::Null)), detached("m.ok", report_tx));
        pool.shutdown();
        assert!(report_rx.try_recv().is_err());
    }

    #[test]
    fn test_detached_rejected_when_closed() {
        let mut pool = WorkerPool::new(&config(1, 0)).unwrap();
        pool.shutdown();
        let (report_tx, report_rx) = mpsc::channel();
        pool.submit(Box::new(|| Ok(BridgeValue::Null)), detached("m.load", report_tx));
        assert_eq!(report_rx.try_recv().unwrap().code, "bridge/pool-closed");
    }
}
