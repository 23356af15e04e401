//! Eagerly spawned worker threads fed by a bounded crossbeam queue

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};

use super::{PoolError, PoolResult, TaskReport};
use crate::worker::WorkerTask;

/// Fixed set of worker threads running submitted animation tasks
pub struct ThreadPool {
    /// Submission side; `None` once shut down
    task_tx: Mutex<Option<Sender<WorkerTask>>>,
    /// Worker join handles, drained on shutdown
    workers: Mutex<Vec<JoinHandle<()>>>,
    /// Completion and crash reports from all workers
    report_rx: Receiver<TaskReport>,
    /// Number of tasks currently executing
    running: Arc<AtomicUsize>,
    max_workers: usize,
    max_queue_depth: usize,
}

impl ThreadPool {
    /// Spawn `max_workers` threads sharing a queue of `max_queue_depth` slots
    pub fn new(max_workers: usize, max_queue_depth: usize) -> PoolResult<Self> {
        if max_workers == 0 {
            return Err(PoolError::NoWorkers);
        }

        let (task_tx, task_rx) = channel::bounded::<WorkerTask>(max_queue_depth);
        let (report_tx, report_rx) = channel::unbounded();
        let running = Arc::new(AtomicUsize::new(0));

        let mut workers = Vec::with_capacity(max_workers);
        for index in 0..max_workers {
            let task_rx = task_rx.clone();
            let report_tx = report_tx.clone();
            let running = running.clone();

            // On failure `task_tx` drops on return, which ends the threads
            // spawned so far
            let handle = thread::Builder::new()
                .name(format!("anim-worker-{}", index))
                .spawn(move || worker_loop(task_rx, report_tx, running))
                .map_err(|e| PoolError::Spawn(e.to_string()))?;
            workers.push(handle);
        }

        log::info!(
            "ThreadPool started: {} workers, queue depth {}",
            max_workers,
            max_queue_depth
        );

        Ok(Self {
            task_tx: Mutex::new(Some(task_tx)),
            workers: Mutex::new(workers),
            report_rx,
            running,
            max_workers,
            max_queue_depth,
        })
    }

    /// Queue a task without blocking
    ///
    /// Fails with [`PoolError::QueueFull`] when every queue slot is taken;
    /// the task is dropped in that case and the caller must rebuild it to
    /// retry.
    pub fn submit(&self, task: WorkerTask) -> PoolResult<()> {
        let slot = task.slot();
        let guard = self.task_tx.lock().expect("pool sender lock poisoned");
        let tx = guard.as_ref().ok_or(PoolError::ShutDown)?;

        match tx.try_send(task) {
            Ok(()) => {
                log::debug!("ThreadPool: queued {}", slot);
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                log::warn!("ThreadPool: queue full, rejected {}", slot);
                Err(PoolError::QueueFull)
            }
            Err(TrySendError::Disconnected(_)) => Err(PoolError::ShutDown),
        }
    }

    /// Receiver for task completion and crash reports
    ///
    /// Clones share one stream: each report is delivered to one receiver.
    pub fn reports(&self) -> Receiver<TaskReport> {
        self.report_rx.clone()
    }

    /// Tasks currently executing
    pub fn active_count(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Tasks waiting in the queue
    pub fn queued_count(&self) -> usize {
        self.task_tx
            .lock()
            .expect("pool sender lock poisoned")
            .as_ref()
            .map_or(0, |tx| tx.len())
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn max_queue_depth(&self) -> usize {
        self.max_queue_depth
    }

    /// Stop accepting tasks and join every worker thread
    ///
    /// Blocks until running tasks return, so stop them first (there is no
    /// forced cancellation). Queued tasks still run before the workers exit.
    pub fn shutdown(&self) {
        let sender = self.task_tx.lock().expect("pool sender lock poisoned").take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let workers = std::mem::take(&mut *self.workers.lock().expect("pool workers lock poisoned"));
        log::info!("ThreadPool shutting down, joining {} workers", workers.len());
        for handle in workers {
            if handle.join().is_err() {
                log::warn!("ThreadPool: worker thread exited abnormally");
            }
        }
        log::info!("ThreadPool stopped");
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Close the queue so idle workers exit; busy ones are detached
        if let Ok(mut tx) = self.task_tx.lock() {
            tx.take();
        }
    }
}

fn worker_loop(task_rx: Receiver<WorkerTask>, report_tx: Sender<TaskReport>, running: Arc<AtomicUsize>) {
    while let Ok(task) = task_rx.recv() {
        let slot = task.slot();
        running.fetch_add(1, Ordering::SeqCst);
        let outcome = panic::catch_unwind(AssertUnwindSafe(move || task.run()));
        running.fetch_sub(1, Ordering::SeqCst);

        let report = match outcome {
            Ok(()) => TaskReport::Finished { slot },
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("{} crashed: {}", slot, message);
                TaskReport::Panicked { slot, message }
            }
        };

        // Nobody listening is fine
        let _ = report_tx.send(report);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
