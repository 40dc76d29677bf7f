//! The executor: one worker thread serializing all submitted tasks.

use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ExecutorError;
use crate::handle::TaskHandle;
use crate::priority::Priority;
use crate::queue::WaitQueue;
use crate::task::Task;
use crate::worker::Worker;

/// Counter used to give every executor's worker thread a process-unique name.
static NEXT_WORKER_ID: AtomicU64 = AtomicU64::new(1);

enum Lifecycle {
    Idle,
    Running(Worker),
    Stopped,
}

/// Serializes access to a shared resource by running all submitted tasks on
/// one dedicated thread, highest priority (smallest key) first.
///
/// Any number of threads may submit and activate concurrently; tasks never
/// overlap. A task that blocks stalls the whole executor until it returns,
/// which is the point: the protected resource tolerates exactly one user at
/// a time.
///
/// Lifecycle is `idle → running → stopped` with no way back; build a fresh
/// executor instead of restarting a stopped one.
pub struct Executor {
    worker_name: String,
    queue: Arc<WaitQueue>,
    lifecycle: Mutex<Lifecycle>,
}

impl Executor {
    /// Creates an idle executor. No thread is spawned until
    /// [`start`](Executor::start).
    pub fn new() -> Self {
        let id = NEXT_WORKER_ID.fetch_add(1, Ordering::Relaxed);
        Executor {
            worker_name: format!("turnstile-worker-{id}"),
            queue: Arc::new(WaitQueue::new()),
            lifecycle: Mutex::new(Lifecycle::Idle),
        }
    }

    /// Spawns the worker thread and begins draining the queue.
    ///
    /// Fails with [`ExecutorError::AlreadyRunning`] on a double start and
    /// with [`ExecutorError::Stopped`] after a stop; the state is unchanged
    /// in both cases.
    pub fn start(&self) -> Result<(), ExecutorError> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Idle => {
                let worker = Worker::spawn(&self.worker_name, Arc::clone(&self.queue))
                    .map_err(ExecutorError::Spawn)?;
                *lifecycle = Lifecycle::Running(worker);
                log::debug!("{} started", self.worker_name);
                Ok(())
            }
            Lifecycle::Running(_) => Err(ExecutorError::AlreadyRunning),
            Lifecycle::Stopped => Err(ExecutorError::Stopped),
        }
    }

    /// Stops the worker and blocks until its thread has exited.
    ///
    /// The submission in flight (if any) runs to its terminal event first.
    /// Submissions still queued are abandoned: never executed, their sinks
    /// dropped without a terminal event, so blocked observers unblock with
    /// [`Abandoned`](crate::Abandoned) as soon as `stop` returns. Fails with
    /// [`ExecutorError::NotRunning`] unless the executor is currently
    /// running.
    pub fn stop(&self) -> Result<(), ExecutorError> {
        let mut lifecycle = self.lifecycle.lock();
        match mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running(worker) => {
                self.queue.close();
                worker.join();
                log::debug!("{} stopped", self.worker_name);
                Ok(())
            }
            previous => {
                *lifecycle = previous;
                Err(ExecutorError::NotRunning)
            }
        }
    }

    /// Prepares `task` for execution at [`Priority::NORMAL`].
    ///
    /// Pure: nothing is enqueued until the returned handle is
    /// [`activate`](TaskHandle::activate)d.
    pub fn submit<R, T>(&self, task: T) -> TaskHandle<R>
    where
        R: Send + 'static,
        T: Task<R> + 'static,
    {
        self.submit_with_priority(task, Priority::NORMAL)
    }

    /// Prepares `task` for execution at the given priority.
    pub fn submit_with_priority<R, T>(&self, task: T, priority: Priority) -> TaskHandle<R>
    where
        R: Send + 'static,
        T: Task<R> + 'static,
    {
        TaskHandle::new(Arc::new(task), priority, Arc::clone(&self.queue))
    }

    /// The process-unique name of this executor's worker thread.
    /// Diagnostics only; carries no behavioral contract.
    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Executor {
    // A worker still running must not outlive the executor blocked on a
    // queue nobody can fill.
    fn drop(&mut self) {
        self.queue.close();
    }
}
