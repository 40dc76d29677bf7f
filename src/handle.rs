//! Deferred submissions and the observer side of one activation.

use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::error::{Abandoned, TaskError};
use crate::priority::Priority;
use crate::queue::WaitQueue;
use crate::sink::{Emitter, TaskEvent};
use crate::task::Task;

/// A task prepared for execution, not yet enqueued.
///
/// Returned by [`Executor::submit`](crate::Executor::submit); calling it has
/// no side effects. Only [`activate`](TaskHandle::activate) puts a submission
/// into the wait queue, and every call does so again, independently: the same
/// handle activated N times yields N sequential runs of the task, each with
/// its own result channel. Re-running and retrying are therefore plain
/// re-activation, composed entirely on the producer side.
pub struct TaskHandle<R> {
    task: Arc<dyn Task<R>>,
    priority: Priority,
    queue: Arc<WaitQueue>,
}

impl<R: Send + 'static> TaskHandle<R> {
    pub(crate) fn new(task: Arc<dyn Task<R>>, priority: Priority, queue: Arc<WaitQueue>) -> Self {
        TaskHandle {
            task,
            priority,
            queue,
        }
    }

    /// The priority every activation of this handle is enqueued with.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Enqueues one independent submission of the task and returns the
    /// observer for that run.
    ///
    /// If the executor has already been stopped the submission is dropped
    /// and the activation observes [`Abandoned`].
    pub fn activate(&self) -> Activation<R> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let emitter = Emitter::new(tx);
        let task = Arc::clone(&self.task);

        self.queue.insert(
            self.priority,
            Box::new(move || match task.routine(&emitter) {
                Ok(()) => emitter.complete(),
                Err(error) => {
                    log::debug!("task failed: {error}");
                    emitter.fail(error);
                }
            }),
        );

        Activation { rx, done: false }
    }
}

/// Observer of a single activation.
///
/// Events arrive in emission order: values first, then one terminal event.
/// Reading may happen on any thread, concurrently with the worker writing.
pub struct Activation<R> {
    rx: Receiver<TaskEvent<R>>,
    done: bool,
}

impl<R> Activation<R> {
    /// Blocks for the next event. Returns `None` after the terminal event has
    /// been consumed, or right away if the submission was abandoned without
    /// one (executor stopped first).
    pub fn recv(&mut self) -> Option<TaskEvent<R>> {
        if self.done {
            return None;
        }
        match self.rx.recv() {
            Ok(event) => {
                self.done = event.is_terminal();
                Some(event)
            }
            Err(_) => {
                self.done = true;
                None
            }
        }
    }

    /// Blocks until the run is over and collapses it into a result: the
    /// emitted values on completion, the task's error on failure, or
    /// [`Abandoned`] if no terminal event ever arrives.
    pub fn outcome(mut self) -> Result<Vec<R>, TaskError> {
        let mut values = Vec::new();
        while let Some(event) = self.recv() {
            match event {
                TaskEvent::Value(value) => values.push(value),
                TaskEvent::Completed => return Ok(values),
                TaskEvent::Failed(error) => return Err(error),
            }
        }
        Err(Box::new(Abandoned))
    }
}

impl<R> Iterator for Activation<R> {
    type Item = TaskEvent<R>;

    fn next(&mut self) -> Option<TaskEvent<R>> {
        self.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abandoned<R>() -> Activation<R> {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(tx);
        Activation { rx, done: false }
    }

    #[test]
    fn outcome_of_abandoned_submission() {
        let activation = abandoned::<u32>();
        let error = activation.outcome().unwrap_err();
        assert!(error.is::<Abandoned>());
    }

    #[test]
    fn recv_stops_after_terminal_event() {
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send(TaskEvent::Value(1)).unwrap();
        tx.send(TaskEvent::Completed).unwrap();
        tx.send(TaskEvent::Value(2)).unwrap();

        let mut activation = Activation { rx, done: false };
        assert!(matches!(activation.recv(), Some(TaskEvent::Value(1))));
        assert!(matches!(activation.recv(), Some(TaskEvent::Completed)));
        assert!(activation.recv().is_none());
    }
}
