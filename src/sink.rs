//! The result sink: how one task execution reports back to its observer.

use crossbeam_channel::Sender;

use crate::error::TaskError;

/// One event on a submission's result channel.
///
/// An activation observes zero or more `Value`s followed by exactly one
/// terminal event, unless the submission was abandoned before running (see
/// [`Abandoned`](crate::Abandoned)).
#[derive(Debug)]
pub enum TaskEvent<R> {
    /// A value emitted by the task routine.
    Value(R),
    /// The routine returned `Ok(())`.
    Completed,
    /// The routine returned an error.
    Failed(TaskError),
}

impl<R> TaskEvent<R> {
    /// Whether this event ends the activation.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskEvent::Value(_))
    }
}

/// Write side of one activation's result channel, handed to the task routine.
///
/// The terminal event is sent by the worker after the routine returns; the
/// routine itself only emits values.
pub struct Emitter<R> {
    tx: Sender<TaskEvent<R>>,
}

impl<R> Emitter<R> {
    pub(crate) fn new(tx: Sender<TaskEvent<R>>) -> Self {
        Emitter { tx }
    }

    /// Sends one value to the observer of this activation.
    ///
    /// Ignored if the observer has been dropped; the task keeps running
    /// either way.
    pub fn emit(&self, value: R) {
        let _ = self.tx.send(TaskEvent::Value(value));
    }

    pub(crate) fn complete(self) {
        let _ = self.tx.send(TaskEvent::Completed);
    }

    pub(crate) fn fail(self, error: TaskError) {
        let _ = self.tx.send(TaskEvent::Failed(error));
    }
}
