use std::io;

use thiserror::Error;

/// Boxed error produced by a failing [`Task`](crate::Task) routine.
///
/// Delivered to the failing activation's sink as
/// [`TaskEvent::Failed`](crate::TaskEvent::Failed); never seen by the worker
/// loop or by other activations.
pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

/// Lifecycle misuse reported synchronously by [`Executor::start`] and
/// [`Executor::stop`]. The executor's state is left unchanged when one of
/// these is returned.
///
/// [`Executor::start`]: crate::Executor::start
/// [`Executor::stop`]: crate::Executor::stop
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// `start` was called while the worker was already running.
    #[error("executor was already started")]
    AlreadyRunning,

    /// `start` was called after `stop`. A stopped executor cannot be
    /// restarted; build a fresh one.
    #[error("executor was stopped and cannot be restarted")]
    Stopped,

    /// `stop` was called before `start`, or a second time.
    #[error("executor is not running")]
    NotRunning,

    /// The OS refused to spawn the worker thread.
    #[error("failed to spawn worker thread")]
    Spawn(#[source] io::Error),
}

/// The submission's sink was dropped before a terminal event was delivered.
///
/// Happens when the executor is stopped (or dropped) while the submission is
/// still queued, or when a handle is activated after stop.
#[derive(Debug, Error)]
#[error("submission was abandoned before a terminal event")]
pub struct Abandoned;
