//! A priority-ordered sequential task executor.
//!
//! Serializes access to a single shared resource (a bus, a port, a device):
//! any number of producers submit tasks, one dedicated worker thread runs
//! them strictly one at a time, smallest priority key first.
//!
//! Submission is deferred. [`Executor::submit`] only prepares a
//! [`TaskHandle`]; the task is enqueued when the handle is
//! [`activate`](TaskHandle::activate)d, and every activation enqueues an
//! independent run with its own result channel. Repeating or retrying a task
//! is just activating its handle again.
//!
//! # Examples
//! ```rust
//! use turnstile::{Emitter, Executor, Priority, TaskError};
//!
//! let executor = Executor::new();
//! executor.start()?;
//!
//! let handle = executor.submit_with_priority(
//!     |emitter: &Emitter<u32>| -> Result<(), TaskError> {
//!         emitter.emit(7);
//!         Ok(())
//!     },
//!     Priority::HIGHER,
//! );
//!
//! assert_eq!(handle.activate().outcome().unwrap(), vec![7]);
//! executor.stop()?;
//! # Ok::<(), turnstile::ExecutorError>(())
//! ```

mod error;
mod executor;
mod handle;
mod priority;
mod queue;
mod sink;
mod task;
mod worker;

pub use error::{Abandoned, ExecutorError, TaskError};
pub use executor::Executor;
pub use handle::{Activation, TaskHandle};
pub use priority::Priority;
pub use sink::{Emitter, TaskEvent};
pub use task::Task;
