//! A Task is the unit of work that runs, one at a time, on the worker thread.

use crate::error::TaskError;
use crate::sink::Emitter;

/// A block of code executed sequentially with respect to all other tasks on
/// the same [`Executor`](crate::Executor).
///
/// The routine may call [`Emitter::emit`] any number of times to stream
/// values to the observer. Returning `Ok(())` delivers the completion event
/// automatically; returning an error delivers the failure event instead, so
/// a routine should never try to signal its own terminal outcome.
///
/// A task value may be shared across repeated activations of one handle,
/// hence `Send + Sync`. It must not assume anything about the executing
/// thread beyond "some single worker thread, sequentially". Panics are not
/// caught; report failures through the `Err` path.
pub trait Task<R>: Send + Sync {
    /// The program code of the task.
    fn routine(&self, emitter: &Emitter<R>) -> Result<(), TaskError>;
}

impl<R, F> Task<R> for F
where
    F: Fn(&Emitter<R>) -> Result<(), TaskError> + Send + Sync,
{
    fn routine(&self, emitter: &Emitter<R>) -> Result<(), TaskError> {
        self(emitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::TaskEvent;

    #[test]
    fn closure_routine_emits() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let emitter = Emitter::new(tx);

        let task = |emitter: &Emitter<u32>| -> Result<(), TaskError> {
            emitter.emit(7);
            Ok(())
        };

        task.routine(&emitter).unwrap();
        assert!(matches!(rx.recv(), Ok(TaskEvent::Value(7))));
    }

    #[test]
    fn closure_routine_fails() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let emitter = Emitter::new(tx);

        let task = |_: &Emitter<u32>| -> Result<(), TaskError> { Err("no carrier".into()) };
        assert!(task.routine(&emitter).is_err());
    }
}
