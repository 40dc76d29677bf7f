use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::queue::WaitQueue;

/// The dedicated thread that drains the wait queue.
///
/// Exactly one worker exists per running executor. It loops on
/// [`WaitQueue::take`], runs each submission to its terminal event, and exits
/// when the queue is closed. A failing task never ends the loop; failure is
/// delivered to that submission's own sink inside the job.
pub(crate) struct Worker {
    handle: JoinHandle<()>,
}

impl Worker {
    /// Spawns the named worker thread.
    pub fn spawn(name: &str, queue: Arc<WaitQueue>) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || Self::drain(&queue))?;
        Ok(Worker { handle })
    }

    fn drain(queue: &WaitQueue) {
        while let Some(submission) = queue.take() {
            log::trace!(
                "running submission with priority key {}",
                submission.priority().key()
            );
            submission.run();
        }
        log::debug!("wait queue closed, worker exiting");
    }

    /// Blocks until the worker thread has fully exited.
    pub fn join(self) {
        let _ = self.handle.join();
    }
}
