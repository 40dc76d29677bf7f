//! The wait queue: pending submissions ordered by priority.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::atomic::{self, AtomicU64};

use parking_lot::{Condvar, Mutex};

use crate::priority::Priority;

/// The type-erased one-shot job of a submission: runs the task routine
/// against the sink created for this activation and delivers the terminal
/// event.
pub(crate) type Job = Box<dyn FnOnce() + Send>;

/// One pending activation: a job waiting in the queue with its priority and
/// an insertion sequence number. One-shot; never reinserted after execution.
pub(crate) struct Submission {
    priority: Priority,
    seq: u64,
    job: Job,
}

impl Submission {
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Runs the job, consuming the submission.
    pub fn run(self) {
        (self.job)();
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("priority", &self.priority)
            .field("seq", &self.seq)
            .finish()
    }
}

impl PartialEq for Submission {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Submission {}

impl PartialOrd for Submission {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Submission {
    // Smaller priority key first; insertion order within one key, so no
    // submission is starved by equal-priority traffic.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

struct Inner {
    heap: BinaryHeap<Reverse<Submission>>,
    closed: bool,
}

/// A concurrent blocking priority queue.
///
/// Any number of producers may [`insert`](WaitQueue::insert) without
/// blocking; the single worker blocks in [`take`](WaitQueue::take) until a
/// submission arrives. [`close`](WaitQueue::close) cancels the wait: `take`
/// returns `None` from then on, even while submissions remain queued, and
/// later inserts are dropped.
pub(crate) struct WaitQueue {
    seq: AtomicU64,
    inner: Mutex<Inner>,
    available: Condvar,
}

impl WaitQueue {
    pub fn new() -> Self {
        WaitQueue {
            seq: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                heap: BinaryHeap::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Adds a submission. Never blocks.
    pub fn insert(&self, priority: Priority, job: Job) {
        let seq = self.seq.fetch_add(1, atomic::Ordering::Relaxed);
        let submission = Submission { priority, seq, job };

        let mut inner = self.inner.lock();
        if inner.closed {
            log::trace!("queue closed, dropping submission {:?}", submission);
            return;
        }
        inner.heap.push(Reverse(submission));
        drop(inner);
        self.available.notify_one();
    }

    /// Removes and returns the submission with the smallest priority key,
    /// blocking while the queue is empty. Returns `None` once the queue has
    /// been closed.
    pub fn take(&self) -> Option<Submission> {
        let mut inner = self.inner.lock();
        loop {
            if inner.closed {
                return None;
            }
            if let Some(Reverse(submission)) = inner.heap.pop() {
                return Some(submission);
            }
            self.available.wait(&mut inner);
        }
    }

    /// Closes the queue, waking the blocked worker. Submissions still queued
    /// are abandoned: dropped unexecuted, together with their sinks, so
    /// observers see the disconnection right away.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        let abandoned = inner.heap.len();
        inner.heap.clear();
        drop(inner);
        if abandoned > 0 {
            log::debug!("abandoned {abandoned} queued submissions");
        }
        self.available.notify_all();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().heap.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn noop() -> Job {
        Box::new(|| {})
    }

    #[test]
    fn take_returns_smallest_key_regardless_of_insert_order() {
        let queue = WaitQueue::new();
        queue.insert(Priority::LOWEST, noop());
        queue.insert(Priority::HIGHEST, noop());
        queue.insert(Priority::NORMAL, noop());

        let order: Vec<Priority> = (0..3).map(|_| queue.take().unwrap().priority()).collect();
        assert_eq!(
            order,
            vec![Priority::HIGHEST, Priority::NORMAL, Priority::LOWEST]
        );
    }

    #[test]
    fn equal_keys_dequeue_in_insertion_order() {
        let queue = WaitQueue::new();
        let (tx, rx) = mpsc::channel();
        for i in 0..16 {
            let tx = tx.clone();
            queue.insert(Priority::NORMAL, Box::new(move || tx.send(i).unwrap()));
        }

        for _ in 0..16 {
            queue.take().unwrap().run();
        }

        let seen: Vec<i32> = rx.try_iter().collect();
        assert_eq!(seen, (0..16).collect::<Vec<i32>>());
    }

    #[test]
    fn take_blocks_until_insert() {
        let queue = Arc::new(WaitQueue::new());
        let taker = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.take().map(|s| s.priority()))
        };

        thread::sleep(Duration::from_millis(10));
        queue.insert(Priority::HIGHER, noop());
        assert_eq!(taker.join().unwrap(), Some(Priority::HIGHER));
    }

    #[test]
    fn close_wakes_blocked_taker() {
        let queue = Arc::new(WaitQueue::new());
        let taker = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.take().is_none())
        };

        thread::sleep(Duration::from_millis(10));
        queue.close();
        assert!(taker.join().unwrap());
    }

    #[test]
    fn close_drops_pending_submissions() {
        let queue = WaitQueue::new();
        let (tx, rx) = mpsc::channel::<()>();
        queue.insert(
            Priority::NORMAL,
            Box::new(move || {
                let _keep_alive = tx;
            }),
        );
        queue.close();
        assert!(queue.take().is_none());
        assert_eq!(queue.len(), 0);
        // The job never ran; its sender was dropped with the queue entry.
        assert!(rx.recv().is_err());
    }

    #[test]
    fn insert_after_close_is_dropped() {
        let queue = WaitQueue::new();
        queue.close();
        queue.insert(Priority::NORMAL, noop());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn concurrent_inserts_all_arrive() {
        let queue = Arc::new(WaitQueue::new());
        let producers: Vec<_> = (0..8)
            .map(|i| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for j in 0..50 {
                        queue.insert(Priority::new(i * 50 + j), noop());
                    }
                })
            })
            .collect();
        for p in producers {
            p.join().unwrap();
        }

        let mut last = i32::MIN;
        for _ in 0..400 {
            let key = queue.take().unwrap().priority().key();
            assert!(key >= last);
            last = key;
        }
        assert_eq!(queue.len(), 0);
    }
}
