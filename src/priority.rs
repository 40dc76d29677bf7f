//! Priority keys that decide dequeue order. Smaller value = higher priority.

/// Dequeue priority of a submission.
///
/// Priorities form a total order over the full `i32` domain; the wait queue
/// always hands the worker the submission with the numerically *smallest*
/// key. The named constants are reference points spaced to leave headroom for
/// custom values between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(i32);

impl Priority {
    /// The highest possible priority.
    pub const HIGHEST: Priority = Priority(i32::MIN);

    /// Halfway between [`HIGHEST`](Self::HIGHEST) and [`NORMAL`](Self::NORMAL).
    pub const HIGHER: Priority = Priority(0xc000_0000_u32 as i32);

    /// The default priority.
    pub const NORMAL: Priority = Priority(0);

    /// Halfway between [`NORMAL`](Self::NORMAL) and [`LOWEST`](Self::LOWEST).
    pub const LOWER: Priority = Priority(0x3fff_ffff);

    /// The lowest possible priority.
    pub const LOWEST: Priority = Priority(i32::MAX);

    /// A priority with an arbitrary key. Smaller keys dequeue first.
    pub const fn new(key: i32) -> Self {
        Priority(key)
    }

    /// The raw key.
    pub const fn key(self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::NORMAL
    }
}

impl From<i32> for Priority {
    fn from(key: i32) -> Self {
        Priority(key)
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}
