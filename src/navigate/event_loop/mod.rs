mod tokio_loop;
#[cfg(test)]
mod virtual_loop;

pub use tokio_loop::TokioEventLoop;
#[cfg(test)]
pub use virtual_loop::VirtualEventLoop;

use std::fmt;
use std::time::Duration;

/// A one-shot callback run on the UI thread
pub type Task = Box<dyn FnOnce()>;

/// Handle for a pending one-shot task, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Single-threaded scheduler the navigator registers its continuations with.
///
/// Every registered task runs at most once. Cancelling a task that already
/// ran or was already cancelled returns false.
pub trait EventLoop {
    /// Run `task` once `delay` has elapsed
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskId;

    /// Run `task` the next time a scroll settles
    fn once_scroll_end(&self, task: Task) -> TaskId;

    fn cancel(&self, id: TaskId) -> bool;
}
