use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::navigate::event_loop::{EventLoop, Task, TaskId};

#[derive(Default)]
struct Registry {
    next_id: u64,
    handles: HashMap<TaskId, JoinHandle<()>>,
}

impl Registry {
    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::new(self.next_id)
    }
}

/// Event loop backed by tokio tasks on a [`tokio::task::LocalSet`].
///
/// Timers sleep with `tokio::time::sleep`, scroll-end observers wait on a
/// `watch` channel bumped by [`emit_scroll_end`](Self::emit_scroll_end), and
/// cancellation aborts the task. Must be used from within a `LocalSet`.
pub struct TokioEventLoop {
    registry: Rc<RefCell<Registry>>,
    scroll_end: watch::Sender<u64>,
}

impl TokioEventLoop {
    pub fn new() -> Self {
        let (scroll_end, _) = watch::channel(0);
        Self {
            registry: Rc::new(RefCell::new(Registry::default())),
            scroll_end,
        }
    }

    /// Signal that a scroll settled
    pub fn emit_scroll_end(&self) {
        self.scroll_end.send_modify(|count| *count = count.wrapping_add(1));
    }

    /// Tasks registered and neither finished nor cancelled
    pub fn pending(&self) -> usize {
        self.registry.borrow().handles.len()
    }

    fn spawn<F>(&self, id: TaskId, wait: F, task: Task)
    where
        F: std::future::Future<Output = bool> + 'static,
    {
        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        let handle = tokio::task::spawn_local(async move {
            let ready = wait.await;
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().handles.remove(&id);
            }
            if ready {
                task();
            }
        });
        self.registry.borrow_mut().handles.insert(id, handle);
    }
}

impl Default for TokioEventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop for TokioEventLoop {
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskId {
        let id = self.registry.borrow_mut().allocate();
        self.spawn(
            id,
            async move {
                tokio::time::sleep(delay).await;
                true
            },
            task,
        );
        id
    }

    fn once_scroll_end(&self, task: Task) -> TaskId {
        let id = self.registry.borrow_mut().allocate();
        // Subscribing marks the current count as seen, so only later scrolls count
        let mut scroll_end = self.scroll_end.subscribe();
        self.spawn(
            id,
            async move { scroll_end.changed().await.is_ok() },
            task,
        );
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        match self.registry.borrow_mut().handles.remove(&id) {
            Some(handle) => {
                debug!("Cancelling {}", id);
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for TokioEventLoop {
    fn drop(&mut self) {
        for (_, handle) in self.registry.borrow_mut().handles.drain() {
            handle.abort();
        }
    }
}
