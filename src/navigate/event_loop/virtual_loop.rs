use std::cell::RefCell;
use std::time::Duration;

use crate::navigate::event_loop::{EventLoop, Task, TaskId};

struct Timer {
    id: TaskId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct LoopState {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
    scroll_observers: Vec<(TaskId, Task)>,
}

impl LoopState {
    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::new(self.next_id)
    }

    fn take_next_due(&mut self, until: Duration) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }
}

/// Deterministic event loop driven by a virtual clock.
///
/// Nothing runs on its own: time moves with [`advance`](Self::advance) and
/// scrolls settle with [`emit_scroll_end`](Self::emit_scroll_end). Tasks may
/// register or cancel other tasks while running.
#[derive(Default)]
pub struct VirtualEventLoop {
    state: RefCell<LoopState>,
}

impl VirtualEventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the loop was created
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Move the clock forward, running every timer that falls due in order
    pub fn advance(&self, by: Duration) -> usize {
        let until = self.state.borrow().now + by;
        let mut ran = 0;

        loop {
            let timer = {
                let mut state = self.state.borrow_mut();
                match state.take_next_due(until) {
                    Some(timer) => {
                        state.now = timer.due;
                        timer
                    }
                    None => break,
                }
            };
            (timer.task)();
            ran += 1;
        }

        self.state.borrow_mut().now = until;
        ran
    }

    /// Signal that a scroll settled, running the observers registered so far
    pub fn emit_scroll_end(&self) -> usize {
        let observers = std::mem::take(&mut self.state.borrow_mut().scroll_observers);
        let count = observers.len();
        for (_, task) in observers {
            task();
        }
        count
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn pending_scroll_observers(&self) -> usize {
        self.state.borrow().scroll_observers.len()
    }
}

impl EventLoop for VirtualEventLoop {
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        let due = state.now + delay;
        state.timers.push(Timer { id, due, task });
        id
    }

    fn once_scroll_end(&self, task: Task) -> TaskId {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        state.scroll_observers.push((id, task));
        id
    }

    fn cancel(&self, id: TaskId) -> bool {
        let mut state = self.state.borrow_mut();

        if let Some(index) = state.timers.iter().position(|timer| timer.id == id) {
            state.timers.remove(index);
            return true;
        }

        if let Some(index) = state.scroll_observers.iter().position(|(observer, _)| *observer == id) {
            state.scroll_observers.remove(index);
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = Rc::clone(&log);
        let make = move |name: &'static str| -> Task {
            let log = Rc::clone(&handle);
            Box::new(move || log.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_timers_run_in_due_order() {
        let events = VirtualEventLoop::new();
        let (log, task) = recorder();

        events.set_timeout(Duration::from_millis(300), task("late"));
        events.set_timeout(Duration::from_millis(100), task("early"));
        events.set_timeout(Duration::from_millis(100), task("early-second"));

        assert_eq!(events.advance(Duration::from_millis(99)), 0);
        assert_eq!(events.advance(Duration::from_millis(1)), 2);
        assert_eq!(*log.borrow(), vec!["early", "early-second"]);
        assert_eq!(events.now(), Duration::from_millis(100));

        events.advance(Duration::from_secs(1));
        assert_eq!(*log.borrow(), vec!["early", "early-second", "late"]);
        assert_eq!(events.pending_timers(), 0);
    }

    #[test]
    fn test_scroll_observers_fire_once() {
        let events = VirtualEventLoop::new();
        let (log, task) = recorder();

        events.once_scroll_end(task("settled"));
        assert_eq!(events.emit_scroll_end(), 1);
        assert_eq!(events.emit_scroll_end(), 0);
        assert_eq!(*log.borrow(), vec!["settled"]);
    }

    #[test]
    fn test_cancel() {
        let events = VirtualEventLoop::new();
        let (log, task) = recorder();

        let timer = events.set_timeout(Duration::from_millis(10), task("timer"));
        let observer = events.once_scroll_end(task("observer"));
        assert!(events.cancel(timer));
        assert!(events.cancel(observer));
        assert!(!events.cancel(timer));

        events.advance(Duration::from_millis(50));
        events.emit_scroll_end();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_task_can_schedule_follow_up() {
        let events = Rc::new(VirtualEventLoop::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_events = Rc::clone(&events);
        let inner_log = Rc::clone(&log);
        events.set_timeout(
            Duration::from_millis(10),
            Box::new(move || {
                inner_log.borrow_mut().push(inner_events.now());
                let log = Rc::clone(&inner_log);
                let clock = Rc::clone(&inner_events);
                inner_events.set_timeout(
                    Duration::from_millis(10),
                    Box::new(move || log.borrow_mut().push(clock.now())),
                );
            }),
        );

        events.advance(Duration::from_millis(100));
        assert_eq!(
            *log.borrow(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
    }
}
