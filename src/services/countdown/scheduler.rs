//! UI-thread task scheduling.
//!
//! The countdown never blocks: each tick posts the next one as a deferred
//! task. Hosts own a [`UiTaskQueue`] and pump it from their event loop
//! (the egui host does so once per frame), tests pump it after moving a
//! [`ManualClock`](super::clock::ManualClock).

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};

use super::clock::Clock;

/// Deferred work that runs on the UI thread.
pub type UiTask = Box<dyn FnOnce()>;

/// "Run this after N milliseconds on the UI thread."
pub trait UiTaskScheduler {
    fn post_delayed(&self, delay: StdDuration, task: UiTask);
}

struct QueuedTask {
    due: DateTime<Utc>,
    seq: u64,
    task: UiTask,
}

impl PartialEq for QueuedTask {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for QueuedTask {}

impl PartialOrd for QueuedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedTask {
    // Reversed so the BinaryHeap pops the earliest (due, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded delayed task queue keyed on an injected clock.
pub struct UiTaskQueue {
    clock: Rc<dyn Clock>,
    tasks: RefCell<BinaryHeap<QueuedTask>>,
    next_seq: Cell<u64>,
}

impl UiTaskQueue {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            tasks: RefCell::new(BinaryHeap::new()),
            next_seq: Cell::new(0),
        }
    }

    /// Runs every task that is due, including tasks posted by those tasks
    /// if they are already due. Returns how many ran.
    pub fn run_due(&self) -> usize {
        let mut executed = 0;
        loop {
            let now = self.clock.now();
            // The borrow must end before the task runs: tasks post back into
            // this queue.
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                match tasks.peek() {
                    Some(queued) if queued.due <= now => tasks.pop(),
                    _ => None,
                }
            };
            match next {
                Some(queued) => {
                    (queued.task)();
                    executed += 1;
                }
                None => break,
            }
        }
        executed
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Time until the earliest task is due, zero if it is overdue.
    pub fn next_due_in(&self) -> Option<StdDuration> {
        let now = self.clock.now();
        self.tasks
            .borrow()
            .peek()
            .map(|queued| (queued.due - now).to_std().unwrap_or(StdDuration::ZERO))
    }
}

impl UiTaskScheduler for UiTaskQueue {
    fn post_delayed(&self, delay: StdDuration, task: UiTask) {
        let delay = match Duration::from_std(delay) {
            Ok(delay) => delay,
            Err(err) => {
                log::warn!("Dropping UI task with unrepresentable delay {:?}: {}", delay, err);
                return;
            }
        };

        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.tasks.borrow_mut().push(QueuedTask {
            due: self.clock.now() + delay,
            seq,
            task,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::countdown::clock::ManualClock;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn setup() -> (Rc<ManualClock>, Rc<UiTaskQueue>) {
        let clock = Rc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ));
        let queue = Rc::new(UiTaskQueue::new(clock.clone()));
        (clock, queue)
    }

    #[test]
    fn test_tasks_wait_until_due() {
        let (clock, queue) = setup();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        queue.post_delayed(StdDuration::from_millis(1000), Box::new(move || flag.set(true)));

        assert_eq!(queue.run_due(), 0);
        assert!(!ran.get());
        assert_eq!(queue.next_due_in(), Some(StdDuration::from_millis(1000)));

        clock.advance(Duration::milliseconds(999));
        assert_eq!(queue.run_due(), 0);

        clock.advance(Duration::milliseconds(1));
        assert_eq!(queue.run_due(), 1);
        assert!(ran.get());
        assert!(queue.is_idle());
        assert_eq!(queue.next_due_in(), None);
    }

    #[test]
    fn test_runs_in_due_then_posting_order() {
        let (clock, queue) = setup();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (label, delay) in [("late", 2000), ("first", 1000), ("second", 1000)] {
            let order = order.clone();
            queue.post_delayed(
                StdDuration::from_millis(delay),
                Box::new(move || order.borrow_mut().push(label)),
            );
        }

        clock.advance(Duration::seconds(5));
        assert_eq!(queue.run_due(), 3);
        assert_eq!(*order.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_task_can_post_follow_up_without_running_it_early() {
        let (clock, queue) = setup();
        let count = Rc::new(Cell::new(0));

        let inner_queue = queue.clone();
        let inner_count = count.clone();
        queue.post_delayed(
            StdDuration::from_millis(1000),
            Box::new(move || {
                inner_count.set(inner_count.get() + 1);
                let follow_count = inner_count.clone();
                inner_queue.post_delayed(
                    StdDuration::from_millis(1000),
                    Box::new(move || follow_count.set(follow_count.get() + 1)),
                );
            }),
        );

        clock.advance(Duration::seconds(1));
        assert_eq!(queue.run_due(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(queue.pending(), 1);

        clock.advance(Duration::seconds(1));
        assert_eq!(queue.run_due(), 1);
        assert_eq!(count.get(), 2);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_overdue_task_reports_zero_wait() {
        let (clock, queue) = setup();
        queue.post_delayed(StdDuration::from_millis(10), Box::new(|| {}));
        clock.advance(Duration::seconds(3));
        assert_eq!(queue.next_due_in(), Some(StdDuration::ZERO));
    }
}
