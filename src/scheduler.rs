//! Deferred delivery of programmatic value changes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

pub type Task = Box<dyn FnOnce()>;

/// Runs a task after the current update pass.
pub trait Scheduler {
    fn schedule(&self, task: Task);
}

/// Runs tasks right away.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule(&self, task: Task) {
        task();
    }
}

/// Holds tasks until [`QueueScheduler::run_pending`] is called.
#[derive(Default)]
pub struct QueueScheduler {
    tasks: RefCell<VecDeque<Task>>,
}

impl QueueScheduler {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run queued tasks, including any scheduled while running. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            let Some(task) = next else {
                break ran;
            };
            task();
            ran += 1;
        }
    }
}

impl Scheduler for QueueScheduler {
    fn schedule(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for QueueScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
