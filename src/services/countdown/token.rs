use std::cell::Cell;
use std::rc::Rc;

/// One-way boolean gate shared between a timer and the ticks it queued.
/// Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true only for the call that actually flipped the gate.
    pub fn cancel(&self) -> bool {
        !self.cancelled.replace(true)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
