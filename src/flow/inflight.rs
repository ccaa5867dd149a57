use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Controller operations that may only run one at a time each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    Confirm,
    ResendCode,
    Check,
}

/// Set of operations currently running.
#[derive(Debug, Default)]
pub(super) struct InFlight {
    running: Mutex<HashSet<Operation>>,
}

impl InFlight {
    /// Marks `op` as running, or `None` if it already is.
    pub(super) fn try_begin(&self, op: Operation) -> Option<InFlightGuard<'_>> {
        let inserted = self.lock().insert(op);
        inserted.then(|| InFlightGuard { set: self, op })
    }

    pub(super) fn is_running(&self, op: Operation) -> bool {
        self.lock().contains(&op)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Operation>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(super) struct InFlightGuard<'a> {
    set: &'a InFlight,
    op: Operation,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set.lock().remove(&self.op);
    }
}
