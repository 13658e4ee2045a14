//! Single-flight Gate
//!
//! Shared between the controller (which holds it for a whole submission) and
//! the poller (which skips ticks while it is held).

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    busy: Rc<Cell<bool>>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// `None` while another pass is alive
    pub fn try_acquire(&self) -> Option<GatePass> {
        if self.busy.replace(true) {
            None
        } else {
            Some(GatePass { busy: Rc::clone(&self.busy) })
        }
    }
}

/// Releases the gate when dropped, on every exit path
#[derive(Debug)]
pub struct GatePass {
    busy: Rc<Cell<bool>>,
}

impl Drop for GatePass {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pass() {
        let gate = SubmissionGate::new();
        let pass = gate.try_acquire();
        assert!(pass.is_some());
        assert!(gate.is_busy());
        assert!(gate.clone().try_acquire().is_none());
        drop(pass);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }
}
