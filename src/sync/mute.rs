use std::cell::Cell;
use std::rc::Rc;

/// Shared suppression flag for the unit channel's outbound traffic. While a
/// [`MuteGuard`] is live, applying a remote correction cannot itself emit a
/// further outbound correction for the same tick.
///
/// Clones share one flag; the simulation side can hold a clone and consult
/// [`engaged`](OutboundMute::engaged) from inside command handlers.
#[derive(Clone, Default)]
pub struct OutboundMute {
    flag: Rc<Cell<bool>>,
}

impl OutboundMute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engaged(&self) -> bool {
        self.flag.get()
    }

    /// Engage suppression for the guard's lifetime. The previous state is
    /// restored on drop, on every exit path.
    pub fn engage(&self) -> MuteGuard {
        let previous = self.flag.replace(true);
        MuteGuard {
            flag: Rc::clone(&self.flag),
            previous,
        }
    }
}

pub struct MuteGuard {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for MuteGuard {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
