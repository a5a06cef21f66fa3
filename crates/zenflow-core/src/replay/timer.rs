//! Single-slot cancellable tick timer.

use std::time::Instant;

/// Identifies one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickId(u64);

#[derive(Debug, Clone, Copy)]
struct PendingTick {
    id: TickId,
    due: Instant,
}

/// Holds at most one pending tick.
///
/// Scheduling always cancels the previous tick first, and cancelling is
/// idempotent. Once cancelled, a tick can never be returned by
/// [`TickTimer::take_due`].
#[derive(Debug, Default)]
pub struct TickTimer {
    next_id: u64,
    pending: Option<PendingTick>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tick at `due`, replacing any pending one.
    pub fn schedule(&mut self, due: Instant) -> TickId {
        self.cancel();
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.pending = Some(PendingTick { id, due });
        id
    }

    /// Cancel the pending tick. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending tick fires, if any.
    pub fn due(&self) -> Option<Instant> {
        self.pending.map(|tick| tick.due)
    }

    /// Remove and return the pending tick if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<(TickId, Instant)> {
        match self.pending {
            Some(tick) if tick.due <= now => {
                self.pending = None;
                Some((tick.id, tick.due))
            }
            _ => None,
        }
    }
}
