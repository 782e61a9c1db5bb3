//! Deferred task scheduler
//!
//! Combat pacing runs on a virtual clock. Handlers schedule [`Task`]s with a
//! delay and keep the returned [`TaskHandle`]; cancelling the handle before the
//! task comes due is the only way to pre-empt it. The host moves the clock,
//! either from wall-clock time or by jumping to the next deadline.

use alloc::collections::{BTreeSet, BinaryHeap};
use core::cmp::Ordering;

/// Milliseconds on the scheduler's clock
pub type Millis = u64;

pub const PRE_COMBAT_DELAY_MS: Millis = 1200;
pub const WINDOW_MS: Millis = 3200;
pub const RESOLVE_DELAY_MS: Millis = 900;
pub const NOOP_DELAY_MS: Millis = 600;
pub const PREEMPT_DELAY_MS: Millis = 800;
pub const FLASH_MS: Millis = 400;
pub const ANNOUNCE_DELAY_MS: Millis = 700;

/// Pacing of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Start of combat to the first tick.
    pub pre_combat: Millis,
    /// Length of an intervention window.
    pub window: Millis,
    /// Resolution to the next tick.
    pub resolve_delay: Millis,
    /// Stale resolution to the next tick.
    pub noop_delay: Millis,
    /// Redirect or hold to the pre-empted resolution.
    pub preempt_delay: Millis,
    /// How long struck units stay highlighted.
    pub flash: Millis,
    /// End of combat to the result announcement.
    pub announce: Millis,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            pre_combat: PRE_COMBAT_DELAY_MS,
            window: WINDOW_MS,
            resolve_delay: RESOLVE_DELAY_MS,
            noop_delay: NOOP_DELAY_MS,
            preempt_delay: PREEMPT_DELAY_MS,
            flash: FLASH_MS,
            announce: ANNOUNCE_DELAY_MS,
        }
    }
}

/// Work the engine defers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Pick the next attacker/target pair and open a window.
    Tick,
    /// The window ran out; close it and resolve.
    CloseWindow,
    /// Resolve a pre-empted window.
    Resolve,
    /// Drop the hit highlight.
    ClearFlash,
    /// Publish the end-of-combat announcement.
    Announce,
}

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    due: Millis,
    seq: u64,
    task: Task,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Max-heap inverted: earliest deadline first, then scheduling order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Virtual-clock queue of cancellable deferred tasks
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Millis,
    next_seq: u64,
    heap: BinaryHeap<Entry>,
    live: BTreeSet<u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn schedule(&mut self, delay: Millis, task: Task) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            due: self.now + delay,
            seq,
            task,
        });
        self.live.insert(seq);
        TaskHandle(seq)
    }

    /// Returns true if the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.live.remove(&handle.0)
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.live.contains(&handle.0)
    }

    pub fn pending_count(&self) -> usize {
        self.live.len()
    }

    /// Drops every pending task. The clock keeps its value.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    fn discard_cancelled(&mut self) {
        while let Some(head) = self.heap.peek() {
            if self.live.contains(&head.seq) {
                break;
            }
            self.heap.pop();
        }
    }

    /// Deadline of the earliest pending task.
    pub fn next_due(&mut self) -> Option<Millis> {
        self.discard_cancelled();
        self.heap.peek().map(|e| e.due)
    }

    /// Pops the earliest task due at or before `until`, moving the clock to
    /// its deadline so follow-up tasks are scheduled relative to it.
    pub fn pop_due(&mut self, until: Millis) -> Option<Task> {
        self.discard_cancelled();
        let due = self.heap.peek()?.due;
        if due > until {
            return None;
        }
        let entry = self.heap.pop()?;
        self.live.remove(&entry.seq);
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    /// Moves the clock forward without running anything.
    pub fn advance_to(&mut self, time: Millis) {
        self.now = self.now.max(time);
    }
}
