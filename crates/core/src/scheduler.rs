//! Scheduled tasks on a virtual millisecond clock
//!
//! The host drives time with [`Scheduler::advance`] and then drains due work
//! with [`Scheduler::pop_due`]. Two kinds of entries exist: repeating ticks
//! and one-shot deferred tasks. Every entry is addressed by a
//! [`TaskHandle`] that can be cancelled.
//!
//! Entries created after the latest `advance` are not eligible until the
//! next one. A task scheduled while another task is being handled therefore
//! never runs in the same pass, even with a zero delay.

/// Identifies one scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    task: T,
    due_ms: u64,
    period_ms: Option<u32>,
    armed: bool,
}

/// Single-threaded timer queue
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    horizon_ms: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Copy> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            horizon_ms: 0,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Next due time of a pending entry
    pub fn due_ms(&self, handle: TaskHandle) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.due_ms)
    }

    fn push(&mut self, task: T, due_ms: u64, period_ms: Option<u32>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            task,
            due_ms,
            period_ms,
            armed: false,
        });
        handle
    }

    /// Run `task` once, `delay_ms` from now
    pub fn schedule_once(&mut self, task: T, delay_ms: u32) -> TaskHandle {
        self.push(task, self.now_ms + delay_ms as u64, None)
    }

    /// Run `task` every `interval_ms`, first one interval from now
    pub fn schedule_repeating(&mut self, task: T, interval_ms: u32) -> TaskHandle {
        self.schedule_repeating_after(task, interval_ms, interval_ms)
    }

    /// Run `task` every `interval_ms`, first after `first_delay_ms`
    ///
    /// A zero interval is treated as 1ms so a repeating entry always makes
    /// progress.
    pub fn schedule_repeating_after(
        &mut self,
        task: T,
        first_delay_ms: u32,
        interval_ms: u32,
    ) -> TaskHandle {
        self.push(
            task,
            self.now_ms + first_delay_ms as u64,
            Some(interval_ms.max(1)),
        )
    }

    /// Remove a pending entry. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Move the horizon `elapsed_ms` forward and arm every pending entry
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.horizon_ms = self.now_ms + elapsed_ms as u64;
        for entry in &mut self.entries {
            entry.armed = true;
        }
    }

    /// Take the earliest armed entry due at or before the horizon
    ///
    /// The clock moves to that entry's due time. Repeating entries are
    /// rescheduled one period later and stay armed. When nothing is due the
    /// clock moves to the horizon and `None` is returned.
    pub fn pop_due(&mut self) -> Option<(TaskHandle, T)> {
        let horizon = self.horizon_ms;
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.armed && e.due_ms <= horizon)
            .min_by_key(|(_, e)| (e.due_ms, e.handle))
            .map(|(idx, _)| idx);

        let Some(idx) = idx else {
            self.now_ms = self.now_ms.max(horizon);
            return None;
        };

        let entry = &mut self.entries[idx];
        self.now_ms = self.now_ms.max(entry.due_ms);
        let fired = (entry.handle, entry.task);
        match entry.period_ms {
            Some(period) => entry.due_ms += period as u64,
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(fired)
    }
}

impl<T: Copy> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler<char>) -> Vec<(u64, char)> {
        let mut out = Vec::new();
        while let Some((_, task)) = s.pop_due() {
            out.push((s.now_ms(), task));
        }
        out
    }

    #[test]
    fn repeating_fires_each_period() {
        let mut s = Scheduler::new();
        s.schedule_repeating('t', 100);
        s.advance(350);
        assert_eq!(drain(&mut s), vec![(100, 't'), (200, 't'), (300, 't')]);
        assert_eq!(s.now_ms(), 350);
    }

    #[test]
    fn zero_delay_once_waits_for_next_advance() {
        let mut s = Scheduler::new();
        s.advance(10);
        assert!(s.pop_due().is_none());

        s.schedule_once('d', 0);
        assert!(s.pop_due().is_none());

        s.advance(0);
        assert_eq!(drain(&mut s), vec![(10, 'd')]);
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn entries_scheduled_while_draining_are_deferred() {
        let mut s = Scheduler::new();
        s.schedule_once('a', 5);
        s.advance(100);
        assert_eq!(s.pop_due().map(|(_, t)| t), Some('a'));
        s.schedule_once('b', 0);
        assert!(s.pop_due().is_none());
        s.advance(0);
        assert_eq!(s.pop_due().map(|(_, t)| t), Some('b'));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeating('t', 10);
        assert!(s.is_pending(h));
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        s.advance(100);
        assert!(s.pop_due().is_none());
    }

    #[test]
    fn ties_fire_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule_once('x', 50);
        s.schedule_once('y', 50);
        s.advance(50);
        assert_eq!(drain(&mut s), vec![(50, 'x'), (50, 'y')]);
    }

    #[test]
    fn repeating_after_uses_first_delay() {
        let mut s = Scheduler::new();
        let h = s.schedule_repeating_after('t', 20, 300);
        assert_eq!(s.due_ms(h), Some(20));
        s.advance(400);
        assert_eq!(drain(&mut s), vec![(20, 't'), (320, 't')]);
    }
}
