//! Cooperative virtual-time task scheduler
//!
//! Stands in for browser timers. The owner advances time with `pop_due`,
//! dispatching one task at a time, so a task may freely schedule or cancel
//! others while it runs. Ordering is fully deterministic: earliest due time
//! first, ties broken by scheduling order.

/// Work the session performs when a scheduled entry fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// One game loop iteration
    Frame,
    /// One second of the phase timer
    PhaseTimer,
    /// Advance the dialogue/countdown sequence
    Sequence,
    /// Hide the "Go!" marker
    ClearMarker,
    /// Automatic restart after a loss
    Restart,
}

/// Identifies one scheduled entry; never reused within a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    handle: TaskHandle,
    task: Task,
    due: f64,
    period: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: f64,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shortest period a repeating task may have, in ms
pub const MIN_PERIOD_MS: f64 = 1.0;

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Run `task` once, `delay` ms from now
    pub fn schedule_once(&mut self, delay: f64, task: Task) -> TaskHandle {
        self.push(task, delay.max(0.0), None)
    }

    /// Run `task` every `period` ms, first after one period. Periods are
    /// clamped to at least `MIN_PERIOD_MS`.
    pub fn schedule_every(&mut self, period: f64, task: Task) -> TaskHandle {
        let period = period.max(MIN_PERIOD_MS);
        self.push(task, period, Some(period))
    }

    fn push(&mut self, task: Task, delay: f64, period: Option<f64>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            task,
            due: self.now + delay,
            period,
        });
        handle
    }

    /// Remove an entry. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Number of live entries running `task`
    pub fn active_count(&self, task: Task) -> usize {
        self.entries.iter().filter(|e| e.task == task).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest due time, if anything is scheduled
    pub fn next_due(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.due).min_by(f64::total_cmp)
    }

    /// Pop the next task due at or before `limit`, moving the clock to its
    /// due time. Periodic entries are re-armed; when they have fallen more
    /// than a period behind `limit` the missed iterations are dropped.
    pub fn pop_due(&mut self, limit: f64) -> Option<Task> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= limit)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.handle.cmp(&b.handle)))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        let task = entry.task;
        self.now = self.now.max(entry.due);

        match entry.period {
            Some(period) => {
                let periods = ((limit - entry.due) / period).floor().max(1.0);
                entry.due += period * periods;
            }
            None => {
                self.entries.remove(idx);
            }
        }

        Some(task)
    }

    /// Finish a pump: the clock catches up with wall time
    pub fn settle(&mut self, now: f64) {
        self.now = self.now.max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, limit: f64) -> Vec<Task> {
        let mut fired = Vec::new();
        while let Some(task) = s.pop_due(limit) {
            fired.push(task);
        }
        s.settle(limit);
        fired
    }

    #[test]
    fn test_once_fires_once() {
        let mut s = Scheduler::new();
        let h = s.schedule_once(100.0, Task::Restart);
        assert!(drain(&mut s, 99.0).is_empty());
        assert_eq!(drain(&mut s, 100.0), vec![Task::Restart]);
        assert!(!s.is_active(h));
        assert!(drain(&mut s, 1000.0).is_empty());
    }

    #[test]
    fn test_due_order_then_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule_once(50.0, Task::Sequence);
        s.schedule_once(10.0, Task::Restart);
        s.schedule_once(50.0, Task::ClearMarker);
        assert_eq!(
            drain(&mut s, 60.0),
            vec![Task::Restart, Task::Sequence, Task::ClearMarker]
        );
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let h = s.schedule_every(10.0, Task::Frame);
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(drain(&mut s, 100.0).is_empty());
        assert_eq!(s.active_count(Task::Frame), 0);
    }

    #[test]
    fn test_periodic_fires_each_period() {
        let mut s = Scheduler::new();
        s.schedule_every(10.0, Task::Frame);
        let mut total = 0;
        for step in 1..=10 {
            total += drain(&mut s, step as f64 * 10.0).len();
        }
        assert_eq!(total, 10);
    }

    #[test]
    fn test_periodic_drops_missed_iterations() {
        let mut s = Scheduler::new();
        s.schedule_every(10.0, Task::Frame);
        // A long stall fires at most twice, not 100 times
        let fired = drain(&mut s, 1000.0);
        assert!(fired.len() <= 2);
        assert!(s.next_due().unwrap() > 1000.0);
    }

    #[test]
    fn test_tiny_period_is_clamped() {
        let mut s = Scheduler::new();
        s.schedule_every(1e-20, Task::Frame);
        // Once at the first 1 ms due time, once more at the caught-up limit
        assert_eq!(drain(&mut s, 4_000.0).len(), 2);
        assert_eq!(s.next_due(), Some(4_001.0));
    }

    #[test]
    fn test_clock_moves_to_due_time() {
        let mut s = Scheduler::new();
        s.schedule_once(30.0, Task::Sequence);
        assert_eq!(s.pop_due(100.0), Some(Task::Sequence));
        assert_eq!(s.now(), 30.0);
        // Chained work is scheduled relative to the firing time
        s.schedule_once(30.0, Task::Sequence);
        assert_eq!(s.next_due(), Some(60.0));
        s.settle(100.0);
        assert_eq!(s.now(), 100.0);
    }
}
