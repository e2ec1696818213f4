#[derive(Debug)]
struct Pending<T> {
    /// Schedule order; breaks ties between equal deadlines.
    seq: u64,
    deadline_ms: f64,
    payload: T,
}

/// One-shot timers polled from the frame loop.
///
/// Timers are never cancelled; consumers make stale payloads harmless
/// (e.g. by carrying a generation number).
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_seq: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline_ms: f64, payload: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(Pending {
            seq,
            deadline_ms,
            payload,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every payload whose deadline is `<= now_ms`.
    ///
    /// Ordering: `(deadline, schedule order)`.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<T> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.deadline_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| {
            a.deadline_ms
                .total_cmp(&b.deadline_ms)
                .then_with(|| a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|p| p.payload).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;

    #[test]
    fn drains_only_due_timers_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(300.0, "c");
        q.schedule(100.0, "a");
        q.schedule(200.0, "b");

        assert!(q.drain_due(50.0).is_empty());
        assert_eq!(q.drain_due(200.0), vec!["a", "b"]);
        assert!(!q.is_empty());
        assert_eq!(q.drain_due(1_000.0), vec!["c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_keep_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(10.0, 1);
        q.schedule(10.0, 2);
        q.schedule(10.0, 3);
        assert_eq!(q.drain_due(10.0), vec![1, 2, 3]);
    }
}
