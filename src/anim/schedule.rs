//! Timer queue owned by a sequence.
//!
//! Timers live in the sequence's own state instead of the host's timer
//! facility, so cancelling a sequence is just clearing its queue and a test
//! can drive it with any clock.

use super::ms;

#[derive(Debug, Clone)]
struct Timer<K> {
    /// Scheduling order, breaks ties between equal due times.
    seq: u64,
    due: f32,
    key: K,
}

#[derive(Debug, Clone)]
pub struct Schedule<K> {
    pending: Vec<Timer<K>>,
    next_seq: u64,
}

impl<K> Default for Schedule<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: Clone + PartialEq> Schedule<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to fire `delay_ms` after `base`.
    pub fn after(&mut self, base: f32, delay_ms: u64, key: K) {
        self.pending.push(Timer {
            seq: self.next_seq,
            due: base + ms(delay_ms),
            key,
        });
        self.next_seq += 1;
    }

    pub fn cancel_key(&mut self, key: &K) {
        self.pending.retain(|t| &t.key != key);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the earliest timer due at or before `now`, with
    /// its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: f32) -> Option<(f32, K)> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))?;
        let timer = self.pending.remove(index);
        Some((timer.due, timer.key))
    }
}
