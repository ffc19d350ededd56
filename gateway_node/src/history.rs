//! Bounded, newest-first record of the last accepted measurements, for the
//! status log (and whatever UI eventually sits on top of it).

use std::collections::VecDeque;
use std::time::Instant;

pub const MAX_ENTRIES: usize = 4;

#[derive(Debug, Clone)]
pub struct Measurement {
    pub sender_id: u8,
    pub value: String,
    pub status: String,
    pub received_at: Instant,
}

#[derive(Debug)]
pub struct History {
    entries: VecDeque<Measurement>,
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, m: Measurement) {
        self.entries.push_front(m);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&Measurement> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(value: &str) -> Measurement {
        Measurement {
            sender_id: 1,
            value: value.into(),
            status: "-".into(),
            received_at: Instant::now(),
        }
    }

    #[test]
    fn newest_first_and_bounded() {
        let mut h = History::new();
        for v in ["1.0", "2.0", "3.0", "4.0", "5.0"] {
            h.push(m(v));
        }
        assert_eq!(h.len(), MAX_ENTRIES);
        assert_eq!(h.latest().unwrap().value, "5.0");
        let values: Vec<_> = h.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["5.0", "4.0", "3.0", "2.0"]);
    }
}
