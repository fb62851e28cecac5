//! Row identifier generation.
//!
//! Ids are a counter pushed through the splitmix64 finalizer. The finalizer
//! is a bijection on `u64`, so a generator never hands out the same id twice
//! until the counter wraps, while consecutive ids still look random. The
//! counter's starting point comes from OS entropy so separate processes do
//! not walk the same sequence.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator seeded from the thread-local CSPRNG.
    pub fn new() -> Self {
        Self::from_counter(rand::random())
    }

    /// Create a generator whose counter starts at `start`. Two generators
    /// built from the same start yield the same sequence.
    pub fn from_counter(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }

    /// Next identifier. Safe to call from many tasks at once.
    pub fn next_id(&self) -> u64 {
        mix(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn ids_do_not_repeat() {
        let ids = IdGenerator::from_counter(0);
        let seen: HashSet<u64> = (0..100_000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 100_000);
    }

    #[test]
    fn same_start_gives_same_sequence() {
        let a = IdGenerator::from_counter(42);
        let b = IdGenerator::from_counter(42);
        for _ in 0..16 {
            assert_eq!(a.next_id(), b.next_id());
        }
    }

    #[test]
    fn ids_are_not_sequential() {
        let ids = IdGenerator::from_counter(1);
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(second, first.wrapping_add(1));
    }

    #[test]
    fn wraps_without_repeating_neighbours() {
        let ids = IdGenerator::from_counter(u64::MAX);
        let last = ids.next_id();
        let wrapped = ids.next_id();
        assert_ne!(last, wrapped);
    }

    #[test]
    fn concurrent_callers_get_distinct_ids() {
        let ids = Arc::new(IdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || (0..5_000).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 40_000);
    }
}
