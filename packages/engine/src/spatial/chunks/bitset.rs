use std::sync::atomic::{AtomicU64, Ordering};

// === Word/bit helpers ===

#[inline(always)]
fn word_bit(idx: usize) -> (usize, u64) {
    (idx >> 6, 1u64 << (idx & 63))
}

#[inline]
fn words_for(len: usize) -> usize {
    (len + 63) / 64
}

/// Plain bitset, owned by one thread.
#[derive(Clone, Debug)]
pub struct BitSet {
    words: Vec<u64>,
    len: usize,
}

impl BitSet {
    pub fn new(len: usize) -> Self {
        Self { words: vec![0; words_for(len)], len }
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> bool {
        let (word, mask) = word_bit(idx);
        idx < self.len && (self.words[word] & mask) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, idx: usize) {
        if idx < self.len {
            let (word, mask) = word_bit(idx);
            self.words[word] |= mask;
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Bitset that many band tasks can mark at once.
///
/// Only `fetch_or` happens concurrently; reads and clears go through `&mut`
/// or happen after the phase join, which orders them.
#[derive(Debug)]
pub struct AtomicBitSet {
    words: Vec<AtomicU64>,
    len: usize,
}

impl AtomicBitSet {
    pub fn new(len: usize) -> Self {
        Self {
            words: (0..words_for(len)).map(|_| AtomicU64::new(0)).collect(),
            len,
        }
    }

    #[inline(always)]
    pub fn set(&self, idx: usize) {
        if idx < self.len {
            let (word, mask) = word_bit(idx);
            self.words[word].fetch_or(mask, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub fn get(&self, idx: usize) -> bool {
        let (word, mask) = word_bit(idx);
        idx < self.len && (self.words[word].load(Ordering::Relaxed) & mask) != 0
    }

    pub fn clear(&mut self) {
        for w in self.words.iter_mut() {
            *w.get_mut() = 0;
        }
    }

    pub fn fill(&mut self) {
        let tail = self.len & 63;
        let last = self.words.len().saturating_sub(1);
        for (i, w) in self.words.iter_mut().enumerate() {
            *w.get_mut() = if i == last && tail != 0 { (1u64 << tail) - 1 } else { u64::MAX };
        }
    }

    /// Copy into a plain bitset of the same length.
    pub fn copy_into(&mut self, out: &mut BitSet) {
        debug_assert_eq!(out.len, self.len);
        for (dst, src) in out.words.iter_mut().zip(self.words.iter_mut()) {
            *dst = *src.get_mut();
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(Ordering::Relaxed).count_ones() as usize)
            .sum()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_respects_length() {
        let mut bits = AtomicBitSet::new(70);
        bits.fill();
        assert_eq!(bits.count_ones(), 70);
        assert!(bits.get(69));
        assert!(!bits.get(70));
    }

    #[test]
    fn copy_then_clear_keeps_snapshot() {
        let mut current = AtomicBitSet::new(130);
        current.set(0);
        current.set(64);
        current.set(129);
        current.set(500);

        let mut previous = BitSet::new(130);
        current.copy_into(&mut previous);
        current.clear();

        assert_eq!(previous.count_ones(), 3);
        assert!(previous.get(64));
        assert_eq!(current.count_ones(), 0);
    }
}
