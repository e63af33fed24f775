// Sample queue - Interleaved stereo sample buffer
//
// The emulation core pushes one stereo pair per audio callback, in temporal
// order. Samples are stored interleaved (even index = left, odd = right) so
// the queue length is always even. The flusher consumes from the head.
//
// The queue is bounded: when pushing a pair would exceed capacity, the oldest
// pair is dropped from the head. This keeps memory flat when the emulation
// runs ahead of real audio consumption, at the cost of a small audible skip.

use std::collections::VecDeque;

/// Default queue capacity in scalar samples (~0.37 s of stereo at 44.1 kHz)
pub const DEFAULT_QUEUE_CAPACITY: usize = 32_768;

/// Bounded FIFO of interleaved stereo samples
///
/// Invariants: length is always even; left/right values alternate starting
/// with left; consuming from the head preserves the order of the remainder.
pub struct SampleQueue {
    /// Interleaved scalar samples
    samples: VecDeque<f32>,

    /// Maximum number of scalar samples held (always even)
    capacity: usize,

    /// Number of stereo pairs dropped due to overflow
    dropped_pairs: u64,
}

impl SampleQueue {
    /// Create a queue with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a queue bounded to `capacity` scalar samples
    ///
    /// An odd capacity is rounded down to keep whole pairs.
    ///
    /// # Panics
    /// Panics if the capacity cannot hold at least one pair
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity & !1;
        assert!(capacity >= 2, "Queue must hold at least one stereo pair");

        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            dropped_pairs: 0,
        }
    }

    /// Append one stereo pair at the tail
    ///
    /// If the queue is full, the oldest pair is dropped from the head first,
    /// so the queue stays bounded and channel parity is preserved.
    pub fn push(&mut self, left: f32, right: f32) {
        if self.samples.len() + 2 > self.capacity {
            self.samples.pop_front();
            self.samples.pop_front();
            self.dropped_pairs += 1;
        }

        self.samples.push_back(left);
        self.samples.push_back(right);
    }

    /// Number of scalar samples currently queued (always even)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Scalar capacity of the queue
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stereo pairs dropped due to overflow so far
    pub fn dropped_pairs(&self) -> u64 {
        self.dropped_pairs
    }

    /// Remove and return the first `count` scalar samples, in order
    ///
    /// # Panics
    /// Panics if `count` is odd or exceeds the queued length
    pub fn take_front(&mut self, count: usize) -> Vec<f32> {
        assert!(count % 2 == 0, "Must consume whole stereo pairs");
        assert!(
            count <= self.samples.len(),
            "Cannot take {} samples from a queue of {}",
            count,
            self.samples.len()
        );

        self.samples.drain(..count).collect()
    }

    /// Discard all queued samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for SampleQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_starts_empty() {
        let queue = SampleQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.dropped_pairs(), 0);
    }

    #[test]
    fn test_push_keeps_interleaved_order() {
        let mut queue = SampleQueue::new();
        queue.push(0.1, -0.1);
        queue.push(0.2, -0.2);

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.take_front(4), vec![0.1, -0.1, 0.2, -0.2]);
    }

    #[test]
    fn test_length_always_even() {
        let mut queue = SampleQueue::new();
        for i in 0..100 {
            queue.push(i as f32, -(i as f32));
            assert_eq!(queue.len() % 2, 0);
        }
    }

    #[test]
    fn test_take_front_preserves_remainder_order() {
        let mut queue = SampleQueue::new();
        for i in 0..10 {
            queue.push(i as f32, i as f32 + 0.5);
        }

        let taken = queue.take_front(6);
        assert_eq!(taken, vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);

        // Remainder keeps its relative order, starting with a left sample
        let rest = queue.take_front(queue.len());
        assert_eq!(rest[0], 3.0);
        assert_eq!(rest[1], 3.5);
        assert_eq!(*rest.last().unwrap(), 9.5);
    }

    #[test]
    fn test_overflow_drops_oldest_pair() {
        let mut queue = SampleQueue::with_capacity(4);
        queue.push(1.0, 1.5);
        queue.push(2.0, 2.5);
        queue.push(3.0, 3.5);

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.dropped_pairs(), 1);
        assert_eq!(queue.take_front(4), vec![2.0, 2.5, 3.0, 3.5]);
    }

    #[test]
    fn test_overflow_keeps_channel_parity() {
        let mut queue = SampleQueue::with_capacity(6);
        for i in 0..50 {
            queue.push(i as f32, -1.0);
        }

        // Even indices must still be left samples
        let samples = queue.take_front(6);
        assert_eq!(samples[1], -1.0);
        assert_eq!(samples[3], -1.0);
        assert_eq!(samples[5], -1.0);
    }

    #[test]
    fn test_odd_capacity_rounds_down() {
        let queue = SampleQueue::with_capacity(7);
        assert_eq!(queue.capacity(), 6);
    }

    #[test]
    #[should_panic]
    fn test_take_front_rejects_odd_count() {
        let mut queue = SampleQueue::new();
        queue.push(0.0, 0.0);
        queue.take_front(1);
    }

    #[test]
    #[should_panic]
    fn test_take_front_rejects_overdrain() {
        let mut queue = SampleQueue::new();
        queue.push(0.0, 0.0);
        queue.take_front(4);
    }

    #[test]
    fn test_clear() {
        let mut queue = SampleQueue::new();
        queue.push(1.0, 2.0);
        queue.clear();
        assert!(queue.is_empty());
    }
}
