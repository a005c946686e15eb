//! The blocking queue coupling producer and consumer threads.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

struct State<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// A thread-safe FIFO queue with an explicit open/closed lifecycle.
///
/// Producers `push` values and call `close` when no more values will arrive.
/// Consumers `pop` values, treating `None` as the end of the stream: `pop`
/// only returns `None` once the queue is closed *and* drained, so no value is
/// ever lost. Closing is a one-way transition; a closed queue rejects further
/// pushes but keeps handing out whatever it still holds, in insertion order.
///
/// All operations take `&self`, so a queue shared behind an `Arc` can be used
/// from any number of threads.
pub struct BlockingQueue<T> {
    state: Mutex<State<T>>,
    changed: Condvar,
}

impl<T> BlockingQueue<T> {
    /// Creates an empty, open queue.
    pub fn new() -> Self {
        BlockingQueue {
            state: Mutex::new(State {
                items: VecDeque::new(),
                closed: false,
            }),
            changed: Condvar::new(),
        }
    }

    /// Appends `item` to the tail of the queue and wakes every waiting
    /// consumer.
    ///
    /// Returns `true` on success. After `close` the queue rejects new items:
    /// `item` is dropped and `false` is returned.
    pub fn push(&self, item: T) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return false;
        }
        state.items.push_back(item);
        self.changed.notify_all();
        true
    }

    /// Removes and returns the head of the queue without blocking.
    ///
    /// Returns `None` when the queue is currently empty, whether or not it
    /// has been closed.
    pub fn try_pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        state.items.pop_front()
    }

    /// Removes and returns the head of the queue, waiting for one to arrive
    /// if necessary.
    ///
    /// Returns `None` only once the queue is closed and drained; that `None`
    /// is the end-of-stream signal and every later call returns it again.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        while state.items.is_empty() && !state.closed {
            state = self.changed.wait(state).unwrap();
        }
        state.items.pop_front()
    }

    /// Like [`pop`](Self::pop), but gives up after `timeout`.
    ///
    /// Returns `None` on timeout as well as at end of stream; the queue state
    /// is untouched by a timeout, so the caller can simply retry.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let state = self.state.lock().unwrap();
        let (mut state, _) = self
            .changed
            .wait_timeout_while(state, timeout, |state| {
                state.items.is_empty() && !state.closed
            })
            .unwrap();
        state.items.pop_front()
    }

    /// Closes the queue: all later pushes fail and, once the remaining items
    /// are drained, `pop` returns `None` forever.
    ///
    /// Wakes every thread blocked in [`pop`](Self::pop) so each can re-check
    /// the queue; a single wake could strand the other waiters. Calling
    /// `close` again has no further effect.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.changed.notify_all();
    }

    /// Returns the number of items currently queued.
    ///
    /// Advisory only: the count can be stale by the time it is read, since
    /// other threads keep pushing and popping.
    pub fn len(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.items.len()
    }

    /// Returns `true` when the queue currently holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_push_pop_fifo_order() {
        let queue = BlockingQueue::<f64>::new();
        for value in [1.0, 0.0, 152.0, -1.25, 3.14] {
            assert!(queue.push(value));
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.try_pop(), Some(1.0));
        assert_eq!(queue.try_pop(), Some(0.0));
        assert_eq!(queue.try_pop(), Some(152.0));
        assert_eq!(queue.try_pop(), Some(-1.25));
        assert_eq!(queue.try_pop(), Some(3.14));
        assert_eq!(queue.try_pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_try_pop_empty_open() {
        let queue = BlockingQueue::<f64>::new();
        assert_eq!(queue.try_pop(), None);
        assert!(queue.push(3.14));
        assert_eq!(queue.try_pop(), Some(3.14));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_pop_waits_for_push() {
        let queue = Arc::new(BlockingQueue::<f64>::new());
        let handle = {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(100));
                assert!(queue.push(3.14));
            })
        };
        assert_eq!(queue.pop(), Some(3.14));
        handle.join().unwrap();
    }

    #[test]
    fn test_pop_wakes_on_close() {
        let queue = Arc::new(BlockingQueue::<f64>::new());
        let handle = {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(100));
                queue.close();
            })
        };
        assert_eq!(queue.pop(), None);
        handle.join().unwrap();
    }

    #[test]
    fn test_close_broadcasts_to_all_waiters() {
        let queue = Arc::new(BlockingQueue::<f64>::new());
        let mut handles = Vec::new();
        for _ in 0..3 {
            let queue = queue.clone();
            handles.push(thread::spawn(move || queue.pop()));
        }
        thread::sleep(Duration::from_millis(100));
        queue.close();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), None);
        }
    }

    #[test]
    fn test_push_after_close_is_rejected() {
        let queue = BlockingQueue::<f64>::new();
        assert!(queue.push(1.0));
        queue.close();
        assert!(!queue.push(2.0));
        assert!(!queue.push(3.0));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_close_is_idempotent() {
        let queue = BlockingQueue::<f64>::new();
        assert!(queue.push(1.0));
        queue.close();
        queue.close();
        queue.close();
        assert!(!queue.push(2.0));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(1.0));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_close_drains_before_end_of_stream() {
        let queue = BlockingQueue::<f64>::new();
        assert!(queue.push(1.0));
        assert!(queue.push(-1.25));
        assert!(queue.push(0.0));
        queue.close();
        // remaining items come out FIFO through either pop flavor
        assert_eq!(queue.pop(), Some(1.0));
        assert_eq!(queue.try_pop(), Some(-1.25));
        assert_eq!(queue.pop(), Some(0.0));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_pop_timeout_expires_on_empty_open_queue() {
        let queue = BlockingQueue::<f64>::new();
        assert_eq!(queue.pop_timeout(Duration::from_millis(50)), None);
        // a timeout changes nothing: the queue is still open and usable
        assert!(queue.push(3.14));
        assert_eq!(queue.pop_timeout(Duration::from_millis(50)), Some(3.14));
    }

    #[test]
    fn test_pop_timeout_woken_by_push() {
        let queue = Arc::new(BlockingQueue::<f64>::new());
        let handle = {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(100));
                assert!(queue.push(152.0));
            })
        };
        assert_eq!(queue.pop_timeout(Duration::from_secs(10)), Some(152.0));
        handle.join().unwrap();
    }

    #[test]
    fn test_values_cross_threads_in_order() {
        let queue = Arc::new(BlockingQueue::<f64>::new());
        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    assert!(queue.push(f64::from(i)));
                }
                queue.close();
            })
        };
        let mut received = Vec::new();
        while let Some(value) = queue.pop() {
            received.push(value);
        }
        producer.join().unwrap();
        let expected: Vec<f64> = (0..100).map(f64::from).collect();
        assert_eq!(received, expected);
    }
}
