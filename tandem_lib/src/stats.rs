//! Running statistics over the most recent values of a stream.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A bounded window over the latest values of a number stream.
///
/// Pushing past the capacity evicts the oldest value, so the window always
/// describes the most recent `capacity` values (or fewer, while filling up).
pub struct RollingStats {
    window: VecDeque<f64>,
    capacity: usize,
}

impl RollingStats {
    /// Creates an empty window holding at most `capacity` values.
    ///
    /// `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be non-zero");
        RollingStats {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds `value` to the window, evicting the oldest value when full.
    pub fn push(&mut self, value: f64) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(value);
    }

    /// Summarizes the current window, oldest value first.
    ///
    /// Returns `None` while the window is empty.
    pub fn summary(&self) -> Option<WindowSummary> {
        if self.window.is_empty() {
            return None;
        }
        let values: Vec<f64> = self.window.iter().copied().collect();
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let average = values.iter().sum::<f64>() / values.len() as f64;
        Some(WindowSummary {
            max,
            min,
            average,
            values,
        })
    }

    /// Returns the number of values currently in the window.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` while no value has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

/// A snapshot of the statistics of one window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    /// Largest value in the window.
    pub max: f64,
    /// Smallest value in the window.
    pub min: f64,
    /// Arithmetic mean of the window.
    pub average: f64,
    /// The windowed values, oldest first.
    pub values: Vec<f64>,
}
