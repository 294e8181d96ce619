use std::collections::VecDeque;

/// Fixed-capacity moving average over raw RSSI readings.
///
/// When full, the oldest reading is dropped before the new one is
/// appended. The mean is taken over the readings actually held, so a
/// freshly cleared window follows the first reading exactly instead of
/// being dragged toward zero by padding.
#[derive(Debug, Clone)]
pub struct RollingAverage {
    capacity: usize,
    samples: VecDeque<f64>,
}

impl RollingAverage {
    /// Create an empty window. A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a reading, evicting the oldest if full, and return the new mean
    pub fn push(&mut self, value: f64) -> f64 {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
        self.mean().unwrap_or(value)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            None
        } else {
            Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
