// SlidingWindow - bounded FIFO of CoP points with emission cadence
//
// The window holds at most `window_size` points; the oldest point is evicted
// when a new one arrives at capacity. Features are due the first time the
// window fills and then every `slide_step` samples.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::WindowConfig;
use crate::cop::CopPoint;

/// Snapshot of window fill state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Points currently held
    pub window_len: usize,
    /// Capacity the window fills up to
    pub target_size: usize,
    /// Samples received since creation or the last reset
    pub sample_count: u64,
    /// Whether the window has reached capacity
    pub is_ready: bool,
}

/// Bounded CoP history driving feature emission
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    points: VecDeque<CopPoint>,
    window_size: usize,
    slide_step: usize,
    sample_count: u64,
}

impl SlidingWindow {
    /// Create an empty window
    ///
    /// # Panics
    /// Panics if `window_size` or `slide_step` is 0. `AnalyzerConfig::validate`
    /// rejects such configurations before a window is built.
    pub fn new(config: &WindowConfig) -> Self {
        assert!(config.window_size > 0, "window_size must be greater than 0");
        assert!(config.slide_step > 0, "slide_step must be greater than 0");

        Self {
            points: VecDeque::with_capacity(config.window_size + 1),
            window_size: config.window_size,
            slide_step: config.slide_step,
            sample_count: 0,
        }
    }

    /// Append a point, evicting the oldest one past capacity
    ///
    /// # Returns
    /// `true` if features are due for the window as it now stands
    pub fn push(&mut self, point: CopPoint) -> bool {
        self.points.push_back(point);
        self.sample_count += 1;

        if self.points.len() > self.window_size {
            self.points.pop_front();
        }

        self.should_compute()
    }

    fn should_compute(&self) -> bool {
        self.points.len() >= self.window_size
            && (self.sample_count % self.slide_step as u64 == 0
                || self.sample_count == self.window_size as u64)
    }

    /// Drop all points and restart the sample counter
    pub fn reset(&mut self) {
        self.points.clear();
        self.sample_count = 0;
    }

    pub fn points(&self) -> &VecDeque<CopPoint> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Timestamp of the newest point
    pub fn last_time(&self) -> Option<f64> {
        self.points.back().map(|p| p.time)
    }

    pub fn info(&self) -> WindowInfo {
        WindowInfo {
            window_len: self.points.len(),
            target_size: self.window_size,
            sample_count: self.sample_count,
            is_ready: self.points.len() >= self.window_size,
        }
    }
}
