// Analysis module - streaming and batch CoP stability analysis
//
// This module orchestrates the stability pipeline. Samples are fed one at a
// time by the caller; nothing here spawns threads or blocks.
//
// Architecture:
// - StreamingAnalyzer: owns the sliding window and feature extractor
// - Pipeline: PressureSample → CopCalculator → SlidingWindow → FeatureExtractor
// - SessionAnalyzer: one-shot summary over a completed trial
// - Output: FeatureMap per window trigger, SessionParameters per trial
//
// A StreamingAnalyzer is not internally synchronized. Callers feeding it
// from a sensor thread should hand samples over through `sensor::SensorQueue`.

use serde::{Deserialize, Serialize};

use crate::config::AnalyzerConfig;
use crate::cop::{CopCalculator, CopPoint, PressureSample};
use crate::error::{log_analysis_error, AnalysisError};
use crate::sensor::SensorReading;

pub mod features;
pub mod session;
pub mod stats;
pub mod window;

use features::{CopSeries, FeatureExtractor, FeatureMap, WindowMetrics};
pub use session::{SessionAnalyzer, SessionParameters};
pub use window::{SlidingWindow, WindowInfo};

/// One feature emission together with where it happened in the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFrame {
    /// Samples received when the features were computed
    pub sample_count: u64,
    /// Timestamp of the newest point in the window
    pub end_time: f64,
    pub features: FeatureMap,
}

/// Sliding-window stability analyzer for a live CoP stream
pub struct StreamingAnalyzer {
    config: AnalyzerConfig,
    calculator: CopCalculator,
    window: SlidingWindow,
    extractor: FeatureExtractor,
}

impl StreamingAnalyzer {
    /// Create an analyzer from a validated configuration
    ///
    /// # Returns
    /// * `Err(InvalidConfig)` - If any configuration value is out of range
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        if let Err(err) = config.validate() {
            log_analysis_error(&err, "StreamingAnalyzer::new");
            return Err(err);
        }

        tracing::debug!(
            "[StreamingAnalyzer] window_size={} slide_step={} frequency={}Hz",
            config.window.window_size,
            config.window.slide_step,
            config.features.acquisition_frequency
        );

        Ok(Self {
            calculator: CopCalculator::new(config.plate),
            window: SlidingWindow::new(&config.window),
            extractor: FeatureExtractor::new(&config.features),
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Add one CoP point
    ///
    /// # Returns
    /// The 21 streaming features (fewer if a fractal dimension is undefined)
    /// when the window is full and a slide step has elapsed, otherwise `None`.
    pub fn add_point(&mut self, point: CopPoint) -> Option<FeatureMap> {
        if !self.window.push(point) {
            return None;
        }
        self.compute_window_features()
    }

    /// Add a CoP position stamped with its sample index
    ///
    /// The timestamp is `sample_index / acquisition_frequency`.
    pub fn add_xy(&mut self, x: f64, y: f64) -> Option<FeatureMap> {
        let time = self.window.sample_count() as f64 / self.config.features.acquisition_frequency;
        self.add_point(CopPoint::new(time, x, y))
    }

    /// Convert raw corner pressures to a CoP point and add it
    pub fn add_pressure(&mut self, time: f64, sample: &PressureSample) -> Option<FeatureMap> {
        let point = self.calculator.compute_point(time, sample);
        self.add_point(point)
    }

    /// Add a reading from either sensor entry point
    pub fn add_reading(&mut self, reading: SensorReading) -> Option<FeatureMap> {
        match reading {
            SensorReading::Pressure { time, sample } => self.add_pressure(time, &sample),
            SensorReading::Cop(point) => self.add_point(point),
        }
    }

    /// Like `add_reading`, wrapping any emission in a `FeatureFrame`
    pub fn add_reading_framed(&mut self, reading: SensorReading) -> Option<FeatureFrame> {
        self.add_reading(reading).map(|features| self.frame(features))
    }

    /// Wrap features with the current stream position
    pub fn frame(&self, features: FeatureMap) -> FeatureFrame {
        FeatureFrame {
            sample_count: self.window.sample_count(),
            end_time: self.window.last_time().unwrap_or(0.0),
            features,
        }
    }

    /// Typed metrics for the current window contents, regardless of cadence
    ///
    /// # Returns
    /// `None` if the window holds no finite point
    pub fn current_metrics(&self) -> Option<WindowMetrics> {
        let series = CopSeries::from_points(self.window.points());
        self.extractor.compute(&series)
    }

    fn compute_window_features(&self) -> Option<FeatureMap> {
        let series = CopSeries::from_points(self.window.points());
        if series.dropped > 0 {
            tracing::debug!(
                "[StreamingAnalyzer] {} non-finite points excluded at sample {}",
                series.dropped,
                self.window.sample_count()
            );
        }

        let features = self.extractor.extract(&series);
        if features.is_none() {
            tracing::warn!(
                "[StreamingAnalyzer] Window at sample {} has no finite points, skipping",
                self.window.sample_count()
            );
        }
        features
    }

    /// Start a new trial: clear the window and the sample counter
    pub fn reset(&mut self) {
        self.window.reset();
    }

    pub fn window_info(&self) -> WindowInfo {
        self.window.info()
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }
}
