//! Trial recordings stored as JSON, and offline replay.
//!
//! A recording holds either CoP coordinates (`"COP_x"`/`"COP_y"`, optionally
//! with a `"time"` array) or raw corner pressures (`"pressure"` rows of
//! `[A, B, C, D]`). Replay pushes the samples through a `StreamingAnalyzer`
//! exactly as a live sensor would.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::{FeatureFrame, StreamingAnalyzer};
use crate::config::AnalyzerConfig;
use crate::cop::{CopCalculator, CopPoint, PressureSample};
use crate::sensor::SensorReading;

/// Default location for recorded trial JSON assets.
pub const DEFAULT_RECORDING_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

/// One recorded balance trial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialRecording {
    #[serde(rename = "COP_x", default)]
    pub cop_x: Vec<f64>,
    #[serde(rename = "COP_y", default)]
    pub cop_y: Vec<f64>,
    /// Sample timestamps in seconds; index / frequency when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Vec<f64>>,
    /// Raw corner pressures, used when no CoP arrays are present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Vec<[f64; 4]>>,
}

impl TrialRecording {
    /// Load and check a recording from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading recording {}", path.display()))?;
        let recording: TrialRecording = serde_json::from_str(&contents)
            .with_context(|| format!("parsing recording {}", path.display()))?;
        recording
            .check()
            .with_context(|| format!("invalid recording {}", path.display()))?;

        tracing::debug!(
            "[Recording] Loaded {} samples from {}",
            recording.len(),
            path.display()
        );
        Ok(recording)
    }

    /// Build a recording from CoP points
    pub fn from_points(points: &[CopPoint]) -> Self {
        Self {
            cop_x: points.iter().map(|p| p.x).collect(),
            cop_y: points.iter().map(|p| p.y).collect(),
            time: Some(points.iter().map(|p| p.time).collect()),
            pressure: None,
        }
    }

    /// Number of samples in the recording
    pub fn len(&self) -> usize {
        if self.cop_x.is_empty() {
            self.pressure.as_ref().map_or(0, Vec::len)
        } else {
            self.cop_x.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn uses_pressure(&self) -> bool {
        self.cop_x.is_empty() && self.cop_y.is_empty() && self.pressure.is_some()
    }

    /// Verify array lengths agree and the recording is not empty
    pub fn check(&self) -> Result<()> {
        if self.cop_x.len() != self.cop_y.len() {
            bail!(
                "COP_x has {} samples but COP_y has {}",
                self.cop_x.len(),
                self.cop_y.len()
            );
        }
        if !self.cop_x.is_empty() && self.pressure.is_some() {
            bail!("recording has both COP arrays and pressure rows");
        }
        if self.is_empty() {
            bail!("recording has no samples");
        }
        if let Some(time) = &self.time {
            if time.len() != self.len() {
                bail!(
                    "time has {} entries but the recording has {} samples",
                    time.len(),
                    self.len()
                );
            }
        }
        Ok(())
    }

    fn timestamp(&self, index: usize, acquisition_frequency: f64) -> f64 {
        match &self.time {
            Some(time) => time[index],
            None => index as f64 / acquisition_frequency,
        }
    }

    /// Sensor readings in recording order
    pub fn to_readings(&self, config: &AnalyzerConfig) -> Result<Vec<SensorReading>> {
        self.check()?;
        let frequency = config.features.acquisition_frequency;

        let readings = if self.uses_pressure() {
            self.pressure
                .iter()
                .flatten()
                .enumerate()
                .map(|(i, &[a, b, c, d])| SensorReading::Pressure {
                    time: self.timestamp(i, frequency),
                    sample: PressureSample::new(a, b, c, d),
                })
                .collect()
        } else {
            self.cop_x
                .iter()
                .zip(&self.cop_y)
                .enumerate()
                .map(|(i, (&x, &y))| {
                    SensorReading::Cop(CopPoint::new(self.timestamp(i, frequency), x, y))
                })
                .collect()
        };
        Ok(readings)
    }

    /// CoP points for the whole trial; pressure rows go through the plate geometry
    pub fn to_points(&self, config: &AnalyzerConfig) -> Result<Vec<CopPoint>> {
        let calculator = CopCalculator::new(config.plate);
        let points = self
            .to_readings(config)?
            .into_iter()
            .map(|reading| match reading {
                SensorReading::Pressure { time, sample } => calculator.compute_point(time, &sample),
                SensorReading::Cop(point) => point,
            })
            .collect();
        Ok(points)
    }

    /// Feed the recording through a streaming analyzer
    ///
    /// The analyzer is not reset first, so a trial can continue an earlier one.
    ///
    /// # Returns
    /// Every frame emitted during the replay, oldest first
    pub fn replay(&self, analyzer: &mut StreamingAnalyzer) -> Result<Vec<FeatureFrame>> {
        let readings = self.to_readings(analyzer.config())?;
        let frames: Vec<FeatureFrame> = readings
            .into_iter()
            .filter_map(|reading| analyzer.add_reading_framed(reading))
            .collect();

        tracing::info!(
            "[Recording] Replayed {} samples, {} frames emitted",
            self.len(),
            frames.len()
        );
        Ok(frames)
    }
}
