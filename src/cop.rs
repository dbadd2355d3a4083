// CoP module - Center of Pressure from four corner pressure sensors
//
// The CoP is the pressure-weighted centroid of the four sensor positions.
// Units follow the plate geometry (centimetres for the reference plate).

use serde::{Deserialize, Serialize};

use crate::config::PlateGeometry;

/// One tick of raw readings from the four corner sensors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureSample {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PressureSample {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn total(&self) -> f64 {
        self.a + self.b + self.c + self.d
    }
}

/// A single Center of Pressure observation
///
/// `x` is the medial-lateral (ML) axis and `y` the anterior-posterior (AP)
/// axis of the plate frame. `time` is in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopPoint {
    pub time: f64,
    pub x: f64,
    pub y: f64,
}

impl CopPoint {
    pub fn new(time: f64, x: f64, y: f64) -> Self {
        Self { time, x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Converts corner pressures into a CoP position for a fixed plate layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CopCalculator {
    geometry: PlateGeometry,
}

impl CopCalculator {
    pub fn new(geometry: PlateGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &PlateGeometry {
        &self.geometry
    }

    /// Compute the CoP for one set of corner pressures
    ///
    /// Formula: x = Σ(p_i × x_i) / Σp_i, y = Σ(p_i × y_i) / Σp_i
    ///
    /// A total load of exactly zero (unloaded plate) yields `(0.0, 0.0)`.
    ///
    /// # Returns
    /// `(x, y)` in plate coordinates
    pub fn compute(&self, sample: &PressureSample) -> (f64, f64) {
        let total = sample.total();
        if total == 0.0 {
            return (0.0, 0.0);
        }

        let g = &self.geometry;
        let x = (sample.a * g.a.x + sample.b * g.b.x + sample.c * g.c.x + sample.d * g.d.x) / total;
        let y = (sample.a * g.a.y + sample.b * g.b.y + sample.c * g.c.y + sample.d * g.d.y) / total;
        (x, y)
    }

    /// Compute the CoP and stamp it with a timestamp
    pub fn compute_point(&self, time: f64, sample: &PressureSample) -> CopPoint {
        let (x, y) = self.compute(sample);
        CopPoint::new(time, x, y)
    }
}
