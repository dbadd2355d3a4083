// Hybrid module - frequency, sway-area and fractal-dimension features
//
// These combine distance and area features. The mean frequencies are the
// ratio of sway speed to sway amplitude, not a spectral estimate.
//
// References:
// - Hufschmidt, A. et al. (1980). Some methods and parameters of body sway
//   quantification and their neurological applications
// - Prieto, T. E. et al. (1996). Measures of postural steadiness

use std::f64::consts::{PI, SQRT_2};

use super::types::{names, AreaMetrics, CopSeries, DistanceMetrics, HybridMetrics};
use crate::error::AnalysisError;

/// Hybrid feature computation
pub struct HybridFeatures {
    acquisition_frequency: f64,
}

impl HybridFeatures {
    /// Create a new hybrid features processor
    ///
    /// # Arguments
    /// * `acquisition_frequency` - CoP sampling rate in Hz
    pub fn new(acquisition_frequency: f64) -> Self {
        Self {
            acquisition_frequency,
        }
    }

    /// Compute all hybrid features for a window
    pub fn compute(
        &self,
        series: &CopSeries,
        distance: &DistanceMetrics,
        area: &AreaMetrics,
    ) -> HybridMetrics {
        let n = series.len();
        let path = distance.total_path_length;

        HybridMetrics {
            mean_frequency: ratio(distance.mean_velocity, 2.0 * PI * distance.mean_distance),
            mean_frequency_ml: ratio(
                distance.mean_velocity_ml,
                4.0 * SQRT_2 * distance.mean_distance_ml,
            ),
            mean_frequency_ap: ratio(
                distance.mean_velocity_ap,
                4.0 * SQRT_2 * distance.mean_distance_ap,
            ),
            sway_area: self.compute_sway_area(series),
            fractal_dimension_cc: compute_fractal_dimension(
                names::FRACTAL_DIMENSION_CC,
                n,
                path,
                area.circle_diameter(),
            ),
            fractal_dimension_ce: compute_fractal_dimension(
                names::FRACTAL_DIMENSION_CE,
                n,
                path,
                area.ellipse_diameter(),
            ),
        }
    }

    /// Area swept by the CoP per unit time
    ///
    /// Formula: Σ |x[i+1]·y[i] - x[i]·y[i+1]| / (2T), T = N / f
    pub fn compute_sway_area(&self, series: &CopSeries) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }

        let duration = series.duration(self.acquisition_frequency);
        let swept: f64 = series
            .x
            .windows(2)
            .zip(series.y.windows(2))
            .map(|(x, y)| (x[1] * y[0] - x[0] * y[1]).abs())
            .sum();
        swept / (2.0 * duration)
    }
}

/// Speed-to-amplitude ratio; no amplitude means no sway frequency
fn ratio(velocity: f64, amplitude: f64) -> f64 {
    if amplitude == 0.0 {
        0.0
    } else {
        velocity / amplitude
    }
}

/// Fractal dimension of the CoP path
///
/// Formula: FD = ln(N) / ln(N × d / path)
///
/// # Arguments
/// * `feature` - Feature name used in the error report
/// * `n` - Number of samples
/// * `path` - Total path length
/// * `diameter` - Diameter of the confidence region
///
/// # Returns
/// * `Err(NumericalDegeneracy)` - zero path, non-positive log argument, or a
///   non-finite result (log argument of exactly 1)
pub fn compute_fractal_dimension(
    feature: &str,
    n: usize,
    path: f64,
    diameter: f64,
) -> Result<f64, AnalysisError> {
    let degenerate = |reason: String| AnalysisError::NumericalDegeneracy {
        feature: feature.to_string(),
        reason,
    };

    if path.is_nan() || path <= 0.0 {
        return Err(degenerate(format!("total path length is {}", path)));
    }

    let argument = n as f64 * diameter / path;
    if !argument.is_finite() || argument <= 0.0 {
        return Err(degenerate(format!("log argument N*d/path is {}", argument)));
    }

    let dimension = (n as f64).ln() / argument.ln();
    if !dimension.is_finite() {
        return Err(degenerate(format!("ln(N)/ln({}) is not finite", argument)));
    }

    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalysisErrorCodes, ErrorCode};

    #[test]
    fn test_fractal_dimension_value() {
        // N = 100, d = 2, path = 20: ln(100) / ln(10) = 2
        let fd = compute_fractal_dimension(names::FRACTAL_DIMENSION_CC, 100, 20.0, 2.0).unwrap();
        assert!((fd - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fractal_dimension_zero_path() {
        let err = compute_fractal_dimension(names::FRACTAL_DIMENSION_CC, 100, 0.0, 2.0)
            .unwrap_err();
        assert_eq!(err.code(), AnalysisErrorCodes::NUMERICAL_DEGENERACY);
        assert!(err.message().contains(names::FRACTAL_DIMENSION_CC));
    }

    #[test]
    fn test_fractal_dimension_non_positive_argument() {
        assert!(compute_fractal_dimension(names::FRACTAL_DIMENSION_CE, 100, 5.0, 0.0).is_err());
        assert!(compute_fractal_dimension(names::FRACTAL_DIMENSION_CE, 100, 5.0, -1.0).is_err());
    }

    #[test]
    fn test_fractal_dimension_unit_argument() {
        // N*d/path == 1 makes the denominator ln(1) = 0
        assert!(compute_fractal_dimension(names::FRACTAL_DIMENSION_CC, 10, 20.0, 2.0).is_err());
    }

    #[test]
    fn test_sway_area_of_rotation() {
        // Quarter turns on the unit circle sweep |sin(90°)| = 1 per step
        let series = CopSeries::from_axes(&[1.0, 0.0, -1.0, 0.0], &[0.0, 1.0, 0.0, -1.0]);
        let sway = HybridFeatures::new(100.0).compute_sway_area(&series);
        // 3 steps / (2 × 0.04 s)
        assert!((sway - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_amplitude_gives_zero_frequency() {
        assert_eq!(ratio(0.0, 0.0), 0.0);
        assert_eq!(ratio(3.0, 0.0), 0.0);
        assert!((ratio(3.0, 1.5) - 2.0).abs() < 1e-12);
    }
}
