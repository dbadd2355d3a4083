// Distance module - distance, velocity and range features
//
// Computes the 13 positional statistics of a CoP window. All values are
// taken about the plate origin (not the window mean), except the per-axis
// velocities which use mean-centred deltas.
//
// References:
// - Prieto, T. E. et al. (1996). Measures of postural steadiness
// - Duarte, M. & Freitas, S. M. S. F. (2010). Revision of posturography
//   based on force plate for balance evaluation

use super::types::{CopSeries, DistanceMetrics};
use crate::analysis::stats;

/// Distance feature computation
pub struct DistanceFeatures {
    acquisition_frequency: f64,
}

impl DistanceFeatures {
    /// Create a new distance features processor
    ///
    /// # Arguments
    /// * `acquisition_frequency` - CoP sampling rate in Hz
    pub fn new(acquisition_frequency: f64) -> Self {
        Self {
            acquisition_frequency,
        }
    }

    /// Compute all distance features for a window
    ///
    /// Velocities divide the path length by the window duration N / f.
    /// Windows with fewer than two points have zero path length and velocity.
    pub fn compute(&self, series: &CopSeries) -> DistanceMetrics {
        let total_path_length = series.path_length();

        DistanceMetrics {
            mean_distance: stats::mean(&series.rd),
            mean_distance_ml: stats::mean_abs(&series.x),
            mean_distance_ap: stats::mean_abs(&series.y),
            rms_distance: stats::rms(&series.rd),
            rms_distance_ml: stats::rms(&series.x),
            rms_distance_ap: stats::rms(&series.y),
            total_path_length,
            mean_velocity: self.velocity(total_path_length, series),
            mean_velocity_ml: self.velocity(stats::axis_path_length(&series.x), series),
            mean_velocity_ap: self.velocity(stats::axis_path_length(&series.y), series),
            range: stats::range(&series.rd),
            range_ml: stats::range(&series.x),
            range_ap: stats::range(&series.y),
        }
    }

    fn velocity(&self, path: f64, series: &CopSeries) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }
        path / series.duration(self.acquisition_frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_path() {
        // Unit square traversed once: 4 points, 3 unit edges
        let series = CopSeries::from_axes(&[0.0, 1.0, 1.0, 0.0], &[0.0, 0.0, 1.0, 1.0]);
        let metrics = DistanceFeatures::new(100.0).compute(&series);

        assert!((metrics.total_path_length - 3.0).abs() < 1e-12);
        // Duration = 4 / 100 s
        assert!((metrics.mean_velocity - 75.0).abs() < 1e-9);
        // x moves 0 -> 1 -> 1 -> 0, y moves 0 -> 0 -> 1 -> 1
        assert!((metrics.mean_velocity_ml - 50.0).abs() < 1e-9);
        assert!((metrics.mean_velocity_ap - 25.0).abs() < 1e-9);
        assert!((metrics.range_ml - 1.0).abs() < 1e-12);
        assert!((metrics.range_ap - 1.0).abs() < 1e-12);
        assert!((metrics.range - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((metrics.mean_distance_ml - 0.5).abs() < 1e-12);
        assert!((metrics.rms_distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_coordinates_stay_finite() {
        // x² + y² overflows for these finite positions
        let x = [1.0e154, 1.5e154, 1.0e154, 1.2e154];
        let y = [1.0e154, 1.0e154, 1.5e154, 1.2e154];
        let metrics = DistanceFeatures::new(100.0).compute(&CopSeries::from_axes(&x, &y));

        assert!(metrics.mean_distance.is_finite());
        assert!(metrics.rms_distance.is_finite());
        assert!(metrics.range.is_finite());
        let first = 2.0_f64.sqrt() * 1.0e154;
        assert!(metrics.mean_distance > first);
        assert!(metrics.rms_distance >= metrics.mean_distance);
    }

    #[test]
    fn test_single_point_has_no_velocity() {
        let series = CopSeries::from_axes(&[3.0], &[4.0]);
        let metrics = DistanceFeatures::new(100.0).compute(&series);
        assert_eq!(metrics.total_path_length, 0.0);
        assert_eq!(metrics.mean_velocity, 0.0);
        assert_eq!(metrics.mean_velocity_ml, 0.0);
        assert!((metrics.mean_distance - 5.0).abs() < 1e-12);
        assert_eq!(metrics.range, 0.0);
    }

    #[test]
    fn test_constant_offset_does_not_change_axis_velocity() {
        let base_x = [0.0, 0.5, -0.25, 0.75, 0.1];
        let base_y = [0.0, -0.3, 0.2, 0.4, -0.1];
        let shifted_x: Vec<f64> = base_x.iter().map(|v| v + 20.0).collect();
        let shifted_y: Vec<f64> = base_y.iter().map(|v| v - 7.0).collect();

        let processor = DistanceFeatures::new(50.0);
        let base = processor.compute(&CopSeries::from_axes(&base_x, &base_y));
        let shifted = processor.compute(&CopSeries::from_axes(&shifted_x, &shifted_y));

        assert!((base.mean_velocity_ml - shifted.mean_velocity_ml).abs() < 1e-9);
        assert!((base.mean_velocity_ap - shifted.mean_velocity_ap).abs() < 1e-9);
        assert!((base.total_path_length - shifted.total_path_length).abs() < 1e-9);
    }
}
