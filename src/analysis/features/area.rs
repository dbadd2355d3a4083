// Area module - confidence circle and confidence ellipse areas
//
// The circle is built from the radial-distance spread. The ellipse uses the
// closed-form expression of Schubert & Kirchner, which avoids an explicit
// eigen-decomposition. The batch prediction ellipse (session.rs) uses the
// eigenvalue form instead; the two are kept separate and are not expected
// to agree numerically.
//
// References:
// - Schubert, P. & Kirchner, M. (2014). Ellipse area calculations and their
//   applicability in posturography

use std::f64::consts::PI;

use super::types::{AreaMetrics, CopSeries, DistanceMetrics};
use crate::analysis::stats::CovarianceMatrix2x2;

/// Area feature computation
pub struct AreaFeatures {
    z05: f64,
    f05: f64,
}

impl AreaFeatures {
    /// Create a new area features processor
    ///
    /// # Arguments
    /// * `z05` - One-sided 95% z-score (1.645)
    /// * `f05` - F statistic for the 95% ellipse (3.0)
    pub fn new(z05: f64, f05: f64) -> Self {
        Self { z05, f05 }
    }

    /// Compute both areas from the window and its distance features
    pub fn compute(&self, series: &CopSeries, distance: &DistanceMetrics) -> AreaMetrics {
        let std_rd = self.compute_std_rd(distance);
        let covariance = CovarianceMatrix2x2::from_series(&series.x, &series.y);

        AreaMetrics {
            std_rd,
            confidence_circle_area: self.compute_circle_area(distance.mean_distance, std_rd),
            confidence_ellipse_area: self.compute_ellipse_area(
                distance.rms_distance_ml,
                distance.rms_distance_ap,
                covariance.xy,
            ),
        }
    }

    /// Spread of the radial distance
    ///
    /// Formula: std_rd = sqrt(rms_rd² - mean_rd²)
    ///
    /// The argument is clamped at zero: for a motionless window it can cancel
    /// to a tiny negative value instead of exactly zero.
    pub fn compute_std_rd(&self, distance: &DistanceMetrics) -> f64 {
        let rms = distance.rms_distance;
        let mean = distance.mean_distance;
        (rms * rms - mean * mean).max(0.0).sqrt()
    }

    /// 95% confidence circle area
    ///
    /// Formula: area = π × (2 × (mean_rd + z05 × std_rd))²
    pub fn compute_circle_area(&self, mean_distance: f64, std_rd: f64) -> f64 {
        let diameter = 2.0 * (mean_distance + self.z05 * std_rd);
        PI * diameter * diameter
    }

    /// 95% confidence ellipse area
    ///
    /// Formula: area = π × F05 × sqrt(s_ml⁴ + s_ap⁴ + 6·s_ml²·s_ap² - 4·cov² - (s_ml² + s_ap²))
    ///
    /// `std_ml` and `std_ap` are the per-axis RMS distances. A discriminant
    /// that rounds below zero is clamped, so the area is never NaN.
    pub fn compute_ellipse_area(&self, std_ml: f64, std_ap: f64, covariance: f64) -> f64 {
        let ml2 = std_ml * std_ml;
        let ap2 = std_ap * std_ap;
        let discriminant =
            ml2 * ml2 + ap2 * ap2 + 6.0 * ml2 * ap2 - 4.0 * covariance * covariance - (ml2 + ap2);
        PI * self.f05 * discriminant.max(0.0).sqrt()
    }
}
