// SessionAnalyzer - summary parameters for a completed trial
//
// Runs once over a whole CoP series instead of a sliding window. The 95%
// prediction ellipse here uses the explicit eigenvalues of the covariance
// matrix; it is a separate quantity from the streaming confidence ellipse.
//
// References:
// - Schubert, P. & Kirchner, M. (2014). Ellipse area calculations and their
//   applicability in posturography

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::features::{names, CopSeries, FeatureMap};
use super::stats::{self, CovarianceMatrix2x2};
use crate::config::FeatureConfig;
use crate::cop::CopPoint;
use crate::error::{log_analysis_error, AnalysisError};

/// Canonical summary of one trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionParameters {
    /// Population standard deviation of x
    pub std_ml: f64,
    /// Population standard deviation of y
    pub std_ap: f64,
    /// Mean |Δx| / Δt over consecutive samples
    pub mean_velocity_ml: f64,
    /// Mean |Δy| / Δt over consecutive samples
    pub mean_velocity_ap: f64,
    /// Euclidean arc length of the trajectory
    pub total_path_length: f64,
    /// 95% prediction ellipse area
    pub pea95_area: f64,
}

impl SessionParameters {
    pub fn to_feature_map(&self) -> FeatureMap {
        let mut map = FeatureMap::new();
        map.insert(names::STD_ML, self.std_ml);
        map.insert(names::STD_AP, self.std_ap);
        map.insert(names::MEAN_VELOCITY_ML, self.mean_velocity_ml);
        map.insert(names::MEAN_VELOCITY_AP, self.mean_velocity_ap);
        map.insert(names::TOTAL_PATH_LENGTH, self.total_path_length);
        map.insert(names::PEA95_AREA, self.pea95_area);
        map
    }
}

/// Stateless batch analyzer; safe to share across threads
#[derive(Debug, Clone, Copy)]
pub struct SessionAnalyzer {
    chi_square_95: f64,
}

impl Default for SessionAnalyzer {
    fn default() -> Self {
        Self::new(&FeatureConfig::default())
    }
}

impl SessionAnalyzer {
    pub fn new(config: &FeatureConfig) -> Self {
        Self {
            chi_square_95: config.chi_square_95,
        }
    }

    /// Compute the summary parameters for a completed trial
    ///
    /// Points with non-finite coordinates are ignored.
    ///
    /// # Returns
    /// * `Ok(SessionParameters)` - Summary over all finite points
    /// * `Err(InvalidInput)` - The series is empty or has no finite point
    pub fn calculate_parameters(
        &self,
        points: &[CopPoint],
    ) -> Result<SessionParameters, AnalysisError> {
        if points.is_empty() {
            let err = AnalysisError::InvalidInput {
                reason: "CoP series is empty".to_string(),
            };
            log_analysis_error(&err, "SessionAnalyzer::calculate_parameters");
            return Err(err);
        }

        let finite: Vec<CopPoint> = points.iter().copied().filter(CopPoint::is_finite).collect();
        if finite.is_empty() {
            let err = AnalysisError::InvalidInput {
                reason: format!("none of the {} CoP points is finite", points.len()),
            };
            log_analysis_error(&err, "SessionAnalyzer::calculate_parameters");
            return Err(err);
        }
        if finite.len() < points.len() {
            log::debug!(
                "[SessionAnalyzer] Ignoring {} non-finite points",
                points.len() - finite.len()
            );
        }

        let series = CopSeries::from_points(&finite);
        let (mean_velocity_ml, mean_velocity_ap) = compute_mean_velocity(&finite);

        Ok(SessionParameters {
            std_ml: stats::population_std(&series.x),
            std_ap: stats::population_std(&series.y),
            mean_velocity_ml,
            mean_velocity_ap,
            total_path_length: series.path_length(),
            pea95_area: self.compute_pea95(&series),
        })
    }

    /// 95% prediction ellipse area from covariance eigenvalues
    ///
    /// Formula: area = π × χ²(0.95, 2) × sqrt(λ1 × λ2)
    ///
    /// Fewer than two points give 0.0.
    pub fn compute_pea95(&self, series: &CopSeries) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }

        let covariance = CovarianceMatrix2x2::from_series(&series.x, &series.y);
        let (major, minor) = covariance.eigenvalues();
        PI * self.chi_square_95 * (major * minor).max(0.0).sqrt()
    }
}

/// Per-axis mean velocity using mean-centred coordinates
///
/// Averages |Δ| / Δt over consecutive pairs. Pairs whose time step is not
/// strictly positive are skipped.
fn compute_mean_velocity(points: &[CopPoint]) -> (f64, f64) {
    if points.len() < 2 {
        return (0.0, 0.0);
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut sum_ml = 0.0;
    let mut sum_ap = 0.0;
    let mut pairs = 0usize;
    for pair in points.windows(2) {
        let dt = pair[1].time - pair[0].time;
        if !dt.is_finite() || dt <= 0.0 {
            continue;
        }
        sum_ml += ((pair[1].x - mean_x) - (pair[0].x - mean_x)).abs() / dt;
        sum_ap += ((pair[1].y - mean_y) - (pair[0].y - mean_y)).abs() / dt;
        pairs += 1;
    }

    if pairs == 0 {
        log::debug!("[SessionAnalyzer] No increasing timestamps; velocity reported as 0");
        return (0.0, 0.0);
    }
    if pairs + 1 < points.len() {
        log::debug!(
            "[SessionAnalyzer] Skipped {} pairs with non-increasing time",
            points.len() - 1 - pairs
        );
    }

    (sum_ml / pairs as f64, sum_ap / pairs as f64)
}
