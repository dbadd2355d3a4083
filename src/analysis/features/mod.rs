// FeatureExtractor - CoP stability features for one window
//
// This module turns a window of CoP points into the 21 streaming stability
// features. Later feature sets reuse the outputs of earlier ones.
//
// Module organization:
// - types: Data structures (FeatureMap, CopSeries, *Metrics, feature names)
// - distance: Distance, velocity and range statistics (13 features)
// - area: Confidence circle and ellipse areas (2 features)
// - hybrid: Mean frequencies, sway area, fractal dimensions (6 features)
// - mod.rs: Coordinator (FeatureExtractor)
//
// Pipeline: CopSeries → DistanceFeatures → AreaFeatures → HybridFeatures

pub mod area;
pub mod distance;
pub mod hybrid;
mod types;

pub use types::{
    names, AreaMetrics, CopSeries, DistanceMetrics, FeatureMap, HybridMetrics, WindowMetrics,
};

use crate::config::FeatureConfig;
use area::AreaFeatures;
use distance::DistanceFeatures;
use hybrid::HybridFeatures;

/// FeatureExtractor coordinates the three feature sets
pub struct FeatureExtractor {
    distance_features: DistanceFeatures,
    area_features: AreaFeatures,
    hybrid_features: HybridFeatures,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor from the statistical constants
    pub fn new(config: &FeatureConfig) -> Self {
        Self {
            distance_features: DistanceFeatures::new(config.acquisition_frequency),
            area_features: AreaFeatures::new(config.z05, config.f05),
            hybrid_features: HybridFeatures::new(config.acquisition_frequency),
        }
    }

    /// Compute the typed metrics for a window
    ///
    /// # Returns
    /// `None` when the series has no points
    pub fn compute(&self, series: &CopSeries) -> Option<WindowMetrics> {
        if series.is_empty() {
            return None;
        }

        let distance = self.distance_features.compute(series);
        let area = self.area_features.compute(series, &distance);
        let hybrid = self.hybrid_features.compute(series, &distance, &area);

        Some(WindowMetrics {
            distance,
            area,
            hybrid,
        })
    }

    /// Compute the named feature map for a window
    ///
    /// Fractal dimensions that are undefined for this window are left out,
    /// so the map holds at most 21 entries.
    pub fn extract(&self, series: &CopSeries) -> Option<FeatureMap> {
        self.compute(series).map(|metrics| metrics.to_feature_map())
    }
}
