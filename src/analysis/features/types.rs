// Types module - data structures for CoP stability features
//
// FeatureMap is the string-keyed output handed to display collaborators.
// The typed *Metrics structs carry the same values for Rust callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::stats;
use crate::cop::CopPoint;
use crate::error::AnalysisError;

/// Stable feature names. Consumers match on these strings verbatim.
pub mod names {
    pub const MEAN_DISTANCE: &str = "Mean distance";
    pub const MEAN_DISTANCE_ML: &str = "Mean distance-ML";
    pub const MEAN_DISTANCE_AP: &str = "Mean distance-AP";
    pub const RMS_DISTANCE: &str = "Rms distance";
    pub const RMS_DISTANCE_ML: &str = "Rms distance-ML";
    pub const RMS_DISTANCE_AP: &str = "Rms distance-AP";
    pub const TOTAL_PATH_LENGTH: &str = "Total path length";
    pub const MEAN_VELOCITY: &str = "Mean velocity";
    pub const MEAN_VELOCITY_ML: &str = "Mean velocity-ML";
    pub const MEAN_VELOCITY_AP: &str = "Mean velocity-AP";
    pub const RANGE: &str = "Range";
    pub const RANGE_ML: &str = "Range-ML";
    pub const RANGE_AP: &str = "Range-AP";

    pub const CONFIDENCE_CIRCLE_AREA: &str = "95% confidence circle area";
    pub const CONFIDENCE_ELLIPSE_AREA: &str = "95% confidence ellipse area";

    pub const MEAN_FREQUENCY: &str = "Mean frequency";
    pub const MEAN_FREQUENCY_ML: &str = "Mean frequency-ML";
    pub const MEAN_FREQUENCY_AP: &str = "Mean frequency-AP";
    pub const SWAY_AREA: &str = "Sway area";
    pub const FRACTAL_DIMENSION_CC: &str = "Fractal dimension-CC";
    pub const FRACTAL_DIMENSION_CE: &str = "Fractal dimension-CE";

    pub const STD_ML: &str = "Standard deviation-ML";
    pub const STD_AP: &str = "Standard deviation-AP";
    pub const PEA95_AREA: &str = "95% prediction ellipse area";

    /// All 21 streaming feature names, grouped by feature set
    ///
    /// `FeatureMap` is keyed by a `BTreeMap`, so iteration and serialized
    /// output are in alphabetical order, not in this order.
    pub const STREAMING: [&str; 21] = [
        MEAN_DISTANCE,
        MEAN_DISTANCE_ML,
        MEAN_DISTANCE_AP,
        RMS_DISTANCE,
        RMS_DISTANCE_ML,
        RMS_DISTANCE_AP,
        TOTAL_PATH_LENGTH,
        MEAN_VELOCITY,
        MEAN_VELOCITY_ML,
        MEAN_VELOCITY_AP,
        RANGE,
        RANGE_ML,
        RANGE_AP,
        CONFIDENCE_CIRCLE_AREA,
        CONFIDENCE_ELLIPSE_AREA,
        MEAN_FREQUENCY,
        MEAN_FREQUENCY_ML,
        MEAN_FREQUENCY_AP,
        SWAY_AREA,
        FRACTAL_DIMENSION_CC,
        FRACTAL_DIMENSION_CE,
    ];
}

/// Named feature values produced by one computation
///
/// Never holds a non-finite value: `insert` drops NaN/infinite entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(BTreeMap<String, f64>);

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning false if it was rejected as non-finite
    pub fn insert(&mut self, name: &str, value: f64) -> bool {
        if !value.is_finite() {
            log::debug!("[FeatureMap] Dropping non-finite '{}' = {}", name, value);
            return false;
        }
        self.0.insert(name.to_string(), value);
        true
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Finite CoP coordinates of one window or session, as flat arrays
///
/// `rd` is the radial distance sqrt(x² + y²) of each point, computed
/// without intermediate overflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub rd: Vec<f64>,
    /// Number of input points dropped for non-finite coordinates
    pub dropped: usize,
}

impl CopSeries {
    /// Collect finite coordinates from CoP points, skipping the rest
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a CopPoint>,
    {
        let mut series = Self::default();
        for point in points {
            if point.is_finite() {
                series.push(point.x, point.y);
            } else {
                series.dropped += 1;
            }
        }
        if series.dropped > 0 {
            log::debug!(
                "[CopSeries] Dropped {} non-finite points, {} remain",
                series.dropped,
                series.len()
            );
        }
        series
    }

    /// Build from separate axis arrays; extra entries on the longer axis are ignored
    pub fn from_axes(x: &[f64], y: &[f64]) -> Self {
        let points: Vec<CopPoint> = x
            .iter()
            .zip(y)
            .enumerate()
            .map(|(i, (&x, &y))| CopPoint::new(i as f64, x, y))
            .collect();
        Self::from_points(&points)
    }

    fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
        self.rd.push(x.hypot(y));
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Window duration N / f in seconds
    pub fn duration(&self, acquisition_frequency: f64) -> f64 {
        self.len() as f64 / acquisition_frequency
    }

    /// Euclidean path length of the series
    pub fn path_length(&self) -> f64 {
        stats::path_length(&self.x, &self.y)
    }
}

/// The 13 distance, velocity and range statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistanceMetrics {
    pub mean_distance: f64,
    pub mean_distance_ml: f64,
    pub mean_distance_ap: f64,
    pub rms_distance: f64,
    pub rms_distance_ml: f64,
    pub rms_distance_ap: f64,
    pub total_path_length: f64,
    pub mean_velocity: f64,
    pub mean_velocity_ml: f64,
    pub mean_velocity_ap: f64,
    pub range: f64,
    pub range_ml: f64,
    pub range_ap: f64,
}

impl DistanceMetrics {
    pub fn write_to(&self, map: &mut FeatureMap) {
        map.insert(names::MEAN_DISTANCE, self.mean_distance);
        map.insert(names::MEAN_DISTANCE_ML, self.mean_distance_ml);
        map.insert(names::MEAN_DISTANCE_AP, self.mean_distance_ap);
        map.insert(names::RMS_DISTANCE, self.rms_distance);
        map.insert(names::RMS_DISTANCE_ML, self.rms_distance_ml);
        map.insert(names::RMS_DISTANCE_AP, self.rms_distance_ap);
        map.insert(names::TOTAL_PATH_LENGTH, self.total_path_length);
        map.insert(names::MEAN_VELOCITY, self.mean_velocity);
        map.insert(names::MEAN_VELOCITY_ML, self.mean_velocity_ml);
        map.insert(names::MEAN_VELOCITY_AP, self.mean_velocity_ap);
        map.insert(names::RANGE, self.range);
        map.insert(names::RANGE_ML, self.range_ml);
        map.insert(names::RANGE_AP, self.range_ap);
    }
}

/// Confidence circle and ellipse areas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaMetrics {
    /// Spread of the radial distance, sqrt(rms² - mean²)
    pub std_rd: f64,
    pub confidence_circle_area: f64,
    pub confidence_ellipse_area: f64,
}

impl AreaMetrics {
    /// Diameter term of the confidence circle, 2 × (mean + z05 × std_rd)
    ///
    /// The circle area is π × d², so d = sqrt(area / π).
    pub fn circle_diameter(&self) -> f64 {
        (self.confidence_circle_area / std::f64::consts::PI).sqrt()
    }

    /// Equivalent diameter of the confidence ellipse under the same mapping
    pub fn ellipse_diameter(&self) -> f64 {
        (self.confidence_ellipse_area / std::f64::consts::PI).sqrt()
    }

    pub fn write_to(&self, map: &mut FeatureMap) {
        map.insert(names::CONFIDENCE_CIRCLE_AREA, self.confidence_circle_area);
        map.insert(names::CONFIDENCE_ELLIPSE_AREA, self.confidence_ellipse_area);
    }
}

/// Frequency, sway-area and fractal-dimension estimates
#[derive(Debug, Clone, PartialEq)]
pub struct HybridMetrics {
    pub mean_frequency: f64,
    pub mean_frequency_ml: f64,
    pub mean_frequency_ap: f64,
    pub sway_area: f64,
    pub fractal_dimension_cc: Result<f64, AnalysisError>,
    pub fractal_dimension_ce: Result<f64, AnalysisError>,
}

impl HybridMetrics {
    /// Write the hybrid features; undefined fractal dimensions are omitted
    pub fn write_to(&self, map: &mut FeatureMap) {
        map.insert(names::MEAN_FREQUENCY, self.mean_frequency);
        map.insert(names::MEAN_FREQUENCY_ML, self.mean_frequency_ml);
        map.insert(names::MEAN_FREQUENCY_AP, self.mean_frequency_ap);
        map.insert(names::SWAY_AREA, self.sway_area);

        let fractals = [
            (names::FRACTAL_DIMENSION_CC, &self.fractal_dimension_cc),
            (names::FRACTAL_DIMENSION_CE, &self.fractal_dimension_ce),
        ];
        for (name, value) in fractals {
            match value {
                Ok(v) => {
                    map.insert(name, *v);
                }
                Err(err) => log::debug!("[HybridMetrics] Omitting {}: {}", name, err),
            }
        }
    }
}

/// All three feature sets for one window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowMetrics {
    pub distance: DistanceMetrics,
    pub area: AreaMetrics,
    pub hybrid: HybridMetrics,
}

impl WindowMetrics {
    pub fn to_feature_map(&self) -> FeatureMap {
        let mut map = FeatureMap::new();
        self.distance.write_to(&mut map);
        self.area.write_to(&mut map);
        self.hybrid.write_to(&mut map);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_map_rejects_non_finite() {
        let mut map = FeatureMap::new();
        assert!(map.insert(names::MEAN_DISTANCE, 1.5));
        assert!(!map.insert(names::RANGE, f64::NAN));
        assert!(!map.insert(names::RANGE_ML, f64::INFINITY));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(names::MEAN_DISTANCE), Some(1.5));
        assert!(!map.contains(names::RANGE));
    }

    #[test]
    fn test_feature_map_serializes_as_object() {
        let mut map = FeatureMap::new();
        map.insert(names::SWAY_AREA, 2.0);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Sway area":2.0}"#);
    }

    #[test]
    fn test_streaming_names_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in names::STREAMING {
            assert!(seen.insert(name), "duplicate feature name {}", name);
        }
        assert_eq!(seen.len(), 21);
    }

    #[test]
    fn test_series_drops_non_finite_points() {
        let points = [
            CopPoint::new(0.0, 3.0, 4.0),
            CopPoint::new(0.01, f64::NAN, 1.0),
            CopPoint::new(0.02, 0.0, f64::NEG_INFINITY),
            CopPoint::new(0.03, 1.0, 0.0),
        ];
        let series = CopSeries::from_points(&points);
        assert_eq!(series.len(), 2);
        assert_eq!(series.dropped, 2);
        assert_eq!(series.rd, vec![5.0, 1.0]);
    }

    #[test]
    fn test_series_radial_distance_does_not_overflow() {
        let series = CopSeries::from_axes(&[3.0e200, 1.0e160], &[4.0e200, 1.0e160]);
        assert!(((series.rd[0] - 5.0e200) / 5.0e200).abs() < 1e-15);
        assert!(series.rd[1].is_finite());
    }

    #[test]
    fn test_feature_map_iterates_alphabetically() {
        let mut map = FeatureMap::new();
        for name in names::STREAMING {
            map.insert(name, 1.0);
        }
        let keys: Vec<&str> = map.iter().map(|(name, _)| name).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys.first(), Some(&names::CONFIDENCE_CIRCLE_AREA));
    }

    #[test]
    fn test_series_from_axes_and_duration() {
        let series = CopSeries::from_axes(&[0.0, 1.0, 2.0, 9.0], &[0.0, 0.0, 0.0]);
        assert_eq!(series.len(), 3);
        assert!((series.duration(100.0) - 0.03).abs() < 1e-12);
        assert!((series.path_length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_circle_diameter_inverts_area() {
        let area = AreaMetrics {
            std_rd: 0.0,
            confidence_circle_area: std::f64::consts::PI * 9.0,
            confidence_ellipse_area: std::f64::consts::PI * 4.0,
        };
        assert!((area.circle_diameter() - 3.0).abs() < 1e-12);
        assert!((area.ellipse_diameter() - 2.0).abs() < 1e-12);
    }
}
