// Stats module - shared numeric helpers for CoP series
//
// Every helper is O(N) over plain slices and returns 0.0 for inputs that are
// too short to define the quantity (empty series, fewer than two points for
// path-based measures).

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean of absolute values
pub fn mean_abs(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64
}

/// Root mean square (about zero, not about the mean)
///
/// Values are scaled by the largest magnitude before squaring, so large
/// finite inputs do not overflow.
pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let scale = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let mean_square = values
        .iter()
        .map(|v| (v / scale) * (v / scale))
        .sum::<f64>()
        / values.len() as f64;
    scale * mean_square.sqrt()
}

/// Population standard deviation (divides by N)
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// max - min, 0.0 for an empty slice
pub fn range(values: &[f64]) -> f64 {
    let mut iter = values.iter().copied();
    let first = match iter.next() {
        Some(v) => v,
        None => return 0.0,
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    max - min
}

/// Euclidean arc length of the (x, y) polyline
pub fn path_length(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| {
            let dx = xs[1] - xs[0];
            let dy = ys[1] - ys[0];
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

/// Sum of absolute consecutive differences along one axis
///
/// The series is mean-centred first. Centring cancels in the differences,
/// so the result equals the raw-delta sum up to rounding.
pub fn axis_path_length(values: &[f64]) -> f64 {
    let m = mean(values);
    values
        .windows(2)
        .map(|pair| ((pair[1] - m) - (pair[0] - m)).abs())
        .sum()
}

/// Population covariance matrix of a 2-D point cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CovarianceMatrix2x2 {
    pub xx: f64,
    pub xy: f64,
    pub yy: f64,
}

impl CovarianceMatrix2x2 {
    /// Build the matrix from paired series (divides by N)
    pub fn from_series(x: &[f64], y: &[f64]) -> Self {
        let n = x.len().min(y.len());
        if n == 0 {
            return Self {
                xx: 0.0,
                xy: 0.0,
                yy: 0.0,
            };
        }

        let x = &x[..n];
        let y = &y[..n];
        let mean_x = mean(x);
        let mean_y = mean(y);

        let mut xx = 0.0;
        let mut xy = 0.0;
        let mut yy = 0.0;
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            xx += dx * dx;
            xy += dx * dy;
            yy += dy * dy;
        }

        let n = n as f64;
        Self {
            xx: xx / n,
            xy: xy / n,
            yy: yy / n,
        }
    }

    pub fn trace(&self) -> f64 {
        self.xx + self.yy
    }

    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.xy
    }

    /// Closed-form eigenvalues of the symmetric 2x2 matrix, largest first
    ///
    /// λ = (trace ± sqrt(trace² - 4·det)) / 2, with the discriminant clamped
    /// at zero to absorb rounding for near-isotropic clouds.
    pub fn eigenvalues(&self) -> (f64, f64) {
        let trace = self.trace();
        let discriminant = (trace * trace - 4.0 * self.determinant()).max(0.0).sqrt();
        ((trace + discriminant) / 2.0, (trace - discriminant) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_basic_moments() {
        let values = [1.0, -2.0, 3.0, -4.0];
        assert!((mean(&values) - (-0.5)).abs() < EPS);
        assert!((mean_abs(&values) - 2.5).abs() < EPS);
        assert!((rms(&values) - 7.5_f64.sqrt()).abs() < EPS);
        assert!((range(&values) - 7.0).abs() < EPS);
    }

    #[test]
    fn test_rms_large_magnitudes() {
        // Squares of these overflow f64
        let values = [3.0e200, -4.0e200];
        let expected = 12.5_f64.sqrt() * 1.0e200;
        assert!(((rms(&values) - expected) / expected).abs() < 1e-12);
        assert_eq!(rms(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_population_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std(&values) - 2.0).abs() < EPS);
        assert_eq!(population_std(&[3.0; 5]), 0.0);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean_abs(&[]), 0.0);
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(population_std(&[]), 0.0);
        assert_eq!(range(&[]), 0.0);
        assert_eq!(path_length(&[], &[]), 0.0);
        assert_eq!(axis_path_length(&[]), 0.0);
    }

    #[test]
    fn test_path_length_needs_two_points() {
        assert_eq!(path_length(&[3.0], &[4.0]), 0.0);
        assert!((path_length(&[0.0, 3.0], &[0.0, 4.0]) - 5.0).abs() < EPS);
        assert!((path_length(&[0.0, 3.0, 3.0], &[0.0, 4.0, 0.0]) - 9.0).abs() < EPS);
    }

    #[test]
    fn test_axis_path_length_matches_raw_deltas() {
        let values = [10.0, 12.0, 11.0, 15.0];
        assert!((axis_path_length(&values) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_covariance_matrix() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let cov = CovarianceMatrix2x2::from_series(&x, &y);
        assert!((cov.xx - 1.25).abs() < EPS);
        assert!((cov.xy - 2.5).abs() < EPS);
        assert!((cov.yy - 5.0).abs() < EPS);
        // Perfectly correlated: singular matrix
        assert!(cov.determinant().abs() < 1e-9);
    }

    #[test]
    fn test_eigenvalues_diagonal() {
        let cov = CovarianceMatrix2x2 {
            xx: 4.0,
            xy: 0.0,
            yy: 1.0,
        };
        let (l1, l2) = cov.eigenvalues();
        assert!((l1 - 4.0).abs() < EPS);
        assert!((l2 - 1.0).abs() < EPS);
    }

    #[test]
    fn test_eigenvalues_isotropic_clamp() {
        let cov = CovarianceMatrix2x2 {
            xx: 0.1,
            xy: 0.0,
            yy: 0.1,
        };
        let (l1, l2) = cov.eigenvalues();
        assert!(l1.is_finite() && l2.is_finite());
        assert!((l1 - 0.1).abs() < 1e-9);
        assert!((l2 - 0.1).abs() < 1e-9);
    }
}
