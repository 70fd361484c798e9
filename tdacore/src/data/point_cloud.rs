use std::fmt;
use std::fmt::{Display, Formatter};
use bincode::{Decode, Encode};
use nalgebra::DMatrix;
use serde::{Serialize, Deserialize};

/// Distance semantics handed to the external filtration library.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Euclidean,
    Precomputed,
}

impl Metric {
    /// The flag value the external topology library expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Precomputed => "precomputed",
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for the external Vietoris-Rips computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct FiltrationConfig {
    pub homology_dimensions: Vec<usize>,
    pub metric: Metric,
}

impl FiltrationConfig {
    pub fn new(homology_dimensions: Vec<usize>, metric: Metric) -> Result<FiltrationConfig, String> {
        if homology_dimensions.is_empty() {
            return Err("at least one homology dimension is required".to_string());
        }
        Ok(FiltrationConfig { homology_dimensions, metric })
    }
}

/// Atom coordinates of one molecule, the point-cloud input of the filtration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PointCloud {
    pub points: Vec<[f64; 3]>,
}

impl PointCloud {
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        PointCloud { points }
    }

    /// Constructs a point cloud from separate coordinate columns.
    pub fn from_xyz(x: &[f64], y: &[f64], z: &[f64]) -> Result<PointCloud, String> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(format!(
                "coordinate columns differ in length: {} x, {} y, {} z",
                x.len(),
                y.len(),
                z.len()
            ));
        }
        let points = x
            .iter()
            .zip(y.iter())
            .zip(z.iter())
            .map(|((&x, &y), &z)| [x, y, z])
            .collect();
        Ok(PointCloud { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Centroid of the cloud, [0, 0, 0] for an empty cloud.
    pub fn centroid(&self) -> [f64; 3] {
        if self.points.is_empty() {
            return [0.0; 3];
        }
        let n = self.points.len() as f64;
        let mut centroid = [0.0; 3];
        for point in &self.points {
            for axis in 0..3 {
                centroid[axis] += point[axis];
            }
        }
        for axis in 0..3 {
            centroid[axis] /= n;
        }
        centroid
    }

    /// Returns a copy of the cloud translated so its centroid is the origin.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tdacore::data::point_cloud::PointCloud;
    /// let cloud = PointCloud::new(vec![[0.0, 0.0, 0.0], [2.0, 4.0, 6.0]]);
    /// let centered = cloud.mean_center();
    /// assert_eq!(centered.centroid(), [0.0, 0.0, 0.0]);
    /// ```
    pub fn mean_center(&self) -> PointCloud {
        let centroid = self.centroid();
        let points = self
            .points
            .iter()
            .map(|point| [point[0] - centroid[0], point[1] - centroid[1], point[2] - centroid[2]])
            .collect();
        PointCloud { points }
    }

    /// Pairwise Euclidean distance matrix, the precomputed-metric input of the filtration.
    pub fn distance_matrix(&self) -> DMatrix<f64> {
        let n = self.points.len();
        DMatrix::from_fn(n, n, |i, j| {
            let a = self.points[i];
            let b = self.points[j];
            ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
        })
    }
}

impl Display for PointCloud {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PointCloud(atoms: {})", self.points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xyz_length_check() {
        assert!(PointCloud::from_xyz(&[0.0, 1.0], &[0.0], &[0.0, 1.0]).is_err());
    }

    #[test]
    fn test_mean_center() {
        let cloud = PointCloud::new(vec![[1.0, 2.0, 3.0], [3.0, 2.0, 1.0], [2.0, 2.0, 2.0]]);
        let centered = cloud.mean_center();
        let centroid = centered.centroid();
        for axis in 0..3 {
            assert!(centroid[axis].abs() < 1e-12);
        }
    }

    #[test]
    fn test_distance_matrix() {
        let cloud = PointCloud::new(vec![[0.0, 0.0, 0.0], [3.0, 4.0, 0.0]]);
        let distances = cloud.distance_matrix();
        assert_eq!(distances[(0, 0)], 0.0);
        assert_eq!(distances[(1, 1)], 0.0);
        assert_eq!(distances[(0, 1)], 5.0);
        assert_eq!(distances[(1, 0)], 5.0);
    }

    #[test]
    fn test_metric_flags() {
        assert_eq!(Metric::Euclidean.as_str(), "euclidean");
        assert_eq!(Metric::Precomputed.as_str(), "precomputed");
        assert!(FiltrationConfig::new(vec![], Metric::Euclidean).is_err());
    }
}
