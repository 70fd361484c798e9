use std::fmt;
use std::fmt::{Display, Formatter};
use bincode::{Decode, Encode};
use ordered_float::OrderedFloat;
use serde::{Serialize, Deserialize};

/// Represents a single topological feature as a (birth, death, dimension) triple.
///
/// # Description
///
/// A feature of homology dimension 0 is a connected component, dimension 1 a loop,
/// dimension 2 a void. The feature appears at filtration radius `birth` and
/// disappears at radius `death`. Essential features must be clamped to the maximum
/// filtration radius upstream before ingestion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PersistenceInterval {
    pub birth: f64,
    pub death: f64,
    pub dimension: usize,
}

impl PersistenceInterval {
    /// Constructs a new `PersistenceInterval`, rejecting malformed triples.
    ///
    /// # Arguments
    ///
    /// * `birth` - Filtration radius at which the feature appears, finite and non-negative.
    /// * `death` - Filtration radius at which the feature disappears, finite and >= birth.
    /// * `dimension` - Homology dimension of the feature.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tdacore::data::diagram::PersistenceInterval;
    /// let interval = PersistenceInterval::new(0.5, 2.0, 1).unwrap();
    /// assert_eq!(interval.lifetime(), 1.5);
    /// assert!(PersistenceInterval::new(2.0, 0.5, 1).is_err());
    /// ```
    pub fn new(birth: f64, death: f64, dimension: usize) -> Result<PersistenceInterval, String> {
        if !birth.is_finite() || birth < 0.0 {
            return Err(format!("malformed interval: birth must be finite and non-negative, got {}", birth));
        }
        if !death.is_finite() || death < birth {
            return Err(format!("malformed interval: death must be finite and >= birth, got birth {} death {}", birth, death));
        }
        Ok(PersistenceInterval { birth, death, dimension })
    }

    /// Lifetime of the feature, death - birth.
    pub fn lifetime(&self) -> f64 {
        self.death - self.birth
    }
}

/// Represents a persistence diagram: the multiset of topological features of one molecule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PersistenceDiagram {
    pub intervals: Vec<PersistenceInterval>,
}

impl PersistenceDiagram {
    pub fn new(intervals: Vec<PersistenceInterval>) -> Self {
        PersistenceDiagram { intervals }
    }

    /// Constructs a diagram from raw (birth, death, dimension) triples,
    /// rejecting the batch if any triple is malformed.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tdacore::data::diagram::PersistenceDiagram;
    /// let diagram = PersistenceDiagram::from_triples(&[(0.0, 1.0, 0), (0.0, 3.0, 1), (1.0, 2.0, 1)]).unwrap();
    /// assert_eq!(diagram.count_features(1), 2);
    /// ```
    pub fn from_triples(triples: &[(f64, f64, usize)]) -> Result<PersistenceDiagram, String> {
        let intervals: Result<Vec<PersistenceInterval>, String> = triples
            .iter()
            .map(|&(birth, death, dimension)| PersistenceInterval::new(birth, death, dimension))
            .collect();
        Ok(PersistenceDiagram::new(intervals?))
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Largest homology dimension carried by the diagram, None for an empty diagram.
    pub fn max_dimension(&self) -> Option<usize> {
        self.intervals.iter().map(|interval| interval.dimension).max()
    }

    /// Lifetimes of all features of the given homology dimension, in diagram order.
    pub fn lifetimes(&self, dimension: usize) -> Vec<f64> {
        self.intervals
            .iter()
            .filter(|interval| interval.dimension == dimension)
            .map(|interval| interval.lifetime())
            .collect()
    }

    /// Number of features of the given homology dimension, 0 if the dimension is absent.
    pub fn count_features(&self, dimension: usize) -> usize {
        self.intervals
            .iter()
            .filter(|interval| interval.dimension == dimension)
            .count()
    }

    /// Largest lifetime among features of the given dimension, 0.0 if the dimension is absent.
    pub fn max_lifetime(&self, dimension: usize) -> f64 {
        self.lifetimes(dimension)
            .into_iter()
            .map(OrderedFloat)
            .max()
            .map(|lifetime| lifetime.into_inner())
            .unwrap_or(0.0)
    }

    /// Number of features of the given dimension whose lifetime exceeds
    /// `theta` times the largest lifetime in that dimension.
    ///
    /// The threshold is relative to the single largest lifetime in the diagram,
    /// so one outlier feature shifts the threshold for the whole diagram.
    ///
    /// # Arguments
    ///
    /// * `dimension` - Homology dimension to count in.
    /// * `theta` - Relative threshold, must lie in (0, 1].
    pub fn count_relevant_features(&self, dimension: usize, theta: f64) -> Result<usize, String> {
        if !(theta > 0.0 && theta <= 1.0) {
            return Err(format!("theta must lie in (0, 1], got {}", theta));
        }
        let threshold = theta * self.max_lifetime(dimension);
        Ok(self
            .lifetimes(dimension)
            .into_iter()
            .filter(|&lifetime| lifetime > threshold)
            .count())
    }

    /// Arithmetic mean lifetime of features of the given dimension.
    ///
    /// Returns NaN when the dimension is absent, so that missing topology stays
    /// detectable downstream instead of collapsing to 0.
    pub fn average_lifetime(&self, dimension: usize) -> f64 {
        let lifetimes = self.lifetimes(dimension);
        if lifetimes.is_empty() {
            return f64::NAN;
        }
        lifetimes.iter().sum::<f64>() / lifetimes.len() as f64
    }
}

impl Display for PersistenceDiagram {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PersistenceDiagram(features: {}, max dimension: {:?})",
            self.intervals.len(),
            self.max_dimension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_diagram() -> PersistenceDiagram {
        PersistenceDiagram::from_triples(&[(0.0, 1.0, 0), (0.0, 3.0, 1), (1.0, 2.0, 1)]).unwrap()
    }

    #[test]
    fn test_malformed_intervals_rejected() {
        assert!(PersistenceInterval::new(-1.0, 1.0, 0).is_err());
        assert!(PersistenceInterval::new(2.0, 1.0, 0).is_err());
        assert!(PersistenceInterval::new(f64::NAN, 1.0, 0).is_err());
        assert!(PersistenceInterval::new(0.0, f64::INFINITY, 0).is_err());
        assert!(PersistenceDiagram::from_triples(&[(0.0, 1.0, 0), (3.0, 1.0, 1)]).is_err());
    }

    #[test]
    fn test_zero_lifetime_interval_is_valid() {
        let interval = PersistenceInterval::new(1.0, 1.0, 0).unwrap();
        assert_eq!(interval.lifetime(), 0.0);
    }

    #[test]
    fn test_count_and_average_lifetime() {
        let diagram = example_diagram();
        assert_eq!(diagram.count_features(1), 2);
        assert_eq!(diagram.average_lifetime(1), 2.0);
        assert_eq!(diagram.count_features(0), 1);
        assert_eq!(diagram.average_lifetime(0), 1.0);
    }

    #[test]
    fn test_absent_dimension_is_soft() {
        let diagram = example_diagram();
        assert_eq!(diagram.count_features(2), 0);
        assert!(diagram.average_lifetime(2).is_nan());
        assert_eq!(diagram.max_lifetime(2), 0.0);
        assert_eq!(diagram.count_relevant_features(2, 0.5).unwrap(), 0);
    }

    #[test]
    fn test_empty_diagram() {
        let diagram = PersistenceDiagram::default();
        assert_eq!(diagram.count_features(0), 0);
        assert!(diagram.average_lifetime(0).is_nan());
        assert_eq!(diagram.max_dimension(), None);
    }

    #[test]
    fn test_relevant_features_threshold() {
        let diagram = example_diagram();
        // max lifetime in dimension 1 is 3.0, threshold 1.5, only the (0, 3) loop survives
        assert_eq!(diagram.count_relevant_features(1, 0.5).unwrap(), 1);
        // theta = 1.0 keeps nothing, the threshold equals the maximum and comparison is strict
        assert_eq!(diagram.count_relevant_features(1, 1.0).unwrap(), 0);
    }

    #[test]
    fn test_relevant_features_bounded_by_count() {
        let diagram = example_diagram();
        for dimension in 0..3 {
            for theta in [0.1, 0.5, 0.9, 1.0] {
                let relevant = diagram.count_relevant_features(dimension, theta).unwrap();
                assert!(relevant <= diagram.count_features(dimension));
            }
        }
    }

    #[test]
    fn test_relevant_features_monotone_in_theta() {
        let diagram = PersistenceDiagram::from_triples(&[
            (0.0, 4.0, 1),
            (0.0, 2.5, 1),
            (1.0, 2.0, 1),
            (0.5, 1.0, 1),
        ])
        .unwrap();
        let mut previous = usize::MAX;
        for theta in [0.1, 0.3, 0.5, 0.7, 0.9, 1.0] {
            let relevant = diagram.count_relevant_features(1, theta).unwrap();
            assert!(relevant <= previous);
            previous = relevant;
        }
    }

    #[test]
    fn test_theta_domain_validated() {
        let diagram = example_diagram();
        assert!(diagram.count_relevant_features(1, 0.0).is_err());
        assert!(diagram.count_relevant_features(1, -0.5).is_err());
        assert!(diagram.count_relevant_features(1, 1.5).is_err());
        assert!(diagram.count_relevant_features(1, f64::NAN).is_err());
    }
}
