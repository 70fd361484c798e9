use std::collections::BTreeMap;
use rayon::prelude::*;
use crate::data::diagram::PersistenceDiagram;
use crate::data::table::MoleculeFeatureMap;

/// Counts features of the given homology dimension in each diagram of a batch.
///
/// A diagram without that dimension contributes 0, never an error.
pub fn count_features(diagrams: &[PersistenceDiagram], dimension: usize) -> Vec<usize> {
    diagrams
        .iter()
        .map(|diagram| diagram.count_features(dimension))
        .collect()
}

/// Counts long-lived features per diagram: those whose lifetime exceeds
/// `theta` times the largest lifetime of that dimension in the same diagram.
///
/// # Arguments
///
/// * `diagrams` - One diagram per molecule.
/// * `dimension` - Homology dimension to count in.
/// * `theta` - Relative threshold, required, must lie in (0, 1].
pub fn count_relevant_features(
    diagrams: &[PersistenceDiagram],
    dimension: usize,
    theta: f64,
) -> Result<Vec<usize>, String> {
    diagrams
        .iter()
        .map(|diagram| diagram.count_relevant_features(dimension, theta))
        .collect()
}

/// Mean lifetime of features of the given dimension per diagram, NaN where the
/// dimension is absent.
pub fn average_lifetime(diagrams: &[PersistenceDiagram], dimension: usize) -> Vec<f64> {
    diagrams
        .iter()
        .map(|diagram| diagram.average_lifetime(dimension))
        .collect()
}

/// Turns a molecule-keyed batch of diagrams into a feature map with, per
/// homology dimension `d`, the columns `n_holes_dim{d}`, `n_relevant_holes_dim{d}`
/// and `avg_lifetime_dim{d}`.
///
/// Molecules are independent, so the batch is processed in parallel; the output
/// map is insensitive to processing order.
pub fn extract_diagram_features(
    diagrams: &BTreeMap<String, PersistenceDiagram>,
    dimensions: &[usize],
    theta: f64,
) -> Result<MoleculeFeatureMap, String> {
    if !(theta > 0.0 && theta <= 1.0) {
        return Err(format!("theta must lie in (0, 1], got {}", theta));
    }
    let records: Vec<(String, BTreeMap<String, f64>)> = diagrams
        .par_iter()
        .map(|(molecule_id, diagram)| {
            let mut record = BTreeMap::new();
            for &dimension in dimensions {
                record.insert(
                    format!("n_holes_dim{}", dimension),
                    diagram.count_features(dimension) as f64,
                );
                // theta already validated, the per-diagram check cannot fail here
                let relevant = diagram
                    .count_relevant_features(dimension, theta)
                    .unwrap_or(0);
                record.insert(format!("n_relevant_holes_dim{}", dimension), relevant as f64);
                record.insert(
                    format!("avg_lifetime_dim{}", dimension),
                    diagram.average_lifetime(dimension),
                );
            }
            (molecule_id.clone(), record)
        })
        .collect();

    let mut map = MoleculeFeatureMap::new();
    for (molecule_id, record) in records {
        map.features.insert(molecule_id, record);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<PersistenceDiagram> {
        vec![
            PersistenceDiagram::from_triples(&[(0.0, 1.0, 0), (0.0, 3.0, 1), (1.0, 2.0, 1)]).unwrap(),
            PersistenceDiagram::from_triples(&[(0.0, 2.0, 0)]).unwrap(),
            PersistenceDiagram::default(),
        ]
    }

    #[test]
    fn test_count_features_batch() {
        assert_eq!(count_features(&batch(), 1), vec![2, 0, 0]);
        assert_eq!(count_features(&batch(), 0), vec![1, 1, 0]);
    }

    #[test]
    fn test_count_relevant_features_batch() {
        // first diagram: max lifetime 3.0 in dimension 1, threshold 1.5, one survivor
        assert_eq!(count_relevant_features(&batch(), 1, 0.5).unwrap(), vec![1, 0, 0]);
        assert!(count_relevant_features(&batch(), 1, 0.0).is_err());
    }

    #[test]
    fn test_average_lifetime_batch() {
        let averages = average_lifetime(&batch(), 1);
        assert_eq!(averages[0], 2.0);
        assert!(averages[1].is_nan());
        assert!(averages[2].is_nan());
    }

    #[test]
    fn test_extract_is_pure() {
        let diagrams = batch();
        assert_eq!(count_features(&diagrams, 1), count_features(&diagrams, 1));
        let first = average_lifetime(&diagrams, 0);
        let second = average_lifetime(&diagrams, 0);
        assert_eq!(first[0], second[0]);
        assert_eq!(first[1], second[1]);
        assert!(first[2].is_nan() && second[2].is_nan());
    }

    #[test]
    fn test_extract_diagram_features_map() {
        let mut diagrams = BTreeMap::new();
        diagrams.insert(
            "mol_a".to_string(),
            PersistenceDiagram::from_triples(&[(0.0, 1.0, 0), (0.0, 3.0, 1), (1.0, 2.0, 1)]).unwrap(),
        );
        diagrams.insert("mol_b".to_string(), PersistenceDiagram::default());

        let map = extract_diagram_features(&diagrams, &[0, 1], 0.5).unwrap();
        assert_eq!(map.get("mol_a", "n_holes_dim1"), Some(2.0));
        assert_eq!(map.get("mol_a", "n_relevant_holes_dim1"), Some(1.0));
        assert_eq!(map.get("mol_a", "avg_lifetime_dim1"), Some(2.0));
        assert_eq!(map.get("mol_b", "n_holes_dim0"), Some(0.0));
        assert!(map.get("mol_b", "avg_lifetime_dim0").unwrap().is_nan());
        assert_eq!(
            map.feature_names(),
            vec![
                "avg_lifetime_dim0".to_string(),
                "avg_lifetime_dim1".to_string(),
                "n_holes_dim0".to_string(),
                "n_holes_dim1".to_string(),
                "n_relevant_holes_dim0".to_string(),
                "n_relevant_holes_dim1".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_diagram_features_theta_validated() {
        let diagrams = BTreeMap::new();
        assert!(extract_diagram_features(&diagrams, &[0], 1.5).is_err());
    }
}
