use std::fmt;
use std::fmt::{Display, Formatter};
use itertools::Itertools;
use serde::{Serialize, Deserialize};
use crate::data::table::{AtomPairTable, MoleculeFeatureMap};

/// Behavior when an atom-pair row references a molecule the feature map does not know.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum MissingPolicy {
    /// Fill the row with NaN, left-join semantics.
    InsertNan,
    /// Abort the attach naming the offending molecule.
    Fail,
}

impl Default for MissingPolicy {
    fn default() -> Self {
        MissingPolicy::InsertNan
    }
}

impl Display for MissingPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MissingPolicy::InsertNan => write!(f, "InsertNan"),
            MissingPolicy::Fail => write!(f, "Fail"),
        }
    }
}

/// Broadcasts molecule-level features onto the atom-pair table in place.
///
/// # Description
///
/// For every feature name in the map a column `<name><suffix>` is added to the
/// table, populated by looking up each row's molecule id. The suffix exists so
/// the same feature set can be attached from two sources (point-cloud-derived
/// and graph-derived) without column collisions. All target column names are
/// checked before any column is added, a failed attach leaves the table
/// untouched.
///
/// # Arguments
///
/// * `table` - Atom-pair table to mutate.
/// * `features` - Molecule-keyed feature map to broadcast.
/// * `suffix` - Appended to every feature name, may be empty.
/// * `policy` - Handling of rows whose molecule id is absent from the map.
pub fn attach(
    table: &mut AtomPairTable,
    features: &MoleculeFeatureMap,
    suffix: &str,
    policy: MissingPolicy,
) -> Result<(), String> {
    let names = features.feature_names();
    let column_names: Vec<String> = names
        .iter()
        .map(|name| format!("{}{}", name, suffix))
        .collect();

    if let Some(duplicate) = column_names.iter().duplicates().next() {
        return Err(format!("suffix {:?} maps two features onto column {}", suffix, duplicate));
    }
    if let Some(collision) = column_names.iter().find(|name| table.has_column(name)) {
        return Err(format!("column {} already exists, use a distinct suffix", collision));
    }

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(names.len());
    for name in &names {
        let mut values = Vec::with_capacity(table.len());
        for molecule_id in &table.molecule_ids {
            match features.molecule(molecule_id) {
                Some(record) => values.push(record.get(name).copied().unwrap_or(f64::NAN)),
                None => match policy {
                    MissingPolicy::InsertNan => values.push(f64::NAN),
                    MissingPolicy::Fail => {
                        return Err(format!("molecule {} is missing from the feature map", molecule_id));
                    }
                },
            }
        }
        columns.push(values);
    }

    for (column_name, values) in column_names.iter().zip(columns) {
        table.add_column(column_name, values)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_table() -> AtomPairTable {
        let mut table = AtomPairTable::new(
            vec!["mol_a".to_string(), "mol_a".to_string(), "mol_b".to_string()],
            vec![0, 0, 1],
            vec![1, 2, 2],
        )
        .unwrap();
        table.add_column("distance", vec![1.0, 2.0, 3.0]).unwrap();
        table
    }

    fn example_features() -> MoleculeFeatureMap {
        let mut features = MoleculeFeatureMap::new();
        features.insert("mol_a", "n_holes_dim0", 5.0);
        features.insert("mol_a", "avg_lifetime_dim1", 0.12);
        features.insert("mol_b", "n_holes_dim0", 2.0);
        features.insert("mol_b", "avg_lifetime_dim1", 0.5);
        features
    }

    #[test]
    fn test_attach_broadcasts_by_molecule() {
        let mut table = example_table();
        attach(&mut table, &example_features(), "", MissingPolicy::InsertNan).unwrap();
        assert_eq!(table.column("n_holes_dim0"), Some(&vec![5.0, 5.0, 2.0]));
        assert_eq!(table.column("avg_lifetime_dim1"), Some(&vec![0.12, 0.12, 0.5]));
        // original column untouched
        assert_eq!(table.column("distance"), Some(&vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_attach_twice_with_distinct_suffixes() {
        let mut table = example_table();
        attach(&mut table, &example_features(), "_pc", MissingPolicy::InsertNan).unwrap();
        attach(&mut table, &example_features(), "_graph", MissingPolicy::InsertNan).unwrap();
        assert!(table.has_column("n_holes_dim0_pc"));
        assert!(table.has_column("n_holes_dim0_graph"));
        assert_eq!(table.column_names().len(), 5);

        // same suffix again collides and leaves the table unchanged
        let before = table.clone();
        assert!(attach(&mut table, &example_features(), "_pc", MissingPolicy::InsertNan).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_missing_molecule_nan_policy() {
        let mut table = example_table();
        let mut features = MoleculeFeatureMap::new();
        features.insert("mol_a", "n_holes_dim0", 5.0);
        attach(&mut table, &features, "", MissingPolicy::InsertNan).unwrap();
        let column = table.column("n_holes_dim0").unwrap();
        assert_eq!(column[0], 5.0);
        assert_eq!(column[1], 5.0);
        assert!(column[2].is_nan());
    }

    #[test]
    fn test_missing_molecule_fail_policy() {
        let mut table = example_table();
        let mut features = MoleculeFeatureMap::new();
        features.insert("mol_a", "n_holes_dim0", 5.0);
        let error = attach(&mut table, &features, "", MissingPolicy::Fail).unwrap_err();
        assert!(error.contains("mol_b"));
        assert!(!table.has_column("n_holes_dim0"));
    }

    #[test]
    fn test_molecule_present_but_feature_absent_gets_nan() {
        let mut table = example_table();
        let mut features = MoleculeFeatureMap::new();
        features.insert("mol_a", "n_holes_dim0", 5.0);
        features.insert("mol_b", "avg_lifetime_dim1", 0.5);
        attach(&mut table, &features, "", MissingPolicy::Fail).unwrap();
        assert!(table.column("n_holes_dim0").unwrap()[2].is_nan());
        assert!(table.column("avg_lifetime_dim1").unwrap()[0].is_nan());
    }
}
