use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fmt::{Display, Formatter};
use bincode::{Decode, Encode};
use serde::{Serialize, Deserialize};

/// Molecule-keyed map of named scalar features, the immutable output of the extractors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct MoleculeFeatureMap {
    pub features: BTreeMap<String, BTreeMap<String, f64>>,
}

impl MoleculeFeatureMap {
    pub fn new() -> Self {
        MoleculeFeatureMap { features: BTreeMap::new() }
    }

    pub fn insert(&mut self, molecule_id: &str, feature_name: &str, value: f64) {
        self.features
            .entry(molecule_id.to_string())
            .or_default()
            .insert(feature_name.to_string(), value);
    }

    pub fn get(&self, molecule_id: &str, feature_name: &str) -> Option<f64> {
        self.features.get(molecule_id)?.get(feature_name).copied()
    }

    pub fn molecule(&self, molecule_id: &str) -> Option<&BTreeMap<String, f64>> {
        self.features.get(molecule_id)
    }

    pub fn molecule_ids(&self) -> Vec<&String> {
        self.features.keys().collect()
    }

    /// Union of feature names over all molecules, sorted.
    pub fn feature_names(&self) -> Vec<String> {
        self.features
            .values()
            .flat_map(|record| record.keys().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Merges another map into this one, molecule by molecule. A feature name
    /// already present for the same molecule is an error, merged sources must
    /// be disjoint.
    pub fn merge(&mut self, other: &MoleculeFeatureMap) -> Result<(), String> {
        for (molecule_id, record) in &other.features {
            let target = self.features.entry(molecule_id.clone()).or_default();
            for (feature_name, &value) in record {
                if target.contains_key(feature_name) {
                    return Err(format!(
                        "feature {} already present for molecule {}",
                        feature_name, molecule_id
                    ));
                }
                target.insert(feature_name.clone(), value);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Display for MoleculeFeatureMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MoleculeFeatureMap(molecules: {}, features: {:?})",
            self.features.len(),
            self.feature_names()
        )
    }
}

/// Columnar table of atom pairs, one row per pair, keyed by a molecule-id column.
///
/// # Description
///
/// Structural columns (molecule id, the two atom indices) are typed fields rather
/// than string-keyed lookups; named `f64` columns hold geometric and topological
/// features. All columns are kept at equal length by construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct AtomPairTable {
    pub molecule_ids: Vec<String>,
    pub atom_index_0: Vec<u32>,
    pub atom_index_1: Vec<u32>,
    pub columns: BTreeMap<String, Vec<f64>>,
}

impl AtomPairTable {
    /// Constructs a new `AtomPairTable` from its structural columns.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tdacore::data::table::AtomPairTable;
    /// let table = AtomPairTable::new(
    ///     vec!["mol_a".to_string(), "mol_a".to_string(), "mol_b".to_string()],
    ///     vec![0, 0, 1],
    ///     vec![1, 2, 2],
    /// ).unwrap();
    /// assert_eq!(table.len(), 3);
    /// ```
    pub fn new(
        molecule_ids: Vec<String>,
        atom_index_0: Vec<u32>,
        atom_index_1: Vec<u32>,
    ) -> Result<AtomPairTable, String> {
        if molecule_ids.len() != atom_index_0.len() || molecule_ids.len() != atom_index_1.len() {
            return Err(format!(
                "structural columns differ in length: {} molecule ids, {} and {} atom indices",
                molecule_ids.len(),
                atom_index_0.len(),
                atom_index_1.len()
            ));
        }
        Ok(AtomPairTable {
            molecule_ids,
            atom_index_0,
            atom_index_1,
            columns: BTreeMap::new(),
        })
    }

    /// Number of atom-pair rows.
    pub fn len(&self) -> usize {
        self.molecule_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecule_ids.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&Vec<f64>> {
        self.columns.get(name)
    }

    pub fn column_names(&self) -> Vec<&String> {
        self.columns.keys().collect()
    }

    /// Adds a named column, rejecting length mismatches and name collisions.
    pub fn add_column(&mut self, name: &str, values: Vec<f64>) -> Result<(), String> {
        if values.len() != self.len() {
            return Err(format!(
                "column {} has {} values but the table has {} rows",
                name,
                values.len(),
                self.len()
            ));
        }
        if self.has_column(name) {
            return Err(format!("column {} already exists", name));
        }
        self.columns.insert(name.to_string(), values);
        Ok(())
    }
}

impl Display for AtomPairTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AtomPairTable(rows: {}, feature columns: {})",
            self.len(),
            self.columns.len()
        )
    }
}
