use std::collections::BTreeSet;
use std::error::Error;
use std::fs;
use std::io;
use std::io::{Read, Write};
use std::path::Path;
use bincode::{Decode, Encode};
use tdacore::data::table::{AtomPairTable, MoleculeFeatureMap};
use crate::data::meta::DatasetMeta;

const COMPRESSION_LEVEL: i32 = 3;

/// Decompresses a ZSTD compressed byte array.
pub fn zstd_decompress(compressed_data: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = zstd::Decoder::new(compressed_data)?;
    let mut decompressed_data = Vec::new();
    decoder.read_to_end(&mut decompressed_data)?;
    Ok(decompressed_data)
}

/// Compresses a byte array using ZSTD.
pub fn zstd_compress(decompressed_data: &[u8], compression_level: i32) -> io::Result<Vec<u8>> {
    let mut encoder = zstd::Encoder::new(Vec::new(), compression_level)?;
    encoder.write_all(decompressed_data)?;
    let compressed_data = encoder.finish()?;
    Ok(compressed_data)
}

/// The persisted training artifact: atom-pair feature table, regression target
/// and metadata, stored as a bincode payload behind zstd compression.
#[derive(Clone, Debug, PartialEq, Encode, Decode)]
pub struct CouplingDataset {
    pub table: AtomPairTable,
    pub target: Vec<f64>,
    pub meta: DatasetMeta,
}

impl CouplingDataset {
    /// Constructs a dataset, deriving the row and molecule counts of the metadata
    /// from the table.
    pub fn new(table: AtomPairTable, target: Vec<f64>, name: &str, target_column: &str) -> Result<CouplingDataset, String> {
        if target.len() != table.len() {
            return Err(format!(
                "target has {} values but the table has {} rows",
                target.len(),
                table.len()
            ));
        }
        let num_molecules = table.molecule_ids.iter().collect::<BTreeSet<_>>().len();
        let meta = DatasetMeta::new(name, target_column, table.len(), num_molecules);
        Ok(CouplingDataset { table, target, meta })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Box<dyn Error>> {
        let payload = bincode::encode_to_vec(self, bincode::config::standard())?;
        Ok(zstd_compress(&payload, COMPRESSION_LEVEL)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<CouplingDataset, Box<dyn Error>> {
        let payload = zstd_decompress(bytes)?;
        let (dataset, _) = bincode::decode_from_slice(&payload, bincode::config::standard())?;
        Ok(dataset)
    }

    pub fn write_compressed(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn read_compressed(path: &Path) -> Result<CouplingDataset, Box<dyn Error>> {
        CouplingDataset::from_bytes(&fs::read(path)?)
    }
}

/// A persisted molecule-keyed feature dictionary, one per feature source
/// (point-cloud-derived, graph-derived).
#[derive(Clone, Debug, Default, PartialEq, Encode, Decode)]
pub struct FeatureArtifact {
    pub name: String,
    pub features: MoleculeFeatureMap,
}

impl FeatureArtifact {
    pub fn new(name: &str, features: MoleculeFeatureMap) -> Self {
        FeatureArtifact { name: name.to_string(), features }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Box<dyn Error>> {
        let payload = bincode::encode_to_vec(self, bincode::config::standard())?;
        Ok(zstd_compress(&payload, COMPRESSION_LEVEL)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<FeatureArtifact, Box<dyn Error>> {
        let payload = zstd_decompress(bytes)?;
        let (artifact, _) = bincode::decode_from_slice(&payload, bincode::config::standard())?;
        Ok(artifact)
    }

    pub fn write_compressed(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn read_compressed(path: &Path) -> Result<FeatureArtifact, Box<dyn Error>> {
        FeatureArtifact::from_bytes(&fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_dataset() -> CouplingDataset {
        let mut table = AtomPairTable::new(
            vec!["mol_a".to_string(), "mol_a".to_string(), "mol_b".to_string()],
            vec![0, 0, 1],
            vec![1, 2, 2],
        )
        .unwrap();
        table.add_column("distance", vec![1.0, 2.0, 3.0]).unwrap();
        CouplingDataset::new(table, vec![84.8, 2.1, -0.3], "champs_train", "scalar_coupling_constant").unwrap()
    }

    #[test]
    fn test_target_length_checked() {
        let table = AtomPairTable::new(vec!["mol_a".to_string()], vec![0], vec![1]).unwrap();
        assert!(CouplingDataset::new(table, vec![1.0, 2.0], "x", "y").is_err());
    }

    #[test]
    fn test_meta_counts_derived() {
        let dataset = example_dataset();
        assert_eq!(dataset.meta.num_rows, 3);
        assert_eq!(dataset.meta.num_molecules, 2);
    }

    #[test]
    fn test_dataset_bytes_round_trip() {
        let dataset = example_dataset();
        let bytes = dataset.to_bytes().unwrap();
        let loaded = CouplingDataset::from_bytes(&bytes).unwrap();
        assert_eq!(loaded, dataset);
    }

    #[test]
    fn test_feature_artifact_bytes_round_trip() {
        let mut features = MoleculeFeatureMap::new();
        features.insert("mol_a", "n_holes_dim0", 5.0);
        features.insert("mol_b", "betti_area_dim1", 3.5);
        let artifact = FeatureArtifact::new("point_cloud", features);
        let bytes = artifact.to_bytes().unwrap();
        let loaded = FeatureArtifact::from_bytes(&bytes).unwrap();
        assert_eq!(loaded, artifact);
    }
}
