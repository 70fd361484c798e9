use std::error::Error;
use std::fs;
use std::path::Path;
use bincode::{Decode, Encode};
use serde::{Serialize, Deserialize};

/// Logical description of a persisted dataset artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct DatasetMeta {
    pub name: String,
    pub target_column: String,
    pub num_rows: usize,
    pub num_molecules: usize,
}

impl DatasetMeta {
    pub fn new(name: &str, target_column: &str, num_rows: usize, num_molecules: usize) -> Self {
        DatasetMeta {
            name: name.to_string(),
            target_column: target_column.to_string(),
            num_rows,
            num_molecules,
        }
    }
}

/// Reads a JSON metadata sidecar.
pub fn read_meta_json(path: &Path) -> Result<DatasetMeta, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let meta: DatasetMeta = serde_json::from_str(&text)?;
    Ok(meta)
}

/// Writes a JSON metadata sidecar.
pub fn write_meta_json(path: &Path, meta: &DatasetMeta) -> Result<(), Box<dyn Error>> {
    let text = serde_json::to_string_pretty(meta)?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_json_round_trip() {
        let meta = DatasetMeta::new("champs_train", "scalar_coupling_constant", 42, 7);
        let path = std::env::temp_dir().join("tdadf_meta_round_trip.json");
        write_meta_json(&path, &meta).unwrap();
        let loaded = read_meta_json(&path).unwrap();
        assert_eq!(loaded, meta);
        let _ = std::fs::remove_file(&path);
    }
}
