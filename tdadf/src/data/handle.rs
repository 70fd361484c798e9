use std::error::Error;
use std::path::{Path, PathBuf};
use tdacore::algorithm::attach::{attach, MissingPolicy};
use tdacore::data::table::MoleculeFeatureMap;
use crate::data::dataset::{CouplingDataset, FeatureArtifact};

/// A source of molecule-keyed features to broadcast onto a dataset, with the
/// column suffix that keeps it apart from other sources.
pub trait FeatureSource {
    fn feature_map(&self) -> Result<MoleculeFeatureMap, Box<dyn Error>>;
    fn suffix(&self) -> &str;
}

/// Features persisted as a compressed artifact on disk.
pub struct ArtifactSource {
    pub path: PathBuf,
    pub suffix: String,
}

impl ArtifactSource {
    pub fn new(path: &Path, suffix: &str) -> Self {
        ArtifactSource { path: path.to_path_buf(), suffix: suffix.to_string() }
    }
}

impl FeatureSource for ArtifactSource {
    fn feature_map(&self) -> Result<MoleculeFeatureMap, Box<dyn Error>> {
        Ok(FeatureArtifact::read_compressed(&self.path)?.features)
    }

    fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Features already extracted in memory.
pub struct InMemorySource {
    pub features: MoleculeFeatureMap,
    pub suffix: String,
}

impl InMemorySource {
    pub fn new(features: MoleculeFeatureMap, suffix: &str) -> Self {
        InMemorySource { features, suffix: suffix.to_string() }
    }
}

impl FeatureSource for InMemorySource {
    fn feature_map(&self) -> Result<MoleculeFeatureMap, Box<dyn Error>> {
        Ok(self.features.clone())
    }

    fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Loads a dataset artifact and broadcasts feature sources onto it, producing
/// the enriched table handed to the external training routine.
pub struct EnrichmentHandle {
    pub dataset_path: PathBuf,
    pub policy: MissingPolicy,
}

impl EnrichmentHandle {
    pub fn new(dataset_path: &Path, policy: MissingPolicy) -> Self {
        EnrichmentHandle { dataset_path: dataset_path.to_path_buf(), policy }
    }

    /// Reads the dataset and attaches every source in order. Suffixes must keep
    /// the resulting column sets disjoint, a collision aborts the enrichment.
    pub fn enrich(&self, sources: &[Box<dyn FeatureSource>]) -> Result<CouplingDataset, Box<dyn Error>> {
        let mut dataset = CouplingDataset::read_compressed(&self.dataset_path)?;
        for source in sources {
            let features = source.feature_map()?;
            attach(&mut dataset.table, &features, source.suffix(), self.policy)?;
        }
        Ok(dataset)
    }
}
