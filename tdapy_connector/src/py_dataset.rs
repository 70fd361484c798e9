use pyo3::prelude::*;
use pyo3::exceptions::{PyIOError, PyValueError};
use numpy::{IntoPyArray, PyArray1};
use std::path::Path;
use tdacore::algorithm::attach::MissingPolicy;
use tdadf::data::dataset::{CouplingDataset, FeatureArtifact};
use tdadf::data::handle::{ArtifactSource, EnrichmentHandle, FeatureSource};

use crate::py_table::{PyAtomPairTable, PyMoleculeFeatureMap};

#[pyclass]
#[derive(Clone)]
pub struct PyCouplingDataset {
    pub inner: CouplingDataset,
}

#[pymethods]
impl PyCouplingDataset {
    #[new]
    pub fn new(
        table: PyAtomPairTable,
        target: Vec<f64>,
        name: &str,
        target_column: &str,
    ) -> PyResult<Self> {
        let inner = CouplingDataset::new(table.inner, target, name, target_column)
            .map_err(PyValueError::new_err)?;
        Ok(PyCouplingDataset { inner })
    }

    #[staticmethod]
    pub fn read_compressed(path: &str) -> PyResult<Self> {
        let inner = CouplingDataset::read_compressed(Path::new(path))
            .map_err(|error| PyIOError::new_err(error.to_string()))?;
        Ok(PyCouplingDataset { inner })
    }

    pub fn write_compressed(&self, path: &str) -> PyResult<()> {
        self.inner
            .write_compressed(Path::new(path))
            .map_err(|error| PyIOError::new_err(error.to_string()))
    }

    #[getter]
    pub fn table(&self) -> PyAtomPairTable {
        PyAtomPairTable { inner: self.inner.table.clone() }
    }

    #[getter]
    pub fn target(&self, py: Python) -> Py<PyArray1<f64>> {
        self.inner.target.clone().into_pyarray(py).to_owned()
    }

    #[getter]
    pub fn name(&self) -> String {
        self.inner.meta.name.clone()
    }

    #[getter]
    pub fn target_column(&self) -> String {
        self.inner.meta.target_column.clone()
    }

    #[getter]
    pub fn num_rows(&self) -> usize {
        self.inner.meta.num_rows
    }

    #[getter]
    pub fn num_molecules(&self) -> usize {
        self.inner.meta.num_molecules
    }
}

#[pyclass]
#[derive(Clone)]
pub struct PyFeatureArtifact {
    pub inner: FeatureArtifact,
}

#[pymethods]
impl PyFeatureArtifact {
    #[new]
    pub fn new(name: &str, features: PyMoleculeFeatureMap) -> Self {
        PyFeatureArtifact { inner: FeatureArtifact::new(name, features.inner) }
    }

    #[staticmethod]
    pub fn read_compressed(path: &str) -> PyResult<Self> {
        let inner = FeatureArtifact::read_compressed(Path::new(path))
            .map_err(|error| PyIOError::new_err(error.to_string()))?;
        Ok(PyFeatureArtifact { inner })
    }

    pub fn write_compressed(&self, path: &str) -> PyResult<()> {
        self.inner
            .write_compressed(Path::new(path))
            .map_err(|error| PyIOError::new_err(error.to_string()))
    }

    #[getter]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    pub fn features(&self) -> PyMoleculeFeatureMap {
        PyMoleculeFeatureMap { inner: self.inner.features.clone() }
    }
}

#[pyfunction]
pub fn enrich_dataset(
    dataset_path: &str,
    feature_paths: Vec<String>,
    suffixes: Vec<String>,
    fail_on_missing: bool,
) -> PyResult<PyCouplingDataset> {
    if feature_paths.len() != suffixes.len() {
        return Err(PyValueError::new_err(format!(
            "{} feature artifacts but {} suffixes",
            feature_paths.len(),
            suffixes.len()
        )));
    }
    let policy = if fail_on_missing { MissingPolicy::Fail } else { MissingPolicy::InsertNan };
    let sources: Vec<Box<dyn FeatureSource>> = feature_paths
        .iter()
        .zip(suffixes.iter())
        .map(|(path, suffix)| Box::new(ArtifactSource::new(Path::new(path), suffix)) as Box<dyn FeatureSource>)
        .collect();
    let handle = EnrichmentHandle::new(Path::new(dataset_path), policy);
    let inner = handle
        .enrich(&sources)
        .map_err(|error| PyIOError::new_err(error.to_string()))?;
    Ok(PyCouplingDataset { inner })
}
