use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use numpy::{IntoPyArray, PyArray1};
use tdacore::algorithm::attach::{attach, MissingPolicy};
use tdacore::data::table::{AtomPairTable, MoleculeFeatureMap};

#[pyclass]
#[derive(Clone)]
pub struct PyMoleculeFeatureMap {
    pub inner: MoleculeFeatureMap,
}

#[pymethods]
impl PyMoleculeFeatureMap {
    #[new]
    pub fn new() -> Self {
        PyMoleculeFeatureMap { inner: MoleculeFeatureMap::new() }
    }

    pub fn insert(&mut self, molecule_id: &str, feature_name: &str, value: f64) {
        self.inner.insert(molecule_id, feature_name, value);
    }

    pub fn get(&self, molecule_id: &str, feature_name: &str) -> Option<f64> {
        self.inner.get(molecule_id, feature_name)
    }

    pub fn molecule_ids(&self) -> Vec<String> {
        self.inner.molecule_ids().into_iter().cloned().collect()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.inner.feature_names()
    }

    pub fn merge(&mut self, other: PyMoleculeFeatureMap) -> PyResult<()> {
        self.inner.merge(&other.inner).map_err(PyValueError::new_err)
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        format!("{}", self.inner)
    }
}

#[pyclass]
#[derive(Clone)]
pub struct PyAtomPairTable {
    pub inner: AtomPairTable,
}

#[pymethods]
impl PyAtomPairTable {
    #[new]
    pub fn new(molecule_ids: Vec<String>, atom_index_0: Vec<u32>, atom_index_1: Vec<u32>) -> PyResult<Self> {
        let inner = AtomPairTable::new(molecule_ids, atom_index_0, atom_index_1)
            .map_err(PyValueError::new_err)?;
        Ok(PyAtomPairTable { inner })
    }

    #[getter]
    pub fn molecule_ids(&self) -> Vec<String> {
        self.inner.molecule_ids.clone()
    }

    pub fn add_column(&mut self, name: &str, values: Vec<f64>) -> PyResult<()> {
        self.inner.add_column(name, values).map_err(PyValueError::new_err)
    }

    pub fn column(&self, py: Python, name: &str) -> Option<Py<PyArray1<f64>>> {
        self.inner
            .column(name)
            .map(|values| values.clone().into_pyarray(py).to_owned())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.inner.column_names().into_iter().cloned().collect()
    }

    /// Broadcast molecule-level features onto the table, suffixing the new columns.
    pub fn attach(
        &mut self,
        features: PyMoleculeFeatureMap,
        suffix: &str,
        fail_on_missing: bool,
    ) -> PyResult<()> {
        let policy = if fail_on_missing { MissingPolicy::Fail } else { MissingPolicy::InsertNan };
        attach(&mut self.inner, &features.inner, suffix, policy).map_err(PyValueError::new_err)
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        format!("{}", self.inner)
    }
}
