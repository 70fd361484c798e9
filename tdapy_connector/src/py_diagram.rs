use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use std::collections::BTreeMap;
use tdacore::algorithm::diagram_features;
use tdacore::data::diagram::PersistenceDiagram;

use crate::py_table::PyMoleculeFeatureMap;

#[pyclass]
#[derive(Clone)]
pub struct PyPersistenceDiagram {
    pub inner: PersistenceDiagram,
}

#[pymethods]
impl PyPersistenceDiagram {
    #[new]
    pub fn new(triples: Vec<(f64, f64, usize)>) -> PyResult<Self> {
        let inner = PersistenceDiagram::from_triples(&triples).map_err(PyValueError::new_err)?;
        Ok(PyPersistenceDiagram { inner })
    }

    #[getter]
    pub fn triples(&self) -> Vec<(f64, f64, usize)> {
        self.inner
            .intervals
            .iter()
            .map(|interval| (interval.birth, interval.death, interval.dimension))
            .collect()
    }

    pub fn count_features(&self, dimension: usize) -> usize {
        self.inner.count_features(dimension)
    }

    pub fn count_relevant_features(&self, dimension: usize, theta: f64) -> PyResult<usize> {
        self.inner
            .count_relevant_features(dimension, theta)
            .map_err(PyValueError::new_err)
    }

    pub fn average_lifetime(&self, dimension: usize) -> f64 {
        self.inner.average_lifetime(dimension)
    }

    pub fn max_lifetime(&self, dimension: usize) -> f64 {
        self.inner.max_lifetime(dimension)
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        format!("{}", self.inner)
    }
}

#[pyfunction]
pub fn count_features(diagrams: Vec<PyPersistenceDiagram>, dimension: usize) -> Vec<usize> {
    let diagrams: Vec<PersistenceDiagram> = diagrams.into_iter().map(|d| d.inner).collect();
    diagram_features::count_features(&diagrams, dimension)
}

#[pyfunction]
pub fn count_relevant_features(
    diagrams: Vec<PyPersistenceDiagram>,
    dimension: usize,
    theta: f64,
) -> PyResult<Vec<usize>> {
    let diagrams: Vec<PersistenceDiagram> = diagrams.into_iter().map(|d| d.inner).collect();
    diagram_features::count_relevant_features(&diagrams, dimension, theta).map_err(PyValueError::new_err)
}

#[pyfunction]
pub fn average_lifetime(diagrams: Vec<PyPersistenceDiagram>, dimension: usize) -> Vec<f64> {
    let diagrams: Vec<PersistenceDiagram> = diagrams.into_iter().map(|d| d.inner).collect();
    diagram_features::average_lifetime(&diagrams, dimension)
}

#[pyfunction]
pub fn extract_diagram_features(
    diagrams: BTreeMap<String, PyPersistenceDiagram>,
    dimensions: Vec<usize>,
    theta: f64,
) -> PyResult<PyMoleculeFeatureMap> {
    let diagrams: BTreeMap<String, PersistenceDiagram> = diagrams
        .into_iter()
        .map(|(molecule_id, diagram)| (molecule_id, diagram.inner))
        .collect();
    let features = diagram_features::extract_diagram_features(&diagrams, &dimensions, theta)
        .map_err(PyValueError::new_err)?;
    Ok(PyMoleculeFeatureMap { inner: features })
}
