use pyo3::prelude::*;
use pyo3::exceptions::PyValueError;
use numpy::{IntoPyArray, PyArray1};
use std::collections::BTreeMap;
use tdacore::algorithm::betti_features;
use tdacore::data::betti::BettiCurve;

use crate::py_table::PyMoleculeFeatureMap;

#[pyclass]
#[derive(Clone)]
pub struct PyBettiCurve {
    pub inner: BettiCurve,
}

#[pymethods]
impl PyBettiCurve {
    #[new]
    pub fn new(dimensions: Vec<usize>, rows: Vec<Vec<f64>>) -> PyResult<Self> {
        let inner = BettiCurve::from_rows(dimensions, rows).map_err(PyValueError::new_err)?;
        Ok(PyBettiCurve { inner })
    }

    #[getter]
    pub fn dimensions(&self) -> Vec<usize> {
        self.inner.dimensions.clone()
    }

    #[getter]
    pub fn n_steps(&self) -> usize {
        self.inner.n_steps()
    }

    pub fn curve(&self, py: Python, dimension: usize) -> Option<Py<PyArray1<f64>>> {
        self.inner
            .curve(dimension)
            .map(|values| values.into_pyarray(py).to_owned())
    }

    pub fn area_under_curve(&self, dimension: usize) -> f64 {
        self.inner.area_under_curve(dimension)
    }

    pub fn area_under_curve_with_spacing(&self, dimension: usize, dx: f64) -> f64 {
        self.inner.area_under_curve_with_spacing(dimension, dx)
    }

    pub fn __repr__(&self) -> String {
        format!("{}", self.inner)
    }
}

#[pyfunction]
pub fn area_under_curve(curves: Vec<PyBettiCurve>, dimension: usize) -> Vec<f64> {
    let curves: Vec<BettiCurve> = curves.into_iter().map(|c| c.inner).collect();
    betti_features::area_under_curve(&curves, dimension)
}

#[pyfunction]
pub fn area_under_curve_with_spacing(
    curves: Vec<PyBettiCurve>,
    dimension: usize,
    dx: f64,
) -> PyResult<Vec<f64>> {
    let curves: Vec<BettiCurve> = curves.into_iter().map(|c| c.inner).collect();
    betti_features::area_under_curve_with_spacing(&curves, dimension, dx).map_err(PyValueError::new_err)
}

#[pyfunction]
pub fn extract_betti_features(
    curves: BTreeMap<String, PyBettiCurve>,
    dimensions: Vec<usize>,
) -> PyMoleculeFeatureMap {
    let curves: BTreeMap<String, BettiCurve> = curves
        .into_iter()
        .map(|(molecule_id, curve)| (molecule_id, curve.inner))
        .collect();
    PyMoleculeFeatureMap {
        inner: betti_features::extract_betti_features(&curves, &dimensions),
    }
}
