mod py_diagram;
mod py_betti;
mod py_table;
mod py_dataset;

use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::py_diagram::PyPersistenceDiagram;
use crate::py_betti::PyBettiCurve;
use crate::py_table::{PyAtomPairTable, PyMoleculeFeatureMap};
use crate::py_dataset::{PyCouplingDataset, PyFeatureArtifact};

#[pymodule]
fn tdapy_connector(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyPersistenceDiagram>()?;
    m.add_class::<PyBettiCurve>()?;
    m.add_class::<PyMoleculeFeatureMap>()?;
    m.add_class::<PyAtomPairTable>()?;
    m.add_class::<PyCouplingDataset>()?;
    m.add_class::<PyFeatureArtifact>()?;
    m.add_function(wrap_pyfunction!(py_diagram::count_features, m)?)?;
    m.add_function(wrap_pyfunction!(py_diagram::count_relevant_features, m)?)?;
    m.add_function(wrap_pyfunction!(py_diagram::average_lifetime, m)?)?;
    m.add_function(wrap_pyfunction!(py_diagram::extract_diagram_features, m)?)?;
    m.add_function(wrap_pyfunction!(py_betti::area_under_curve, m)?)?;
    m.add_function(wrap_pyfunction!(py_betti::area_under_curve_with_spacing, m)?)?;
    m.add_function(wrap_pyfunction!(py_betti::extract_betti_features, m)?)?;
    m.add_function(wrap_pyfunction!(py_dataset::enrich_dataset, m)?)?;
    Ok(())
}
