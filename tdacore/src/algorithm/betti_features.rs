use std::collections::BTreeMap;
use rayon::prelude::*;
use crate::data::betti::BettiCurve;
use crate::data::table::MoleculeFeatureMap;

/// Area under the Betti curve of the given dimension for each molecule in a
/// batch, trapezoidal rule with unit filtration spacing. NaN where a curve does
/// not carry the dimension.
pub fn area_under_curve(curves: &[BettiCurve], dimension: usize) -> Vec<f64> {
    curves
        .iter()
        .map(|curve| curve.area_under_curve(dimension))
        .collect()
}

/// Same as [`area_under_curve`] with an explicit filtration step spacing.
pub fn area_under_curve_with_spacing(
    curves: &[BettiCurve],
    dimension: usize,
    dx: f64,
) -> Result<Vec<f64>, String> {
    if !(dx > 0.0 && dx.is_finite()) {
        return Err(format!("filtration spacing must be positive and finite, got {}", dx));
    }
    Ok(curves
        .iter()
        .map(|curve| curve.area_under_curve_with_spacing(dimension, dx))
        .collect())
}

/// Turns a molecule-keyed batch of Betti curves into a feature map with one
/// column `betti_area_dim{d}` per requested homology dimension.
pub fn extract_betti_features(
    curves: &BTreeMap<String, BettiCurve>,
    dimensions: &[usize],
) -> MoleculeFeatureMap {
    let records: Vec<(String, BTreeMap<String, f64>)> = curves
        .par_iter()
        .map(|(molecule_id, curve)| {
            let record = dimensions
                .iter()
                .map(|&dimension| {
                    (
                        format!("betti_area_dim{}", dimension),
                        curve.area_under_curve(dimension),
                    )
                })
                .collect();
            (molecule_id.clone(), record)
        })
        .collect();

    let mut map = MoleculeFeatureMap::new();
    for (molecule_id, record) in records {
        map.features.insert(molecule_id, record);
    }
    map
}
