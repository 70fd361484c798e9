use std::fmt;
use std::fmt::{Display, Formatter};
use bincode::{Decode, Encode};
use nalgebra::DMatrix;
use serde::{Serialize, Deserialize};

/// Represents a vectorized Betti curve for one molecule.
///
/// # Description
///
/// Row `i` of `counts` holds the number of alive topological features of homology
/// dimension `dimensions[i]` at each filtration step. Steps are equally spaced;
/// the spacing defaults to 1.0 unless the producing filtration says otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BettiCurve {
    pub dimensions: Vec<usize>,
    pub counts: DMatrix<f64>,
}

// Manual bincode implementation for the nalgebra matrix field
impl Encode for BettiCurve {
    fn encode<E: bincode::enc::Encoder>(&self, encoder: &mut E) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.dimensions, encoder)?;
        bincode::Encode::encode(&self.counts.nrows(), encoder)?;
        bincode::Encode::encode(&self.counts.ncols(), encoder)?;
        // Column-major, matching DMatrix storage order
        bincode::Encode::encode(&self.counts.as_slice().to_vec(), encoder)?;
        Ok(())
    }
}

impl<Context> Decode<Context> for BettiCurve {
    fn decode<D: bincode::de::Decoder<Context = Context>>(decoder: &mut D) -> Result<Self, bincode::error::DecodeError> {
        let dimensions: Vec<usize> = bincode::Decode::decode(decoder)?;
        let nrows: usize = bincode::Decode::decode(decoder)?;
        let ncols: usize = bincode::Decode::decode(decoder)?;
        let values: Vec<f64> = bincode::Decode::decode(decoder)?;
        Ok(BettiCurve {
            dimensions,
            counts: DMatrix::from_column_slice(nrows, ncols, &values),
        })
    }
}

impl<'de, Context> bincode::BorrowDecode<'de, Context> for BettiCurve {
    fn borrow_decode<D: bincode::de::BorrowDecoder<'de, Context = Context>>(decoder: &mut D) -> Result<Self, bincode::error::DecodeError> {
        let dimensions: Vec<usize> = bincode::BorrowDecode::borrow_decode(decoder)?;
        let nrows: usize = bincode::BorrowDecode::borrow_decode(decoder)?;
        let ncols: usize = bincode::BorrowDecode::borrow_decode(decoder)?;
        let values: Vec<f64> = bincode::BorrowDecode::borrow_decode(decoder)?;
        Ok(BettiCurve {
            dimensions,
            counts: DMatrix::from_column_slice(nrows, ncols, &values),
        })
    }
}

impl BettiCurve {
    /// Constructs a new `BettiCurve`.
    ///
    /// # Arguments
    ///
    /// * `dimensions` - Homology dimension of each matrix row, without duplicates.
    /// * `counts` - Feature counts, one row per dimension, one column per filtration step.
    pub fn new(dimensions: Vec<usize>, counts: DMatrix<f64>) -> Result<BettiCurve, String> {
        if dimensions.len() != counts.nrows() {
            return Err(format!(
                "dimension labels ({}) do not match matrix rows ({})",
                dimensions.len(),
                counts.nrows()
            ));
        }
        let mut seen = dimensions.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != dimensions.len() {
            return Err("duplicate homology dimension in Betti curve".to_string());
        }
        Ok(BettiCurve { dimensions, counts })
    }

    /// Constructs a curve from one row of counts per homology dimension.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use tdacore::data::betti::BettiCurve;
    /// let curve = BettiCurve::from_rows(vec![0, 1], vec![vec![1.0, 1.0, 2.0, 2.0, 1.0], vec![0.0, 1.0, 1.0, 0.0, 0.0]]).unwrap();
    /// assert_eq!(curve.area_under_curve(0), 6.0);
    /// ```
    pub fn from_rows(dimensions: Vec<usize>, rows: Vec<Vec<f64>>) -> Result<BettiCurve, String> {
        if dimensions.len() != rows.len() {
            return Err(format!(
                "dimension labels ({}) do not match row count ({})",
                dimensions.len(),
                rows.len()
            ));
        }
        let n_steps = rows.first().map(|row| row.len()).unwrap_or(0);
        if rows.iter().any(|row| row.len() != n_steps) {
            return Err("Betti curve rows must all have the same number of filtration steps".to_string());
        }
        let counts = DMatrix::from_fn(rows.len(), n_steps, |i, j| rows[i][j]);
        BettiCurve::new(dimensions, counts)
    }

    /// Number of filtration steps.
    pub fn n_steps(&self) -> usize {
        self.counts.ncols()
    }

    /// The counts for one homology dimension, None if the curve does not carry it.
    pub fn curve(&self, dimension: usize) -> Option<Vec<f64>> {
        let row = self.dimensions.iter().position(|&d| d == dimension)?;
        Some(self.counts.row(row).iter().copied().collect())
    }

    /// Area under the curve of the given dimension, trapezoidal rule with unit spacing.
    ///
    /// Returns NaN when the curve does not carry the dimension and 0.0 for a
    /// degenerate curve of fewer than two steps.
    pub fn area_under_curve(&self, dimension: usize) -> f64 {
        self.area_under_curve_with_spacing(dimension, 1.0)
    }

    /// Area under the curve with an explicit filtration step spacing `dx`.
    pub fn area_under_curve_with_spacing(&self, dimension: usize, dx: f64) -> f64 {
        match self.curve(dimension) {
            None => f64::NAN,
            Some(values) => {
                if values.len() < 2 {
                    return 0.0;
                }
                values
                    .windows(2)
                    .map(|pair| 0.5 * (pair[0] + pair[1]) * dx)
                    .sum()
            }
        }
    }
}

impl Display for BettiCurve {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BettiCurve(dimensions: {:?}, filtration steps: {})",
            self.dimensions,
            self.n_steps()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_under_curve_concrete() {
        let curve = BettiCurve::from_rows(vec![0], vec![vec![1.0, 1.0, 2.0, 2.0, 1.0]]).unwrap();
        // trapezoids: 1.0 + 1.5 + 2.0 + 1.5
        assert_eq!(curve.area_under_curve(0), 6.0);
    }

    #[test]
    fn test_area_under_constant_curve() {
        let n = 7;
        let c = 3.0;
        let curve = BettiCurve::from_rows(vec![1], vec![vec![c; n]]).unwrap();
        assert_eq!(curve.area_under_curve(1), c * (n - 1) as f64);
    }

    #[test]
    fn test_area_degenerate_and_missing() {
        let single = BettiCurve::from_rows(vec![0], vec![vec![5.0]]).unwrap();
        assert_eq!(single.area_under_curve(0), 0.0);
        assert!(single.area_under_curve(1).is_nan());

        let empty = BettiCurve::from_rows(vec![], vec![]).unwrap();
        assert!(empty.area_under_curve(0).is_nan());
    }

    #[test]
    fn test_area_with_spacing() {
        let curve = BettiCurve::from_rows(vec![0], vec![vec![2.0, 2.0, 2.0]]).unwrap();
        assert_eq!(curve.area_under_curve_with_spacing(0, 0.5), 2.0);
    }

    #[test]
    fn test_row_validation() {
        assert!(BettiCurve::from_rows(vec![0, 1], vec![vec![1.0]]).is_err());
        assert!(BettiCurve::from_rows(vec![0, 1], vec![vec![1.0, 2.0], vec![1.0]]).is_err());
        assert!(BettiCurve::from_rows(vec![0, 0], vec![vec![1.0], vec![1.0]]).is_err());
    }

    #[test]
    fn test_bincode_round_trip() {
        let curve = BettiCurve::from_rows(
            vec![0, 1, 2],
            vec![
                vec![4.0, 3.0, 1.0, 1.0],
                vec![0.0, 2.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
            ],
        )
        .unwrap();
        let bytes = bincode::encode_to_vec(&curve, bincode::config::standard()).unwrap();
        let (decoded, _): (BettiCurve, usize) =
            bincode::decode_from_slice(&bytes, bincode::config::standard()).unwrap();
        assert_eq!(decoded, curve);
    }
}
