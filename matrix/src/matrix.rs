/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::generic_matrix::GenericMatrix;
use crate::Float;

/// A shorthand for `GenericMatrix<Float>`; i.e., a normal
/// matrix. Note that `Float` is defined as `f32` if the feature `float`
/// is utilized; otherwise, it defauts to `f64`.
pub type Matrix = GenericMatrix<Float>;

impl Matrix {
    /// Applies `f` to every column, replacing its values by the
    /// output of `f`.
    fn map_columns<F>(&self, f: F) -> Result<Matrix, String>
    where
        F: Fn(usize, &[Float]) -> Result<Vec<Float>, String>,
    {
        let mut ret = self.clone();
        for ncol in 0..self.ncols {
            let col = self.column(ncol)?;
            let new_col = f(ncol, &col)?;
            for (nrow, v) in new_col.into_iter().enumerate() {
                let i = ret.index(nrow, ncol);
                ret.data[i] = v;
            }
        }
        Ok(ret)
    }

    /// Scales every column independently into the `[0, 1]` range,
    /// so that its minimum becomes 0 and its maximum becomes 1.
    ///
    /// Returns an error if a column has all its elements equal (i.e.,
    /// if its range is zero).
    pub fn normalize_columns(&self) -> Result<Matrix, String> {
        self.map_columns(|ncol, col| {
            let min = col.iter().copied().fold(Float::INFINITY, Float::min);
            let max = col.iter().copied().fold(Float::NEG_INFINITY, Float::max);
            let range = max - min;
            if !(range > 0.0) {
                return Err(format!(
                    "Column {} cannot be normalized: its range is {}",
                    ncol, range
                ));
            }
            Ok(col.iter().map(|v| (v - min) / range).collect())
        })
    }

    /// Transforms every column independently into z-scores (i.e.,
    /// subtracts its mean and divides by its population standard deviation).
    ///
    /// Returns an error if a column has zero standard deviation.
    pub fn standardize_columns(&self) -> Result<Matrix, String> {
        self.map_columns(|ncol, col| {
            let n = col.len() as Float;
            let mean = col.iter().sum::<Float>() / n;
            let std = (col.iter().map(|v| (v - mean).powi(2)).sum::<Float>() / n).sqrt();
            if !(std > 0.0) {
                return Err(format!(
                    "Column {} cannot be standardized: its standard deviation is {}",
                    ncol, std
                ));
            }
            Ok(col.iter().map(|v| (v - mean) / std).collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_columns() -> Result<(), String> {
        let m = Matrix::from_data(3, 2, vec![1., 10., 3., 20., 2., 30.])?;
        let n = m.normalize_columns()?;
        assert_eq!(n.column(0)?, vec![0., 1., 0.5]);
        assert_eq!(n.column(1)?, vec![0., 0.5, 1.]);
        Ok(())
    }

    #[test]
    fn test_normalize_constant_column() -> Result<(), String> {
        let m = Matrix::from_data(2, 2, vec![1., 3., 1., 4.])?;
        assert!(m.normalize_columns().is_err());
        Ok(())
    }

    #[test]
    fn test_standardize_columns() -> Result<(), String> {
        let m = Matrix::from_data(4, 1, vec![1., 2., 3., 4.])?;
        let s = m.standardize_columns()?;
        let col = s.column(0)?;
        let mean: Float = col.iter().sum::<Float>() / 4.;
        let var: Float = col.iter().map(|v| v * v).sum::<Float>() / 4.;
        assert!(mean.abs() < 1e-6);
        assert!((var - 1.).abs() < 1e-6);
        // Order is kept
        assert!(col.windows(2).all(|w| w[0] < w[1]));

        let constant = Matrix::new(2., 3, 1);
        assert!(constant.standardize_columns().is_err());
        Ok(())
    }
}
