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

use crate::traits::Numberish;
use serde::{Deserialize, Serialize};

/// The main Structure in this library
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericMatrix<T: Numberish> {
    pub(crate) ncols: usize,
    pub(crate) nrows: usize,

    // Contains the data ordered by row,
    // Going left to right, and up and down.
    pub(crate) data: Vec<T>,
}

impl<T: Numberish> std::fmt::Display for GenericMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.data.chunks(self.ncols.max(1)) {
            write!(f, "\n\t")?;
            for v in row {
                write!(f, "{}, ", v)?;
            }
        }
        Ok(())
    }
}

impl<T: Numberish> GenericMatrix<T> {
    /// Creates a `GenericMatrix` from a vector containing the elements of the matrix,
    /// ordered by row.
    pub fn from_data(nrows: usize, ncols: usize, data: Vec<T>) -> Result<Self, String> {
        if nrows * ncols != data.len() {
            return Err(format!("When creating Matrix: Number of rows (nrows = {}) and cols (ncols = {}) does not match length of data (data.len() = {})... (nrows * ncols = {})", nrows, ncols, data.len(), nrows*ncols));
        }
        Ok(Self { nrows, ncols, data })
    }

    /// Creates a `GenericMatrix` of `nrows` and `ncols` full of values `v`
    #[must_use]
    pub fn new(v: T, nrows: usize, ncols: usize) -> Self {
        GenericMatrix {
            nrows,
            ncols,
            data: vec![v; nrows * ncols],
        }
    }

    /// Creates an empty Matrix (i.e., size 0x0)
    #[must_use]
    pub fn empty() -> Self {
        GenericMatrix {
            nrows: 0,
            ncols: 0,
            data: Vec::with_capacity(0),
        }
    }

    /// Checks whether a Matrix has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a tuple with number of rows and columns    
    pub fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Borrows all the elements, ordered by row
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Gets the index of an element within the `data` array of the Matrix
    pub(crate) fn index(&self, nrow: usize, ncol: usize) -> usize {
        self.ncols * nrow + ncol
    }

    /// Gets an element from the matrix    
    pub fn get(&self, nrow: usize, ncol: usize) -> Result<T, String> {
        if nrow < self.nrows && ncol < self.ncols {
            Ok(self.data[self.index(nrow, ncol)])
        } else {
            Err(format!(
                "Element ({},{}) is out of bounds of a {} by {} matrix",
                nrow, ncol, self.nrows, self.ncols
            ))
        }
    }

    /// Sets an element into the matrix, returning the value it replaced
    pub fn set(&mut self, nrow: usize, ncol: usize, v: T) -> Result<T, String> {
        if nrow < self.nrows && ncol < self.ncols {
            let i = self.index(nrow, ncol);
            Ok(std::mem::replace(&mut self.data[i], v))
        } else {
            Err(format!(
                "Element ({},{}) is out of bounds of a {} by {} matrix",
                nrow, ncol, self.nrows, self.ncols
            ))
        }
    }

    /// Borrows a whole row of the matrix
    pub fn row(&self, nrow: usize) -> Result<&[T], String> {
        if nrow >= self.nrows {
            return Err(format!(
                "Row {} is out of bounds of a matrix with {} rows",
                nrow, self.nrows
            ));
        }
        let ini = self.index(nrow, 0);
        Ok(&self.data[ini..ini + self.ncols])
    }

    /// Copies a whole column of the matrix
    pub fn column(&self, ncol: usize) -> Result<Vec<T>, String> {
        if ncol >= self.ncols {
            return Err(format!(
                "Column {} is out of bounds of a matrix with {} columns",
                ncol, self.ncols
            ));
        }
        Ok(self
            .data
            .iter()
            .skip(ncol)
            .step_by(self.ncols)
            .copied()
            .collect())
    }

    /// Appends a row at the bottom of the matrix. An empty matrix
    /// takes the number of columns of the first row pushed into it.
    pub fn push_row(&mut self, row: &[T]) -> Result<(), String> {
        if self.nrows == 0 && self.ncols == 0 {
            self.ncols = row.len();
        }
        if row.len() != self.ncols {
            return Err(format!(
                "Cannot push a row of {} elements into a matrix with {} columns",
                row.len(),
                self.ncols
            ));
        }
        self.data.extend_from_slice(row);
        self.nrows += 1;
        Ok(())
    }
}
