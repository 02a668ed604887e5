//! Host compressed sparse column matrix

use super::vector::HostSparseVector;
use super::{compressed, index_width, stored_entries};
use crate::dtype::Element;
use crate::error::{Error, Result};
use std::fmt;

/// CSC matrix in host memory
///
/// 0-based `col_ptrs` (length `ncols + 1`), `row_indices` sorted within each
/// column, and `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostCscMatrix<T> {
    nrows: usize,
    ncols: usize,
    col_ptrs: Vec<usize>,
    row_indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Element> HostCscMatrix<T> {
    /// Create a CSC matrix from its components, checking the full structure
    pub fn new(
        nrows: usize,
        ncols: usize,
        col_ptrs: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        compressed::validate(
            "CSC",
            ncols,
            nrows,
            &col_ptrs,
            &row_indices,
            values.len(),
        )?;
        Ok(Self {
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            values,
        })
    }

    /// Trusted constructor for routines that produce sorted output by construction
    pub(crate) fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        col_ptrs: Vec<usize>,
        row_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        debug_assert!(
            compressed::validate("CSC", ncols, nrows, &col_ptrs, &row_indices, values.len())
                .is_ok()
        );
        Self {
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            values,
        }
    }

    /// Create an empty matrix with no stored entries
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            col_ptrs: vec![0; ncols + 1],
            row_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from coordinate triplets
    ///
    /// Entries may come in any order. They are sorted column-major, and
    /// entries sharing a position are combined by addition.
    ///
    /// # Errors
    ///
    /// Returns error if the three slices differ in length or a coordinate is
    /// out of range.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        rows: &[usize],
        cols: &[usize],
        values: &[T],
    ) -> Result<Self> {
        if rows.len() != values.len() || cols.len() != values.len() {
            return Err(Error::shape_mismatch(
                &[values.len(), values.len()],
                &[rows.len(), cols.len()],
            ));
        }
        for (&r, &c) in rows.iter().zip(cols) {
            if r >= nrows {
                return Err(Error::IndexOutOfBounds {
                    index: r,
                    size: nrows,
                });
            }
            if c >= ncols {
                return Err(Error::IndexOutOfBounds {
                    index: c,
                    size: ncols,
                });
            }
        }

        let mut order: Vec<usize> = (0..values.len()).collect();
        order.sort_by_key(|&k| (cols[k], rows[k]));

        let mut col_ptrs = vec![0usize; compressed::ptrs_len(ncols)?];
        let mut row_indices: Vec<usize> = Vec::with_capacity(values.len());
        let mut out_values: Vec<T> = Vec::with_capacity(values.len());
        let mut last: Option<(usize, usize)> = None;

        for k in order {
            let pos = (cols[k], rows[k]);
            if last == Some(pos) {
                if let Some(v) = out_values.last_mut() {
                    *v = *v + values[k];
                }
                continue;
            }
            last = Some(pos);
            col_ptrs[pos.0 + 1] += 1;
            row_indices.push(pos.1);
            out_values.push(values[k]);
        }
        for j in 0..ncols {
            col_ptrs[j + 1] += col_ptrs[j];
        }

        Ok(Self::from_parts_unchecked(
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            out_values,
        ))
    }

    /// Build from a row-major dense array, storing every nonzero element
    pub fn from_dense(nrows: usize, ncols: usize, dense: &[T]) -> Result<Self> {
        let numel = nrows
            .checked_mul(ncols)
            .ok_or_else(|| Error::invalid_argument("shape", "element count overflows"))?;
        if dense.len() != numel {
            return Err(Error::shape_mismatch(&[numel], &[dense.len()]));
        }
        let mut col_ptrs = Vec::with_capacity(compressed::ptrs_len(ncols)?);
        let mut row_indices = Vec::new();
        let mut values = Vec::new();
        col_ptrs.push(0);
        for j in 0..ncols {
            for i in 0..nrows {
                let v = dense[i * ncols + j];
                if !v.is_zero() {
                    row_indices.push(i);
                    values.push(v);
                }
            }
            col_ptrs.push(values.len());
        }
        Ok(Self::from_parts_unchecked(
            nrows,
            ncols,
            col_ptrs,
            row_indices,
            values,
        ))
    }

    /// Single-column matrix holding a sparse vector
    pub fn from_vector(v: &HostSparseVector<T>) -> Self {
        Self::from_parts_unchecked(
            v.len(),
            1,
            vec![0, v.nnz()],
            v.indices().to_vec(),
            v.values().to_vec(),
        )
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Shape as `[nrows, ncols]`
    pub fn shape(&self) -> [usize; 2] {
        [self.nrows, self.ncols]
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column pointers (length `ncols + 1`)
    pub fn col_ptrs(&self) -> &[usize] {
        &self.col_ptrs
    }

    /// Row index of each stored entry
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    /// Stored values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Decompose into `(nrows, ncols, col_ptrs, row_indices, values)`
    pub fn into_parts(self) -> (usize, usize, Vec<usize>, Vec<usize>, Vec<T>) {
        (
            self.nrows,
            self.ncols,
            self.col_ptrs,
            self.row_indices,
            self.values,
        )
    }

    /// Value at `(row, col)`, zero if nothing is stored there
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_bounds(row, col)?;
        let segment = self.col_ptrs[col]..self.col_ptrs[col + 1];
        Ok(match self.row_indices[segment.clone()].binary_search(&row) {
            Ok(k) => self.values[segment.start + k],
            Err(_) => T::zero(),
        })
    }

    /// Extract column `col` as a sparse vector
    pub fn column(&self, col: usize) -> Result<HostSparseVector<T>> {
        if col >= self.ncols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.ncols,
            });
        }
        let segment = self.col_ptrs[col]..self.col_ptrs[col + 1];
        HostSparseVector::new(
            self.nrows,
            self.row_indices[segment.clone()].to_vec(),
            self.values[segment].to_vec(),
        )
    }

    /// Materialize as a row-major dense array
    pub fn to_dense(&self) -> Vec<T> {
        let mut dense = vec![T::zero(); self.nrows * self.ncols];
        for j in 0..self.ncols {
            for p in self.col_ptrs[j]..self.col_ptrs[j + 1] {
                dense[self.row_indices[p] * self.ncols + j] = self.values[p];
            }
        }
        dense
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.nrows {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.nrows,
            });
        }
        if col >= self.ncols {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.ncols,
            });
        }
        Ok(())
    }

    /// Write the stored entries in column-major order, without a header
    pub(crate) fn fmt_entries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rw = index_width(self.nrows);
        let cw = index_width(self.ncols);
        let mut first = true;
        for j in 0..self.ncols {
            for p in self.col_ptrs[j]..self.col_ptrs[j + 1] {
                if !first {
                    writeln!(f)?;
                }
                first = false;
                write!(
                    f,
                    "  [{:>rw$}, {:>cw$}]  =  {}",
                    self.row_indices[p],
                    j,
                    self.values[p],
                    rw = rw,
                    cw = cw
                )?;
            }
        }
        Ok(())
    }
}

impl<T: Element> fmt::Display for HostCscMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}×{} sparse matrix with {}",
            self.nrows,
            self.ncols,
            stored_entries(self.nnz())
        )?;
        if self.nnz() > 0 {
            writeln!(f, ":")?;
            self.fmt_entries(f)?;
        }
        Ok(())
    }
}
