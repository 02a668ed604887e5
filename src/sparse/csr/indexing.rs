//! CSR element and slice access

use super::CsrData;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::sparse::utils;
use crate::sparse::{
    ConversionBackend, Selection, Slice, SparseArray, SparseStorage, SparseVectorData,
};

impl<R: Runtime, T: Element> CsrData<R, T> {
    /// Value at 0-based `(row, col)`, zero if nothing is stored there
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        if row >= self.nrows() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.nrows(),
            });
        }
        if col >= self.ncols() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.ncols(),
            });
        }
        let segment = utils::segment("CSR", &self.row_ptrs, row, self.index_base)?;
        let target = self.index_base.encode(col)?;
        match utils::search_segment(&self.col_indices, segment, target)? {
            Some(pos) => self.values.read_at(pos),
            None => Ok(T::zero()),
        }
    }

    /// Row `row` as a sparse vector, copied on the device
    pub fn row(&self, row: usize) -> Result<SparseVectorData<R, T>> {
        if row >= self.nrows() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.nrows(),
            });
        }
        let segment = utils::segment("CSR", &self.row_ptrs, row, self.index_base)?;
        SparseVectorData::new(
            self.col_indices.slice(segment.clone())?,
            self.values.slice(segment)?,
            self.ncols(),
            self.index_base,
        )
    }

    /// Column `col` as a sparse vector
    ///
    /// Converts the whole matrix to CSC through `backend` first.
    pub fn column<B: ConversionBackend<R>>(
        &self,
        col: usize,
        backend: &B,
    ) -> Result<SparseVectorData<R, T>> {
        if col >= self.ncols() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.ncols(),
            });
        }
        tracing::debug!(
            col,
            nnz = self.nnz(),
            "CSR column access falls back to a full CSC conversion"
        );
        self.to_csc(backend)?.column(col)
    }

    /// Select an element, a row, a column, or the whole matrix
    pub fn select<B: ConversionBackend<R>>(
        &self,
        rows: Slice,
        cols: Slice,
        backend: &B,
    ) -> Result<Selection<R, T>> {
        match (rows, cols) {
            (Slice::Index(i), Slice::Index(j)) => self.get(i, j).map(Selection::Scalar),
            (Slice::Index(i), Slice::All) => self.row(i).map(Selection::Vector),
            (Slice::All, Slice::Index(j)) => self.column(j, backend).map(Selection::Vector),
            (Slice::All, Slice::All) => Ok(Selection::Matrix(SparseArray::Csr(self.try_clone()?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    use crate::sparse::{HostFallback, IndexBase};

    // [1, 0, 2]
    // [0, 0, 3]
    // [4, 5, 0]
    fn sample(base: IndexBase) -> CsrData<CpuRuntime, f32> {
        let device = CpuDevice::new();
        CsrData::from_slices(
            &[0, 2, 3, 5],
            &[0, 2, 2, 0, 1],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            [3, 3],
            base,
            &device,
        )
        .unwrap()
    }

    #[test]
    fn test_get_matches_dense() {
        let dense = [1.0, 0.0, 2.0, 0.0, 0.0, 3.0, 4.0, 5.0, 0.0];
        for base in [IndexBase::Zero, IndexBase::One] {
            let csr = sample(base);
            for i in 0..3 {
                for j in 0..3 {
                    assert_eq!(csr.get(i, j).unwrap(), dense[i * 3 + j]);
                }
            }
            assert!(csr.get(3, 0).unwrap_err().is_bounds());
        }
    }

    #[test]
    fn test_row_and_column() {
        let csr = sample(IndexBase::One);
        let row = csr.row(2).unwrap();
        assert_eq!(row.indices().to_vec().unwrap(), vec![1, 2]);
        assert_eq!(row.to_dense().unwrap(), vec![4.0, 5.0, 0.0]);

        let col = csr.column(2, &HostFallback).unwrap();
        assert_eq!(col.to_dense().unwrap(), vec![2.0, 3.0, 0.0]);
        assert_eq!(col.index_base(), IndexBase::One);
    }

    #[test]
    fn test_select_whole_matrix() {
        let csr = sample(IndexBase::Zero);
        let sel = csr.select(Slice::All, Slice::All, &HostFallback).unwrap();
        let Some(SparseArray::Csr(copy)) = sel.into_matrix() else {
            panic!("expected a CSR copy");
        };
        assert_eq!(copy.to_dense().unwrap(), csr.to_dense().unwrap());

        let sel = csr.select(Slice::Index(1), Slice::Index(2), &HostFallback).unwrap();
        assert_eq!(sel.into_scalar(), Some(3.0));
    }
}
