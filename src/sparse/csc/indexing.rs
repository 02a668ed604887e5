//! CSC element and slice access

use super::CscData;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::sparse::utils;
use crate::sparse::{
    ConversionBackend, Selection, Slice, SparseArray, SparseStorage, SparseVectorData,
};

impl<R: Runtime, T: Element> CscData<R, T> {
    /// Value at 0-based `(row, col)`, zero if nothing is stored there
    ///
    /// Transfers two column pointers and the column's row indices.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_position(row, col)?;
        let segment = utils::segment("CSC", &self.col_ptrs, col, self.index_base)?;
        let target = self.index_base.encode(row)?;
        match utils::search_segment(&self.row_indices, segment, target)? {
            Some(pos) => self.values.read_at(pos),
            None => Ok(T::zero()),
        }
    }

    /// Column `col` as a sparse vector
    ///
    /// Copies the column's sub-range of the index and value arrays on the
    /// device. The result keeps this matrix's index base.
    pub fn column(&self, col: usize) -> Result<SparseVectorData<R, T>> {
        if col >= self.ncols() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.ncols(),
            });
        }
        let segment = utils::segment("CSC", &self.col_ptrs, col, self.index_base)?;
        SparseVectorData::new(
            self.row_indices.slice(segment.clone())?,
            self.values.slice(segment)?,
            self.nrows(),
            self.index_base,
        )
    }

    /// Row `row` as a sparse vector
    ///
    /// Rows are not contiguous in CSC, so this converts the whole matrix to
    /// CSR through `backend` first. O(nnz) per call.
    pub fn row<B: ConversionBackend<R>>(
        &self,
        row: usize,
        backend: &B,
    ) -> Result<SparseVectorData<R, T>> {
        if row >= self.nrows() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.nrows(),
            });
        }
        tracing::debug!(
            row,
            nnz = self.nnz(),
            "CSC row access falls back to a full CSR conversion"
        );
        self.to_csr(backend)?.row(row)
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
            (Slice::Index(i), Slice::All) => self.row(i, backend).map(Selection::Vector),
            (Slice::All, Slice::Index(j)) => self.column(j).map(Selection::Vector),
            (Slice::All, Slice::All) => Ok(Selection::Matrix(SparseArray::Csc(self.try_clone()?))),
        }
    }

    fn check_position(&self, row: usize, col: usize) -> Result<()> {
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DeviceBuffer;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    use crate::sparse::{HostFallback, IndexBase};

    // One-based 3×3:
    // [0, 7, 0]
    // [5, 0, 0]
    // [0, 0, 9]
    fn one_based() -> CscData<CpuRuntime, f64> {
        let device = CpuDevice::new();
        CscData::new(
            DeviceBuffer::from_slice(&[1, 2, 3, 4], &device).unwrap(),
            DeviceBuffer::from_slice(&[2, 1, 3], &device).unwrap(),
            DeviceBuffer::from_slice(&[5.0, 7.0, 9.0], &device).unwrap(),
            [3, 3],
            IndexBase::One,
        )
        .unwrap()
    }

    #[test]
    fn test_get_one_based() {
        let csc = one_based();
        assert_eq!(csc.get(1, 0).unwrap(), 5.0);
        assert_eq!(csc.get(0, 1).unwrap(), 7.0);
        assert_eq!(csc.get(2, 2).unwrap(), 9.0);
        assert_eq!(csc.get(0, 0).unwrap(), 0.0);
        assert_eq!(csc.get(2, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let csc = one_based();
        assert!(csc.get(3, 0).unwrap_err().is_bounds());
        assert!(csc.get(0, 3).unwrap_err().is_bounds());
    }

    #[test]
    fn test_get_empty_column() {
        let device = CpuDevice::new();
        let csc = CscData::<CpuRuntime, f32>::from_slices(
            &[0, 1, 1, 2],
            &[0, 2],
            &[1.0, 2.0],
            [3, 3],
            IndexBase::Zero,
            &device,
        )
        .unwrap();
        for i in 0..3 {
            assert_eq!(csc.get(i, 1).unwrap(), 0.0);
        }
        assert_eq!(csc.get(2, 2).unwrap(), 2.0);
    }

    #[test]
    fn test_column_is_native_slice() {
        let csc = one_based();
        let col = csc.column(0).unwrap();
        assert_eq!(col.len(), 3);
        assert_eq!(col.index_base(), IndexBase::One);
        assert_eq!(col.indices().to_vec().unwrap(), vec![2]);
        assert_eq!(col.to_dense().unwrap(), vec![0.0, 5.0, 0.0]);
        assert!(csc.column(3).unwrap_err().is_bounds());
    }

    #[test]
    fn test_row_through_backend() {
        let csc = one_based();
        let row = csc.row(0, &HostFallback).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.to_dense().unwrap(), vec![0.0, 7.0, 0.0]);
        assert!(csc.row(5, &HostFallback).unwrap_err().is_bounds());
    }

    #[test]
    fn test_select() {
        let csc = one_based();
        let b = HostFallback;

        let s = csc.select(Slice::Index(1), Slice::Index(0), &b).unwrap();
        assert_eq!(s.into_scalar(), Some(5.0));

        let s = csc.select(Slice::All, Slice::Index(2), &b).unwrap();
        assert_eq!(s.into_vector().unwrap().to_dense().unwrap(), vec![0.0, 0.0, 9.0]);

        let s = csc.select(Slice::Index(2), Slice::All, &b).unwrap();
        assert_eq!(s.into_vector().unwrap().to_dense().unwrap(), vec![0.0, 0.0, 9.0]);

        let s = csc.select(Slice::All, Slice::All, &b).unwrap();
        match s.into_matrix() {
            Some(SparseArray::Csc(copy)) => {
                assert_eq!(copy.to_host().unwrap(), csc.to_host().unwrap());
                assert_ne!(copy.values().ptr(), csc.values().ptr());
            }
            other => panic!("expected a CSC copy, got {:?}", other),
        }
    }
}
