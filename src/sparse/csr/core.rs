//! Core CSR implementation: struct, creation, getters, copy

use crate::buffer::DeviceBuffer;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::host::compressed;
use crate::runtime::Runtime;
use std::fmt;

use super::super::format::{SparseFormat, SparseStorage};
use super::super::index::{DeviceIndex, IndexBase};
use super::super::utils;

/// CSR (Compressed Sparse Row) sparse matrix with device-resident arrays
#[derive(Debug)]
pub struct CsrData<R: Runtime, T: Element> {
    pub(crate) row_ptrs: DeviceBuffer<R, DeviceIndex>,
    pub(crate) col_indices: DeviceBuffer<R, DeviceIndex>,
    pub(crate) values: DeviceBuffer<R, T>,
    pub(crate) shape: [usize; 2],
    pub(crate) index_base: IndexBase,
}

impl<R: Runtime, T: Element> CsrData<R, T> {
    /// Create a new CSR matrix from device buffers
    ///
    /// # Arguments
    ///
    /// * `row_ptrs` - Row pointers (length: nrows + 1)
    /// * `col_indices` - Column index of each stored entry
    /// * `values` - Value of each stored entry
    /// * `shape` - Matrix shape [nrows, ncols]
    /// * `index_base` - Convention of the stored pointers and indices
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - row_ptrs length != nrows + 1
    /// - col_indices and values have different lengths
    pub fn new(
        row_ptrs: DeviceBuffer<R, DeviceIndex>,
        col_indices: DeviceBuffer<R, DeviceIndex>,
        values: DeviceBuffer<R, T>,
        shape: [usize; 2],
        index_base: IndexBase,
    ) -> Result<Self> {
        let [nrows, _ncols] = shape;
        let nnz = values.len();

        let ptrs_len = compressed::ptrs_len(nrows)?;
        if row_ptrs.len() != ptrs_len {
            return Err(Error::shape_mismatch(&[ptrs_len], &[row_ptrs.len()]));
        }

        if col_indices.len() != nnz {
            return Err(Error::shape_mismatch(&[nnz], &[col_indices.len()]));
        }

        Ok(Self {
            row_ptrs,
            col_indices,
            values,
            shape,
            index_base,
        })
    }

    /// Create CSR matrix from 0-based host slices, checking the full structure
    pub fn from_slices(
        row_ptrs: &[usize],
        col_indices: &[usize],
        values: &[T],
        shape: [usize; 2],
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        let [nrows, ncols] = shape;
        compressed::validate("CSR", nrows, ncols, row_ptrs, col_indices, values.len())?;
        Self::upload(row_ptrs, col_indices, values, shape, index_base, device)
    }

    /// Create a CSR matrix with no stored entries
    pub fn empty(shape: [usize; 2], index_base: IndexBase, device: &R::Device) -> Result<Self> {
        let [nrows, _ncols] = shape;
        let base = index_base.encode(0)?;
        Ok(Self {
            row_ptrs: DeviceBuffer::from_slice(&vec![base; compressed::ptrs_len(nrows)?], device)?,
            col_indices: DeviceBuffer::empty(device),
            values: DeviceBuffer::empty(device),
            shape,
            index_base,
        })
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.shape[0]
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.shape[1]
    }

    /// Returns the row pointers buffer
    pub fn row_ptrs(&self) -> &DeviceBuffer<R, DeviceIndex> {
        &self.row_ptrs
    }

    /// Returns the column indices buffer
    pub fn col_indices(&self) -> &DeviceBuffer<R, DeviceIndex> {
        &self.col_indices
    }

    /// Returns the values buffer
    pub fn values(&self) -> &DeviceBuffer<R, T> {
        &self.values
    }

    /// Returns the device holding the buffers
    pub fn device(&self) -> &R::Device {
        self.values.device()
    }

    /// Download pointers and indices as 0-based positions, plus values
    pub(crate) fn host_parts(&self) -> Result<(Vec<usize>, Vec<usize>, Vec<T>)> {
        let row_ptrs = self
            .index_base
            .decode_all("CSR", &self.row_ptrs.to_vec()?)?;
        let col_indices = self
            .index_base
            .decode_all("CSR", &self.col_indices.to_vec()?)?;
        Ok((row_ptrs, col_indices, self.values.to_vec()?))
    }

    /// Downloaded parts, checked against the full invariant
    pub(crate) fn checked_host_parts(&self) -> Result<(Vec<usize>, Vec<usize>, Vec<T>)> {
        let (row_ptrs, col_indices, values) = self.host_parts()?;
        compressed::validate(
            "CSR",
            self.nrows(),
            self.ncols(),
            &row_ptrs,
            &col_indices,
            values.len(),
        )?;
        Ok((row_ptrs, col_indices, values))
    }

    /// Download the structure and check the full invariant
    pub fn validate(&self) -> Result<()> {
        self.checked_host_parts().map(|_| ())
    }

    /// Deep copy on the same device
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            row_ptrs: self.row_ptrs.try_clone()?,
            col_indices: self.col_indices.try_clone()?,
            values: self.values.try_clone()?,
            shape: self.shape,
            index_base: self.index_base,
        })
    }

    /// Same shape and sparsity pattern, zero-initialized values
    pub fn similar(&self) -> Result<Self> {
        Ok(Self {
            row_ptrs: self.row_ptrs.try_clone()?,
            col_indices: self.col_indices.try_clone()?,
            values: DeviceBuffer::zeros(self.nnz(), self.device())?,
            shape: self.shape,
            index_base: self.index_base,
        })
    }

    /// Overwrite this matrix with the structure and values of `src`
    ///
    /// # Errors
    ///
    /// Returns `InconsistentSize` if the shapes differ.
    pub fn copy_from(&mut self, src: &Self) -> Result<()> {
        if self.shape != src.shape {
            return Err(Error::inconsistent_size(&self.shape, &src.shape));
        }
        self.row_ptrs.copy_from(&src.row_ptrs)?;
        self.col_indices.copy_from(&src.col_indices)?;
        self.values.copy_from(&src.values)?;
        self.index_base = src.index_base;
        Ok(())
    }

    /// Copy with stored pointers and indices rewritten in another convention
    pub fn with_index_base(&self, index_base: IndexBase) -> Result<Self> {
        if index_base == self.index_base {
            return self.try_clone();
        }
        let (row_ptrs, col_indices, values) = self.host_parts()?;
        Self::upload(
            &row_ptrs,
            &col_indices,
            &values,
            self.shape,
            index_base,
            self.device(),
        )
    }
}

impl<R: Runtime, T: Element> SparseStorage for CsrData<R, T> {
    fn format(&self) -> SparseFormat {
        SparseFormat::Csr
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn dtype(&self) -> DType {
        T::DTYPE
    }

    fn index_base(&self) -> IndexBase {
        self.index_base
    }

    fn memory_usage(&self) -> usize {
        self.row_ptrs.size_in_bytes() + self.col_indices.size_in_bytes() + self.values.size_in_bytes()
    }
}

impl<R: Runtime, T: Element> fmt::Display for CsrData<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::fmt_header::<R, T>(f, &self.shape, "CsrData", self.device(), self.nnz())?;
        match self.to_host() {
            Ok(host) if host.nnz() > 0 => {
                writeln!(f, ":")?;
                host.fmt_entries(f)
            }
            Ok(_) => Ok(()),
            Err(err) => write!(f, ":\n  <{}>", err),
        }
    }
}
