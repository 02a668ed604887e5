//! Core BSR implementation: struct, creation, getters, copy

use crate::buffer::DeviceBuffer;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::host::compressed;
use crate::runtime::Runtime;
use std::fmt;

use super::super::format::{BlockDirection, SparseFormat, SparseStorage};
use super::super::index::{DeviceIndex, IndexBase};
use super::super::utils;

/// BSR (Block Compressed Sparse Row) matrix with device-resident arrays
///
/// The unit of storage is a dense `block_dim × block_dim` block. The matrix
/// is covered by `ceil(nrows / block_dim)` block rows and
/// `ceil(ncols / block_dim)` block columns; blocks on the last block row or
/// column are padded when the shape is not a multiple of `block_dim`.
///
/// `values` holds `nnzb * block_dim²` elements, one block after another,
/// each laid out according to `direction`.
#[derive(Debug)]
pub struct BsrData<R: Runtime, T: Element> {
    pub(crate) row_ptrs: DeviceBuffer<R, DeviceIndex>,
    pub(crate) col_indices: DeviceBuffer<R, DeviceIndex>,
    pub(crate) values: DeviceBuffer<R, T>,
    pub(crate) shape: [usize; 2],
    pub(crate) block_dim: usize,
    pub(crate) direction: BlockDirection,
    pub(crate) index_base: IndexBase,
}

impl<R: Runtime, T: Element> BsrData<R, T> {
    /// Create a new BSR matrix from device buffers
    ///
    /// # Arguments
    ///
    /// * `row_ptrs` - Block row pointers (length: ceil(nrows / block_dim) + 1)
    /// * `col_indices` - Block column of each stored block
    /// * `values` - Block contents (length: nnzb * block_dim²)
    /// * `shape` - Matrix shape [nrows, ncols]
    /// * `block_dim` - Side length of every block
    /// * `direction` - Element order inside each block
    /// * `index_base` - Convention of the stored pointers and indices
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - block_dim == 0
    /// - row_ptrs length != ceil(nrows / block_dim) + 1
    /// - values length != col_indices length * block_dim²
    pub fn new(
        row_ptrs: DeviceBuffer<R, DeviceIndex>,
        col_indices: DeviceBuffer<R, DeviceIndex>,
        values: DeviceBuffer<R, T>,
        shape: [usize; 2],
        block_dim: usize,
        direction: BlockDirection,
        index_base: IndexBase,
    ) -> Result<Self> {
        let block_size = compressed::block_size(block_dim)?;
        let ptrs_len = compressed::ptrs_len(shape[0].div_ceil(block_dim))?;

        if row_ptrs.len() != ptrs_len {
            return Err(Error::shape_mismatch(&[ptrs_len], &[row_ptrs.len()]));
        }

        let expected = col_indices.len().checked_mul(block_size).ok_or_else(|| {
            Error::invalid_argument("col_indices", "block count times block size overflows")
        })?;
        if values.len() != expected {
            return Err(Error::shape_mismatch(&[expected], &[values.len()]));
        }

        Ok(Self {
            row_ptrs,
            col_indices,
            values,
            shape,
            block_dim,
            direction,
            index_base,
        })
    }

    /// Create BSR matrix from 0-based host slices, checking the full structure
    #[allow(clippy::too_many_arguments)]
    pub fn from_slices(
        row_ptrs: &[usize],
        col_indices: &[usize],
        values: &[T],
        shape: [usize; 2],
        block_dim: usize,
        direction: BlockDirection,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        compressed::block_size(block_dim)?;
        let [mb, nb] = block_grid(shape, block_dim);
        compressed::validate("BSR", mb, nb, row_ptrs, col_indices, col_indices.len())?;
        Self::upload(
            row_ptrs,
            col_indices,
            values,
            shape,
            block_dim,
            direction,
            index_base,
            device,
        )
    }

    /// Upload trusted 0-based arrays, encoding them in `index_base`
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn upload(
        row_ptrs: &[usize],
        col_indices: &[usize],
        values: &[T],
        shape: [usize; 2],
        block_dim: usize,
        direction: BlockDirection,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        Self::new(
            DeviceBuffer::from_slice(&index_base.encode_all(row_ptrs)?, device)?,
            DeviceBuffer::from_slice(&index_base.encode_all(col_indices)?, device)?,
            DeviceBuffer::from_slice(values, device)?,
            shape,
            block_dim,
            direction,
            index_base,
        )
    }

    /// Create a BSR matrix with no stored blocks
    pub fn empty(
        shape: [usize; 2],
        block_dim: usize,
        direction: BlockDirection,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        compressed::block_size(block_dim)?;
        let [mb, _] = block_grid(shape, block_dim);
        let base = index_base.encode(0)?;
        Ok(Self {
            row_ptrs: DeviceBuffer::from_slice(&vec![base; compressed::ptrs_len(mb)?], device)?,
            col_indices: DeviceBuffer::empty(device),
            values: DeviceBuffer::empty(device),
            shape,
            block_dim,
            direction,
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

    /// Number of stored blocks
    pub fn nnzb(&self) -> usize {
        self.col_indices.len()
    }

    /// Side length of every block
    pub fn block_dim(&self) -> usize {
        self.block_dim
    }

    /// Element order inside each block
    pub fn direction(&self) -> BlockDirection {
        self.direction
    }

    /// Returns the block row pointers buffer
    pub fn row_ptrs(&self) -> &DeviceBuffer<R, DeviceIndex> {
        &self.row_ptrs
    }

    /// Returns the block column indices buffer
    pub fn col_indices(&self) -> &DeviceBuffer<R, DeviceIndex> {
        &self.col_indices
    }

    /// Returns the block values buffer
    pub fn values(&self) -> &DeviceBuffer<R, T> {
        &self.values
    }

    /// Returns the device holding the buffers
    pub fn device(&self) -> &R::Device {
        self.values.device()
    }

    pub(crate) fn host_parts(&self) -> Result<(Vec<usize>, Vec<usize>, Vec<T>)> {
        let row_ptrs = self
            .index_base
            .decode_all("BSR", &self.row_ptrs.to_vec()?)?;
        let col_indices = self
            .index_base
            .decode_all("BSR", &self.col_indices.to_vec()?)?;
        Ok((row_ptrs, col_indices, self.values.to_vec()?))
    }

    /// Downloaded block parts, checked against the full invariant
    pub(crate) fn checked_host_parts(&self) -> Result<(Vec<usize>, Vec<usize>, Vec<T>)> {
        let (row_ptrs, col_indices, blocks) = self.host_parts()?;
        let [mb, nb] = block_grid(self.shape, self.block_dim);
        compressed::validate("BSR", mb, nb, &row_ptrs, &col_indices, col_indices.len())?;
        Ok((row_ptrs, col_indices, blocks))
    }

    /// Download the block structure and check the full invariant
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
            block_dim: self.block_dim,
            direction: self.direction,
            index_base: self.index_base,
        })
    }

    /// Same shape and block pattern, zero-initialized blocks
    pub fn similar(&self) -> Result<Self> {
        Ok(Self {
            row_ptrs: self.row_ptrs.try_clone()?,
            col_indices: self.col_indices.try_clone()?,
            values: DeviceBuffer::zeros(self.values.len(), self.device())?,
            shape: self.shape,
            block_dim: self.block_dim,
            direction: self.direction,
            index_base: self.index_base,
        })
    }

    /// Overwrite this matrix with the structure and values of `src`
    ///
    /// Block dimension and direction are taken from `src` as well.
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
        self.block_dim = src.block_dim;
        self.direction = src.direction;
        self.index_base = src.index_base;
        Ok(())
    }

    /// Copy with stored pointers and indices rewritten in another convention
    pub fn with_index_base(&self, index_base: IndexBase) -> Result<Self> {
        if index_base == self.index_base {
            return self.try_clone();
        }
        let (row_ptrs, col_indices, _) = self.host_parts()?;
        Ok(Self {
            row_ptrs: DeviceBuffer::from_slice(&index_base.encode_all(&row_ptrs)?, self.device())?,
            col_indices: DeviceBuffer::from_slice(
                &index_base.encode_all(&col_indices)?,
                self.device(),
            )?,
            values: self.values.try_clone()?,
            shape: self.shape,
            block_dim: self.block_dim,
            direction: self.direction,
            index_base,
        })
    }
}

/// `[block rows, block columns]` covering `shape`
fn block_grid(shape: [usize; 2], block_dim: usize) -> [usize; 2] {
    [shape[0].div_ceil(block_dim), shape[1].div_ceil(block_dim)]
}

impl<R: Runtime, T: Element> SparseStorage for BsrData<R, T> {
    fn format(&self) -> SparseFormat {
        SparseFormat::Bsr
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Stored scalar entries, `nnzb * block_dim²`, padding included
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

impl<R: Runtime, T: Element> fmt::Display for BsrData<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::fmt_header::<R, T>(f, &self.shape, "BsrData", self.device(), self.nnz())?;
        write!(f, " in {}×{} blocks", self.block_dim, self.block_dim)?;
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
