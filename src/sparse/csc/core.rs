//! Core CSC implementation: struct, creation, getters, copy

use crate::buffer::DeviceBuffer;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::host::{HostCscMatrix, compressed};
use crate::runtime::Runtime;
use std::fmt;

use super::super::format::{SparseFormat, SparseStorage};
use super::super::index::{DeviceIndex, IndexBase};
use super::super::utils;

/// CSC (Compressed Sparse Column) sparse matrix with device-resident arrays
#[derive(Debug)]
pub struct CscData<R: Runtime, T: Element> {
    pub(crate) col_ptrs: DeviceBuffer<R, DeviceIndex>,
    pub(crate) row_indices: DeviceBuffer<R, DeviceIndex>,
    pub(crate) values: DeviceBuffer<R, T>,
    pub(crate) shape: [usize; 2],
    pub(crate) index_base: IndexBase,
}

impl<R: Runtime, T: Element> CscData<R, T> {
    /// Create a new CSC matrix from device buffers
    ///
    /// # Arguments
    ///
    /// * `col_ptrs` - Column pointers (length: ncols + 1)
    /// * `row_indices` - Row index of each stored entry
    /// * `values` - Value of each stored entry
    /// * `shape` - Matrix shape [nrows, ncols]
    /// * `index_base` - Convention of the stored pointers and indices
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - col_ptrs length != ncols + 1
    /// - row_indices and values have different lengths
    ///
    /// Ordering is not checked here; see [`validate`](Self::validate).
    pub fn new(
        col_ptrs: DeviceBuffer<R, DeviceIndex>,
        row_indices: DeviceBuffer<R, DeviceIndex>,
        values: DeviceBuffer<R, T>,
        shape: [usize; 2],
        index_base: IndexBase,
    ) -> Result<Self> {
        let [_nrows, ncols] = shape;
        let nnz = values.len();

        let ptrs_len = compressed::ptrs_len(ncols)?;
        if col_ptrs.len() != ptrs_len {
            return Err(Error::shape_mismatch(&[ptrs_len], &[col_ptrs.len()]));
        }

        if row_indices.len() != nnz {
            return Err(Error::shape_mismatch(&[nnz], &[row_indices.len()]));
        }

        Ok(Self {
            col_ptrs,
            row_indices,
            values,
            shape,
            index_base,
        })
    }

    /// Create CSC matrix from 0-based host slices, checking the full structure
    pub fn from_slices(
        col_ptrs: &[usize],
        row_indices: &[usize],
        values: &[T],
        shape: [usize; 2],
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        let [nrows, ncols] = shape;
        let host = HostCscMatrix::new(
            nrows,
            ncols,
            col_ptrs.to_vec(),
            row_indices.to_vec(),
            values.to_vec(),
        )?;
        Self::from_host(&host, index_base, device)
    }

    /// Create a CSC matrix with no stored entries
    pub fn empty(shape: [usize; 2], index_base: IndexBase, device: &R::Device) -> Result<Self> {
        let [_nrows, ncols] = shape;
        let base = index_base.encode(0)?;
        Ok(Self {
            col_ptrs: DeviceBuffer::from_slice(&vec![base; compressed::ptrs_len(ncols)?], device)?,
            row_indices: DeviceBuffer::empty(device),
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

    /// Returns the column pointers buffer
    pub fn col_ptrs(&self) -> &DeviceBuffer<R, DeviceIndex> {
        &self.col_ptrs
    }

    /// Returns the row indices buffer
    pub fn row_indices(&self) -> &DeviceBuffer<R, DeviceIndex> {
        &self.row_indices
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
        let col_ptrs = self
            .index_base
            .decode_all("CSC", &self.col_ptrs.to_vec()?)?;
        let row_indices = self
            .index_base
            .decode_all("CSC", &self.row_indices.to_vec()?)?;
        Ok((col_ptrs, row_indices, self.values.to_vec()?))
    }

    /// [`host_parts`](Self::host_parts), failing with `InvalidStructure`
    /// unless the downloaded arrays satisfy the full invariant
    pub(crate) fn checked_host_parts(&self) -> Result<(Vec<usize>, Vec<usize>, Vec<T>)> {
        let (col_ptrs, row_indices, values) = self.host_parts()?;
        compressed::validate(
            "CSC",
            self.ncols(),
            self.nrows(),
            &col_ptrs,
            &row_indices,
            values.len(),
        )?;
        Ok((col_ptrs, row_indices, values))
    }

    /// Download the structure and check the full invariant
    pub fn validate(&self) -> Result<()> {
        self.checked_host_parts().map(|_| ())
    }

    /// Deep copy on the same device
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            col_ptrs: self.col_ptrs.try_clone()?,
            row_indices: self.row_indices.try_clone()?,
            values: self.values.try_clone()?,
            shape: self.shape,
            index_base: self.index_base,
        })
    }

    /// Same shape and sparsity pattern, zero-initialized values
    pub fn similar(&self) -> Result<Self> {
        Ok(Self {
            col_ptrs: self.col_ptrs.try_clone()?,
            row_indices: self.row_indices.try_clone()?,
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
        self.col_ptrs.copy_from(&src.col_ptrs)?;
        self.row_indices.copy_from(&src.row_indices)?;
        self.values.copy_from(&src.values)?;
        self.index_base = src.index_base;
        Ok(())
    }

    /// Copy with stored pointers and indices rewritten in another convention
    pub fn with_index_base(&self, index_base: IndexBase) -> Result<Self> {
        if index_base == self.index_base {
            return self.try_clone();
        }
        let (col_ptrs, row_indices, _) = self.host_parts()?;
        Ok(Self {
            col_ptrs: DeviceBuffer::from_slice(&index_base.encode_all(&col_ptrs)?, self.device())?,
            row_indices: DeviceBuffer::from_slice(
                &index_base.encode_all(&row_indices)?,
                self.device(),
            )?,
            values: self.values.try_clone()?,
            shape: self.shape,
            index_base,
        })
    }
}

impl<R: Runtime, T: Element> SparseStorage for CscData<R, T> {
    fn format(&self) -> SparseFormat {
        SparseFormat::Csc
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
        self.col_ptrs.size_in_bytes() + self.row_indices.size_in_bytes() + self.values.size_in_bytes()
    }
}

impl<R: Runtime, T: Element> fmt::Display for CscData<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::fmt_header::<R, T>(f, &self.shape, "CscData", self.device(), self.nnz())?;
        match self.to_host() {
            Ok(host) if host.nnz() > 0 => {
                writeln!(f, ":")?;
                host.fmt_entries(f)
            }
            Ok(_) => Ok(()),
            // a malformed container still renders, with the reason in place of entries
            Err(err) => write!(f, ":\n  <{}>", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    // Matrix:
    // [1, 0, 2]
    // [0, 0, 3]
    // [4, 5, 0]
    fn sample(base: IndexBase) -> CscData<CpuRuntime, f32> {
        let device = CpuDevice::new();
        CscData::from_slices(
            &[0, 2, 3, 5],
            &[0, 2, 2, 0, 1],
            &[1.0, 4.0, 5.0, 2.0, 3.0],
            [3, 3],
            base,
            &device,
        )
        .unwrap()
    }

    #[test]
    fn test_csc_creation() {
        let csc = sample(IndexBase::Zero);
        assert_eq!(csc.nnz(), 5);
        assert_eq!(csc.shape(), &[3, 3]);
        assert_eq!(csc.format(), SparseFormat::Csc);
        assert_eq!(csc.numel(), 9);
        // 4 col_ptrs * 4 bytes + 5 row_indices * 4 bytes + 5 values * 4 bytes
        assert_eq!(csc.memory_usage(), 56);
    }

    #[test]
    fn test_csc_one_based_storage() {
        let csc = sample(IndexBase::One);
        assert_eq!(csc.col_ptrs().to_vec().unwrap(), vec![1, 3, 4, 6]);
        assert_eq!(csc.row_indices().to_vec().unwrap(), vec![1, 3, 3, 1, 2]);
        csc.validate().unwrap();
    }

    #[test]
    fn test_csc_empty() {
        let device = CpuDevice::new();
        let csc = CscData::<CpuRuntime, f64>::empty([100, 200], IndexBase::One, &device).unwrap();

        assert_eq!(csc.nnz(), 0);
        assert!(csc.is_empty());
        assert_eq!(csc.col_ptrs().len(), 201); // ncols + 1
        assert_eq!(csc.col_ptrs().read_at(200).unwrap(), 1);
        csc.validate().unwrap();
    }

    #[test]
    fn test_csc_new_rejects_bad_lengths() {
        let device = CpuDevice::new();
        let col_ptrs = DeviceBuffer::from_slice(&[0, 1, 2], &device).unwrap();
        let row_indices = DeviceBuffer::from_slice(&[0, 1], &device).unwrap();
        let values = DeviceBuffer::from_slice(&[1.0f32, 2.0], &device).unwrap();
        // 3 columns need 4 pointers
        let err = CscData::<CpuRuntime, f32>::new(
            col_ptrs,
            row_indices,
            values,
            [2, 3],
            IndexBase::Zero,
        )
        .unwrap_err();
        assert_eq!(err, Error::shape_mismatch(&[4], &[3]));
    }

    #[test]
    fn test_csc_validate_detects_unsorted_rows() {
        let device = CpuDevice::new();
        let csc = CscData::<CpuRuntime, f32>::new(
            DeviceBuffer::from_slice(&[0, 2], &device).unwrap(),
            DeviceBuffer::from_slice(&[1, 0], &device).unwrap(),
            DeviceBuffer::from_slice(&[1.0, 2.0], &device).unwrap(),
            [2, 1],
            IndexBase::Zero,
        )
        .unwrap();
        assert!(matches!(
            csc.validate().unwrap_err(),
            Error::InvalidStructure { format: "CSC", .. }
        ));
    }

    #[test]
    fn test_csc_size_queries() {
        let device = CpuDevice::new();
        let csc = CscData::<CpuRuntime, f32>::empty([3, 5], IndexBase::Zero, &device).unwrap();
        assert_eq!(csc.size(1).unwrap(), 3);
        assert_eq!(csc.size(2).unwrap(), 5);
        assert_eq!(csc.size(3).unwrap(), 1);
        assert!(matches!(
            csc.size(0).unwrap_err(),
            Error::InvalidDimension { dim: 0 }
        ));
    }

    #[test]
    fn test_csc_copy_from_size_mismatch() {
        let device = CpuDevice::new();
        let src = sample(IndexBase::Zero);
        let mut dst = CscData::<CpuRuntime, f32>::empty([4, 4], IndexBase::Zero, &device).unwrap();
        assert!(dst.copy_from(&src).unwrap_err().is_size_mismatch());
    }

    #[test]
    fn test_csc_with_index_base() {
        let zero = sample(IndexBase::Zero);
        let one = zero.with_index_base(IndexBase::One).unwrap();
        assert_eq!(one.index_base(), IndexBase::One);
        assert_eq!(one.col_ptrs().to_vec().unwrap(), vec![1, 3, 4, 6]);
        assert_eq!(one.to_host().unwrap(), zero.to_host().unwrap());
    }

    #[test]
    fn test_csc_display() {
        let csc = sample(IndexBase::One);
        let text = csc.to_string();
        assert!(text.starts_with("3×3 CscData<f32> on cpu with 5 stored entries:\n"));
        assert!(text.contains("  [2, 1]  =  5"));
    }
}
