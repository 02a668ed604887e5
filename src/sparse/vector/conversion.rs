//! Sparse vector conversions: host <-> device, vector <-> single-column CSC

use super::SparseVectorData;
use crate::buffer::DeviceBuffer;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::host::{HostCscMatrix, HostSparseVector};
use crate::runtime::Runtime;
use crate::sparse::{CscData, IndexBase, SparseStorage};

impl<R: Runtime, T: Element> SparseVectorData<R, T> {
    /// Upload a host sparse vector
    ///
    /// Indices are recast to the device index type in the requested
    /// convention; the nonzero count is the length of the value array.
    pub fn from_host(
        host: &HostSparseVector<T>,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        let indices = index_base.encode_all(host.indices())?;
        Ok(Self {
            indices: DeviceBuffer::from_slice(&indices, device)?,
            values: DeviceBuffer::from_slice(host.values(), device)?,
            shape: [host.len()],
            index_base,
        })
    }

    /// Upload a single-column host matrix as a vector
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless the matrix has exactly one column.
    pub fn from_host_matrix(
        host: &HostCscMatrix<T>,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        if host.ncols() != 1 {
            return Err(Error::invalid_argument(
                "host",
                format!("expected a single column, got {} columns", host.ncols()),
            ));
        }
        Self::from_host(&host.column(0)?, index_base, device)
    }

    /// Reinterpret a single-column device CSC matrix as a vector
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless the matrix has exactly one column.
    pub fn from_csc(csc: &CscData<R, T>) -> Result<Self> {
        if csc.ncols() != 1 {
            return Err(Error::invalid_argument(
                "csc",
                format!("expected a single column, got {} columns", csc.ncols()),
            ));
        }
        csc.column(0)
    }

    /// Download to a host sparse vector
    pub fn to_host(&self) -> Result<HostSparseVector<T>> {
        let indices = self
            .index_base
            .decode_all("vector", &self.indices.to_vec()?)?;
        HostSparseVector::new(self.len(), indices, self.values.to_vec()?)
    }

    /// Download as a dense host vector
    pub fn to_dense(&self) -> Result<Vec<T>> {
        Ok(self.to_host()?.to_dense())
    }

    /// Single-column CSC matrix holding this vector
    ///
    /// The column pointers are `[base, nnz + base]`; the index and value
    /// arrays are copied on the device.
    pub fn to_csc(&self) -> Result<CscData<R, T>> {
        let col_ptrs = [
            self.index_base.encode(0)?,
            self.index_base.encode(self.nnz())?,
        ];
        CscData::new(
            DeviceBuffer::from_slice(&col_ptrs, self.device())?,
            self.indices.try_clone()?,
            self.values.try_clone()?,
            [self.len(), 1],
            self.index_base,
        )
    }
}
