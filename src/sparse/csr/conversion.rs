//! CSR conversions: host <-> device, CSR <-> CSC, CSR <-> BSR

use super::CsrData;
use crate::buffer::DeviceBuffer;
use crate::dtype::Element;
use crate::error::Result;
use crate::host::{HostCscMatrix, compressed};
use crate::runtime::Runtime;
use crate::sparse::format::BlockDirection;
use crate::sparse::{BsrData, ConversionBackend, CscData, IndexBase, SparseStorage};

impl<R: Runtime, T: Element> CsrData<R, T> {
    /// Upload trusted 0-based arrays, encoding them in `index_base`
    pub(crate) fn upload(
        row_ptrs: &[usize],
        col_indices: &[usize],
        values: &[T],
        shape: [usize; 2],
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        Self::new(
            DeviceBuffer::from_slice(&index_base.encode_all(row_ptrs)?, device)?,
            DeviceBuffer::from_slice(&index_base.encode_all(col_indices)?, device)?,
            DeviceBuffer::from_slice(values, device)?,
            shape,
            index_base,
        )
    }

    /// Upload a host CSC matrix as CSR
    ///
    /// The matrix is uploaded column-compressed and switched to rows by
    /// `backend`.
    pub fn from_host<B: ConversionBackend<R>>(
        host: &HostCscMatrix<T>,
        index_base: IndexBase,
        device: &R::Device,
        backend: &B,
    ) -> Result<Self> {
        CscData::from_host(host, index_base, device)?.to_csr(backend)
    }

    /// Download to a host CSC matrix
    ///
    /// Row pointers are expanded into one row index per stored entry and the
    /// resulting triplets go through [`HostCscMatrix::from_triplets`].
    pub fn to_host(&self) -> Result<HostCscMatrix<T>> {
        let (row_ptrs, col_indices, values) = self.checked_host_parts()?;
        let rows = compressed::expand_ptrs(&row_ptrs);
        HostCscMatrix::from_triplets(self.nrows(), self.ncols(), &rows, &col_indices, &values)
    }

    /// Download as a row-major dense array
    pub fn to_dense(&self) -> Result<Vec<T>> {
        Ok(self.to_host()?.to_dense())
    }

    /// Convert to CSC through `backend`
    pub fn to_csc<B: ConversionBackend<R>>(&self, backend: &B) -> Result<CscData<R, T>> {
        tracing::debug!(shape = ?self.shape(), nnz = self.nnz(), "CSR -> CSC");
        backend.csr_to_csc(self)
    }

    /// Convert from CSC through `backend`
    pub fn from_csc<B: ConversionBackend<R>>(csc: &CscData<R, T>, backend: &B) -> Result<Self> {
        csc.to_csr(backend)
    }

    /// Group entries into dense `block_dim × block_dim` blocks through `backend`
    pub fn to_bsr<B: ConversionBackend<R>>(
        &self,
        block_dim: usize,
        direction: BlockDirection,
        backend: &B,
    ) -> Result<BsrData<R, T>> {
        BsrData::from_csr(self, block_dim, direction, backend)
    }
}
