//! CSC conversions: host <-> device, CSC <-> CSR

use super::CscData;
use crate::buffer::DeviceBuffer;
use crate::dtype::Element;
use crate::error::Result;
use crate::host::{HostCscMatrix, HostSparseVector};
use crate::runtime::Runtime;
use crate::sparse::{ConversionBackend, CsrData, IndexBase, SparseStorage};

impl<R: Runtime, T: Element> CscData<R, T> {
    /// Upload trusted 0-based arrays, encoding them in `index_base`
    pub(crate) fn upload(
        col_ptrs: &[usize],
        row_indices: &[usize],
        values: &[T],
        shape: [usize; 2],
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        Self::new(
            DeviceBuffer::from_slice(&index_base.encode_all(col_ptrs)?, device)?,
            DeviceBuffer::from_slice(&index_base.encode_all(row_indices)?, device)?,
            DeviceBuffer::from_slice(values, device)?,
            shape,
            index_base,
        )
    }

    /// Upload a host CSC matrix
    pub fn from_host(
        host: &HostCscMatrix<T>,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        Self::upload(
            host.col_ptrs(),
            host.row_indices(),
            host.values(),
            host.shape(),
            index_base,
            device,
        )
    }

    /// Upload a host sparse vector as a single-column matrix
    ///
    /// The column pointers are `[0, nnz]` for zero-based storage and
    /// `[1, nnz + 1]` for one-based storage.
    pub fn from_host_vector(
        host: &HostSparseVector<T>,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        Self::from_host(&HostCscMatrix::from_vector(host), index_base, device)
    }

    /// Download to a host CSC matrix
    ///
    /// The downloaded structure is checked, so a matrix built with
    /// [`new`](Self::new) from malformed buffers reports `InvalidStructure`
    /// here.
    pub fn to_host(&self) -> Result<HostCscMatrix<T>> {
        let (col_ptrs, row_indices, values) = self.host_parts()?;
        HostCscMatrix::new(self.nrows(), self.ncols(), col_ptrs, row_indices, values)
    }

    /// Download as a row-major dense array
    pub fn to_dense(&self) -> Result<Vec<T>> {
        Ok(self.to_host()?.to_dense())
    }

    /// Convert to CSR through `backend`
    pub fn to_csr<B: ConversionBackend<R>>(&self, backend: &B) -> Result<CsrData<R, T>> {
        tracing::debug!(shape = ?self.shape(), nnz = self.nnz(), "CSC -> CSR");
        backend.csc_to_csr(self)
    }

    /// Convert from CSR through `backend`
    pub fn from_csr<B: ConversionBackend<R>>(csr: &CsrData<R, T>, backend: &B) -> Result<Self> {
        csr.to_csc(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    use crate::sparse::HostFallback;

    #[test]
    fn test_host_roundtrip() {
        let device = CpuDevice::new();
        let host = HostCscMatrix::from_triplets(
            4,
            3,
            &[3, 0, 1, 0, 2],
            &[0, 0, 1, 2, 2],
            &[1.5f64, -2.0, 3.0, 4.0, 0.25],
        )
        .unwrap();

        for base in [IndexBase::Zero, IndexBase::One] {
            let csc = CscData::<CpuRuntime, f64>::from_host(&host, base, &device).unwrap();
            assert_eq!(csc.nnz(), 5);
            assert_eq!(csc.to_host().unwrap(), host);
        }
    }

    #[test]
    fn test_from_host_vector() {
        let device = CpuDevice::new();
        let v = HostSparseVector::new(5, vec![0, 3], vec![2i32, 9]).unwrap();

        let one = CscData::<CpuRuntime, i32>::from_host_vector(&v, IndexBase::One, &device)
            .unwrap();
        assert_eq!(one.shape(), &[5, 1]);
        assert_eq!(one.col_ptrs().to_vec().unwrap(), vec![1, 3]);
        assert_eq!(one.row_indices().to_vec().unwrap(), vec![1, 4]);

        let zero = CscData::<CpuRuntime, i32>::from_host_vector(&v, IndexBase::Zero, &device)
            .unwrap();
        assert_eq!(zero.col_ptrs().to_vec().unwrap(), vec![0, 2]);
        assert_eq!(zero.to_dense().unwrap(), vec![2, 0, 0, 9, 0]);
    }

    #[test]
    fn test_to_host_detects_malformed_buffers() {
        let device = CpuDevice::new();
        let csc = CscData::<CpuRuntime, f32>::new(
            DeviceBuffer::from_slice(&[0, 3], &device).unwrap(),
            DeviceBuffer::from_slice(&[0, 1], &device).unwrap(),
            DeviceBuffer::from_slice(&[1.0, 2.0], &device).unwrap(),
            [2, 1],
            IndexBase::Zero,
        )
        .unwrap();
        assert!(csc.to_host().is_err());
    }

    #[test]
    fn test_csr_roundtrip_through_fallback() {
        let device = CpuDevice::new();
        let dense = [0.0f32, 1.0, 0.0, 2.0, 0.0, 3.0, 4.0, 0.0, 0.0, 5.0, 0.0, 6.0];
        let host = HostCscMatrix::from_dense(3, 4, &dense).unwrap();

        for base in [IndexBase::Zero, IndexBase::One] {
            let csc = CscData::<CpuRuntime, f32>::from_host(&host, base, &device).unwrap();
            let csr = csc.to_csr(&HostFallback).unwrap();
            assert_eq!(csr.index_base(), base);
            assert_eq!(csr.shape(), &[3, 4]);
            assert_eq!(csr.to_dense().unwrap(), dense.to_vec());

            let back = CscData::from_csr(&csr, &HostFallback).unwrap();
            assert_eq!(back.to_host().unwrap(), host);
        }
    }
}
