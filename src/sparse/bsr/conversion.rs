//! BSR conversions: host <-> device, BSR <-> CSR

use super::BsrData;
use crate::dtype::Element;
use crate::error::Result;
use crate::host::{HostCscMatrix, compressed};
use crate::runtime::Runtime;
use crate::sparse::backend::bsr_to_csr_host;
use crate::sparse::format::BlockDirection;
use crate::sparse::{ConversionBackend, CsrData, IndexBase, SparseStorage};

impl<R: Runtime, T: Element> BsrData<R, T> {
    /// Upload a host matrix as BSR
    ///
    /// The matrix goes to the device as CSC and reaches BSR through CSR, both
    /// steps on `backend`.
    pub fn from_host<B: ConversionBackend<R>>(
        host: &HostCscMatrix<T>,
        block_dim: usize,
        direction: BlockDirection,
        index_base: IndexBase,
        device: &R::Device,
        backend: &B,
    ) -> Result<Self> {
        let csr = CsrData::from_host(host, index_base, device, backend)?;
        Self::from_csr(&csr, block_dim, direction, backend)
    }

    /// Download to a host CSC matrix
    ///
    /// Every element of every stored block becomes a stored entry, so zeros
    /// inside blocks are kept explicitly. Padding outside the matrix shape is
    /// dropped.
    pub fn to_host(&self) -> Result<HostCscMatrix<T>> {
        let (block_ptrs, block_cols, blocks) = self.checked_host_parts()?;
        let (row_ptrs, col_indices, values) = bsr_to_csr_host(
            self.nrows(),
            self.ncols(),
            &block_ptrs,
            &block_cols,
            &blocks,
            self.block_dim,
            self.direction,
        );
        let rows = compressed::expand_ptrs(&row_ptrs);
        HostCscMatrix::from_triplets(self.nrows(), self.ncols(), &rows, &col_indices, &values)
    }

    /// Download as a row-major dense array
    pub fn to_dense(&self) -> Result<Vec<T>> {
        Ok(self.to_host()?.to_dense())
    }

    /// Expand blocks into scalar CSR entries through `backend`
    pub fn to_csr<B: ConversionBackend<R>>(&self, backend: &B) -> Result<CsrData<R, T>> {
        tracing::debug!(
            shape = ?self.shape(),
            nnzb = self.nnzb(),
            block_dim = self.block_dim,
            "BSR -> CSR"
        );
        backend.bsr_to_csr(self)
    }

    /// Group CSR entries into blocks through `backend`
    pub fn from_csr<B: ConversionBackend<R>>(
        csr: &CsrData<R, T>,
        block_dim: usize,
        direction: BlockDirection,
        backend: &B,
    ) -> Result<Self> {
        tracing::debug!(shape = ?csr.shape(), nnz = csr.nnz(), block_dim, "CSR -> BSR");
        backend.csr_to_bsr(csr, block_dim, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    use crate::sparse::HostFallback;

    #[test]
    fn test_from_host_and_back() {
        let device = CpuDevice::new();
        let dense = [
            1.0f64, 0.0, 0.0, 0.0, 2.0, //
            0.0, 0.0, 3.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 0.0, 0.0, //
        ];
        let host = HostCscMatrix::from_dense(3, 5, &dense).unwrap();

        for direction in [BlockDirection::Row, BlockDirection::Column] {
            let bsr = BsrData::<CpuRuntime, f64>::from_host(
                &host,
                2,
                direction,
                IndexBase::One,
                &device,
                &HostFallback,
            )
            .unwrap();

            assert_eq!(bsr.shape(), &[3, 5]);
            assert_eq!(bsr.direction(), direction);
            // block row 0 touches block columns 0, 1, 2; block row 1 is empty
            assert_eq!(bsr.nnzb(), 3);
            assert_eq!(bsr.to_dense().unwrap(), dense.to_vec());

            let csr = bsr.to_csr(&HostFallback).unwrap();
            assert_eq!(csr.to_dense().unwrap(), dense.to_vec());
        }
    }

    #[test]
    fn test_to_host_keeps_block_zeros() {
        let device = CpuDevice::new();
        let bsr = BsrData::<CpuRuntime, f32>::from_slices(
            &[0, 1],
            &[0],
            &[1.0, 0.0, 0.0, 2.0],
            [2, 2],
            2,
            BlockDirection::Row,
            IndexBase::Zero,
            &device,
        )
        .unwrap();
        let host = bsr.to_host().unwrap();
        assert_eq!(host.nnz(), 4);
        assert_eq!(host.to_dense(), vec![1.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_from_csr_rejects_zero_block_dim() {
        let device = CpuDevice::new();
        let csr =
            CsrData::<CpuRuntime, f32>::empty([2, 2], IndexBase::Zero, &device).unwrap();
        let err = BsrData::from_csr(&csr, 0, BlockDirection::Row, &HostFallback).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "block_dim", .. }));
    }
}
