//! Format conversions for the CPU runtime
//!
//! CPU device memory is host memory, so the host conversion routines run
//! directly on the container arrays; there is no separate device library to
//! call.

use super::{CpuClient, CpuRuntime};
use crate::dtype::Element;
use crate::error::Result;
use crate::sparse::{BlockDirection, BsrData, ConversionBackend, CscData, CsrData, HostFallback};

impl ConversionBackend<CpuRuntime> for CpuClient {
    fn csr_to_csc<T: Element>(
        &self,
        csr: &CsrData<CpuRuntime, T>,
    ) -> Result<CscData<CpuRuntime, T>> {
        HostFallback.csr_to_csc(csr)
    }

    fn csc_to_csr<T: Element>(
        &self,
        csc: &CscData<CpuRuntime, T>,
    ) -> Result<CsrData<CpuRuntime, T>> {
        HostFallback.csc_to_csr(csc)
    }

    fn csr_to_bsr<T: Element>(
        &self,
        csr: &CsrData<CpuRuntime, T>,
        block_dim: usize,
        direction: BlockDirection,
    ) -> Result<BsrData<CpuRuntime, T>> {
        HostFallback.csr_to_bsr(csr, block_dim, direction)
    }

    fn bsr_to_csr<T: Element>(
        &self,
        bsr: &BsrData<CpuRuntime, T>,
    ) -> Result<CsrData<CpuRuntime, T>> {
        HostFallback.bsr_to_csr(bsr)
    }
}
