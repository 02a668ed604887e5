//! Conversion backend: the seam to an external sparse library
//!
//! Switching the compressed axis (CSC <-> CSR) and blocking (CSR <-> BSR) are
//! routines a vendor sparse library provides on the device. Containers never
//! call such a library directly; they take a [`ConversionBackend`] and let it
//! produce the converted container.
//!
//! # Contract
//!
//! Every method receives a container satisfying its format invariant and
//! returns a container that
//! - has the same shape and the same index base as the input,
//! - represents the same matrix (every position holds the same value),
//! - lives on the same device,
//! - stores sorted indices within each segment.
//!
//! `csr_to_bsr` materializes every block that holds at least one stored
//! entry as a dense `block_dim × block_dim` block, filling the remaining
//! positions with zero. `bsr_to_csr` keeps every entry of every stored block,
//! including explicit zeros.
//!
//! # Implementations
//!
//! - [`HostFallback`]: works with any runtime by downloading the input,
//!   converting on the host, and uploading the result.
//! - [`CpuClient`](crate::runtime::cpu::CpuClient): the CPU runtime's client,
//!   converting in place in host memory.

mod fallback;

pub use fallback::HostFallback;
pub(crate) use fallback::bsr_to_csr_host;

use super::format::BlockDirection;
use super::{BsrData, CscData, CsrData};
use crate::dtype::Element;
use crate::error::Result;
use crate::runtime::Runtime;

/// Device-side format conversions supplied by an external sparse library
pub trait ConversionBackend<R: Runtime> {
    /// Convert CSR to CSC (re-sort by column)
    fn csr_to_csc<T: Element>(&self, csr: &CsrData<R, T>) -> Result<CscData<R, T>>;

    /// Convert CSC to CSR (re-sort by row)
    fn csc_to_csr<T: Element>(&self, csc: &CscData<R, T>) -> Result<CsrData<R, T>>;

    /// Group CSR entries into dense `block_dim × block_dim` blocks
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `block_dim == 0`.
    fn csr_to_bsr<T: Element>(
        &self,
        csr: &CsrData<R, T>,
        block_dim: usize,
        direction: BlockDirection,
    ) -> Result<BsrData<R, T>>;

    /// Expand BSR blocks into scalar CSR entries
    fn bsr_to_csr<T: Element>(&self, bsr: &BsrData<R, T>) -> Result<CsrData<R, T>>;
}
