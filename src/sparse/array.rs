//! Closed sum type over the device containers

use super::format::{SparseFormat, SparseStorage};
use super::index::IndexBase;
use super::{BsrData, CscData, CsrData, SparseVectorData};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::host::HostCscMatrix;
use crate::runtime::Runtime;
use std::fmt;

/// Any device sparse container
///
/// Dispatch is one `match` deep; format-specific operations are reached by
/// matching on the variant.
#[derive(Debug)]
pub enum SparseArray<R: Runtime, T: Element> {
    /// Sparse vector
    Vector(SparseVectorData<R, T>),
    /// Compressed sparse column matrix
    Csc(CscData<R, T>),
    /// Compressed sparse row matrix
    Csr(CsrData<R, T>),
    /// Block compressed sparse row matrix
    Bsr(BsrData<R, T>),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            SparseArray::Vector($inner) => $body,
            SparseArray::Csc($inner) => $body,
            SparseArray::Csr($inner) => $body,
            SparseArray::Bsr($inner) => $body,
        }
    };
}

impl<R: Runtime, T: Element> SparseArray<R, T> {
    /// Returns the device holding the buffers
    pub fn device(&self) -> &R::Device {
        dispatch!(self, a => a.device())
    }

    /// Download the structure and check the full invariant
    pub fn validate(&self) -> Result<()> {
        dispatch!(self, a => a.validate())
    }

    /// Deep copy on the same device
    pub fn try_clone(&self) -> Result<Self> {
        Ok(match self {
            SparseArray::Vector(a) => SparseArray::Vector(a.try_clone()?),
            SparseArray::Csc(a) => SparseArray::Csc(a.try_clone()?),
            SparseArray::Csr(a) => SparseArray::Csr(a.try_clone()?),
            SparseArray::Bsr(a) => SparseArray::Bsr(a.try_clone()?),
        })
    }

    /// Same shape and sparsity pattern, zero-initialized values
    pub fn similar(&self) -> Result<Self> {
        Ok(match self {
            SparseArray::Vector(a) => SparseArray::Vector(a.similar()?),
            SparseArray::Csc(a) => SparseArray::Csc(a.similar()?),
            SparseArray::Csr(a) => SparseArray::Csr(a.similar()?),
            SparseArray::Bsr(a) => SparseArray::Bsr(a.similar()?),
        })
    }

    /// Overwrite with the contents of `src`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the formats differ, otherwise whatever the
    /// container's own `copy_from` returns.
    pub fn copy_from(&mut self, src: &Self) -> Result<()> {
        match (self, src) {
            (SparseArray::Vector(d), SparseArray::Vector(s)) => d.copy_from(s),
            (SparseArray::Csc(d), SparseArray::Csc(s)) => d.copy_from(s),
            (SparseArray::Csr(d), SparseArray::Csr(s)) => d.copy_from(s),
            (SparseArray::Bsr(d), SparseArray::Bsr(s)) => d.copy_from(s),
            (d, s) => Err(Error::invalid_argument(
                "src",
                format!("cannot copy {} into {}", s.format(), d.format()),
            )),
        }
    }

    /// Download as a host CSC matrix; vectors become a single column
    pub fn to_host(&self) -> Result<HostCscMatrix<T>> {
        match self {
            SparseArray::Vector(a) => Ok(HostCscMatrix::from_vector(&a.to_host()?)),
            SparseArray::Csc(a) => a.to_host(),
            SparseArray::Csr(a) => a.to_host(),
            SparseArray::Bsr(a) => a.to_host(),
        }
    }

    /// Download as a dense array (row-major for matrices)
    pub fn to_dense(&self) -> Result<Vec<T>> {
        dispatch!(self, a => a.to_dense())
    }
}

impl<R: Runtime, T: Element> SparseStorage for SparseArray<R, T> {
    fn format(&self) -> SparseFormat {
        dispatch!(self, a => a.format())
    }

    fn shape(&self) -> &[usize] {
        dispatch!(self, a => a.shape())
    }

    fn nnz(&self) -> usize {
        dispatch!(self, a => a.nnz())
    }

    fn dtype(&self) -> DType {
        T::DTYPE
    }

    fn index_base(&self) -> IndexBase {
        dispatch!(self, a => a.index_base())
    }

    fn memory_usage(&self) -> usize {
        dispatch!(self, a => a.memory_usage())
    }
}

impl<R: Runtime, T: Element> fmt::Display for SparseArray<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, a => fmt::Display::fmt(a, f))
    }
}

impl<R: Runtime, T: Element> From<SparseVectorData<R, T>> for SparseArray<R, T> {
    fn from(v: SparseVectorData<R, T>) -> Self {
        SparseArray::Vector(v)
    }
}

impl<R: Runtime, T: Element> From<CscData<R, T>> for SparseArray<R, T> {
    fn from(m: CscData<R, T>) -> Self {
        SparseArray::Csc(m)
    }
}

impl<R: Runtime, T: Element> From<CsrData<R, T>> for SparseArray<R, T> {
    fn from(m: CsrData<R, T>) -> Self {
        SparseArray::Csr(m)
    }
}

impl<R: Runtime, T: Element> From<BsrData<R, T>> for SparseArray<R, T> {
    fn from(m: BsrData<R, T>) -> Self {
        SparseArray::Bsr(m)
    }
}
