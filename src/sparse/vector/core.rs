//! Core sparse vector implementation: struct, creation, getters, copy

use crate::buffer::DeviceBuffer;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::host::HostSparseVector;
use crate::runtime::Runtime;
use std::fmt;

use super::super::format::{SparseFormat, SparseStorage};
use super::super::index::{DeviceIndex, IndexBase};
use super::super::utils;

/// Sparse vector with device-resident index and value arrays
#[derive(Debug)]
pub struct SparseVectorData<R: Runtime, T: Element> {
    pub(crate) indices: DeviceBuffer<R, DeviceIndex>,
    pub(crate) values: DeviceBuffer<R, T>,
    pub(crate) shape: [usize; 1],
    pub(crate) index_base: IndexBase,
}

impl<R: Runtime, T: Element> SparseVectorData<R, T> {
    /// Create a sparse vector from device buffers
    ///
    /// Only lengths are checked; the buffers are trusted to hold strictly
    /// increasing indices in the `index_base` convention. Use
    /// [`validate`](Self::validate) to check the full invariant.
    ///
    /// # Errors
    ///
    /// Returns error if `indices` and `values` differ in length or there are
    /// more stored entries than `len`.
    pub fn new(
        indices: DeviceBuffer<R, DeviceIndex>,
        values: DeviceBuffer<R, T>,
        len: usize,
        index_base: IndexBase,
    ) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::shape_mismatch(&[values.len()], &[indices.len()]));
        }
        if values.len() > len {
            return Err(Error::invalid_structure(
                "vector",
                format!("{} stored entries exceed length {}", values.len(), len),
            ));
        }
        Ok(Self {
            indices,
            values,
            shape: [len],
            index_base,
        })
    }

    /// Create a sparse vector from 0-based host slices
    ///
    /// The indices must be strictly increasing and below `len`.
    pub fn from_slices(
        indices: &[usize],
        values: &[T],
        len: usize,
        index_base: IndexBase,
        device: &R::Device,
    ) -> Result<Self> {
        let host = HostSparseVector::new(len, indices.to_vec(), values.to_vec())?;
        Self::from_host(&host, index_base, device)
    }

    /// Create a vector with no stored entries
    pub fn empty(len: usize, index_base: IndexBase, device: &R::Device) -> Self {
        Self {
            indices: DeviceBuffer::empty(device),
            values: DeviceBuffer::empty(device),
            shape: [len],
            index_base,
        }
    }

    /// Logical length
    pub fn len(&self) -> usize {
        self.shape[0]
    }

    /// Returns the stored index buffer
    pub fn indices(&self) -> &DeviceBuffer<R, DeviceIndex> {
        &self.indices
    }

    /// Returns the value buffer
    pub fn values(&self) -> &DeviceBuffer<R, T> {
        &self.values
    }

    /// Returns the device holding the buffers
    pub fn device(&self) -> &R::Device {
        self.values.device()
    }

    /// Value at 0-based position `i`, zero if nothing is stored there
    pub fn get(&self, i: usize) -> Result<T> {
        if i >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.len(),
            });
        }
        let target = self.index_base.encode(i)?;
        match utils::search_segment(&self.indices, 0..self.nnz(), target)? {
            Some(pos) => self.values.read_at(pos),
            None => Ok(T::zero()),
        }
    }

    /// Download the structure and check the full invariant
    pub fn validate(&self) -> Result<()> {
        let indices = self
            .index_base
            .decode_all("vector", &self.indices.to_vec()?)?;
        HostSparseVector::new(self.len(), indices, vec![T::zero(); self.nnz()]).map(|_| ())
    }

    /// Deep copy on the same device
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            indices: self.indices.try_clone()?,
            values: self.values.try_clone()?,
            shape: self.shape,
            index_base: self.index_base,
        })
    }

    /// Same length and sparsity pattern, zero-initialized values
    pub fn similar(&self) -> Result<Self> {
        Ok(Self {
            indices: self.indices.try_clone()?,
            values: DeviceBuffer::zeros(self.nnz(), self.device())?,
            shape: self.shape,
            index_base: self.index_base,
        })
    }

    /// Overwrite this vector with the structure and values of `src`
    ///
    /// # Errors
    ///
    /// Returns `InconsistentSize` if the lengths differ.
    pub fn copy_from(&mut self, src: &Self) -> Result<()> {
        if self.shape != src.shape {
            return Err(Error::inconsistent_size(&self.shape, &src.shape));
        }
        self.indices.copy_from(&src.indices)?;
        self.values.copy_from(&src.values)?;
        self.index_base = src.index_base;
        Ok(())
    }

    /// Copy with stored indices rewritten in another convention
    pub fn with_index_base(&self, index_base: IndexBase) -> Result<Self> {
        if index_base == self.index_base {
            return self.try_clone();
        }
        let host = self.to_host()?;
        Self::from_host(&host, index_base, self.device())
    }
}

impl<R: Runtime, T: Element> SparseStorage for SparseVectorData<R, T> {
    fn format(&self) -> SparseFormat {
        SparseFormat::Vector
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
        self.indices.size_in_bytes() + self.values.size_in_bytes()
    }
}

impl<R: Runtime, T: Element> fmt::Display for SparseVectorData<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        utils::fmt_header::<R, T>(f, &self.shape, "SparseVectorData", self.device(), self.nnz())?;
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
