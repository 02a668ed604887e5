//! Host sparse vector

use super::{index_width, stored_entries};
use crate::dtype::Element;
use crate::error::{Error, Result};
use std::fmt;

/// Sparse vector in host memory
///
/// Stores the positions of the nonzeros (0-based, strictly increasing) and
/// their values, plus the logical length.
#[derive(Debug, Clone, PartialEq)]
pub struct HostSparseVector<T> {
    len: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Element> HostSparseVector<T> {
    /// Create a sparse vector from sorted indices and values
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `indices` and `values` have different lengths
    /// - an index is `>= len`
    /// - indices are not strictly increasing
    pub fn new(len: usize, indices: Vec<usize>, values: Vec<T>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::shape_mismatch(&[values.len()], &[indices.len()]));
        }
        for (k, &idx) in indices.iter().enumerate() {
            if idx >= len {
                return Err(Error::IndexOutOfBounds {
                    index: idx,
                    size: len,
                });
            }
            if k > 0 && indices[k - 1] >= idx {
                return Err(Error::invalid_structure(
                    "vector",
                    format!("indices are not strictly increasing at position {}", k),
                ));
            }
        }
        Ok(Self {
            len,
            indices,
            values,
        })
    }

    /// Create an all-zero vector with no stored entries
    pub fn zeros(len: usize) -> Self {
        Self {
            len,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from dense data, storing every nonzero element
    pub fn from_dense(dense: &[T]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(i, &v)| (i, v))
            .unzip();
        Self {
            len: dense.len(),
            indices,
            values,
        }
    }

    /// Logical length
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the logical length is zero
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Positions of the stored entries
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Values of the stored entries
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Decompose into `(len, indices, values)`
    pub fn into_parts(self) -> (usize, Vec<usize>, Vec<T>) {
        (self.len, self.indices, self.values)
    }

    /// Value at position `i`, zero if nothing is stored there
    pub fn get(&self, i: usize) -> Result<T> {
        if i >= self.len {
            return Err(Error::IndexOutOfBounds {
                index: i,
                size: self.len,
            });
        }
        Ok(match self.indices.binary_search(&i) {
            Ok(k) => self.values[k],
            Err(_) => T::zero(),
        })
    }

    /// Materialize as a dense vector
    pub fn to_dense(&self) -> Vec<T> {
        let mut dense = vec![T::zero(); self.len];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            dense[i] = v;
        }
        dense
    }

    /// Write the stored entries, one per line, without a header
    pub(crate) fn fmt_entries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = index_width(self.len);
        for (k, (&i, v)) in self.indices.iter().zip(&self.values).enumerate() {
            if k > 0 {
                writeln!(f)?;
            }
            write!(f, "  [{:>width$}]  =  {}", i, v, width = width)?;
        }
        Ok(())
    }
}

impl<T: Element> fmt::Display for HostSparseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-element sparse vector with {}",
            self.len,
            stored_entries(self.nnz())
        )?;
        if self.nnz() > 0 {
            writeln!(f, ":")?;
            self.fmt_entries(f)?;
        }
        Ok(())
    }
}
