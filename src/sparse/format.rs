//! Sparse format definitions and traits

use super::index::IndexBase;
use crate::dtype::DType;
use crate::error::{Error, Result};

/// Sparse storage format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparseFormat {
    /// Sparse vector: sorted indices + values
    ///
    /// Storage: O(2 * nnz)
    Vector,

    /// Compressed Sparse Column (CSC)
    ///
    /// Column pointers + row indices + values.
    /// Best for: column slicing, transposed operations
    /// Storage: O(2 * nnz + ncols + 1)
    Csc,

    /// Compressed Sparse Row (CSR)
    ///
    /// Row pointers + column indices + values.
    /// Best for: row slicing, SpMV, most vendor routines
    /// Storage: O(2 * nnz + nrows + 1)
    Csr,

    /// Block Compressed Sparse Row (BSR)
    ///
    /// Block row pointers + block column indices + dense blocks.
    /// Best for: matrices with dense sub-block structure
    /// Storage: O(nnzb * (1 + block_dim^2) + mb + 1)
    Bsr,
}

impl SparseFormat {
    /// Returns true if format is efficient for row operations
    #[inline]
    pub fn is_row_major(&self) -> bool {
        matches!(self, SparseFormat::Csr | SparseFormat::Bsr)
    }

    /// Returns true if format is efficient for column operations
    #[inline]
    pub fn is_col_major(&self) -> bool {
        matches!(self, SparseFormat::Csc)
    }

    /// Returns the format name as a string
    pub fn name(&self) -> &'static str {
        match self {
            SparseFormat::Vector => "vector",
            SparseFormat::Csc => "CSC",
            SparseFormat::Csr => "CSR",
            SparseFormat::Bsr => "BSR",
        }
    }
}

impl std::fmt::Display for SparseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Storage order of the entries inside each dense BSR block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockDirection {
    /// Entry `(r, c)` of a block lives at `r * block_dim + c`
    #[default]
    Row,
    /// Entry `(r, c)` of a block lives at `c * block_dim + r`
    Column,
}

impl BlockDirection {
    /// Offset of in-block entry `(r, c)` within a block of side `block_dim`
    #[inline]
    pub fn offset(self, r: usize, c: usize, block_dim: usize) -> usize {
        match self {
            BlockDirection::Row => r * block_dim + c,
            BlockDirection::Column => c * block_dim + r,
        }
    }
}

/// Capability interface shared by every device container
///
/// Shapes are reported as slices: `[len]` for vectors, `[nrows, ncols]` for
/// matrices.
pub trait SparseStorage {
    /// Returns the sparse format type
    fn format(&self) -> SparseFormat;

    /// Returns the shape
    fn shape(&self) -> &[usize];

    /// Returns the number of stored entries
    fn nnz(&self) -> usize;

    /// Returns the data type of values
    fn dtype(&self) -> DType;

    /// Returns the index convention of the stored index arrays
    fn index_base(&self) -> IndexBase;

    /// Returns the device memory held by the container in bytes
    fn memory_usage(&self) -> usize;

    /// Number of axes (1 for vectors, 2 for matrices)
    #[inline]
    fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Total number of logical elements (product of the shape)
    #[inline]
    fn numel(&self) -> usize {
        self.shape().iter().product()
    }

    /// Length along axis `dim`, counted from 1
    ///
    /// Axes past the container's rank have length 1.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` for `dim == 0`.
    fn size(&self, dim: usize) -> Result<usize> {
        if dim < 1 {
            return Err(Error::InvalidDimension { dim });
        }
        Ok(self.shape().get(dim - 1).copied().unwrap_or(1))
    }

    /// Returns the density ratio (fraction of stored entries)
    #[inline]
    fn density(&self) -> f64 {
        let total = self.numel() as f64;
        if total == 0.0 {
            0.0
        } else {
            self.nnz() as f64 / total
        }
    }

    /// Returns true if nothing is stored
    #[inline]
    fn is_empty(&self) -> bool {
        self.nnz() == 0
    }
}
