//! Error types for sparsr

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using sparsr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sparsr operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Length of a component array does not match what the shape implies
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Copy between containers of different shapes
    #[error("Inconsistent size: destination has shape {dst:?}, source has shape {src:?}")]
    InconsistentSize {
        /// Destination shape
        dst: Vec<usize>,
        /// Source shape
        src: Vec<usize>,
    },

    /// Invalid axis ordinal (axes are counted from 1)
    #[error("Invalid dimension {dim}: axis ordinals start at 1")]
    InvalidDimension {
        /// The invalid axis ordinal
        dim: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Compressed structure violates its ordering invariant
    #[error("Invalid {format} structure: {reason}")]
    InvalidStructure {
        /// Format name (CSC, CSR, BSR, vector)
        format: &'static str,
        /// What is wrong
        reason: String,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Device mismatch between operands
    #[error("Device mismatch: buffers must be on the same device")]
    DeviceMismatch,

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an inconsistent size error for copy-into operations
    pub fn inconsistent_size(dst: &[usize], src: &[usize]) -> Self {
        Self::InconsistentSize {
            dst: dst.to_vec(),
            src: src.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create an invalid structure error
    pub fn invalid_structure(format: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            format,
            reason: reason.into(),
        }
    }

    /// Returns true for out-of-range element or slice access
    pub fn is_bounds(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }

    /// Returns true for copy-into shape disagreement
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, Self::InconsistentSize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::inconsistent_size(&[3, 3], &[4, 4]);
        assert_eq!(
            err.to_string(),
            "Inconsistent size: destination has shape [3, 3], source has shape [4, 4]"
        );
        assert!(err.is_size_mismatch());

        let err = Error::IndexOutOfBounds { index: 4, size: 3 };
        assert!(err.is_bounds());
        assert!(!err.is_size_mismatch());
    }
}
