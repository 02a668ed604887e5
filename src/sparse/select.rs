//! Axis selection for matrix containers

use super::array::SparseArray;
use super::vector::SparseVectorData;
use crate::dtype::Element;
use crate::runtime::Runtime;

/// Selection along one matrix axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    /// Every position along the axis (`:`)
    All,
    /// A single 0-based position
    Index(usize),
}

impl From<usize> for Slice {
    fn from(i: usize) -> Self {
        Slice::Index(i)
    }
}

/// Result of selecting from a matrix
///
/// | rows       | cols       | result   |
/// |------------|------------|----------|
/// | `Index(i)` | `Index(j)` | `Scalar` |
/// | `Index(i)` | `All`      | `Vector` (row `i`) |
/// | `All`      | `Index(j)` | `Vector` (column `j`) |
/// | `All`      | `All`      | `Matrix` (deep copy) |
#[derive(Debug)]
pub enum Selection<R: Runtime, T: Element> {
    /// One element
    Scalar(T),
    /// One row or column
    Vector(SparseVectorData<R, T>),
    /// The whole matrix
    Matrix(SparseArray<R, T>),
}

impl<R: Runtime, T: Element> Selection<R, T> {
    /// Returns the scalar, if this selection is one
    pub fn into_scalar(self) -> Option<T> {
        match self {
            Selection::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the vector, if this selection is one
    pub fn into_vector(self) -> Option<SparseVectorData<R, T>> {
        match self {
            Selection::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the matrix, if this selection is one
    pub fn into_matrix(self) -> Option<SparseArray<R, T>> {
        match self {
            Selection::Matrix(m) => Some(m),
            _ => None,
        }
    }
}
