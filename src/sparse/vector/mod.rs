//! Sparse vector on a device

mod conversion;
mod core;

pub use core::SparseVectorData;
