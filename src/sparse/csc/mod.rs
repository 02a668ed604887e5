//! CSC (Compressed Sparse Column) format

mod conversion;
mod core;
mod indexing;

pub use core::CscData;
