//! CSR (Compressed Sparse Row) format

mod conversion;
mod core;
mod indexing;

pub use core::CsrData;
