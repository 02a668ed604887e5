//! Device-resident sparse containers
//!
//! Each container owns its index and value arrays as [`DeviceBuffer`]s on a
//! runtime's device, in the layout vendor sparse libraries consume directly:
//! `i32` indices, zero- or one-based.
//!
//! # Sparse Formats
//!
//! - **Vector**: sorted indices of the stored entries plus their values.
//!
//! - **CSC** (Compressed Sparse Column): column pointers, row indices, values.
//!   Columns are contiguous, so [`CscData::column`] is a device-to-device
//!   copy of one segment.
//!
//! - **CSR** (Compressed Sparse Row): row pointers, column indices, values.
//!   Rows are contiguous, so [`CsrData::row`] is the cheap slice.
//!
//! - **BSR** (Block Compressed Sparse Row): CSR over dense
//!   `block_dim × block_dim` blocks, each stored row- or column-major.
//!
//! Slicing against the compressed axis, and every format conversion between
//! device containers, goes through a [`ConversionBackend`].
//!
//! # Usage
//!
//! ```
//! use sparsr::prelude::*;
//!
//! let device = CpuDevice::new();
//! let host = HostCscMatrix::from_triplets(3, 3, &[1, 0, 2], &[0, 1, 2], &[5.0f32, 7.0, 9.0])?;
//!
//! let csc = CscData::<CpuRuntime, f32>::from_host(&host, IndexBase::One, &device)?;
//! assert_eq!(csc.get(1, 0)?, 5.0);
//! assert_eq!(csc.get(0, 0)?, 0.0);
//!
//! let csr = csc.to_csr(&HostFallback)?;
//! assert_eq!(csr.row(0)?.to_dense()?, vec![0.0, 7.0, 0.0]);
//! # Ok::<(), sparsr::error::Error>(())
//! ```
//!
//! [`DeviceBuffer`]: crate::buffer::DeviceBuffer

mod array;
mod backend;
mod bsr;
mod csc;
mod csr;
mod format;
mod index;
mod select;
mod utils;
mod vector;

pub use array::SparseArray;
pub use backend::{ConversionBackend, HostFallback};
pub use bsr::BsrData;
pub use csc::CscData;
pub use csr::CsrData;
pub use format::{BlockDirection, SparseFormat, SparseStorage};
pub use index::{DeviceIndex, IndexBase};
pub use select::{Selection, Slice};
pub use vector::SparseVectorData;
