//! # sparsr
//!
//! **Device-resident sparse vectors and matrices for vendor sparse libraries.**
//!
//! sparsr keeps sparse data on a compute device in exactly the layout GPU
//! sparse libraries consume (`i32` indices, zero- or one-based), and moves it
//! between host sparse structures and device containers.
//!
//! ## Containers
//!
//! - [`SparseVectorData`](sparse::SparseVectorData): sparse vector
//! - [`CscData`](sparse::CscData): compressed sparse column matrix
//! - [`CsrData`](sparse::CsrData): compressed sparse row matrix
//! - [`BsrData`](sparse::BsrData): block compressed sparse row matrix
//! - [`SparseArray`](sparse::SparseArray): any of the above
//!
//! Host-side counterparts live in [`host`]. Device memory is reached through
//! the [`Runtime`](runtime::Runtime) trait; format conversions go through a
//! [`ConversionBackend`](sparse::ConversionBackend).
//!
//! ## Quick Start
//!
//! ```
//! use sparsr::prelude::*;
//!
//! let device = CpuDevice::new();
//! let v = HostSparseVector::new(5, vec![1, 3], vec![2.0f64, 4.0])?;
//!
//! let dv = SparseVectorData::<CpuRuntime, f64>::from_host(&v, IndexBase::One, &device)?;
//! assert_eq!(dv.indices().to_vec()?, vec![2, 4]);
//! assert_eq!(dv.get(3)?, 4.0);
//!
//! let column = dv.to_csc()?;
//! assert_eq!(column.shape(), &[5, 1]);
//! # Ok::<(), sparsr::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): host-memory runtime
//! - `f16`: half-precision element types (`half::f16`, `half::bf16`)
//!
//! ## Logging
//!
//! Conversions and slow access paths emit [`tracing`] events at `debug`
//! level; allocations at `trace`. No subscriber is installed by the crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod buffer;
pub mod dtype;
pub mod error;
pub mod host;
pub mod runtime;
pub mod sparse;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::buffer::DeviceBuffer;
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::host::{HostCscMatrix, HostSparseVector};
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::sparse::{
        BlockDirection, BsrData, ConversionBackend, CscData, CsrData, HostFallback, IndexBase,
        Selection, Slice, SparseArray, SparseFormat, SparseStorage, SparseVectorData,
    };

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
}

/// Default runtime based on enabled features
#[cfg(feature = "cpu")]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
