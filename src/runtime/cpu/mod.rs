//! CPU runtime implementation
//!
//! The CPU runtime uses standard heap allocation. It is the default device
//! for sparsr containers and the reference implementation of the
//! [`ConversionBackend`](crate::sparse::ConversionBackend) contract.

mod client;
mod device;
mod runtime;
mod sparse;

pub use client::CpuClient;
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
