//! Runtime backends for container storage
//!
//! This module defines the `Runtime` trait and the CPU implementation.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific GPU/CPU)
//! └── Client (dispatches operations, owns stream/queue)
//! ```
//!
//! Sparse containers only need allocation and the three copy directions
//! from a runtime. Format conversions that a vendor library would perform are
//! expressed separately through [`crate::sparse::ConversionBackend`].

pub mod cpu;
mod traits;

pub use traits::{Device, Runtime, RuntimeClient};
