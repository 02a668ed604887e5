//! Host-side sparse structures
//!
//! These are the host counterparts of the device containers: plain `Vec`
//! storage, 0-based `usize` indices, column-compressed matrices. Device
//! containers convert to and from these types, and render themselves through
//! the host renderer.
//!
//! - [`HostSparseVector`]: sorted (index, value) pairs plus a logical length
//! - [`HostCscMatrix`]: compressed sparse column matrix, with a coordinate
//!   triplet builder that sorts and combines duplicate entries

pub(crate) mod compressed;
mod csc;
mod vector;

pub use csc::HostCscMatrix;
pub use vector::HostSparseVector;

/// Pluralized nonzero count used in every container header
pub(crate) fn stored_entries(nnz: usize) -> String {
    if nnz == 1 {
        "1 stored entry".to_string()
    } else {
        format!("{} stored entries", nnz)
    }
}

/// Number of decimal digits needed to print indices below `n`
pub(crate) fn index_width(n: usize) -> usize {
    n.saturating_sub(1).to_string().len()
}
