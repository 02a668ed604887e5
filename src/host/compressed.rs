//! Shared routines over 0-based compressed (pointer, index, value) arrays
//!
//! "Major" is the compressed axis (columns for CSC, rows for CSR, block rows
//! for BSR) and "minor" the axis stored in the index array.

use crate::error::{Error, Result};

/// Length of a pointer array over `n_major` segments
pub(crate) fn ptrs_len(n_major: usize) -> Result<usize> {
    n_major.checked_add(1).ok_or_else(|| {
        Error::invalid_argument("shape", format!("dimension {} is too large", n_major))
    })
}

/// Scalars held by one `block_dim × block_dim` block
pub(crate) fn block_size(block_dim: usize) -> Result<usize> {
    if block_dim == 0 {
        return Err(Error::invalid_argument("block_dim", "must be at least 1"));
    }
    block_dim.checked_mul(block_dim).ok_or_else(|| {
        Error::invalid_argument("block_dim", format!("{} is too large", block_dim))
    })
}

/// Check the full structural invariant of a compressed array triple
///
/// - `ptrs` has `n_major + 1` entries, starts at 0, ends at `nnz`, never decreases
/// - every index is below `n_minor`
/// - indices are strictly increasing within each major segment
pub(crate) fn validate(
    format: &'static str,
    n_major: usize,
    n_minor: usize,
    ptrs: &[usize],
    indices: &[usize],
    nnz: usize,
) -> Result<()> {
    let expected = ptrs_len(n_major)?;
    if ptrs.len() != expected {
        return Err(Error::shape_mismatch(&[expected], &[ptrs.len()]));
    }
    if indices.len() != nnz {
        return Err(Error::shape_mismatch(&[nnz], &[indices.len()]));
    }
    if ptrs[0] != 0 || ptrs[n_major] != nnz {
        return Err(Error::invalid_structure(
            format,
            format!(
                "pointers must start at 0 and end at {}, got {} and {}",
                nnz, ptrs[0], ptrs[n_major]
            ),
        ));
    }

    for (major, w) in ptrs.windows(2).enumerate() {
        let (start, end) = (w[0], w[1]);
        if start > end || end > nnz {
            return Err(Error::invalid_structure(
                format,
                format!("pointer {} is not monotone within [0, {}]: {} -> {}", major, nnz, start, end),
            ));
        }
        let segment = &indices[start..end];
        for (k, &idx) in segment.iter().enumerate() {
            if idx >= n_minor {
                return Err(Error::invalid_structure(
                    format,
                    format!("index {} out of range for axis of size {}", idx, n_minor),
                ));
            }
            if k > 0 && segment[k - 1] >= idx {
                return Err(Error::invalid_structure(
                    format,
                    format!(
                        "indices of segment {} are not strictly increasing at position {}",
                        major,
                        start + k
                    ),
                ));
            }
        }
    }

    Ok(())
}

/// Switch the compressed axis (CSR <-> CSC) with a counting sort
///
/// Output indices are sorted within each new segment because the input is
/// walked in major order.
pub(crate) fn transpose<T: Copy>(
    n_major: usize,
    n_minor: usize,
    ptrs: &[usize],
    indices: &[usize],
    values: &[T],
) -> (Vec<usize>, Vec<usize>, Vec<T>) {
    let nnz = indices.len();

    let mut out_ptrs = vec![0usize; n_minor + 1];
    for &idx in indices {
        out_ptrs[idx + 1] += 1;
    }
    for i in 0..n_minor {
        out_ptrs[i + 1] += out_ptrs[i];
    }

    let mut next = out_ptrs.clone();
    let mut out_indices = vec![0usize; nnz];
    // Same length as the output, every slot is overwritten below
    let mut out_values = values.to_vec();

    for major in 0..n_major {
        for p in ptrs[major]..ptrs[major + 1] {
            let minor = indices[p];
            let dest = next[minor];
            out_indices[dest] = major;
            out_values[dest] = values[p];
            next[minor] += 1;
        }
    }

    (out_ptrs, out_indices, out_values)
}

/// Expand a pointer array into one major index per stored entry
///
/// Segment `m` of length `k` contributes `k` copies of `m`.
pub(crate) fn expand_ptrs(ptrs: &[usize]) -> Vec<usize> {
    let nnz = ptrs.last().copied().unwrap_or(0);
    let mut out = Vec::with_capacity(nnz);
    for (major, w) in ptrs.windows(2).enumerate() {
        out.extend(std::iter::repeat_n(major, w[1] - w[0]));
    }
    out
}
