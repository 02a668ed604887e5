//! Host fallback for device format conversions
//!
//! Converts by downloading the input, rearranging it on the host, and
//! uploading the result to the input's device. Correct on every runtime, but
//! each call moves the whole matrix across the host/device boundary twice;
//! runtimes with a native sparse library should implement
//! [`ConversionBackend`] themselves.

use super::ConversionBackend;
use crate::dtype::Element;
use crate::error::Result;
use crate::host::compressed;
use crate::runtime::Runtime;
use crate::sparse::format::BlockDirection;
use crate::sparse::{BsrData, CscData, CsrData, SparseStorage};

/// Conversion backend that performs every conversion on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFallback;

impl<R: Runtime> ConversionBackend<R> for HostFallback {
    fn csr_to_csc<T: Element>(&self, csr: &CsrData<R, T>) -> Result<CscData<R, T>> {
        tracing::debug!(shape = ?csr.shape(), nnz = csr.nnz(), "host fallback: CSR -> CSC");
        let (row_ptrs, col_indices, values) = csr.checked_host_parts()?;
        let (col_ptrs, row_indices, values) =
            compressed::transpose(csr.nrows(), csr.ncols(), &row_ptrs, &col_indices, &values);
        CscData::upload(
            &col_ptrs,
            &row_indices,
            &values,
            csr.shape,
            csr.index_base,
            csr.device(),
        )
    }

    fn csc_to_csr<T: Element>(&self, csc: &CscData<R, T>) -> Result<CsrData<R, T>> {
        tracing::debug!(shape = ?csc.shape(), nnz = csc.nnz(), "host fallback: CSC -> CSR");
        let (col_ptrs, row_indices, values) = csc.checked_host_parts()?;
        let (row_ptrs, col_indices, values) =
            compressed::transpose(csc.ncols(), csc.nrows(), &col_ptrs, &row_indices, &values);
        CsrData::upload(
            &row_ptrs,
            &col_indices,
            &values,
            csc.shape,
            csc.index_base,
            csc.device(),
        )
    }

    fn csr_to_bsr<T: Element>(
        &self,
        csr: &CsrData<R, T>,
        block_dim: usize,
        direction: BlockDirection,
    ) -> Result<BsrData<R, T>> {
        compressed::block_size(block_dim)?;
        tracing::debug!(
            shape = ?csr.shape(),
            nnz = csr.nnz(),
            block_dim,
            ?direction,
            "host fallback: CSR -> BSR"
        );
        let (row_ptrs, col_indices, values) = csr.checked_host_parts()?;
        let (block_ptrs, block_cols, blocks) = csr_to_bsr_host(
            csr.nrows(),
            &row_ptrs,
            &col_indices,
            &values,
            block_dim,
            direction,
        );
        BsrData::upload(
            &block_ptrs,
            &block_cols,
            &blocks,
            csr.shape,
            block_dim,
            direction,
            csr.index_base,
            csr.device(),
        )
    }

    fn bsr_to_csr<T: Element>(&self, bsr: &BsrData<R, T>) -> Result<CsrData<R, T>> {
        tracing::debug!(
            shape = ?bsr.shape(),
            nnzb = bsr.nnzb(),
            block_dim = bsr.block_dim(),
            "host fallback: BSR -> CSR"
        );
        let (block_ptrs, block_cols, blocks) = bsr.checked_host_parts()?;
        let (row_ptrs, col_indices, values) = bsr_to_csr_host(
            bsr.nrows(),
            bsr.ncols(),
            &block_ptrs,
            &block_cols,
            &blocks,
            bsr.block_dim(),
            bsr.direction(),
        );
        CsrData::upload(
            &row_ptrs,
            &col_indices,
            &values,
            bsr.shape,
            bsr.index_base,
            bsr.device(),
        )
    }
}

/// Group 0-based CSR arrays into dense blocks
///
/// Returns `(block_ptrs, block_cols, blocks)`. The last block row and block
/// column are padded with zeros when the shape is not a multiple of
/// `block_dim`.
pub(crate) fn csr_to_bsr_host<T: Element>(
    nrows: usize,
    row_ptrs: &[usize],
    col_indices: &[usize],
    values: &[T],
    block_dim: usize,
    direction: BlockDirection,
) -> (Vec<usize>, Vec<usize>, Vec<T>) {
    let block_size = block_dim * block_dim;
    let mb = nrows.div_ceil(block_dim);

    let mut block_ptrs = Vec::with_capacity(mb + 1);
    let mut block_cols: Vec<usize> = Vec::new();
    let mut blocks: Vec<T> = Vec::new();
    block_ptrs.push(0);

    for br in 0..mb {
        let rows = br * block_dim..((br + 1) * block_dim).min(nrows);

        let mut present: Vec<usize> = rows
            .clone()
            .flat_map(|r| col_indices[row_ptrs[r]..row_ptrs[r + 1]].iter())
            .map(|&c| c / block_dim)
            .collect();
        present.sort_unstable();
        present.dedup();

        let first = block_cols.len();
        block_cols.extend_from_slice(&present);
        blocks.resize(block_cols.len() * block_size, T::zero());

        for r in rows {
            for p in row_ptrs[r]..row_ptrs[r + 1] {
                let c = col_indices[p];
                if let Ok(slot) = present.binary_search(&(c / block_dim)) {
                    let offset = direction.offset(r - br * block_dim, c % block_dim, block_dim);
                    blocks[(first + slot) * block_size + offset] = values[p];
                }
            }
        }

        block_ptrs.push(block_cols.len());
    }

    (block_ptrs, block_cols, blocks)
}

/// Expand 0-based BSR arrays into CSR arrays
///
/// Every entry of every stored block becomes a stored CSR entry, except the
/// padding that falls outside `nrows × ncols`.
pub(crate) fn bsr_to_csr_host<T: Element>(
    nrows: usize,
    ncols: usize,
    block_ptrs: &[usize],
    block_cols: &[usize],
    blocks: &[T],
    block_dim: usize,
    direction: BlockDirection,
) -> (Vec<usize>, Vec<usize>, Vec<T>) {
    let block_size = block_dim * block_dim;

    let mut row_ptrs = Vec::with_capacity(nrows + 1);
    let mut col_indices = Vec::with_capacity(blocks.len());
    let mut values = Vec::with_capacity(blocks.len());
    row_ptrs.push(0);

    for r in 0..nrows {
        let (br, ir) = (r / block_dim, r % block_dim);
        for k in block_ptrs[br]..block_ptrs[br + 1] {
            let first_col = block_cols[k] * block_dim;
            for ic in 0..block_dim {
                let c = first_col + ic;
                if c >= ncols {
                    break;
                }
                col_indices.push(c);
                values.push(blocks[k * block_size + direction.offset(ir, ic, block_dim)]);
            }
        }
        row_ptrs.push(col_indices.len());
    }

    (row_ptrs, col_indices, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    // [1, 2, 0, 0, 0]
    // [0, 3, 0, 0, 4]
    // [0, 0, 0, 0, 0]
    // [0, 0, 5, 0, 0]
    // [0, 0, 0, 0, 6]
    fn sample() -> (Vec<usize>, Vec<usize>, Vec<i32>) {
        (
            vec![0, 2, 4, 4, 5, 6],
            vec![0, 1, 1, 4, 2, 4],
            vec![1, 2, 3, 4, 5, 6],
        )
    }

    #[test]
    fn test_csr_to_bsr_row_major() {
        let (ptrs, cols, vals) = sample();
        let (bptrs, bcols, blocks) =
            csr_to_bsr_host(5, &ptrs, &cols, &vals, 2, BlockDirection::Row);

        assert_eq!(bptrs, vec![0, 2, 3, 4]);
        assert_eq!(bcols, vec![0, 2, 1, 2]);
        assert_eq!(
            blocks,
            vec![
                1, 2, 0, 3, // block (0,0)
                0, 0, 4, 0, // block (0,2), padded column
                0, 0, 5, 0, // block (1,1)
                6, 0, 0, 0, // block (2,2), padded row and column
            ]
        );
    }

    #[test]
    fn test_csr_to_bsr_column_major() {
        let (ptrs, cols, vals) = sample();
        let (_, _, blocks) = csr_to_bsr_host(5, &ptrs, &cols, &vals, 2, BlockDirection::Column);
        assert_eq!(&blocks[0..4], &[1, 0, 2, 3]);
    }

    #[test]
    fn test_bsr_roundtrip_keeps_block_zeros() {
        let (ptrs, cols, vals) = sample();
        for direction in [BlockDirection::Row, BlockDirection::Column] {
            let (bptrs, bcols, blocks) = csr_to_bsr_host(5, &ptrs, &cols, &vals, 2, direction);
            let (rptrs, rcols, rvals) =
                bsr_to_csr_host(5, 5, &bptrs, &bcols, &blocks, 2, direction);

            // every in-shape position of a stored block comes back, zeros included
            assert_eq!(rptrs, vec![0, 3, 6, 8, 10, 11]);
            assert_eq!(rcols, vec![0, 1, 4, 0, 1, 4, 2, 3, 2, 3, 4]);
            assert_eq!(rvals, vec![1, 2, 0, 0, 3, 4, 0, 0, 5, 0, 6]);
        }
    }

    #[test]
    fn test_block_dim_one_is_identity() {
        let (ptrs, cols, vals) = sample();
        let (bptrs, bcols, blocks) =
            csr_to_bsr_host(5, &ptrs, &cols, &vals, 1, BlockDirection::Row);
        assert_eq!(bptrs, ptrs);
        assert_eq!(bcols, cols);
        assert_eq!(blocks, vals);
    }
}
