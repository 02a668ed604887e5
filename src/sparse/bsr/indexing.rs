//! BSR element access

use super::BsrData;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::sparse::utils;

impl<R: Runtime, T: Element> BsrData<R, T> {
    /// Value at 0-based `(row, col)`, zero if its block is not stored
    ///
    /// Searches the block column within the block row, then reads the single
    /// element from the block according to the storage direction.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        if row >= self.nrows() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.nrows(),
            });
        }
        if col >= self.ncols() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.ncols(),
            });
        }
        let bd = self.block_dim;
        let segment = utils::segment("BSR", &self.row_ptrs, row / bd, self.index_base)?;
        let target = self.index_base.encode(col / bd)?;
        match utils::search_segment(&self.col_indices, segment, target)? {
            Some(block) => {
                let offset = self.direction.offset(row % bd, col % bd, bd);
                self.values.read_at(block * bd * bd + offset)
            }
            None => Ok(T::zero()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    use crate::sparse::{BlockDirection, BsrData, IndexBase};

    #[test]
    fn test_get_both_directions() {
        let device = CpuDevice::new();
        // [1, 2, 0]
        // [3, 4, 0]
        // [0, 0, 5]
        let dense = [1, 2, 0, 3, 4, 0, 0, 0, 5];
        let layouts = [
            (BlockDirection::Row, [1, 2, 3, 4, 5, 0, 0, 0]),
            (BlockDirection::Column, [1, 3, 2, 4, 5, 0, 0, 0]),
        ];
        for (direction, blocks) in layouts {
            for base in [IndexBase::Zero, IndexBase::One] {
                let bsr = BsrData::<CpuRuntime, i32>::from_slices(
                    &[0, 1, 2],
                    &[0, 1],
                    &blocks,
                    [3, 3],
                    2,
                    direction,
                    base,
                    &device,
                )
                .unwrap();
                for i in 0..3 {
                    for j in 0..3 {
                        assert_eq!(bsr.get(i, j).unwrap(), dense[i * 3 + j]);
                    }
                }
                assert!(bsr.get(0, 3).unwrap_err().is_bounds());
            }
        }
    }
}
