//! Device index representation

use crate::error::{Error, Result};

/// Fixed-width signed integer used for every device index and pointer array
///
/// 32-bit is the index width vendor sparse libraries accept without a
/// 64-bit index mode.
pub type DeviceIndex = i32;

/// Counting convention of stored indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IndexBase {
    /// Indices count from 0
    #[default]
    Zero,
    /// Indices count from 1
    One,
}

impl IndexBase {
    /// Value of the first index under this convention
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }

    /// Encode a 0-based position as a stored device index
    #[inline]
    pub fn encode(self, position: usize) -> Result<DeviceIndex> {
        position
            .checked_add(self.offset())
            .and_then(|v| DeviceIndex::try_from(v).ok())
            .ok_or_else(|| {
                Error::invalid_argument(
                    "index",
                    format!("{} does not fit the device index type", position),
                )
            })
    }

    /// Decode a stored device index into a 0-based position
    #[inline]
    pub fn decode(self, format: &'static str, stored: DeviceIndex) -> Result<usize> {
        usize::try_from(stored)
            .ok()
            .and_then(|v| v.checked_sub(self.offset()))
            .ok_or_else(|| {
                Error::invalid_structure(
                    format,
                    format!("stored index {} is below the index base {:?}", stored, self),
                )
            })
    }

    /// Encode a slice of 0-based positions
    pub fn encode_all(self, positions: &[usize]) -> Result<Vec<DeviceIndex>> {
        positions.iter().map(|&p| self.encode(p)).collect()
    }

    /// Decode a slice of stored indices into 0-based positions
    pub fn decode_all(self, format: &'static str, stored: &[DeviceIndex]) -> Result<Vec<usize>> {
        stored.iter().map(|&s| self.decode(format, s)).collect()
    }
}
