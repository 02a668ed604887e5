//! Helpers shared by the device containers

use super::index::{DeviceIndex, IndexBase};
use crate::buffer::DeviceBuffer;
use crate::dtype::Element;
use crate::error::Result;
use crate::host::stored_entries;
use crate::runtime::{Device, Runtime};
use std::fmt;
use std::ops::Range;

/// Read the `[start, end)` range of segment `major` from a pointer array
///
/// Only the two bounding pointers are transferred from the device.
pub(crate) fn segment<R: Runtime>(
    format: &'static str,
    ptrs: &DeviceBuffer<R, DeviceIndex>,
    major: usize,
    base: IndexBase,
) -> Result<Range<usize>> {
    let bounds = ptrs.read(major..major + 2)?;
    let start = base.decode(format, bounds[0])?;
    let end = base.decode(format, bounds[1])?;
    Ok(start..end.max(start))
}

/// Binary-search a stored index within one segment of an index array
///
/// Returns the absolute position of the match. Assumes the segment is sorted
/// ascending; empty segments never touch the device.
pub(crate) fn search_segment<R: Runtime>(
    indices: &DeviceBuffer<R, DeviceIndex>,
    segment: Range<usize>,
    target: DeviceIndex,
) -> Result<Option<usize>> {
    if segment.is_empty() {
        return Ok(None);
    }
    let start = segment.start;
    let stored = indices.read(segment)?;
    Ok(stored.binary_search(&target).ok().map(|k| start + k))
}

/// Write the header line shared by every device container
///
/// `3×3 CscData<f32> on cpu with 5 stored entries`
pub(crate) fn fmt_header<R: Runtime, T: Element>(
    f: &mut fmt::Formatter<'_>,
    shape: &[usize],
    type_name: &str,
    device: &R::Device,
    nnz: usize,
) -> fmt::Result {
    match shape {
        [len] => write!(f, "{}-element ", len)?,
        _ => {
            let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
            write!(f, "{} ", dims.join("×"))?;
        }
    }
    write!(
        f,
        "{}<{}> on {} with {}",
        type_name,
        T::DTYPE,
        device.name(),
        stored_entries(nnz)
    )
}
