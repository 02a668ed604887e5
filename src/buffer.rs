//! Device buffers: exclusively-owned typed device memory
//!
//! A [`DeviceBuffer`] is the unit of storage for every sparse container. Each
//! buffer owns its allocation outright; there is no reference counting and no
//! aliasing between buffers. Duplicating a buffer ([`DeviceBuffer::try_clone`],
//! [`DeviceBuffer::slice`]) always performs a device-to-device copy, so two
//! containers never observe each other's writes.

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::{Device, Runtime};
use std::marker::PhantomData;
use std::ops::Range;

/// Typed, exclusively-owned allocation on a runtime's device
///
/// Memory is deallocated through the runtime when the buffer is dropped.
pub struct DeviceBuffer<R: Runtime, T: Element> {
    /// Raw device pointer (GPU address or CPU ptr cast to u64)
    ptr: u64,
    /// Number of elements (not bytes)
    len: usize,
    /// Device where memory is allocated
    device: R::Device,
    _marker: PhantomData<T>,
}

impl<R: Runtime, T: Element> DeviceBuffer<R, T> {
    /// Copy a host slice to a new device allocation
    pub fn from_slice(data: &[T], device: &R::Device) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let ptr = R::allocate(bytes.len(), device)?;
        let buffer = Self {
            ptr,
            len: data.len(),
            device: device.clone(),
            _marker: PhantomData,
        };
        // On failure `buffer` is dropped and the allocation released
        R::copy_to_device(bytes, buffer.ptr, device)?;
        Ok(buffer)
    }

    /// Allocate `len` zero-initialized elements
    pub fn zeros(len: usize, device: &R::Device) -> Result<Self> {
        Self::from_slice(&vec![T::zeroed(); len], device)
    }

    /// Allocate an empty buffer (no device memory is reserved)
    pub fn empty(device: &R::Device) -> Self {
        Self {
            ptr: 0,
            len: 0,
            device: device.clone(),
            _marker: PhantomData,
        }
    }

    /// Get the raw device pointer
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.ptr
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the element type tag
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.device
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.len * std::mem::size_of::<T>()
    }

    /// Copy the whole buffer from device to host
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.read(0..self.len)
    }

    /// Copy `range` from device to host
    ///
    /// Only the requested elements are transferred.
    pub fn read(&self, range: Range<usize>) -> Result<Vec<T>> {
        self.check_range(&range)?;
        // Allocate with correct alignment for T, then cast to bytes for copy.
        let mut result = vec![T::zeroed(); range.len()];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
        R::copy_from_device(self.byte_addr(range.start), bytes, &self.device)?;
        Ok(result)
    }

    /// Copy a single element from device to host
    pub fn read_at(&self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(Error::IndexOutOfBounds {
                index,
                size: self.len,
            });
        }
        let mut value = [T::zeroed()];
        R::copy_from_device(
            self.byte_addr(index),
            bytemuck::cast_slice_mut(&mut value),
            &self.device,
        )?;
        Ok(value[0])
    }

    /// Copy `range` into a new buffer on the same device
    ///
    /// The copy stays on the device; nothing passes through host memory.
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        self.check_range(&range)?;
        let size_bytes = range.len() * std::mem::size_of::<T>();
        let ptr = R::allocate(size_bytes, &self.device)?;
        let out = Self {
            ptr,
            len: range.len(),
            device: self.device.clone(),
            _marker: PhantomData,
        };
        R::copy_within_device(self.byte_addr(range.start), out.ptr, size_bytes, &self.device)?;
        Ok(out)
    }

    /// Deep copy of the whole buffer
    pub fn try_clone(&self) -> Result<Self> {
        self.slice(0..self.len)
    }

    /// Overwrite this buffer with the contents of `src`
    ///
    /// Reuses the existing allocation when lengths agree, otherwise the
    /// allocation is replaced by one of `src`'s length.
    pub fn copy_from(&mut self, src: &Self) -> Result<()> {
        if !self.device.is_same(&src.device) {
            return Err(Error::DeviceMismatch);
        }
        if self.len == src.len {
            return R::copy_within_device(src.ptr, self.ptr, src.size_in_bytes(), &self.device);
        }
        *self = src.try_clone()?;
        Ok(())
    }

    fn check_range(&self, range: &Range<usize>) -> Result<()> {
        if range.start > range.end {
            return Err(Error::invalid_argument(
                "range",
                format!("start {} is past end {}", range.start, range.end),
            ));
        }
        if range.end > self.len {
            return Err(Error::IndexOutOfBounds {
                index: range.end,
                size: self.len,
            });
        }
        Ok(())
    }

    #[inline]
    fn byte_addr(&self, index: usize) -> u64 {
        if self.ptr == 0 {
            return 0;
        }
        self.ptr + (index * std::mem::size_of::<T>()) as u64
    }
}

impl<R: Runtime, T: Element> Drop for DeviceBuffer<R, T> {
    fn drop(&mut self) {
        if self.ptr != 0 {
            R::deallocate(self.ptr, self.size_in_bytes(), &self.device);
        }
    }
}

impl<R: Runtime, T: Element> std::fmt::Debug for DeviceBuffer<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBuffer")
            .field("ptr", &format!("0x{:x}", self.ptr))
            .field("len", &self.len)
            .field("dtype", &T::DTYPE)
            .field("device", &self.device.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_from_slice_to_vec() {
        let device = CpuDevice::new();
        let buf = DeviceBuffer::<CpuRuntime, f32>::from_slice(&[1.0, 2.0, 3.0], &device).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.dtype(), DType::F32);
        assert_eq!(buf.size_in_bytes(), 12);
        assert_eq!(buf.to_vec().unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_read_and_slice() {
        let device = CpuDevice::new();
        let buf =
            DeviceBuffer::<CpuRuntime, i32>::from_slice(&[10, 20, 30, 40, 50], &device).unwrap();

        assert_eq!(buf.read(1..3).unwrap(), vec![20, 30]);
        assert_eq!(buf.read_at(4).unwrap(), 50);
        assert!(buf.read_at(5).unwrap_err().is_bounds());

        let part = buf.slice(2..5).unwrap();
        assert_eq!(part.to_vec().unwrap(), vec![30, 40, 50]);
        assert_ne!(part.ptr(), buf.ptr());

        let none = buf.slice(3..3).unwrap();
        assert!(none.is_empty());
        assert!(none.to_vec().unwrap().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let device = CpuDevice::new();
        let mut a = DeviceBuffer::<CpuRuntime, f64>::from_slice(&[1.0, 2.0], &device).unwrap();
        let b = a.try_clone().unwrap();

        let replacement = DeviceBuffer::<CpuRuntime, f64>::from_slice(&[7.0, 8.0], &device).unwrap();
        a.copy_from(&replacement).unwrap();

        assert_eq!(a.to_vec().unwrap(), vec![7.0, 8.0]);
        assert_eq!(b.to_vec().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_copy_from_resizes() {
        let device = CpuDevice::new();
        let mut dst = DeviceBuffer::<CpuRuntime, u8>::zeros(2, &device).unwrap();
        let src = DeviceBuffer::<CpuRuntime, u8>::from_slice(&[1, 2, 3, 4], &device).unwrap();
        dst.copy_from(&src).unwrap();
        assert_eq!(dst.to_vec().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_buffer() {
        let device = CpuDevice::new();
        let buf = DeviceBuffer::<CpuRuntime, f32>::empty(&device);
        assert!(buf.is_empty());
        assert_eq!(buf.ptr(), 0);
        assert!(buf.to_vec().unwrap().is_empty());
        assert!(buf.try_clone().unwrap().is_empty());
    }
}
