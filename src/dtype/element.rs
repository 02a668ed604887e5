//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::Pod;
use std::fmt::{Debug, Display};
use std::ops::Add;

/// Trait for types that can be stored in a sparse container's value array
///
/// # Bounds
/// - `Pod` - byte-level transfer to and from device memory (bytemuck)
/// - `Add` - duplicate entries are combined by addition when building from triplets
/// - `PartialEq` - structural-zero detection when building from dense data
/// - `Debug + Display` - text rendering of stored entries
pub trait Element:
    Copy + Send + Sync + Pod + 'static + Add<Output = Self> + PartialEq + Debug + Display
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Additive identity, returned for positions with no stored entry
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Returns true if this value equals the additive identity
    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:ident, $zero:expr, $one:expr;)*) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                #[inline]
                fn zero() -> Self {
                    $zero
                }

                #[inline]
                fn one() -> Self {
                    $one
                }
            }
        )*
    };
}

impl_element! {
    f64 => F64, 0.0, 1.0;
    f32 => F32, 0.0, 1.0;
    i64 => I64, 0, 1;
    i32 => I32, 0, 1;
    i16 => I16, 0, 1;
    i8 => I8, 0, 1;
    u64 => U64, 0, 1;
    u32 => U32, 0, 1;
    u16 => U16, 0, 1;
    u8 => U8, 0, 1;
}

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
impl_element! {
    half::f16 => F16, half::f16::ZERO, half::f16::ONE;
    half::bf16 => BF16, half::bf16::ZERO, half::bf16::ONE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
    }

    #[test]
    fn test_element_identities() {
        assert!(0.0f32.is_zero());
        assert!(!f64::one().is_zero());
        assert_eq!(i64::zero() + i64::one(), 1);
    }

    #[cfg(feature = "f16")]
    #[test]
    fn test_half_elements() {
        assert_eq!(half::f16::DTYPE, DType::F16);
        assert!(half::bf16::zero().is_zero());
    }
}
