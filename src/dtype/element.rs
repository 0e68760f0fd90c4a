//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Sub};

/// Trait for types that can be elements of a tensor
///
/// Connects Rust's type system to the runtime dtype tag. `Pod + Zeroable`
/// lets storage hand out typed views of its word buffer with bytemuck.
pub trait Element:
    Copy
    + Clone
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + PartialOrd
    + std::fmt::Debug
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;
}

macro_rules! impl_element_primitive {
    ($($t:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$dtype;
            }
        )*
    };
}

impl_element_primitive!(
    f64 => F64,
    f32 => F32,
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u8 => U8,
);

impl Element for half::f16 {
    const DTYPE: DType = DType::F16;
}

impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;
}
