//! ARM64 SIMD math functions

pub mod neon;
