//! ARM64 exp-sum kernels

pub mod neon;
