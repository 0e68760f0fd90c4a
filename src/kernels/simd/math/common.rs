//! Shared constants for SIMD math functions
//!
//! Keeping the coefficients in one place guarantees the AVX2, AVX-512 and
//! NEON kernels evaluate the same polynomial.

/// Taylor series coefficients for exp(r) where r is in [-ln(2)/2, ln(2)/2]
/// exp(r) ≈ 1 + r + r²/2! + r³/3! + r⁴/4! + r⁵/5! + r⁶/6!
///
/// The full function is exp(x) = 2^n * exp(r) with n = round(x * log2(e))
/// and r = x - n * ln(2); 2^n is assembled directly in the exponent bits.
pub mod exp_coefficients {
    pub const C0_F32: f32 = 1.0;
    pub const C1_F32: f32 = 1.0;
    pub const C2_F32: f32 = 0.5;
    pub const C3_F32: f32 = 1.0 / 6.0;
    pub const C4_F32: f32 = 1.0 / 24.0;
    pub const C5_F32: f32 = 1.0 / 120.0;
    pub const C6_F32: f32 = 1.0 / 720.0;

    /// Input clamp range to avoid overflow/underflow of the 2^n construction
    pub const MIN_F32: f32 = -88.0;
    pub const MAX_F32: f32 = 88.0;

    /// IEEE 754 single-precision exponent bias
    pub const EXP_BIAS_F32: i32 = 127;
}
