//! Runtime configuration for the log-softmax entry points

use crate::kernels::simd::{SimdLevel, detect_simd};

/// How the exp-sum pass may use vector instructions
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SimdPolicy {
    /// Use the best level the CPU supports
    #[default]
    Auto,
    /// Always use the scalar pass
    ScalarOnly,
    /// Use at most the given level
    ///
    /// A level the CPU lacks is lowered to the detected one; a level of a
    /// different architecture runs as scalar.
    AtMost(SimdLevel),
}

impl SimdPolicy {
    /// The level a call under this policy runs at on this CPU
    pub fn resolve(self) -> SimdLevel {
        match self {
            Self::Auto => detect_simd(),
            Self::ScalarOnly => SimdLevel::Scalar,
            Self::AtMost(level) => level.min(detect_simd()),
        }
    }
}

/// Options for [`log_softmax_out_with_config`](super::log_softmax_out_with_config)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LogSoftmaxConfig {
    /// SIMD policy for the exp-sum pass
    pub simd: SimdPolicy,
}

impl LogSoftmaxConfig {
    /// Config that never uses vector instructions
    pub fn scalar() -> Self {
        Self {
            simd: SimdPolicy::ScalarOnly,
        }
    }

    /// Set the SIMD policy
    pub fn with_simd(mut self, simd: SimdPolicy) -> Self {
        self.simd = simd;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto() {
        assert_eq!(LogSoftmaxConfig::default().simd, SimdPolicy::Auto);
        assert_eq!(SimdPolicy::Auto.resolve(), detect_simd());
    }

    #[test]
    fn test_scalar_only() {
        assert_eq!(LogSoftmaxConfig::scalar().simd.resolve(), SimdLevel::Scalar);
    }

    #[test]
    fn test_at_most_never_exceeds_detected() {
        for level in [
            SimdLevel::Avx512,
            SimdLevel::Avx2Fma,
            SimdLevel::NeonFp16,
            SimdLevel::Neon,
            SimdLevel::Scalar,
        ] {
            let resolved = SimdPolicy::AtMost(level).resolve();
            assert!(resolved <= level);
            assert!(resolved <= detect_simd());
        }
    }
}
