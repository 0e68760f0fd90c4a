//! Common test utilities
#![allow(dead_code)]

/// Assert two f32 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Row-major strides for `shape`
pub fn contiguous_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for d in (0..shape.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1];
    }
    strides
}

/// Log-softmax along `axis` computed in f64 with plain multi-index loops
pub fn reference_log_softmax(data: &[f32], shape: &[usize], axis: usize) -> Vec<f32> {
    if shape.is_empty() {
        return vec![0.0];
    }
    let strides = contiguous_strides(shape);
    let dim = shape[axis];
    let mut out = vec![0.0f32; data.len()];
    if dim == 0 {
        return out;
    }

    for flat in 0..data.len() {
        // Only start a reduction at positions whose axis index is 0
        if (flat / strides[axis]) % dim != 0 {
            continue;
        }
        let idx = |d: usize| flat + d * strides[axis];
        let m = (0..dim)
            .map(|d| data[idx(d)] as f64)
            .fold(f64::NEG_INFINITY, f64::max);
        let s: f64 = (0..dim).map(|d| (data[idx(d)] as f64 - m).exp()).sum();
        for d in 0..dim {
            out[idx(d)] = (data[idx(d)] as f64 - m - s.ln()) as f32;
        }
    }
    out
}

/// Deterministic pseudo-random values in `[-scale, scale)`
pub fn pseudo_random_f32(n: usize, seed: u64, scale: f32) -> Vec<f32> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = ((state >> 40) as f32) / ((1u64 << 24) as f32);
            (unit * 2.0 - 1.0) * scale
        })
        .collect()
}

/// Assert two f32 slices agree, including non-finite entries
///
/// NaN positions must match exactly, infinities must be equal, and finite
/// entries are compared as in [`assert_allclose_f32`].
pub fn assert_allclose_nonfinite_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(
            x.is_nan(),
            y.is_nan(),
            "{}: NaN pattern differs at element {}: {} vs {}",
            msg,
            i,
            x,
            y
        );
        if x.is_nan() {
            continue;
        }
        if x.is_infinite() || y.is_infinite() {
            assert_eq!(x, y, "{}: element {} differs: {} vs {}", msg, i, x, y);
            continue;
        }
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Transpose a row-major `[rows, cols]` matrix
pub fn transpose_2d(data: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; data.len()];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = data[r * cols + c];
        }
    }
    out
}
