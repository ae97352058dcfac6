//! Fixed-stride point decimation.

/// Stride used when no other value is configured.
pub const DEFAULT_STRIDE: usize = 4;

/// Keep the elements at positions `0, stride, 2*stride, ...` in order.
///
/// The result has `ceil(len / stride)` elements. A stride of 0 is treated
/// as 1 (no decimation); configuration rejects it before it gets here.
pub fn decimate<T: Copy>(points: &[T], stride: usize) -> Vec<T> {
    points.iter().step_by(stride.max(1)).copied().collect()
}
