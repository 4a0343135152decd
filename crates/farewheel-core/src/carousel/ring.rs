//! Circular index arithmetic

/// Wrap any integer index into `[0, len)`.
///
/// `len` must be at least 1; a carousel is never constructed empty.
#[inline]
pub fn wrap(index: i64, len: usize) -> usize {
    debug_assert!(len > 0, "wrap called with an empty ring");
    index.rem_euclid(len as i64) as usize
}

/// Position of `index` relative to `front`: 0 is the center card, 1 the
/// right neighbor, `len - 1` the left neighbor.
#[inline]
pub fn ring_offset(index: usize, front: usize, len: usize) -> usize {
    wrap(index as i64 - front as i64, len)
}
