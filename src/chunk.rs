use crate::error::{Error, Result};

/// Split a slice into contiguous batches of at most `size` items.
///
/// The batches cover the input exactly once, in order; the last one may be
/// shorter. Bounds both the spelling-service request size and the per-worker
/// file batches during extraction.
pub fn chunks<T>(items: &[T], size: usize) -> Result<impl Iterator<Item = &[T]>> {
    if size == 0 {
        return Err(Error::InvalidChunkSize);
    }
    Ok(items.chunks(size))
}
