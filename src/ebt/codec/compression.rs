//! Decompression of EBT segment payloads.
//!
//! Every segment is a fixed-size prefix followed by a zlib stream. The
//! prefix is skipped unread; the stream must inflate to its end marker, so
//! truncated downloads are rejected instead of yielding a short page.

use flate2::{Decompress, FlushDecompress, Status};
use log::trace;

use crate::ebt::types::error::{EbtError, Result};

/// Length of the prefix in front of the primary (`ph`) segment's stream.
pub const PRIMARY_PREFIX_LEN: usize = 40;

/// Length of the prefix in front of the secondary (`pk`) segment's stream.
pub const SECONDARY_PREFIX_LEN: usize = 32;

/// Skips `prefix_len` bytes of `segment` and inflates the rest.
///
/// `name` identifies the segment in the error.
///
/// # Errors
/// Returns [`EbtError::Decompress`] if the segment is shorter than its prefix,
/// the remainder is not a zlib stream, or the stream ends early.
pub fn inflate_segment(segment: &[u8], prefix_len: usize, name: &'static str) -> Result<Vec<u8>> {
    let fail = |reason: String| EbtError::Decompress { segment: name, reason };

    let payload = segment.get(prefix_len..).ok_or_else(|| {
        fail(format!(
            "segment is {} bytes, shorter than its {}-byte prefix",
            segment.len(),
            prefix_len
        ))
    })?;

    trace!("Inflating {} segment: {} compressed bytes", name, payload.len());

    let mut inflater = Decompress::new(true);
    let mut output = Vec::with_capacity(payload.len().saturating_mul(4).max(64));
    loop {
        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();
        let status = inflater
            .decompress_vec(&payload[consumed..], &mut output, FlushDecompress::Finish)
            .map_err(|e| fail(format!("Zlib decompression failed: {}", e)))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                if output.len() == output.capacity() {
                    output.reserve(output.capacity());
                } else if inflater.total_out() == produced && inflater.total_in() as usize == consumed {
                    return Err(fail(format!(
                        "zlib stream truncated after {} of {} bytes",
                        consumed,
                        payload.len()
                    )));
                }
            }
        }
    }

    trace!("Inflated {} segment to {} bytes", name, output.len());
    Ok(output)
}
