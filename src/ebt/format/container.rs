//! # Container Reassembly
//!
//! Turns the two fetched segments of a page into one SWF container.
//!
//! ```text
//! primary   [40-byte prefix][zlib: header + first tags]
//! secondary [32-byte prefix][zlib: remaining tags]
//!
//! container = inflate(primary) ++ inflate(secondary) ++ 40 00 00 00
//!             └─ bytes 4..8: total container length, u32 LE
//! ```
//!
//! The length field inflated from the primary segment is stale. It is first
//! set to the primary's own length and then to the final length once the
//! trailer is in place.

use log::{debug, trace};

use crate::ebt::codec::compression::{inflate_segment, PRIMARY_PREFIX_LEN, SECONDARY_PREFIX_LEN};
use crate::ebt::types::error::Result;
use crate::ebt::types::models::{Container, SegmentPair};
use crate::ebt::utils::patch_length_field;

/// Bytes appended after the secondary segment.
pub const TRAILER: [u8; 4] = [0x40, 0x00, 0x00, 0x00];

/// Reassembles a page container from its two raw segments.
///
/// # Errors
/// - [`EbtError::Decompress`](crate::EbtError::Decompress) if either segment
///   does not inflate
/// - [`EbtError::InvalidFormat`](crate::EbtError::InvalidFormat) if the
///   inflated primary is too short to carry the length field
///
/// A primary under 8 bytes is rejected rather than grown to make room for
/// the length field, so such a page ends up as raw segments in a session.
///
/// Nothing is returned on failure; the segments are left untouched.
pub fn reconstruct(segments: &SegmentPair) -> Result<Container> {
    let mut primary = inflate_segment(&segments.primary, PRIMARY_PREFIX_LEN, "primary")?;
    patch_length_field(&mut primary)?;
    trace!("Primary segment inflated and patched: {} bytes", primary.len());

    let secondary = inflate_segment(&segments.secondary, SECONDARY_PREFIX_LEN, "secondary")?;

    let mut out = primary;
    out.reserve(secondary.len() + TRAILER.len());
    out.extend_from_slice(&secondary);
    out.extend_from_slice(&TRAILER);
    patch_length_field(&mut out)?;

    debug!(
        "Container reassembled: {} + {} + {} = {} bytes",
        out.len() - secondary.len() - TRAILER.len(),
        secondary.len(),
        TRAILER.len(),
        out.len()
    );
    Ok(Container::from_bytes(out))
}
