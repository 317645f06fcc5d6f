//! Low-level byte field helpers

use byteorder::{ByteOrder, LittleEndian};

use super::types::error::{EbtError, Result};

/// Byte range of the container's total-length field.
pub const LENGTH_FIELD: std::ops::Range<usize> = 4..8;

/// Overwrite the 4-byte little-endian length field with the buffer's own length.
///
/// Fails if the buffer is too short to hold the field or too long for a u32.
pub fn patch_length_field(buf: &mut [u8]) -> Result<()> {
    if buf.len() < LENGTH_FIELD.end {
        return Err(EbtError::InvalidFormat(format!(
            "buffer of {} bytes is too short for the length field",
            buf.len()
        )));
    }
    let len = u32::try_from(buf.len()).map_err(|_| {
        EbtError::InvalidFormat(format!("buffer of {} bytes overflows the length field", buf.len()))
    })?;
    LittleEndian::write_u32(&mut buf[LENGTH_FIELD], len);
    Ok(())
}

/// Read the 4-byte little-endian length field, if present.
pub fn read_length_field(buf: &[u8]) -> Option<u32> {
    buf.get(LENGTH_FIELD).map(LittleEndian::read_u32)
}
