//! Six-bit codec over the permuted alphabets.
//!
//! The bit packing is the usual base64 one (three bytes ↔ four six-bit
//! symbols, `=` padding), but the symbol order comes from an
//! [`AlphabetTable`] and the two decoders stop on different conditions:
//!
//! - [`decode`] (client) always consumes a whole quartet. A gap in the first
//!   two positions ends decoding; a gap in the last two drops the rest of
//!   that quartet and decoding resumes with the next one.
//! - [`decode_server`] resolves the first two symbols of a quartet and stops
//!   before reading the other two if either is missing. A `P` it cannot
//!   resolve still counts as value 0.
//!
//! Decoding never fails on unknown symbols; they read as the end of input.

use log::trace;

use super::alphabet::{AlphabetTable, CLIENT, SERVER};
use crate::ebt::types::error::{EbtError, Result};

/// Position in an input sequence.
///
/// Reads return the value and the advanced cursor; `None` is the end-of-input
/// sentinel and never collides with a byte or six-bit value.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Next raw byte.
    pub fn read_byte(self) -> (Option<u8>, Self) {
        match self.input.get(self.pos) {
            Some(&b) => (Some(b), Self { pos: self.pos + 1, ..self }),
            None => (None, self),
        }
    }

    /// Next symbol resolved through `table`; unknown symbols read as the sentinel.
    pub fn read_value(self, table: &AlphabetTable) -> (Option<u8>, Self) {
        let (symbol, next) = self.read_byte();
        (symbol.and_then(|s| table.value(s)), next)
    }

    /// Next symbol resolved through the server alphabet, with `P` as 0.
    pub fn read_server_value(self) -> (Option<u8>, Self) {
        let (symbol, next) = self.read_byte();
        // `P` is index 0 of the current table; the fallback keeps it at 0 if
        // the permutation is ever replaced.
        let value = symbol.and_then(|s| SERVER.value(s).or_else(|| (s == b'P').then_some(0)));
        (value, next)
    }
}

/// Encode bytes with the client alphabet.
pub fn encode(input: &[u8]) -> String {
    encode_with(&CLIENT, input)
}

/// Encode bytes with any alphabet. Output length is always a multiple of 4.
pub fn encode_with(table: &AlphabetTable, input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);
    let mut cursor = Cursor::new(input);
    let sym = |v: u8| char::from(table.symbol(v));

    loop {
        let (b0, next) = cursor.read_byte();
        let Some(b0) = b0 else { break };
        let (b1, next) = next.read_byte();
        let (b2, next) = next.read_byte();
        cursor = next;

        out.push(sym(b0 >> 2));
        match (b1, b2) {
            (Some(b1), Some(b2)) => {
                out.push(sym(((b0 << 4) & 0x30) | (b1 >> 4)));
                out.push(sym(((b1 << 2) & 0x3C) | (b2 >> 6)));
                out.push(sym(b2 & 0x3F));
            }
            (Some(b1), None) => {
                out.push(sym(((b0 << 4) & 0x30) | (b1 >> 4)));
                out.push(sym((b1 << 2) & 0x3C));
                out.push('=');
                break;
            }
            (None, _) => {
                out.push(sym((b0 << 4) & 0x30));
                out.push_str("==");
                break;
            }
        }
    }

    trace!("Encoded {} bytes into {} symbols", input.len(), out.len());
    out
}

/// Decode a client-alphabet string.
pub fn decode(input: &str) -> Vec<u8> {
    decode_with(&CLIENT, input)
}

/// Decode with any alphabet, using the client termination rule.
///
/// A quartet with padding or an unknown symbol in its third or fourth slot
/// keeps the bytes resolved so far and decoding continues with the next
/// quartet, so `Hv==Huxj` decodes to `aabc`.
pub fn decode_with(table: &AlphabetTable, input: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    let mut cursor = Cursor::new(input.as_bytes());

    loop {
        let mut quartet = [None; 4];
        for slot in quartet.iter_mut() {
            let (value, next) = cursor.read_value(table);
            *slot = value;
            cursor = next;
        }

        let (Some(v0), Some(v1)) = (quartet[0], quartet[1]) else { break };
        out.push((v0 << 2) | (v1 >> 4));
        let Some(v2) = quartet[2] else { continue };
        out.push((v1 << 4) | (v2 >> 2));
        let Some(v3) = quartet[3] else { continue };
        out.push((v2 << 6) | v3);
    }

    trace!("Decoded {} symbols into {} bytes", cursor.position(), out.len());
    out
}

/// Decode a client-alphabet string into UTF-8 text.
pub fn decode_to_string(input: &str) -> Result<String> {
    String::from_utf8(decode(input))
        .map_err(|e| EbtError::Decode(format!("client token is not UTF-8: {}", e)))
}

/// Decode a string produced by the host with the server alphabet.
pub fn decode_server(input: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    let mut cursor = Cursor::new(input.as_bytes());

    loop {
        let (v0, next) = cursor.read_server_value();
        let (v1, next) = next.read_server_value();
        cursor = next;
        let (Some(v0), Some(v1)) = (v0, v1) else { break };

        let (v2, next) = cursor.read_server_value();
        let (v3, next) = next.read_server_value();
        cursor = next;

        out.push((v0 << 2) | (v1 >> 4));
        let Some(v2) = v2 else { break };
        out.push((v1 << 4) | (v2 >> 2));
        let Some(v3) = v3 else { break };
        out.push((v2 << 6) | v3);
    }

    trace!("Server-decoded {} symbols into {} bytes", cursor.position(), out.len());
    out
}

/// Decode a server-alphabet string into UTF-8 text.
pub fn decode_server_to_string(input: &str) -> Result<String> {
    String::from_utf8(decode_server(input))
        .map_err(|e| EbtError::Decode(format!("server string is not UTF-8: {}", e)))
}
