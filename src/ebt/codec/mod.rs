//! Codec layer: alphabets, the six-bit codec and segment decompression.
//!
//! # Submodules
//!
//! - [`alphabet`][]: The client and server symbol permutations
//! - [`sixbit`][]: Cursor-based encoder and the two decoders
//! - [`compression`][]: Prefix stripping and zlib inflation of segments

pub mod alphabet;
pub mod compression;
pub mod sixbit;
