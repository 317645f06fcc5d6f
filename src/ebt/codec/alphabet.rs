//! Permuted six-bit alphabets used by the viewer and the segment host.
//!
//! Both sides use the same 64 symbols (letters, digits, `!` and `+`) in
//! different orders:
//! - [`CLIENT`]: builds outgoing request tokens and decodes them back
//! - [`SERVER`]: decodes the configuration the host embeds in its pages
//!
//! The client permutation is declared with `O` at index 4 and `M` at index 6
//! and then overridden to `M` and `O`. Hosts reject tokens built from the
//! declared order, so the overrides are part of the table.

/// Marker for "symbol not in this alphabet" in the decode direction.
const ABSENT: u8 = 0xFF;

const CLIENT_DECLARED: [u8; 64] = *b"PJKLONMI3xyz012wvprqstuoHBCDEFGAnhijklmgfZabcdeYXRSTUVWQ!56789+4";
const SERVER_DECLARED: [u8; 64] = *b"PJLKMNOI3xyz021wvrpqstouHCFBDEGAnhikjlmgfZbacedYRXTSUVQW!56789+4";

const CLIENT_SYMBOLS: [u8; 64] = with_override(with_override(CLIENT_DECLARED, 4, b'M'), 6, b'O');

const _: () = assert!(is_permutation(&CLIENT_SYMBOLS));
const _: () = assert!(is_permutation(&SERVER_DECLARED));

/// Alphabet of the viewer: encodes request tokens, decodes them back.
pub static CLIENT: AlphabetTable = AlphabetTable::new(CLIENT_SYMBOLS);

/// Alphabet of the host: decodes the embedded configuration string.
pub static SERVER: AlphabetTable = AlphabetTable::new(SERVER_DECLARED);

/// One 64-symbol alphabet with both lookup directions.
#[derive(Debug)]
pub struct AlphabetTable {
    encode: [u8; 64],
    decode: [u8; 256],
}

impl AlphabetTable {
    const fn new(encode: [u8; 64]) -> Self {
        Self {
            encode,
            decode: invert(&encode),
        }
    }

    /// Symbol for a six-bit value. Only the low six bits of `value` are used.
    #[inline]
    pub fn symbol(&self, value: u8) -> u8 {
        self.encode[(value & 0x3F) as usize]
    }

    /// Six-bit value of a symbol, or `None` if the symbol is not in this alphabet.
    #[inline]
    pub fn value(&self, symbol: u8) -> Option<u8> {
        match self.decode[symbol as usize] {
            ABSENT => None,
            v => Some(v),
        }
    }

    /// The encode direction, in value order.
    pub fn symbols(&self) -> &[u8; 64] {
        &self.encode
    }
}

const fn with_override(mut table: [u8; 64], index: usize, symbol: u8) -> [u8; 64] {
    table[index] = symbol;
    table
}

const fn invert(encode: &[u8; 64]) -> [u8; 256] {
    let mut decode = [ABSENT; 256];
    let mut i = 0;
    while i < 64 {
        decode[encode[i] as usize] = i as u8;
        i += 1;
    }
    decode
}

const fn is_permutation(table: &[u8; 64]) -> bool {
    let mut seen = [false; 256];
    let mut i = 0;
    while i < 64 {
        let s = table[i] as usize;
        if seen[s] || s == b'=' as usize {
            return false;
        }
        seen[s] = true;
        i += 1;
    }
    true
}
