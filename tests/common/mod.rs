#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Init string of a two-page document; decodes to [`GOLDEN_CONFIG_TEXT`].
pub const GOLDEN_INIT: &str = "GTxRHoElvQ9VBgvi1k3c3gJAHQ9jCp363ln53iRiDN9SEQHi1i3U0i3c3mtiEN9fBW2U3kfiFIrUDI06zT9lHgvdCuhhBuJcCp5kBQUizLxfCoNjCuxxBmCY3kfiuL3X0qPRuL3cuL3T0kPRuL3izLxRHoElpo5mBT363kJRtmh6BS2lDgr3oIZSogDRDNxsGm8RCs20tj5UFS2lDOf!tL3c3mVRDL360uU=";

pub const GOLDEN_CONFIG_TEXT: &str = r#"{"pageCount":2,"p_code":"X9","p_swf":"42","ebt_host":"https://ebt.example.com","headerInfo":"\"1100\",\"2200\"","pageInfo":"0pVhzo3ertHXzsZw0pRTzo0eCLVNtk3epj8T","mpp":1}"#;

/// Decoded form of the `pageInfo` field above.
pub const GOLDEN_PAGE_INFO: &str = "1-a-b-EV1-JO1,2-c-d-EV2-JO2";

pub fn golden_html() -> String {
    format!(
        "<html><head><script>var m_main = new Viewer();</script></head>\n<body><script>m_main.init(\"{}\");</script></body></html>",
        GOLDEN_INIT
    )
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("zlib write");
    encoder.finish().expect("zlib finish")
}

/// A raw segment: `prefix_len` filler bytes followed by a zlib stream of `payload`.
pub fn segment(prefix_len: usize, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xA5; prefix_len];
    out.extend_from_slice(&zlib(payload));
    out
}

/// Inflated primary payload: SWF-like signature, stale length field, tags.
pub fn primary_payload(tag: &str) -> Vec<u8> {
    let mut out = b"FWS\x0a".to_vec();
    out.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    out.extend_from_slice(format!("header-tags:{}", tag).as_bytes());
    out
}

pub fn secondary_payload(tag: &str) -> Vec<u8> {
    format!("body-tags:{}", tag).repeat(8).into_bytes()
}

/// Container bytes the reconstruction is expected to produce.
pub fn expected_container(primary: &[u8], secondary: &[u8]) -> Vec<u8> {
    let mut out = primary.to_vec();
    out.extend_from_slice(secondary);
    out.extend_from_slice(&[0x40, 0x00, 0x00, 0x00]);
    let len = out.len() as u32;
    out[4..8].copy_from_slice(&len.to_le_bytes());
    out
}
