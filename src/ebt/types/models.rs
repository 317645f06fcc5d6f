//! Core data structures shared by the codec, format and session layers.
//!
//! This module defines:
//! - The decoded document configuration and its per-page fields
//! - The raw segment pair fetched for one page and the reassembled container
//! - Request and outcome descriptions used by the session driver

use std::collections::BTreeMap;
use std::path::PathBuf;

/// The five hyphen-separated fields the host publishes for each page.
///
/// Layout in the decoded `pageInfo` entry: `segment-aux1-aux2-ev-jo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFields {
    /// Segment identifier; also selects the page size entry (`segment - 1`).
    pub segment_id: String,
    /// Auxiliary fields the viewer carries but never sends back.
    pub aux: [String; 2],
    pub ev: String,
    pub jo: String,
}

/// Decoded configuration of one document.
///
/// Built once from the host's init string and immutable afterwards.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub page_count: u32,
    /// Page size values keyed by zero-based index, from `headerInfo`.
    pub page_sizes: BTreeMap<usize, u64>,
    /// Raw `pageInfo` entries in page order; split into [`PageFields`] on use.
    pub page_info: Vec<String>,
    pub p_code: String,
    pub p_swf: String,
    /// Base URL of the segment host, without a trailing slash.
    pub ebt_host: String,
    /// Number of pages the host allows to preview, if it says so.
    pub preview_pages: Option<u32>,
}

/// The two raw response bodies fetched for one page.
#[derive(Debug, Clone)]
pub struct SegmentPair {
    /// Header-carrying segment (`ph`), 40-byte prefix before the zlib stream.
    pub primary: Vec<u8>,
    /// Body segment (`pk`), 32-byte prefix before the zlib stream.
    pub secondary: Vec<u8>,
}

/// A fully reassembled container, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    bytes: Vec<u8>,
}

impl Container {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns `true` if the header length field matches the buffer length.
    pub fn is_consistent(&self) -> bool {
        self.declared_len() == Some(self.bytes.len() as u64)
    }

    /// The little-endian length stored at bytes 4..8.
    pub fn declared_len(&self) -> Option<u64> {
        crate::ebt::utils::read_length_field(&self.bytes).map(u64::from)
    }
}

/// Everything needed to fetch the two segments of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub primary_token: String,
    pub secondary_token: String,
    pub primary_url: String,
    pub secondary_url: String,
}

/// What the session did with one page.
#[derive(Debug)]
pub enum PageOutcome {
    /// The container was reassembled and written.
    Container { path: PathBuf, size: usize },
    /// Reassembly failed; the untouched segments were written instead.
    RawSegments {
        primary: PathBuf,
        secondary: PathBuf,
        reason: String,
    },
    /// Reassembly failed and raw segments were not kept.
    Skipped { reason: String },
}

impl PageOutcome {
    pub fn is_container(&self) -> bool {
        matches!(self, PageOutcome::Container { .. })
    }
}
