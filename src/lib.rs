//! # ebt-reader
//!
//! Rebuilds the pages of an online document viewer from the host's split
//! EBT segments.
//!
//! The host publishes each page as two zlib-compressed segments behind
//! request paths encoded with a permuted six-bit alphabet, and embeds the
//! document configuration in its pages using a second permutation. This
//! crate decodes that configuration, builds the request URLs, and turns the
//! two fetched segments into one SWF container per page.
//!
//! **Note:** Fetching over HTTP is left to the caller through
//! [`SegmentSource`]; the crate ships a [`DirectorySource`] for local mirrors.
pub mod ebt;

// Re-export the main types for convenience
pub use ebt::{
    codec::{
        alphabet::{AlphabetTable, CLIENT, SERVER},
        sixbit::{decode, decode_server, decode_to_string, encode, Cursor},
    },
    extract_init_string,
    format::{
        config::decode_config_text,
        container::{reconstruct, TRAILER},
        token::{encode_tokens, segment_url},
    },
    Container, DirectorySource, DocumentConfig, EbtError, PageFields, PageOutcome, PageRequest,
    PageRequests, Result, SegmentPair, SegmentSource, Session, SessionOptions,
};
