//! Protocol layer between the host's data and the codec.
//!
//! # Module Organization
//!
//! - [`config`]: Extracts and decodes the document configuration
//! - [`token`]: Builds the per-page request tokens and URLs
//! - [`container`]: Reassembles two segments into one container
//!
//! # Architecture
//!
//! ```text
//! host page ──► config::extract_init_string ──► DocumentConfig
//!                                                   │
//!                                 token::page_request (per page)
//!                                                   │
//!                          [two fetched segments] ◄─┘
//!                                   │
//!                                   ▼
//!                       container::reconstruct ──► Container
//! ```

pub mod config;
pub mod container;
pub mod token;
