//! Iterator over the request descriptions of a document's pages.
//!
//! # Example
//! ```no_run
//! # use ebt_reader::{DocumentConfig, PageRequests};
//! # let html = std::fs::read_to_string("page.html").unwrap();
//! let config = DocumentConfig::from_html(&html).unwrap();
//! for request in PageRequests::new(&config, 1..=config.page_count) {
//!     let request = request.unwrap();
//!     println!("{} {}", request.primary_url, request.secondary_url);
//! }
//! ```

use std::ops::RangeInclusive;

use super::types::error::Result;
use super::types::models::{DocumentConfig, PageRequest};

/// Yields one [`PageRequest`] per page in the range.
///
/// A page whose fields are malformed yields an error without ending the
/// iteration, so callers can skip it and continue.
pub struct PageRequests<'a> {
    config: &'a DocumentConfig,
    pages: RangeInclusive<u32>,
}

impl<'a> PageRequests<'a> {
    pub fn new(config: &'a DocumentConfig, pages: RangeInclusive<u32>) -> Self {
        Self { config, pages }
    }
}

impl<'a> Iterator for PageRequests<'a> {
    type Item = Result<PageRequest>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.pages.next()?;
        Some(self.config.page_request(page))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pages.size_hint()
    }
}
