//! Request tokens for the two segments of a page.
//!
//! ```text
//! primary   (ph): encode("{segment}-0-{size}-{p_swf}")
//! secondary (pk): encode("{segment}-{ev}-{jo}-{p_swf}-{page}-{p_code}")
//! url           : "{ebt_host}/getebt-{token}.ebt"
//! ```
//!
//! `size` is the `headerInfo` entry selected by the segment id, not by the
//! page number.

use log::debug;

use crate::ebt::codec::sixbit;
use crate::ebt::types::error::Result;
use crate::ebt::types::models::{DocumentConfig, PageFields, PageRequest};

/// Plain text of the primary segment token.
pub fn primary_source(fields: &PageFields, page_size: u64, p_swf: &str) -> String {
    format!("{}-0-{}-{}", fields.segment_id, page_size, p_swf)
}

/// Plain text of the secondary segment token.
pub fn secondary_source(fields: &PageFields, p_swf: &str, page: u32, p_code: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}-{}",
        fields.segment_id, fields.ev, fields.jo, p_swf, page, p_code
    )
}

/// Encodes both tokens of a page: `(primary, secondary)`.
pub fn encode_tokens(
    fields: &PageFields,
    page_size: u64,
    page: u32,
    p_swf: &str,
    p_code: &str,
) -> (String, String) {
    let primary = sixbit::encode(primary_source(fields, page_size, p_swf).as_bytes());
    let secondary = sixbit::encode(secondary_source(fields, p_swf, page, p_code).as_bytes());
    (primary, secondary)
}

/// URL of one segment on the host.
pub fn segment_url(host: &str, token: &str) -> String {
    format!("{}/getebt-{}.ebt", host.trim_end_matches('/'), token)
}

impl DocumentConfig {
    /// Builds the tokens and URLs for a 1-based page.
    ///
    /// # Errors
    /// Returns [`EbtError::Config`](crate::EbtError::Config) if the page has
    /// no usable `pageInfo` entry or its segment has no page size.
    pub fn page_request(&self, page: u32) -> Result<PageRequest> {
        let fields = self.page_fields(page)?;
        let page_size = self.page_size(&fields.segment_id)?;
        let (primary_token, secondary_token) =
            encode_tokens(&fields, page_size, page, &self.p_swf, &self.p_code);

        let request = PageRequest {
            page,
            primary_url: segment_url(&self.ebt_host, &primary_token),
            secondary_url: segment_url(&self.ebt_host, &secondary_token),
            primary_token,
            secondary_token,
        };
        debug!(
            "Page {}: segment={}, size={}, ph={}, pk={}",
            page, fields.segment_id, page_size, request.primary_url, request.secondary_url
        );
        Ok(request)
    }
}
