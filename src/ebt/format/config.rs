//! # Document Configuration
//!
//! The host page embeds its configuration as one server-alphabet string
//! passed to the viewer's init call:
//!
//! ```text
//! m_main.init("<server-alphabet string>");
//!       │
//!       ▼ decode_server + UTF-8          → EbtError::Decode on failure
//! {"pageCount":…, "headerInfo":…, "pageInfo":"<server-alphabet string>", …}
//!       │
//!       ▼ serde_json + field checks      → EbtError::Protocol on failure
//! DocumentConfig
//! ```
//!
//! The nested `pageInfo` string is decoded with the same alphabet and split
//! into one `segment-aux1-aux2-ev-jo` entry per page.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use log::{debug, info, warn};
use regex::Regex;
use serde::Deserialize;

use crate::ebt::codec::sixbit;
use crate::ebt::types::error::{EbtError, Result};
use crate::ebt::types::models::{DocumentConfig, PageFields};

/// Matches the quoted argument of the viewer's init call.
static INIT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn init_regex() -> &'static Regex {
    INIT_PATTERN.get_or_init(|| Regex::new(r#"m_main\.init\("(.*?)"\)"#).expect("Invalid init call regex pattern"))
}

/// Finds the first `m_main.init("…")` call in the host page and returns its argument.
pub fn extract_init_string(html: &str) -> Result<&str> {
    init_regex()
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| EbtError::Protocol("no m_main.init(\"…\") call found in page".to_string()))
}

/// Decodes the init string into the configuration's JSON text.
pub fn decode_config_text(init: &str) -> Result<String> {
    let text = sixbit::decode_server_to_string(init)?;
    debug!("Decoded configuration text: {} bytes", text.len());
    Ok(text)
}

/// Values the host sends either as JSON strings or as bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
        }
    }

    fn to_u32(&self, field: &str) -> Result<u32> {
        let parsed = match self {
            Scalar::Text(s) => s.trim().parse::<u32>().ok(),
            Scalar::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        };
        parsed.ok_or_else(|| EbtError::Protocol(format!("{} is not a page count: {:?}", field, self)))
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "pageCount")]
    page_count: Scalar,
    #[serde(rename = "headerInfo")]
    header_info: String,
    #[serde(rename = "pageInfo")]
    page_info: String,
    p_code: Scalar,
    p_swf: Scalar,
    ebt_host: String,
    #[serde(default)]
    mpp: Option<Scalar>,
}

impl DocumentConfig {
    /// Extracts, decodes and parses the configuration embedded in a host page.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_init_string(extract_init_string(html)?)
    }

    /// Decodes and parses the init string handed to the viewer.
    pub fn from_init_string(init: &str) -> Result<Self> {
        Self::parse(&decode_config_text(init)?)
    }

    /// Parses the decoded configuration JSON.
    ///
    /// # Errors
    /// - [`EbtError::Protocol`] if the JSON or any field has the wrong shape
    /// - [`EbtError::Decode`] if the nested `pageInfo` string does not decode
    pub fn parse(text: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(text)?;

        let page_count = raw.page_count.to_u32("pageCount")?;
        let preview_pages = raw.mpp.as_ref().map(|m| m.to_u32("mpp")).transpose()?;
        let page_sizes = parse_header_info(&raw.header_info)?;

        let page_info: Vec<String> = sixbit::decode_server_to_string(&raw.page_info)?
            .split(',')
            .map(str::to_owned)
            .collect();

        if page_info.len() != page_count as usize {
            warn!(
                "pageInfo lists {} pages but pageCount is {}",
                page_info.len(),
                page_count
            );
        }

        let config = DocumentConfig {
            page_count,
            page_sizes,
            page_info,
            p_code: raw.p_code.into_string(),
            p_swf: raw.p_swf.into_string(),
            ebt_host: raw.ebt_host.trim_end_matches('/').to_string(),
            preview_pages,
        };

        info!(
            "Configuration parsed: pages={}, sizes={}, host='{}', preview={:?}",
            config.page_count,
            config.page_sizes.len(),
            config.ebt_host,
            config.preview_pages
        );
        Ok(config)
    }

    /// Splits the `pageInfo` entry of a 1-based page into its fields.
    pub fn page_fields(&self, page: u32) -> Result<PageFields> {
        let entry = page
            .checked_sub(1)
            .and_then(|idx| self.page_info.get(idx as usize))
            .ok_or_else(|| {
                EbtError::Config(format!(
                    "page {} has no pageInfo entry ({} entries)",
                    page,
                    self.page_info.len()
                ))
            })?;
        PageFields::parse(entry)
    }

    /// Page size stored for a segment id (1-based, like the id itself).
    pub fn page_size(&self, segment_id: &str) -> Result<u64> {
        let id: usize = segment_id
            .parse()
            .map_err(|_| EbtError::Config(format!("segment id {:?} is not a number", segment_id)))?;
        id.checked_sub(1)
            .and_then(|idx| self.page_sizes.get(&idx))
            .copied()
            .ok_or_else(|| EbtError::Config(format!("no page size for segment {}", id)))
    }
}

impl PageFields {
    /// Parses one `segment-aux1-aux2-ev-jo` entry.
    pub fn parse(entry: &str) -> Result<Self> {
        let fields: Vec<&str> = entry.split('-').collect();
        if fields.len() < 5 {
            return Err(EbtError::Config(format!(
                "pageInfo entry {:?} has {} fields, expected 5",
                entry,
                fields.len()
            )));
        }
        if fields[0].is_empty() {
            return Err(EbtError::Config(format!("pageInfo entry {:?} has no segment id", entry)));
        }
        Ok(PageFields {
            segment_id: fields[0].to_string(),
            aux: [fields[1].to_string(), fields[2].to_string()],
            ev: fields[3].to_string(),
            jo: fields[4].to_string(),
        })
    }
}

/// Parses `"123","456",…` into sizes keyed by zero-based index.
fn parse_header_info(header_info: &str) -> Result<BTreeMap<usize, u64>> {
    if header_info.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    header_info
        .split(',')
        .enumerate()
        .map(|(idx, item)| {
            let cleaned = item.replace('"', "");
            cleaned
                .trim()
                .parse::<u64>()
                .map(|size| (idx, size))
                .map_err(|_| EbtError::Protocol(format!("headerInfo item {} is not a number: {:?}", idx, item)))
        })
        .collect()
}
