use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::format::container;
use super::iter::PageRequests;
use super::types::error::{EbtError, Result};
use super::types::models::{DocumentConfig, PageOutcome, PageRequest, SegmentPair};

/// Something that can return the body of a segment URL.
///
/// Network transports live outside this crate and plug in here.
pub trait SegmentSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F> SegmentSource for F
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self(url)
    }
}

/// Serves segments from a local mirror holding `getebt-<token>.ebt` files.
///
/// The file is selected by the last path segment of the URL, so the host part
/// of the URL is ignored.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl SegmentSource for DirectorySource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let name = url.rsplit('/').next().unwrap_or(url);
        let path = self.root.join(name);
        debug!("Reading segment {}", path.display());
        Ok(fs::read(path)?)
    }
}

/// Settings for one download session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Directory receiving `<page>.swf` and the raw fallback files.
    pub output_dir: PathBuf,
    /// First page to process, 1-based.
    pub first_page: u32,
    /// Last page to process; defaults to the document's page count.
    pub last_page: Option<u32>,
    /// Write `<page>-ph.ebt` / `<page>-pk.ebt` when reassembly fails.
    pub keep_raw_on_failure: bool,
}

impl SessionOptions {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            first_page: 1,
            last_page: None,
            keep_raw_on_failure: true,
        }
    }

    /// Restricts the session to a single page.
    pub fn only_page(mut self, page: u32) -> Self {
        self.first_page = page;
        self.last_page = Some(page);
        self
    }
}

/// Drives the per-page pipeline for one document.
///
/// The session owns the decoded configuration for its whole lifetime and
/// never mutates it; pages are independent of each other.
#[derive(Debug)]
pub struct Session {
    config: DocumentConfig,
    options: SessionOptions,
}

impl Session {
    pub fn new(config: DocumentConfig, options: SessionOptions) -> Self {
        Self { config, options }
    }

    /// Builds a session from the markup of the document's host page.
    pub fn from_html(html: &str, options: SessionOptions) -> Result<Self> {
        Ok(Self::new(DocumentConfig::from_html(html)?, options))
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Pages this session covers.
    pub fn page_range(&self) -> RangeInclusive<u32> {
        let last = self.options.last_page.unwrap_or(self.config.page_count);
        self.options.first_page.max(1)..=last
    }

    /// Request descriptions for every page in [`page_range`](Self::page_range).
    pub fn iter_requests(&self) -> PageRequests<'_> {
        PageRequests::new(&self.config, self.page_range())
    }

    /// Fetches both segments of a page.
    pub fn fetch_segments<S: SegmentSource + ?Sized>(
        &self,
        source: &S,
        request: &PageRequest,
    ) -> Result<SegmentPair> {
        let primary = source.fetch(&request.primary_url)?;
        let secondary = source.fetch(&request.secondary_url)?;
        debug!(
            "Page {}: fetched ph={} bytes, pk={} bytes",
            request.page,
            primary.len(),
            secondary.len()
        );
        Ok(SegmentPair { primary, secondary })
    }

    /// Fetches, reassembles and writes one page.
    ///
    /// A reassembly failure is not an error: the raw segments are written
    /// next to where the container would have been and the outcome says so.
    ///
    /// # Errors
    /// Configuration errors for the page, fetch errors and write errors.
    pub fn process_page<S: SegmentSource + ?Sized>(&self, source: &S, page: u32) -> Result<PageOutcome> {
        let request = self.config.page_request(page)?;
        let segments = self.fetch_segments(source, &request)?;
        self.store(page, &segments)
    }

    /// Reassembles already fetched segments and writes the result.
    pub fn store(&self, page: u32, segments: &SegmentPair) -> Result<PageOutcome> {
        fs::create_dir_all(&self.options.output_dir)?;

        match container::reconstruct(segments) {
            Ok(container) => {
                let path = self.options.output_dir.join(format!("{}.swf", page));
                fs::write(&path, container.as_bytes())?;
                info!("Page {}: wrote {} ({} bytes)", page, path.display(), container.len());
                Ok(PageOutcome::Container {
                    path,
                    size: container.len(),
                })
            }
            Err(e) if e.is_reconstruction_failure() => self.keep_raw(page, segments, e),
            Err(e) => Err(e),
        }
    }

    fn keep_raw(&self, page: u32, segments: &SegmentPair, error: EbtError) -> Result<PageOutcome> {
        let reason = error.to_string();
        if !self.options.keep_raw_on_failure {
            warn!("Page {}: reassembly failed, skipping: {}", page, reason);
            return Ok(PageOutcome::Skipped { reason });
        }

        let primary = self.options.output_dir.join(format!("{}-ph.ebt", page));
        let secondary = self.options.output_dir.join(format!("{}-pk.ebt", page));
        fs::write(&primary, &segments.primary)?;
        fs::write(&secondary, &segments.secondary)?;
        warn!(
            "Page {}: reassembly failed ({}), kept raw segments {} and {}",
            page,
            reason,
            primary.display(),
            secondary.display()
        );
        Ok(PageOutcome::RawSegments {
            primary,
            secondary,
            reason,
        })
    }

    /// Processes every page in range, continuing past failed pages.
    pub fn process_all<S: SegmentSource + ?Sized>(&self, source: &S) -> Vec<(u32, Result<PageOutcome>)> {
        let range = self.page_range();
        info!(
            "Processing pages {}..={} of {}",
            range.start(),
            range.end(),
            self.config.page_count
        );
        range
            .map(|page| {
                let outcome = self.process_page(source, page);
                if let Err(e) = &outcome {
                    warn!("Page {} failed: {}", page, e);
                }
                (page, outcome)
            })
            .collect()
    }
}
