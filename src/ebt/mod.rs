//! Core EBT module: codec, protocol formats and the session driver.

pub mod codec;
pub mod format;
pub mod iter;
pub mod session;
pub mod types;
mod utils;

pub use codec::sixbit::{decode, decode_server, encode};
pub use format::config::extract_init_string;
pub use format::container::reconstruct;
pub use iter::PageRequests;
pub use session::{DirectorySource, SegmentSource, Session, SessionOptions};
pub use types::error::{EbtError, Result};
pub use types::models::*;
