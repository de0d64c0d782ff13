//! Download domain types.
//!
//! The content-delivery workflow itself lives outside the core; these
//! types describe what is asked of it and what it reports back.

mod errors;
mod events;
mod types;

pub use errors::DownloadError;
pub use events::DownloadEvent;
pub use types::{DownloadId, DownloadRequest};
