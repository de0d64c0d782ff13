//! Services composed from ports.
//!
//! Services own no OS resources themselves; they are constructed at the
//! composition root with concrete port implementations injected.

mod download_orchestrator;
mod helper_service;

pub use download_orchestrator::DownloadOrchestrator;
pub use helper_service::{BatchSummary, HelperService};
