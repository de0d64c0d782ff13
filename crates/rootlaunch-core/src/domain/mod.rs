//! Domain value types.
//!
//! These types are pure data: they carry no file descriptors, process
//! handles or OS attribute objects. Adapters translate them into
//! platform calls.

mod app_store;
mod helper;
mod identity;
mod launch;

pub use app_store::{APP_STORE_DOMAINS, extract_app_id, is_app_store_url};
pub use helper::HelperCommand;
pub use identity::{IdentityOverride, ROOT_PERSONA_ID};
pub use launch::{LaunchRequest, LaunchResult};
