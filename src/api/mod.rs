//! Sheetdrop web front end
//!
//! Serves the upload page and the JSON endpoints it calls.
//! Run with `sheetdrop serve` or `sheetdrop-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig, AppState};
