//! # Curator Gateway
//!
//! Upload and moderation gateway for member photo galleries.
//!
//! This crate provides:
//! - **Upload sessions**: Browsers obtain a direct upload URL, push the
//!   bytes themselves, then confirm completion
//! - **Approval sync**: Batch moves of approved members' photos from the
//!   pending folder to the approved folder
//! - **Origin guard**: An exact-match allow-list over the `Origin`
//!   header, with preflight answers served in-process
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Browser Clients                     │
//! │          (gallery frontend, admin panel)            │
//! └─────────────────────────┬───────────────────────────┘
//!                           │
//! ┌─────────────────────────▼───────────────────────────┐
//! │                 Curator Gateway                     │
//! ├─────────────────────────────────────────────────────┤
//! │  Origin Guard │ Request IDs │ Logging               │
//! ├─────────────────────────────────────────────────────┤
//! │               API Handlers                          │
//! │  (/initiate, /complete, /sync-approved-members)     │
//! ├─────────────────────────────────────────────────────┤
//! │               curator-storage                       │
//! │       (remote backend or in-memory store)           │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod folders;
pub mod handlers;
pub mod index;
pub mod middleware;
pub mod mover;
pub mod routes;
pub mod server;
pub mod state;
pub mod sync;

#[cfg(test)]
mod test_util;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use folders::Folder;
pub use server::{run_server, run_server_with_shutdown};
pub use state::AppState;
