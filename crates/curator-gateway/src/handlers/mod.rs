//! Request handlers

pub mod service;
pub mod sync;
pub mod upload;

pub use service::*;
pub use sync::*;
pub use upload::*;
