//! appstream-fastlane git - repository inspection
//!
//! This crate opens the source tree's git repository to publish its fetch
//! URL as the application's source code location.

mod remote;
mod repository;

pub use remote::source_fetch_url;
pub use repository::{GitRepo, Result};
