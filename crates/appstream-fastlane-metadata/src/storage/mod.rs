//! Output formats: the fastlane directory tree, the store summary and the
//! transfer archive.

pub mod archive;
pub mod fastlane;
pub mod summary;

pub use archive::create_archive;
pub use fastlane::FastlaneLayout;
pub use summary::StoreSummary;
