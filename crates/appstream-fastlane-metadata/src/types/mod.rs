//! Metadata types.

pub mod bundle;
pub mod language;
pub mod translations;
