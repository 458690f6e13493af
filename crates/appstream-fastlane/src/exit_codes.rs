//! Exit codes for the CLI

#![allow(dead_code)]

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Neither an AppStream document nor a source directory was given
pub const USAGE_ERROR: i32 = 2;
