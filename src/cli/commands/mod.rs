//! CLI command implementations

pub mod check;
pub mod init;
pub mod review;
