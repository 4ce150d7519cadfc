//! CLI module for sourcelist
//!
//! `generate` writes the manifest, `scan` previews rule matches and `init`
//! writes a starter config.

pub mod context;
pub mod error;
pub mod output;

pub mod generate;
pub mod init;
pub mod scan;
