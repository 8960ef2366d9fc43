//! HCL-subset parsing module for Terraform files.
//!
//! This module extracts `resource "<type>" "<name>" { ... }` blocks from
//! Terraform configuration text with a hand-written linear scanner rather
//! than a full HCL grammar. It handles nested braces, quoted strings (including escaped
//! quotes), single- and multi-line comments, and nested sub-blocks, and it
//! never fails on malformed input: unsupported or broken constructs are
//! skipped and the result is a best-effort record list.
//!
//! # Scanning Stages
//!
//! 1. [`strip_comments`] blanks out `#`, `//`, and `/* */` comments
//! 2. [`find_resource_blocks`] locates resource declarations and their bodies
//! 3. [`parse_attributes`] flattens each body into scalar attributes
//!
//! # Example
//!
//! ```rust,ignore
//! use terralens::parser::HclResourceParser;
//! use terralens::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let parser = HclResourceParser::new(&config);
//!
//!     let result = parser.parse_directory("./terraform".as_ref()).await?;
//!     println!("Found {} resources", result.resources.len());
//!     Ok(())
//! }
//! ```

mod attributes;
mod block;
mod comments;
mod hcl;

pub use attributes::parse_attributes;
pub use block::{extract_block, find_resource_blocks, ResourceBlock};
pub use comments::strip_comments;
pub use hcl::HclResourceParser;

use crate::types::ParsedFiles;

/// File extension to scan for Terraform resources.
pub const TERRAFORM_EXTENSION: &str = ".tf";

/// Files to skip during scanning.
pub const SKIP_FILES: &[&str] = &["terraform.tfstate", "terraform.tfstate.backup"];

/// Trait for parsing Terraform content.
///
/// This trait allows for different parsing implementations
/// (e.g., for testing with mock parsers).
pub trait Parser: Send + Sync {
    /// Parse a single file's contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be processed; the scanner
    /// implementation itself is best-effort and only fails at I/O seams.
    fn parse_content(&self, content: &str, file_path: &std::path::Path) -> crate::Result<ParsedFiles>;
}
