//! # TerraLens
//!
//! A Terraform resource inventory extractor.
//!
//! TerraLens scans directories of Terraform configuration files and extracts
//! `resource "<type>" "<name>" { ... }` blocks into structured records using
//! a hand-written, linear HCL-subset scanner. The record list feeds cost
//! estimation, drift detection, and display tooling.
//!
//! ## Features
//!
//! - **Best-effort scanning**: malformed files never abort a scan; broken
//!   blocks and unsupported attribute shapes are skipped
//! - **Comment-aware**: `#`, `//`, and `/* */` comments are stripped without
//!   disturbing string literals or byte positions
//! - **Nested block flattening**: sub-blocks become dot-prefixed attribute
//!   keys (`root_block_device.volume_size`)
//! - **Provider classification**: resource types are tagged AWS/GCP/Azure by
//!   naming prefix
//! - **Multiple output formats**: JSON and plain text reports
//!
//! ## Example
//!
//! ```rust,no_run
//! use terralens::{Scanner, Config, ReportFormat};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let scanner = Scanner::new(config);
//!
//!     // Scan a local directory
//!     let result = scanner.scan_path("./terraform").await?;
//!
//!     // Generate a report
//!     let report = result.generate_report(ReportFormat::Json)?;
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{Result, TerraLensError};
pub use types::{
    AttributeValue, ParsedFiles, Provider, ReportFormat, ResourceRecord, ScanResult, ScanSummary,
};

use std::path::Path;

/// Main scanner orchestrator.
///
/// The `Scanner` is the primary entry point for using TerraLens as a
/// library. It coordinates the parser over one or more input paths and folds
/// the per-path results into a single [`ScanResult`] snapshot.
///
/// # Example
///
/// ```rust,no_run
/// use terralens::{Scanner, Config};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = Config::default();
///     let scanner = Scanner::new(config);
///
///     // Scan multiple paths
///     let paths = vec!["./network", "./compute"];
///     let result = scanner.scan_paths(&paths).await?;
///
///     println!("Found {} resources", result.resources.len());
///     Ok(())
/// }
/// ```
pub struct Scanner {
    config: Config,
}

impl Scanner {
    /// Create a new scanner with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan a single local path for Terraform resources.
    ///
    /// The path may be a directory (scanned non-recursively) or a single
    /// `.tf` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path doesn't exist or an explicitly named
    /// file cannot be read.
    pub async fn scan_path<P: AsRef<Path>>(&self, path: P) -> Result<ScanResult> {
        self.scan_paths(&[path.as_ref()]).await
    }

    /// Scan multiple local paths for Terraform resources.
    ///
    /// Results are concatenated in argument order; within a directory,
    /// files are processed in file-name order so output is deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if any path fails to scan.
    pub async fn scan_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<ScanResult> {
        let parser = parser::HclResourceParser::new(&self.config);
        let mut all = ParsedFiles::default();

        for path in paths {
            let path = path.as_ref();
            tracing::info!(path = %path.display(), "Scanning path");

            let parsed = if path.is_file() {
                parser.parse_file(path).await?
            } else {
                parser.parse_directory(path).await?
            };
            all.merge(parsed);
        }

        let summary = ScanSummary::tally(&all);

        Ok(ScanResult {
            resources: all.resources,
            files_scanned: all.files,
            summary,
        })
    }
}
