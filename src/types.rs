//! Core data types used throughout TerraLens.
//!
//! This module defines the fundamental data structures for representing:
//! - Extracted Terraform resource blocks and their attributes
//! - Cloud provider classification
//! - Scan results and summaries
//! - Report formats

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A scalar attribute value extracted from a resource block.
///
/// Only the three scalar shapes of the supported HCL subset are represented.
/// Lists, object literals, references, and interpolations are never stored:
/// an attribute whose value has one of those shapes is absent from the
/// attribute map rather than carried as an opaque variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean literal (`true` / `false`)
    Bool(bool),
    /// Integer or decimal number
    Number(f64),
    /// Quoted string, stored as written between the quotes
    String(String),
}

impl AttributeValue {
    /// Returns the string content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Cloud provider inferred from a resource type's naming prefix.
///
/// The mapping is a pure prefix lookup with no alias table: `aws_` maps to
/// AWS, `google_` to GCP, `azurerm_` to Azure, anything else to Unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// Amazon Web Services (`aws_` prefix)
    #[serde(rename = "AWS")]
    Aws,
    /// Google Cloud Platform (`google_` prefix)
    #[serde(rename = "GCP")]
    Gcp,
    /// Microsoft Azure (`azurerm_` prefix)
    Azure,
    /// Any other prefix (e.g., `random_`, `null_`, custom providers)
    Unknown,
}

impl Provider {
    /// Classify a resource type by its naming prefix.
    #[must_use]
    pub fn classify(resource_type: &str) -> Self {
        if resource_type.starts_with("aws_") {
            Self::Aws
        } else if resource_type.starts_with("google_") {
            Self::Gcp
        } else if resource_type.starts_with("azurerm_") {
            Self::Azure
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aws => write!(f, "AWS"),
            Self::Gcp => write!(f, "GCP"),
            Self::Azure => write!(f, "Azure"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One parsed `resource` block.
///
/// A record captures the two block labels, the inferred provider, and the
/// flat attribute map produced by scanning the block body. Nested sub-blocks
/// appear only as dot-prefixed leaf keys (`root_block_device.volume_size`),
/// never as keys of their own.
///
/// # Example HCL
///
/// ```hcl
/// resource "aws_instance" "web" {
///   instance_type = "t3.micro"
///
///   root_block_device {
///     volume_size = 50
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// The first quoted label (e.g., "aws_instance")
    pub resource_type: String,

    /// The second quoted label (e.g., "web")
    pub resource_name: String,

    /// Provider inferred from the resource type prefix
    pub provider: Provider,

    /// Flattened scalar attributes, in extraction order
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeValue>,

    /// File where this resource is defined
    pub file_path: PathBuf,
}

impl ResourceRecord {
    /// Returns the Terraform-style address of this resource,
    /// e.g. `aws_instance.web`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.resource_name)
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON format
    #[default]
    Json,
    /// Plain text format
    Text,
}

/// Resources and files collected from a single parse pass.
///
/// Intermediate aggregate used by the parser; the scanner folds these into
/// a [`ScanResult`] once all paths have been processed.
#[derive(Debug, Clone, Default)]
pub struct ParsedFiles {
    /// Resource records found, in file-then-position order
    pub resources: Vec<ResourceRecord>,
    /// Files that were parsed
    pub files: Vec<PathBuf>,
    /// Number of files that could not be read and were dropped
    pub skipped: usize,
}

impl ParsedFiles {
    /// Merge another parse result into this one.
    pub fn merge(&mut self, other: Self) {
        self.resources.extend(other.resources);
        self.files.extend(other.files);
        self.skipped += other.skipped;
    }
}

/// Summary statistics for a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total number of resources found
    pub total_resources: usize,
    /// Resource counts keyed by provider tag
    pub resources_by_provider: HashMap<String, usize>,
    /// Total number of files scanned
    pub total_files: usize,
    /// Number of unreadable files that were skipped
    pub files_skipped: usize,
    /// Timestamp of the scan
    pub timestamp: Option<DateTime<Utc>>,
}

impl ScanSummary {
    /// Build a summary by tallying a parse result.
    #[must_use]
    pub fn tally(parsed: &ParsedFiles) -> Self {
        let mut resources_by_provider: HashMap<String, usize> = HashMap::new();
        for record in &parsed.resources {
            *resources_by_provider
                .entry(record.provider.to_string())
                .or_insert(0) += 1;
        }

        Self {
            total_resources: parsed.resources.len(),
            resources_by_provider,
            total_files: parsed.files.len(),
            files_skipped: parsed.skipped,
            timestamp: Some(Utc::now()),
        }
    }

    /// Merge another summary into this one.
    pub fn merge(&mut self, other: Self) {
        self.total_resources += other.total_resources;
        self.total_files += other.total_files;
        self.files_skipped += other.files_skipped;
        for (k, v) in other.resources_by_provider {
            *self.resources_by_provider.entry(k).or_insert(0) += v;
        }
    }
}

/// Result of scanning one or more paths for Terraform resources.
///
/// The record list is a read-only snapshot of file contents at parse time;
/// re-scanning is the only way to observe file changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    /// All discovered resource records
    pub resources: Vec<ResourceRecord>,

    /// List of files that were scanned
    pub files_scanned: Vec<PathBuf>,

    /// Summary statistics
    pub summary: ScanSummary,
}

impl ScanResult {
    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: Self) {
        self.resources.extend(other.resources);
        self.files_scanned.extend(other.files_scanned);
        self.summary.merge(other.summary);
    }

    /// Generate a report in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate_report(&self, format: ReportFormat) -> crate::Result<String> {
        let config = crate::Config::default();
        let reporter = crate::reporter::Reporter::new(&config);
        reporter.generate(self, format)
    }
}
