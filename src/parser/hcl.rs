//! Resource extraction pipeline for Terraform files.
//!
//! Ties the scanning stages together: comment stripping, resource block
//! scanning, attribute extraction, and provider classification. The walker
//! lists a single directory level (sub-directories are not descended into)
//! and tolerates unreadable files.

use crate::error::{ErrorCollector, Result, TerraLensError};
use crate::config::Config;
use crate::parser::attributes::parse_attributes;
use crate::parser::block::find_resource_blocks;
use crate::parser::comments::strip_comments;
use crate::parser::{Parser, SKIP_FILES, TERRAFORM_EXTENSION};
use crate::types::{ParsedFiles, Provider, ResourceRecord};

use std::path::Path;
use walkdir::WalkDir;

/// Extracts resource records from Terraform files.
///
/// The parser reads `.tf` files and reduces each one to a list of
/// [`ResourceRecord`]s. Malformed input never fails the parse: unreadable
/// files, unbalanced blocks, and unsupported attribute shapes are dropped
/// and scanning continues.
pub struct HclResourceParser {
    /// Configuration for scanning behavior
    config: Config,
}

impl HclResourceParser {
    /// Create a new parser with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Parse all Terraform files in a directory.
    ///
    /// Lists the directory's immediate entries in file-name order, filters to
    /// `.tf` files, and extracts resource blocks from each. A file that
    /// cannot be read is skipped with a warning and counted in the result;
    /// parsing continues with the remaining files.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory itself doesn't exist.
    pub async fn parse_directory(&self, path: &Path) -> Result<ParsedFiles> {
        if !path.exists() {
            return Err(crate::err!(DirectoryNotFound {
                path: path.to_path_buf(),
            }));
        }

        let mut result = ParsedFiles::default();
        let mut unreadable = ErrorCollector::new();

        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.scan.follow_symlinks)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };

            let file_path = entry.path();

            if file_path.is_dir() {
                continue;
            }
            if !is_terraform_file(file_path) {
                continue;
            }
            if self.should_skip(file_path) {
                continue;
            }

            tracing::debug!(file = %file_path.display(), "Parsing file");

            match tokio::fs::read_to_string(file_path).await {
                Ok(content) => {
                    let parsed = self.parse_content(&content, file_path)?;
                    result.merge(parsed);
                }
                Err(e) => {
                    tracing::warn!(
                        file = %file_path.display(),
                        error = %e,
                        "Skipping unreadable file"
                    );
                    unreadable.add(TerraLensError::io(file_path, e, file!(), line!()));
                }
            }
        }

        result.skipped = unreadable.count();

        tracing::info!(
            resources = result.resources.len(),
            files = result.files.len(),
            skipped = result.skipped,
            "Parsing complete"
        );

        Ok(result)
    }

    /// Parse a single Terraform file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn parse_file(&self, path: &Path) -> Result<ParsedFiles> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TerraLensError::io(path, e, file!(), line!()))?;

        self.parse_content(&content, path)
    }

    /// Check if a path matches the configured exclusions.
    fn should_skip(&self, path: &Path) -> bool {
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            // Skip hidden files
            if file_name.starts_with('.') {
                tracing::debug!(path = %path.display(), reason = "hidden file", "Skipping path");
                return true;
            }

            // Skip known Terraform-internal files
            if SKIP_FILES.iter().any(|s| file_name == *s) {
                tracing::debug!(path = %path.display(), reason = "known skip file", "Skipping path");
                return true;
            }

            // Check config exclusions
            if self.config.scan.exclude_patterns.iter().any(|pattern| {
                glob::Pattern::new(pattern)
                    .map(|p| p.matches(file_name))
                    .unwrap_or(false)
            }) {
                tracing::debug!(path = %path.display(), reason = "matches exclude pattern", "Skipping path");
                return true;
            }
        }

        false
    }
}

impl Parser for HclResourceParser {
    fn parse_content(&self, content: &str, file_path: &Path) -> Result<ParsedFiles> {
        let stripped = strip_comments(content);

        let mut result = ParsedFiles {
            files: vec![file_path.to_path_buf()],
            ..ParsedFiles::default()
        };

        for block in find_resource_blocks(&stripped) {
            let provider = Provider::classify(&block.resource_type);
            let attributes = parse_attributes(&block.body);

            result.resources.push(ResourceRecord {
                resource_type: block.resource_type,
                resource_name: block.resource_name,
                provider,
                attributes,
                file_path: file_path.to_path_buf(),
            });
        }

        Ok(result)
    }
}

/// Check if a file is a Terraform file.
fn is_terraform_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(TERRAFORM_EXTENSION)
}
