//! Configuration module for TerraLens.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`terralens.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # terralens.yaml
//!
//! # Scanning options
//! scan:
//!   exclude_patterns:
//!     - "*_generated.tf"
//!   follow_symlinks: false
//!
//! # Output options
//! output:
//!   colored: true
//!   verbose: false
//!   pretty: true
//! ```

use crate::error::{Result, TerraLensError};
use serde::{Deserialize, Serialize};

/// Scanning options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanOptions {
    /// Patterns to exclude from scanning (glob patterns).
    pub exclude_patterns: Vec<String>,

    /// Follow symbolic links when listing directories.
    pub follow_symlinks: bool,
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputOptions {
    /// Use colored output.
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// Main configuration structure with nested sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scanning options
    pub scan: ScanOptions,

    /// Output options
    pub output: OutputOptions,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanOptions {
                exclude_patterns: Vec::new(),
                follow_symlinks: false,
            },
            output: OutputOptions {
                colored: true,
                verbose: false,
                pretty: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn from_yaml(content: &str) -> Result<Self> {
        tracing::debug!("Parsing configuration from YAML");
        // First, expand environment variables
        let expanded = expand_env_vars(content);

        let config: Config =
            serde_yaml::from_str(&expanded).map_err(|e| TerraLensError::ConfigParse {
                message: e.to_string(),
                source: None,
                src_path: file!(),
                src_line: line!(),
            })?;

        tracing::debug!(
            exclude_patterns = config.scan.exclude_patterns.len(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Check the configuration for values that cannot work at scan time.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.scan.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                crate::err!(ConfigValue {
                    key: "scan.exclude_patterns".to_string(),
                    message: format!("invalid glob pattern '{pattern}': {e}"),
                })
            })?;
        }
        Ok(())
    }

    /// Generate an example YAML configuration.
    #[must_use]
    pub fn example_yaml() -> String {
        r#"# TerraLens Configuration File

# Scanning options
scan:
  # Patterns to exclude from scanning (glob patterns)
  exclude_patterns: []
  # exclude_patterns:
  #   - "*_generated.tf"
  #   - "legacy-*.tf"

  # Follow symbolic links when listing directories
  follow_symlinks: false

# Output options
output:
  # Use colored output in terminal
  colored: true

  # Enable verbose output
  verbose: false

  # Pretty-print JSON output
  pretty: true
"#
        .to_string()
    }

    /// Merge CLI arguments into the configuration.
    pub fn merge_cli_args(&mut self, args: &crate::cli::ScanArgs) {
        if !args.exclude_patterns.is_empty() {
            self.scan
                .exclude_patterns
                .extend(args.exclude_patterns.iter().cloned());
        }
        if args.no_color {
            self.output.colored = false;
        }
        if args.follow_symlinks {
            self.scan.follow_symlinks = true;
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();

    // Find all ${VAR} patterns
    let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("Invalid regex");
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    // Find all $VAR patterns (word boundary)
    let re = regex::Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("Invalid regex");
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
