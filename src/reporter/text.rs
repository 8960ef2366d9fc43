//! Plain text report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::{Provider, ResourceRecord, ScanResult};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

/// Text report generator for CLI output.
pub struct TextReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to list every attribute under each resource
    verbose: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            use_colors: config.output.colored,
            verbose: config.output.verbose,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &ScanResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header());
        output.push('\n');

        output.push_str(&self.format_summary(result));
        output.push('\n');

        if !result.resources.is_empty() {
            output.push_str(&self.format_resources(result));
            output.push('\n');
        }

        if self.verbose {
            output.push_str(&self.format_attributes(result));
        }

        Ok(output)
    }
}

impl TextReporter {
    /// Format the report header.
    fn format_header(&self) -> String {
        let title = "TerraLens Inventory";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

        if self.use_colors {
            format!(
                "\n{} {} {}\n{}\n",
                title.bright_white().bold(),
                version.dimmed(),
                format!("({})", timestamp).dimmed(),
                "=".repeat(80).bright_blue(),
            )
        } else {
            format!("\n{title} {version} ({timestamp})\n{}\n", "=".repeat(80))
        }
    }

    /// Format the summary section.
    fn format_summary(&self, result: &ScanResult) -> String {
        let mut output = String::new();

        let section_title = if self.use_colors {
            "Summary".bright_cyan().bold().to_string()
        } else {
            "Summary".to_string()
        };

        output.push_str(&format!("\n{section_title}\n"));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        output.push_str(&format!(
            "  {} resources | {} files scanned | {} unreadable files skipped\n",
            result.summary.total_resources,
            result.summary.total_files,
            result.summary.files_skipped,
        ));

        // per-provider counts, stable order
        let mut providers: Vec<_> = result.summary.resources_by_provider.iter().collect();
        providers.sort();
        for (provider, count) in providers {
            let tag = self.provider_tag(provider);
            output.push_str(&format!("  {tag}: {count}\n"));
        }

        output
    }

    /// Format the resource table.
    fn format_resources(&self, result: &ScanResult) -> String {
        let mut output = String::new();

        let section_title = if self.use_colors {
            "Resources".bright_cyan().bold().to_string()
        } else {
            "Resources".to_string()
        };

        output.push_str(&format!("\n{section_title}\n"));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let mut table = Table::new();
        table
            .load_preset(comfy_table::presets::UTF8_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Resource", "Provider", "Attributes", "File"]);

        for record in &result.resources {
            table.add_row(vec![
                record.address(),
                record.provider.to_string(),
                record.attributes.len().to_string(),
                record.file_path.display().to_string(),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    /// Format per-resource attribute listings (verbose mode).
    fn format_attributes(&self, result: &ScanResult) -> String {
        let mut output = String::new();

        for record in &result.resources {
            let address = if self.use_colors {
                record.address().bright_white().bold().to_string()
            } else {
                record.address()
            };
            output.push_str(&format!("\n{address}\n"));

            for (key, value) in &record.attributes {
                output.push_str(&format!("  {key} = {value}\n"));
            }
        }

        output
    }

    /// Color a provider tag for the summary section.
    fn provider_tag(&self, provider: &str) -> String {
        if !self.use_colors {
            return provider.to_string();
        }
        match provider {
            p if p == Provider::Aws.to_string() => p.yellow().to_string(),
            p if p == Provider::Gcp.to_string() => p.blue().to_string(),
            p if p == Provider::Azure.to_string() => p.cyan().to_string(),
            p => p.dimmed().to_string(),
        }
    }
}
