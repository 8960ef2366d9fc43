//! Integration tests for TerraLens.
//!
//! These tests verify the end-to-end functionality of the scanner,
//! parser, and reporter modules against on-disk fixtures.

use std::path::PathBuf;
use terralens::{Config, Scanner};

/// Get the path to the test fixtures directory.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

mod parser_tests {
    use super::*;
    use terralens::parser::HclResourceParser;
    use terralens::AttributeValue;

    #[tokio::test]
    async fn test_parse_simple_directory() {
        let config = Config::default();
        let parser = HclResourceParser::new(&config);

        let result = parser
            .parse_directory(&fixtures_path().join("simple"))
            .await
            .unwrap();

        // web + data from main.tf, main from network.tf; variables.tf,
        // README.md and the modules/ subdirectory contribute nothing
        let addresses: Vec<_> = result.resources.iter().map(|r| r.address()).collect();
        assert_eq!(
            addresses,
            vec!["aws_instance.web", "aws_s3_bucket.data", "aws_vpc.main"]
        );

        // three .tf files were read
        assert_eq!(result.files.len(), 3);
        assert_eq!(result.skipped, 0);
    }

    #[tokio::test]
    async fn test_nested_blocks_and_map_literals() {
        let config = Config::default();
        let parser = HclResourceParser::new(&config);

        let result = parser
            .parse_directory(&fixtures_path().join("simple"))
            .await
            .unwrap();

        let web = result
            .resources
            .iter()
            .find(|r| r.resource_name == "web")
            .unwrap();

        assert_eq!(
            web.attributes.get("instance_type"),
            Some(&AttributeValue::String("t3.micro".to_string()))
        );
        assert_eq!(
            web.attributes.get("monitoring"),
            Some(&AttributeValue::Bool(true))
        );
        assert_eq!(
            web.attributes.get("root_block_device.volume_size"),
            Some(&AttributeValue::Number(50.0))
        );
        assert_eq!(
            web.attributes.get("root_block_device.volume_type"),
            Some(&AttributeValue::String("gp3".to_string()))
        );

        // the nested block label is never a key of its own
        assert!(web.attributes.get("root_block_device").is_none());
        // the map literal is an unsupported value shape
        assert!(web.attributes.get("tags").is_none());
        assert!(web.attributes.get("tags.Name").is_none());
    }

    #[tokio::test]
    async fn test_subdirectories_not_descended() {
        let config = Config::default();
        let parser = HclResourceParser::new(&config);

        let result = parser
            .parse_directory(&fixtures_path().join("simple"))
            .await
            .unwrap();

        assert!(result
            .resources
            .iter()
            .all(|r| r.resource_name != "in_subdirectory"));
    }

    #[tokio::test]
    async fn test_comments_do_not_affect_attributes() {
        let config = Config::default();
        let parser = HclResourceParser::new(&config);

        let result = parser
            .parse_directory(&fixtures_path().join("commented"))
            .await
            .unwrap();

        assert_eq!(result.resources.len(), 1);
        let cache = &result.resources[0];
        assert_eq!(cache.resource_name, "cache");
        assert_eq!(
            cache.attributes.get("node_type"),
            Some(&AttributeValue::String("cache.t3.micro".to_string()))
        );
        assert_eq!(
            cache.attributes.get("port"),
            Some(&AttributeValue::Number(6379.0))
        );
        assert_eq!(
            cache.attributes.get("cluster_id"),
            Some(&AttributeValue::String("prod-cache".to_string()))
        );
    }

    #[tokio::test]
    async fn test_malformed_block_dropped_without_error() {
        let config = Config::default();
        let parser = HclResourceParser::new(&config);

        let result = parser
            .parse_directory(&fixtures_path().join("malformed"))
            .await
            .unwrap();

        assert_eq!(result.resources.len(), 1);
        assert_eq!(result.resources[0].resource_name, "valid");
    }
}

mod scanner_tests {
    use super::*;
    use terralens::Provider;

    #[tokio::test]
    async fn test_full_scan() {
        let scanner = Scanner::new(Config::default());

        let result = scanner
            .scan_path(fixtures_path().join("simple"))
            .await
            .unwrap();

        assert_eq!(result.resources.len(), 3);
        assert_eq!(result.files_scanned.len(), 3);
        assert_eq!(result.summary.total_resources, 3);
        assert_eq!(result.summary.resources_by_provider.get("AWS"), Some(&3));
        assert!(result.summary.timestamp.is_some());
    }

    #[tokio::test]
    async fn test_scan_multiple_paths() {
        let scanner = Scanner::new(Config::default());

        let paths = vec![
            fixtures_path().join("simple"),
            fixtures_path().join("mixed"),
        ];
        let result = scanner.scan_paths(&paths).await.unwrap();

        // simple (3) + mixed (5), path order then file-name order
        assert_eq!(result.resources.len(), 8);
        assert_eq!(result.resources[0].resource_name, "web");
        assert_eq!(result.resources[3].resource_type, "aws_db_instance");
    }

    #[tokio::test]
    async fn test_provider_tally() {
        let scanner = Scanner::new(Config::default());

        let result = scanner
            .scan_path(fixtures_path().join("mixed"))
            .await
            .unwrap();

        let by_provider = &result.summary.resources_by_provider;
        assert_eq!(by_provider.get(&Provider::Aws.to_string()), Some(&1));
        assert_eq!(by_provider.get(&Provider::Gcp.to_string()), Some(&2));
        assert_eq!(by_provider.get(&Provider::Azure.to_string()), Some(&1));
        assert_eq!(by_provider.get(&Provider::Unknown.to_string()), Some(&1));
    }

    #[tokio::test]
    async fn test_scan_single_file() {
        let scanner = Scanner::new(Config::default());

        let result = scanner
            .scan_path(fixtures_path().join("scenario/main.tf"))
            .await
            .unwrap();

        assert_eq!(result.resources.len(), 1);
        assert_eq!(result.files_scanned.len(), 1);
    }

    #[tokio::test]
    async fn test_exclude_patterns() {
        let mut config = Config::default();
        config.scan.exclude_patterns.push("network.tf".to_string());

        let scanner = Scanner::new(config);
        let result = scanner
            .scan_path(fixtures_path().join("simple"))
            .await
            .unwrap();

        assert!(result
            .resources
            .iter()
            .all(|r| r.resource_type != "aws_vpc"));
    }

    // Spec'd scenario: a directory with main.tf and a README yields exactly
    // one record with the bucket attribute.
    #[tokio::test]
    async fn test_bucket_scenario() {
        let scanner = Scanner::new(Config::default());

        let result = scanner
            .scan_path(fixtures_path().join("scenario"))
            .await
            .unwrap();

        assert_eq!(result.resources.len(), 1);
        let record = &result.resources[0];
        assert_eq!(record.resource_type, "aws_s3_bucket");
        assert_eq!(record.resource_name, "data");
        assert_eq!(record.provider, Provider::Aws);
        assert_eq!(record.attributes.len(), 1);
        assert_eq!(
            record.attributes.get("bucket").and_then(|v| v.as_str()),
            Some("my-bucket")
        );
    }
}

mod walker_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();

        let scanner = Scanner::new(Config::default());
        let result = scanner.scan_path(dir.path()).await.unwrap();

        assert!(result.resources.is_empty());
        assert!(result.files_scanned.is_empty());
    }

    #[tokio::test]
    async fn test_directory_without_terraform_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "resource \"x\" \"y\" {}").unwrap();
        std::fs::write(dir.path().join("deploy.sh"), "#!/bin/sh\n").unwrap();

        let scanner = Scanner::new(Config::default());
        let result = scanner.scan_path(dir.path()).await.unwrap();

        assert!(result.resources.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_file_skipped_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("good.tf"),
            "resource \"aws_sqs_queue\" \"q\" { name = \"jobs\" }",
        )
        .unwrap();
        // not valid UTF-8: read_to_string fails, the file is dropped
        std::fs::write(dir.path().join("mangled.tf"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let scanner = Scanner::new(Config::default());
        let result = scanner.scan_path(dir.path()).await.unwrap();

        assert_eq!(result.resources.len(), 1);
        assert_eq!(result.resources[0].resource_name, "q");
        assert_eq!(result.summary.files_skipped, 1);
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let scanner = Scanner::new(Config::default());
        let result = scanner.scan_path("/no/such/directory").await;
        assert!(result.is_err());
    }
}

mod reporter_tests {
    use super::*;
    use terralens::reporter::Reporter;
    use terralens::ReportFormat;

    #[tokio::test]
    async fn test_json_report() {
        let config = Config::default();
        let scanner = Scanner::new(config.clone());
        let reporter = Reporter::new(&config);

        let result = scanner
            .scan_path(fixtures_path().join("scenario"))
            .await
            .unwrap();
        let report = reporter.generate(&result, ReportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["summary"]["total_resources"], 1);
        assert_eq!(value["resources"][0]["resource_type"], "aws_s3_bucket");
        assert_eq!(value["resources"][0]["attributes"]["bucket"], "my-bucket");
    }

    #[tokio::test]
    async fn test_text_report() {
        let mut config = Config::default();
        config.output.colored = false;
        let scanner = Scanner::new(config.clone());
        let reporter = Reporter::new(&config);

        let result = scanner
            .scan_path(fixtures_path().join("mixed"))
            .await
            .unwrap();
        let report = reporter.generate(&result, ReportFormat::Text).unwrap();

        assert!(report.contains("aws_db_instance.orders"));
        assert!(report.contains("google_storage_bucket.artifacts"));
        assert!(report.contains("5 resources"));
    }

    #[tokio::test]
    async fn test_generate_report_from_result() {
        let scanner = Scanner::new(Config::default());

        let result = scanner
            .scan_path(fixtures_path().join("scenario"))
            .await
            .unwrap();
        let report = result.generate_report(ReportFormat::Json).unwrap();
        assert!(report.contains("aws_s3_bucket"));
    }
}
