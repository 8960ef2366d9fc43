//! Attribute extraction from resource block bodies.
//!
//! A block body is reduced to a flat, insertion-ordered map of scalar
//! attributes. Three independent line-anchored passes match the supported
//! assignment shapes (quoted string, number, boolean) in that fixed order,
//! so a key assigned more than once across shapes ends up with the value of
//! the latest pass, not the latest line (a long-standing quirk the tests pin
//! down). Anything else on the right-hand side (lists, heredocs, object
//! literals, references, function calls, interpolations) is silently absent
//! from the map.
//!
//! Labelled sub-blocks are extracted before the scalar passes run and their
//! spans are masked out, then each one is parsed recursively and merged with
//! dot-prefixed keys: `root_block_device { volume_size = 50 }` yields
//! `root_block_device.volume_size`. Map literals (`tags = { ... }`) are
//! recognized by the `=` before the label and dropped whole.

use crate::parser::block::extract_block;
use crate::types::AttributeValue;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

static STRING_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    // captures everything between the first unescaped quote pair on the line
    Regex::new(r#"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_-]*)[ \t]*=[ \t]*"((?:\\.|[^"\\])*)""#)
        .expect("Invalid regex")
});

static NUMBER_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_-]*)[ \t]*=[ \t]*([0-9]+(?:\.[0-9]+)?)[ \t\r]*$")
        .expect("Invalid regex")
});

static BOOL_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Za-z_][A-Za-z0-9_-]*)[ \t]*=[ \t]*(true|false)[ \t\r]*$")
        .expect("Invalid regex")
});

static BLOCK_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    // group 2 captures an `=` between label and brace: `tags = {` is a
    // map-literal value, `root_block_device {` is a nested block
    Regex::new(r"([A-Za-z_][A-Za-z0-9_-]*)[ \t]*(=?)[ \t]*\{").expect("Invalid regex")
});

/// Parse a block body into a flat attribute map.
///
/// Never fails; an unparseable attribute is simply missing from the result.
#[must_use]
pub fn parse_attributes(body: &str) -> IndexMap<String, AttributeValue> {
    let mut attributes = IndexMap::new();

    let (scalars, nested) = split_nested_blocks(body);

    for caps in STRING_ASSIGN.captures_iter(&scalars) {
        attributes.insert(
            caps[1].to_string(),
            AttributeValue::String(caps[2].to_string()),
        );
    }
    for caps in NUMBER_ASSIGN.captures_iter(&scalars) {
        if let Ok(n) = caps[2].parse::<f64>() {
            attributes.insert(caps[1].to_string(), AttributeValue::Number(n));
        }
    }
    for caps in BOOL_ASSIGN.captures_iter(&scalars) {
        attributes.insert(caps[1].to_string(), AttributeValue::Bool(&caps[2] == "true"));
    }

    for (label, inner) in nested {
        for (key, value) in parse_attributes(&inner) {
            attributes.insert(format!("{label}.{key}"), value);
        }
    }

    attributes
}

/// Separate a body into scalar-only text and its labelled sub-blocks.
///
/// Sub-block spans are removed from the returned text so their leaf keys
/// only ever surface with a dot prefix; the bare block label itself is never
/// an attribute key. Map-literal values (opener preceded by `=`) are removed
/// without being recorded as nested blocks.
fn split_nested_blocks(body: &str) -> (String, Vec<(String, String)>) {
    let mut nested = Vec::new();
    let mut scalars = String::with_capacity(body.len());
    let mut cursor = 0;

    while let Some(opener) = next_block_opener(body, cursor) {
        let Some(inner) = extract_block(body, opener.brace) else {
            // unbalanced sub-block: keep the text, move past the brace
            scalars.push_str(&body[cursor..=opener.brace]);
            cursor = opener.brace + 1;
            continue;
        };
        let past_block = opener.brace + inner.len() + 2;

        scalars.push_str(&body[cursor..opener.label_start]);
        if !opener.is_map_literal && !is_assignment_value(&body[..opener.label_start]) {
            nested.push((opener.label, inner.to_string()));
        }
        cursor = past_block;
    }

    scalars.push_str(&body[cursor..]);
    (scalars, nested)
}

struct BlockOpener {
    label_start: usize,
    brace: usize,
    label: String,
    /// True when an `=` sits between the label and the brace
    is_map_literal: bool,
}

/// Locate the next block opener at or after `from`.
fn next_block_opener(body: &str, from: usize) -> Option<BlockOpener> {
    let caps = BLOCK_OPENER.captures(&body[from..])?;
    let whole = caps.get(0)?;
    let label = caps.get(1)?;
    Some(BlockOpener {
        label_start: from + label.start(),
        brace: from + whole.end() - 1,
        label: label.as_str().to_string(),
        is_map_literal: !caps[2].is_empty(),
    })
}

/// True when the text before a block label ends in `=`, i.e. the label's
/// braces are a map-literal value rather than a nested block.
fn is_assignment_value(prefix: &str) -> bool {
    prefix.trim_end_matches([' ', '\t']).ends_with('=')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_attribute() {
        let attrs = parse_attributes(r#" instance_type = "t3.micro" "#);
        assert_eq!(
            attrs.get("instance_type"),
            Some(&AttributeValue::String("t3.micro".to_string()))
        );
    }

    #[test]
    fn test_number_attributes() {
        let attrs = parse_attributes("count = 3\nsize = 20.5\n");
        assert_eq!(attrs.get("count"), Some(&AttributeValue::Number(3.0)));
        assert_eq!(attrs.get("size"), Some(&AttributeValue::Number(20.5)));
    }

    #[test]
    fn test_boolean_attributes() {
        let attrs = parse_attributes("enabled = true\nforce_destroy = false\n");
        assert_eq!(attrs.get("enabled"), Some(&AttributeValue::Bool(true)));
        assert_eq!(attrs.get("force_destroy"), Some(&AttributeValue::Bool(false)));
    }

    #[test]
    fn test_escaped_quotes_in_string() {
        let attrs = parse_attributes(r#"description = "say \"hello\" twice""#);
        assert_eq!(
            attrs.get("description"),
            Some(&AttributeValue::String(r#"say \"hello\" twice"#.to_string()))
        );
    }

    #[test]
    fn test_unsupported_shapes_absent() {
        let body = r#"
availability_zones = ["us-east-1a", "us-east-1b"]
ami                = var.ami_id
user_data          = base64encode("boot.sh")
name               = "kept"
"#;
        let attrs = parse_attributes(body);
        assert_eq!(attrs.len(), 1);
        assert_eq!(
            attrs.get("name"),
            Some(&AttributeValue::String("kept".to_string()))
        );
    }

    #[test]
    fn test_nested_block_flattened() {
        let body = r#"
instance_type = "t3.micro"
root_block_device {
  volume_size = 50
  volume_type = "gp3"
}
"#;
        let attrs = parse_attributes(body);
        assert_eq!(
            attrs.get("root_block_device.volume_size"),
            Some(&AttributeValue::Number(50.0))
        );
        assert_eq!(
            attrs.get("root_block_device.volume_type"),
            Some(&AttributeValue::String("gp3".to_string()))
        );
        // the bare label never becomes a key, and leaves never appear unprefixed
        assert!(attrs.get("root_block_device").is_none());
        assert!(attrs.get("volume_size").is_none());
    }

    #[test]
    fn test_two_level_nesting() {
        let body = r#"
spec {
  template {
    replicas = 2
  }
}
"#;
        let attrs = parse_attributes(body);
        assert_eq!(
            attrs.get("spec.template.replicas"),
            Some(&AttributeValue::Number(2.0))
        );
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_map_literal_is_not_a_nested_block() {
        let body = r#"
name = "web"
tags = {
  Environment = "prod"
}
"#;
        let attrs = parse_attributes(body);
        assert_eq!(attrs.len(), 1);
        assert!(attrs.get("tags.Environment").is_none());
        assert!(attrs.get("Environment").is_none());
    }

    // Pass order, not line order, decides when a key is assigned both a
    // string and a number: the number pass runs after the string pass.
    #[test]
    fn test_last_pass_wins_over_line_order() {
        let body = "port = 8080\nport = \"http\"\n";
        let attrs = parse_attributes(body);
        assert_eq!(attrs.get("port"), Some(&AttributeValue::Number(8080.0)));

        let body = "flag = \"yes\"\nflag = true\n";
        let attrs = parse_attributes(body);
        assert_eq!(attrs.get("flag"), Some(&AttributeValue::Bool(true)));
    }

    #[test]
    fn test_duplicate_key_same_shape_last_line_wins() {
        let attrs = parse_attributes("name = \"first\"\nname = \"second\"\n");
        assert_eq!(
            attrs.get("name"),
            Some(&AttributeValue::String("second".to_string()))
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let body = "b = \"1\"\na = \"2\"\nc = 3\n";
        let attrs = parse_attributes(body);
        let keys: Vec<_> = attrs.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_body() {
        assert!(parse_attributes("").is_empty());
        assert!(parse_attributes("   \n  \n").is_empty());
    }

    #[test]
    fn test_number_with_trailing_garbage_rejected() {
        let attrs = parse_attributes("version = 1.2.3\n");
        assert!(attrs.get("version").is_none());
    }
}
