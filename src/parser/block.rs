//! Resource block scanning.
//!
//! Locates top-level `resource "<type>" "<name>" { ... }` declarations in
//! comment-stripped text with a single left-to-right cursor scan. Candidate
//! keywords that do not match the full block shape are skipped and the scan
//! resumes just past them; nothing short of end-of-input stops the scan.
//!
//! The brace matcher is quote-aware so that `{` and `}` inside string
//! literals never affect nesting depth. It assumes comments are already gone
//! (see [`super::comments`]).

/// The block keyword this scanner hunts for.
const RESOURCE_KEYWORD: &str = "resource";

/// A resource block located in comment-stripped source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBlock {
    /// First quoted label (the resource type)
    pub resource_type: String,
    /// Second quoted label (the resource name)
    pub resource_name: String,
    /// Text strictly between the block's braces
    pub body: String,
}

/// Find all well-formed resource blocks in `stripped`, in file order.
///
/// A candidate is accepted only when the keyword stands alone (not part of
/// an identifier like `my_resource` or `resource_group`) and is followed by
/// two non-empty quoted labels and a balanced `{ ... }` body. Rejected
/// candidates are skipped without aborting the scan, and the cursor jumps
/// past each accepted block so bodies are never scanned twice.
#[must_use]
pub fn find_resource_blocks(stripped: &str) -> Vec<ResourceBlock> {
    let bytes = stripped.as_bytes();
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(found) = stripped[cursor..].find(RESOURCE_KEYWORD) {
        let start = cursor + found;
        let after_keyword = start + RESOURCE_KEYWORD.len();
        // fallback position for rejected or unbalanced candidates
        cursor = after_keyword;

        // `my_resource`, `resource_group`: not a standalone keyword
        if start > 0 && is_word_byte(bytes[start - 1]) {
            continue;
        }
        if after_keyword < bytes.len() && is_word_byte(bytes[after_keyword]) {
            continue;
        }

        let Some((resource_type, pos)) = expect_label(stripped, after_keyword) else {
            continue;
        };
        let Some((resource_name, pos)) = expect_label(stripped, pos) else {
            continue;
        };
        if resource_type.is_empty() || resource_name.is_empty() {
            continue;
        }

        let brace = skip_whitespace(bytes, pos);
        if bytes.get(brace) != Some(&b'{') {
            continue;
        }

        let Some(body) = extract_block(stripped, brace) else {
            continue;
        };

        cursor = brace + body.len() + 2; // just past the closing brace
        blocks.push(ResourceBlock {
            resource_type: resource_type.to_string(),
            resource_name: resource_name.to_string(),
            body: body.to_string(),
        });
    }

    blocks
}

/// Extract the body of a balanced `{ ... }` block opening at `open_brace`.
///
/// Counts depth while ignoring braces inside string literals. Returns the
/// text strictly between the opening brace and its match, or `None` when the
/// input ends before the depth returns to zero (malformed block) or when
/// `open_brace` does not point at a `{`.
#[must_use]
pub fn extract_block(text: &str, open_brace: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.get(open_brace) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut i = open_brace;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if b == b'"' && !is_escaped(bytes, i) {
                in_string = false;
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[open_brace + 1..i]);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    None
}

/// Expect whitespace followed by a quoted label starting at `pos`.
/// Returns the label text and the index just past its closing quote.
fn expect_label(text: &str, pos: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let start = skip_whitespace(bytes, pos);
    if start == pos {
        // at least one whitespace byte must separate keyword and labels
        return None;
    }
    read_quoted(text, start)
}

/// Read a quoted string starting exactly at `pos`.
fn read_quoted(text: &str, pos: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }
    let mut i = pos + 1;
    while i < bytes.len() {
        if bytes[i] == b'"' && !is_escaped(bytes, i) {
            return Some((&text[pos + 1..i], i + 1));
        }
        i += 1;
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Same naive single-backslash escape check as the comment stripper.
fn is_escaped(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1] == b'\\'
}
