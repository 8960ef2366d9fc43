//! Comment stripping for Terraform source text.
//!
//! HCL supports `#` and `//` line comments and `/* ... */` block comments.
//! Stripping replaces comment bytes with spaces instead of removing them, so
//! byte offsets and line numbers in the stripped text line up with the raw
//! input, and a `resource` keyword can never be revealed by joining text
//! across a comment boundary. Newlines inside block comments are kept.
//!
//! Comment markers inside string literals are left untouched. A quote counts
//! as escaped when the single preceding byte is a backslash; `\\"` therefore
//! keeps the scanner inside the string (see the module tests).

/// Strip all comments from `raw`, preserving newlines and byte positions.
///
/// Never fails: a malformed file at worst under-strips, and an unterminated
/// `/*` comment truncates the remainder of the file.
#[must_use]
pub fn strip_comments(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            out.push(b);
            if b == b'"' && !is_escaped(bytes, i) {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                out.push(b);
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                match block_comment_end(bytes, i + 2) {
                    Some(end) => {
                        for &c in &bytes[i..end] {
                            out.push(if c == b'\n' { b'\n' } else { b' ' });
                        }
                        i = end;
                    }
                    // unterminated block comment: the rest of the file is dropped
                    None => break,
                }
            }
            b'#' => i = blank_to_newline(bytes, i, &mut out),
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = blank_to_newline(bytes, i, &mut out),
            _ => {
                out.push(b);
                i += 1;
            }
        }
    }

    // Only ASCII bytes are ever replaced, so the output stays valid UTF-8.
    String::from_utf8_lossy(&out).into_owned()
}

/// Naive escape check: the quote at `i` is escaped iff the byte before it is
/// a backslash. Double-escaped backslashes are miscounted on purpose, for
/// compatibility with the historical scanner behavior.
fn is_escaped(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1] == b'\\'
}

/// Blank from `i` up to (but not including) the next newline, returning the
/// index of that newline (or end of input).
fn blank_to_newline(bytes: &[u8], mut i: usize, out: &mut Vec<u8>) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        out.push(b' ');
        i += 1;
    }
    i
}

/// Find the index just past the `*/` that closes a block comment opened
/// before `i`, if any.
fn block_comment_end(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Some(i + 2);
        }
        i += 1;
    }
    None
}
