//! Lexical helpers for scanning JavaScript source
//!
//! These are not a parser. They only know enough about strings, comments and
//! bracket nesting to slice object literals out of component source.

/// Index of the bracket closing the one at `open`.
///
/// Skips string literals, template literals and comments. Returns `None` if
/// `open` is not an opening bracket or the source ends first.
pub fn find_matching(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    match bytes.get(open) {
        Some(b'{') | Some(b'[') | Some(b'(') => {}
        _ => return None,
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i)?;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i)?;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split an object or array literal body on top-level commas.
///
/// Empty trailing segments (from a trailing comma) are dropped.
pub fn split_top_level(body: &str) -> Option<Vec<&str>> {
    let bytes = body.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => depth = depth.checked_sub(1)?,
            b',' if depth == 0 => {
                segments.push(&body[start..i]);
                start = i + 1;
            }
            b'\'' | b'"' | b'`' => {
                i = skip_string(bytes, i)?;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i)?;
            }
            _ => {}
        }
        i += 1;
    }
    if depth != 0 {
        return None;
    }
    let tail = &body[start..];
    if !strip_comments(tail).trim().is_empty() {
        segments.push(tail);
    }
    Some(segments)
}

/// Leading comments of a segment, split from the code that follows them.
///
/// Returns the last `/** */` block found (cleaned) and the remaining code.
pub fn take_leading_doc(segment: &str) -> (Option<String>, &str) {
    let mut rest = segment.trim_start();
    let mut doc = None;
    loop {
        if rest.starts_with("/*") {
            let end = match rest.find("*/") {
                Some(end) => end,
                None => return (doc, ""),
            };
            let comment = &rest[..end + 2];
            if comment.starts_with("/**") && comment.len() > 4 {
                doc = Some(clean_doc_block(comment));
            }
            rest = rest[end + 2..].trim_start();
        } else if rest.starts_with("//") {
            rest = match rest.find('\n') {
                Some(nl) => rest[nl + 1..].trim_start(),
                None => "",
            };
        } else {
            return (doc, rest);
        }
    }
}

/// The `/** */` block directly preceding byte offset `pos`, if any.
pub fn preceding_doc_block(src: &str, pos: usize) -> Option<String> {
    let before = src[..pos].trim_end();
    if !before.ends_with("*/") {
        return None;
    }
    let start = before.rfind("/*")?;
    let block = &before[start..];
    if block.starts_with("/**") && block.len() > 4 {
        Some(clean_doc_block(block))
    } else {
        None
    }
}

/// Strip `/**`, `*/` and leading `*` gutters from a doc block.
pub fn clean_doc_block(block: &str) -> String {
    let inner = block
        .trim()
        .trim_start_matches("/**")
        .trim_end_matches("*/");
    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();
    lines.join("\n").trim().to_string()
}

/// Remove comments, keeping strings intact.
pub fn strip_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => match skip_string(bytes, i) {
                Some(end) => i = end,
                None => break,
            },
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&src[copied..i]);
                i = skip_line_comment(bytes, i);
                copied = i;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&src[copied..i]);
                i = match skip_block_comment(bytes, i) {
                    Some(end) => end + 1,
                    None => bytes.len(),
                };
                copied = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    out.push_str(&src[copied.min(src.len())..]);
    out
}

/// Collapse runs of whitespace outside of strings into nothing.
pub fn compact(src: &str) -> String {
    let stripped = strip_comments(src);
    let bytes = stripped.as_bytes();
    let mut out = String::with_capacity(stripped.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => {
                let end = skip_string(bytes, i).unwrap_or(bytes.len() - 1);
                out.push_str(&stripped[i..=end]);
                i = end;
            }
            b if b.is_ascii_whitespace() => {}
            _ => {
                let ch_len = utf8_len(bytes[i]);
                out.push_str(&stripped[i..i + ch_len]);
                i += ch_len - 1;
            }
        }
        i += 1;
    }
    out
}

fn utf8_len(first: u8) -> usize {
    match first {
        b if b < 0x80 => 1,
        b if b >= 0xF0 => 4,
        b if b >= 0xE0 => 3,
        _ => 2,
    }
}

/// Index of the closing quote of the string starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b if b == quote => return Some(i),
            b'\n' if quote != b'`' => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the newline ending the comment (or end of input).
fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|p| start + p)
        .unwrap_or(bytes.len())
}

/// Index of the `/` closing the block comment.
fn skip_block_comment(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Some(i + 1);
        }
        i += 1;
    }
    None
}
