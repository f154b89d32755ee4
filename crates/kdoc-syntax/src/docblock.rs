//! Backward search for the doc comment attached to a declaration.

/// Doc tag that hides a declaration from the output.
pub const SUPPRESS_MARKER: &str = "@suppress";

/// Collect the `/** ... */` block that ends on `lines[before]`.
///
/// The line directly above the declaration must close the block; otherwise
/// there is no documentation. A plain `/*` opener aborts with an empty
/// result. Lines are returned top to bottom with their comment decoration
/// (leading `*`) intact; an opener line with no text is dropped.
pub fn extract_doc_block(lines: &[&str], before: Option<usize>) -> Vec<String> {
    let Some(end) = before.filter(|&i| i < lines.len()) else {
        return Vec::new();
    };

    let mut block = Vec::new();
    let mut in_block = false;

    for raw in lines[..=end].iter().rev() {
        let mut text = raw.trim_end();
        if let Some(stripped) = text.strip_suffix("*/") {
            text = stripped;
            in_block = true;
        }

        let mut opens = false;
        let trimmed = text.trim_start();
        if let Some(rest) = trimmed.strip_prefix("/**") {
            opens = true;
            text = rest;
        } else if trimmed.starts_with("/*") {
            return Vec::new();
        }

        if !in_block {
            break;
        }
        if !(opens && text.trim().is_empty()) {
            block.push(text.to_string());
        }
        if opens {
            break;
        }
    }

    block.reverse();
    block
}

/// Text of a trailing `/**< ... */` comment on the same line.
pub fn inline_doc(line: &str) -> Option<String> {
    let start = line.find("/**<")? + 4;
    let rest = &line[start..];
    let body = rest.find("*/").map_or(rest, |end| &rest[..end]);
    Some(body.trim().to_string())
}
