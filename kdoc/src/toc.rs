//! GitHub-flavored markdown anchors for the page index.

use std::collections::HashMap;

/// Hands out heading anchors, numbering repeats the way GitHub does
/// (`foo`, `foo-1`, `foo-2`).
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, heading: &str) -> String {
        let base = github_slug(heading);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}

/// Index list item linking `text` to the heading with anchor `slug`.
pub fn render_toc_item(text: &str, slug: &str) -> String {
    format!("* [{}](#{})", text, slug)
}

/// GitHub heading anchor slug:
/// - lowercase
/// - drop everything except alphanumerics, spaces and hyphens
/// - spaces become hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.replace(' ', "-")
}
