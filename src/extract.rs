use std::sync::LazyLock;

use regex::Regex;

use crate::fence::StrippedText;
use crate::types::RawLink;

/// Inline link or image: `[label](target)` / `![alt](target)`.
///
/// Deliberately tolerant and non-nesting: the target stops at the first `)`,
/// so `[x](a(b).md)` yields `a(b`. Labels and targets may span lines.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"!?\[[^\]]*\]\(([^)]+)\)").expect("valid regex"));

/// Extract every inline link and image target in order of appearance.
pub fn extract_links(stripped: &StrippedText) -> Vec<RawLink> {
    return INLINE_LINK
        .captures_iter(&stripped.text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let target = cap.get(1)?;
            return Some(RawLink {
                line: stripped.original_line(whole.start()),
                target: target.as_str().to_string(),
            });
        })
        .collect();
}
