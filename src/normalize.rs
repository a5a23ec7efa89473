//! Link target classification.
//!
//! Turns a raw target into the filesystem path it names, or explains why it
//! names none. The order of the steps matters: the title is cut before angle
//! brackets are removed, and schemes and anchors are tested on the unwrapped
//! target.

use std::sync::LazyLock;

use regex::Regex;

/// Prefixes of targets that never name a local file.
pub const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:"];

/// Whitespace run followed by the start of a link title: `"`, `'` or `(`.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static TITLE_START: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r#"\s+["'(]"#).expect("valid regex"));

/// What a raw link target turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// In-document anchor such as `#usage`.
    Anchor,
    /// Nothing left after trimming, title removal, or fragment removal.
    Empty,
    /// Web, mail, or phone link.
    External,
    /// Filesystem path, root-relative when it starts with a separator.
    Path(String),
}

impl Target {
    /// The path to check, if the target names one.
    pub fn into_path(self) -> Option<String> {
        return match self {
            Self::Path(path) => Some(path),
            Self::Anchor | Self::Empty | Self::External => None,
        };
    }
}

/// Classify a raw target as written between the link parentheses.
pub fn classify(raw: &str) -> Target {
    let mut target = raw.trim();
    if target.is_empty() {
        return Target::Empty;
    }

    if let Some(title) = TITLE_START.find(target) {
        target = target.get(..title.start()).unwrap_or(target).trim();
        if target.is_empty() {
            return Target::Empty;
        }
    }

    if let Some(inner) = target.strip_prefix('<').and_then(|rest| return rest.strip_suffix('>')) {
        target = inner.trim();
    }

    if EXTERNAL_PREFIXES.iter().any(|prefix| return target.starts_with(prefix)) {
        return Target::External;
    }

    if target.starts_with('#') {
        return Target::Anchor;
    }

    let without_anchor = target.split('#').next().unwrap_or_default();
    let path = without_anchor.split('?').next().unwrap_or_default().trim();
    if path.is_empty() {
        return Target::Empty;
    }

    return Target::Path(path.to_string());
}

/// Reduce a raw target to the path to check, or `None` when it is not a local file link.
pub fn normalize(raw: &str) -> Option<String> {
    return classify(raw).into_path();
}
