//! # Annotations Module
//!
//! Parses the `@tag` annotations embedded in handler doc comments.
//!
//! ## Tag Vocabulary
//!
//! | Tag            | Grammar                    | Repeats          |
//! |----------------|----------------------------|------------------|
//! | `@route`       | `@route <METHOD> <path>`   | first valid wins |
//! | `@body`        | `@body <TypeIdentifier>`   | first wins       |
//! | `@name`        | `@name <text>`             | last wins        |
//! | `@description` | `@description [text...]`   | blocks appended  |
//!
//! `METHOD` must match `[A-Z]+`. A tag may appear anywhere in a line; only the first tag
//! of each line is honored. `@description` keeps consuming the following lines until a
//! line starts with another recognized tag or the comment block ends.
//!
//! ## Example
//!
//! ```rust
//! use brunogen::annotations::extract_annotations;
//!
//! let set = extract_annotations(&[
//!     "IssueCheck issues a new check.",
//!     "@route POST /checks/issue",
//!     "@body IssueCheckRequest",
//!     "@description Issues a check",
//!     "   for the given account.",
//! ]);
//! let route = set.route.as_ref().unwrap();
//! assert_eq!(route.method, "POST");
//! assert_eq!(set.body.as_deref(), Some("IssueCheckRequest"));
//! assert_eq!(set.description.as_deref(), Some("Issues a check for the given account."));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(route|body|name|description)(?:\s|$)")
        .expect("tag keyword regex should be valid")
});
static ROUTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@route\s+([A-Z]+)\s+(.+)$").expect("route regex should be valid")
});
static BODY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@body\s+(\w+)").expect("body regex should be valid"));
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@name\s+(.+)$").expect("name regex should be valid"));
static DESCRIPTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@description(?:\s+(.*))?$").expect("description regex should be valid")
});

/// Recognized doc-comment annotation tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Name,
    Route,
    Body,
    Description,
}

impl Tag {
    /// Every recognized tag
    pub const ALL: [Tag; 4] = [Tag::Name, Tag::Route, Tag::Body, Tag::Description];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Name => "@name",
            Tag::Route => "@route",
            Tag::Body => "@body",
            Tag::Description => "@description",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Tag> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str().trim_start_matches('@') == keyword)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recognized keys inside a struct field's tag string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTagKey {
    /// `json:"wireName,omitempty"`
    Json,
    /// `binding:"required"`
    Binding,
}

impl FieldTagKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldTagKey::Json => "json",
            FieldTagKey::Binding => "binding",
        }
    }
}

/// Method and path parsed from an `@route` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAnnotation {
    pub method: String,
    pub path: String,
}

/// Annotations found in one doc comment block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    pub name: Option<String>,
    pub route: Option<RouteAnnotation>,
    pub body: Option<String>,
    pub description: Option<String>,
    /// Lines that start with a recognized tag but do not follow its grammar
    pub rejected: Vec<(Tag, String)>,
}

impl AnnotationSet {
    /// Whether the block carries a complete `@route`
    pub fn is_route(&self) -> bool {
        self.route.is_some()
    }
}

/// Extract the annotation set from comment lines (markers already stripped).
///
/// Returns an empty set (apart from `rejected`) when the block has no valid `@route`.
pub fn extract_annotations<S: AsRef<str>>(lines: &[S]) -> AnnotationSet {
    let mut set = AnnotationSet::default();
    let mut description: Option<Vec<String>> = None;
    let mut in_description = false;

    for raw in lines {
        let line = raw.as_ref().trim();
        let found = TAG_KEYWORD.captures(line).and_then(|caps| {
            let start = caps.get(0)?.start();
            Some((start, Tag::from_keyword(caps.get(1)?.as_str())?))
        });
        let starts_with_tag = matches!(found, Some((0, _)));

        if in_description && !starts_with_tag {
            if let Some(parts) = description.as_mut() {
                parts.push(line.to_string());
            }
            continue;
        }
        let Some((start, tag)) = found else {
            continue;
        };
        in_description = false;
        let tagged = &line[start..];
        // Mid-line tags that do not parse are prose, not malformed annotations
        let mut reject = |tag: Tag| {
            if starts_with_tag {
                set.rejected.push((tag, line.to_string()));
            }
        };

        match tag {
            Tag::Route => match ROUTE_PATTERN.captures(tagged) {
                Some(caps) => {
                    if set.route.is_none() {
                        set.route = Some(RouteAnnotation {
                            method: caps[1].to_string(),
                            path: caps[2].trim().to_string(),
                        });
                    }
                }
                None => reject(tag),
            },
            Tag::Body => match BODY_PATTERN.captures(tagged) {
                Some(caps) => {
                    if set.body.is_none() {
                        set.body = Some(caps[1].to_string());
                    }
                }
                None => reject(tag),
            },
            Tag::Name => match NAME_PATTERN.captures(tagged) {
                Some(caps) => set.name = Some(caps[1].trim().to_string()),
                None => reject(tag),
            },
            Tag::Description => {
                let first = DESCRIPTION_PATTERN
                    .captures(tagged)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                description.get_or_insert_with(Vec::new).push(first);
                in_description = true;
            }
        }
    }

    if set.route.is_none() {
        return AnnotationSet {
            rejected: set.rejected,
            ..AnnotationSet::default()
        };
    }

    set.description = description.map(|parts| normalize_whitespace(&parts.join(" ")));
    set
}

/// Collapse every whitespace run to one space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn the raw text of one comment (`// ...` or `/* ... */`) into lines without markers
pub fn strip_comment_markers(raw: &str) -> Vec<String> {
    if let Some(line) = raw.strip_prefix("//") {
        return vec![line.trim().to_string()];
    }
    let inner = raw
        .strip_prefix("/*")
        .map(|s| s.strip_suffix("*/").unwrap_or(s))
        .unwrap_or(raw);
    inner
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim().to_string()
        })
        .collect()
}
