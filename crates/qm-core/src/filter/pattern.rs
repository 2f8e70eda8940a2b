//! A single exclusion pattern and its matching rule

use globset::{GlobBuilder, GlobMatcher};
use qm_fs::NormalizedPath;

/// How a pattern is applied to a root-relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Leading `/`: matched against the whole relative path from the root.
    Anchored,
    /// No separator: matched against every individual path segment.
    Segment,
    /// Embedded separator: matched against the whole relative path, like an
    /// anchored pattern.
    SubPath,
}

/// One ignore pattern.
///
/// Wildcards follow shell rules: `*` and `?` also match `/`, and `[...]`
/// classes (including `[!...]`) are supported. Braces are literal.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    body: String,
    kind: PatternKind,
    directory_only: bool,
    matcher: GlobMatcher,
}

impl Pattern {
    /// Parse a pattern.
    ///
    /// Returns `None` for patterns with nothing left to match once the
    /// anchoring `/` and trailing `/` are removed.
    pub fn parse(text: &str) -> Option<Self> {
        let stripped = text.trim_end_matches('/');
        let directory_only = stripped.len() != text.len();
        let (anchored, body) = match stripped.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, stripped),
        };
        if body.is_empty() {
            return None;
        }

        let kind = if anchored {
            PatternKind::Anchored
        } else if body.contains('/') {
            PatternKind::SubPath
        } else {
            PatternKind::Segment
        };

        let matcher = compile(body)?;
        Some(Self {
            text: text.to_string(),
            body: body.to_string(),
            kind,
            directory_only,
            matcher,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The pattern with anchoring and trailing separators removed.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// How the pattern is matched against a relative path.
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Whether the pattern was written with a trailing `/`.
    ///
    /// Recorded only; files and directories are matched alike.
    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    /// Whether this pattern excludes the root-relative path `rel`.
    ///
    /// A match on any ancestor of `rel` counts, so excluding a directory
    /// excludes everything beneath it.
    pub fn matches(&self, rel: &NormalizedPath) -> bool {
        if rel.is_empty() {
            return false;
        }
        match self.kind {
            PatternKind::Segment => rel.segments().any(|segment| self.matcher.is_match(segment)),
            PatternKind::Anchored | PatternKind::SubPath => {
                let path = rel.as_str();
                self.matcher.is_match(path)
                    || path
                        .match_indices('/')
                        .any(|(idx, _)| self.matcher.is_match(&path[..idx]))
            }
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

fn compile(body: &str) -> Option<GlobMatcher> {
    let build = |glob: &str| {
        GlobBuilder::new(glob)
            .literal_separator(false)
            .backslash_escape(false)
            .build()
            .map(|g| g.compile_matcher())
    };

    match build(&escape_braces(body)) {
        Ok(matcher) => Some(matcher),
        Err(e) => {
            tracing::debug!(pattern = body, error = %e, "Invalid wildcard pattern, matching literally");
            match build(&globset::escape(body)) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::warn!(pattern = body, error = %e, "Dropping unusable pattern");
                    None
                }
            }
        }
    }
}

/// Wrap `{` and `}` outside character classes in brackets so globset does
/// not treat them as alternation.
fn escape_braces(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut in_class = false;
    for c in body.chars() {
        match c {
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '{' | '}' if !in_class => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}
