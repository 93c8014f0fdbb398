//! Content Patcher token handling in `FromFile` paths
//!
//! A `FromFile` such as `assets/{{Season}}/Abigail.png` names a family of
//! files that Content Patcher resolves at load time. The patcher cannot know
//! which token values will be used, so it globs the mod folder instead.

use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use glob::{MatchOptions, Pattern};
use regex::Regex;

use crate::error::{Error, Result};
use crate::utils::normalize_path;

/// Wildcard substituted for each token; never crosses a path separator
const TOKEN_WILDCARD: &str = "*";

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\{\{[a-zA-Z0-9_./]+\}\}").expect("valid token pattern"))
}

/// Whether a path contains at least one `{{token}}`
#[must_use]
pub fn has_template_token(path: &str) -> bool {
    token_regex().is_match(path)
}

/// Build a glob pattern matching every file a templated `FromFile` may name
///
/// Literal parts are escaped; each token becomes a single-segment wildcard.
#[must_use]
pub fn template_glob_pattern(mod_dir: &Path, from_file: &str) -> String {
    let relative = from_file.replace('\\', "/");
    let relative = relative.trim_start_matches('/');

    let mut pattern = Pattern::escape(&normalize_path(mod_dir));
    if !pattern.ends_with('/') {
        pattern.push('/');
    }

    let mut last = 0;
    for token in token_regex().find_iter(relative) {
        pattern.push_str(&Pattern::escape(&relative[last..token.start()]));
        pattern.push_str(TOKEN_WILDCARD);
        last = token.end();
    }
    pattern.push_str(&Pattern::escape(&relative[last..]));
    pattern
}

/// Files on disk that a templated `FromFile` can resolve to, in sorted order
///
/// # Errors
/// Returns an error if the derived pattern is invalid or a match cannot be read.
pub fn expand_template(mod_dir: &Path, from_file: &str) -> Result<Vec<PathBuf>> {
    let pattern = template_glob_pattern(mod_dir, from_file);
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let paths = glob::glob_with(&pattern, options).map_err(|e| Error::InvalidGlobPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::file_io("read", path, std::io::Error::from(e))
        })?;
        if path.is_file() {
            matches.push(rebase_match(mod_dir, from_file, &path));
        }
    }
    matches.sort();
    Ok(matches)
}

/// Re-root a glob match under `mod_dir` as the caller spelled it
///
/// `glob` drops `.` components, so `./Mods/A` comes back as `Mods/A/...`.
/// Tokens never span a separator, so the mod-relative part of a match is
/// always its last N components, N being the component count of `from_file`.
fn rebase_match(mod_dir: &Path, from_file: &str, matched: &Path) -> PathBuf {
    let depth = Path::new(&from_file.replace('\\', "/"))
        .components()
        .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir))
        .count();
    let components: Vec<_> = matched.components().collect();
    let tail: PathBuf = components[components.len().saturating_sub(depth)..]
        .iter()
        .collect();
    mod_dir.join(tail)
}
