//! Recursive storage walking with ignore patterns.
//!
//! Used by `list` and `collect` to gather every file a storage can see,
//! skipping entries whose *name* matches an fnmatch-style pattern
//! (`*` and `?` wildcards, matched case-sensitively against the entry name,
//! not the full path).

use regex::Regex;
use thiserror::Error;

use super::{Storage, StorageError};

/// An ignore pattern failed to compile.
#[derive(Debug, Error)]
#[error("Invalid ignore pattern {pattern:?}: {reason}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

/// A compiled set of fnmatch-style ignore patterns.
#[derive(Debug, Default)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    /// Compile a pattern list. `*` matches any run of characters, `?` a
    /// single character; everything else is literal.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(&translate(pattern)).map_err(|e| PatternError {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `name` matches any of the patterns.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }
}

/// Translate one fnmatch-style pattern into an anchored regex.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    out.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            ch => out.push_str(&regex::escape(&ch.to_string())),
        }
    }
    out.push('$');
    out
}

/// Join a location and an entry name into a logical asset path.
fn join(location: &str, name: &str) -> String {
    if location.is_empty() {
        name.to_string()
    } else {
        format!("{location}/{name}")
    }
}

/// Recursively gather every file path visible through `storage` below
/// `location`, skipping ignored names. Paths are relative to the storage
/// base, `/`-separated.
pub fn collect_files(
    storage: &dyn Storage,
    ignore: &IgnorePatterns,
    location: &str,
) -> Result<Vec<String>, StorageError> {
    let (dirs, files) = storage.listdir(location)?;

    let mut found: Vec<String> = files
        .into_iter()
        .filter(|name| !ignore.matches(name))
        .map(|name| join(location, &name))
        .collect();

    for dir in dirs {
        if ignore.matches(&dir) {
            continue;
        }
        found.extend(collect_files(storage, ignore, &join(location, &dir))?);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileSystemStorage;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn wildcards_match_names_not_paths() {
        let ignore = IgnorePatterns::compile(&["*.ignoreme", "CVS", ".*", "*~"]).unwrap();
        assert!(ignore.matches("notes.ignoreme"));
        assert!(ignore.matches("CVS"));
        assert!(ignore.matches(".hidden"));
        assert!(ignore.matches("backup~"));
        assert!(!ignore.matches("kept.txt"));
        // Literal dot in ".*" must not match a bare name
        assert!(!ignore.matches("hidden"));
    }

    #[test]
    fn question_mark_matches_one_character() {
        let ignore = IgnorePatterns::compile(&["file?.txt"]).unwrap();
        assert!(ignore.matches("file1.txt"));
        assert!(!ignore.matches("file10.txt"));
    }

    #[test]
    fn collect_files_walks_recursively() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("css/vendor")).unwrap();
        fs::write(dir.path().join("top.txt"), b"t").unwrap();
        fs::write(dir.path().join("css/base.css"), b"c").unwrap();
        fs::write(dir.path().join("css/vendor/reset.css"), b"r").unwrap();
        let storage = FileSystemStorage::new(dir.path());

        let mut found =
            collect_files(&storage, &IgnorePatterns::default(), "").unwrap();
        found.sort();
        assert_eq!(found, vec!["css/base.css", "css/vendor/reset.css", "top.txt"]);
    }

    #[test]
    fn ignored_directories_are_not_descended() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("CVS")).unwrap();
        fs::write(dir.path().join("CVS/Entries"), b"e").unwrap();
        fs::write(dir.path().join("kept.txt"), b"k").unwrap();
        let storage = FileSystemStorage::new(dir.path());

        let ignore = IgnorePatterns::compile(&["CVS"]).unwrap();
        let found = collect_files(&storage, &ignore, "").unwrap();
        assert_eq!(found, vec!["kept.txt"]);
    }
}
