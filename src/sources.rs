//! Source tree discovery.
//! Finds module files and the plain source files that are copied unchanged
//! into the output directory.

use crate::error::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Compiles glob patterns into a set. `*` never matches across `/`.
///
/// # Errors
/// * `Error::GlobError` for an invalid pattern
pub fn build_glob_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern.as_ref()).literal_separator(true).build()?);
    }
    Ok(builder.build()?)
}

/// Module files under `source_root` whose relative path matches
/// `module_pattern`, sorted by path. `exclude` (typically the output
/// directory) is not descended into.
pub fn discover_modules(
    source_root: &Path,
    module_pattern: &str,
    exclude: &Path,
) -> Result<Vec<PathBuf>> {
    let matcher = build_glob_set(&[module_pattern])?;
    let mut modules = Vec::new();

    let walker = WalkDir::new(source_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.path() != exclude);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(source_root).unwrap_or(entry.path());
        if matcher.is_match(relative) {
            debug!("Found module '{}'", relative.display());
            modules.push(entry.path().to_path_buf());
        }
    }

    modules.sort();
    Ok(modules)
}

/// Top-level files of `source_root` matching `copy_patterns` that are not in
/// `skip`, sorted by name. Returned paths are relative to `source_root`.
pub fn passthrough_sources<S: AsRef<str>>(
    source_root: &Path,
    copy_patterns: &[S],
    skip: &[&str],
) -> Result<Vec<PathBuf>> {
    let matcher = build_glob_set(copy_patterns)?;
    let mut sources = Vec::new();

    for entry in WalkDir::new(source_root).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = PathBuf::from(entry.file_name());
        if skip.iter().any(|host| Path::new(host) == relative.as_path()) {
            continue;
        }
        if matcher.is_match(&relative) {
            sources.push(relative);
        }
    }
    Ok(sources)
}
