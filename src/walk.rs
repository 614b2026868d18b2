//! File discovery with `.gitignore` support.
//!
//! The discovery collaborator for the detection core: walks a directory
//! tree respecting `.gitignore` rules, skips `.git` and glob-excluded
//! paths, detects each file's format (extension overrides from the
//! configuration first, then the registry, then the shebang line), skips
//! binary files, and produces the `SourceRecord`s the driver consumes.
//! Uses the `ignore` crate for efficient traversal.
use std::collections::HashMap;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::config::DetectionConfig;
use crate::driver::SourceRecord;
use crate::lang;
use crate::util::read_source;

/// Compile glob patterns into a `GlobSet`, skipping invalid ones with a
/// warning.
fn build_glob_set(patterns: &[String]) -> Option<GlobSet> {
    if patterns.is_empty() {
        return None;
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(err) => eprintln!("warning: invalid glob '{pattern}': {err}"),
        }
    }
    match builder.build() {
        Ok(set) => Some(set),
        Err(err) => {
            eprintln!("warning: failed to compile glob set: {err}");
            None
        }
    }
}

/// Extension → format lookup built from the configuration's
/// `formats_exts` overrides. Overrides win over the registry.
fn extension_overrides(config: &DetectionConfig) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (format, exts) in &config.formats_exts {
        for ext in exts {
            map.insert(
                ext.trim_start_matches('.').to_lowercase(),
                format.clone(),
            );
        }
    }
    map
}

/// Determine a file's format id: configured overrides first, then the
/// registry by extension, then the shebang line of the content.
fn detect_format(
    path: &Path,
    source: &str,
    overrides: &HashMap<String, String>,
) -> Option<String> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str())
        && let Some(format) = overrides.get(&ext.to_lowercase())
    {
        return Some(format.clone());
    }
    if let Some(spec) = lang::detect(path) {
        return Some(spec.format.to_string());
    }
    let first_line = source.lines().next().unwrap_or("");
    lang::detect_by_shebang(first_line).map(|spec| spec.format.to_string())
}

/// Walk the tree under `root` and produce a record for every recognized,
/// non-binary source file. I/O problems are reported to stderr and the
/// affected file skipped; a bad file never aborts discovery.
pub fn discover(root: &Path, config: &DetectionConfig, excludes: &[String]) -> Vec<SourceRecord> {
    let globs = build_glob_set(excludes);
    let overrides = extension_overrides(config);
    let walk_root = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return entry.file_name() != ".git";
            }
            if let Some(set) = &globs {
                let relative = entry.path().strip_prefix(&walk_root).unwrap_or(entry.path());
                if set.is_match(relative) {
                    return false;
                }
            }
            true
        })
        .build();

    let mut records = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("warning: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();

        let source = match read_source(path) {
            Ok(Some(source)) => source,
            Ok(None) => continue, // binary
            Err(err) => {
                eprintln!("warning: {}: {err}", path.display());
                continue;
            }
        };

        let Some(format) = detect_format(path, &source, &overrides) else {
            continue;
        };

        let id = path
            .strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string();
        records.push(SourceRecord::new(id, format, source));
    }

    records
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
