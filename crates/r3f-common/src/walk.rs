//! Deterministic recursive directory listing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", ".next", "dist", "build"];

/// List every file below `dir`, depth-first.
///
/// Entries of a directory are visited in name order; a directory's files
/// come before the contents of its subdirectories. A missing `dir` yields
/// an empty list.
pub fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if dir.is_dir() {
        visit(dir, &mut files)?;
    }
    Ok(files)
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            let skipped = entry
                .file_name()
                .to_str()
                .is_some_and(|name| SKIPPED_DIRS.contains(&name));
            if skipped {
                tracing::trace!(dir = %path.display(), "skipping directory");
            } else {
                subdirs.push(path);
            }
        } else if file_type.is_file() {
            files.push(path);
        }
    }

    for sub in subdirs {
        visit(&sub, files)?;
    }
    Ok(())
}

/// Keep files whose stem is in `names` and whose extension is in `extensions`.
pub fn select_targets(files: &[PathBuf], names: &[String], extensions: &[String]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|f| {
            let stem_ok = f
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|stem| names.iter().any(|n| n == stem));
            let ext_ok = f
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|x| x == ext));
            stem_ok && ext_ok
        })
        .cloned()
        .collect()
}
