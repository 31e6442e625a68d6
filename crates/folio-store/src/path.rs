//! Record addressing on top of the filesystem.
//!
//! A record `(collection, name)` lives at `<root>/<collection>/<name>.json`.
//! Lookups accept either the bare path or its `.json` form, so a collection
//! directory and a record file resolve through the same routine.

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Extension of every record file.
pub const RECORD_EXTENSION: &str = "json";

/// Suffix appended to a record path while it is being written.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Directory holding a collection's records.
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// Bare (extensionless) path of a record.
pub fn bare_path(root: &Path, collection: &str, name: &str) -> PathBuf {
    collection_dir(root, collection).join(name)
}

/// Final on-disk path of a record: `<root>/<collection>/<name>.json`.
pub fn record_path(root: &Path, collection: &str, name: &str) -> PathBuf {
    with_extension(&bare_path(root, collection, name))
}

/// Sibling path a record is staged at before it is renamed into place.
pub fn temp_path(record: &Path) -> PathBuf {
    append(record, TEMP_SUFFIX)
}

/// Append `.json` to a path.
///
/// Unlike [`Path::with_extension`] this never replaces an existing suffix:
/// a record named `v1.0` maps to `v1.0.json`, not `v1.json`.
pub fn with_extension(path: &Path) -> PathBuf {
    append(path, &format!(".{RECORD_EXTENSION}"))
}

fn append(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Stat `path`, falling back to `path.json` when the bare path is missing.
///
/// Returns the form that exists along with its metadata, or `None` if
/// neither does. Errors other than "not found" are propagated.
pub fn resolve(path: &Path) -> io::Result<Option<(PathBuf, Metadata)>> {
    match fs::metadata(path) {
        Ok(meta) => return Ok(Some((path.to_path_buf(), meta))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let fallback = with_extension(path);
    match fs::metadata(&fallback) {
        Ok(meta) => Ok(Some((fallback, meta))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Returns `true` if a directory entry name is a committed record file.
///
/// Staging files (`*.json.tmp`) and anything without the record extension
/// are not records.
pub fn is_record_file(file_name: &str) -> bool {
    file_name
        .strip_suffix(RECORD_EXTENSION)
        .is_some_and(|stem| stem.ends_with('.') && stem.len() > 1)
}

/// Lexically normalize a path.
///
/// Drops `.` components, folds `..` into a preceding normal component and
/// strips trailing separators. An empty result becomes `.`. The filesystem
/// is not consulted, so symlinks are left alone.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is `/`.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Clean `path` and anchor it at the current directory if it is relative.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    let cleaned = clean(path);
    if cleaned.is_absolute() {
        return Ok(cleaned);
    }
    Ok(clean(&std::env::current_dir()?.join(cleaned)))
}
