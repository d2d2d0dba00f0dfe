//! Asset discovery.

use std::path::{Path, PathBuf};

use gswap_model::NameRecord;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Options for scanning an asset folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Keep file extensions in record names.
    pub keep_extension: bool,
}

/// True for Unity `.meta` sidecar files.
pub fn is_meta_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("meta"))
}

/// True for `.meta` backups such as `hero.png.meta.bak` or `hero.png.meta.1.bak`.
pub fn is_meta_backup(path: &Path) -> bool {
    let is_bak = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bak"));
    is_bak
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.to_ascii_lowercase().contains(".meta."))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Lists asset files in a directory.
///
/// `.meta` sidecars, their backups and dotfiles are skipped. Returns paths sorted so that
/// record indices are stable between runs.
pub fn list_asset_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    collect_files(dir, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }

        if path.is_dir() {
            if recursive {
                collect_files(&path, recursive, files)?;
            }
            continue;
        }

        if path.is_file() && !is_meta_file(&path) && !is_meta_backup(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Scans a folder and builds one [`NameRecord`] per asset.
pub fn load_name_records(dir: &Path, options: ScanOptions) -> Result<Vec<NameRecord>> {
    let files = list_asset_files(dir, options.recursive)?;
    let mut records = Vec::with_capacity(files.len());

    for path in files {
        match NameRecord::from_path(records.len(), &path, options.keep_extension) {
            Some(record) => records.push(record),
            None => warn!(path = %path.display(), "skipping asset with non UTF-8 name"),
        }
    }

    debug!(
        dir = %dir.display(),
        record_count = records.len(),
        recursive = options.recursive,
        "loaded name records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_detection_is_case_insensitive() {
        assert!(is_meta_file(Path::new("hero.png.meta")));
        assert!(is_meta_file(Path::new("hero.png.META")));
        assert!(!is_meta_file(Path::new("hero.png")));
        assert!(!is_meta_file(Path::new("meta")));
    }

    #[test]
    fn meta_backups_are_recognized() {
        assert!(is_meta_backup(Path::new("hero.png.meta.bak")));
        assert!(is_meta_backup(Path::new("hero.png.META.2.bak")));
        assert!(!is_meta_backup(Path::new("hero.bak")));
        assert!(!is_meta_backup(Path::new("hero.png.meta")));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = list_asset_files(Path::new("/definitely/not/here"), false).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
