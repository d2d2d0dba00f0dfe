//! Reading and rewriting the `guid:` entry of Unity `.meta` files.
//!
//! A `.meta` file is a small YAML document; the asset GUID sits on a
//! top-level line such as `guid: 4a1c0e0f1a2b4c3d9e8f7a6b5c4d3e2f`. Only
//! that token is ever touched: everything else, line endings included,
//! is preserved byte for byte.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use gswap_model::Guid;

use crate::error::{MetaError, Result};

const GUID_KEY: &str = "guid:";

/// Path of the `.meta` sidecar for an asset.
pub fn meta_path_for(asset: &Path) -> PathBuf {
    append_suffix(asset, ".meta")
}

/// First unused backup path for a `.meta` file.
///
/// `<meta>.bak` when free, otherwise `<meta>.1.bak`, `<meta>.2.bak` and so on,
/// so earlier backups are never overwritten.
pub fn backup_path_for(meta: &Path) -> PathBuf {
    let first = append_suffix(meta, ".bak");
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n: u32| append_suffix(meta, &format!(".{n}.bak")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Byte range of the GUID value within a `.meta` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GuidSpan {
    start: usize,
    end: usize,
}

fn find_guid_span(contents: &str) -> Option<GuidSpan> {
    let mut offset = 0;
    for line in contents.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(GUID_KEY) {
            let value = rest.trim_start();
            let value_len = value.find(char::is_whitespace).unwrap_or(value.len());
            let start = offset + (line.len() - value.len());
            return Some(GuidSpan {
                start,
                end: start + value_len,
            });
        }
        offset += line.len();
    }
    None
}

/// Extract the raw GUID text from `.meta` contents, if present.
pub fn guid_text(contents: &str) -> Option<&str> {
    find_guid_span(contents).map(|span| &contents[span.start..span.end])
}

/// Parse the GUID from `.meta` contents.
///
/// `path` is only used for error reporting.
pub fn parse_guid(contents: &str, path: &Path) -> Result<Guid> {
    let raw = guid_text(contents).ok_or_else(|| MetaError::MissingGuid {
        path: path.to_path_buf(),
    })?;
    raw.parse().map_err(|_| MetaError::InvalidGuid {
        path: path.to_path_buf(),
        value: raw.to_string(),
    })
}

/// Read the contents of a `.meta` file.
pub fn read_meta(meta_path: &Path) -> Result<String> {
    if !meta_path.is_file() {
        return Err(MetaError::MetaNotFound {
            path: meta_path.to_path_buf(),
        });
    }
    fs::read_to_string(meta_path).map_err(|source| MetaError::MetaRead {
        path: meta_path.to_path_buf(),
        source,
    })
}

/// Read the GUID stored in a `.meta` file.
pub fn read_guid(meta_path: &Path) -> Result<Guid> {
    let contents = read_meta(meta_path)?;
    parse_guid(&contents, meta_path)
}

/// Return `contents` with its GUID replaced by `guid`.
///
/// Fails when the document has no `guid:` entry.
pub fn replace_guid(contents: &str, guid: Guid, path: &Path) -> Result<String> {
    let span = find_guid_span(contents).ok_or_else(|| MetaError::MissingGuid {
        path: path.to_path_buf(),
    })?;
    let mut out = String::with_capacity(contents.len() + 32);
    out.push_str(&contents[..span.start]);
    out.push_str(&guid.to_hex());
    out.push_str(&contents[span.end..]);
    Ok(out)
}
