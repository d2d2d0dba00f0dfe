//! Name records and match results.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A candidate name loaded from a folder.
///
/// `name` is the normalized form used for scoring; `file_name` keeps the
/// original spelling for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Position within the list it was loaded into.
    pub index: usize,
    /// Lowercased name, extension stripped unless kept.
    pub name: String,
    /// Original file name including extension.
    pub file_name: String,
    /// Path of the asset on disk.
    pub path: PathBuf,
}

impl NameRecord {
    /// Build a record from an asset path.
    ///
    /// Returns `None` for paths without a UTF-8 file name.
    pub fn from_path(index: usize, path: &Path, keep_extension: bool) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let base = if keep_extension {
            file_name.as_str()
        } else {
            path.file_stem()?.to_str()?
        };
        Some(Self {
            index,
            name: base.to_lowercase(),
            file_name: file_name.clone(),
            path: path.to_path_buf(),
        })
    }
}

/// The selected candidate for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index into the candidate list.
    pub candidate_index: usize,
    /// Similarity score in `[0, 1]`.
    pub score: f64,
}

/// A source record paired with its best target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub source: NameRecord,
    pub target: NameRecord,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_extension_by_default() {
        let record = NameRecord::from_path(3, Path::new("Assets/Art/Hero_Idle.PNG"), false)
            .expect("record");
        assert_eq!(record.index, 3);
        assert_eq!(record.name, "hero_idle");
        assert_eq!(record.file_name, "Hero_Idle.PNG");
    }

    #[test]
    fn keeps_extension_when_asked() {
        let record =
            NameRecord::from_path(0, Path::new("Hero.Idle.anim"), true).expect("record");
        assert_eq!(record.name, "hero.idle.anim");
        let stripped =
            NameRecord::from_path(0, Path::new("Hero.Idle.anim"), false).expect("record");
        assert_eq!(stripped.name, "hero.idle");
    }
}
