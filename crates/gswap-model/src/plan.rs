//! GUID swap plan types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Guid, SimilarityAlgorithm};

/// One asset pair whose `.meta` GUIDs will be exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapEntry {
    /// Source asset path (not the `.meta`).
    pub source: PathBuf,
    /// Target asset path (not the `.meta`).
    pub target: PathBuf,
    /// GUID currently in the source `.meta`.
    pub source_guid: Guid,
    /// GUID currently in the target `.meta`.
    pub target_guid: Guid,
    /// Similarity score that produced this pair.
    pub score: f64,
}

/// A complete swap plan between two folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapPlan {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub algorithm: SimilarityAlgorithm,
    pub threshold: f64,
    pub entries: Vec<SwapEntry>,
}

impl SwapPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
