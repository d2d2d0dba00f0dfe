//! Building and applying GUID swap plans.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use gswap_model::{Guid, MatchPair, SimilarityAlgorithm, SwapEntry, SwapPlan};
use tracing::{debug, info, info_span, warn};

use crate::error::{MetaError, Result};
use crate::meta_file::{
    backup_path_for, meta_path_for, parse_guid, read_guid, read_meta, replace_guid,
};

/// Options for [`apply_plan`].
#[derive(Debug, Clone, Copy)]
pub struct ApplyOptions {
    /// Compute every change but write nothing.
    pub dry_run: bool,
    /// Copy each `.meta` to `<file>.meta.bak` before overwriting it.
    pub backup: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: true,
        }
    }
}

/// Outcome of applying a plan.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Entries whose GUIDs were exchanged (or would be, in a dry run).
    pub swapped: Vec<SwapEntry>,
    /// `.meta` files written.
    pub written: Vec<PathBuf>,
    /// Backups created.
    pub backups: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Read both GUIDs for every pair and assemble a plan.
///
/// Each asset may take part in at most one swap. Pairs whose GUIDs are
/// already equal are skipped.
pub fn build_plan(
    pairs: &[MatchPair],
    source_dir: &Path,
    target_dir: &Path,
    algorithm: SimilarityAlgorithm,
    threshold: f64,
) -> Result<SwapPlan> {
    let mut seen: BTreeSet<PathBuf> = BTreeSet::new();
    let mut entries = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let source = pair.source.path.clone();
        let target = pair.target.path.clone();
        if source == target {
            return Err(MetaError::SelfPair { path: source });
        }
        for path in [&source, &target] {
            if !seen.insert(path.clone()) {
                return Err(MetaError::DuplicateAsset { path: path.clone() });
            }
        }

        let source_guid = read_guid(&meta_path_for(&source))?;
        let target_guid = read_guid(&meta_path_for(&target))?;
        if source_guid == target_guid {
            warn!(
                source = %source.display(),
                target = %target.display(),
                guid = %source_guid,
                "skipping pair with identical guids"
            );
            continue;
        }

        entries.push(SwapEntry {
            source,
            target,
            source_guid,
            target_guid,
            score: pair.score,
        });
    }

    debug!(entry_count = entries.len(), "swap plan built");
    Ok(SwapPlan {
        source_dir: source_dir.to_path_buf(),
        target_dir: target_dir.to_path_buf(),
        algorithm,
        threshold,
        entries,
    })
}

struct PendingWrite {
    meta_path: PathBuf,
    contents: String,
}

/// Exchange the GUIDs of every plan entry.
///
/// All new contents are computed, and every current GUID checked against
/// the plan, before the first write. A missing or changed `.meta` therefore
/// aborts with nothing modified.
pub fn apply_plan(plan: &SwapPlan, options: ApplyOptions) -> Result<ApplyReport> {
    let span = info_span!("apply_plan", entries = plan.len(), dry_run = options.dry_run);
    let _guard = span.enter();

    let mut seen: BTreeSet<&Path> = BTreeSet::new();
    let mut pending = Vec::with_capacity(plan.len() * 2);

    for entry in &plan.entries {
        for path in [entry.source.as_path(), entry.target.as_path()] {
            if !seen.insert(path) {
                return Err(MetaError::DuplicateAsset {
                    path: path.to_path_buf(),
                });
            }
        }
        pending.push(prepare_write(&entry.source, entry.source_guid, entry.target_guid)?);
        pending.push(prepare_write(&entry.target, entry.target_guid, entry.source_guid)?);
    }

    let mut report = ApplyReport {
        swapped: plan.entries.clone(),
        dry_run: options.dry_run,
        ..ApplyReport::default()
    };

    if options.dry_run {
        for write in &pending {
            info!(meta = %write.meta_path.display(), "would rewrite guid");
        }
        return Ok(report);
    }

    for write in pending {
        if options.backup {
            let backup = backup_path_for(&write.meta_path);
            fs::copy(&write.meta_path, &backup).map_err(|source| MetaError::MetaWrite {
                path: backup.clone(),
                source,
            })?;
            report.backups.push(backup);
        }
        fs::write(&write.meta_path, write.contents).map_err(|source| MetaError::MetaWrite {
            path: write.meta_path.clone(),
            source,
        })?;
        debug!(meta = %write.meta_path.display(), "guid rewritten");
        report.written.push(write.meta_path);
    }

    info!(
        swapped = report.swapped.len(),
        written = report.written.len(),
        "guid swap applied"
    );
    Ok(report)
}

fn prepare_write(asset: &Path, expected: Guid, replacement: Guid) -> Result<PendingWrite> {
    let meta_path = meta_path_for(asset);
    let contents = read_meta(&meta_path)?;
    let found = parse_guid(&contents, &meta_path)?;
    if found != expected {
        return Err(MetaError::StaleGuid {
            path: meta_path,
            expected,
            found,
        });
    }
    let contents = replace_guid(&contents, replacement, &meta_path)?;
    Ok(PendingWrite {
        meta_path,
        contents,
    })
}
