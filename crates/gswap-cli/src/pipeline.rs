//! Folder pairing pipeline shared by the `match` and `swap` commands.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use gswap_ingest::{ScanOptions, load_name_records};
use gswap_match::{ConfidenceLevel, MatchEngine, PairingResult};
use gswap_meta::build_plan;
use gswap_model::{MatchOptions, NameRecord, SwapPlan};

/// Records loaded from both folders of a pairing run.
#[derive(Debug, Clone)]
pub struct FolderRecords {
    pub sources: Vec<NameRecord>,
    pub targets: Vec<NameRecord>,
}

/// Scan both folders with the extension handling from `options`.
pub fn load_folders(
    source_dir: &Path,
    target_dir: &Path,
    options: &MatchOptions,
    recursive: bool,
) -> Result<FolderRecords> {
    let scan = ScanOptions {
        recursive,
        keep_extension: options.keep_extension,
    };
    let sources = load_name_records(source_dir, scan)
        .with_context(|| format!("scan source folder {}", source_dir.display()))?;
    let targets = load_name_records(target_dir, scan)
        .with_context(|| format!("scan target folder {}", target_dir.display()))?;
    info!(
        sources = sources.len(),
        targets = targets.len(),
        "folders scanned"
    );
    Ok(FolderRecords { sources, targets })
}

/// Scan both folders and pair every source with its best target.
pub fn pair_folders(
    source_dir: &Path,
    target_dir: &Path,
    options: &MatchOptions,
    recursive: bool,
) -> Result<PairingResult> {
    let span = info_span!("pair", algorithm = %options.algorithm);
    let _guard = span.enter();

    let records = load_folders(source_dir, target_dir, options, recursive)?;
    let engine = MatchEngine::new(options.clone());
    let result = engine.pair_all(&records.sources, &records.targets);
    info!(
        paired = result.pairs.len(),
        unmatched = result.unmatched.len(),
        duplicates = result.duplicate_targets.len(),
        "pairing complete"
    );
    Ok(result)
}

/// One row of the pairing CSV export.
#[derive(Debug, Serialize)]
pub struct PairRow<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub score: String,
    pub confidence: &'static str,
    pub source_path: String,
    pub target_path: String,
}

/// Write pairs as CSV; unmatched sources get empty target columns.
pub fn write_pairs_csv<W: Write>(writer: W, result: &PairingResult) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for pair in &result.pairs {
        csv.serialize(PairRow {
            source: &pair.source.file_name,
            target: &pair.target.file_name,
            score: format!("{:.4}", pair.score),
            confidence: ConfidenceLevel::from_score(pair.score).as_str(),
            source_path: pair.source.path.display().to_string(),
            target_path: pair.target.path.display().to_string(),
        })?;
    }
    for source in &result.unmatched {
        csv.serialize(PairRow {
            source: &source.file_name,
            target: "",
            score: String::new(),
            confidence: "",
            source_path: source.path.display().to_string(),
            target_path: String::new(),
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Export pairs to a CSV file.
pub fn export_pairs_csv(path: &Path, result: &PairingResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_pairs_csv(file, result).with_context(|| format!("write {}", path.display()))
}

/// Turn a pairing into a swap plan.
///
/// Refuses pairings in which several sources chose the same target.
pub fn build_swap_plan(
    source_dir: &Path,
    target_dir: &Path,
    options: &MatchOptions,
    result: &PairingResult,
) -> Result<SwapPlan> {
    if result.has_duplicates() {
        let names: Vec<&str> = result
            .duplicate_targets
            .iter()
            .map(|dup| dup.target.file_name.as_str())
            .collect();
        bail!(
            "{} target(s) selected by more than one source: {}",
            names.len(),
            names.join(", ")
        );
    }
    let plan = build_plan(
        &result.pairs,
        source_dir,
        target_dir,
        options.algorithm,
        options.threshold,
    )
    .context("build swap plan")?;
    Ok(plan)
}
