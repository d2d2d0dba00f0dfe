use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use gswap_cli::pipeline::{build_swap_plan, export_pairs_csv, load_folders, pair_folders};
use gswap_match::{MatchEngine, similarity, similarity_all};
use gswap_meta::{ApplyOptions, ApplyReport, StoredPlan, apply_plan, load_plan, save_plan};
use gswap_model::{MatchOptions, SimilarityAlgorithm, SwapPlan};

use crate::cli::{MatchArgs, MatchFlags, ScoreArgs, SwapArgs};
use crate::summary::{apply_table_style, print_candidates, print_pairing, print_scores};

/// What `swap` ended up doing.
pub enum SwapOutcome {
    /// The plan was written to disk for review.
    Saved { path: PathBuf, entries: usize },
    /// The plan was applied (or dry-run).
    Applied(ApplyReport),
}

pub fn run_algorithms() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Algorithm", "Description"]);
    apply_table_style(&mut table);
    for algorithm in SimilarityAlgorithm::ALL {
        table.add_row(vec![algorithm.as_str(), algorithm.description()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_score(args: &ScoreArgs) -> Result<()> {
    let a = args.a.to_lowercase();
    let b = args.b.to_lowercase();
    let scores = if args.all {
        similarity_all(&a, &b)
    } else {
        let algorithm = SimilarityAlgorithm::from(args.algorithm);
        vec![(algorithm, similarity(&a, &b, algorithm))]
    };
    print_scores(&a, &b, &scores);
    Ok(())
}

pub fn run_match(args: &MatchArgs) -> Result<()> {
    let options = match_options(&args.flags)?;

    if let Some(limit) = args.top {
        let records = load_folders(
            &args.source_dir,
            &args.target_dir,
            &options,
            args.flags.recursive,
        )?;
        let engine = MatchEngine::new(options);
        let target_names: Vec<&str> = records.targets.iter().map(|t| t.name.as_str()).collect();
        for source in &records.sources {
            let ranked = engine.top(&source.name, &target_names, limit);
            print_candidates(source, &records.targets, &ranked);
        }
        return Ok(());
    }

    let result = pair_folders(
        &args.source_dir,
        &args.target_dir,
        &options,
        args.flags.recursive,
    )?;
    print_pairing(&result);
    if let Some(path) = &args.csv {
        export_pairs_csv(path, &result)?;
        info!(path = %path.display(), "pairs exported");
        println!("CSV: {}", path.display());
    }
    Ok(())
}

pub fn run_swap(args: &SwapArgs) -> Result<SwapOutcome> {
    let span = info_span!("swap", dry_run = args.dry_run);
    let _guard = span.enter();

    let plan = match &args.plan {
        Some(path) => {
            let stored =
                load_plan(path).with_context(|| format!("load plan {}", path.display()))?;
            info!(
                path = %path.display(),
                version = %stored.version,
                entries = stored.plan.len(),
                "plan loaded"
            );
            stored.plan
        }
        None => plan_from_folders(args)?,
    };

    if let Some(path) = &args.plan_out {
        let stored = StoredPlan::new(plan);
        let entries = stored.plan.len();
        let path = save_plan(path, &stored)
            .with_context(|| format!("save plan {}", path.display()))?;
        return Ok(SwapOutcome::Saved { path, entries });
    }

    if plan.is_empty() {
        warn!("no pairs to swap");
    }
    let options = ApplyOptions {
        dry_run: args.dry_run,
        backup: !args.no_backup,
    };
    let report = apply_plan(&plan, options).context("apply swap plan")?;
    Ok(SwapOutcome::Applied(report))
}

fn plan_from_folders(args: &SwapArgs) -> Result<SwapPlan> {
    let (Some(source_dir), Some(target_dir)) = (&args.source_dir, &args.target_dir) else {
        bail!("SOURCE_DIR and TARGET_DIR are required without --plan");
    };
    let options = match_options(&args.flags)?;
    let result = pair_folders(source_dir, target_dir, &options, args.flags.recursive)?;
    print_pairing(&result);
    build_swap_plan(source_dir, target_dir, &options, &result)
}

fn match_options(flags: &MatchFlags) -> Result<MatchOptions> {
    let mut options = MatchOptions::default()
        .with_algorithm(flags.algorithm.into())
        .with_threshold(flags.threshold)?
        .with_keep_extension(flags.keep_extension);
    if let Some(raw) = &flags.keywords {
        options = options.with_keywords(raw);
    }
    Ok(options)
}
