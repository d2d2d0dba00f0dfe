use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gswap_match::{ConfidenceLevel, PairingResult};
use gswap_meta::ApplyReport;
use gswap_model::{MatchResult, NameRecord, SimilarityAlgorithm};

pub fn print_scores(a: &str, b: &str, scores: &[(SimilarityAlgorithm, f64)]) {
    println!("{a}  <->  {b}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Algorithm"),
        header_cell("Score"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (algorithm, score) in scores {
        table.add_row(vec![
            Cell::new(algorithm.as_str()),
            Cell::new(format!("{score:.4}")),
            confidence_cell(*score),
        ]);
    }
    println!("{table}");
}

pub fn print_pairing(result: &PairingResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Score"),
        header_cell("Confidence"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for pair in &result.pairs {
        table.add_row(vec![
            Cell::new(&pair.source.file_name),
            Cell::new(&pair.target.file_name),
            Cell::new(format!("{:.4}", pair.score)),
            confidence_cell(pair.score),
        ]);
    }
    for source in &result.unmatched {
        table.add_row(vec![
            Cell::new(&source.file_name),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("unmatched"),
        ]);
    }
    println!("{table}");

    let counts = result.count_by_level();
    let count = |level| counts.get(&level).copied().unwrap_or(0);
    println!(
        "Paired: {} (high {}, medium {}, low {})  Unmatched: {}",
        result.pairs.len(),
        count(ConfidenceLevel::High),
        count(ConfidenceLevel::Medium),
        count(ConfidenceLevel::Low),
        result.unmatched.len()
    );
    if let Some(mean) = result.mean_score() {
        println!("Mean score: {mean:.4}");
    }
    for duplicate in &result.duplicate_targets {
        let sources: Vec<&str> = duplicate
            .sources
            .iter()
            .map(|s| s.file_name.as_str())
            .collect();
        println!(
            "Duplicate target {} chosen by: {}",
            duplicate.target.file_name,
            sources.join(", ")
        );
    }
}

pub fn print_candidates(source: &NameRecord, targets: &[NameRecord], ranked: &[MatchResult]) {
    println!("{}", source.file_name);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Candidate"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (rank, found) in ranked.iter().enumerate() {
        let Some(target) = targets.get(found.candidate_index) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&target.file_name),
            Cell::new(format!("{:.4}", found.score)),
        ]);
    }
    println!("{table}");
}

pub fn print_apply_report(report: &ApplyReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Source GUID"),
        header_cell("Target GUID"),
    ]);
    apply_table_style(&mut table);
    for entry in &report.swapped {
        table.add_row(vec![
            Cell::new(entry.source.display()),
            Cell::new(entry.target.display()),
            dim_cell(entry.source_guid),
            dim_cell(entry.target_guid),
        ]);
    }
    println!("{table}");
    if report.dry_run {
        println!("Dry run: {} swap(s) planned, nothing written", report.swapped.len());
    } else {
        println!(
            "Swapped: {}  Files written: {}  Backups: {}",
            report.swapped.len(),
            report.written.len(),
            report.backups.len()
        );
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn confidence_cell(score: f64) -> Cell {
    let level = ConfidenceLevel::from_score(score);
    let color = match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    };
    Cell::new(level.as_str()).fg(color)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
