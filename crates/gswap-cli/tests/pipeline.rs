use std::fs;
use std::path::{Path, PathBuf};

use gswap_cli::pipeline::{build_swap_plan, load_folders, pair_folders, write_pairs_csv};
use gswap_match::{DuplicateTarget, PairingResult};
use gswap_meta::{ApplyOptions, apply_plan, meta_path_for, read_guid};
use gswap_model::{MatchOptions, MatchPair, NameRecord, SimilarityAlgorithm};
use tempfile::TempDir;

fn write_asset(dir: &Path, name: &str, guid: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"asset").unwrap();
    fs::write(
        meta_path_for(&path),
        format!("fileFormatVersion: 2\nguid: {guid}\nDefaultImporter:\n  userData: \n"),
    )
    .unwrap();
    path
}

fn folders() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let old = temp.path().join("Old");
    let new = temp.path().join("New");
    fs::create_dir_all(&old).unwrap();
    fs::create_dir_all(&new).unwrap();
    write_asset(&old, "Hero_Idle.png", "00000000000000000000000000000001");
    write_asset(&old, "Sword.png", "00000000000000000000000000000002");
    write_asset(&new, "hero_idle_v2.png", "0000000000000000000000000000000a");
    write_asset(&new, "sword.png", "0000000000000000000000000000000b");
    (temp, old, new)
}

fn record(index: usize, path: &str) -> NameRecord {
    NameRecord::from_path(index, Path::new(path), false).unwrap()
}

#[test]
fn load_folders_skips_meta_files() {
    let (_temp, old, new) = folders();
    let records = load_folders(&old, &new, &MatchOptions::default(), false).unwrap();
    let names: Vec<&str> = records.sources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["hero_idle", "sword"]);
    assert_eq!(records.targets.len(), 2);
}

#[test]
fn pairs_folders_by_name() {
    let (_temp, old, new) = folders();
    let options = MatchOptions::default().with_threshold(0.8).unwrap();
    let result = pair_folders(&old, &new, &options, false).unwrap();

    assert_eq!(result.pairs.len(), 2);
    assert!(result.unmatched.is_empty());
    assert_eq!(result.pairs[0].target.file_name, "hero_idle_v2.png");
    assert_eq!(result.pairs[1].target.file_name, "sword.png");
    assert_eq!(result.pairs[1].score, 1.0);
}

#[test]
fn keyword_filter_leaves_sources_unmatched() {
    let (_temp, old, new) = folders();
    let options = MatchOptions::default().with_keywords("sword");
    let result = pair_folders(&old, &new, &options, false).unwrap();

    assert_eq!(result.pairs.len(), 1);
    assert_eq!(result.pairs[0].source.file_name, "Sword.png");
    assert_eq!(result.unmatched.len(), 1);
    assert_eq!(result.unmatched[0].file_name, "Hero_Idle.png");
}

#[test]
fn plan_from_pairing_swaps_guids() {
    let (_temp, old, new) = folders();
    let options = MatchOptions::default();
    let result = pair_folders(&old, &new, &options, false).unwrap();
    let plan = build_swap_plan(&old, &new, &options, &result).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.algorithm, SimilarityAlgorithm::Fuzzy);

    apply_plan(&plan, ApplyOptions::default()).unwrap();
    let sword = meta_path_for(&old.join("Sword.png"));
    assert_eq!(
        read_guid(&sword).unwrap().to_hex(),
        "0000000000000000000000000000000b"
    );
}

#[test]
fn swapping_the_same_folders_twice_restores_guids() {
    let (_temp, old, new) = folders();
    let options = MatchOptions::default();
    let guid_of = |dir: &Path, name: &str| read_guid(&meta_path_for(&dir.join(name))).unwrap();

    for _ in 0..2 {
        let result = pair_folders(&old, &new, &options, false).unwrap();
        assert_eq!(result.pairs.len(), 2);
        assert!(result.unmatched.is_empty());
        let plan = build_swap_plan(&old, &new, &options, &result).unwrap();
        apply_plan(&plan, ApplyOptions::default()).unwrap();
    }

    assert_eq!(
        guid_of(&old, "Hero_Idle.png").to_hex(),
        "00000000000000000000000000000001"
    );
    assert_eq!(
        guid_of(&new, "sword.png").to_hex(),
        "0000000000000000000000000000000b"
    );
    assert!(old.join("Sword.png.meta.bak").exists());
    assert!(old.join("Sword.png.meta.1.bak").exists());
}

#[test]
fn duplicate_targets_block_the_plan() {
    let source_a = record(0, "Old/hero.png");
    let source_b = record(1, "Old/hero2.png");
    let target = record(0, "New/hero.png");
    let result = PairingResult {
        pairs: vec![
            MatchPair {
                source: source_a.clone(),
                target: target.clone(),
                score: 1.0,
            },
            MatchPair {
                source: source_b.clone(),
                target: target.clone(),
                score: 0.9,
            },
        ],
        unmatched: Vec::new(),
        duplicate_targets: vec![DuplicateTarget {
            target,
            sources: vec![source_a, source_b],
        }],
    };

    let err = build_swap_plan(
        Path::new("Old"),
        Path::new("New"),
        &MatchOptions::default(),
        &result,
    )
    .unwrap_err();
    assert!(err.to_string().contains("hero.png"));
}

#[test]
fn csv_lists_pairs_then_unmatched() {
    let result = PairingResult {
        pairs: vec![
            MatchPair {
                source: record(0, "Old/Hero_Idle.png"),
                target: record(0, "New/hero_idle_v2.png"),
                score: 0.96,
            },
            MatchPair {
                source: record(1, "Old/Sword.png"),
                target: record(1, "New/sword_old.png"),
                score: 0.853_33,
            },
        ],
        unmatched: vec![record(2, "Old/Shield.png")],
        duplicate_targets: Vec::new(),
    };

    let mut out = Vec::new();
    write_pairs_csv(&mut out, &result).unwrap();
    let csv = String::from_utf8(out).unwrap();

    insta::assert_snapshot!(csv, @r"
    source,target,score,confidence,source_path,target_path
    Hero_Idle.png,hero_idle_v2.png,0.9600,high,Old/Hero_Idle.png,New/hero_idle_v2.png
    Sword.png,sword_old.png,0.8533,medium,Old/Sword.png,New/sword_old.png
    Shield.png,,,,Old/Shield.png,
    ");
}
