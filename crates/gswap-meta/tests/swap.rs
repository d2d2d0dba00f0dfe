use std::fs;
use std::path::{Path, PathBuf};

use gswap_meta::{
    ApplyOptions, MetaError, StoredPlan, apply_plan, build_plan, load_plan, meta_path_for,
    read_guid, save_plan,
};
use gswap_model::{Guid, MatchPair, NameRecord, SimilarityAlgorithm};

const GUID_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const GUID_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const GUID_C: &str = "cccccccccccccccccccccccccccccccc";

fn guid(hex: &str) -> Guid {
    hex.parse().unwrap()
}

fn write_asset(dir: &Path, name: &str, guid: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let asset = dir.join(name);
    fs::write(&asset, b"payload").unwrap();
    fs::write(
        meta_path_for(&asset),
        format!("fileFormatVersion: 2\nguid: {guid}\nDefaultImporter:\n  userData: \n"),
    )
    .unwrap();
    asset
}

fn record(index: usize, path: &Path) -> NameRecord {
    NameRecord::from_path(index, path, false).unwrap()
}

fn pair(source: &Path, target: &Path) -> MatchPair {
    MatchPair {
        source: record(0, source),
        target: record(0, target),
        score: 0.9,
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    old_dir: PathBuf,
    new_dir: PathBuf,
    old_hero: PathBuf,
    new_hero: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let old_dir = dir.path().join("Old");
    let new_dir = dir.path().join("New");
    let old_hero = write_asset(&old_dir, "hero.png", GUID_A);
    let new_hero = write_asset(&new_dir, "hero_v2.png", GUID_B);
    Fixture {
        _dir: dir,
        old_dir,
        new_dir,
        old_hero,
        new_hero,
    }
}

fn plan_for(f: &Fixture) -> gswap_model::SwapPlan {
    build_plan(
        &[pair(&f.old_hero, &f.new_hero)],
        &f.old_dir,
        &f.new_dir,
        SimilarityAlgorithm::Fuzzy,
        0.8,
    )
    .unwrap()
}

#[test]
fn apply_exchanges_guids_and_writes_backups() {
    let f = fixture();
    let plan = plan_for(&f);
    assert_eq!(plan.entries[0].source_guid, guid(GUID_A));
    assert_eq!(plan.entries[0].target_guid, guid(GUID_B));

    let report = apply_plan(&plan, ApplyOptions::default()).unwrap();

    assert_eq!(report.written.len(), 2);
    assert_eq!(report.backups.len(), 2);
    assert_eq!(read_guid(&meta_path_for(&f.old_hero)).unwrap(), guid(GUID_B));
    assert_eq!(read_guid(&meta_path_for(&f.new_hero)).unwrap(), guid(GUID_A));
    let backup = fs::read_to_string(&report.backups[0]).unwrap();
    assert!(backup.contains(GUID_A));
    let rewritten = fs::read_to_string(meta_path_for(&f.old_hero)).unwrap();
    assert_eq!(
        rewritten,
        format!("fileFormatVersion: 2\nguid: {GUID_B}\nDefaultImporter:\n  userData: \n")
    );
}

#[test]
fn swapping_twice_restores_original_guids() {
    let f = fixture();
    apply_plan(&plan_for(&f), ApplyOptions::default()).unwrap();
    apply_plan(&plan_for(&f), ApplyOptions::default()).unwrap();

    assert_eq!(read_guid(&meta_path_for(&f.old_hero)).unwrap(), guid(GUID_A));
    assert_eq!(read_guid(&meta_path_for(&f.new_hero)).unwrap(), guid(GUID_B));
}

#[test]
fn dry_run_leaves_files_untouched() {
    let f = fixture();
    let before = fs::read(meta_path_for(&f.old_hero)).unwrap();

    let report = apply_plan(
        &plan_for(&f),
        ApplyOptions {
            dry_run: true,
            backup: true,
        },
    )
    .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.swapped.len(), 1);
    assert!(report.written.is_empty());
    assert!(report.backups.is_empty());
    assert_eq!(fs::read(meta_path_for(&f.old_hero)).unwrap(), before);
}

#[test]
fn stale_plan_aborts_before_writing() {
    let f = fixture();
    let plan = plan_for(&f);
    fs::write(
        meta_path_for(&f.new_hero),
        format!("fileFormatVersion: 2\nguid: {GUID_C}\n"),
    )
    .unwrap();

    let err = apply_plan(&plan, ApplyOptions::default()).unwrap_err();
    assert!(matches!(err, MetaError::StaleGuid { .. }));
    // The source was checked first but must not have been rewritten.
    assert_eq!(read_guid(&meta_path_for(&f.old_hero)).unwrap(), guid(GUID_A));
}

#[test]
fn duplicate_targets_are_rejected() {
    let f = fixture();
    let other = write_asset(&f.old_dir, "hero_old.png", GUID_C);

    let err = build_plan(
        &[pair(&f.old_hero, &f.new_hero), pair(&other, &f.new_hero)],
        &f.old_dir,
        &f.new_dir,
        SimilarityAlgorithm::Fuzzy,
        0.8,
    )
    .unwrap_err();
    assert!(matches!(err, MetaError::DuplicateAsset { ref path } if path == &f.new_hero));
}

#[test]
fn identical_guids_are_skipped() {
    let f = fixture();
    let twin = write_asset(&f.new_dir, "hero_twin.png", GUID_A);

    let plan = build_plan(
        &[pair(&f.old_hero, &twin)],
        &f.old_dir,
        &f.new_dir,
        SimilarityAlgorithm::Fuzzy,
        0.8,
    )
    .unwrap();
    assert!(plan.is_empty());
}

#[test]
fn missing_meta_is_reported() {
    let f = fixture();
    let bare = f.new_dir.join("bare.png");
    fs::write(&bare, b"payload").unwrap();

    let err = build_plan(
        &[pair(&f.old_hero, &bare)],
        &f.old_dir,
        &f.new_dir,
        SimilarityAlgorithm::Fuzzy,
        0.8,
    )
    .unwrap_err();
    assert!(matches!(err, MetaError::MetaNotFound { .. }));
}

#[test]
fn plan_file_round_trip() {
    let f = fixture();
    let plan = plan_for(&f);
    let path = f.old_dir.join("plans/hero.json");

    save_plan(&path, &StoredPlan::new(plan.clone()).with_description("hero refresh")).unwrap();
    let loaded = load_plan(&path).unwrap();

    assert_eq!(loaded.plan, plan);
    assert_eq!(loaded.description.as_deref(), Some("hero refresh"));
    assert_eq!(loaded.version, gswap_meta::PLAN_FORMAT_VERSION);
}

#[test]
fn second_apply_keeps_the_first_backup() {
    let f = fixture();
    let first = apply_plan(&plan_for(&f), ApplyOptions::default()).unwrap();
    let second = apply_plan(&plan_for(&f), ApplyOptions::default()).unwrap();

    let old_meta = meta_path_for(&f.old_hero);
    assert_eq!(first.backups[0], PathBuf::from(format!("{}.bak", old_meta.display())));
    assert_eq!(second.backups[0], PathBuf::from(format!("{}.1.bak", old_meta.display())));
    assert!(fs::read_to_string(&first.backups[0]).unwrap().contains(GUID_A));
    assert!(fs::read_to_string(&second.backups[0]).unwrap().contains(GUID_B));
}
