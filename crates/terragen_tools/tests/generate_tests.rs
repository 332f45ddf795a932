//! Integration tests for the batch generation runner.

use std::fs;
use std::path::Path;

use terragen_core::catalog::ResourceCatalog;
use terragen_core::encoder::{decode, encoded_len};
use terragen_core::identity::MapIdentity;
use terragen_tools::generate::{run_batch, BatchOptions, BatchReport};
use terragen_tools::validate::validate_sources;
use terragen_test_utils::fixtures::{ragged_source, uniform_candidate_source};

fn write_source(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn options(source_dir: &Path, output_dir: &Path) -> BatchOptions {
    BatchOptions {
        source_dir: source_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        config_path: None,
        seed: None,
        parallel: 0,
    }
}

fn run(source_dir: &Path, output_dir: &Path) -> BatchReport {
    run_batch(&options(source_dir, output_dir), &ResourceCatalog::shipped()).unwrap()
}

#[test]
fn test_batch_generates_artifacts_per_source() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    let out = tmp.path().join("generated");
    fs::create_dir(&src).unwrap();

    write_source(&src, "2_kimberlite.json", &uniform_candidate_source(9, 7));
    write_source(&src, "6_wormhole.json", &uniform_candidate_source(12, 10));

    let report = run(&src, &out);
    assert!(report.is_clean());
    assert_eq!(report.generated.len(), 2);

    let kimberlite = fs::read(out.join("2_kimberlite.map.bin")).unwrap();
    assert_eq!(kimberlite.len(), encoded_len(9, 7));
    let decoded = decode(&kimberlite).unwrap();
    assert_eq!(decoded.identity, MapIdentity::Kimberlite);

    let wormhole = fs::read(out.join("6_wormhole.map.bin")).unwrap();
    assert_eq!(decode(&wormhole).unwrap().identity, MapIdentity::Wormhole);
}

#[test]
fn test_one_bad_file_does_not_poison_the_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    let out = tmp.path().join("generated");
    fs::create_dir(&src).unwrap();

    write_source(&src, "1_primary.json", &uniform_candidate_source(9, 7));
    write_source(&src, "3_iridium.json", &ragged_source());
    write_source(&src, "x_mystery.json", &uniform_candidate_source(4, 4));

    let report = run(&src, &out);
    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.failures.len(), 2);
    assert!(!report.is_clean());

    // The good artifact still landed.
    assert!(out.join("1_primary.map.bin").exists());
    assert!(!out.join("3_iridium.map.bin").exists());

    let ragged = report
        .failures
        .iter()
        .find(|f| f.file == "3_iridium.json")
        .unwrap();
    assert!(ragged.message.contains("terrain"), "was: {}", ragged.message);

    let unknown = report
        .failures
        .iter()
        .find(|f| f.file == "x_mystery.json")
        .unwrap();
    assert!(unknown.message.contains("identity"), "was: {}", unknown.message);
}

#[test]
fn test_batch_runs_are_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    fs::create_dir(&src).unwrap();
    for identity in MapIdentity::ALL {
        write_source(
            &src,
            &format!("{}_map.json", identity.tag()),
            &uniform_candidate_source(20, 15),
        );
    }

    let out_a = tmp.path().join("a");
    let out_b = tmp.path().join("b");
    let report_a = run(&src, &out_a);
    let report_b = run(&src, &out_b);
    assert!(report_a.is_clean() && report_b.is_clean());

    for outcome in &report_a.generated {
        let a = fs::read(out_a.join(&outcome.artifact)).unwrap();
        let b = fs::read(out_b.join(&outcome.artifact)).unwrap();
        assert_eq!(a, b, "{} differs between runs", outcome.artifact);
    }
}

#[test]
fn test_seed_override_changes_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    fs::create_dir(&src).unwrap();
    write_source(&src, "1_primary.json", &uniform_candidate_source(20, 15));

    let out_a = tmp.path().join("a");
    let out_b = tmp.path().join("b");

    let mut opts_a = options(&src, &out_a);
    opts_a.seed = Some(1);
    let mut opts_b = options(&src, &out_b);
    opts_b.seed = Some(2);

    let catalog = ResourceCatalog::shipped();
    run_batch(&opts_a, &catalog).unwrap();
    run_batch(&opts_b, &catalog).unwrap();

    let a = fs::read(out_a.join("1_primary.map.bin")).unwrap();
    let b = fs::read(out_b.join("1_primary.map.bin")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_config_file_is_honored() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    let out = tmp.path().join("generated");
    fs::create_dir(&src).unwrap();
    write_source(&src, "1_primary.json", &uniform_candidate_source(9, 7));

    // Bounds tighter than the source dimensions: the file must fail.
    let config_path = tmp.path().join("terragen.ron");
    fs::write(
        &config_path,
        "(bounds: (x_bounds: 8, y_bounds: 25))",
    )
    .unwrap();

    let mut opts = options(&src, &out);
    opts.config_path = Some(config_path);
    let report = run_batch(&opts, &ResourceCatalog::shipped()).unwrap();
    assert_eq!(report.generated.len(), 0);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].message.contains("bounds"));
}

#[test]
fn test_bad_config_document_aborts_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    fs::create_dir(&src).unwrap();

    let config_path = tmp.path().join("terragen.ron");
    fs::write(&config_path, "(bounds: banana)").unwrap();

    let mut opts = options(&src, &tmp.path().join("out"));
    opts.config_path = Some(config_path);
    assert!(run_batch(&opts, &ResourceCatalog::shipped()).is_err());
}

#[test]
fn test_report_round_trips_through_json() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    let out = tmp.path().join("generated");
    fs::create_dir(&src).unwrap();
    write_source(&src, "4_platinum.json", &uniform_candidate_source(6, 6));

    let report = run(&src, &out);
    let report_path = out.join("report.json");
    report.save(&report_path).unwrap();

    let text = fs::read_to_string(&report_path).unwrap();
    let loaded: BatchReport = serde_json::from_str(&text).unwrap();
    assert_eq!(loaded.generated.len(), 1);
    assert_eq!(loaded.generated[0].identity, MapIdentity::Platinum);
    assert_eq!(
        loaded.generated[0].bytes_written,
        encoded_len(6, 6)
    );
}

#[test]
fn test_validate_matches_generation_verdicts() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("maps");
    fs::create_dir(&src).unwrap();
    write_source(&src, "1_primary.json", &uniform_candidate_source(9, 7));
    write_source(&src, "5_titanium.json", &ragged_source());

    let summary =
        validate_sources(src.clone(), None, &ResourceCatalog::shipped()).unwrap();
    assert_eq!(summary.checked, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].file, "5_titanium.json");

    // Validation wrote nothing anywhere.
    assert!(!src.join("1_primary.map.bin").exists());
}
