//! End-to-end dataset generation: plan -> assembler -> export

use pavement_synth::config::WaveformParams;
use pavement_synth::dataset::{
    export, BatchAssembler, Dataset, DatasetSummary, GenerationPlan, OutputFormat, OutputTarget,
    Preset, SilentProgress, CSV_HEADER,
};
use pavement_synth::types::{Channel, GeneratorKind, TerrainClass};

fn run(plan: &GenerationPlan, seed: u64) -> Dataset {
    BatchAssembler::new(WaveformParams::default())
        .seed(Some(seed))
        .progress(SilentProgress)
        .run(plan)
        .expect("generation should succeed")
}

#[test]
fn two_smooth_one_pothole_layout() {
    let plan = GenerationPlan::new()
        .with(GeneratorKind::Smooth, 2)
        .with(GeneratorKind::Pothole, 1);
    let ds = run(&plan, 42);

    assert_eq!(ds.sample_count(), 3);
    assert_eq!(ds.row_count(), 600);

    let rows: Vec<_> = ds.rows().collect();
    for id in 0..3u64 {
        assert_eq!(rows.iter().filter(|r| r.sample_id == id).count(), 200);
    }
    let labels: Vec<&str> = ds.samples().iter().map(|s| s.label.label()).collect();
    assert_eq!(labels, vec!["liso", "liso", "buraco"]);
}

#[test]
fn every_sample_uses_the_same_time_axis() {
    let ds = run(&GenerationPlan::new().with(GeneratorKind::SmoothToIrregular, 3), 5);
    let expected: Vec<f64> = ds.time_axis().values().to_vec();
    assert_eq!(expected.len(), 200);
    assert_eq!(expected[0], 0.0);
    assert!(expected.last().copied().unwrap_or_default() < 2.0);

    for id in 0..3u64 {
        let stamps: Vec<f64> = ds
            .rows()
            .filter(|r| r.sample_id == id)
            .map(|r| r.timestamp)
            .collect();
        assert_eq!(stamps, expected);
    }
}

#[test]
fn row_count_is_plan_total_times_window() {
    let plan = GenerationPlan::new()
        .with(GeneratorKind::Irregular, 3)
        .with(GeneratorKind::PotholeInIrregular, 2)
        .with(GeneratorKind::Smooth, 1);
    let ds = run(&plan, 9);
    assert_eq!(ds.row_count(), plan.total_samples() * 200);
    assert_eq!(ds.label_counts()[&TerrainClass::Irregular], 3);
    assert_eq!(ds.label_counts()[&TerrainClass::Pothole], 2);
}

#[test]
fn same_seed_same_table() {
    let plan = GenerationPlan::new()
        .with(GeneratorKind::Pothole, 4)
        .with(GeneratorKind::SmoothToIrregular, 4);
    let a = run(&plan, 2024);
    let b = run(&plan, 2024);
    let c = run(&plan, 2025);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn pothole_samples_peak_inside_impact_window() {
    let ds = run(&GenerationPlan::new().with(GeneratorKind::Pothole, 20), 11);
    let dt = 0.01;
    for sample in ds.samples() {
        let idx = sample.signal.argmax(Channel::GyroX).expect("non-empty");
        let t = ds.time_axis().get(idx).expect("index in range");
        assert!(
            (0.6 - dt..=1.4 + dt).contains(&t),
            "sample {} gyro_x peak at {t}",
            sample.sample_id
        );
    }
}

#[test]
fn composite_preset_label_mix() {
    // Scaled-down composite recipe: same kinds, same order
    let mut plan = GenerationPlan::new();
    for &(kind, _) in Preset::Composite.plan().entries() {
        plan = plan.with(kind, 2);
    }
    let ds = run(&plan, 3);
    let summary = DatasetSummary::from_dataset(&ds);

    assert_eq!(summary.per_label[&TerrainClass::Smooth].samples, 2);
    assert_eq!(summary.per_label[&TerrainClass::Irregular].samples, 4);
    assert_eq!(summary.per_label[&TerrainClass::Pothole].samples, 4);
}

#[test]
fn csv_export_to_file() {
    let plan = GenerationPlan::new()
        .with(GeneratorKind::Smooth, 2)
        .with(GeneratorKind::Pothole, 1);
    let ds = run(&plan, 42);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pavement.csv");
    export(&ds, &OutputTarget::File(path.clone()), OutputFormat::Csv).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 601);

    let first: Vec<&str> = lines[1].split(',').collect();
    let second: Vec<&str> = lines[2].split(',').collect();
    assert_eq!(first[0], "0");
    assert_eq!(first[1], "0.0");
    assert_eq!(second[1], "0.01");
    assert_eq!(lines[600].split(',').last(), Some("buraco"));
}

#[test]
fn jsonl_export_to_file() {
    let ds = run(&GenerationPlan::new().with(GeneratorKind::Irregular, 2), 8);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pavement.jsonl");
    export(&ds, &OutputTarget::File(path.clone()), OutputFormat::JsonLines).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 400);
    for line in text.lines() {
        let row: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(row["label"], "irregular");
    }
}

#[test]
fn export_into_missing_directory_fails() {
    let ds = run(&GenerationPlan::new().with(GeneratorKind::Smooth, 1), 1);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("out.csv");
    assert!(export(&ds, &OutputTarget::File(path), OutputFormat::Csv).is_err());
}
