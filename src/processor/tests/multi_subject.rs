//! Multi-subject processing integration tests

use super::*;
use crate::config::ClamsConfig;
use crate::models::Dialect;
use crate::processor::DatasetProcessor;
use tempfile::TempDir;

fn test_config() -> ClamsConfig {
    ClamsConfig::default()
        .with_dialect(Dialect::Classic)
        .without_progress()
}

/// Helper to create a classic dataset with one export per subject
fn create_multi_subject_dataset(input_dir: &TempDir, subjects: &[&str]) {
    for (n, subject) in subjects.iter().enumerate() {
        let base = 10 + (n as i64) * 100;
        let rows = vec![
            classic_data_row(base, "8/30/2021 6:13:53 PM", "ON"),
            classic_data_row(base + 1, "8/30/2021 6:31:12 PM", "OFF"),
        ];
        write_export(
            input_dir.path(),
            &format!("{}.csv", subject.to_lowercase()),
            &classic_export(subject, &rows, None),
        );
    }
}

/// Subject column of every data row in the written result, in file order.
fn result_subjects(output_dir: &TempDir) -> Vec<String> {
    read_result(output_dir.path())
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_multi_subject_processing() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    create_multi_subject_dataset(&input_dir, &["M1", "M2", "M3"]);

    let processor = DatasetProcessor::new(
        input_dir.path().to_path_buf(),
        output_dir.path().to_path_buf(),
    )
    .with_config(test_config());
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.files_skipped, 0);
    assert_eq!(stats.total_rows, 6);
    assert!(stats.output_path.exists());
}

#[tokio::test]
async fn test_subjects_appear_in_lexical_file_order() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    // Written out of order; discovery sorts the paths before processing.
    create_multi_subject_dataset(&input_dir, &["M3", "M1", "M2"]);

    let processor = DatasetProcessor::new(
        input_dir.path().to_path_buf(),
        output_dir.path().to_path_buf(),
    )
    .with_config(test_config());
    processor.process().await.unwrap();

    assert_eq!(
        result_subjects(&output_dir),
        vec!["M1", "M1", "M2", "M2", "M3", "M3"]
    );
}

#[tokio::test]
async fn test_parameter_files_are_skipped_among_animal_files() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    create_multi_subject_dataset(&input_dir, &["M1", "M2"]);
    write_export(
        input_dir.path(),
        "experiment_params.csv",
        "Oxymax Parameter File\nSetting,Value",
    );

    let processor = DatasetProcessor::new(
        input_dir.path().to_path_buf(),
        output_dir.path().to_path_buf(),
    )
    .with_config(test_config());
    let stats = processor.process().await.unwrap();

    // The parameter file contributes nothing; the run continues.
    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_skipped, 1);
    assert_eq!(stats.total_rows, 4);
    assert_eq!(result_subjects(&output_dir), vec!["M1", "M1", "M2", "M2"]);
}

#[tokio::test]
async fn test_reprocessing_is_byte_identical() {
    let input_dir = TempDir::new().unwrap();
    create_multi_subject_dataset(&input_dir, &["M1", "M2", "M3"]);

    let mut results = Vec::new();
    for _ in 0..2 {
        let output_dir = TempDir::new().unwrap();
        let processor = DatasetProcessor::new(
            input_dir.path().to_path_buf(),
            output_dir.path().to_path_buf(),
        )
        .with_config(test_config());
        processor.process().await.unwrap();
        results.push(read_result(output_dir.path()));
    }

    assert_eq!(results[0], results[1]);
}

#[tokio::test]
async fn test_large_cohort_simulation() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();

    // A full 16-cage rack, 24 interval rows each.
    for cage in 1..=16 {
        let subject = format!("M{cage:02}");
        let rows: Vec<String> = (0..24)
            .map(|i| {
                classic_data_row(
                    i,
                    &format!("8/30/2021 {}:{:02}:00 AM", 1 + i / 60, i % 60),
                    if i % 2 == 0 { "ON" } else { "OFF" },
                )
            })
            .collect();
        write_export(
            input_dir.path(),
            &format!("{}.csv", subject.to_lowercase()),
            &classic_export(&subject, &rows, None),
        );
    }

    let processor = DatasetProcessor::new(
        input_dir.path().to_path_buf(),
        output_dir.path().to_path_buf(),
    )
    .with_config(test_config());
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.files_processed, 16);
    assert_eq!(stats.total_rows, 16 * 24);

    let content = read_result(output_dir.path());
    assert_eq!(content.lines().count(), 16 * 24 + 1);
}
