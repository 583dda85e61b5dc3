use std::path::PathBuf;

use tempfile::TempDir;
use volfill::materialize::OutcomeStatus;
use volfill::plan::FileSpec;
use volfill::run::{RunCoordinator, RunOptions, RunRequest};
use volfill::types::BYTES_PER_MB;
use volfill::warning::RunWarning;
use volfill::{Budget, FillError, FillMode};

use crate::integration::support::{tree_totals, urls, OfflineSource, StaticSource};

fn specs(raw: &[&str]) -> Vec<FileSpec> {
    raw.iter().map(|s| FileSpec::parse(s)).collect()
}

fn zero_request(dest: PathBuf, raw: &[&str], budget: Budget) -> RunRequest {
    RunRequest {
        destination: dest,
        specs: specs(raw),
        budget,
        fill_mode: FillMode::Zero,
        urls: Vec::new(),
    }
}

#[tokio::test]
async fn mixed_specs_fill_budget_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("volume");
    let coordinator = RunCoordinator::new(OfflineSource, RunOptions::default());

    let summary = coordinator
        .run(zero_request(
            dest.clone(),
            &["a:3", "nested/b", "nested/deep/c"],
            Budget::from_bytes(10 * BYTES_PER_MB),
        ))
        .await
        .unwrap();

    let sizes: Vec<u64> = summary.outcomes.iter().map(|o| o.actual_size).collect();
    assert_eq!(
        sizes,
        vec![3 * BYTES_PER_MB, 7 * BYTES_PER_MB / 2, 7 * BYTES_PER_MB / 2]
    );
    assert_eq!(summary.total_requested_bytes, 10 * BYTES_PER_MB);
    assert_eq!(summary.total_actual_bytes, 10 * BYTES_PER_MB);
    assert_eq!(tree_totals(&dest), (10 * BYTES_PER_MB, 3));
    assert!(summary.warnings.is_empty());
}

#[tokio::test]
async fn text_fill_repeats_sources_in_url_order() {
    let temp_dir = TempDir::new().unwrap();
    let source = StaticSource::new(&[("http://a", "abc"), ("http://b", "def")]);
    let coordinator = RunCoordinator::new(source, RunOptions::default());

    let request = RunRequest {
        destination: temp_dir.path().to_path_buf(),
        specs: specs(&["story.txt"]),
        budget: Budget::from_bytes(20),
        fill_mode: FillMode::Text,
        urls: urls(&["http://a", "http://missing", "http://b"]),
    };
    let summary = coordinator.run(request).await.unwrap();

    assert_eq!(summary.fill_mode, FillMode::Text);
    assert_eq!(summary.content_buffer_bytes, 6);
    assert_eq!(
        std::fs::read(temp_dir.path().join("story.txt")).unwrap(),
        b"abcdefabcdefabcdefab"
    );
    assert_eq!(
        summary.warnings,
        vec![RunWarning::FetchFailure {
            url: "http://missing".to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        }]
    );
}

#[tokio::test]
async fn all_sources_failing_downgrades_to_zero_fill() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = RunCoordinator::new(OfflineSource, RunOptions::default());

    let request = RunRequest {
        destination: temp_dir.path().to_path_buf(),
        specs: specs(&["x", "y"]),
        budget: Budget::from_bytes(4096),
        fill_mode: FillMode::Text,
        urls: urls(&["http://one", "http://two", "http://three"]),
    };
    let summary = coordinator.run(request).await.unwrap();

    assert_eq!(summary.fill_mode, FillMode::Zero);
    assert_eq!(summary.requested_fill_mode, FillMode::Text);
    assert!(summary
        .warnings
        .contains(&RunWarning::NoContentFetched { attempted: 3 }));
    assert_eq!(summary.succeeded, 2);
    for name in ["x", "y"] {
        let bytes = std::fs::read(temp_dir.path().join(name)).unwrap();
        assert_eq!(bytes.len(), 2048);
        assert!(bytes.iter().all(|b| *b == 0));
    }
}

#[tokio::test]
async fn failed_file_does_not_stop_siblings() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("blocker"), b"not a directory").unwrap();

    let options = RunOptions {
        workers: 4,
        ..RunOptions::default()
    };
    let coordinator = RunCoordinator::new(OfflineSource, options);

    let names = ["f0", "f1", "blocker/inner", "f3", "f4", "f5", "f6"];
    let summary = coordinator
        .run(zero_request(
            temp_dir.path().to_path_buf(),
            &names,
            Budget::from_bytes(700),
        ))
        .await
        .unwrap();

    // Outcomes follow input order even with concurrent workers.
    let reported: Vec<PathBuf> = summary.outcomes.iter().map(|o| o.path.clone()).collect();
    let expected: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
    assert_eq!(reported, expected);

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 6);
    assert_eq!(summary.outcomes[2].status, OutcomeStatus::Failed);
    assert!(summary.outcomes[2].error_detail.is_some());
    assert_eq!(summary.total_requested_bytes, 700);
    assert_eq!(summary.total_actual_bytes, 600);
}

#[tokio::test]
async fn rerun_overwrites_instead_of_appending() {
    let temp_dir = TempDir::new().unwrap();
    let source = StaticSource::new(&[("http://t", "0123456789")]);
    let coordinator = RunCoordinator::new(source, RunOptions::default());

    for _ in 0..2 {
        let request = RunRequest {
            destination: temp_dir.path().to_path_buf(),
            specs: specs(&["same.txt"]),
            budget: Budget::from_bytes(25),
            fill_mode: FillMode::Text,
            urls: urls(&["http://t"]),
        };
        let summary = coordinator.run(request).await.unwrap();
        assert_eq!(summary.outcomes[0].actual_size, 25);
        assert_eq!(
            std::fs::metadata(temp_dir.path().join("same.txt"))
                .unwrap()
                .len(),
            25
        );
    }
}

#[tokio::test]
async fn exhausted_budget_floors_and_warns() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = RunCoordinator::new(OfflineSource, RunOptions::default());

    let summary = coordinator
        .run(zero_request(
            temp_dir.path().to_path_buf(),
            &["big:2", "d"],
            Budget::from_bytes(BYTES_PER_MB),
        ))
        .await
        .unwrap();

    assert_eq!(summary.outcomes[1].actual_size, 1);
    assert!(matches!(
        summary.warnings[0],
        RunWarning::BudgetExhausted {
            floored_files: 1,
            ..
        }
    ));
}

#[tokio::test]
async fn unusable_destination_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let file_dest = temp_dir.path().join("occupied");
    std::fs::write(&file_dest, b"x").unwrap();
    let coordinator = RunCoordinator::new(OfflineSource, RunOptions::default());

    let result = coordinator
        .run(zero_request(file_dest, &["a"], Budget::from_bytes(10)))
        .await;

    assert!(matches!(
        result,
        Err(FillError::DestinationUnresolvable { .. })
    ));
}

#[tokio::test]
async fn all_specs_invalid_is_empty_input() {
    let temp_dir = TempDir::new().unwrap();
    let coordinator = RunCoordinator::new(OfflineSource, RunOptions::default());

    let result = coordinator
        .run(zero_request(
            temp_dir.path().join("out"),
            &["../up", "/root/abs"],
            Budget::from_bytes(10),
        ))
        .await;

    assert!(matches!(result, Err(FillError::EmptyInput)));
    assert!(!temp_dir.path().join("out").exists());
}
