use tempfile::TempDir;
use volfill::config::VolfillConfig;
use volfill::plan::FileSpec;
use volfill::tooling::cli::{CliContext, Commands, PlanArgs};
use volfill::FillMode;

use crate::integration::support::tree_totals;

fn plan_args(size_gb: u64, files: &[&str]) -> PlanArgs {
    PlanArgs {
        size_gb,
        files: files.iter().map(|s| FileSpec::parse(s)).collect(),
        manifest: None,
    }
}

#[test]
fn plan_command_reports_ten_gigabyte_split_as_json() {
    let context = CliContext::from_config(VolfillConfig::default());
    let output = context
        .execute(&Commands::Plan {
            plan: plan_args(10, &["a:3000", "b", "c"]),
            format: "json".to_string(),
        })
        .unwrap();

    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();
    let sizes: Vec<u64> = plan["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["size_bytes"].as_u64().unwrap())
        .collect();
    assert_eq!(sizes, vec![3_145_728_000, 3_795_845_120, 3_795_845_120]);
    assert_eq!(plan["specified_bytes"], 3_145_728_000u64);
}

#[test]
fn plan_command_with_no_specs_uses_default_file() {
    let context = CliContext::from_config(VolfillConfig::default());
    let output = context
        .execute(&Commands::Plan {
            plan: plan_args(1, &[]),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains("dummy_file.dat"));
}

#[test]
fn generate_command_writes_tree_and_json_summary() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("out");
    let manifest = temp_dir.path().join("files.json");
    std::fs::write(&manifest, r#"["docs/readme.txt", {"path": "bad", "size_mb": 0}]"#).unwrap();

    let context = CliContext::from_config(VolfillConfig::default());
    let output = context
        .execute(&Commands::Generate {
            destination: dest.clone(),
            plan: PlanArgs {
                size_gb: 0,
                files: vec![FileSpec::parse("data/blob.bin:1")],
                manifest: Some(manifest),
            },
            fill: FillMode::Zero,
            urls: Vec::new(),
            workers: Some(2),
            explicit_zeros: true,
            format: "json".to_string(),
        })
        .unwrap();

    let summary: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(summary["fill_mode"], "zero");
    assert_eq!(summary["succeeded"], 3);
    assert_eq!(summary["failed"], 0);
    assert_eq!(summary["outcomes"][0]["path"], "docs/readme.txt");
    assert_eq!(summary["outcomes"][2]["actual_size"], 1_048_576u64);
    assert_eq!(summary["warnings"][0]["kind"], "invalid_spec");

    // Budget of zero is exhausted by the explicit file, so the others get one byte.
    assert_eq!(tree_totals(&dest), (1_048_578, 3));
}

#[test]
fn generate_command_text_summary_lists_files() {
    let temp_dir = TempDir::new().unwrap();
    let context = CliContext::from_config(VolfillConfig::default());
    let output = context
        .execute(&Commands::Generate {
            destination: temp_dir.path().to_path_buf(),
            plan: plan_args(0, &["only.dat:1"]),
            fill: FillMode::Zero,
            urls: Vec::new(),
            workers: None,
            explicit_zeros: false,
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.contains("only.dat"));
    assert!(output.contains("Files processed: 1"));
    assert!(output.contains("Bytes generated: 1.00 MiB (1048576 bytes)"));
}

#[test]
fn config_file_layers_over_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("volfill.toml");
    std::fs::write(
        &config_path,
        r#"
[generation]
default_file_name = "seed.bin"

[fetch]
timeout_secs = 5
"#,
    )
    .unwrap();

    let context = CliContext::new(Some(config_path)).unwrap();
    assert_eq!(context.config().generation.default_file_name, "seed.bin");
    assert_eq!(context.config().fetch.timeout_secs, 5);
    assert_eq!(context.config().fetch.max_concurrent, 4);
}

#[test]
fn missing_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = CliContext::new(Some(temp_dir.path().join("absent.toml")));
    assert!(result.is_err());
}

#[test]
fn plan_command_with_near_max_sizes_saturates_total() {
    let context = CliContext::from_config(VolfillConfig::default());
    let output = context
        .execute(&Commands::Plan {
            plan: plan_args(1, &["a:17592186044415", "b:17592186044415"]),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(output.contains(&format!("({} bytes)", u64::MAX)));
}

#[test]
fn plan_command_survives_malformed_manifest_entry() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("files.json");
    std::fs::write(&manifest, r#"["good", {"path": "a", "size_mb": "3000"}]"#).unwrap();

    let context = CliContext::from_config(VolfillConfig::default());
    let output = context
        .execute(&Commands::Plan {
            plan: PlanArgs {
                size_gb: 1,
                files: Vec::new(),
                manifest: Some(manifest),
            },
            format: "json".to_string(),
        })
        .unwrap();

    let plan: serde_json::Value = serde_json::from_str(&output).unwrap();
    let paths: Vec<&str> = plan["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["good", "a"]);
    assert_eq!(plan["warnings"][0]["kind"], "invalid_spec");
    assert_eq!(plan["warnings"][0]["dropped"], false);
}
