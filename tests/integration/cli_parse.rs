use clap::{CommandFactory, Parser};
use volfill::plan::FileSpec;
use volfill::tooling::cli::{Cli, Commands};
use volfill::FillMode;

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["volfill", "generate", "./out"],
        vec!["volfill", "generate", "./out", "--size-gb", "10", "-f", "a:3000", "-f", "b"],
        vec!["volfill", "generate", "./out", "--fill", "text", "--url", "http://x/t.txt"],
        vec!["volfill", "generate", "./out", "--workers", "4", "--explicit-zeros"],
        vec!["volfill", "generate", "./out", "--format", "json"],
        vec!["volfill", "plan", "--manifest", "files.json"],
        vec!["volfill", "plan", "-s", "2", "--file", "x", "--format", "json"],
        vec!["volfill", "config"],
        vec!["volfill", "--log-level", "debug", "config"],
        vec!["volfill", "config", "--verbose"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_invalid_input() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["volfill", "generate"],
        vec!["volfill", "generate", "./out", "--fill", "random"],
        vec!["volfill", "generate", "./out", "--format", "yaml"],
        vec!["volfill", "plan", "--size-gb", "-1"],
        vec!["volfill", "scan"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_err(), "expected parse failure for args: {args:?}");
    }
}

#[test]
fn generate_arguments_map_to_command() {
    let cli = Cli::try_parse_from([
        "volfill", "generate", "dest", "-s", "10", "-f", "a:3000", "-f", "b", "--fill", "text",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate {
            destination,
            plan,
            fill,
            urls,
            workers,
            explicit_zeros,
            format,
        } => {
            assert_eq!(destination, std::path::PathBuf::from("dest"));
            assert_eq!(plan.size_gb, 10);
            assert_eq!(
                plan.files,
                vec![
                    FileSpec::Sized {
                        path: "a".to_string(),
                        size_mb: 3000
                    },
                    FileSpec::Path("b".to_string()),
                ]
            );
            assert_eq!(fill, FillMode::Text);
            assert!(urls.is_empty());
            assert_eq!(workers, None);
            assert!(!explicit_zeros);
            assert_eq!(format, "text");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn help_mentions_every_subcommand() {
    let help = Cli::command().render_long_help().to_string();
    for name in ["generate", "plan", "config"] {
        assert!(help.contains(name), "help should list {name}");
    }
}
