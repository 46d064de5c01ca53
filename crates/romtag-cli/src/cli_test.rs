use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    Cli::command().debug_assert();
}

#[test]
fn test_tag_args_parse() {
    let cli = Cli::try_parse_from([
        "romtag",
        "--cache-dir",
        "/tmp/cache",
        "tag",
        "roms",
        "--check-deps",
        "--samples",
        "samples",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(cli.global.cache_dir, Some(PathBuf::from("/tmp/cache")));
    match cli.command {
        Commands::Tag(args) => {
            assert_eq!(args.scan_dir, PathBuf::from("roms"));
            assert!(args.check_deps);
            assert_eq!(args.samples, Some(PathBuf::from("samples")));
            assert!(args.dry_run);
            assert!(!args.reset);
        }
        other => panic!("expected tag, got {:?}", other),
    }
}

#[test]
fn test_dependency_checking_is_off_by_default() {
    let cli = Cli::try_parse_from(["romtag", "tag", "roms"]).unwrap();
    match cli.command {
        Commands::Tag(args) => assert!(!args.check_deps),
        other => panic!("expected tag, got {:?}", other),
    }
}

#[test]
fn test_show_output_format() {
    let cli = Cli::try_parse_from(["romtag", "show", "pacman", "-o", "json"]).unwrap();
    match cli.command {
        Commands::Show(args) => {
            assert_eq!(args.item, "pacman");
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("expected show, got {:?}", other),
    }
}
