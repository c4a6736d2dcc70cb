use clap::Parser;

use super::cli::{Cli, OutputFormat};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

mod options {
    use super::*;

    #[test]
    fn defaults() {
        let cli = parse(&["confargs", "config.toml"]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.verbose);
        assert_eq!(cli.config.to_str(), Some("config.toml"));
        assert!(cli.overrides.is_empty());
    }

    #[test]
    fn own_options_before_config() {
        let cli = parse(&["confargs", "-v", "--format", "yaml", "config.toml"]);

        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Yaml);
    }

    #[test]
    fn config_path_is_required() {
        assert!(Cli::try_parse_from(["confargs"]).is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["confargs", "--format", "ini", "c.toml"]).is_err());
    }
}

mod overrides {
    use super::*;

    #[test]
    fn tokens_after_config_pass_through() {
        let cli = parse(&[
            "confargs",
            "config.toml",
            "--login",
            "alice",
            "--max_retries=-1",
            "-v",
            "--format",
            "toml",
        ]);

        // options after the config path belong to the config
        assert!(!cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);

        let args: Vec<String> = cli
            .override_args()
            .map(|a| a.into_string().unwrap())
            .collect();
        assert_eq!(
            args,
            vec!["confargs", "--login", "alice", "--max_retries=-1", "-v", "--format", "toml"]
        );
    }
}
