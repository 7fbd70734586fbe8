use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which page the terminal opens on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Pretend front-end for the git artifact tool
    #[default]
    Demo,
    /// Documentation and feature showcase
    Showcase,
}

#[derive(Parser, Debug, PartialEq)]
#[command(name = "artifact-demo")]
#[command(about = "Terminal demo and showcase for the git artifact workflow - every command is simulated")]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Page to open on start (overrides config)
    #[arg(long, value_enum)]
    pub page: Option<Page>,

    /// Simulated command latency in milliseconds (overrides config)
    #[arg(long)]
    pub command_delay_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let args = CliArgs::parse_from(["artifact-demo"]);
        assert_eq!(args.config, None);
        assert_eq!(args.page, None);
        assert_eq!(args.command_delay_ms, None);
    }

    #[test]
    fn test_cli_parse_page() {
        let args = CliArgs::parse_from(["artifact-demo", "--page", "showcase"]);
        assert_eq!(args.page, Some(Page::Showcase));
    }

    #[test]
    fn test_cli_parse_all() {
        let args = CliArgs::parse_from([
            "artifact-demo",
            "--config", "/custom/config.toml",
            "--page", "demo",
            "--command-delay-ms", "50",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(args.page, Some(Page::Demo));
        assert_eq!(args.command_delay_ms, Some(50));
    }

    #[test]
    fn test_cli_rejects_unknown_page() {
        assert!(CliArgs::try_parse_from(["artifact-demo", "--page", "blog"]).is_err());
    }
}
