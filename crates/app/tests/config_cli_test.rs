use anyhow::Result;
use artifact_demo::cli::{CliArgs, Page};
use artifact_demo::config::Config;
use artifact_demo::tui::TuiModel;
use artifact_demo_core::ports::ManualClock;
use clap::Parser;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// CLI args -> config file -> model the app starts with
#[test]
fn test_config_and_cli_integration() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_file = temp_dir.path().join("artifact-demo.toml");

    let test_config = r#"
version = 1

[ui]
start_page = "showcase"
tick_rate_ms = 100

[timing]
command_delay_ms = 50
load_delay_ms = 75

[showcase]
navbar_threshold = 2
"#;
    fs::write(&config_file, test_config)?;

    let config = Config::load(Some(config_file.clone()))?;
    assert_eq!(config.ui.start_page, Page::Showcase);
    assert_eq!(config.ui.tick_rate, Duration::from_millis(100));
    assert_eq!(config.timing.command_delay, Duration::from_millis(50));
    assert_eq!(config.timing.load_delay, Duration::from_millis(75));
    assert_eq!(config.timing.refresh_delay, Duration::from_millis(800));
    assert_eq!(config.showcase.navbar_threshold, 2);
    assert_eq!(config.showcase.nav_lookahead, 4);

    let cli_args = CliArgs::parse_from([
        "artifact-demo",
        "--config",
        config_file.to_str().expect("utf-8 temp path"),
        "--page",
        "demo",
        "--command-delay-ms",
        "5",
    ]);
    let config = Config::from_cli_and_file(cli_args)?;
    assert_eq!(config.ui.start_page, Page::Demo);
    assert_eq!(config.timing.command_delay, Duration::from_millis(5));
    assert_eq!(config.timing.load_delay, Duration::from_millis(75));

    // The configured delays drive the simulated commands
    let clock = Arc::new(ManualClock::new());
    let mut model = TuiModel::new(&config, clock.clone());
    assert_eq!(model.page, Page::Demo);

    model.demo.load_repository();
    clock.advance(Duration::from_millis(75));
    assert_eq!(model.run_due(), 1);
    assert!(model.demo.tag_browser().is_loaded());

    Ok(())
}

#[test]
fn test_saved_config_survives_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_file = temp_dir.path().join("roundtrip.toml");

    let mut config = Config::default();
    config.timing.copy_feedback = Duration::from_millis(300);
    config.save(&config_file)?;

    let contents = fs::read_to_string(&config_file)?;
    assert!(contents.contains("copy_feedback_ms = 300"));
    assert_eq!(Config::load(Some(config_file))?, config);
    Ok(())
}

#[test]
fn test_navbar_threshold_from_config() -> Result<()> {
    let mut config = Config::default();
    config.showcase.navbar_threshold = 0;

    let mut model = TuiModel::new(&config, Arc::new(ManualClock::new()));
    model.showcase.scroll_by(1);
    assert_eq!(
        model.showcase.navbar_style(),
        artifact_demo_core::domain::NavbarStyle::Translucent
    );
    Ok(())
}
