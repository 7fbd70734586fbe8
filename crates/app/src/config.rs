use anyhow::{Context, Result};
use artifact_demo_core::app::{TagViewMode, Timings};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::cli::{CliArgs, Page};

/// Shortest idle redraw interval the main loop accepts
pub const MIN_TICK_RATE: Duration = Duration::from_millis(10);

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub showcase: ShowcaseConfig,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct UiConfig {
    pub start_page: Page,
    /// Idle redraw interval when no timer is pending
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "tick_rate_ms")]
    pub tick_rate: Duration,
    /// Layout the tag browser opens with
    pub tag_view_mode: TagViewMode,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct TimingConfig {
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "command_delay_ms")]
    pub command_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "load_delay_ms")]
    pub load_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "refresh_delay_ms")]
    pub refresh_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "view_mode_delay_ms")]
    pub view_mode_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "copy_feedback_ms")]
    pub copy_feedback: Duration,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Rows below the viewport top checked for the active section
    pub nav_lookahead: usize,
    /// Scroll offset past which the nav bar turns translucent
    pub navbar_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            ui: UiConfig::default(),
            timing: TimingConfig::default(),
            showcase: ShowcaseConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_page: Page::Demo,
            tick_rate: Duration::from_millis(250),
            tag_view_mode: TagViewMode::Graph,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        let timings = Timings::default();
        Self {
            command_delay: timings.command_delay,
            load_delay: timings.load_delay,
            refresh_delay: timings.refresh_delay,
            view_mode_delay: timings.view_mode_delay,
            copy_feedback: Duration::from_millis(1000),
        }
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            nav_lookahead: 4,
            navbar_threshold: 10,
        }
    }
}

impl TimingConfig {
    pub fn timings(&self) -> Timings {
        Timings {
            command_delay: self.command_delay,
            load_delay: self.load_delay,
            refresh_delay: self.refresh_delay,
            view_mode_delay: self.view_mode_delay,
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "artifact-demo")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("artifact-demo.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.ui.tick_rate < MIN_TICK_RATE {
            warn!(
                "tick_rate_ms {} is below the minimum, using {}",
                config.ui.tick_rate.as_millis(),
                MIN_TICK_RATE.as_millis()
            );
            config.ui.tick_rate = MIN_TICK_RATE;
        }

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: CliArgs) -> Result<Self> {
        let mut config = Self::load(cli_args.config)?;

        // CLI args override config file
        if let Some(page) = cli_args.page {
            config.ui.start_page = page;
        }
        if let Some(delay) = cli_args.command_delay_ms {
            config.timing.command_delay = Duration::from_millis(delay);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.ui.start_page, Page::Demo);
        assert_eq!(config.timing.command_delay, Duration::from_millis(500));
        assert_eq!(config.timing.load_delay, Duration::from_millis(1000));
        assert_eq!(config.timing.refresh_delay, Duration::from_millis(800));
        assert_eq!(config.timing.copy_feedback, Duration::from_millis(1000));
    }

    #[test]
    fn test_config_serialization_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.ui.start_page = Page::Showcase;
        config.timing.command_delay = Duration::from_millis(50);
        config.showcase.nav_lookahead = 3;

        let toml_str = toml::to_string(&config)?;
        assert!(toml_str.contains("command_delay_ms = 50"));
        let parsed_config: Config = toml::from_str(&toml_str)?;

        assert_eq!(config, parsed_config);
        Ok(())
    }

    #[test]
    fn test_zero_tick_rate_is_raised_to_minimum() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "version = 1\n\n[ui]\ntick_rate_ms = 0\n")?;

        let config = Config::load(Some(config_file))?;
        assert_eq!(config.ui.tick_rate, MIN_TICK_RATE);
        Ok(())
    }

    #[test]
    fn test_tag_view_mode_from_file() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
version = 1

[ui]
tag_view_mode = "timeline"
"#,
        )?;
        assert_eq!(config.ui.tag_view_mode, TagViewMode::Timeline);
        assert_eq!(config.ui.tick_rate, Duration::from_millis(250));

        let toml_str = toml::to_string(&Config::default())?;
        assert!(toml_str.contains("tag_view_mode = \"graph\""));

        assert!(toml::from_str::<Config>("version = 1\n[ui]\ntag_view_mode = \"tree\"\n").is_err());
        Ok(())
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
version = 1

[timing]
refresh_delay_ms = 20
"#,
        )?;
        assert_eq!(config.timing.refresh_delay, Duration::from_millis(20));
        assert_eq!(config.timing.command_delay, Duration::from_millis(500));
        assert_eq!(config.ui, UiConfig::default());
        assert_eq!(config.showcase, ShowcaseConfig::default());
        Ok(())
    }

    #[test]
    fn test_config_load_nonexistent_creates_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("nonexistent.toml");

        let config = Config::load(Some(config_path.clone()))?;

        assert_eq!(config, Config::default());
        assert!(config_path.exists());

        Ok(())
    }

    #[test]
    fn test_config_rejects_garbage() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "version = \"one\"")?;

        let err = Config::load(Some(config_path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }

    #[test]
    fn test_cli_override() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");
        Config::default().save(&config_path)?;

        let cli_args = CliArgs {
            config: Some(config_path),
            page: Some(Page::Showcase),
            command_delay_ms: Some(10),
        };

        let final_config = Config::from_cli_and_file(cli_args)?;
        assert_eq!(final_config.ui.start_page, Page::Showcase);
        assert_eq!(final_config.timing.command_delay, Duration::from_millis(10));
        assert_eq!(final_config.timing.load_delay, Duration::from_millis(1000));

        Ok(())
    }

    #[test]
    fn test_timings_conversion() {
        let mut timing = TimingConfig::default();
        timing.view_mode_delay = Duration::from_millis(5);
        let timings = timing.timings();
        assert_eq!(timings.view_mode_delay, Duration::from_millis(5));
        assert_eq!(timings.command_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_get_default_config_path() -> Result<()> {
        let path = get_default_config_path()?;
        assert!(path.ends_with("artifact-demo.toml"));
        Ok(())
    }
}
