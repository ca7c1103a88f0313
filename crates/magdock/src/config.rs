use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use dockfx::layout::{CONTAINER_RATIO, DEFAULT_ICON_COUNT, DEFAULT_PADDING, FALLBACK_SCREEN_WIDTH};
use dockfx::{DockSettings, EffectProfile, LayoutSpec, SpringSpec};
use derive_more::{Deref, From, Into};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Where the dock surface lives. Layer-shell variants fall back to a plain
/// fullscreen window when the compositor lacks the protocol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Placement {
    #[default]
    Overlay,
    Top,
    #[strum(to_string = "window", serialize = "fullscreen")]
    Window,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown color '{0}', expected a CSS color name or #rrggbb")]
pub struct ColorParseError(String);

/// An sRGB color written as a CSS name (`purple`) or hex (`#800080`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct ColorSpec(Srgb<u8>);

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }
}

impl FromStr for ColorSpec {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        palette::named::from_str(&s.to_ascii_lowercase())
            .or_else(|| Srgb::<u8>::from_str(s).ok())
            .map(Self)
            .ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScreenConfig {
    /// Overrides the monitor width the dock is sized against.
    pub width: Option<f64>,
    pub placement: Placement,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DockConfig {
    pub icon_count: usize,
    pub padding: f64,
    pub container_ratio: f64,
    pub clamp_index: bool,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            icon_count: DEFAULT_ICON_COUNT,
            padding: DEFAULT_PADDING,
            container_ratio: CONTAINER_RATIO,
            clamp_index: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: ColorSpec,
    pub container: ColorSpec,
    pub even: ColorSpec,
    pub odd: ColorSpec,
    pub shadow: ColorSpec,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: ColorSpec::rgb(0, 0, 0),
            container: ColorSpec::rgb(255, 255, 255),
            even: ColorSpec::rgb(128, 0, 128),
            odd: ColorSpec::rgb(255, 0, 0),
            shadow: ColorSpec::rgb(0, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub dock: DockConfig,
    pub effect: EffectProfile,
    pub spring: SpringSpec,
    pub colors: ColorConfig,
}

impl Config {
    /// Configured width if any, else `detected`, else a fixed fallback.
    pub fn screen_width(&self, detected: Option<f64>) -> f64 {
        self.screen
            .width
            .or(detected)
            .unwrap_or(FALLBACK_SCREEN_WIDTH)
    }

    pub fn dock_settings(&self, screen_width: f64) -> DockSettings {
        DockSettings {
            layout: LayoutSpec {
                screen_width,
                icon_count: self.dock.icon_count,
                padding: self.dock.padding,
                container_ratio: self.dock.container_ratio,
                clamp_index: self.dock.clamp_index,
            },
            effect: self.effect,
            spring: self.spring,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "magdock", "magdock").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("MAGDOCK")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, writing the commented defaults on first launch.
pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Sends `ConfigReload` whenever the config file is written, created or removed.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch_config(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .to_path_buf();
    fs_err::create_dir_all(&config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    // the directory is watched so editors that replace the file are seen too
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(&config_dir, RecursiveMode::NonRecursive)?;

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
    Ok(())
}

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}
