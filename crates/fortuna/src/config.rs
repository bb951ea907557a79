use derive_more::{From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use spindle::{FontWeight, GroupError, SpinDirection};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hex color of the form `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr, From, Into)]
pub struct ColorSpec(Srgba<f64>);

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("color '{0}' does not start with '#'")]
    MissingHash(String),
    #[error("color '{0}' is not 6 or 8 hex digits")]
    BadLength(String),
    #[error("color '{0}' contains a non-hex digit")]
    InvalidDigit(String),
}

impl FromStr for ColorSpec {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
            return Err(ColorParseError::BadLength(s.to_string()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        let (r, g, b) = (byte(0)?, byte(1)?, byte(2)?);
        let a = if hex.len() == 8 { byte(3)? } else { 255 };

        let channel = |c: u8| f64::from(c) / 255.0;
        Ok(Self(Srgba::new(channel(r), channel(g), channel(b), channel(a))))
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |c: f64| (c * 255.0).round() as u8;
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            byte(self.0.red),
            byte(self.0.green),
            byte(self.0.blue),
            byte(self.0.alpha)
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SectionConfig {
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub text: Option<String>,
    pub icon: Option<char>,
    pub color: Option<ColorSpec>,
    pub image: Option<String>,
    pub text_color: Option<ColorSpec>,
    pub text_size: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpinConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_min_circles")]
    pub min_rotate_circles: u32,
    #[serde(default)]
    pub direction: SpinDirection,
    #[serde(default = "default_offset")]
    pub offset: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            min_rotate_circles: default_min_circles(),
            direction: SpinDirection::default(),
            offset: default_offset(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StyleConfig {
    pub divider_color: Option<ColorSpec>,
    pub divider_width: Option<f64>,
    pub sticker_color: Option<ColorSpec>,
    pub sticker_ratio: Option<f64>,
    pub text_bias: Option<f64>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub text_color: Option<ColorSpec>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

fn default_weight() -> f64 {
    1.0
}

fn default_duration_ms() -> u64 {
    6000
}

fn default_min_circles() -> u32 {
    4
}

fn default_offset() -> f64 {
    0.5
}

impl Config {
    /// Built-in demo wheel used until the user writes a config of their own.
    pub fn sample() -> Self {
        let section = |text: &str, weight: f64, color: &str| SectionConfig {
            weight,
            text: Some(text.to_string()),
            icon: None,
            color: color.parse().ok(),
            image: None,
            text_color: None,
            text_size: None,
        };

        Self {
            sections: vec![
                section("Jackpot", 0.5, "#2DD4B3"),
                section("Try again", 2.0, "#1E1E1E"),
                section("Double", 1.0, "#144E44"),
                section("Lose", 1.0, "#E35D5B"),
                SectionConfig {
                    weight: 1.0,
                    text: None,
                    icon: Some('★'),
                    color: "#2A2A2A".parse().ok(),
                    image: None,
                    text_color: None,
                    text_size: None,
                },
                section("Spin", 1.0, "#3DD6C6"),
            ],
            spin: SpinConfig::default(),
            style: StyleConfig::default(),
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
    #[error("Section {index}: both text and icon are set")]
    AmbiguousContent { index: usize },
    #[error("Invalid section group: {0}")]
    Group(#[from] GroupError),
    #[error("Weighted pick error: {0}")]
    Weights(#[from] rand::distr::weighted::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("dev", "fortuna", "fortuna").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("FORTUNA"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return Config::sample();
    }

    match load_config() {
        Ok(config) if !config.sections.is_empty() => config,
        Ok(_) => {
            log::warn!("Config has no sections, using the built-in sample wheel");
            Config::sample()
        }
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            Config::sample()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
