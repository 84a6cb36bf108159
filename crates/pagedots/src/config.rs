use directories::ProjectDirs;
use metaball::IndicatorSettings;
use metaball::animation::SWEEP_DURATION;
use palette::rgb::FromHexError;
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// How the selected ink is applied. Unselected dots are always filled.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PaintMode {
    #[default]
    #[strum(serialize = "Fill", serialize = "solid", serialize = "1")]
    Fill,
    #[strum(serialize = "Stroke", serialize = "outline", serialize = "0")]
    Stroke,
}

/// An opaque `#rrggbb` or `#rgb` color.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct HexColor(pub Srgba<f64>);

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb: Srgb<u8> = s.trim().parse()?;
        let (r, g, b) = rgb.into_format::<f64>().into_components();
        Ok(Self(Srgba::new(r, g, b, 1.0)))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub indicator: IndicatorSettings,
    pub paint_mode: PaintMode,
    pub selected_color: Option<HexColor>,
    pub unselected_color: Option<HexColor>,
    pub animate: bool,
    pub sweep_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indicator: IndicatorSettings::default(),
            paint_mode: PaintMode::default(),
            selected_color: None,
            unselected_color: None,
            animate: false,
            sweep_duration_ms: SWEEP_DURATION.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn sweep_duration(&self) -> Duration {
        Duration::from_millis(self.sweep_duration_ms)
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
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "pagedots", "pagedots")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PAGEDOTS"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user's config. On first run the commented default config is
/// written out for editing and the defaults are used.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Failed to write default config: {}", e),
        }
        return Config::default();
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_mode_deserialization() {
        let cases = vec![
            ("\"fill\"", PaintMode::Fill),
            ("\"FILL\"", PaintMode::Fill),
            ("\"solid\"", PaintMode::Fill),
            ("\"1\"", PaintMode::Fill),
            ("\"stroke\"", PaintMode::Stroke),
            ("\"Outline\"", PaintMode::Stroke),
            ("\"0\"", PaintMode::Stroke),
        ];

        for (json, expected) in cases {
            let deserialized: PaintMode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<PaintMode>("\"dotted\"").is_err());
    }

    #[test]
    fn test_hex_color_parsing() {
        let HexColor(color) = "#ff8000".parse().unwrap();
        let (r, g, b, a) = color.into_components();
        assert_eq!((r, a), (1.0, 1.0));
        assert!((g - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(b, 0.0);

        assert!("#f80".parse::<HexColor>().is_ok());
        assert!("not a color".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(
            r##"{ "paint_mode": "stroke", "selected_color": "#3584e4", "indicator": { "dot_count": 6 } }"##,
        )
        .unwrap();

        assert_eq!(config.paint_mode, PaintMode::Stroke);
        assert!(config.selected_color.is_some());
        assert!(config.unselected_color.is_none());
        assert_eq!(config.indicator.dot_count, 6);
        assert_eq!(config.indicator.dot_radius, 8.0);
        assert_eq!(config.sweep_duration(), SWEEP_DURATION);
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        let defaults = Config::default();

        assert_eq!(parsed.indicator, defaults.indicator);
        assert_eq!(parsed.paint_mode, defaults.paint_mode);
        assert_eq!(parsed.animate, defaults.animate);
        assert_eq!(parsed.sweep_duration_ms, defaults.sweep_duration_ms);
        assert!(parsed.selected_color.is_none());
    }
}
