use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub population_csv: PathBuf,
    pub petitions_csv: PathBuf,
    pub countries_csv: PathBuf,
    pub demographics_csv: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: Option<PathBuf>, // browser client, if one is deployed next to the API
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    pub source_color: [u8; 3],
    pub target_color: [u8; 3],
    pub icon_url: String,
    pub icon_width: u32,
    pub icon_height: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            source_color: [185, 45, 4],
            target_color: [250, 253, 197],
            icon_url: "https://upload.wikimedia.org/wikipedia/commons/thumb/5/59/Yara_Said_refugee_flag.svg/640px-Yara_Said_refugee_flag.svg.png".to_string(),
            icon_width: 150,
            icon_height: 100,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}
