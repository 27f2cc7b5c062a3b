use crate::{BlockType, IconMode, Shell, Theme};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Deserializer, de::Error as _};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// `config.toml`
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(rename = "SEGMENTS")]
    pub segments: Vec<BlockType>,
    #[serde(rename = "THEME")]
    pub theme: String,
    #[serde(rename = "MODE", default, deserialize_with = "from_name")]
    pub mode: Option<IconMode>,
    #[serde(rename = "SHELL", default, deserialize_with = "from_name")]
    pub shell: Option<Shell>,
    #[serde(rename = "CWD_MAX_DEPTH")]
    pub cwd_max_depth: Option<usize>,
    #[serde(rename = "CWD_ONLY", default)]
    pub cwd_only: bool,
    #[serde(rename = "COLORIZE_HOSTNAME", default)]
    pub colorize_hostname: bool,
}

fn from_name<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = anyhow::Error>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map(Some).map_err(D::Error::custom)
}

impl Config {
    /// `$XDG_CONFIG_HOME/powerprompt/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("powerprompt").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("loading config {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Theme file named by `THEME`, next to the config file
    pub fn theme_path(&self, config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .unwrap_or(Path::new("."))
            .join("themes")
            .join(format!("{}.toml", self.theme))
    }

    pub fn load_theme(&self, config_path: &Path) -> Result<Theme> {
        let path = self.theme_path(config_path);
        log::debug!("loading theme {}", path.display());
        let theme = Theme::load(&path)?;
        let missing = theme.missing_slots();
        if !missing.is_empty() {
            log::warn!(
                "theme {} has no color for {}, segments using them will fail",
                path.display(),
                missing.join(", ")
            );
        }
        Ok(theme)
    }
}
