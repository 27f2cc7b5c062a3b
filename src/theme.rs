use anyhow::{Context as _, Result, anyhow, bail};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

/// Color of a segment part, resolved against the [`Theme`] only while rendering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorRef {
    /// Named theme slot, e.g. `CWD_FG`
    Slot(&'static str),
    /// Concrete xterm-256 code which bypasses the theme
    Fixed(u8),
}

pub mod slot {
    use super::ColorRef::{self, Slot};

    pub const USERNAME_FG: ColorRef = Slot("USERNAME_FG");
    pub const USERNAME_BG: ColorRef = Slot("USERNAME_BG");
    pub const HOSTNAME_FG: ColorRef = Slot("HOSTNAME_FG");
    pub const HOSTNAME_BG: ColorRef = Slot("HOSTNAME_BG");
    pub const HOME_FG: ColorRef = Slot("HOME_FG");
    pub const HOME_BG: ColorRef = Slot("HOME_BG");
    pub const PATH_FG: ColorRef = Slot("PATH_FG");
    pub const PATH_BG: ColorRef = Slot("PATH_BG");
    pub const CWD_FG: ColorRef = Slot("CWD_FG");
    pub const SEPARATOR_FG: ColorRef = Slot("SEPARATOR_FG");
    pub const READONLY_FG: ColorRef = Slot("READONLY_FG");
    pub const READONLY_BG: ColorRef = Slot("READONLY_BG");
    pub const SSH_FG: ColorRef = Slot("SSH_FG");
    pub const SSH_BG: ColorRef = Slot("SSH_BG");
    pub const REPO_CLEAN_FG: ColorRef = Slot("REPO_CLEAN_FG");
    pub const REPO_CLEAN_BG: ColorRef = Slot("REPO_CLEAN_BG");
    pub const REPO_DIRTY_FG: ColorRef = Slot("REPO_DIRTY_FG");
    pub const REPO_DIRTY_BG: ColorRef = Slot("REPO_DIRTY_BG");
    pub const CMD_PASSED_FG: ColorRef = Slot("CMD_PASSED_FG");
    pub const CMD_PASSED_BG: ColorRef = Slot("CMD_PASSED_BG");
    pub const CMD_FAILED_FG: ColorRef = Slot("CMD_FAILED_FG");
    pub const CMD_FAILED_BG: ColorRef = Slot("CMD_FAILED_BG");
    pub const VIRTUAL_ENV_FG: ColorRef = Slot("VIRTUAL_ENV_FG");
    pub const VIRTUAL_ENV_BG: ColorRef = Slot("VIRTUAL_ENV_BG");

    /// Every slot some producer may reference
    pub const ALL: [ColorRef; 24] = [
        USERNAME_FG,
        USERNAME_BG,
        HOSTNAME_FG,
        HOSTNAME_BG,
        HOME_FG,
        HOME_BG,
        PATH_FG,
        PATH_BG,
        CWD_FG,
        SEPARATOR_FG,
        READONLY_FG,
        READONLY_BG,
        SSH_FG,
        SSH_BG,
        REPO_CLEAN_FG,
        REPO_CLEAN_BG,
        REPO_DIRTY_FG,
        REPO_DIRTY_BG,
        CMD_PASSED_FG,
        CMD_PASSED_BG,
        CMD_FAILED_FG,
        CMD_FAILED_BG,
        VIRTUAL_ENV_FG,
        VIRTUAL_ENV_BG,
    ];
}

/// Flag enabling the distinct `HOME_FG`/`HOME_BG` pairing for `~`
pub const HOME_SPECIAL_DISPLAY: &str = "HOME_SPECIAL_DISPLAY";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ThemeValue {
    Code(u8),
    Flag(bool),
}

/// Color table loaded from a theme file
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Theme {
    #[serde(rename = "COLORS")]
    colors: BTreeMap<String, ThemeValue>,
}

impl Theme {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read theme {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid theme {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, ThemeValue)>) -> Self {
        Self {
            colors: pairs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        }
    }

    pub fn resolve(&self, color: ColorRef) -> Result<u8> {
        let name = match color {
            ColorRef::Fixed(code) => return Ok(code),
            ColorRef::Slot(name) => name,
        };
        match self.colors.get(name) {
            Some(ThemeValue::Code(code)) => Ok(*code),
            Some(ThemeValue::Flag(_)) => bail!("theme color `{name}` is a flag, not a color code"),
            None => Err(anyhow!("theme has no color `{name}`")),
        }
    }

    /// Boolean theme switch, absent means off
    pub fn flag(&self, name: &str) -> Result<bool> {
        match self.colors.get(name) {
            None => Ok(false),
            Some(ThemeValue::Flag(flag)) => Ok(*flag),
            Some(ThemeValue::Code(_)) => bail!("theme flag `{name}` must be true or false"),
        }
    }

    /// Names of referenced slots the theme does not define
    pub fn missing_slots(&self) -> Vec<&'static str> {
        slot::ALL
            .iter()
            .filter_map(|color| match color {
                ColorRef::Slot(name) if self.resolve(*color).is_err() => Some(*name),
                _ => None,
            })
            .collect()
    }
}
