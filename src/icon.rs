use anyhow::{Result, bail};
use std::{fmt, str::FromStr};

/// Glyph set selector
///
/// | Mode         | Meaning                                         |
/// |--------------|-------------------------------------------------|
/// | `compatible` | Plain unicode, works with any font              |
/// | `patched`    | Powerline-patched font glyphs                   |
/// | `flat`       | No glyphs at all, blocks are simply adjacent    |
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconMode {
    Compatible,
    #[default]
    Patched,
    Flat,
}

/// Glyphs the prompt is drawn with, one record per [`IconMode`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbols {
    pub lock: &'static str,
    pub network: &'static str,
    pub separator: &'static str,
    pub separator_thin: &'static str,
}

impl IconMode {
    pub const fn symbols(self) -> Symbols {
        use IconMode::*;
        match self {
            Compatible => Symbols {
                lock: "RO",
                network: "SSH",
                separator: "\u{25B6}",
                separator_thin: "\u{276F}",
            },
            Patched => Symbols {
                lock: "\u{E0A2}",
                network: "\u{E0A2}",
                separator: "\u{E0B0}",
                separator_thin: "\u{E0B1}",
            },
            Flat => Symbols {
                lock: "",
                network: "",
                separator: "",
                separator_thin: "",
            },
        }
    }
}

impl FromStr for IconMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "compatible" => Self::Compatible,
            "patched" => Self::Patched,
            "flat" => Self::Flat,
            other => bail!("unknown mode `{other}`, expected compatible, patched or flat"),
        })
    }
}

impl fmt::Display for IconMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compatible => "compatible",
            Self::Patched => "patched",
            Self::Flat => "flat",
        })
    }
}
