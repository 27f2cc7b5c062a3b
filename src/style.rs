use anyhow::{Result, bail};
use const_format::formatcp;
use std::{fmt, str::FromStr};

const ESC: &str = "\x1b";
const RESET_BODY: &str = "[0m";
const BASH_ESC: &str = "\\e";
const BASH_INVISIBLE_START: &str = "\\[";
const BASH_INVISIBLE_END: &str = "\\]";
const ZSH_INVISIBLE_START: &str = "%{";
const ZSH_INVISIBLE_END: &str = "%}";

/// Raw reset sequence, as emitted by [`Shell::Bare`]
pub const RESET: &str = formatcp!("{ESC}{RESET_BODY}");

/// Escaping convention of the shell which consumes the prompt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shell {
    #[default]
    Bash,
    Zsh,
    Bare,
}

/// Which half of the cell a color code applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

impl Layer {
    const fn selector(self) -> u8 {
        match self {
            Self::Foreground => 38,
            Self::Background => 48,
        }
    }
}

impl Shell {
    /// Wrap a control sequence body (everything after `ESC`) so the shell knows it has no width
    pub fn wrap(self, body: &str) -> String {
        match self {
            Self::Bash => format!("{BASH_INVISIBLE_START}{BASH_ESC}{body}{BASH_INVISIBLE_END}"),
            Self::Zsh => format!("{ZSH_INVISIBLE_START}{ESC}{body}{ZSH_INVISIBLE_END}"),
            Self::Bare => format!("{ESC}{body}"),
        }
    }

    pub fn reset(self) -> String {
        self.wrap(RESET_BODY)
    }

    /// 256-color palette escape for `code`
    pub fn color(self, layer: Layer, code: u8) -> String {
        self.wrap(&format!("[{};5;{code}m", layer.selector()))
    }

    /// Prompt escape which expands to the user name, if the shell has one
    pub fn user_token(self) -> Option<&'static str> {
        match self {
            Self::Bash => Some("\\u"),
            Self::Zsh => Some("%n"),
            Self::Bare => None,
        }
    }

    /// Prompt escape which expands to the short host name, if the shell has one
    pub fn host_token(self) -> Option<&'static str> {
        match self {
            Self::Bash => Some("\\h"),
            Self::Zsh => Some("%m"),
            Self::Bare => None,
        }
    }

    pub fn root_indicator(self) -> &'static str {
        match self {
            Self::Bash => " \\$ ",
            Self::Zsh => " %# ",
            Self::Bare => " $ ",
        }
    }

    /// Make arbitrary text inert inside a prompt string
    pub fn escape(self, text: &str) -> String {
        match self {
            // Decoded once as prompt escapes, then expanded like a double-quoted string
            Self::Bash => text.chars().fold(String::new(), |mut acc, c| {
                match c {
                    '\\' => acc.push_str("\\\\\\\\"),
                    '$' | '`' => {
                        acc.push_str("\\\\");
                        acc.push(c);
                    }
                    _ => acc.push(c),
                }
                acc
            }),
            // The zsh hook hands the output to `prompt_subst` through a variable, never as source
            Self::Zsh => text.replace('%', "%%"),
            Self::Bare => text.to_owned(),
        }
    }
}

impl FromStr for Shell {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "bash" => Self::Bash,
            "zsh" => Self::Zsh,
            "bare" => Self::Bare,
            other => bail!("unknown shell `{other}`, expected bash, zsh or bare"),
        })
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Bare => "bare",
        })
    }
}

/// Foreground and background picked from the hash of `what`
///
/// Background comes from a fixed hue table, foreground is its complement. Both are mapped onto
/// the xterm-256 color cube.
pub fn hashed_pair(what: &str) -> (u8, u8) {
    fn polyhash(s: &str, m: usize, p: usize, h_init: usize) -> usize {
        let mut h = h_init % m;
        for by in s.bytes() {
            h = (h * p + by as usize) % m;
        }
        h
    }

    let idx = polyhash(what, 23, 179, what.len()) + 1;
    let (r, g, b) = HSV_COLOR_TABLE[idx];
    (rgb_to_xterm(255 - r, 255 - g, 255 - b), rgb_to_xterm(r, g, b))
}

/// Nearest entry of the 6x6x6 xterm color cube
pub fn rgb_to_xterm(r: u8, g: u8, b: u8) -> u8 {
    const STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let nearest = |v: u8| {
        (0..STEPS.len())
            .min_by_key(|&i| STEPS[i].abs_diff(v))
            .unwrap_or_default() as u8
    };
    16 + 36 * nearest(r) + 6 * nearest(g) + nearest(b)
}

const HSV_COLOR_TABLE: [(u8, u8, u8); 24] = [
    (255, 0, 0),
    (255, 85, 0),
    (255, 128, 0),
    (255, 170, 0),
    (255, 213, 0),
    (255, 255, 0),
    (213, 255, 0),
    (170, 255, 0),
    (128, 255, 0),
    (0, 255, 85),
    (0, 255, 128),
    (0, 255, 170),
    (0, 255, 213),
    (0, 213, 255),
    (0, 128, 255),
    (0, 85, 255),
    (128, 0, 255),
    (170, 0, 255),
    (213, 0, 255),
    (255, 0, 255),
    (255, 0, 212),
    (255, 0, 170),
    (255, 0, 128),
    (255, 0, 85),
];
