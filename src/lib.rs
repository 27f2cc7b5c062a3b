//! Powerline-style prompt for bash and zsh
//!
//! This is a documentation for powerprompt API, use `README.md` for executable documentation
//!
//! # Example
//!
//! ```no_run
//! use powerprompt::{BlockType, Environment, IconMode, Shell, Theme};
//!
//! let env = Environment::detect(Shell::Bash, IconMode::Patched, 0).unwrap();
//! let theme = Theme::load("share/themes/default.toml".as_ref()).unwrap();
//! let line = powerprompt::build(&env, theme, &[BlockType::Username, BlockType::Cwd]).unwrap();
//! print!("{}", line.render().unwrap());
//! ```

mod icon;
mod powerline;
mod style;

/// Segment producers
pub mod block;

/// Configuration file
pub mod config;

/// Filesystem and process facts
pub mod file;

/// Theme table and color references
pub mod theme;

pub use crate::{
    block::{Block, BlockType},
    icon::{IconMode, Symbols},
    powerline::{Powerline, Segment},
    style::{Layer, RESET, Shell},
    theme::{ColorRef, Theme},
};

use anyhow::{Context as _, Result};
use std::{env, path::PathBuf};

/// Facts the segment producers read
#[derive(Clone, Debug)]
pub struct Environment {
    /// Exit status of the previous command
    pub prev_error: i32,
    pub shell: Shell,
    pub mode: IconMode,
    /// Working directory drawn as breadcrumbs, possibly removed already
    pub work_dir: PathBuf,
    /// Existing directory the process runs in, queried for git and writability
    pub real_dir: PathBuf,
    pub home: PathBuf,
    pub user: String,
    pub host: String,
    /// Content of `SSH_CLIENT`
    pub ssh_client: Option<String>,
    /// Content of `VIRTUAL_ENV`
    pub virtual_env: Option<PathBuf>,
    pub cwd_max_depth: usize,
    pub cwd_only: bool,
    pub colorize_hostname: bool,
}

impl Environment {
    pub const DEFAULT_CWD_MAX_DEPTH: usize = 5;

    /// Gather facts about the running process
    pub fn detect(shell: Shell, mode: IconMode, prev_error: i32) -> Result<Self> {
        let cwd = file::valid_cwd()?;
        let home = file::home_dir().context("cannot determine home directory")?;
        let non_empty = |name: &str| env::var_os(name).filter(|value| !value.is_empty());

        Ok(Self {
            prev_error,
            shell,
            mode,
            work_dir: cwd.shown,
            real_dir: cwd.actual,
            home,
            user: file::user_name(),
            host: file::host_name(),
            ssh_client: non_empty("SSH_CLIENT").map(|value| value.to_string_lossy().into_owned()),
            virtual_env: non_empty("VIRTUAL_ENV").map(PathBuf::from),
            cwd_max_depth: Self::DEFAULT_CWD_MAX_DEPTH,
            cwd_only: false,
            colorize_hostname: false,
        })
    }
}

/// Run every producer of `segments` in order against a fresh line
pub fn build(env: &Environment, theme: Theme, segments: &[BlockType]) -> Result<Powerline> {
    let mut line = Powerline::new(env.mode, env.shell, theme);
    for block_type in segments {
        block_type
            .create_from_env(env)
            .with_context(|| format!("cannot build `{block_type}` segment"))?
            .append_to(&mut line)?;
    }
    log::debug!("built {} segments", line.segments().len());
    Ok(line)
}
