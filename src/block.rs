use crate::{Environment, Powerline};
use anyhow::Result;
use serde::Deserialize;
use std::fmt;

mod git;
mod hostuser;
mod read_only;
mod return_code;
mod ssh;
mod venv;
mod workdir;

pub use {
    git::{GitStatus, MaybeRepo, Repo as GitRepo},
    hostuser::{Host, User},
    read_only::ReadOnly,
    return_code::ReturnCode,
    ssh::Ssh,
    venv::{MaybeVenv, Venv},
    workdir::Workdir,
};

/// A prompt feature which contributes zero or more segments
pub trait Block {
    fn append_to(&self, line: &mut Powerline) -> Result<()>;
}

/// Segment names as written in the `SEGMENTS` config key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    VirtualEnv,
    Username,
    Hostname,
    Ssh,
    Cwd,
    ReadOnly,
    Git,
    Root,
}

impl BlockType {
    pub fn create_from_env(self, env: &Environment) -> Result<Box<dyn Block>> {
        let block: Box<dyn Block> = match self {
            Self::VirtualEnv => Box::new(MaybeVenv::from(env)),
            Self::Username => Box::new(User::from(env)),
            Self::Hostname => Box::new(Host::from(env)),
            Self::Ssh => Box::new(Ssh::from(env)),
            Self::Cwd => Box::new(Workdir::new(env)?),
            Self::ReadOnly => Box::new(ReadOnly::from(env)),
            Self::Git => Box::new(GitRepo::query(env)),
            Self::Root => Box::new(ReturnCode::from(env)),
        };
        Ok(block)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VirtualEnv => "virtual_env",
            Self::Username => "username",
            Self::Hostname => "hostname",
            Self::Ssh => "ssh",
            Self::Cwd => "cwd",
            Self::ReadOnly => "read_only",
            Self::Git => "git",
            Self::Root => "root",
        })
    }
}
