use crate::{Block, Environment, Powerline, file, theme::slot};
use anyhow::Result;
use std::path::Path;

/// Shown when the working directory is not writable
pub struct ReadOnly(bool);

impl ReadOnly {
    pub fn of(dir: &Path) -> Self {
        ReadOnly(!file::is_writable(dir))
    }
}

impl From<&Environment> for ReadOnly {
    fn from(env: &Environment) -> Self {
        Self::of(&env.real_dir)
    }
}

impl Block for ReadOnly {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        if self.0 {
            let content = format!(" {} ", line.lock());
            line.append(content, slot::READONLY_FG, slot::READONLY_BG);
        }
        Ok(())
    }
}
