use crate::{Block, Environment, Powerline, theme::slot};
use anyhow::Result;

/// Marks a shell reached over SSH
pub struct Ssh(bool);

impl From<&Environment> for Ssh {
    fn from(env: &Environment) -> Ssh {
        Ssh(env.ssh_client.is_some())
    }
}

impl Block for Ssh {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        if self.0 {
            let content = format!(" {} ", line.network());
            line.append(content, slot::SSH_FG, slot::SSH_BG);
        }
        Ok(())
    }
}
