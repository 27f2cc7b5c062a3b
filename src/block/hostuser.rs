use crate::{Block, ColorRef, Environment, Powerline, style, theme::slot};
use anyhow::Result;

/// User name, as a shell prompt escape where the shell has one
pub struct User(String);

pub enum Host {
    Themed(String),
    /// Colored by the hash of the host name
    Hashed { label: String, fg: u8, bg: u8 },
}

impl From<&Environment> for User {
    fn from(env: &Environment) -> Self {
        User(match env.shell.user_token() {
            Some(token) => token.to_owned(),
            None => env.shell.escape(&env.user),
        })
    }
}

fn first_label(host: &str) -> &str {
    host.split('.').next().unwrap_or(host)
}

impl From<&Environment> for Host {
    fn from(env: &Environment) -> Self {
        let label = env.shell.escape(first_label(&env.host));
        if env.colorize_hostname {
            let (fg, bg) = style::hashed_pair(&env.host);
            return Host::Hashed { label, fg, bg };
        }
        Host::Themed(match env.shell.host_token() {
            Some(token) => token.to_owned(),
            None => label,
        })
    }
}

impl Block for User {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        line.append(format!(" {} ", self.0), slot::USERNAME_FG, slot::USERNAME_BG);
        Ok(())
    }
}

impl Block for Host {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        match self {
            Host::Themed(text) => {
                line.append(format!(" {text} "), slot::HOSTNAME_FG, slot::HOSTNAME_BG)
            }
            Host::Hashed { label, fg, bg } => line.append(
                format!(" {label} "),
                ColorRef::Fixed(*fg),
                ColorRef::Fixed(*bg),
            ),
        }
        Ok(())
    }
}
