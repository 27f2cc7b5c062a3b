use crate::{Block, Environment, Powerline, theme::slot};
use anyhow::Result;
use std::{ffi::OsStr, path::Path};

pub struct Venv {
    name: String,
}

pub type MaybeVenv = Option<Venv>;

impl From<&Environment> for MaybeVenv {
    fn from(env: &Environment) -> Self {
        let path = env.virtual_env.as_deref()?;
        Some(Venv {
            name: venv_name(path).to_owned(),
        })
    }
}

impl Block for MaybeVenv {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        if let Some(venv) = self {
            let content = format!(" {} ", line.shell().escape(&venv.name));
            line.append(content, slot::VIRTUAL_ENV_FG, slot::VIRTUAL_ENV_BG);
        }
        Ok(())
    }
}

/// Last component of the virtualenv path, or its parent for generic names like `.venv`
fn venv_name(path: &Path) -> &str {
    let mut names = path
        .ancestors()
        .filter_map(Path::file_name)
        .filter_map(OsStr::to_str)
        .filter(|name| !name.is_empty());
    match names.next() {
        Some(name @ (".venv" | "venv" | "env")) => names.next().unwrap_or(name),
        Some(name) => name,
        None => "<venv>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("/opt/envs/webapp", "webapp")]
    #[case::dot_venv("/home/u/src/webapp/.venv", "webapp")]
    #[case::plain_venv("/home/u/proj/venv", "proj")]
    #[case::suffix_kept("/home/u/.virtualenvs/webapp-venv", "webapp-venv")]
    #[case::underscore("/opt/_venv", "_venv")]
    #[case::env_suffix("/home/u/envs/myenv", "myenv")]
    #[case::dash_env("/srv/dev-env", "dev-env")]
    #[case::trailing_slash("/opt/envs/webapp/", "webapp")]
    #[case::generic_at_root("/.venv", ".venv")]
    #[case::root("/", "<venv>")]
    fn names_virtualenv(#[case] path: &str, #[case] name: &str) {
        assert_eq!(venv_name(Path::new(path)), name);
    }
}
