use anyhow::{Context as _, Result, anyhow};
use pwd::Passwd;
use rustix::{
    fs::{self as rfs, Access},
    io::Errno,
};
use std::{
    env,
    path::{Component, Path, PathBuf},
};

/// Breadcrumb standing for the home directory
pub const HOME: &str = "~";

/// Breadcrumb standing for elided middle components
pub const ELLIPSIS: &str = "\u{2026}";

/// Where the prompt is drawn for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingDir {
    /// Directory as the shell sees it, drawn as breadcrumbs
    pub shown: PathBuf,
    /// Directory the process is in, `shown` or its lowest existing ancestor
    pub actual: PathBuf,
}

/// Working directory as the shell sees it.
///
/// When the directory was removed from under the shell, the process moves to the lowest
/// ancestor of `$PWD` which still exists, and `$PWD` itself is shown.
pub fn valid_cwd() -> Result<WorkingDir> {
    let err = match env::current_dir() {
        Ok(cwd) => {
            return Ok(WorkingDir {
                shown: cwd.clone(),
                actual: cwd,
            });
        }
        Err(err) => err,
    };
    let pwd = env::var_os("PWD")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("current directory is invalid and PWD is unset: {err}"))?;
    let lowest = pwd
        .ancestors()
        .find(|path| !path.as_os_str().is_empty() && path.exists())
        .context("current directory is invalid and has no existing ancestor")?
        .to_path_buf();
    env::set_current_dir(&lowest).with_context(|| {
        format!("current directory is invalid, cannot enter {}", lowest.display())
    })?;
    log::warn!(
        "current directory is invalid, lowest valid directory: {}",
        lowest.display()
    );
    Ok(WorkingDir {
        shown: pwd,
        actual: lowest,
    })
}

fn same_file(left: &rfs::Stat, right: &rfs::Stat) -> bool {
    (left.st_dev, left.st_ino) == (right.st_dev, right.st_ino)
}

/// Split `cwd` into breadcrumbs, collapsing the home directory into [`HOME`].
///
/// Home is found by file identity, so a symlinked or differently spelled home still matches.
pub fn short_path(cwd: &Path, home: &Path) -> Result<Vec<String>> {
    let home_stat =
        rfs::stat(home).with_context(|| format!("cannot stat home {}", home.display()))?;

    let names: Vec<String> = cwd
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let mut path = PathBuf::from("/");
    for (index, name) in names.iter().enumerate() {
        path.push(name);
        let stat = match rfs::stat(&path) {
            Ok(stat) => stat,
            // Nothing below a vanished directory can be home
            Err(err) if err == Errno::NOENT => break,
            Err(err) => {
                return Err(err).with_context(|| format!("cannot stat {}", path.display()));
            }
        };
        if same_file(&stat, &home_stat) {
            return Ok(std::iter::once(HOME.to_owned())
                .chain(names[index + 1..].iter().cloned())
                .collect());
        }
    }

    if names.is_empty() {
        return Ok(vec![HOME.to_owned()]);
    }
    Ok(names)
}

/// Elide the middle of `names` so that it is at most `max_depth` long.
///
/// The first two names and the last `max_depth - 3` survive, joined by one [`ELLIPSIS`]. At
/// least one trailing name is always kept, so depths below 4 behave like 4 and the result
/// can then be longer than `max_depth` (4 names for a depth of 2).
pub fn truncate(mut names: Vec<String>, max_depth: usize) -> Vec<String> {
    const HEAD: usize = 2;
    let tail = max_depth.saturating_sub(HEAD + 1).max(1);
    if names.len() <= HEAD + 1 + tail {
        return names;
    }
    let end = names.len() - tail;
    names.splice(HEAD..end, [ELLIPSIS.to_owned()]);
    names
}

/// Home directory of the current user, `$HOME` first
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            Passwd::from_uid(rustix::process::getuid().as_raw()).map(|passwd| passwd.dir.into())
        })
}

pub fn user_name() -> String {
    env::var("USER")
        .ok()
        .or_else(|| Passwd::from_uid(rustix::process::getuid().as_raw()).map(|passwd| passwd.name))
        .unwrap_or_else(|| String::from("<user>"))
}

pub fn host_name() -> String {
    rustix::system::uname()
        .nodename()
        .to_string_lossy()
        .into_owned()
}

pub fn is_writable(path: &Path) -> bool {
    rfs::access(path, Access::WRITE_OK).is_ok()
}
