use crate::{Block, Environment, Powerline, theme::slot};
use anyhow::Result;
use std::{path::Path, process::Command};

const BRANCH_IS: &str = "Your branch is ";
const AHEAD: &str = "\u{21E1}";
const BEHIND: &str = "\u{21E3}";

/// Facts scraped from `git status` text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitStatus {
    pub has_pending_changes: bool,
    pub has_untracked_files: bool,
    /// E.g. ` 3⇡`, empty when in sync or without upstream
    pub upstream_offset: String,
}

impl Default for GitStatus {
    fn default() -> Self {
        GitStatus {
            has_pending_changes: true,
            has_untracked_files: false,
            upstream_offset: String::new(),
        }
    }
}

fn ahead_or_behind(line: &str) -> Option<String> {
    let rest = &line[line.find(BRANCH_IS)? + BRANCH_IS.len()..];
    let (direction, rest) = rest.split_once(' ')?;
    let glyph = match direction {
        "ahead" => AHEAD,
        "behind" => BEHIND,
        _ => return None,
    };
    let count = rest.split_once(" by ")?.1.split_once(" commit")?.0.trim();
    Some(format!(" {count}{glyph}"))
}

/// `and have 1 and 2 different commits each, respectively.`
fn diverged(line: &str) -> Option<String> {
    let rest = line.split_once("have ")?.1;
    let words: Vec<&str> = rest.split_whitespace().take(4).collect();
    let &[ahead, "and", behind, "different"] = words.as_slice() else {
        return None;
    };
    let (ahead, behind): (u32, u32) = (ahead.parse().ok()?, behind.parse().ok()?);
    Some(format!(" {ahead}{AHEAD}{behind}{BEHIND}"))
}

impl GitStatus {
    /// Unknown lines are ignored, so unparsable output reads as dirty and without untracked files
    pub fn parse(text: &str) -> Self {
        let mut status = GitStatus::default();
        for line in text.lines() {
            if let Some(offset) = ahead_or_behind(line).or_else(|| diverged(line)) {
                status.upstream_offset += &offset;
            }
            if line.contains("nothing to commit") {
                status.has_pending_changes = false;
            }
            if line.contains("Untracked files") {
                status.has_untracked_files = true;
            }
        }
        status
    }
}

pub struct Repo {
    branch: String,
    status: GitStatus,
}

pub type MaybeRepo = Option<Repo>;

fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("LC_ALL", "C")
        .output()
        .inspect_err(|err| log::debug!("cannot run git {args:?}: {err}"))
        .ok()?;
    if !output.status.success() {
        log::debug!("git {args:?} exited with {}", output.status);
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl Repo {
    /// Ask git about `env.real_dir`; no repository or no git means no segment
    pub fn query(env: &Environment) -> MaybeRepo {
        let branches = git(&env.real_dir, &["branch", "--no-color"])?;
        let status = git(&env.real_dir, &["status", "--ignore-submodules"])?;
        Self::from_output(&branches, &status)
    }

    /// Build from the outputs of `git branch` and `git status`
    pub fn from_output(branches: &str, status: &str) -> MaybeRepo {
        let branch = branches
            .lines()
            .find_map(|line| line.strip_prefix("* "))?
            .trim()
            .to_owned();
        Some(Repo {
            branch,
            status: GitStatus::parse(status),
        })
    }
}

impl Block for MaybeRepo {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        let Some(Repo { branch, status }) = self else {
            return Ok(());
        };
        let untracked = if status.has_untracked_files { " +" } else { "" };
        let content = format!(
            " {}{}{untracked} ",
            line.shell().escape(branch),
            status.upstream_offset
        );
        let (fg, bg) = if status.has_pending_changes {
            (slot::REPO_DIRTY_FG, slot::REPO_DIRTY_BG)
        } else {
            (slot::REPO_CLEAN_FG, slot::REPO_CLEAN_BG)
        };
        line.append(content, fg, bg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IconMode, Shell, Theme};
    use rstest::rstest;

    const CLEAN: &str = "On branch main\nnothing to commit, working tree clean\n";

    #[test]
    fn ahead_offset_has_count_and_glyph() {
        let status = GitStatus::parse(
            "On branch main\nYour branch is ahead of 'origin/main' by 3 commits.\n  (use \"git push\" to publish your local commits)\n",
        );
        assert!(status.upstream_offset.contains('3'));
        assert!(status.upstream_offset.contains(AHEAD));
        assert_eq!(status.upstream_offset, " 3\u{21E1}");
    }

    #[test]
    fn behind_offset() {
        let status = GitStatus::parse("Your branch is behind 'origin/main' by 1 commit, and can be fast-forwarded.\n");
        assert_eq!(status.upstream_offset, " 1\u{21E3}");
    }

    #[test]
    fn diverged_offset() {
        let status = GitStatus::parse(
            "Your branch and 'origin/main' have diverged,\nand have 2 and 5 different commits each, respectively.\n",
        );
        assert_eq!(status.upstream_offset, " 2\u{21E1}5\u{21E3}");
    }

    #[rstest]
    #[case::up_to_date("Your branch is up to date with 'origin/main'.")]
    #[case::gone("Your branch is based on 'origin/gone', but the upstream is gone.")]
    #[case::noise("HEAD detached at 1a2b3c4")]
    fn lines_without_offset(#[case] line: &str) {
        assert_eq!(GitStatus::parse(line).upstream_offset, "");
    }

    #[test]
    fn clean_tree_clears_pending_changes() {
        assert!(!GitStatus::parse(CLEAN).has_pending_changes);
    }

    #[test]
    fn untracked_files_are_flagged() {
        let status = GitStatus::parse(
            "On branch main\nUntracked files:\n  (use \"git add <file>...\" to include)\n\tnew.rs\n\nnothing added to commit but untracked files present\n",
        );
        assert!(status.has_untracked_files);
        assert!(status.has_pending_changes);
    }

    #[test]
    fn unrecognized_output_keeps_defaults() {
        assert_eq!(GitStatus::parse("something else entirely"), GitStatus::default());
    }

    #[test]
    fn picks_current_branch() {
        let repo = Repo::from_output("  feature\n* main\n  old\n", CLEAN).unwrap();
        assert_eq!(repo.branch, "main");
        assert!(Repo::from_output("", CLEAN).is_none());
    }

    #[test]
    fn segment_content_and_colors() {
        let mut line = Powerline::new(IconMode::Patched, Shell::Bare, Theme::default());
        let repo = Repo::from_output(
            "* dev\n",
            "Your branch is ahead of 'origin/dev' by 2 commits.\nUntracked files:\n",
        );
        repo.append_to(&mut line).unwrap();
        let segment = &line.segments()[0];
        assert_eq!(segment.content, " dev 2\u{21E1} + ");
        assert_eq!(segment.background, slot::REPO_DIRTY_BG);

        let mut line = Powerline::new(IconMode::Patched, Shell::Bare, Theme::default());
        Repo::from_output("* main\n", CLEAN)
            .append_to(&mut line)
            .unwrap();
        assert_eq!(line.segments()[0].content, " main ");
        assert_eq!(line.segments()[0].foreground, slot::REPO_CLEAN_FG);
    }

    #[test]
    fn no_repository_no_segment() {
        let mut line = Powerline::new(IconMode::Patched, Shell::Bare, Theme::default());
        MaybeRepo::None.append_to(&mut line).unwrap();
        assert!(line.segments().is_empty());
    }
}
