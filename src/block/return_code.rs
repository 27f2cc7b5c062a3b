use crate::{Block, Environment, Powerline, theme::slot};
use anyhow::Result;

/// Prompt character colored by the previous command's exit status
#[derive(Debug, PartialEq, Eq)]
pub enum ReturnCode {
    Passed,
    Failed,
}

impl ReturnCode {
    pub fn new(prev_error: i32) -> Self {
        if prev_error == 0 {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

impl From<&Environment> for ReturnCode {
    fn from(env: &Environment) -> Self {
        Self::new(env.prev_error)
    }
}

impl Block for ReturnCode {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        let (fg, bg) = match self {
            Self::Passed => (slot::CMD_PASSED_FG, slot::CMD_PASSED_BG),
            Self::Failed => (slot::CMD_FAILED_FG, slot::CMD_FAILED_BG),
        };
        let indicator = line.shell().root_indicator();
        line.append(indicator, fg, bg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IconMode, Shell, Theme};
    use rstest::rstest;

    fn appended(code: i32, shell: Shell) -> crate::Segment {
        let mut line = Powerline::new(IconMode::Patched, shell, Theme::default());
        ReturnCode::new(code).append_to(&mut line).unwrap();
        line.segments()[0].clone()
    }

    #[test]
    fn zero_selects_passed_pair() {
        let segment = appended(0, Shell::Bash);
        assert_eq!(segment.foreground, slot::CMD_PASSED_FG);
        assert_eq!(segment.background, slot::CMD_PASSED_BG);
        assert_eq!(segment.content, " \\$ ");
    }

    #[rstest]
    fn nonzero_selects_failed_pair(#[values(1, -1, 2, 127, 130, 255, i32::MIN, i32::MAX)] code: i32) {
        let segment = appended(code, Shell::Bare);
        assert_eq!(segment.foreground, slot::CMD_FAILED_FG);
        assert_eq!(segment.background, slot::CMD_FAILED_BG);
    }

    #[rstest]
    #[case::bash(Shell::Bash, " \\$ ")]
    #[case::zsh(Shell::Zsh, " %# ")]
    #[case::bare(Shell::Bare, " $ ")]
    fn indicator_follows_shell(#[case] shell: Shell, #[case] content: &str) {
        assert_eq!(appended(0, shell).content, content);
    }
}
