use crate::{
    Block, Environment, Powerline,
    file::{self, HOME},
    theme::{HOME_SPECIAL_DISPLAY, slot},
};
use anyhow::Result;

/// Working directory breadcrumbs, one segment per component
pub struct Workdir {
    names: Vec<String>,
    cwd_only: bool,
}

impl Workdir {
    pub fn new(env: &Environment) -> Result<Self> {
        let names = file::short_path(&env.work_dir, &env.home)?;
        Ok(Self::from_names(names, env.cwd_max_depth, env.cwd_only))
    }

    pub fn from_names(names: Vec<String>, max_depth: usize, cwd_only: bool) -> Self {
        Workdir {
            names: file::truncate(names, max_depth),
            cwd_only,
        }
    }
}

impl Block for Workdir {
    fn append_to(&self, line: &mut Powerline) -> Result<()> {
        let home_special = line.theme().flag(HOME_SPECIAL_DISPLAY)?;
        let Some((last, parents)) = self.names.split_last() else {
            return Ok(());
        };

        if !self.cwd_only {
            for name in parents {
                let content = format!(" {} ", line.shell().escape(name));
                if name == HOME && home_special {
                    line.append(content, slot::HOME_FG, slot::HOME_BG);
                } else {
                    let thin = line.separator_thin();
                    line.append_with(
                        content,
                        slot::PATH_FG,
                        slot::PATH_BG,
                        Some(thin),
                        Some(slot::SEPARATOR_FG),
                    );
                }
            }
        }

        let content = format!(" {} ", line.shell().escape(last));
        if last == HOME && home_special {
            line.append(content, slot::HOME_FG, slot::HOME_BG);
        } else {
            line.append(content, slot::CWD_FG, slot::PATH_BG);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        IconMode, Shell, Theme,
        file::ELLIPSIS,
        theme::ThemeValue::Flag,
    };

    fn powerline(home_special: bool) -> Powerline {
        Powerline::new(
            IconMode::Compatible,
            Shell::Bare,
            Theme::from_pairs([(HOME_SPECIAL_DISPLAY, Flag(home_special))]),
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parents_use_thin_separator_and_last_uses_thick() {
        let mut line = powerline(false);
        Workdir::from_names(names(&["~", "proj", "src"]), 5, false)
            .append_to(&mut line)
            .unwrap();

        let segments = line.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].content, " ~ ");
        assert_eq!(segments[0].separator, "\u{276F}");
        assert_eq!(segments[0].separator_foreground, slot::SEPARATOR_FG);
        assert_eq!(segments[1].background, slot::PATH_BG);
        assert_eq!(segments[2].content, " src ");
        assert_eq!(segments[2].separator, "\u{25B6}");
        assert_eq!(segments[2].foreground, slot::CWD_FG);
        assert_eq!(segments[2].separator_foreground, slot::PATH_BG);
    }

    #[test]
    fn home_gets_its_own_colors_when_enabled() {
        let mut line = powerline(true);
        Workdir::from_names(names(&["~", "proj"]), 5, false)
            .append_to(&mut line)
            .unwrap();
        assert_eq!(line.segments()[0].background, slot::HOME_BG);
        assert_eq!(line.segments()[0].separator, "\u{25B6}");

        let mut line = powerline(true);
        Workdir::from_names(names(&["~"]), 5, false)
            .append_to(&mut line)
            .unwrap();
        assert_eq!(line.segments()[0].foreground, slot::HOME_FG);
    }

    #[test]
    fn cwd_only_draws_last_component() {
        let mut line = powerline(false);
        Workdir::from_names(names(&["var", "log", "nginx"]), 5, true)
            .append_to(&mut line)
            .unwrap();
        assert_eq!(line.segments().len(), 1);
        assert_eq!(line.segments()[0].content, " nginx ");
    }

    #[test]
    fn deep_paths_are_elided() {
        let mut line = powerline(false);
        Workdir::from_names(names(&["a", "b", "c", "d", "e", "f", "g"]), 5, false)
            .append_to(&mut line)
            .unwrap();
        let contents: Vec<_> = line.segments().iter().map(|s| s.content.trim()).collect();
        assert_eq!(contents, ["a", "b", ELLIPSIS, "f", "g"]);
    }

    #[test]
    fn components_are_escaped_for_the_shell() {
        let mut line = Powerline::new(IconMode::Patched, Shell::Bash, Theme::default());
        Workdir::from_names(names(&["tmp", "$(boom)"]), 5, false)
            .append_to(&mut line)
            .unwrap();
        assert_eq!(line.segments()[1].content, r" \\$(boom) ");
    }
}
