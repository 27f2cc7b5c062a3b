//! Segment list and the chevron renderer

use crate::{
    IconMode, Shell,
    style::Layer,
    theme::{ColorRef, Theme},
};
use anyhow::Result;

/// One colored block of the prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub content: String,
    pub foreground: ColorRef,
    pub background: ColorRef,
    pub separator: &'static str,
    pub separator_foreground: ColorRef,
}

/// Ordered, append-only list of segments bound to one glyph set, shell and theme
pub struct Powerline {
    mode: IconMode,
    shell: Shell,
    theme: Theme,
    segments: Vec<Segment>,
}

impl Powerline {
    pub fn new(mode: IconMode, shell: Shell, theme: Theme) -> Self {
        Self {
            mode,
            shell,
            theme,
            segments: Vec::new(),
        }
    }

    pub fn shell(&self) -> Shell {
        self.shell
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn lock(&self) -> &'static str {
        self.mode.symbols().lock
    }

    pub fn network(&self) -> &'static str {
        self.mode.symbols().network
    }

    pub fn separator(&self) -> &'static str {
        self.mode.symbols().separator
    }

    pub fn separator_thin(&self) -> &'static str {
        self.mode.symbols().separator_thin
    }

    /// Append a segment with the thick separator colored like its own background
    pub fn append(&mut self, content: impl Into<String>, foreground: ColorRef, background: ColorRef) {
        self.append_with(content, foreground, background, None, None);
    }

    /// Append a segment; `None` picks the default separator glyph or color.
    ///
    /// `Some("")` is a real blank glyph and is kept as is.
    pub fn append_with(
        &mut self,
        content: impl Into<String>,
        foreground: ColorRef,
        background: ColorRef,
        separator: Option<&'static str>,
        separator_foreground: Option<ColorRef>,
    ) {
        self.segments.push(Segment {
            content: content.into(),
            foreground,
            background,
            separator: separator.unwrap_or(self.separator()),
            separator_foreground: separator_foreground.unwrap_or(background),
        });
    }

    fn color(&self, layer: Layer, color: ColorRef) -> Result<String> {
        Ok(self.shell.color(layer, self.theme.resolve(color)?))
    }

    /// Escape-coded prompt line.
    ///
    /// Each separator is drawn over the background of the block after it, the last one over the
    /// terminal default.
    pub fn render(&self) -> Result<String> {
        let reset = self.shell.reset();
        let mut out = String::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            out += &self.color(Layer::Foreground, segment.foreground)?;
            out += &self.color(Layer::Background, segment.background)?;
            out += &segment.content;
            match self.segments.get(idx + 1) {
                Some(next) => out += &self.color(Layer::Background, next.background)?,
                None => out += &reset,
            }
            out += &self.color(Layer::Foreground, segment.separator_foreground)?;
            out += segment.separator;
        }
        out += &reset;
        Ok(out)
    }
}
