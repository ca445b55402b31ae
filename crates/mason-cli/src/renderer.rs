//! Terminal rendering module for rich markdown output
//!
//! Plans, tick reports and listings are formatted as markdown by the core
//! crate; this renders them with termimad, or prints them untouched when
//! `--no-color` is given.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_fg(Color::Cyan);
        skin.inline_code.set_bg(Color::AnsiValue(236));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to standard output. Header lines keep their
    /// hash marks.
    pub fn render(&self, markdown: &str) -> Result<()> {
        self.render_on(&mut io::stdout().lock(), markdown)
    }

    /// Render markdown text to standard error, leaving standard output to
    /// the page actions.
    pub fn render_to_stderr(&self, markdown: &str) -> Result<()> {
        self.render_on(&mut io::stderr().lock(), markdown)
    }

    fn render_on<W: Write>(&self, out: &mut W, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            write!(out, "{markdown}")?;
            return Ok(out.flush()?);
        }
        for line in markdown.lines() {
            if line.starts_with('#') {
                writeln!(out, "\x1b[34m{line}\x1b[0m")?;
            } else {
                writeln!(out, "{}", self.skin.inline(line))?;
            }
        }
        Ok(out.flush()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_disables_rich_output() {
        assert!(!TerminalRenderer::new(false).rich_enabled);
        assert!(TerminalRenderer::new(true).rich_enabled);
    }

    #[test]
    fn test_plain_render_succeeds() {
        let renderer = TerminalRenderer::new(false);
        assert!(renderer.render("# Plan for default\n\n- Not saved yet\n").is_ok());
    }

    #[test]
    fn test_plain_render_is_verbatim() {
        let markdown = "# Tick at 12:00\n\n**wood_pit** to level 5\n";
        let mut out = Vec::new();
        TerminalRenderer::new(false)
            .render_on(&mut out, markdown)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), markdown);
    }

    #[test]
    fn test_rich_render_colors_headers() {
        let mut out = Vec::new();
        TerminalRenderer::new(true)
            .render_on(&mut out, "# Buildings\nplain line\n")
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[34m# Buildings\x1b[0m\n"));
        assert!(text.contains("plain line"));
    }
}
