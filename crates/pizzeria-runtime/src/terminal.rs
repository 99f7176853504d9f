#![forbid(unsafe_code)]

//! Terminal lifecycle and frame presentation.
//!
//! [`TerminalSession`] puts the terminal into raw mode (and optionally the
//! alternate screen) and restores it on drop, including when a panic unwinds.

use crate::frame::Buffer;
use crate::style::{Style, StyleFlags};
use crossterm::{cursor, queue, style, terminal};
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

/// RAII guard for raw mode and the alternate screen.
#[derive(Debug)]
pub struct TerminalSession {
    alternate_screen: bool,
}

impl TerminalSession {
    /// Enter raw mode, and the alternate screen when requested.
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        info!("terminal raw mode enabled");

        let mut stdout = io::stdout();
        if alternate_screen {
            crossterm::execute!(stdout, terminal::EnterAlternateScreen)?;
            info!("alternate screen enabled");
        }
        crossterm::execute!(stdout, cursor::Hide)?;

        Ok(Self { alternate_screen })
    }

    /// Current terminal size as `(width, height)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(stdout, style::ResetColor, cursor::Show);
        if self.alternate_screen {
            let _ = crossterm::execute!(stdout, terminal::LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        info!("terminal restored");
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(
        stdout,
        style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}

/// Writes frames to the terminal, sending only cells that changed.
///
/// The first frame, and any frame whose size differs from the last one,
/// clears the screen and is drawn in full.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: W,
    previous: Option<Buffer>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            previous: None,
        }
    }

    /// Forget the last frame so the next one is drawn in full.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Draw `buffer` and place the cursor.
    pub fn present(&mut self, buffer: &Buffer, cursor_at: Option<(u16, u16)>) -> io::Result<()> {
        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());
        let full = previous.is_none();

        let out = &mut self.writer;
        queue!(out, cursor::Hide)?;
        if full {
            queue!(out, terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style_now: Option<Style> = None;
        let mut cursor_now: Option<(u16, u16)> = None;
        let mut written = 0usize;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if cell.is_continuation() {
                    continue;
                }
                if let Some(prev) = &previous
                    && prev.get(x, y) == Some(cell)
                {
                    continue;
                }
                if cursor_now != Some((x, y)) {
                    queue!(out, cursor::MoveTo(x, y))?;
                }
                if style_now != Some(cell.style) {
                    apply_style(out, cell.style)?;
                    style_now = Some(cell.style);
                }
                queue!(out, style::Print(&cell.content))?;
                let advance = u16::try_from(cell.content.width()).unwrap_or(1).max(1);
                cursor_now = Some((x.saturating_add(advance), y));
                written += 1;
            }
        }

        if style_now.is_some() {
            queue!(out, style::SetAttribute(style::Attribute::Reset), style::ResetColor)?;
        }
        if let Some((x, y)) = cursor_at {
            queue!(out, cursor::MoveTo(x, y), cursor::Show)?;
        }
        out.flush()?;
        debug!(full, cells = written, "frame presented");

        self.previous = Some(buffer.clone());
        Ok(())
    }
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    queue!(out, style::SetAttribute(style::Attribute::Reset), style::ResetColor)?;
    if let Some(fg) = style.fg {
        queue!(out, style::SetForegroundColor(fg.to_crossterm()))?;
    }
    let attributes = [
        (StyleFlags::BOLD, style::Attribute::Bold),
        (StyleFlags::DIM, style::Attribute::Dim),
        (StyleFlags::ITALIC, style::Attribute::Italic),
        (StyleFlags::UNDERLINE, style::Attribute::Underlined),
        (StyleFlags::REVERSE, style::Attribute::Reverse),
    ];
    for (flag, attribute) in attributes {
        if style.has(flag) {
            queue!(out, style::SetAttribute(attribute))?;
        }
    }
    Ok(())
}
