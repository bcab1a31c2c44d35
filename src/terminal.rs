use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Double-buffered terminal canvas.
///
/// Widgets draw into the back buffer with `set`/`set_str`, then `present`
/// writes only the cells that changed since the previous frame.
pub struct Terminal {
    width: u16,
    height: u16,
    back: Vec<Cell>,
    front: Vec<Cell>,
    full_redraw: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        let cells = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            back: vec![Cell::default(); cells],
            front: vec![Cell::default(); cells],
            full_redraw: true,
        })
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Pick up a new terminal size. Returns true when it changed.
    pub fn refresh_size(&mut self) -> io::Result<bool> {
        let (w, h) = size()?;
        if (w, h) == (self.width, self.height) {
            return Ok(false);
        }
        self.resize(w, h);
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(true)
    }

    /// Reallocate buffers for a new size; the next `present` redraws everything
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let cells = width as usize * height as usize;
        self.back = vec![Cell::default(); cells];
        self.front = vec![Cell::default(); cells];
        self.full_redraw = true;
    }

    /// Clear the back buffer
    pub fn clear(&mut self) {
        self.back.fill(Cell::default());
    }

    /// Set a character at position with optional color
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = y as usize * self.width as usize + x as usize;
            self.back[idx] = Cell { ch, fg, bold };
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Centre a string on row `y`
    pub fn set_str_centered(&mut self, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        let x = (self.width as i32 - s.chars().count() as i32) / 2;
        self.set_str(x.max(0), y, s, fg, bold);
    }

    /// Flush changed cells to the screen
    pub fn present(&mut self) -> io::Result<()> {
        let mut out = stdout();
        let w = self.width as usize;

        for (idx, cell) in self.back.iter().enumerate() {
            if !self.full_redraw && self.front[idx] == *cell {
                continue;
            }
            let (x, y) = ((idx % w) as u16, (idx / w) as u16);
            queue!(out, MoveTo(x, y))?;

            if cell.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if let Some(color) = cell.fg {
                queue!(out, SetForegroundColor(color), Print(cell.ch), ResetColor)?;
            } else {
                queue!(out, Print(cell.ch))?;
            }
            if cell.bold {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
        }

        out.flush()?;
        self.front.clone_from(&self.back);
        self.full_redraw = false;
        Ok(())
    }

    /// Wait up to `timeout` for a key press. Key releases are skipped.
    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(timeout)? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(Some((key_event.code, key_event.modifiers)));
                }
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
