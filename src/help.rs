use crate::terminal::Terminal;
use crossterm::style::Color;

/// Draw a centered, boxed help panel into the back buffer.
/// Lines wider than the terminal are clipped by `Terminal::set`.
pub fn render_help_overlay(term: &mut Terminal, title: &str, help_text: &str) {
    if help_text.is_empty() {
        return;
    }
    let (width, height) = term.size();

    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count() + 2))
        .max()
        .unwrap_or(0);
    let box_width = max_width + 4; // border + 1 space padding each side
    let box_height = lines.len() + 2;

    let x0 = (width as usize).saturating_sub(box_width) as i32 / 2;
    let y0 = (height as usize).saturating_sub(box_height) as i32 / 2;
    let x1 = x0 + box_width as i32 - 1;
    let y1 = y0 + box_height as i32 - 1;

    let border = Some(Color::White);
    let text = Some(Color::Grey);

    for x in x0 + 1..x1 {
        term.set(x, y0, '─', border, false);
        term.set(x, y1, '─', border, false);
    }
    term.set(x0, y0, '┌', border, false);
    term.set(x1, y0, '┐', border, false);
    term.set(x0, y1, '└', border, false);
    term.set(x1, y1, '┘', border, false);

    if !title.is_empty() {
        term.set_str(x0 + 2, y0, &format!(" {} ", title), border, true);
    }

    for (i, line) in lines.iter().enumerate() {
        let y = y0 + 1 + i as i32;
        term.set(x0, y, '│', border, false);
        for x in x0 + 1..x1 {
            term.set(x, y, ' ', None, false);
        }
        term.set_str(x0 + 2, y, line, text, false);
        term.set(x1, y, '│', border, false);
    }
}
