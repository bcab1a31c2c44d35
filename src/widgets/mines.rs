//! Minesweeper
//!
//! Controls:
//! - Arrows/hjkl/WASD: move cursor
//! - Space/Enter: reveal
//! - F: flag / unflag
//! - R: new board
//! - Q/Esc: quit

use super::{direction_key, nudge, Control, WidgetState};
use crate::colors::{mine_digit_color, StatusColor};
use crate::config::MinesConfig;
use crate::sim::mines::{Board, Tile};
use crate::sim::{seeded_rng, Outcome};
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use crossterm::style::Color;
use std::io;
use std::time::Duration;
use tracing::info;

/// Terminal columns per tile
const TILE_W: i32 = 3;
/// Nothing animates, so input is the only thing to wait on
const INPUT_POLL: Duration = Duration::from_millis(250);

const HELP: &str = "\
arrows/hjkl   move cursor
Space/Enter   reveal tile
f             flag / unflag
r             new board
Shift+0-7     color scheme
q / Esc       quit";

/// Glyph and color for one tile. Mines show once the game is lost.
fn glyph(tile: &Tile, lost: bool, exploded: bool) -> (char, Option<Color>) {
    if exploded {
        return ('✸', Some(Color::Red));
    }
    if tile.flagged {
        let wrong = lost && !tile.mine;
        return (if wrong { 'x' } else { '⚑' }, Some(if wrong { Color::DarkRed } else { Color::Yellow }));
    }
    if lost && tile.mine {
        return ('*', Some(Color::Red));
    }
    if !tile.revealed {
        return ('■', Some(Color::DarkGrey));
    }
    match tile.adjacent {
        0 => ('·', Some(Color::DarkGrey)),
        n => ((b'0' + n) as char, Some(mine_digit_color(n))),
    }
}

pub fn run(config: &MinesConfig) -> io::Result<()> {
    let mut term = Terminal::new()?;
    let mut rng = seeded_rng(config.seed);
    let mut state = WidgetState::new();

    let mut board = Board::generate(config.rows, config.cols, config.mines, &mut rng);
    let (mut row, mut col) = (0usize, 0usize);
    info!(rows = board.rows(), cols = board.cols(), mines = board.mine_count(), "mines started");

    loop {
        term.refresh_size()?;

        if let Some((code, mods)) = term.poll_key(INPUT_POLL)? {
            match state.handle_key(code, mods) {
                Control::Quit => break,
                Control::Handled => {}
                Control::Pass => {
                    if let Some((dx, dy)) = direction_key(code) {
                        col = nudge(col, dx, board.cols());
                        row = nudge(row, dy, board.rows());
                    } else {
                        match code {
                            KeyCode::Char(' ') | KeyCode::Enter => {
                                let before = board.outcome();
                                let outcome = board.reveal(row, col);
                                if outcome != before {
                                    info!(?outcome, revealed = board.revealed_count(), "mines game over");
                                }
                            }
                            KeyCode::Char('f') | KeyCode::Char('F') => board.toggle_flag(row, col),
                            KeyCode::Char('r') | KeyCode::Char('R') => {
                                board.reset(&mut rng);
                                info!("mines reset");
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        render(&mut term, &board, &state, row, col);
        term.present()?;
    }

    info!("mines stopped");
    Ok(())
}

fn render(term: &mut Terminal, board: &Board, state: &WidgetState, cur_row: usize, cur_col: usize) {
    let (w, h) = term.size();
    term.clear();

    let board_w = board.cols() as i32 * TILE_W;
    let board_h = board.rows() as i32;
    let x0 = ((w as i32 - board_w) / 2).max(0);
    let y0 = ((h as i32 - board_h - 2) / 2).max(0);

    let lost = board.outcome() == Outcome::Lost;
    let cursor = state.status(StatusColor::Info);
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            let Some(tile) = board.tile(r, c) else { continue };
            let (ch, color) = glyph(tile, lost, board.exploded() == Some((r, c)));
            let x = x0 + c as i32 * TILE_W;
            let y = y0 + r as i32;
            term.set(x + 1, y, ch, color, tile.revealed);
            if (r, c) == (cur_row, cur_col) && !board.outcome().is_over() {
                term.set(x, y, '[', Some(cursor), true);
                term.set(x + 2, y, ']', Some(cursor), true);
            }
        }
    }

    let status = match board.outcome() {
        Outcome::Running => format!("mines left: {}", board.mines_remaining()),
        Outcome::Won => "cleared! r: new board".to_string(),
        Outcome::Lost => "boom! r: new board".to_string(),
    };
    let color = state.outcome_color(board.outcome());
    term.set_str_centered(y0 + board_h + 1, &status, Some(color), board.outcome().is_over());
    term.set_str(0, h as i32 - 1, " ?:help", Some(state.status(StatusColor::Muted)), false);

    state.overlay(term, "Minesweeper", HELP);
}
