//! Conway's Game of Life, editable
//!
//! The board starts paused and empty. Move the cursor and toggle cells, then
//! press `p` to run it. Edits are only accepted while paused.

use super::{direction_key, input_timeout, nudge, Control, WidgetState};
use crate::colors::StatusColor;
use crate::config::LifeConfig;
use crate::sim::life::{Life, MAX_SPEED};
use crate::sim::{seeded_rng, Ticker};
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use std::io;
use std::time::Instant;
use tracing::{debug, info};

/// Terminal columns per cell, so cells come out roughly square
const CELL_W: usize = 2;

const HELP: &str = "\
arrows/hjkl   move cursor
Space/Enter   toggle cell (paused)
p             play / pause
n             single step (paused)
c             clear
r             random soup (paused)
1-9, 0        speed 1-10
Shift+0-7     color scheme
q / Esc       quit";

/// Grid size that fits the terminal, one row kept for the status line
fn fit(term_w: u16, term_h: u16, config: &LifeConfig) -> (usize, usize) {
    let w = config.width.unwrap_or(term_w as usize / CELL_W).max(1);
    let h = config.height.unwrap_or(term_h.saturating_sub(1) as usize).max(1);
    (w, h)
}

/// Digit keys: 1-9 map to themselves, 0 means the top speed
fn speed_key(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Char('0') => Some(MAX_SPEED),
        KeyCode::Char(c) => c.to_digit(10).filter(|d| *d > 0),
        _ => None,
    }
}

pub fn run(config: &LifeConfig) -> io::Result<()> {
    let mut term = Terminal::new()?;
    let mut rng = seeded_rng(config.seed);
    let mut state = WidgetState::new();

    let (tw, th) = term.size();
    let (w, h) = fit(tw, th, config);
    let mut life = Life::new(w, h, config.speed);
    let mut ticker = Ticker::new(life.period());
    let (mut cur_x, mut cur_y) = (w / 2, h / 2);
    info!(width = w, height = h, speed = life.speed(), "life started");

    loop {
        if term.refresh_size()? && (config.width.is_none() || config.height.is_none()) {
            let (tw, th) = term.size();
            let (w, h) = fit(tw, th, config);
            life.resize(w, h);
            cur_x = cur_x.min(w - 1);
            cur_y = cur_y.min(h - 1);
            debug!(width = w, height = h, "life grid resized");
        }

        let now = Instant::now();
        if let Some((code, mods)) = term.poll_key(input_timeout(&ticker, now))? {
            match state.handle_key(code, mods) {
                Control::Quit => break,
                Control::Handled => {}
                Control::Pass => {
                    let grid = life.grid();
                    if let Some((dx, dy)) = direction_key(code) {
                        cur_x = nudge(cur_x, dx, grid.width());
                        cur_y = nudge(cur_y, dy, grid.height());
                    } else if let Some(speed) = speed_key(code) {
                        life.set_speed(speed);
                        ticker.set_period(life.period(), Instant::now());
                    } else {
                        match code {
                            KeyCode::Char(' ') | KeyCode::Enter => life.toggle_cell(cur_y, cur_x),
                            KeyCode::Char('p') | KeyCode::Char('P') => {
                                life.set_paused(!life.is_paused());
                                info!(paused = life.is_paused(), generation = life.generation(), "life play state");
                            }
                            KeyCode::Char('n') if life.is_paused() => life.step(),
                            KeyCode::Char('c') | KeyCode::Char('C') => life.clear(),
                            KeyCode::Char('r') | KeyCode::Char('R') => life.randomize(&mut rng, config.density),
                            _ => {}
                        }
                    }
                }
            }
        }

        // The ticker only runs while the game does
        match (life.is_paused(), ticker.is_running()) {
            (false, false) => ticker.start(Instant::now()),
            (true, true) => ticker.stop(),
            _ => {}
        }
        if ticker.poll(Instant::now()) {
            life.step();
        }

        render(&mut term, &life, &state, cur_x, cur_y);
        term.present()?;
    }

    info!(generation = life.generation(), "life stopped");
    Ok(())
}

fn render(term: &mut Terminal, life: &Life, state: &WidgetState, cur_x: usize, cur_y: usize) {
    let (_, th) = term.size();
    let grid = life.grid();
    term.clear();

    let (live, bold) = state.colors.color(2);
    let (dead, _) = state.colors.color(0);
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let x = (col * CELL_W) as i32;
            let y = row as i32;
            if grid.get(row, col) {
                term.set_str(x, y, "██", Some(live), bold);
            } else if life.is_paused() {
                term.set(x, y, '·', Some(dead), false);
            }
        }
    }

    if life.is_paused() {
        let ch = if grid.get(cur_y, cur_x) { '▓' } else { '░' };
        let cursor = state.status(StatusColor::Info);
        let x = (cur_x * CELL_W) as i32;
        term.set(x, cur_y as i32, ch, Some(cursor), true);
        term.set(x + 1, cur_y as i32, ch, Some(cursor), true);
    }

    let status = format!(
        " gen:{}  alive:{}  speed:{}  {}  ?:help ",
        life.generation(),
        grid.live_count(),
        life.speed(),
        if life.is_paused() { "PAUSED" } else { "running" },
    );
    let color = if life.is_paused() { StatusColor::Muted } else { StatusColor::Info };
    term.set_str(0, th as i32 - 1, &status, Some(state.status(color)), false);

    state.overlay(term, "Life", HELP);
}
