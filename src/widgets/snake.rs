//! Snake
//!
//! Press Space to start. The snake moves one cell per tick; eat food to grow.
//! Hitting a wall or yourself ends the game, filling the board wins it.

use super::{direction_key, input_timeout, toggle_running, Control, WidgetState};
use crate::colors::StatusColor;
use crate::config::SnakeConfig;
use crate::sim::snake::{Cell, Direction, Snake};
use crate::sim::{seeded_rng, Bounds, Outcome, Ticker};
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use std::io;
use std::time::Instant;
use tracing::info;

/// Terminal columns per board cell
const CELL_W: i32 = 2;
/// Length the snake starts with; score counts growth beyond it
const START_LEN: usize = 3;

const HELP: &str = "\
Space         start / pause (restart when over)
arrows/hjkl   steer
wasd          steer
Shift+0-7     color scheme
q / Esc       quit";

fn direction(delta: (i32, i32)) -> Option<Direction> {
    match delta {
        (0, -1) => Some(Direction::Up),
        (0, 1) => Some(Direction::Down),
        (-1, 0) => Some(Direction::Left),
        (1, 0) => Some(Direction::Right),
        _ => None,
    }
}

pub fn run(config: &SnakeConfig) -> io::Result<()> {
    let mut term = Terminal::new()?;
    let mut rng = seeded_rng(config.seed);
    let mut state = WidgetState::new();

    let mut snake = Snake::new(Bounds::new(config.width, config.height), &mut rng);
    let mut ticker = Ticker::new(config.tick);
    info!(width = snake.bounds().width, height = snake.bounds().height, tick_ms = config.tick.as_millis() as u64, "snake started");

    loop {
        term.refresh_size()?;

        let now = Instant::now();
        if let Some((code, mods)) = term.poll_key(input_timeout(&ticker, now))? {
            match state.handle_key(code, mods) {
                Control::Quit => break,
                Control::Handled => {}
                Control::Pass => {
                    if code == KeyCode::Char(' ') {
                        if snake.outcome().is_over() {
                            snake.reset(&mut rng);
                            ticker.start(Instant::now());
                            info!("snake restarted");
                        } else {
                            toggle_running(&mut ticker, Instant::now());
                        }
                    } else if let Some(dir) = direction_key(code).and_then(direction) {
                        if ticker.is_running() {
                            snake.set_direction(dir);
                        }
                    }
                }
            }
        }

        if ticker.poll(Instant::now()) {
            let outcome = snake.step(&mut rng);
            if outcome.is_over() {
                ticker.stop();
                info!(?outcome, length = snake.len(), "snake game over");
            }
        }

        render(&mut term, &snake, &state, ticker.is_running());
        term.present()?;
    }

    info!(length = snake.len(), "snake stopped");
    Ok(())
}

fn render(term: &mut Terminal, snake: &Snake, state: &WidgetState, running: bool) {
    let (w, h) = term.size();
    term.clear();

    let bounds = snake.bounds();
    let inner_w = bounds.width as i32 * CELL_W;
    let inner_h = bounds.height as i32;
    let x0 = ((w as i32 - inner_w - 2) / 2).max(0);
    let y0 = ((h as i32 - inner_h - 3) / 2).max(0);

    let (border, _) = state.colors.color(0);
    for x in 1..=inner_w {
        term.set(x0 + x, y0, '─', Some(border), false);
        term.set(x0 + x, y0 + inner_h + 1, '─', Some(border), false);
    }
    for y in 1..=inner_h {
        term.set(x0, y0 + y, '│', Some(border), false);
        term.set(x0 + inner_w + 1, y0 + y, '│', Some(border), false);
    }
    term.set(x0, y0, '┌', Some(border), false);
    term.set(x0 + inner_w + 1, y0, '┐', Some(border), false);
    term.set(x0, y0 + inner_h + 1, '└', Some(border), false);
    term.set(x0 + inner_w + 1, y0 + inner_h + 1, '┘', Some(border), false);

    let at = |c: Cell| (x0 + 1 + c.x * CELL_W, y0 + 1 + c.y);

    if let Some(food) = snake.food() {
        let (x, y) = at(food);
        term.set_str(x, y, "()", Some(state.status(StatusColor::Critical)), true);
    }
    let (body, _) = state.colors.color(1);
    let (head, _) = state.colors.color(3);
    let len = snake.body().len();
    for (i, &cell) in snake.body().iter().enumerate() {
        let (x, y) = at(cell);
        if i + 1 == len {
            term.set_str(x, y, "██", Some(head), true);
        } else {
            term.set_str(x, y, "▓▓", Some(body), false);
        }
    }

    let score = snake.len().saturating_sub(START_LEN);
    let status = match snake.outcome() {
        Outcome::Won => format!("board filled! score {score}  Space: again"),
        Outcome::Lost => format!("crashed, score {score}  Space: again"),
        Outcome::Running if running => format!("score {score}"),
        Outcome::Running => format!("score {score}  Space: go"),
    };
    term.set_str_centered(y0 + inner_h + 2, &status, Some(state.outcome_color(snake.outcome())), snake.outcome().is_over());

    state.overlay(term, "Snake", HELP);
}
