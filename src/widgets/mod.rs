//! Terminal front-ends
//!
//! Each widget is its own module with a `run()` function that owns the
//! terminal, one engine and one ticker. Input handlers run between ticks and
//! mutate the engine in one call, so a step never sees a half-applied edit.

pub mod boids;
pub mod life;
pub mod mines;
pub mod noise;
pub mod snake;
pub mod sort;

use crate::colors::{status_color, ColorState, StatusColor};
use crate::help::render_help_overlay;
use crate::sim::{Outcome, Ticker};
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use std::time::{Duration, Instant};

/// Longest wait for input, so resizes are noticed while paused
const IDLE_POLL: Duration = Duration::from_millis(100);

/// What the shared key handler did with a key
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    Quit,
    Handled,
    Pass,
}

/// Runtime state shared by every widget: colors and the help overlay
pub struct WidgetState {
    pub colors: ColorState,
    pub show_help: bool,
}

impl WidgetState {
    pub fn new() -> Self {
        Self {
            colors: ColorState::new(0),
            show_help: false,
        }
    }

    /// Keys every widget understands. While help is open any other key
    /// just closes it.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Control {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Control::Quit,
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                return Control::Handled;
            }
            _ => {}
        }
        if self.show_help {
            self.show_help = false;
            return Control::Handled;
        }
        if self.colors.handle_key(code) {
            return Control::Handled;
        }
        Control::Pass
    }

    /// Draw the help box on top of the frame when it is open
    pub fn overlay(&self, term: &mut Terminal, title: &str, help: &str) {
        if self.show_help {
            render_help_overlay(term, title, help);
        }
    }

    pub fn status(&self, status: StatusColor) -> Color {
        status_color(self.colors.scheme, status)
    }

    /// Banner color for a finished or running game
    pub fn outcome_color(&self, outcome: Outcome) -> Color {
        match outcome {
            Outcome::Won => self.status(StatusColor::Good),
            Outcome::Lost => self.status(StatusColor::Critical),
            Outcome::Running => self.status(StatusColor::Info),
        }
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new()
    }
}

/// How long to block on input before the next tick is due
pub fn input_timeout(ticker: &Ticker, now: Instant) -> Duration {
    ticker.until_next(now).map_or(IDLE_POLL, |d| d.min(IDLE_POLL))
}

/// Pause a running ticker or start a stopped one. Returns true when it
/// is running afterwards.
pub fn toggle_running(ticker: &mut Ticker, now: Instant) -> bool {
    if ticker.is_running() {
        ticker.stop();
    } else {
        ticker.start(now);
    }
    ticker.is_running()
}

/// Arrow keys, vi keys and WASD as a unit step `(dx, dy)`
pub fn direction_key(code: KeyCode) -> Option<(i32, i32)> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some((0, -1)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some((0, 1)),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some((-1, 0)),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some((1, 0)),
        _ => None,
    }
}

/// Move a cursor one step, clamped to `[0, max)`
pub fn nudge(pos: usize, delta: i32, max: usize) -> usize {
    let next = pos as i64 + delta as i64;
    next.clamp(0, max.saturating_sub(1) as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_swallows_next_key() {
        let mut state = WidgetState::new();
        assert_eq!(state.handle_key(KeyCode::Char('?'), KeyModifiers::NONE), Control::Handled);
        assert!(state.show_help);
        assert_eq!(state.handle_key(KeyCode::Char('x'), KeyModifiers::NONE), Control::Handled);
        assert!(!state.show_help);
        assert_eq!(state.handle_key(KeyCode::Char('x'), KeyModifiers::NONE), Control::Pass);
        assert_eq!(state.handle_key(KeyCode::Esc, KeyModifiers::NONE), Control::Quit);
    }

    #[test]
    fn cursor_nudge_clamps() {
        assert_eq!(nudge(0, -1, 5), 0);
        assert_eq!(nudge(4, 1, 5), 4);
        assert_eq!(nudge(2, 1, 5), 3);
        assert_eq!(nudge(0, 1, 0), 0);
    }

    #[test]
    fn toggle_flips_the_ticker() {
        let mut ticker = Ticker::new(Duration::from_millis(10));
        let now = Instant::now();
        assert!(toggle_running(&mut ticker, now));
        assert!(!toggle_running(&mut ticker, now));
        assert!(!ticker.is_running());
    }

    #[test]
    fn stopped_ticker_idles() {
        let ticker = Ticker::new(Duration::from_secs(5));
        assert_eq!(input_timeout(&ticker, Instant::now()), IDLE_POLL);
    }
}
