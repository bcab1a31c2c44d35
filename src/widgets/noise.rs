//! Seeded noise canvas
//!
//! Every seed paints its own fixed picture. Step through neighbouring seeds,
//! jump to a random one, or type a base-36 seed to come back to a favourite.

use super::{Control, WidgetState};
use crate::colors::StatusColor;
use crate::config::NoiseConfig;
use crate::sim::noise::{format_seed, parse_seed, Canvas};
use crate::sim::seeded_rng;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use rand::Rng;
use std::io;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

const INPUT_POLL: Duration = Duration::from_millis(250);
/// Longest base-36 u32
const MAX_SEED_LEN: usize = 7;

const HELP: &str = "\
< / >, arrows   previous / next seed
r               random seed
/               type a seed, Enter to paint
q / Esc         quit";

/// Seed from the wall clock, folded into 32 bits
fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_millis() as u32) ^ (now.as_secs() as u32)
}

/// Seed being typed; `None` while browsing
#[derive(Default)]
struct SeedEntry {
    text: Option<String>,
}

impl SeedEntry {
    /// Returns `Some(seed)` when Enter accepts a valid entry
    fn handle_key(&mut self, code: KeyCode) -> Option<u32> {
        let text = self.text.as_mut()?;
        match code {
            KeyCode::Enter => {
                let seed = parse_seed(text);
                if seed.is_some() {
                    self.text = None;
                }
                seed
            }
            KeyCode::Esc => {
                self.text = None;
                None
            }
            KeyCode::Backspace => {
                text.pop();
                None
            }
            KeyCode::Char(c) if c.is_ascii_alphanumeric() && text.len() < MAX_SEED_LEN => {
                text.push(c.to_ascii_lowercase());
                None
            }
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        self.text.is_some()
    }
}

pub fn run(config: &NoiseConfig) -> io::Result<()> {
    let mut term = Terminal::new()?;
    let mut rng = seeded_rng(None);
    let mut state = WidgetState::new();
    let mut entry = SeedEntry::default();

    let (w, h) = term.size();
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut canvas = Canvas::paint(seed, w as usize, h.saturating_sub(1) as usize);
    info!(seed = %format_seed(seed), "noise started");

    loop {
        if term.refresh_size()? {
            let (w, h) = term.size();
            canvas = Canvas::paint(canvas.seed(), w as usize, h.saturating_sub(1) as usize);
        }

        if let Some((code, mods)) = term.poll_key(INPUT_POLL)? {
            if entry.is_active() {
                if code == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
                    break;
                }
                if let Some(seed) = entry.handle_key(code) {
                    canvas = Canvas::paint(seed, canvas.width(), canvas.height());
                    debug!(seed = %format_seed(seed), "noise seed typed");
                }
            } else {
                match state.handle_key(code, mods) {
                    Control::Quit => break,
                    Control::Handled => {}
                    Control::Pass => match code {
                        KeyCode::Left | KeyCode::Char('<') | KeyCode::Char(',') => canvas = canvas.shifted(-1),
                        KeyCode::Right | KeyCode::Char('>') | KeyCode::Char('.') => canvas = canvas.shifted(1),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            let seed = clock_seed() ^ rng.gen::<u32>();
                            canvas = Canvas::paint(seed, canvas.width(), canvas.height());
                        }
                        KeyCode::Char('/') => entry.text = Some(String::new()),
                        _ => {}
                    },
                }
            }
        }

        render(&mut term, &canvas, &state, &entry);
        term.present()?;
    }

    info!(seed = %format_seed(canvas.seed()), "noise stopped");
    Ok(())
}

fn render(term: &mut Terminal, canvas: &Canvas, state: &WidgetState, entry: &SeedEntry) {
    let (_, h) = term.size();
    term.clear();

    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if let Some([r, g, b]) = canvas.pixel(x, y) {
                term.set(x as i32, y as i32, '█', Some(Color::Rgb { r, g, b }), false);
            }
        }
    }

    let status = match &entry.text {
        Some(text) => format!(" seed: {}_  Enter: paint  Esc: cancel ", text),
        None => format!(" seed: {}  </>: step  r: random  /: type  ?:help ", format_seed(canvas.seed())),
    };
    let color = if entry.is_active() { StatusColor::Good } else { StatusColor::Info };
    term.set_str(0, h as i32 - 1, &status, Some(state.status(color)), false);

    state.overlay(term, "Canvas of Babble", HELP);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(entry: &mut SeedEntry, s: &str) {
        for c in s.chars() {
            assert_eq!(entry.handle_key(KeyCode::Char(c)), None);
        }
    }

    #[test]
    fn typed_seed_is_accepted_on_enter() {
        let mut entry = SeedEntry {
            text: Some(String::new()),
        };
        typed(&mut entry, "ZIK0");
        entry.handle_key(KeyCode::Backspace);
        typed(&mut entry, "0zj");
        assert_eq!(entry.handle_key(KeyCode::Enter), Some(2_147_483_647));
        assert!(!entry.is_active());
    }

    #[test]
    fn empty_entry_stays_open() {
        let mut entry = SeedEntry {
            text: Some(String::new()),
        };
        assert_eq!(entry.handle_key(KeyCode::Enter), None);
        assert!(entry.is_active());
        entry.handle_key(KeyCode::Esc);
        assert!(!entry.is_active());
    }

    #[test]
    fn entry_ignores_keys_while_browsing() {
        let mut entry = SeedEntry::default();
        assert_eq!(entry.handle_key(KeyCode::Char('a')), None);
        assert!(!entry.is_active());
    }

    #[test]
    fn entry_is_capped() {
        let mut entry = SeedEntry {
            text: Some(String::new()),
        };
        typed(&mut entry, "123456789");
        assert_eq!(entry.text.as_deref(), Some("1234567"));
    }
}
