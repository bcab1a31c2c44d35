//! Bubble sort visualiser
//!
//! Controls:
//! - Space: sort / pause
//! - S: shuffle
//! - +/-: faster / slower
//! - Q/Esc: quit

use super::{input_timeout, toggle_running, Control, WidgetState};
use crate::colors::StatusColor;
use crate::config::SortConfig;
use crate::sim::sort::BubbleSort;
use crate::sim::{seeded_rng, Ticker};
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use std::io;
use std::time::Instant;
use tracing::{debug, info};

const MAX_SWAPS_PER_TICK: u32 = 64;

const HELP: &str = "\
Space     sort / pause
s         shuffle
+ / -     faster / slower
Shift+0-7 color scheme
q / Esc   quit";

/// One bar per column, never more than fit
fn bar_count(config: &SortConfig, term_w: u16) -> usize {
    config.bars.min(term_w as usize).max(1)
}

/// Height in rows of bar `value` out of `count`, on a `rows`-high chart
fn bar_height(value: usize, count: usize, rows: usize) -> usize {
    (value + 1) * rows / count.max(1)
}

pub fn run(config: &SortConfig) -> io::Result<()> {
    let mut term = Terminal::new()?;
    let mut rng = seeded_rng(config.seed);
    let mut state = WidgetState::new();

    let (w, _) = term.size();
    let mut sort = BubbleSort::new(bar_count(config, w));
    sort.shuffle(&mut rng);
    let mut ticker = Ticker::new(config.tick);
    let mut per_tick = config.swaps_per_tick.clamp(1, MAX_SWAPS_PER_TICK);
    info!(bars = sort.bars().len(), "sort started");

    loop {
        if term.refresh_size()? {
            let (w, _) = term.size();
            let count = bar_count(config, w);
            if count != sort.bars().len() {
                sort = BubbleSort::new(count);
                sort.shuffle(&mut rng);
                ticker.stop();
                debug!(bars = count, "sort resized");
            }
        }

        let now = Instant::now();
        if let Some((code, mods)) = term.poll_key(input_timeout(&ticker, now))? {
            match state.handle_key(code, mods) {
                Control::Quit => break,
                Control::Handled => {}
                Control::Pass => match code {
                    KeyCode::Char(' ') if !sort.is_sorted() => {
                        toggle_running(&mut ticker, Instant::now());
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') => {
                        sort.shuffle(&mut rng);
                        ticker.stop();
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => per_tick = (per_tick * 2).min(MAX_SWAPS_PER_TICK),
                    KeyCode::Char('-') | KeyCode::Char('_') => per_tick = (per_tick / 2).max(1),
                    _ => {}
                },
            }
        }

        if ticker.poll(Instant::now()) {
            for _ in 0..per_tick {
                if !sort.step() {
                    break;
                }
            }
            if sort.is_sorted() {
                ticker.stop();
                info!(comparisons = sort.comparisons(), swaps = sort.swaps(), "sort finished");
            }
        }

        render(&mut term, &sort, &state, ticker.is_running(), per_tick);
        term.present()?;
    }

    info!("sort stopped");
    Ok(())
}

fn render(term: &mut Terminal, sort: &BubbleSort, state: &WidgetState, running: bool, per_tick: u32) {
    let (_, h) = term.size();
    term.clear();

    let rows = (h as usize).saturating_sub(2);
    let count = sort.bars().len();
    let swapped = sort.last_swap();
    for (x, &value) in sort.bars().iter().enumerate() {
        let height = bar_height(value, count, rows);
        let hot = swapped.is_some_and(|i| x == i || x == i + 1);
        let (color, bold) = if hot {
            (state.status(StatusColor::Critical), true)
        } else {
            state.colors.color(1 + (value * 3 / count.max(1)) as u8)
        };
        for dy in 0..height {
            term.set(x as i32, (rows - dy) as i32, '█', Some(color), bold);
        }
    }

    let status = format!(
        " bubble sort  comparisons:{}  swaps:{}  speed:x{}  {}  ?:help ",
        sort.comparisons(),
        sort.swaps(),
        per_tick,
        if sort.is_sorted() {
            "sorted, s: shuffle"
        } else if running {
            "sorting"
        } else {
            "Space: sort"
        },
    );
    let color = if sort.is_sorted() { StatusColor::Good } else { StatusColor::Info };
    term.set_str(0, h as i32 - 1, &status, Some(state.status(color)), false);

    state.overlay(term, "Sorting", HELP);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallest_bar_fills_the_chart() {
        assert_eq!(bar_height(104, 105, 40), 40);
        assert_eq!(bar_height(0, 105, 40), 0);
        assert_eq!(bar_height(0, 1, 10), 10);
    }

    #[test]
    fn bars_fit_the_terminal() {
        let config = SortConfig::default();
        assert_eq!(bar_count(&config, 80), 80);
        assert_eq!(bar_count(&config, 200), 105);
        assert_eq!(bar_count(&config, 0), 1);
    }
}
