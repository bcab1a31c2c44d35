//! Boids flocking widget
//!
//! The flock is spawned frozen; Space sets it flying.
//!
//! Controls:
//! - Space: fly/pause
//! - +/-: more/fewer boids
//! - s/S, a/A, c/C: separation, alignment, cohesion weight down/up
//! - t/T: turn limit down/up
//! - v: toggle per-boid trait variance
//! - R: new flock
//! - Q/Esc: quit

use super::{input_timeout, toggle_running, Control, WidgetState};
use crate::colors::StatusColor;
use crate::config::BoidsConfig;
use crate::sim::flock::{Field, Flock, FlockParams};
use crate::sim::{seeded_rng, Ticker};
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use std::io;
use std::time::Instant;
use tracing::{debug, info};

/// Simulation units per terminal cell. Cells are about twice as tall as wide.
const UNITS_X: f32 = 3.0;
const UNITS_Y: f32 = 6.0;
/// Variance applied when `v` switches traits on
const VARIANCE_ON: f32 = 0.3;

const HELP: &str = "\
Space     fly / pause
+ / -     more / fewer boids
s / S     separation down / up
a / A     alignment down / up
c / C     cohesion down / up
t / T     turn limit down / up
v         per-boid variance on / off
r         new flock
Shift+0-7 color scheme
q / Esc   quit";

const HINT: &str = "Space:fly  +/-:count  s/a/c:weights  t:turn  r:reset  ?:help";

/// Heading in degrees to an arrow; y grows downwards on screen
fn arrow(heading: f32) -> char {
    const ARROWS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];
    let octant = ((heading + 22.5).rem_euclid(360.0) / 45.0) as usize;
    ARROWS[octant.min(7)]
}

/// Field covering every row but the status line
fn field_for(w: u16, h: u16) -> Field {
    Field::new(w as f32 * UNITS_X, h.saturating_sub(1) as f32 * UNITS_Y)
}

/// Apply a parameter key. Returns true when the flock must be rebuilt.
fn adjust(params: &mut FlockParams, code: KeyCode) -> bool {
    let step = |v: &mut f32, d: f32, max: f32| *v = ((*v + d) * 10.0).round().clamp(0.0, max * 10.0) / 10.0;
    match code {
        KeyCode::Char('+') | KeyCode::Char('=') => params.count = (params.count + 5).min(500),
        KeyCode::Char('-') | KeyCode::Char('_') => params.count = params.count.saturating_sub(5).max(1),
        KeyCode::Char('s') => step(&mut params.separation_weight, -0.1, 10.0),
        KeyCode::Char('S') => step(&mut params.separation_weight, 0.1, 10.0),
        KeyCode::Char('a') => step(&mut params.alignment_weight, -0.1, 10.0),
        KeyCode::Char('A') => step(&mut params.alignment_weight, 0.1, 10.0),
        KeyCode::Char('c') => step(&mut params.cohesion_weight, -0.1, 10.0),
        KeyCode::Char('C') => step(&mut params.cohesion_weight, 0.1, 10.0),
        KeyCode::Char('t') => step(&mut params.max_turn, -0.5, 180.0),
        KeyCode::Char('T') => step(&mut params.max_turn, 0.5, 180.0),
        KeyCode::Char('v') => {
            params.trait_variance = if params.trait_variance > 0.0 { 0.0 } else { VARIANCE_ON };
        }
        _ => return false,
    }
    true
}

/// Frame ticker, left stopped until the first Space
fn frame_ticker(config: &BoidsConfig) -> Ticker {
    Ticker::new(config.frame_period())
}

pub fn run(config: &BoidsConfig) -> io::Result<()> {
    let mut term = Terminal::new()?;
    let mut rng = seeded_rng(config.seed);
    let mut state = WidgetState::new();

    let (w, h) = term.size();
    let mut flock = Flock::new(field_for(w, h), config.params.clone(), &mut rng);
    let mut ticker = frame_ticker(config);
    info!(count = flock.agents().len(), fps = config.fps, "boids started");

    loop {
        if term.refresh_size()? {
            let (w, h) = term.size();
            flock.resize(field_for(w, h), &mut rng);
            debug!(w, h, "boids field resized");
        }

        let now = Instant::now();
        if let Some((code, mods)) = term.poll_key(input_timeout(&ticker, now))? {
            match state.handle_key(code, mods) {
                Control::Quit => break,
                Control::Handled => {}
                Control::Pass => match code {
                    KeyCode::Char(' ') => {
                        let flying = toggle_running(&mut ticker, Instant::now());
                        debug!(flying, "boids play state");
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => flock.reset(&mut rng),
                    _ => {
                        let mut params = flock.params().clone();
                        if adjust(&mut params, code) {
                            debug!(?params, "boids reconfigured");
                            flock.reconfigure(params, &mut rng);
                        }
                    }
                },
            }
        }

        if ticker.poll(Instant::now()) {
            flock.step();
        }

        render(&mut term, &flock, &state, !ticker.is_running());
        term.present()?;
    }

    info!(ticks = flock.ticks(), "boids stopped");
    Ok(())
}

fn render(term: &mut Terminal, flock: &Flock, state: &WidgetState, paused: bool) {
    let (w, h) = term.size();
    term.clear();

    for (i, agent) in flock.agents().iter().enumerate() {
        let x = (agent.x / UNITS_X) as i32;
        let y = (agent.y / UNITS_Y) as i32;
        let (color, bold) = state.colors.color(1 + (i % 3) as u8);
        term.set(x, y, arrow(agent.heading), Some(color), bold);
    }

    let p = flock.params();
    let status = format!(
        " boids:{}  sep:{:.1} ali:{:.1} coh:{:.1} turn:{:.1}°{} ",
        flock.agents().len(),
        p.separation_weight,
        p.alignment_weight,
        p.cohesion_weight,
        p.max_turn,
        if p.trait_variance > 0.0 { "  varied" } else { "" },
    );
    let bottom = h as i32 - 1;
    term.set_str(0, bottom, &status, Some(state.status(StatusColor::Info)), false);
    if status.chars().count() + HINT.chars().count() < w as usize {
        let x = w as i32 - HINT.chars().count() as i32;
        term.set_str(x, bottom, HINT, Some(state.status(StatusColor::Muted)), false);
    }
    if paused {
        term.set_str_centered(h as i32 / 2, "PAUSED", Some(state.status(StatusColor::Good)), true);
    }

    state.overlay(term, "Boids", HELP);
}
