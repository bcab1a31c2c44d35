use crate::settings::{BoidsSettings, LifeSettings, MinesSettings, NoiseSettings, SnakeSettings, SortSettings};
use crate::sim::flock::FlockParams;
use crate::sim::noise::parse_seed;
use crate::sim::sort::DEFAULT_BARS;
use std::time::Duration;
use tracing::warn;

/// Drop NaN and infinities before they reach a clamp or an RNG range
fn finite_f32(v: Option<f32>) -> Option<f32> {
    v.filter(|v| v.is_finite())
}

fn finite_f64(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

/// Configuration for the boids widget
#[derive(Clone, Debug)]
pub struct BoidsConfig {
    pub params: FlockParams,
    pub fps: u32,
    pub seed: Option<u64>,
}

impl Default for BoidsConfig {
    fn default() -> Self {
        Self {
            params: FlockParams::default(),
            fps: 60,
            seed: None,
        }
    }
}

impl BoidsConfig {
    pub fn apply(&mut self, s: &BoidsSettings) {
        let p = &mut self.params;
        if let Some(v) = s.count { p.count = v; }
        if let Some(v) = finite_f32(s.separation) { p.separation_weight = v; }
        if let Some(v) = finite_f32(s.alignment) { p.alignment_weight = v; }
        if let Some(v) = finite_f32(s.cohesion) { p.cohesion_weight = v; }
        if let Some(v) = finite_f32(s.max_turn) { p.max_turn = v; }
        if let Some(v) = finite_f32(s.view_radius) { p.view_radius = v; }
        if let Some(v) = finite_f32(s.view_cone) { p.view_cone = cone_from_degrees(v); }
        if let Some(v) = finite_f32(s.variance) { p.trait_variance = v; }
        if let Some(v) = s.fps { self.fps = v; }
        self.clamp();
    }

    /// Keep values inside the ranges the widget controls allow
    pub fn clamp(&mut self) {
        let p = &mut self.params;
        p.count = p.count.clamp(1, 500);
        p.separation_weight = p.separation_weight.clamp(0.0, 10.0);
        p.alignment_weight = p.alignment_weight.clamp(0.0, 10.0);
        p.cohesion_weight = p.cohesion_weight.clamp(0.0, 10.0);
        p.max_turn = p.max_turn.clamp(0.0, 180.0);
        p.view_radius = p.view_radius.max(0.0);
        p.trait_variance = p.trait_variance.clamp(0.0, 1.0);
        self.fps = self.fps.clamp(1, 240);
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }
}

/// A cone of 360 degrees or more is no cone at all
pub fn cone_from_degrees(degrees: f32) -> Option<f32> {
    if degrees >= 360.0 || degrees <= 0.0 {
        None
    } else {
        Some(degrees)
    }
}

/// Configuration for the Game of Life widget
#[derive(Clone, Debug)]
pub struct LifeConfig {
    /// Grid size; `None` fills the terminal
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub speed: u32,
    pub density: f64,
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            speed: 1,
            density: 0.3,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn apply(&mut self, s: &LifeSettings) {
        if s.width.is_some() { self.width = s.width; }
        if s.height.is_some() { self.height = s.height; }
        if let Some(v) = s.speed { self.speed = v; }
        if let Some(v) = finite_f64(s.density) { self.density = v.clamp(0.0, 1.0); }
    }
}

/// Configuration for the minesweeper widget
#[derive(Clone, Debug)]
pub struct MinesConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    pub seed: Option<u64>,
}

impl Default for MinesConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 8,
            mines: 10,
            seed: None,
        }
    }
}

impl MinesConfig {
    pub fn apply(&mut self, s: &MinesSettings) {
        if let Some(v) = s.rows { self.rows = v; }
        if let Some(v) = s.cols { self.cols = v; }
        if let Some(v) = s.mines { self.mines = v; }
    }
}

/// Configuration for the snake widget
#[derive(Clone, Debug)]
pub struct SnakeConfig {
    pub width: usize,
    pub height: usize,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            tick: Duration::from_millis(400),
            seed: None,
        }
    }
}

impl SnakeConfig {
    pub fn apply(&mut self, s: &SnakeSettings) {
        if let Some(v) = s.width { self.width = v; }
        if let Some(v) = s.height { self.height = v; }
        if let Some(v) = s.tick_ms { self.tick = Duration::from_millis(v.max(10)); }
    }
}

/// Configuration for the sorting visualiser
#[derive(Clone, Debug)]
pub struct SortConfig {
    /// Upper bound; the widget also caps this at the terminal width
    pub bars: usize,
    pub tick: Duration,
    pub swaps_per_tick: u32,
    pub seed: Option<u64>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            bars: DEFAULT_BARS,
            tick: Duration::from_millis(16),
            swaps_per_tick: 4,
            seed: None,
        }
    }
}

impl SortConfig {
    pub fn apply(&mut self, s: &SortSettings) {
        if let Some(v) = s.bars { self.bars = v.max(1); }
        if let Some(v) = s.tick_ms { self.tick = Duration::from_millis(v.max(1)); }
        if let Some(v) = s.swaps_per_tick { self.swaps_per_tick = v.max(1); }
    }
}

/// Configuration for the noise canvas
#[derive(Clone, Debug, Default)]
pub struct NoiseConfig {
    /// `None` seeds from the clock
    pub seed: Option<u32>,
}

impl NoiseConfig {
    /// A seed that is not base 36 is ignored with a warning
    pub fn apply(&mut self, s: &NoiseSettings) {
        if let Some(text) = &s.seed {
            match parse_seed(text) {
                Some(seed) => self.seed = Some(seed),
                None => warn!(seed = %text, "ignoring seed that is not base 36"),
            }
        }
    }
}
