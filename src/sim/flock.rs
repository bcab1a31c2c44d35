//! Boids flocking on a toroidal plane
//!
//! Every agent steers by three rules applied to the neighbours it can see:
//! 1. Separation: push away from agents that are too close
//! 2. Alignment: turn towards the average heading of neighbours
//! 3. Cohesion: turn towards the centre of neighbours
//!
//! Headings are in degrees, normalized to (-180, 180]. Turning per tick is
//! limited by each agent's `max_turn`.

use rand::Rng;

/// Plane size. Both axes wrap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Shortest displacement from `(x0, y0)` to `(x1, y1)` across the seams
    #[inline]
    pub fn offset(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> (f32, f32) {
        (
            wrap_delta(x1 - x0, self.width),
            wrap_delta(y1 - y0, self.height),
        )
    }

    /// Toroidal distance
    #[inline]
    pub fn distance(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> f32 {
        let (dx, dy) = self.offset(x0, y0, x1, y1);
        (dx * dx + dy * dy).sqrt()
    }

    /// True modulo on both axes, result always inside `[0, size)`
    #[inline]
    pub fn wrap(&self, x: f32, y: f32) -> (f32, f32) {
        (wrap_coord(x, self.width), wrap_coord(y, self.height))
    }
}

#[inline]
fn wrap_delta(d: f32, size: f32) -> f32 {
    let d = d.rem_euclid(size);
    if d > size / 2.0 {
        d - size
    } else {
        d
    }
}

#[inline]
fn wrap_coord(v: f32, size: f32) -> f32 {
    let w = v.rem_euclid(size);
    // rem_euclid can round up to `size` for tiny negative inputs
    if w >= size {
        0.0
    } else {
        w
    }
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Per-agent steering traits, sampled once when the agent is created
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentTraits {
    pub view_radius: f32,
    pub separation_distance: f32,
    /// Degrees per tick
    pub max_turn: f32,
    pub speed: f32,
    /// Weight of this agent in its neighbours' alignment and cohesion
    pub influence: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Agent {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub traits: AgentTraits,
}

/// Flock configuration. Owned by one `Flock`; nothing here is global.
#[derive(Clone, Debug, PartialEq)]
pub struct FlockParams {
    pub count: usize,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub max_turn: f32,
    pub view_radius: f32,
    pub separation_distance: f32,
    pub speed: f32,
    /// Field of view in degrees centred on the heading, `None` sees all around
    pub view_cone: Option<f32>,
    /// Relative spread of per-agent traits (0.2 = ±20%)
    pub trait_variance: f32,
    pub spawn_spacing: f32,
    pub spawn_attempts: u32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            count: 25,
            separation_weight: 2.0,
            alignment_weight: 3.0,
            cohesion_weight: 1.0,
            max_turn: 2.5,
            view_radius: 50.0,
            separation_distance: 20.0,
            speed: 1.0,
            view_cone: Some(240.0),
            trait_variance: 0.0,
            spawn_spacing: 20.0,
            spawn_attempts: 100,
        }
    }
}

impl FlockParams {
    fn base_traits(&self) -> AgentTraits {
        AgentTraits {
            view_radius: self.view_radius,
            separation_distance: self.separation_distance,
            max_turn: self.max_turn,
            speed: self.speed,
            influence: 1.0,
        }
    }

    /// Draw traits as base ± variance
    pub fn sample_traits<R: Rng + ?Sized>(&self, rng: &mut R) -> AgentTraits {
        let base = self.base_traits();
        let v = self.trait_variance.abs();
        if v == 0.0 || !v.is_finite() {
            return base;
        }
        let mut jitter = |value: f32| (value * (1.0 + rng.gen_range(-v..=v))).max(0.0);
        AgentTraits {
            view_radius: jitter(base.view_radius),
            separation_distance: jitter(base.separation_distance),
            max_turn: jitter(base.max_turn),
            speed: jitter(base.speed),
            influence: jitter(base.influence),
        }
    }
}

/// Create a fresh batch of agents at spaced-out random positions
pub fn spawn<R: Rng + ?Sized>(field: Field, params: &FlockParams, rng: &mut R) -> Vec<Agent> {
    let mut agents: Vec<Agent> = Vec::with_capacity(params.count);
    for _ in 0..params.count {
        let mut x = rng.gen_range(0.0..field.width);
        let mut y = rng.gen_range(0.0..field.height);
        let mut attempt = 0;
        while attempt < params.spawn_attempts
            && agents
                .iter()
                .any(|a| field.distance(a.x, a.y, x, y) < params.spawn_spacing)
        {
            x = rng.gen_range(0.0..field.width);
            y = rng.gen_range(0.0..field.height);
            attempt += 1;
        }
        agents.push(Agent {
            x,
            y,
            heading: normalize_degrees(rng.gen_range(0.0..360.0)),
            traits: params.sample_traits(rng),
        });
    }
    agents
}

/// Can `me` see `other`?
#[inline]
fn sees(me: &Agent, other: &Agent, field: Field, cone: Option<f32>) -> Option<(f32, f32, f32)> {
    let (dx, dy) = field.offset(me.x, me.y, other.x, other.y);
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > me.traits.view_radius {
        return None;
    }
    if let Some(cone) = cone {
        if dist > 0.0 {
            let bearing = dy.atan2(dx).to_degrees();
            if normalize_degrees(bearing - me.heading).abs() > cone / 2.0 {
                return None;
            }
        }
    }
    Some((dx, dy, dist))
}

/// New heading for `agents[idx]`, computed from the frozen snapshot
fn steer(idx: usize, agents: &[Agent], field: Field, params: &FlockParams) -> f32 {
    let me = &agents[idx];
    let mut sep = (0.0f32, 0.0f32);
    let mut align = (0.0f32, 0.0f32);
    let mut centre = (0.0f32, 0.0f32);
    let mut weight = 0.0f32;
    let mut neighbors = 0usize;

    for (j, other) in agents.iter().enumerate() {
        if j == idx {
            continue;
        }
        let Some((dx, dy, dist)) = sees(me, other, field, params.view_cone) else {
            continue;
        };
        neighbors += 1;

        let d_sep = me.traits.separation_distance;
        if dist < d_sep && d_sep > 0.0 {
            let force = (d_sep - dist) / d_sep;
            sep.0 -= dx * force;
            sep.1 -= dy * force;
        }

        let w = other.traits.influence;
        let rad = other.heading.to_radians();
        align.0 += rad.cos() * w;
        align.1 += rad.sin() * w;
        centre.0 += dx * w;
        centre.1 += dy * w;
        weight += w;
    }

    if neighbors == 0 {
        return me.heading;
    }

    if weight > 0.0 {
        align = (align.0 / weight, align.1 / weight);
        centre = (centre.0 / weight, centre.1 / weight);
    } else {
        align = (0.0, 0.0);
        centre = (0.0, 0.0);
    }

    let desired_x = sep.0 * params.separation_weight
        + align.0 * params.alignment_weight
        + centre.0 * params.cohesion_weight;
    let desired_y = sep.1 * params.separation_weight
        + align.1 * params.alignment_weight
        + centre.1 * params.cohesion_weight;

    if desired_x == 0.0 && desired_y == 0.0 {
        return me.heading;
    }

    let desired = desired_y.atan2(desired_x).to_degrees();
    let diff = normalize_degrees(desired - me.heading);
    let limit = me.traits.max_turn;
    if diff.abs() > limit {
        normalize_degrees(me.heading + limit.copysign(diff))
    } else {
        normalize_degrees(desired)
    }
}

/// One tick over the whole flock. Reads only `agents`, returns the next state.
pub fn step(agents: &[Agent], field: Field, params: &FlockParams) -> Vec<Agent> {
    (0..agents.len())
        .map(|i| {
            let heading = steer(i, agents, field, params);
            let a = &agents[i];
            let rad = heading.to_radians();
            let (x, y) = field.wrap(
                a.x + rad.cos() * a.traits.speed,
                a.y + rad.sin() * a.traits.speed,
            );
            Agent { x, y, heading, ..*a }
        })
        .collect()
}

/// A flock bound to its field and parameters
pub struct Flock {
    field: Field,
    params: FlockParams,
    agents: Vec<Agent>,
    ticks: u64,
}

impl Flock {
    pub fn new<R: Rng + ?Sized>(field: Field, params: FlockParams, rng: &mut R) -> Self {
        let agents = spawn(field, &params, rng);
        Self {
            field,
            params,
            agents,
            ticks: 0,
        }
    }

    /// Wrap pre-built agents instead of spawning at random
    pub fn from_agents(field: Field, params: FlockParams, agents: Vec<Agent>) -> Self {
        Self {
            field,
            params,
            agents,
            ticks: 0,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn step(&mut self) {
        self.agents = step(&self.agents, self.field, &self.params);
        self.ticks += 1;
    }

    /// Replace every agent with a new random batch
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.agents = spawn(self.field, &self.params, rng);
        self.ticks = 0;
    }

    /// New parameters rebuild the flock from scratch
    pub fn reconfigure<R: Rng + ?Sized>(&mut self, params: FlockParams, rng: &mut R) {
        self.params = params;
        self.reset(rng);
    }

    /// A new field size rebuilds the flock from scratch
    pub fn resize<R: Rng + ?Sized>(&mut self, field: Field, rng: &mut R) {
        self.field = field;
        self.reset(rng);
    }
}
