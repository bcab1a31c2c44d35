//! Snake on a bounded (non-wrapping) grid
//!
//! The body is stored tail first: `body.front()` is the tail and
//! `body.back()` is the head. Coordinates grow right (x) and down (y).

use super::{Bounds, Outcome};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn moved(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Result of one `step`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    pub body: VecDeque<Cell>,
    pub food: Option<Cell>,
    pub outcome: Outcome,
    pub grew: bool,
}

/// Uniformly random free cell, `None` when the body covers the grid
pub fn place_food<R: Rng + ?Sized>(body: &VecDeque<Cell>, bounds: Bounds, rng: &mut R) -> Option<Cell> {
    let free: Vec<Cell> = (0..bounds.height as i32)
        .flat_map(|y| (0..bounds.width as i32).map(move |x| Cell::new(x, y)))
        .filter(|c| !body.contains(c))
        .collect();
    free.choose(rng).copied()
}

/// Advance the snake one cell in `direction`.
///
/// Leaving the grid or running into the body loses, leaving the body as it
/// was. The tail cell is vacated this tick unless the snake grows, so moving
/// into it is only a collision when eating.
pub fn step<R: Rng + ?Sized>(
    body: &VecDeque<Cell>,
    direction: Direction,
    food: Option<Cell>,
    bounds: Bounds,
    rng: &mut R,
) -> StepResult {
    let lost = || StepResult {
        body: body.clone(),
        food,
        outcome: Outcome::Lost,
        grew: false,
    };

    let Some(&head) = body.back() else {
        return lost();
    };
    let next = head.moved(direction);

    if !bounds.contains(next.x, next.y) {
        return lost();
    }

    let grows = food == Some(next);
    let skip = if grows { 0 } else { 1 };
    if body.iter().skip(skip).any(|&c| c == next) {
        return lost();
    }

    let mut new_body = body.clone();
    if !grows {
        new_body.pop_front();
    }
    new_body.push_back(next);

    if !grows {
        return StepResult {
            body: new_body,
            food,
            outcome: Outcome::Running,
            grew: false,
        };
    }

    if new_body.len() >= bounds.area() {
        return StepResult {
            body: new_body,
            food: None,
            outcome: Outcome::Won,
            grew: true,
        };
    }

    let food = place_food(&new_body, bounds, rng);
    StepResult {
        body: new_body,
        food,
        outcome: Outcome::Running,
        grew: true,
    }
}

/// Game state: body, food and the latched direction
#[derive(Clone, Debug)]
pub struct Snake {
    bounds: Bounds,
    body: VecDeque<Cell>,
    food: Option<Cell>,
    heading: Direction,
    pending: Direction,
    outcome: Outcome,
}

const START_BODY: [Cell; 3] = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];

impl Snake {
    /// Fresh game. The grid is at least 3 cells wide so the starting body fits.
    pub fn new<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        let bounds = Bounds::new(bounds.width.max(START_BODY.len()), bounds.height.max(1));
        let mut snake = Self {
            bounds,
            body: VecDeque::new(),
            food: None,
            heading: Direction::Right,
            pending: Direction::Right,
            outcome: Outcome::Running,
        };
        snake.reset(rng);
        snake
    }

    /// Game from an explicit layout; `heading` is the direction the head last moved
    pub fn from_parts(bounds: Bounds, body: Vec<Cell>, heading: Direction, food: Option<Cell>) -> Self {
        Self {
            bounds,
            body: body.into(),
            food,
            heading,
            pending: heading,
            outcome: Outcome::Running,
        }
    }

    /// Back to the 3-cell snake in the top-left corner, heading right
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.body = START_BODY.iter().copied().collect();
        self.heading = Direction::Right;
        self.pending = Direction::Right;
        self.food = place_food(&self.body, self.bounds, rng);
        self.outcome = if self.food.is_none() {
            Outcome::Won
        } else {
            Outcome::Running
        };
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.back().copied()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Latch a turn for the next step. Turning back into the neck is refused.
    pub fn set_direction(&mut self, dir: Direction) {
        if self.outcome.is_over() {
            return;
        }
        let neck = self.body.len().checked_sub(2).map(|i| self.body[i]);
        if let (Some(head), Some(neck)) = (self.head(), neck) {
            if head.moved(dir) == neck {
                return;
            }
        }
        self.pending = dir;
    }

    /// One tick. Ignored once the game has ended.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Outcome {
        if self.outcome.is_over() {
            return self.outcome;
        }
        let result = step(&self.body, self.pending, self.food, self.bounds, rng);
        self.outcome = result.outcome;
        if result.outcome != Outcome::Lost {
            self.body = result.body;
            self.food = result.food;
            self.heading = self.pending;
        }
        self.outcome
    }

    /// Direction of the last move
    pub fn heading(&self) -> Direction {
        self.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cells(list: &[(i32, i32)]) -> VecDeque<Cell> {
        list.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn moves_without_food() {
        let mut rng = StdRng::seed_from_u64(1);
        let body = cells(&[(0, 0), (1, 0), (2, 0)]);
        let food = Some(Cell::new(5, 5));
        let r = step(&body, Direction::Right, food, Bounds::new(16, 16), &mut rng);
        assert_eq!(r.body, cells(&[(1, 0), (2, 0), (3, 0)]));
        assert_eq!(r.food, food);
        assert!(!r.grew);
        assert_eq!(r.outcome, Outcome::Running);
    }

    #[test]
    fn grows_on_food_and_replaces_it() {
        let mut rng = StdRng::seed_from_u64(2);
        let body = cells(&[(0, 0), (1, 0), (2, 0)]);
        let r = step(&body, Direction::Right, Some(Cell::new(3, 0)), Bounds::new(16, 16), &mut rng);
        assert_eq!(r.body, cells(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
        assert!(r.grew);
        let food = r.food.expect("food placed");
        assert!(!r.body.contains(&food));
        assert!(Bounds::new(16, 16).contains(food.x, food.y));
    }

    #[test]
    fn wall_loses_and_keeps_body() {
        let mut rng = StdRng::seed_from_u64(3);
        let body = cells(&[(0, 0), (1, 0), (2, 0)]);
        let r = step(&body, Direction::Up, None, Bounds::new(4, 4), &mut rng);
        assert_eq!(r.outcome, Outcome::Lost);
        assert_eq!(r.body, body);
    }

    #[test]
    fn chasing_the_tail_is_allowed() {
        let mut rng = StdRng::seed_from_u64(4);
        // 2x2 loop: head at (0,1) moves up into the tail at (0,0)
        let body = cells(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let r = step(&body, Direction::Up, Some(Cell::new(3, 3)), Bounds::new(4, 4), &mut rng);
        assert_eq!(r.outcome, Outcome::Running);
        assert_eq!(r.body, cells(&[(1, 0), (1, 1), (0, 1), (0, 0)]));
    }

    #[test]
    fn biting_the_body_loses() {
        let mut rng = StdRng::seed_from_u64(5);
        let body = cells(&[(3, 1), (0, 0), (1, 0), (1, 1), (0, 1)]);
        let r = step(&body, Direction::Up, None, Bounds::new(4, 4), &mut rng);
        assert_eq!(r.outcome, Outcome::Lost);
    }

    #[test]
    fn filling_the_grid_wins() {
        let mut rng = StdRng::seed_from_u64(6);
        let body = cells(&[(0, 0), (1, 0), (2, 0)]);
        let r = step(&body, Direction::Down, Some(Cell::new(2, 1)), Bounds::new(3, 2), &mut rng);
        assert_eq!(r.outcome, Outcome::Running);
        assert!(r.food.is_some());

        let body = cells(&[(0, 1), (0, 0), (1, 0), (2, 0), (2, 1)]);
        let r = step(&body, Direction::Left, Some(Cell::new(1, 1)), Bounds::new(3, 2), &mut rng);
        assert_eq!(r.outcome, Outcome::Won);
        assert_eq!(r.food, None);
        assert_eq!(r.body.len(), 6);
    }

    #[test]
    fn reversal_into_neck_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut snake = Snake::new(Bounds::new(16, 16), &mut rng);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.pending(), Direction::Right);
        snake.set_direction(Direction::Down);
        assert_eq!(snake.pending(), Direction::Down);
        // the latch only applies on the next step
        assert_eq!(snake.head(), Some(Cell::new(2, 0)));
        snake.step(&mut rng);
        assert_eq!(snake.head(), Some(Cell::new(2, 1)));
        assert_eq!(snake.heading(), Direction::Down);
    }

    #[test]
    fn quick_double_turn_cannot_reverse() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut snake = Snake::new(Bounds::new(16, 16), &mut rng);
        // up is off-grid but legal as a latch; then left is the neck again
        snake.set_direction(Direction::Up);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.pending(), Direction::Up);
    }

    #[test]
    fn reset_restores_start() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut snake = Snake::new(Bounds::new(5, 5), &mut rng);
        snake.set_direction(Direction::Up);
        assert_eq!(snake.step(&mut rng), Outcome::Lost);
        assert_eq!(snake.step(&mut rng), Outcome::Lost);
        snake.reset(&mut rng);
        assert_eq!(snake.outcome(), Outcome::Running);
        assert_eq!(snake.body(), &cells(&[(0, 0), (1, 0), (2, 0)]));
        assert_eq!(snake.pending(), Direction::Right);
        let food = snake.food().expect("food");
        assert!(!snake.body().contains(&food));
    }
}
