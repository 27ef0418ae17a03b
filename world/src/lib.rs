#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state for Grid Snake.
//!
//! The [`World`] owns the snake body, the food item, and the round counters.
//! Adapters mutate it exclusively through [`apply`] and read it back through
//! the [`query`] module, so exactly one explicitly owned engine instance is
//! threaded through the shell each frame.

pub mod rng;

use std::collections::VecDeque;
use std::time::Duration;

use gridsnake_core::{
    CollisionKind, Command, ConfigError, Direction, EngineConfig, Event, GridPosition, GridSize,
    RoundStatus,
};

pub use rng::RandomSource;

/// Represents the authoritative Grid Snake round state.
#[derive(Debug)]
pub struct World {
    config: EngineConfig,
    grid: GridSize,
    snake: Snake,
    food: GridPosition,
    score: u32,
    move_interval: Duration,
    status: RoundStatus,
    rng: RandomSource,
}

impl World {
    /// Creates a new world ready for simulation, with food already placed.
    ///
    /// Fails when the configuration violates a construction precondition.
    pub fn new(config: EngineConfig, mut rng: RandomSource) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid_size();
        let snake = Snake::spawn(grid, config.initial_snake_length);
        let food = place_food(&mut rng, grid, &snake);
        let move_interval = config.initial_move_interval;
        Ok(Self {
            config,
            grid,
            snake,
            food,
            score: 0,
            move_interval,
            status: RoundStatus::Running,
            rng,
        })
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        let Some(previous_head) = self.snake.head() else {
            return;
        };
        let new_head = previous_head.stepped(self.snake.direction);
        self.snake.body.push_front(new_head);
        let grew = self.snake.grow_next_step;
        if grew {
            self.snake.grow_next_step = false;
        } else {
            let _ = self.snake.body.pop_back();
        }

        // Collision checks run strictly after the head moves and before the
        // food check, so a fatal step never scores. The out-of-bounds head is
        // the terminal snapshot.
        if !self.grid.contains(new_head) {
            self.status = RoundStatus::Ended;
            out_events.push(Event::RoundEnded {
                cause: CollisionKind::Wall,
            });
            return;
        }

        if self
            .snake
            .body
            .iter()
            .skip(1)
            .any(|segment| *segment == new_head)
        {
            self.status = RoundStatus::Ended;
            out_events.push(Event::RoundEnded {
                cause: CollisionKind::SelfBody,
            });
            return;
        }

        out_events.push(Event::SnakeAdvanced {
            head: new_head,
            grew,
        });

        if new_head == self.food {
            self.snake.grow_next_step = true;
            let previous_score = self.score;
            self.score = self.score.saturating_add(self.config.food_reward);
            out_events.push(Event::FoodEaten {
                position: new_head,
                score: self.score,
            });
            self.food = place_food(&mut self.rng, self.grid, &self.snake);
            out_events.push(Event::FoodPlaced {
                position: self.food,
            });

            if crossed_milestone(previous_score, self.score, self.config.speedup_milestone)
                && self.move_interval > self.config.min_move_interval
            {
                let accelerated = self.move_interval.mul_f32(self.config.speedup_factor);
                self.move_interval = accelerated.max(self.config.min_move_interval);
                out_events.push(Event::SpeedIncreased {
                    move_interval: self.move_interval,
                });
            }
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        self.snake = Snake::spawn(self.grid, self.config.initial_snake_length);
        self.score = 0;
        self.move_interval = self.config.initial_move_interval;
        self.status = RoundStatus::Running;
        self.food = place_food(&mut self.rng, self.grid, &self.snake);
        out_events.push(Event::RoundRestarted);
        out_events.push(Event::FoodPlaced {
            position: self.food,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::RequestDirection { direction } => {
            if world.status == RoundStatus::Ended {
                return;
            }
            if world.snake.len() > 1 && direction == world.snake.direction.opposite() {
                return;
            }
            if world.snake.direction != direction {
                world.snake.direction = direction;
                out_events.push(Event::DirectionChanged { direction });
            }
        }
        Command::Step => {
            if world.status == RoundStatus::Running {
                world.step(out_events);
            }
        }
        Command::Pause => {
            if world.status == RoundStatus::Running {
                world.status = RoundStatus::Paused;
                out_events.push(Event::RoundPaused);
            }
        }
        Command::Resume => {
            if world.status == RoundStatus::Paused {
                world.status = RoundStatus::Running;
                out_events.push(Event::RoundResumed);
            }
        }
        Command::Restart => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use gridsnake_core::{GridPosition, GridSize, RoundStatus};

    /// Captures a head-first snapshot of the snake body.
    #[must_use]
    pub fn snake(world: &World) -> SnakeView {
        SnakeView {
            segments: world.snake.body.iter().copied().collect(),
        }
    }

    /// Position of the current food item.
    #[must_use]
    pub fn food_position(world: &World) -> GridPosition {
        world.food
    }

    /// Score accumulated during the current round.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Lifecycle state of the current round.
    #[must_use]
    pub fn status(world: &World) -> RoundStatus {
        world.status
    }

    /// Playable dimensions of the grid.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.grid
    }

    /// Wall-clock time currently represented by one step.
    #[must_use]
    pub fn move_interval(world: &World) -> Duration {
        world.move_interval
    }

    /// Read-only, head-first snapshot of the snake body.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SnakeView {
        segments: Vec<GridPosition>,
    }

    impl SnakeView {
        /// Iterator over the body segments, head first.
        pub fn iter(&self) -> impl Iterator<Item = &GridPosition> {
            self.segments.iter()
        }

        /// Head position, the most recently occupied cell.
        #[must_use]
        pub fn head(&self) -> Option<GridPosition> {
            self.segments.first().copied()
        }

        /// Number of body segments.
        #[must_use]
        pub fn len(&self) -> usize {
            self.segments.len()
        }

        /// Reports whether the snapshot holds no segments.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.segments.is_empty()
        }

        /// Consumes the view, yielding the underlying segments.
        #[must_use]
        pub fn into_vec(self) -> Vec<GridPosition> {
            self.segments
        }
    }
}

#[derive(Clone, Debug)]
struct Snake {
    body: VecDeque<GridPosition>,
    direction: Direction,
    grow_next_step: bool,
}

impl Snake {
    /// Builds the initial body: head at the grid center, tail extending
    /// leftward, facing right.
    fn spawn(grid: GridSize, length: u32) -> Self {
        let head = grid.center();
        let mut body = VecDeque::with_capacity(length as usize);
        for offset in 0..length {
            body.push_back(GridPosition::new(head.column() - offset as i32, head.row()));
        }
        Self {
            body,
            direction: Direction::Right,
            grow_next_step: false,
        }
    }

    fn head(&self) -> Option<GridPosition> {
        self.body.front().copied()
    }

    fn len(&self) -> usize {
        self.body.len()
    }

    fn occupies(&self, position: GridPosition) -> bool {
        self.body.iter().any(|segment| *segment == position)
    }
}

/// Rejection-samples a uniform grid cell until one free of the snake appears.
/// Terminates whenever a free cell exists; a snake covering the whole grid is
/// out of contract.
fn place_food(rng: &mut RandomSource, grid: GridSize, snake: &Snake) -> GridPosition {
    loop {
        let column = rng.next_int(0, grid.columns() as i32 - 1);
        let row = rng.next_int(0, grid.rows() as i32 - 1);
        let candidate = GridPosition::new(column, row);
        if !snake.occupies(candidate) {
            return candidate;
        }
    }
}

/// Reports whether the score passed a multiple of the milestone between the
/// two values. Unlike a plain modulo check this neither skips nor double-fires
/// when the reward does not divide the milestone.
fn crossed_milestone(previous_score: u32, score: u32, milestone: u32) -> bool {
    previous_score / milestone != score / milestone
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EngineConfig {
        EngineConfig {
            columns: 10,
            rows: 10,
            initial_snake_length: 3,
            ..EngineConfig::default()
        }
    }

    fn test_world() -> World {
        World::new(test_config(), RandomSource::seeded(42)).expect("valid test config")
    }

    fn positions(world: &World) -> Vec<(i32, i32)> {
        world
            .snake
            .body
            .iter()
            .map(|segment| (segment.column(), segment.row()))
            .collect()
    }

    #[test]
    fn eating_scores_and_grows_on_the_following_step() {
        let mut world = test_world();
        let mut events = Vec::new();
        world.food = GridPosition::new(6, 5);

        apply(&mut world, Command::Step, &mut events);
        assert_eq!(world.score, world.config.food_reward);
        assert_eq!(world.snake.len(), 3, "growth is deferred by one step");
        assert!(world.snake.grow_next_step);

        world.food = GridPosition::new(0, 9);
        apply(&mut world, Command::Step, &mut events);
        assert_eq!(world.snake.len(), 4);
        assert!(!world.snake.grow_next_step);
    }

    #[test]
    fn eating_emits_events_in_step_order() {
        let mut world = test_world();
        let mut events = Vec::new();
        world.food = GridPosition::new(6, 5);

        apply(&mut world, Command::Step, &mut events);

        assert_eq!(
            events[0],
            Event::SnakeAdvanced {
                head: GridPosition::new(6, 5),
                grew: false
            }
        );
        assert_eq!(
            events[1],
            Event::FoodEaten {
                position: GridPosition::new(6, 5),
                score: 10
            }
        );
        assert!(matches!(events[2], Event::FoodPlaced { .. }));
    }

    #[test]
    fn replacement_food_avoids_the_snake() {
        let mut world = test_world();
        let mut events = Vec::new();
        for _ in 0..32 {
            world.food = world
                .snake
                .head()
                .expect("snake is never empty")
                .stepped(world.snake.direction);
            if !world.grid.contains(world.food) {
                break;
            }
            apply(&mut world, Command::Step, &mut events);
            assert!(!world.snake.occupies(world.food));
        }
    }

    #[test]
    fn place_food_only_uses_free_cells_on_a_nearly_full_grid() {
        let config = EngineConfig {
            columns: 2,
            rows: 2,
            initial_snake_length: 2,
            ..EngineConfig::default()
        };
        let mut world = World::new(config, RandomSource::seeded(3)).expect("valid config");
        // Body occupies (1,1) and (0,1); only the top row is free.
        for _ in 0..64 {
            let food = place_food(&mut world.rng, world.grid, &world.snake);
            assert!(!world.snake.occupies(food));
            assert!(world.grid.contains(food));
        }
    }

    #[test]
    fn self_collision_ends_the_round_without_scoring() {
        let mut world = test_world();
        let mut events = Vec::new();
        let far_corner = GridPosition::new(0, 9);

        // Grow to five segments by feeding two cells along the starting row.
        for food_column in [6, 8] {
            world.food = GridPosition::new(food_column, 5);
            apply(&mut world, Command::Step, &mut events);
            world.food = far_corner;
            apply(&mut world, Command::Step, &mut events);
        }
        assert_eq!(world.snake.len(), 5);
        assert_eq!(positions(&world), vec![(9, 5), (8, 5), (7, 5), (6, 5), (5, 5)]);

        // Turn back into the body: down, left, then up into (8,5).
        let score_before = world.score;
        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            apply(&mut world, Command::RequestDirection { direction }, &mut events);
            world.food = far_corner;
            apply(&mut world, Command::Step, &mut events);
        }

        assert_eq!(world.status, RoundStatus::Ended);
        assert_eq!(world.score, score_before);
        assert_eq!(
            events.last(),
            Some(&Event::RoundEnded {
                cause: CollisionKind::SelfBody
            })
        );
    }

    #[test]
    fn reversal_is_honoured_for_a_single_segment() {
        let config = EngineConfig {
            initial_snake_length: 1,
            ..test_config()
        };
        let mut world = World::new(config, RandomSource::seeded(5)).expect("valid config");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::RequestDirection {
                direction: Direction::Left,
            },
            &mut events,
        );
        world.food = GridPosition::new(0, 9);
        apply(&mut world, Command::Step, &mut events);

        assert_eq!(world.snake.head(), Some(GridPosition::new(4, 5)));
        assert_eq!(world.status, RoundStatus::Running);
    }

    #[test]
    fn milestone_crossing_fires_even_when_the_reward_skips_the_multiple() {
        // 30 -> 60 never equals a multiple of 50 yet crosses one.
        assert!(crossed_milestone(30, 60, 50));
        assert!(crossed_milestone(40, 50, 50));
        assert!(!crossed_milestone(50, 60, 50));
        assert!(!crossed_milestone(0, 40, 50));
    }

    #[test]
    fn speedup_applies_on_crossing_and_respects_the_floor() {
        let config = EngineConfig {
            food_reward: 50,
            speedup_milestone: 50,
            initial_move_interval: Duration::from_millis(50),
            min_move_interval: Duration::from_millis(40),
            speedup_factor: 0.5,
            ..test_config()
        };
        let mut world = World::new(config, RandomSource::seeded(11)).expect("valid config");
        let mut events = Vec::new();

        world.food = GridPosition::new(6, 5);
        apply(&mut world, Command::Step, &mut events);
        // Halving 50ms would undershoot the 40ms floor, so it clamps.
        assert_eq!(world.move_interval, Duration::from_millis(40));
        assert!(events.contains(&Event::SpeedIncreased {
            move_interval: Duration::from_millis(40)
        }));

        // At the floor no further speed-up fires.
        events.clear();
        world.food = GridPosition::new(7, 5);
        apply(&mut world, Command::Step, &mut events);
        assert_eq!(world.move_interval, Duration::from_millis(40));
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::SpeedIncreased { .. })));
    }

    #[test]
    fn body_stays_duplicate_free_while_running() {
        let mut world = test_world();
        let mut events = Vec::new();
        let turns = [
            Direction::Down,
            Direction::Right,
            Direction::Up,
            Direction::Right,
        ];
        for direction in turns {
            apply(&mut world, Command::RequestDirection { direction }, &mut events);
            apply(&mut world, Command::Step, &mut events);
            if world.status != RoundStatus::Running {
                break;
            }
            let segments = positions(&world);
            for (index, first) in segments.iter().enumerate() {
                for second in segments.iter().skip(index + 1) {
                    assert_ne!(first, second);
                }
            }
        }
    }
}
