use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    heading::Heading,
    state::{Cell, CollisionType, GameState, Snake, Snapshot},
};
use crate::error::{ConfigError, EngineError};

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Snake moved one cell without eating
    Moved,
    /// Snake ate and grew; `speed_changed` asks the scheduler to re-arm
    Ate { speed_changed: bool },
    /// Snake crashed and the game is over
    Collided(CollisionType),
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub snapshot: Snapshot,
    pub state: GameState,
    pub event: TickEvent,
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self.event, TickEvent::Collided(_))
    }
}

/// The game engine that owns the snake, food, heading and score
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    snake: Snake,
    food: Cell,
    /// Heading used by the last tick
    heading: Heading,
    /// Latest accepted turn, applied on the next tick
    pending_heading: Option<Heading>,
    state: GameState,
}

impl GameEngine {
    /// Create an engine whose food placement is seeded from the OS
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine with deterministic food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            snake: Snake::from_body(config.initial_snake.clone()),
            food: config.initial_food,
            heading: config.initial_heading,
            pending_heading: None,
            state: GameState::idle(config.initial_speed_ms),
            rng,
            config,
        })
    }

    /// Lay out a fresh game and start it. No-op while a game is running.
    /// Returns whether a new game was started.
    pub fn start(&mut self) -> bool {
        if self.state.started {
            return false;
        }

        self.snake = Snake::from_body(self.config.initial_snake.clone());
        self.food = self.config.initial_food;
        self.heading = self.config.initial_heading;
        self.pending_heading = None;
        self.state = GameState {
            score: 0,
            speed_ms: self.config.initial_speed_ms,
            started: true,
            over: false,
        };

        info!(
            "game started: {} segments heading {:?}, tick {}ms",
            self.snake.len(),
            self.heading,
            self.state.speed_ms
        );
        true
    }

    /// End the current game without a collision
    pub fn stop(&mut self) {
        if self.state.started {
            info!("game stopped with score {}", self.state.score);
        }
        self.state.started = false;
        self.pending_heading = None;
    }

    /// Queue a turn for the next tick. Reversing onto the neck is ignored.
    pub fn set_heading(&mut self, requested: Heading) -> bool {
        if !self.state.is_running() || self.heading.is_opposite(requested) {
            return false;
        }

        self.pending_heading = Some(requested);
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        if !self.state.is_running() {
            return Err(EngineError::NotRunning);
        }

        if let Some(heading) = self.pending_heading.take() {
            self.heading = heading;
        }

        let new_head = self.snake.head().stepped(self.heading, self.config.cell_size);
        let ate_food = new_head == self.food;

        if let Some(collision) = self.check_collision(new_head, ate_food) {
            self.finish();
            info!(
                "game over: {:?} at {}, final score {}",
                collision, new_head, self.state.score
            );
            return Ok(self.outcome(TickEvent::Collided(collision)));
        }

        self.snake.advance(new_head, ate_food);

        if !ate_food {
            return Ok(self.outcome(TickEvent::Moved));
        }

        self.state.score += self.config.food_reward;
        let speed_changed = self.accelerate();

        match self.spawn_food() {
            Ok(cell) => {
                debug!("food eaten at {}, next food at {}", new_head, cell);
                self.food = cell;
            }
            Err(err) => {
                self.finish();
                error!("{}", err);
                return Err(err);
            }
        }

        Ok(self.outcome(TickEvent::Ate { speed_changed }))
    }

    pub fn is_over(&self) -> bool {
        self.state.over
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Committed heading (not including a queued turn)
    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().to_vec(),
            food: self.food,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn outcome(&self, event: TickEvent) -> TickOutcome {
        TickOutcome {
            snapshot: self.snapshot(),
            state: self.state,
            event,
        }
    }

    fn finish(&mut self) {
        self.state.over = true;
        self.state.started = false;
        self.pending_heading = None;
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, new_head: Cell, grows: bool) -> Option<CollisionType> {
        if !self.config.in_bounds(new_head) {
            return Some(CollisionType::Wall);
        }

        if self.snake.blocks(new_head, grows) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Shorten the tick interval, floored at the configured minimum
    fn accelerate(&mut self) -> bool {
        if self.state.speed_ms <= self.config.min_speed_ms {
            return false;
        }

        let next = self
            .state
            .speed_ms
            .saturating_sub(self.config.speed_step_ms)
            .max(self.config.min_speed_ms);
        debug!("tick interval {}ms -> {}ms", self.state.speed_ms, next);
        self.state.speed_ms = next;
        true
    }

    /// Pick a cell not covered by the snake, uniformly at random
    fn spawn_food(&mut self) -> Result<Cell, EngineError> {
        let cells = self.config.total_cells();
        if self.snake.len() >= cells {
            return Err(EngineError::NoFreeCell { cells });
        }

        let size = self.config.cell_size;
        let (columns, rows) = (self.config.columns(), self.config.rows());

        for _ in 0..self.config.max_food_attempts {
            let cell = Cell::new(
                self.rng.gen_range(0..columns) * size,
                self.rng.gen_range(0..rows) * size,
            );

            if !self.snake.contains(cell) {
                return Ok(cell);
            }
        }

        warn!(
            "no free cell after {} draws, scanning {} cells",
            self.config.max_food_attempts, cells
        );

        let free: Vec<Cell> = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| Cell::new(col * size, row * size)))
            .filter(|cell| !self.snake.contains(*cell))
            .collect();

        free.choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::NoFreeCell { cells })
    }
}
