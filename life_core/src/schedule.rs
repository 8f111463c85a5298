// schedule.rs - Stepping control for a running board
//
// The grid owns no timer. `Ticker` is polled once per frame to ask whether
// a generation is due. `Simulation` ties a grid to a ticker, mirrors the
// usual controls, and halts the ticker as soon as a step reports a stable
// board.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::{ConfigError, LifeConfig};
use crate::grid::Grid;
use crate::history::CycleDetector;
use crate::shapes::Shape;

/// How fast a started simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// The configured interval (100 ms by default).
    Normal,
    /// The quick interval, zero by default: a generation every poll.
    Quick,
}

/// Decides when the next generation is due.
#[derive(Debug, Clone)]
pub struct Ticker {
    is_running: bool,
    last_update: Instant,
    update_interval: Duration,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::ZERO,
        }
    }

    /// Start (or restart) ticking every `interval`, counting from `now`.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.is_running = true;
        self.update_interval = interval;
        self.last_update = now;
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn interval(&self) -> Duration {
        self.update_interval
    }

    /// Whether a generation is due at `now`. Re-arms itself when it fires.
    pub fn due(&mut self, now: Instant) -> bool {
        if !self.is_running || now.saturating_duration_since(self.last_update) < self.update_interval {
            return false;
        }
        self.last_update = now;
        true
    }

    /// Time left until the next generation, if running.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.is_running.then(|| {
            self.update_interval
                .saturating_sub(now.saturating_duration_since(self.last_update))
        })
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

/// What a single generation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Generation number reached by this step.
    pub generation: u64,
    /// The board did not change.
    pub stable: bool,
    /// The board repeats a recent generation. Only tracked with `halt_on_cycle`.
    pub cycled: bool,
    /// Live cells after the step.
    pub population: usize,
}

impl StepOutcome {
    /// Whether automatic stepping should stop after this generation.
    pub fn halted(&self) -> bool {
        self.stable || self.cycled
    }
}

/// A board plus the controls that drive it.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    ticker: Ticker,
    generation: u64,
    cycles: Option<CycleDetector>,
    interval: Duration,
    quick_interval: Duration,
}

impl Simulation {
    /// Wrap an existing board using the timing settings from `config`.
    pub fn new(grid: Grid, config: &LifeConfig) -> Self {
        Self {
            grid,
            ticker: Ticker::new(),
            generation: 0,
            cycles: config.halt_on_cycle.then(CycleDetector::new),
            interval: config.interval(),
            quick_interval: config.quick_interval(),
        }
    }

    /// Build the starting board described by `config`.
    pub fn from_config(config: &LifeConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.initial_grid()?, config))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Delay between generations for `cadence`.
    pub fn interval_for(&self, cadence: Cadence) -> Duration {
        match cadence {
            Cadence::Normal => self.interval,
            Cadence::Quick  => self.quick_interval,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.start_with(Cadence::Normal, now);
    }

    pub fn start_quick(&mut self, now: Instant) {
        self.start_with(Cadence::Quick, now);
    }

    pub fn start_with(&mut self, cadence: Cadence, now: Instant) {
        let interval = self.interval_for(cadence);
        info!(?cadence, ?interval, generation = self.generation, "Simulation started");
        self.ticker.start(interval, now);
    }

    pub fn stop(&mut self) {
        if self.ticker.is_running() {
            info!(generation = self.generation, "Simulation stopped");
        }
        self.ticker.stop();
    }

    /// Compute one generation. Stops the ticker if the board settled.
    pub fn step(&mut self) -> StepOutcome {
        let stable = self.grid.step();
        self.generation += 1;
        let cycled = self.cycles.as_mut().is_some_and(|c| c.observe(&self.grid));

        let outcome = StepOutcome {
            generation: self.generation,
            stable,
            cycled,
            population: self.grid.population(),
        };
        debug!(generation = outcome.generation, population = outcome.population, "Generation computed");

        if outcome.halted() {
            if self.ticker.is_running() {
                info!(generation = self.generation, stable, cycled, "Board settled, halting");
            }
            self.ticker.stop();
        }
        outcome
    }

    /// Step if the ticker says a generation is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<StepOutcome> {
        self.ticker.due(now).then(|| self.step())
    }

    /// Stop and kill every cell.
    pub fn clear(&mut self) {
        self.stop();
        self.grid.clear();
        self.generation = 0;
        self.forget_history();
    }

    /// Stop and stamp `shape` centred on a pointer position in cell units.
    pub fn place(&mut self, x: f64, y: f64, shape: Shape) {
        self.stop();
        self.grid.stamp_shape(x, y, shape);
        self.forget_history();
    }

    /// Set a single cell without stopping, e.g. for scripted setup.
    pub fn set_cell(&mut self, x: f64, y: f64, alive: bool) {
        self.grid.set_state(x, y, alive);
        self.forget_history();
    }

    /// Stop and encode the board.
    pub fn save(&mut self) -> String {
        self.stop();
        let encoded = self.grid.save();
        info!(generation = self.generation, length = encoded.len(), "Board saved");
        encoded
    }

    /// Stop and overwrite the board from a saved string. Returns the number
    /// of cells written.
    pub fn restore(&mut self, encoded: &str) -> usize {
        self.stop();
        let written = self.grid.restore(encoded);
        self.generation = 0;
        self.forget_history();
        info!(written, cells = self.grid.cells().len(), "Board restored");
        written
    }

    fn forget_history(&mut self) {
        if let Some(cycles) = self.cycles.as_mut() {
            cycles.reset();
        }
    }
}
