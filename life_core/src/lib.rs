//! Conway's Game of Life on a fixed, dead-bordered board, with a compact
//! run-length save format.
//!
//! # Modules
//!
//! - [`grid`] -- The board: bounds-checked cell access, generation
//!   stepping, and stability detection.
//! - [`codec`] -- Run-length encoding of the cell sequence over a base64
//!   alphabet.
//! - [`shapes`] -- Predefined patterns for stamping onto the board.
//! - [`history`] -- Fingerprint ring for spotting short oscillators.
//! - [`schedule`] -- Poll-driven ticker and the [`Simulation`] controller.
//! - [`runner`] -- Async headless loop on tokio.
//! - [`config`] -- YAML session configuration.

pub mod codec;
pub mod config;
pub mod grid;
pub mod history;
pub mod runner;
pub mod schedule;
pub mod shapes;

pub use codec::{decode, decode_strict, encode, CodecError};
pub use config::{ConfigError, LifeConfig};
pub use grid::{Grid, GridError, ToCell};
pub use runner::{run, RunEnd, RunReport};
pub use schedule::{Cadence, Simulation, StepOutcome, Ticker};
pub use shapes::Shape;
