// runner.rs - Headless simulation loop on the tokio runtime
//
// `run` keeps stepping a simulation until the board is stable, repeats a
// recent generation (only with `halt_on_cycle`), a stop is requested, or
// the generation limit is reached. Between generations it sleeps for the
// cadence interval; a zero interval still yields to the runtime.

use std::time::Instant;

use tokio::sync::watch;
use tracing::info;

use crate::schedule::{Cadence, Simulation};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// The board stopped changing.
    Stable,
    /// The board repeated a recent generation.
    Cycle,
    /// A stop was requested.
    Stopped,
    /// The generation limit was reached.
    GenerationLimit,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub end: RunEnd,
    /// Generations computed during this run.
    pub generations: u64,
    /// Live cells when the run ended.
    pub population: usize,
}

/// Drive `sim` until it settles, is stopped, or hits `max_generations`.
///
/// Sending `true` on the channel paired with `stop` ends the run before the
/// next generation. Dropping the sender just means the run can't be stopped
/// externally.
pub async fn run(
    sim: &mut Simulation,
    cadence: Cadence,
    mut stop: watch::Receiver<bool>,
    max_generations: Option<u64>,
) -> RunReport {
    let interval = sim.interval_for(cadence);
    let mut generations: u64 = 0;

    sim.start_with(cadence, Instant::now());

    let end = loop {
        if *stop.borrow_and_update() {
            break RunEnd::Stopped;
        }
        if max_generations.is_some_and(|max| generations >= max) {
            break RunEnd::GenerationLimit;
        }

        let outcome = sim.step();
        generations += 1;

        if outcome.stable {
            break RunEnd::Stable;
        }
        if outcome.cycled {
            break RunEnd::Cycle;
        }

        if interval.is_zero() {
            tokio::task::yield_now().await;
        } else {
            let sleep = tokio::time::sleep(interval);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    () = &mut sleep => break,
                    changed = stop.changed() => match changed {
                        // Only a stop request cuts the sleep short.
                        Ok(()) if *stop.borrow() => break,
                        Ok(()) => {}
                        Err(_) => {
                            (&mut sleep).await;
                            break;
                        }
                    },
                }
            }
        }
    };

    sim.stop();

    let report = RunReport {
        end,
        generations,
        population: sim.grid().population(),
    };
    info!(
        end = ?report.end,
        generations = report.generations,
        final_generation = sim.generation(),
        population = report.population,
        "Run ended"
    );
    report
}
