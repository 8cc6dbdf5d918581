pub mod application;
pub mod infrastructure;

pub use application::{
    run_probe, run_simulation, PlayerSummary, ProbeOutcome, SimulatedPlayer, SimulationConfig,
    SimulationSummary,
};
pub use infrastructure::{CliError, LogConfig, Result};
