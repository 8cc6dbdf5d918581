pub mod probe;
pub mod simulated_player;
pub mod simulation;

pub use probe::{run_probe, ProbeOutcome};
pub use simulated_player::SimulatedPlayer;
pub use simulation::{run_simulation, PlayerSummary, SimulationConfig, SimulationSummary};
