use super::SimulatedPlayer;
use crate::infrastructure::{CliError, Result};
use std::time::{Duration, Instant};
use tracing::info;
use wordquiz_core::{Message, PlayerId};
use wordquiz_p2p::{
    DispatchLoop, DispatchStats, Dispatcher, DispatcherConfig, SimulatedNetwork,
    SimulatedTransport,
};

type PlayerLoop = DispatchLoop<SimulatedTransport, SimulatedPlayer>;

/// Parameters of a local multi-player run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub players: usize,
    pub rounds: usize,
    pub interval_ms: u64,
    pub initial_health: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            players: 3,
            rounds: 6,
            interval_ms: 100,
            initial_health: 3,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.players < 2 {
            return Err(CliError::invalid_config(format!(
                "need at least 2 players, got {}",
                self.players
            )));
        }
        if self.initial_health == 0 {
            return Err(CliError::invalid_config("initial health must be positive"));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        DispatcherConfig::new()
            .with_dispatch_interval(self.interval_ms)
            .dispatch_interval()
    }

    /// Answer outcome the host reports in a round (every third answer is wrong)
    pub fn answer_for_round(round: usize) -> bool {
        round % 3 != 2
    }
}

/// What one player ended up with
#[derive(Debug, Clone)]
pub struct PlayerSummary {
    pub player: String,
    pub questions_loaded: u32,
    pub answers_seen: u32,
    pub correct_seen: u32,
    pub remote_health: u32,
    pub stats: DispatchStats,
}

#[derive(Debug, Clone)]
pub struct SimulationSummary {
    pub rounds: usize,
    pub players: Vec<PlayerSummary>,
    pub elapsed: Duration,
}

/// Run `players` peers on one simulated network; each round the host
/// (round-robin) broadcasts a question and then its answer result
pub async fn run_simulation(config: SimulationConfig) -> Result<SimulationSummary> {
    config.validate()?;

    let started = Instant::now();
    let network = SimulatedNetwork::new();
    let dispatcher_config = DispatcherConfig::new().with_dispatch_interval(config.interval_ms);
    let interval = dispatcher_config.dispatch_interval();

    let mut ids = Vec::with_capacity(config.players);
    let mut loops: Vec<PlayerLoop> = Vec::with_capacity(config.players);
    for i in 1..=config.players {
        let name = format!("P{}", i);
        let id = PlayerId::new(name.as_str())?;
        let dispatcher = Dispatcher::with_config(
            id.clone(),
            SimulatedTransport::with_network(network.clone(), name.as_str()),
            SimulatedPlayer::new(name.as_str(), config.initial_health),
            dispatcher_config.clone(),
        );
        loops.push(DispatchLoop::spawn(dispatcher)?);
        ids.push(id);
    }

    info!(
        "Simulation started: {} players, {} rounds, {:?} dispatch interval",
        config.players, config.rounds, interval
    );

    for round in 0..config.rounds {
        let host = round % config.players;
        let turn = i32::try_from(round).unwrap_or(i32::MAX);
        let correct = SimulationConfig::answer_for_round(round);

        info!(
            "Round {}: {} asks, answer {}",
            round + 1,
            ids[host],
            if correct { "correct" } else { "wrong" }
        );

        loops[host]
            .send(Message::broadcast_question(ids[host].clone()).with_turn_index(turn))
            .await?;
        loops[host]
            .send(Message::answer_result(ids[host].clone(), correct).with_turn_index(turn))
            .await?;

        tokio::time::sleep(interval * 2).await;
    }

    // Let the last batch land everywhere
    tokio::time::sleep(interval * 3).await;

    let mut players = Vec::with_capacity(loops.len());
    for handle in loops {
        let dispatcher = handle.shutdown().await?;
        let player = dispatcher.consumer();
        players.push(PlayerSummary {
            player: player.name().to_string(),
            questions_loaded: player.questions_loaded(),
            answers_seen: player.answers_seen(),
            correct_seen: player.correct_seen(),
            remote_health: player.remote_health().current(),
            stats: dispatcher.stats(),
        });
    }

    Ok(SimulationSummary {
        rounds: config.rounds,
        players,
        elapsed: started.elapsed(),
    })
}
