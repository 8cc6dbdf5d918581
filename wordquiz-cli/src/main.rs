use clap::{Parser, Subcommand};
use tracing::{info, warn};
use wordquiz_cli::{run_probe, run_simulation, LogConfig, Result, SimulationConfig};
use wordquiz_core::Message;

#[derive(Parser)]
#[command(name = "wordquiz-cli")]
#[command(
    version,
    about = "Word quiz message bus - local multi-peer simulation and probing"
)]
struct Cli {
    /// Debug logging (per-message routing)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run several simulated players on one in-process network
    Simulate {
        /// Number of players (P1..PN)
        #[arg(short = 'p', long, default_value_t = 3)]
        players: usize,

        /// Number of question rounds (hosts rotate)
        #[arg(short = 'r', long, default_value_t = 6)]
        rounds: usize,

        /// Dispatch interval in milliseconds
        #[arg(short = 'i', long, default_value_t = 100)]
        interval_ms: u64,

        /// Starting health of each remote opponent
        #[arg(long, default_value_t = 3)]
        initial_health: u32,
    },

    /// Send a single message to a listener peer and report how it was routed
    Send {
        /// Event kind, e.g. broadcast-question or answer-result
        #[arg(short = 'k', long)]
        kind: String,

        /// JSON payload, e.g. true
        #[arg(long)]
        payload: Option<String>,

        /// Sender id
        #[arg(short = 's', long, default_value = "Tester")]
        sender: String,
    },

    /// Print the JSON schema of a wire message
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = match (&cli.command, cli.verbose) {
        (_, true) => LogConfig::dev(),
        (Commands::Schema, false) => LogConfig::quiet(),
        _ => LogConfig::default(),
    };
    log_config.init()?;

    match cli.command {
        Commands::Simulate {
            players,
            rounds,
            interval_ms,
            initial_health,
        } => {
            simulate(SimulationConfig {
                players,
                rounds,
                interval_ms,
                initial_health,
            })
            .await?;
        }
        Commands::Send {
            kind,
            payload,
            sender,
        } => {
            let payload: Option<serde_json::Value> = payload
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?;
            send(&kind, payload, &sender)?;
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(Message);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

async fn simulate(config: SimulationConfig) -> Result<()> {
    let summary = run_simulation(config).await?;

    info!(
        "Simulation finished: {} rounds in {:?}",
        summary.rounds, summary.elapsed
    );
    for player in &summary.players {
        info!(
            "  {}: {} questions, {}/{} correct answers seen, opponent health {}",
            player.player,
            player.questions_loaded,
            player.correct_seen,
            player.answers_seen,
            player.remote_health
        );
        if player.stats.failures > 0 || player.stats.dropped_unknown > 0 {
            warn!(
                "  {}: {} failures, {} unknown messages dropped",
                player.player, player.stats.failures, player.stats.dropped_unknown
            );
        }
    }

    Ok(())
}

fn send(kind: &str, payload: Option<serde_json::Value>, sender: &str) -> Result<()> {
    let outcome = run_probe(kind, payload, sender)?;
    let report = &outcome.report;

    info!("Sent: {}", serde_json::to_string(&outcome.sent)?);
    info!(
        "Listener drained {}, dispatched {}, unknown {}, payload mismatches {}, failures {}",
        report.drained,
        report.dispatched,
        report.dropped_unknown,
        report.payload_mismatches,
        report.failures
    );
    info!(
        "Listener state: {} questions loaded, {} answer results seen",
        outcome.questions_loaded, outcome.answers_seen
    );

    Ok(())
}
