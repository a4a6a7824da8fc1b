//! Trains the XOR toy problem with a single-hidden-layer network.
//!
//! Run with:
//!   cargo run --release -- --hidden-size 8 --learning-rate 0.5 --epochs 10000
//! or with a stored architecture:
//!   cargo run --release -- --config xor.json

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shallow_nn::{evaluate, train_epoch, Network, NetworkConfig, NetworkError};

#[derive(Parser)]
#[command(name = "shallow-nn")]
#[command(about = "Train a one-hidden-layer network on XOR", long_about = None)]
struct Cli {
    /// Load the network configuration from a JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the configuration used for this run to a JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Hidden layer width (ignored with --config)
    #[arg(long, default_value_t = 8)]
    hidden_size: usize,

    /// Learning rate (ignored with --config)
    #[arg(short, long, default_value_t = 0.5)]
    learning_rate: f64,

    /// Number of passes over the four XOR examples
    #[arg(short, long, default_value_t = 10_000)]
    epochs: usize,

    /// Seed for weight initialization; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log every training epoch
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), NetworkError> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = match &cli.config {
        Some(path) => NetworkConfig::load_json(path)?,
        None => NetworkConfig::new(2, cli.hidden_size, 1, cli.learning_rate),
    };
    if config.input_size != 2 || config.output_size != 1 {
        return Err(NetworkError::InvalidConfig(format!(
            "XOR needs 2 inputs and 1 output, got {} and {}",
            config.input_size, config.output_size
        )));
    }
    if let Some(path) = &cli.save_config {
        config.save_json(path)?;
        info!(path = %path.display(), "saved configuration");
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut network = Network::from_seed(&config, seed)?;
    info!(seed, hidden_size = config.hidden_size, learning_rate = config.learning_rate, "training XOR");

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let targets = vec![vec![0.99], vec![0.01], vec![0.99], vec![0.01]];

    let report_every = (cli.epochs / 10).max(1);
    for epoch in 0..cli.epochs {
        let loss = train_epoch(&mut network, &inputs, &targets)?;
        if epoch % report_every == 0 {
            info!(epoch, loss, "progress");
        }
    }

    let loss = evaluate(&network, &inputs, &targets)?;
    if loss > 0.01 {
        warn!(loss, "network did not fit XOR; try another seed or more hidden nodes");
    } else {
        info!(loss, "finished");
    }

    for input in &inputs {
        let output = network.query(input)?;
        info!("input {:?} -> output {:.4}", input, output[0]);
    }

    Ok(())
}
