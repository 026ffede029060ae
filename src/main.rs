use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use aig_rebalance::io::{read_network_file, write_network_file};
use aig_rebalance::optim::{aig_algebraic_rewriting_with_config, DepthNetwork, RewriteConfig};
use aig_rebalance::utils::DepthView;

/// Depth reduction of And-Inverter Graphs by algebraic rewriting
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce the depth of a network
    Opt {
        /// Network to optimize (.aag)
        file: PathBuf,

        /// Output file for the optimized network (.aag or .dot)
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Maximum number of passes over the network
        #[arg(long, default_value_t = 1024)]
        max_passes: usize,

        /// Also use the absorption rule
        #[arg(long)]
        absorption: bool,

        /// Also write the optimized network as a DOT graph
        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Show statistics about a network
    Stats {
        /// Network to analyze (.aag)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Opt {
            file,
            output,
            max_passes,
            absorption,
            dot,
        } => {
            let mut aig = read_network_file(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            info!(
                "Read {} inputs, {} outputs, {} gates",
                aig.nb_inputs(),
                aig.nb_outputs(),
                aig.nb_nodes()
            );

            let mut config = RewriteConfig::default().with_max_passes(max_passes);
            if absorption {
                config = config.with_absorption();
            }
            let stats = aig_algebraic_rewriting_with_config(&mut aig, &config)?;
            aig.cleanup();
            println!("{}", stats);

            write_network_file(&output, &aig)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            if let Some(dot) = dot {
                write_network_file(&dot, &aig)
                    .with_context(|| format!("Failed to write {}", dot.display()))?;
            }
        }
        Commands::Stats { file } => {
            let mut aig = read_network_file(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let (nb_inputs, nb_outputs, nb_gates) =
                (aig.nb_inputs(), aig.nb_outputs(), aig.nb_live_gates());
            let depth = DepthView::new(&mut aig).depth();
            println!("Inputs: {nb_inputs}");
            println!("Outputs: {nb_outputs}");
            println!("Gates: {nb_gates}");
            println!("Depth: {depth}");
        }
    }
    Ok(())
}
