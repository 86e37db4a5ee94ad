use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rrdiff::{Pipeline, PipelineConfig};
use tracing_subscriber::EnvFilter;

mod plot;

#[derive(Parser)]
#[command(author, version, about = "Finite differences with Runge-Romberg refinement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the differentiation study, write the report and print the error table
    Run {
        /// TOML or YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override the report path from the configuration
        #[arg(short, long)]
        output: Option<String>,
        /// Coarse grid node count override
        #[arg(long)]
        nodes: Option<usize>,
        /// Skip rendering the plot
        #[arg(long)]
        no_plot: bool,
    },

    /// Display the banner
    Banner,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            config,
            output,
            nodes,
            no_plot,
        } => {
            let mut cfg = match config {
                Some(path) => PipelineConfig::from_path(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => PipelineConfig::default(),
            };
            if let Some(output) = output {
                cfg.io.output = output;
            }
            if let Some(nodes) = nodes {
                cfg.grid.nodes = nodes;
            }
            if no_plot {
                cfg.io.plot = false;
            }
            run(cfg)?;
        }
        Command::Banner => {
            println!("{}", rrdiff::banner());
        }
    }
    Ok(())
}

fn run(cfg: PipelineConfig) -> Result<()> {
    let report = Pipeline::new(cfg.clone()).run()?;
    rrdiff::write_report(&cfg.io.output, &report.plot)
        .with_context(|| format!("writing report to {}", cfg.io.output))?;
    print!("{}", rrdiff::render_error_table(&report.errors));

    if cfg.io.plot {
        // Plotting never fails the run.
        if let Err(err) = plot::render(&cfg.io.plot_path, &report.plot) {
            tracing::warn!(path = %cfg.io.plot_path, "plot rendering failed: {err}");
        }
    }
    Ok(())
}
