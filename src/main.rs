//! kg-microbe command-line entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kg_microbe::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// kg-microbe: microbial trait and ontology ingestion into KGX graphs
#[derive(Parser, Debug)]
#[command(name = "kg-microbe")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable JSON logging format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transform the organism trait table into nodes.tsv / edges.tsv
    Transform {
        /// Input directory (overrides paths.input_dir)
        #[arg(short, long)]
        input_dir: Option<String>,
        /// Output directory (overrides paths.output_dir)
        #[arg(short, long)]
        output_dir: Option<String>,
        /// Trait CSV file name inside the input directory
        #[arg(short, long)]
        data_file: Option<String>,
        /// Skip NER tables; every term resolves to its fallback id
        #[arg(long)]
        no_nlp: bool,
    },
    /// Convert ontology JSON files with the configured converter
    Ontologies {
        /// Single file (e.g. go.json) or registry name (e.g. GoTransform); all when omitted
        #[arg(short, long)]
        file: Option<String>,
        /// Input directory (overrides paths.input_dir)
        #[arg(short, long)]
        input_dir: Option<String>,
        /// Output directory (overrides paths.output_dir)
        #[arg(short, long)]
        output_dir: Option<String>,
    },
    /// Convert a KGX nodes TSV into an NER term list
    Termlist {
        /// KGX nodes TSV
        nodes: PathBuf,
        /// Output term list (defaults to the NLP terms directory)
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

fn init_tracing(verbose: bool, json_logs: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if matches!(args.command, Command::Config) && !args.verbose {
        // Keep config output clean
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    } else {
        init_tracing(args.verbose, args.json_logs);
    }

    let config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    match args.command {
        Command::Transform {
            input_dir,
            output_dir,
            data_file,
            no_nlp,
        } => cli::run_transform(
            config,
            cli::TransformOverrides {
                input_dir,
                output_dir,
                data_file,
                no_nlp,
            },
            args.json,
        ),
        Command::Ontologies {
            file,
            input_dir,
            output_dir,
        } => cli::run_ontologies(config, file, input_dir, output_dir, args.json),
        Command::Termlist { nodes, output } => cli::run_termlist(config, nodes, output, args.json),
        Command::Config => cli::run_show_config(config, args.json),
    }
}
