use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "chatseed")]
#[command(about = "chatseed - seed data for chat application tests", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an export file with conversations, folders and prompts
    Generate {
        /// Root-level conversations to create
        #[arg(long, default_value_t = 1)]
        conversations: usize,
        /// Depth of the nested chat folder chain (0 = a single folder)
        #[arg(long)]
        nested_level: Option<usize>,
        /// Prompts to create inside a prompt folder
        #[arg(long, default_value_t = 0)]
        prompts: usize,
        /// Add a replay conversation for every root conversation
        #[arg(long)]
        replay: bool,
        /// Keep what the output file already contains
        #[arg(long)]
        append: bool,
        /// Output file; defaults to the data directory's export.json
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a summary of an export file
    Inspect { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            conversations,
            nested_level,
            prompts,
            replay,
            append,
            out,
        } => {
            let options = commands::generate::GenerateOptions {
                conversations,
                nested_level,
                prompts,
                replay,
                append,
                out,
            };
            commands::generate::run(cli.config.as_deref(), options).await?
        }
        Commands::Inspect { file } => commands::inspect::run(&file)?,
    }

    Ok(())
}
