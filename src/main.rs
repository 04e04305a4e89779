use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Find the best shift without touching any file
    Solve(cmd::solve::SolveArgs),
    /// Find the best shift and write the retimed target track
    Shift(cmd::shift::ShiftArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args),
        Commands::Shift(args) => cmd::shift::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
