use std::error::Error;

use clap::{Parser, Subcommand};
use ssg_cli::commands::{
    layout::{self, LayoutArgs},
    measures::{self, MeasuresArgs},
};
use ssg_cli::logging;

#[derive(Parser, Debug)]
#[command(name = "ssg", about = "State-space grid analysis CLI")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute aggregate and per-trajectory measures for a batch.
    Measures(MeasuresArgs),
    /// Emit bounds, ticks and overlap-resolved coordinates for rendering.
    Layout(LayoutArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match cli.command {
        Command::Measures(args) => measures::run(&args),
        Command::Layout(args) => layout::run(&args),
    }
}
