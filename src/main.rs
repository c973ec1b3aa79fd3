//! CLI entry point for the greedy jigsaw reconstruction tool

use clap::Parser;
use seamsolve::io::cli::{Cli, PuzzleProcessor};

fn main() -> seamsolve::Result<()> {
    let cli = Cli::parse();
    let mut processor = PuzzleProcessor::new(cli);
    processor.process()
}
