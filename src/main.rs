//! CLI entry point for the patio tiling planner

use clap::Parser;
use patioplan::io::cli::{Cli, FileProcessor};

fn main() -> patioplan::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
