//! CLI entry point for batch room layout generation

use clap::Parser;
use env_logger::Env;
use roomgen::io::cli::{Cli, FileProcessor};

fn main() -> roomgen::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
