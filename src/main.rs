//! CLI entry point for the recursive tone mosaic generator

use clap::Parser;
use tonemosaic::io::cli::{Cli, MosaicRunner, init_tracing};

fn main() -> tonemosaic::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    let mut runner = MosaicRunner::new(cli);
    runner.run().map(|_| ())
}
