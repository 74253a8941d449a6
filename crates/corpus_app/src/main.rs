//! Corpus Mill CLI: drives the frequency engine and the toolkit stages.
mod args;
mod commands;
mod config;

use std::path::Path;

use corpus_logging::LogDestination;

fn main() -> anyhow::Result<()> {
    corpus_logging::initialize(LogDestination::File);

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let command = match args::parse(&raw) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}\n\n{}", args::USAGE);
            std::process::exit(2);
        }
    };

    let config = config::load(Path::new("."));
    commands::run(command, &config)
}
