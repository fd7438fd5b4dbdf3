use camino::Utf8PathBuf;
use clap::Parser;
use log::LevelFilter;

use dashfusion::{cmd::FusionCommand, helpers::config::FusionConfig, helpers::output::exit_result};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct FusionCli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// TOML file with the layout settings and default placement
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: FusionCommand,
}

fn main() {
    // Parse the typed CLI
    let cli = FusionCli::parse();

    // Check whether to enable debug log
    if cli.debug {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Info)
            .init();
    }

    // This helper function will set the proper exit code
    // and print errors recursively
    exit_result(
        FusionConfig::load(cli.config.as_deref()).and_then(|config| cli.command.run(&config)),
    );
}
