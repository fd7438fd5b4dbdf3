use clap::Subcommand;

use crate::error::*;
use crate::helpers::config::FusionConfig;

pub mod merge;
use merge::MergeCommand;
pub mod repack;
use repack::RepackCommand;

#[derive(Clone, Debug, Subcommand)]
pub enum FusionCommand {
    /// Merge panels into a base dashboard
    #[command(name = "merge")]
    Merge(MergeCommand),
    /// Recompute the grid positions of a dashboard's panels
    #[command(name = "repack")]
    Repack(RepackCommand),
}

impl FusionCommand {
    pub fn run(&self, config: &FusionConfig) -> Result<(), Error> {
        match self {
            FusionCommand::Merge(cmd) => cmd.run(config),
            FusionCommand::Repack(cmd) => cmd.run(config),
        }
    }
}
