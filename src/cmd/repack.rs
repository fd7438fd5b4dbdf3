use camino::Utf8PathBuf;
use clap::Parser;
use snafu::prelude::*;

use crate::{
    error::*,
    fusion::repack,
    helpers::{config::FusionConfig, file, output},
};

#[derive(Clone, Debug, Parser)]
pub struct RepackCommand {
    /// Dashboard to repack (`-` for the standard input)
    #[arg(long)]
    dashboard: Utf8PathBuf,

    /// Write the repacked dashboard here instead of the standard output
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Write the JSON on a single line instead of pretty-printing it
    #[arg(long)]
    compact: bool,
}

impl RepackCommand {
    pub fn run(&self, config: &FusionConfig) -> Result<(), Error> {
        let mut dashboard = file::read_dashboard(&self.dashboard)?;

        dashboard
            .panels()
            .and_then(|panels| repack(panels, &config.layout))
            .and_then(|panels| dashboard.set_panels(&panels))
            .context(RepackSnafu {
                path: self.dashboard.clone(),
            })?;

        output::write(
            self.output.as_deref(),
            &output::format_dashboard(&dashboard, self.compact)?,
        )
    }
}
